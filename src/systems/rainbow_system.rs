use bevy::prelude::{Color, Res, ResMut, Time};

use crate::resources::{GameSnapshot, RainbowSettings, RainbowState, MAX_CLIENTS};

/// Recolors active characters with the current effect color, or clears the
/// override when the effect is off.
pub fn apply_rainbow(game: &mut GameSnapshot, settings: &RainbowSettings, color: Option<Color>) {
    for client_id in 0..MAX_CLIENTS {
        let local = game.local_client_id == Some(client_id);
        let active = game.characters[client_id].active;

        game.clients[client_id].effect_color =
            color.filter(|_| active && settings.applies_to(local));
    }
}

pub fn rainbow_system(
    time: Res<Time>,
    settings: Res<RainbowSettings>,
    mut rainbow: ResMut<RainbowState>,
    mut game: ResMut<GameSnapshot>,
) {
    let color = rainbow.advance(&settings, time.delta_seconds(), &mut rand::thread_rng());
    apply_rainbow(&mut game, &settings, color);
}
