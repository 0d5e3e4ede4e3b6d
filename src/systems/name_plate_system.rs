use bevy::{
    prelude::{Color, EventReader, Local, Res, ResMut, Vec2},
    window::WindowResized,
};
use bevy_egui::EguiContexts;

use crate::{
    events::NamePlateResetEvent,
    name_plate::{font_size_from_percent, HookStrongWeak, NamePlate, NamePlateRenderData},
    render::{
        world_layer_id, EguiNamePlateBackend, EguiTextStore, NamePlateBackend, NamePlateSprites,
    },
    resources::{
        dd_team_color, GameCamera, GameSnapshot, HookStrongWeakMode, NamePlateSettings,
        NamePlates, PlayerProfile, PlayerTeam, ShowDirection, MAX_CLIENTS,
    },
};

const SPEC_CHAR_ALPHA: f32 = 0.4;
const FADE_DISTANCE: f32 = 200.0;
const TEAM_COLOR_LIGHTNESS: f32 = 0.75;
const PREVIEW_DDRACE_TEAM: u32 = 13;

// Plates are assumed to fit a 800x800 box directly above the tee
const CULL_PADDING_X: f32 = 400.0;
const CULL_PADDING_BOTTOM: f32 = 800.0;

fn direction_flags(direction: i32, jump: bool) -> (bool, bool, bool) {
    (direction == -1, jump, direction == 1)
}

/// Resolves everything the name plate of `client_id` shows this frame.
pub fn build_render_data<'a>(
    game: &'a GameSnapshot,
    settings: &NamePlateSettings,
    client_id: usize,
    position: Vec2,
    alpha: f32,
    force_alpha: bool,
) -> NamePlateRenderData<'a> {
    let client = &game.clients[client_id];
    let local = game.player_infos[client_id].map_or(false, |info| info.local);
    let show = settings.show && (!local || settings.show_own);

    let font_size = font_size_from_percent(settings.size);
    let mut data = NamePlateRenderData {
        in_game: true,
        position,
        show_name: show,
        name: &client.name,
        font_size,
        show_friend_mark: show && settings.friend_mark && client.friend,
        show_client_id: show && (settings.debug || settings.show_ids),
        client_id,
        client_id_new_line: settings.ids_new_line,
        font_size_client_id: if settings.ids_new_line {
            font_size_from_percent(settings.ids_size)
        } else {
            font_size
        },
        show_clan: show && settings.show_clan,
        clan: &client.clan,
        font_size_clan: font_size_from_percent(settings.clan_size),
        font_size_hook_strong_weak: font_size_from_percent(settings.hook_strong_weak_size),
        font_size_direction: font_size_from_percent(settings.direction_size),
        ..Default::default()
    };

    let mut alpha = alpha;
    if !force_alpha {
        if !settings.always_show {
            let distance = game.target_positions[game.active_dummy.min(1)].distance(position);
            alpha *= (1.0 - (distance / FADE_DISTANCE).powi(16)).clamp(0.0, 1.0);
        }
        if game.is_other_team(client_id) {
            alpha *= settings.show_others_alpha as f32 / 100.0;
        }
    }
    data.alpha = alpha;

    if settings.team_colors {
        if game.team_play {
            match client.team {
                PlayerTeam::Red => data.color = Color::rgb(1.0, 0.5, 0.5),
                PlayerTeam::Blue => data.color = Color::rgb(0.7, 0.7, 1.0),
                PlayerTeam::Spectators => {}
            }
        } else if client.ddrace_team != 0 {
            data.color = dd_team_color(client.ddrace_team, TEAM_COLOR_LIGHTNESS);
        }
    }
    data.color.set_a(alpha);

    data.show_direction = settings.show_direction.shows(local);
    if data.show_direction {
        let partner_dummy = 1 - game.active_dummy.min(1);
        let (left, jump, right) = if !game.is_demo_playback()
            && game.local_ids[partner_dummy] == Some(client_id)
        {
            let input = &game.inputs[partner_dummy];
            direction_flags(input.direction, input.jump)
        } else if !game.is_demo_playback() && local {
            let input = &game.inputs[game.active_dummy.min(1)];
            direction_flags(input.direction, input.jump)
        } else {
            let character = &game.characters[client_id];
            direction_flags(character.direction, character.jumped & 1 != 0)
        };
        data.dir_left = left;
        data.dir_jump = jump;
        data.dir_right = right;
    }

    let reference = game
        .reference_client_id()
        .filter(|&id| id < MAX_CLIENTS)
        .map(|id| (id, &game.characters[id]));
    if let Some((reference_id, reference)) = reference {
        if let (Some(selected), Some(other)) =
            (reference.extended, game.characters[client_id].extended)
        {
            data.hook_strong_weak_id = other.strong_weak_id;
            data.show_hook_strong_weak_id =
                settings.debug || settings.hook_strong_weak == HookStrongWeakMode::IconAndId;

            if reference_id == client_id {
                data.show_hook_strong_weak = data.show_hook_strong_weak_id;
            } else {
                data.hook_strong_weak = if selected.strong_weak_id > other.strong_weak_id {
                    HookStrongWeak::Strong
                } else {
                    HookStrongWeak::Weak
                };
                data.show_hook_strong_weak =
                    settings.debug || settings.hook_strong_weak != HookStrongWeakMode::Off;
            }
        }
    }

    data
}

/// Draws the name plates of every player in view. Returns how many plates
/// were drawn.
pub fn render_name_plates<B: NamePlateBackend>(
    backend: &mut B,
    name_plates: &mut NamePlates,
    game: &GameSnapshot,
    settings: &NamePlateSettings,
) -> usize {
    if !game.is_online_or_playback() || settings.is_disabled() {
        return 0;
    }

    let visible_area = backend.screen().expand(
        CULL_PADDING_X,
        0.0,
        CULL_PADDING_X,
        CULL_PADDING_BOTTOM,
    );
    let mut rendered = 0;

    for client_id in 0..MAX_CLIENTS {
        if game.player_infos[client_id].is_none() {
            continue;
        }
        let Some(name_plate) = name_plates.get_mut(client_id) else {
            continue;
        };
        let client = &game.clients[client_id];

        if settings.show_spec_char_name_plates {
            if let Some(spec_char) = client.spec_char {
                if visible_area.contains(spec_char) {
                    let data = build_render_data(
                        game,
                        settings,
                        client_id,
                        spec_char,
                        SPEC_CHAR_ALPHA,
                        true,
                    );
                    name_plate.render(backend, &data);
                    rendered += 1;
                }
            }
        }

        if game.characters[client_id].active && visible_area.contains(client.render_pos) {
            let data = build_render_data(game, settings, client_id, client.render_pos, 1.0, false);
            name_plate.render(backend, &data);
            rendered += 1;
        }
    }

    rendered
}

/// Renders a stand-alone plate for the settings menu. `dummy` selects the
/// main player (0) or the dummy (1) profile.
pub fn render_name_plate_preview<B: NamePlateBackend>(
    backend: &mut B,
    settings: &NamePlateSettings,
    profile: &PlayerProfile,
    position: Vec2,
    dummy: usize,
) {
    let (name, clan): (&str, &str) = if dummy == 0 {
        (&profile.player_name, &profile.player_clan)
    } else {
        (&profile.dummy_name, &profile.dummy_clan)
    };
    let name = if name.is_empty() { "Player123" } else { name };
    let clan = if clan.is_empty() { "Clan456" } else { clan };

    let font_size = font_size_from_percent(settings.size);
    let client_id = dummy + 1;
    let show_direction = settings.show_direction != ShowDirection::Off;
    let show_hook_strong_weak_id = settings.hook_strong_weak == HookStrongWeakMode::IconAndId;
    let (hook_strong_weak, show_hook_strong_weak) = if dummy == profile.active_dummy {
        (HookStrongWeak::Unknown, show_hook_strong_weak_id)
    } else if client_id == 2 {
        (
            HookStrongWeak::Strong,
            settings.hook_strong_weak != HookStrongWeakMode::Off,
        )
    } else {
        (
            HookStrongWeak::Weak,
            settings.hook_strong_weak != HookStrongWeakMode::Off,
        )
    };

    let data = NamePlateRenderData {
        in_game: false,
        position,
        color: if settings.team_colors {
            dd_team_color(PREVIEW_DDRACE_TEAM, TEAM_COLOR_LIGHTNESS)
        } else {
            backend.default_text_color()
        },
        alpha: 1.0,
        show_name: settings.show,
        name,
        font_size,
        show_friend_mark: settings.show && settings.friend_mark,
        show_client_id: settings.show && (settings.debug || settings.show_ids),
        client_id,
        client_id_new_line: settings.ids_new_line,
        font_size_client_id: if settings.ids_new_line {
            font_size_from_percent(settings.ids_size)
        } else {
            font_size
        },
        show_clan: settings.show && settings.show_clan,
        clan,
        font_size_clan: font_size_from_percent(settings.clan_size),
        show_direction,
        dir_left: true,
        dir_jump: true,
        dir_right: true,
        font_size_direction: font_size_from_percent(settings.direction_size),
        show_hook_strong_weak,
        hook_strong_weak,
        show_hook_strong_weak_id,
        hook_strong_weak_id: client_id as i32,
        font_size_hook_strong_weak: font_size_from_percent(settings.hook_strong_weak_size),
    };

    let mut name_plate = NamePlate::default();
    name_plate.render(backend, &data);
    name_plate.reset(backend);
}

pub fn name_plate_system(
    mut egui_context: EguiContexts,
    mut name_plates: ResMut<NamePlates>,
    mut text_store: ResMut<EguiTextStore>,
    sprites: Res<NamePlateSprites>,
    game: Res<GameSnapshot>,
    settings: Res<NamePlateSettings>,
    camera: Res<GameCamera>,
    mut window_resized_events: EventReader<WindowResized>,
    mut reset_events: EventReader<NamePlateResetEvent>,
    mut last_pixels_per_point: Local<Option<f32>>,
) {
    let ctx = egui_context.ctx_mut();
    let pixels_per_point = ctx.pixels_per_point();
    let painter = ctx.layer_painter(world_layer_id());
    let screen = camera.screen(painter.clip_rect().aspect_ratio());
    let mut backend = EguiNamePlateBackend::new(painter, &mut text_store, &sprites, screen);

    let resized = window_resized_events.iter().count() > 0;
    let reset_requested = reset_events.iter().count() > 0;
    let scale_changed = last_pixels_per_point.map_or(false, |last| last != pixels_per_point);
    *last_pixels_per_point = Some(pixels_per_point);

    if resized || reset_requested || scale_changed {
        log::debug!(
            "Resetting name plates (resized: {}, requested: {}, scale changed: {})",
            resized,
            reset_requested,
            scale_changed
        );
        name_plates.reset(&mut backend);
    }

    let rendered = render_name_plates(&mut backend, &mut name_plates, &game, &settings);
    log::trace!("Rendered {} name plates", rendered);
}
