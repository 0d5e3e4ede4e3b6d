use bevy::{
    input::mouse::{MouseScrollUnit, MouseWheel},
    prelude::{Color, EventReader, Input, KeyCode, Query, Res, ResMut, Resource, Time, Vec2, With},
    window::{PrimaryWindow, Window},
};
use bevy_egui::{egui, EguiContexts};
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    render::{to_color32, world_layer_id},
    resources::{
        ClientState, ExtendedCharacterData, GameCamera, GameSnapshot, InputState, PlayerInfo,
        MAX_CLIENTS,
    },
    DemoConfig,
};

const TEE_RADIUS: f32 = 28.0;
const GROUND_Y: f32 = 0.0;
const WORLD_HALF_WIDTH: f32 = 1600.0;
const RUN_SPEED: f32 = 400.0;
const JUMP_SPEED: f32 = 750.0;
const GRAVITY: f32 = 1800.0;
const TEAM_SWAP_INTERVAL: f32 = 12.0;

const NAMES: [&str; 12] = [
    "nameless tee",
    "brainless tee",
    "Cootie",
    "Pioneer",
    "bRaiN",
    "Ravie",
    "Zwelf",
    "Sans",
    "hookfan",
    "Teeworlds",
    "unfreeze me",
    "Chillerdragon",
];
const CLANS: [&str; 4] = ["", "DDNet", "Tee Team", "Unique"];

#[derive(Clone, Debug, Default)]
struct DemoTee {
    velocity: Vec2,
    input: InputState,
    next_decision: f32,
    grounded: bool,
}

#[derive(Resource)]
pub struct DemoWorld {
    tees: Vec<DemoTee>,
    rng: StdRng,
    time: f32,
    next_team_swap: f32,
    players: usize,
    spectator_id: Option<usize>,
    demo_playback: bool,
}

impl DemoWorld {
    pub fn new(config: &DemoConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let players = config.players.clamp(2, MAX_CLIENTS);

        Self {
            tees: vec![DemoTee::default(); players],
            rng,
            time: 0.0,
            next_team_swap: TEAM_SWAP_INTERVAL,
            players,
            spectator_id: (players > 4).then_some(players - 1),
            demo_playback: config.demo_playback,
        }
    }

    /// Fills the snapshot with the initial set of players. Slot 0 is the
    /// main player, slot 1 its dummy.
    pub fn populate(&mut self, game: &mut GameSnapshot) {
        *game = GameSnapshot {
            client_state: if self.demo_playback {
                ClientState::DemoPlayback
            } else {
                ClientState::Online
            },
            local_client_id: Some(0),
            local_ids: [Some(0), Some(1)],
            ..Default::default()
        };

        for client_id in 0..self.players {
            game.player_infos[client_id] = Some(PlayerInfo {
                local: client_id == 0,
            });

            let client = &mut game.clients[client_id];
            client.name = NAMES[client_id % NAMES.len()].to_string();
            client.clan = CLANS[client_id % CLANS.len()].to_string();
            client.friend = client_id % 5 == 3;
            client.ddrace_team = if client_id < 2 {
                0
            } else {
                (client_id as u32 % 4) * 2
            };
            client.render_pos = Vec2::new(
                (client_id as f32 - self.players as f32 / 2.0) * 160.0,
                GROUND_Y - TEE_RADIUS,
            );
            client.body_color = Color::hsl(self.rng.gen_range(0.0..360.0), 0.6, 0.6);

            let character = &mut game.characters[client_id];
            character.active = Some(client_id) != self.spectator_id;
            character.extended = Some(ExtendedCharacterData {
                strong_weak_id: self.rng.gen_range(0..MAX_CLIENTS as i32),
            });
        }

        if let Some(spectator_id) = self.spectator_id {
            game.clients[spectator_id].spec_char = Some(Vec2::new(-300.0, -260.0));
        }

        for tee in self.tees.iter_mut() {
            tee.grounded = true;
        }

        log::info!("Demo world populated with {} players", self.players);
    }

    /// Swaps control between the main player and the dummy.
    pub fn swap_dummy(&self, game: &mut GameSnapshot) {
        game.active_dummy = 1 - game.active_dummy.min(1);
        game.local_client_id = game.local_ids[game.active_dummy];

        for client_id in 0..self.players {
            if let Some(info) = game.player_infos[client_id].as_mut() {
                info.local = game.local_client_id == Some(client_id);
            }
        }
    }

    pub fn step(&mut self, game: &mut GameSnapshot, delta_seconds: f32, local_input: InputState) {
        self.time += delta_seconds;

        let active_dummy = game.active_dummy.min(1);
        game.inputs[active_dummy] = local_input;

        for client_id in 0..self.players {
            if !game.characters[client_id].active {
                continue;
            }

            let controlled = game.local_ids[active_dummy] == Some(client_id);
            let input = if controlled {
                local_input
            } else if game.local_ids.contains(&Some(client_id)) {
                game.inputs[1 - active_dummy]
            } else {
                self.bot_input(client_id)
            };

            let tee = &mut self.tees[client_id];
            tee.input = input;
            tee.velocity.x = input.direction as f32 * RUN_SPEED;
            if input.jump && tee.grounded {
                tee.velocity.y = -JUMP_SPEED;
                tee.grounded = false;
                game.characters[client_id].jumped |= 1;
            }
            tee.velocity.y += GRAVITY * delta_seconds;

            let client = &mut game.clients[client_id];
            client.render_pos += tee.velocity * delta_seconds;
            client.render_pos.x = client
                .render_pos
                .x
                .clamp(-WORLD_HALF_WIDTH, WORLD_HALF_WIDTH);

            if client.render_pos.y >= GROUND_Y - TEE_RADIUS {
                client.render_pos.y = GROUND_Y - TEE_RADIUS;
                tee.velocity.y = 0.0;
                tee.grounded = true;
                game.characters[client_id].jumped &= !1;
            }

            game.characters[client_id].direction = input.direction;
        }

        if self.time >= self.next_team_swap && self.players > 2 {
            self.next_team_swap += TEAM_SWAP_INTERVAL;
            let client_id = self.rng.gen_range(2..self.players);
            let team = self.rng.gen_range(0..4);
            game.clients[client_id].ddrace_team = team;
            log::debug!("Moved {} to team {}", game.clients[client_id].name, team);
        }
    }

    fn bot_input(&mut self, client_id: usize) -> InputState {
        let time = self.time;
        let tee = &mut self.tees[client_id];
        if time >= tee.next_decision {
            tee.next_decision = time + self.rng.gen_range(0.5..2.0);
            tee.input = InputState {
                direction: self.rng.gen_range(-1..=1),
                jump: self.rng.gen_bool(0.3),
            };
        }
        tee.input
    }
}

fn keyboard_input(keyboard: &Input<KeyCode>) -> InputState {
    let mut direction = 0;
    if keyboard.pressed(KeyCode::A) || keyboard.pressed(KeyCode::Left) {
        direction -= 1;
    }
    if keyboard.pressed(KeyCode::D) || keyboard.pressed(KeyCode::Right) {
        direction += 1;
    }

    InputState {
        direction,
        jump: keyboard.pressed(KeyCode::Space) || keyboard.pressed(KeyCode::W),
    }
}

pub fn demo_world_setup_system(mut demo_world: ResMut<DemoWorld>, mut game: ResMut<GameSnapshot>) {
    demo_world.populate(&mut game);
}

pub fn demo_world_update_system(
    time: Res<Time>,
    keyboard: Res<Input<KeyCode>>,
    query_window: Query<&Window, With<PrimaryWindow>>,
    mut demo_world: ResMut<DemoWorld>,
    mut game: ResMut<GameSnapshot>,
    mut camera: ResMut<GameCamera>,
    mut mouse_wheel_events: EventReader<MouseWheel>,
) {
    if keyboard.just_pressed(KeyCode::Tab) {
        demo_world.swap_dummy(&mut game);
    }

    for event in mouse_wheel_events.iter() {
        let steps = match event.unit {
            MouseScrollUnit::Line => event.y,
            MouseScrollUnit::Pixel => event.y / 40.0,
        };
        camera.zoom_by(steps);
    }

    demo_world.step(&mut game, time.delta_seconds(), keyboard_input(&keyboard));

    if let Some(local_pos) = game
        .local_client_id
        .map(|client_id| game.clients[client_id].render_pos)
    {
        let follow = (time.delta_seconds() * 8.0).min(1.0);
        camera.center = camera.center.lerp(local_pos - Vec2::new(0.0, 100.0), follow);
    }

    // The cursor is the fade target
    if let Ok(window) = query_window.get_single() {
        if let Some(cursor) = window.cursor_position() {
            let size = Vec2::new(window.width(), window.height());
            let screen = camera.screen(size.x / size.y);
            let world = Vec2::new(
                screen.x0 + cursor.x / size.x * screen.width(),
                screen.y0 + cursor.y / size.y * screen.height(),
            );
            let active_dummy = game.active_dummy.min(1);
            game.target_positions[active_dummy] = world;
        }
    }
}

pub fn demo_world_draw_system(
    mut egui_context: EguiContexts,
    game: Res<GameSnapshot>,
    camera: Res<GameCamera>,
) {
    let ctx = egui_context.ctx_mut();
    let painter = ctx.layer_painter(world_layer_id());
    let viewport = painter.clip_rect();
    let screen = camera.screen(viewport.aspect_ratio());
    let scale = viewport.height() / screen.height();
    let to_points = |world: Vec2| {
        egui::pos2(
            viewport.min.x + (world.x - screen.x0) * scale,
            viewport.min.y + (world.y - screen.y0) * scale,
        )
    };

    let ground = to_points(Vec2::new(screen.x0, GROUND_Y));
    painter.rect_filled(
        egui::Rect::from_min_max(egui::pos2(viewport.min.x, ground.y), viewport.max),
        egui::Rounding::none(),
        egui::Color32::from_rgb(74, 64, 58),
    );

    for client_id in 0..MAX_CLIENTS {
        if game.player_infos[client_id].is_none() {
            continue;
        }
        let client = &game.clients[client_id];

        if let Some(spec_char) = client.spec_char {
            painter.circle_filled(
                to_points(spec_char),
                TEE_RADIUS * scale,
                to_color32(client.render_color()).gamma_multiply(0.4),
            );
        }

        let character = &game.characters[client_id];
        if !character.active {
            continue;
        }

        let center = to_points(client.render_pos);
        painter.circle(
            center,
            TEE_RADIUS * scale,
            to_color32(client.render_color()),
            egui::Stroke::new(2.0, egui::Color32::BLACK),
        );

        let look = character.direction as f32 * TEE_RADIUS * 0.3 * scale;
        for eye in [-0.25, 0.25] {
            painter.circle_filled(
                center + egui::vec2(look + eye * TEE_RADIUS * scale, -TEE_RADIUS * 0.2 * scale),
                TEE_RADIUS * 0.12 * scale,
                egui::Color32::BLACK,
            );
        }
    }
}
