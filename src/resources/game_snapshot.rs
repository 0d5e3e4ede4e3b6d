use bevy::prelude::{Color, Resource, Vec2};

pub const MAX_CLIENTS: usize = 64;

/// DDRace team whose members see and interact with everyone.
pub const TEAM_SUPER: u32 = MAX_CLIENTS as u32;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ClientState {
    #[default]
    Offline,
    Online,
    DemoPlayback,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PlayerTeam {
    Spectators,
    #[default]
    Red,
    Blue,
}

#[derive(Copy, Clone, Debug, Default)]
pub struct PlayerInfo {
    pub local: bool,
}

#[derive(Clone, Debug)]
pub struct ClientData {
    pub name: String,
    pub clan: String,
    pub friend: bool,
    pub team: PlayerTeam,
    pub ddrace_team: u32,
    pub solo: bool,
    pub render_pos: Vec2,
    /// Position of the body left behind while spectating.
    pub spec_char: Option<Vec2>,
    pub body_color: Color,
    /// Overrides `body_color` while a color effect is active.
    pub effect_color: Option<Color>,
}

impl ClientData {
    pub fn render_color(&self) -> Color {
        self.effect_color.unwrap_or(self.body_color)
    }
}

impl Default for ClientData {
    fn default() -> Self {
        Self {
            name: String::new(),
            clan: String::new(),
            friend: false,
            team: PlayerTeam::default(),
            ddrace_team: 0,
            solo: false,
            render_pos: Vec2::ZERO,
            spec_char: None,
            body_color: Color::rgb(0.8, 0.6, 0.4),
            effect_color: None,
        }
    }
}

#[derive(Copy, Clone, Debug, Default)]
pub struct ExtendedCharacterData {
    pub strong_weak_id: i32,
}

#[derive(Copy, Clone, Debug, Default)]
pub struct CharacterSnapshot {
    pub active: bool,
    pub direction: i32,
    pub jumped: i32,
    pub extended: Option<ExtendedCharacterData>,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct InputState {
    pub direction: i32,
    pub jump: bool,
}

#[derive(Copy, Clone, Debug, Default)]
pub struct SpectatorInfo {
    pub active: bool,
    /// `None` while in free view.
    pub spectator_id: Option<usize>,
}

/// Game state of the current frame, indexed by client id.
#[derive(Resource)]
pub struct GameSnapshot {
    pub client_state: ClientState,
    pub player_infos: [Option<PlayerInfo>; MAX_CLIENTS],
    pub clients: Vec<ClientData>,
    pub characters: [CharacterSnapshot; MAX_CLIENTS],
    pub local_client_id: Option<usize>,
    /// Client ids of the main player and the dummy.
    pub local_ids: [Option<usize>; 2],
    pub active_dummy: usize,
    pub inputs: [InputState; 2],
    pub target_positions: [Vec2; 2],
    pub spec_info: SpectatorInfo,
    pub multi_view: bool,
    pub team_play: bool,
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            client_state: ClientState::Offline,
            player_infos: [None; MAX_CLIENTS],
            clients: vec![ClientData::default(); MAX_CLIENTS],
            characters: [CharacterSnapshot::default(); MAX_CLIENTS],
            local_client_id: None,
            local_ids: [None; 2],
            active_dummy: 0,
            inputs: [InputState::default(); 2],
            target_positions: [Vec2::ZERO; 2],
            spec_info: SpectatorInfo::default(),
            multi_view: false,
            team_play: false,
        }
    }
}

impl GameSnapshot {
    pub fn is_demo_playback(&self) -> bool {
        self.client_state == ClientState::DemoPlayback
    }

    pub fn is_online_or_playback(&self) -> bool {
        matches!(
            self.client_state,
            ClientState::Online | ClientState::DemoPlayback
        )
    }

    /// Client id of the player currently followed by the spectator camera.
    pub fn followed_client_id(&self) -> Option<usize> {
        if self.spec_info.active && !self.multi_view {
            self.spec_info.spectator_id
        } else {
            None
        }
    }

    /// The player hook priorities are compared against.
    pub fn reference_client_id(&self) -> Option<usize> {
        self.followed_client_id().or(self.local_client_id)
    }

    pub fn is_other_team(&self, client_id: usize) -> bool {
        let Some(local_id) = self.local_client_id else {
            return false;
        };

        let team = |id: usize| self.clients[id].ddrace_team;

        if self.clients[local_id].team == PlayerTeam::Spectators
            && self.spec_info.spectator_id.is_none()
        {
            false
        } else if let Some(spectator_id) =
            self.spec_info.spectator_id.filter(|_| self.spec_info.active)
        {
            if team(client_id) == TEAM_SUPER || team(spectator_id) == TEAM_SUPER {
                return false;
            }
            team(spectator_id) != team(client_id)
        } else if (self.clients[local_id].solo || self.clients[client_id].solo)
            && client_id != local_id
        {
            true
        } else if team(client_id) == TEAM_SUPER || team(local_id) == TEAM_SUPER {
            false
        } else {
            team(local_id) != team(client_id)
        }
    }
}

/// Distinct color per DDRace team, adjacent teams are spread by the golden angle.
pub fn dd_team_color(team: u32, lightness: f32) -> Color {
    let angle = (team as f32 - 1.0) * 360.0 / (1.0 + 5.0_f32.sqrt());
    Color::hsl(angle.rem_euclid(360.0), 1.0, lightness)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot_with_local(local_id: usize) -> GameSnapshot {
        let mut snapshot = GameSnapshot {
            client_state: ClientState::Online,
            local_client_id: Some(local_id),
            ..Default::default()
        };
        snapshot.local_ids[0] = Some(local_id);
        snapshot
    }

    #[test]
    fn reference_is_local_unless_following() {
        let mut snapshot = snapshot_with_local(3);
        assert_eq!(snapshot.reference_client_id(), Some(3));

        snapshot.spec_info = SpectatorInfo {
            active: true,
            spectator_id: Some(7),
        };
        assert_eq!(snapshot.reference_client_id(), Some(7));

        snapshot.multi_view = true;
        assert_eq!(snapshot.reference_client_id(), Some(3));

        snapshot.multi_view = false;
        snapshot.spec_info.spectator_id = None;
        assert_eq!(snapshot.reference_client_id(), Some(3));
    }

    #[test]
    fn other_team_compares_ddrace_teams() {
        let mut snapshot = snapshot_with_local(0);
        snapshot.clients[1].ddrace_team = 2;
        snapshot.clients[2].ddrace_team = 0;
        assert!(snapshot.is_other_team(1));
        assert!(!snapshot.is_other_team(2));

        snapshot.clients[1].ddrace_team = TEAM_SUPER;
        assert!(!snapshot.is_other_team(1));

        snapshot.clients[2].solo = true;
        assert!(snapshot.is_other_team(2));
        assert!(!snapshot.is_other_team(0));
    }

    #[test]
    fn no_local_player_means_no_other_team() {
        let mut snapshot = GameSnapshot::default();
        snapshot.clients[1].ddrace_team = 5;
        assert!(!snapshot.is_other_team(1));
    }

    #[test]
    fn team_colors_start_at_red() {
        let [r, g, b, _] = dd_team_color(1, 0.5).as_rgba_f32();
        assert!(r > 0.99 && g < 0.01 && b < 0.01);

        let first = dd_team_color(2, 0.75).as_rgba_f32();
        let second = dd_team_color(3, 0.75).as_rgba_f32();
        assert_ne!(first, second);
    }
}
