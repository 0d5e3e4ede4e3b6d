mod game_camera;
mod game_snapshot;
mod name_plate_settings;
mod name_plates;
mod rainbow;

pub use game_camera::GameCamera;
pub use game_snapshot::{
    dd_team_color, CharacterSnapshot, ClientData, ClientState, ExtendedCharacterData,
    GameSnapshot, InputState, PlayerInfo, PlayerTeam, SpectatorInfo, MAX_CLIENTS, TEAM_SUPER,
};
pub use name_plate_settings::{
    HookStrongWeakMode, NamePlateSettings, PlayerProfile, ShowDirection,
};
pub use name_plates::NamePlates;
pub use rainbow::{RainbowMode, RainbowSettings, RainbowState};
