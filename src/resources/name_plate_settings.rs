use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShowDirection {
    Off,
    #[default]
    Others,
    Everyone,
    OnlySelf,
}

impl ShowDirection {
    pub const ALL: [ShowDirection; 4] = [
        ShowDirection::Off,
        ShowDirection::Others,
        ShowDirection::Everyone,
        ShowDirection::OnlySelf,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ShowDirection::Off => "Off",
            ShowDirection::Others => "Others",
            ShowDirection::Everyone => "Everyone",
            ShowDirection::OnlySelf => "Only self",
        }
    }

    pub fn shows(self, local: bool) -> bool {
        match self {
            ShowDirection::Off => false,
            ShowDirection::Others => !local,
            ShowDirection::Everyone => true,
            ShowDirection::OnlySelf => local,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HookStrongWeakMode {
    #[default]
    Off,
    Icon,
    IconAndId,
}

impl HookStrongWeakMode {
    pub const ALL: [HookStrongWeakMode; 3] = [
        HookStrongWeakMode::Off,
        HookStrongWeakMode::Icon,
        HookStrongWeakMode::IconAndId,
    ];

    pub fn label(self) -> &'static str {
        match self {
            HookStrongWeakMode::Off => "Off",
            HookStrongWeakMode::Icon => "Icon",
            HookStrongWeakMode::IconAndId => "Icon and id",
        }
    }
}

/// Name plate options. Sizes are percentages on top of the 18 point base size.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize, Resource)]
#[serde(default)]
pub struct NamePlateSettings {
    pub show: bool,
    pub show_own: bool,
    pub size: u32,
    pub show_clan: bool,
    pub clan_size: u32,
    pub show_ids: bool,
    pub ids_new_line: bool,
    pub ids_size: u32,
    pub team_colors: bool,
    pub friend_mark: bool,
    pub hook_strong_weak: HookStrongWeakMode,
    pub hook_strong_weak_size: u32,
    /// Ignore distance to the cursor when fading plates.
    pub always_show: bool,
    /// Opacity of players in other teams, in percent.
    pub show_others_alpha: u32,
    pub show_direction: ShowDirection,
    pub direction_size: u32,
    pub show_spec_char_name_plates: bool,
    pub debug: bool,
}

impl Default for NamePlateSettings {
    fn default() -> Self {
        Self {
            show: true,
            show_own: false,
            size: 50,
            show_clan: false,
            clan_size: 30,
            show_ids: false,
            ids_new_line: false,
            ids_size: 50,
            team_colors: true,
            friend_mark: false,
            hook_strong_weak: HookStrongWeakMode::Off,
            hook_strong_weak_size: 30,
            always_show: true,
            show_others_alpha: 40,
            show_direction: ShowDirection::Others,
            direction_size: 50,
            show_spec_char_name_plates: true,
            debug: false,
        }
    }
}

impl NamePlateSettings {
    /// Nothing to draw at all, neither plates nor direction arrows.
    pub fn is_disabled(&self) -> bool {
        !self.show && self.show_direction == ShowDirection::Off
    }
}

/// Names used for the local player and dummy outside of a game.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize, Resource)]
#[serde(default)]
pub struct PlayerProfile {
    pub player_name: String,
    pub player_clan: String,
    pub dummy_name: String,
    pub dummy_clan: String,
    /// 0 while controlling the main player, 1 for the dummy.
    pub active_dummy: usize,
}
