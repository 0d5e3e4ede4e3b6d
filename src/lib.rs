#![allow(clippy::type_complexity)]
#![allow(clippy::too_many_arguments)]

use bevy::{
    log::{Level, LogPlugin},
    prelude::{
        App, Camera2dBundle, ClearColor, Color, Commands, DefaultPlugins, IntoSystemConfigs,
        Plugin, PluginGroup, Startup, Update,
    },
    window::{PresentMode, Window, WindowMode, WindowPlugin, WindowResolution},
};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub mod events;
pub mod name_plate;
pub mod render;
pub mod resources;
pub mod systems;
pub mod ui;

use events::NamePlateResetEvent;
use render::{load_name_plate_sprites_system, EguiTextStore, NamePlateSprites};
use resources::{
    GameCamera, GameSnapshot, NamePlateSettings, NamePlates, PlayerProfile, RainbowSettings,
    RainbowState,
};
use systems::{
    demo_world_draw_system, demo_world_setup_system, demo_world_update_system,
    name_plate_system, rainbow_system, DemoWorld,
};
use ui::ui_name_plate_settings_system;

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum GraphicsModeConfig {
    #[serde(rename = "window")]
    Window { width: f32, height: f32 },
    #[serde(rename = "fullscreen")]
    Fullscreen,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct GraphicsConfig {
    pub mode: GraphicsModeConfig,
    pub disable_vsync: bool,
    /// Asset directory with name plate icon textures, shapes are drawn when unset.
    pub name_plate_sprites: Option<String>,
}

impl Default for GraphicsConfig {
    fn default() -> Self {
        Self {
            mode: GraphicsModeConfig::Window {
                width: 1280.0,
                height: 720.0,
            },
            disable_vsync: false,
            name_plate_sprites: None,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Number of simulated players, including the local player and dummy.
    pub players: usize,
    pub seed: Option<u64>,
    /// Simulate demo playback instead of an online session.
    pub demo_playback: bool,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            players: 12,
            seed: None,
            demo_playback: false,
        }
    }
}

#[derive(Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub graphics: GraphicsConfig,
    pub name_plates: NamePlateSettings,
    pub player: PlayerProfile,
    pub rainbow: RainbowSettings,
    pub demo: DemoConfig,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },
}

pub fn default_config_path() -> PathBuf {
    directories::ProjectDirs::from("", "", "tee-nameplates")
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("config.toml"))
}

pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let toml_str = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.into(),
        source,
    })?;

    toml::from_str(&toml_str).map_err(|source| ConfigError::Toml {
        path: path.into(),
        source,
    })
}

/// Loads the configuration, falling back to defaults when it is missing or invalid.
///
/// The logger is not installed yet at this point, so problems go to stdout.
pub fn load_config_or_default(path: &Path) -> Config {
    match load_config(path) {
        Ok(config) => {
            println!("Read configuration from {}", path.to_string_lossy());
            config
        }
        Err(error) => {
            println!("Using default configuration, {}", error);
            Config::default()
        }
    }
}

/// Name plate rendering driven by a simulated game world.
pub struct NamePlatesPlugin {
    pub demo: DemoConfig,
    pub sprite_directory: Option<String>,
}

impl Plugin for NamePlatesPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<NamePlateSettings>()
            .init_resource::<PlayerProfile>()
            .init_resource::<RainbowSettings>()
            .init_resource::<RainbowState>()
            .init_resource::<GameSnapshot>()
            .init_resource::<GameCamera>()
            .init_resource::<NamePlates>()
            .init_resource::<EguiTextStore>()
            .insert_resource(NamePlateSprites::from_directory(
                self.sprite_directory.clone(),
            ))
            .insert_resource(DemoWorld::new(&self.demo))
            .add_event::<NamePlateResetEvent>();

        app.add_systems(
            Startup,
            (demo_world_setup_system, load_name_plate_sprites_system),
        );

        // The world layer must be painted before the plates on top of it
        app.add_systems(
            Update,
            (
                demo_world_update_system,
                rainbow_system,
                demo_world_draw_system,
                name_plate_system,
                ui_name_plate_settings_system,
            )
                .chain(),
        );
    }
}

pub fn run_client(config: Config) {
    let (width, height) = match config.graphics.mode {
        GraphicsModeConfig::Window { width, height } => (width, height),
        GraphicsModeConfig::Fullscreen => (1920.0, 1080.0),
    };

    let mut app = App::new();
    app.insert_resource(ClearColor(Color::rgb(0.45, 0.56, 0.67)))
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "tee-nameplates".to_string(),
                        present_mode: if config.graphics.disable_vsync {
                            PresentMode::Immediate
                        } else {
                            PresentMode::Fifo
                        },
                        resolution: WindowResolution::new(width, height),
                        mode: if config.graphics.mode == GraphicsModeConfig::Fullscreen {
                            WindowMode::BorderlessFullscreen
                        } else {
                            WindowMode::Windowed
                        },
                        ..Default::default()
                    }),
                    ..Default::default()
                })
                .set(LogPlugin {
                    level: Level::INFO,
                    filter: "wgpu=error,naga=warn,tee_nameplates=debug".to_string(),
                }),
        )
        .add_plugins(bevy_egui::EguiPlugin);

    app.insert_resource(config.name_plates)
        .insert_resource(config.player)
        .insert_resource(config.rainbow)
        .add_plugins(NamePlatesPlugin {
            demo: config.demo,
            sprite_directory: config.graphics.name_plate_sprites,
        })
        .add_systems(Startup, spawn_camera_system);

    app.run();
}

fn spawn_camera_system(mut commands: Commands) {
    commands.spawn(Camera2dBundle::default());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::{RainbowMode, ShowDirection};

    #[test]
    fn config_sections_are_optional() {
        let config: Config = toml::from_str(
            r#"
            [graphics]
            disable_vsync = true

            [name_plates]
            show_clan = true
            show_direction = "everyone"

            [rainbow]
            mode = "pulse"

            [demo]
            players = 4
            "#,
        )
        .unwrap();

        assert!(config.graphics.disable_vsync);
        assert_eq!(
            config.graphics.mode,
            GraphicsModeConfig::Window {
                width: 1280.0,
                height: 720.0
            }
        );
        assert!(config.name_plates.show_clan);
        assert_eq!(config.name_plates.show_direction, ShowDirection::Everyone);
        assert_eq!(config.name_plates.size, 50);
        assert_eq!(config.rainbow.mode, RainbowMode::Pulse);
        assert_eq!(config.demo.players, 4);
        assert_eq!(config.demo.seed, None);
    }

    #[test]
    fn fullscreen_mode_is_tagged() {
        let config: Config = toml::from_str(
            r#"
            [graphics.mode]
            type = "fullscreen"
            "#,
        )
        .unwrap();
        assert_eq!(config.graphics.mode, GraphicsModeConfig::Fullscreen);
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = load_config(Path::new("/nonexistent/tee-nameplates/config.toml"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn invalid_toml_is_parse_error() {
        let path = std::env::temp_dir().join(format!(
            "tee-nameplates-invalid-{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, "[name_plates\nshow = ").unwrap();

        let result = load_config(&path);
        std::fs::remove_file(&path).ok();
        assert!(matches!(result, Err(ConfigError::Toml { .. })));
    }
}
