use bevy::prelude::{AssetServer, Handle, Image, Res, ResMut, Resource};
use bevy_egui::{egui, EguiContexts};
use enum_map::EnumMap;

use crate::render::NamePlateSprite;

#[derive(Clone)]
pub struct NamePlateSpriteTexture {
    pub handle: Handle<Image>,
    pub texture_id: egui::TextureId,
    pub uv: egui::Rect,
}

/// Optional textures for name plate icons. Missing entries are drawn with
/// plain shapes.
#[derive(Default, Resource)]
pub struct NamePlateSprites {
    /// Asset directory the textures are loaded from, relative to the asset root.
    pub directory: Option<String>,
    pub textures: EnumMap<NamePlateSprite, Option<NamePlateSpriteTexture>>,
}

impl NamePlateSprites {
    pub fn from_directory(directory: Option<String>) -> Self {
        Self {
            directory,
            ..Default::default()
        }
    }

    pub fn get(&self, sprite: NamePlateSprite) -> Option<&NamePlateSpriteTexture> {
        self.textures[sprite].as_ref()
    }
}

fn sprite_filename(sprite: NamePlateSprite) -> &'static str {
    match sprite {
        NamePlateSprite::Arrow => "arrow.png",
        NamePlateSprite::FriendHeart => "friend_heart.png",
        NamePlateSprite::HookStrong => "hook_strong.png",
        NamePlateSprite::HookWeak => "hook_weak.png",
        NamePlateSprite::HookIcon => "hook_icon.png",
    }
}

pub fn load_name_plate_sprites_system(
    asset_server: Res<AssetServer>,
    mut egui_context: EguiContexts,
    mut sprites: ResMut<NamePlateSprites>,
) {
    let Some(directory) = sprites.directory.clone() else {
        log::debug!("No name plate sprite directory configured, using shapes");
        return;
    };

    for (sprite, texture) in sprites.textures.iter_mut() {
        let path = format!("{}/{}", directory.trim_end_matches('/'), sprite_filename(sprite));
        let handle: Handle<Image> = asset_server.load(path.as_str());
        let texture_id = egui_context.add_image(handle.clone_weak());
        log::info!("Loading name plate sprite {:?} from {}", sprite, path);

        *texture = Some(NamePlateSpriteTexture {
            handle,
            texture_id,
            uv: egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
        });
    }
}
