mod backend;
mod egui_backend;
mod name_plate_sprites;

#[cfg(test)]
pub mod test_backend;

pub use backend::{
    interface_screen_size, NamePlateBackend, NamePlateSprite, ScreenRect, ScreenView,
    SpriteRender, TextHandle, TextRender, TextRenderFlags,
};
pub use egui_backend::{to_color32, world_layer_id, EguiNamePlateBackend, EguiTextStore};
pub use name_plate_sprites::{
    load_name_plate_sprites_system, NamePlateSpriteTexture, NamePlateSprites,
};
