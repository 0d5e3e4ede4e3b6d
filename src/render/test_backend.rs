use bevy::prelude::{Color, Vec2};

use super::{
    NamePlateSprite, ScreenRect, ScreenView, SpriteRender, TextHandle, TextRender,
    TextRenderFlags,
};

#[derive(Clone, Debug)]
pub struct RenderedText {
    pub text: String,
    pub color: Color,
    pub outline_color: Color,
    pub pos: Vec2,
}

#[derive(Clone, Debug)]
pub struct DrawnSprite {
    pub sprite: NamePlateSprite,
    pub center: Vec2,
    pub size: Vec2,
    pub rotation: f32,
    pub color: Color,
}

/// Records every call so tests can check what a name plate did.
/// Shaped text measures `len * font_size / 2` by `font_size`.
pub struct RecordingBackend {
    pub containers: Vec<Option<(String, f32)>>,
    pub shape_calls: usize,
    pub delete_calls: usize,
    pub rendered_texts: Vec<RenderedText>,
    pub sprites: Vec<DrawnSprite>,
    pub screen: ScreenRect,
    pub interface_screen: ScreenRect,
    pub screen_at_shape: Vec<ScreenRect>,
    pub flags: TextRenderFlags,
    pub flag_history: Vec<TextRenderFlags>,
    pub fail_shaping: bool,
}

impl Default for RecordingBackend {
    fn default() -> Self {
        Self {
            containers: Vec::new(),
            shape_calls: 0,
            delete_calls: 0,
            rendered_texts: Vec::new(),
            sprites: Vec::new(),
            screen: ScreenRect::new(0.0, 0.0, 1500.0, 1000.0),
            interface_screen: ScreenRect::new(-100.0, -100.0, 1400.0, 900.0),
            screen_at_shape: Vec::new(),
            flags: TextRenderFlags::empty(),
            flag_history: Vec::new(),
            fail_shaping: false,
        }
    }
}

impl RecordingBackend {
    pub fn live_containers(&self) -> usize {
        self.containers.iter().filter(|x| x.is_some()).count()
    }

    pub fn clear_frame(&mut self) {
        self.rendered_texts.clear();
        self.sprites.clear();
    }

    pub fn rendered(&self, text: &str) -> Option<&RenderedText> {
        self.rendered_texts.iter().find(|x| x.text == text)
    }
}

impl TextRender for RecordingBackend {
    fn shape_text(&mut self, handle: &mut TextHandle, text: &str, font_size: f32) {
        self.shape_calls += 1;
        self.screen_at_shape.push(self.screen);

        if self.fail_shaping || text.is_empty() {
            self.delete_text(handle);
            return;
        }

        let contents = Some((text.to_string(), font_size));
        match handle.index() {
            Some(index) => self.containers[index as usize] = contents,
            None => {
                self.containers.push(contents);
                *handle = TextHandle::new(self.containers.len() as u32 - 1);
            }
        }
    }

    fn text_bounding_box(&self, handle: TextHandle) -> Vec2 {
        handle
            .index()
            .and_then(|index| self.containers.get(index as usize))
            .and_then(|x| x.as_ref())
            .map_or(Vec2::ZERO, |(text, font_size)| {
                Vec2::new(text.len() as f32 * font_size / 2.0, *font_size)
            })
    }

    fn render_text(&mut self, handle: TextHandle, color: Color, outline_color: Color, pos: Vec2) {
        if let Some((text, _)) = handle
            .index()
            .and_then(|index| self.containers.get(index as usize))
            .and_then(|x| x.as_ref())
        {
            self.rendered_texts.push(RenderedText {
                text: text.clone(),
                color,
                outline_color,
                pos,
            });
        }
    }

    fn delete_text(&mut self, handle: &mut TextHandle) {
        if let Some(index) = handle.index() {
            self.delete_calls += 1;
            self.containers[index as usize] = None;
        }
        *handle = TextHandle::INVALID;
    }

    fn set_render_flags(&mut self, flags: TextRenderFlags) {
        self.flags = flags;
        self.flag_history.push(flags);
    }
}

impl SpriteRender for RecordingBackend {
    fn draw_sprite(
        &mut self,
        sprite: NamePlateSprite,
        center: Vec2,
        size: Vec2,
        rotation: f32,
        color: Color,
    ) {
        self.sprites.push(DrawnSprite {
            sprite,
            center,
            size,
            rotation,
            color,
        });
    }
}

impl ScreenView for RecordingBackend {
    fn screen(&self) -> ScreenRect {
        self.screen
    }

    fn map_screen(&mut self, screen: ScreenRect) {
        self.screen = screen;
    }

    fn map_screen_to_interface(&mut self) {
        self.screen = self.interface_screen;
    }
}
