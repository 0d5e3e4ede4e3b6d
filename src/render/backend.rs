use bevy::prelude::{Color, Vec2};
use bitflags::bitflags;
use enum_map::Enum;

/// Opaque handle to a shaped text container owned by a [`TextRender`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct TextHandle(Option<u32>);

impl TextHandle {
    pub const INVALID: TextHandle = TextHandle(None);

    pub fn new(index: u32) -> Self {
        Self(Some(index))
    }

    pub fn index(&self) -> Option<u32> {
        self.0
    }

    pub fn is_valid(&self) -> bool {
        self.0.is_some()
    }
}

bitflags! {
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
    pub struct TextRenderFlags: u32 {
        const NO_FIRST_CHARACTER_X_BEARING = 1 << 0;
        const NO_LAST_CHARACTER_ADVANCE = 1 << 1;
        const NO_PIXEL_ALIGNMENT = 1 << 2;
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Enum)]
pub enum NamePlateSprite {
    Arrow,
    FriendHeart,
    HookStrong,
    HookWeak,
    HookIcon,
}

/// World-space rectangle currently mapped onto the viewport.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ScreenRect {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl ScreenRect {
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        Self {
            x0: center.x - size.x / 2.0,
            y0: center.y - size.y / 2.0,
            x1: center.x + size.x / 2.0,
            y1: center.y + size.y / 2.0,
        }
    }

    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    pub fn expand(&self, left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            x0: self.x0 - left,
            y0: self.y0 - top,
            x1: self.x1 + right,
            y1: self.y1 + bottom,
        }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        (self.x0..=self.x1).contains(&point.x) && (self.y0..=self.y1).contains(&point.y)
    }
}

pub trait TextRender {
    /// Replaces the contents of `handle` with `text` shaped at `font_size`.
    /// Leaves `handle` invalid when nothing could be shaped.
    fn shape_text(&mut self, handle: &mut TextHandle, text: &str, font_size: f32);

    fn text_bounding_box(&self, handle: TextHandle) -> Vec2;

    /// Draws the text container with its top left corner at `pos`.
    fn render_text(&mut self, handle: TextHandle, color: Color, outline_color: Color, pos: Vec2);

    fn delete_text(&mut self, handle: &mut TextHandle);

    fn set_render_flags(&mut self, flags: TextRenderFlags);

    fn default_text_color(&self) -> Color {
        Color::WHITE
    }

    fn default_outline_color(&self) -> Color {
        Color::rgba(0.0, 0.0, 0.0, 0.3)
    }
}

pub trait SpriteRender {
    fn draw_sprite(
        &mut self,
        sprite: NamePlateSprite,
        center: Vec2,
        size: Vec2,
        rotation: f32,
        color: Color,
    );
}

pub trait ScreenView {
    fn screen(&self) -> ScreenRect;

    fn map_screen(&mut self, screen: ScreenRect);

    /// Maps the screen to the fixed reference zoom around the camera center.
    fn map_screen_to_interface(&mut self);
}

pub trait NamePlateBackend: TextRender + SpriteRender + ScreenView {}

impl<T: TextRender + SpriteRender + ScreenView> NamePlateBackend for T {}

/// Size of the world area visible at the reference zoom for the given aspect ratio.
pub fn interface_screen_size(aspect: f32) -> Vec2 {
    const AMOUNT: f32 = 1150.0 * 1000.0;
    const WIDTH_MAX: f32 = 1500.0;
    const HEIGHT_MAX: f32 = 1050.0;

    let aspect = if aspect.is_finite() && aspect > 0.0 {
        aspect
    } else {
        1.0
    };
    let mut height = AMOUNT.sqrt() / aspect.sqrt();
    let mut width = height * aspect;

    if width > WIDTH_MAX {
        width = WIDTH_MAX;
        height = width / aspect;
    }

    if height > HEIGHT_MAX {
        height = HEIGHT_MAX;
        width = height * aspect;
    }

    Vec2::new(width, height)
}
