use std::{f32::consts::PI, fmt::Write};

use arrayvec::ArrayString;
use bevy::prelude::{Color, Vec2};

use crate::{
    name_plate::{CachedText, HookStrongWeak, NamePlateRenderData, PartBox},
    render::{NamePlateBackend, NamePlateSprite, TextRender},
};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Jump,
    Right,
}

impl Direction {
    fn rotation(self) -> f32 {
        match self {
            Direction::Left => PI,
            Direction::Jump => -PI / 2.0,
            Direction::Right => 0.0,
        }
    }
}

#[derive(Debug)]
pub enum NamePlatePartKind {
    Direction(Direction),
    ClientId { new_line: bool, text: CachedText },
    FriendMark,
    Name(CachedText),
    Clan(CachedText),
    HookStrongWeak(NamePlateSprite),
    HookStrongWeakId(CachedText),
    NewLine,
}

#[derive(Debug)]
pub struct NamePlatePart {
    kind: NamePlatePartKind,
    bounds: PartBox,
    color: Color,
}

impl AsRef<PartBox> for NamePlatePart {
    fn as_ref(&self) -> &PartBox {
        &self.bounds
    }
}

// Room for a 20 digit usize or a signed i32 plus a one character suffix
type IdText = ArrayString<24>;

trait PlateId: std::fmt::Display {}
impl PlateId for usize {}
impl PlateId for i32 {}

fn format_id(id: impl PlateId, suffix: &'static str) -> IdText {
    debug_assert!(suffix.len() <= 1);
    let mut text = IdText::new();
    write!(text, "{}{}", id, suffix).ok();
    text
}

impl NamePlatePart {
    fn with_kind(kind: NamePlatePartKind) -> Self {
        Self {
            kind,
            bounds: PartBox::default(),
            color: Color::WHITE,
        }
    }

    pub fn direction(direction: Direction) -> Self {
        let mut part = Self::with_kind(NamePlatePartKind::Direction(direction));
        part.bounds.shift_on_invisible = true;
        part
    }

    pub fn client_id(new_line: bool) -> Self {
        Self::with_kind(NamePlatePartKind::ClientId {
            new_line,
            text: CachedText::default(),
        })
    }

    pub fn friend_mark() -> Self {
        Self::with_kind(NamePlatePartKind::FriendMark)
    }

    pub fn name() -> Self {
        Self::with_kind(NamePlatePartKind::Name(CachedText::default()))
    }

    pub fn clan() -> Self {
        Self::with_kind(NamePlatePartKind::Clan(CachedText::default()))
    }

    pub fn hook_strong_weak() -> Self {
        Self::with_kind(NamePlatePartKind::HookStrongWeak(NamePlateSprite::HookIcon))
    }

    pub fn hook_strong_weak_id() -> Self {
        Self::with_kind(NamePlatePartKind::HookStrongWeakId(CachedText::default()))
    }

    pub fn new_line() -> Self {
        Self {
            kind: NamePlatePartKind::NewLine,
            bounds: PartBox::new_line(),
            color: Color::WHITE,
        }
    }

    pub fn kind(&self) -> &NamePlatePartKind {
        &self.kind
    }

    pub fn bounds(&self) -> &PartBox {
        &self.bounds
    }

    pub fn visible(&self) -> bool {
        self.bounds.visible
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Refreshes visibility, size and content from this frame's render data.
    pub fn update<B: NamePlateBackend>(&mut self, backend: &mut B, data: &NamePlateRenderData) {
        let bounds = &mut self.bounds;

        match &mut self.kind {
            NamePlatePartKind::NewLine => {}
            NamePlatePartKind::Direction(direction) => {
                if !data.show_direction {
                    bounds.size = Vec2::ZERO;
                    bounds.visible = false;
                    return;
                }

                let size = data.font_size_direction;
                bounds.size = Vec2::splat(size);
                bounds.visible = match direction {
                    Direction::Left => data.dir_left,
                    Direction::Jump => data.dir_jump,
                    Direction::Right => data.dir_right,
                };
                bounds.offset.y = match direction {
                    Direction::Jump => -size / 2.0,
                    Direction::Left | Direction::Right => size / 2.0,
                };
            }
            NamePlatePartKind::ClientId { new_line, text } => {
                bounds.visible = data.show_client_id && data.client_id_new_line == *new_line;
                if !bounds.visible {
                    return;
                }

                self.color = data.color;
                let id_text = format_id(data.client_id, if *new_line { "" } else { ":" });
                apply_text_size(
                    bounds,
                    text.update(backend, &id_text, data.font_size_client_id, data.in_game),
                );
            }
            NamePlatePartKind::FriendMark => {
                bounds.visible = data.show_friend_mark;
                if !bounds.visible {
                    return;
                }

                bounds.size = Vec2::splat(data.font_size);
                self.color = Color::WHITE.with_a(data.alpha);
            }
            NamePlatePartKind::Name(text) => {
                bounds.visible = data.show_name;
                if !bounds.visible {
                    return;
                }

                self.color = data.color;
                apply_text_size(
                    bounds,
                    text.update(backend, data.name, data.font_size, data.in_game),
                );
            }
            NamePlatePartKind::Clan(text) => {
                bounds.visible = data.show_clan;
                if !bounds.visible {
                    return;
                }

                self.color = data.color;
                apply_text_size(
                    bounds,
                    text.update(backend, data.clan, data.font_size_clan, data.in_game),
                );
            }
            NamePlatePartKind::HookStrongWeak(sprite) => {
                bounds.visible = data.show_hook_strong_weak;
                if !bounds.visible {
                    return;
                }

                bounds.size = Vec2::splat(data.font_size_hook_strong_weak * 1.5);
                *sprite = match data.hook_strong_weak {
                    HookStrongWeak::Strong => NamePlateSprite::HookStrong,
                    HookStrongWeak::Unknown => NamePlateSprite::HookIcon,
                    HookStrongWeak::Weak => NamePlateSprite::HookWeak,
                };
                self.color = data.hook_strong_weak.color().with_a(data.alpha);
            }
            NamePlatePartKind::HookStrongWeakId(text) => {
                bounds.visible = data.show_hook_strong_weak_id;
                if !bounds.visible {
                    return;
                }

                self.color = data.hook_strong_weak.color().with_a(data.alpha);
                let id_text = format_id(data.hook_strong_weak_id, "");
                apply_text_size(
                    bounds,
                    text.update(
                        backend,
                        &id_text,
                        data.font_size_hook_strong_weak,
                        data.in_game,
                    ),
                );
            }
        }
    }

    /// Draws the part centered on `center`.
    pub fn render<B: NamePlateBackend>(&self, backend: &mut B, center: Vec2) {
        let size = self.bounds.size;

        match &self.kind {
            NamePlatePartKind::NewLine => {}
            NamePlatePartKind::Direction(direction) => backend.draw_sprite(
                NamePlateSprite::Arrow,
                center,
                size,
                direction.rotation(),
                self.color,
            ),
            NamePlatePartKind::FriendMark => {
                backend.draw_sprite(NamePlateSprite::FriendHeart, center, size, 0.0, self.color)
            }
            NamePlatePartKind::HookStrongWeak(sprite) => {
                backend.draw_sprite(*sprite, center, size, 0.0, self.color)
            }
            NamePlatePartKind::ClientId { text, .. }
            | NamePlatePartKind::Name(text)
            | NamePlatePartKind::Clan(text)
            | NamePlatePartKind::HookStrongWeakId(text) => {
                text.render(backend, center, size, self.color)
            }
        }
    }

    pub fn reset<T: TextRender + ?Sized>(&mut self, text_render: &mut T) {
        match &mut self.kind {
            NamePlatePartKind::ClientId { text, .. }
            | NamePlatePartKind::Name(text)
            | NamePlatePartKind::Clan(text)
            | NamePlatePartKind::HookStrongWeakId(text) => text.reset(text_render),
            NamePlatePartKind::Direction(_)
            | NamePlatePartKind::FriendMark
            | NamePlatePartKind::HookStrongWeak(_)
            | NamePlatePartKind::NewLine => {}
        }
    }
}

fn apply_text_size(bounds: &mut PartBox, size: Option<Vec2>) {
    match size {
        Some(size) => bounds.size = size,
        None => bounds.visible = false,
    }
}
