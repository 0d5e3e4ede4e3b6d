use std::sync::Arc;

use bevy::prelude::{Color, Resource, Vec2};
use bevy_egui::egui;

use crate::render::{
    interface_screen_size, NamePlateSprite, NamePlateSprites, ScreenRect, ScreenView,
    SpriteRender, TextHandle, TextRender, TextRenderFlags,
};

const OUTLINE_OFFSETS: [egui::Vec2; 4] = [
    egui::vec2(-1.0, 0.0),
    egui::vec2(1.0, 0.0),
    egui::vec2(0.0, -1.0),
    egui::vec2(0.0, 1.0),
];

struct ShapedText {
    text: String,
    font_size: f32,
    galley: Arc<egui::Galley>,
    /// Points per world unit when the galley was laid out.
    scale: f32,
}

/// Galleys owned by name plate text handles.
#[derive(Default, Resource)]
pub struct EguiTextStore {
    texts: Vec<Option<ShapedText>>,
    free: Vec<u32>,
}

impl EguiTextStore {
    fn get(&self, handle: TextHandle) -> Option<&ShapedText> {
        self.texts.get(handle.index()? as usize)?.as_ref()
    }

    fn store(&mut self, handle: &mut TextHandle, text: ShapedText) {
        if let Some(slot) = handle
            .index()
            .and_then(|index| self.texts.get_mut(index as usize))
        {
            *slot = Some(text);
            return;
        }

        let index = match self.free.pop() {
            Some(index) => {
                self.texts[index as usize] = Some(text);
                index
            }
            None => {
                self.texts.push(Some(text));
                self.texts.len() as u32 - 1
            }
        };
        *handle = TextHandle::new(index);
    }

    fn remove(&mut self, handle: &mut TextHandle) {
        if let Some(index) = handle.index() {
            if let Some(slot) = self.texts.get_mut(index as usize) {
                if slot.take().is_some() {
                    self.free.push(index);
                }
            }
        }
        *handle = TextHandle::INVALID;
    }

    pub fn len(&self) -> usize {
        self.texts.iter().filter(|x| x.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Background layer shared by the world and the name plates drawn over it.
pub fn world_layer_id() -> egui::LayerId {
    egui::LayerId::new(egui::Order::Background, egui::Id::new("world"))
}

pub fn to_color32(color: Color) -> egui::Color32 {
    let [r, g, b, a] = color.as_rgba_f32();
    egui::Color32::from_rgba_unmultiplied(
        (r.clamp(0.0, 1.0) * 255.0).round() as u8,
        (g.clamp(0.0, 1.0) * 255.0).round() as u8,
        (b.clamp(0.0, 1.0) * 255.0).round() as u8,
        (a.clamp(0.0, 1.0) * 255.0).round() as u8,
    )
}

/// Draws name plates into an egui painter. World coordinates inside
/// `screen` are mapped onto `viewport`.
pub struct EguiNamePlateBackend<'a> {
    painter: egui::Painter,
    store: &'a mut EguiTextStore,
    sprites: &'a NamePlateSprites,
    viewport: egui::Rect,
    screen: ScreenRect,
    interface_screen: ScreenRect,
    flags: TextRenderFlags,
}

impl<'a> EguiNamePlateBackend<'a> {
    pub fn new(
        painter: egui::Painter,
        store: &'a mut EguiTextStore,
        sprites: &'a NamePlateSprites,
        screen: ScreenRect,
    ) -> Self {
        let viewport = painter.clip_rect();
        let center = Vec2::new(
            (screen.x0 + screen.x1) / 2.0,
            (screen.y0 + screen.y1) / 2.0,
        );
        let interface_screen = ScreenRect::from_center_size(
            center,
            interface_screen_size(viewport.aspect_ratio()),
        );

        Self {
            painter,
            store,
            sprites,
            viewport,
            screen,
            interface_screen,
            flags: TextRenderFlags::empty(),
        }
    }

    fn points_per_unit(&self) -> f32 {
        if self.screen.height() > 0.0 {
            self.viewport.height() / self.screen.height()
        } else {
            1.0
        }
    }

    pub fn to_points(&self, world: Vec2) -> egui::Pos2 {
        let scale = egui::vec2(
            self.viewport.width() / self.screen.width(),
            self.viewport.height() / self.screen.height(),
        );
        egui::pos2(
            self.viewport.min.x + (world.x - self.screen.x0) * scale.x,
            self.viewport.min.y + (world.y - self.screen.y0) * scale.y,
        )
    }

    fn layout_galley(&self, text: &str, points: f32) -> Arc<egui::Galley> {
        self.painter.ctx().fonts(|fonts| {
            fonts.layout_no_wrap(
                text.to_owned(),
                egui::FontId::proportional(points),
                egui::Color32::WHITE,
            )
        })
    }

    fn add_text(&self, galley: &Arc<egui::Galley>, pos: egui::Pos2, color: egui::Color32) {
        self.painter.add(egui::epaint::TextShape {
            pos,
            galley: galley.clone(),
            underline: egui::Stroke::NONE,
            override_text_color: Some(color),
            angle: 0.0,
        });
    }

    fn draw_fallback_sprite(
        &self,
        sprite: NamePlateSprite,
        center: egui::Pos2,
        size: egui::Vec2,
        rotation: f32,
        color: egui::Color32,
    ) {
        let radius = size.x.min(size.y) / 2.0;

        match sprite {
            NamePlateSprite::Arrow => {
                let points = [
                    egui::vec2(radius, 0.0),
                    egui::vec2(-radius * 0.6, -radius * 0.8),
                    egui::vec2(-radius * 0.6, radius * 0.8),
                ]
                .into_iter()
                .map(|x| center + egui::emath::Rot2::from_angle(rotation) * x)
                .collect();
                self.painter.add(egui::Shape::convex_polygon(
                    points,
                    color,
                    egui::Stroke::NONE,
                ));
            }
            NamePlateSprite::FriendHeart => {
                let lobe = radius * 0.5;
                self.painter
                    .circle_filled(center + egui::vec2(-lobe, -lobe * 0.6), lobe, color);
                self.painter
                    .circle_filled(center + egui::vec2(lobe, -lobe * 0.6), lobe, color);
                self.painter.add(egui::Shape::convex_polygon(
                    vec![
                        center + egui::vec2(-radius, -lobe * 0.3),
                        center + egui::vec2(radius, -lobe * 0.3),
                        center + egui::vec2(0.0, radius),
                    ],
                    color,
                    egui::Stroke::NONE,
                ));
            }
            NamePlateSprite::HookIcon => {
                self.painter.circle_stroke(
                    center,
                    radius * 0.7,
                    egui::Stroke::new(radius * 0.25, color),
                );
            }
            NamePlateSprite::HookStrong => {
                self.painter.circle_filled(center, radius * 0.8, color);
            }
            NamePlateSprite::HookWeak => {
                self.painter.circle_stroke(
                    center,
                    radius * 0.7,
                    egui::Stroke::new(radius * 0.12, color),
                );
            }
        }
    }
}

impl<'a> TextRender for EguiNamePlateBackend<'a> {
    fn shape_text(&mut self, handle: &mut TextHandle, text: &str, font_size: f32) {
        if text.is_empty() {
            self.store.remove(handle);
            return;
        }

        let scale = self.points_per_unit();
        let galley = self.layout_galley(text, font_size * scale);
        self.store.store(
            handle,
            ShapedText {
                text: text.to_owned(),
                font_size,
                galley,
                scale,
            },
        );
    }

    fn text_bounding_box(&self, handle: TextHandle) -> Vec2 {
        self.store.get(handle).map_or(Vec2::ZERO, |text| {
            let size = text.galley.size();
            Vec2::new(size.x, size.y) / text.scale
        })
    }

    fn render_text(&mut self, handle: TextHandle, color: Color, outline_color: Color, pos: Vec2) {
        let Some(text) = self.store.get(handle) else {
            return;
        };

        // Metrics stay those of the shaped galley, the drawn size follows the camera zoom
        let scale = self.points_per_unit();
        let galley = if (scale - text.scale).abs() > 1e-4 {
            self.layout_galley(&text.text, text.font_size * scale)
        } else {
            text.galley.clone()
        };

        let mut pos = self.to_points(pos);
        if !self.flags.contains(TextRenderFlags::NO_PIXEL_ALIGNMENT) {
            pos = self.painter.round_pos_to_pixels(pos);
        }

        let outline_color = to_color32(outline_color);
        if outline_color.a() > 0 {
            for offset in OUTLINE_OFFSETS {
                self.add_text(&galley, pos + offset, outline_color);
            }
        }
        self.add_text(&galley, pos, to_color32(color));
    }

    fn delete_text(&mut self, handle: &mut TextHandle) {
        self.store.remove(handle);
    }

    fn set_render_flags(&mut self, flags: TextRenderFlags) {
        self.flags = flags;
    }
}

impl<'a> SpriteRender for EguiNamePlateBackend<'a> {
    fn draw_sprite(
        &mut self,
        sprite: NamePlateSprite,
        center: Vec2,
        size: Vec2,
        rotation: f32,
        color: Color,
    ) {
        let scale = self.points_per_unit();
        let center = self.to_points(center);
        let size = egui::vec2(size.x, size.y) * scale;
        let color = to_color32(color);

        let Some(texture) = self.sprites.get(sprite) else {
            self.draw_fallback_sprite(sprite, center, size, rotation, color);
            return;
        };

        let mut mesh = egui::epaint::Mesh::with_texture(texture.texture_id);
        mesh.add_rect_with_uv(
            egui::Rect::from_center_size(center, size),
            texture.uv,
            color,
        );
        if rotation != 0.0 {
            let rot = egui::emath::Rot2::from_angle(rotation);
            for vertex in mesh.vertices.iter_mut() {
                vertex.pos = center + rot * (vertex.pos - center);
            }
        }
        self.painter.add(egui::Shape::mesh(mesh));
    }
}

impl<'a> ScreenView for EguiNamePlateBackend<'a> {
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
