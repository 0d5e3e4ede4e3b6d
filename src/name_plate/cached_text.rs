use bevy::prelude::{Color, Vec2};

use crate::render::{NamePlateBackend, TextHandle, TextRender};

/// Shaped text kept alive across frames, reshaped only when the string or
/// font size changes.
#[derive(Debug)]
pub struct CachedText {
    handle: TextHandle,
    text: String,
    font_size: f32,
}

impl Default for CachedText {
    fn default() -> Self {
        Self {
            handle: TextHandle::INVALID,
            text: String::new(),
            font_size: f32::NEG_INFINITY,
        }
    }
}

impl CachedText {
    pub fn handle(&self) -> TextHandle {
        self.handle
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn needs_update(&self, text: &str, font_size: f32) -> bool {
        !self.handle.is_valid() || self.font_size != font_size || self.text != text
    }

    /// Returns the bounding box of the shaped text, or `None` if the text
    /// could not be shaped.
    pub fn update<B: NamePlateBackend>(
        &mut self,
        backend: &mut B,
        text: &str,
        font_size: f32,
        in_game: bool,
    ) -> Option<Vec2> {
        if self.needs_update(text, font_size) {
            self.text.clear();
            self.text.push_str(text);
            self.font_size = font_size;

            if in_game {
                // Shape at the reference zoom so plates look the same at any camera zoom
                let screen = backend.screen();
                backend.map_screen_to_interface();
                backend.delete_text(&mut self.handle);
                backend.shape_text(&mut self.handle, text, font_size);
                backend.map_screen(screen);
            } else {
                backend.shape_text(&mut self.handle, text, font_size);
            }
        }

        if self.handle.is_valid() {
            Some(backend.text_bounding_box(self.handle))
        } else {
            None
        }
    }

    pub fn render<B: NamePlateBackend>(
        &self,
        backend: &mut B,
        center: Vec2,
        size: Vec2,
        color: Color,
    ) {
        if !self.handle.is_valid() {
            return;
        }

        let mut outline_color = backend.default_outline_color();
        outline_color.set_a(outline_color.a() * color.a());
        backend.render_text(self.handle, color, outline_color, center - size / 2.0);
    }

    pub fn reset<T: TextRender + ?Sized>(&mut self, text_render: &mut T) {
        text_render.delete_text(&mut self.handle);
        self.text.clear();
        self.font_size = f32::NEG_INFINITY;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::test_backend::RecordingBackend;

    #[test]
    fn unchanged_text_is_not_reshaped() {
        let mut backend = RecordingBackend::default();
        let mut cached = CachedText::default();

        assert!(cached.update(&mut backend, "nameless tee", 28.0, true).is_some());
        assert!(cached.update(&mut backend, "nameless tee", 28.0, true).is_some());
        assert_eq!(backend.shape_calls, 1);
    }

    #[test]
    fn text_or_size_change_reshapes() {
        let mut backend = RecordingBackend::default();
        let mut cached = CachedText::default();

        cached.update(&mut backend, "brainless tee", 28.0, false);
        cached.update(&mut backend, "brainless tee", 30.0, false);
        cached.update(&mut backend, "brainless tee2", 30.0, false);
        assert_eq!(backend.shape_calls, 3);
        assert_eq!(backend.live_containers(), 1);
    }

    #[test]
    fn long_names_still_hit_the_cache() {
        let mut backend = RecordingBackend::default();
        let mut cached = CachedText::default();
        let name = "x".repeat(64);

        cached.update(&mut backend, &name, 28.0, true);
        cached.update(&mut backend, &name, 28.0, true);
        assert_eq!(backend.shape_calls, 1);
    }

    #[test]
    fn in_game_shaping_uses_interface_screen_and_restores() {
        let mut backend = RecordingBackend::default();
        let original = backend.screen;
        let mut cached = CachedText::default();

        cached.update(&mut backend, "tee", 28.0, true);
        assert_eq!(backend.screen_at_shape, vec![backend.interface_screen]);
        assert_eq!(backend.screen, original);

        let mut preview = CachedText::default();
        preview.update(&mut backend, "tee", 28.0, false);
        assert_eq!(backend.screen_at_shape[1], original);
    }

    #[test]
    fn failed_shaping_reports_none() {
        let mut backend = RecordingBackend {
            fail_shaping: true,
            ..Default::default()
        };
        let mut cached = CachedText::default();

        assert!(cached.update(&mut backend, "tee", 28.0, true).is_none());
        assert!(!cached.handle().is_valid());
    }

    #[test]
    fn reset_releases_and_invalidates() {
        let mut backend = RecordingBackend::default();
        let mut cached = CachedText::default();

        cached.update(&mut backend, "tee", 28.0, true);
        cached.reset(&mut backend);
        assert_eq!(backend.live_containers(), 0);
        assert!(cached.needs_update("tee", 28.0));

        cached.update(&mut backend, "tee", 28.0, true);
        assert_eq!(backend.shape_calls, 2);
    }
}
