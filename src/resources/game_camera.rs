use bevy::prelude::{Resource, Vec2};

use crate::render::{interface_screen_size, ScreenRect};

const MIN_ZOOM: f32 = 0.5;
const MAX_ZOOM: f32 = 3.0;
const ZOOM_STEP: f32 = 1.1;

#[derive(Resource)]
pub struct GameCamera {
    pub center: Vec2,
    pub zoom: f32,
}

impl Default for GameCamera {
    fn default() -> Self {
        Self {
            center: Vec2::ZERO,
            zoom: 1.0,
        }
    }
}

impl GameCamera {
    /// World area visible in a viewport with the given aspect ratio.
    /// Positive steps zoom in, negative steps zoom out.
    pub fn zoom_by(&mut self, steps: f32) {
        self.zoom = (self.zoom * ZOOM_STEP.powf(-steps)).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    pub fn screen(&self, aspect: f32) -> ScreenRect {
        ScreenRect::from_center_size(self.center, interface_screen_size(aspect) * self.zoom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn zoom_scales_visible_area() {
        let mut camera = GameCamera::default();
        let near = camera.screen(16.0 / 9.0);

        camera.zoom_by(-2.0);
        let far = camera.screen(16.0 / 9.0);
        assert_relative_eq!(far.height(), near.height() * 1.21, max_relative = 1e-4);
        assert_relative_eq!(far.width() / far.height(), near.width() / near.height());
    }

    #[test]
    fn zoom_is_clamped() {
        let mut camera = GameCamera::default();
        camera.zoom_by(100.0);
        assert_relative_eq!(camera.zoom, MIN_ZOOM);
        camera.zoom_by(-100.0);
        assert_relative_eq!(camera.zoom, MAX_ZOOM);
    }
}
