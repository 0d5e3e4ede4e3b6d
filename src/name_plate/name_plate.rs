use bevy::prelude::Vec2;

use crate::{
    name_plate::{layout_parts, Direction, NamePlatePart, NamePlateRenderData, PartPlacement},
    render::{NamePlateBackend, TextRender, TextRenderFlags},
};

/// Distance between the player position and the bottom line of the plate.
pub const NAME_PLATE_OFFSET_Y: f32 = 50.0;

/// Parts and layout scratch space for one player slot.
#[derive(Default)]
pub struct NamePlate {
    parts: Vec<NamePlatePart>,
    placements: Vec<PartPlacement>,
    lines: usize,
}

impl NamePlate {
    fn init(&mut self) {
        if !self.parts.is_empty() {
            return;
        }

        self.parts = vec![
            NamePlatePart::direction(Direction::Left),
            NamePlatePart::direction(Direction::Jump),
            NamePlatePart::direction(Direction::Right),
            NamePlatePart::new_line(),
            NamePlatePart::client_id(false),
            NamePlatePart::friend_mark(),
            NamePlatePart::name(),
            NamePlatePart::new_line(),
            NamePlatePart::clan(),
            NamePlatePart::new_line(),
            NamePlatePart::client_id(true),
            NamePlatePart::new_line(),
            NamePlatePart::hook_strong_weak(),
            NamePlatePart::hook_strong_weak_id(),
        ];
    }

    pub fn parts(&self) -> &[NamePlatePart] {
        &self.parts
    }

    /// Placements from the last call to [`NamePlate::render`].
    pub fn placements(&self) -> &[PartPlacement] {
        &self.placements
    }

    /// Number of lines laid out by the last update, thin reserved lines included.
    pub fn lines(&self) -> usize {
        self.lines
    }

    pub fn update<B: NamePlateBackend>(&mut self, backend: &mut B, data: &NamePlateRenderData) {
        self.init();

        for part in self.parts.iter_mut() {
            part.update(backend, data);
        }

        self.lines = layout_parts(
            &self.parts,
            data.position - Vec2::new(0.0, NAME_PLATE_OFFSET_Y),
            &mut self.placements,
        );
    }

    pub fn render<B: NamePlateBackend>(&mut self, backend: &mut B, data: &NamePlateRenderData) {
        let mut flags = TextRenderFlags::NO_FIRST_CHARACTER_X_BEARING
            | TextRenderFlags::NO_LAST_CHARACTER_ADVANCE;
        if data.in_game {
            flags |= TextRenderFlags::NO_PIXEL_ALIGNMENT;
        }
        backend.set_render_flags(flags);

        self.update(backend, data);
        for placement in self.placements.iter() {
            self.parts[placement.index].render(backend, placement.position);
        }

        backend.set_render_flags(TextRenderFlags::empty());
    }

    /// Releases all shaped text, the next update reshapes everything.
    pub fn reset<T: TextRender + ?Sized>(&mut self, text_render: &mut T) {
        for part in self.parts.iter_mut() {
            part.reset(text_render);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        name_plate::{HookStrongWeak, NamePlatePartKind},
        render::{test_backend::RecordingBackend, NamePlateSprite},
    };
    use approx::assert_relative_eq;

    fn name_only<'a>() -> NamePlateRenderData<'a> {
        NamePlateRenderData {
            position: Vec2::new(300.0, 400.0),
            show_name: true,
            name: "Foo",
            ..Default::default()
        }
    }

    #[test]
    fn parts_are_built_once_in_fixed_order() {
        let mut backend = RecordingBackend::default();
        let mut name_plate = NamePlate::default();
        name_plate.render(&mut backend, &name_only());
        name_plate.render(&mut backend, &name_only());

        let parts = name_plate.parts();
        assert_eq!(parts.len(), 14);
        assert!(matches!(
            parts[0].kind(),
            NamePlatePartKind::Direction(Direction::Left)
        ));
        assert!(matches!(
            parts[4].kind(),
            NamePlatePartKind::ClientId { new_line: false, .. }
        ));
        assert!(matches!(parts[6].kind(), NamePlatePartKind::Name(_)));
        assert!(matches!(parts[8].kind(), NamePlatePartKind::Clan(_)));
        assert!(matches!(
            parts[10].kind(),
            NamePlatePartKind::ClientId { new_line: true, .. }
        ));
        assert!(matches!(
            parts[13].kind(),
            NamePlatePartKind::HookStrongWeakId(_)
        ));
        assert_eq!(
            parts.iter().filter(|x| x.bounds().new_line).count(),
            4
        );
    }

    #[test]
    fn name_only_plate_centers_the_name_above_a_thin_direction_line() {
        let mut backend = RecordingBackend::default();
        let mut name_plate = NamePlate::default();
        name_plate.render(&mut backend, &name_only());

        let placements = name_plate.placements();
        assert_eq!(placements.len(), 1);
        assert_eq!(placements[0].index, 6);
        assert_relative_eq!(placements[0].position.x, 300.0);

        // hidden direction parts still reserve their padding below the name
        assert_eq!(name_plate.lines(), 2);
        let name_line_y = 400.0 - NAME_PLATE_OFFSET_Y - 5.0;
        assert_relative_eq!(placements[0].position.y, name_line_y - (28.0 + 5.0) / 2.0);

        let rendered = backend.rendered("Foo").expect("name rendered");
        let size = Vec2::new(3.0 * 28.0 / 2.0, 28.0);
        assert_relative_eq!(rendered.pos.x, 300.0 - size.x / 2.0);
        assert_eq!(backend.rendered_texts.len(), 1);
        assert!(backend.sprites.is_empty());
    }

    #[test]
    fn only_left_direction_is_drawn() {
        let mut backend = RecordingBackend::default();
        let mut name_plate = NamePlate::default();
        let data = NamePlateRenderData {
            show_direction: true,
            dir_left: true,
            ..Default::default()
        };
        name_plate.render(&mut backend, &data);

        assert_eq!(backend.sprites.len(), 1);
        assert_eq!(backend.sprites[0].sprite, NamePlateSprite::Arrow);
        assert_relative_eq!(backend.sprites[0].rotation, std::f32::consts::PI);

        // jump and right still take their space, so left is shifted off center
        let footprint = data.font_size_direction + 5.0;
        assert_relative_eq!(
            backend.sprites[0].center.x,
            -1.5 * footprint + footprint / 2.0
        );
    }

    #[test]
    fn unchanged_render_data_does_not_reshape() {
        let mut backend = RecordingBackend::default();
        let mut name_plate = NamePlate::default();
        let data = NamePlateRenderData {
            show_name: true,
            name: "nameless tee",
            show_clan: true,
            clan: "tees",
            show_client_id: true,
            client_id: 3,
            show_hook_strong_weak_id: true,
            hook_strong_weak_id: 3,
            hook_strong_weak: HookStrongWeak::Unknown,
            ..Default::default()
        };

        name_plate.update(&mut backend, &data);
        let shape_calls = backend.shape_calls;
        assert_eq!(shape_calls, 4);

        name_plate.update(&mut backend, &data);
        assert_eq!(backend.shape_calls, shape_calls);
    }

    #[test]
    fn lines_stack_above_player() {
        let mut backend = RecordingBackend::default();
        let mut name_plate = NamePlate::default();
        let data = NamePlateRenderData {
            position: Vec2::new(0.0, 500.0),
            show_name: true,
            name: "tee",
            show_clan: true,
            clan: "clan",
            ..Default::default()
        };
        name_plate.render(&mut backend, &data);

        let name = backend.rendered("tee").expect("name rendered");
        let clan = backend.rendered("clan").expect("clan rendered");
        assert!(clan.pos.y < name.pos.y);
        assert!(name.pos.y < 500.0 - NAME_PLATE_OFFSET_Y);
    }

    #[test]
    fn render_flags_are_set_and_cleared() {
        let mut backend = RecordingBackend::default();
        let mut name_plate = NamePlate::default();
        name_plate.render(&mut backend, &name_only());

        assert_eq!(
            backend.flag_history,
            vec![
                TextRenderFlags::NO_FIRST_CHARACTER_X_BEARING
                    | TextRenderFlags::NO_LAST_CHARACTER_ADVANCE
                    | TextRenderFlags::NO_PIXEL_ALIGNMENT,
                TextRenderFlags::empty(),
            ]
        );

        let preview = NamePlateRenderData {
            in_game: false,
            ..name_only()
        };
        name_plate.render(&mut backend, &preview);
        assert!(!backend.flag_history[2].contains(TextRenderFlags::NO_PIXEL_ALIGNMENT));
    }

    #[test]
    fn reset_releases_text_and_reshapes() {
        let mut backend = RecordingBackend::default();
        let mut name_plate = NamePlate::default();
        name_plate.render(&mut backend, &name_only());
        assert_eq!(backend.live_containers(), 1);

        name_plate.reset(&mut backend);
        assert_eq!(backend.live_containers(), 0);

        name_plate.render(&mut backend, &name_only());
        assert_eq!(backend.shape_calls, 2);
        assert_eq!(backend.live_containers(), 1);
    }

    #[test]
    fn text_alpha_scales_outline() {
        let mut backend = RecordingBackend::default();
        let mut name_plate = NamePlate::default();
        let data = NamePlateRenderData {
            color: bevy::prelude::Color::rgba(1.0, 1.0, 1.0, 0.5),
            alpha: 0.5,
            ..name_only()
        };
        name_plate.render(&mut backend, &data);

        let rendered = backend.rendered("Foo").expect("name rendered");
        assert_relative_eq!(rendered.outline_color.a(), 0.3 * 0.5);
    }
}
