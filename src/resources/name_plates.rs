use bevy::prelude::Resource;

use crate::{name_plate::NamePlate, render::TextRender, resources::MAX_CLIENTS};

/// One name plate per client slot.
#[derive(Resource)]
pub struct NamePlates {
    name_plates: Vec<NamePlate>,
}

impl Default for NamePlates {
    fn default() -> Self {
        let mut name_plates = Vec::with_capacity(MAX_CLIENTS);
        name_plates.resize_with(MAX_CLIENTS, NamePlate::default);
        Self { name_plates }
    }
}

impl NamePlates {
    pub fn get_mut(&mut self, client_id: usize) -> Option<&mut NamePlate> {
        self.name_plates.get_mut(client_id)
    }

    pub fn len(&self) -> usize {
        self.name_plates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.name_plates.is_empty()
    }

    pub fn reset<T: TextRender + ?Sized>(&mut self, text_render: &mut T) {
        for name_plate in self.name_plates.iter_mut() {
            name_plate.reset(text_render);
        }
    }
}
