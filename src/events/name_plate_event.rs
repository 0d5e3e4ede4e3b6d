use bevy::prelude::Event;

/// Drops all shaped name plate text so it is rebuilt on the next frame.
#[derive(Event, Default)]
pub struct NamePlateResetEvent;
