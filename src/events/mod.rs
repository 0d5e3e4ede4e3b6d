mod name_plate_event;

pub use name_plate_event::NamePlateResetEvent;
