mod ui_name_plate_settings_system;

pub use ui_name_plate_settings_system::{
    ui_name_plate_settings_system, UiStateNamePlateSettings,
};
