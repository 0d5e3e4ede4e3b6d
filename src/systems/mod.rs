mod demo_world_system;
mod name_plate_system;
mod rainbow_system;

pub use demo_world_system::{
    demo_world_draw_system, demo_world_setup_system, demo_world_update_system, DemoWorld,
};
pub use name_plate_system::{
    build_render_data, name_plate_system, render_name_plate_preview, render_name_plates,
};
pub use rainbow_system::{apply_rainbow, rainbow_system};
