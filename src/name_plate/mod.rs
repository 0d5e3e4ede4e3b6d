mod cached_text;
mod layout;
#[allow(clippy::module_inception)]
mod name_plate;
mod part;
mod render_data;

pub use cached_text::CachedText;
pub use layout::{layout_parts, PartBox, PartPlacement};
pub use name_plate::{NamePlate, NAME_PLATE_OFFSET_Y};
pub use part::{Direction, NamePlatePart, NamePlatePartKind};
pub use render_data::{
    color_from_packed_hsl, font_size_from_percent, HookStrongWeak, NamePlateRenderData,
};
