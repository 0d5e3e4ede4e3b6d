use bevy::prelude::{Color, Vec2};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum HookStrongWeak {
    Weak,
    #[default]
    Unknown,
    Strong,
}

const HOOK_STRONG_COLOR_PACKED: u32 = 6401973;
const HOOK_WEAK_COLOR_PACKED: u32 = 41131;

impl HookStrongWeak {
    pub fn color(self) -> Color {
        match self {
            HookStrongWeak::Strong => color_from_packed_hsl(HOOK_STRONG_COLOR_PACKED),
            HookStrongWeak::Unknown => Color::WHITE,
            HookStrongWeak::Weak => color_from_packed_hsl(HOOK_WEAK_COLOR_PACKED),
        }
    }
}

/// Decodes a `0xHHSSLL` packed color, each channel scaled to 0..=255.
pub fn color_from_packed_hsl(packed: u32) -> Color {
    let channel = |shift: u32| ((packed >> shift) & 0xff) as f32 / 255.0;
    Color::hsla(channel(16) * 360.0, channel(8), channel(0), 1.0)
}

/// Everything a name plate needs to draw one frame, resolved by the caller.
#[derive(Clone, Debug)]
pub struct NamePlateRenderData<'a> {
    pub in_game: bool,
    pub position: Vec2,
    pub color: Color,
    pub alpha: f32,

    pub show_name: bool,
    pub name: &'a str,
    pub font_size: f32,

    pub show_friend_mark: bool,

    pub show_client_id: bool,
    pub client_id: usize,
    pub font_size_client_id: f32,
    pub client_id_new_line: bool,

    pub show_clan: bool,
    pub clan: &'a str,
    pub font_size_clan: f32,

    pub show_direction: bool,
    pub dir_left: bool,
    pub dir_jump: bool,
    pub dir_right: bool,
    pub font_size_direction: f32,

    pub show_hook_strong_weak: bool,
    pub hook_strong_weak: HookStrongWeak,
    pub show_hook_strong_weak_id: bool,
    pub hook_strong_weak_id: i32,
    pub font_size_hook_strong_weak: f32,
}

impl<'a> Default for NamePlateRenderData<'a> {
    fn default() -> Self {
        Self {
            in_game: true,
            position: Vec2::ZERO,
            color: Color::WHITE,
            alpha: 1.0,
            show_name: false,
            name: "",
            font_size: font_size_from_percent(50),
            show_friend_mark: false,
            show_client_id: false,
            client_id: 0,
            font_size_client_id: font_size_from_percent(50),
            client_id_new_line: false,
            show_clan: false,
            clan: "",
            font_size_clan: font_size_from_percent(30),
            show_direction: false,
            dir_left: false,
            dir_jump: false,
            dir_right: false,
            font_size_direction: font_size_from_percent(50),
            show_hook_strong_weak: false,
            hook_strong_weak: HookStrongWeak::Unknown,
            show_hook_strong_weak_id: false,
            hook_strong_weak_id: 0,
            font_size_hook_strong_weak: font_size_from_percent(30),
        }
    }
}

pub fn font_size_from_percent(percent: u32) -> f32 {
    18.0 + 20.0 * percent as f32 / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn font_size_scales_from_base() {
        assert_relative_eq!(font_size_from_percent(0), 18.0);
        assert_relative_eq!(font_size_from_percent(50), 28.0);
        assert_relative_eq!(font_size_from_percent(100), 38.0);
    }

    #[test]
    fn hook_colors_are_distinct() {
        let strong = HookStrongWeak::Strong.color().as_rgba_f32();
        let weak = HookStrongWeak::Weak.color().as_rgba_f32();
        let unknown = HookStrongWeak::Unknown.color().as_rgba_f32();

        assert_eq!(unknown, [1.0, 1.0, 1.0, 1.0]);
        // strong leans green, weak leans red
        assert!(strong[1] > strong[0]);
        assert!(weak[0] > weak[1]);
        assert_relative_eq!(strong[3], 1.0);
        assert_relative_eq!(weak[3], 1.0);
    }
}
