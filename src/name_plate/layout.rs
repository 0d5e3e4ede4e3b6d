use bevy::prelude::Vec2;

/// Layout footprint of a single name plate part.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PartBox {
    pub size: Vec2,
    pub padding: Vec2,
    /// Applied to the draw position only, does not affect layout.
    pub offset: Vec2,
    pub visible: bool,
    /// Keep the footprint reserved while invisible.
    pub shift_on_invisible: bool,
    pub new_line: bool,
}

impl Default for PartBox {
    fn default() -> Self {
        Self {
            size: Vec2::ZERO,
            padding: Vec2::splat(5.0),
            offset: Vec2::ZERO,
            visible: true,
            shift_on_invisible: false,
            new_line: false,
        }
    }
}

impl PartBox {
    pub fn new_line() -> Self {
        Self {
            visible: false,
            new_line: true,
            ..Default::default()
        }
    }

    pub fn takes_space(&self) -> bool {
        !self.new_line && (self.visible || self.shift_on_invisible)
    }

    fn footprint(&self) -> Vec2 {
        self.size + self.padding
    }
}

impl AsRef<PartBox> for PartBox {
    fn as_ref(&self) -> &PartBox {
        self
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PartPlacement {
    pub index: usize,
    /// Center of the part.
    pub position: Vec2,
}

/// Arranges `parts` into lines split at new line markers, each centered on
/// `anchor.x`. The first line sits on `anchor.y`, the following lines stack
/// upwards. Placements of visible parts are written to `placements`.
///
/// Returns the number of non-empty lines.
pub fn layout_parts<T: AsRef<PartBox>>(
    parts: &[T],
    anchor: Vec2,
    placements: &mut Vec<PartPlacement>,
) -> usize {
    placements.clear();

    let mut y = anchor.y;
    let mut line_start = 0;
    let mut line_size = Vec2::ZERO;
    let mut empty = true;
    let mut lines = 0;

    for (index, part) in parts.iter().enumerate() {
        let part = part.as_ref();

        if part.new_line {
            if !empty {
                place_line(parts, line_start..index, anchor.x, y, line_size, placements);
                y -= line_size.y;
                lines += 1;
            }

            line_start = index + 1;
            line_size = Vec2::ZERO;
            empty = true;
        } else if part.takes_space() {
            empty = false;
            line_size.x += part.footprint().x;
            line_size.y = line_size.y.max(part.footprint().y);
        }
    }

    if !empty {
        place_line(parts, line_start..parts.len(), anchor.x, y, line_size, placements);
        lines += 1;
    }

    lines
}

fn place_line<T: AsRef<PartBox>>(
    parts: &[T],
    range: std::ops::Range<usize>,
    center_x: f32,
    y: f32,
    line_size: Vec2,
    placements: &mut Vec<PartPlacement>,
) {
    let mut x = center_x - line_size.x / 2.0;

    for index in range {
        let part = parts[index].as_ref();

        if part.visible && !part.new_line {
            let footprint = part.footprint();
            placements.push(PartPlacement {
                index,
                position: Vec2::new(
                    x + footprint.x / 2.0 + part.offset.x,
                    y - line_size.y.max(footprint.y) / 2.0 + part.offset.y,
                ),
            });
        }

        if part.takes_space() {
            x += part.footprint().x;
        }
    }
}
