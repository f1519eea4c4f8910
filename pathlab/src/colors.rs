//! Color palette for the visualization, on a dark terminal background.

use crossterm::style::Color;
use gridstar_core::Point;

/// Open floor — a visible-but-subtle dark shade.
pub const FLOOR: Color = Color::Rgb { r: 28, g: 29, b: 34 };
/// Wall cells — light grey.
pub const WALL: Color = Color::Rgb { r: 225, g: 225, b: 225 };
/// The reconstructed path.
pub const PATH: Color = Color::Rgb { r: 0, g: 255, b: 255 };
/// Start cell marker.
pub const START: Color = Color::Rgb { r: 80, g: 220, b: 80 };
/// Goal cell marker.
pub const GOAL: Color = Color::Rgb { r: 255, g: 85, b: 85 };
/// Marker glyphs and the status line.
pub const TEXT: Color = Color::Rgb { r: 20, g: 20, b: 20 };
/// Status line text.
pub const STATUS: Color = Color::Rgb { r: 200, g: 200, b: 200 };

/// Fill for a cell sitting in the frontier: a green-to-red hue sweep that
/// warms as cells get closer to the goal.
pub fn frontier(p: Point, start: Point, goal: Point) -> Color {
    hsl(120.0 * ratio(p, start, goal), 1.0, 0.5)
}

/// Fill for a finalized cell: the same sweep shifted into the blue range
/// and slightly darkened.
pub fn visited(p: Point, start: Point, goal: Point) -> Color {
    hsl(120.0 * ratio(p, start, goal) + 180.0, 1.0, 0.4)
}

/// Position of `p` on the start-goal gradient: 1.0 at the start's distance
/// from the goal, 0.0 on the goal itself.
fn ratio(p: Point, start: Point, goal: Point) -> f64 {
    let span = start.dist(goal);
    if span == 0.0 { 0.0 } else { p.dist(goal) / span }
}

/// Convert HSL (hue in degrees, saturation and lightness in `[0, 1]`) to a
/// terminal RGB color.
pub fn hsl(h: f64, s: f64, l: f64) -> Color {
    let h = h.rem_euclid(360.0) / 60.0;
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = l - c / 2.0;
    let channel = |v: f64| ((v + m) * 255.0).round() as u8;
    Color::Rgb {
        r: channel(r),
        g: channel(g),
        b: channel(b),
    }
}
