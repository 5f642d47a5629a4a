//! Shared color constants for the UI.

use egui::Color32;

/// Forest green for completed actions.
pub const COLOR_GREEN: Color32 = Color32::from_rgb(34, 139, 34);

/// Red for errors and destructive buttons.
pub const COLOR_RED: Color32 = Color32::from_rgb(220, 53, 69);

/// Amber for warnings and pending work.
pub const COLOR_AMBER: Color32 = Color32::from_rgb(255, 193, 7);

/// Subtle gray table border.
pub const TABLE_BORDER_COLOR: Color32 = Color32::from_rgb(200, 200, 200);

/// Light gray header background.
pub const HEADER_BG_COLOR: Color32 = Color32::from_rgb(245, 245, 245);

pub fn from_srgb(rgb: [u8; 3]) -> Color32 {
    Color32::from_rgb(rgb[0], rgb[1], rgb[2])
}

/// Black or white, whichever reads better on `fill`.
pub fn text_on(fill: Color32) -> Color32 {
    // Rec. 601 luma, good enough for picking a text color.
    let luma = 0.299 * f32::from(fill.r()) + 0.587 * f32::from(fill.g()) + 0.114 * f32::from(fill.b());
    if luma > 150.0 {
        Color32::BLACK
    } else {
        Color32::WHITE
    }
}
