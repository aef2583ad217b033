pub mod panels;
pub mod plot;
pub mod stats_table;

use eframe::egui::Color32;
use palette::Srgb;

/// Convert a palette colour for egui.
pub fn to_color32(c: Srgb<u8>) -> Color32 {
    Color32::from_rgb(c.red, c.green, c.blue)
}
