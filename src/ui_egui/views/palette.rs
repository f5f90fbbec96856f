use egui::Color32;

use crate::services::color::HexColor;

fn with_alpha(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

/// Convert a configured block colour for painting
pub(crate) fn to_color32(color: &HexColor) -> Color32 {
    let [r, g, b] = color.rgb();
    Color32::from_rgb(r, g, b)
}

#[derive(Clone, Copy)]
pub(crate) struct GridPalette {
    pub cell_bg: Color32,
    pub evening_cell_bg: Color32,
    pub header_bg: Color32,
    pub label_bg: Color32,
    pub evening_label_bg: Color32,
    pub border: Color32,
    pub header_text: Color32,
    pub label_text: Color32,
    pub block_text: Color32,
    pub hover_overlay: Color32,
    pub drag_outline: Color32,
    pub delete_text: Color32,
}

impl Default for GridPalette {
    fn default() -> Self {
        Self {
            cell_bg: Color32::WHITE,
            evening_cell_bg: Color32::from_rgb(237, 242, 247),
            header_bg: Color32::from_rgb(237, 242, 247),
            label_bg: Color32::from_rgb(237, 242, 247),
            evening_label_bg: Color32::from_rgb(226, 232, 240),
            border: Color32::from_rgb(203, 213, 224),
            header_text: Color32::from_rgb(26, 32, 44),
            label_text: Color32::from_rgb(45, 55, 72),
            block_text: Color32::from_rgb(26, 32, 44),
            hover_overlay: with_alpha(Color32::from_rgb(254, 252, 191), 220),
            drag_outline: Color32::from_rgb(99, 179, 237),
            delete_text: Color32::from_rgb(197, 48, 48),
        }
    }
}
