use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Hour-of-day color scale
// ---------------------------------------------------------------------------

/// Colours for the 24 hour buckets: a blue → red hue sweep, so the quiet
/// early-morning hours and the evening rush read differently on the maps
/// and in the histogram.
pub fn hour_palette() -> [Color32; 24] {
    let mut colors = [Color32::GRAY; 24];
    for (hour, slot) in colors.iter_mut().enumerate() {
        let hue = 240.0 - (hour as f32 / 23.0) * 240.0;
        let hsl = Hsl::new(hue, 0.75, 0.55);
        let rgb: Srgb = hsl.into_color();
        *slot = Color32::from_rgb(
            (rgb.red * 255.0) as u8,
            (rgb.green * 255.0) as u8,
            (rgb.blue * 255.0) as u8,
        );
    }
    colors
}

/// Colour for one hour of day.
pub fn hour_color(hour: u32) -> Color32 {
    hour_palette()[(hour as usize).min(23)]
}
