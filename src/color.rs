use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::region::Region;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Region → Color32
// ---------------------------------------------------------------------------

/// One colour per fixed region; `Other` is grey.
#[derive(Debug, Clone)]
pub struct RegionColors {
    mapping: BTreeMap<Region, Color32>,
    default_color: Color32,
}

impl Default for RegionColors {
    fn default() -> Self {
        let mapping = Region::ALL
            .into_iter()
            .zip(generate_palette(Region::ALL.len()))
            .collect();
        RegionColors {
            mapping,
            default_color: Color32::GRAY,
        }
    }
}

impl RegionColors {
    pub fn color_for(&self, region: Region) -> Color32 {
        self.mapping
            .get(&region)
            .copied()
            .unwrap_or(self.default_color)
    }
}
