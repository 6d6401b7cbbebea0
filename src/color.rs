use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Mix, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Number of shades in the chart palette.
pub const CHART_SHADES: usize = 7;

fn to_color32(hsl: Hsl) -> Color32 {
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red.clamp(0.0, 1.0) * 255.0) as u8,
        (rgb.green.clamp(0.0, 1.0) * 255.0) as u8,
        (rgb.blue.clamp(0.0, 1.0) * 255.0) as u8,
    )
}

/// `n` shades from deep indigo to pale sky blue.
pub fn blue_ramp(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    let dark = Hsl::new(226.0, 0.64, 0.33);
    let light = Hsl::new(204.0, 0.94, 0.94);
    (0..n)
        .map(|i| {
            let t = if n == 1 { 0.0 } else { i as f32 / (n - 1) as f32 };
            to_color32(dark.mix(light, t))
        })
        .collect()
}

/// The dashboard's bar/slice palette.
pub fn chart_palette() -> Vec<Color32> {
    blue_ramp(CHART_SHADES)
}

/// Line colour for the monthly series (a mid shade of the ramp).
pub fn line_color() -> Color32 {
    chart_palette()[2]
}

// ---------------------------------------------------------------------------
// Color mapping: category → Color32
// ---------------------------------------------------------------------------

/// Maps category values (regions, sales methods) to palette shades.
///
/// Built from the full dataset's option list so a category keeps its colour
/// while filters narrow the view. Shades repeat when there are more
/// categories than the palette holds.
#[derive(Debug, Clone, Default)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
}

impl ColorMap {
    pub fn new(values: &BTreeSet<String>) -> Self {
        let palette = chart_palette();
        let mapping = values
            .iter()
            .zip(palette.iter().cycle())
            .map(|(v, c)| (v.clone(), *c))
            .collect();
        ColorMap { mapping }
    }

    /// Look up the colour for a category.
    pub fn color_for(&self, value: &str) -> Color32 {
        self.mapping.get(value).copied().unwrap_or(Color32::GRAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brightness(c: Color32) -> u32 {
        u32::from(c.r()) + u32::from(c.g()) + u32::from(c.b())
    }

    #[test]
    fn test_ramp_goes_dark_to_light() {
        let ramp = chart_palette();
        assert_eq!(ramp.len(), CHART_SHADES);
        assert!(ramp.windows(2).all(|w| brightness(w[0]) < brightness(w[1])));
        assert!(blue_ramp(0).is_empty());
        assert_eq!(blue_ramp(1).len(), 1);
    }

    #[test]
    fn test_color_map_cycles() {
        let values: BTreeSet<String> = (0..9).map(|i| format!("cat {i}")).collect();
        let map = ColorMap::new(&values);
        let palette = chart_palette();
        assert_eq!(map.color_for("cat 0"), palette[0]);
        assert_eq!(map.color_for("cat 7"), palette[0]);
        assert_eq!(map.color_for("cat 8"), palette[1]);
        assert_eq!(map.color_for("unknown"), Color32::GRAY);
    }
}
