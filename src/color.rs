use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::Outcome;

/// Pie colour for successful launches in the single-site view.
pub const SUCCESS_COLOR: Color32 = Color32::from_rgb(46, 160, 67);
/// Pie colour for failed launches in the single-site view.
pub const FAILURE_COLOR: Color32 = Color32::from_rgb(214, 69, 65);

// ---------------------------------------------------------------------------
// Color palette
// ---------------------------------------------------------------------------

fn hsl_to_color32(hue: f32, saturation: f32, lightness: f32) -> Color32 {
    let rgb: Srgb = Hsl::new(hue, saturation, lightness).into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

/// `n` evenly spaced hues in degrees.
fn hues(n: usize) -> impl Iterator<Item = f32> {
    (0..n).map(move |i| (i as f32 / n as f32) * 360.0)
}

pub fn outcome_color(outcome: Outcome) -> Color32 {
    match outcome {
        Outcome::Success => SUCCESS_COLOR,
        Outcome::Failure => FAILURE_COLOR,
    }
}

// ---------------------------------------------------------------------------
// Color mapping: launch site → Color32
// ---------------------------------------------------------------------------

/// Maps each launch site to a distinct hue.
#[derive(Debug, Clone)]
pub struct ColorMap {
    hues: BTreeMap<String, f32>,
    default_color: Color32,
}

impl ColorMap {
    /// Build a colour map for the given sites.
    pub fn new(sites: &[String]) -> Self {
        ColorMap {
            hues: sites.iter().cloned().zip(hues(sites.len())).collect(),
            default_color: Color32::GRAY,
        }
    }

    /// Colour used for a site's scatter points and legend entry.
    pub fn color_for(&self, site: &str) -> Color32 {
        self.hues
            .get(site)
            .map(|&h| hsl_to_color32(h, 0.75, 0.55))
            .unwrap_or(self.default_color)
    }

    /// Site hue darkened for failures and lightened for successes, so the
    /// all-sites pie keeps both slices of a site in the same colour family.
    pub fn shade(&self, site: &str, outcome: Outcome) -> Color32 {
        let lightness = match outcome {
            Outcome::Failure => 0.35,
            Outcome::Success => 0.65,
        };
        self.hues
            .get(site)
            .map(|&h| hsl_to_color32(h, 0.75, lightness))
            .unwrap_or(self.default_color)
    }

    /// Return the legend entries (site → colour) for the UI.
    pub fn legend_entries(&self) -> Vec<(String, Color32)> {
        self.hues
            .keys()
            .map(|site| (site.clone(), self.color_for(site)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sites() -> Vec<String> {
        ["CCAFS LC-40", "CCAFS SLC-40", "KSC LC-39A", "VAFB SLC-4E"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn each_site_gets_a_distinct_color() {
        let map = ColorMap::new(&sites());
        let colors: Vec<Color32> = sites().iter().map(|s| map.color_for(s)).collect();
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert_eq!(map.legend_entries().len(), 4);
    }

    #[test]
    fn unknown_site_is_gray() {
        let map = ColorMap::new(&sites());
        assert_eq!(map.color_for("Boca Chica"), Color32::GRAY);
        assert_eq!(map.shade("Boca Chica", Outcome::Success), Color32::GRAY);
    }

    #[test]
    fn outcome_shades_differ() {
        let map = ColorMap::new(&sites());
        assert_ne!(
            map.shade("KSC LC-39A", Outcome::Success),
            map.shade("KSC LC-39A", Outcome::Failure)
        );
    }
}
