use std::f32::consts::TAU;

use eframe::egui::Color32;

use crate::color::{outcome_color, ColorMap};
use crate::data::aggregate::{FilteredRows, OutcomeAggregate};
use crate::data::model::{Outcome, SiteSelector};

// ---------------------------------------------------------------------------
// Pie chart
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub value: usize,
    pub color: Color32,
}

/// Angular layout of one slice, angles in radians starting at 12 o'clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wedge {
    pub start: f32,
    pub sweep: f32,
    pub fraction: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieFigure {
    pub title: String,
    pub slices: Vec<PieSlice>,
}

impl PieFigure {
    pub fn from_outcomes(
        outcomes: &OutcomeAggregate,
        site: &SiteSelector,
        colors: &ColorMap,
    ) -> Self {
        match site {
            SiteSelector::All => PieFigure {
                title: "Total Success and Failure Counts for All Sites".to_string(),
                slices: outcomes
                    .entries
                    .iter()
                    .map(|e| PieSlice {
                        label: format!("{} ({})", e.site, e.outcome),
                        value: e.count,
                        color: colors.shade(&e.site, e.outcome),
                    })
                    .collect(),
            },
            SiteSelector::Site(name) => PieFigure {
                title: format!("Success and Failure Counts for {name}"),
                slices: outcomes
                    .entries
                    .iter()
                    .map(|e| PieSlice {
                        label: e.outcome.label().to_string(),
                        value: e.count,
                        color: outcome_color(e.outcome),
                    })
                    .collect(),
            },
        }
    }

    pub fn total(&self) -> usize {
        self.slices.iter().map(|s| s.value).sum()
    }

    /// One wedge per slice, in slice order. Empty when every slice is zero.
    pub fn wedges(&self) -> Vec<Wedge> {
        let total = self.total();
        if total == 0 {
            return Vec::new();
        }
        let mut start = 0.0_f32;
        self.slices
            .iter()
            .map(|s| {
                let fraction = s.value as f64 / total as f64;
                let sweep = fraction as f32 * TAU;
                let wedge = Wedge {
                    start,
                    sweep,
                    fraction,
                };
                start += sweep;
                wedge
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Scatter chart
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterSeries {
    pub name: String,
    pub color: Color32,
    /// `[payload mass, class]` pairs.
    pub points: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterFigure {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<ScatterSeries>,
}

impl ScatterFigure {
    /// Payload vs. outcome, one series per site present in `rows`.
    pub fn from_rows(rows: &FilteredRows<'_>, colors: &ColorMap) -> Self {
        let mut series: Vec<ScatterSeries> = Vec::new();
        for rec in &rows.rows {
            let point = [rec.payload_mass_kg, f64::from(rec.outcome.class())];
            match series.iter_mut().find(|s| s.name == rec.site) {
                Some(s) => s.points.push(point),
                None => series.push(ScatterSeries {
                    name: rec.site.clone(),
                    color: colors.color_for(&rec.site),
                    points: vec![point],
                }),
            }
        }
        series.sort_by(|a, b| a.name.cmp(&b.name));

        ScatterFigure {
            title: "Payload vs. Launch Outcome".to_string(),
            x_label: "Payload Mass (kg)".to_string(),
            y_label: "Launch Outcome".to_string(),
            series,
        }
    }

    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }

    /// Plotted records as `(site, payload, outcome)`, grouped by site.
    pub fn rows(&self) -> Vec<(&str, f64, Outcome)> {
        self.series
            .iter()
            .flat_map(|s| {
                s.points.iter().filter_map(move |&[payload, class]| {
                    Outcome::from_class_f64(class).map(|o| (s.name.as_str(), payload, o))
                })
            })
            .collect()
    }
}

/// Y-axis tick text for the outcome axis.
pub fn outcome_tick_label(class: f64) -> String {
    match class {
        c if c == 0.0 => Outcome::Failure.label().to_string(),
        c if c == 1.0 => Outcome::Success.label().to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::aggregate::compute;
    use crate::data::model::{LaunchDataset, LaunchRecord, PayloadRange};

    fn dataset() -> LaunchDataset {
        LaunchDataset::new(vec![
            LaunchRecord::new("siteA", 500.0, Outcome::Success),
            LaunchRecord::new("siteA", 1500.0, Outcome::Failure),
            LaunchRecord::new("siteB", 1000.0, Outcome::Success),
        ])
        .unwrap()
    }

    #[test]
    fn all_sites_pie_has_one_slice_per_entry() {
        let ds = dataset();
        let colors = ColorMap::new(ds.sites());
        let agg = compute(&ds, &SiteSelector::All, &ds.payload_bounds());
        let pie = PieFigure::from_outcomes(&agg.outcomes, &SiteSelector::All, &colors);

        assert_eq!(pie.title, "Total Success and Failure Counts for All Sites");
        let labels: Vec<&str> = pie.slices.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(
            labels,
            ["siteA (Failure)", "siteA (Success)", "siteB (Success)"]
        );
        assert_eq!(pie.total(), 3);
    }

    #[test]
    fn single_site_pie_uses_outcome_labels() {
        let ds = dataset();
        let colors = ColorMap::new(ds.sites());
        let site = SiteSelector::parse("siteB");
        let agg = compute(&ds, &site, &ds.payload_bounds());
        let pie = PieFigure::from_outcomes(&agg.outcomes, &site, &colors);

        assert_eq!(pie.title, "Success and Failure Counts for siteB");
        assert_eq!(pie.slices[0].label, "Success");
        assert_eq!(pie.slices[0].value, 1);
        assert_eq!(pie.slices[1].label, "Failure");
        assert_eq!(pie.slices[1].value, 0);
        assert_eq!(pie.slices[0].color, outcome_color(Outcome::Success));
    }

    #[test]
    fn wedges_cover_a_full_turn() {
        let pie = PieFigure {
            title: String::new(),
            slices: [3, 0, 1]
                .into_iter()
                .map(|value| PieSlice {
                    label: value.to_string(),
                    value,
                    color: Color32::GRAY,
                })
                .collect(),
        };
        let wedges = pie.wedges();
        assert_eq!(wedges.len(), 3);
        assert!((wedges[0].fraction - 0.75).abs() < 1e-12);
        assert_eq!(wedges[1].sweep, 0.0);
        let swept: f32 = wedges.iter().map(|w| w.sweep).sum();
        assert!((swept - TAU).abs() < 1e-5);
        assert!((wedges[2].start - wedges[0].sweep).abs() < 1e-6);
    }

    #[test]
    fn empty_pie_has_no_wedges() {
        let pie = PieFigure {
            title: String::new(),
            slices: Vec::new(),
        };
        assert!(pie.wedges().is_empty());
    }

    #[test]
    fn scatter_groups_points_by_site() {
        let ds = dataset();
        let colors = ColorMap::new(ds.sites());
        let agg = compute(&ds, &SiteSelector::parse("siteB"), &PayloadRange::new(0.0, 1000.0));
        let scatter = ScatterFigure::from_rows(&agg.filtered, &colors);

        assert_eq!(scatter.point_count(), 2);
        assert_eq!(scatter.series.len(), 2);
        assert_eq!(scatter.series[0].name, "siteA");
        assert_eq!(scatter.series[0].points, vec![[500.0, 1.0]]);
        assert_eq!(scatter.series[1].color, colors.color_for("siteB"));
        assert_eq!(scatter.y_label, "Launch Outcome");
    }

    #[test]
    fn scatter_rows_carry_site_payload_and_outcome() {
        let ds = dataset();
        let colors = ColorMap::new(ds.sites());
        let agg = compute(&ds, &SiteSelector::All, &PayloadRange::new(1000.0, 1500.0));
        let scatter = ScatterFigure::from_rows(&agg.filtered, &colors);

        assert_eq!(
            scatter.rows(),
            vec![
                ("siteA", 1500.0, Outcome::Failure),
                ("siteB", 1000.0, Outcome::Success),
            ]
        );
    }

    #[test]
    fn outcome_ticks_only_on_classes() {
        assert_eq!(outcome_tick_label(1.0), "Success");
        assert_eq!(outcome_tick_label(0.0), "Failure");
        assert_eq!(outcome_tick_label(0.5), "");
    }
}
