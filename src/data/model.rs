use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use super::loader::LoadError;

// ---------------------------------------------------------------------------
// Outcome – the binary `class` column
// ---------------------------------------------------------------------------

/// Launch outcome. Class 1 is a success, class 0 a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Outcome {
    Failure,
    Success,
}

impl Outcome {
    /// Map a raw class value to an outcome; anything but 0 or 1 is rejected.
    pub fn from_class(class: i64) -> Option<Self> {
        match class {
            0 => Some(Outcome::Failure),
            1 => Some(Outcome::Success),
            _ => None,
        }
    }

    /// Same as [`Outcome::from_class`] for float-typed columns (`1.0`, `0.0`).
    pub fn from_class_f64(class: f64) -> Option<Self> {
        if class == 0.0 {
            Some(Outcome::Failure)
        } else if class == 1.0 {
            Some(Outcome::Success)
        } else {
            None
        }
    }

    pub fn class(self) -> u8 {
        match self {
            Outcome::Failure => 0,
            Outcome::Success => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Outcome::Failure => "Failure",
            Outcome::Success => "Success",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the table
// ---------------------------------------------------------------------------

/// A single launch (one row of the source table).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaunchRecord {
    pub site: String,
    pub payload_mass_kg: f64,
    pub outcome: Outcome,
}

impl LaunchRecord {
    pub fn new(site: impl Into<String>, payload_mass_kg: f64, outcome: Outcome) -> Self {
        LaunchRecord {
            site: site.into(),
            payload_mass_kg,
            outcome,
        }
    }
}

// ---------------------------------------------------------------------------
// LaunchDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// All launch records with the site list and payload bounds pre-computed.
#[derive(Debug, Clone)]
pub struct LaunchDataset {
    records: Vec<LaunchRecord>,
    /// Distinct launch sites in sorted order.
    sites: Vec<String>,
    payload_min: f64,
    payload_max: f64,
}

impl LaunchDataset {
    /// Build the dataset; an empty record list is a load error.
    pub fn new(records: Vec<LaunchRecord>) -> Result<Self, LoadError> {
        if records.is_empty() {
            return Err(LoadError::Empty);
        }

        let sites: Vec<String> = records
            .iter()
            .map(|r| r.site.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let (payload_min, payload_max) = records.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY),
            |(lo, hi), r| (lo.min(r.payload_mass_kg), hi.max(r.payload_mass_kg)),
        );

        Ok(LaunchDataset {
            records,
            sites,
            payload_min,
            payload_max,
        })
    }

    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    pub fn sites(&self) -> &[String] {
        &self.sites
    }

    pub fn has_site(&self, site: &str) -> bool {
        self.sites.binary_search_by(|s| s.as_str().cmp(site)).is_ok()
    }

    /// The full observed payload span, the default slider value.
    pub fn payload_bounds(&self) -> PayloadRange {
        PayloadRange::new(self.payload_min, self.payload_max)
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }
}

// ---------------------------------------------------------------------------
// SiteSelector / PayloadRange – the two control values
// ---------------------------------------------------------------------------

/// Dropdown value: every site, or one named site.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum SiteSelector {
    #[default]
    All,
    Site(String),
}

impl SiteSelector {
    /// Wire value of the "all sites" option.
    pub const ALL_VALUE: &'static str = "ALL";

    /// Parse a dropdown value. Only the exact string `ALL` selects every site.
    pub fn parse(value: &str) -> Self {
        if value == Self::ALL_VALUE {
            SiteSelector::All
        } else {
            SiteSelector::Site(value.to_string())
        }
    }

    pub fn value(&self) -> &str {
        match self {
            SiteSelector::All => Self::ALL_VALUE,
            SiteSelector::Site(s) => s,
        }
    }

    /// Text shown in the dropdown.
    pub fn label(&self) -> &str {
        match self {
            SiteSelector::All => "All Sites",
            SiteSelector::Site(s) => s,
        }
    }

    /// Case-insensitive search on the dropdown label; an empty query matches.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim();
        query.is_empty()
            || self
                .label()
                .to_lowercase()
                .contains(&query.to_lowercase())
    }

    /// Dropdown options: "All Sites" then every site of the dataset.
    pub fn options(dataset: &LaunchDataset) -> Vec<SiteSelector> {
        std::iter::once(SiteSelector::All)
            .chain(dataset.sites().iter().cloned().map(SiteSelector::Site))
            .collect()
    }
}

/// Closed payload interval `[low, high]` in kilograms.
///
/// An inverted interval (`low > high`) is allowed and contains nothing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PayloadRange {
    pub low: f64,
    pub high: f64,
}

impl PayloadRange {
    pub fn new(low: f64, high: f64) -> Self {
        PayloadRange { low, high }
    }

    pub fn contains(&self, payload_mass_kg: f64) -> bool {
        self.low <= payload_mass_kg && payload_mass_kg <= self.high
    }

    pub fn is_inverted(&self) -> bool {
        self.low > self.high
    }

    /// Both ends pulled inside `bounds`.
    pub fn clamped_to(&self, bounds: &PayloadRange) -> PayloadRange {
        PayloadRange {
            low: self.low.clamp(bounds.low, bounds.high),
            high: self.high.clamp(bounds.low, bounds.high),
        }
    }

    /// Slider marks every `step` kg from the truncated lower bound up to the
    /// upper bound.
    pub fn marks(&self, step: f64) -> Vec<f64> {
        if step <= 0.0 || !step.is_finite() || self.is_inverted() {
            return Vec::new();
        }
        let start = self.low.trunc();
        let count = ((self.high.trunc() - start) / step).floor() as usize;
        (0..=count).map(|i| start + i as f64 * step).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> LaunchDataset {
        LaunchDataset::new(vec![
            LaunchRecord::new("siteB", 1000.0, Outcome::Success),
            LaunchRecord::new("siteA", 500.0, Outcome::Success),
            LaunchRecord::new("siteA", 1500.0, Outcome::Failure),
        ])
        .unwrap()
    }

    #[test]
    fn sites_are_sorted_and_distinct() {
        let ds = sample();
        assert_eq!(ds.sites(), ["siteA".to_string(), "siteB".to_string()]);
        assert!(ds.has_site("siteB"));
        assert!(!ds.has_site("siteC"));
    }

    #[test]
    fn payload_bounds_span_observed_values() {
        assert_eq!(sample().payload_bounds(), PayloadRange::new(500.0, 1500.0));
    }

    #[test]
    fn empty_dataset_is_rejected() {
        assert!(matches!(LaunchDataset::new(Vec::new()), Err(LoadError::Empty)));
    }

    #[test]
    fn class_values_outside_zero_and_one_are_rejected() {
        assert_eq!(Outcome::from_class(1), Some(Outcome::Success));
        assert_eq!(Outcome::from_class(0), Some(Outcome::Failure));
        assert_eq!(Outcome::from_class(2), None);
        assert_eq!(Outcome::from_class_f64(1.0), Some(Outcome::Success));
        assert_eq!(Outcome::from_class_f64(0.5), None);
    }

    #[test]
    fn selector_parses_all_sentinel() {
        assert_eq!(SiteSelector::parse("ALL"), SiteSelector::All);
        assert_eq!(
            SiteSelector::parse("all"),
            SiteSelector::Site("all".to_string())
        );
        assert_eq!(SiteSelector::All.label(), "All Sites");
        assert_eq!(SiteSelector::parse("KSC LC-39A").value(), "KSC LC-39A");
    }

    #[test]
    fn options_start_with_all_sites() {
        let opts = SiteSelector::options(&sample());
        assert_eq!(opts.len(), 3);
        assert_eq!(opts[0], SiteSelector::All);
        assert_eq!(opts[1], SiteSelector::Site("siteA".to_string()));
    }

    #[test]
    fn selector_search_ignores_case() {
        let site = SiteSelector::parse("KSC LC-39A");
        assert!(site.matches(""));
        assert!(site.matches("ksc"));
        assert!(site.matches(" 39a "));
        assert!(!site.matches("vafb"));
        assert!(SiteSelector::All.matches("all"));
    }

    #[test]
    fn clamping_keeps_values_inside_bounds() {
        let bounds = PayloadRange::new(0.0, 9600.0);
        assert_eq!(
            PayloadRange::new(-500.0, 10000.0).clamped_to(&bounds),
            bounds
        );
        assert_eq!(
            PayloadRange::new(250.0, 9400.0).clamped_to(&bounds),
            PayloadRange::new(250.0, 9400.0)
        );
    }

    #[test]
    fn marks_every_step_up_to_upper_bound() {
        let marks = PayloadRange::new(0.0, 9600.0).marks(1000.0);
        assert_eq!(marks.len(), 10);
        assert_eq!(marks.first(), Some(&0.0));
        assert_eq!(marks.last(), Some(&9000.0));
        assert_eq!(PayloadRange::new(0.0, 9600.0).marks(0.0), Vec::<f64>::new());
        assert_eq!(PayloadRange::new(500.0, 500.0).marks(1000.0), vec![500.0]);
    }

    #[test]
    fn range_is_closed_on_both_ends() {
        let r = PayloadRange::new(500.0, 1000.0);
        assert!(r.contains(500.0));
        assert!(r.contains(1000.0));
        assert!(!r.contains(1000.5));
        assert!(!PayloadRange::new(2.0, 1.0).contains(1.5));
    }
}
