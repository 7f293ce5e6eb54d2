use std::path::PathBuf;

use clap::Parser;

use crate::dashboard::Controls;
use crate::data::model::{LaunchDataset, PayloadRange, SiteSelector};

/// Interactive launch outcome dashboard.
#[derive(Debug, Clone, Parser)]
#[command(name = "launch-dash", version, about)]
pub struct Config {
    /// Launch records file (.csv, .json or .parquet)
    #[arg(short, long, env = "LAUNCH_DASH_DATA", default_value = "data/spacex_launch_dash.csv")]
    pub data: PathBuf,

    /// Initially selected site ("ALL" for every site)
    #[arg(long, default_value = "ALL")]
    pub site: String,

    /// Initial lower payload bound in kg (defaults to the dataset minimum)
    #[arg(long)]
    pub payload_low: Option<f64>,

    /// Initial upper payload bound in kg (defaults to the dataset maximum)
    #[arg(long)]
    pub payload_high: Option<f64>,

    /// Payload slider step in kg
    #[arg(long, default_value_t = 1000.0)]
    pub slider_step: f64,

    /// Print the aggregation for the initial selection as JSON and exit
    #[arg(long)]
    pub summary: bool,

    /// Default log filter (RUST_LOG takes precedence)
    #[arg(long, env = "LAUNCH_DASH_LOG", default_value = "info")]
    pub log_level: String,
}

impl Config {
    /// Control values to start with, filled in from the dataset where unset.
    pub fn initial_controls(&self, dataset: &LaunchDataset) -> Controls {
        let bounds = dataset.payload_bounds();
        let site = SiteSelector::parse(&self.site);
        if let SiteSelector::Site(name) = &site {
            if !dataset.has_site(name) {
                log::warn!("Site {name:?} is not in the dataset; the pie chart will be empty");
            }
        }
        Controls {
            site,
            payload: PayloadRange::new(
                self.payload_low.unwrap_or(bounds.low),
                self.payload_high.unwrap_or(bounds.high),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{LaunchRecord, Outcome};

    fn dataset() -> LaunchDataset {
        LaunchDataset::new(vec![
            LaunchRecord::new("siteA", 500.0, Outcome::Success),
            LaunchRecord::new("siteB", 4000.0, Outcome::Failure),
        ])
        .unwrap()
    }

    #[test]
    fn defaults() {
        let config = Config::try_parse_from(["launch-dash"]).unwrap();
        assert_eq!(config.site, "ALL");
        assert_eq!(config.slider_step, 1000.0);
        assert!(!config.summary);
        assert_eq!(config.payload_low, None);
    }

    #[test]
    fn initial_controls_default_to_full_span() {
        let config = Config::try_parse_from(["launch-dash"]).unwrap();
        let controls = config.initial_controls(&dataset());
        assert_eq!(controls, Controls::initial(&dataset()));
    }

    #[test]
    fn initial_controls_take_overrides() {
        let config = Config::try_parse_from([
            "launch-dash",
            "--site",
            "siteB",
            "--payload-high",
            "2000",
        ])
        .unwrap();
        let controls = config.initial_controls(&dataset());
        assert_eq!(controls.site, SiteSelector::Site("siteB".to_string()));
        assert_eq!(controls.payload, PayloadRange::new(500.0, 2000.0));
    }
}
