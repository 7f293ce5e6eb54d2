mod app;
mod color;
mod config;
mod dashboard;
mod data;
mod figure;
mod state;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use eframe::egui;
use serde::Serialize;

use app::LaunchDashApp;
use config::Config;
use dashboard::Controls;
use data::aggregate::{compute, Aggregation};
use data::model::{LaunchDataset, PayloadRange};
use state::AppState;

/// `--summary` output.
#[derive(Serialize)]
struct Summary<'a> {
    site: &'a str,
    payload: PayloadRange,
    #[serde(flatten)]
    aggregation: Aggregation<'a>,
}

fn print_summary(dataset: &LaunchDataset, controls: &Controls) -> Result<()> {
    let summary = Summary {
        site: controls.site.value(),
        payload: controls.payload,
        aggregation: compute(dataset, &controls.site, &controls.payload),
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&summary).context("serializing summary")?
    );
    Ok(())
}

fn main() -> Result<()> {
    let config = Config::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    let dataset = data::loader::load_file(&config.data)
        .with_context(|| format!("loading launch records from {}", config.data.display()))?;
    log::info!(
        "Loaded {} launches across sites {:?}",
        dataset.len(),
        dataset.sites()
    );

    let controls = config.initial_controls(&dataset);

    if config.summary {
        return print_summary(&dataset, &controls);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    let state = AppState::new(dataset, controls, config.slider_step);
    eframe::run_native(
        "SpaceX Launch Records Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(LaunchDashApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("running dashboard: {e}"))
}
