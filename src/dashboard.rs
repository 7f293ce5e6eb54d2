//! Control-change → recompute → render.
//!
//! ```text
//!   site dropdown ─┐                  ┌─▶ RenderSink::show_pie
//!                  ├─▶ Controls ─▶ update ─┤
//!   payload range ─┘                  └─▶ RenderSink::show_scatter
//! ```

use crate::color::ColorMap;
use crate::data::aggregate::compute;
use crate::data::model::{LaunchDataset, PayloadRange, SiteSelector};
use crate::figure::{PieFigure, ScatterFigure};

/// Current value of the two input controls.
#[derive(Debug, Clone, PartialEq)]
pub struct Controls {
    pub site: SiteSelector,
    pub payload: PayloadRange,
}

impl Controls {
    /// "All Sites" over the dataset's full payload span.
    pub fn initial(dataset: &LaunchDataset) -> Self {
        Controls {
            site: SiteSelector::All,
            payload: dataset.payload_bounds(),
        }
    }
}

/// Where the two figures go after every recomputation.
pub trait RenderSink {
    fn show_pie(&mut self, figure: PieFigure);
    fn show_scatter(&mut self, figure: ScatterFigure);
}

/// Figures currently on screen.
#[derive(Debug, Clone, Default)]
pub struct Figures {
    pub pie: Option<PieFigure>,
    pub scatter: Option<ScatterFigure>,
    /// Bumped once per recomputation (on the scatter push, which `update`
    /// sends last). The scatter plot resets its view when it changes.
    pub generation: u64,
}

impl RenderSink for Figures {
    fn show_pie(&mut self, figure: PieFigure) {
        self.pie = Some(figure);
    }

    fn show_scatter(&mut self, figure: ScatterFigure) {
        self.scatter = Some(figure);
        self.generation += 1;
    }
}

/// Recompute both charts for `controls` and push them into `sink`.
pub fn update(
    dataset: &LaunchDataset,
    controls: &Controls,
    colors: &ColorMap,
    sink: &mut impl RenderSink,
) {
    let aggregation = compute(dataset, &controls.site, &controls.payload);
    log::debug!(
        "site={} payload=[{}, {}]: {} launches counted, {} rows in range",
        controls.site.value(),
        controls.payload.low,
        controls.payload.high,
        aggregation.outcomes.total(),
        aggregation.filtered.len(),
    );

    sink.show_pie(PieFigure::from_outcomes(
        &aggregation.outcomes,
        &controls.site,
        colors,
    ));
    sink.show_scatter(ScatterFigure::from_rows(&aggregation.filtered, colors));
}
