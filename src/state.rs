use std::path::Path;

use crate::color::ColorMap;
use crate::dashboard::{self, Controls, Figures};
use crate::data::loader::{self, LoadError};
use crate::data::model::{LaunchDataset, PayloadRange, SiteSelector};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded launch records.
    pub dataset: LaunchDataset,

    /// Current dropdown and slider values.
    pub controls: Controls,

    /// Charts produced by the last control change.
    pub figures: Figures,

    /// Per-site colours shared by both charts.
    pub color_map: ColorMap,

    /// Payload slider step in kg.
    pub slider_step: f64,

    /// Text typed into the site dropdown's search box.
    pub site_query: String,

    /// Whether the table of in-range rows is shown.
    pub show_rows: bool,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(dataset: LaunchDataset, controls: Controls, slider_step: f64) -> Self {
        let color_map = ColorMap::new(dataset.sites());
        let mut state = Self {
            dataset,
            controls,
            figures: Figures::default(),
            color_map,
            slider_step,
            site_query: String::new(),
            show_rows: false,
            status_message: None,
        };
        state.refresh();
        state
    }

    /// Ingest a newly loaded dataset, reset the controls and redraw.
    pub fn set_dataset(&mut self, dataset: LaunchDataset) {
        self.controls = Controls::initial(&dataset);
        self.color_map = ColorMap::new(dataset.sites());
        self.dataset = dataset;
        self.site_query.clear();
        self.status_message = None;
        self.refresh();
    }

    /// Replace the dataset from a file; on failure the current one is kept.
    pub fn open(&mut self, path: &Path) -> Result<(), LoadError> {
        let dataset = loader::load_file(path)?;
        log::info!(
            "Loaded {} launches from {} across sites {:?}",
            dataset.len(),
            path.display(),
            dataset.sites()
        );
        self.set_dataset(dataset);
        Ok(())
    }

    /// Recompute both figures from the current controls.
    pub fn refresh(&mut self) {
        dashboard::update(
            &self.dataset,
            &self.controls,
            &self.color_map,
            &mut self.figures,
        );
    }

    /// Dropdown change.
    pub fn select_site(&mut self, site: SiteSelector) {
        if self.controls.site != site {
            self.controls.site = site;
            self.refresh();
        }
    }

    /// Slider change.
    pub fn set_payload_range(&mut self, range: PayloadRange) {
        if self.controls.payload != range {
            self.controls.payload = range;
            self.refresh();
        }
    }

    /// Back to "All Sites" over the full payload span.
    pub fn reset_controls(&mut self) {
        let initial = Controls::initial(&self.dataset);
        if self.controls != initial {
            self.controls = initial;
            self.refresh();
        }
    }
}
