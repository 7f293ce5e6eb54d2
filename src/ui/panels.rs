use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::{PayloadRange, SiteSelector};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – the two input controls
// ---------------------------------------------------------------------------

/// Render the site dropdown and the payload range controls.
pub fn control_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("SpaceX Launch Records");
    ui.separator();

    // ---- Launch site dropdown (searchable) ----
    ui.strong("Launch Site");
    let mut selected = state.controls.site.clone();
    let query = &mut state.site_query;
    let dataset = &state.dataset;
    egui::ComboBox::from_id_salt("site_dropdown")
        .selected_text(selected.label().to_string())
        .width(ui.available_width())
        .close_behavior(egui::PopupCloseBehavior::CloseOnClickOutside)
        .show_ui(ui, |ui: &mut Ui| {
            ui.add(egui::TextEdit::singleline(query).hint_text("Select a Launch Site"));
            for option in SiteSelector::options(dataset) {
                if !option.matches(query) {
                    continue;
                }
                let label = option.label().to_string();
                if ui.selectable_value(&mut selected, option, label).clicked() {
                    ui.memory_mut(|m| m.close_popup());
                }
            }
        });
    state.select_site(selected);

    ui.add_space(8.0);

    // ---- Payload range ----
    ui.strong("Payload range (Kg):");
    let bounds = state.dataset.payload_bounds();
    let mut range = state.controls.payload;
    let step = state.slider_step;

    // Stepping only applies to drags; values set elsewhere (defaults, CLI)
    // are left untouched and clamped here instead of by the slider.
    ui.scope(|ui: &mut Ui| {
        let rail = (ui.available_width() - 70.0).max(80.0);
        ui.spacing_mut().slider_width = rail;

        let low = ui.add(
            egui::Slider::new(&mut range.low, bounds.low..=bounds.high)
                .step_by(step)
                .clamping(egui::SliderClamping::Never)
                .text("min"),
        );
        let high = ui.add(
            egui::Slider::new(&mut range.high, bounds.low..=bounds.high)
                .step_by(step)
                .clamping(egui::SliderClamping::Never)
                .text("max"),
        );
        slider_marks(ui, &bounds, step, rail);

        if low.changed() || high.changed() {
            state.set_payload_range(range.clamped_to(&bounds));
        }
    });

    if state.controls.payload.is_inverted() {
        ui.label(RichText::new("Lower bound is above upper bound.").color(Color32::YELLOW));
    }

    ui.add_space(8.0);
    if ui.button("Reset").clicked() {
        state.reset_controls();
    }

    ui.separator();

    // ---- Site colours ----
    ui.strong("Sites");
    for (site, color) in state.color_map.legend_entries() {
        ui.label(RichText::new(site).color(color));
    }
}

/// Tick labels every `step` kg under a slider rail `width` points wide.
fn slider_marks(ui: &mut Ui, bounds: &PayloadRange, step: f64, width: f32) {
    let (rect, _) = ui.allocate_exact_size(egui::vec2(width, 14.0), egui::Sense::hover());
    let painter = ui.painter_at(rect);
    let span = bounds.high - bounds.low;
    let color = ui.visuals().weak_text_color();

    let marks = bounds.marks(step);
    // Label only as many marks as fit, always starting from the first.
    let every = ((marks.len() as f32 * 30.0) / width).ceil().max(1.0) as usize;
    for (i, mark) in marks.iter().enumerate() {
        let t = if span > 0.0 { (mark - bounds.low) / span } else { 0.0 };
        let x = rect.left() + t as f32 * rect.width();
        painter.line_segment(
            [egui::pos2(x, rect.top()), egui::pos2(x, rect.top() + 3.0)],
            egui::Stroke::new(1.0, color),
        );
        if i % every == 0 {
            painter.text(
                egui::pos2(x, rect.bottom()),
                egui::Align2::CENTER_BOTTOM,
                format!("{mark:.0}"),
                egui::FontId::proportional(9.0),
                color,
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Bottom panel – rows inside the payload range
// ---------------------------------------------------------------------------

/// Table of the launches currently plotted in the scatter chart.
pub fn rows_table(ui: &mut Ui, state: &AppState) {
    let rows = state
        .figures
        .scatter
        .as_ref()
        .map(|s| s.rows())
        .unwrap_or_default();
    ui.strong(format!("{} launches with payload in range", rows.len()));

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .column(Column::auto().at_least(140.0))
        .column(Column::auto().at_least(140.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("Launch Site");
            });
            header.col(|ui| {
                ui.strong("Payload Mass (kg)");
            });
            header.col(|ui| {
                ui.strong("Outcome");
            });
        })
        .body(|body| {
            body.rows(18.0, rows.len(), |mut row| {
                let (site, payload, outcome) = rows[row.index()];
                row.col(|ui| {
                    ui.colored_label(state.color_map.color_for(site), site);
                });
                row.col(|ui| {
                    ui.label(format!("{payload:.0}"));
                });
                row.col(|ui| {
                    ui.label(outcome.label());
                });
            });
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        let in_range = state
            .figures
            .scatter
            .as_ref()
            .map_or(0, |s| s.point_count());
        ui.label(format!(
            "{} launches loaded, {} in payload range",
            state.dataset.len(),
            in_range
        ));

        ui.separator();

        if ui.selectable_label(state.show_rows, "Rows").clicked() {
            state.show_rows = !state.show_rows;
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open launch records")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        if let Err(e) = state.open(&path) {
            log::error!("Failed to load {}: {e}", path.display());
            state.status_message = Some(format!("Error: {e}"));
        }
    }
}
