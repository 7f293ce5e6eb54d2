use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct LaunchDashApp {
    pub state: AppState,
}

impl LaunchDashApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for LaunchDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: dropdown + payload range ----
        egui::SidePanel::left("control_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::control_panel(ui, &mut self.state);
            });

        // ---- Bottom panel: rows in range ----
        if self.state.show_rows {
            egui::TopBottomPanel::bottom("rows_panel")
                .resizable(true)
                .default_height(200.0)
                .show(ctx, |ui| {
                    panels::rows_table(ui, &self.state);
                });
        }

        // ---- Central panel: pie above scatter ----
        egui::CentralPanel::default().show(ctx, |ui| {
            let pie_height = ui.available_height() * 0.45;
            let width = ui.available_width();
            ui.allocate_ui(egui::vec2(width, pie_height), |ui| {
                plot::pie_chart(ui, self.state.figures.pie.as_ref());
            });
            ui.separator();
            plot::scatter_chart(
                ui,
                self.state.figures.scatter.as_ref(),
                self.state.figures.generation,
            );
        });
    }
}
