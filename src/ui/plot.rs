use std::f32::consts::{FRAC_PI_2, TAU};

use eframe::egui::{self, Align2, Color32, FontId, Pos2, Sense, Shape, Stroke, Ui, Vec2};
use egui_plot::{Legend, MarkerShape, Plot, PlotPoints, Points};

use crate::figure::{outcome_tick_label, PieFigure, ScatterFigure, Wedge};

// ---------------------------------------------------------------------------
// Pie chart (painted)
// ---------------------------------------------------------------------------

/// Point at `angle` radians clockwise from 12 o'clock.
fn polar(center: Pos2, radius: f32, angle: f32) -> Pos2 {
    center + Vec2::new(angle.sin(), -angle.cos()) * radius
}

/// Whether `pos` falls inside the wedge of a pie centred at `center`.
fn wedge_contains(center: Pos2, radius: f32, wedge: &Wedge, pos: Pos2) -> bool {
    let d = pos - center;
    if d.length() > radius {
        return false;
    }
    let angle = d.x.atan2(-d.y).rem_euclid(TAU);
    angle >= wedge.start && angle < wedge.start + wedge.sweep
}

/// Fill a wedge as convex fans of at most a quarter turn each.
fn paint_wedge(painter: &egui::Painter, center: Pos2, radius: f32, wedge: &Wedge, color: Color32) {
    let chunks = (wedge.sweep / FRAC_PI_2).ceil().max(1.0) as usize;
    let chunk_sweep = wedge.sweep / chunks as f32;
    for c in 0..chunks {
        let a0 = wedge.start + c as f32 * chunk_sweep;
        let steps = 24;
        let mut points = Vec::with_capacity(steps + 2);
        points.push(center);
        for s in 0..=steps {
            points.push(polar(center, radius, a0 + chunk_sweep * s as f32 / steps as f32));
        }
        painter.add(Shape::convex_polygon(points, color, Stroke::NONE));
    }
}

/// Render the outcome pie with a legend on its right.
pub fn pie_chart(ui: &mut Ui, figure: Option<&PieFigure>) {
    let Some(figure) = figure else {
        return;
    };

    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(figure.title.as_str());
    });

    let wedges = figure.wedges();
    if wedges.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label("No launches for this selection.");
        });
        return;
    }

    ui.horizontal(|ui: &mut Ui| {
        let size = ui
            .available_height()
            .min(ui.available_width() * 0.6)
            .max(120.0);
        let (rect, response) = ui.allocate_exact_size(Vec2::splat(size), Sense::hover());
        let painter = ui.painter_at(rect);
        let center = rect.center();
        let radius = size * 0.45;
        let hover_pos = response.hover_pos();

        let mut hovered = None;
        for (slice, wedge) in figure.slices.iter().zip(&wedges) {
            if wedge.sweep <= 0.0 {
                continue;
            }
            paint_wedge(&painter, center, radius, wedge, slice.color);

            if wedge.fraction >= 0.04 {
                painter.text(
                    polar(center, radius * 0.65, wedge.start + wedge.sweep / 2.0),
                    Align2::CENTER_CENTER,
                    format!("{:.1}%", wedge.fraction * 100.0),
                    FontId::proportional(12.0),
                    Color32::WHITE,
                );
            }
            if hover_pos.is_some_and(|p| wedge_contains(center, radius, wedge, p)) {
                hovered = Some(slice);
            }
        }
        if let Some(slice) = hovered {
            response.on_hover_text(format!("{}: {}", slice.label, slice.value));
        }

        // Legend
        ui.vertical(|ui: &mut Ui| {
            for (slice, wedge) in figure.slices.iter().zip(&wedges) {
                ui.horizontal(|ui: &mut Ui| {
                    let (swatch, _) = ui.allocate_exact_size(Vec2::splat(12.0), Sense::hover());
                    ui.painter().rect_filled(swatch, 2.0, slice.color);
                    ui.label(format!(
                        "{}  {} ({:.1}%)",
                        slice.label,
                        slice.value,
                        wedge.fraction * 100.0
                    ));
                });
            }
        });
    });
}

// ---------------------------------------------------------------------------
// Scatter chart (egui_plot)
// ---------------------------------------------------------------------------

/// Render payload vs. outcome, one coloured series per site.
///
/// A new `generation` gives the plot a fresh id, so zoom and pan reset with
/// every recomputation.
pub fn scatter_chart(ui: &mut Ui, figure: Option<&ScatterFigure>, generation: u64) {
    let Some(figure) = figure else {
        return;
    };

    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(figure.title.as_str());
    });

    Plot::new(("payload_scatter", generation))
        .legend(Legend::default())
        .x_axis_label(figure.x_label.as_str())
        .y_axis_label(figure.y_label.as_str())
        .y_axis_formatter(|mark, _range| outcome_tick_label(mark.value))
        .include_x(0.0)
        .include_y(-0.25)
        .include_y(1.25)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for series in &figure.series {
                let points = Points::new(PlotPoints::from(series.points.clone()))
                    .name(&series.name)
                    .color(series.color)
                    .shape(MarkerShape::Circle)
                    .radius(4.0);
                plot_ui.points(points);
            }
        });
}
