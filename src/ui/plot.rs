use std::f32::consts::{FRAC_PI_2, TAU};

use eframe::egui::{self, Color32, Shape, Stroke, Ui};
use egui_plot::{Legend, Plot, PlotPoints, Points};

use launch_dash::color::{generate_palette, outcome_color};
use launch_dash::data::model::Outcome;
use launch_dash::data::query::PieResult;
use launch_dash::state::AppState;

/// Triangles used for a full circle.
const PIE_SEGMENTS: f32 = 96.0;

// ---------------------------------------------------------------------------
// Success pie (left column)
// ---------------------------------------------------------------------------

/// Render the success distribution as a pie with a legend.
pub fn success_pie(ui: &mut Ui, state: &AppState) {
    let Some(pie) = &state.pie else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("No launch data");
        });
        return;
    };

    ui.heading(pie.title());
    let total = pie.total();
    if total == 0 {
        ui.label("No launches for the selected site.");
        return;
    }

    let slices: Vec<(String, usize, Color32)> = slice_colors(pie);

    let size = ui.available_width().min(320.0).max(120.0);
    let (response, painter) = ui.allocate_painter(egui::vec2(size, size), egui::Sense::hover());
    let center = response.rect.center();
    let radius = size * 0.45;

    let mut start = -FRAC_PI_2;
    for (_, count, color) in &slices {
        if *count == 0 {
            continue;
        }
        let sweep = *count as f32 / total as f32 * TAU;
        let steps = ((sweep / TAU) * PIE_SEGMENTS).ceil().max(1.0) as usize;
        for i in 0..steps {
            let a0 = start + sweep * i as f32 / steps as f32;
            let a1 = start + sweep * (i + 1) as f32 / steps as f32;
            painter.add(Shape::convex_polygon(
                vec![
                    center,
                    center + radius * egui::vec2(a0.cos(), a0.sin()),
                    center + radius * egui::vec2(a1.cos(), a1.sin()),
                ],
                *color,
                Stroke::NONE,
            ));
        }
        start += sweep;
    }

    for (label, count, color) in &slices {
        let share = *count as f64 / total as f64 * 100.0;
        ui.horizontal(|ui: &mut Ui| {
            ui.colored_label(*color, "■");
            ui.label(format!("{label}: {count} ({share:.1}%)"));
        });
    }
}

fn slice_colors(pie: &PieResult) -> Vec<(String, usize, Color32)> {
    match pie {
        PieResult::SuccessesBySite(by_site) => {
            let palette = generate_palette(by_site.len());
            by_site
                .iter()
                .zip(palette)
                .map(|((site, count), color)| (site.clone(), *count, color))
                .collect()
        }
        PieResult::OutcomesAtSite { counts, .. } => counts
            .iter()
            .map(|(outcome, count)| (outcome.to_string(), *count, outcome_color(*outcome)))
            .collect(),
    }
}

// ---------------------------------------------------------------------------
// Payload scatter (right column)
// ---------------------------------------------------------------------------

/// Payload mass against outcome, one series per booster category.
pub fn payload_scatter(ui: &mut Ui, state: &AppState) {
    let Some(scatter) = state.scatter() else {
        return;
    };

    ui.heading(scatter.title());
    if scatter.is_empty() {
        ui.label("No launches in the selected payload range.");
    }

    let colors = state.booster_colors.as_ref();
    Plot::new("payload_scatter")
        .legend(Legend::default())
        .x_axis_label("Payload Mass (kg)")
        .y_axis_label(format!(
            "Launch Outcome (1={}, 0={})",
            Outcome::Success,
            Outcome::Failure
        ))
        .include_y(-0.25)
        .include_y(1.25)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (category, points) in scatter.by_booster() {
                let color = colors
                    .map(|cm| cm.color_for(category))
                    .unwrap_or(Color32::LIGHT_BLUE);
                let series: PlotPoints = points.into_iter().collect();
                plot_ui.points(
                    Points::new(series)
                        .name(category)
                        .color(color)
                        .radius(4.0),
                );
            }
        });
}
