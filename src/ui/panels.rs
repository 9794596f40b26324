use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use launch_dash::data::filter::{PayloadRange, SiteFilter};
use launch_dash::data::loader;
use launch_dash::data::query::ZeroGroups;
use launch_dash::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the site selector and payload sliders.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let Some(dataset) = state.dataset() else {
        ui.label("No dataset loaded.");
        return;
    };

    // Clone what we need so we can mutate state afterwards.
    let options = dataset.site_options();
    let (min_payload, max_payload) = (dataset.min_payload(), dataset.max_payload());

    // ---- Site selector ----
    ui.strong("Launch site");
    let current = state.params.site.clone();
    let current_label = options
        .iter()
        .find(|o| o.value == current)
        .map(|o| o.label.clone())
        .unwrap_or_else(|| current.to_string());
    let mut picked: Option<SiteFilter> = None;
    egui::ComboBox::from_id_salt("site_selector")
        .selected_text(current_label)
        .show_ui(ui, |ui: &mut Ui| {
            for opt in &options {
                if ui.selectable_label(opt.value == current, &opt.label).clicked() {
                    picked = Some(opt.value.clone());
                }
            }
        });
    if let Some(site) = picked {
        state.set_site(site);
    }
    ui.separator();

    // ---- Payload range ----
    ui.strong("Payload range (kg)");
    let upper = state.slider_upper();
    let step = state.slider_step();
    let PayloadRange { mut low, mut high } = state.params.payload_range;
    let low_changed = ui
        .add(egui::Slider::new(&mut low, 0.0..=upper).step_by(step).text("min"))
        .changed();
    let high_changed = ui
        .add(egui::Slider::new(&mut high, 0.0..=upper).step_by(step).text("max"))
        .changed();
    if low_changed || high_changed {
        state.set_payload_range(PayloadRange::new(low, high));
    }
    ui.horizontal(|ui: &mut Ui| {
        if ui.small_button("Reset").clicked() {
            state.set_payload_range(PayloadRange::new(min_payload, max_payload));
        }
        ui.label(format!("observed {min_payload:.0} – {max_payload:.0}"));
    });
    if low > high {
        ui.label(RichText::new("min is above max: nothing matches").color(Color32::YELLOW));
    }
    ui.separator();

    let mut include = state.zero_groups == ZeroGroups::Include;
    if ui.checkbox(&mut include, "Show empty pie groups").changed() {
        state.set_zero_groups(if include {
            ZeroGroups::Include
        } else {
            ZeroGroups::Omit
        });
    }
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

        if let Some(ds) = state.dataset() {
            ui.label(format!(
                "{} launches loaded, {} in range",
                ds.len(),
                state.visible_indices.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Records table (bottom panel)
// ---------------------------------------------------------------------------

/// Tabular view of the records currently shown in the scatter plot.
pub fn records_table(ui: &mut Ui, state: &AppState) {
    let Some(scatter) = state.scatter() else {
        return;
    };
    let records = scatter.records();

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .column(Column::auto().at_least(140.0))
        .column(Column::auto().at_least(120.0))
        .column(Column::auto().at_least(80.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            for title in ["Launch Site", "Payload Mass (kg)", "Outcome", "Booster"] {
                header.col(|ui: &mut Ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, records.len(), |mut row| {
                let rec = records[row.index()];
                row.col(|ui: &mut Ui| {
                    ui.label(&rec.site);
                });
                row.col(|ui: &mut Ui| {
                    ui.label(format!("{:.0}", rec.payload_mass_kg));
                });
                row.col(|ui: &mut Ui| {
                    ui.label(rec.outcome.to_string());
                });
                row.col(|ui: &mut Ui| {
                    ui.label(&rec.booster_category);
                });
            });
        });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

/// Pick a file and load it. Unlike startup, a failed load keeps the current
/// data and reports the error.
pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open launch records")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match loader::try_load(&path) {
            Ok(loaded) => state.set_loaded(loaded),
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                state.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}
