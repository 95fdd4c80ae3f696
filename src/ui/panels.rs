use eframe::egui::{self, Color32, DragValue, RichText, ScrollArea, Ui};

use crate::data::aggregate;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel: player multiselect + year range.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let dataset = match &state.dataset {
        Some(ds) => ds.clone(),
        None => {
            ui.label("No dataset loaded.");
            return;
        }
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Year range ----
            if let Some((lo, hi)) = dataset.year_bounds {
                ui.strong("Year range");
                let (mut min, mut max) = state.selection.year_range;
                let mut changed = false;

                ui.horizontal(|ui: &mut Ui| {
                    ui.label("From");
                    changed |= ui
                        .add(DragValue::new(&mut min).range(lo..=hi).speed(0.1))
                        .changed();
                    ui.label("to");
                    changed |= ui
                        .add(DragValue::new(&mut max).range(lo..=hi).speed(0.1))
                        .changed();
                });

                if changed {
                    state.set_year_range(min, max);
                }
                ui.separator();
            }

            // ---- Player multiselect ----
            let n_selected = state.selection.players.len();
            let n_total = dataset.players.len();
            let header_text = format!("Players  ({n_selected}/{n_total})");

            egui::CollapsingHeader::new(RichText::new(header_text).strong())
                .id_salt("players")
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    ui.horizontal(|ui: &mut Ui| {
                        if ui.small_button("All").clicked() {
                            state.select_all_players();
                        }
                        if ui.small_button("None").clicked() {
                            state.select_no_players();
                        }
                    });

                    for player in &dataset.players {
                        let is_selected = state.selection.players.contains(player);

                        let mut text = RichText::new(player);
                        if let Some(cm) = &state.color_map {
                            text = text.color(cm.color_for(player));
                        }

                        let mut checked = is_selected;
                        if ui.checkbox(&mut checked, text).changed() {
                            state.toggle_player(player);
                        }
                    }
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
            if ui
                .add_enabled(state.source_path.is_some(), egui::Button::new("Reload"))
                .clicked()
            {
                state.reload();
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} records, {} players, {} in view",
                ds.len(),
                ds.players.len(),
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
// Metric cards
// ---------------------------------------------------------------------------

/// The three headline metrics above the tabs: total runs, total wickets,
/// average strike rate (2 decimals, or a dash when absent).
pub fn metric_cards(ui: &mut Ui, state: &AppState) {
    let Some(ds) = &state.dataset else {
        return;
    };
    let metrics = aggregate::summarize(ds, &state.visible_indices);

    let strike_rate = metrics
        .avg_strike_rate_display()
        .map(|v| format!("{v:.2}"))
        .unwrap_or_else(|| "–".to_string());

    ui.columns(3, |cols: &mut [Ui]| {
        metric_card(&mut cols[0], "Total Runs", &format!("{:.0}", metrics.total_runs));
        metric_card(
            &mut cols[1],
            "Total Wickets",
            &format!("{:.0}", metrics.total_wickets),
        );
        metric_card(&mut cols[2], "Average Strike Rate", &strike_rate);
    });
}

fn metric_card(ui: &mut Ui, label: &str, value: &str) {
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.vertical_centered(|ui: &mut Ui| {
            ui.label(label);
            ui.heading(RichText::new(value).strong());
        });
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open player statistics")
        .add_filter("Supported files", &["csv", "json"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path);
    }
}
