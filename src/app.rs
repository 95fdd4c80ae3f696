use std::path::PathBuf;

use eframe::egui::{self, ScrollArea, Ui};

use crate::state::{AppState, Tab};
use crate::ui::{charts, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct CricketDashApp {
    pub state: AppState,
}

impl CricketDashApp {
    /// Create the app, loading `source` up front when given (the original
    /// dashboard always starts from a fixed CSV next to the binary).
    pub fn new(source: Option<PathBuf>) -> Self {
        let mut state = AppState::default();
        if let Some(path) = source {
            state.load_path(&path);
        }
        Self { state }
    }
}

impl eframe::App for CricketDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: metrics + analysis tabs ----
        egui::CentralPanel::default().show(ctx, |ui| {
            central_panel(ui, &mut self.state);
        });
    }
}

// ---------------------------------------------------------------------------
// Central panel
// ---------------------------------------------------------------------------

fn central_panel(ui: &mut Ui, state: &mut AppState) {
    if state.dataset.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a statistics file to begin  (File → Open…)");
        });
        return;
    }

    ui.heading("Cricket Player Performance Dashboard");
    ui.add_space(4.0);

    panels::metric_cards(ui, state);
    ui.add_space(8.0);

    // ---- Tab selector ----
    ui.horizontal(|ui: &mut Ui| {
        for (tab, label) in [
            (Tab::Batting, "Batting Analysis"),
            (Tab::Bowling, "Bowling Analysis"),
            (Tab::Records, "Records"),
        ] {
            if ui
                .selectable_label(state.active_tab == tab, label)
                .clicked()
            {
                state.active_tab = tab;
            }
        }
    });
    ui.separator();

    let Some(dataset) = state.dataset.clone() else {
        return;
    };
    let Some(colors) = state.color_map.clone() else {
        return;
    };
    let indices = &state.visible_indices;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| match state.active_tab {
            Tab::Batting => {
                ui.strong("Runs Scored Over Years");
                charts::runs_over_years(ui, &dataset, indices, &colors);
                ui.add_space(8.0);

                ui.strong("Total Runs by Player");
                charts::runs_by_player(ui, &dataset, indices, &colors);
                ui.add_space(8.0);

                ui.strong("Batting Average vs Strike Rate");
                charts::average_vs_strike_rate(ui, &dataset, indices, &colors);
            }
            Tab::Bowling => {
                ui.strong("Total Wickets by Player");
                charts::wickets_by_player(ui, &dataset, indices, &colors);
                ui.add_space(8.0);

                ui.strong("Wickets Heatmap (Player vs Year)");
                charts::wickets_heatmap(ui, &dataset, indices);
            }
            Tab::Records => {
                charts::records_table(ui, &dataset, indices);
            }
        });
}
