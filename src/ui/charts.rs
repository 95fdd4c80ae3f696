use std::collections::BTreeMap;

use eframe::egui::{Align2, FontId, Rect, Sense, Ui, vec2};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints, Points};

use crate::color::{ColorMap, heat_color};
use crate::data::aggregate::{group_sum, pivot_sum};
use crate::data::model::Dataset;

// ---------------------------------------------------------------------------
// Batting tab
// ---------------------------------------------------------------------------

/// Line chart: runs scored per year, one line per selected player.
pub fn runs_over_years(ui: &mut Ui, dataset: &Dataset, indices: &[usize], colors: &ColorMap) {
    let mut by_player: BTreeMap<&str, Vec<[f64; 2]>> = BTreeMap::new();
    for &i in indices {
        let rec = &dataset.records[i];
        // Absent runs leave a gap instead of plotting a fake zero.
        if let Some(runs) = rec.runs_scored {
            by_player
                .entry(rec.player_name.as_str())
                .or_default()
                .push([rec.year as f64, runs]);
        }
    }

    Plot::new("runs_over_years")
        .legend(Legend::default())
        .x_axis_label("Year")
        .y_axis_label("Runs Scored")
        .height(280.0)
        .show(ui, |plot_ui| {
            for (player, mut points) in by_player {
                points.sort_by(|a, b| a[0].total_cmp(&b[0]));
                let line = Line::new(PlotPoints::from(points))
                    .name(player)
                    .color(colors.color_for(player))
                    .width(1.5);
                plot_ui.line(line);
            }
        });
}

/// Bar chart: total runs per player over the current view.
pub fn runs_by_player(ui: &mut Ui, dataset: &Dataset, indices: &[usize], colors: &ColorMap) {
    let totals = group_sum(dataset, indices, |r| r.player_name.clone(), |r| r.runs_scored);
    player_totals_bar_chart(ui, "runs_by_player", "Total Runs", &totals, colors);
}

/// Scatter: batting average vs strike rate, point size scaled by runs.
pub fn average_vs_strike_rate(
    ui: &mut Ui,
    dataset: &Dataset,
    indices: &[usize],
    colors: &ColorMap,
) {
    let max_runs = indices
        .iter()
        .filter_map(|&i| dataset.records[i].runs_scored)
        .fold(0.0, f64::max);

    Plot::new("average_vs_strike_rate")
        .legend(Legend::default())
        .x_axis_label("Batting Average")
        .y_axis_label("Batting Strike Rate")
        .height(280.0)
        .show(ui, |plot_ui| {
            for &i in indices {
                let rec = &dataset.records[i];
                let (Some(avg), Some(sr)) = (rec.batting_average, rec.batting_strike_rate)
                else {
                    continue;
                };

                let radius = match rec.runs_scored {
                    Some(runs) if max_runs > 0.0 => 2.0 + 8.0 * (runs / max_runs).sqrt(),
                    _ => 2.0,
                };

                let points = Points::new(PlotPoints::from(vec![[avg, sr]]))
                    .radius(radius as f32)
                    .color(colors.color_for(&rec.player_name))
                    .name(&rec.player_name);
                plot_ui.points(points);
            }
        });
}

// ---------------------------------------------------------------------------
// Bowling tab
// ---------------------------------------------------------------------------

/// Bar chart: total wickets per player over the current view.
pub fn wickets_by_player(ui: &mut Ui, dataset: &Dataset, indices: &[usize], colors: &ColorMap) {
    let totals = group_sum(dataset, indices, |r| r.player_name.clone(), |r| r.wickets_taken);
    player_totals_bar_chart(ui, "wickets_by_player", "Total Wickets", &totals, colors);
}

/// Player × year wicket heatmap. Cells without records render as zero, so
/// the grid is always dense.
pub fn wickets_heatmap(ui: &mut Ui, dataset: &Dataset, indices: &[usize]) {
    let pivot = pivot_sum(
        dataset,
        indices,
        |r| r.player_name.clone(),
        |r| r.year,
        |r| r.wickets_taken,
    );

    if pivot.is_empty() {
        ui.label("No records in the current selection.");
        return;
    }

    let n_rows = pivot.row_keys.len();
    let n_cols = pivot.col_keys.len();
    let cell_w = 42.0_f32;
    let cell_h = 24.0_f32;
    let label_w = 140.0_f32;
    let header_h = 20.0_f32;

    let size = vec2(
        label_w + cell_w * n_cols as f32,
        header_h + cell_h * n_rows as f32,
    );
    let (response, painter) = ui.allocate_painter(size, Sense::hover());
    let origin = response.rect.min;

    let max = pivot.max_value();
    let denom = if max > 0.0 { max } else { 1.0 };
    let text_color = ui.visuals().strong_text_color();

    for (ci, year) in pivot.col_keys.iter().enumerate() {
        painter.text(
            origin + vec2(label_w + (ci as f32 + 0.5) * cell_w, header_h * 0.5),
            Align2::CENTER_CENTER,
            year.to_string(),
            FontId::proportional(11.0),
            text_color,
        );
    }

    for (ri, player) in pivot.row_keys.iter().enumerate() {
        painter.text(
            origin + vec2(label_w - 6.0, header_h + (ri as f32 + 0.5) * cell_h),
            Align2::RIGHT_CENTER,
            player,
            FontId::proportional(11.0),
            text_color,
        );
        for ci in 0..n_cols {
            let value = pivot.value_at(ri, ci);
            let rect = Rect::from_min_size(
                origin + vec2(label_w + ci as f32 * cell_w, header_h + ri as f32 * cell_h),
                vec2(cell_w - 1.0, cell_h - 1.0),
            );
            painter.rect_filled(rect, 2.0, heat_color(value / denom));
        }
    }

    if let Some(pos) = response.hover_pos() {
        let rel = pos - origin;
        let ci = ((rel.x - label_w) / cell_w).floor() as isize;
        let ri = ((rel.y - header_h) / cell_h).floor() as isize;
        if ci >= 0 && ri >= 0 && (ci as usize) < n_cols && (ri as usize) < n_rows {
            let (ri, ci) = (ri as usize, ci as usize);
            let _ = response.on_hover_text(format!(
                "{} · {}: {:.0} wickets",
                pivot.row_keys[ri],
                pivot.col_keys[ci],
                pivot.value_at(ri, ci)
            ));
        }
    }
}

// ---------------------------------------------------------------------------
// Records tab
// ---------------------------------------------------------------------------

/// The filtered records as a plain table.
pub fn records_table(ui: &mut Ui, dataset: &Dataset, indices: &[usize]) {
    use egui_extras::{Column, TableBuilder};

    const HEADERS: [&str; 12] = [
        "Player",
        "Year",
        "Runs",
        "Bat Avg",
        "Strike Rate",
        "100s",
        "50s",
        "4s",
        "6s",
        "Wickets",
        "Economy",
        "Bowl Avg",
    ];

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .column(Column::auto().at_least(140.0))
        .columns(Column::auto().at_least(60.0), HEADERS.len() - 1)
        .header(20.0, |mut header| {
            for title in HEADERS {
                header.col(|ui: &mut Ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, indices.len(), |mut row| {
                let rec = &dataset.records[indices[row.index()]];
                let cells = [
                    rec.player_name.clone(),
                    rec.year.to_string(),
                    fmt_count(rec.runs_scored),
                    fmt_rate(rec.batting_average),
                    fmt_rate(rec.batting_strike_rate),
                    fmt_count(rec.centuries),
                    fmt_count(rec.half_centuries),
                    fmt_count(rec.fours),
                    fmt_count(rec.sixes),
                    fmt_count(rec.wickets_taken),
                    fmt_rate(rec.economy_rate),
                    fmt_rate(rec.bowling_average),
                ];
                for cell in cells {
                    row.col(|ui: &mut Ui| {
                        ui.label(cell);
                    });
                }
            });
        });
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// One bar per player at an index position; the legend carries the names.
fn player_totals_bar_chart(
    ui: &mut Ui,
    id: &str,
    y_label: &str,
    totals: &BTreeMap<String, f64>,
    colors: &ColorMap,
) {
    Plot::new(id.to_string())
        .legend(Legend::default())
        .x_axis_label("Player")
        .y_axis_label(y_label)
        .height(280.0)
        .show(ui, |plot_ui| {
            for (i, (player, total)) in totals.iter().enumerate() {
                let chart = BarChart::new(vec![Bar::new(i as f64, *total).width(0.6)])
                    .name(player)
                    .color(colors.color_for(player));
                plot_ui.bar_chart(chart);
            }
        });
}

fn fmt_count(value: Option<f64>) -> String {
    value
        .map(|v| format!("{v:.0}"))
        .unwrap_or_else(|| "–".to_string())
}

fn fmt_rate(value: Option<f64>) -> String {
    value
        .map(|v| format!("{v:.2}"))
        .unwrap_or_else(|| "–".to_string())
}
