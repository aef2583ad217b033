use eframe::egui::{self, Ui};
use egui_plot::{Legend, Line, Plot, PlotPoints, Points};

use experiment_compare::data::projection::PlotPoint;
use experiment_compare::data::schema::{numeric_columns, shared_numeric_columns};

use super::{stats_table, to_color32};
use crate::state::AppState;

/// Height reserved under the single plot for the hovered row.
const DETAIL_HEIGHT: f32 = 60.0;

fn column_combo(ui: &mut Ui, id: &str, label: &str, current: &mut String, columns: &[String]) {
    ui.label(label);
    egui::ComboBox::from_id_salt(id)
        .selected_text(current.as_str())
        .show_ui(ui, |ui: &mut Ui| {
            for col in columns {
                ui.selectable_value(current, col.clone(), col);
            }
        });
}

fn placeholder(ui: &mut Ui, text: &str) {
    ui.centered_and_justified(|ui: &mut Ui| {
        ui.heading(text);
    });
}

// ---------------------------------------------------------------------------
// Single experiment: x against y
// ---------------------------------------------------------------------------

/// Row whose x value is closest to `x`.
fn nearest_by_x(points: &[PlotPoint], x: f64) -> Option<&PlotPoint> {
    points
        .iter()
        .filter_map(|p| Some((p, (p.coordinates()?[0] - x).abs())))
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(p, _)| p)
}

fn describe_point(point: &PlotPoint, x: &str, y: &str) -> String {
    let mut text = format!("row {}:  {x} = {},  {y} = {}", point.index, point.x, point.y);
    for (name, value) in &point.fields {
        text.push_str(&format!(",  {name} = {value}"));
    }
    text
}

/// Render the selected experiment as an x/y plot.
pub fn single_plot(ui: &mut Ui, state: &mut AppState) {
    let Some(ds) = state.selected.and_then(|id| state.store.get(id)) else {
        placeholder(ui, "Select an experiment to plot it  (File → Add sample experiment)");
        return;
    };

    let columns = numeric_columns(ds);
    if columns.is_empty() {
        placeholder(ui, "This experiment has no numeric columns.");
        return;
    }

    ui.horizontal(|ui: &mut Ui| {
        ui.strong(&ds.name);
        ui.separator();
        column_combo(ui, "x_axis", "X", &mut state.x_column, &columns);
        column_combo(ui, "y_axis", "Y", &mut state.y_column, &columns);
    });

    let points = state.cache.projection(ds, &state.x_column, &state.y_column);
    let coords: Vec<[f64; 2]> = points.iter().filter_map(PlotPoint::coordinates).collect();
    let color = to_color32(state.palette.color_for(0));

    let response = Plot::new("single_plot")
        .legend(Legend::default())
        .x_axis_label(state.x_column.as_str())
        .y_axis_label(state.y_column.as_str())
        .height((ui.available_height() - DETAIL_HEIGHT).max(100.0))
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(PlotPoints::from(coords.clone()))
                    .name(&ds.name)
                    .color(color)
                    .width(1.5),
            );
            plot_ui.points(Points::new(PlotPoints::from(coords)).radius(2.5).color(color));
            plot_ui.pointer_coordinate()
        });

    let detail = response
        .inner
        .and_then(|p| nearest_by_x(points, p.x))
        .map(|p| describe_point(p, &state.x_column, &state.y_column))
        .unwrap_or_else(|| format!("{} rows, hover the plot for details", points.len()));
    ui.label(detail);
}

// ---------------------------------------------------------------------------
// Comparison: one metric across experiments
// ---------------------------------------------------------------------------

/// Render the overlay plot and statistics table for the ticked experiments.
pub fn compare_view(ui: &mut Ui, state: &mut AppState) {
    let datasets = state.store.resolve(&state.compare_ids);
    if datasets.is_empty() {
        placeholder(ui, "Tick experiments in the side panel to compare them");
        return;
    }

    let metrics = shared_numeric_columns(&datasets);
    if metrics.is_empty() {
        placeholder(ui, "The compared experiments have no numeric columns.");
        return;
    }

    ui.horizontal(|ui: &mut Ui| {
        column_combo(ui, "metric", "Metric", &mut state.metric, &metrics);
    });

    let comparison = state.cache.comparison(&datasets, &state.metric);
    let colors: Vec<_> = state
        .palette
        .assign(&comparison.aligned.series)
        .into_iter()
        .map(|(series, c)| (series, to_color32(c)))
        .collect();

    egui::TopBottomPanel::bottom("stats_panel")
        .resizable(true)
        .default_height(140.0)
        .show_inside(ui, |ui: &mut Ui| {
            stats_table::stats_table(
                ui,
                &comparison.summaries,
                &colors,
                state.config.precision,
            );
        });

    Plot::new("compare_plot")
        .legend(Legend::default())
        .x_axis_label("Row index")
        .y_axis_label(comparison.aligned.metric.as_str())
        .show(ui, |plot_ui| {
            for (series, color) in &colors {
                let points = comparison.aligned.points_for(&series.key);
                plot_ui.line(
                    Line::new(PlotPoints::from(points))
                        .name(&series.label)
                        .color(*color)
                        .width(1.5),
                );
            }
        });
}
