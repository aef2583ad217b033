use eframe::egui::{Color32, Ui};
use egui_extras::{Column, TableBuilder};

use experiment_compare::data::align::SeriesColumn;
use experiment_compare::data::stats::SummaryStatistics;

const HEADERS: [&str; 6] = ["Experiment", "Count", "Min", "Max", "Mean", "Std dev"];

/// Fixed-precision display of an optional statistic.
fn format_stat(value: Option<f64>, precision: usize) -> String {
    match value {
        Some(v) => format!("{v:.precision$}"),
        None => "n/a".to_string(),
    }
}

/// Colour of the series a summary belongs to.
fn color_for(summary: &SummaryStatistics, colors: &[(&SeriesColumn, Color32)]) -> Color32 {
    colors
        .iter()
        .find(|(series, _)| series.dataset == summary.dataset)
        .or_else(|| colors.iter().find(|(series, _)| series.label == summary.name))
        .map(|(_, c)| *c)
        .unwrap_or(Color32::GRAY)
}

/// Render one row of summary statistics per compared experiment.
pub fn stats_table(
    ui: &mut Ui,
    summaries: &[SummaryStatistics],
    colors: &[(&SeriesColumn, Color32)],
    precision: usize,
) {
    if summaries.is_empty() {
        ui.label("No compared experiment has this metric.");
        return;
    }

    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().at_least(140.0))
        .columns(Column::auto().at_least(70.0), HEADERS.len() - 1)
        .header(20.0, |mut header| {
            for title in HEADERS {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|mut body| {
            for summary in summaries {
                let stats = summary.stats;
                body.row(18.0, |mut row| {
                    row.col(|ui| {
                        ui.colored_label(color_for(summary, colors), &summary.name);
                    });
                    row.col(|ui| {
                        ui.label(stats.count.to_string());
                    });
                    for value in [stats.min, stats.max, stats.mean, stats.std_dev] {
                        row.col(|ui| {
                            ui.label(format_stat(value, precision));
                        });
                    }
                });
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use experiment_compare::data::model::DatasetId;
    use experiment_compare::data::stats::Stats;

    #[test]
    fn formats_with_configured_precision() {
        assert_eq!(format_stat(Some(0.816496580927726), 3), "0.816");
        assert_eq!(format_stat(Some(2.0), 1), "2.0");
        assert_eq!(format_stat(None, 3), "n/a");
    }

    #[test]
    fn colour_follows_series_dataset() {
        let series = [
            SeriesColumn {
                key: "exp-1".to_string(),
                label: "A".to_string(),
                dataset: DatasetId(1),
            },
            SeriesColumn {
                key: "exp-2".to_string(),
                label: "B".to_string(),
                dataset: DatasetId(2),
            },
        ];
        let colors = vec![(&series[0], Color32::RED), (&series[1], Color32::BLUE)];
        let summary = SummaryStatistics {
            dataset: DatasetId(2),
            name: "B".to_string(),
            metric: "v".to_string(),
            stats: Stats::default(),
        };
        assert_eq!(color_for(&summary, &colors), Color32::BLUE);
    }
}
