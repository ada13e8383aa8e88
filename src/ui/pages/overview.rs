use eframe::egui::Ui;

use crate::data::aggregate::{sum_hours_by_year, top_categorical};
use crate::state::AppState;
use crate::ui::charts;
use crate::ui::pages;

/// Overview page: listening time by year and the artist ranking, both
/// narrowed to the sidebar's year selection.
pub fn show(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Overview");

    let Some(df) = state.filtered_music() else {
        pages::warn_missing(ui, pages::MISSING_MUSIC);
        return;
    };

    if let Some(yearly) = sum_hours_by_year(&df) {
        ui.strong("Total Hours per Year");
        ui.label(
            "How many hours of music were played each year. Higher points mean \
             more listening; use the year filter to focus on specific years.",
        );
        let points: Vec<(i64, f64)> = yearly.iter().map(|g| (g.year, g.hours)).collect();
        charts::year_line(ui, "overview_yearly", &points, "hours");
        ui.separator();
    }

    if let Some(top_artists) = top_categorical(&df, "artist", 15) {
        ui.strong("Top Artists");
        ui.label("The most frequently played artists. Longer bars mean more plays.");
        let items: Vec<(String, f64)> = top_artists
            .iter()
            .map(|(value, count)| (value.to_string(), *count as f64))
            .collect();
        charts::ranked_bars(ui, "overview_top_artists", &items, "plays");
    }
}
