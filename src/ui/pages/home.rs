use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::data::aggregate::{
    most_frequent, sum_hours_by_year, top_categorical, total_days, total_hours, value_counts,
};
use crate::data::filter::filter_by_year;
use crate::data::model::Value;
use crate::state::AppState;
use crate::ui::charts;
use crate::ui::pages::{self, clusters};

/// Introduction page: welcome copy, headline KPIs, the yearly trend, the
/// big rankings, and a preview of the session clusters.
pub fn show(ui: &mut Ui, state: &mut AppState) {
    ui.heading("My Spotify Wrapped");
    ui.label(
        "Explore a personal Spotify listening story: highlights, deep dives, \
         and temporal patterns. Use the sidebar to switch pages and filter by \
         year; all charts update with the selection.",
    );
    ui.add_space(4.0);
    ui.label("• Overview: total listening time, top artists and songs, trends by year.");
    ui.label("• Artist Deep Dive: a focused look at one artist's most-played tracks and albums.");
    ui.label("• Extended History: long-term trends and listening while traveling.");
    ui.label("• Temporal Clusters: groups of similar listening sessions by time of day and duration.");
    ui.separator();

    let Some(all_music) = state.all_music() else {
        pages::warn_missing(ui, pages::MISSING_MUSIC);
        return;
    };
    let df = filter_by_year(&all_music, &state.year_filter);

    // ---- KPI row ----
    pages::kpi_row(
        ui,
        &[
            ("Total Hours", pages::fmt_kpi(total_hours(&df))),
            ("Total Days", pages::fmt_kpi(total_days(&df))),
            ("Top Artist", pages::fmt_kpi_value(most_frequent(&df, "artist"))),
            ("Top Song", pages::fmt_kpi_value(most_frequent(&df, "track"))),
        ],
    );
    ui.separator();

    // ---- Listening over time ----
    if let Some(yearly) = sum_hours_by_year(&df) {
        ui.strong("Total Hours per Year");
        let points: Vec<(i64, f64)> = yearly.iter().map(|g| (g.year, g.hours)).collect();
        charts::year_line(ui, "home_yearly", &points, "hours");
    }

    // ---- Top artists ----
    if let Some(top_artists) = top_categorical(&df, "artist", 15) {
        ui.strong("Top Artists");
        let items: Vec<(String, f64)> = top_artists
            .iter()
            .map(|(value, count)| (value.to_string(), *count as f64))
            .collect();
        charts::ranked_bars(ui, "home_top_artists", &items, "plays");
    }

    // ---- Top songs ----
    if let Some(top_songs) = top_categorical(&df, "track", 20) {
        ui.strong("Top Songs");
        let items: Vec<(String, f64)> = top_songs
            .iter()
            .map(|(value, count)| (value.to_string(), *count as f64))
            .collect();
        charts::ranked_bars(ui, "home_top_songs", &items, "plays");
    }

    ui.separator();

    // ---- Clusters preview ----
    let sessions = state.clustered_sessions();
    match sessions {
        Some(sessions) if sessions.has_column("cluster") => {
            ui.strong("Listening Mode Clusters (Preview)");
            if let Some(mut counts) = value_counts(&sessions, "cluster") {
                counts.sort_by(|a, b| a.0.cmp(&b.0));
                cluster_counts_table(ui, &counts);
            }
            clusters::duration_scatter(ui, "home_cluster_scatter", &sessions);
        }
        _ => {
            pages::info_line(
                ui,
                "Run the clustering section in the notebook and re-export to enable \
                 the clusters preview.",
            );
        }
    }
}

/// Small cluster → session-count table (the preview's dataframe).
fn cluster_counts_table(ui: &mut Ui, counts: &[(Value, usize)]) {
    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().at_least(100.0))
        .column(Column::auto().at_least(100.0))
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("cluster");
            });
            header.col(|ui| {
                ui.strong("sessions");
            });
        })
        .body(|mut body| {
            for (value, count) in counts {
                body.row(18.0, |mut row| {
                    row.col(|ui| {
                        ui.label(value.to_string());
                    });
                    row.col(|ui| {
                        ui.label(count.to_string());
                    });
                });
            }
        });
}
