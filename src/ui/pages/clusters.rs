use std::collections::BTreeMap;

use eframe::egui::Ui;

use crate::color::SeriesColors;
use crate::data::aggregate::{count_by, value_counts};
use crate::data::model::{Table, Value};
use crate::state::AppState;
use crate::ui::charts;
use crate::ui::pages;

/// Canonical weekday order for the histogram's category axis.
const DAY_ORDER: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Temporal-clusters page.  The clusters themselves are computed by an
/// external notebook; this page only projects the exported labels.
pub fn show(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Temporal Clusters");

    let sessions = state
        .clustered_sessions()
        .filter(|table| table.has_column("cluster"));
    let Some(sessions) = sessions else {
        pages::info_line(
            ui,
            "No clustered sessions exported yet. Run the clustering section in \
             the notebook and re-export.",
        );
        return;
    };

    ui.strong("What are clusters?");
    ui.label(
        "Clusters group similar listening sessions based on when and how long \
         the music played: short evening sessions vs. longer weekend \
         sessions, for example.",
    );
    ui.separator();

    // ---- Cluster distribution ----
    if let Some(mut counts) = value_counts(&sessions, "cluster") {
        counts.sort_by(|a, b| a.0.cmp(&b.0));
        ui.strong("Cluster Distribution");
        let items: Vec<(String, f64)> = counts
            .iter()
            .map(|(value, count)| (value.to_string(), *count as f64))
            .collect();
        charts::category_bars(ui, "clusters_distribution", &items, "sessions");
        ui.separator();
    }

    // ---- Session duration vs hour ----
    if sessions.has_column("avg_hour") && sessions.has_column("session_duration_minutes") {
        ui.strong("Session Duration vs. Hour");
        ui.label(
            "Each point is one listening session: how long it lasted against \
             the average hour of day it happened.",
        );
        duration_scatter(ui, "clusters_scatter", &sessions);
        ui.separator();
    }

    // ---- Day-of-week histogram ----
    if let Some(day_counts) = count_by(&sessions, &["day_of_week", "cluster"]) {
        ui.strong("Days by Cluster");
        ui.label("How sessions spread across the days of the week, per cluster.");
        day_histogram(ui, &day_counts);
    }
}

/// Duration-vs-hour scatter coloured by cluster; shared with the home
/// page's preview.  Draws nothing when the needed columns are missing.
pub(super) fn duration_scatter(ui: &mut Ui, id: &str, sessions: &Table) {
    if !(sessions.has_column("avg_hour")
        && sessions.has_column("session_duration_minutes")
        && sessions.has_column("cluster"))
    {
        return;
    }

    let mut per_cluster: BTreeMap<Value, Vec<[f64; 2]>> = BTreeMap::new();
    for row in &sessions.rows {
        let (Some(x), Some(y)) = (
            row.get("avg_hour").and_then(Value::as_f64),
            row.get("session_duration_minutes").and_then(Value::as_f64),
        ) else {
            continue;
        };
        let cluster = row.get("cluster").cloned().unwrap_or(Value::Null);
        per_cluster.entry(cluster).or_default().push([x, y]);
    }

    let colors = SeriesColors::for_values(per_cluster.keys().cloned());
    let series: Vec<(String, eframe::egui::Color32, Vec<[f64; 2]>)> = per_cluster
        .into_iter()
        .map(|(cluster, points)| {
            (
                format!("cluster {cluster}"),
                colors.get(&cluster),
                points,
            )
        })
        .collect();

    charts::scatter(ui, id, &series, "avg_hour", "session_duration_minutes");
}

/// Grouped per-cluster bars over the canonical weekday axis.
fn day_histogram(ui: &mut Ui, day_counts: &[(Vec<Value>, usize)]) {
    let clusters: Vec<Value> = {
        let set: std::collections::BTreeSet<Value> =
            day_counts.iter().map(|(keys, _)| keys[1].clone()).collect();
        set.into_iter().collect()
    };

    let day_index = |value: &Value| -> Option<usize> {
        let name = value.to_string();
        DAY_ORDER.iter().position(|day| *day == name)
    };

    let colors = SeriesColors::for_values(clusters.iter().cloned());
    let mut series: Vec<(String, eframe::egui::Color32, Vec<f64>)> = clusters
        .iter()
        .map(|cluster| {
            (
                format!("cluster {cluster}"),
                colors.get(cluster),
                vec![0.0; DAY_ORDER.len()],
            )
        })
        .collect();

    for (keys, count) in day_counts {
        let Some(day_idx) = day_index(&keys[0]) else {
            continue; // not a canonical day name
        };
        let Some(cluster_idx) = clusters.iter().position(|c| c == &keys[1]) else {
            continue;
        };
        series[cluster_idx].2[day_idx] = *count as f64;
    }

    let categories: Vec<String> = DAY_ORDER.iter().map(|day| day.to_string()).collect();
    charts::grouped_bars(ui, "clusters_days", &categories, &series, "sessions");
}
