use std::collections::BTreeMap;

use eframe::egui::Ui;

use crate::color::SeriesColors;
use crate::data::aggregate::{sum_hours_by, sum_hours_by_year};
use crate::data::filter::filter_ne;
use crate::data::model::{Table, Value};
use crate::state::AppState;
use crate::ui::charts;
use crate::ui::pages;

/// Home country: listening anywhere else counts as traveling.
const HOME_COUNTRY: &str = "US";

/// Extended-history page: long-term yearly totals and the traveling
/// breakdown.  Deliberately unfiltered: the whole history is the point.
pub fn show(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Extended History");

    let Some(all_music) = state.all_music() else {
        pages::warn_missing(ui, pages::MISSING_MUSIC);
        return;
    };

    if let Some(yearly) = sum_hours_by_year(&all_music) {
        ui.strong("Listening Hours by Year");
        ui.label(
            "Total listening time each year, for spotting peak years and \
             slowdowns.",
        );
        let points: Vec<(i64, f64)> = yearly.iter().map(|g| (g.year, g.hours)).collect();
        charts::year_bars(ui, "history_yearly", &points, "hours");
        ui.separator();
    }

    travel_section(ui, &all_music);
}

/// Hours by country and year, outside the home country, as a grouped bar
/// coloured by year.  Skipped wholesale when `country`, `year` or
/// `ms_played` is missing.
fn travel_section(ui: &mut Ui, all_music: &Table) {
    if !all_music.has_column("country") {
        return;
    }
    let abroad = filter_ne(all_music, "country", &Value::String(HOME_COUNTRY.into()));
    let Some(groups) = sum_hours_by(&abroad, &["year", "country"]) else {
        return;
    };

    ui.strong("Listening While Traveling");
    ui.label(
        "Where music was playing outside the U.S., by country and year. \
         Taller bars mean more listening time on that trip.",
    );

    if groups.is_empty() {
        pages::info_line(ui, "No listening outside the home country.");
        return;
    }

    // Pivot (year, country) → country-indexed series per year.
    let countries: Vec<String> = {
        let set: std::collections::BTreeSet<String> = groups
            .iter()
            .map(|g| g.keys[1].to_string())
            .collect();
        set.into_iter().collect()
    };
    let mut per_year: BTreeMap<i64, Vec<f64>> = BTreeMap::new();
    for group in &groups {
        let Some(year) = group.keys[0].as_i64() else {
            continue;
        };
        let Some(country_idx) = countries.iter().position(|c| *c == group.keys[1].to_string())
        else {
            continue;
        };
        per_year.entry(year).or_insert_with(|| vec![0.0; countries.len()])[country_idx] +=
            group.hours;
    }

    let colors = SeriesColors::for_values(per_year.keys().map(|year| Value::Integer(*year)));
    let series: Vec<(String, eframe::egui::Color32, Vec<f64>)> = per_year
        .into_iter()
        .map(|(year, values)| {
            (
                year.to_string(),
                colors.get(&Value::Integer(year)),
                values,
            )
        })
        .collect();

    charts::grouped_bars(ui, "history_travel", &countries, &series, "hours");
}
