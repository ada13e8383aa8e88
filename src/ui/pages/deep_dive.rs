use eframe::egui::{self, Ui};

use crate::data::aggregate::{most_frequent, top_categorical, value_counts};
use crate::data::filter::filter_eq;
use crate::data::model::{Table, Value};
use crate::state::AppState;
use crate::ui::charts;
use crate::ui::pages;

/// Artist deep-dive page.  The focus artist is selectable (persisted in
/// the settings file) and defaults to the most frequent artist in the
/// dataset.
pub fn show(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Artist Deep Dive");

    let Some(all_music) = state.all_music() else {
        pages::warn_missing(ui, pages::MISSING_MUSIC);
        return;
    };

    let Some(options) = top_categorical(&all_music, "artist", 50) else {
        pages::info_line(ui, "The dataset has no artist column.");
        return;
    };

    let focus = match current_focus(state, &all_music) {
        Some(artist) => artist,
        None => {
            pages::info_line(ui, "No artists found in the dataset.");
            return;
        }
    };

    // ---- Artist picker (most-played artists first) ----
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Artist:");
        egui::ComboBox::from_id_salt("deep_dive_artist")
            .selected_text(&focus)
            .show_ui(ui, |ui: &mut Ui| {
                for (value, _) in &options {
                    let name = value.to_string();
                    if ui.selectable_label(focus == name, &name).clicked() {
                        state.set_focus_artist(name);
                    }
                }
            });
    });
    ui.separator();

    let subset = filter_eq(&all_music, "artist", &Value::String(focus.clone()));
    if subset.is_empty() {
        pages::info_line(ui, &format!("No {focus} songs found in the dataset."));
        return;
    }

    // ---- Most-played tracks ----
    if let Some(top_tracks) = top_categorical(&subset, "track", 20) {
        ui.strong(format!("Top 20 {focus} Songs"));
        ui.label("The tracks returned to most often. Longer bars mean more plays.");
        let items: Vec<(String, f64)> = top_tracks
            .iter()
            .map(|(value, count)| (value.to_string(), *count as f64))
            .collect();
        charts::ranked_bars(ui, "deep_dive_tracks", &items, "plays");
        ui.separator();
    }

    // ---- Album representation ----
    if let Some(album_counts) = value_counts(&subset, "album") {
        ui.strong(format!("Albums in the Top {focus} Songs"));
        ui.label("How many of the most-played songs came from each album.");
        let items: Vec<(String, f64)> = album_counts
            .iter()
            .map(|(value, count)| (value.to_string(), *count as f64))
            .collect();
        charts::ranked_bars(ui, "deep_dive_albums", &items, "songs");
    }
}

/// The configured focus artist, falling back to the dataset's most
/// frequent one.
fn current_focus(state: &mut AppState, all_music: &Table) -> Option<String> {
    if let Some(artist) = &state.config.focus_artist {
        return Some(artist.clone());
    }
    most_frequent(all_music, "artist").map(|value| value.to_string())
}
