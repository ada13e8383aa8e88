use eframe::egui::{self, Color32, RichText, Ui};

use crate::state::AppState;
use crate::ui::pages::Page;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / status bar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open data folder…").clicked() {
                pick_data_folder(state);
                ui.close_menu();
            }
            if ui.button("Reload data").clicked() {
                state.reload();
                ui.close_menu();
            }
        });

        ui.separator();
        ui.label(format!("Data: {}", state.store.data_dir().display()));

        if let Some(table) = state.all_music() {
            ui.separator();
            ui.label(format!("{} plays loaded", table.len()));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

fn pick_data_folder(state: &mut AppState) {
    let dir = rfd::FileDialog::new()
        .set_title("Choose the exported data folder")
        .pick_folder();

    if let Some(dir) = dir {
        log::info!("switching data directory to {}", dir.display());
        state.set_data_dir(dir);
    }
}

// ---------------------------------------------------------------------------
// Left side panel – navigation, year filter, auth status
// ---------------------------------------------------------------------------

/// Render the left panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Wrapped");
    ui.separator();

    for page in Page::ALL {
        if ui.selectable_label(state.page == page, page.title()).clicked() {
            state.page = page;
        }
    }

    ui.separator();
    ui.strong("Filters");

    if state.years.is_empty() {
        ui.label("No year data.");
    } else {
        let n_selected = state
            .years
            .iter()
            .filter(|year| state.year_filter.contains(year))
            .count();
        let header_text = format!("Year  ({n_selected}/{})", state.years.len());

        egui::CollapsingHeader::new(RichText::new(header_text).strong())
            .default_open(true)
            .show(ui, |ui: &mut Ui| {
                ui.horizontal(|ui: &mut Ui| {
                    if ui.small_button("All").clicked() {
                        state.select_all_years();
                    }
                    if ui.small_button("None").clicked() {
                        state.select_no_years();
                    }
                });

                let years = state.years.clone();
                for year in years {
                    let mut checked = state.year_filter.contains(&year);
                    if ui.checkbox(&mut checked, year.to_string()).changed() {
                        state.toggle_year(year);
                    }
                }

                if state.year_filter.is_empty() {
                    ui.weak("Nothing selected: showing every year.");
                }
            });
    }

    ui.separator();
    if state.spotify.is_connected() {
        ui.colored_label(Color32::from_rgb(0x2e, 0xcc, 0x71), state.spotify.label());
    } else {
        ui.weak(state.spotify.label());
    }
}
