use eframe::egui::{Color32, RichText, ScrollArea, Ui};

use crate::data::model::Value;
use crate::state::AppState;

mod clusters;
mod deep_dive;
mod history;
mod home;
mod overview;

/// Guidance shown when the primary dataset has not been exported yet.
pub const MISSING_MUSIC: &str =
    "Data not found. Run the notebook export cell to generate data/all_music.parquet, \
     then reload (File → Reload data).";

// ---------------------------------------------------------------------------
// Page registry
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Overview,
    DeepDive,
    History,
    Clusters,
}

impl Page {
    pub const ALL: [Page; 5] = [
        Page::Home,
        Page::Overview,
        Page::DeepDive,
        Page::History,
        Page::Clusters,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Page::Home => "Introduction",
            Page::Overview => "Overview",
            Page::DeepDive => "Artist Deep Dive",
            Page::History => "Extended History",
            Page::Clusters => "Temporal Clusters",
        }
    }
}

/// Render the current page inside a scroll area.
pub fn show_current(ui: &mut Ui, state: &mut AppState) {
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| match state.page {
            Page::Home => home::show(ui, state),
            Page::Overview => overview::show(ui, state),
            Page::DeepDive => deep_dive::show(ui, state),
            Page::History => history::show(ui, state),
            Page::Clusters => clusters::show(ui, state),
        });
}

// ---------------------------------------------------------------------------
// Shared page widgets
// ---------------------------------------------------------------------------

/// Amber warning line for a missing dataset; the page renders nothing
/// after this.
pub(crate) fn warn_missing(ui: &mut Ui, message: &str) {
    ui.label(RichText::new(message).color(Color32::from_rgb(0xe0, 0xa0, 0x30)));
}

/// Informational line for expected-but-empty states (no clusters yet, no
/// rows for an artist).
pub(crate) fn info_line(ui: &mut Ui, message: &str) {
    ui.label(RichText::new(message).color(Color32::LIGHT_BLUE));
}

/// A row of KPI tiles: label on top, big value underneath.  Values are
/// preformatted so "no data" placeholders ("-", "N/A") pass through.
pub(crate) fn kpi_row(ui: &mut Ui, kpis: &[(&str, String)]) {
    ui.columns(kpis.len(), |columns| {
        for (column, (label, value)) in columns.iter_mut().zip(kpis) {
            column.label(RichText::new(*label).weak());
            column.heading(RichText::new(value).strong());
        }
    });
}

/// `{:.0}` for an available numeric KPI, "-" placeholder otherwise
/// (never a silent zero).
pub(crate) fn fmt_kpi(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.0}"),
        None => "-".to_string(),
    }
}

/// Categorical KPI with the "N/A" placeholder.
pub(crate) fn fmt_kpi_value(value: Option<Value>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "N/A".to_string(),
    }
}
