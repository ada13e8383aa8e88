use std::path::PathBuf;
use std::sync::Arc;

use crate::auth::{self, SpotifyStatus};
use crate::config::AppConfig;
use crate::data::filter::{filter_by_year, years_available, YearSelection};
use crate::data::loader::DatasetStore;
use crate::data::model::Table;
use crate::ui::pages::Page;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.  Owns the dataset cache
/// (the composition root of the load-once policy) and the sidebar
/// selections; pages borrow it mutably for one straight-line
/// load → filter → aggregate → chart pass per frame.
pub struct AppState {
    /// Load-once dataset cache.
    pub store: DatasetStore,

    /// Persisted settings (data directory, deep-dive artist).
    pub config: AppConfig,

    /// Page shown in the central panel.
    pub page: Page,

    /// Selected years; empty selection means "show every year".
    pub year_filter: YearSelection,

    /// Sorted distinct years of the primary dataset (sidebar options).
    pub years: Vec<i64>,

    /// Informational auth state for the sidebar.
    pub spotify: SpotifyStatus,

    /// Error text shown in the top bar (load failures, config writes).
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new() -> Self {
        let config = AppConfig::load();
        let store = DatasetStore::new(config.data_dir.clone());
        let mut state = AppState {
            store,
            config,
            page: Page::Home,
            year_filter: YearSelection::new(),
            years: Vec::new(),
            spotify: auth::probe_status(),
            status_message: None,
        };
        state.refresh_years();
        state
    }

    /// Rebuild the sidebar's year options from the primary dataset and
    /// select all of them, the multiselect's default.
    pub fn refresh_years(&mut self) {
        self.years = match self.store.get("all_music") {
            Ok(Some(table)) => years_available(&table),
            Ok(None) => Vec::new(),
            Err(err) => {
                self.status_message = Some(format!("Error: {err}"));
                Vec::new()
            }
        };
        self.year_filter = self.years.iter().copied().collect();
    }

    /// The primary dataset, if exported.  Load errors land in the status
    /// bar; the caller just sees "no data".
    pub fn all_music(&mut self) -> Option<Arc<Table>> {
        self.dataset("all_music")
    }

    /// The externally clustered sessions, if exported.
    pub fn clustered_sessions(&mut self) -> Option<Arc<Table>> {
        self.dataset("clustered_sessions")
    }

    fn dataset(&mut self, name: &str) -> Option<Arc<Table>> {
        match self.store.get(name) {
            Ok(table) => table,
            Err(err) => {
                self.status_message = Some(format!("Error: {err}"));
                None
            }
        }
    }

    /// The primary dataset narrowed to the sidebar's year selection.
    pub fn filtered_music(&mut self) -> Option<Table> {
        let table = self.all_music()?;
        Some(filter_by_year(&table, &self.year_filter))
    }

    /// Switch to a new export directory and persist the choice.
    pub fn set_data_dir(&mut self, dir: PathBuf) {
        self.store.set_data_dir(dir.clone());
        self.config.data_dir = dir;
        self.save_config();
        self.status_message = None;
        self.refresh_years();
    }

    /// Re-read everything from disk (the "stale data" escape hatch).
    pub fn reload(&mut self) {
        self.store.reset();
        self.status_message = None;
        self.refresh_years();
        self.spotify = auth::probe_status();
    }

    pub fn toggle_year(&mut self, year: i64) {
        if !self.year_filter.remove(&year) {
            self.year_filter.insert(year);
        }
    }

    pub fn select_all_years(&mut self) {
        self.year_filter = self.years.iter().copied().collect();
    }

    pub fn select_no_years(&mut self) {
        self.year_filter.clear();
    }

    /// Change the deep-dive artist and persist it.
    pub fn set_focus_artist(&mut self, artist: String) {
        self.config.focus_artist = Some(artist);
        self.save_config();
    }

    fn save_config(&mut self) {
        if let Err(err) = self.config.save() {
            log::error!("failed to save config: {err:#}");
            self.status_message = Some(format!("Error: {err}"));
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
