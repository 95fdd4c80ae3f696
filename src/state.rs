use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::color::ColorMap;
use crate::data::filter::{FilterSelection, filtered_indices};
use crate::data::loader::DatasetCache;
use crate::data::model::Dataset;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Which analysis tab is showing in the central panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Batting,
    Bowling,
    Records,
}

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until a file loads successfully).
    pub dataset: Option<Arc<Dataset>>,

    /// Load-once cache keyed by source path + modification time.
    pub cache: DatasetCache,

    /// Where the current dataset came from (for reloading).
    pub source_path: Option<PathBuf>,

    /// Current sidebar selection (players + year range).
    pub selection: FilterSelection,

    /// Indices of records passing the current selection (cached).
    pub visible_indices: Vec<usize>,

    /// Per-player colours shared by all charts.
    pub color_map: Option<ColorMap>,

    /// Active analysis tab.
    pub active_tab: Tab,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            cache: DatasetCache::default(),
            source_path: None,
            selection: FilterSelection {
                players: BTreeSet::new(),
                year_range: (0, 0),
            },
            visible_indices: Vec::new(),
            color_map: None,
            active_tab: Tab::Batting,
            status_message: None,
        }
    }
}

impl AppState {
    /// Load (or re-use from cache) the dataset at `path` and make it current.
    /// On failure the previous dataset stays in place and the error becomes
    /// the status message.
    pub fn load_path(&mut self, path: &Path) {
        match self.cache.get_or_load(path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} records for {} players from {}",
                    dataset.len(),
                    dataset.players.len(),
                    path.display()
                );
                self.source_path = Some(path.to_path_buf());
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load {}: {e:#}", path.display());
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Force a reload of the current source, bypassing the cache.
    pub fn reload(&mut self) {
        if let Some(path) = self.source_path.clone() {
            self.cache.invalidate();
            self.load_path(&path);
        }
    }

    /// Ingest a newly loaded dataset, initialise selection and colours.
    pub fn set_dataset(&mut self, dataset: Arc<Dataset>) {
        self.selection = FilterSelection::initial(&dataset);
        self.color_map = Some(ColorMap::new(&dataset.players));
        self.dataset = Some(dataset);
        self.status_message = None;
        self.refilter();
    }

    /// Recompute `visible_indices` after a selection change.
    pub fn refilter(&mut self) {
        if let Some(ds) = &self.dataset {
            self.visible_indices = filtered_indices(ds, &self.selection);
        } else {
            self.visible_indices.clear();
        }
    }

    /// Toggle a single player in the selection.
    pub fn toggle_player(&mut self, player: &str) {
        if !self.selection.players.remove(player) {
            self.selection.players.insert(player.to_string());
        }
        self.refilter();
    }

    /// Select every player in the dataset.
    pub fn select_all_players(&mut self) {
        if let Some(ds) = &self.dataset {
            self.selection.players = ds.players.iter().cloned().collect();
            self.refilter();
        }
    }

    /// Clear the player selection (an empty selection shows nothing).
    pub fn select_no_players(&mut self) {
        self.selection.players.clear();
        self.refilter();
    }

    /// Update the inclusive year range, keeping `min <= max`.
    pub fn set_year_range(&mut self, min: i32, max: i32) {
        self.selection.year_range = if min <= max { (min, max) } else { (max, min) };
        self.refilter();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::PlayerRecord;

    fn state_with_dataset() -> AppState {
        let ds = Dataset::from_records(vec![
            PlayerRecord::empty("A", 2020),
            PlayerRecord::empty("B", 2021),
            PlayerRecord::empty("C", 2022),
        ]);
        let mut state = AppState::default();
        state.set_dataset(Arc::new(ds));
        state
    }

    #[test]
    fn set_dataset_selects_everything_visible_by_default() {
        let state = state_with_dataset();
        // Three players < five, so all selected over the full span.
        assert_eq!(state.selection.players.len(), 3);
        assert_eq!(state.selection.year_range, (2020, 2022));
        assert_eq!(state.visible_indices, vec![0, 1, 2]);
    }

    #[test]
    fn toggling_a_player_refilters() {
        let mut state = state_with_dataset();
        state.toggle_player("B");
        assert_eq!(state.visible_indices, vec![0, 2]);
        state.toggle_player("B");
        assert_eq!(state.visible_indices, vec![0, 1, 2]);
    }

    #[test]
    fn year_range_is_normalised() {
        let mut state = state_with_dataset();
        state.set_year_range(2022, 2020);
        assert_eq!(state.selection.year_range, (2020, 2022));
    }

    #[test]
    fn select_no_players_empties_the_view() {
        let mut state = state_with_dataset();
        state.select_no_players();
        assert!(state.visible_indices.is_empty());
    }
}
