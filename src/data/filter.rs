use std::collections::BTreeSet;

use super::model::Dataset;

// ---------------------------------------------------------------------------
// Filter predicate: selected players + inclusive year range
// ---------------------------------------------------------------------------

/// The user's current sidebar selection. Rebuilt on every interaction,
/// never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSelection {
    /// Selected player names. An empty set selects nothing, not everything.
    pub players: BTreeSet<String>,
    /// Inclusive `[min, max]` year range.
    pub year_range: (i32, i32),
}

impl FilterSelection {
    /// Default selection for a freshly loaded dataset: the first five
    /// distinct players over the full year span.
    pub fn initial(dataset: &Dataset) -> Self {
        FilterSelection {
            players: dataset.players.iter().take(5).cloned().collect(),
            year_range: dataset.year_bounds.unwrap_or((0, 0)),
        }
    }

    fn matches(&self, player_name: &str, year: i32) -> bool {
        let (min, max) = self.year_range;
        self.players.contains(player_name) && year >= min && year <= max
    }
}

/// Return indices of records that pass the selection, in dataset order.
///
/// A record passes when its player is in the selected set AND its year lies
/// inside the inclusive range. An empty player set or a range with no overlap
/// yields an empty view, which is a valid result rather than an error.
pub fn filtered_indices(dataset: &Dataset, selection: &FilterSelection) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| selection.matches(&rec.player_name, rec.year))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::PlayerRecord;

    fn dataset() -> Dataset {
        Dataset::from_records(vec![
            PlayerRecord::empty("A", 2020),
            PlayerRecord::empty("A", 2021),
            PlayerRecord::empty("B", 2020),
            PlayerRecord::empty("C", 2022),
        ])
    }

    fn selection(players: &[&str], range: (i32, i32)) -> FilterSelection {
        FilterSelection {
            players: players.iter().map(|p| p.to_string()).collect(),
            year_range: range,
        }
    }

    #[test]
    fn both_year_bounds_are_inclusive() {
        let ds = dataset();
        let sel = selection(&["A", "B", "C"], (2020, 2021));
        assert_eq!(filtered_indices(&ds, &sel), vec![0, 1, 2]);
    }

    #[test]
    fn empty_player_set_selects_nothing() {
        let ds = dataset();
        let sel = selection(&[], (2000, 2100));
        assert!(filtered_indices(&ds, &sel).is_empty());
    }

    #[test]
    fn non_overlapping_year_range_selects_nothing() {
        let ds = dataset();
        let sel = selection(&["A", "B", "C"], (1900, 1901));
        assert!(filtered_indices(&ds, &sel).is_empty());
    }

    #[test]
    fn original_order_is_preserved() {
        let ds = dataset();
        let sel = selection(&["C", "A"], (2020, 2022));
        assert_eq!(filtered_indices(&ds, &sel), vec![0, 1, 3]);
    }

    #[test]
    fn filtering_is_idempotent() {
        let ds = dataset();
        let sel = selection(&["A", "B"], (2020, 2021));
        let once = filtered_indices(&ds, &sel);

        // Re-filter the view's own records with the same selection.
        let view_records: Vec<_> = once.iter().map(|&i| ds.records[i].clone()).collect();
        let view_ds = Dataset::from_records(view_records);
        let twice = filtered_indices(&view_ds, &sel);

        assert_eq!(twice.len(), once.len());
        assert_eq!(twice, (0..once.len()).collect::<Vec<_>>());
    }

    #[test]
    fn initial_selection_takes_first_five_players_and_full_span() {
        let mut records = Vec::new();
        for name in ["P1", "P2", "P3", "P4", "P5", "P6", "P7"] {
            records.push(PlayerRecord::empty(name, 2015));
            records.push(PlayerRecord::empty(name, 2024));
        }
        let ds = Dataset::from_records(records);
        let sel = FilterSelection::initial(&ds);

        assert_eq!(sel.players.len(), 5);
        assert!(sel.players.contains("P1"));
        assert!(!sel.players.contains("P6"));
        assert_eq!(sel.year_range, (2015, 2024));
    }
}
