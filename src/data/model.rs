use std::collections::BTreeSet;

// ---------------------------------------------------------------------------
// PlayerRecord – one row of the source table
// ---------------------------------------------------------------------------

/// One player's performance in one year.
///
/// Every numeric statistic is optional: the source marks "no statistic
/// recorded" with a sentinel string, and cells that fail to parse as numbers
/// become `None` rather than zero. `year` is the only required numeric field;
/// rows without it never survive loading.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerRecord {
    pub player_name: String,
    pub year: i32,
    pub runs_scored: Option<f64>,
    pub batting_average: Option<f64>,
    pub batting_strike_rate: Option<f64>,
    pub centuries: Option<f64>,
    pub half_centuries: Option<f64>,
    pub fours: Option<f64>,
    pub sixes: Option<f64>,
    pub wickets_taken: Option<f64>,
    pub economy_rate: Option<f64>,
    pub bowling_average: Option<f64>,
}

impl PlayerRecord {
    /// A record with the given identity and no statistics.
    pub fn empty(player_name: impl Into<String>, year: i32) -> Self {
        PlayerRecord {
            player_name: player_name.into(),
            year,
            runs_scored: None,
            batting_average: None,
            batting_strike_rate: None,
            centuries: None,
            half_centuries: None,
            fours: None,
            sixes: None,
            wickets_taken: None,
            economy_rate: None,
            bowling_average: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete cleaned table
// ---------------------------------------------------------------------------

/// The full cleaned dataset with pre-computed player and year indices.
/// Immutable after construction; the UI only ever derives from it.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// All records, in source order.
    pub records: Vec<PlayerRecord>,
    /// Sorted distinct player names.
    pub players: Vec<String>,
    /// Inclusive year span of the data, `None` when the dataset is empty.
    pub year_bounds: Option<(i32, i32)>,
}

impl Dataset {
    /// Build the player and year indices from cleaned records.
    pub fn from_records(records: Vec<PlayerRecord>) -> Self {
        let mut player_set: BTreeSet<String> = BTreeSet::new();
        let mut year_bounds: Option<(i32, i32)> = None;

        for rec in &records {
            player_set.insert(rec.player_name.clone());
            year_bounds = Some(match year_bounds {
                None => (rec.year, rec.year),
                Some((lo, hi)) => (lo.min(rec.year), hi.max(rec.year)),
            });
        }

        Dataset {
            records,
            players: player_set.into_iter().collect(),
            year_bounds,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_are_built_from_records() {
        let records = vec![
            PlayerRecord::empty("V Kohli", 2021),
            PlayerRecord::empty("R Sharma", 2019),
            PlayerRecord::empty("V Kohli", 2023),
        ];
        let ds = Dataset::from_records(records);

        assert_eq!(ds.len(), 3);
        assert_eq!(
            ds.players,
            vec!["R Sharma".to_string(), "V Kohli".to_string()]
        );
        assert_eq!(ds.year_bounds, Some((2019, 2023)));
    }

    #[test]
    fn empty_dataset_has_no_year_bounds() {
        let ds = Dataset::from_records(Vec::new());
        assert!(ds.is_empty());
        assert!(ds.players.is_empty());
        assert_eq!(ds.year_bounds, None);
    }
}
