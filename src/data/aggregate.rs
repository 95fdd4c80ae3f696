use std::collections::BTreeMap;

use super::model::{Dataset, PlayerRecord};

// ---------------------------------------------------------------------------
// Summary metrics (the three cards above the charts)
// ---------------------------------------------------------------------------

/// Headline numbers for the current view.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryMetrics {
    /// Sum of runs, absent cells counted as zero.
    pub total_runs: f64,
    /// Sum of wickets, absent cells counted as zero.
    pub total_wickets: f64,
    /// Mean strike rate over present values only; `None` when the view is
    /// empty or no record carries a strike rate.
    pub avg_strike_rate: Option<f64>,
}

impl SummaryMetrics {
    /// The strike-rate average rounded to 2 decimals for display.
    /// The raw value stays in `avg_strike_rate` for further computation.
    pub fn avg_strike_rate_display(&self) -> Option<f64> {
        self.avg_strike_rate.map(|v| (v * 100.0).round() / 100.0)
    }
}

/// Compute the summary metrics over the records selected by `indices`.
pub fn summarize(dataset: &Dataset, indices: &[usize]) -> SummaryMetrics {
    let mut total_runs = 0.0;
    let mut total_wickets = 0.0;
    let mut strike_rate_sum = 0.0;
    let mut strike_rate_count = 0usize;

    for &i in indices {
        let rec = &dataset.records[i];
        total_runs += rec.runs_scored.unwrap_or(0.0);
        total_wickets += rec.wickets_taken.unwrap_or(0.0);
        if let Some(sr) = rec.batting_strike_rate {
            strike_rate_sum += sr;
            strike_rate_count += 1;
        }
    }

    SummaryMetrics {
        total_runs,
        total_wickets,
        avg_strike_rate: (strike_rate_count > 0)
            .then(|| strike_rate_sum / strike_rate_count as f64),
    }
}

// ---------------------------------------------------------------------------
// Grouped sums (bar charts)
// ---------------------------------------------------------------------------

/// Sum `value` per distinct `key` over the view, absent values as zero.
/// Keys are exactly the distinct key values present in the view.
pub fn group_sum<K, KF, VF>(
    dataset: &Dataset,
    indices: &[usize],
    key: KF,
    value: VF,
) -> BTreeMap<K, f64>
where
    K: Ord,
    KF: Fn(&PlayerRecord) -> K,
    VF: Fn(&PlayerRecord) -> Option<f64>,
{
    let mut sums: BTreeMap<K, f64> = BTreeMap::new();
    for &i in indices {
        let rec = &dataset.records[i];
        *sums.entry(key(rec)).or_insert(0.0) += value(rec).unwrap_or(0.0);
    }
    sums
}

// ---------------------------------------------------------------------------
// Pivot table (heatmap)
// ---------------------------------------------------------------------------

/// A dense 2-D aggregate: every (row, col) combination has a value, with
/// combinations absent from the view filled with `0.0` so a heatmap can
/// render every cell.
#[derive(Debug, Clone, PartialEq)]
pub struct PivotTable<R, C> {
    pub row_keys: Vec<R>,
    pub col_keys: Vec<C>,
    /// Row-major, `row_keys.len() * col_keys.len()` entries.
    values: Vec<f64>,
}

impl<R, C> PivotTable<R, C> {
    pub fn value_at(&self, row: usize, col: usize) -> f64 {
        self.values[row * self.col_keys.len() + col]
    }

    pub fn max_value(&self) -> f64 {
        self.values.iter().cloned().fold(0.0, f64::max)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Sum `value` per (row, col) key pair over the view.
///
/// Rows and columns are the sorted distinct key values present in the view;
/// pairs with no matching record sum to exactly `0.0`.
pub fn pivot_sum<R, C, RF, CF, VF>(
    dataset: &Dataset,
    indices: &[usize],
    row_key: RF,
    col_key: CF,
    value: VF,
) -> PivotTable<R, C>
where
    R: Ord + Clone,
    C: Ord + Clone,
    RF: Fn(&PlayerRecord) -> R,
    CF: Fn(&PlayerRecord) -> C,
    VF: Fn(&PlayerRecord) -> Option<f64>,
{
    let mut cells: BTreeMap<(R, C), f64> = BTreeMap::new();
    for &i in indices {
        let rec = &dataset.records[i];
        *cells.entry((row_key(rec), col_key(rec))).or_insert(0.0) +=
            value(rec).unwrap_or(0.0);
    }

    let mut row_keys: Vec<R> = cells.keys().map(|(r, _)| r.clone()).collect();
    row_keys.dedup();
    let mut col_keys: Vec<C> = cells.keys().map(|(_, c)| c.clone()).collect();
    col_keys.sort();
    col_keys.dedup();

    let mut values = vec![0.0; row_keys.len() * col_keys.len()];
    for (ri, r) in row_keys.iter().enumerate() {
        for (ci, c) in col_keys.iter().enumerate() {
            if let Some(v) = cells.get(&(r.clone(), c.clone())) {
                values[ri * col_keys.len() + ci] = *v;
            }
        }
    }

    PivotTable {
        row_keys,
        col_keys,
        values,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{FilterSelection, filtered_indices};
    use crate::data::model::PlayerRecord;

    /// The worked scenario: A/2021's runs are absent after cleaning.
    fn dataset() -> Dataset {
        let mut a20 = PlayerRecord::empty("A", 2020);
        a20.runs_scored = Some(50.0);
        a20.wickets_taken = Some(1.0);
        a20.batting_strike_rate = Some(130.0);

        let mut a21 = PlayerRecord::empty("A", 2021);
        a21.runs_scored = None;
        a21.wickets_taken = Some(2.0);

        let mut b20 = PlayerRecord::empty("B", 2020);
        b20.runs_scored = Some(30.0);
        b20.wickets_taken = Some(0.0);
        b20.batting_strike_rate = Some(110.0);

        Dataset::from_records(vec![a20, a21, b20])
    }

    fn full_view(ds: &Dataset) -> Vec<usize> {
        let sel = FilterSelection {
            players: ["A", "B"].iter().map(|p| p.to_string()).collect(),
            year_range: (2020, 2021),
        };
        filtered_indices(ds, &sel)
    }

    #[test]
    fn summarize_treats_absent_as_zero_for_sums() {
        let ds = dataset();
        let view = full_view(&ds);
        assert_eq!(view.len(), 3);

        let metrics = summarize(&ds, &view);
        assert_eq!(metrics.total_runs, 80.0);
        assert_eq!(metrics.total_wickets, 3.0);
    }

    #[test]
    fn summarize_excludes_absent_from_the_strike_rate_mean() {
        let ds = dataset();
        let metrics = summarize(&ds, &full_view(&ds));
        // Two present values (130, 110), the absent one is not in the denominator.
        assert_eq!(metrics.avg_strike_rate, Some(120.0));
    }

    #[test]
    fn summarize_over_an_empty_view() {
        let ds = dataset();
        let metrics = summarize(&ds, &[]);
        assert_eq!(metrics.total_runs, 0.0);
        assert_eq!(metrics.total_wickets, 0.0);
        assert_eq!(metrics.avg_strike_rate, None);
    }

    #[test]
    fn strike_rate_display_is_rounded_to_two_decimals() {
        let metrics = SummaryMetrics {
            total_runs: 0.0,
            total_wickets: 0.0,
            avg_strike_rate: Some(123.456),
        };
        assert_eq!(metrics.avg_strike_rate_display(), Some(123.46));
    }

    #[test]
    fn group_sum_partitions_by_player() {
        let ds = dataset();
        let view = full_view(&ds);

        let runs = group_sum(&ds, &view, |r| r.player_name.clone(), |r| r.runs_scored);
        assert_eq!(runs.len(), 2);
        assert_eq!(runs["A"], 50.0);
        assert_eq!(runs["B"], 30.0);
    }

    #[test]
    fn group_sum_totals_match_summarize() {
        let ds = dataset();
        let view = full_view(&ds);
        let metrics = summarize(&ds, &view);

        let runs = group_sum(&ds, &view, |r| r.player_name.clone(), |r| r.runs_scored);
        assert_eq!(runs.values().sum::<f64>(), metrics.total_runs);

        let wickets = group_sum(&ds, &view, |r| r.player_name.clone(), |r| r.wickets_taken);
        assert_eq!(wickets.values().sum::<f64>(), metrics.total_wickets);
    }

    #[test]
    fn pivot_sum_fills_missing_cells_with_zero() {
        let ds = dataset();
        let view = full_view(&ds);

        let pivot = pivot_sum(
            &ds,
            &view,
            |r| r.player_name.clone(),
            |r| r.year,
            |r| r.wickets_taken,
        );

        assert_eq!(pivot.row_keys, vec!["A".to_string(), "B".to_string()]);
        assert_eq!(pivot.col_keys, vec![2020, 2021]);
        assert_eq!(pivot.value_at(0, 0), 1.0); // A / 2020
        assert_eq!(pivot.value_at(0, 1), 2.0); // A / 2021
        assert_eq!(pivot.value_at(1, 0), 0.0); // B / 2020 (zero wickets)
        assert_eq!(pivot.value_at(1, 1), 0.0); // B / 2021 (no record, filled)
        assert_eq!(pivot.max_value(), 2.0);
    }

    #[test]
    fn pivot_sum_of_an_empty_view_is_empty() {
        let ds = dataset();
        let pivot = pivot_sum(
            &ds,
            &[],
            |r| r.player_name.clone(),
            |r| r.year,
            |r| r.wickets_taken,
        );
        assert!(pivot.is_empty());
        assert!(pivot.row_keys.is_empty());
        assert!(pivot.col_keys.is_empty());
    }
}
