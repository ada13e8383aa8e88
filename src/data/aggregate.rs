use std::collections::{BTreeMap, HashMap};

use super::model::{Table, Value};

/// Milliseconds per hour; every listening-time figure divides by this.
pub const MS_PER_HOUR: f64 = 3_600_000.0;
pub const HOURS_PER_DAY: f64 = 24.0;

// ---------------------------------------------------------------------------
// Scalar KPIs
// ---------------------------------------------------------------------------

/// Total listening hours across the table.
///
/// `None` when `ms_played` is absent or entirely null; "no data" must
/// stay distinguishable from a genuine zero, so the caller renders a
/// placeholder instead of 0.
pub fn total_hours(table: &Table) -> Option<f64> {
    if !table.has_column("ms_played") {
        return None;
    }
    let mut sum = 0.0;
    let mut any = false;
    for cell in table.column("ms_played") {
        if let Some(ms) = cell.as_f64() {
            sum += ms;
            any = true;
        }
    }
    any.then_some(sum / MS_PER_HOUR)
}

pub fn total_days(table: &Table) -> Option<f64> {
    total_hours(table).map(|hours| hours / HOURS_PER_DAY)
}

// ---------------------------------------------------------------------------
// Frequency rankings
// ---------------------------------------------------------------------------

/// Occurrences of each distinct non-null value of `column`, descending by
/// count.  Ties keep first-encounter order, so the ranking is stable
/// against input order.  `None` when the column is absent, so the caller
/// skips the chart rather than drawing an empty one.
pub fn value_counts(table: &Table, column: &str) -> Option<Vec<(Value, usize)>> {
    if !table.has_column(column) {
        return None;
    }

    // value → (count, first-encounter rank)
    let mut counts: HashMap<&Value, (usize, usize)> = HashMap::new();
    for cell in table.column(column) {
        if cell.is_null() {
            continue;
        }
        let first_seen = counts.len();
        let entry = counts.entry(cell).or_insert((0, first_seen));
        entry.0 += 1;
    }

    let mut items: Vec<(&Value, usize, usize)> = counts
        .into_iter()
        .map(|(value, (count, first_seen))| (value, count, first_seen))
        .collect();
    items.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

    Some(
        items
            .into_iter()
            .map(|(value, count, _)| (value.clone(), count))
            .collect(),
    )
}

/// The `n` most frequent values of `column`.
pub fn top_categorical(table: &Table, column: &str, n: usize) -> Option<Vec<(Value, usize)>> {
    value_counts(table, column).map(|mut counts| {
        counts.truncate(n);
        counts
    })
}

/// The single most common value of `column`.  `None` stands in for the
/// "N/A" placeholder when the column is absent or entirely null; empty
/// input never panics.
pub fn most_frequent(table: &Table, column: &str) -> Option<Value> {
    value_counts(table, column)?
        .into_iter()
        .next()
        .map(|(value, _)| value)
}

// ---------------------------------------------------------------------------
// Grouped sums
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct YearHours {
    pub year: i64,
    pub ms_played: f64,
    pub hours: f64,
}

/// Listening time per year, ascending by year.  Requires `year` and
/// `ms_played`; rows with a null year fall out of the grouping.
pub fn sum_hours_by_year(table: &Table) -> Option<Vec<YearHours>> {
    if !table.has_column("year") || !table.has_column("ms_played") {
        return None;
    }

    let mut sums: BTreeMap<i64, f64> = BTreeMap::new();
    for row in &table.rows {
        let Some(year) = row.get("year").and_then(Value::as_i64) else {
            continue;
        };
        let ms = row
            .get("ms_played")
            .and_then(Value::as_f64)
            .unwrap_or(0.0);
        *sums.entry(year).or_insert(0.0) += ms;
    }

    Some(
        sums.into_iter()
            .map(|(year, ms_played)| YearHours {
                year,
                ms_played,
                hours: ms_played / MS_PER_HOUR,
            })
            .collect(),
    )
}

#[derive(Debug, Clone, PartialEq)]
pub struct GroupHours {
    /// One value per grouping key, in key order.
    pub keys: Vec<Value>,
    pub ms_played: f64,
    pub hours: f64,
}

/// Multi-key generalization of [`sum_hours_by_year`] (year × country and
/// friends).  Rows with a null in any key are dropped; output is sorted
/// by key tuple, so it is deterministic.
pub fn sum_hours_by(table: &Table, keys: &[&str]) -> Option<Vec<GroupHours>> {
    if !table.has_column("ms_played") || keys.iter().any(|key| !table.has_column(key)) {
        return None;
    }

    let mut sums: BTreeMap<Vec<Value>, f64> = BTreeMap::new();
    'rows: for row in &table.rows {
        let mut tuple = Vec::with_capacity(keys.len());
        for key in keys {
            match row.get(*key) {
                Some(value) if !value.is_null() => tuple.push(value.clone()),
                _ => continue 'rows,
            }
        }
        let ms = row
            .get("ms_played")
            .and_then(Value::as_f64)
            .unwrap_or(0.0);
        *sums.entry(tuple).or_insert(0.0) += ms;
    }

    Some(
        sums.into_iter()
            .map(|(keys, ms_played)| GroupHours {
                keys,
                ms_played,
                hours: ms_played / MS_PER_HOUR,
            })
            .collect(),
    )
}

/// Row counts per distinct key tuple, sorted by key.  Drives the
/// day-of-week × cluster histogram.  Same null handling as
/// [`sum_hours_by`].
pub fn count_by(table: &Table, keys: &[&str]) -> Option<Vec<(Vec<Value>, usize)>> {
    if keys.iter().any(|key| !table.has_column(key)) {
        return None;
    }

    let mut counts: BTreeMap<Vec<Value>, usize> = BTreeMap::new();
    'rows: for row in &table.rows {
        let mut tuple = Vec::with_capacity(keys.len());
        for key in keys {
            match row.get(*key) {
                Some(value) if !value.is_null() => tuple.push(value.clone()),
                _ => continue 'rows,
            }
        }
        *counts.entry(tuple).or_insert(0) += 1;
    }

    Some(counts.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Row;

    fn play(artist: &str, track: &str, year: Option<i64>, ms: i64, country: Option<&str>) -> Row {
        let mut row = Row::new();
        row.insert("artist".into(), Value::String(artist.into()));
        row.insert("track".into(), Value::String(track.into()));
        row.insert(
            "year".into(),
            year.map(Value::Integer).unwrap_or(Value::Null),
        );
        row.insert("ms_played".into(), Value::Integer(ms));
        row.insert(
            "country".into(),
            country.map(|c| Value::String(c.into())).unwrap_or(Value::Null),
        );
        row
    }

    fn music_columns() -> Vec<String> {
        ["artist", "track", "year", "ms_played", "country"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    #[test]
    fn single_bts_play_yields_expected_kpis() {
        let table = Table::from_rows(
            music_columns(),
            vec![play("BTS", "Magic Shop", Some(2023), 180_000, Some("US"))],
        );
        assert_eq!(total_hours(&table), Some(0.05));
        assert_eq!(
            most_frequent(&table, "artist"),
            Some(Value::String("BTS".into()))
        );
    }

    #[test]
    fn missing_column_reports_unavailable() {
        let table = Table::from_rows(
            vec!["artist".into()],
            vec![{
                let mut row = Row::new();
                row.insert("artist".into(), Value::String("BTS".into()));
                row
            }],
        );
        assert_eq!(total_hours(&table), None);
        assert_eq!(total_days(&table), None);
        assert!(value_counts(&table, "track").is_none());
        assert!(most_frequent(&table, "track").is_none());
        assert!(sum_hours_by_year(&table).is_none());
        assert!(sum_hours_by(&table, &["year", "country"]).is_none());
        assert!(count_by(&table, &["day_of_week", "cluster"]).is_none());
    }

    #[test]
    fn all_null_ms_played_is_unavailable_not_zero() {
        let mut row = Row::new();
        row.insert("ms_played".into(), Value::Null);
        let table = Table::from_rows(vec!["ms_played".into()], vec![row.clone(), row]);
        assert_eq!(total_hours(&table), None);
    }

    #[test]
    fn most_frequent_of_all_null_column_is_unavailable() {
        let mut row = Row::new();
        row.insert("artist".into(), Value::Null);
        let table = Table::from_rows(vec!["artist".into()], vec![row]);
        assert_eq!(most_frequent(&table, "artist"), None);
    }

    #[test]
    fn value_counts_orders_by_count_then_first_encounter() {
        let table = Table::from_rows(
            music_columns(),
            vec![
                play("IU", "Celebrity", Some(2023), 1, None),
                play("BTS", "Magic Shop", Some(2023), 1, None),
                play("BTS", "Mikrokosmos", Some(2023), 1, None),
                play("NewJeans", "Ditto", Some(2023), 1, None),
                play("BTS", "Spring Day", Some(2023), 1, None),
                // IU and NewJeans tie at 2; IU appeared first.
                play("NewJeans", "OMG", Some(2023), 1, None),
                play("IU", "Lilac", Some(2023), 1, None),
            ],
        );
        let counts = value_counts(&table, "artist").unwrap();
        let names: Vec<&str> = counts
            .iter()
            .map(|(value, _)| value.as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["BTS", "IU", "NewJeans"]);
        assert_eq!(counts[0].1, 3);
    }

    #[test]
    fn top_categorical_truncates_with_distinct_values() {
        let table = Table::from_rows(
            music_columns(),
            vec![
                play("BTS", "a", Some(2023), 1, None),
                play("BTS", "b", Some(2023), 1, None),
                play("IU", "c", Some(2023), 1, None),
                play("NewJeans", "d", Some(2023), 1, None),
            ],
        );
        let top = top_categorical(&table, "artist", 2).unwrap();
        assert_eq!(top.len(), 2);
        assert!(top[0].1 >= top[1].1);
        assert_ne!(top[0].0, top[1].0);
    }

    #[test]
    fn yearly_sums_convert_ms_to_hours_exactly() {
        let table = Table::from_rows(
            music_columns(),
            vec![
                play("BTS", "a", Some(2023), 3_600_000, None),
                play("BTS", "b", Some(2023), 1_800_000, None),
                play("IU", "c", Some(2021), 7_200_000, None),
                play("IU", "d", None, 999_999, None), // null year drops out
            ],
        );
        let yearly = sum_hours_by_year(&table).unwrap();
        assert_eq!(yearly.len(), 2);
        assert_eq!(yearly[0].year, 2021); // ascending
        assert_eq!(yearly[1].year, 2023);
        for group in &yearly {
            assert_eq!(group.hours, group.ms_played / MS_PER_HOUR);
        }
        assert_eq!(yearly[1].hours, 1.5);
    }

    #[test]
    fn multi_key_sums_drop_rows_with_null_keys() {
        let table = Table::from_rows(
            music_columns(),
            vec![
                play("BTS", "a", Some(2023), 3_600_000, Some("KR")),
                play("BTS", "b", Some(2023), 3_600_000, Some("KR")),
                play("IU", "c", Some(2023), 3_600_000, None), // null country
                play("IU", "d", Some(2022), 1_800_000, Some("JP")),
            ],
        );
        let groups = sum_hours_by(&table, &["year", "country"]).unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(
            groups[0].keys,
            vec![Value::Integer(2022), Value::String("JP".into())]
        );
        assert_eq!(groups[1].hours, 2.0);
    }

    #[test]
    fn count_by_groups_row_counts() {
        let mut rows = Vec::new();
        for (day, cluster) in [("Monday", 0), ("Monday", 0), ("Friday", 1)] {
            let mut row = Row::new();
            row.insert("day_of_week".into(), Value::String(day.into()));
            row.insert("cluster".into(), Value::Integer(cluster));
            rows.push(row);
        }
        let table = Table::from_rows(vec!["day_of_week".into(), "cluster".into()], rows);
        let counts = count_by(&table, &["day_of_week", "cluster"]).unwrap();
        assert_eq!(counts.len(), 2);
        let monday = counts
            .iter()
            .find(|(keys, _)| keys[0] == Value::String("Monday".into()))
            .unwrap();
        assert_eq!(monday.1, 2);
    }
}
