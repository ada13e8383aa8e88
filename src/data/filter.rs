use std::collections::BTreeSet;

use super::model::{Table, Value};

// ---------------------------------------------------------------------------
// Year filter
// ---------------------------------------------------------------------------

/// The sidebar's year multiselect.  An empty selection means "no filter"
/// (show every year), not "show nothing": deselecting everything falls
/// back to the full table.  Callers must preserve this convention.
pub type YearSelection = BTreeSet<i64>;

/// Keep only rows whose `year` is in the selection.  Empty selection is
/// the identity.  With an active selection, rows with a missing or
/// non-integral year are dropped.
pub fn filter_by_year(table: &Table, selected: &YearSelection) -> Table {
    if selected.is_empty() {
        return table.clone();
    }
    let rows = table
        .rows
        .iter()
        .filter(|row| {
            row.get("year")
                .and_then(Value::as_i64)
                .is_some_and(|year| selected.contains(&year))
        })
        .cloned()
        .collect();
    Table::from_rows(table.columns.clone(), rows)
}

/// Sorted distinct years of the table, skipping nulls.  Empty when the
/// `year` column is absent, in which case the sidebar offers no choices.
pub fn years_available(table: &Table) -> Vec<i64> {
    if !table.has_column("year") {
        return Vec::new();
    }
    let years: BTreeSet<i64> = table.column("year").filter_map(Value::as_i64).collect();
    years.into_iter().collect()
}

// ---------------------------------------------------------------------------
// Column predicates
// ---------------------------------------------------------------------------

/// Rows whose `column` equals `value` (the artist deep-dive subset).
/// Nulls never match.
pub fn filter_eq(table: &Table, column: &str, value: &Value) -> Table {
    let rows = table
        .rows
        .iter()
        .filter(|row| row.get(column) == Some(value))
        .cloned()
        .collect();
    Table::from_rows(table.columns.clone(), rows)
}

/// Rows whose `column` differs from `value`.  Nulls count as "different"
/// and are kept, the way a Pandas `!=` mask behaves; downstream group-bys
/// drop them anyway.
pub fn filter_ne(table: &Table, column: &str, value: &Value) -> Table {
    let rows = table
        .rows
        .iter()
        .filter(|row| row.get(column) != Some(value))
        .cloned()
        .collect();
    Table::from_rows(table.columns.clone(), rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Row;

    fn music_table() -> Table {
        let rows = vec![
            music_row("BTS", Some(2022), "US"),
            music_row("BTS", Some(2023), "KR"),
            music_row("IU", Some(2023), "US"),
            music_row("IU", None, "US"),
        ];
        Table::from_rows(vec!["artist".into(), "year".into(), "country".into()], rows)
    }

    fn music_row(artist: &str, year: Option<i64>, country: &str) -> Row {
        let mut row = Row::new();
        row.insert("artist".into(), Value::String(artist.into()));
        row.insert(
            "year".into(),
            year.map(Value::Integer).unwrap_or(Value::Null),
        );
        row.insert("country".into(), Value::String(country.into()));
        row
    }

    #[test]
    fn empty_selection_is_identity() {
        let table = music_table();
        let filtered = filter_by_year(&table, &YearSelection::new());
        assert_eq!(filtered.len(), table.len());
        assert_eq!(filtered.rows, table.rows);
        assert_eq!(filtered.columns, table.columns);
    }

    #[test]
    fn selection_keeps_exactly_the_matching_years() {
        let table = music_table();
        let selected: YearSelection = [2023].into_iter().collect();
        let filtered = filter_by_year(&table, &selected);
        assert_eq!(filtered.len(), 2);
        assert!(filtered
            .column("year")
            .all(|v| v.as_i64() == Some(2023)));
    }

    #[test]
    fn active_selection_drops_null_years() {
        let table = music_table();
        let selected: YearSelection = [2022, 2023].into_iter().collect();
        // The null-year IU row falls out even though every year is selected.
        assert_eq!(filter_by_year(&table, &selected).len(), 3);
    }

    #[test]
    fn years_available_is_sorted_and_null_free() {
        assert_eq!(years_available(&music_table()), vec![2022, 2023]);

        let no_year = Table::from_rows(vec!["artist".into()], vec![Row::new()]);
        assert!(years_available(&no_year).is_empty());
    }

    #[test]
    fn filter_eq_matches_only_the_value() {
        let table = music_table();
        let bts = filter_eq(&table, "artist", &Value::String("BTS".into()));
        assert_eq!(bts.len(), 2);

        let nobody = filter_eq(&table, "artist", &Value::String("NewJeans".into()));
        assert!(nobody.is_empty());
    }

    #[test]
    fn filter_ne_keeps_nulls() {
        let mut rows = music_table().rows;
        rows.push({
            let mut row = Row::new();
            row.insert("artist".into(), Value::String("IU".into()));
            row.insert("country".into(), Value::Null);
            row
        });
        let table = Table::from_rows(vec!["artist".into(), "year".into(), "country".into()], rows);

        let abroad = filter_ne(&table, "country", &Value::String("US".into()));
        assert_eq!(abroad.len(), 2); // the KR row and the null-country row
    }
}
