use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

// ---------------------------------------------------------------------------
// Value – a single cell of a dataset
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value mirroring the dtypes of the exported
/// DataFrames.  Used as a key in `BTreeMap` / `BTreeSet` downstream, so
/// `Value` must be `Ord`.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

// -- Manual Eq/Ord so Value can key BTreeSet / group maps --

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use Value::*;
        fn discriminant(v: &Value) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) => 2,
                Float(_) => 3,
                String(_) => 4,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Null, Null) => std::cmp::Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (String(a), String(b)) => a.cmp(b),
            _ => std::cmp::Ordering::Equal,
        }
    }
}

impl std::hash::Hash for Value {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::String(s) => s.hash(state),
            Value::Integer(i) => i.hash(state),
            Value::Float(f) => f.to_bits().hash(state),
            Value::Bool(b) => b.hash(state),
            Value::Null => {}
        }
    }
}

// Display is the label shown on axes, legends and KPI tiles.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{s}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Null => write!(f, "<null>"),
        }
    }
}

impl Value {
    /// Numeric interpretation for sums and plot coordinates.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Integral interpretation.  Whole floats are accepted because Pandas
    /// exports integer columns as float64 whenever the column has nulls,
    /// which is exactly what happens to `year` in real exports.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            Value::Float(f) if f.is_finite() && f.fract() == 0.0 => Some(*f as i64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

// ---------------------------------------------------------------------------
// Row / Table – the loaded dataset
// ---------------------------------------------------------------------------

/// One play event or session: column name → value.
pub type Row = BTreeMap<String, Value>;

/// An immutable in-memory table with its on-disk column order and a
/// per-column index of distinct values (feeds the sidebar filters).
#[derive(Debug, Clone)]
pub struct Table {
    /// All rows, in file order.
    pub rows: Vec<Row>,
    /// Column names, in on-disk order.
    pub columns: Vec<String>,
    /// For each column the sorted set of distinct values.
    pub unique_values: BTreeMap<String, BTreeSet<Value>>,
}

impl Table {
    /// Build the unique-value index from loaded rows.  `columns` carries
    /// the on-disk header order, which the rows' maps cannot preserve.
    pub fn from_rows(columns: Vec<String>, rows: Vec<Row>) -> Self {
        let mut unique_values: BTreeMap<String, BTreeSet<Value>> = BTreeMap::new();
        for row in &rows {
            for (col, val) in row {
                unique_values
                    .entry(col.clone())
                    .or_default()
                    .insert(val.clone());
            }
        }
        Table {
            rows,
            columns,
            unique_values,
        }
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Iterate the cells of one column in row order; missing cells read
    /// as `Null`.
    pub fn column<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Value> + 'a {
        self.rows
            .iter()
            .map(move |row| row.get(name).unwrap_or(&Value::Null))
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[(&str, Value)]) -> Row {
        cells
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn as_i64_accepts_whole_floats() {
        assert_eq!(Value::Integer(2023).as_i64(), Some(2023));
        assert_eq!(Value::Float(2023.0).as_i64(), Some(2023));
        assert_eq!(Value::Float(2023.5).as_i64(), None);
        assert_eq!(Value::Float(f64::NAN).as_i64(), None);
        assert_eq!(Value::String("2023".into()).as_i64(), None);
    }

    #[test]
    fn unique_value_index_is_built_per_column() {
        let table = Table::from_rows(
            vec!["artist".into(), "year".into()],
            vec![
                row(&[("artist", Value::String("BTS".into())), ("year", Value::Integer(2023))]),
                row(&[("artist", Value::String("BTS".into())), ("year", Value::Integer(2022))]),
                row(&[("artist", Value::Null), ("year", Value::Integer(2023))]),
            ],
        );
        assert_eq!(table.unique_values["artist"].len(), 2); // "BTS" and Null
        assert_eq!(table.unique_values["year"].len(), 2);
        assert!(table.has_column("year"));
        assert!(!table.has_column("country"));
    }

    #[test]
    fn column_iterator_fills_missing_cells_with_null() {
        let table = Table::from_rows(
            vec!["track".into()],
            vec![row(&[("track", Value::String("Magic Shop".into()))]), row(&[])],
        );
        let cells: Vec<&Value> = table.column("track").collect();
        assert_eq!(cells.len(), 2);
        assert!(cells[1].is_null());
    }
}
