use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use arrow::array::{
    Array, AsArray, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray,
};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::model::{Row, Table, Value};

// ---------------------------------------------------------------------------
// File loading
// ---------------------------------------------------------------------------

/// Load a logical dataset from the data directory.
///
/// Resolution order: `<name>.parquet` first, `<name>.csv` as fallback.
/// Neither file existing is the expected "no data exported yet" state and
/// comes back as `Ok(None)`; a present-but-unreadable file is a real error.
pub fn load_dataset(data_dir: &Path, name: &str) -> Result<Option<Table>> {
    let parquet_path = data_dir.join(format!("{name}.parquet"));
    if parquet_path.exists() {
        return load_parquet(&parquet_path)
            .with_context(|| format!("loading {}", parquet_path.display()))
            .map(Some);
    }
    let csv_path = data_dir.join(format!("{name}.csv"));
    if csv_path.exists() {
        return load_csv(&csv_path)
            .with_context(|| format!("loading {}", csv_path.display()))
            .map(Some);
    }
    Ok(None)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one play event or session per
/// data row.  Cell types are guessed per value (int → float → bool →
/// string, empty → null), matching what Pandas writes with `to_csv`.
fn load_csv(path: &Path) -> Result<Table> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let mut row = Row::new();
        for (col_idx, cell) in record.iter().enumerate() {
            let Some(col_name) = headers.get(col_idx) else {
                continue;
            };
            row.insert(col_name.clone(), guess_value(cell));
        }
        rows.push(row);
    }

    Ok(Table::from_rows(headers, rows))
}

fn guess_value(s: &str) -> Value {
    if s.is_empty() {
        return Value::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return Value::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return Value::Float(f);
    }
    if s == "true" || s == "false" {
        return Value::Bool(s == "true");
    }
    Value::String(s.to_string())
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file of scalar columns.  Works with files written by
/// both **Pandas** (`df.to_parquet()`) and **Polars** (`df.write_parquet()`);
/// column names and types come straight from the file schema.
fn load_parquet(path: &Path) -> Result<Table> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;

    let columns: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();

    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        for row_idx in 0..batch.num_rows() {
            let mut row = Row::new();
            for (col_idx, field) in schema.fields().iter().enumerate() {
                let value = extract_value(batch.column(col_idx), row_idx);
                row.insert(field.name().clone(), value);
            }
            rows.push(row);
        }
    }

    Ok(Table::from_rows(columns, rows))
}

/// Extract a single cell from an Arrow column at a given row.
fn extract_value(col: &Arc<dyn Array>, row: usize) -> Value {
    if col.is_null(row) {
        return Value::Null;
    }
    match col.data_type() {
        DataType::Utf8 | DataType::LargeUtf8 => {
            if let Some(s) = col.as_any().downcast_ref::<StringArray>() {
                Value::String(s.value(row).to_string())
            } else {
                // LargeStringArray
                let s = col.as_string::<i64>();
                Value::String(s.value(row).to_string())
            }
        }
        DataType::Int32 => {
            let arr = col.as_any().downcast_ref::<Int32Array>().unwrap();
            Value::Integer(arr.value(row) as i64)
        }
        DataType::Int64 => {
            let arr = col.as_any().downcast_ref::<Int64Array>().unwrap();
            Value::Integer(arr.value(row))
        }
        DataType::Float32 => {
            let arr = col.as_any().downcast_ref::<Float32Array>().unwrap();
            Value::Float(arr.value(row) as f64)
        }
        DataType::Float64 => {
            let arr = col.as_any().downcast_ref::<Float64Array>().unwrap();
            Value::Float(arr.value(row))
        }
        DataType::Boolean => {
            let arr = col.as_any().downcast_ref::<BooleanArray>().unwrap();
            Value::Bool(arr.value(row))
        }
        _ => Value::String(format!("{:?}", col.data_type())),
    }
}

// ---------------------------------------------------------------------------
// DatasetStore – load-once-per-name cache
// ---------------------------------------------------------------------------

enum CacheSlot {
    Loaded(Arc<Table>),
    Absent,
    Failed(String),
}

/// Process-wide load-once cache, owned by the composition root and handed
/// to every page render.  Keyed by logical dataset name; absent and failed
/// results are cached too, so a page redrawing every frame never re-reads
/// the disk.  There is no invalidation: stale files require a reload (or
/// pointing the store at a different directory, which resets it wholesale).
pub struct DatasetStore {
    data_dir: PathBuf,
    cache: BTreeMap<String, CacheSlot>,
}

impl DatasetStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        DatasetStore {
            data_dir: data_dir.into(),
            cache: BTreeMap::new(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Point the store at a new export directory, dropping everything
    /// cached from the old one.
    pub fn set_data_dir(&mut self, data_dir: impl Into<PathBuf>) {
        self.data_dir = data_dir.into();
        self.cache.clear();
    }

    /// Drop all cached tables; the next access re-reads the disk.
    pub fn reset(&mut self) {
        self.cache.clear();
    }

    /// Fetch a dataset by name.  `Ok(None)` means neither file exists;
    /// callers must treat that as "no data yet" and degrade gracefully.
    pub fn get(&mut self, name: &str) -> Result<Option<Arc<Table>>> {
        if let Some(slot) = self.cache.get(name) {
            return match slot {
                CacheSlot::Loaded(table) => Ok(Some(table.clone())),
                CacheSlot::Absent => Ok(None),
                CacheSlot::Failed(msg) => Err(anyhow!("{msg}")),
            };
        }

        let slot = match load_dataset(&self.data_dir, name) {
            Ok(Some(table)) => {
                log::info!(
                    "loaded dataset '{name}': {} rows, columns {:?}",
                    table.len(),
                    table.columns
                );
                CacheSlot::Loaded(Arc::new(table))
            }
            Ok(None) => {
                log::warn!(
                    "dataset '{name}' not found in {}",
                    self.data_dir.display()
                );
                CacheSlot::Absent
            }
            Err(err) => {
                log::error!("failed to load dataset '{name}': {err:#}");
                CacheSlot::Failed(format!("{err:#}"))
            }
        };
        self.cache.insert(name.to_string(), slot);
        self.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{Int64Array, StringArray};
    use arrow::datatypes::{DataType as ArrowType, Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;

    /// Fresh scratch directory per test so parallel tests don't collide.
    fn scratch_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "wrapped-dash-test-{tag}-{}",
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write_music_parquet(path: &Path, artists: &[Option<&str>], years: &[Option<i64>]) {
        let schema = Arc::new(Schema::new(vec![
            Field::new("artist", ArrowType::Utf8, true),
            Field::new("year", ArrowType::Int64, true),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(artists.to_vec())),
                Arc::new(Int64Array::from(years.to_vec())),
            ],
        )
        .unwrap();
        let file = std::fs::File::create(path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();
    }

    #[test]
    fn absent_dataset_is_none_not_error() {
        let dir = scratch_dir("absent");
        let mut store = DatasetStore::new(&dir);
        assert!(store.get("all_music").unwrap().is_none());
    }

    #[test]
    fn csv_cells_are_type_guessed() {
        let dir = scratch_dir("csv");
        std::fs::write(
            dir.join("all_music.csv"),
            "track,artist,year,ms_played,country\n\
             Magic Shop,BTS,2023,180000,US\n\
             Mikrokosmos,BTS,,240000,\n",
        )
        .unwrap();

        let table = load_dataset(&dir, "all_music").unwrap().unwrap();
        assert_eq!(table.columns, vec!["track", "artist", "year", "ms_played", "country"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[0]["year"], Value::Integer(2023));
        assert_eq!(table.rows[0]["ms_played"], Value::Integer(180000));
        assert_eq!(table.rows[0]["artist"], Value::String("BTS".into()));
        assert!(table.rows[1]["year"].is_null());
        assert!(table.rows[1]["country"].is_null());
    }

    #[test]
    fn parquet_is_preferred_over_csv() {
        let dir = scratch_dir("order");
        write_music_parquet(
            &dir.join("all_music.parquet"),
            &[Some("BTS")],
            &[Some(2023)],
        );
        std::fs::write(dir.join("all_music.csv"), "artist,year\nIU,2020\nIU,2021\n").unwrap();

        let table = load_dataset(&dir, "all_music").unwrap().unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows[0]["artist"], Value::String("BTS".into()));
    }

    #[test]
    fn parquet_types_and_nulls_survive_loading() {
        let dir = scratch_dir("types");
        write_music_parquet(
            &dir.join("all_music.parquet"),
            &[Some("BTS"), None],
            &[Some(2023), None],
        );

        let table = load_dataset(&dir, "all_music").unwrap().unwrap();
        assert_eq!(table.rows[0]["year"], Value::Integer(2023));
        assert!(table.rows[1]["artist"].is_null());
        assert!(table.rows[1]["year"].is_null());
    }

    #[test]
    fn store_memoizes_until_reset() {
        let dir = scratch_dir("memo");
        let csv_path = dir.join("all_music.csv");
        std::fs::write(&csv_path, "artist,year\nBTS,2023\n").unwrap();

        let mut store = DatasetStore::new(&dir);
        assert!(store.get("all_music").unwrap().is_some());

        // Deleting the file must not evict the cached table.
        std::fs::remove_file(&csv_path).unwrap();
        assert!(store.get("all_music").unwrap().is_some());

        store.reset();
        assert!(store.get("all_music").unwrap().is_none());
    }

    #[test]
    fn absent_result_is_cached_too() {
        let dir = scratch_dir("negative");
        let mut store = DatasetStore::new(&dir);
        assert!(store.get("clustered_sessions").unwrap().is_none());

        // The file appearing later is invisible until a reset, same as a
        // table going stale.
        std::fs::write(dir.join("clustered_sessions.csv"), "cluster\n0\n").unwrap();
        assert!(store.get("clustered_sessions").unwrap().is_none());
        store.reset();
        assert!(store.get("clustered_sessions").unwrap().is_some());
    }
}
