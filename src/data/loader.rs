use std::path::{Path, PathBuf};

use arrow::array::Array;
use arrow::util::display::array_value_to_string;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use thiserror::Error;

use super::model::{Dataset, LaunchRecord, Outcome, RowError};

/// File the dashboard reads when no path is configured.
pub const DEFAULT_DATA_PATH: &str = "spacex_launch_dash.csv";

pub const COL_SITE: &str = "Launch Site";
pub const COL_PAYLOAD: &str = "Payload Mass (kg)";
pub const COL_CLASS: &str = "class";
pub const COL_BOOSTER: &str = "Booster Version Category";

const REQUIRED_COLUMNS: [&str; 4] = [COL_SITE, COL_PAYLOAD, COL_CLASS, COL_BOOSTER];

/// How many individual row errors a [`LoadReport`] keeps.
const MAX_REPORTED_ERRORS: usize = 10;

// ---------------------------------------------------------------------------
// Errors and load results
// ---------------------------------------------------------------------------

/// File-level failure. Any of these sends [`load`] to the fallback table.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parquet: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Arrow: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("unexpected layout: {0}")]
    Layout(String),

    #[error("no valid launch records ({skipped} rows skipped)")]
    NoValidRows { skipped: usize },
}

/// A source row rejected during loading.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRow {
    /// 1-based data row number (header excluded).
    pub row: usize,
    pub error: RowError,
}

/// Data-integrity summary of a load.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    pub skipped_rows: usize,
    /// The first few rejected rows.
    pub errors: Vec<SkippedRow>,
}

impl LoadReport {
    fn record(&mut self, row: usize, error: RowError) {
        log::debug!("Skipping row {row}: {error}");
        self.skipped_rows += 1;
        if self.errors.len() < MAX_REPORTED_ERRORS {
            self.errors.push(SkippedRow { row, error });
        }
    }
}

/// Where the loaded records came from.
#[derive(Debug, Clone, PartialEq)]
pub enum DataSource {
    File(PathBuf),
    Fallback { reason: String },
}

/// Result of [`load`]: the dataset plus provenance and diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded {
    pub dataset: Dataset,
    pub source: DataSource,
    pub report: LoadReport,
}

impl Loaded {
    pub fn is_fallback(&self) -> bool {
        matches!(self.source, DataSource::Fallback { .. })
    }

    /// One-line diagnostic for the status bar, if anything went wrong.
    pub fn diagnostic(&self) -> Option<String> {
        match &self.source {
            DataSource::Fallback { reason } => {
                Some(format!("Using built-in sample data: {reason}"))
            }
            DataSource::File(path) if self.report.skipped_rows > 0 => Some(format!(
                "{}: skipped {} malformed rows",
                path.display(),
                self.report.skipped_rows
            )),
            DataSource::File(_) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load launch records, substituting the built-in table on any failure.
pub fn load(path: &Path) -> Loaded {
    match try_load(path) {
        Ok(loaded) => loaded,
        Err(e) => {
            log::warn!(
                "Could not load launch records from {}: {e}; using built-in fallback data",
                path.display()
            );
            Loaded {
                dataset: fallback_dataset(),
                source: DataSource::Fallback {
                    reason: e.to_string(),
                },
                report: LoadReport::default(),
            }
        }
    }
}

/// Load launch records from a file. Dispatch by extension.
///
/// Supported formats:
/// * `.parquet` / `.pq` – flat columns named like the CSV header
/// * `.json`            – `[{ "Launch Site": ..., "class": 1, ... }, ...]`
/// * anything else      – CSV with a header row
///
/// Malformed rows are skipped and counted; a file without any valid row is
/// an error.
pub fn try_load(path: &Path) -> Result<Loaded, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let (records, report) = match ext.as_str() {
        "parquet" | "pq" => load_parquet(path)?,
        "json" => load_json(path)?,
        _ => load_csv(path)?,
    };

    if records.is_empty() {
        return Err(LoadError::NoValidRows {
            skipped: report.skipped_rows,
        });
    }
    if report.skipped_rows > 0 {
        log::warn!(
            "{}: skipped {} malformed rows",
            path.display(),
            report.skipped_rows
        );
    }

    let dataset = Dataset::from_records(records);
    log::info!(
        "Loaded {} launch records from {} ({} sites, payload {}..={} kg)",
        dataset.len(),
        path.display(),
        dataset.site_names().len(),
        dataset.min_payload(),
        dataset.max_payload()
    );

    Ok(Loaded {
        dataset,
        source: DataSource::File(path.to_path_buf()),
        report,
    })
}

/// The four-row table used when the data file cannot be read. Covers
/// several sites and both outcomes.
pub fn fallback_dataset() -> Dataset {
    let rows = [
        ("CCAFS LC-40", 500.0, Outcome::Failure, "v1.0"),
        ("VAFB SLC-4E", 600.0, Outcome::Success, "v1.1"),
        ("KSC LC-39A", 700.0, Outcome::Success, "FT"),
        ("CCAFS SLC-40", 800.0, Outcome::Failure, "v1.0"),
    ];
    Dataset::from_records(
        rows.into_iter()
            .map(|(site, kg, outcome, booster)| LaunchRecord {
                site: site.to_string(),
                payload_mass_kg: kg,
                outcome,
                booster_category: booster.to_string(),
            })
            .collect(),
    )
}

// ---------------------------------------------------------------------------
// Row conversion shared by all formats
// ---------------------------------------------------------------------------

/// One source row with every cell still as text.
#[derive(Debug, Default, Deserialize)]
struct RawRow {
    #[serde(rename = "Launch Site")]
    site: Option<String>,
    #[serde(rename = "Payload Mass (kg)")]
    payload: Option<String>,
    #[serde(rename = "class")]
    class: Option<String>,
    #[serde(rename = "Booster Version Category")]
    booster: Option<String>,
}

impl RawRow {
    fn into_record(self) -> Result<LaunchRecord, RowError> {
        let site = self.site.ok_or(RowError::MissingField(COL_SITE))?;
        let payload_raw = self.payload.ok_or(RowError::MissingField(COL_PAYLOAD))?;
        let class_raw = self.class.ok_or(RowError::MissingField(COL_CLASS))?;
        let booster = self.booster.ok_or(RowError::MissingField(COL_BOOSTER))?;

        let payload = payload_raw
            .trim()
            .parse::<f64>()
            .map_err(|_| RowError::InvalidPayload(payload_raw.clone()))?;
        let outcome = Outcome::parse_class(&class_raw)?;

        LaunchRecord::new(site.trim(), payload, outcome, booster.trim())
    }
}

fn collect_rows<I>(rows: I) -> (Vec<LaunchRecord>, LoadReport)
where
    I: IntoIterator<Item = Result<RawRow, RowError>>,
{
    let mut records = Vec::new();
    let mut report = LoadReport::default();
    for (i, row) in rows.into_iter().enumerate() {
        match row.and_then(RawRow::into_record) {
            Ok(rec) => records.push(rec),
            Err(e) => report.record(i + 1, e),
        }
    }
    (records, report)
}

fn require_columns(mut present: impl FnMut(&str) -> bool) -> Result<(), LoadError> {
    for col in REQUIRED_COLUMNS {
        if !present(col) {
            return Err(LoadError::MissingColumn(col));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with at least the four required columns, in any
/// order. Extra columns are ignored; cells are trimmed and empty cells count
/// as missing.
fn load_csv(path: &Path) -> Result<(Vec<LaunchRecord>, LoadReport), LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)?;
    let headers = reader.headers()?.clone();
    require_columns(|col| headers.iter().any(|h| h == col))?;

    let rows = reader
        .deserialize::<RawRow>()
        .map(|r| r.map_err(|e| RowError::Malformed(e.to_string())));
    Ok(collect_rows(rows))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON (`df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Launch Site": "KSC LC-39A", "Payload Mass (kg)": 2490.0,
///     "class": 1, "Booster Version Category": "FT" },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<(Vec<LaunchRecord>, LoadReport), LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let root: JsonValue = serde_json::from_str(&text)?;
    let records = root
        .as_array()
        .ok_or_else(|| LoadError::Layout("expected top-level JSON array".to_string()))?;

    if let Some(first) = records.iter().find_map(|r| r.as_object()) {
        require_columns(|col| first.contains_key(col))?;
    }

    let rows = records.iter().map(|rec| {
        let obj = rec
            .as_object()
            .ok_or_else(|| RowError::Malformed("not a JSON object".to_string()))?;
        Ok(RawRow {
            site: obj.get(COL_SITE).and_then(json_cell),
            payload: obj.get(COL_PAYLOAD).and_then(json_cell),
            class: obj.get(COL_CLASS).and_then(json_cell),
            booster: obj.get(COL_BOOSTER).and_then(json_cell),
        })
    });
    Ok(collect_rows(rows))
}

fn json_cell(val: &JsonValue) -> Option<String> {
    match val {
        JsonValue::Null => None,
        JsonValue::String(s) if s.is_empty() => None,
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        JsonValue::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Parquet with flat columns named like the CSV header. Payload may be any
/// numeric type, `class` numeric or boolean.
fn load_parquet(path: &Path) -> Result<(Vec<LaunchRecord>, LoadReport), LoadError> {
    let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    {
        let schema = builder.schema();
        require_columns(|col| schema.index_of(col).is_ok())?;
    }
    let reader = builder.build()?;

    let mut raw_rows = Vec::new();
    for batch_result in reader {
        let batch = batch_result?;
        let schema = batch.schema();
        let column = |name: &'static str| -> Result<_, LoadError> {
            let idx = schema
                .index_of(name)
                .map_err(|_| LoadError::MissingColumn(name))?;
            Ok(batch.column(idx).clone())
        };
        let site = column(COL_SITE)?;
        let payload = column(COL_PAYLOAD)?;
        let class = column(COL_CLASS)?;
        let booster = column(COL_BOOSTER)?;

        for row in 0..batch.num_rows() {
            raw_rows.push(Ok(RawRow {
                site: parquet_cell(site.as_ref(), row)?,
                payload: parquet_cell(payload.as_ref(), row)?,
                class: parquet_cell(class.as_ref(), row)?,
                booster: parquet_cell(booster.as_ref(), row)?,
            }));
        }
    }
    Ok(collect_rows(raw_rows))
}

fn parquet_cell(col: &dyn Array, row: usize) -> Result<Option<String>, LoadError> {
    if col.is_null(row) {
        return Ok(None);
    }
    let s = array_value_to_string(col, row)?;
    Ok(if s.is_empty() { None } else { Some(s) })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(site: &str, payload: &str, class: &str, booster: &str) -> RawRow {
        let cell = |s: &str| (!s.is_empty()).then(|| s.to_string());
        RawRow {
            site: cell(site),
            payload: cell(payload),
            class: cell(class),
            booster: cell(booster),
        }
    }

    #[test]
    fn raw_row_validation_classifies_errors() {
        assert!(raw("KSC LC-39A", "2490", "1", "FT").into_record().is_ok());
        assert_eq!(
            raw("KSC LC-39A", "heavy", "1", "FT").into_record(),
            Err(RowError::InvalidPayload("heavy".to_string()))
        );
        assert_eq!(
            raw("", "100", "1", "FT").into_record(),
            Err(RowError::MissingField(COL_SITE))
        );
        assert_eq!(
            raw("KSC LC-39A", "100", "3", "FT").into_record(),
            Err(RowError::InvalidOutcome("3".to_string()))
        );
        assert!(raw("KSC LC-39A", "-5", "0", "FT").into_record().is_err());
    }

    #[test]
    fn collect_rows_counts_skips_with_row_numbers() {
        let rows = vec![
            Ok(raw("A", "1", "1", "FT")),
            Ok(raw("A", "x", "1", "FT")),
            Err(RowError::Malformed("bad".into())),
            Ok(raw("B", "2", "0", "FT")),
        ];
        let (records, report) = collect_rows(rows);
        assert_eq!(records.len(), 2);
        assert_eq!(report.skipped_rows, 2);
        assert_eq!(report.errors[0].row, 2);
        assert_eq!(report.errors[1].row, 3);
    }

    #[test]
    fn report_caps_stored_errors() {
        let rows = (0..MAX_REPORTED_ERRORS + 5).map(|_| Ok(raw("A", "", "1", "FT")));
        let (records, report) = collect_rows(rows);
        assert!(records.is_empty());
        assert_eq!(report.skipped_rows, MAX_REPORTED_ERRORS + 5);
        assert_eq!(report.errors.len(), MAX_REPORTED_ERRORS);
    }

    #[test]
    fn fallback_has_several_sites_and_both_outcomes() {
        let ds = fallback_dataset();
        assert_eq!(ds.len(), 4);
        assert!(ds.site_names().len() > 1);
        assert!(ds.records().iter().any(|r| r.outcome == Outcome::Success));
        assert!(ds.records().iter().any(|r| r.outcome == Outcome::Failure));
        assert_eq!(ds.min_payload(), 500.0);
        assert_eq!(ds.max_payload(), 800.0);
    }

    #[test]
    fn missing_file_falls_back_with_reason() {
        let loaded = load(Path::new("/definitely/not/here/launches.csv"));
        assert!(loaded.is_fallback());
        assert_eq!(loaded.dataset, fallback_dataset());
        assert!(loaded.diagnostic().unwrap().starts_with("Using built-in sample data"));
    }
}
