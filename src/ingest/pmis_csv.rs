/// PMIS condition export reader
///
/// Reads the CSV exported from the Texas Pavement Management Information
/// System and turns each row into a `Record`. Only three columns matter:
/// the signed highway roadbed id, the county, and a score column whose
/// name is configurable. Everything else in the export is ignored.
///
/// Header presence is checked before any data row is read so a renamed or
/// missing column fails immediately with the list of headers that were found.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::model::{AnalysisError, Record, COL_COUNTY, COL_HIGHWAY_ID};

// ============================================================================
// Missing-value handling
// ============================================================================

/// Cell values treated as missing, matching the NA tokens the export has
/// historically been read with.
pub const NA_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan",
    "1.#IND", "1.#QNAN", "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a",
    "nan", "null",
];

/// Returns `true` if a (trimmed) cell should be read as missing.
pub fn is_na_token(value: &str) -> bool {
    NA_TOKENS.contains(&value.trim())
}

/// Reads an identifier cell; missing cells become `None`.
fn text_field(value: Option<&str>) -> Option<String> {
    match value {
        Some(v) if !is_na_token(v) => Some(v.trim().to_string()),
        _ => None,
    }
}

/// Coerces a score cell to a number.
///
/// Anything that does not parse, and an explicit NaN, becomes `None`.
/// Non-numeric scores are data-quality noise, not errors.
pub fn coerce_score(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if is_na_token(trimmed) {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| !v.is_nan())
}

// ============================================================================
// Numeric identifier columns
// ============================================================================

/// Canonical spelling of a numeric identifier: `01`, `1` and `1.0` all
/// read as `1`.
fn canonical_number(value: &str) -> Option<String> {
    let n = value.parse::<f64>().ok().filter(|v| v.is_finite())?;
    Some(format!("{}", n))
}

fn highway_id_field(record: &mut Record) -> &mut Option<String> {
    &mut record.highway_id
}

fn county_field(record: &mut Record) -> &mut Option<String> {
    &mut record.county
}

/// Rewrite an identifier column into canonical numbers when every present
/// value in it is numeric. A column with any non-numeric value is left as
/// text, so `0035` stays distinct from `35` next to values like `IH0035 K`.
fn normalize_numeric_column<F>(records: &mut [Record], field: F)
where
    F: Fn(&mut Record) -> &mut Option<String>,
{
    let numeric = records
        .iter_mut()
        .all(|r| field(r).as_deref().is_none_or(|v| canonical_number(v).is_some()));
    if !numeric {
        return;
    }

    for record in records.iter_mut() {
        let value = field(record);
        if let Some(canonical) = value.as_deref().and_then(canonical_number) {
            *value = Some(canonical);
        }
    }
}

// ============================================================================
// Load results
// ============================================================================

/// Row counts gathered while loading, for logging and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    /// Data rows read (header excluded).
    pub total_rows: usize,
    /// Rows missing a highway id or county.
    pub missing_key_rows: usize,
    /// Rows whose score is missing or not numeric.
    pub missing_scores: usize,
}

/// Every row of the export, in file order, plus load statistics.
#[derive(Debug, Clone, Default)]
pub struct PmisExport {
    pub records: Vec<Record>,
    pub stats: LoadStats,
}

/// Column positions resolved from the header row.
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    highway_id: usize,
    county: usize,
    score: usize,
}

impl ColumnIndex {
    fn resolve(headers: &StringRecord, score_column: &str) -> Result<Self, AnalysisError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| AnalysisError::MissingColumn {
                    column: name.to_string(),
                    available: headers.iter().map(String::from).collect(),
                })
        };

        Ok(ColumnIndex {
            highway_id: find(COL_HIGHWAY_ID)?,
            county: find(COL_COUNTY)?,
            score: find(score_column)?,
        })
    }
}

// ============================================================================
// Readers
// ============================================================================

/// Load a PMIS export from disk.
///
/// # Errors
/// - `FileNotFound` if nothing exists at `path`
/// - `MissingColumn` if a required header is absent
/// - `Csv` / `Io` for malformed or unreadable input
pub fn load_records(path: &Path, score_column: &str) -> Result<PmisExport, AnalysisError> {
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => AnalysisError::FileNotFound(path.display().to_string()),
        _ => AnalysisError::from(e),
    })?;

    read_records(file, score_column)
}

/// Read a PMIS export from any reader.
///
/// Short rows are tolerated: absent trailing cells read as missing.
/// Identifier columns holding only numbers are compared as numbers.
pub fn read_records<R: Read>(reader: R, score_column: &str) -> Result<PmisExport, AnalysisError> {
    let mut rdr = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    let columns = ColumnIndex::resolve(rdr.headers()?, score_column)?;

    let mut export = PmisExport::default();
    let mut row = StringRecord::new();

    while rdr.read_record(&mut row)? {
        let record = Record {
            highway_id: text_field(row.get(columns.highway_id)),
            county: text_field(row.get(columns.county)),
            score: row.get(columns.score).and_then(coerce_score),
        };

        export.stats.total_rows += 1;
        if record.heatmap_key().is_none() {
            export.stats.missing_key_rows += 1;
        }
        if record.score.is_none() {
            export.stats.missing_scores += 1;
        }

        export.records.push(record);
    }

    normalize_numeric_column(&mut export.records, highway_id_field);
    normalize_numeric_column(&mut export.records, county_field);

    Ok(export)
}

// ============================================================================
// Tests
// ============================================================================
