use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::model::{CellValue, Dataset, Indicator, Record};

pub const STATE_COLUMN: &str = "Estado";
pub const YEAR_COLUMN: &str = "ano";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("data file not found; searched:\n{}", list_paths(.tried))]
    NotFound { tried: Vec<PathBuf> },

    #[error("reading {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),

    /// `line` is the 1-based file line, header included.
    #[error("line {line}: column '{column}' has non-numeric value '{value}'")]
    InvalidNumber {
        line: usize,
        column: &'static str,
        value: String,
    },

    #[error("line {line}: year '{value}' is not an integer")]
    InvalidYear { line: usize, value: String },
}

/// Cell contents read as a missing value, alongside the empty cell.
const NA_TOKENS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

fn list_paths(paths: &[PathBuf]) -> String {
    let mut out = String::new();
    for (i, p) in paths.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", i + 1, p.display());
    }
    out
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// First candidate that exists on disk, in order.
pub fn first_existing(candidates: &[PathBuf]) -> Option<&Path> {
    candidates.iter().map(PathBuf::as_path).find(|p| p.exists())
}

/// Load the dataset from the first existing candidate path.
pub fn load_dataset(candidates: &[PathBuf]) -> Result<Dataset, LoadError> {
    let path = first_existing(candidates).ok_or_else(|| LoadError::NotFound {
        tried: candidates.to_vec(),
    })?;
    load_csv(path)
}

/// Parse a `;`-separated file into a [`Dataset`].
///
/// Indicator columns have their decimal commas turned into points before
/// parsing.  Indicator columns that are not in the header are skipped.
/// `Estado` and `ano` are required.
pub fn load_csv(path: &Path) -> Result<Dataset, LoadError> {
    let csv_err = |source| LoadError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .from_path(path)
        .map_err(csv_err)?;
    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_err)?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let state_idx = column_index(&headers, STATE_COLUMN)?;
    let year_idx = column_index(&headers, YEAR_COLUMN)?;

    // Column position → indicator, for the indicators present.
    let indicator_cols: BTreeMap<usize, Indicator> = headers
        .iter()
        .enumerate()
        .filter_map(|(i, h)| Indicator::from_column(h).map(|ind| (i, ind)))
        .collect();

    let mut records = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let row = result.map_err(csv_err)?;
        let line = row_no + 2;

        let estado = row.get(state_idx).unwrap_or("").to_string();
        let raw_year = row.get(year_idx).unwrap_or("").trim();
        let ano = raw_year
            .parse::<i32>()
            .map_err(|_| LoadError::InvalidYear {
                line,
                value: raw_year.to_string(),
            })?;

        let mut indicators = BTreeMap::new();
        let mut extra = BTreeMap::new();
        for (col_idx, value) in row.iter().enumerate() {
            if col_idx == state_idx || col_idx == year_idx {
                continue;
            }
            match indicator_cols.get(&col_idx) {
                Some(&ind) => {
                    if let Some(v) = parse_decimal(value, line, ind)? {
                        indicators.insert(ind, v);
                    }
                }
                None => {
                    if let Some(name) = headers.get(col_idx) {
                        extra.insert(name.clone(), CellValue::guess(value));
                    }
                }
            }
        }

        records.push(Record::new(estado, ano, indicators, extra));
    }

    log::info!(
        "Loaded {} records from {} ({} indicator columns)",
        records.len(),
        path.display(),
        indicator_cols.len()
    );

    Ok(Dataset::new(records, headers, path.to_path_buf()))
}

fn column_index(headers: &[String], name: &'static str) -> Result<usize, LoadError> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or(LoadError::MissingColumn(name))
}

/// `"0,75"` → `0.75`.  Empty cells, NA tokens and non-finite values are
/// missing values.
fn parse_decimal(s: &str, line: usize, ind: Indicator) -> Result<Option<f64>, LoadError> {
    let s = s.trim();
    if s.is_empty() || NA_TOKENS.contains(&s) {
        return Ok(None);
    }
    let v = s
        .replace(',', ".")
        .parse::<f64>()
        .map_err(|_| LoadError::InvalidNumber {
            line,
            column: ind.column(),
            value: s.to_string(),
        })?;
    Ok(v.is_finite().then_some(v))
}
