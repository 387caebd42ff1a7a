//! Numeric CSV loading.
//!
//! Supported format:
//! - UTF-8, comma-separated, one example per line
//! - Optional header row (auto-detected: the first row is a header if any
//!   cell is non-numeric)
//! - The last `n_outputs` columns are the desired outputs, the rest are inputs
//! - Blank lines are skipped

use std::path::Path;

use crate::data::Dataset;
use crate::error::{NetworkError, Result};

/// Reads and parses a CSV file; the dataset is named after the file stem.
pub fn load_csv(path: &Path, n_outputs: usize) -> Result<Dataset> {
    let text = std::fs::read_to_string(path)?;
    let name = path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "csv".to_owned());
    parse_csv(&text, n_outputs, &name)
}

pub fn parse_csv(text: &str, n_outputs: usize, name: &str) -> Result<Dataset> {
    if n_outputs == 0 {
        return Err(NetworkError::Dataset("at least one output column is required".into()));
    }

    let mut lines = text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .peekable();

    if let Some((_, first)) = lines.peek() {
        if is_header(first) {
            lines.next();
        }
    }

    let mut inputs: Vec<Vec<f64>> = Vec::new();
    let mut outputs: Vec<Vec<f64>> = Vec::new();
    let mut width: Option<usize> = None;

    for (idx, line) in lines {
        let row_num = idx + 1;
        let values = parse_floats(line, row_num)?;

        match width {
            None => width = Some(values.len()),
            Some(w) if w != values.len() => {
                return Err(NetworkError::Dataset(format!(
                    "Row {row_num}: expected {w} columns, found {}",
                    values.len()
                )));
            }
            Some(_) => {}
        }
        if values.len() <= n_outputs {
            return Err(NetworkError::Dataset(format!(
                "Row {row_num}: {} columns leave no inputs for {n_outputs} output column(s)",
                values.len()
            )));
        }

        let split = values.len() - n_outputs;
        outputs.push(values[split..].to_vec());
        inputs.push(values[..split].to_vec());
    }

    if inputs.is_empty() {
        return Err(NetworkError::Dataset("CSV contains no data rows".into()));
    }

    Ok(Dataset { name: name.to_owned(), inputs, outputs })
}

/// A row is a header if any non-empty cell fails to parse as a number.
fn is_header(line: &str) -> bool {
    line.split(',')
        .map(str::trim)
        .any(|cell| !cell.is_empty() && cell.parse::<f64>().is_err())
}

fn parse_floats(line: &str, row_num: usize) -> Result<Vec<f64>> {
    line.split(',')
        .map(|cell| {
            let cell = cell.trim();
            cell.parse::<f64>().map_err(|_| {
                NetworkError::Dataset(format!("Row {row_num}: '{cell}' is not a valid number"))
            })
        })
        .collect()
}
