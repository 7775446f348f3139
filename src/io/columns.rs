//! Two-column numeric file parsing.
//!
//! Every external data file in this project (scale-factor evolution,
//! detector sensitivity curves, computed spectra) is a two-column numeric
//! table. Delimiters vary by provenance: detector curves are usually
//! comma-separated exports, evolution tables whitespace-separated. We sniff
//! the delimiter from the first data line: commas go through the csv reader,
//! anything else is split on whitespace. Blank lines and `#` comments are
//! skipped either way.

use std::fs;
use std::path::Path;

use crate::error::AppError;

/// Load a two-column numeric file as parallel vectors.
pub fn load_two_columns(path: &Path) -> Result<(Vec<f64>, Vec<f64>), AppError> {
    let raw = fs::read_to_string(path)
        .map_err(|e| AppError::config(format!("Failed to read '{}': {e}", path.display())))?;

    let first_data_line = raw
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty() && !l.starts_with('#'));
    let Some(first) = first_data_line else {
        return Err(AppError::domain(format!(
            "'{}' contains no data rows.",
            path.display()
        )));
    };

    if first.contains(',') {
        parse_csv(&raw, path)
    } else {
        parse_whitespace(&raw, path)
    }
}

fn parse_csv(raw: &str, path: &Path) -> Result<(Vec<f64>, Vec<f64>), AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(raw.as_bytes());

    let mut xs = Vec::new();
    let mut ys = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record =
            record.map_err(|e| AppError::domain(format!("'{}': {e}", path.display())))?;
        if record.iter().all(|f| f.is_empty()) {
            continue;
        }
        let (x, y) = parse_pair(record.get(0), record.get(1), path, idx + 1)?;
        xs.push(x);
        ys.push(y);
    }
    ensure_rows(&xs, path)?;
    Ok((xs, ys))
}

fn parse_whitespace(raw: &str, path: &Path) -> Result<(Vec<f64>, Vec<f64>), AppError> {
    let mut xs = Vec::new();
    let mut ys = Vec::new();
    for (idx, line) in raw.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut fields = line.split_whitespace();
        let (x, y) = parse_pair(fields.next(), fields.next(), path, idx + 1)?;
        xs.push(x);
        ys.push(y);
    }
    ensure_rows(&xs, path)?;
    Ok((xs, ys))
}

fn parse_pair(
    a: Option<&str>,
    b: Option<&str>,
    path: &Path,
    line: usize,
) -> Result<(f64, f64), AppError> {
    let parse = |field: Option<&str>, col: &str| {
        field
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                AppError::domain(format!(
                    "'{}' line {line}: missing {col} column.",
                    path.display()
                ))
            })?
            .parse::<f64>()
            .map_err(|e| {
                AppError::domain(format!(
                    "'{}' line {line}: bad {col} value: {e}",
                    path.display()
                ))
            })
    };
    Ok((parse(a, "first")?, parse(b, "second")?))
}

fn ensure_rows(xs: &[f64], path: &Path) -> Result<(), AppError> {
    if xs.is_empty() {
        return Err(AppError::domain(format!(
            "'{}' contains no data rows.",
            path.display()
        )));
    }
    Ok(())
}
