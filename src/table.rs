use std::path::Path;

use anyhow::{anyhow, Context, Result};
use log::warn;

use crate::signal::Signal;

/// Reads one named numeric column out of a CSV file. NaN/Inf cells are
/// replaced with 0.0 so only finite samples reach the engine.
pub fn load_column<P: AsRef<Path>>(path: P, column: &str) -> Result<Vec<f64>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let mut lines = content.lines();

    let header = lines.next().ok_or_else(|| anyhow!("{} is empty", path.display()))?;
    let col_idx = header
        .split(',')
        .position(|c| c.trim() == column)
        .ok_or_else(|| anyhow!("Column '{}' not found in {}", column, path.display()))?;

    let mut values = Vec::new();
    let mut cleaned = 0usize;
    for (line_no, line) in lines.enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let cell = line
            .split(',')
            .nth(col_idx)
            .ok_or_else(|| anyhow!("Row {} has no column '{}'", line_no + 2, column))?
            .trim();
        let value: f64 = cell
            .parse()
            .with_context(|| format!("Bad value '{}' in column '{}' at row {}", cell, column, line_no + 2))?;
        if value.is_finite() {
            values.push(value);
        } else {
            cleaned += 1;
            values.push(0.0);
        }
    }

    if cleaned > 0 {
        warn!(
            "Column '{}' in {} contained {} NaN/Inf values, replaced with 0",
            column,
            path.display(),
            cleaned
        );
    }
    Ok(values)
}

/// Signal column plus optional time column from the same file. A missing
/// time column falls back to index time instead of failing the load.
pub fn load_signal<P: AsRef<Path>>(path: P, column: &str, time_column: Option<&str>) -> Result<Signal> {
    let path = path.as_ref();
    let samples = load_column(path, column)?;

    if let Some(time_col) = time_column {
        match load_column(path, time_col) {
            Ok(time) => return Ok(Signal::with_time(samples, time)),
            Err(e) => warn!("Time column unusable ({e}), using indices for the time axis"),
        }
    }
    Ok(Signal::from_samples(samples))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_named_column() {
        let path = write_temp("pulsekit_table_basic.csv", "t,amp\n0.0,1.5\n0.1,2.5\n");
        let values = load_column(&path, "amp").unwrap();
        assert_eq!(values, vec![1.5, 2.5]);
    }

    #[test]
    fn test_missing_column_errors() {
        let path = write_temp("pulsekit_table_missing.csv", "t,amp\n0.0,1.5\n");
        assert!(load_column(&path, "volts").is_err());
    }

    #[test]
    fn test_non_finite_cells_sanitized() {
        let path = write_temp("pulsekit_table_nan.csv", "amp\n1.0\nNaN\ninf\n2.0\n");
        let values = load_column(&path, "amp").unwrap();
        assert_eq!(values, vec![1.0, 0.0, 0.0, 2.0]);
    }

    #[test]
    fn test_load_signal_with_time_column() {
        let path = write_temp("pulsekit_table_time.csv", "t,amp\n10.0,1.0\n10.5,2.0\n");
        let sig = load_signal(&path, "amp", Some("t")).unwrap();
        assert_eq!(sig.samples, vec![1.0, 2.0]);
        assert_eq!(sig.time, vec![10.0, 10.5]);
    }

    #[test]
    fn test_absent_time_column_falls_back_to_indices() {
        let path = write_temp("pulsekit_table_notime.csv", "amp\n1.0\n2.0\n");
        let sig = load_signal(&path, "amp", Some("t")).unwrap();
        assert_eq!(sig.time, vec![0.0, 1.0]);
    }
}
