//! CSV reader for gold labels and aligned prediction runs.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use crate::domain::{PredictionRun, PredictionTable};
use crate::IoError;

/// Reads a prediction table from a CSV file.
///
/// Expected CSV format:
/// - Header row required: `gold,<run_1>,...,<run_m>` (m >= 1)
/// - One row per sample, all rows with the header's column count
/// - Cells are string class labels; surrounding whitespace is trimmed
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`IoError::FileNotFound`] | File doesn't exist or is unreadable |
/// | [`IoError::CsvParse`] | Malformed CSV record |
/// | [`IoError::MissingPredictionColumn`] | Header has fewer than 2 columns |
/// | [`IoError::InconsistentRowLength`] | Row has different column count than header |
/// | [`IoError::EmptyDataset`] | Zero data rows after header |
pub struct PredictionReader {
    path: PathBuf,
}

impl PredictionReader {
    /// Create a new reader for the given CSV file path.
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// Read and validate the CSV file, returning a [`PredictionTable`].
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn read(&self) -> Result<PredictionTable, IoError> {
        let file = std::fs::File::open(&self.path).map_err(|e| IoError::FileNotFound {
            path: self.path.clone(),
            source: e,
        })?;

        // flexible(true) so that our own InconsistentRowLength check fires
        // instead of a low-level CsvParse error.
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(file);

        let header = rdr.headers().map_err(|e| self.parse_error(e))?.clone();
        let expected_cols = header.len();
        if expected_cols < 2 {
            return Err(IoError::MissingPredictionColumn {
                path: self.path.clone(),
                columns: expected_cols,
            });
        }
        debug!(n_runs = expected_cols - 1, "read CSV header");

        let mut gold = Vec::new();
        let mut runs: Vec<PredictionRun> = header
            .iter()
            .skip(1)
            .map(|name| PredictionRun {
                name: name.to_string(),
                labels: Vec::new(),
            })
            .collect();

        for (row_index, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| self.parse_error(e))?;
            if record.len() != expected_cols {
                return Err(IoError::InconsistentRowLength {
                    path: self.path.clone(),
                    row_index,
                    expected: expected_cols,
                    got: record.len(),
                });
            }

            let mut cells = record.iter();
            if let Some(label) = cells.next() {
                gold.push(label.to_string());
            }
            for (run, label) in runs.iter_mut().zip(cells) {
                run.labels.push(label.to_string());
            }
        }

        if gold.is_empty() {
            return Err(IoError::EmptyDataset {
                path: self.path.clone(),
            });
        }

        info!(n_samples = gold.len(), n_runs = runs.len(), "prediction table loaded");
        Ok(PredictionTable { gold, runs })
    }

    fn parse_error(&self, e: csv::Error) -> IoError {
        IoError::CsvParse {
            path: self.path.clone(),
            offset: e.position().map_or(0, |p| p.byte()),
            source: e,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(content: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f.flush().unwrap();
        f
    }

    #[test]
    fn read_two_runs() {
        let csv = "gold,bow,baseline\nabba,abba,queen\nqueen,abba,queen\ntoto,toto,queen\n";
        let f = write_csv(csv);
        let table = PredictionReader::new(f.path()).read().unwrap();
        assert_eq!(table.n_samples(), 3);
        assert_eq!(table.gold, ["abba", "queen", "toto"]);
        assert_eq!(table.runs.len(), 2);
        assert_eq!(table.runs[0].name, "bow");
        assert_eq!(table.runs[0].labels, ["abba", "abba", "toto"]);
        assert_eq!(table.runs[1].name, "baseline");
        assert_eq!(table.runs[1].labels, ["queen", "queen", "queen"]);
    }

    #[test]
    fn cells_are_trimmed() {
        let csv = "gold, run\n abba , abba\n";
        let f = write_csv(csv);
        let table = PredictionReader::new(f.path()).read().unwrap();
        assert_eq!(table.gold[0], "abba");
        assert_eq!(table.runs[0].name, "run");
    }

    #[test]
    fn error_missing_prediction_column() {
        let f = write_csv("gold\nabba\n");
        let result = PredictionReader::new(f.path()).read();
        assert!(matches!(
            result,
            Err(IoError::MissingPredictionColumn { columns: 1, .. })
        ));
    }

    #[test]
    fn error_inconsistent_row_length() {
        let csv = "gold,run\nabba,abba\nqueen\n";
        let f = write_csv(csv);
        let result = PredictionReader::new(f.path()).read();
        assert!(matches!(
            result,
            Err(IoError::InconsistentRowLength {
                row_index: 1,
                expected: 2,
                got: 1,
                ..
            })
        ));
    }

    #[test]
    fn error_empty_dataset() {
        let f = write_csv("gold,run\n");
        let result = PredictionReader::new(f.path()).read();
        assert!(matches!(result, Err(IoError::EmptyDataset { .. })));
    }

    #[test]
    fn error_file_not_found() {
        let result = PredictionReader::new(Path::new("/nonexistent/preds.csv")).read();
        assert!(matches!(result, Err(IoError::FileNotFound { .. })));
    }
}
