//! JSON result writer for evaluation reports.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tally_metrics::EvaluationReport;
use tracing::{debug, info, instrument};

use crate::domain::ExperimentName;
use crate::IoError;

/// Writes evaluation reports to JSON files.
///
/// Creates the output directory on construction if it does not exist.
/// Output files are named `{experiment}_evaluate.json`.
pub struct ResultWriter {
    output_dir: PathBuf,
    experiment: ExperimentName,
}

impl ResultWriter {
    /// Create a new writer targeting the given directory and experiment name.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::OutputDirCreate`] if the directory cannot be created.
    #[instrument(skip_all, fields(dir = %output_dir.display(), experiment = %experiment))]
    pub fn new(output_dir: &Path, experiment: ExperimentName) -> Result<Self, IoError> {
        fs::create_dir_all(output_dir).map_err(|e| IoError::OutputDirCreate {
            path: output_dir.to_path_buf(),
            source: e,
        })?;
        debug!("output directory ready");
        Ok(Self {
            output_dir: output_dir.to_path_buf(),
            experiment,
        })
    }

    /// Write one report per prediction run to `{experiment}_evaluate.json`.
    ///
    /// `class_names[i]` names class `i` of every report. Returns the path
    /// of the written file.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`IoError::Serialize`] | A report cannot be encoded as JSON |
    /// | [`IoError::WriteFile`] | The file cannot be written |
    #[instrument(skip_all, fields(n_runs = runs.len()))]
    pub fn write_evaluation(
        &self,
        class_names: &[String],
        runs: &[(&str, &EvaluationReport)],
    ) -> Result<PathBuf, IoError> {
        let path = self.evaluation_path();

        let artifact = EvaluateArtifact {
            experiment: self.experiment.as_str(),
            n_samples: runs.first().map_or(0, |(_, r)| r.n_samples),
            class_names,
            runs: runs
                .iter()
                .map(|&(name, report)| RunEntry { name, report })
                .collect(),
        };

        let json = serde_json::to_string_pretty(&artifact).map_err(|e| IoError::Serialize {
            path: path.clone(),
            source: e,
        })?;
        fs::write(&path, &json).map_err(|e| IoError::WriteFile {
            path: path.clone(),
            source: e,
        })?;

        info!(path = %path.display(), "evaluation result written");
        Ok(path)
    }

    /// Return the path of the evaluation artifact.
    ///
    /// Does not write anything, just computes `{output_dir}/{experiment}_evaluate.json`.
    #[must_use]
    pub fn evaluation_path(&self) -> PathBuf {
        self.output_dir
            .join(format!("{}_evaluate.json", self.experiment.as_str()))
    }
}

// --- Shadow structs for JSON serialization ---

#[derive(Serialize)]
struct EvaluateArtifact<'a> {
    experiment: &'a str,
    n_samples: usize,
    class_names: &'a [String],
    runs: Vec<RunEntry<'a>>,
}

#[derive(Serialize)]
struct RunEntry<'a> {
    name: &'a str,
    #[serde(flatten)]
    report: &'a EvaluationReport,
}
