//! Domain types for tally-io.

use crate::IoError;

/// A validated experiment name for output file naming.
///
/// Must match `[a-zA-Z0-9_-]+`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperimentName(String);

impl ExperimentName {
    /// Parse and validate an experiment name.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::InvalidExperimentName`] if the name is empty or
    /// contains characters outside `[a-zA-Z0-9_-]`.
    pub fn new(name: String) -> Result<Self, IoError> {
        if name.is_empty()
            || !name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(IoError::InvalidExperimentName { name });
        }
        Ok(Self(name))
    }

    /// Return the experiment name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ExperimentName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Song records read from a lyrics file.
///
/// Produced by [`LyricsReader`](crate::LyricsReader). Artists, titles and
/// token lists are parallel vectors: `artists[i]` wrote `titles[i]`, whose
/// lyrics tokenize to `tokenized_lyrics[i]`.
#[derive(Debug)]
pub struct LyricsDataset {
    artists: Vec<String>,
    titles: Vec<String>,
    tokenized_lyrics: Vec<Vec<String>>,
}

impl LyricsDataset {
    pub(crate) fn new(
        artists: Vec<String>,
        titles: Vec<String>,
        tokenized_lyrics: Vec<Vec<String>>,
    ) -> Self {
        Self {
            artists,
            titles,
            tokenized_lyrics,
        }
    }

    /// Return the artist of every record, in file order.
    #[must_use]
    pub fn artists(&self) -> &[String] {
        &self.artists
    }

    /// Return the song title of every record, in file order.
    #[must_use]
    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    /// Return the lyrics tokens of every record, in file order.
    #[must_use]
    pub fn tokenized_lyrics(&self) -> &[Vec<String>] {
        &self.tokenized_lyrics
    }

    /// Return the number of records.
    #[must_use]
    pub fn n_records(&self) -> usize {
        self.artists.len()
    }

    /// Return the total number of tokens across all records.
    #[must_use]
    pub fn n_tokens(&self) -> usize {
        self.tokenized_lyrics.iter().map(Vec::len).sum()
    }
}

/// One named column of predicted labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictionRun {
    /// Column name from the header.
    pub name: String,
    /// Predicted labels, aligned with the gold column.
    pub labels: Vec<String>,
}

/// Gold labels plus one or more aligned prediction runs.
///
/// Produced by [`PredictionReader`](crate::PredictionReader).
#[derive(Debug)]
pub struct PredictionTable {
    /// Gold labels in row order.
    pub gold: Vec<String>,
    /// Prediction runs in header order.
    pub runs: Vec<PredictionRun>,
}

impl PredictionTable {
    /// Return the number of rows.
    #[must_use]
    pub fn n_samples(&self) -> usize {
        self.gold.len()
    }
}
