//! Tab-separated lyrics record reader and tokenizer.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use crate::domain::LyricsDataset;
use crate::IoError;

/// Line-break marker embedded in the lyrics field.
const NEWLINE_MARKER: &str = " NEWLINE";

/// Reads song records from a tab-separated text file.
///
/// Expected format, one record per line and no header:
/// `artist<TAB>title<TAB>lyrics`, where line breaks inside the lyrics are
/// encoded as ` NEWLINE `.
///
/// Construct via [`LyricsReader::new`], then chain `with_*` methods.
///
/// # Defaults
///
/// | Parameter          | Default |
/// |--------------------|---------|
/// | `read_limit`       | 1000    |
/// | `keep_punctuation` | `false` |
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`IoError::InvalidReadLimit`] | `read_limit` is zero |
/// | [`IoError::FileNotFound`] | File doesn't exist or is unreadable |
/// | [`IoError::CsvParse`] | Line is not valid UTF-8 or cannot be read |
/// | [`IoError::MalformedRecord`] | Line does not have exactly 3 fields |
/// | [`IoError::EmptyDataset`] | Zero records in the file |
pub struct LyricsReader {
    path: PathBuf,
    read_limit: usize,
    keep_punctuation: bool,
}

impl LyricsReader {
    /// Create a new reader for the given lyrics file path.
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            read_limit: 1000,
            keep_punctuation: false,
        }
    }

    /// Set the maximum number of records to read.
    #[must_use]
    pub fn with_read_limit(mut self, read_limit: usize) -> Self {
        self.read_limit = read_limit;
        self
    }

    /// Keep punctuation characters in the tokens.
    #[must_use]
    pub fn with_keep_punctuation(mut self, keep_punctuation: bool) -> Self {
        self.keep_punctuation = keep_punctuation;
        self
    }

    /// Read and tokenize up to `read_limit` records.
    #[instrument(skip(self), fields(path = %self.path.display(), read_limit = self.read_limit))]
    pub fn read(&self) -> Result<LyricsDataset, IoError> {
        if self.read_limit == 0 {
            return Err(IoError::InvalidReadLimit {
                read_limit: self.read_limit,
            });
        }

        let file = std::fs::File::open(&self.path).map_err(|e| IoError::FileNotFound {
            path: self.path.clone(),
            source: e,
        })?;

        // Lyrics contain stray quotes, so quoting is disabled and every tab
        // is a field separator.
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .delimiter(b'\t')
            .quoting(false)
            .flexible(true)
            .from_reader(file);

        let mut artists = Vec::new();
        let mut titles = Vec::new();
        let mut tokenized_lyrics = Vec::new();

        for result in rdr.records().take(self.read_limit) {
            let record = result.map_err(|e| IoError::CsvParse {
                path: self.path.clone(),
                offset: e.position().map_or(0, |p| p.byte()),
                source: e,
            })?;

            let (Some(artist), Some(title), Some(lyrics), 3) =
                (record.get(0), record.get(1), record.get(2), record.len())
            else {
                return Err(IoError::MalformedRecord {
                    path: self.path.clone(),
                    line: record.position().map_or(0, |p| p.line()),
                    fields: record.len(),
                });
            };

            artists.push(artist.to_string());
            titles.push(title.to_string());
            tokenized_lyrics.push(tokenize(lyrics, self.keep_punctuation));
        }

        if artists.is_empty() {
            return Err(IoError::EmptyDataset {
                path: self.path.clone(),
            });
        }
        debug!(keep_punctuation = self.keep_punctuation, "records tokenized");

        let dataset = LyricsDataset::new(artists, titles, tokenized_lyrics);
        info!(
            n_records = dataset.n_records(),
            n_tokens = dataset.n_tokens(),
            "lyrics loaded"
        );
        Ok(dataset)
    }
}

/// Split a lyrics field into word tokens.
///
/// Replaces inner ` NEWLINE ` markers with a space and drops a trailing
/// ` NEWLINE`. Unless `keep_punctuation` is set, every character that is
/// neither a word character (alphanumeric or `_`) nor whitespace is removed.
/// Tokens are separated by single spaces; empty tokens are dropped.
pub fn tokenize(lyrics: &str, keep_punctuation: bool) -> Vec<String> {
    let text = lyrics
        .trim_end_matches(['\n', '\r'])
        .replace(" NEWLINE ", " ");
    let text = text.strip_suffix(NEWLINE_MARKER).unwrap_or(&text);

    let cleaned: String = if keep_punctuation {
        text.to_string()
    } else {
        text.chars()
            .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
            .collect()
    };

    cleaned
        .split(' ')
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
