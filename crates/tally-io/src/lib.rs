//! File I/O, label encoding, and result serialization for tally.

mod domain;
mod encoder;
mod error;
mod lyrics_reader;
mod prediction_reader;
mod writer;

pub use domain::{ExperimentName, LyricsDataset, PredictionRun, PredictionTable};
pub use encoder::LabelEncoder;
pub use error::IoError;
pub use lyrics_reader::{LyricsReader, tokenize};
pub use prediction_reader::PredictionReader;
pub use writer::ResultWriter;
