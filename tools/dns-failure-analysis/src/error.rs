//! Structured error types for the analysis pipeline.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Batch-level errors. Only these propagate out of the library.
#[derive(Debug, Error)]
pub enum EngineError {
  #[error("cannot open {}: {source}", path.display())]
  Open { path: PathBuf, source: io::Error },

  #[error("io: {0}")]
  Io(#[from] io::Error),

  #[error("csv: {0}")]
  Csv(#[from] csv::Error),

  #[error("input is empty: no header row")]
  EmptyInput,

  #[error("missing column: {0:?} not found in header")]
  MissingColumn(String),

  #[error("no data to analyze")]
  NoData,

  #[error("json: {0}")]
  Json(#[from] serde_json::Error),
}

impl EngineError {
  pub fn open(path: impl Into<PathBuf>, source: io::Error) -> Self {
    Self::Open {
      path: path.into(),
      source,
    }
  }
}

/// Per-row errors. Handled inside the row source; the row is skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowError {
  #[error("missing cell for {column:?}: index {index} but row has {width} cells")]
  MissingCell {
    column: &'static str,
    index: usize,
    width: usize,
  },

  #[error("decode: {0}")]
  Decode(String),
}

impl RowError {
  pub fn decode(msg: impl Into<String>) -> Self {
    Self::Decode(msg.into())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn missing_cell_names_column_and_width() {
    let err = RowError::MissingCell {
      column: "Client Event Text",
      index: 6,
      width: 3,
    };
    let msg = err.to_string();
    assert!(msg.contains("Client Event Text"));
    assert!(msg.contains("index 6"));
    assert!(msg.contains("3 cells"));
  }

  #[test]
  fn open_error_names_path() {
    let err = EngineError::open(
      "/nope/events.csv",
      io::Error::new(io::ErrorKind::NotFound, "not found"),
    );
    assert!(err.to_string().contains("/nope/events.csv"));
  }
}
