//! Row source: read a delimited export into a RecordBatch.
//!
//! Per-row problems are logged and skipped; only open/stream failures and an
//! unusable header abort the read.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::{debug, warn};

use crate::columns::{Column, ColumnMap};
use crate::error::{EngineError, RowError};
use crate::record;
use crate::types::{RawRow, RecordBatch, SkippedRow};

/// Header is row 1; data rows start here.
const FIRST_DATA_ROW: usize = 2;

/// Read the export at `path`.
pub fn read_path(path: &Path, positional_fallback: bool) -> Result<RecordBatch, EngineError> {
  let file = File::open(path).map_err(|e| EngineError::open(path, e))?;
  read_from(file, positional_fallback)
}

/// Read an export from any reader.
pub fn read_from<R: Read>(reader: R, positional_fallback: bool) -> Result<RecordBatch, EngineError> {
  let mut csv = csv::ReaderBuilder::new()
    .has_headers(true)
    .flexible(true)
    .from_reader(reader);

  let header: Vec<String> = csv.headers()?.iter().map(str::to_string).collect();
  if header.iter().all(|h| h.trim().is_empty()) {
    return Err(EngineError::EmptyInput);
  }

  let columns = ColumnMap::from_header(&header, positional_fallback)?;
  debug!(
    width = columns.width(),
    mapped = ?Column::ALL.map(|c| (c.header(), columns.index(c))),
    "resolved column map"
  );

  let mut batch = RecordBatch::default();
  for (i, result) in csv.records().enumerate() {
    let row_num = i + FIRST_DATA_ROW;

    let outcome = match result {
      Ok(rec) => record::extract_record(&RawRow::from_cells(rec.iter()), &columns),
      Err(e) if e.is_io_error() => return Err(EngineError::Csv(e)),
      Err(e) => Err(RowError::decode(e.to_string())),
    };

    match outcome {
      Ok(rec) => batch.records.push(rec),
      Err(e) => {
        warn!(row = row_num, error = %e, "skipping row");
        batch.skipped.push(SkippedRow {
          row: row_num,
          reason: e.to_string(),
        });
      }
    }
  }

  Ok(batch)
}

#[cfg(test)]
mod tests {
  use super::*;

  const HEADER: &str = "Client Event Text,Client Event Event Timestamp Local Time,Site Site Name";

  fn read(input: &str) -> Result<RecordBatch, EngineError> {
    read_from(input.as_bytes(), false)
  }

  #[test]
  fn reads_quoted_event_text() {
    let input = format!(
      "{}\n\"DNS lookup failed for \"\"a.example\"\" from 10.0.0.5 to 8.8.8.8 on vlan 7\",2024-01-15 09:00:00,HQ\n",
      HEADER
    );
    let batch = read(&input).unwrap();
    assert_eq!(batch.records.len(), 1);
    assert!(batch.skipped.is_empty());
    let rec = &batch.records[0];
    assert_eq!(rec.domain.as_deref(), Some("a.example"));
    assert_eq!(rec.dns_server.as_deref(), Some("8.8.8.8"));
    assert_eq!(rec.vlan, Some(7));
    assert_eq!(rec.hour, Some(9));
    assert_eq!(rec.site, "HQ");
  }

  #[test]
  fn short_rows_are_kept_when_only_optional_cells_are_missing() {
    let input = format!("{}\nno match here\n", HEADER);
    let batch = read(&input).unwrap();
    assert_eq!(batch.records.len(), 1);
    assert_eq!(batch.records[0].site, "");
    assert_eq!(batch.records[0].timestamp, "");
  }

  #[test]
  fn row_missing_event_text_is_skipped_with_row_number() {
    let input = "Site Site Name,Client Event Event Timestamp Local Time,Client Event Text\n\
                 HQ,2024-01-15 14:22:01,\"for \"\"a.example\"\"\"\n\
                 HQ,2024-01-15 14:23:01\n\
                 HQ,2024-01-15 14:24:01,\"for \"\"b.example\"\"\"\n";
    let batch = read(input).unwrap();
    assert_eq!(batch.records.len(), 2);
    assert_eq!(batch.skipped.len(), 1);
    assert_eq!(batch.skipped[0].row, 3);
    assert!(batch.skipped[0].reason.contains("Client Event Text"));
    assert_eq!(batch.rows_read(), 3);
  }

  #[test]
  fn invalid_utf8_row_is_skipped_not_fatal() {
    let mut input = format!("{}\n", HEADER).into_bytes();
    input.extend_from_slice(b"for \"a.example\",2024-01-15 10:00:00,HQ\n");
    input.extend_from_slice(b"bad \xff\xfe bytes,2024-01-15 10:00:00,HQ\n");
    input.extend_from_slice(b"for \"b.example\",2024-01-15 11:00:00,HQ\n");
    let batch = read_from(input.as_slice(), false).unwrap();
    assert_eq!(batch.records.len(), 2);
    assert_eq!(batch.skipped.len(), 1);
    assert_eq!(batch.skipped[0].row, 3);
  }

  #[test]
  fn empty_input_is_an_error() {
    assert!(matches!(read(""), Err(EngineError::EmptyInput)));
  }

  #[test]
  fn header_only_yields_empty_batch() {
    let batch = read(&format!("{}\n", HEADER)).unwrap();
    assert!(batch.records.is_empty());
    assert!(batch.skipped.is_empty());
  }

  #[test]
  fn header_without_event_text_is_an_error() {
    let err = read("Site Site Name,Wlan Ssid\nHQ,corp\n").unwrap_err();
    assert!(matches!(err, EngineError::MissingColumn(_)));
  }

  #[test]
  fn missing_file_is_an_open_error() {
    let err = read_path(Path::new("/definitely/not/here.csv"), true).unwrap_err();
    assert!(matches!(err, EngineError::Open { .. }));
  }
}
