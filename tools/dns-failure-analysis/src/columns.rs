//! Logical columns of the client-event export and the header-derived column map.

use crate::error::EngineError;

const COLUMN_COUNT: usize = 10;

/// A logical column, addressed by header name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
  EventText,
  Timestamp,
  Site,
  Hostname,
  Ssid,
  ClientMac,
  Family,
  Model,
  Os,
  Manufacturer,
}

impl Column {
  pub const ALL: [Column; COLUMN_COUNT] = [
    Column::EventText,
    Column::Timestamp,
    Column::Site,
    Column::Hostname,
    Column::Ssid,
    Column::ClientMac,
    Column::Family,
    Column::Model,
    Column::Os,
    Column::Manufacturer,
  ];

  pub fn header(self) -> &'static str {
    match self {
      Self::EventText => "Client Event Text",
      Self::Timestamp => "Client Event Event Timestamp Local Time",
      Self::Site => "Site Site Name",
      Self::Hostname => "Client Device Info Client Hostname",
      Self::Ssid => "Wlan Ssid",
      Self::ClientMac => "Client Event Mac Address",
      Self::Family => "Client Device Info Client Family",
      Self::Model => "Client Device Info Client Model",
      Self::Os => "Client Device Info Client OS",
      Self::Manufacturer => "Client Device Info Client Manufacture",
    }
  }

  /// Position in the legacy fixed-layout export.
  pub fn fallback_index(self) -> usize {
    match self {
      Self::EventText => 6,
      Self::Timestamp => 2,
      Self::Site => 3,
      Self::Hostname => 7,
      Self::Ssid => 8,
      Self::ClientMac => 9,
      Self::Family => 10,
      Self::Model => 11,
      Self::Os => 12,
      Self::Manufacturer => 13,
    }
  }

  /// Rows lacking a required cell are skipped.
  pub fn is_required(self) -> bool {
    matches!(self, Self::EventText)
  }

  fn slot(self) -> usize {
    self as usize
  }
}

/// Where each logical column lives in this particular export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
  indices: [Option<usize>; COLUMN_COUNT],
  width: usize,
}

impl ColumnMap {
  /// Resolve every logical column against the header row.
  ///
  /// Name lookup wins. With `positional_fallback`, a column whose name is
  /// missing uses its legacy position, but only inside the header width.
  /// Errors if a required column cannot be resolved either way.
  pub fn from_header<S: AsRef<str>>(
    header: &[S],
    positional_fallback: bool,
  ) -> Result<Self, EngineError> {
    let names: Vec<&str> = header
      .iter()
      .map(|h| h.as_ref().trim_start_matches('\u{feff}').trim())
      .collect();
    let width = names.len();

    let mut indices = [None; COLUMN_COUNT];
    for column in Column::ALL {
      let by_name = names.iter().position(|n| *n == column.header());
      let resolved = by_name.or_else(|| {
        let fallback = column.fallback_index();
        (positional_fallback && fallback < width).then_some(fallback)
      });
      if resolved.is_none() && column.is_required() {
        return Err(EngineError::MissingColumn(column.header().to_string()));
      }
      indices[column.slot()] = resolved;
    }

    Ok(Self { indices, width })
  }

  pub fn index(&self, column: Column) -> Option<usize> {
    self.indices[column.slot()]
  }

  /// Number of header cells.
  pub fn width(&self) -> usize {
    self.width
  }
}
