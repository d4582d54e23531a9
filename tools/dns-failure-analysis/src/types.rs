//! Core types for the analysis pipeline (input rows, records, report contracts).

use chrono::NaiveDateTime;
use serde::Serialize;

// ---------------------------------------------------------------------------
// Input rows
// ---------------------------------------------------------------------------

/// One data row of the export, cells in physical order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
  cells: Vec<String>,
}

impl RawRow {
  pub fn from_cells<I, S>(cells: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    Self {
      cells: cells.into_iter().map(Into::into).collect(),
    }
  }

  pub fn cell(&self, index: usize) -> Option<&str> {
    self.cells.get(index).map(String::as_str)
  }

  pub fn width(&self) -> usize {
    self.cells.len()
  }
}

// ---------------------------------------------------------------------------
// Failure records
// ---------------------------------------------------------------------------

/// One DNS failure event, derived from a single row.
///
/// Extracted fields are `None` when their pattern did not match; direct columns
/// are empty strings when the cell is absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FailureRecord {
  pub domain: Option<String>,
  pub source_ip: Option<String>,
  pub dns_server: Option<String>,
  pub vlan: Option<u32>,
  pub site: String,
  pub device_hostname: String,
  pub ssid: String,
  pub client_mac: String,
  pub device_family: String,
  pub device_model: String,
  pub device_os: String,
  pub device_manufacturer: String,
  pub timestamp: String,
  pub hour: Option<u8>,
  /// Parsed timestamp, when it has a full `YYYY-MM-DD HH:MM:SS` shape.
  pub observed_at: Option<NaiveDateTime>,
}

/// A row that could not be turned into a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
  /// 1-based row number in the input; the header is row 1.
  pub row: usize,
  pub reason: String,
}

/// Everything read from one input: usable records plus skipped-row diagnostics.
#[derive(Debug, Clone, Default)]
pub struct RecordBatch {
  pub records: Vec<FailureRecord>,
  pub skipped: Vec<SkippedRow>,
}

impl RecordBatch {
  /// Data rows seen, usable or not.
  pub fn rows_read(&self) -> usize {
    self.records.len() + self.skipped.len()
  }
}

// ---------------------------------------------------------------------------
// Dimensions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
  Domain,
  DnsServer,
  Site,
  Device,
  Manufacturer,
  Os,
  Vlan,
}

impl Dimension {
  /// Report order.
  pub const ALL: [Dimension; 7] = [
    Dimension::Domain,
    Dimension::DnsServer,
    Dimension::Site,
    Dimension::Device,
    Dimension::Manufacturer,
    Dimension::Os,
    Dimension::Vlan,
  ];

  pub fn title(self) -> &'static str {
    match self {
      Self::Domain => "Domain",
      Self::DnsServer => "DNS Server",
      Self::Site => "Site",
      Self::Device => "Device",
      Self::Manufacturer => "Device Manufacturer",
      Self::Os => "Device OS",
      Self::Vlan => "VLAN",
    }
  }

  /// Plural label used in the summary block.
  pub fn plural(self) -> &'static str {
    match self {
      Self::Domain => "Domains",
      Self::DnsServer => "DNS Servers",
      Self::Site => "Sites",
      Self::Device => "Devices",
      Self::Manufacturer => "Device Manufacturers",
      Self::Os => "Device OS",
      Self::Vlan => "VLANs",
    }
  }
}

// ---------------------------------------------------------------------------
// Report (what we emit)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionEntry {
  pub rank: usize,
  pub value: String,
  pub count: u64,
  pub percentage: f64,
}

/// Ranked, percentage-annotated view of one dimension.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Distribution {
  pub dimension: Dimension,
  pub title: &'static str,
  /// Distinct values observed (before truncation).
  pub unique: usize,
  /// Sum of all counts in this dimension (before truncation).
  pub total: u64,
  pub top_n: usize,
  pub entries: Vec<DistributionEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlySlot {
  pub hour: u8,
  pub count: u64,
  pub percentage: f64,
  /// Bar length in cells, scaled to the busiest hour.
  pub bar: usize,
}

/// Always 24 slots, 00 through 23.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyView {
  pub total: u64,
  pub peak: u64,
  pub bar_width: usize,
  pub slots: Vec<HourlySlot>,
}

/// Connectivity-probe failures versus everything else, over all records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProbeSummary {
  pub probe_failures: u64,
  pub probe_percentage: f64,
  pub real_failures: u64,
  pub real_percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UniqueCount {
  pub dimension: Dimension,
  pub label: &'static str,
  pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryStats {
  pub batch_id: String,
  pub total_failures: usize,
  pub skipped_rows: usize,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub first_seen: Option<NaiveDateTime>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub last_seen: Option<NaiveDateTime>,
  pub unique: Vec<UniqueCount>,
  pub probes: ProbeSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
  pub summary: SummaryStats,
  pub distributions: Vec<Distribution>,
  pub hourly: HourlyView,
}
