//! Turn one raw row into a FailureRecord.

use crate::columns::{Column, ColumnMap};
use crate::error::RowError;
use crate::extract;
use crate::types::{FailureRecord, RawRow};

/// Build the record for one row.
///
/// Optional columns that are unmapped or beyond the row's width read as empty.
/// A required column beyond the row's width fails the row.
pub fn extract_record(row: &RawRow, columns: &ColumnMap) -> Result<FailureRecord, RowError> {
  let event_text = cell(row, columns, Column::EventText)?;
  let timestamp = extract::clean_cell(&cell(row, columns, Column::Timestamp)?);

  let (source_ip, dns_server) = match extract::extract_ip_pair(&event_text) {
    Some((src, dst)) => (Some(src), Some(dst)),
    None => (None, None),
  };

  Ok(FailureRecord {
    domain: extract::extract_domain(&event_text),
    source_ip,
    dns_server,
    vlan: extract::extract_vlan(&event_text),
    site: direct(row, columns, Column::Site)?,
    device_hostname: direct(row, columns, Column::Hostname)?,
    ssid: direct(row, columns, Column::Ssid)?,
    client_mac: direct(row, columns, Column::ClientMac)?,
    device_family: direct(row, columns, Column::Family)?,
    device_model: direct(row, columns, Column::Model)?,
    device_os: direct(row, columns, Column::Os)?,
    device_manufacturer: direct(row, columns, Column::Manufacturer)?,
    hour: extract::extract_hour(&timestamp),
    observed_at: extract::parse_timestamp(&timestamp),
    timestamp,
  })
}

fn direct(row: &RawRow, columns: &ColumnMap, column: Column) -> Result<String, RowError> {
  cell(row, columns, column).map(|raw| extract::clean_cell(&raw))
}

fn cell(row: &RawRow, columns: &ColumnMap, column: Column) -> Result<String, RowError> {
  let Some(index) = columns.index(column) else {
    return Ok(String::new());
  };
  match row.cell(index) {
    Some(value) => Ok(value.to_string()),
    None if column.is_required() => Err(RowError::MissingCell {
      column: column.header(),
      index,
      width: row.width(),
    }),
    None => Ok(String::new()),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn map(header: &[&str]) -> ColumnMap {
    ColumnMap::from_header(header, false).unwrap()
  }

  #[test]
  fn sample_row_extracts_every_field() {
    let columns = map(&[
      "Client Event Text",
      "Client Event Event Timestamp Local Time",
      "Site Site Name",
      "Client Device Info Client Hostname",
      "Client Device Info Client OS",
      "Client Device Info Client Manufacture",
    ]);
    let row = RawRow::from_cells([
      r#"DNS lookup failed for "ipv6.msftconnecttest.com" from 10.0.0.5 to 8.8.8.8 on vlan 130"#,
      "2024-01-15 14:22:01",
      "\"Building A\"",
      " LAPTOP-42 ",
      "Windows 11",
      "Dell",
    ]);

    let record = extract_record(&row, &columns).unwrap();
    assert_eq!(record.domain.as_deref(), Some("ipv6.msftconnecttest.com"));
    assert_eq!(record.source_ip.as_deref(), Some("10.0.0.5"));
    assert_eq!(record.dns_server.as_deref(), Some("8.8.8.8"));
    assert_eq!(record.vlan, Some(130));
    assert_eq!(record.hour, Some(14));
    assert_eq!(record.site, "Building A");
    assert_eq!(record.device_hostname, "LAPTOP-42");
    assert_eq!(record.device_os, "Windows 11");
    assert_eq!(record.device_manufacturer, "Dell");
    assert_eq!(record.timestamp, "2024-01-15 14:22:01");
    assert!(record.observed_at.is_some());
    // Unmapped columns read as empty.
    assert_eq!(record.ssid, "");
    assert_eq!(record.client_mac, "");
  }

  #[test]
  fn unmatched_text_yields_absent_fields_not_an_error() {
    let columns = map(&["Client Event Text"]);
    let row = RawRow::from_cells(["something else entirely"]);
    let record = extract_record(&row, &columns).unwrap();
    assert_eq!(record.domain, None);
    assert_eq!(record.source_ip, None);
    assert_eq!(record.dns_server, None);
    assert_eq!(record.vlan, None);
    assert_eq!(record.hour, None);
  }

  #[test]
  fn short_row_missing_optional_cell_reads_empty() {
    let columns = map(&["Client Event Text", "Site Site Name", "Wlan Ssid"]);
    let row = RawRow::from_cells([r#"for "a.example""#]);
    let record = extract_record(&row, &columns).unwrap();
    assert_eq!(record.domain.as_deref(), Some("a.example"));
    assert_eq!(record.site, "");
    assert_eq!(record.ssid, "");
  }

  #[test]
  fn short_row_missing_event_text_fails() {
    let columns = map(&["Site Site Name", "Wlan Ssid", "Client Event Text"]);
    let row = RawRow::from_cells(["HQ", "corp"]);
    let err = extract_record(&row, &columns).unwrap_err();
    assert_eq!(
      err,
      RowError::MissingCell {
        column: "Client Event Text",
        index: 2,
        width: 2,
      }
    );
  }
}
