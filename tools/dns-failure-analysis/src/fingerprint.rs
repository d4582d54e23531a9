//! Stable batch identifier for a record set.

use crate::types::FailureRecord;

/// Compute a stable id for a batch of records.
///
/// Key components, per record in order: every extracted field and direct column.
/// Uses blake3; identical input always yields the same id.
pub fn compute(records: &[FailureRecord]) -> String {
  let mut hasher = blake3::Hasher::new();
  for rec in records {
    let vlan = rec.vlan.map(|v| v.to_string()).unwrap_or_default();
    let hour = rec.hour.map(|h| h.to_string()).unwrap_or_default();
    let fields: [&str; 14] = [
      rec.domain.as_deref().unwrap_or(""),
      rec.source_ip.as_deref().unwrap_or(""),
      rec.dns_server.as_deref().unwrap_or(""),
      &vlan,
      &rec.site,
      &rec.device_hostname,
      &rec.ssid,
      &rec.client_mac,
      &rec.device_family,
      &rec.device_model,
      &rec.device_os,
      &rec.device_manufacturer,
      &rec.timestamp,
      &hour,
    ];
    for field in fields {
      hasher.update(field.as_bytes());
      hasher.update(b"|");
    }
    hasher.update(b"\n");
  }

  let hex = hasher.finalize().to_hex();
  format!("batch-{}", &hex[..16])
}
