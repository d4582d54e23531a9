//! Report renderers. Every renderer writes to a caller-supplied sink, so the
//! console and a file export share the same code.

use std::io::Write;

use crate::error::EngineError;
use crate::types::{Distribution, HourlyView, Report, SummaryStats};

const RULE_WIDTH: usize = 60;
const BAR_CELL: char = '█';
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Output format for a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
  #[default]
  Text,
  Json,
}

/// Write a full report in `format`.
pub fn write_report<W: Write>(report: &Report, format: Format, out: &mut W) -> Result<(), EngineError> {
  match format {
    Format::Text => write_text(report, out)?,
    Format::Json => write_json(report, out)?,
  }
  Ok(())
}

/// Summary block, one block per dimension, then the hourly block.
pub fn write_text<W: Write>(report: &Report, out: &mut W) -> std::io::Result<()> {
  write_summary(&report.summary, out)?;
  for dist in &report.distributions {
    write_distribution(dist, out)?;
  }
  write_hourly(&report.hourly, out)
}

pub fn write_json<W: Write>(report: &Report, out: &mut W) -> Result<(), EngineError> {
  serde_json::to_writer_pretty(&mut *out, report)?;
  writeln!(out)?;
  Ok(())
}

/// Printed instead of a report when nothing usable was read.
pub fn write_no_data<W: Write>(out: &mut W) -> std::io::Result<()> {
  writeln!(out, "No data to analyze!")
}

fn write_banner<W: Write>(title: &str, out: &mut W) -> std::io::Result<()> {
  writeln!(out)?;
  writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
  writeln!(out, "{}", title)?;
  writeln!(out, "{}", "=".repeat(RULE_WIDTH))
}

pub fn write_summary<W: Write>(summary: &SummaryStats, out: &mut W) -> std::io::Result<()> {
  write_banner("SUMMARY STATISTICS", out)?;
  writeln!(
    out,
    "Total DNS Failures: {}",
    thousands(summary.total_failures as u64)
  )?;
  writeln!(out, "Skipped Rows: {}", thousands(summary.skipped_rows as u64))?;
  writeln!(out, "Batch ID: {}", summary.batch_id)?;
  if let (Some(first), Some(last)) = (summary.first_seen, summary.last_seen) {
    writeln!(
      out,
      "Time Range: {} to {}",
      first.format(TIME_FORMAT),
      last.format(TIME_FORMAT)
    )?;
  }
  for unique in &summary.unique {
    writeln!(out, "Unique {}: {}", unique.label, thousands(unique.count as u64))?;
  }

  let probes = &summary.probes;
  writeln!(out)?;
  writeln!(out, "Microsoft Connectivity Tests:")?;
  writeln!(
    out,
    "  Failures: {} ({:.1}%)",
    thousands(probes.probe_failures),
    probes.probe_percentage
  )?;
  writeln!(
    out,
    "  Real DNS Issues: {} ({:.1}%)",
    thousands(probes.real_failures),
    probes.real_percentage
  )
}

pub fn write_distribution<W: Write>(dist: &Distribution, out: &mut W) -> std::io::Result<()> {
  let lower = dist.title.to_lowercase();
  write_banner(&format!("{} DISTRIBUTION", dist.title.to_uppercase()), out)?;
  writeln!(out, "Total unique {}: {}", lower, dist.unique)?;
  writeln!(out, "Total failures: {}", dist.total)?;
  writeln!(out)?;
  writeln!(out, "Top {} {}:", dist.top_n, lower)?;
  writeln!(out, "{:<5} {:<10} {:<12} {}", "Rank", "Count", "Percentage", dist.title)?;
  writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;
  for entry in &dist.entries {
    writeln!(
      out,
      "{:<5} {:<10} {:<11.2}% {}",
      entry.rank, entry.count, entry.percentage, entry.value
    )?;
  }
  Ok(())
}

pub fn write_hourly<W: Write>(view: &HourlyView, out: &mut W) -> std::io::Result<()> {
  write_banner("HOURLY DISTRIBUTION", out)?;
  writeln!(out, "{:<5} {:<10} {:<12} {}", "Hour", "Count", "Percentage", "Visual")?;
  writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;
  for slot in &view.slots {
    let bar: String = std::iter::repeat(BAR_CELL).take(slot.bar).collect();
    writeln!(
      out,
      "{:02}:00 {:<10} {:<11.2}% {}",
      slot.hour, slot.count, slot.percentage, bar
    )?;
  }
  Ok(())
}

/// `1234567` -> `1,234,567`.
fn thousands(n: u64) -> String {
  let digits = n.to_string();
  let mut out = String::with_capacity(digits.len() + digits.len() / 3);
  for (i, ch) in digits.chars().enumerate() {
    if i > 0 && (digits.len() - i) % 3 == 0 {
      out.push(',');
    }
    out.push(ch);
  }
  out
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::aggregate::DistributionState;
  use crate::config::PROBE_DOMAINS;
  use crate::types::{Dimension, FailureRecord};
  use pretty_assertions::assert_eq;

  fn rec(domain: &str, hour: u8) -> FailureRecord {
    FailureRecord {
      domain: Some(domain.into()),
      hour: Some(hour),
      ..FailureRecord::default()
    }
  }

  fn render<F>(f: F) -> String
  where
    F: FnOnce(&mut Vec<u8>) -> std::io::Result<()>,
  {
    let mut buf = Vec::new();
    f(&mut buf).unwrap();
    String::from_utf8(buf).unwrap()
  }

  #[test]
  fn thousands_grouping() {
    assert_eq!(thousands(0), "0");
    assert_eq!(thousands(999), "999");
    assert_eq!(thousands(1000), "1,000");
    assert_eq!(thousands(1234567), "1,234,567");
  }

  #[test]
  fn distribution_block_layout() {
    let records = vec![rec("b.example", 1), rec("a.example", 1)];
    let state = DistributionState::build(&records, &PROBE_DOMAINS);
    let dist = state.distribution(Dimension::Domain, 20);
    let text = render(|out| write_distribution(&dist, out));

    let expected = format!(
      "\n{rule}\nDOMAIN DISTRIBUTION\n{rule}\n\
       Total unique domain: 2\n\
       Total failures: 2\n\
       \n\
       Top 20 domain:\n\
       Rank  Count      Percentage   Domain\n\
       {dash}\n\
       1     1          50.00      % b.example\n\
       2     1          50.00      % a.example\n",
      rule = "=".repeat(60),
      dash = "-".repeat(60),
    );
    assert_eq!(text, expected);
  }

  #[test]
  fn hourly_block_has_24_rows_and_scaled_bars() {
    let records = vec![rec("a.example", 14), rec("a.example", 14), rec("a.example", 3)];
    let state = DistributionState::build(&records, &PROBE_DOMAINS);
    let text = render(|out| write_hourly(&state.hourly_view(30), out));

    let rows: Vec<&str> = text.lines().filter(|l| l.contains(":00 ")).collect();
    assert_eq!(rows.len(), 24);
    assert!(rows[0].starts_with("00:00 0 "));
    assert!(rows[23].starts_with("23:00 "));
    assert_eq!(rows[14].chars().filter(|c| *c == BAR_CELL).count(), 30);
    assert_eq!(rows[3].chars().filter(|c| *c == BAR_CELL).count(), 15);
    assert_eq!(rows[5].chars().filter(|c| *c == BAR_CELL).count(), 0);
  }

  #[test]
  fn summary_block_reports_probe_split() {
    let records = vec![rec("www.msftconnecttest.com", 1), rec("corp.example", 2)];
    let state = DistributionState::build(&records, &PROBE_DOMAINS);
    let text = render(|out| write_summary(&state.summary(), out));
    assert!(text.contains("SUMMARY STATISTICS"));
    assert!(text.contains("Total DNS Failures: 2\n"));
    assert!(text.contains("Unique Domains: 2\n"));
    assert!(text.contains("  Failures: 1 (50.0%)\n"));
    assert!(text.contains("  Real DNS Issues: 1 (50.0%)\n"));
    assert!(!text.contains("Time Range"));
  }

  #[test]
  fn no_data_message() {
    assert_eq!(render(|out| write_no_data(out)), "No data to analyze!\n");
  }
}
