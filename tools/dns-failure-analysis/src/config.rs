//! Analysis configuration with sane defaults.

use crate::types::Dimension;

/// Domains operating systems resolve to test internet reachability.
pub const PROBE_DOMAINS: [&str; 3] = [
  "ipv6.msftconnecttest.com",
  "www.msftconnecttest.com",
  "dns.msftncsi.com",
];

pub const DEFAULT_TOP_N: usize = 20;
pub const EXPORT_WIDE_TOP_N: usize = 50;
pub const DEFAULT_BAR_WIDTH: usize = 30;

/// Per-dimension truncation for one report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportLimits {
  pub default_top_n: usize,
  pub domain_top_n: usize,
  pub device_top_n: usize,
}

impl ReportLimits {
  /// Same top-N for every dimension.
  pub fn uniform(top_n: usize) -> Self {
    Self {
      default_top_n: top_n,
      domain_top_n: top_n,
      device_top_n: top_n,
    }
  }

  /// File export: wider Domain and Device tables.
  pub fn export() -> Self {
    Self {
      default_top_n: DEFAULT_TOP_N,
      domain_top_n: EXPORT_WIDE_TOP_N,
      device_top_n: EXPORT_WIDE_TOP_N,
    }
  }

  pub fn for_dimension(&self, dimension: Dimension) -> usize {
    match dimension {
      Dimension::Domain => self.domain_top_n,
      Dimension::Device => self.device_top_n,
      _ => self.default_top_n,
    }
  }
}

impl Default for ReportLimits {
  fn default() -> Self {
    Self::uniform(DEFAULT_TOP_N)
  }
}

/// Tunables for loading and reporting.
#[derive(Debug, Clone)]
pub struct Config {
  /// Truncation for the console report.
  pub console_limits: ReportLimits,
  /// Truncation for the file export.
  pub export_limits: ReportLimits,
  /// Max cells in an hourly bar (the busiest hour gets all of them).
  pub bar_width: usize,
  /// Connectivity-probe domains, matched exactly.
  pub probe_domains: Vec<String>,
  /// Fall back to legacy column positions when a header name is missing.
  pub positional_fallback: bool,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      console_limits: ReportLimits::default(),
      export_limits: ReportLimits::export(),
      bar_width: DEFAULT_BAR_WIDTH,
      probe_domains: PROBE_DOMAINS.iter().map(|d| d.to_string()).collect(),
      positional_fallback: true,
    }
  }
}
