use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use dns_failure_analysis::config::{Config, ReportLimits};
use dns_failure_analysis::render::Format;

/// Analyze DNS failure CSV data and print distribution statistics for
/// domains, devices, DNS servers, sites, manufacturers, OS, VLANs and hours.
#[derive(Parser, Debug, Clone)]
#[command(name = "dns-failure-analysis", version, about, long_about = None)]
pub struct Cli {
  /// Path to the CSV file containing DNS failure data.
  #[arg(value_name = "CSV_FILE")]
  pub csv_file: PathBuf,

  // ── Report ──────────────────────────────────────────────────────────────

  /// Number of top entries to show per distribution.
  #[arg(short = 'n', long = "top", value_name = "N", default_value_t = 20)]
  pub top: usize,

  /// Also write the analysis (wider Domain and Device tables) to this file.
  #[arg(short = 'o', long = "output", value_name = "PATH")]
  pub output: Option<PathBuf>,

  /// Report format for stdout and the export file.
  #[arg(long = "format", value_enum, default_value_t = OutputFormat::Text)]
  pub format: OutputFormat,

  /// Width of the bar drawn for the busiest hour.
  #[arg(long = "bar-width", value_name = "CELLS", default_value_t = 30)]
  pub bar_width: usize,

  // ── Input ───────────────────────────────────────────────────────────────

  /// Do not fall back to legacy column positions when a header name is missing.
  #[arg(long = "no-positional-fallback")]
  pub no_positional_fallback: bool,

  // ── Logging ─────────────────────────────────────────────────────────────

  /// Emit diagnostics on stderr as JSON lines.
  #[arg(long = "log-json")]
  pub log_json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
  Text,
  Json,
}

impl From<OutputFormat> for Format {
  fn from(f: OutputFormat) -> Self {
    match f {
      OutputFormat::Text => Format::Text,
      OutputFormat::Json => Format::Json,
    }
  }
}

impl Cli {
  pub fn config(&self) -> Config {
    Config {
      console_limits: ReportLimits::uniform(self.top),
      bar_width: self.bar_width,
      positional_fallback: !self.no_positional_fallback,
      ..Config::default()
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn defaults() {
    let cli = Cli::parse_from(["dns-failure-analysis", "events.csv"]);
    assert_eq!(cli.csv_file, PathBuf::from("events.csv"));
    assert_eq!(cli.top, 20);
    assert_eq!(cli.output, None);
    assert_eq!(cli.format, OutputFormat::Text);
    let config = cli.config();
    assert_eq!(config.console_limits, ReportLimits::uniform(20));
    assert!(config.positional_fallback);
  }

  #[test]
  fn overrides() {
    let cli = Cli::parse_from([
      "dns-failure-analysis",
      "events.csv",
      "-n",
      "5",
      "-o",
      "out.txt",
      "--format",
      "json",
      "--no-positional-fallback",
    ]);
    assert_eq!(cli.top, 5);
    assert_eq!(cli.output, Some(PathBuf::from("out.txt")));
    assert_eq!(Format::from(cli.format), Format::Json);
    let config = cli.config();
    assert_eq!(config.console_limits.for_dimension(dns_failure_analysis::types::Dimension::Domain), 5);
    assert_eq!(config.export_limits, ReportLimits::export());
    assert!(!config.positional_fallback);
  }

  #[test]
  fn input_path_is_required() {
    assert!(Cli::try_parse_from(["dns-failure-analysis"]).is_err());
  }
}
