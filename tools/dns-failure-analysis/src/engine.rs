//! Analyzer: load a batch, fold it into distribution state, build reports.

use std::path::Path;

use tracing::info;

use crate::aggregate::DistributionState;
use crate::config::{Config, ReportLimits};
use crate::error::EngineError;
use crate::source;
use crate::types::*;

/// The DNS failure analyzer. Stateless apart from its configuration.
pub struct Analyzer {
  config: Config,
}

impl Analyzer {
  pub fn new(config: Config) -> Self {
    Self { config }
  }

  pub fn with_defaults() -> Self {
    Self::new(Config::default())
  }

  pub fn config(&self) -> &Config {
    &self.config
  }

  /// Read every row of the export at `path`.
  pub fn load(&self, path: &Path) -> Result<RecordBatch, EngineError> {
    info!(path = %path.display(), "loading data");
    let batch = source::read_path(path, self.config.positional_fallback)?;
    info!(
      records = batch.records.len(),
      skipped = batch.skipped.len(),
      "loaded DNS failure records"
    );
    Ok(batch)
  }

  /// Fold the batch into distribution state.
  ///
  /// Returns `EngineError::NoData` when the batch has no usable records.
  pub fn aggregate(&self, batch: &RecordBatch) -> Result<DistributionState, EngineError> {
    if batch.records.is_empty() {
      return Err(EngineError::NoData);
    }
    Ok(
      DistributionState::build(&batch.records, &self.config.probe_domains)
        .with_skipped_rows(batch.skipped.len()),
    )
  }

  /// Assemble a report truncated to `limits`.
  pub fn report(&self, state: &DistributionState, limits: &ReportLimits) -> Report {
    let distributions = Dimension::ALL
      .iter()
      .map(|&dim| state.distribution(dim, limits.for_dimension(dim)))
      .collect();

    Report {
      summary: state.summary(),
      distributions,
      hourly: state.hourly_view(self.config.bar_width),
    }
  }

  /// Console report with the configured console limits.
  pub fn console_report(&self, state: &DistributionState) -> Report {
    self.report(state, &self.config.console_limits)
  }

  /// File export report with the configured export limits.
  pub fn export_report(&self, state: &DistributionState) -> Report {
    self.report(state, &self.config.export_limits)
  }
}
