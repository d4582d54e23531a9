//! Binary entrypoint: analyze one CSV export, print the report to stdout and
//! optionally write the export report to a file.
//!
//! Exit status is 1 when the input cannot be opened or has no header row.
//! An input with no usable rows prints "No data to analyze!" and exits 0.

mod cli;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use cli::Cli;
use dns_failure_analysis::render::{self, Format};
use dns_failure_analysis::{logging, Analyzer, EngineError};

fn main() -> ExitCode {
  let cli = Cli::parse();
  logging::init_logging(cli.log_json);

  match run(&cli) {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      let _ = writeln!(io::stderr(), "dns-failure-analysis: {:#}", e);
      ExitCode::FAILURE
    }
  }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
  let analyzer = Analyzer::new(cli.config());
  let format = Format::from(cli.format);

  let batch = analyzer.load(&cli.csv_file)?;

  let stdout = io::stdout();
  let mut out = BufWriter::new(stdout.lock());

  let state = match analyzer.aggregate(&batch) {
    Ok(state) => state,
    Err(EngineError::NoData) => {
      render::write_no_data(&mut out)?;
      out.flush()?;
      return Ok(());
    }
    Err(e) => return Err(e.into()),
  };

  let report = analyzer.console_report(&state);
  render::write_report(&report, format, &mut out)?;

  if let Some(path) = &cli.output {
    let file = File::create(path).with_context(|| format!("cannot create {}", path.display()))?;
    let mut sink = BufWriter::new(file);
    render::write_report(&analyzer.export_report(&state), format, &mut sink)?;
    sink
      .flush()
      .with_context(|| format!("cannot write {}", path.display()))?;
    info!(path = %path.display(), "analysis exported");
    if format == Format::Text {
      writeln!(out)?;
      writeln!(out, "Analysis exported to: {}", path.display())?;
    }
  }

  out.flush()?;
  Ok(())
}
