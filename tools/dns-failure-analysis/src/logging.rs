use std::io;

use tracing_subscriber::{fmt, EnvFilter};

/// Install the global tracing subscriber.
///
/// Level filtering comes from `RUST_LOG` (default "info"). Logs go to stderr so
/// the report on stdout stays clean; `json` switches to flattened JSON lines.
pub fn init_logging(json: bool) {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

  let builder = fmt().with_env_filter(filter).with_writer(io::stderr);
  if json {
    builder.json().flatten_event(true).init();
  } else {
    builder.with_target(false).init();
  }
}
