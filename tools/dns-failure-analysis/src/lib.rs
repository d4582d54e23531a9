//! DNS failure distribution analysis: deterministic, rule-based.
//!
//! Reads a CSV export of DNS resolution failure events, extracts the queried
//! domain, DNS server, VLAN and hour from each event's free-text description,
//! and counts failures per domain, DNS server, site, device, manufacturer,
//! OS, VLAN and hour of day. Reports render to any writer.
//!
//! No network, no DB; pure computation over a closed batch.

pub mod aggregate;
pub mod columns;
pub mod config;
pub mod counter;
pub mod engine;
pub mod error;
pub mod extract;
pub mod fingerprint;
pub mod logging;
pub mod record;
pub mod render;
pub mod source;
pub mod types;

pub use aggregate::DistributionState;
pub use config::{Config, ReportLimits};
pub use engine::Analyzer;
pub use error::{EngineError, RowError};
pub use types::{FailureRecord, RecordBatch, Report};
