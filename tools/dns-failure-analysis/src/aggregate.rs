//! Distribution state: one fold over the records, then read-only ranked views.

use std::collections::HashSet;
use std::fmt::Display;
use std::hash::Hash;

use chrono::NaiveDateTime;

use crate::counter::{FrequencyCounter, HourlyHistogram, HOURS_PER_DAY};
use crate::fingerprint;
use crate::types::*;

/// Frequency counters for every dimension plus the hourly histogram.
#[derive(Debug, Clone)]
pub struct DistributionState {
  records: usize,
  skipped_rows: usize,
  batch_id: String,
  domains: FrequencyCounter<String>,
  dns_servers: FrequencyCounter<String>,
  sites: FrequencyCounter<String>,
  devices: FrequencyCounter<String>,
  manufacturers: FrequencyCounter<String>,
  os: FrequencyCounter<String>,
  vlans: FrequencyCounter<u32>,
  hourly: HourlyHistogram,
  probe_failures: u64,
  first_seen: Option<NaiveDateTime>,
  last_seen: Option<NaiveDateTime>,
}

impl DistributionState {
  /// Fold over every record once.
  ///
  /// Each record adds at most one count per dimension; empty or absent fields add none.
  pub fn build<S: AsRef<str>>(records: &[FailureRecord], probe_domains: &[S]) -> Self {
    let probes: HashSet<&str> = probe_domains.iter().map(|d| d.as_ref()).collect();

    let mut state = Self {
      records: records.len(),
      skipped_rows: 0,
      batch_id: fingerprint::compute(records),
      domains: FrequencyCounter::new(),
      dns_servers: FrequencyCounter::new(),
      sites: FrequencyCounter::new(),
      devices: FrequencyCounter::new(),
      manufacturers: FrequencyCounter::new(),
      os: FrequencyCounter::new(),
      vlans: FrequencyCounter::new(),
      hourly: HourlyHistogram::default(),
      probe_failures: 0,
      first_seen: None,
      last_seen: None,
    };

    for rec in records {
      if let Some(domain) = rec.domain.as_ref().filter(|d| !d.is_empty()) {
        state.domains.observe(domain);
        if probes.contains(domain.as_str()) {
          state.probe_failures += 1;
        }
      }
      if let Some(server) = rec.dns_server.as_ref().filter(|s| !s.is_empty()) {
        state.dns_servers.observe(server);
      }
      observe_text(&mut state.sites, &rec.site);
      observe_text(&mut state.devices, &rec.device_hostname);
      observe_text(&mut state.manufacturers, &rec.device_manufacturer);
      observe_text(&mut state.os, &rec.device_os);
      if let Some(vlan) = rec.vlan {
        state.vlans.observe(&vlan);
      }
      if let Some(hour) = rec.hour {
        state.hourly.observe(hour);
      }
      if let Some(ts) = rec.observed_at {
        state.first_seen = Some(state.first_seen.map_or(ts, |f| f.min(ts)));
        state.last_seen = Some(state.last_seen.map_or(ts, |l| l.max(ts)));
      }
    }

    state
  }

  /// Record how many input rows were skipped before the fold.
  pub fn with_skipped_rows(mut self, skipped: usize) -> Self {
    self.skipped_rows = skipped;
    self
  }

  pub fn records(&self) -> usize {
    self.records
  }

  pub fn unique(&self, dimension: Dimension) -> usize {
    match dimension {
      Dimension::Domain => self.domains.unique(),
      Dimension::DnsServer => self.dns_servers.unique(),
      Dimension::Site => self.sites.unique(),
      Dimension::Device => self.devices.unique(),
      Dimension::Manufacturer => self.manufacturers.unique(),
      Dimension::Os => self.os.unique(),
      Dimension::Vlan => self.vlans.unique(),
    }
  }

  /// Ranked view of one dimension, truncated to `top_n`.
  pub fn distribution(&self, dimension: Dimension, top_n: usize) -> Distribution {
    match dimension {
      Dimension::Domain => rank(dimension, &self.domains, top_n),
      Dimension::DnsServer => rank(dimension, &self.dns_servers, top_n),
      Dimension::Site => rank(dimension, &self.sites, top_n),
      Dimension::Device => rank(dimension, &self.devices, top_n),
      Dimension::Manufacturer => rank(dimension, &self.manufacturers, top_n),
      Dimension::Os => rank(dimension, &self.os, top_n),
      Dimension::Vlan => rank(dimension, &self.vlans, top_n),
    }
  }

  /// All 24 hours, with bars scaled so the busiest hour spans `bar_width`.
  pub fn hourly_view(&self, bar_width: usize) -> HourlyView {
    let total = self.hourly.total();
    let peak = self.hourly.peak();

    let slots = (0..HOURS_PER_DAY as u8)
      .map(|hour| {
        let count = self.hourly.count(hour);
        HourlySlot {
          hour,
          count,
          percentage: percent(count, total),
          bar: if peak > 0 {
            (count as u128 * bar_width as u128 / peak as u128) as usize
          } else {
            0
          },
        }
      })
      .collect();

    HourlyView {
      total,
      peak,
      bar_width,
      slots,
    }
  }

  /// Probe-domain failures against all records.
  pub fn probe_summary(&self) -> ProbeSummary {
    let total = self.records as u64;
    let probe = self.probe_failures;
    let real = total.saturating_sub(probe);
    let probe_percentage = percent(probe, total);
    ProbeSummary {
      probe_failures: probe,
      probe_percentage,
      real_failures: real,
      real_percentage: if total > 0 {
        100.0 - probe_percentage
      } else {
        0.0
      },
    }
  }

  pub fn summary(&self) -> SummaryStats {
    let unique = [
      Dimension::Domain,
      Dimension::Device,
      Dimension::DnsServer,
      Dimension::Site,
      Dimension::Vlan,
      Dimension::Manufacturer,
      Dimension::Os,
    ]
    .into_iter()
    .map(|dimension| UniqueCount {
      dimension,
      label: dimension.plural(),
      count: self.unique(dimension),
    })
    .collect();

    SummaryStats {
      batch_id: self.batch_id.clone(),
      total_failures: self.records,
      skipped_rows: self.skipped_rows,
      first_seen: self.first_seen,
      last_seen: self.last_seen,
      unique,
      probes: self.probe_summary(),
    }
  }
}

fn observe_text(counter: &mut FrequencyCounter<String>, value: &str) {
  if !value.is_empty() {
    counter.observe(&value.to_string());
  }
}

fn rank<K>(dimension: Dimension, counter: &FrequencyCounter<K>, top_n: usize) -> Distribution
where
  K: Eq + Hash + Clone + Display,
{
  let total = counter.total();
  let entries = counter
    .ranked()
    .into_iter()
    .take(top_n)
    .enumerate()
    .map(|(i, e)| DistributionEntry {
      rank: i + 1,
      value: e.value.to_string(),
      count: e.count,
      percentage: percent(e.count, total),
    })
    .collect();

  Distribution {
    dimension,
    title: dimension.title(),
    unique: counter.unique(),
    total,
    top_n,
    entries,
  }
}

fn percent(count: u64, total: u64) -> f64 {
  if total == 0 {
    0.0
  } else {
    count as f64 * 100.0 / total as f64
  }
}
