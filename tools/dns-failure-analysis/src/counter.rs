//! Frequency counters: keyed counts in first-seen order, and a 24-slot hourly histogram.

use std::collections::HashMap;
use std::hash::Hash;

/// Count for one observed value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterEntry<K> {
  pub value: K,
  pub count: u64,
}

/// Occurrence counts keyed by value.
///
/// Entries are created on first observation and kept in first-seen order, so
/// ranking ties resolve the same way on every run.
#[derive(Debug, Clone)]
pub struct FrequencyCounter<K> {
  index: HashMap<K, usize>,
  entries: Vec<CounterEntry<K>>,
  total: u64,
}

impl<K> Default for FrequencyCounter<K> {
  fn default() -> Self {
    Self {
      index: HashMap::new(),
      entries: Vec::new(),
      total: 0,
    }
  }
}

impl<K: Eq + Hash + Clone> FrequencyCounter<K> {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn observe(&mut self, value: &K) {
    match self.index.get(value) {
      Some(&slot) => self.entries[slot].count += 1,
      None => {
        self.index.insert(value.clone(), self.entries.len());
        self.entries.push(CounterEntry {
          value: value.clone(),
          count: 1,
        });
      }
    }
    self.total += 1;
  }

  pub fn count(&self, value: &K) -> u64 {
    self
      .index
      .get(value)
      .map(|&slot| self.entries[slot].count)
      .unwrap_or(0)
  }

  /// Distinct values observed.
  pub fn unique(&self) -> usize {
    self.entries.len()
  }

  /// Sum of all counts.
  pub fn total(&self) -> u64 {
    self.total
  }

  /// Entries by count descending; ties keep first-seen order.
  pub fn ranked(&self) -> Vec<&CounterEntry<K>> {
    let mut ranked: Vec<&CounterEntry<K>> = self.entries.iter().collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked
  }
}

pub const HOURS_PER_DAY: usize = 24;

/// Failure counts per hour of day.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HourlyHistogram {
  slots: [u64; HOURS_PER_DAY],
}

impl HourlyHistogram {
  /// Hours outside 0..24 are ignored.
  pub fn observe(&mut self, hour: u8) {
    if let Some(slot) = self.slots.get_mut(hour as usize) {
      *slot += 1;
    }
  }

  pub fn count(&self, hour: u8) -> u64 {
    self.slots.get(hour as usize).copied().unwrap_or(0)
  }

  pub fn total(&self) -> u64 {
    self.slots.iter().sum()
  }

  /// Busiest hour's count.
  pub fn peak(&self) -> u64 {
    self.slots.iter().copied().max().unwrap_or(0)
  }
}
