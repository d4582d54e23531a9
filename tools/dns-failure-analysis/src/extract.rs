//! Named pattern extractors for the free-text event description and timestamp.
//!
//! Each extractor is a pure function from text to an optional value; first
//! match wins. Nothing here validates beyond the shape of the pattern.

use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::Regex;

static DOMAIN: Lazy<Regex> = Lazy::new(|| Regex::new(r#"for "([^"]*?)""#).expect("domain pattern"));

static IP_PAIR: Lazy<Regex> = Lazy::new(|| {
  Regex::new(r"from ([0-9]+\.[0-9]+\.[0-9]+\.[0-9]+) to ([0-9]+\.[0-9]+\.[0-9]+\.[0-9]+)")
    .expect("ip pair pattern")
});

static VLAN: Lazy<Regex> = Lazy::new(|| Regex::new(r"on vlan ([0-9]+)").expect("vlan pattern"));

static HOUR: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"[0-9]{4}-[0-9]{2}-[0-9]{2} ([0-9]{2}):").expect("hour pattern"));

static DATETIME: Lazy<Regex> = Lazy::new(|| {
  Regex::new(r"[0-9]{4}-[0-9]{2}-[0-9]{2} [0-9]{2}:[0-9]{2}:[0-9]{2}").expect("datetime pattern")
});

/// Queried domain from `for "<domain>"`.
pub fn extract_domain(text: &str) -> Option<String> {
  DOMAIN.captures(text).map(|c| c[1].to_string())
}

/// (source, destination) from `from <a.b.c.d> to <a.b.c.d>`. Octets are not range-checked.
pub fn extract_ip_pair(text: &str) -> Option<(String, String)> {
  IP_PAIR
    .captures(text)
    .map(|c| (c[1].to_string(), c[2].to_string()))
}

/// VLAN id from `on vlan <digits>`. Digits that overflow a u32 count as absent.
pub fn extract_vlan(text: &str) -> Option<u32> {
  VLAN.captures(text).and_then(|c| c[1].parse().ok())
}

/// Hour of day from a `YYYY-MM-DD HH:` shape; hours above 23 count as absent.
pub fn extract_hour(timestamp: &str) -> Option<u8> {
  HOUR
    .captures(timestamp)
    .and_then(|c| c[1].parse::<u8>().ok())
    .filter(|h| *h < 24)
}

/// Full `YYYY-MM-DD HH:MM:SS` timestamp, if present and a real calendar time.
pub fn parse_timestamp(timestamp: &str) -> Option<NaiveDateTime> {
  let m = DATETIME.find(timestamp)?;
  NaiveDateTime::parse_from_str(m.as_str(), "%Y-%m-%d %H:%M:%S").ok()
}

/// Trim whitespace, then any surrounding double quotes.
pub fn clean_cell(raw: &str) -> String {
  raw.trim().trim_matches('"').to_string()
}
