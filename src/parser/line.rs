//! Line parser for traceroute transcript output.
//!
//! A data line looks like:
//!
//! ```text
//!  3  host-a (10.0.0.1)  12.345 ms  host-b (10.0.0.2)  13.210 ms  *
//! ```
//!
//! The leading token is the hop number. After it come host markers
//! (`name (address)`), RTT markers (`<number> ms`) and timeout markers (`*`)
//! in whatever order the utility printed them.

use super::schema::{HopNumber, HostCandidate, LineObservation};
use crate::utils::config::{RTT_UNIT, TIMEOUT_MARKER};
use crate::utils::error::LineError;
use regex::Regex;
use std::sync::OnceLock;

fn host_marker_re() -> &'static Regex {
    static HOST_MARKER_RE: OnceLock<Regex> = OnceLock::new();
    HOST_MARKER_RE
        .get_or_init(|| Regex::new(r"(\S+) \(([^)]*)\)").expect("valid host marker regex"))
}

/// Parse one data line (anything after the header)
///
/// **Public** - used by the run reader
///
/// Hosts and samples are captured raw: a host repeated across probes is
/// returned once per occurrence. Deduplication happens at aggregation.
///
/// # Errors
/// * `LineError::MalformedLine` - first token is not a positive integer
pub fn parse_line(line: &str) -> Result<LineObservation, LineError> {
    let trimmed = line.trim();
    let (hop_token, rest) = trimmed
        .split_once(char::is_whitespace)
        .unwrap_or((trimmed, ""));

    let hop = parse_hop_number(hop_token)
        .ok_or_else(|| LineError::MalformedLine(line.to_string()))?;

    Ok(LineObservation {
        hop,
        hosts: extract_hosts(rest),
        samples: extract_rtts(rest),
        timeouts: count_timeouts(rest),
    })
}

/// Hop numbers are 1-based; zero and anything non-decimal is rejected
fn parse_hop_number(token: &str) -> Option<HopNumber> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse::<HopNumber>().ok().filter(|hop| *hop > 0)
}

/// Every `name (address)` marker, in order of appearance
pub fn extract_hosts(text: &str) -> Vec<HostCandidate> {
    host_marker_re()
        .captures_iter(text)
        .map(|caps| HostCandidate::new(&caps[1], &caps[2]))
        .collect()
}

/// Every numeric token immediately followed by an `ms` token
///
/// Negative and non-finite values are not latencies and are dropped.
pub fn extract_rtts(text: &str) -> Vec<f64> {
    let tokens: Vec<&str> = text.split_whitespace().collect();

    tokens
        .windows(2)
        .filter(|pair| pair[1] == RTT_UNIT)
        .filter_map(|pair| parse_rtt_value(pair[0]))
        .collect()
}

fn parse_rtt_value(token: &str) -> Option<f64> {
    // f64::from_str accepts "inf"/"NaN"; only plain decimals count here
    if !token.bytes().all(|b| b.is_ascii_digit() || b == b'.') {
        return None;
    }
    token
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && *value >= 0.0)
}

fn count_timeouts(text: &str) -> usize {
    text.split_whitespace()
        .filter(|token| *token == TIMEOUT_MARKER)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_line() {
        let obs = parse_line("3  host-a (10.0.0.1)  12.345 ms  13.210 ms  * ").unwrap();

        assert_eq!(obs.hop, 3);
        assert_eq!(obs.hosts, vec![HostCandidate::new("host-a", "10.0.0.1")]);
        assert_eq!(obs.samples, vec![12.345, 13.210]);
        assert_eq!(obs.timeouts, 1);
    }

    #[test]
    fn test_timeout_only_line() {
        let obs = parse_line(" 7  * * *").unwrap();

        assert_eq!(obs.hop, 7);
        assert!(obs.hosts.is_empty());
        assert!(obs.samples.is_empty());
        assert_eq!(obs.timeouts, 3);
    }

    #[test]
    fn test_multiple_hosts_on_one_line() {
        let obs =
            parse_line("4  a (1.1.1.1)  1.0 ms  b (2.2.2.2)  2.0 ms  a (1.1.1.1)  3.0 ms").unwrap();

        assert_eq!(
            obs.hosts,
            vec![
                HostCandidate::new("a", "1.1.1.1"),
                HostCandidate::new("b", "2.2.2.2"),
                HostCandidate::new("a", "1.1.1.1"),
            ]
        );
        assert_eq!(obs.samples, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_malformed_hop_token() {
        assert!(parse_line("traceroute to x (1.2.3.4), 30 hops max").is_err());
        assert!(parse_line("0  a (1.1.1.1)  1.0 ms").is_err());
        assert!(parse_line("-2  a (1.1.1.1)  1.0 ms").is_err());
        assert!(parse_line("").is_err());
    }

    #[test]
    fn test_integer_rtt_and_annotations() {
        let obs = parse_line("9  gw (9.9.9.9)  20 ms !H  21.5 ms  -1.0 ms").unwrap();
        assert_eq!(obs.samples, vec![20.0, 21.5]);
    }

    #[test]
    fn test_hop_number_alone() {
        let obs = parse_line("12").unwrap();
        assert_eq!(obs.hop, 12);
        assert!(obs.samples.is_empty());
    }

    #[test]
    fn test_samples_never_exceed_ms_tokens() {
        let lines = [
            "1  a (1.1.1.1)  0.5 ms  0.6 ms  0.7 ms",
            "2  * b (2.2.2.2)  ms  4.0 ms",
            "3  ms ms * 1.0",
            "4  nan ms inf ms 1e3 ms",
        ];

        for line in lines {
            let obs = parse_line(line).unwrap();
            let ms_tokens = line.split_whitespace().filter(|t| *t == "ms").count();
            assert!(obs.samples.len() <= ms_tokens, "line: {}", line);
        }
    }
}
