use std::time::Duration;

use anyhow::{anyhow, bail, Result};

/// Suffix to milliseconds multiplier (order matters: longer suffixes first)
const UNITS: &[(&str, f64)] = &[("ms", 1.0), ("s", 1_000.0), ("m", 60_000.0)];

/// Parse interval strings like "250ms", "1.5s", "2m". A bare number is
/// taken as milliseconds. Negative, non-finite, and overflowing values
/// are rejected.
pub fn parse_duration(s: &str) -> Result<Duration> {
    let s = s.trim();

    for (suffix, multiplier) in UNITS {
        if let Some(val_str) = s.strip_suffix(suffix) {
            let val: f64 = val_str.trim().parse()?;
            if val < 0.0 {
                bail!("Negative duration: {}", s);
            }
            return Duration::try_from_secs_f64(val * multiplier / 1_000.0)
                .map_err(|_| anyhow!("Invalid duration: {}", s));
        }
    }

    if let Ok(val) = s.parse::<f64>() {
        if val < 0.0 {
            bail!("Negative duration: {}", s);
        }
        return Duration::try_from_secs_f64(val / 1_000.0)
            .map_err(|_| anyhow!("Invalid duration: {}", s));
    }

    bail!("Unknown duration format: {}", s)
}

/// Format a duration for display
pub fn format_duration(d: Duration) -> String {
    let millis = d.as_millis();
    if millis < 1_000 {
        format!("{}ms", millis)
    } else if millis < 60_000 {
        format!("{:.1}s", d.as_secs_f64())
    } else {
        format!("{:.1}m", d.as_secs_f64() / 60.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_millisecond_suffix() {
        assert_eq!(parse_duration("250ms").unwrap(), Duration::from_millis(250));
    }

    #[test]
    fn parses_fractional_seconds() {
        let d = parse_duration("1.5s").unwrap();
        assert!((d.as_secs_f64() - 1.5).abs() < 0.0001);
    }

    #[test]
    fn parses_minutes() {
        assert_eq!(parse_duration("2m").unwrap(), Duration::from_secs(120));
    }

    #[test]
    fn bare_number_means_milliseconds() {
        assert_eq!(parse_duration("800").unwrap(), Duration::from_millis(800));
    }

    #[test]
    fn rejects_garbage_and_negatives() {
        assert!(parse_duration("fast").is_err());
        assert!(parse_duration("-5s").is_err());
    }

    #[test]
    fn rejects_nonfinite_and_overflowing_values() {
        assert!(parse_duration("inf").is_err());
        assert!(parse_duration("nan").is_err());
        assert!(parse_duration("1e300s").is_err());
        assert!(parse_duration("1e300").is_err());
    }

    #[test]
    fn formats_round_trip_magnitudes() {
        assert_eq!(format_duration(Duration::from_millis(250)), "250ms");
        assert_eq!(format_duration(Duration::from_millis(1500)), "1.5s");
        assert_eq!(format_duration(Duration::from_secs(90)), "1.5m");
    }
}
