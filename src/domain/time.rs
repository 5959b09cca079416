//! Timestamp parsing
//!
//! Sample reports carry ISO-like timestamps with varying precision and
//! optional offsets. All of them are normalized to a timezone-naive instant.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"];

/// Parse a timestamp string into a naive instant
///
/// Accepts RFC 3339 and offsets without a colon (`+0000`); the offset is
/// applied and the result expressed in UTC. A trailing `UTC` marker is
/// dropped. Naive date-times may use `T` or space separators, and bare dates
/// resolve to midnight.
///
/// # Examples
///
/// ```
/// use cardlive::domain::time::parse_timestamp;
///
/// let ts = parse_timestamp("2020-06-01").unwrap();
/// assert_eq!(ts.to_string(), "2020-06-01 00:00:00");
/// ```
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime, String> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.naive_utc());
    }

    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(value, format) {
            return Ok(dt.naive_utc());
        }
    }

    let value = value
        .strip_suffix("UTC")
        .map(str::trim_end)
        .unwrap_or(value);

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(dt);
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| format!("Unrecognized timestamp: '{value}'"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("2020-01-01", "2020-01-01 00:00:00" ; "bare date")]
    #[test_case("2020-01-01T10:11:12", "2020-01-01 10:11:12" ; "iso naive")]
    #[test_case("2020-01-01 10:11:12.500", "2020-01-01 10:11:12.500" ; "space separated fractional")]
    #[test_case("2020-01-01T10:11:12+02:00", "2020-01-01 08:11:12" ; "offset converted to utc")]
    #[test_case("2020-01-01T10:11:12Z", "2020-01-01 10:11:12" ; "zulu")]
    #[test_case("2020-01-01T10:11", "2020-01-01 10:11:00" ; "minutes only")]
    #[test_case("2020-07-28T15:00:24+0000", "2020-07-28 15:00:24" ; "iso compact offset")]
    #[test_case("2020-07-28 15:00:24+0000", "2020-07-28 15:00:24" ; "space compact offset")]
    #[test_case("2020-07-28 15:00:24-0130", "2020-07-28 16:30:24" ; "negative compact offset")]
    #[test_case("2020-07-28 15:00:24.853593+00:00", "2020-07-28 15:00:24.853593" ; "space fractional colon offset")]
    #[test_case("2020-07-28 15:00:24 UTC", "2020-07-28 15:00:24" ; "utc suffix")]
    #[test_case("2020-07-28T15:00:24UTC", "2020-07-28 15:00:24" ; "utc suffix no space")]
    fn test_parse_timestamp(input: &str, expected: &str) {
        assert_eq!(parse_timestamp(input).unwrap().to_string(), expected);
    }

    #[test]
    fn test_parse_timestamp_invalid() {
        assert!(parse_timestamp("yesterday").is_err());
        assert!(parse_timestamp("").is_err());
        assert!(parse_timestamp("2020-13-01").is_err());
        assert!(parse_timestamp("UTC").is_err());
    }
}
