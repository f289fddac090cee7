use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

const OFFSET_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%d %H:%M%:z"];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse an ISO-8601 timestamp as written by the legacy store.
///
/// A trailing `Z` means UTC. Values without an offset are taken as UTC, and
/// a bare date means midnight.
pub fn parse_legacy_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let value = raw.trim().replace('Z', "+00:00");
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(&value) {
        return Some(dt.with_timezone(&Utc));
    }

    let with_offset = OFFSET_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(&value, fmt).ok());
    if let Some(dt) = with_offset {
        return Some(dt.with_timezone(&Utc));
    }

    let naive = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(&value, fmt).ok());
    if let Some(dt) = naive {
        return Some(dt.and_utc());
    }

    NaiveDate::parse_from_str(&value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Legacy timestamp, or `now` when it is missing or unreadable
pub fn coerce_timestamp(raw: Option<&str>, now: DateTime<Utc>) -> DateTime<Utc> {
    let Some(raw) = raw else {
        return now;
    };

    parse_legacy_timestamp(raw).unwrap_or_else(|| {
        tracing::warn!("Unreadable legacy timestamp {:?}, using current time", raw);
        now
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    #[test]
    fn test_z_suffix_is_utc() {
        assert_eq!(
            parse_legacy_timestamp("2024-05-06T07:08:09Z"),
            Some(utc(2024, 5, 6, 7, 8, 9))
        );
    }

    #[test]
    fn test_offset_is_normalized() {
        assert_eq!(
            parse_legacy_timestamp("2024-05-06T09:08:09+02:00"),
            Some(utc(2024, 5, 6, 7, 8, 9))
        );
        assert_eq!(
            parse_legacy_timestamp("2024-05-06 09:08:09.5+02:00"),
            Some(utc(2024, 5, 6, 7, 8, 9) + Duration::milliseconds(500))
        );
    }

    #[test]
    fn test_naive_values_are_utc() {
        assert_eq!(
            parse_legacy_timestamp("2023-12-31 23:59:59.123456"),
            Some(utc(2023, 12, 31, 23, 59, 59) + Duration::microseconds(123_456))
        );
        assert_eq!(
            parse_legacy_timestamp("2023-12-31T23:59"),
            Some(utc(2023, 12, 31, 23, 59, 0))
        );
        assert_eq!(
            parse_legacy_timestamp("2023-12-31"),
            Some(utc(2023, 12, 31, 0, 0, 0))
        );
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert_eq!(parse_legacy_timestamp(""), None);
        assert_eq!(parse_legacy_timestamp("yesterday"), None);
        assert_eq!(parse_legacy_timestamp("2023-13-40 10:00:00"), None);
    }

    #[test]
    fn test_coerce_falls_back_to_now() {
        let now = utc(2025, 6, 1, 12, 0, 0);
        assert_eq!(coerce_timestamp(None, now), now);
        assert_eq!(coerce_timestamp(Some("n/a"), now), now);
        assert_eq!(
            coerce_timestamp(Some("2020-01-01T00:00:00Z"), now),
            utc(2020, 1, 1, 0, 0, 0)
        );
    }
}
