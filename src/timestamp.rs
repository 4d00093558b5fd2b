//! Collector timestamp formatting.
//!
//! Log records carry epoch timestamps whose first ten decimal digits are
//! seconds; any trailing digits are sub-second precision and are discarded.
//! The collector expects `YYYYMMDDHHMMSS`, rendered either in the host's
//! local zone (the historical behaviour) or in UTC.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};

/// `strftime` pattern of `logCreatedTimestamp`.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

const TEN_DIGITS: u64 = 10_000_000_000;

/// Zone used when rendering timestamps.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TimestampZone {
    /// The host's configured local zone.
    #[default]
    Local,
    Utc,
}

impl fmt::Display for TimestampZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Local => "local",
            Self::Utc => "utc",
        })
    }
}

impl FromStr for TimestampZone {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "utc" | "z" => Ok(Self::Utc),
            _ => Err(()),
        }
    }
}

/// Keep the leading ten decimal digits of `raw` as epoch seconds.
pub fn epoch_seconds(raw: u64) -> i64 {
    let mut value = raw;
    while value >= TEN_DIGITS {
        value /= 10;
    }
    // At most ten digits, so always within i64.
    value as i64
}

/// Render epoch `seconds` as `YYYYMMDDHHMMSS` in `zone`.
///
/// Returns `None` when `seconds` lies outside chrono's representable range.
pub fn format_timestamp(seconds: i64, zone: TimestampZone) -> Option<String> {
    let utc = DateTime::from_timestamp(seconds, 0)?;
    let text = match zone {
        TimestampZone::Utc => utc.format(TIMESTAMP_FORMAT).to_string(),
        TimestampZone::Local => utc
            .with_timezone(&Local)
            .format(TIMESTAMP_FORMAT)
            .to_string(),
    };
    Some(text)
}

/// Inverse of [`format_timestamp`].
///
/// Local times that fall into a daylight-saving gap yield `None`; ambiguous
/// ones resolve to the earlier instant.
pub fn parse_timestamp(text: &str, zone: TimestampZone) -> Option<i64> {
    let naive = NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT).ok()?;
    match zone {
        TimestampZone::Utc => Some(naive.and_utc().timestamp()),
        TimestampZone::Local => Local
            .from_local_datetime(&naive)
            .earliest()
            .map(|dt| dt.timestamp()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case(1_514_808_000_123, 1_514_808_000)]
    #[case(1_514_808_000, 1_514_808_000)]
    #[case(1_514_808_000_123_456, 1_514_808_000)]
    #[case(42, 42)]
    #[case(0, 0)]
    fn keeps_first_ten_digits(#[case] raw: u64, #[case] expected: i64) {
        assert_eq!(epoch_seconds(raw), expected);
    }

    #[rstest]
    fn formats_in_utc() {
        let text = format_timestamp(1_514_808_000, TimestampZone::Utc).expect("in range");
        assert_eq!(text, "20180101120000");
    }

    #[rstest]
    fn local_round_trip_for_unambiguous_time() {
        // Mid-January noon is clear of daylight-saving transitions.
        let seconds = 1_705_320_000;
        let text = format_timestamp(seconds, TimestampZone::Local).expect("in range");
        assert_eq!(text.len(), 14);
        assert_eq!(parse_timestamp(&text, TimestampZone::Local), Some(seconds));
    }

    #[rstest]
    #[case("utc", Some(TimestampZone::Utc))]
    #[case("UTC", Some(TimestampZone::Utc))]
    #[case(" local ", Some(TimestampZone::Local))]
    #[case("mars", None)]
    fn parses_zone_names(#[case] input: &str, #[case] expected: Option<TimestampZone>) {
        assert_eq!(input.parse::<TimestampZone>().ok(), expected);
    }

    #[rstest]
    fn rejects_malformed_text() {
        assert_eq!(parse_timestamp("2018-01-01", TimestampZone::Utc), None);
    }

    proptest! {
        #[test]
        fn utc_round_trip_recovers_seconds(raw in 1_000_000_000_000u64..10_000_000_000_000u64) {
            let seconds = epoch_seconds(raw);
            prop_assert_eq!(seconds, (raw / 1_000) as i64);
            let text = format_timestamp(seconds, TimestampZone::Utc).expect("in range");
            prop_assert_eq!(text.len(), 14);
            prop_assert_eq!(parse_timestamp(&text, TimestampZone::Utc), Some(seconds));
        }
    }
}
