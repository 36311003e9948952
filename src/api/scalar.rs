//! Field codecs for the scalars the API does not send as plain JSON types.

use chrono::{DateTime, FixedOffset};
use serde::de::{self, Deserialize, Deserializer, Visitor};
use std::fmt;
use std::num::ParseFloatError;

/// Query timestamps (`begin`/`end`) go out as a JSON number of epoch milliseconds.
pub use chrono::serde::ts_milliseconds_option as query_timestamp;

const DATA_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid data timestamp: {0:?}")]
pub struct TimestampError(String);

/// Parse a server timestamp such as `2024-03-01 10:00:00 CET+0100`.
///
/// The zone abbreviation is informational only; the numeric offset is authoritative.
pub fn parse_data_timestamp(s: &str) -> Result<DateTime<FixedOffset>, TimestampError> {
    let invalid = || TimestampError(s.to_owned());

    let (date_time, zone) = s.rsplit_once(' ').ok_or_else(invalid)?;
    if !is_fixed_width_date_time(date_time) {
        return Err(invalid());
    }

    let offset_start = zone.find(|c: char| c == '+' || c == '-').ok_or_else(invalid)?;
    let (abbreviation, offset) = zone.split_at(offset_start);

    if !(3..=5).contains(&abbreviation.len())
        || !abbreviation.chars().all(|c| c.is_ascii_uppercase())
        || offset.len() != 5
        || !offset[1..].chars().all(|c| c.is_ascii_digit())
    {
        return Err(invalid());
    }

    DateTime::parse_from_str(&format!("{} {}", date_time, offset), DATA_TIMESTAMP_FORMAT)
        .map_err(|_| invalid())
}

/* `YYYY-MM-DD HH:MM:SS`, zero padded */
fn is_fixed_width_date_time(s: &str) -> bool {
    const LAYOUT: &[u8] = b"0000-00-00 00:00:00";

    s.len() == LAYOUT.len()
        && s.bytes().zip(LAYOUT).all(|(c, l)| match l {
            b'0' => c.is_ascii_digit(),
            _ => c == *l,
        })
}

/// Sensor readings arrive as strings; a blank reading is zero.
pub fn parse_data_float(s: &str) -> Result<f64, ParseFloatError> {
    if s.is_empty() {
        Ok(0.0)
    } else {
        s.parse()
    }
}

/// `deserialize_with` codec for optional server timestamps. `null` decodes to `None`.
pub mod data_timestamp {
    use super::*;

    pub fn deserialize<'de, D>(d: D) -> Result<Option<DateTime<FixedOffset>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(d)?
            .map(|s| parse_data_timestamp(&s).map_err(de::Error::custom))
            .transpose()
    }
}

struct QuotedFloat(f64);

struct QuotedFloatVisitor;

impl<'de> Visitor<'de> for QuotedFloatVisitor {
    type Value = QuotedFloat;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a number or a string containing one")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        parse_data_float(v)
            .map(QuotedFloat)
            .map_err(|e| E::custom(format!("invalid float {:?}: {}", v, e)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(QuotedFloat(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(QuotedFloat(v as f64))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(QuotedFloat(v as f64))
    }
}

impl<'de> Deserialize<'de> for QuotedFloat {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        d.deserialize_any(QuotedFloatVisitor)
    }
}

/// `deserialize_with` codec for a single quoted float.
pub mod quoted_f64 {
    use super::*;

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
        QuotedFloat::deserialize(d).map(|q| q.0)
    }
}

/// `deserialize_with` codec for an array of quoted floats.
pub mod quoted_f64_seq {
    use super::*;

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<f64>, D::Error> {
        Vec::<QuotedFloat>::deserialize(d).map(|v| v.into_iter().map(|q| q.0).collect())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde::{Deserialize, Serialize};

    #[derive(Deserialize)]
    struct Reading {
        #[serde(deserialize_with = "quoted_f64::deserialize")]
        value: f64,
    }

    fn reading(json: &str) -> Result<f64, serde_json::Error> {
        serde_json::from_str::<Reading>(json).map(|r| r.value)
    }

    #[test]
    fn quoted_float() {
        assert_eq!(0.0, reading(r#"{"value":""}"#).unwrap());
        assert_eq!(12.5, reading(r#"{"value":"12.5"}"#).unwrap());
        assert_eq!(-3.0, reading(r#"{"value":"-3"}"#).unwrap());
        assert_eq!(7.25, reading(r#"{"value":7.25}"#).unwrap());
        assert!(reading(r#"{"value":"abc"}"#).is_err());
        assert!(reading(r#"{"value":null}"#).is_err());
        assert!(parse_data_float("abc").is_err());
    }

    #[test]
    fn quoted_float_seq() {
        #[derive(Deserialize)]
        struct Report {
            #[serde(deserialize_with = "quoted_f64_seq::deserialize")]
            values: Vec<f64>,
        }

        let report: Report = serde_json::from_str(r#"{"values":["1.5","",3]}"#).unwrap();
        assert_eq!(vec![1.5, 0.0, 3.0], report.values);
    }

    #[test]
    fn data_timestamp_utc() {
        let parsed = parse_data_timestamp("2024-03-01 10:00:00 UTC+0000").unwrap();
        assert_eq!(Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap(), parsed);
    }

    #[test]
    fn data_timestamp_zone_abbreviations() {
        for input in [
            "2024-03-01 10:00:00 UTC+0000",
            "2024-03-01 11:00:00 CEST+0100",
            "2024-03-01 20:00:00 AWST+1000",
            "2024-03-01 05:00:00 EST-0500",
        ] {
            let parsed = parse_data_timestamp(input).unwrap();
            assert_eq!(
                Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap(),
                parsed,
                "{:?}",
                input
            );
        }
    }

    #[test]
    fn data_timestamp_keeps_offset() {
        let parsed = parse_data_timestamp("2023-11-29 09:31:54 CET+0100").unwrap();
        assert_eq!(Utc.with_ymd_and_hms(2023, 11, 29, 8, 31, 54).unwrap(), parsed);
        assert_eq!(3600, parsed.offset().local_minus_utc());
    }

    #[test]
    fn data_timestamp_rejects_other_formats() {
        for input in [
            "",
            "2024-03-01T10:00:00Z",
            "2024-03-01 10:00:00",
            "2024-03-01 10:00:00 +0000",
            "2024-03-01 10:00:00 UTC",
            "2024-03-01 10:00:00 utc+0000",
            "2024-03-01 10:00:00 UTC+00:00",
            "01/03/2024 10:00:00 UTC+0000",
            "2024-3-1 10:00:00 UTC+0000",
            "2024-03-01 9:00:00 UTC+0000",
            "2024-03-01  10:00:00 UTC+0000",
            "2024-03-01 10:00:00 A+0000",
            "2024-03-01 10:00:00 ABCDEFGH+0000",
            "2024-03-01 10:00:00 UTC+1",
        ] {
            assert!(parse_data_timestamp(input).is_err(), "{:?}", input);
        }
    }

    #[test]
    fn data_timestamp_field() {
        #[derive(Deserialize)]
        struct Sample {
            #[serde(default, deserialize_with = "data_timestamp::deserialize")]
            time: Option<DateTime<FixedOffset>>,
        }

        let sample: Sample =
            serde_json::from_str(r#"{"time":"2024-03-01 10:00:00 UTC+0000"}"#).unwrap();
        assert_eq!(
            Some(Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap()),
            sample.time.map(|t| t.with_timezone(&Utc))
        );

        let sample: Sample = serde_json::from_str(r#"{}"#).unwrap();
        assert!(sample.time.is_none());

        assert!(serde_json::from_str::<Sample>(r#"{"time":"yesterday"}"#).is_err());
    }

    #[test]
    fn query_timestamp_is_epoch_millis() {
        #[derive(Serialize, Deserialize)]
        struct Query {
            #[serde(with = "query_timestamp")]
            begin: Option<DateTime<Utc>>,
        }

        let begin = Utc.timestamp_millis_opt(1_709_287_200_123).unwrap();
        let json = serde_json::to_string(&Query { begin: Some(begin) }).unwrap();
        assert_eq!(r#"{"begin":1709287200123}"#, json);

        let decoded: Query = serde_json::from_str(&json).unwrap();
        assert_eq!(Some(1_709_287_200_123), decoded.begin.map(|b| b.timestamp_millis()));
    }
}
