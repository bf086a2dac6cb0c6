//! Timestamp decoding strategies.
//!
//! The two backends disagree on timestamp formats. Mojang sends strict
//! RFC 3339 values without fractional seconds, while CurseForge sends a
//! variable number of fractional digits (and occasionally no offset at all).
//! Models pick a strategy per field through the serde helper modules below.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// How to turn a timestamp string into a UTC date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateStrategy {
    /// RFC 3339 with an explicit offset and whole seconds only.
    #[default]
    Iso8601,
    /// RFC 3339 with any fractional precision, falling back to less precise
    /// layouts before giving up.
    FlexibleIso8601,
}

/// A timestamp that no step of a strategy could parse.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unrecognized {strategy:?} timestamp: {input:?}")]
pub struct DateParseError {
    pub strategy: DateStrategy,
    pub input: String,
}

/// Naive layouts tried once the offset-carrying forms have failed, most
/// precise first. Values without an offset are taken as UTC.
const NAIVE_LAYOUTS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S"];

impl DateStrategy {
    pub fn parse(self, input: &str) -> Result<DateTime<Utc>, DateParseError> {
        let parsed = match self {
            DateStrategy::Iso8601 => parse_strict(input),
            DateStrategy::FlexibleIso8601 => parse_flexible(input),
        };
        parsed.ok_or_else(|| DateParseError {
            strategy: self,
            input: input.to_string(),
        })
    }
}

fn parse_strict(input: &str) -> Option<DateTime<Utc>> {
    if has_fraction(input) {
        return None;
    }
    DateTime::parse_from_rfc3339(input)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn parse_flexible(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();

    // RFC 3339 accepts any number of fractional digits as well as none.
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }

    for layout in NAIVE_LAYOUTS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, layout) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// True when the time portion carries a fractional-seconds part.
fn has_fraction(input: &str) -> bool {
    input
        .split_once('T')
        .is_some_and(|(_, time)| time.contains('.'))
}

fn deserialize_with<'de, D>(
    strategy: DateStrategy,
    deserializer: D,
) -> Result<DateTime<Utc>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: String = serde::Deserialize::deserialize(deserializer)?;
    strategy.parse(&raw).map_err(serde::de::Error::custom)
}

fn deserialize_option_with<'de, D>(
    strategy: DateStrategy,
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Option<String> = serde::Deserialize::deserialize(deserializer)?;
    match raw {
        Some(raw) => strategy
            .parse(&raw)
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&value.to_rfc3339())
}

/// `#[serde(with = "craftmeta_core::dates::iso8601")]`
pub mod iso8601 {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserialize_with(DateStrategy::Iso8601, deserializer)
    }

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        super::serialize(value, serializer)
    }

    pub mod option {
        use super::super::*;

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
        where
            D: serde::Deserializer<'de>,
        {
            deserialize_option_with(DateStrategy::Iso8601, deserializer)
        }

        pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: serde::Serializer,
        {
            match value {
                Some(dt) => super::super::serialize(dt, serializer),
                None => serializer.serialize_none(),
            }
        }
    }
}

/// `#[serde(with = "craftmeta_core::dates::flexible")]`
pub mod flexible {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserialize_with(DateStrategy::FlexibleIso8601, deserializer)
    }

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        super::serialize(value, serializer)
    }

    pub mod option {
        use super::super::*;

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
        where
            D: serde::Deserializer<'de>,
        {
            deserialize_option_with(DateStrategy::FlexibleIso8601, deserializer)
        }

        pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: serde::Serializer,
        {
            match value {
                Some(dt) => super::super::serialize(dt, serializer),
                None => serializer.serialize_none(),
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/dates_tests.rs"]
mod tests;
