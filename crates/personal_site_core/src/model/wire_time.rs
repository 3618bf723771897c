//! RFC 3339 wire encoding for epoch-millisecond timestamps.
//!
//! Storage keeps `EpochMillis`; clients see `2024-01-31T12:00:00Z` strings.
//! Use with `#[serde(with = "...")]`.

use crate::clock::EpochMillis;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::ser::Error as _;
use serde::Serializer;

/// Formats epoch milliseconds as an RFC 3339 UTC string.
pub fn format_millis(millis: EpochMillis) -> Option<String> {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .map(|at| at.to_rfc3339_opts(SecondsFormat::AutoSi, true))
}

/// Parses an RFC 3339 string with any offset into epoch milliseconds.
pub fn parse_millis(value: &str) -> Result<EpochMillis, chrono::ParseError> {
    DateTime::parse_from_rfc3339(value).map(|at| at.timestamp_millis())
}

fn encode<S: Serializer>(millis: EpochMillis, serializer: S) -> Result<S::Ok, S::Error> {
    let text = format_millis(millis)
        .ok_or_else(|| S::Error::custom(format!("timestamp out of range: {millis}")))?;
    serializer.serialize_str(&text)
}

fn decode<E: serde::de::Error>(value: &str) -> Result<EpochMillis, E> {
    parse_millis(value)
        .map_err(|err| E::custom(format!("invalid RFC 3339 timestamp {value:?}: {err}")))
}

pub mod rfc3339 {
    use super::{decode, encode};
    use crate::clock::EpochMillis;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        millis: &EpochMillis,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        encode(*millis, serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<EpochMillis, D::Error> {
        let text = String::deserialize(deserializer)?;
        decode(&text)
    }
}

/// Same as [`rfc3339`] for optional timestamps; `None` is `null`.
pub mod rfc3339_option {
    use super::{decode, encode};
    use crate::clock::EpochMillis;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        millis: &Option<EpochMillis>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match millis {
            Some(millis) => encode(*millis, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<EpochMillis>, D::Error> {
        Option::<String>::deserialize(deserializer)?
            .map(|text| decode(&text))
            .transpose()
    }
}
