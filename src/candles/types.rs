//! Chart data structures and their wire forms.

use chrono::DateTime;
use serde::{Deserialize, Deserializer, de};

/// Raw price tick from the indexer.
///
/// The indexer is loose about encodings: timestamps arrive as unix
/// seconds or ISO-8601 strings, prices as numbers or decimal strings.
/// Deserialization normalizes all of them; ticks may still be
/// out of order or duplicated across page boundaries and are cleaned up
/// by [`super::dedup_ticks`].
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct PriceTick {
    /// Unix timestamp in seconds.
    #[serde(alias = "t", deserialize_with = "timestamp_secs")]
    pub timestamp: u64,

    /// Price at display scale.
    #[serde(alias = "p", alias = "value", deserialize_with = "loose_price")]
    pub price: f64,
}

/// One OHLC candle of a fixed chart period.
///
/// Produced by [`super::to_candles`]; `time` is the bucket start, and a
/// candle sequence is strictly increasing in `time` with no duplicates.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct PriceCandle {
    pub time: u64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl PriceCandle {
    /// Flat candle with all four prices equal, used for gap filling.
    pub(crate) fn flat(time: u64, price: f64) -> Self {
        Self {
            time,
            open: price,
            high: price,
            low: price,
            close: price,
        }
    }
}

fn timestamp_secs<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Seconds(u64),
        Iso(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Seconds(secs) => Ok(secs),
        Raw::Iso(text) => {
            let parsed = DateTime::parse_from_rfc3339(&text).map_err(de::Error::custom)?;
            u64::try_from(parsed.timestamp())
                .map_err(|_| de::Error::custom("timestamp before unix epoch"))
        }
    }
}

fn loose_price<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(price) => Ok(price),
        Raw::Text(text) => text.parse().map_err(de::Error::custom),
    }
}
