//! Price-candle aggregation.
//!
//! Turns the indexer's raw tick stream into the gap-free, strictly
//! time-ordered OHLC sequence chart renderers expect:
//!
//! 1. [`dedup_ticks`] — drop duplicate timestamps (overlapping indexer
//!    pages) and sort ascending;
//! 2. [`to_candles`] — bucket into fixed periods, seeding each open from
//!    the previous close;
//! 3. [`fill_gaps`] — synthesize flat candles for empty periods;
//! 4. [`append_current_average`] — overlay the live average price as the
//!    current candle.
//!
//! Prices here are `f64` at display scale — charting tolerates floating
//! point; settlement math in [`crate::pool`]/[`crate::margin`] never
//! comes through this module.

mod types;

use itertools::Itertools;
use tracing::trace;

pub use types::{PriceCandle, PriceTick};

/// Merges indexer result pages into one tick list, dropping the overlap
/// between consecutive pages.
pub fn merge_pages(pages: Vec<Vec<PriceTick>>) -> Vec<PriceTick> {
    dedup_ticks(pages.into_iter().flatten().collect())
}

/// Deduplicates ticks by exact timestamp (first occurrence wins) and
/// sorts them ascending.
pub fn dedup_ticks(ticks: Vec<PriceTick>) -> Vec<PriceTick> {
    let total = ticks.len();
    let deduped = ticks
        .into_iter()
        .unique_by(|tick| tick.timestamp)
        .sorted_by_key(|tick| tick.timestamp)
        .collect::<Vec<_>>();
    if deduped.len() < total {
        trace!(dropped = total - deduped.len(), "dropped duplicate ticks");
    }
    deduped
}

/// Aggregates ticks into OHLC candles of `period_secs`.
///
/// Ticks are deduplicated and sorted first. Bucket keys are timestamps
/// rounded down to the period; on a bucket transition the finished
/// candle is flushed and the next candle opens at the previous close.
/// The trailing (possibly still open) bucket is flushed as well. Fewer
/// than two ticks produce no candles.
///
/// # Panics
///
/// If `period_secs` is zero.
pub fn to_candles(ticks: Vec<PriceTick>, period_secs: u64) -> Vec<PriceCandle> {
    assert!(period_secs > 0, "candle period must be positive");
    let ticks = dedup_ticks(ticks);
    if ticks.len() < 2 {
        return Vec::new();
    }

    let mut candles = Vec::new();
    let first = ticks[0];
    let mut time = first.timestamp - first.timestamp % period_secs;
    let (mut open, mut high, mut low, mut close) =
        (first.price, first.price, first.price, first.price);

    for tick in &ticks[1..] {
        let bucket = tick.timestamp - tick.timestamp % period_secs;
        if bucket != time {
            candles.push(PriceCandle {
                time,
                open,
                high,
                low,
                close,
            });
            open = close;
            high = open.max(tick.price);
            low = open.min(tick.price);
            time = bucket;
        } else {
            high = high.max(tick.price);
            low = low.min(tick.price);
        }
        close = tick.price;
    }
    candles.push(PriceCandle {
        time,
        open,
        high,
        low,
        close,
    });
    candles
}

/// Fills missing periods between adjacent candles with flat candles
/// carrying the previous candle's open, so renderers never see a time
/// gap. Fewer than two candles are returned unchanged.
pub fn fill_gaps(candles: Vec<PriceCandle>, period_secs: u64) -> Vec<PriceCandle> {
    if candles.len() < 2 {
        return candles;
    }

    let mut filled = Vec::with_capacity(candles.len());
    filled.push(candles[0]);
    for next in &candles[1..] {
        let last = filled[filled.len() - 1];
        let mut time = last.time + period_secs;
        while time < next.time {
            filled.push(PriceCandle::flat(time, last.open));
            time += period_secs;
        }
        filled.push(*next);
    }
    filled
}

/// Overlays the live average price as the current candle.
///
/// If `now` falls into the last candle's bucket, its close/high/low are
/// updated in place; otherwise a new candle is appended, opening at the
/// prior close. An empty sequence is left untouched (nothing to seed
/// the open from).
pub fn append_current_average(
    candles: &mut Vec<PriceCandle>,
    current_average_price: f64,
    period_secs: u64,
    now: u64,
) {
    let Some(last) = candles.last_mut() else {
        return;
    };
    let current_time = now - now % period_secs;
    if current_time == last.time {
        last.close = current_average_price;
        last.high = last.high.max(current_average_price);
        last.low = last.low.min(current_average_price);
    } else {
        let open = last.close;
        candles.push(PriceCandle {
            time: current_time,
            open,
            close: current_average_price,
            high: open.max(current_average_price),
            low: open.min(current_average_price),
        });
    }
}
