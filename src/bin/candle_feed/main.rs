//! Candle feed tool.
//!
//! Reads a raw price-tick dump (the indexer's JSON wire format),
//! aggregates it into OHLC candles at the requested chart period and
//! prints one candle per line as JSON. Useful for eyeballing chart data
//! without a running UI.

use std::{
    fs,
    path::PathBuf,
    process::exit,
    time::{SystemTime, UNIX_EPOCH},
};

use clap::Parser;
use tracing::info;
use vault_sdk::{
    candles::{self, PriceTick},
    types::ChartPeriod,
};

#[derive(Debug, Parser)]
#[command(name = "candle-feed")]
#[command(about = "Aggregate raw price ticks into OHLC candles")]
struct Args {
    /// Path to a JSON array of price ticks
    /// (e.g. `[{"timestamp": 1700000000, "price": "3000.5"}, ...]`)
    #[arg(long)]
    ticks: PathBuf,

    /// Chart period (5m, 15m, 1h, 4h, 1d)
    #[arg(long, default_value = "1h")]
    period: ChartPeriod,

    /// Live average price to overlay as the current candle
    #[arg(long)]
    current_price: Option<f64>,
}

fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let raw = match fs::read_to_string(&args.ticks) {
        Ok(raw) => raw,
        Err(e) => {
            eprintln!("Failed to read {}: {}", args.ticks.display(), e);
            exit(1);
        }
    };

    let ticks: Vec<PriceTick> = match serde_json::from_str(&raw) {
        Ok(ticks) => ticks,
        Err(e) => {
            eprintln!("Failed to parse ticks: {}", e);
            exit(1);
        }
    };

    let period_secs = args.period.seconds();
    let tick_count = ticks.len();
    let candles = candles::to_candles(ticks, period_secs);
    let mut candles = candles::fill_gaps(candles, period_secs);

    if let Some(current_price) = args.current_price {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system clock before unix epoch")
            .as_secs();
        candles::append_current_average(&mut candles, current_price, period_secs, now);
    }

    info!(
        ticks = tick_count,
        candles = candles.len(),
        period = %args.period,
        "aggregated"
    );

    for candle in &candles {
        match serde_json::to_string(candle) {
            Ok(line) => println!("{}", line),
            Err(e) => {
                eprintln!("Failed to encode candle: {}", e);
                exit(1);
            }
        }
    }
}
