pub mod board;
pub mod config;
pub mod fs;
pub mod lookback;
pub mod perf;
pub mod render;
pub mod source;

pub use board::{Applied, Dashboard, Phase, Snapshot, Ticket, Trigger};
pub use config::{Config, View, WatchItem};
pub use lookback::{Lookback, LOOKBACKS};
pub use markets_client::{Error, HistoricalClose, HistoricalSeries};
pub use perf::{compute, PerformanceResult, ShortSeriesPolicy};
pub use render::{render, Card, MetricCell, Tone};
pub use source::{Fetcher, HistorySource};

/// Result of one ticker's fetch-and-compute step, in watch-list order.
pub type Outcome = markets_client::Result<PerformanceResult>;
