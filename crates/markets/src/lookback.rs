use serde::Serialize;

/// A fixed trading-session offset used to compute a percent change.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lookback {
    pub key: &'static str,
    pub days: usize,
    pub label: &'static str,
}

impl Lookback {
    pub const fn new(key: &'static str, days: usize, label: &'static str) -> Self {
        Self { key, days, label }
    }
}

/// 1 day, 1 week, 1 month and 1 year, in trading sessions.
pub const LOOKBACKS: [Lookback; 4] = [
    Lookback::new("1d", 1, "1 Day"),
    Lookback::new("1w", 5, "1 Week"),
    Lookback::new("1m", 21, "1 Month"),
    Lookback::new("1y", 252, "1 Year"),
];
