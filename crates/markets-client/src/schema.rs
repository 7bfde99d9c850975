use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// One daily close, as returned by the `historical-price-full` endpoint.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct HistoricalClose {
    pub date: String,
    pub close: f64,
}

/// Daily closes ordered most-recent-first.
/// ```json
/// [
///      { "date": "2024-03-08", "close": 212.4 },
///      { "date": "2024-03-07", "close": 210.9 },
///      // ...
/// ]
/// ```
pub type HistoricalSeries = Vec<HistoricalClose>;

// `historical-price-full` schema; unknown tickers come back as `{}`
#[derive(Deserialize, Debug)]
pub struct HistoricalResponse {
    #[serde(default)]
    pub historical: Option<HistoricalSeries>,
}

/// Deserialize a response body into a non-empty series.
pub fn parse_history(ticker: &str, body: &[u8]) -> Result<HistoricalSeries> {
    let de: HistoricalResponse = serde_json::from_slice(body).map_err(|e| {
        log::error!("[{ticker}] malformed historical payload: {e}");
        Error::Data(format!("Malformed historical data for {ticker}: {e}"))
    })?;

    match de.historical {
        Some(series) if !series.is_empty() => Ok(series),
        _ => Err(Error::no_history(ticker)),
    }
}
