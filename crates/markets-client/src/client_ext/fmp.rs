use crate::error::{Error, Result};
use crate::schema::{parse_history, HistoricalSeries};
use reqwest::{Client, Url};
use std::future::Future;

pub const DEFAULT_BASE_URL: &str = "https://financialmodelingprep.com/api/v3";
pub const DEFAULT_TIMESERIES: u32 = 400;

/// Where, and how much history, to request from Financial Modeling Prep.
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoint {
    pub base_url: String,
    pub timeseries: u32,
}

impl Default for Endpoint {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeseries: DEFAULT_TIMESERIES,
        }
    }
}

impl Endpoint {
    /// `{base}/historical-price-full/{ticker}?timeseries={n}&apikey={key}`
    pub fn url(&self, ticker: &str, api_key: &str) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| Error::Config(format!("Invalid base URL {}: {e}", self.base_url)))?;
        url.path_segments_mut()
            .map_err(|_| Error::Config(format!("Invalid base URL {}", self.base_url)))?
            .pop_if_empty()
            .push("historical-price-full")
            .push(ticker);
        url.query_pairs_mut()
            .append_pair("timeseries", &self.timeseries.to_string())
            .append_pair("apikey", api_key);
        Ok(url)
    }
}

pub trait ClientFmpExt {
    fn historical_prices(
        &self,
        endpoint: &Endpoint,
        ticker: &str,
        api_key: &str,
    ) -> impl Future<Output = Result<HistoricalSeries>> + Send;
}

/// Add-on methods for [`reqwest::Client`].
///
/// [`reqwest::Client`]: https://docs.rs/reqwest/latest/reqwest/struct.Client.html
impl ClientFmpExt for Client {
    /// Fetch the most recent `endpoint.timeseries` daily closes of a single ticker.
    async fn historical_prices(
        &self,
        endpoint: &Endpoint,
        ticker: &str,
        api_key: &str,
    ) -> Result<HistoricalSeries> {
        let url = endpoint.url(ticker, api_key)?;

        // the url carries the api key, so only the ticker is logged
        log::trace!("Fetching historical closes for [{ticker}]");
        let response = self.get(url).send().await.map_err(|e| {
            let e = Error::from(e);
            log::error!("[{ticker}] price fetching error: {e}");
            e
        })?;

        let status = response.status();
        if !status.is_success() {
            log::warn!("[{ticker}] responded with {status}");
            return Err(Error::Network {
                status: Some(status.as_u16()),
                message: format!("HTTP {} fetching {ticker}", status.as_u16()),
            });
        }

        let body = response.bytes().await.map_err(|e| {
            let e = Error::from(e);
            log::error!("[{ticker}] byte transformation error: {e}");
            e
        })?;

        log::trace!("Deserializing historical closes for [{ticker}]");
        parse_history(ticker, &body)
    }
}
