use crate::config::Config;
use async_trait::async_trait;
use markets_client::prelude::*;

/// Where daily closes come from; one fresh round trip per call, no caching.
#[async_trait]
pub trait HistorySource: Send + Sync {
    /// Closes of `ticker`, most recent first.
    async fn history(&self, ticker: &str) -> Result<HistoricalSeries>;
}

/// [`HistorySource`] backed by the Financial Modeling Prep REST API.
pub struct Fetcher {
    client: Client,
    endpoint: Endpoint,
    api_key: Option<String>,
}

impl Fetcher {
    pub fn new(client: Client, config: &Config) -> Self {
        Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key: config.credential().ok().map(str::to_string),
        }
    }
}

#[async_trait]
impl HistorySource for Fetcher {
    async fn history(&self, ticker: &str) -> Result<HistoricalSeries> {
        let api_key = self.api_key.as_deref().ok_or_else(Error::missing_credential)?;
        self.client
            .historical_prices(&self.endpoint, ticker, api_key)
            .await
    }
}
