pub mod client_ext;
pub mod error;
pub mod schema;

pub use crate::error::{Error, Result};
pub use crate::schema::{HistoricalClose, HistoricalSeries};

pub mod prelude {
    pub use crate::client_ext::fmp::{ClientFmpExt as Fmp, Endpoint};
    #[allow(unused_imports)]
    pub use crate::client_ext::Client;
    pub use crate::error::{Error, Result};
    pub use crate::schema::{HistoricalClose, HistoricalSeries};

    pub fn build_client(user_agent: &str) -> Result<Client> {
        let client = reqwest::ClientBuilder::new()
            .user_agent(user_agent)
            .build()
            .map_err(Error::from)?;
        Ok(client)
    }
}
