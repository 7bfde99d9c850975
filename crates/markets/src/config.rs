use crate::fs::read_json;
use markets_client::client_ext::fmp::{Endpoint, DEFAULT_TIMESERIES};
use markets_client::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Config file picked up from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "markets.json";

/// Value shipped in example configs; treated the same as no key at all.
pub const PLACEHOLDER_API_KEY: &str = "YOUR_FMP_API_KEY";

pub const MISSING_KEY_STATUS: &str =
    "Please add your FMP API key (FMP_API_KEY or the config file).";

/// A named display entry mapped to one ticker symbol.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct WatchItem {
    pub name: String,
    pub ticker: String,
}

impl WatchItem {
    pub fn new(name: &str, ticker: &str) -> Self {
        Self {
            name: name.to_string(),
            ticker: ticker.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum View {
    #[default]
    Sectors,
    Factors,
}

impl View {
    pub fn other(self) -> Self {
        match self {
            View::Sectors => View::Factors,
            View::Factors => View::Sectors,
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            View::Sectors => write!(f, "sectors"),
            View::Factors => write!(f, "factors"),
        }
    }
}

const DEFAULT_SECTORS: &[(&str, &str)] = &[
    ("Technology", "XLK"),
    ("Financials", "XLF"),
    ("Health Care", "XLV"),
    ("Energy", "XLE"),
    ("Materials", "XLB"),
    ("Industrials", "XLI"),
    ("Consumer Discretionary", "XLY"),
    ("Consumer Staples", "XLP"),
    ("Utilities", "XLU"),
    ("Real Estate", "XLRE"),
    ("Communication Services", "XLC"),
    // commodities
    ("Gold", "GLD"),
    ("Silver", "SLV"),
    ("Metals (miners)", "GDX"),
    ("Broad Commodities", "DBC"),
];

const DEFAULT_FACTORS: &[(&str, &str)] = &[
    ("Value (ETF)", "VLUE"),
    ("Momentum (ETF)", "MTUM"),
    ("Quality (ETF)", "QUAL"),
    ("Size (Small)", "IWM"),
    ("Low Volatility", "USMV"),
    ("Growth", "VUG"),
];

fn watchlist(pairs: &[(&str, &str)]) -> Vec<WatchItem> {
    pairs
        .iter()
        .map(|(name, ticker)| WatchItem::new(name, ticker))
        .collect()
}

/// On-disk shape of `markets.json`; every field is optional.
/// ```json
/// {
///     "api_key": "...",
///     "factors": [ { "name": "Growth", "ticker": "VUG" } ]
/// }
/// ```
#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct ConfigFile {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub timeseries: Option<u32>,
    pub sectors: Option<Vec<WatchItem>>,
    pub factors: Option<Vec<WatchItem>>,
}

/// Everything the fetcher and the dashboard need, resolved once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_key: Option<String>,
    pub endpoint: Endpoint,
    pub sectors: Vec<WatchItem>,
    pub factors: Vec<WatchItem>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: Endpoint::default(),
            sectors: watchlist(DEFAULT_SECTORS),
            factors: watchlist(DEFAULT_FACTORS),
        }
    }
}

impl Config {
    /// Defaults, then the config file (`path`, or `./markets.json` if present), then the
    /// `FMP_API_KEY` / `FMP_BASE_URL` environment variables.
    pub async fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let file = match path {
            Some(path) => {
                log::debug!("Reading config from {}", path.display());
                Some(read_json::<ConfigFile>(path).await?)
            }
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                log::debug!("Reading config from ./{DEFAULT_CONFIG_FILE}");
                Some(read_json::<ConfigFile>(DEFAULT_CONFIG_FILE).await?)
            }
            None => None,
        };

        Ok(Self::layered(file, |key| dotenv::var(key).ok()))
    }

    pub fn layered(file: Option<ConfigFile>, env: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(file) = file {
            if file.api_key.is_some() {
                config.api_key = file.api_key;
            }
            if let Some(base_url) = file.base_url {
                config.endpoint.base_url = base_url;
            }
            config.endpoint.timeseries = file.timeseries.unwrap_or(DEFAULT_TIMESERIES);
            if let Some(sectors) = file.sectors {
                config.sectors = sectors;
            }
            if let Some(factors) = file.factors {
                config.factors = factors;
            }
        }

        // `FMP_API_KEY=` in a `.env` must not shadow the file's key
        let env = |key: &str| env(key).filter(|value| !value.trim().is_empty());
        if let Some(key) = env("FMP_API_KEY") {
            config.api_key = Some(key);
        }
        if let Some(base_url) = env("FMP_BASE_URL") {
            config.endpoint.base_url = base_url;
        }

        config
    }

    /// The usable API key: trimmed, non-empty, and not the placeholder.
    pub fn credential(&self) -> Result<&str, Error> {
        match self.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() && key != PLACEHOLDER_API_KEY => Ok(key),
            _ => Err(Error::missing_credential()),
        }
    }

    pub fn has_credential(&self) -> bool {
        self.credential().is_ok()
    }

    pub fn watchlist(&self, view: View) -> &[WatchItem] {
        match view {
            View::Sectors => &self.sectors,
            View::Factors => &self.factors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn defaults_match_the_shipped_watchlists() {
        let config = Config::default();
        assert_eq!(config.sectors.len(), 15);
        assert_eq!(config.factors.len(), 6);
        assert_eq!(config.sectors[0], WatchItem::new("Technology", "XLK"));
        assert_eq!(config.factors[5], WatchItem::new("Growth", "VUG"));
        assert_eq!(config.endpoint.timeseries, 400);
        assert!(!config.has_credential());
    }

    #[test]
    fn placeholder_and_blank_keys_are_missing() {
        for key in ["", "   ", PLACEHOLDER_API_KEY, " YOUR_FMP_API_KEY "] {
            let config = Config {
                api_key: Some(key.to_string()),
                ..Config::default()
            };
            assert_eq!(config.credential(), Err(Error::missing_credential()), "{key:?}");
        }

        let config = Config {
            api_key: Some("  abc123 ".to_string()),
            ..Config::default()
        };
        assert_eq!(config.credential(), Ok("abc123"));
    }

    #[test]
    fn file_lists_replace_defaults_per_view() {
        let file = ConfigFile {
            factors: Some(vec![WatchItem::new("Growth", "VUG")]),
            ..ConfigFile::default()
        };
        let config = Config::layered(Some(file), no_env);
        assert_eq!(config.sectors, Config::default().sectors);
        assert_eq!(config.watchlist(View::Factors), &[WatchItem::new("Growth", "VUG")]);
    }

    #[test]
    fn environment_wins_over_file() {
        let file = ConfigFile {
            api_key: Some("from-file".to_string()),
            base_url: Some("http://file.local".to_string()),
            ..ConfigFile::default()
        };
        let config = Config::layered(Some(file), |key| match key {
            "FMP_API_KEY" => Some("from-env".to_string()),
            _ => None,
        });
        assert_eq!(config.credential(), Ok("from-env"));
        assert_eq!(config.endpoint.base_url, "http://file.local");
    }

    #[test]
    fn blank_environment_values_keep_the_file_values() {
        let file = ConfigFile {
            api_key: Some("valid".to_string()),
            base_url: Some("http://file.local".to_string()),
            ..ConfigFile::default()
        };
        let config = Config::layered(Some(file), |key| match key {
            "FMP_API_KEY" => Some(String::new()),
            "FMP_BASE_URL" => Some("  ".to_string()),
            _ => None,
        });
        assert_eq!(config.credential(), Ok("valid"));
        assert_eq!(config.endpoint.base_url, "http://file.local");
    }

    #[tokio::test]
    async fn loads_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "api_key": "k",
                "timeseries": 260,
                "sectors": [ {{ "name": "Technology", "ticker": "XLK" }} ]
            }}"#
        )
        .unwrap();

        let parsed: ConfigFile = read_json(file.path()).await.unwrap();
        let config = Config::layered(Some(parsed), no_env);
        assert_eq!(config.api_key.as_deref(), Some("k"));
        assert_eq!(config.endpoint.timeseries, 260);
        assert_eq!(config.sectors, vec![WatchItem::new("Technology", "XLK")]);
        assert_eq!(config.factors.len(), 6);
    }

    #[tokio::test]
    async fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        assert!(Config::load(Some(path.as_path())).await.is_err());
    }

    #[test]
    fn view_toggles() {
        assert_eq!(View::Sectors.other(), View::Factors);
        assert_eq!(View::Factors.other().to_string(), "sectors");
    }
}
