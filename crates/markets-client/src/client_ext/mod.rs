pub mod fmp;

pub use reqwest::Client;
