use std::env;

use thiserror::Error;

pub const DEFAULT_PORT: u16 = 3000;
const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0";

const GOOGLE_SEARCH_ENDPOINT: &str = "https://www.googleapis.com/customsearch/v1";
const BING_SEARCH_ENDPOINT: &str = "https://api.bing.microsoft.com/v7.0/images/search";
const FLICKR_ENDPOINT: &str = "https://api.flickr.com/services/rest/";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("PORT must be a valid port number, got {0:?}")]
    InvalidPort(String),
}

/// Api keys for the providers that can run live. Any missing key only
/// downgrades its own provider to placeholder results.
#[derive(Debug, Clone, Default)]
pub struct ProviderCredentials {
    pub google_key: Option<String>,
    /// the programmable search engine id that goes with `google_key`
    pub google_cx: Option<String>,
    pub bing_key: Option<String>,
    pub flickr_key: Option<String>,
}

/// Base urls for the live APIs, overridable to point at a proxy or a mock
#[derive(Debug, Clone)]
pub struct ProviderEndpoints {
    pub google: String,
    pub bing: String,
    pub flickr: String,
}

impl Default for ProviderEndpoints {
    fn default() -> Self {
        Self {
            google: GOOGLE_SEARCH_ENDPOINT.to_owned(),
            bing: BING_SEARCH_ENDPOINT.to_owned(),
            flickr: FLICKR_ENDPOINT.to_owned(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_address: String,
    pub port: u16,
    pub user_agent: String,
    pub credentials: ProviderCredentials,
    pub endpoints: ProviderEndpoints,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_owned(),
            port: DEFAULT_PORT,
            user_agent: default_user_agent(),
            credentials: ProviderCredentials::default(),
            endpoints: ProviderEndpoints::default(),
        }
    }
}

fn default_user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

impl Config {
    /// Reads the process environment. Call `dotenv()` first to pick up a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // blank variables are common in copied .env files, treat them as unset
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();
        let port = match var("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => defaults.port,
        };
        let endpoints = ProviderEndpoints {
            google: var("GOOGLE_SEARCH_ENDPOINT").unwrap_or(defaults.endpoints.google),
            bing: var("BING_SEARCH_ENDPOINT").unwrap_or(defaults.endpoints.bing),
            flickr: var("FLICKR_ENDPOINT").unwrap_or(defaults.endpoints.flickr),
        };
        Ok(Self {
            bind_address: var("BIND_ADDRESS").unwrap_or(defaults.bind_address),
            port,
            user_agent: var("USER_AGENT").unwrap_or(defaults.user_agent),
            credentials: ProviderCredentials {
                google_key: var("GOOGLE_SEARCH_KEY"),
                google_cx: var("GOOGLE_SEARCH_CX"),
                bing_key: var("BING_SEARCH_KEY"),
                flickr_key: var("FLICKR_API_KEY"),
            },
            endpoints,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}
