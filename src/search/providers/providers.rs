use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use thiserror::Error;

use crate::config::Config;
use crate::image::ImageResult;
use crate::request::HttpError;
use crate::search::placeholder;

/// Placeholder count for providers that don't pick their own
pub const DEFAULT_PLACEHOLDER_COUNT: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// What the user typed, plus an optional position from the browser
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub text: String,
    pub coordinates: Option<Coordinates>,
}

impl SearchQuery {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            coordinates: None,
        }
    }

    pub fn with_coordinates(mut self, coordinates: Option<Coordinates>) -> Self {
        self.coordinates = coordinates;
        self
    }
}

#[derive(Error, Debug)]
pub enum ProviderFailure {
    #[error("Error formatting URL")]
    Url,
    #[error("Missing credentials for {0}")]
    MissingCredentials(AllProviders),
    #[error("{0} has no live integration")]
    Unsupported(AllProviders),
    #[error("Failed to process response from request")]
    HttpError(#[from] HttpError),
}

impl From<reqwest::Error> for ProviderFailure {
    fn from(err: reqwest::Error) -> Self {
        ProviderFailure::HttpError(HttpError::ReqwestError(err))
    }
}

pub struct ProviderInput<'a> {
    pub client: Arc<Client>,
    pub config: &'a Config,
}

/// Providers turn a free-text query into normalized images from one source.
/// [`Provider::search`] is the only entry point the aggregator uses and it
/// never fails: every error is turned into placeholder or empty results here.
#[async_trait]
pub trait Provider: Sync + Send {
    fn id(&self) -> AllProviders;

    /// Whether the provider has what it needs to call its live API
    fn has_credentials(&self) -> bool {
        true
    }

    /// How many placeholders to show when credentials are missing
    fn placeholder_count(&self) -> usize {
        DEFAULT_PLACEHOLDER_COUNT
    }

    /// The live lookup. Only called when [`Provider::has_credentials`] is true
    async fn fetch(&self, query: &SearchQuery) -> Result<Vec<ImageResult>, ProviderFailure>;

    /// What to return when [`Provider::fetch`] fails
    fn fallback(&self, _query: &SearchQuery) -> Vec<ImageResult> {
        vec![]
    }

    async fn search(&self, query: &SearchQuery) -> Vec<ImageResult> {
        let id = self.id();
        if !self.has_credentials() {
            debug!(
                "{} is not configured, generating {} placeholders",
                id,
                self.placeholder_count()
            );
            return placeholder::generate(&query.text, id, self.placeholder_count());
        }
        match self.fetch(query).await {
            Ok(images) => {
                debug!("{} found {} images for [{}]", id, images.len(), query.text);
                images
            }
            Err(err) => {
                error!("{} search for [{}] failed: {:?}", id, query.text, err);
                self.fallback(query)
            }
        }
    }
}

#[derive(
    Display,
    Debug,
    Hash,
    Copy,
    Clone,
    Serialize,
    Deserialize,
    EnumString,
    EnumIter,
    PartialEq,
    Eq,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AllProviders {
    Google,
    Bing,
    Flickr,
    Unsplash,
    Zillow,
    Redfin,
}

impl AllProviders {
    pub fn label(&self) -> &'static str {
        match self {
            AllProviders::Google => "Google Images",
            AllProviders::Bing => "Bing Images",
            AllProviders::Flickr => "Flickr",
            AllProviders::Unsplash => "Unsplash",
            AllProviders::Zillow => "Zillow",
            AllProviders::Redfin => "Redfin",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            AllProviders::Google => "Google Images",
            AllProviders::Bing => "Bing Image Search",
            AllProviders::Flickr => "Flickr photos",
            AllProviders::Unsplash => "High-quality free photos",
            AllProviders::Zillow => "Real estate listings",
            AllProviders::Redfin => "Property photos",
        }
    }
}

pub struct UrlBuilder {
    pub params: Vec<(&'static str, String)>,
}

impl Default for UrlBuilder {
    fn default() -> Self {
        Self { params: vec![] }
    }
}

impl UrlBuilder {
    pub fn from_queries(params: Vec<(&'static str, &'static str)>) -> Self {
        Self {
            params: params
                .into_iter()
                .map(|(key, value)| (key, value.to_owned()))
                .collect::<Vec<_>>(),
        }
    }
    pub fn param(&mut self, key: &'static str, value: impl ToString) -> &mut Self {
        self.params.push((key, value.to_string()));
        self
    }
    pub fn coordinates(&mut self, coordinates: &Option<Coordinates>) -> &mut Self {
        if let Some(position) = coordinates {
            self.param("lat", position.lat).param("lon", position.lng);
        }
        self
    }
    pub fn build(&self, base_url: &str) -> Result<url::Url, ProviderFailure> {
        url::Url::parse_with_params(base_url, self.params.iter())
            .ok()
            .ok_or(ProviderFailure::Url)
    }
}
