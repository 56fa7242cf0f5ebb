use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::image::{dimension, non_empty, ImageResult};
use crate::request::parse_successful_response;

use super::*;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleImageMetadata {
    pub thumbnail_link: Option<String>,
    pub context_link: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct GoogleItem {
    pub link: Option<String>,
    pub title: Option<String>,
    pub image: Option<GoogleImageMetadata>,
}

#[derive(Debug, Deserialize)]
pub struct GoogleResponse {
    // missing entirely when the search has no results
    pub items: Option<Vec<GoogleItem>>,
}

#[derive(Debug, Clone)]
struct GoogleCredentials {
    key: String,
    cx: String,
}

pub struct GoogleImageSearch {
    client: Arc<Client>,
    credentials: Option<GoogleCredentials>,
    endpoint: String,
}

const PLACEHOLDER_COUNT: usize = 10;

impl GoogleImageSearch {
    pub fn new(input: ProviderInput) -> Self {
        let credentials = &input.config.credentials;
        Self {
            client: input.client,
            // the api key is useless without a search engine to run it against
            credentials: credentials
                .google_key
                .clone()
                .zip(credentials.google_cx.clone())
                .map(|(key, cx)| GoogleCredentials { key, cx }),
            endpoint: input.config.endpoints.google.clone(),
        }
    }
}

fn to_image(index: usize, item: GoogleItem) -> Option<ImageResult> {
    let url = non_empty(item.link)?;
    let metadata = item.image;
    let (thumbnail, source_url, width, height) = match metadata {
        Some(meta) => (
            non_empty(meta.thumbnail_link),
            meta.context_link,
            meta.width,
            meta.height,
        ),
        None => (None, None, None, None),
    };
    Some(ImageResult {
        id: format!("{}-{}", AllProviders::Google, index),
        thumbnail: thumbnail.unwrap_or_else(|| url.clone()),
        url,
        title: item.title.unwrap_or_default(),
        source: AllProviders::Google,
        source_url: source_url.unwrap_or_default(),
        width: dimension(width),
        height: dimension(height),
    })
}

#[async_trait]
impl Provider for GoogleImageSearch {
    fn id(&self) -> AllProviders {
        AllProviders::Google
    }

    fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    fn placeholder_count(&self) -> usize {
        PLACEHOLDER_COUNT
    }

    async fn fetch(&self, query: &SearchQuery) -> Result<Vec<ImageResult>, ProviderFailure> {
        let credentials = self
            .credentials
            .as_ref()
            .ok_or(ProviderFailure::MissingCredentials(self.id()))?;
        let url = UrlBuilder::default()
            .param("key", &credentials.key)
            .param("cx", &credentials.cx)
            .param("q", &query.text)
            .param("searchType", "image")
            .param("safe", "active")
            .param("num", 10)
            .build(&self.endpoint)?;
        let response = self.client.get(url).send().await?;
        let body = parse_successful_response::<GoogleResponse>(response).await?;
        Ok(body
            .items
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .filter_map(|(index, item)| to_image(index, item))
            .collect())
    }
}
