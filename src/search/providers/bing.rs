use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::image::{dimension, non_empty, ImageResult};
use crate::request::parse_successful_response;

use super::*;

const SUBSCRIPTION_HEADER: &str = "Ocp-Apim-Subscription-Key";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BingImage {
    pub image_id: Option<String>,
    pub content_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub name: Option<String>,
    pub host_page_url: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct BingResponse {
    pub value: Option<Vec<BingImage>>,
}

pub struct BingImageSearch {
    client: Arc<Client>,
    key: Option<String>,
    endpoint: String,
}

impl BingImageSearch {
    pub fn new(input: ProviderInput) -> Self {
        Self {
            client: input.client,
            key: input.config.credentials.bing_key.clone(),
            endpoint: input.config.endpoints.bing.clone(),
        }
    }
}

fn to_image(index: usize, image: BingImage) -> Option<ImageResult> {
    let url = non_empty(image.content_url)?;
    // bing ids are content hashes, fall back to the position for the odd image without one
    let unique_identifier =
        non_empty(image.image_id).unwrap_or_else(|| format!("idx-{}", index));
    Some(ImageResult {
        id: format!("{}-{}", AllProviders::Bing, unique_identifier),
        thumbnail: non_empty(image.thumbnail_url).unwrap_or_else(|| url.clone()),
        url,
        title: image.name.unwrap_or_default(),
        source: AllProviders::Bing,
        source_url: image.host_page_url.unwrap_or_default(),
        width: dimension(image.width),
        height: dimension(image.height),
    })
}

#[async_trait]
impl Provider for BingImageSearch {
    fn id(&self) -> AllProviders {
        AllProviders::Bing
    }

    fn has_credentials(&self) -> bool {
        self.key.is_some()
    }

    async fn fetch(&self, query: &SearchQuery) -> Result<Vec<ImageResult>, ProviderFailure> {
        let key = self
            .key
            .as_ref()
            .ok_or(ProviderFailure::MissingCredentials(self.id()))?;
        let url = UrlBuilder::from_queries(vec![("count", "20"), ("safeSearch", "Strict")])
            .param("q", &query.text)
            .build(&self.endpoint)?;
        let response = self
            .client
            .get(url)
            .header(SUBSCRIPTION_HEADER, key.as_str())
            .send()
            .await?;
        let body = parse_successful_response::<BingResponse>(response).await?;
        Ok(body
            .value
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .filter_map(|(index, image)| to_image(index, image))
            .collect())
    }
}
