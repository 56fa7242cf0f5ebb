use async_trait::async_trait;

use crate::image::ImageResult;
use crate::request::encode_component;

use super::*;

const RESULT_COUNT: usize = 10;
const IMAGE_SIZE: (u32, u32) = (800, 600);
const THUMBNAIL_SIZE: (u32, u32) = (400, 300);

/// Unsplash Source serves a random matching photo for any keyword, so results
/// are built from url templates and never hit a search api
#[derive(Default)]
pub struct UnsplashTemplates;

impl UnsplashTemplates {
    pub fn new() -> Self {
        Self
    }
}

fn source_url((width, height): (u32, u32), keyword: &str, signature: usize) -> String {
    format!(
        "https://source.unsplash.com/{}x{}/?{}&sig={}",
        width, height, keyword, signature
    )
}

#[async_trait]
impl Provider for UnsplashTemplates {
    fn id(&self) -> AllProviders {
        AllProviders::Unsplash
    }

    async fn fetch(&self, query: &SearchQuery) -> Result<Vec<ImageResult>, ProviderFailure> {
        let keyword = encode_component(&query.text);
        Ok((0..RESULT_COUNT)
            .map(|index| ImageResult {
                id: format!("{}-{}-{}", self.id(), keyword, index),
                url: source_url(IMAGE_SIZE, &keyword, index),
                thumbnail: source_url(THUMBNAIL_SIZE, &keyword, index),
                title: format!("{} - Unsplash Photo {}", query.text, index + 1),
                source: AllProviders::Unsplash,
                source_url: format!("https://unsplash.com/s/photos/{}", keyword),
                width: Some(IMAGE_SIZE.0),
                height: Some(IMAGE_SIZE.1),
            })
            .collect())
    }
}
