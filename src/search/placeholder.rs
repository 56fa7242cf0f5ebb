//! Demo images for providers that can't be queried live.
//!
//! Everything here is derived from the query, the source and the index so the
//! same search always yields the same placeholders.

use crate::image::ImageResult;
use crate::request::encode_component;
use crate::search::AllProviders;

const PLACEHOLDER_ROOT: &str = "https://picsum.photos";

const THEMES: [&str; 8] = [
    "house",
    "building",
    "street",
    "neighborhood",
    "architecture",
    "property",
    "home",
    "exterior",
];

const THUMBNAIL_SIZE: (u32, u32) = (400, 300);

fn size_for(index: usize) -> (u32, u32) {
    let width = 800 + (index % 3) as u32 * 100;
    let height = 600 + (index % 4) as u32 * 50;
    (width, height)
}

pub fn generate(query: &str, source: AllProviders, count: usize) -> Vec<ImageResult> {
    let encoded_query = encode_component(query);
    (0..count)
        .map(|index| {
            let (width, height) = size_for(index);
            let seed = encode_component(&format!("{}-{}-{}", query, source, index));
            ImageResult {
                id: format!("{}-demo-{}-{}", source, encoded_query, index),
                url: format!("{}/seed/{}/{}/{}", PLACEHOLDER_ROOT, seed, width, height),
                thumbnail: format!(
                    "{}/seed/{}/{}/{}",
                    PLACEHOLDER_ROOT, seed, THUMBNAIL_SIZE.0, THUMBNAIL_SIZE.1
                ),
                title: format!("{} - {} (Demo)", query, THEMES[index % THEMES.len()]),
                source,
                source_url: PLACEHOLDER_ROOT.to_owned(),
                width: Some(width),
                height: Some(height),
            }
        })
        .collect()
}
