use std::collections::HashSet;
use std::str::FromStr;
use std::sync::Arc;

use futures::future::join_all;
use log::{debug, info, warn};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use thiserror::Error;
use tokio::task::JoinError;

use crate::image::ImageResult;
use crate::search::{AllProviders, ProviderMap, SearchQuery};

/// Sources searched when the caller doesn't pick any
pub const DEFAULT_SOURCES: [AllProviders; 4] = [
    AllProviders::Google,
    AllProviders::Bing,
    AllProviders::Flickr,
    AllProviders::Unsplash,
];

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("{0} search did not complete")]
    Join(AllProviders, #[source] JoinError),
}

#[derive(Debug, Serialize)]
pub struct SearchOutcome {
    pub images: Vec<ImageResult>,
    pub count: usize,
    /// sources that produced at least one image
    pub sources: Vec<AllProviders>,
}

/// Parses a comma separated list of source tags, keeping the order they were
/// asked for. Unknown tags are skipped.
pub fn parse_sources(raw: Option<&str>) -> Vec<AllProviders> {
    let raw = match raw.map(str::trim) {
        Some(list) if !list.is_empty() => list,
        _ => return DEFAULT_SOURCES.to_vec(),
    };
    let mut sources = Vec::new();
    for tag in raw.split(',').map(str::trim).filter(|tag| !tag.is_empty()) {
        match AllProviders::from_str(tag) {
            Ok(provider) if !sources.contains(&provider) => sources.push(provider),
            Ok(_) => {}
            Err(_) => debug!("Ignoring unknown source [{}]", tag),
        }
    }
    sources
}

/// Runs every requested provider on its own task and waits for all of them.
/// Each provider's results stay paired with its tag so contributing sources
/// don't depend on completion order.
pub async fn aggregate(
    providers: &ProviderMap,
    requested: &[AllProviders],
    query: &SearchQuery,
) -> Result<SearchOutcome, SearchError> {
    let (tags, handles): (Vec<_>, Vec<_>) = requested
        .iter()
        .filter_map(|tag| providers.get(tag).map(|provider| (*tag, Arc::clone(provider))))
        .map(|(tag, provider)| {
            let query = query.clone();
            let handle = tokio::spawn(async move { provider.search(&query).await });
            (tag, handle)
        })
        .unzip();

    // a panicking provider can't stop the others, they all settle before we look
    let settled = join_all(handles).await;
    let mut results = Vec::with_capacity(settled.len());
    for (tag, outcome) in tags.into_iter().zip(settled) {
        match outcome {
            Ok(images) => results.push((tag, images)),
            Err(err) => {
                warn!("{} search task failed: {:?}", tag, err);
                return Err(SearchError::Join(tag, err));
            }
        }
    }

    let outcome = {
        let mut rng = rand::thread_rng();
        merge(results, &mut rng)
    };
    info!(
        "Found {} images for [{}] from {:?}",
        outcome.count, query.text, outcome.sources
    );
    Ok(outcome)
}

/// Flattens per-provider results into one shuffled list without duplicate ids
pub fn merge<R: Rng + ?Sized>(
    results: Vec<(AllProviders, Vec<ImageResult>)>,
    rng: &mut R,
) -> SearchOutcome {
    let sources = results
        .iter()
        .filter(|(_, images)| !images.is_empty())
        .map(|(tag, _)| *tag)
        .collect::<Vec<_>>();
    let mut seen = HashSet::new();
    let mut images = results
        .into_iter()
        .flat_map(|(_, images)| images)
        .filter(|image| seen.insert(image.id.clone()))
        .collect::<Vec<_>>();
    // Fisher-Yates
    images.shuffle(rng);
    SearchOutcome {
        count: images.len(),
        images,
        sources,
    }
}
