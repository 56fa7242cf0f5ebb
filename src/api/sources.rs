use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use strum::IntoEnumIterator;

use crate::api::Context;
use crate::search::aggregator::DEFAULT_SOURCES;
use crate::search::AllProviders;

#[derive(Debug, Serialize)]
pub struct SourceDescription {
    pub id: AllProviders,
    pub label: &'static str,
    pub description: &'static str,
    /// false when the source can only produce placeholders right now
    pub live: bool,
    pub default: bool,
}

#[derive(Debug, Serialize)]
pub struct SourcesResponse {
    pub sources: Vec<SourceDescription>,
}

pub async fn list_sources(State(state): State<Arc<Context>>) -> Json<SourcesResponse> {
    let sources = AllProviders::iter()
        .map(|provider| SourceDescription {
            id: provider,
            label: provider.label(),
            description: provider.description(),
            live: state
                .providers
                .get(&provider)
                .map(|p| p.has_credentials())
                .unwrap_or(false),
            default: DEFAULT_SOURCES.contains(&provider),
        })
        .collect();
    Json(SourcesResponse { sources })
}
