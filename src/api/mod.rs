use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::error;
use serde_json::json;
use thiserror::Error;

use crate::config::Config;
use crate::request::http_client;
use crate::search::aggregator::SearchError;
use crate::search::{provider_map, ProviderMap};

pub mod search;
pub mod sources;

pub struct Context {
    pub providers: Arc<ProviderMap>,
}

impl Context {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let client = Arc::new(http_client(&config.user_agent)?);
        Ok(Self::with_providers(provider_map(&client, config)))
    }

    pub fn with_providers(providers: ProviderMap) -> Self {
        Self {
            providers: Arc::new(providers),
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Location is required")]
    MissingLocation,
    #[error("Search failed")]
    Search(#[from] SearchError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::MissingLocation => StatusCode::BAD_REQUEST,
            AppError::Search(err) => {
                error!("Search failed: {:?}", err);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        // details only go to the logs
        let body = Json(json!({
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}
