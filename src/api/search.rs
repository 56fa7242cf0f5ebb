use std::sync::Arc;

use axum::extract::{RawQuery, State};
use axum::Json;
use url::form_urlencoded;

use crate::api::{AppError, Context};
use crate::search::aggregator::{aggregate, parse_sources, SearchOutcome};
use crate::search::{Coordinates, SearchQuery};

/// Everything arrives as strings so a malformed number is ignored instead of
/// rejecting the whole request
#[derive(Debug, Default)]
pub struct SearchParams {
    pub location: Option<String>,
    pub sources: Option<String>,
    pub lat: Option<String>,
    pub lng: Option<String>,
}

fn parse_coordinate(raw: Option<&str>) -> Option<f64> {
    raw?.trim().parse::<f64>().ok().filter(|value| value.is_finite())
}

impl SearchParams {
    /// Repeated keys keep their first value, like `URLSearchParams.get`
    pub fn from_query(raw: Option<&str>) -> Self {
        let mut params = Self::default();
        let pairs = form_urlencoded::parse(raw.unwrap_or_default().as_bytes());
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "location" => &mut params.location,
                "sources" => &mut params.sources,
                "lat" => &mut params.lat,
                "lng" => &mut params.lng,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }
        params
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        let lat = parse_coordinate(self.lat.as_deref())?;
        let lng = parse_coordinate(self.lng.as_deref())?;
        Some(Coordinates { lat, lng })
    }

    pub fn location(&self) -> Option<&str> {
        self.location
            .as_deref()
            .map(str::trim)
            .filter(|location| !location.is_empty())
    }
}

pub async fn search_images(
    State(state): State<Arc<Context>>,
    RawQuery(raw): RawQuery,
) -> Result<Json<SearchOutcome>, AppError> {
    let params = SearchParams::from_query(raw.as_deref());
    let location = params.location().ok_or(AppError::MissingLocation)?;
    let query = SearchQuery::new(location).with_coordinates(params.coordinates());
    let sources = parse_sources(params.sources.as_deref());
    let outcome = aggregate(&state.providers, &sources, &query).await?;
    Ok(Json(outcome))
}
