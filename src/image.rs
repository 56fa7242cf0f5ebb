use serde::{Deserialize, Serialize};

use crate::search::AllProviders;

/// A single normalized image coming out of any provider.
/// Records are only ever built by an adapter and live for one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageResult {
    /// always prefixed with the tag of the provider that built it
    pub id: String,
    pub url: String,
    pub thumbnail: String,
    pub title: String,
    pub source: AllProviders,
    /// page the image was found on
    pub source_url: String,
    // not every provider can tell us the size of an image
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

/// Providers sometimes report 0 for sizes they don't know
pub fn dimension(value: Option<u32>) -> Option<u32> {
    value.filter(|size| *size > 0)
}

/// Treats empty strings the same way as missing fields
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}
