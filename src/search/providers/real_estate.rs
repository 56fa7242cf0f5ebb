use async_trait::async_trait;

use crate::image::ImageResult;

use super::*;

const PLACEHOLDER_COUNT: usize = 6;

/// Listing sites have no public image api. Until there is a partnership
/// these only ever produce placeholders.
pub struct RealEstateListings {
    site: AllProviders,
}

impl RealEstateListings {
    pub fn new(site: AllProviders) -> Self {
        Self { site }
    }
}

#[async_trait]
impl Provider for RealEstateListings {
    fn id(&self) -> AllProviders {
        self.site
    }

    fn has_credentials(&self) -> bool {
        false
    }

    fn placeholder_count(&self) -> usize {
        PLACEHOLDER_COUNT
    }

    async fn fetch(&self, _query: &SearchQuery) -> Result<Vec<ImageResult>, ProviderFailure> {
        Err(ProviderFailure::Unsupported(self.site))
    }
}
