use std::collections::HashMap;
use std::sync::Arc;

use reqwest::Client;
use strum::IntoEnumIterator;

use crate::config::Config;

pub use bing::*;
pub use flickr::*;
pub use google::*;
pub use providers::*;
pub use real_estate::*;
pub use unsplash::*;

pub mod bing;
pub mod flickr;
pub mod google;
mod providers;
pub mod real_estate;
pub mod unsplash;

pub type ProviderMap = HashMap<AllProviders, Arc<dyn Provider>>;

/// Builds one instance of every known provider, all sharing the same client
pub fn provider_map(client: &Arc<Client>, config: &Config) -> ProviderMap {
    AllProviders::iter()
        .map(|provider_type| {
            let input = ProviderInput {
                client: Arc::clone(client),
                config,
            };
            let provider: Arc<dyn Provider> = match provider_type {
                AllProviders::Google => Arc::new(GoogleImageSearch::new(input)),
                AllProviders::Bing => Arc::new(BingImageSearch::new(input)),
                AllProviders::Flickr => Arc::new(FlickrPhotoSearch::new(input)),
                AllProviders::Unsplash => Arc::new(UnsplashTemplates::new()),
                AllProviders::Zillow | AllProviders::Redfin => {
                    Arc::new(RealEstateListings::new(provider_type))
                }
            };
            (provider_type, provider)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_provider_is_registered_under_its_own_tag() {
        let client = Arc::new(Client::new());
        let providers = provider_map(&client, &Config::default());
        assert_eq!(providers.len(), 6);
        for (tag, provider) in &providers {
            assert_eq!(provider.id(), *tag);
        }
    }

    #[test]
    fn only_template_providers_are_live_without_credentials() {
        let client = Arc::new(Client::new());
        let providers = provider_map(&client, &Config::default());
        let live = AllProviders::iter()
            .filter(|tag| providers[tag].has_credentials())
            .collect::<Vec<_>>();
        assert_eq!(live, vec![AllProviders::Unsplash]);
    }
}
