mod providers;
pub use providers::{
    provider_map, AllProviders, BingImageSearch, Coordinates, FlickrPhotoSearch,
    GoogleImageSearch, Provider, ProviderFailure, ProviderInput, ProviderMap, RealEstateListings,
    SearchQuery, UnsplashTemplates,
};
pub mod aggregator;
pub mod placeholder;
