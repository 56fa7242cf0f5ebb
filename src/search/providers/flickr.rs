use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::image::{non_empty, ImageResult};
use crate::request::parse_successful_response;
use crate::search::placeholder;

use super::*;

/// Flickr is the only provider that degrades into placeholders instead of
/// returning nothing when the live call breaks
const FAILURE_PLACEHOLDER_COUNT: usize = 5;

/// Radius in kilometers around the user's position
const SEARCH_RADIUS_KM: u32 = 10;

const STATIC_ROOT: &str = "https://live.staticflickr.com";

#[derive(Debug, Deserialize)]
pub struct FlickrPhoto {
    pub id: String,
    pub owner: Option<String>,
    pub secret: Option<String>,
    pub server: Option<String>,
    pub title: Option<String>,
    pub url_m: Option<String>,
    pub url_l: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct FlickrPhotos {
    pub photo: Option<Vec<FlickrPhoto>>,
}

/// Failed calls come back as `{"stat": "fail", ...}` without any photos
#[derive(Debug, Deserialize)]
pub struct FlickrResponse {
    pub photos: Option<FlickrPhotos>,
}

pub struct FlickrPhotoSearch {
    client: Arc<Client>,
    key: Option<String>,
    endpoint: String,
}

impl FlickrPhotoSearch {
    pub fn new(input: ProviderInput) -> Self {
        Self {
            client: input.client,
            key: input.config.credentials.flickr_key.clone(),
            endpoint: input.config.endpoints.flickr.clone(),
        }
    }
}

impl FlickrPhoto {
    /// Url on the static image host, `size` being one of flickr's size suffixes
    fn static_url(&self, size: char) -> Option<String> {
        let server = self.server.as_ref()?;
        let secret = self.secret.as_ref()?;
        Some(format!(
            "{}/{}/{}_{}_{}.jpg",
            STATIC_ROOT, server, self.id, secret, size
        ))
    }

    fn into_image(self, query: &str) -> Option<ImageResult> {
        let url = non_empty(self.url_l.clone())
            .or_else(|| non_empty(self.url_m.clone()))
            .or_else(|| self.static_url('b'))?;
        let thumbnail = non_empty(self.url_m.clone())
            .or_else(|| self.static_url('m'))
            .unwrap_or_else(|| url.clone());
        let owner = self.owner.as_deref().unwrap_or_default();
        Some(ImageResult {
            id: format!("{}-{}", AllProviders::Flickr, self.id),
            url,
            thumbnail,
            title: non_empty(self.title).unwrap_or_else(|| format!("Photo from {}", query)),
            source: AllProviders::Flickr,
            source_url: format!("https://www.flickr.com/photos/{}/{}", owner, self.id),
            width: None,
            height: None,
        })
    }
}

#[async_trait]
impl Provider for FlickrPhotoSearch {
    fn id(&self) -> AllProviders {
        AllProviders::Flickr
    }

    fn has_credentials(&self) -> bool {
        self.key.is_some()
    }

    async fn fetch(&self, query: &SearchQuery) -> Result<Vec<ImageResult>, ProviderFailure> {
        let key = self
            .key
            .as_ref()
            .ok_or(ProviderFailure::MissingCredentials(self.id()))?;
        let mut builder = UrlBuilder::from_queries(vec![
            ("method", "flickr.photos.search"),
            ("safe_search", "1"),
            // photos only, no screenshots or "other"
            ("content_type", "1"),
            ("media", "photos"),
            ("per_page", "20"),
            ("format", "json"),
            ("nojsoncallback", "1"),
            ("extras", "url_m,url_l,url_o"),
        ]);
        builder.param("api_key", key).param("text", &query.text);
        if query.coordinates.is_some() {
            builder
                .coordinates(&query.coordinates)
                .param("radius", SEARCH_RADIUS_KM);
        }
        let url = builder.build(&self.endpoint)?;
        let response = self.client.get(url).send().await?;
        let body = parse_successful_response::<FlickrResponse>(response).await?;
        Ok(body
            .photos
            .and_then(|photos| photos.photo)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|photo| photo.into_image(&query.text))
            .collect())
    }

    fn fallback(&self, query: &SearchQuery) -> Vec<ImageResult> {
        placeholder::generate(&query.text, self.id(), FAILURE_PLACEHOLDER_COUNT)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{method, query_param};
    use wiremock::{Mock, MockServer, Request, ResponseTemplate};

    use crate::config::Config;

    use super::*;

    fn provider(server: &MockServer, key: Option<&str>) -> FlickrPhotoSearch {
        let mut config = Config::default();
        config.credentials.flickr_key = key.map(str::to_owned);
        config.endpoints.flickr = format!("{}/services/rest/", server.uri());
        FlickrPhotoSearch::new(ProviderInput {
            client: Arc::new(Client::new()),
            config: &config,
        })
    }

    fn photos() -> serde_json::Value {
        json!({
            "photos": {
                "page": 1,
                "photo": [
                    {
                        "id": "111",
                        "owner": "alice",
                        "secret": "s1",
                        "server": "65535",
                        "title": "Sunset over the Seine",
                        "url_m": "https://live.staticflickr.com/65535/111_s1.jpg",
                        "url_l": "https://live.staticflickr.com/65535/111_s1_b.jpg"
                    },
                    {
                        "id": "222",
                        "owner": "bob",
                        "secret": "s2",
                        "server": "4242",
                        "title": ""
                    }
                ]
            },
            "stat": "ok"
        })
    }

    #[tokio::test]
    async fn without_key_returns_eight_placeholders_offline() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;
        let images = provider(&server, None)
            .search(&SearchQuery::new("Paris"))
            .await;
        assert_eq!(images.len(), 8);
    }

    #[tokio::test]
    async fn maps_photos_and_builds_static_urls() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("method", "flickr.photos.search"))
            .and(query_param("api_key", "f-key"))
            .and(query_param("text", "Paris"))
            .and(query_param("safe_search", "1"))
            .and(query_param("content_type", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(photos()))
            .expect(1)
            .mount(&server)
            .await;

        let images = provider(&server, Some("f-key"))
            .search(&SearchQuery::new("Paris"))
            .await;
        assert_eq!(images.len(), 2);
        assert_eq!(images[0].id, "flickr-111");
        assert_eq!(images[0].url, "https://live.staticflickr.com/65535/111_s1_b.jpg");
        assert_eq!(images[0].thumbnail, "https://live.staticflickr.com/65535/111_s1.jpg");
        assert_eq!(images[0].source_url, "https://www.flickr.com/photos/alice/111");
        assert_eq!(images[1].url, "https://live.staticflickr.com/4242/222_s2_b.jpg");
        assert_eq!(images[1].thumbnail, "https://live.staticflickr.com/4242/222_s2_m.jpg");
        assert_eq!(images[1].title, "Photo from Paris");
    }

    #[tokio::test]
    async fn coordinates_add_a_radius_filter() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("lat", "48.8566"))
            .and(query_param("lon", "2.3522"))
            .and(query_param("radius", "10"))
            .respond_with(ResponseTemplate::new(200).set_body_json(photos()))
            .expect(1)
            .mount(&server)
            .await;

        let query = SearchQuery::new("Paris").with_coordinates(Some(Coordinates {
            lat: 48.8566,
            lng: 2.3522,
        }));
        let images = provider(&server, Some("f-key")).search(&query).await;
        assert_eq!(images.len(), 2);
    }

    #[tokio::test]
    async fn no_radius_without_coordinates() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(|request: &Request| {
                let has_radius = request.url.query_pairs().any(|(key, _)| key == "radius");
                if has_radius {
                    ResponseTemplate::new(400)
                } else {
                    ResponseTemplate::new(200).set_body_json(photos())
                }
            })
            .mount(&server)
            .await;
        let images = provider(&server, Some("f-key"))
            .search(&SearchQuery::new("Paris"))
            .await;
        assert!(images.iter().all(|image| !image.id.contains("demo")));
    }

    #[tokio::test]
    async fn failed_stat_returns_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "stat": "fail",
                "code": 100,
                "message": "Invalid API Key (Key has invalid format)"
            })))
            .mount(&server)
            .await;
        let images = provider(&server, Some("f-key"))
            .search(&SearchQuery::new("Paris"))
            .await;
        assert!(images.is_empty());
    }

    #[tokio::test]
    async fn broken_responses_degrade_to_five_placeholders() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;
        let images = provider(&server, Some("f-key"))
            .search(&SearchQuery::new("Paris"))
            .await;
        assert_eq!(images.len(), 5);
        assert!(images.iter().all(|image| image.source == AllProviders::Flickr));
        assert!(images.iter().all(|image| image.id.starts_with("flickr-demo-")));
    }
}
