use log::error;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::header::{HeaderMap, HeaderValue, InvalidHeaderValue, USER_AGENT};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Same character set browsers leave alone in `encodeURIComponent`
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

#[derive(Debug)]
pub struct ResponseErrorContext {
    pub body: String,
    pub code: StatusCode,
}

/// Wrapper for providing actual useful information about
/// why responses failed since reqwest throws that information
/// away when it encounters errors
#[derive(Error, Debug)]
pub enum HttpError {
    #[error("Failed response code {0:?}")]
    FailStatus(ResponseErrorContext),
    #[error("Unexpected body {0:?}")]
    UnexpectedBody(ResponseErrorContext),
    #[error("Request error")]
    ReqwestError(#[from] reqwest::Error),
}

pub async fn parse_successful_response<T: DeserializeOwned>(
    response: Response,
) -> Result<T, HttpError> {
    let response_code = response.status();
    let url = response.url().clone();
    let response_body = response.text().await?;
    if !response_code.is_success() {
        return Err(HttpError::FailStatus(ResponseErrorContext {
            body: response_body,
            code: response_code,
        }));
    }
    serde_json::from_str::<T>(&response_body).map_err(|error| {
        error!("Failed to parse response from {}: {}", url, error);
        HttpError::UnexpectedBody(ResponseErrorContext {
            body: response_body,
            code: response_code,
        })
    })
}

pub fn request_default_headers(user_agent: &str) -> Result<HeaderMap, InvalidHeaderValue> {
    Ok(HeaderMap::from_iter([(
        USER_AGENT,
        HeaderValue::from_str(user_agent)?,
    )]))
}

/// The one client every provider shares for the lifetime of the server
pub fn http_client(user_agent: &str) -> anyhow::Result<Client> {
    Ok(Client::builder()
        .default_headers(request_default_headers(user_agent)?)
        .build()?)
}

/// Percent-encodes a single url component (path segment or query value)
pub fn encode_component(input: &str) -> String {
    utf8_percent_encode(input, COMPONENT).to_string()
}
