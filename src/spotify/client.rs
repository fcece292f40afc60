use std::fmt;

use reqwest::{
    Client, Response, StatusCode,
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue},
};
use serde::Serialize;
use serde_json::Value;

use crate::{error::ExportError, types::ErrorResponse};

/// Largest page Spotify serves for collection listings.
pub const MAX_PAGE_SIZE: u32 = 50;

pub const DEFAULT_API_URL: &str = "https://api.spotify.com";

/// Clamps a requested page size into `1..=MAX_PAGE_SIZE`.
pub fn clamp_page_size(limit: u32) -> u32 {
    limit.clamp(1, MAX_PAGE_SIZE)
}

/// Result of a remote call that either produced data or failed for a
/// reason worth reporting. Authorization failures never end up here.
pub type Fetch<T> = Result<T, FetchFailure>;

/// One page of a paged collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub total: u64,
    pub items: Vec<Value>,
}

/// Why a request produced no usable data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchFailure {
    pub resource: String,
    pub status: Option<u16>,
    pub message: String,
}

impl FetchFailure {
    pub fn new(resource: impl Into<String>, status: Option<u16>, message: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            status,
            message: message.into(),
        }
    }
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(
                f,
                "{} failed. Status code: {}, Message: {}",
                self.resource, status, self.message
            ),
            None => write!(f, "{} failed. Message: {}", self.resource, self.message),
        }
    }
}

/// Tagged outcome of a page request.
///
/// `Empty` is a successful response that simply carries no items, which
/// keeps "there is nothing here" apart from "the request failed".
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Data(Page),
    Empty { total: u64 },
    Failed(FetchFailure),
}

/// Client for the paged collection endpoints of the Spotify Web API.
///
/// The client carries its own base URL and bearer token; nothing is read
/// from process-wide state. Every call issues exactly one request and never
/// retries.
///
/// # Error Classification
///
/// - `401 Unauthorized` (or a token that cannot be put in a header) is
///   returned as [`ExportError::Unauthorized`] and should end the run.
/// - Any other non-success status, a transport error, or a body that is not
///   the expected JSON becomes a [`FetchFailure`] carrying the resource, the
///   status code and the message Spotify reported in `error.message`.
///
/// # Example
///
/// ```
/// let client = SpotifyClient::new("https://api.spotify.com", token);
/// match client.fetch_page("/v1/me/playlists", 50, 0).await? {
///     FetchOutcome::Data(page) => println!("{} of {}", page.items.len(), page.total),
///     FetchOutcome::Empty { .. } => println!("no playlists"),
///     FetchOutcome::Failed(failure) => eprintln!("{}", failure),
/// }
/// ```
#[derive(Clone)]
pub struct SpotifyClient {
    http: Client,
    base_url: String,
    token: String,
}

impl SpotifyClient {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    /// Replaces the bearer token, e.g. after a refresh.
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = token.into();
    }

    /// Headers sent with every request, including `Authorization: Bearer <token>`.
    pub fn auth_header(&self) -> Result<HeaderMap, ExportError> {
        let bearer = HeaderValue::from_str(&format!("Bearer {}", self.token)).map_err(|_| {
            ExportError::Unauthorized("access token contains invalid characters".to_string())
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(AUTHORIZATION, bearer);
        Ok(headers)
    }

    /// Fetches one page of the collection at `path`.
    ///
    /// `limit` is clamped to [`MAX_PAGE_SIZE`]. A successful response must
    /// carry both `total` and `items`; a body missing either is reported as
    /// [`FetchOutcome::Failed`] so callers stop advancing.
    pub async fn fetch_page(
        &self,
        path: &str,
        limit: u32,
        offset: u64,
    ) -> Result<FetchOutcome, ExportError> {
        let limit = clamp_page_size(limit);
        let resource = format!("{path} (offset {offset})");

        let json = match self
            .get(&resource, path, &[("limit", u64::from(limit)), ("offset", offset)])
            .await?
        {
            Ok(json) => json,
            Err(failure) => return Ok(FetchOutcome::Failed(failure)),
        };

        Ok(match into_page(json) {
            Ok(page) if page.items.is_empty() => FetchOutcome::Empty { total: page.total },
            Ok(page) => FetchOutcome::Data(page),
            Err(reason) => FetchOutcome::Failed(FetchFailure::new(resource, Some(200), reason)),
        })
    }

    /// Fetches a single JSON resource such as `/v1/tracks/{id}`.
    pub async fn fetch_resource(&self, path: &str) -> Result<Fetch<Value>, ExportError> {
        self.get(path, path, &[] as &[(&str, u64)]).await
    }

    async fn get<Q>(&self, resource: &str, path: &str, query: &Q) -> Result<Fetch<Value>, ExportError>
    where
        Q: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        let response = match self
            .http
            .get(&url)
            .headers(self.auth_header()?)
            .query(query)
            .send()
            .await
        {
            Ok(response) => response,
            // network or reqwest error
            Err(err) => return Ok(Err(FetchFailure::new(resource, None, err.to_string()))),
        };

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(ExportError::Unauthorized(error_message(status, response).await));
        }
        if !status.is_success() {
            let message = error_message(status, response).await;
            return Ok(Err(FetchFailure::new(
                resource,
                Some(status.as_u16()),
                message,
            )));
        }

        match response.json::<Value>().await {
            Ok(json) => Ok(Ok(json)),
            Err(err) => Ok(Err(FetchFailure::new(
                resource,
                Some(status.as_u16()),
                format!("invalid JSON body: {err}"),
            ))),
        }
    }
}

fn into_page(mut json: Value) -> Result<Page, &'static str> {
    let total = json
        .get("total")
        .and_then(Value::as_u64)
        .ok_or("response has no total field")?;

    match json.get_mut("items").map(Value::take) {
        Some(Value::Array(items)) => Ok(Page { total, items }),
        _ => Err("response has no items field"),
    }
}

/// Extracts `error.message` from an error body, falling back to the
/// canonical reason of the status code.
async fn error_message(status: StatusCode, response: Response) -> String {
    let fallback = status.canonical_reason().unwrap_or("unknown error").to_string();
    match response.bytes().await {
        Ok(body) => serde_json::from_slice::<ErrorResponse>(&body)
            .map(|e| e.error.message)
            .unwrap_or(fallback),
        Err(_) => fallback,
    }
}
