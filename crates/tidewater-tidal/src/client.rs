// SPDX-License-Identifier: GPL-3.0-or-later

use crate::error::{Result, TidalError};
use crate::models::{Playlist, SearchPage, Session, TrackItem, UserHandle};
use reqwest::header::{CONTENT_TYPE, ETAG, IF_NONE_MATCH};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, trace};
use url::form_urlencoded;
use url::Url;
use uuid::Uuid;

const TIDAL_API_BASE: &str = "https://api.tidal.com/v1";
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
const USER_AGENT: &str = concat!("Tidewater/", env!("CARGO_PKG_VERSION"));

/// TIDAL API client holding an out-of-band access token.
#[derive(Debug, Clone)]
pub struct TidalClient {
    client: Client,
    base_url: String,
    access_token: Option<String>,
    search_limit: u32,
}

impl TidalClient {
    /// Create a client builder for custom configuration.
    pub fn builder() -> TidalClientBuilder {
        TidalClientBuilder::default()
    }

    /// Validate the access token and open a session for the owning account.
    ///
    /// # Example
    /// ```no_run
    /// # use tidewater_tidal::TidalClient;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = TidalClient::builder().access_token("token").build()?;
    /// let session = client.authenticate().await?;
    /// println!("logged in as {}", session.current_user().id);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn authenticate(&self) -> Result<TidalSession> {
        if self.access_token.is_none() {
            return Err(TidalError::MissingAccessToken);
        }

        let url = self.url("sessions", &[])?;
        let session: Session = self.get_json(url).await?;
        debug!(
            target: "tidal",
            user_id = session.user_id,
            country_code = %session.country_code,
            "session established"
        );

        Ok(TidalSession {
            client: self.clone(),
            user: UserHandle {
                id: session.user_id,
                country_code: session.country_code,
            },
        })
    }

    fn url(&self, path: &str, query: &[(&str, &str)]) -> Result<Url> {
        let mut url = Url::parse(&format!("{}/{}", self.base_url.trim_end_matches('/'), path))
            .map_err(|e| TidalError::InvalidResponse(e.to_string()))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.access_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let response = self.send(self.client.get(url.as_str()), url.as_str()).await?;
        decode(response).await
    }

    /// Send an authorized request and map failing statuses onto [`TidalError`].
    async fn send(&self, request: RequestBuilder, url: &str) -> Result<Response> {
        trace!(target: "tidal", "request {}", url);

        let response = self.authorized(request).send().await?;
        let status = response.status();
        debug!(target: "tidal", "response status: {}", status);

        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        Err(match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => TidalError::Unauthorized(message),
            StatusCode::NOT_FOUND => TidalError::NotFound(url.to_string()),
            StatusCode::TOO_MANY_REQUESTS => TidalError::RateLimitExceeded,
            _ => TidalError::ApiError {
                status: status.as_u16(),
                message,
            },
        })
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let body = response.text().await?;
    trace!(target: "tidal", "response body: {}", body);

    serde_json::from_str(&body)
        .map_err(|e| TidalError::InvalidResponse(format!("Failed to parse response: {}", e)))
}

fn form_body(pairs: &[(&str, &str)]) -> String {
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish()
}

/// An authenticated session; the handle every catalog call goes through.
#[derive(Debug, Clone)]
pub struct TidalSession {
    client: TidalClient,
    user: UserHandle,
}

impl TidalSession {
    pub fn current_user(&self) -> &UserHandle {
        &self.user
    }

    /// Free-text track search. Results keep the catalog's ordering.
    pub async fn search_tracks(&self, query: &str) -> Result<Vec<TrackItem>> {
        let limit = self.client.search_limit.to_string();
        let url = self.client.url(
            "search/tracks",
            &[
                ("query", query),
                ("limit", limit.as_str()),
                ("countryCode", self.user.country_code.as_str()),
            ],
        )?;

        let page: SearchPage<TrackItem> = self.client.get_json(url).await?;
        debug!(
            target: "tidal",
            query,
            returned = page.items.len(),
            total = page.total_number_of_items,
            "track search complete"
        );
        Ok(page.items)
    }

    /// Create a playlist owned by the session's user.
    pub async fn create_playlist(&self, title: &str, description: &str) -> Result<Playlist> {
        let url = self.client.url(
            &format!("users/{}/playlists", self.user.id),
            &[("countryCode", self.user.country_code.as_str())],
        )?;

        let request = self
            .client
            .client
            .post(url.as_str())
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(form_body(&[("title", title), ("description", description)]));

        let response = self.client.send(request, url.as_str()).await?;
        decode(response).await
    }

    /// Append tracks to a playlist.
    ///
    /// TIDAL guards playlist writes with the playlist's current ETag, so it is
    /// fetched first and sent back as `If-None-Match`.
    pub async fn add_tracks(&self, playlist: Uuid, track_ids: &[u64]) -> Result<()> {
        let country_code = self.user.country_code.as_str();
        let playlist_url = self.client.url(
            &format!("playlists/{}", playlist),
            &[("countryCode", country_code)],
        )?;
        let response = self
            .client
            .send(self.client.client.get(playlist_url.as_str()), playlist_url.as_str())
            .await?;
        let etag = response
            .headers()
            .get(ETAG)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned)
            .ok_or_else(|| TidalError::InvalidResponse("playlist response carried no ETag".to_string()))?;

        let ids = track_ids
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(",");
        let items_url = self.client.url(
            &format!("playlists/{}/items", playlist),
            &[("countryCode", country_code)],
        )?;
        let request = self
            .client
            .client
            .post(items_url.as_str())
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .header(IF_NONE_MATCH, etag)
            .body(form_body(&[("trackIds", ids.as_str()), ("onDupes", "FAIL")]));

        self.client.send(request, items_url.as_str()).await?;
        debug!(target: "tidal", %playlist, count = track_ids.len(), "tracks added to playlist");
        Ok(())
    }
}

/// Builder for configuring a TIDAL client.
#[derive(Debug)]
pub struct TidalClientBuilder {
    base_url: String,
    access_token: Option<String>,
    timeout: Duration,
    search_limit: u32,
}

impl Default for TidalClientBuilder {
    fn default() -> Self {
        Self {
            base_url: TIDAL_API_BASE.to_string(),
            access_token: None,
            timeout: Duration::from_secs(30),
            search_limit: 25,
        }
    }
}

impl TidalClientBuilder {
    /// Set a custom base URL (useful for testing with mock servers).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Set request timeout duration.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Maximum number of tracks requested per search.
    pub fn search_limit(mut self, limit: u32) -> Self {
        self.search_limit = limit;
        self
    }

    /// Build the TIDAL client.
    pub fn build(self) -> Result<TidalClient> {
        let client = Client::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(TidalClient {
            client,
            base_url: self.base_url,
            access_token: self.access_token,
            search_limit: self.search_limit,
        })
    }
}
