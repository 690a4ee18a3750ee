// API client module: a small blocking HTTP client for the two OpenSky
// interactions, the OAuth2 client-credentials token exchange and the
// authenticated state-vector query. Network access goes through the
// `Transport` trait so tests can substitute a scripted transport.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::{Client, Response};
use reqwest::header::AUTHORIZATION;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::{BoundingBox, Config, Credentials};
use crate::states::{StateVector, StatesResponse};

/// Fixed User-Agent sent with every request.
pub const USER_AGENT: &str = "skywatch-cli/0.1";

/// Both requests give up after this long rather than hang.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Network-level failure: timeout, DNS, refused connection and the like.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

impl From<reqwest::Error> for TransportError {
    fn from(error: reqwest::Error) -> Self {
        TransportError(error.to_string())
    }
}

/// Token-stage failures. All terminal for the run; the caller may retry
/// by re-invoking.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("OPENSKY_CLIENT_ID and OPENSKY_CLIENT_SECRET are not set")]
    MissingCredentials,
    #[error("token request did not reach the server: {0}")]
    Transport(#[from] TransportError),
    #[error("token endpoint rejected the request (HTTP {status}): {message}")]
    RequestFailed { status: u16, message: String },
    #[error("token response did not include an access_token")]
    MalformedResponse,
}

/// Query-stage failures. A null or missing aircraft list is not one of
/// these; it decodes to an empty result.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("state query did not reach the server: {0}")]
    Transport(#[from] TransportError),
    #[error("states endpoint rejected the request (HTTP {status}): {message}")]
    RequestFailed { status: u16, message: String },
    #[error("states response was not valid JSON: {0}")]
    MalformedResponse(#[from] serde_json::Error),
}

/// Opaque bearer token. Fetched fresh each run; the server-side expiry
/// is never inspected.
#[derive(Debug, Clone)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Status and body of one HTTP exchange, independent of the HTTP crate.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Minimal HTTP surface the client needs. Production uses
/// `HttpTransport`; tests use a scripted implementation.
pub trait Transport {
    fn post_form(&self, url: &str, form: &[(&str, &str)]) -> Result<HttpResponse, TransportError>;

    fn get(
        &self,
        url: &str,
        query: &[(&str, String)],
        bearer_token: Option<&str>,
    ) -> Result<HttpResponse, TransportError>;
}

/// Real transport over a reqwest blocking client. The User-Agent and the
/// request timeout are fixed at construction.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(HttpTransport { client })
    }
}

impl Transport for HttpTransport {
    fn post_form(&self, url: &str, form: &[(&str, &str)]) -> Result<HttpResponse, TransportError> {
        let response = self.client.post(url).form(form).send()?;
        read_response(response)
    }

    fn get(
        &self,
        url: &str,
        query: &[(&str, String)],
        bearer_token: Option<&str>,
    ) -> Result<HttpResponse, TransportError> {
        let mut request = self.client.get(url).query(query);
        if let Some(token) = bearer_token {
            request = request.header(AUTHORIZATION, format!("Bearer {}", token));
        }
        let response = request.send()?;
        read_response(response)
    }
}

fn read_response(response: Response) -> Result<HttpResponse, TransportError> {
    let status = response.status().as_u16();
    let body = response.text()?;
    Ok(HttpResponse { status, body })
}

/// Token endpoint payload. Only `access_token` matters here; a fresh
/// token is fetched every run, so the expiry field is ignored.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
}

/// Client for the two sequential OpenSky calls: token exchange, then the
/// bounding-box state query.
pub struct OpenSkyClient<T> {
    transport: T,
    token_url: String,
    states_url: String,
}

impl OpenSkyClient<HttpTransport> {
    /// Build a client over a real HTTP transport, pointed at the
    /// endpoints in `config`.
    pub fn new(config: &Config) -> Result<Self> {
        let transport = HttpTransport::new()?;
        Ok(Self::with_transport(
            transport,
            &config.token_url,
            &config.states_url,
        ))
    }
}

impl<T: Transport> OpenSkyClient<T> {
    pub fn with_transport(transport: T, token_url: &str, states_url: &str) -> Self {
        OpenSkyClient {
            transport,
            token_url: token_url.to_string(),
            states_url: states_url.to_string(),
        }
    }

    /// Exchange the client credentials for a bearer token. Incomplete
    /// credentials fail before any network call is made.
    pub fn authenticate(&self, credentials: &Credentials) -> Result<AccessToken, AuthError> {
        if !credentials.is_complete() {
            return Err(AuthError::MissingCredentials);
        }

        debug!(url = %self.token_url, "requesting access token");
        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", credentials.client_id.as_str()),
            ("client_secret", credentials.client_secret.as_str()),
        ];
        let response = self.transport.post_form(&self.token_url, &form)?;
        if !response.is_success() {
            warn!(status = response.status, "token endpoint returned an error");
            return Err(AuthError::RequestFailed {
                status: response.status,
                message: response.body,
            });
        }

        let payload: TokenResponse =
            serde_json::from_str(&response.body).map_err(|_| AuthError::MalformedResponse)?;
        let token = payload.access_token.ok_or(AuthError::MalformedResponse)?;
        debug!("access token retrieved");
        Ok(AccessToken(token))
    }

    /// Fetch every aircraft currently inside `bounds`. An empty result is
    /// normal; only whole-request problems are errors.
    pub fn fetch_states(
        &self,
        token: &AccessToken,
        bounds: &BoundingBox,
    ) -> Result<Vec<StateVector>, QueryError> {
        let query = [
            ("lamin", bounds.min_lat.to_string()),
            ("lomin", bounds.min_lon.to_string()),
            ("lamax", bounds.max_lat.to_string()),
            ("lomax", bounds.max_lon.to_string()),
        ];

        debug!(url = %self.states_url, "querying state vectors");
        let response = self
            .transport
            .get(&self.states_url, &query, Some(token.as_str()))?;
        if !response.is_success() {
            warn!(status = response.status, "states endpoint returned an error");
            return Err(QueryError::RequestFailed {
                status: response.status,
                message: response.body,
            });
        }

        let payload: StatesResponse = serde_json::from_str(&response.body)?;
        let vectors = payload.into_vectors();
        debug!(count = vectors.len(), "decoded state vectors");
        Ok(vectors)
    }
}
