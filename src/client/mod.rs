//! Q&A platform API session and endpoint clients

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{info, warn};

pub mod pagination;
pub mod v2;
pub mod v3;

/// User agent sent with every request
const USER_AGENT: &str = concat!("user-activity-report/", env!("CARGO_PKG_VERSION"));

/// Client errors
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Required configuration is absent
    #[error("missing required configuration: {0}")]
    MissingCredential(String),

    /// Initial connectivity probe failed
    #[error("unable to connect to the API: {0}")]
    Connectivity(String),

    /// Success-status response whose body is not valid JSON
    #[error("unexpected non-JSON response from {url}: {body}")]
    Protocol {
        /// Request URL
        url: String,
        /// Raw response body
        body: String,
    },

    /// Request-level failure (recoverable at the caller)
    #[error("HTTP error: {0}")]
    Http(String),
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Which API generation a request targets; selects the auth header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiVersion {
    /// Content API (users, questions, articles, reputation, filters)
    V2,
    /// Directory/tag API (directory users, tags, experts)
    V3,
}

/// Deployment variant decoded from the base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Deployment {
    /// Hosted team deployment; the slug rides along as a query parameter
    Team {
        /// Team slug taken from the `/c/<slug>` URL path
        slug: String,
    },
    /// Self-hosted enterprise deployment
    Enterprise,
}

/// Immutable per-run API session.
///
/// Credentials, deployment kind, and the TLS-verification choice are fixed
/// at [`ApiSession::connect`] time and shared by reference with every
/// subsequent call; nothing about the session mutates afterwards.
#[derive(Debug)]
pub struct ApiSession {
    http: Client,
    base_url: String,
    deployment: Deployment,
    token: Option<String>,
    api_key: Option<String>,
    verify_tls: bool,
}

impl ApiSession {
    /// Decode the deployment from the base URL and validate credentials.
    ///
    /// A `/c/<slug>` path segment selects a Team deployment; anything else
    /// is Enterprise. Team needs an access token; Enterprise needs the API
    /// key. Fails before any network activity.
    pub fn new(
        url: &str,
        token: Option<String>,
        api_key: Option<String>,
    ) -> ClientResult<Self> {
        let url = url.trim_end_matches('/');
        let (base_url, deployment) = match url.split_once("/c/") {
            Some((base, slug)) if !slug.is_empty() => (
                base.to_string(),
                Deployment::Team {
                    slug: slug.trim_matches('/').to_string(),
                },
            ),
            _ => (url.to_string(), Deployment::Enterprise),
        };

        let token = token.filter(|t| !t.is_empty());
        match &deployment {
            Deployment::Team { .. } if token.is_none() => {
                return Err(ClientError::MissingCredential("API token".to_string()));
            }
            Deployment::Enterprise if api_key.as_deref().unwrap_or("").is_empty() => {
                return Err(ClientError::MissingCredential("API key".to_string()));
            }
            _ => {}
        }

        Ok(Self {
            http: build_client(true)?,
            base_url,
            deployment,
            token,
            api_key,
            verify_tls: true,
        })
    }

    /// Probe connectivity once and fix the TLS-verification mode.
    ///
    /// On a connection failure of the verifying client the probe is retried
    /// once without certificate verification; if that succeeds the
    /// non-verifying client is kept for every subsequent call. A non-success
    /// probe status or a second failure is fatal.
    pub async fn connect(mut self) -> ClientResult<Self> {
        let url = self.v2_url("/tags");
        info!("Testing API connection...");

        let response = match self.request(ApiVersion::V2, &url, &[]).send().await {
            Ok(response) => response,
            Err(err) => {
                warn!("Connection failed ({err}). Retrying without TLS verification...");
                self.http = build_client(false)?;
                self.verify_tls = false;
                self.request(ApiVersion::V2, &url, &[])
                    .send()
                    .await
                    .map_err(|e| ClientError::Connectivity(e.to_string()))?
            }
        };

        let status = response.status();
        if status.is_success() {
            info!("API connection successful");
            Ok(self)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(ClientError::Connectivity(format!(
                "status code {status}: {body}"
            )))
        }
    }

    /// Content API URL for an endpoint path
    pub fn v2_url(&self, endpoint: &str) -> String {
        format!("{}/api/2.3{endpoint}", self.base_url)
    }

    /// Directory/tag API URL for an endpoint path
    pub fn v3_url(&self, endpoint: &str) -> String {
        format!("{}/api/v3{endpoint}", self.base_url)
    }

    /// Whether TLS verification survived the connectivity probe
    pub fn verify_tls(&self) -> bool {
        self.verify_tls
    }

    /// Deployment variant decoded from the base URL
    pub fn deployment(&self) -> &Deployment {
        &self.deployment
    }

    /// Build a GET request with the auth header and team parameter applied.
    pub(crate) fn request(
        &self,
        api: ApiVersion,
        url: &str,
        query: &[(String, String)],
    ) -> reqwest::RequestBuilder {
        let mut request = self.http.get(url).query(query);
        request = match (api, &self.deployment) {
            (ApiVersion::V2, Deployment::Enterprise) => {
                request.header("X-API-Key", self.api_key.as_deref().unwrap_or(""))
            }
            (ApiVersion::V2, Deployment::Team { .. }) => {
                request.header("X-API-Access-Token", self.token.as_deref().unwrap_or(""))
            }
            (ApiVersion::V3, _) => request.bearer_auth(self.token.as_deref().unwrap_or("")),
        };
        if let Deployment::Team { slug } = &self.deployment {
            request = request.query(&[("team", slug.as_str())]);
        }
        request
    }

    /// Fetch a single (non-paginated) JSON record.
    ///
    /// Any failure is reported as a recoverable [`ClientError::Http`]; the
    /// per-item follow-up lookups that use this are defaulted by their
    /// callers rather than aborting the run.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        api: ApiVersion,
        url: &str,
    ) -> ClientResult<T> {
        let response = self
            .request(api, url, &[])
            .send()
            .await
            .map_err(|e| ClientError::Http(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Http(format!(
                "{url} returned status {status}: {body}"
            )));
        }
        response
            .json::<T>()
            .await
            .map_err(|e| ClientError::Http(format!("{url} returned an unreadable body: {e}")))
    }
}

fn build_client(verify_tls: bool) -> ClientResult<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .danger_accept_invalid_certs(!verify_tls)
        .build()
        .map_err(|e| ClientError::Connectivity(format!("failed to build HTTP client: {e}")))
}
