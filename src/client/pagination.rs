//! Paginated collection fetches
//!
//! One logical fetch walks an endpoint page by page until the server reports
//! no more data, honoring server-issued backoff between pages. An HTTP
//! failure mid-sequence truncates the collection instead of failing the run;
//! a success response that is not JSON aborts the run.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, warn};

use crate::client::{ApiSession, ApiVersion, ClientError, ClientResult};
use crate::config::{BACKOFF_MARGIN_SECS, PAGE_SIZE};

/// Standard paged response envelope.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
struct PageEnvelope<T> {
    #[serde(default)]
    items: Vec<T>,
    #[serde(default)]
    has_more: bool,
    /// Minimum wait in seconds before the next call to this endpoint
    #[serde(default)]
    backoff: Option<u64>,
}

/// Fetch every page of a collection endpoint and concatenate the items.
///
/// # Arguments
/// * `session` - Connected API session
/// * `api` - API generation (selects the auth header)
/// * `endpoint_url` - Full endpoint URL
/// * `params` - Resource-specific query parameters (filter, date bounds)
///
/// # Errors
/// Returns [`ClientError::Protocol`] when a success-status response is not
/// valid JSON; data integrity cannot be assumed past that point. Transport
/// failures and non-success statuses are logged and yield a partial result.
pub async fn fetch_all_pages<T: DeserializeOwned>(
    session: &ApiSession,
    api: ApiVersion,
    endpoint_url: &str,
    params: &[(String, String)],
) -> ClientResult<Vec<T>> {
    let mut items = Vec::new();
    let mut page: usize = 1;

    loop {
        let mut query = params.to_vec();
        query.push(("page".to_string(), page.to_string()));
        query.push(("pagesize".to_string(), PAGE_SIZE.to_string()));

        debug!("Getting page {page} from {endpoint_url}");
        let response = match session.request(api, endpoint_url, &query).send().await {
            Ok(response) => response,
            Err(err) => {
                // Partial result: downstream aggregation tolerates a
                // truncated collection.
                error!("Request to {endpoint_url} failed: {err}");
                break;
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("API call to {endpoint_url} failed with status code {status}");
            error!("Response from server: {body}");
            break;
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(err) => {
                error!("Failed to read response body from {endpoint_url}: {err}");
                break;
            }
        };

        let envelope: PageEnvelope<T> =
            serde_json::from_str(&body).map_err(|_| ClientError::Protocol {
                url: endpoint_url.to_string(),
                body,
            })?;

        debug!("Received {} items on page {page}", envelope.items.len());
        items.extend(envelope.items);

        if !envelope.has_more {
            break;
        }

        if let Some(seconds) = envelope.backoff {
            let wait = seconds + BACKOFF_MARGIN_SECS;
            warn!("API backoff request received. Waiting {wait} seconds...");
            sleep(Duration::from_secs(wait)).await;
        }

        page += 1;
    }

    Ok(items)
}
