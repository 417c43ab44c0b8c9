//! Content API operations (users, questions, articles, reputation, filters)

use serde::Deserialize;
use tracing::info;

use crate::client::pagination::fetch_all_pages;
use crate::client::{ApiSession, ApiVersion, ClientError, ClientResult};
use crate::config::REPUTATION_ID_BATCH;
use crate::{ApiUser, Article, Question, ReputationEvent};

/// Content API client, borrowing the shared session.
pub struct V2Client<'a> {
    session: &'a ApiSession,
}

#[derive(Debug, Deserialize)]
struct CreatedFilter {
    #[serde(default)]
    filter: Option<String>,
}

impl<'a> V2Client<'a> {
    /// Wrap a connected session
    pub fn new(session: &'a ApiSession) -> Self {
        Self { session }
    }

    /// Create a server-side field-selection filter.
    ///
    /// Enterprise deployments construct filters per run; the returned token
    /// is passed back on subsequent collection fetches. `base` is the
    /// server's base filter name (usually `"default"`).
    pub async fn create_filter(&self, attributes: &[&str], base: &str) -> ClientResult<String> {
        let url = self.session.v2_url("/filters/create");
        let mut params = vec![
            ("base".to_string(), base.to_string()),
            ("unsafe".to_string(), "false".to_string()),
        ];
        if !attributes.is_empty() {
            // The endpoint takes a semicolon-separated attribute string
            params.push(("include".to_string(), attributes.join(";")));
        }

        let created: Vec<CreatedFilter> =
            fetch_all_pages(self.session, ApiVersion::V2, &url, &params).await?;
        let filter = created
            .into_iter()
            .find_map(|item| item.filter)
            .ok_or_else(|| {
                ClientError::Http("filter creation returned no filter token".to_string())
            })?;
        info!("Filter created: {filter}");
        Ok(filter)
    }

    /// Fetch the complete primary user listing.
    pub async fn get_all_users(&self, filter: &str) -> ClientResult<Vec<ApiUser>> {
        let url = self.session.v2_url("/users");
        fetch_all_pages(self.session, ApiVersion::V2, &url, &filter_params(filter)).await
    }

    /// Fetch all questions, with nested answers and comments selected by the
    /// filter, optionally bounded by creation date at the API level.
    pub async fn get_all_questions(
        &self,
        filter: &str,
        fromdate: Option<i64>,
        todate: Option<i64>,
    ) -> ClientResult<Vec<Question>> {
        let url = self.session.v2_url("/questions");
        let params = dated_params(filter, fromdate, todate);
        fetch_all_pages(self.session, ApiVersion::V2, &url, &params).await
    }

    /// Fetch all articles, optionally bounded by creation date.
    pub async fn get_all_articles(
        &self,
        filter: &str,
        fromdate: Option<i64>,
        todate: Option<i64>,
    ) -> ClientResult<Vec<Article>> {
        let url = self.session.v2_url("/articles");
        let params = dated_params(filter, fromdate, todate);
        fetch_all_pages(self.session, ApiVersion::V2, &url, &params).await
    }

    /// Fetch reputation history for a set of users.
    ///
    /// IDs ride in the endpoint path, batched to stay under the size the
    /// server actually accepts; results are concatenated across batches.
    pub async fn get_reputation_history(
        &self,
        user_ids: &[u64],
        filter: &str,
    ) -> ClientResult<Vec<ReputationEvent>> {
        let mut events = Vec::new();
        for batch in id_batches(user_ids) {
            let url = self
                .session
                .v2_url(&format!("/users/{batch}/reputation-history"));
            let page = fetch_all_pages(self.session, ApiVersion::V2, &url, &filter_params(filter))
                .await?;
            events.extend(page);
        }
        Ok(events)
    }
}

/// Split user IDs into `;`-joined path segments of at most
/// [`REPUTATION_ID_BATCH`] IDs, preserving order.
pub fn id_batches(user_ids: &[u64]) -> Vec<String> {
    user_ids
        .chunks(REPUTATION_ID_BATCH)
        .map(|chunk| {
            chunk
                .iter()
                .map(u64::to_string)
                .collect::<Vec<_>>()
                .join(";")
        })
        .collect()
}

fn filter_params(filter: &str) -> Vec<(String, String)> {
    if filter.is_empty() {
        Vec::new()
    } else {
        vec![("filter".to_string(), filter.to_string())]
    }
}

fn dated_params(filter: &str, fromdate: Option<i64>, todate: Option<i64>) -> Vec<(String, String)> {
    let mut params = filter_params(filter);
    if let Some(fromdate) = fromdate {
        params.push(("fromdate".to_string(), fromdate.to_string()));
    }
    if let Some(todate) = todate {
        params.push(("todate".to_string(), todate.to_string()));
    }
    params
}
