//! Data source seam
//!
//! A run either retrieves everything live from the API (and snapshots it)
//! or replays the snapshots of a previous run. The trait hides the choice
//! from the rest of the pipeline.

use async_trait::async_trait;
use std::path::PathBuf;

use crate::client::ClientError;
use crate::collect::CollectOptions;
use crate::output::OutputError;
use crate::ApiData;

pub mod live;
pub mod snapshot;

pub use live::LiveSource;
pub use snapshot::SnapshotSource;

/// Data source errors
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// API retrieval failure
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Snapshot read/write failure
    #[error(transparent)]
    Output(#[from] OutputError),
}

/// Result type for data source operations
pub type SourceResult<T> = Result<T, SourceError>;

/// Yields the five raw resource collections a run operates on.
#[async_trait]
pub trait DataSource {
    /// Load the collections, from the API or from snapshots.
    async fn load(&self) -> SourceResult<ApiData>;
}

/// Configuration for [`create_source`].
#[derive(Debug, Clone, Default)]
pub struct SourceConfig {
    /// Deployment base URL; required unless `no_api` is set
    pub url: Option<String>,
    /// API access token
    pub token: Option<String>,
    /// API key (Enterprise deployments)
    pub key: Option<String>,
    /// Bypass live retrieval and replay snapshots
    pub no_api: bool,
    /// User-set narrowing options
    pub collect: CollectOptions,
    /// API-level creation-date lower bound (epoch seconds)
    pub api_fromdate: Option<i64>,
    /// API-level creation-date upper bound (epoch seconds)
    pub api_todate: Option<i64>,
    /// Output-name suffix for exported snapshots
    pub output_name: Option<String>,
    /// Snapshot directory
    pub data_dir: PathBuf,
}

/// Select the live or snapshot source.
///
/// Live mode without a base URL is a configuration error, raised before any
/// network activity.
pub fn create_source(config: SourceConfig) -> SourceResult<Box<dyn DataSource>> {
    if config.no_api {
        Ok(Box::new(SnapshotSource::new(config.data_dir)))
    } else {
        if config.url.as_deref().unwrap_or("").is_empty() {
            return Err(ClientError::MissingCredential("base URL".to_string()).into());
        }
        Ok(Box::new(LiveSource::new(config)))
    }
}
