//! Snapshot replay

use async_trait::async_trait;
use std::path::PathBuf;
use tracing::info;

use super::{DataSource, SourceResult};
use crate::output::json;
use crate::ApiData;

/// Data source backed by the JSON snapshots of a previous run.
pub struct SnapshotSource {
    data_dir: PathBuf,
}

impl SnapshotSource {
    /// Source reading from the given snapshot directory
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }
}

#[async_trait]
impl DataSource for SnapshotSource {
    async fn load(&self) -> SourceResult<ApiData> {
        info!(
            "Skipping API calls and using data from JSON files in {}...",
            self.data_dir.display()
        );
        let data = ApiData {
            users: json::read(&self.data_dir, "users")?,
            reputation_history: json::read(&self.data_dir, "reputation_history")?,
            questions: json::read(&self.data_dir, "questions")?,
            articles: json::read(&self.data_dir, "articles")?,
            tags: json::read(&self.data_dir, "tags")?,
        };
        info!("Data successfully loaded from JSON files");
        Ok(data)
    }
}
