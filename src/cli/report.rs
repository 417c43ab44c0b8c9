//! Report command: retrieve (or replay), aggregate, reduce, export

use chrono::{NaiveDate, Utc};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::info;

use super::CliError;
use crate::aggregate::{build_user_records, ReportWindow};
use crate::collect::CollectOptions;
use crate::config::{DATA_DIR, FAR_FUTURE_EPOCH};
use crate::output::{csv, json};
use crate::report;
use crate::source::{create_source, SourceConfig};

/// User activity report CLI
#[derive(Parser, Debug)]
#[command(name = "user-activity-report")]
#[command(about = "Create a CSV report of per-user activity metrics from a Q&A platform deployment", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Base URL of the deployment. Team deployments carry a /c/<slug> path
    /// segment; anything else is treated as Enterprise. Required unless
    /// --no-api is set.
    #[arg(long)]
    pub url: Option<String>,

    /// API access token
    #[arg(long)]
    pub token: Option<String>,

    /// API key. Required for Enterprise deployments.
    #[arg(long)]
    pub key: Option<String>,

    /// Report window start date (YYYY-MM-DD). All data is included when
    /// omitted.
    #[arg(long)]
    pub start_date: Option<String>,

    /// Report window end date (YYYY-MM-DD). All data is included when
    /// omitted.
    #[arg(long)]
    pub end_date: Option<String>,

    /// Creation-date lower bound (YYYY-MM-DD) applied at the API level to
    /// reduce response size
    #[arg(long)]
    pub api_start_date: Option<String>,

    /// Creation-date upper bound (YYYY-MM-DD) applied at the API level
    #[arg(long)]
    pub api_end_date: Option<String>,

    /// Skip API calls and use the JSON snapshots in the data directory
    #[arg(long, default_value_t = false)]
    pub no_api: bool,

    /// Maximum number of users to process. Useful for testing or processing
    /// subsets of large user bases.
    #[arg(long)]
    pub max_users: Option<usize>,

    /// Lowest user ID to process. Useful for processing users in chunks.
    #[arg(long)]
    pub user_id_start: Option<u64>,

    /// Highest user ID to process
    #[arg(long)]
    pub user_id_end: Option<u64>,

    /// Custom suffix for output files. The current date range is used when
    /// not specified.
    #[arg(long)]
    pub output_name: Option<String>,
}

impl Cli {
    /// Run the full pipeline: load data, join, reduce, export.
    pub async fn execute(&self) -> Result<(), CliError> {
        let window = ReportWindow::new(
            parse_date(self.start_date.as_deref())?.unwrap_or(0),
            parse_date(self.end_date.as_deref())?.unwrap_or(FAR_FUTURE_EPOCH),
        );

        let source = create_source(SourceConfig {
            url: self.url.clone(),
            token: self.token.clone(),
            key: self.key.clone(),
            no_api: self.no_api,
            collect: CollectOptions {
                max_users: self.max_users,
                user_id_start: self.user_id_start,
                user_id_end: self.user_id_end,
            },
            api_fromdate: parse_date(self.api_start_date.as_deref())?,
            api_todate: parse_date(self.api_end_date.as_deref())?,
            output_name: self.output_name.clone(),
            data_dir: PathBuf::from(DATA_DIR),
        })?;

        let data = source.load().await?;

        let now = Utc::now();
        let users = build_user_records(&data, &window, now.timestamp());
        json::export(
            Path::new(DATA_DIR),
            "user_metrics",
            self.output_name.as_deref(),
            &users,
        )?;

        let rows = report::project(&users);
        let file_name = csv::report_file_name(
            now.date_naive(),
            self.output_name.as_deref(),
            self.start_date.as_deref(),
            self.end_date.as_deref(),
        );
        csv::write_report(Path::new(&file_name), &rows)?;

        info!("User report complete: {} users", rows.len());
        Ok(())
    }
}

/// Parse a YYYY-MM-DD argument to epoch seconds at midnight UTC.
fn parse_date(input: Option<&str>) -> Result<Option<i64>, CliError> {
    let Some(input) = input else {
        return Ok(None);
    };
    let date = NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|e| CliError::InvalidArgument(format!("invalid date '{input}': {e}")))?;
    let datetime = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| CliError::InvalidArgument(format!("invalid date '{input}'")))?;
    Ok(Some(datetime.and_utc().timestamp()))
}
