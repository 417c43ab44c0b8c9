//! Retrieval tuning constants

use std::time::Duration;

/// Items requested per page.
/// 100 is the server's maximum page size; anything larger is clamped, so
/// smaller values only add round trips.
pub const PAGE_SIZE: usize = 100;

/// Safety margin added to every server-issued backoff, in seconds.
/// The server's value is a minimum; sleeping exactly that long still trips
/// the throttle occasionally, one extra second does not.
pub const BACKOFF_MARGIN_SECS: u64 = 1;

/// Maximum user IDs per reputation-history request.
/// The endpoint documents batches of 100 but rejects them in practice;
/// batches of 50 go through reliably.
pub const REPUTATION_ID_BATCH: usize = 50;

/// Directory lookups per batch when back-filling deactivated users.
pub const DIRECTORY_LOOKUP_BATCH: usize = 10;

/// Pause between deactivated-user lookup batches.
pub const DIRECTORY_BATCH_PAUSE: Duration = Duration::from_secs(1);

/// Tags per batch when resolving expert lists.
pub const EXPERT_TAG_BATCH: usize = 5;

/// Pause between expert-lookup batches.
pub const EXPERT_BATCH_PAUSE: Duration = Duration::from_millis(500);

/// Highest user ID reserved for system and group placeholder accounts.
/// The primary listing includes them; the report excludes them.
pub const SYSTEM_USER_ID_MAX: u64 = 1;

/// Report-window end when no end date is given (2050-01-01 UTC).
pub const FAR_FUTURE_EPOCH: i64 = 2_524_626_000;

/// Directory JSON snapshots are written to and replayed from.
pub const DATA_DIR: &str = "data";
