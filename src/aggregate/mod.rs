//! User registry, activity join, and metrics reduction
//!
//! The aggregator owns the only shared mutable state of a run: the
//! user-ID-keyed registry built from the primary listing and extended with
//! synthesized records for deleted authors. Every activity stream joins
//! against it, then the reducer computes windowed per-user metrics.

pub mod metrics;
pub mod registry;

pub use metrics::ReportWindow;
pub use registry::{resolve_owner, UserRegistry};

use crate::{ApiData, UserRecord};

/// Join all activity streams onto user records and reduce windowed metrics.
///
/// `now_epoch` anchors the account longevity/inactivity computations so the
/// join stays deterministic under test.
pub fn build_user_records(
    data: &ApiData,
    window: &ReportWindow,
    now_epoch: i64,
) -> Vec<UserRecord> {
    let mut registry = UserRegistry::from_users(&data.users, now_epoch);
    registry.attach_questions(&data.questions);
    registry.attach_articles(&data.articles);
    registry.attach_reputation(&data.reputation_history);
    registry.attach_tag_experts(&data.tags);

    let mut records = registry.into_records();
    metrics::reduce(&mut records, window);
    records
}
