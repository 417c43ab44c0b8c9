//! # User Activity Report Library
//!
//! Retrieves user-activity data from a multi-tenant Q&A platform's paginated
//! REST API and produces a per-user metrics report (CSV plus JSON snapshots).
//!
//! ## Features
//!
//! - **Paginated retrieval**: transparent page-walking with server-driven
//!   backoff handling and partial-result tolerance
//! - **Deployment variants**: Enterprise (server-side filter creation) and
//!   Team (precomputed filter tokens) deployments
//! - **Cross-entity aggregation**: joins users, questions, answers, comments,
//!   articles, reputation events, and tag experts into unified user records,
//!   reconstructing records for deleted authors
//! - **Windowed metrics**: date-range filtering with derived per-user
//!   statistics (counts, vote sums, median response time, net reputation)
//! - **Snapshot replay**: every collected resource is exported as JSON and a
//!   run can be replayed from those files without touching the API
//!
//! ## Architecture
//!
//! The library is organized into several core modules:
//!
//! - [`client`] - API session, paginated fetcher, and endpoint clients
//! - [`source`] - live-retrieval vs. snapshot-replay data sources
//! - [`collect`] - per-resource collectors with batching rules
//! - [`aggregate`] - user registry, activity join, and metrics reducer
//! - [`report`] - report row projection (sort and flatten)
//! - [`output`] - JSON snapshot and CSV report writers
//!
//! Data flows strictly downward: fetcher → collectors → aggregator →
//! reducer → projector. All API calls are issued sequentially on a
//! current-thread runtime; the only suspension points are the server-driven
//! backoff sleeps and the fixed inter-batch pauses.

#![warn(missing_docs)]
#![warn(clippy::all)]

use serde::{Deserialize, Serialize};
use std::fmt;

/// User registry, activity join, and metrics reduction
pub mod aggregate;

/// CLI command implementation
pub mod cli;

/// API session and endpoint clients
pub mod client;

/// Resource collectors
pub mod collect;

/// Tuning constants
pub mod config;

/// JSON snapshot and CSV report writers
pub mod output;

/// Report row projection
pub mod report;

/// Data source seam (live API vs. snapshot replay)
pub mod source;

// Re-export commonly used types
pub use aggregate::metrics::ReportWindow;
pub use client::ApiSession;

/// Author reference attached to every content item.
///
/// `user_id` is absent when the authoring account no longer exists; in that
/// case the numeric ID can often still be decoded from the display name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Owner {
    /// Numeric user ID, absent for deleted accounts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
    /// Display name as rendered by the platform
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

/// User record from the primary (content API) user listing.
///
/// The secondary directory attributes (`email` through `moderator`) are
/// filled in by the user collector; they are absent on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiUser {
    /// Numeric user ID, unique per deployment
    pub user_id: u64,
    /// Display name
    #[serde(default)]
    pub display_name: String,
    /// Account creation time (epoch seconds)
    #[serde(default)]
    pub creation_date: i64,
    /// Last access time (epoch seconds)
    #[serde(default)]
    pub last_access_date: i64,
    /// Network-wide account ID, when exposed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<u64>,
    /// Deactivation flag; only Enterprise deployments expose it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_deactivated: Option<bool>,
    /// Email address from the directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Job title from the directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Department from the directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    /// External identity-provider ID from the directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    /// Whether the directory role is Moderator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moderator: Option<bool>,
}

/// User record from the secondary directory API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryUser {
    /// Numeric user ID (matches [`ApiUser::user_id`])
    pub id: u64,
    /// Email address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Job title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    /// Department
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    /// External identity-provider ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    /// Directory role (e.g. "Moderator")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// Question with nested answers and comments.
///
/// The content filter selects the nested collections so that one questions
/// fetch returns answers and comments as well.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Asker reference
    #[serde(default)]
    pub owner: Owner,
    /// Creation time (epoch seconds)
    #[serde(default)]
    pub creation_date: i64,
    /// Number of answers, as counted by the server
    #[serde(default)]
    pub answer_count: u64,
    /// Upvote count
    #[serde(default)]
    pub up_vote_count: i64,
    /// Downvote count
    #[serde(default)]
    pub down_vote_count: i64,
    /// Question score
    #[serde(default)]
    pub score: i64,
    /// Title passthrough
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Link passthrough
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Nested answers
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub answers: Vec<Answer>,
    /// Nested comments on the question itself
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<Comment>,
}

/// Answer nested under a question.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    /// Answerer reference
    #[serde(default)]
    pub owner: Owner,
    /// Creation time (epoch seconds)
    #[serde(default)]
    pub creation_date: i64,
    /// Whether the asker accepted this answer
    #[serde(default)]
    pub is_accepted: bool,
    /// Upvote count
    #[serde(default)]
    pub up_vote_count: i64,
    /// Downvote count
    #[serde(default)]
    pub down_vote_count: i64,
    /// Answer score
    #[serde(default)]
    pub score: i64,
    /// Nested comments on the answer
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<Comment>,
}

/// Comment nested under a question or answer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    /// Commenter reference
    #[serde(default)]
    pub owner: Owner,
    /// Creation time (epoch seconds)
    #[serde(default)]
    pub creation_date: i64,
    /// Comment score
    #[serde(default)]
    pub score: i64,
}

/// Knowledge-base article.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Article {
    /// Author reference
    #[serde(default)]
    pub owner: Owner,
    /// Creation time (epoch seconds)
    #[serde(default)]
    pub creation_date: i64,
    /// Article score (stands in for upvotes; articles have no downvotes)
    #[serde(default)]
    pub score: i64,
    /// Title passthrough
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Link passthrough
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// Single reputation-change event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReputationEvent {
    /// User the event belongs to
    pub user_id: u64,
    /// Event time (epoch seconds)
    pub creation_date: i64,
    /// Signed reputation delta
    pub reputation_change: i64,
}

/// Reference to a user designated as a tag expert, either individually or
/// through a user group already resolved to member user IDs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpertRef {
    /// Numeric user ID
    pub id: u64,
}

/// Expert sub-lists for one tag.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagExperts {
    /// Individually-designated experts
    #[serde(default)]
    pub users: Vec<ExpertRef>,
    /// Group-designated experts, resolved to user IDs
    #[serde(default)]
    pub user_groups: Vec<ExpertRef>,
}

/// Topic tag with expert designations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    /// Numeric tag ID (needed for the experts lookup)
    pub id: u64,
    /// Tag name
    #[serde(default)]
    pub name: String,
    /// Server-side expert count; lookups are only issued when nonzero
    #[serde(default)]
    pub subject_matter_expert_count: u64,
    /// Resolved expert lists, filled by the tag collector
    #[serde(default)]
    pub smes: TagExperts,
}

/// The five raw resource collections one run operates on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiData {
    /// Primary user listing with merged directory attributes
    pub users: Vec<ApiUser>,
    /// Reputation events for the collected users
    pub reputation_history: Vec<ReputationEvent>,
    /// Questions with nested answers and comments
    pub questions: Vec<Question>,
    /// Knowledge-base articles
    pub articles: Vec<Article>,
    /// Tags with resolved expert lists
    pub tags: Vec<Tag>,
}

/// Identifier of a user record in the working set.
///
/// Deleted authors whose numeric ID cannot be recovered from the display
/// name fall back to the display name itself as their identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    /// Numeric platform user ID
    Id(u64),
    /// Display-name fallback for unresolvable deleted accounts
    Name(String),
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserId::Id(id) => write!(f, "{id}"),
            UserId::Name(name) => write!(f, "{name}"),
        }
    }
}

/// Account lifecycle state as reported in the final CSV.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountStatus {
    /// Enterprise account in good standing
    Active,
    /// Enterprise account that has been deactivated
    Deactivated,
    /// Team account (deployments without a deactivation flag)
    Registered,
    /// Synthesized record for an author missing from the user listing
    Deleted,
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AccountStatus::Active => "Active",
            AccountStatus::Deactivated => "Deactivated",
            AccountStatus::Registered => "Registered",
            AccountStatus::Deleted => "Deleted",
        };
        write!(f, "{s}")
    }
}

/// Unified per-user record: identity, attached activity, and reduced metrics.
///
/// Records are created from the primary listing or synthesized on first
/// reference to a deleted author, mutated additively through the join and
/// reduce phases, and read-only during projection. Optional identity fields
/// are absent on synthesized records; the projector substitutes defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Unique identity within the working set
    pub user_id: UserId,
    /// Display name (suffixed ` (DELETED)` on synthesized records)
    pub display_name: String,
    /// Lifecycle state
    pub account_status: AccountStatus,
    /// Network-wide account ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<u64>,
    /// Email address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Job title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Department
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    /// External identity-provider ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    /// Moderator flag; absent on synthesized records
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moderator: Option<bool>,
    /// Days since account creation; absent on synthesized records
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_longevity_days: Option<i64>,
    /// Days since last access; absent on synthesized records
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_inactivity_days: Option<i64>,

    /// Questions asked by this user
    #[serde(default)]
    pub questions: Vec<Question>,
    /// Answers written by this user
    #[serde(default)]
    pub answers: Vec<Answer>,
    /// Articles written by this user
    #[serde(default)]
    pub articles: Vec<Article>,
    /// Comments written by this user
    #[serde(default)]
    pub comments: Vec<Comment>,
    /// Reputation events for this user
    #[serde(default)]
    pub reputation_history: Vec<ReputationEvent>,
    /// Names of tags this user is an expert for (recorded once per tag)
    #[serde(default)]
    pub sme_tags: Vec<String>,
    /// Question-to-answer response times in hours, one sample per answer
    #[serde(default)]
    pub answer_response_times: Vec<f64>,

    /// Questions inside the report window
    #[serde(default)]
    pub question_count: u64,
    /// Windowed questions that have no answers
    #[serde(default)]
    pub questions_with_no_answers: u64,
    /// Upvotes on windowed questions
    #[serde(default)]
    pub question_upvotes: i64,
    /// Downvotes on windowed questions
    #[serde(default)]
    pub question_downvotes: i64,
    /// Answers inside the report window
    #[serde(default)]
    pub answer_count: u64,
    /// Upvotes on windowed answers
    #[serde(default)]
    pub answer_upvotes: i64,
    /// Downvotes on windowed answers
    #[serde(default)]
    pub answer_downvotes: i64,
    /// Windowed answers marked accepted
    #[serde(default)]
    pub answers_accepted: u64,
    /// Median response time in hours over positive samples; `None` when no
    /// valid samples exist (reported blank, never zero)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer_response_time_median: Option<f64>,
    /// Articles inside the report window
    #[serde(default)]
    pub article_count: u64,
    /// Score sum of windowed articles (stands in for upvotes)
    #[serde(default)]
    pub article_upvotes: i64,
    /// Comments inside the report window
    #[serde(default)]
    pub comment_count: u64,
    /// Sum of windowed reputation changes (can be negative)
    #[serde(default)]
    pub net_reputation: i64,
    /// Windowed question + answer + article upvotes
    #[serde(default)]
    pub total_upvotes: i64,
    /// Windowed question + answer downvotes
    #[serde(default)]
    pub total_downvotes: i64,
}
