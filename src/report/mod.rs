//! Report row projection
//!
//! Flattens enriched user records into the fixed export shape. Regular,
//! deactivated, and deleted records differ in which fields they carry; the
//! projection substitutes an empty string or zero instead of failing.

use serde::Serialize;
use std::cmp::Reverse;

use crate::UserRecord;

/// One row of the final CSV, columns in export order.
///
/// The serde renames are the exact CSV header names.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    /// Registry identity (numeric ID or display-name fallback)
    #[serde(rename = "User ID")]
    pub user_id: String,
    /// Display name
    #[serde(rename = "Display Name")]
    pub display_name: String,
    /// Windowed net reputation
    #[serde(rename = "Net Reputation")]
    pub net_reputation: i64,
    /// Days since account creation; blank for synthesized records
    #[serde(rename = "Account Longevity (Days)")]
    pub account_longevity_days: Option<i64>,
    /// Days since last access; blank for synthesized records
    #[serde(rename = "Account Inactivity (Days)")]
    pub account_inactivity_days: Option<i64>,
    /// Windowed question count
    #[serde(rename = "Questions")]
    pub questions: u64,
    /// Windowed questions without answers
    #[serde(rename = "Questions With No Answers")]
    pub questions_with_no_answers: u64,
    /// Windowed answer count
    #[serde(rename = "Answers")]
    pub answers: u64,
    /// Windowed accepted answers
    #[serde(rename = "Answers Accepted")]
    pub answers_accepted: u64,
    /// Median response time in hours; blank when no valid samples
    #[serde(rename = "Median Answer Time (Hours)")]
    pub median_answer_time_hours: Option<f64>,
    /// Windowed article count
    #[serde(rename = "Articles")]
    pub articles: u64,
    /// Windowed comment count
    #[serde(rename = "Comments")]
    pub comments: u64,
    /// Windowed question + answer + article upvotes
    #[serde(rename = "Total Upvotes")]
    pub total_upvotes: i64,
    /// Windowed question + answer downvotes
    #[serde(rename = "Total Downvotes")]
    pub total_downvotes: i64,
    /// Comma-joined SME tag names
    #[serde(rename = "SME Tags")]
    pub sme_tags: String,
    /// Account lifecycle state
    #[serde(rename = "Account Status")]
    pub account_status: String,
    /// Moderator flag; blank for synthesized records
    #[serde(rename = "Moderator")]
    pub moderator: Option<bool>,
    /// Email address, blank when absent
    #[serde(rename = "Email")]
    pub email: String,
    /// Job title, blank when absent
    #[serde(rename = "Title")]
    pub title: String,
    /// Department, blank when absent
    #[serde(rename = "Department")]
    pub department: String,
    /// External identity-provider ID, blank when absent
    #[serde(rename = "External ID")]
    pub external_id: String,
    /// Network-wide account ID, blank when absent
    #[serde(rename = "Account ID")]
    pub account_id: Option<u64>,
}

impl From<&UserRecord> for ReportRow {
    fn from(user: &UserRecord) -> Self {
        Self {
            user_id: user.user_id.to_string(),
            display_name: user.display_name.clone(),
            net_reputation: user.net_reputation,
            account_longevity_days: user.account_longevity_days,
            account_inactivity_days: user.account_inactivity_days,
            questions: user.question_count,
            questions_with_no_answers: user.questions_with_no_answers,
            answers: user.answer_count,
            answers_accepted: user.answers_accepted,
            median_answer_time_hours: user.answer_response_time_median,
            articles: user.article_count,
            comments: user.comment_count,
            total_upvotes: user.total_upvotes,
            total_downvotes: user.total_downvotes,
            sme_tags: user.sme_tags.join(", "),
            account_status: user.account_status.to_string(),
            moderator: user.moderator,
            email: user.email.clone().unwrap_or_default(),
            title: user.title.clone().unwrap_or_default(),
            department: user.department.clone().unwrap_or_default(),
            external_id: user.external_id.clone().unwrap_or_default(),
            account_id: user.account_id,
        }
    }
}

/// Sort users by net reputation descending and flatten into report rows.
///
/// The sort is stable: users with equal net reputation keep their insertion
/// order (primary listing first, placeholders in first-reference order).
pub fn project(users: &[UserRecord]) -> Vec<ReportRow> {
    let mut ordered: Vec<&UserRecord> = users.iter().collect();
    ordered.sort_by_key(|user| Reverse(user.net_reputation));
    ordered.into_iter().map(ReportRow::from).collect()
}
