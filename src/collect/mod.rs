//! Resource collectors
//!
//! One collector per resource type. Each fixes the field-selection filter
//! for its resource (Enterprise deployments construct filters server-side,
//! Team deployments use precomputed tokens), applies the resource's batching
//! rules, and delegates paging to the fetcher. Collectors run strictly one
//! after another; later collectors depend on earlier output.

use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashMap;
use tokio::time::sleep;
use tracing::{info, warn};

use crate::client::v2::V2Client;
use crate::client::v3::V3Client;
use crate::client::{ApiSession, ClientResult, Deployment};
use crate::config::{
    DIRECTORY_BATCH_PAUSE, DIRECTORY_LOOKUP_BATCH, EXPERT_BATCH_PAUSE, EXPERT_TAG_BATCH,
    SYSTEM_USER_ID_MAX,
};
use crate::{ApiUser, Article, DirectoryUser, Question, ReputationEvent, Tag, TagExperts};

/// Attributes the user filter must select on Enterprise deployments; the
/// deactivation flag is not part of the default payload.
const USER_FILTER_ATTRIBUTES: &[&str] = &["user.is_deactivated"];

/// Attributes the content filter must select so one questions fetch carries
/// nested answers and comments.
const CONTENT_FILTER_ATTRIBUTES: &[&str] = &[
    "answer.comment_count",
    "answer.comments",
    "answer.down_vote_count",
    "answer.last_editor",
    "answer.link",
    "answer.share_link",
    "answer.up_vote_count",
    "comment.link",
    "question.answers",
    "question.comment_count",
    "question.comments",
    "question.down_vote_count",
    "question.favorite_count",
    "question.last_editor",
    "question.notice",
    "question.share_link",
    "question.up_vote_count",
];

/// Attributes the article filter must select.
const ARTICLE_FILTER_ATTRIBUTES: &[&str] = &[
    "article.comment_count",
    "article.comments",
    "article.last_editor",
    "comment.body",
    "comment.body_markdown",
    "comment.link",
];

/// Precomputed filter tokens for Team deployments, which cannot create
/// filters server-side.
const TEAM_QUESTION_FILTER: &str = "!X9DEEiFwy0OeSWoJzb.QMqab2wPSk.X2opZDa2L";
const TEAM_ARTICLE_FILTER: &str = "!*Mg4Pjg9LXr9d_(v";

/// User-set narrowing options.
#[derive(Debug, Clone, Copy, Default)]
pub struct CollectOptions {
    /// Cap on the number of users processed
    pub max_users: Option<usize>,
    /// Lowest user ID to include
    pub user_id_start: Option<u64>,
    /// Highest user ID to include
    pub user_id_end: Option<u64>,
}

/// Collect the primary user listing and merge directory attributes.
///
/// System/group placeholder IDs are excluded, the optional ID range and cap
/// applied. Users absent from the directory listing are treated as
/// deactivated and back-filled through individual lookups in small batches;
/// a per-user failure substitutes defaults and continues.
pub async fn collect_users(
    session: &ApiSession,
    opts: &CollectOptions,
) -> ClientResult<Vec<ApiUser>> {
    let v2 = V2Client::new(session);
    let v3 = V3Client::new(session);

    let filter = match session.deployment() {
        Deployment::Enterprise => v2.create_filter(USER_FILTER_ATTRIBUTES, "default").await?,
        Deployment::Team { .. } => String::new(),
    };

    let mut users = v2.get_all_users(&filter).await?;

    // Exclude system and group placeholder accounts
    users.retain(|user| user.user_id > SYSTEM_USER_ID_MAX);

    if let Some(start) = opts.user_id_start {
        users.retain(|user| user.user_id >= start);
    }
    if let Some(end) = opts.user_id_end {
        users.retain(|user| user.user_id <= end);
    }
    if let Some(max) = opts.max_users {
        if users.len() > max {
            users.truncate(max);
            info!("Limited to {max} users for processing");
        }
    }

    info!("Processing {} users...", users.len());

    let directory = v3.get_all_users().await?;
    let lookup: HashMap<u64, DirectoryUser> =
        directory.into_iter().map(|user| (user.id, user)).collect();

    let mut deactivated = Vec::new();
    for (index, user) in users.iter_mut().enumerate() {
        match lookup.get(&user.user_id) {
            Some(entry) => apply_directory(user, entry),
            // Not in the directory listing - likely deactivated
            None => deactivated.push(index),
        }
    }

    if !deactivated.is_empty() {
        info!(
            "Found {} deactivated users, processing in batches...",
            deactivated.len()
        );
        let progress = batch_progress(deactivated.len() as u64, "deactivated users");
        let mut processed = 0;
        for batch in deactivated.chunks(DIRECTORY_LOOKUP_BATCH) {
            for &index in batch {
                let user = &mut users[index];
                match v3.get_user(user.user_id).await {
                    Ok(entry) => apply_directory(user, &entry),
                    Err(err) => {
                        warn!(
                            "Failed to get data for deactivated user {}: {err}",
                            user.user_id
                        );
                        user.moderator = Some(false);
                    }
                }
                user.is_deactivated = Some(true);
                progress.inc(1);
            }
            processed += batch.len();
            if processed < deactivated.len() {
                sleep(DIRECTORY_BATCH_PAUSE).await;
            }
        }
        progress.finish_and_clear();
    }

    Ok(users)
}

/// Collect reputation events for the already-collected user set.
pub async fn collect_reputation_history(
    session: &ApiSession,
    users: &[ApiUser],
) -> ClientResult<Vec<ReputationEvent>> {
    let v2 = V2Client::new(session);
    let user_ids: Vec<u64> = users.iter().map(|user| user.user_id).collect();
    let events = v2.get_reputation_history(&user_ids, "").await?;
    info!("Collected {} reputation events", events.len());
    Ok(events)
}

/// Collect questions with nested answers and comments, optionally bounded by
/// creation date at the API level.
pub async fn collect_questions(
    session: &ApiSession,
    fromdate: Option<i64>,
    todate: Option<i64>,
) -> ClientResult<Vec<Question>> {
    let v2 = V2Client::new(session);
    let filter = match session.deployment() {
        Deployment::Enterprise => v2.create_filter(CONTENT_FILTER_ATTRIBUTES, "default").await?,
        Deployment::Team { .. } => TEAM_QUESTION_FILTER.to_string(),
    };
    let questions = v2.get_all_questions(&filter, fromdate, todate).await?;
    info!("Collected {} questions", questions.len());
    Ok(questions)
}

/// Collect articles, optionally bounded by creation date at the API level.
pub async fn collect_articles(
    session: &ApiSession,
    fromdate: Option<i64>,
    todate: Option<i64>,
) -> ClientResult<Vec<Article>> {
    let v2 = V2Client::new(session);
    let filter = match session.deployment() {
        Deployment::Enterprise => v2.create_filter(ARTICLE_FILTER_ATTRIBUTES, "default").await?,
        Deployment::Team { .. } => TEAM_ARTICLE_FILTER.to_string(),
    };
    let articles = v2.get_all_articles(&filter, fromdate, todate).await?;
    info!("Collected {} articles", articles.len());
    Ok(articles)
}

/// Collect all tags and resolve expert lists.
///
/// Only tags with a nonzero expert count get a lookup, processed in small
/// batches with an inter-batch pause. A per-tag failure assigns an empty
/// expert set and continues; failures are isolated, never fatal.
pub async fn collect_tags(session: &ApiSession) -> ClientResult<Vec<Tag>> {
    let v3 = V3Client::new(session);
    let mut tags = v3.get_all_tags().await?;

    let with_experts: Vec<usize> = tags
        .iter()
        .enumerate()
        .filter(|(_, tag)| tag.subject_matter_expert_count > 0)
        .map(|(index, _)| index)
        .collect();

    if !with_experts.is_empty() {
        info!(
            "Found {} tags with experts, processing in batches...",
            with_experts.len()
        );
        let progress = batch_progress(with_experts.len() as u64, "tag experts");
        let mut processed = 0;
        for batch in with_experts.chunks(EXPERT_TAG_BATCH) {
            for &index in batch {
                let tag = &mut tags[index];
                match v3.get_tag_experts(tag.id).await {
                    Ok(experts) => tag.smes = experts,
                    Err(err) => {
                        warn!("Failed to get experts for tag {}: {err}", tag.id);
                        tag.smes = TagExperts::default();
                    }
                }
                progress.inc(1);
            }
            processed += batch.len();
            if processed < with_experts.len() {
                sleep(EXPERT_BATCH_PAUSE).await;
            }
        }
        progress.finish_and_clear();
    }

    info!("Collected {} tags", tags.len());
    Ok(tags)
}

/// Merge one directory record onto a primary user.
fn apply_directory(user: &mut ApiUser, entry: &DirectoryUser) {
    user.email = entry.email.clone();
    user.title = entry.job_title.clone();
    user.department = entry.department.clone();
    user.external_id = entry.external_id.clone();
    user.moderator = Some(entry.role.as_deref() == Some("Moderator"));
}

fn batch_progress(total: u64, message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .expect("hardcoded template is valid")
            .progress_chars("#>-"),
    );
    pb.set_message(message);
    pb
}
