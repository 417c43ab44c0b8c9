//! Insertion-ordered user registry and activity join

use std::collections::HashMap;
use tracing::debug;

use crate::{
    AccountStatus, ApiUser, Article, Comment, Owner, Question, ReputationEvent, Tag, UserId,
    UserRecord,
};

const SECONDS_PER_DAY: f64 = 86_400.0;
const SECONDS_PER_HOUR: f64 = 3_600.0;

/// Resolve an activity item's owner to a registry identity.
///
/// The numeric ID wins when present. Deleted accounts keep a `userNNN`
/// display name from which the ID is decoded; anything else falls back to
/// the display name itself.
pub fn resolve_owner(owner: &Owner) -> UserId {
    if let Some(user_id) = owner.user_id {
        return UserId::Id(user_id);
    }
    let name = owner.display_name.as_deref().unwrap_or("unknown");
    match name.split_once("user").and_then(|(_, digits)| digits.parse().ok()) {
        Some(user_id) => UserId::Id(user_id),
        None => UserId::Name(name.to_string()),
    }
}

impl UserRecord {
    /// Blank record with zeroed accumulators and empty activity lists.
    pub fn new(user_id: UserId, display_name: String, account_status: AccountStatus) -> Self {
        Self {
            user_id,
            display_name,
            account_status,
            account_id: None,
            email: None,
            title: None,
            department: None,
            external_id: None,
            moderator: None,
            account_longevity_days: None,
            account_inactivity_days: None,
            questions: Vec::new(),
            answers: Vec::new(),
            articles: Vec::new(),
            comments: Vec::new(),
            reputation_history: Vec::new(),
            sme_tags: Vec::new(),
            answer_response_times: Vec::new(),
            question_count: 0,
            questions_with_no_answers: 0,
            question_upvotes: 0,
            question_downvotes: 0,
            answer_count: 0,
            answer_upvotes: 0,
            answer_downvotes: 0,
            answers_accepted: 0,
            answer_response_time_median: None,
            article_count: 0,
            article_upvotes: 0,
            comment_count: 0,
            net_reputation: 0,
            total_upvotes: 0,
            total_downvotes: 0,
        }
    }

    /// Record seeded from the primary user listing.
    pub fn from_primary(user: &ApiUser, now_epoch: i64) -> Self {
        let account_status = match user.is_deactivated {
            Some(true) => AccountStatus::Deactivated,
            Some(false) => AccountStatus::Active,
            None => AccountStatus::Registered,
        };
        let mut record = Self::new(
            UserId::Id(user.user_id),
            user.display_name.clone(),
            account_status,
        );
        record.account_id = user.account_id;
        record.email = user.email.clone();
        record.title = user.title.clone();
        record.department = user.department.clone();
        record.external_id = user.external_id.clone();
        record.moderator = user.moderator;
        record.account_longevity_days =
            Some(((now_epoch - user.creation_date) as f64 / SECONDS_PER_DAY).round() as i64);
        record.account_inactivity_days =
            Some(((now_epoch - user.last_access_date) as f64 / SECONDS_PER_DAY).round() as i64);
        record
    }

    /// Placeholder record synthesized for a referenced-but-deleted author.
    /// Identity and account-age fields stay absent.
    pub fn deleted(user_id: UserId, display_name: &str) -> Self {
        Self::new(
            user_id,
            format!("{display_name} (DELETED)"),
            AccountStatus::Deleted,
        )
    }
}

/// Insertion-ordered store of user records, keyed by [`UserId`].
///
/// Insertion order is the tie-break order of the final report sort, so the
/// primary listing's order is preserved and placeholders append in first-
/// reference order.
pub struct UserRegistry {
    records: Vec<UserRecord>,
    index: HashMap<UserId, usize>,
}

impl UserRegistry {
    /// Seed the registry from the primary user listing.
    pub fn from_users(users: &[ApiUser], now_epoch: i64) -> Self {
        let mut registry = Self {
            records: Vec::with_capacity(users.len()),
            index: HashMap::with_capacity(users.len()),
        };
        for user in users {
            let record = UserRecord::from_primary(user, now_epoch);
            registry.insert(record);
        }
        registry
    }

    /// Number of records currently in the registry
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the registry holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Attach questions, their nested answers, and all nested comments.
    pub fn attach_questions(&mut self, questions: &[Question]) {
        for question in questions {
            let slot = self.slot_for_owner(&question.owner);
            self.records[slot].questions.push(question.clone());
            self.attach_answers(question);
            self.attach_comments(&question.comments);
        }
    }

    /// Attach articles.
    pub fn attach_articles(&mut self, articles: &[Article]) {
        for article in articles {
            let slot = self.slot_for_owner(&article.owner);
            self.records[slot].articles.push(article.clone());
        }
    }

    /// Attach reputation events.
    pub fn attach_reputation(&mut self, events: &[ReputationEvent]) {
        for event in events {
            let slot = self.slot_for_id(UserId::Id(event.user_id), None);
            self.records[slot].reputation_history.push(event.clone());
        }
    }

    /// Attach tag names to every expert's SME list.
    ///
    /// A user listed both individually and via a group for the same tag
    /// records the tag name once; attribution is a set, not a list.
    pub fn attach_tag_experts(&mut self, tags: &[Tag]) {
        for tag in tags {
            for expert in tag.smes.users.iter().chain(&tag.smes.user_groups) {
                let slot = self.slot_for_id(UserId::Id(expert.id), None);
                let record = &mut self.records[slot];
                if !record.sme_tags.contains(&tag.name) {
                    record.sme_tags.push(tag.name.clone());
                }
            }
        }
    }

    /// Consume the registry, yielding records in insertion order.
    pub fn into_records(self) -> Vec<UserRecord> {
        self.records
    }

    fn attach_answers(&mut self, question: &Question) {
        for answer in &question.answers {
            let slot = self.slot_for_owner(&answer.owner);
            let record = &mut self.records[slot];
            record.answers.push(answer.clone());
            let response_hours =
                (answer.creation_date - question.creation_date) as f64 / SECONDS_PER_HOUR;
            record.answer_response_times.push(response_hours);
            self.attach_comments(&answer.comments);
        }
    }

    fn attach_comments(&mut self, comments: &[Comment]) {
        for comment in comments {
            let slot = self.slot_for_owner(&comment.owner);
            self.records[slot].comments.push(comment.clone());
        }
    }

    fn slot_for_owner(&mut self, owner: &Owner) -> usize {
        self.slot_for_id(resolve_owner(owner), owner.display_name.as_deref())
    }

    /// Index of the record with this identity, synthesizing a deleted-user
    /// placeholder on first reference.
    fn slot_for_id(&mut self, user_id: UserId, display_name: Option<&str>) -> usize {
        if let Some(&slot) = self.index.get(&user_id) {
            return slot;
        }
        // ID-only streams (reputation, tag experts) carry no display name;
        // fall back to the platform's userNNN convention.
        let name = match (display_name, &user_id) {
            (Some(name), _) => name.to_string(),
            (None, UserId::Id(id)) => format!("user{id}"),
            (None, UserId::Name(name)) => name.clone(),
        };
        debug!("Synthesizing deleted-user record for {user_id}");
        self.insert(UserRecord::deleted(user_id, &name))
    }

    fn insert(&mut self, record: UserRecord) -> usize {
        let slot = self.records.len();
        self.index.insert(record.user_id.clone(), slot);
        self.records.push(record);
        slot
    }
}
