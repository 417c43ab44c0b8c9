//! Windowed metrics reduction

use crate::config::FAR_FUTURE_EPOCH;
use crate::UserRecord;

/// Date window applied to counted activity.
///
/// Both bounds are strict: an item stamped exactly on `start` or `end` is
/// excluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportWindow {
    /// Window start (epoch seconds, exclusive)
    pub start: i64,
    /// Window end (epoch seconds, exclusive)
    pub end: i64,
}

impl ReportWindow {
    /// Window over the given bounds
    pub fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    /// Whether a timestamp falls strictly inside the window
    pub fn contains(&self, timestamp: i64) -> bool {
        timestamp > self.start && timestamp < self.end
    }
}

impl Default for ReportWindow {
    /// Everything-included window: epoch 0 through the far-future sentinel
    fn default() -> Self {
        Self {
            start: 0,
            end: FAR_FUTURE_EPOCH,
        }
    }
}

/// Compute windowed counts, vote sums, response-time median, and net
/// reputation for every record.
///
/// Response-time samples are not windowed; non-positive samples (clock skew,
/// answers imported ahead of their question) are dropped from a filtered
/// copy before the median. No valid samples leaves the median `None`, which
/// the report renders blank to distinguish "no data" from "zero hours".
pub fn reduce(users: &mut [UserRecord], window: &ReportWindow) {
    for user in users.iter_mut() {
        let mut question_count = 0;
        let mut questions_with_no_answers = 0;
        let mut question_upvotes = 0;
        let mut question_downvotes = 0;
        for question in &user.questions {
            if window.contains(question.creation_date) {
                question_count += 1;
                question_upvotes += question.up_vote_count;
                question_downvotes += question.down_vote_count;
                if question.answer_count == 0 {
                    questions_with_no_answers += 1;
                }
            }
        }

        let mut answer_count = 0;
        let mut answer_upvotes = 0;
        let mut answer_downvotes = 0;
        let mut answers_accepted = 0;
        for answer in &user.answers {
            if window.contains(answer.creation_date) {
                answer_count += 1;
                answer_upvotes += answer.up_vote_count;
                answer_downvotes += answer.down_vote_count;
                if answer.is_accepted {
                    answers_accepted += 1;
                }
            }
        }

        let mut article_count = 0;
        let mut article_upvotes = 0;
        for article in &user.articles {
            if window.contains(article.creation_date) {
                article_count += 1;
                article_upvotes += article.score;
            }
        }

        let mut comment_count = 0;
        for comment in &user.comments {
            if window.contains(comment.creation_date) {
                comment_count += 1;
            }
        }

        let mut net_reputation = 0;
        for event in &user.reputation_history {
            if window.contains(event.creation_date) {
                net_reputation += event.reputation_change;
            }
        }

        let valid_samples: Vec<f64> = user
            .answer_response_times
            .iter()
            .copied()
            .filter(|&sample| sample > 0.0)
            .collect();

        user.question_count = question_count;
        user.questions_with_no_answers = questions_with_no_answers;
        user.question_upvotes = question_upvotes;
        user.question_downvotes = question_downvotes;
        user.answer_count = answer_count;
        user.answer_upvotes = answer_upvotes;
        user.answer_downvotes = answer_downvotes;
        user.answers_accepted = answers_accepted;
        user.answer_response_time_median = median(&valid_samples);
        user.article_count = article_count;
        user.article_upvotes = article_upvotes;
        user.comment_count = comment_count;
        user.net_reputation = net_reputation;
        user.total_upvotes = question_upvotes + answer_upvotes + article_upvotes;
        user.total_downvotes = question_downvotes + answer_downvotes;
    }
}

/// Median of the samples, rounded to two decimal places. `None` when empty.
fn median(samples: &[f64]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    let median = if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    };
    Some((median * 100.0).round() / 100.0)
}
