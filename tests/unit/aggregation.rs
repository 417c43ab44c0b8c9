//! Unit tests for the activity join and placeholder synthesis

use user_activity_report::aggregate::{build_user_records, ReportWindow, UserRegistry};
use user_activity_report::{
    AccountStatus, Answer, ApiData, ApiUser, Article, Comment, Owner, Question, ReputationEvent,
    UserId,
};

fn primary_user(user_id: u64, display_name: &str) -> ApiUser {
    ApiUser {
        user_id,
        display_name: display_name.to_string(),
        creation_date: 1_600_000_000,
        last_access_date: 1_700_000_000,
        account_id: Some(user_id),
        is_deactivated: Some(false),
        email: Some(format!("{display_name}@example.com")),
        title: None,
        department: None,
        external_id: None,
        moderator: Some(false),
    }
}

fn owner(user_id: u64) -> Owner {
    Owner {
        user_id: Some(user_id),
        display_name: Some(format!("User {user_id}")),
    }
}

fn deleted_owner(display_name: &str) -> Owner {
    Owner {
        user_id: None,
        display_name: Some(display_name.to_string()),
    }
}

/// Every activity item with a resolvable owner lands in exactly one user's
/// list, and that user's ID equals the owner ID
#[test]
fn test_items_attach_to_exactly_one_owner() {
    let users = vec![primary_user(10, "Ann"), primary_user(20, "Bea")];
    let mut registry = UserRegistry::from_users(&users, 1_700_000_000);

    let questions = vec![
        Question {
            owner: owner(10),
            creation_date: 1_650_000_000,
            ..Default::default()
        },
        Question {
            owner: owner(20),
            creation_date: 1_650_000_100,
            ..Default::default()
        },
    ];
    registry.attach_questions(&questions);
    let records = registry.into_records();

    let total_attached: usize = records.iter().map(|record| record.questions.len()).sum();
    assert_eq!(total_attached, 2);
    for record in &records {
        for question in &record.questions {
            assert_eq!(UserId::Id(question.owner.user_id.unwrap()), record.user_id);
        }
    }
}

/// An unresolvable owner gets a Deleted placeholder, and re-referencing the
/// same owner reuses it instead of creating a duplicate
#[test]
fn test_placeholder_created_once_and_reused() {
    let mut registry = UserRegistry::from_users(&[], 0);

    let article = Article {
        owner: deleted_owner("user404"),
        creation_date: 50,
        score: 1,
        ..Default::default()
    };
    let question = Question {
        owner: deleted_owner("user404"),
        creation_date: 60,
        ..Default::default()
    };
    registry.attach_articles(&[article]);
    registry.attach_questions(&[question]);

    let records = registry.into_records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].user_id, UserId::Id(404));
    assert_eq!(records[0].account_status, AccountStatus::Deleted);
    assert_eq!(records[0].articles.len(), 1);
    assert_eq!(records[0].questions.len(), 1);
}

/// Comments nested under both questions and answers attach to their writers
#[test]
fn test_nested_comments_attach_to_commenters() {
    let users = vec![primary_user(10, "Ann")];
    let mut registry = UserRegistry::from_users(&users, 0);

    let question = Question {
        owner: owner(10),
        creation_date: 100,
        comments: vec![Comment {
            owner: owner(10),
            creation_date: 110,
            ..Default::default()
        }],
        answers: vec![Answer {
            owner: deleted_owner("user77"),
            creation_date: 200,
            comments: vec![Comment {
                owner: owner(10),
                creation_date: 210,
                ..Default::default()
            }],
            ..Default::default()
        }],
        ..Default::default()
    };
    registry.attach_questions(&[question]);

    let records = registry.into_records();
    let ann = records
        .iter()
        .find(|record| record.user_id == UserId::Id(10))
        .unwrap();
    assert_eq!(ann.comments.len(), 2);
    let ghost = records
        .iter()
        .find(|record| record.user_id == UserId::Id(77))
        .unwrap();
    assert_eq!(ghost.answers.len(), 1);
}

/// Reputation events for an unknown user synthesize a placeholder too
#[test]
fn test_reputation_event_for_unknown_user() {
    let mut registry = UserRegistry::from_users(&[], 0);
    let events = vec![
        ReputationEvent {
            user_id: 55,
            creation_date: 10,
            reputation_change: 4,
        },
        ReputationEvent {
            user_id: 55,
            creation_date: 20,
            reputation_change: -1,
        },
    ];
    registry.attach_reputation(&events);

    let records = registry.into_records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].account_status, AccountStatus::Deleted);
    assert_eq!(records[0].reputation_history.len(), 2);
}

/// End-to-end scenario: 2 listed users, one question by user 10 answered by
/// a deleted account referenced as "user99" - three records come out, the
/// synthesized one marked Deleted with the answer attached
#[test]
fn test_end_to_end_deleted_answerer() {
    let data = ApiData {
        users: vec![primary_user(10, "Ann"), primary_user(20, "Bea")],
        questions: vec![Question {
            owner: owner(10),
            creation_date: 1_650_000_000,
            answer_count: 1,
            answers: vec![Answer {
                owner: deleted_owner("user99"),
                creation_date: 1_650_010_000,
                ..Default::default()
            }],
            ..Default::default()
        }],
        ..Default::default()
    };

    let records = build_user_records(&data, &ReportWindow::default(), 1_700_000_000);

    assert_eq!(records.len(), 3);
    let ann = records
        .iter()
        .find(|record| record.user_id == UserId::Id(10))
        .unwrap();
    assert_eq!(ann.question_count, 1);

    let ghost = records
        .iter()
        .find(|record| record.user_id == UserId::Id(99))
        .unwrap();
    assert_eq!(ghost.account_status, AccountStatus::Deleted);
    assert_eq!(ghost.answer_count, 1);
    assert_eq!(ghost.display_name, "user99 (DELETED)");
}
