//! Integration test: snapshot export, replay, and full report pipeline

use std::fs;
use user_activity_report::aggregate::{build_user_records, ReportWindow};
use user_activity_report::output::{csv::write_report, json};
use user_activity_report::report::project;
use user_activity_report::source::{DataSource, SnapshotSource};
use user_activity_report::{
    AccountStatus, Answer, ApiData, ApiUser, Article, ExpertRef, Owner, Question, ReputationEvent,
    Tag, TagExperts, UserId,
};

fn fixture_data() -> ApiData {
    let listed = |user_id: u64, display_name: &str| ApiUser {
        user_id,
        display_name: display_name.to_string(),
        creation_date: 1_600_000_000,
        last_access_date: 1_690_000_000,
        account_id: Some(user_id + 1000),
        is_deactivated: Some(false),
        email: Some(format!("{display_name}@example.com")),
        title: Some("Engineer".to_string()),
        department: None,
        external_id: None,
        moderator: Some(false),
    };

    ApiData {
        users: vec![listed(10, "ann"), listed(20, "bea")],
        reputation_history: vec![
            ReputationEvent {
                user_id: 10,
                creation_date: 1_650_000_500,
                reputation_change: 10,
            },
            ReputationEvent {
                user_id: 20,
                creation_date: 1_650_000_600,
                reputation_change: -2,
            },
        ],
        questions: vec![Question {
            owner: Owner {
                user_id: Some(10),
                display_name: Some("ann".to_string()),
            },
            creation_date: 1_650_000_000,
            answer_count: 1,
            up_vote_count: 3,
            answers: vec![Answer {
                owner: Owner {
                    user_id: None,
                    display_name: Some("user99".to_string()),
                },
                creation_date: 1_650_007_200,
                is_accepted: true,
                up_vote_count: 5,
                ..Default::default()
            }],
            ..Default::default()
        }],
        articles: vec![Article {
            owner: Owner {
                user_id: Some(20),
                display_name: Some("bea".to_string()),
            },
            creation_date: 1_650_100_000,
            score: 4,
            ..Default::default()
        }],
        tags: vec![Tag {
            id: 1,
            name: "databases".to_string(),
            subject_matter_expert_count: 1,
            smes: TagExperts {
                users: vec![ExpertRef { id: 20 }],
                user_groups: vec![ExpertRef { id: 20 }],
            },
        }],
    }
}

/// Exported snapshots reload into an identical data set
#[tokio::test]
async fn test_snapshot_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let data = fixture_data();

    json::export(dir.path(), "users", None, &data.users).unwrap();
    json::export(dir.path(), "reputation_history", None, &data.reputation_history).unwrap();
    json::export(dir.path(), "questions", None, &data.questions).unwrap();
    json::export(dir.path(), "articles", None, &data.articles).unwrap();
    json::export(dir.path(), "tags", None, &data.tags).unwrap();

    let source = SnapshotSource::new(dir.path().to_path_buf());
    let restored = source.load().await.unwrap();
    assert_eq!(restored, data);
}

/// A missing snapshot aborts replay instead of proceeding with partial data
#[tokio::test]
async fn test_replay_fails_on_missing_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    json::export(dir.path(), "users", None, &fixture_data().users).unwrap();

    let source = SnapshotSource::new(dir.path().to_path_buf());
    assert!(source.load().await.is_err());
}

/// Replayed data flows through join, reduce, and projection into a CSV with
/// a synthesized row for the deleted answerer
#[tokio::test]
async fn test_full_pipeline_from_snapshots() {
    let dir = tempfile::tempdir().unwrap();
    let data = fixture_data();

    json::export(dir.path(), "users", None, &data.users).unwrap();
    json::export(dir.path(), "reputation_history", None, &data.reputation_history).unwrap();
    json::export(dir.path(), "questions", None, &data.questions).unwrap();
    json::export(dir.path(), "articles", None, &data.articles).unwrap();
    json::export(dir.path(), "tags", None, &data.tags).unwrap();

    let source = SnapshotSource::new(dir.path().to_path_buf());
    let restored = source.load().await.unwrap();

    let records = build_user_records(&restored, &ReportWindow::default(), 1_700_000_000);
    assert_eq!(records.len(), 3);

    let ann = records
        .iter()
        .find(|record| record.user_id == UserId::Id(10))
        .unwrap();
    assert_eq!(ann.question_count, 1);
    assert_eq!(ann.net_reputation, 10);

    let bea = records
        .iter()
        .find(|record| record.user_id == UserId::Id(20))
        .unwrap();
    assert_eq!(bea.article_count, 1);
    // Dual individual/group expert designation records the tag once
    assert_eq!(bea.sme_tags, vec!["databases".to_string()]);

    let ghost = records
        .iter()
        .find(|record| record.user_id == UserId::Id(99))
        .unwrap();
    assert_eq!(ghost.account_status, AccountStatus::Deleted);
    assert_eq!(ghost.answer_count, 1);
    assert_eq!(ghost.answers_accepted, 1);
    assert_eq!(ghost.answer_response_time_median, Some(2.0));

    let report_path = dir.path().join("report.csv");
    write_report(&report_path, &project(&records)).unwrap();

    let contents = fs::read_to_string(&report_path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    // Header plus one row per user, sorted by net reputation descending
    assert_eq!(lines.len(), 4);
    assert!(lines[1].starts_with("10,ann"));
    assert!(lines[2].contains("user99 (DELETED)"));
    assert!(lines[3].starts_with("20,bea"));
}
