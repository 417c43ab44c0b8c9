//! Unit tests for the windowed metrics reducer

use user_activity_report::aggregate::{build_user_records, ReportWindow};
use user_activity_report::{Answer, ApiData, ApiUser, Owner, Question, ReputationEvent, UserId};

fn listed_user(user_id: u64) -> ApiUser {
    ApiUser {
        user_id,
        display_name: format!("User {user_id}"),
        creation_date: 1_600_000_000,
        last_access_date: 1_600_000_000,
        account_id: None,
        is_deactivated: None,
        email: None,
        title: None,
        department: None,
        external_id: None,
        moderator: None,
    }
}

fn owner(user_id: u64) -> Owner {
    Owner {
        user_id: Some(user_id),
        display_name: None,
    }
}

/// Response times [-1, 2, 4, 6] hours: the negative sample is discarded and
/// the median is 4; with no valid samples the median stays blank, not zero
#[test]
fn test_median_discards_negative_samples() {
    // One question at t=0 with answers at -1h, +2h, +4h, +6h
    let answers = [-1_i64, 2, 4, 6]
        .iter()
        .map(|hours| Answer {
            owner: owner(5),
            creation_date: hours * 3600,
            ..Default::default()
        })
        .collect();
    let data = ApiData {
        users: vec![listed_user(5)],
        questions: vec![Question {
            owner: owner(5),
            creation_date: 0,
            answer_count: 4,
            answers,
            ..Default::default()
        }],
        ..Default::default()
    };

    let records = build_user_records(&data, &ReportWindow::default(), 1_700_000_000);
    assert_eq!(records[0].answer_response_time_median, Some(4.0));
}

#[test]
fn test_median_blank_when_no_valid_samples() {
    let data = ApiData {
        users: vec![listed_user(5)],
        questions: vec![Question {
            owner: owner(5),
            creation_date: 7200,
            answer_count: 1,
            answers: vec![Answer {
                owner: owner(5),
                // Answer predates its question; sample is non-positive
                creation_date: 0,
                ..Default::default()
            }],
            ..Default::default()
        }],
        ..Default::default()
    };

    let records = build_user_records(&data, &ReportWindow::default(), 1_700_000_000);
    assert_eq!(records[0].answer_response_time_median, None);
    assert_eq!(records[0].answer_count, 0);
}

/// Items stamped exactly on either window bound are excluded
#[test]
fn test_window_bounds_exclusive() {
    let make_question = |creation_date| Question {
        owner: owner(5),
        creation_date,
        ..Default::default()
    };
    let data = ApiData {
        users: vec![listed_user(5)],
        questions: vec![
            make_question(1_000),
            make_question(1_001),
            make_question(2_000),
        ],
        ..Default::default()
    };

    let records = build_user_records(&data, &ReportWindow::new(1_000, 2_000), 1_700_000_000);
    assert_eq!(records[0].question_count, 1);
}

/// The default window includes everything
#[test]
fn test_default_window_includes_all_activity() {
    let data = ApiData {
        users: vec![listed_user(5)],
        reputation_history: vec![
            ReputationEvent {
                user_id: 5,
                creation_date: 1,
                reputation_change: 10,
            },
            ReputationEvent {
                user_id: 5,
                creation_date: 2_000_000_000,
                reputation_change: -4,
            },
        ],
        ..Default::default()
    };

    let records = build_user_records(&data, &ReportWindow::default(), 1_700_000_000);
    assert_eq!(records[0].user_id, UserId::Id(5));
    assert_eq!(records[0].net_reputation, 6);
}

/// Windowed reputation only counts events strictly inside the window
#[test]
fn test_net_reputation_windowed() {
    let event = |creation_date, reputation_change| ReputationEvent {
        user_id: 5,
        creation_date,
        reputation_change,
    };
    let data = ApiData {
        users: vec![listed_user(5)],
        reputation_history: vec![event(50, 100), event(150, 7), event(250, -2)],
        ..Default::default()
    };

    let records = build_user_records(&data, &ReportWindow::new(100, 200), 1_700_000_000);
    assert_eq!(records[0].net_reputation, 7);
}
