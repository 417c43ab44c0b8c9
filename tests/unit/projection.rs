//! Unit tests for report projection and CSV export

use std::fs;
use user_activity_report::output::csv::write_report;
use user_activity_report::report::{project, ReportRow};
use user_activity_report::{AccountStatus, UserId, UserRecord};

fn user_with_reputation(name: &str, net_reputation: i64) -> UserRecord {
    let mut record = UserRecord::new(
        UserId::Name(name.to_string()),
        name.to_string(),
        AccountStatus::Active,
    );
    record.net_reputation = net_reputation;
    record
}

/// Net reputations [5, -3, 5] sort with both 5s first, input order preserved
#[test]
fn test_sort_stable_descending() {
    let users = vec![
        user_with_reputation("first", 5),
        user_with_reputation("second", -3),
        user_with_reputation("third", 5),
    ];
    let rows = project(&users);
    let order: Vec<&str> = rows.iter().map(|row| row.display_name.as_str()).collect();
    assert_eq!(order, vec!["first", "third", "second"]);
}

/// The CSV header row matches the projector's field order exactly
#[test]
fn test_csv_header_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.csv");
    let users = vec![user_with_reputation("ann", 1)];
    write_report(&path, &project(&users)).unwrap();

    let contents = fs::read_to_string(&path).unwrap();
    let header = contents.lines().next().unwrap();
    assert_eq!(
        header,
        "User ID,Display Name,Net Reputation,Account Longevity (Days),\
         Account Inactivity (Days),Questions,Questions With No Answers,Answers,\
         Answers Accepted,Median Answer Time (Hours),Articles,Comments,\
         Total Upvotes,Total Downvotes,SME Tags,Account Status,Moderator,\
         Email,Title,Department,External ID,Account ID"
    );
}

/// A blank median cell is written for "no data"; zero would be a real value
#[test]
fn test_blank_median_distinct_from_zero() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.csv");

    let mut with_data = user_with_reputation("fast", 0);
    with_data.answer_response_time_median = Some(0.5);
    let without_data = user_with_reputation("silent", 0);

    write_report(&path, &project(&[with_data, without_data])).unwrap();

    let contents = fs::read_to_string(&path).unwrap();
    let mut reader = csv::Reader::from_reader(contents.as_bytes());
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    let median_column = 9;
    assert_eq!(&rows[0][median_column], "0.5");
    assert_eq!(&rows[1][median_column], "");
}

/// Deleted-user rows project with defaults instead of failing
#[test]
fn test_deleted_row_defaults() {
    let record = UserRecord::deleted(UserId::Name("Ghost Writer".to_string()), "Ghost Writer");
    let row = ReportRow::from(&record);
    assert_eq!(row.user_id, "Ghost Writer");
    assert_eq!(row.account_status, "Deleted");
    assert_eq!(row.email, "");
    assert_eq!(row.account_id, None);
    assert_eq!(row.sme_tags, "");
}
