//! Reporting tests: day statistics and CSV rendering.

use chrono::{NaiveDate, TimeZone, Utc};
use desk_core::domains::access::{AccessLogEntry, Direction};
use desk_core::domains::member::{Member, MemberData, PaymentStatus};
use desk_core::domains::reporting::{daily_report_csv, daily_stats, member_report_csv};
use uuid::Uuid;

fn report_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, 30).unwrap()
}

fn event(given: &str, family: &str, direction: Direction, hour: u32, min: u32) -> AccessLogEntry {
    AccessLogEntry {
        given_name: given.to_string(),
        family_name: family.to_string(),
        direction,
        occurred_at: Utc.with_ymd_and_hms(2026, 8, 30, hour, min, 0).unwrap(),
    }
}

fn sample_day() -> Vec<AccessLogEntry> {
    vec![
        event("Luis", "Mora", Direction::Exit, 11, 40),
        event("Ana", "Gómez", Direction::Exit, 10, 30),
        event("Luis", "Mora", Direction::Entry, 10, 5),
        event("Ana", "Gómez", Direction::Entry, 9, 15),
    ]
}

#[test]
fn stats_count_directions_and_distinct_members() {
    let stats = daily_stats(report_date(), &sample_day());

    assert_eq!(stats.entries, 2);
    assert_eq!(stats.exits, 2);
    assert_eq!(stats.distinct_members, 2);
    assert_eq!(stats.total, 4);
}

#[test]
fn stats_for_an_empty_day_are_zero() {
    let stats = daily_stats(report_date(), &[]);

    assert_eq!(stats.entries, 0);
    assert_eq!(stats.exits, 0);
    assert_eq!(stats.distinct_members, 0);
}

#[test]
fn daily_csv_has_header_rows_and_summary() {
    let generated = Utc.with_ymd_and_hms(2026, 8, 30, 12, 0, 0).unwrap();
    let csv = daily_report_csv(report_date(), &sample_day(), generated);
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(
        lines[0],
        "Report Date,Given Name,Family Name,Direction,Time,Timestamp"
    );
    // one row per event, newest first as queried
    assert_eq!(lines[1], "2026-08-30,Luis,Mora,EXIT,11:40:00,2026-08-30 11:40:00");
    assert_eq!(lines[4], "2026-08-30,Ana,Gómez,ENTRY,09:15:00,2026-08-30 09:15:00");

    assert!(csv.contains("Total entries,2"));
    assert!(csv.contains("Total exits,2"));
    assert!(csv.contains("Distinct members,2"));
    assert!(csv.contains("Generated at,2026-08-30 12:00:00"));
}

#[test]
fn daily_csv_scrubs_stored_names_on_render() {
    let events = vec![event("Ana\u{7}", "Gó\tmez", Direction::Entry, 9, 0)];
    let csv = daily_report_csv(report_date(), &events, Utc::now());

    assert!(csv.contains("Ana,Gó mez"));
    assert!(!csv.chars().any(|c| c.is_control() && c != '\n'));
}

#[test]
fn fields_with_commas_are_quoted() {
    let events = vec![event("Ana, María", "Gómez", Direction::Entry, 9, 0)];
    let csv = daily_report_csv(report_date(), &events, Utc::now());

    assert!(csv.contains("\"Ana, María\""));
}

#[test]
fn member_csv_totals_paid_and_pending() {
    let member = |given: &str, status: PaymentStatus| {
        MemberData::from(Member {
            id: Uuid::new_v4(),
            code: "AB12CD34EF".to_string(),
            given_name: given.to_string(),
            family_name: "Gómez".to_string(),
            phone: None,
            email: None,
            payment_status: status,
            registered_at: Utc.with_ymd_and_hms(2026, 1, 10, 8, 0, 0).unwrap(),
            active: true,
        })
    };
    let members = vec![
        member("Ana", PaymentStatus::Paid),
        member("Luis", PaymentStatus::Pending),
        member("María", PaymentStatus::Paid),
    ];

    let csv = member_report_csv(&members, Utc::now());

    assert!(csv.starts_with("Code,Given Name,Family Name,Phone,Email,Payment Status,Registered"));
    assert!(csv.contains("Total members,3"));
    assert!(csv.contains("Paid,2"));
    assert!(csv.contains("Pending,1"));
}
