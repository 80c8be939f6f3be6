use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, Utc};

use crate::common::sanitize_text;
use crate::domains::access::models::access_event::{AccessLogEntry, Direction};
use crate::domains::member::data::MemberData;

/// Aggregated counts for one day's event log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyStats {
    pub date: NaiveDate,
    pub entries: usize,
    pub exits: usize,
    pub distinct_members: usize,
    pub total: usize,
}

/// Aggregate a day's events into per-direction and distinct-member counts.
pub fn daily_stats(date: NaiveDate, events: &[AccessLogEntry]) -> DailyStats {
    let entries = events
        .iter()
        .filter(|e| e.direction == Direction::Entry)
        .count();
    let distinct: HashSet<(&str, &str)> = events
        .iter()
        .map(|e| (e.given_name.as_str(), e.family_name.as_str()))
        .collect();

    DailyStats {
        date,
        entries,
        exits: events.len() - entries,
        distinct_members: distinct.len(),
        total: events.len(),
    }
}

/// Quote a CSV field, doubling embedded quotes.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn csv_row(fields: &[&str]) -> String {
    fields
        .iter()
        .map(|f| csv_field(f))
        .collect::<Vec<_>>()
        .join(",")
}

/// Render the daily access report: header, one row per event, trailing
/// summary rows.
pub fn daily_report_csv(
    date: NaiveDate,
    events: &[AccessLogEntry],
    generated_at: DateTime<Utc>,
) -> String {
    let stats = daily_stats(date, events);
    let date_str = date.format("%Y-%m-%d").to_string();

    let mut lines = vec![csv_row(&[
        "Report Date",
        "Given Name",
        "Family Name",
        "Direction",
        "Time",
        "Timestamp",
    ])];

    for event in events {
        lines.push(csv_row(&[
            &date_str,
            &sanitize_text(&event.given_name),
            &sanitize_text(&event.family_name),
            &event.direction.as_str().to_uppercase(),
            &event.occurred_at.format("%H:%M:%S").to_string(),
            &event.occurred_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        ]));
    }

    lines.push(csv_row(&["", "", "", "", "", ""]));
    lines.push(csv_row(&["DAILY SUMMARY", "", "", "", "", ""]));
    lines.push(csv_row(&[
        "Total entries",
        &stats.entries.to_string(),
        "", "", "", "",
    ]));
    lines.push(csv_row(&[
        "Total exits",
        &stats.exits.to_string(),
        "", "", "", "",
    ]));
    lines.push(csv_row(&[
        "Distinct members",
        &stats.distinct_members.to_string(),
        "", "", "", "",
    ]));
    lines.push(csv_row(&[
        "Generated at",
        &generated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        "", "", "", "",
    ]));

    lines.join("\n") + "\n"
}

/// Render the member roster report with payment-status totals.
pub fn member_report_csv(members: &[MemberData], generated_at: DateTime<Utc>) -> String {
    use crate::domains::member::models::member::PaymentStatus;

    let mut lines = vec![csv_row(&[
        "Code",
        "Given Name",
        "Family Name",
        "Phone",
        "Email",
        "Payment Status",
        "Registered",
    ])];

    for m in members {
        lines.push(csv_row(&[
            &m.code,
            &m.given_name,
            &m.family_name,
            m.phone.as_deref().unwrap_or(""),
            m.email.as_deref().unwrap_or(""),
            m.payment_status.as_str(),
            &m.registered_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        ]));
    }

    let paid = members
        .iter()
        .filter(|m| m.payment_status == PaymentStatus::Paid)
        .count();

    lines.push(csv_row(&["", "", "", "", "", "", ""]));
    lines.push(csv_row(&[
        "Total members",
        &members.len().to_string(),
        "", "", "", "", "",
    ]));
    lines.push(csv_row(&["Paid", &paid.to_string(), "", "", "", "", ""]));
    lines.push(csv_row(&[
        "Pending",
        &(members.len() - paid).to_string(),
        "", "", "", "", "",
    ]));
    lines.push(csv_row(&[
        "Generated at",
        &generated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        "", "", "", "", "",
    ]));

    lines.join("\n") + "\n"
}
