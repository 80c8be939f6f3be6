use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Direction of an access event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Serialize, Deserialize)]
#[sqlx(type_name = "access_direction", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Entry,
    Exit,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Entry => "entry",
            Direction::Exit => "exit",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// AccessEvent model - SQL persistence layer
///
/// Append-only: rows are inserted by the gate and never mutated.
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct AccessEvent {
    pub id: Uuid,
    pub member_id: Uuid,
    pub direction: Direction,
    pub occurred_at: DateTime<Utc>,
}

/// Joined read model for the day log and reports: event plus member name.
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct AccessLogEntry {
    pub given_name: String,
    pub family_name: String,
    pub direction: Direction,
    pub occurred_at: DateTime<Utc>,
}

impl AccessEvent {
    /// Append an event for a member. The store assigns the timestamp.
    pub async fn insert(member_id: Uuid, direction: Direction, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO access_events (member_id, direction) VALUES ($1, $2) RETURNING *",
        )
        .bind(member_id)
        .bind(direction)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// All events on the given date with member names, newest first.
    pub async fn find_for_date(date: NaiveDate, pool: &PgPool) -> Result<Vec<AccessLogEntry>> {
        sqlx::query_as::<_, AccessLogEntry>(
            "SELECT m.given_name, m.family_name, a.direction, a.occurred_at
             FROM access_events a
             JOIN members m ON m.id = a.member_id
             WHERE a.occurred_at::date = $1
             ORDER BY a.occurred_at DESC",
        )
        .bind(date)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Direction of the member's most recent event today, if any.
    pub async fn last_direction_today(member_id: Uuid, pool: &PgPool) -> Result<Option<Direction>> {
        sqlx::query_scalar::<_, Direction>(
            "SELECT direction FROM access_events
             WHERE member_id = $1 AND occurred_at::date = CURRENT_DATE
             ORDER BY occurred_at DESC
             LIMIT 1",
        )
        .bind(member_id)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// Total events recorded for a member.
    pub async fn count_for_member(member_id: Uuid, pool: &PgPool) -> Result<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM access_events WHERE member_id = $1")
            .bind(member_id)
            .fetch_one(pool)
            .await
            .map_err(Into::into)
    }
}
