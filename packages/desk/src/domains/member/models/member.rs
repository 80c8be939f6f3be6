use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::common::sanitize_text;

/// Monthly payment state of a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Serialize, Deserialize)]
#[sqlx(type_name = "payment_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Member model - SQL persistence layer
///
/// Keyed by a unique 10-character barcode. Rows are never physically deleted;
/// admins flip `active` off instead, and code lookups only see active rows.
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct Member {
    pub id: Uuid,
    pub code: String,
    pub given_name: String,
    pub family_name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub payment_status: PaymentStatus,
    pub registered_at: DateTime<Utc>,
    pub active: bool,
}

/// Fields for a member being registered. Text fields are scrubbed once at the
/// store boundary via [`NewMember::sanitized`].
#[derive(Debug, Clone)]
pub struct NewMember {
    pub code: String,
    pub given_name: String,
    pub family_name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub payment_status: PaymentStatus,
}

impl NewMember {
    /// Scrub every text field. Applied by each store implementation on
    /// insert, so callers cannot slip unsanitized text past the boundary.
    pub fn sanitized(self) -> Self {
        let clean_opt = |v: Option<String>| {
            v.map(|s| sanitize_text(&s)).filter(|s| !s.is_empty())
        };
        Self {
            code: sanitize_text(&self.code),
            given_name: sanitize_text(&self.given_name),
            family_name: sanitize_text(&self.family_name),
            phone: clean_opt(self.phone),
            email: clean_opt(self.email),
            payment_status: self.payment_status,
        }
    }
}

impl Member {
    /// Find an active member by barcode. Inactive members are invisible here.
    pub async fn find_by_code(code: &str, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM members WHERE code = $1 AND active = TRUE")
            .bind(code)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Insert a new member. Fails on a duplicate code (unique constraint).
    pub async fn insert(new: NewMember, pool: &PgPool) -> Result<Self> {
        let new = new.sanitized();
        sqlx::query_as::<_, Self>(
            "INSERT INTO members (code, given_name, family_name, phone, email, payment_status)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING *",
        )
        .bind(&new.code)
        .bind(&new.given_name)
        .bind(&new.family_name)
        .bind(&new.phone)
        .bind(&new.email)
        .bind(new.payment_status)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Update a member's payment status
    pub async fn update_payment_status(
        id: Uuid,
        status: PaymentStatus,
        pool: &PgPool,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "UPDATE members SET payment_status = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Flip the active flag (soft deactivation/reactivation)
    pub async fn set_active(id: Uuid, active: bool, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>("UPDATE members SET active = $2 WHERE id = $1 RETURNING *")
            .bind(id)
            .bind(active)
            .fetch_one(pool)
            .await
            .map_err(Into::into)
    }

    /// All active members, ordered by name for admin listings
    pub async fn find_active(pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM members WHERE active = TRUE ORDER BY given_name, family_name",
        )
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.given_name, self.family_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_struct() {
        let member = Member {
            id: Uuid::new_v4(),
            code: "AB12CD34EF".to_string(),
            given_name: "Ana".to_string(),
            family_name: "Gómez".to_string(),
            phone: Some("+15551234567".to_string()),
            email: None,
            payment_status: PaymentStatus::Paid,
            registered_at: Utc::now(),
            active: true,
        };

        assert_eq!(member.full_name(), "Ana Gómez");
        assert_eq!(member.payment_status.as_str(), "paid");
    }

    #[test]
    fn sanitized_scrubs_every_text_field() {
        let new = NewMember {
            code: " ab12cd34ef ".to_string(),
            given_name: "Juan\tCarlos".to_string(),
            family_name: "Pérez\nGarcía".to_string(),
            phone: Some("123\r456".to_string()),
            email: Some("\u{7}".to_string()),
            payment_status: PaymentStatus::Pending,
        }
        .sanitized();

        assert_eq!(new.code, "ab12cd34ef");
        assert_eq!(new.given_name, "Juan Carlos");
        assert_eq!(new.family_name, "Pérez García");
        assert_eq!(new.phone.as_deref(), Some("123 456"));
        // A field that sanitizes to nothing is treated as absent
        assert_eq!(new.email, None);
    }
}
