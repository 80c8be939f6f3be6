// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic. The gate and the
// admin actions are functions over these traits.
//
// Naming convention: Base* for trait names (e.g., BaseMemberStore)

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::domains::access::models::access_event::{AccessEvent, AccessLogEntry, Direction};
use crate::domains::member::models::member::{Member, NewMember, PaymentStatus};

// =============================================================================
// Member Store Trait (durable members + append-only event log + settings)
// =============================================================================

#[async_trait]
pub trait BaseMemberStore: Send + Sync {
    /// Look up an active member by barcode. Inactive members read as absent.
    async fn find_by_code(&self, code: &str) -> Result<Option<Member>>;

    /// Insert a new member. Implementations sanitize text fields on write and
    /// fail on a duplicate code.
    async fn insert_member(&self, new: NewMember) -> Result<Member>;

    /// Update a member's payment status.
    async fn update_payment_status(&self, id: Uuid, status: PaymentStatus) -> Result<Member>;

    /// Flip a member's active flag (soft deactivation).
    async fn set_active(&self, id: Uuid, active: bool) -> Result<Member>;

    /// All active members ordered by name.
    async fn list_members(&self) -> Result<Vec<Member>>;

    /// Append an access event; the store assigns the timestamp.
    async fn append_event(&self, member_id: Uuid, direction: Direction) -> Result<AccessEvent>;

    /// Events on a date with member names, newest first.
    async fn events_for_date(&self, date: NaiveDate) -> Result<Vec<AccessLogEntry>>;

    /// Direction of the member's most recent event today.
    async fn last_direction_today(&self, member_id: Uuid) -> Result<Option<Direction>>;

    /// Total events recorded for a member.
    async fn event_count_for_member(&self, member_id: Uuid) -> Result<i64>;

    /// Read a configuration setting (seeded by the initial migration).
    async fn get_setting(&self, key: &str) -> Result<Option<String>>;
}

// =============================================================================
// Notifier Trait (alert on denied unpaid attempts)
// =============================================================================

#[async_trait]
pub trait BaseNotifier: Send + Sync {
    /// Called exactly once per denied unpaid attempt. Delivery failures must
    /// be swallowed or returned for logging - the gate never propagates them.
    async fn notify_unpaid_attempt(
        &self,
        given_name: &str,
        family_name: &str,
        phone: Option<&str>,
    ) -> Result<()>;
}
