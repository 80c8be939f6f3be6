//! Dependency container and the Postgres-backed store adapter.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domains::access::models::access_event::{AccessEvent, AccessLogEntry, Direction};
use crate::domains::member::models::member::{Member, NewMember, PaymentStatus};
use crate::domains::settings::models::setting::Setting;
use crate::kernel::traits::{BaseMemberStore, BaseNotifier};

// =============================================================================
// PgMemberStore (implements BaseMemberStore over a connection pool)
// =============================================================================

/// Postgres-backed store delegating to the sqlx model methods.
#[derive(Clone)]
pub struct PgMemberStore {
    pool: PgPool,
}

impl PgMemberStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BaseMemberStore for PgMemberStore {
    async fn find_by_code(&self, code: &str) -> Result<Option<Member>> {
        Member::find_by_code(code, &self.pool).await
    }

    async fn insert_member(&self, new: NewMember) -> Result<Member> {
        Member::insert(new, &self.pool).await
    }

    async fn update_payment_status(&self, id: Uuid, status: PaymentStatus) -> Result<Member> {
        Member::update_payment_status(id, status, &self.pool).await
    }

    async fn set_active(&self, id: Uuid, active: bool) -> Result<Member> {
        Member::set_active(id, active, &self.pool).await
    }

    async fn list_members(&self) -> Result<Vec<Member>> {
        Member::find_active(&self.pool).await
    }

    async fn append_event(&self, member_id: Uuid, direction: Direction) -> Result<AccessEvent> {
        AccessEvent::insert(member_id, direction, &self.pool).await
    }

    async fn events_for_date(&self, date: NaiveDate) -> Result<Vec<AccessLogEntry>> {
        AccessEvent::find_for_date(date, &self.pool).await
    }

    async fn last_direction_today(&self, member_id: Uuid) -> Result<Option<Direction>> {
        AccessEvent::last_direction_today(member_id, &self.pool).await
    }

    async fn event_count_for_member(&self, member_id: Uuid) -> Result<i64> {
        AccessEvent::count_for_member(member_id, &self.pool).await
    }

    async fn get_setting(&self, key: &str) -> Result<Option<String>> {
        Setting::get(key, &self.pool).await
    }
}

// =============================================================================
// DeskDeps
// =============================================================================

/// Dependencies handed to the gate and the admin actions.
#[derive(Clone)]
pub struct DeskDeps {
    pub store: Arc<dyn BaseMemberStore>,
    pub notifier: Arc<dyn BaseNotifier>,
}

impl DeskDeps {
    pub fn new(store: Arc<dyn BaseMemberStore>, notifier: Arc<dyn BaseNotifier>) -> Self {
        Self { store, notifier }
    }
}
