// Test dependencies - in-memory implementations for tests
//
// MemoryMemberStore mirrors the Postgres store's contract (sanitize on write,
// unique codes, append-only events) without a database.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::{bail, Result};
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::domains::access::models::access_event::{AccessEvent, AccessLogEntry, Direction};
use crate::domains::member::models::member::{Member, NewMember, PaymentStatus};
use crate::kernel::traits::{BaseMemberStore, BaseNotifier};

// =============================================================================
// In-memory Member Store
// =============================================================================

#[derive(Default)]
pub struct MemoryMemberStore {
    members: Mutex<Vec<Member>>,
    events: Mutex<Vec<AccessEvent>>,
    settings: Mutex<HashMap<String, String>>,
}

impl MemoryMemberStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a member (builder style for test setup).
    pub fn with_member(self, new: NewMember) -> Self {
        self.add_member(new);
        self
    }

    /// Seed a setting.
    pub fn with_setting(self, key: &str, value: &str) -> Self {
        self.settings
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        self
    }

    /// Insert a member synchronously, returning the stored row.
    pub fn add_member(&self, new: NewMember) -> Member {
        let new = new.sanitized();
        let member = Member {
            id: Uuid::new_v4(),
            code: new.code,
            given_name: new.given_name,
            family_name: new.family_name,
            phone: new.phone,
            email: new.email,
            payment_status: new.payment_status,
            registered_at: Utc::now(),
            active: true,
        };
        self.members.lock().unwrap().push(member.clone());
        member
    }

    /// All events recorded so far, in append order.
    pub fn events(&self) -> Vec<AccessEvent> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl BaseMemberStore for MemoryMemberStore {
    async fn find_by_code(&self, code: &str) -> Result<Option<Member>> {
        Ok(self
            .members
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.code == code && m.active)
            .cloned())
    }

    async fn insert_member(&self, new: NewMember) -> Result<Member> {
        let new = new.sanitized();
        if self
            .members
            .lock()
            .unwrap()
            .iter()
            .any(|m| m.code == new.code)
        {
            bail!("duplicate member code {}", new.code);
        }
        Ok(self.add_member(new))
    }

    async fn update_payment_status(&self, id: Uuid, status: PaymentStatus) -> Result<Member> {
        let mut members = self.members.lock().unwrap();
        let member = members
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| anyhow::anyhow!("no member with id {id}"))?;
        member.payment_status = status;
        Ok(member.clone())
    }

    async fn set_active(&self, id: Uuid, active: bool) -> Result<Member> {
        let mut members = self.members.lock().unwrap();
        let member = members
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| anyhow::anyhow!("no member with id {id}"))?;
        member.active = active;
        Ok(member.clone())
    }

    async fn list_members(&self) -> Result<Vec<Member>> {
        let mut members: Vec<Member> = self
            .members
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.active)
            .cloned()
            .collect();
        members.sort_by(|a, b| {
            (a.given_name.as_str(), a.family_name.as_str())
                .cmp(&(b.given_name.as_str(), b.family_name.as_str()))
        });
        Ok(members)
    }

    async fn append_event(&self, member_id: Uuid, direction: Direction) -> Result<AccessEvent> {
        let event = AccessEvent {
            id: Uuid::new_v4(),
            member_id,
            direction,
            occurred_at: Utc::now(),
        };
        self.events.lock().unwrap().push(event.clone());
        Ok(event)
    }

    async fn events_for_date(&self, date: NaiveDate) -> Result<Vec<AccessLogEntry>> {
        let members = self.members.lock().unwrap();
        let mut entries: Vec<AccessLogEntry> = self
            .events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.occurred_at.date_naive() == date)
            .filter_map(|e| {
                members.iter().find(|m| m.id == e.member_id).map(|m| AccessLogEntry {
                    given_name: m.given_name.clone(),
                    family_name: m.family_name.clone(),
                    direction: e.direction,
                    occurred_at: e.occurred_at,
                })
            })
            .collect();
        // newest first, matching the SQL ordering
        entries.reverse();
        Ok(entries)
    }

    async fn last_direction_today(&self, member_id: Uuid) -> Result<Option<Direction>> {
        let today = Utc::now().date_naive();
        Ok(self
            .events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.member_id == member_id && e.occurred_at.date_naive() == today)
            .last()
            .map(|e| e.direction))
    }

    async fn event_count_for_member(&self, member_id: Uuid) -> Result<i64> {
        Ok(self
            .events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.member_id == member_id)
            .count() as i64)
    }

    async fn get_setting(&self, key: &str) -> Result<Option<String>> {
        Ok(self.settings.lock().unwrap().get(key).cloned())
    }
}

// =============================================================================
// Outage Member Store (failure injection)
// =============================================================================

/// Store wrapper whose event appends can be switched to fail, for exercising
/// a storage outage in the middle of a scan.
pub struct OutageMemberStore {
    inner: MemoryMemberStore,
    fail_appends: AtomicBool,
}

impl OutageMemberStore {
    pub fn new(inner: MemoryMemberStore) -> Self {
        Self {
            inner,
            fail_appends: AtomicBool::new(false),
        }
    }

    /// Make subsequent `append_event` calls fail (or succeed again).
    pub fn set_append_failure(&self, fail: bool) {
        self.fail_appends.store(fail, Ordering::SeqCst);
    }

    /// All events recorded so far, in append order.
    pub fn events(&self) -> Vec<AccessEvent> {
        self.inner.events()
    }
}

#[async_trait]
impl BaseMemberStore for OutageMemberStore {
    async fn find_by_code(&self, code: &str) -> Result<Option<Member>> {
        self.inner.find_by_code(code).await
    }

    async fn insert_member(&self, new: NewMember) -> Result<Member> {
        self.inner.insert_member(new).await
    }

    async fn update_payment_status(&self, id: Uuid, status: PaymentStatus) -> Result<Member> {
        self.inner.update_payment_status(id, status).await
    }

    async fn set_active(&self, id: Uuid, active: bool) -> Result<Member> {
        self.inner.set_active(id, active).await
    }

    async fn list_members(&self) -> Result<Vec<Member>> {
        self.inner.list_members().await
    }

    async fn append_event(&self, member_id: Uuid, direction: Direction) -> Result<AccessEvent> {
        if self.fail_appends.load(Ordering::SeqCst) {
            bail!("connection to database lost");
        }
        self.inner.append_event(member_id, direction).await
    }

    async fn events_for_date(&self, date: NaiveDate) -> Result<Vec<AccessLogEntry>> {
        self.inner.events_for_date(date).await
    }

    async fn last_direction_today(&self, member_id: Uuid) -> Result<Option<Direction>> {
        self.inner.last_direction_today(member_id).await
    }

    async fn event_count_for_member(&self, member_id: Uuid) -> Result<i64> {
        self.inner.event_count_for_member(member_id).await
    }

    async fn get_setting(&self, key: &str) -> Result<Option<String>> {
        self.inner.get_setting(key).await
    }
}

// =============================================================================
// Spy Notifier
// =============================================================================

/// Arguments captured from a notify call
#[derive(Debug, Clone)]
pub struct UnpaidAttemptCall {
    pub given_name: String,
    pub family_name: String,
    pub phone: Option<String>,
}

#[derive(Default)]
pub struct SpyNotifier {
    calls: Arc<Mutex<Vec<UnpaidAttemptCall>>>,
}

impl SpyNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<UnpaidAttemptCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl BaseNotifier for SpyNotifier {
    async fn notify_unpaid_attempt(
        &self,
        given_name: &str,
        family_name: &str,
        phone: Option<&str>,
    ) -> Result<()> {
        self.calls.lock().unwrap().push(UnpaidAttemptCall {
            given_name: given_name.to_string(),
            family_name: family_name.to_string(),
            phone: phone.map(str::to_string),
        });
        Ok(())
    }
}

/// Notifier whose delivery always fails, for checking that the gate treats
/// notification as fire-and-forget.
#[derive(Default)]
pub struct FailingNotifier;

#[async_trait]
impl BaseNotifier for FailingNotifier {
    async fn notify_unpaid_attempt(&self, _: &str, _: &str, _: Option<&str>) -> Result<()> {
        bail!("sms gateway unreachable")
    }
}
