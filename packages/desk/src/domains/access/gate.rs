//! The gate: decide whether a scan is admitted and record entry/exit.

use std::collections::HashSet;

use tokio::sync::Mutex;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::DirectionSource;
use crate::domains::access::errors::AccessError;
use crate::domains::access::models::access_event::Direction;
use crate::domains::access::validator::validate_code;
use crate::domains::member::data::MemberData;
use crate::domains::member::models::member::PaymentStatus;
use crate::kernel::DeskDeps;

/// Outcome of an admitted scan, ready for display.
#[derive(Debug, Clone)]
pub struct AccessGranted {
    pub member: MemberData,
    pub direction: Direction,
}

/// Access gate with an explicit store/notifier handle - no ambient globals.
///
/// Direction handling depends on the configured [`DirectionSource`]:
/// `Volatile` keeps a process-lifetime set of members currently inside (all
/// members read as outside after a restart), `Derived` asks the store for the
/// member's most recent event today and needs no local state.
pub struct AccessGate {
    deps: DeskDeps,
    source: DirectionSource,
    /// Members currently inside (volatile mode). The mutex also serializes
    /// the decide-then-append critical section for both modes, so concurrent
    /// scan stations cannot interleave a member's read and write.
    inside: Mutex<HashSet<Uuid>>,
}

impl AccessGate {
    pub fn new(deps: DeskDeps, source: DirectionSource) -> Self {
        Self {
            deps,
            source,
            inside: Mutex::new(HashSet::new()),
        }
    }

    /// Process one scan: validate, look up, gate on payment, toggle
    /// direction, append the event.
    ///
    /// Refusals are ordinary outcomes (see [`AccessError`]); only
    /// `AccessError::Store` means the attempt aborted mid-flight, and in that
    /// case nothing was persisted and the volatile state is untouched.
    pub async fn process(&self, raw: &str) -> Result<AccessGranted, AccessError> {
        let code = validate_code(raw)?;

        let member = self
            .deps
            .store
            .find_by_code(&code)
            .await?
            .ok_or(AccessError::UnknownMember { code })?;

        if member.payment_status != PaymentStatus::Paid {
            let member = MemberData::from(member);
            warn!(code = %member.code, "denied unpaid access attempt by {}", member.full_name());
            if let Err(e) = self
                .deps
                .notifier
                .notify_unpaid_attempt(
                    &member.given_name,
                    &member.family_name,
                    member.phone.as_deref(),
                )
                .await
            {
                // fire-and-forget: delivery failure never changes the answer
                warn!("unpaid-attempt notification failed: {e:#}");
            }
            return Err(AccessError::PaymentRequired { member });
        }

        let mut inside = self.inside.lock().await;
        let direction = match self.source {
            DirectionSource::Volatile => {
                if inside.contains(&member.id) {
                    Direction::Exit
                } else {
                    Direction::Entry
                }
            }
            DirectionSource::Derived => {
                match self.deps.store.last_direction_today(member.id).await? {
                    Some(Direction::Entry) => Direction::Exit,
                    Some(Direction::Exit) | None => Direction::Entry,
                }
            }
        };

        self.deps.store.append_event(member.id, direction).await?;

        // Flip only after the event persisted, so an append failure leaves no
        // partial state change.
        if self.source == DirectionSource::Volatile {
            match direction {
                Direction::Entry => {
                    inside.insert(member.id);
                }
                Direction::Exit => {
                    inside.remove(&member.id);
                }
            }
        }
        drop(inside);

        let member = MemberData::from(member);
        info!(
            code = %member.code,
            direction = %direction,
            "access recorded for {}",
            member.full_name()
        );
        Ok(AccessGranted { member, direction })
    }
}
