use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::{sanitize_opt, sanitize_text};
use crate::domains::member::models::member::{Member, PaymentStatus};

/// Member display data
///
/// Presentation-boundary representation of a member: every text field has
/// passed the sanitizer, so it is safe to print to the terminal, a log line,
/// or a CSV cell.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberData {
    pub code: String,
    pub given_name: String,
    pub family_name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub payment_status: PaymentStatus,
    pub registered_at: DateTime<Utc>,
    pub active: bool,
}

impl MemberData {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.given_name, self.family_name)
    }
}

impl From<Member> for MemberData {
    fn from(member: Member) -> Self {
        let clean_opt = |v: Option<&str>| {
            let s = sanitize_opt(v);
            (!s.is_empty()).then_some(s)
        };
        Self {
            code: sanitize_text(&member.code),
            given_name: sanitize_text(&member.given_name),
            family_name: sanitize_text(&member.family_name),
            phone: clean_opt(member.phone.as_deref()),
            email: clean_opt(member.email.as_deref()),
            payment_status: member.payment_status,
            registered_at: member.registered_at,
            active: member.active,
        }
    }
}
