//! Admin actions: register a member, flip payment status, deactivate.

use anyhow::{bail, Context, Result};
use tracing::info;
use uuid::Uuid;

use crate::common::sanitize_text;
use crate::domains::member::models::member::{Member, NewMember, PaymentStatus};
use crate::kernel::BaseMemberStore;

/// Input for member registration. The barcode is generated, not supplied.
#[derive(Debug, Clone)]
pub struct RegisterMember {
    pub given_name: String,
    pub family_name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub payment_status: PaymentStatus,
}

/// Generate a fresh 10-character uppercase alphanumeric barcode.
fn generate_code() -> String {
    Uuid::new_v4().simple().to_string()[..10].to_uppercase()
}

/// Register a new member under a generated barcode.
///
/// Names must survive sanitization non-empty; a generated-code collision
/// surfaces as the store's uniqueness error and the admin simply retries.
pub async fn register_member(
    input: RegisterMember,
    store: &dyn BaseMemberStore,
) -> Result<Member> {
    if sanitize_text(&input.given_name).is_empty() {
        bail!("given name is required");
    }
    if sanitize_text(&input.family_name).is_empty() {
        bail!("family name is required");
    }

    let member = store
        .insert_member(NewMember {
            code: generate_code(),
            given_name: input.given_name,
            family_name: input.family_name,
            phone: input.phone,
            email: input.email,
            payment_status: input.payment_status,
        })
        .await
        .context("failed to register member")?;

    info!(code = %member.code, "registered member {}", member.full_name());
    Ok(member)
}

/// Set a member's payment status by barcode.
pub async fn set_payment_status(
    code: &str,
    status: PaymentStatus,
    store: &dyn BaseMemberStore,
) -> Result<Member> {
    let member = store
        .find_by_code(code)
        .await?
        .with_context(|| format!("no active member with code {code}"))?;
    let updated = store.update_payment_status(member.id, status).await?;
    info!(code = %updated.code, status = %status, "updated payment status");
    Ok(updated)
}

/// Soft-deactivate a member by barcode. The row stays; code lookups stop
/// seeing it.
pub async fn deactivate_member(code: &str, store: &dyn BaseMemberStore) -> Result<Member> {
    let member = store
        .find_by_code(code)
        .await?
        .with_context(|| format!("no active member with code {code}"))?;
    let updated = store.set_active(member.id, false).await?;
    info!(code = %updated.code, "deactivated member");
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_codes_are_ten_uppercase_alphanumerics() {
        for _ in 0..50 {
            let code = generate_code();
            assert_eq!(code.len(), 10);
            assert!(code
                .chars()
                .all(|c| c.is_ascii_alphanumeric() && !c.is_ascii_lowercase()));
        }
    }
}
