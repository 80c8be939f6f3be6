use thiserror::Error;

use crate::domains::access::validator::CodeError;
use crate::domains::member::data::MemberData;

/// Why an access attempt was refused or aborted.
///
/// Everything except `Store` is a normal front-desk outcome: the operator
/// reads the message and the member corrects the scan or settles up. `Store`
/// means the attempt aborted with no state change and should be retried once
/// the database is reachable.
#[derive(Debug, Error)]
pub enum AccessError {
    #[error(transparent)]
    Validation(#[from] CodeError),

    #[error("no active member with code {code}")]
    UnknownMember { code: String },

    #[error("{} {} has not paid this month's fee", .member.given_name, .member.family_name)]
    PaymentRequired { member: MemberData },

    #[error("storage unavailable: {0}")]
    Store(#[from] anyhow::Error),
}
