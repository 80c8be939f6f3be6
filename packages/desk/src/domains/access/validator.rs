//! Barcode validation for scanned or hand-typed input.

use thiserror::Error;

/// Valid barcodes are exactly this many characters.
pub const CODE_LEN: usize = 10;

/// Hand-typed input longer than this is rejected before the shape check, so
/// a scanner dumping a whole label into the field gets a clear message.
pub const MAX_INPUT_LEN: usize = 20;

/// Why a scanned or typed code was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodeError {
    #[error("no code was entered")]
    Missing,

    #[error("code is too long (max {MAX_INPUT_LEN} characters)")]
    TooLong,

    #[error("code must be exactly {CODE_LEN} alphanumeric characters")]
    Malformed,
}

/// Validate a raw scan: trim, check shape, normalize to uppercase.
///
/// Pure - no store access, no side effects.
pub fn validate_code(raw: &str) -> Result<String, CodeError> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Err(CodeError::Missing);
    }
    if trimmed.len() > MAX_INPUT_LEN {
        return Err(CodeError::TooLong);
    }
    if trimmed.len() != CODE_LEN || !trimmed.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(CodeError::Malformed);
    }

    Ok(trimmed.to_uppercase())
}
