//! Input scrubbing applied wherever text crosses into storage or onto a
//! display surface.
//!
//! Scanned barcodes and pasted member details routinely carry control
//! characters (scanner suffixes, clipboard newlines) that corrupt terminal
//! output and log lines. Everything outside printable ASCII plus the accented
//! Latin letters used in member names is dropped; control characters become
//! spaces first so words stay separated.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref DISALLOWED: Regex =
        Regex::new(r"[^\x20-\x7EñÑáéíóúÁÉÍÓÚüÜ]").expect("sanitize pattern is valid");
}

/// Scrub `text` down to the printable allow-list and collapse whitespace.
///
/// Total and idempotent: `sanitize_text(&sanitize_text(s)) == sanitize_text(s)`.
pub fn sanitize_text(text: &str) -> String {
    let spaced = text.replace(['\n', '\r', '\t'], " ");
    let kept = DISALLOWED.replace_all(&spaced, "");
    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Like [`sanitize_text`], with absent input yielding an empty string.
pub fn sanitize_opt(text: Option<&str>) -> String {
    text.map(sanitize_text).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_characters_become_separators() {
        assert_eq!(sanitize_text("Juan\tCarlos"), "Juan Carlos");
        assert_eq!(sanitize_text("Pérez\nGarcía"), "Pérez García");
        assert_eq!(sanitize_text("123\r456\n789"), "123 456 789");
    }

    #[test]
    fn accented_names_survive() {
        assert_eq!(sanitize_text("María José Gómez"), "María José Gómez");
    }

    #[test]
    fn absent_input_is_empty() {
        assert_eq!(sanitize_opt(None), "");
        assert_eq!(sanitize_opt(Some("  ana@test.com  ")), "ana@test.com");
    }
}
