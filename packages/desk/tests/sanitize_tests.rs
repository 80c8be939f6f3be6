//! Unit tests for the input sanitizer.

use desk_core::common::{sanitize_opt, sanitize_text};

#[test]
fn strips_control_characters() {
    let dirty = "Juan\tCarlos\nPérez\r\x07García";
    let clean = sanitize_text(dirty);

    assert!(!clean.chars().any(char::is_control));
    assert_eq!(clean, "Juan Carlos Pérez García");
}

#[test]
fn sanitizing_is_idempotent() {
    let inputs = [
        "María José  Rodríguez\r\nLópez",
        "  Ana  ",
        "123\t456\n789",
        "plain text",
        "",
    ];
    for input in inputs {
        let once = sanitize_text(input);
        assert_eq!(sanitize_text(&once), once, "not idempotent for {input:?}");
    }
}

#[test]
fn collapses_whitespace_runs() {
    assert_eq!(sanitize_text("987   654   321"), "987 654 321");
    assert_eq!(sanitize_text("  Ana   González  "), "Ana González");
}

#[test]
fn keeps_accented_latin_letters() {
    assert_eq!(sanitize_text("ñÑáéíóúÁÉÍÓÚüÜ"), "ñÑáéíóúÁÉÍÓÚüÜ");
}

#[test]
fn drops_characters_outside_the_allow_list() {
    assert_eq!(sanitize_text("Ana✨ Gómez"), "Ana Gómez");
    assert_eq!(sanitize_text("\u{0}\u{1}\u{2}"), "");
}

#[test]
fn absent_input_yields_empty_string() {
    assert_eq!(sanitize_opt(None), "");
}
