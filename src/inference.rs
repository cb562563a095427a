//! Tri-state inference for loosely worded on/off signals.
//!
//! Host tools report adapter state inconsistently: `acpi -a` prints
//! `on-line`/`off-line`, other tools print a bare `on`/`off`. Rules are tried
//! in order and the first match decides; compound `line` forms outrank bare
//! words.

use crate::types::TriState;
use regex::Regex;
use std::sync::OnceLock;

struct Patterns {
    online: Regex,
    offline: Regex,
    on: Regex,
    off: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        online: Regex::new(r"\bon[\s-]?line\b").expect("static pattern"),
        offline: Regex::new(r"\boff[\s-]?line\b").expect("static pattern"),
        on: Regex::new(r"\bon\b").expect("static pattern"),
        off: Regex::new(r"\boff\b").expect("static pattern"),
    })
}

/// Infer a boolean-or-unknown verdict from free text. Never fails.
///
/// Text mentioning both bare `on` and `off` without a `line` suffix is
/// ambiguous and yields [`TriState::Unknown`].
pub fn infer_boolean(text: &str) -> TriState {
    let lowered = text.to_lowercase();
    let p = patterns();
    if p.online.is_match(&lowered) {
        return TriState::True;
    }
    if p.offline.is_match(&lowered) {
        return TriState::False;
    }
    let has_on = p.on.is_match(&lowered);
    let has_off = p.off.is_match(&lowered);
    match (has_on, has_off) {
        (true, false) => TriState::True,
        (false, true) => TriState::False,
        _ => TriState::Unknown,
    }
}
