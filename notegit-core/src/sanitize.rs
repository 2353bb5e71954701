//! Note/notebook title → safe filesystem path segment.
//!
//! The mapping is total and never produces a path separator:
//! accented characters are NFD-decomposed and their combining marks dropped,
//! emoji/pictograph ranges are removed outright, every other character
//! outside `[A-Za-z0-9_-]` becomes a space, runs of spaces collapse to one,
//! and leading/trailing spaces are trimmed.
//!
//! Distinct titles that differ only in stripped characters can collide
//! (e.g. `"a/b"` and `"a?b"` both map to `"a b"`); colliding notes overwrite
//! each other in the export. Accepted edge case.

use unicode_normalization::UnicodeNormalization;

/// Combining diacritical marks dropped after NFD decomposition.
const COMBINING_MARKS: std::ops::RangeInclusive<u32> = 0x0300..=0x036F;

/// Pictograph/symbol ranges removed without leaving a space behind.
const SYMBOL_RANGES: [std::ops::RangeInclusive<u32>; 5] = [
    0x2011..=0x26FF,   // general punctuation through miscellaneous symbols
    0x2700..=0x27BF,   // dingbats
    0xE000..=0xF8FF,   // private use area
    0x1F000..=0x1FAFF, // emoji and pictograph planes
    0x1FB00..=0x1FBFF, // legacy computing symbols
];

fn is_stripped(ch: char) -> bool {
    let cp = ch as u32;
    COMBINING_MARKS.contains(&cp) || SYMBOL_RANGES.iter().any(|r| r.contains(&cp))
}

/// Map an arbitrary title to a single safe path segment.
///
/// Total: never fails, never emits `/`, `\` or a leading/trailing space.
/// Idempotent: sanitizing an already-sanitized title returns it unchanged.
pub fn sanitize_title(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    let mut pending_space = false;

    for ch in title.nfd() {
        if is_stripped(ch) {
            continue;
        }
        if ch.is_ascii_alphanumeric() || ch == '_' || ch == '-' {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.push(ch);
        } else {
            // Disallowed character: collapses into at most one interior space.
            pending_space = true;
        }
    }

    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
