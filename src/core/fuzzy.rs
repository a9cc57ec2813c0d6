use std::collections::HashSet;

/// Default overlap ratio required by [`fuzzy_match`]
pub const DEFAULT_FUZZY_THRESHOLD: f64 = 0.8;

/// Loose string similarity used by duplicate detection
///
/// Both strings are case-folded and trimmed. Empty strings never match.
/// A string contained in the other matches; otherwise the number of distinct
/// characters shared by both, divided by the larger distinct-character count,
/// must reach `threshold`.
///
/// This is a character-set overlap, not an edit distance: it ignores order,
/// so unrelated words built from similar letters ("listen", "silent") match.
/// Duplicate detection outcomes depend on this exact behavior.
pub fn fuzzy_match(s1: &str, s2: &str, threshold: f64) -> bool {
    let a = s1.trim().to_lowercase();
    let b = s2.trim().to_lowercase();

    if a.is_empty() || b.is_empty() {
        return false;
    }

    if a.contains(b.as_str()) || b.contains(a.as_str()) {
        return true;
    }

    char_overlap_ratio(&a, &b) >= threshold
}

/// Shared distinct characters over the larger distinct-character count
#[inline]
fn char_overlap_ratio(a: &str, b: &str) -> f64 {
    let set_a: HashSet<char> = a.chars().collect();
    let set_b: HashSet<char> = b.chars().collect();

    let larger = set_a.len().max(set_b.len());
    if larger == 0 {
        return 0.0;
    }

    set_a.intersection(&set_b).count() as f64 / larger as f64
}
