use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

// Anything that is not a letter, a number, `_`, whitespace or light punctuation.
// Combining marks of every block fall in here.
static DISALLOWED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\p{L}\p{N}_\s.,!?-]").unwrap());
static COMBINING_MARKS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\x{0300}-\x{036f}]").unwrap());

/// Canonical form used to compare rating descriptions with category labels.
///
/// Lowercases, decomposes accented letters (NFD) and drops both the
/// decomposed accents and any symbol other than `. , ! ? -`, so
/// `"  DÉSTÂCADO ★"` and `"destacado"` compare equal.
///
/// Applying it twice gives the same result as applying it once.
pub fn normalize(text: &str) -> String {
    let lowered = text.trim().to_lowercase();
    let decomposed: String = lowered.nfd().collect();
    let cleaned = DISALLOWED.replace_all(&decomposed, "");
    let stripped = COMBINING_MARKS.replace_all(&cleaned, "");
    // Removing a leading symbol can expose whitespace.
    stripped.trim().to_string()
}
