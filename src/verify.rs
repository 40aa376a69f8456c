//! Rules a finished password must satisfy before it is handed out.

/// A check run against a whole candidate password. Returning `false` rejects the candidate and
/// generation is retried.
///
/// Verifiers should be deterministic for a given input. They run in the order they were added,
/// and the first rejection skips the rest, so a verifier may not be called at all for some
/// candidates.
pub type Verifier = Box<dyn Fn(&str) -> bool + Send + Sync>;

/// Returns `false` if any two consecutive characters are the same.
pub fn no_adjacent_repeats(password: &str) -> bool {
    let mut chars = password.chars();
    let mut prev = match chars.next() {
        Some(ch) => ch,
        None => return true,
    };
    for ch in chars {
        if ch == prev {
            return false;
        }
        prev = ch;
    }
    true
}

/// Builds a verifier that rejects any password containing `needle`.
pub fn excluding(needle: &str) -> impl Fn(&str) -> bool + Send + Sync + 'static {
    let needle = needle.to_owned();
    move |password: &str| !password.contains(needle.as_str())
}
