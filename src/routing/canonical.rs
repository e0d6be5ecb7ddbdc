//! Path canonicalization.
//!
//! # Responsibilities
//! - Normalize a raw route segment so it can be concatenated with its parent
//! - Apply the root-slash rule when joining a segment onto a parent path
//!
//! # Design Decisions
//! - Canonical segments always start with `/` and never end with one
//! - Empty input contributes nothing
//! - Input made only of separators is the root, `/`
//! - Pattern characters (`*`, `:id`) are kept verbatim; nothing is expanded

/// The root path.
pub const ROOT_PATH: &str = "/";

/// Separator between path segments.
const SEPARATOR: char = '/';

/// Canonicalize a raw path segment.
///
/// ```text
/// ""        → ""
/// "/"       → "/"
/// "a"       → "/a"
/// "/a/"     → "/a"
/// "a//b/"   → "/a/b"
/// "*"       → "/*"
/// ```
pub fn canonicalize(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let mut canonical = String::with_capacity(trimmed.len() + 1);
    for segment in trimmed.split(SEPARATOR).filter(|s| !s.is_empty()) {
        canonical.push(SEPARATOR);
        canonical.push_str(segment);
    }

    if canonical.is_empty() {
        // Only separators
        return ROOT_PATH.to_string();
    }
    canonical
}

/// Join a canonical parent path with a raw child segment.
///
/// A parent of `/` counts as empty so the result never starts with `//`.
/// A missing segment contributes nothing, so a group under `/` lands on `""`.
/// A segment of `/` is the root at top level and an index of any other parent.
pub fn join(parent: &str, segment: Option<&str>) -> String {
    let own = segment.map(canonicalize).unwrap_or_default();
    let parent_part = if parent == ROOT_PATH { "" } else { parent };

    if own == ROOT_PATH {
        if parent_part.is_empty() {
            return ROOT_PATH.to_string();
        }
        return parent_part.to_string();
    }
    format!("{}{}", parent_part, own)
}
