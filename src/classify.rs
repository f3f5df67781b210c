//! Keyword-based project detection.

/// Label and keyword substrings, checked in declaration order. The first
/// label with any hit wins; match count and position don't matter.
const PROJECT_KEYWORDS: &[(&str, &[&str])] = &[
    ("fitness", &["workout", "exercise", "gym", "running", "training", "health"]),
    ("work", &["meeting", "project", "deadline", "client", "team", "business"]),
    ("personal", &["family", "friend", "home", "weekend", "vacation"]),
    ("learning", &["study", "learn", "course", "book", "research", "education"]),
    ("creative", &["design", "art", "music", "writing", "creative", "idea"]),
    ("finance", &["money", "budget", "investment", "savings", "expense"]),
];

pub const FALLBACK_PROJECT: &str = "general";

/// Map free text to a project label by substring match on the lowercased
/// content. Always returns a label; unmatched text gets "general".
pub fn detect_project(content: &str) -> &'static str {
    let lower = content.to_lowercase();
    for (label, keywords) in PROJECT_KEYWORDS {
        if keywords.iter().any(|k| lower.contains(k)) {
            return label;
        }
    }
    FALLBACK_PROJECT
}
