//! Coaching session templates.
//!
//! The session payload is a pure template fill; no note content is read.
//! Clients are expected to fetch project context before holding a session
//! (the response's `context_needed` flag signals that workflow).

/// Fixed Socratic question set returned with every session.
pub const SUGGESTED_QUESTIONS: [&str; 5] = [
    "What's the most important outcome you're hoping to achieve with this project?",
    "What assumptions are you making that might be worth questioning?",
    "If you could only work on one aspect of this project, what would have the biggest impact?",
    "What would someone who disagrees with your approach say?",
    "What would this look like if it were twice as simple?",
];

pub const DEFAULT_SESSION_TYPE: &str = "exploration";

/// Opening prompt for a coaching session. `focus_area` narrows the framing
/// when present.
pub fn coaching_prompt(project_name: &str, session_type: &str, focus_area: Option<&str>) -> String {
    let focus = focus_area
        .map(|f| format!(" focusing on {f}"))
        .unwrap_or_default();
    format!(
        "I'd like to start a {session_type} coaching session about your \"{project_name}\" \
         project{focus}. Let me ask you some thoughtful questions to help deepen your thinking."
    )
}
