use crate::agents::RoleKind;

/// Keyword groups checked in precedence order, first match wins
const CODING_KEYWORDS: [&str; 3] = ["implement", "code", "write"];
const TESTING_KEYWORDS: [&str; 4] = ["test", "verify", "execute", "run"];
const REVIEW_KEYWORDS: [&str; 2] = ["review", "check"];

/// Determines the role responsible for a task from its description.
///
/// This is a deterministic string-matching fallback, not a learned decision:
/// coding keywords take precedence over testing keywords, which take
/// precedence over review keywords; anything else defaults to the coder.
pub fn classify_role(description: &str) -> RoleKind {
    let description = description.to_lowercase();

    if CODING_KEYWORDS.iter().any(|kw| description.contains(kw)) {
        RoleKind::Coder
    } else if TESTING_KEYWORDS.iter().any(|kw| description.contains(kw)) {
        RoleKind::Tester
    } else if REVIEW_KEYWORDS.iter().any(|kw| description.contains(kw)) {
        RoleKind::Reviewer
    } else {
        RoleKind::Coder
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn implement_routes_to_coder() {
        assert_eq!(
            classify_role("Implement function `add(a,b)` in file `src/add.py`"),
            RoleKind::Coder
        );
    }

    #[test]
    fn run_routes_to_tester() {
        assert_eq!(classify_role("Run the unit suite"), RoleKind::Tester);
    }

    #[test]
    fn check_routes_to_reviewer() {
        assert_eq!(classify_role("Check the final layout"), RoleKind::Reviewer);
    }

    #[test]
    fn coding_keywords_win_ties() {
        // "write" outranks "test" per the documented precedence
        assert_eq!(
            classify_role("Write tests for the parser"),
            RoleKind::Coder
        );
    }

    #[test]
    fn unmatched_description_defaults_to_coder() {
        assert_eq!(classify_role("Prepare a summary"), RoleKind::Coder);
    }
}
