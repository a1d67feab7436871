// Question display rules.
// A declarative table decides, per question order, whether an answer is
// rendered, suppressed, or truncated.

/// Suppression condition for a question's answer.
#[derive(Debug, Clone, Copy)]
pub enum Suppress {
    /// Never rendered; the answer is surfaced in the summary line instead.
    Always,
    /// Suppressed when the answer contains any of these substrings.
    IfContains(&'static [&'static str]),
}

/// Display rule for one question order.
#[derive(Debug, Clone, Copy)]
pub struct DisplayRule {
    pub order: u32,
    pub suppress: Option<Suppress>,
    pub truncate_to: Option<usize>,
}

/// Orders 7, 9, 10 feed the reviewer summary line; 12 is internal-only.
/// Order 6 is the "comments for authors" flag, order 5 the evidence rating.
pub const DISPLAY_RULES: &[DisplayRule] = &[
    DisplayRule {
        order: 1,
        suppress: None,
        truncate_to: Some(100),
    },
    DisplayRule {
        order: 5,
        suppress: Some(Suppress::IfContains(&["CREDIBLE", "CONVINCING"])),
        truncate_to: None,
    },
    DisplayRule {
        order: 6,
        suppress: Some(Suppress::IfContains(&["No"])),
        truncate_to: None,
    },
    DisplayRule {
        order: 7,
        suppress: Some(Suppress::Always),
        truncate_to: None,
    },
    DisplayRule {
        order: 9,
        suppress: Some(Suppress::Always),
        truncate_to: None,
    },
    DisplayRule {
        order: 10,
        suppress: Some(Suppress::Always),
        truncate_to: None,
    },
    DisplayRule {
        order: 12,
        suppress: Some(Suppress::Always),
        truncate_to: None,
    },
];

fn rule_for(order: u32) -> Option<&'static DisplayRule> {
    DISPLAY_RULES.iter().find(|rule| rule.order == order)
}

/// Apply the display rules to one answer.
///
/// Returns `None` when the answer is suppressed, otherwise the (possibly
/// truncated) text to render.
pub fn display_answer(order: u32, text: &str) -> Option<String> {
    let Some(rule) = rule_for(order) else {
        return Some(text.to_string());
    };

    match rule.suppress {
        Some(Suppress::Always) => return None,
        Some(Suppress::IfContains(needles)) => {
            if needles.iter().any(|needle| text.contains(needle)) {
                return None;
            }
        }
        None => {}
    }

    match rule.truncate_to {
        Some(limit) => Some(truncate_answer(text, limit)),
        None => Some(text.to_string()),
    }
}

/// Truncate to `limit` characters with an ellipsis.
///
/// Answers up to `limit + 3` characters are kept whole so the ellipsis never
/// replaces fewer characters than it adds.
fn truncate_answer(text: &str, limit: usize) -> String {
    if text.chars().count() > limit + 3 {
        let truncated: String = text.chars().take(limit).collect();
        format!("{}...", truncated)
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unlisted_order_passes_through() {
        assert_eq!(display_answer(2, "anything"), Some("anything".to_string()));
        assert_eq!(display_answer(11, "text"), Some("text".to_string()));
    }

    #[test]
    fn test_always_suppressed_orders() {
        for order in [7, 9, 10, 12] {
            assert_eq!(display_answer(order, "any text"), None);
        }
    }

    #[test]
    fn test_order_six_suppressed_on_no() {
        assert_eq!(display_answer(6, "No further comments"), None);
        assert_eq!(
            display_answer(6, "Yes, see below"),
            Some("Yes, see below".to_string())
        );
    }

    #[test]
    fn test_order_five_suppressed_on_evidence_keywords() {
        assert_eq!(display_answer(5, "Results are CREDIBLE overall"), None);
        assert_eq!(display_answer(5, "CONVINCING evaluation"), None);
        assert_eq!(
            display_answer(5, "Evidence is weak"),
            Some("Evidence is weak".to_string())
        );
    }

    #[test]
    fn test_order_one_truncation_boundary() {
        let exactly_103: String = "a".repeat(103);
        assert_eq!(display_answer(1, &exactly_103), Some(exactly_103.clone()));

        let over: String = "b".repeat(104);
        let displayed = display_answer(1, &over).unwrap();
        assert_eq!(displayed.chars().count(), 103);
        assert!(displayed.ends_with("..."));
        assert!(displayed.starts_with(&"b".repeat(100)));
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        let text: String = "é".repeat(120);
        let displayed = display_answer(1, &text).unwrap();
        assert_eq!(displayed.chars().count(), 103);
    }
}
