// Recommendation score mapping.
// Converts CMT recommendation labels into numeric scores for the report.

use crate::cmt::Review;

/// Question order carrying the overall recommendation.
pub const RECOMMENDATION_ORDER: u32 = 7;

/// Label to score mapping for the seven recommendation levels.
const RECOMMENDATION_SCORES: &[(&str, u8)] = &[
    ("Clear Reject", 2),
    ("Weak Reject", 3),
    ("Borderline Reject", 4),
    ("Borderline Accept", 5),
    ("Weak Accept", 6),
    ("Clear Accept", 7),
    ("Strong Accept", 8),
];

/// Numeric score for a recommendation label, `None` for unknown labels.
pub fn recommendation_score(label: &str) -> Option<u8> {
    RECOMMENDATION_SCORES
        .iter()
        .find(|(name, _)| *name == label)
        .map(|(_, score)| *score)
}

/// First sentence of an answer, used as the recommendation label.
pub fn first_sentence(text: &str) -> &str {
    text.split('.').next().unwrap_or("").trim()
}

/// Score for one review, `None` when the recommendation question is missing
/// or its label is unrecognized.
pub fn review_score(review: &Review) -> Option<u8> {
    let answer = review.answer_text(RECOMMENDATION_ORDER)?;
    recommendation_score(first_sentence(answer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmt::{Answer, Question};

    fn review_with_recommendation(text: &str) -> Review {
        Review {
            submission_id: 1,
            submission_title: "T".to_string(),
            reviewer_number: 1,
            questions: vec![Question {
                order: RECOMMENDATION_ORDER,
                answers: vec![Answer {
                    text: text.to_string(),
                }],
            }],
        }
    }

    #[test]
    fn test_all_seven_labels() {
        assert_eq!(recommendation_score("Clear Reject"), Some(2));
        assert_eq!(recommendation_score("Weak Reject"), Some(3));
        assert_eq!(recommendation_score("Borderline Reject"), Some(4));
        assert_eq!(recommendation_score("Borderline Accept"), Some(5));
        assert_eq!(recommendation_score("Weak Accept"), Some(6));
        assert_eq!(recommendation_score("Clear Accept"), Some(7));
        assert_eq!(recommendation_score("Strong Accept"), Some(8));
    }

    #[test]
    fn test_unknown_label_is_none() {
        assert_eq!(recommendation_score("Definitely Maybe"), None);
        assert_eq!(recommendation_score(""), None);
    }

    #[test]
    fn test_first_sentence() {
        assert_eq!(first_sentence("Weak Accept. Solid paper."), "Weak Accept");
        assert_eq!(first_sentence("No period"), "No period");
        assert_eq!(first_sentence(""), "");
    }

    #[test]
    fn test_review_score() {
        let review = review_with_recommendation("Strong Accept. Great results.");
        assert_eq!(review_score(&review), Some(8));
    }

    #[test]
    fn test_review_score_missing_question() {
        let review = Review {
            submission_id: 1,
            submission_title: "T".to_string(),
            reviewer_number: 1,
            questions: vec![],
        };
        assert_eq!(review_score(&review), None);
    }

    #[test]
    fn test_review_score_unknown_label() {
        let review = review_with_recommendation("Undecided. Hmm.");
        assert_eq!(review_score(&review), None);
    }
}
