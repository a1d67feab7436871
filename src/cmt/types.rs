// CMT API response types.
// Defines structs for deserializing CMT OData API responses.

use serde::{Deserialize, Serialize};

/// OData list envelope wrapping every collection response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ODataList<T> {
    #[serde(default = "Vec::new")]
    pub value: Vec<T>,
}

/// Submission entry as returned by the review-model batch query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    #[serde(rename = "Id")]
    pub id: u64,
    #[serde(rename = "Status", default)]
    pub status: Option<String>,
}

/// Paper record persisted to `paper_ids.json`.
///
/// Status distinguishes "Awaiting Decision" from decided papers and drives
/// the report ordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperRecord {
    pub id: u64,
    pub status: Option<String>,
}

impl PaperRecord {
    /// Whether a decision is still pending for this paper.
    pub fn awaiting_decision(&self) -> bool {
        self.status.as_deref() == Some("Awaiting Decision")
    }
}

impl From<Submission> for PaperRecord {
    fn from(s: Submission) -> Self {
        Self {
            id: s.id,
            status: s.status,
        }
    }
}

/// A single review of a submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Review {
    #[serde(default)]
    pub submission_id: u64,
    #[serde(default)]
    pub submission_title: String,
    #[serde(default)]
    pub reviewer_number: u32,
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl Review {
    /// First answer text for the question with the given order, if present.
    pub fn answer_text(&self, order: u32) -> Option<&str> {
        self.questions
            .iter()
            .find(|q| q.order == order)
            .and_then(|q| q.answers.first())
            .map(|a| a.text.as_str())
    }
}

/// Question within a review form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Question {
    #[serde(default)]
    pub order: u32,
    #[serde(default)]
    pub answers: Vec<Answer>,
}

/// Answer to a review question.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Answer {
    #[serde(default)]
    pub text: String,
}

/// Message in a submission's discussion thread.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DiscussionMessage {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub text: String,
}

impl DiscussionMessage {
    /// Display author: first name when set, otherwise the CMT role.
    pub fn author(&self) -> &str {
        self.first_name
            .as_deref()
            .filter(|n| !n.is_empty())
            .or(self.role.as_deref())
            .unwrap_or("Unknown")
    }
}

/// Author feedback entry for a submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AuthorFeedback {
    #[serde(default)]
    pub files: Vec<FeedbackFile>,
}

/// Uploaded file attached to author feedback.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FeedbackFile {
    #[serde(default)]
    pub download_link: String,
}

/// The four per-paper resource kinds fetched from CMT.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Reviews,
    MetaReviews,
    DiscussionMessages,
    AuthorFeedback,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 4] = [
        ResourceKind::Reviews,
        ResourceKind::MetaReviews,
        ResourceKind::DiscussionMessages,
        ResourceKind::AuthorFeedback,
    ];

    /// Cache file name for this resource kind.
    pub fn file_name(&self) -> &'static str {
        match self {
            ResourceKind::Reviews => "Reviews.json",
            ResourceKind::MetaReviews => "MetaReviews.json",
            ResourceKind::DiscussionMessages => "DiscussionMessages.json",
            ResourceKind::AuthorFeedback => "AuthorFeedback.json",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ResourceKind::Reviews => "Reviews",
            ResourceKind::MetaReviews => "MetaReviews",
            ResourceKind::DiscussionMessages => "DiscussionMessages",
            ResourceKind::AuthorFeedback => "AuthorFeedback",
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_review_answer_text_by_order() {
        let review: Review = serde_json::from_str(
            r#"{
                "SubmissionId": 42,
                "SubmissionTitle": "A Paper",
                "ReviewerNumber": 2,
                "Questions": [
                    {"Order": 1, "Answers": [{"Text": "Summary text."}]},
                    {"Order": 7, "Answers": [{"Text": "Weak Accept. Nice idea."}]}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(review.answer_text(7), Some("Weak Accept. Nice idea."));
        assert_eq!(review.answer_text(1), Some("Summary text."));
        assert_eq!(review.answer_text(3), None);
    }

    #[test]
    fn test_review_tolerates_missing_fields() {
        let review: Review = serde_json::from_str("{}").unwrap();
        assert_eq!(review.reviewer_number, 0);
        assert!(review.questions.is_empty());
        assert_eq!(review.answer_text(1), None);
    }

    #[test]
    fn test_message_author_fallback() {
        let named = DiscussionMessage {
            first_name: Some("Ada".to_string()),
            role: Some("Reviewer".to_string()),
            date: String::new(),
            text: String::new(),
        };
        assert_eq!(named.author(), "Ada");

        let empty_name = DiscussionMessage {
            first_name: Some(String::new()),
            role: Some("Meta-Reviewer".to_string()),
            date: String::new(),
            text: String::new(),
        };
        assert_eq!(empty_name.author(), "Meta-Reviewer");

        let anonymous = DiscussionMessage {
            first_name: None,
            role: None,
            date: String::new(),
            text: String::new(),
        };
        assert_eq!(anonymous.author(), "Unknown");
    }

    #[test]
    fn test_awaiting_decision() {
        let pending = PaperRecord {
            id: 1,
            status: Some("Awaiting Decision".to_string()),
        };
        let decided = PaperRecord {
            id: 2,
            status: Some("Accept".to_string()),
        };
        let unknown = PaperRecord { id: 3, status: None };

        assert!(pending.awaiting_decision());
        assert!(!decided.awaiting_decision());
        assert!(!unknown.awaiting_decision());
    }

    #[test]
    fn test_feedback_files_default_empty() {
        let feedback: AuthorFeedback = serde_json::from_str("{}").unwrap();
        assert!(feedback.files.is_empty());

        let with_file: AuthorFeedback = serde_json::from_str(
            r#"{"Files": [{"DownloadLink": "/api/files/123"}]}"#,
        )
        .unwrap();
        assert_eq!(with_file.files[0].download_link, "/api/files/123");
    }
}
