// HTML report renderer.
// Reads the cached paper list and per-paper JSON files and emits a single
// static document with collapsible per-paper and per-review sections.

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use tracing::warn;

use crate::cache::{paths, store};
use crate::cmt::{DiscussionMessage, ODataList, PaperRecord, ResourceKind, Review};
use crate::error::{CmtError, Result};
use crate::report::questions;
use crate::report::score::{self, first_sentence};

/// System-generated thread-opening message, excluded from real counts.
pub const BOILERPLATE_PHRASE: &str = "The discussion is open now";

/// Question order carrying the reviewer confidence rating.
const CONFIDENCE_ORDER: u32 = 9;

/// Question order carrying the reviewer knowledge statement.
const KNOWLEDGE_ORDER: u32 = 10;

/// Reviews with fewer questions than this render only the reviewer number.
const EXPECTED_QUESTION_COUNT: usize = 10;

/// Default report file name in the working directory.
pub const DEFAULT_OUTPUT: &str = "reviews.html";

const HTML_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>Review Analysis</title>
<style>
body { font-family: -apple-system, Arial, sans-serif; max-width: 1000px; margin: 0 auto; }
details { margin-top: 10px; border: 1px solid #aaa; border-radius: 4px; padding: 10px 5px; }
summary { font-weight: bold; cursor: pointer; padding: 5px 0; }
ul { margin-top: 5px; padding-left: 15px; }
li { margin-bottom: 5px; }
.paper-id { font-weight: normal; }
.summary-extra { font-weight: normal; }
.discussion { background-color: #f0f0f0; padding: 10px; margin-top: 10px; }
.message { margin-bottom: 10px; }
.author { font-weight: bold; }
.date { font-size: 0.8em; color: #666; }
.feedback-link { margin-top: 10px; }
</style>
</head>
<body>
<h2>Paper Reviews</h2>
"#;

/// Options for a render run, assembled by the caller.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub data_dir: PathBuf,
    pub conference_id: String,
}

impl RenderOptions {
    pub fn new(conference_id: impl Into<String>) -> Self {
        Self {
            data_dir: PathBuf::from(paths::DEFAULT_DATA_DIR),
            conference_id: conference_id.into(),
        }
    }
}

/// Render the report for a conference from the local cache.
pub fn render(options: &RenderOptions) -> Result<String> {
    let ids_path = paths::paper_ids_path(&options.data_dir, &options.conference_id);
    let mut papers: Vec<PaperRecord> = store::read_json(&ids_path)?
        .ok_or_else(|| CmtError::MissingPaperList(options.conference_id.clone()))?;
    sort_papers(&mut papers);

    let mut out = String::with_capacity(16384);
    out.push_str(HTML_HEAD);

    for record in &papers {
        let Some(reviews) = load_reviews(options, record.id) else {
            continue;
        };
        let messages = load_messages(options, record.id);
        let pdf_path = paths::feedback_pdf_path(&options.data_dir, &options.conference_id, record.id);
        let pdf_link = pdf_path.exists().then(|| pdf_path.display().to_string());

        write_paper_section(&mut out, record, &reviews, &messages, pdf_link.as_deref());
    }

    out.push_str("</body>\n</html>\n");
    Ok(out)
}

/// Render the report and write it to the given path.
pub fn write_report(options: &RenderOptions, out_path: &Path) -> Result<()> {
    let html = render(options)?;
    store::write_text(out_path, &html)?;
    Ok(())
}

/// Order papers by (decided-before-undecided, ascending id): every paper
/// still awaiting a decision sorts before the decided ones.
pub fn sort_papers(papers: &mut [PaperRecord]) {
    papers.sort_by_key(|p| (!p.awaiting_decision(), p.id));
}

fn is_boilerplate(message: &DiscussionMessage) -> bool {
    message.text.contains(BOILERPLATE_PHRASE)
}

/// Number of non-boilerplate messages in a discussion thread.
pub fn count_real_messages(messages: &[DiscussionMessage]) -> usize {
    messages.iter().filter(|m| !is_boilerplate(m)).count()
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Format a CMT timestamp as "YYYY-MM-DD HH:MM", falling back to the raw
/// string when it does not parse.
fn format_timestamp(date: &str) -> String {
    NaiveDateTime::parse_from_str(date, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|_| date.to_string())
}

/// Parse the cached Reviews.json for a paper, `None` when absent or
/// unparseable.
fn load_reviews(options: &RenderOptions, paper_id: u64) -> Option<Vec<Review>> {
    let path = paths::resource_path(
        &options.data_dir,
        &options.conference_id,
        paper_id,
        ResourceKind::Reviews,
    );
    let body = store::read_to_string(&path).ok().flatten()?;
    match serde_json::from_str::<ODataList<Review>>(&body) {
        Ok(list) => Some(list.value),
        Err(e) => {
            warn!("skipping paper {}: malformed Reviews.json: {}", paper_id, e);
            None
        }
    }
}

/// Parse the cached discussion thread for a paper; absent or malformed files
/// yield an empty thread.
fn load_messages(options: &RenderOptions, paper_id: u64) -> Vec<DiscussionMessage> {
    let path = paths::resource_path(
        &options.data_dir,
        &options.conference_id,
        paper_id,
        ResourceKind::DiscussionMessages,
    );
    let Ok(Some(body)) = store::read_to_string(&path) else {
        return Vec::new();
    };
    match serde_json::from_str::<ODataList<DiscussionMessage>>(&body) {
        Ok(list) => list.value,
        Err(e) => {
            warn!(
                "ignoring malformed DiscussionMessages.json for paper {}: {}",
                paper_id, e
            );
            Vec::new()
        }
    }
}

fn paper_title(record: &PaperRecord, reviews: &[Review]) -> String {
    reviews
        .first()
        .map(|r| r.submission_title.clone())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| format!("Paper {}", record.id))
}

/// Score list such as "6 / 7 / ?", one entry per review.
fn score_list(reviews: &[Review]) -> String {
    reviews
        .iter()
        .map(|r| match score::review_score(r) {
            Some(s) => s.to_string(),
            None => "?".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" / ")
}

fn write_paper_section(
    out: &mut String,
    record: &PaperRecord,
    reviews: &[Review],
    messages: &[DiscussionMessage],
    pdf_link: Option<&str>,
) {
    let title = paper_title(record, reviews);
    let activity = "\u{1f4dc}".repeat(count_real_messages(messages));

    out.push_str("<details>\n");
    out.push_str(&format!(
        "<summary><span class=\"paper-id\">{}</span> \"{}\" - {} Reviews - {} - {}</summary>\n",
        record.id,
        html_escape(&title),
        reviews.len(),
        score_list(reviews),
        activity,
    ));

    if let Some(link) = pdf_link {
        out.push_str(&format!(
            "<div class=\"feedback-link\"><a href=\"{}\">Author feedback (PDF)</a></div>\n",
            html_escape(link),
        ));
    }

    write_discussion(out, messages);

    for review in reviews {
        write_review(out, review);
    }

    out.push_str("</details>\n");
}

fn write_discussion(out: &mut String, messages: &[DiscussionMessage]) {
    out.push_str("<div class=\"discussion\">\n");
    for message in messages {
        if is_boilerplate(message) {
            continue;
        }
        out.push_str("<div class=\"message\">\n");
        out.push_str(&format!(
            "<div class=\"author\">{}</div>\n",
            html_escape(message.author()),
        ));
        out.push_str(&format!(
            "<div class=\"date\">{}</div>\n",
            html_escape(&format_timestamp(&message.date)),
        ));
        out.push_str(&format!(
            "<div class=\"text\">{}</div>\n",
            html_escape(&message.text),
        ));
        out.push_str("</div>\n");
    }
    out.push_str("</div>\n");
}

/// Summary line for one reviewer.
///
/// Reviews lacking the expected question count fall back to the bare
/// reviewer number.
fn reviewer_summary_html(review: &Review) -> String {
    let fallback = format!("R{}", review.reviewer_number);
    if review.questions.len() < EXPECTED_QUESTION_COUNT {
        return fallback;
    }

    let (Some(recommendation), Some(confidence), Some(knowledge)) = (
        review.answer_text(score::RECOMMENDATION_ORDER),
        review.answer_text(CONFIDENCE_ORDER),
        review.answer_text(KNOWLEDGE_ORDER),
    ) else {
        return fallback;
    };

    format!(
        "R{}: {} <span class=\"summary-extra\">/ {} / {}</span>",
        review.reviewer_number,
        html_escape(first_sentence(recommendation)),
        html_escape(first_sentence(confidence)),
        html_escape(knowledge.split(':').next().unwrap_or("").trim()),
    )
}

fn write_review(out: &mut String, review: &Review) {
    out.push_str("<details>\n");
    out.push_str(&format!(
        "<summary>{}</summary>\n<ul>\n",
        reviewer_summary_html(review),
    ));

    for question in &review.questions {
        let Some(answer) = question.answers.first() else {
            continue;
        };
        let Some(displayed) = questions::display_answer(question.order, &answer.text) else {
            continue;
        };
        out.push_str(&format!(
            "<li>{}</li>\n",
            html_escape(&displayed).replace('\n', "<br>"),
        ));
    }

    out.push_str("</ul>\n</details>\n");
}
