// CMT API endpoint functions.
// Provides typed methods for fetching review data from the CMT OData API.

use serde::Deserialize;
use serde_json::json;

use crate::error::Result;

use super::client::CmtClient;
use super::types::{ODataList, PaperRecord, ResourceKind, Submission};

/// Response wrapper for an OData $batch envelope.
#[derive(Debug, Deserialize)]
struct BatchResponse {
    #[serde(default = "Vec::new")]
    responses: Vec<BatchPart>,
}

/// Single inner response within a $batch envelope.
#[derive(Debug, Deserialize)]
struct BatchPart {
    body: ODataList<Submission>,
}

/// Inner URL for one page of the submission listing.
///
/// Meta-reviewers read from a different aggregation endpoint than regular
/// reviewers.
pub fn submissions_page_url(
    conference_id: &str,
    is_meta_reviewer: bool,
    page_size: usize,
    skip: usize,
) -> String {
    let models = if is_meta_reviewer {
        "MetaReviewModels"
    } else {
        "ReviewModels"
    };
    format!(
        "/api/odata/{}/{}?$count=true&$orderby=Id&$top={}&$skip={}",
        conference_id, models, page_size, skip
    )
}

/// Whether a page of the given length ends the pagination loop.
pub fn is_last_page(page_len: usize, page_size: usize) -> bool {
    page_len < page_size
}

impl CmtClient {
    /// List all submissions visible to the authenticated role.
    ///
    /// Pages through the batched review-model query until a short page is
    /// returned, so conferences beyond one page of submissions are fully
    /// enumerated.
    pub async fn list_submissions(
        &self,
        conference_id: &str,
        is_meta_reviewer: bool,
        page_size: usize,
    ) -> Result<Vec<PaperRecord>> {
        let batch_endpoint = format!("/api/odata/{}/$batch", conference_id);
        let mut papers: Vec<PaperRecord> = Vec::new();

        loop {
            let inner_url =
                submissions_page_url(conference_id, is_meta_reviewer, page_size, papers.len());
            let envelope = json!({
                "requests": [{
                    "url": inner_url,
                    "method": "GET",
                    "headers": { "Accept": "application/json" },
                }]
            });

            let response = self.post_json(&batch_endpoint, &envelope).await?;
            let batch: BatchResponse = response.json().await?;
            let page: Vec<Submission> = batch
                .responses
                .into_iter()
                .next()
                .map(|part| part.body.value)
                .unwrap_or_default();

            let page_len = page.len();
            papers.extend(page.into_iter().map(PaperRecord::from));

            if is_last_page(page_len, page_size) {
                break;
            }
        }

        Ok(papers)
    }

    /// Fetch one resource kind for a paper, returning the raw response body.
    ///
    /// AuthorFeedback is a POST with the submission id in the body; the other
    /// kinds are plain GETs.
    pub async fn fetch_resource(
        &self,
        conference_id: &str,
        paper_id: u64,
        kind: ResourceKind,
    ) -> Result<String> {
        let base = format!("/api/odata/{}", conference_id);
        let response = match kind {
            ResourceKind::Reviews => {
                self.get(&format!("{}/Submissions({})/Reviews", base, paper_id))
                    .await?
            }
            ResourceKind::MetaReviews => {
                self.get(&format!("{}/Submissions({})/MetaReviews", base, paper_id))
                    .await?
            }
            ResourceKind::DiscussionMessages => {
                self.get(&format!(
                    "{}/DiscussionMessages?id={}&$orderby=Date desc",
                    base, paper_id
                ))
                .await?
            }
            ResourceKind::AuthorFeedback => {
                let body = json!({ "Id": paper_id });
                self.post_json(
                    &format!("{}/AuthorFeedbackViews/GetBySubmissionId", base),
                    &body,
                )
                .await?
            }
        };

        let text = response.text().await?;
        Ok(text)
    }
}
