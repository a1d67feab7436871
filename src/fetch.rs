// Fetch pipeline: enumerate submissions, then pull each paper's resources
// into the local cache. Fully sequential; per-resource failures are logged
// and skipped.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::cache::{paths, store};
use crate::cmt::{AuthorFeedback, CmtClient, PaperRecord, ResourceKind};
use crate::error::Result;

/// Default page size for the submission listing.
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Options for a fetch run, assembled by the caller.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub data_dir: PathBuf,
    pub conference_id: String,
    pub is_meta_reviewer: bool,
    pub page_size: usize,
}

impl FetchOptions {
    pub fn new(conference_id: impl Into<String>, is_meta_reviewer: bool) -> Self {
        Self {
            data_dir: PathBuf::from(paths::DEFAULT_DATA_DIR),
            conference_id: conference_id.into(),
            is_meta_reviewer,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Run the full fetch pipeline against an authenticated client.
///
/// Returns the enumerated paper records after persisting them to
/// `paper_ids.json`.
pub async fn run(client: &CmtClient, options: &FetchOptions) -> Result<Vec<PaperRecord>> {
    info!("listing submissions for {}", options.conference_id);
    let papers = client
        .list_submissions(
            &options.conference_id,
            options.is_meta_reviewer,
            options.page_size,
        )
        .await?;

    let ids_path = paths::paper_ids_path(&options.data_dir, &options.conference_id);
    store::write_json(&ids_path, &papers)?;
    info!("found {} submissions", papers.len());

    for (num, paper) in papers.iter().enumerate() {
        info!("[{}/{}] fetching paper {}", num + 1, papers.len(), paper.id);
        fetch_paper(client, options, paper.id).await;
    }

    Ok(papers)
}

/// Fetch all four resource kinds for one paper.
///
/// A failed resource is skipped without aborting the remaining kinds.
async fn fetch_paper(client: &CmtClient, options: &FetchOptions, paper_id: u64) {
    for kind in ResourceKind::ALL {
        match client
            .fetch_resource(&options.conference_id, paper_id, kind)
            .await
        {
            Ok(body) => {
                let path =
                    paths::resource_path(&options.data_dir, &options.conference_id, paper_id, kind);
                if let Err(e) = store::write_text(&path, &body) {
                    warn!("failed to cache {} for paper {}: {}", kind, paper_id, e);
                    continue;
                }
                if kind == ResourceKind::AuthorFeedback {
                    fetch_feedback_pdf(client, options, paper_id, &body).await;
                }
            }
            Err(e) => {
                warn!("failed to fetch {} for paper {}: {}", kind, paper_id, e);
            }
        }
    }
}

/// Download the author-feedback PDF when one is linked and not yet cached.
///
/// Failures are skipped without raising; the next run will try again.
async fn fetch_feedback_pdf(
    client: &CmtClient,
    options: &FetchOptions,
    paper_id: u64,
    feedback_body: &str,
) {
    let pdf_path = paths::feedback_pdf_path(&options.data_dir, &options.conference_id, paper_id);
    let Some(link) = plan_pdf_download(feedback_body, &pdf_path) else {
        return;
    };

    match client.get_bytes(&link).await {
        Ok(bytes) => {
            if let Err(e) = store::write_bytes(&pdf_path, &bytes) {
                debug!("failed to write feedback PDF for paper {}: {}", paper_id, e);
            }
        }
        Err(e) => {
            debug!(
                "skipping feedback PDF download for paper {}: {}",
                paper_id, e
            );
        }
    }
}

/// Decide whether a feedback PDF needs downloading.
///
/// Returns the relative download link only when the feedback body parses,
/// lists at least one file, and the PDF is not already cached.
pub fn plan_pdf_download(feedback_body: &str, pdf_path: &Path) -> Option<String> {
    let feedback: AuthorFeedback = serde_json::from_str(feedback_body).ok()?;
    let link = feedback.files.first().map(|f| f.download_link.clone())?;
    if link.is_empty() || pdf_path.exists() {
        return None;
    }
    Some(link)
}
