// Cache path utilities.
// Constructs filesystem paths for the per-conference data hierarchy.

use std::path::{Path, PathBuf};

use crate::cmt::ResourceKind;

/// Default cache root relative to the working directory.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Path to a conference's directory.
pub fn conference_dir(data_dir: &Path, conference_id: &str) -> PathBuf {
    data_dir.join(sanitize_name(conference_id))
}

/// Path to the cached paper list for a conference.
pub fn paper_ids_path(data_dir: &Path, conference_id: &str) -> PathBuf {
    conference_dir(data_dir, conference_id).join("paper_ids.json")
}

/// Path to a paper's directory.
pub fn paper_dir(data_dir: &Path, conference_id: &str, paper_id: u64) -> PathBuf {
    conference_dir(data_dir, conference_id).join(paper_id.to_string())
}

/// Path to a cached resource file for a paper.
pub fn resource_path(
    data_dir: &Path,
    conference_id: &str,
    paper_id: u64,
    kind: ResourceKind,
) -> PathBuf {
    paper_dir(data_dir, conference_id, paper_id).join(kind.file_name())
}

/// Path to the cached author-feedback PDF for a paper.
pub fn feedback_pdf_path(data_dir: &Path, conference_id: &str, paper_id: u64) -> PathBuf {
    paper_dir(data_dir, conference_id, paper_id).join("AuthorFeedback.pdf")
}

/// Sanitize a name for use in filesystem paths.
/// Replaces problematic characters with underscores.
fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            _ => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_name() {
        assert_eq!(sanitize_name("IJCAI2024"), "IJCAI2024");
        assert_eq!(sanitize_name("conf/2024"), "conf_2024");
        assert_eq!(sanitize_name("a:b"), "a_b");
    }

    #[test]
    fn test_cache_paths() {
        let data_dir = Path::new("data");
        let conf = "IJCAI2024";
        let paper_id = 1234u64;

        let ids = paper_ids_path(data_dir, conf);
        assert!(ids.ends_with("data/IJCAI2024/paper_ids.json"));

        let reviews = resource_path(data_dir, conf, paper_id, ResourceKind::Reviews);
        assert!(reviews.ends_with("data/IJCAI2024/1234/Reviews.json"));

        let feedback = resource_path(data_dir, conf, paper_id, ResourceKind::AuthorFeedback);
        assert!(feedback.ends_with("data/IJCAI2024/1234/AuthorFeedback.json"));

        let pdf = feedback_pdf_path(data_dir, conf, paper_id);
        assert!(pdf.ends_with("data/IJCAI2024/1234/AuthorFeedback.pdf"));
    }
}
