// Persisted run configuration.
// Loads and saves credentials and the last conference selection as plain JSON
// files; callers pass the loaded values explicitly into fetch and render.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::cache::store;
use crate::error::Result;

/// Default location of the saved credentials, relative to the working directory.
pub const CREDENTIALS_FILE: &str = "credentials.json";

/// Default location of the saved conference selection.
pub const CONFERENCE_FILE: &str = "last_conference.json";

/// CMT account credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Conference id and role used for the last run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConferenceSelection {
    pub conference_id: String,
    #[serde(default)]
    pub is_meta_reviewer: bool,
}

impl ConferenceSelection {
    pub fn role_label(&self) -> &'static str {
        if self.is_meta_reviewer {
            "meta reviewer"
        } else {
            "reviewer"
        }
    }
}

/// Load saved credentials, if any.
pub fn load_credentials(path: &Path) -> Result<Option<Credentials>> {
    store::read_json(path)
}

/// Persist credentials for reuse on the next run.
pub fn save_credentials(path: &Path, credentials: &Credentials) -> Result<()> {
    store::write_json(path, credentials)
}

/// Load the saved conference selection, if any.
pub fn load_conference(path: &Path) -> Result<Option<ConferenceSelection>> {
    store::read_json(path)
}

/// Persist the conference selection for reuse on the next run.
pub fn save_conference(path: &Path, selection: &ConferenceSelection) -> Result<()> {
    store::write_json(path, selection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_credentials_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CREDENTIALS_FILE);

        let creds = Credentials {
            username: "reviewer@example.org".to_string(),
            password: "hunter2".to_string(),
        };
        save_credentials(&path, &creds).unwrap();

        let loaded = load_credentials(&path).unwrap();
        assert_eq!(loaded, Some(creds));
    }

    #[test]
    fn test_conference_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFERENCE_FILE);

        let selection = ConferenceSelection {
            conference_id: "IJCAI2024".to_string(),
            is_meta_reviewer: true,
        };
        save_conference(&path, &selection).unwrap();

        let loaded = load_conference(&path).unwrap();
        assert_eq!(loaded, Some(selection));
    }

    #[test]
    fn test_load_missing_files() {
        let temp_dir = TempDir::new().unwrap();

        assert!(
            load_credentials(&temp_dir.path().join(CREDENTIALS_FILE))
                .unwrap()
                .is_none()
        );
        assert!(
            load_conference(&temp_dir.path().join(CONFERENCE_FILE))
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn test_role_label() {
        let mut selection = ConferenceSelection {
            conference_id: "X".to_string(),
            is_meta_reviewer: false,
        };
        assert_eq!(selection.role_label(), "reviewer");
        selection.is_meta_reviewer = true;
        assert_eq!(selection.role_label(), "meta reviewer");
    }
}
