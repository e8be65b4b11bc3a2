//! File-backed credential store.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::warn;

use credo_core::{ApiKey, BearerToken, CredentialStore};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// On-disk credential slots.
///
/// At most one field is populated through the store API; a hand-edited
/// file with both resolves to the bearer token (the trait's precedence
/// rule).
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredCredential {
    #[serde(skip_serializing_if = "Option::is_none")]
    bearer_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<String>,
}

/// Credential store persisted under the user data directory.
///
/// Writes complete synchronously. I/O failures degrade to an empty
/// store with a warning rather than surfacing into the session state
/// machine, mirroring the infallible contract of the storage this
/// models.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Open the store at its default location, creating the data
    /// directory if needed.
    pub fn open_default() -> Result<Self> {
        let dirs =
            ProjectDirs::from("", "", "credo").context("Could not determine config directory")?;

        let data_dir = dirs.data_dir();
        fs::create_dir_all(data_dir).context("Failed to create data directory")?;

        Ok(Self {
            path: data_dir.join("credentials.json"),
        })
    }

    /// Open a store at an explicit path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load(&self) -> StoredCredential {
        if !self.path.exists() {
            return StoredCredential::default();
        }

        match fs::read_to_string(&self.path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(stored) => stored,
                Err(err) => {
                    warn!(error = %err, path = %self.path.display(),
                        "credential file is corrupt, treating as empty");
                    StoredCredential::default()
                }
            },
            Err(err) => {
                warn!(error = %err, path = %self.path.display(),
                    "failed to read credential file, treating as empty");
                StoredCredential::default()
            }
        }
    }

    fn persist(&self, stored: &StoredCredential) {
        let json = match serde_json::to_string_pretty(stored) {
            Ok(json) => json,
            Err(err) => {
                warn!(error = %err, "failed to serialize credentials");
                return;
            }
        };

        if let Err(err) = fs::write(&self.path, &json) {
            warn!(error = %err, path = %self.path.display(),
                "failed to write credential file");
            return;
        }

        // Set restrictive permissions (Unix only)
        #[cfg(unix)]
        {
            if let Ok(metadata) = fs::metadata(&self.path) {
                let mut perms = metadata.permissions();
                perms.set_mode(0o600);
                if let Err(err) = fs::set_permissions(&self.path, perms) {
                    warn!(error = %err, "failed to restrict credential file permissions");
                }
            }
        }
    }
}

impl CredentialStore for FileStore {
    fn set_bearer(&self, token: &BearerToken) {
        self.persist(&StoredCredential {
            bearer_token: Some(token.as_str().to_string()),
            api_key: None,
        });
    }

    fn set_api_key(&self, key: &ApiKey) {
        self.persist(&StoredCredential {
            bearer_token: None,
            api_key: Some(key.as_str().to_string()),
        });
    }

    fn bearer(&self) -> Option<BearerToken> {
        self.load().bearer_token.map(BearerToken::new)
    }

    fn api_key(&self) -> Option<ApiKey> {
        self.load().api_key.map(ApiKey::new)
    }

    fn clear_all(&self) {
        if self.path.exists() {
            if let Err(err) = fs::remove_file(&self.path) {
                warn!(error = %err, path = %self.path.display(),
                    "failed to remove credential file");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use credo_core::CredentialKind;
    use tempfile::tempdir;

    fn store_in(dir: &tempfile::TempDir) -> FileStore {
        FileStore::at(dir.path().join("credentials.json"))
    }

    #[test]
    fn round_trip_bearer() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);

        store.set_bearer(&BearerToken::new("tok-1"));
        assert_eq!(store.bearer().unwrap().as_str(), "tok-1");
        assert!(store.api_key().is_none());
        assert_eq!(store.current_kind(), CredentialKind::Bearer);
    }

    #[test]
    fn setting_one_kind_evicts_the_other() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);

        store.set_bearer(&BearerToken::new("tok-1"));
        store.set_api_key(&ApiKey::new("key-1"));
        assert!(store.bearer().is_none());
        assert_eq!(store.api_key().unwrap().as_str(), "key-1");

        store.set_bearer(&BearerToken::new("tok-2"));
        assert!(store.api_key().is_none());
        assert_eq!(store.bearer().unwrap().as_str(), "tok-2");
    }

    #[test]
    fn clear_all_removes_the_file() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);

        store.set_api_key(&ApiKey::new("key-1"));
        store.clear_all();

        assert!(store.bearer().is_none());
        assert!(store.api_key().is_none());
        assert!(!dir.path().join("credentials.json").exists());
    }

    #[test]
    fn corrupt_file_reads_as_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("credentials.json");
        fs::write(&path, "not json at all").unwrap();

        let store = FileStore::at(&path);
        assert!(store.bearer().is_none());
        assert_eq!(store.current_kind(), CredentialKind::None);
    }

    #[test]
    fn hand_edited_double_slot_prefers_bearer() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("credentials.json");
        fs::write(
            &path,
            r#"{"bearer_token": "tok-1", "api_key": "key-1"}"#,
        )
        .unwrap();

        let store = FileStore::at(&path);
        assert_eq!(store.current_kind(), CredentialKind::Bearer);
    }

    #[cfg(unix)]
    #[test]
    fn credential_file_is_owner_only() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);

        store.set_bearer(&BearerToken::new("tok-1"));

        let mode = fs::metadata(dir.path().join("credentials.json"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
