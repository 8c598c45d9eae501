use std::fs;
use std::path::{Path, PathBuf};

use super::models::WalletState;
use super::StateStore;
use crate::error::StorageError;

#[derive(Clone, Debug)]
pub struct Storage {
    state_path: PathBuf,
}

impl Storage {
    /// Create storage backed by the given state file
    pub fn new_with_path(state_path: PathBuf) -> Self {
        Self { state_path }
    }

    pub fn state_path(&self) -> &Path {
        &self.state_path
    }

    pub fn state_exists(&self) -> bool {
        self.state_path.exists()
    }
}

impl StateStore for Storage {
    /// Load wallet state from disk, or return an empty state if the file doesn't exist
    fn load_state(&self) -> Result<WalletState, StorageError> {
        if !self.state_path.exists() {
            log::debug!("No state file at {:?}, starting empty", self.state_path);
            return Ok(WalletState::default());
        }
        let contents = fs::read_to_string(&self.state_path)?;
        let state: WalletState = serde_json::from_str(&contents)?;
        log::debug!(
            "Loaded {} wallet(s) from {:?}",
            state.len(),
            self.state_path
        );
        Ok(state)
    }

    /// Save the full wallet state, replacing the previous document
    ///
    /// Written to a sibling temp file first and renamed over the target, so a
    /// failed write leaves the previous document in place. The temp file is
    /// removed again when the write or the rename fails.
    fn save_state(&self, state: &WalletState) -> Result<(), StorageError> {
        if let Some(parent) = self.state_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(state)?;
        let tmp_path = self.state_path.with_extension("json.tmp");
        let written =
            fs::write(&tmp_path, json).and_then(|_| fs::rename(&tmp_path, &self.state_path));
        if let Err(e) = written {
            if tmp_path.is_file() {
                if let Err(cleanup) = fs::remove_file(&tmp_path) {
                    log::warn!("⚠️  Could not remove {:?}: {}", tmp_path, cleanup);
                }
            }
            return Err(e.into());
        }

        log::debug!("Saved {} wallet(s) to {:?}", state.len(), self.state_path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_empty_state() {
        let dir = TempDir::new().unwrap();
        let storage = Storage::new_with_path(dir.path().join("wallet_state.json"));

        let state = storage.load_state().unwrap();
        assert!(state.is_empty());
        assert!(!storage.state_exists());
    }

    #[test]
    fn test_save_then_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let storage = Storage::new_with_path(dir.path().join("wallet_state.json"));

        let state = WalletState {
            wallets: vec![
                "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266".to_string(),
                "0x70997970C51812dc3A010C7d01b50e0d17dc79C8".to_string(),
            ],
        };
        storage.save_state(&state).unwrap();

        assert_eq!(storage.load_state().unwrap(), state);
    }

    #[test]
    fn test_save_overwrites_whole_document() {
        let dir = TempDir::new().unwrap();
        let storage = Storage::new_with_path(dir.path().join("wallet_state.json"));

        storage
            .save_state(&WalletState {
                wallets: vec!["0xaa".into(), "0xbb".into(), "0xcc".into()],
            })
            .unwrap();
        storage
            .save_state(&WalletState {
                wallets: vec!["0xdd".into()],
            })
            .unwrap();

        assert_eq!(storage.load_state().unwrap().wallets, vec!["0xdd"]);
    }

    #[test]
    fn test_document_is_pretty_printed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("wallet_state.json");
        let storage = Storage::new_with_path(path.clone());

        storage
            .save_state(&WalletState {
                wallets: vec!["0xaa".into()],
            })
            .unwrap();

        let raw = std::fs::read_to_string(path).unwrap();
        assert_eq!(raw, "{\n  \"wallets\": [\n    \"0xaa\"\n  ]\n}");
    }

    #[test]
    fn test_corrupt_document_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("wallet_state.json");
        std::fs::write(&path, "not json").unwrap();

        let storage = Storage::new_with_path(path);
        assert!(matches!(storage.load_state(), Err(StorageError::Json(_))));
    }

    #[test]
    fn test_creates_missing_parent_directory() {
        let dir = TempDir::new().unwrap();
        let storage = Storage::new_with_path(dir.path().join("nested").join("state.json"));

        storage.save_state(&WalletState::default()).unwrap();
        assert!(storage.state_exists());
    }

    #[test]
    fn test_failed_write_keeps_previous_document() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("wallet_state.json");
        let storage = Storage::new_with_path(path.clone());

        let previous = WalletState {
            wallets: vec!["0xaa".into(), "0xbb".into()],
        };
        storage.save_state(&previous).unwrap();

        // A directory where the temp file goes makes the write fail
        std::fs::create_dir(dir.path().join("wallet_state.json.tmp")).unwrap();

        let result = storage.save_state(&WalletState {
            wallets: vec!["0xcc".into()],
        });

        assert!(matches!(result, Err(StorageError::Io(_))));
        assert_eq!(storage.load_state().unwrap(), previous);
    }

    #[test]
    fn test_failed_rename_removes_temp_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("wallet_state.json");
        // A non-empty directory at the target path cannot be renamed over
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("keep"), "x").unwrap();
        let storage = Storage::new_with_path(path.clone());

        let result = storage.save_state(&WalletState {
            wallets: vec!["0xaa".into()],
        });

        assert!(matches!(result, Err(StorageError::Io(_))));
        assert!(!dir.path().join("wallet_state.json.tmp").exists());
        assert!(path.is_dir());
    }
}
