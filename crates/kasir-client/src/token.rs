//! # Token Store
//!
//! Persists the bearer token between runs and hands it out only while it is
//! still usable.
//!
//! ## Token Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Session Token Lifecycle                          │
//! │                                                                         │
//! │   login ok ──► save(token) ──► storage.store()                         │
//! │                                                                         │
//! │   any request ──► get()                                                 │
//! │                    │                                                    │
//! │                    ├── nothing stored ─────────────► None               │
//! │                    ├── undecodable / exp < now ────► clear() ► None     │
//! │                    └── exp missing, 0 or future ───► Some(token)        │
//! │                                                                         │
//! │   logout ──► clear() ──► storage.remove()                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The expiry check only reads the `exp` claim. The signature is never
//! verified on the client.

use chrono::{DateTime, Utc};
use kasir_core::claims;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, info, warn};

use crate::error::{ClientError, ClientResult};

// =============================================================================
// Storage Backends
// =============================================================================

/// Where a token is kept.
pub trait TokenStorage: Send + Sync {
    /// Reads the stored token, if any.
    fn load(&self) -> ClientResult<Option<String>>;

    /// Replaces the stored token.
    fn store(&self, token: &str) -> ClientResult<()>;

    /// Deletes the stored token. Deleting nothing is not an error.
    fn remove(&self) -> ClientResult<()>;
}

/// Keeps the token in memory only. Used by tests and one-shot runs.
#[derive(Debug, Default)]
pub struct MemoryTokenStorage {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStorage for MemoryTokenStorage {
    fn load(&self) -> ClientResult<Option<String>> {
        Ok(self
            .token
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn store(&self, token: &str) -> ClientResult<()> {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = Some(token.to_string());
        Ok(())
    }

    fn remove(&self) -> ClientResult<()> {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

/// On-disk layout of the session file.
#[derive(Debug, Serialize, Deserialize)]
struct SessionFile {
    token: String,
    saved_at: DateTime<Utc>,
}

/// Keeps the token in a small TOML file.
///
/// ```toml
/// # session.toml
/// token = "eyJhbGciOi..."
/// saved_at = "2024-05-01T08:00:00Z"
/// ```
#[derive(Debug, Clone)]
pub struct FileTokenStorage {
    path: PathBuf,
}

impl FileTokenStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileTokenStorage { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStorage for FileTokenStorage {
    fn load(&self) -> ClientResult<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(&self.path)?;
        let session: SessionFile = toml::from_str(&contents)
            .map_err(|e| ClientError::Storage(format!("Corrupt session file: {}", e)))?;
        Ok(Some(session.token))
    }

    fn store(&self, token: &str) -> ClientResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let session = SessionFile {
            token: token.to_string(),
            saved_at: Utc::now(),
        };
        let contents =
            toml::to_string(&session).map_err(|e| ClientError::Storage(e.to_string()))?;
        std::fs::write(&self.path, contents)?;
        debug!(path = ?self.path, "Session token written");
        Ok(())
    }

    fn remove(&self) -> ClientResult<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

// =============================================================================
// Token Store
// =============================================================================

/// Shared handle to the session token.
///
/// Cloning is cheap; all clones see the same storage.
#[derive(Clone)]
pub struct TokenStore {
    storage: Arc<dyn TokenStorage>,
}

impl std::fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenStore").finish_non_exhaustive()
    }
}

impl TokenStore {
    /// Wraps any storage backend.
    pub fn new(storage: impl TokenStorage + 'static) -> Self {
        TokenStore {
            storage: Arc::new(storage),
        }
    }

    /// In-memory store.
    pub fn in_memory() -> Self {
        Self::new(MemoryTokenStorage::new())
    }

    /// File-backed store at `path`.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::new(FileTokenStorage::new(path))
    }

    /// Persists a freshly issued token.
    pub fn save(&self, token: &str) -> ClientResult<()> {
        self.storage.store(token)?;
        info!("Session token saved");
        Ok(())
    }

    /// The stored token if it is still usable.
    pub fn get(&self) -> Option<String> {
        self.get_at(Utc::now().timestamp())
    }

    /// [`get`](Self::get) with an explicit clock.
    pub fn get_at(&self, now: i64) -> Option<String> {
        self.require_at(now).ok()
    }

    /// Like [`get`](Self::get), but says why there is no token.
    pub fn require(&self) -> ClientResult<String> {
        self.require_at(Utc::now().timestamp())
    }

    /// [`require`](Self::require) with an explicit clock.
    pub fn require_at(&self, now: i64) -> ClientResult<String> {
        let token = match self.storage.load() {
            Ok(Some(token)) => token,
            Ok(None) => return Err(ClientError::TokenMissing),
            Err(e) => {
                warn!(error = %e, "Unreadable session, clearing it");
                self.clear_quietly();
                return Err(ClientError::TokenExpired);
            }
        };

        if claims::is_expired_at(&token, now) {
            info!("Session token expired or malformed, clearing it");
            self.clear_quietly();
            return Err(ClientError::TokenExpired);
        }

        Ok(token)
    }

    /// Forgets the token.
    pub fn clear(&self) -> ClientResult<()> {
        self.storage.remove()?;
        info!("Session token cleared");
        Ok(())
    }

    /// `userId` claim of the current usable token.
    pub fn user_id(&self) -> Option<String> {
        self.get().as_deref().and_then(claims::user_id)
    }

    fn clear_quietly(&self) {
        if let Err(e) = self.storage.remove() {
            warn!(error = %e, "Failed to clear session token");
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::json;

    const NOW: i64 = 1_700_000_000;

    fn token(exp: i64) -> String {
        encode(
            &Header::default(),
            &json!({ "userId": "u-42", "exp": exp }),
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap()
    }

    #[test]
    fn test_empty_store() {
        let store = TokenStore::in_memory();
        assert!(store.get_at(NOW).is_none());
        assert!(matches!(store.require_at(NOW), Err(ClientError::TokenMissing)));
    }

    #[test]
    fn test_valid_token_is_returned() {
        let store = TokenStore::in_memory();
        let t = token(NOW + 60);
        store.save(&t).unwrap();
        assert_eq!(store.get_at(NOW).as_deref(), Some(t.as_str()));
    }

    #[test]
    fn test_expired_token_is_cleared() {
        let storage = Arc::new(MemoryTokenStorage::new());
        let store = TokenStore {
            storage: storage.clone(),
        };
        store.save(&token(NOW - 1)).unwrap();

        assert!(matches!(store.require_at(NOW), Err(ClientError::TokenExpired)));
        assert!(storage.load().unwrap().is_none());
        // Second read finds nothing at all.
        assert!(matches!(store.require_at(NOW), Err(ClientError::TokenMissing)));
    }

    #[test]
    fn test_malformed_token_is_cleared() {
        let store = TokenStore::in_memory();
        store.save("not-a-token").unwrap();
        assert!(store.get_at(NOW).is_none());
        assert!(matches!(store.require_at(NOW), Err(ClientError::TokenMissing)));
    }

    #[test]
    fn test_zero_exp_never_expires() {
        let store = TokenStore::in_memory();
        let t = token(0);
        store.save(&t).unwrap();
        assert_eq!(store.get_at(i64::MAX).as_deref(), Some(t.as_str()));
    }

    #[test]
    fn test_user_id_from_claims() {
        let store = TokenStore::in_memory();
        // exp far in the future so the wall clock check passes.
        store.save(&token(4_102_444_800)).unwrap();
        assert_eq!(store.user_id().as_deref(), Some("u-42"));

        store.clear().unwrap();
        assert!(store.user_id().is_none());
    }

    #[test]
    fn test_file_storage_persists_across_handles() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kasir").join("session.toml");
        let t = token(NOW + 3600);

        TokenStore::file(&path).save(&t).unwrap();
        assert!(path.exists());

        let reopened = TokenStore::file(&path);
        assert_eq!(reopened.get_at(NOW).as_deref(), Some(t.as_str()));

        reopened.clear().unwrap();
        assert!(!path.exists());
        // Clearing twice is fine.
        reopened.clear().unwrap();
    }

    #[test]
    fn test_corrupt_session_file_counts_as_expired() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.toml");
        std::fs::write(&path, "this is = = not toml").unwrap();

        let store = TokenStore::file(&path);
        assert!(matches!(store.require_at(NOW), Err(ClientError::TokenExpired)));
        assert!(!path.exists());
    }
}
