//! Durable key-value persistence for the blog documents.
//!
//! [`StorageBackend`] is the raw string store (browser `localStorage`, a
//! directory of files, or memory). [`PersistentStore`] sits on top of it,
//! namespaces keys per [`DocumentKind`], does the JSON encoding and swallows
//! every failure into a logged warning: callers only ever see "stored" or
//! "absent".

use std::{
    cell::RefCell,
    collections::BTreeMap,
    rc::Rc,
};

use serde::{de::DeserializeOwned, Serialize};

use crate::models::{DocumentKind, User};

/// Holds `"true"` while an admin is logged in.
pub const SESSION_FLAG_KEY: &str = "isAuthenticated";
/// Holds the logged-in [`User`] as JSON.
pub const SESSION_USER_KEY: &str = "currentUser";

/// Failure reported by a [`StorageBackend`].
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// No storage at all (private browsing, missing `window`).
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    /// The backend refused a write for lack of space.
    #[error("storage quota exceeded while writing `{key}`")]
    QuotaExceeded {
        /// Key being written.
        key: String,
    },
    /// Filesystem error.
    #[error("storage I/O error on `{key}`: {source}")]
    Io {
        /// Key being accessed.
        key: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

/// Raw string key-value store with the shape of the browser `Storage` API.
pub trait StorageBackend {
    /// Stored text, or `None` if the key was never written.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    /// Store `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
    /// Forget `key`. Removing a missing key succeeds.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

impl<B: StorageBackend + ?Sized> StorageBackend for Rc<B> {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }
}

/// In-memory backend. Clones share the same map, so a test can keep a
/// handle and inspect what the store wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    items: Rc<RefCell<BTreeMap<String, String>>>,
    writes: Rc<RefCell<Vec<String>>>,
    quota: Option<usize>,
}

impl MemoryBackend {
    /// Empty backend without a quota.
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend that rejects any value longer than `bytes`, like a full
    /// browser quota.
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            quota: Some(bytes),
            ..Self::default()
        }
    }

    /// Stored keys, sorted.
    pub fn keys(&self) -> Vec<String> {
        self.items.borrow().keys().cloned().collect()
    }

    /// Stored text for `key`.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    /// Keys of every successful `set_item`, in call order.
    pub fn write_log(&self) -> Vec<String> {
        self.writes.borrow().clone()
    }

    /// Number of successful writes to `key`.
    pub fn writes_to(&self, key: &str) -> usize {
        self.writes.borrow().iter().filter(|k| k.as_str() == key).count()
    }
}

impl StorageBackend for MemoryBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.quota.is_some_and(|limit| value.len() > limit) {
            return Err(StorageError::QuotaExceeded {
                key: key.to_string(),
            });
        }
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self.writes.borrow_mut().push(key.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileBackend;

#[cfg(not(target_arch = "wasm32"))]
mod file {
    use std::{
        fs,
        io::ErrorKind,
        path::{Path, PathBuf},
    };

    use super::{StorageBackend, StorageError};

    /// One `<key>.json` file per key inside a directory.
    #[derive(Debug, Clone)]
    pub struct FileBackend {
        root: PathBuf,
    }

    impl FileBackend {
        /// Backend storing under `root`; the directory is created on the
        /// first write.
        pub fn new(root: impl Into<PathBuf>) -> Self {
            Self {
                root: root.into(),
            }
        }

        /// Storage directory.
        pub fn root(&self) -> &Path {
            &self.root
        }

        fn path_for(&self, key: &str) -> PathBuf {
            self.root.join(format!("{key}.json"))
        }
    }

    impl StorageBackend for FileBackend {
        fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
            match fs::read_to_string(self.path_for(key)) {
                Ok(text) => Ok(Some(text)),
                Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
                Err(source) => Err(StorageError::Io {
                    key: key.to_string(),
                    source,
                }),
            }
        }

        fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
            let io_err = |source| StorageError::Io {
                key: key.to_string(),
                source,
            };
            fs::create_dir_all(&self.root).map_err(io_err)?;
            // write-then-rename so a crash never leaves half a document
            let tmp = self.root.join(format!(".{key}.json.tmp"));
            fs::write(&tmp, value).map_err(io_err)?;
            fs::rename(&tmp, self.path_for(key)).map_err(io_err)
        }

        fn remove_item(&self, key: &str) -> Result<(), StorageError> {
            match fs::remove_file(self.path_for(key)) {
                Ok(()) => Ok(()),
                Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
                Err(source) => Err(StorageError::Io {
                    key: key.to_string(),
                    source,
                }),
            }
        }
    }
}

/// Typed, namespaced view over a backend. Never fails outward.
#[derive(Debug, Clone)]
pub struct PersistentStore<B> {
    backend: B,
}

impl<B: StorageBackend> PersistentStore<B> {
    /// Wrap `backend`.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
        }
    }

    /// The wrapped backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Serialize `value` and store it under the document's key. Returns
    /// whether the write landed.
    pub fn write<T: Serialize + ?Sized>(&self, kind: DocumentKind, value: &T) -> bool {
        self.write_json(&kind.storage_key(), value)
    }

    /// Previously written document, or `None` if it was never written, the
    /// backend failed, or the stored text no longer parses.
    pub fn read<T: DeserializeOwned>(&self, kind: DocumentKind) -> Option<T> {
        self.read_json(&kind.storage_key())
    }

    /// Drop the stored document so the next load reseeds it.
    pub fn clear(&self, kind: DocumentKind) {
        self.remove(&kind.storage_key());
    }

    /// Persist a login across restarts.
    pub fn write_session(&self, user: &User) {
        if let Err(err) = self.backend.set_item(SESSION_FLAG_KEY, "true") {
            tracing::warn!("failed to persist session flag: {err}");
            return;
        }
        self.write_json(SESSION_USER_KEY, user);
    }

    /// The persisted user if both session keys are present and valid.
    pub fn read_session(&self) -> Option<User> {
        let flag = match self.backend.get_item(SESSION_FLAG_KEY) {
            Ok(flag) => flag,
            Err(err) => {
                tracing::warn!("failed to read session flag: {err}");
                return None;
            },
        };
        if flag.as_deref() != Some("true") {
            return None;
        }
        self.read_json(SESSION_USER_KEY)
    }

    /// Forget the persisted login.
    pub fn clear_session(&self) {
        self.remove(SESSION_FLAG_KEY);
        self.remove(SESSION_USER_KEY);
    }

    fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> bool {
        let text = match serde_json::to_string(value) {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!("failed to encode `{key}` for storage: {err}");
                return false;
            },
        };
        match self.backend.set_item(key, &text) {
            Ok(()) => {
                tracing::debug!(key, bytes = text.len(), "persisted document");
                true
            },
            Err(err) => {
                tracing::warn!("failed to persist `{key}`: {err}");
                false
            },
        }
    }

    fn read_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let text = match self.backend.get_item(key) {
            Ok(Some(text)) => text,
            Ok(None) => return None,
            Err(err) => {
                tracing::warn!("failed to read `{key}` from storage: {err}");
                return None;
            },
        };
        match serde_json::from_str(&text) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!("ignoring corrupt `{key}` in storage: {err}");
                None
            },
        }
    }

    fn remove(&self, key: &str) {
        if let Err(err) = self.backend.remove_item(key) {
            tracing::warn!("failed to remove `{key}` from storage: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{models::Article, reducer::tests::sample_article, reducer::tests::sample_user};

    #[test]
    fn write_then_read_uses_namespaced_key() {
        let backend = MemoryBackend::new();
        let store = PersistentStore::new(backend.clone());
        assert!(store.write(DocumentKind::Articles, &vec![sample_article("1")]));
        assert_eq!(backend.keys(), vec!["blog_articles".to_string()]);

        let articles: Vec<Article> = store.read(DocumentKind::Articles).expect("stored articles");
        assert_eq!(articles[0].id, "1");
    }

    #[test]
    fn missing_and_corrupt_documents_read_as_absent() {
        let backend = MemoryBackend::new();
        let store = PersistentStore::new(backend.clone());
        assert!(store.read::<Vec<Article>>(DocumentKind::Articles).is_none());

        backend
            .set_item("blog_articles", "{not json")
            .expect("raw write");
        assert!(store.read::<Vec<Article>>(DocumentKind::Articles).is_none());
    }

    #[test]
    fn quota_failure_is_reported_as_not_written() {
        let backend = MemoryBackend::with_quota(8);
        let store = PersistentStore::new(backend.clone());
        assert!(!store.write(DocumentKind::Articles, &vec![sample_article("1")]));
        assert!(backend.raw("blog_articles").is_none());
    }

    #[test]
    fn session_requires_both_keys() {
        let backend = MemoryBackend::new();
        let store = PersistentStore::new(backend.clone());
        store.write_session(&sample_user("admin"));
        assert_eq!(backend.raw(SESSION_FLAG_KEY).as_deref(), Some("true"));
        assert_eq!(store.read_session().map(|u| u.username), Some("admin".to_string()));

        backend.remove_item(SESSION_FLAG_KEY).expect("remove flag");
        assert!(store.read_session().is_none());

        store.write_session(&sample_user("admin"));
        store.clear_session();
        assert!(backend.keys().is_empty());
    }

    #[test]
    fn file_backend_persists_across_instances() {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = PersistentStore::new(FileBackend::new(dir.path()));
        assert!(store.write(DocumentKind::Users, &vec![sample_user("admin")]));

        let reopened = PersistentStore::new(FileBackend::new(dir.path()));
        let users: Vec<User> = reopened.read(DocumentKind::Users).expect("users on disk");
        assert_eq!(users.len(), 1);
        assert!(dir.path().join("blog_users.json").exists());

        reopened.clear(DocumentKind::Users);
        reopened.clear(DocumentKind::Users);
        assert!(reopened.read::<Vec<User>>(DocumentKind::Users).is_none());
    }
}
