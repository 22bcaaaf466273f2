//! Seed documents: the read-only JSON used to initialize a slice when the
//! persistent store has nothing for it.

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::models::DocumentKind;

/// Why a seed document could not be obtained.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    /// Transport or I/O failure.
    #[error("failed to fetch seed `{kind}`: {message}")]
    Fetch {
        /// Document being fetched.
        kind: DocumentKind,
        /// Underlying error text.
        message: String,
    },
    /// The server answered with a non-success status.
    #[error("seed `{kind}` answered with HTTP {status}")]
    Status {
        /// Document being fetched.
        kind: DocumentKind,
        /// HTTP status code.
        status: u16,
    },
    /// The body is not the expected JSON shape.
    #[error("seed `{kind}` is not valid JSON: {source}")]
    Parse {
        /// Document being parsed.
        kind: DocumentKind,
        /// Decoder error.
        #[source]
        source: serde_json::Error,
    },
}

impl SeedError {
    /// Document the failure belongs to.
    pub fn kind(&self) -> DocumentKind {
        match self {
            SeedError::Fetch { kind, .. }
            | SeedError::Status { kind, .. }
            | SeedError::Parse { kind, .. } => *kind,
        }
    }
}

/// Where seed documents come from. Futures are `?Send` so the same trait
/// serves the browser fetcher.
#[async_trait(?Send)]
pub trait SeedSource {
    /// Raw JSON text of one seed document.
    async fn fetch(&self, kind: DocumentKind) -> Result<String, SeedError>;
}

#[async_trait(?Send)]
impl<S: SeedSource + ?Sized> SeedSource for std::rc::Rc<S> {
    async fn fetch(&self, kind: DocumentKind) -> Result<String, SeedError> {
        (**self).fetch(kind).await
    }
}

/// Fetch a seed document and parse it as `T`.
pub async fn fetch_document<S, T>(source: &S, kind: DocumentKind) -> Result<T, SeedError>
where
    S: SeedSource + ?Sized,
    T: DeserializeOwned,
{
    let text = source.fetch(kind).await?;
    serde_json::from_str(&text).map_err(|source| SeedError::Parse {
        kind,
        source,
    })
}

/// The `data/*.json` documents compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledSeeds;

impl BundledSeeds {
    /// Compiled-in JSON text for `kind`.
    pub fn text(kind: DocumentKind) -> &'static str {
        match kind {
            DocumentKind::Articles => include_str!("../../data/articles.json"),
            DocumentKind::Comments => include_str!("../../data/comments.json"),
            DocumentKind::Users => include_str!("../../data/users.json"),
            DocumentKind::Config => include_str!("../../data/config.json"),
            DocumentKind::Stats => include_str!("../../data/stats.json"),
        }
    }
}

#[async_trait(?Send)]
impl SeedSource for BundledSeeds {
    async fn fetch(&self, kind: DocumentKind) -> Result<String, SeedError> {
        Ok(Self::text(kind).to_string())
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use dir::DirSeedSource;

#[cfg(not(target_arch = "wasm32"))]
mod dir {
    use std::path::PathBuf;

    use async_trait::async_trait;

    use super::{SeedError, SeedSource};
    use crate::models::DocumentKind;

    /// Reads `<dir>/<kind>.json` from disk.
    #[derive(Debug, Clone)]
    pub struct DirSeedSource {
        dir: PathBuf,
    }

    impl DirSeedSource {
        /// Source rooted at `dir`.
        pub fn new(dir: impl Into<PathBuf>) -> Self {
            Self {
                dir: dir.into(),
            }
        }
    }

    #[async_trait(?Send)]
    impl SeedSource for DirSeedSource {
        async fn fetch(&self, kind: DocumentKind) -> Result<String, SeedError> {
            let path = self.dir.join(kind.seed_file());
            tokio::fs::read_to_string(&path)
                .await
                .map_err(|err| SeedError::Fetch {
                    kind,
                    message: format!("{}: {err}", path.display()),
                })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Article, Comment, SiteConfig, Stats, User};

    #[tokio::test]
    async fn bundled_seeds_parse_as_typed_documents() {
        let seeds = BundledSeeds;
        let articles: Vec<Article> = fetch_document(&seeds, DocumentKind::Articles)
            .await
            .expect("articles seed");
        assert!(!articles.is_empty());
        let _: Vec<Comment> = fetch_document(&seeds, DocumentKind::Comments)
            .await
            .expect("comments seed");
        let users: Vec<User> = fetch_document(&seeds, DocumentKind::Users)
            .await
            .expect("users seed");
        assert!(users.iter().any(|u| u.username == "admin"));
        let _: SiteConfig = fetch_document(&seeds, DocumentKind::Config)
            .await
            .expect("config seed");
        let _: Stats = fetch_document(&seeds, DocumentKind::Stats)
            .await
            .expect("stats seed");
    }

    #[tokio::test]
    async fn dir_source_reports_missing_file_as_fetch_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let source = DirSeedSource::new(dir.path());
        let err = source
            .fetch(DocumentKind::Stats)
            .await
            .expect_err("no stats.json");
        assert!(matches!(err, SeedError::Fetch { kind: DocumentKind::Stats, .. }));
    }

    #[tokio::test]
    async fn invalid_json_is_a_parse_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        std::fs::write(dir.path().join("users.json"), "[{").expect("write seed");
        let source = DirSeedSource::new(dir.path());
        let err = fetch_document::<_, Vec<User>>(&source, DocumentKind::Users)
            .await
            .expect_err("broken seed");
        assert_eq!(err.kind(), DocumentKind::Users);
        assert!(matches!(err, SeedError::Parse { .. }));
    }
}
