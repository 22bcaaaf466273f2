use std::{
    env,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{Context, Result};
use localflow_shared::{
    seed::{fetch_document, DirSeedSource},
    Article, Comment, DocumentKind, SiteConfig, Stats, User,
};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub bind_addr: String,
    /// Directory holding `<kind>.json` for every seed document.
    pub seed_dir: PathBuf,
    /// Compiled frontend; served at `/` with an `index.html` fallback.
    pub frontend_dist: Option<PathBuf>,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        let port = match env::var("PORT") {
            Ok(port) => port.parse().with_context(|| format!("invalid PORT `{port}`"))?,
            Err(_) => 3000,
        };
        Ok(Self {
            port,
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0".to_string()),
            seed_dir: env::var_os("SEED_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("./data")),
            frontend_dist: env::var_os("FRONTEND_DIST")
                .filter(|dir| !dir.is_empty())
                .map(PathBuf::from),
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

/// Document sizes found by the startup check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedSummary {
    pub articles: usize,
    pub comments: usize,
    pub users: usize,
}

/// Parse every seed document as its typed shape; the server refuses to
/// start on a missing or malformed one.
pub async fn validate_seeds(dir: &Path) -> Result<SeedSummary> {
    let source = DirSeedSource::new(dir);
    let articles: Vec<Article> = fetch_document(&source, DocumentKind::Articles).await?;
    let comments: Vec<Comment> = fetch_document(&source, DocumentKind::Comments).await?;
    let users: Vec<User> = fetch_document(&source, DocumentKind::Users).await?;
    let _: SiteConfig = fetch_document(&source, DocumentKind::Config).await?;
    let _: Stats = fetch_document(&source, DocumentKind::Stats).await?;
    Ok(SeedSummary {
        articles: articles.len(),
        comments: comments.len(),
        users: users.len(),
    })
}

#[derive(Clone)]
pub struct AppState {
    seed_dir: Arc<PathBuf>,
    frontend_dist: Option<Arc<PathBuf>>,
    summary: SeedSummary,
}

impl AppState {
    pub async fn new(config: &ServerConfig) -> Result<Self> {
        let summary = validate_seeds(&config.seed_dir)
            .await
            .with_context(|| format!("invalid seed directory {}", config.seed_dir.display()))?;

        Ok(Self {
            seed_dir: Arc::new(config.seed_dir.clone()),
            frontend_dist: config.frontend_dist.clone().map(Arc::new),
            summary,
        })
    }

    pub fn seed_dir(&self) -> &Path {
        &self.seed_dir
    }

    pub fn frontend_dist(&self) -> Option<&Path> {
        self.frontend_dist.as_deref().map(PathBuf::as_path)
    }

    pub fn summary(&self) -> SeedSummary {
        self.summary
    }
}
