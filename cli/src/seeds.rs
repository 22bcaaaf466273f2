//! Where the CLI fetches seed documents from.

use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use localflow_shared::{
    seed::DirSeedSource, BundledSeeds, DocumentKind, SeedError, SeedSource,
};
use url::Url;

/// Seed server client: `GET <base>/data/<kind>.json`.
#[derive(Debug, Clone)]
pub struct HttpSeedSource {
    client: reqwest::Client,
    base: Url,
}

impl HttpSeedSource {
    /// Client for the server at `base`; a trailing `/` is added if missing.
    pub fn new(base: &str) -> Result<Self> {
        let mut base = Url::parse(base).with_context(|| format!("invalid seed url `{base}`"))?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self {
            client: reqwest::Client::new(),
            base,
        })
    }

    /// URL of one seed document.
    pub fn document_url(&self, kind: DocumentKind) -> Result<Url, url::ParseError> {
        self.base.join(&format!("data/{}", kind.seed_file()))
    }
}

#[async_trait(?Send)]
impl SeedSource for HttpSeedSource {
    async fn fetch(&self, kind: DocumentKind) -> Result<String, SeedError> {
        let fetch_err = |message: String| SeedError::Fetch {
            kind,
            message,
        };
        let url = self
            .document_url(kind)
            .map_err(|err| fetch_err(err.to_string()))?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| fetch_err(err.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(SeedError::Status {
                kind,
                status: status.as_u16(),
            });
        }
        response.text().await.map_err(|err| fetch_err(err.to_string()))
    }
}

/// The seed source selected on the command line.
#[derive(Debug, Clone)]
pub enum SeedChoice {
    /// Documents compiled into the binary.
    Bundled(BundledSeeds),
    /// `--seed-dir`.
    Dir(DirSeedSource),
    /// `--seed-url`.
    Http(HttpSeedSource),
}

impl SeedChoice {
    /// `--seed-dir` wins over `--seed-url`; bundled seeds otherwise.
    pub fn from_args(seed_dir: Option<PathBuf>, seed_url: Option<&str>) -> Result<Self> {
        match (seed_dir, seed_url) {
            (Some(dir), _) => Ok(SeedChoice::Dir(DirSeedSource::new(dir))),
            (None, Some(url)) => Ok(SeedChoice::Http(HttpSeedSource::new(url)?)),
            (None, None) => Ok(SeedChoice::Bundled(BundledSeeds)),
        }
    }
}

#[async_trait(?Send)]
impl SeedSource for SeedChoice {
    async fn fetch(&self, kind: DocumentKind) -> Result<String, SeedError> {
        match self {
            SeedChoice::Bundled(seeds) => seeds.fetch(kind).await,
            SeedChoice::Dir(seeds) => seeds.fetch(kind).await,
            SeedChoice::Http(seeds) => seeds.fetch(kind).await,
        }
    }
}
