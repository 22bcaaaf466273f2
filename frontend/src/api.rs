use async_trait::async_trait;
use gloo_net::http::Request;
use localflow_shared::{DocumentKind, SeedError, SeedSource};

use crate::config::SEED_BASE;

/// Seed documents served next to the app as static JSON.
#[derive(Debug, Clone)]
pub struct FetchSeedSource {
    base: String,
}

impl FetchSeedSource {
    pub fn new() -> Self {
        Self::with_base(SEED_BASE)
    }

    pub fn with_base(base: &str) -> Self {
        let base = if base.ends_with('/') { base.to_string() } else { format!("{base}/") };
        Self {
            base,
        }
    }

    pub fn document_url(&self, kind: DocumentKind) -> String {
        format!("{}data/{}", self.base, kind.seed_file())
    }
}

#[async_trait(?Send)]
impl SeedSource for FetchSeedSource {
    async fn fetch(&self, kind: DocumentKind) -> Result<String, SeedError> {
        let url = self.document_url(kind);
        let response = Request::get(&url)
            .header("Cache-Control", "no-cache")
            .send()
            .await
            .map_err(|e| SeedError::Fetch {
                kind,
                message: format!("Network error: {:?}", e),
            })?;

        if !response.ok() {
            return Err(SeedError::Status {
                kind,
                status: response.status(),
            });
        }

        response.text().await.map_err(|e| SeedError::Fetch {
            kind,
            message: format!("Read error: {:?}", e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_urls_live_under_data() {
        let seeds = FetchSeedSource::with_base("/blog");
        assert_eq!(seeds.document_url(DocumentKind::Articles), "/blog/data/articles.json");
        let seeds = FetchSeedSource::with_base("https://cdn.example.com/");
        assert_eq!(seeds.document_url(DocumentKind::Config), "https://cdn.example.com/data/config.json");
    }
}
