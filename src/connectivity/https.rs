use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;

use super::Reachability;

/// Reachability over a plain HTTPS GET. Any response counts, whatever its
/// status; only transport errors mean unreachable.
#[derive(Debug, Clone)]
pub struct HttpsReachability {
    client: reqwest::Client,
}

impl HttpsReachability {
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .user_agent(format!("update-full/{}", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to create HTTP client")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Reachability for HttpsReachability {
    async fn check(&self, host: &str) -> Result<()> {
        let url = format!("https://{}", host);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("GET {} failed", url))?;
        // Drain the body so the request completes; its content is irrelevant
        let _ = response.bytes().await;
        Ok(())
    }
}
