//! Remote POM retrieval with integrity checking.
//!
//! Descriptors are fetched from a Maven-layout repository, verified against
//! their published `.sha1` companion, and only then decoded.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use sha1::{Digest, Sha1};
use tracing::{debug, warn};

use crate::error::{Result, ScanError};
use crate::pom::Project;

const DEFAULT_USER_AGENT: &str = "javelin-scan/0.1";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_MAX_RETRIES: u32 = 3;
const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(1);

#[derive(Debug, Clone)]
pub struct PomRepositoryConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub max_retries: u32,
    pub retry_delay: Duration,
    pub user_agent: String,
}

impl Default for PomRepositoryConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay: DEFAULT_RETRY_DELAY,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl PomRepositoryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    pub fn with_user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = user_agent;
        self
    }
}

/// A remote Maven-layout repository serving POM descriptors.
pub struct PomRepository {
    base_url: String,
    client: Client,
    max_retries: u32,
    retry_delay: Duration,
}

impl PomRepository {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_config(base_url, PomRepositoryConfig::default())
    }

    pub fn with_config(base_url: impl Into<String>, config: PomRepositoryConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(config.user_agent.as_str())
            .build()?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
            max_retries: config.max_retries,
            retry_delay: config.retry_delay,
        })
    }

    /// The repository URL of an artifact's POM descriptor.
    pub fn pom_url(&self, group_id: &str, artifact_id: &str, version: &str) -> String {
        let group_path = group_id.replace('.', "/");
        format!(
            "{}/{}/{}/{}/{}-{}.pom",
            self.base_url, group_path, artifact_id, version, artifact_id, version
        )
    }

    /// Fetch and decode a POM descriptor, verifying its SHA-1 against the
    /// repository's companion checksum resource first.
    pub async fn fetch(&self, group_id: &str, artifact_id: &str, version: &str) -> Result<Project> {
        let url = self.pom_url(group_id, artifact_id, version);
        debug!(%url, "fetching POM descriptor");
        let body = self.get_bytes(&url).await?;

        let digest_text = self.get_text(&format!("{url}.sha1")).await?;
        let expected = digest_text
            .split_whitespace()
            .next()
            .unwrap_or("")
            .to_string();
        let actual = sha1_hex(&body);
        if !actual.eq_ignore_ascii_case(&expected) {
            return Err(ScanError::ChecksumMismatch {
                url,
                expected,
                actual,
            });
        }

        let text = String::from_utf8_lossy(&body);
        Ok(quick_xml::de::from_str(&text)?)
    }

    async fn get_bytes(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.get(url).await?;
        Ok(response.bytes().await?.to_vec())
    }

    async fn get_text(&self, url: &str) -> Result<String> {
        let response = self.get(url).await?;
        Ok(response.text().await?)
    }

    /// GET with bounded retries; server errors and rate limits back off
    /// exponentially, other client errors fail immediately.
    async fn get(&self, url: &str) -> Result<reqwest::Response> {
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            match self.client.get(url).send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return Ok(response);
                    }
                    if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
                        warn!(%status, url, "retrying after server error");
                        last_error = Some(ScanError::HttpStatus {
                            status: status.as_u16(),
                            url: url.to_string(),
                        });
                    } else {
                        return Err(ScanError::HttpStatus {
                            status: status.as_u16(),
                            url: url.to_string(),
                        });
                    }
                }
                Err(error) => {
                    last_error = Some(error.into());
                }
            }

            if attempt < self.max_retries {
                let delay = self.retry_delay * 2_u32.pow(attempt);
                tokio::time::sleep(delay).await;
            }
        }

        match last_error {
            Some(error) => Err(error),
            None => Err(ScanError::MaxRetries {
                url: url.to_string(),
            }),
        }
    }
}

/// Hex-encoded SHA-1 of a byte buffer.
pub fn sha1_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha1::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}
