use std::collections::HashMap;
use std::io::Read;
use std::time::Duration;

use tracing::{debug, warn};

use crate::error::{DictError, DictResult};

const REQUEST_TIMEOUT_SECS: u64 = 60;
const MAX_RETRIES: usize = 3;
const RETRY_BASE_DELAY_MS: u64 = 500;

/// Provider of raw dictionary lines, one record per line.
pub trait DictSource {
    /// Fetch every line of the named source file, without line terminators.
    fn fetch_lines(&self, source: &str) -> DictResult<Vec<String>>;
}

/// Fetches sources over HTTP as `{base_url}{source}`.
pub struct HttpDictSource {
    base_url: String,
    agent: ureq::Agent,
}

impl HttpDictSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            agent: build_agent(),
        }
    }

    pub fn url_for(&self, source: &str) -> String {
        format!("{}{}", self.base_url, source)
    }

    fn download_with_retry(&self, url: &str) -> DictResult<Vec<u8>> {
        let mut attempt = 0;
        loop {
            debug!(url, attempt, "fetching dictionary");
            match self.agent.get(url).call() {
                Ok(response) => {
                    let mut reader = response.into_body().into_reader();
                    let mut bytes = Vec::new();
                    reader.read_to_end(&mut bytes).map_err(|e| DictError::Fetch {
                        url: url.to_string(),
                        message: e.to_string(),
                    })?;
                    return Ok(bytes);
                }
                Err(e) if attempt + 1 < MAX_RETRIES && is_retryable_error(&e) => {
                    warn!(url, attempt, error = %e, "fetch failed; retrying");
                    sleep_backoff(attempt);
                    attempt += 1;
                }
                Err(e) => {
                    return Err(DictError::Fetch {
                        url: url.to_string(),
                        message: e.to_string(),
                    })
                }
            }
        }
    }
}

impl DictSource for HttpDictSource {
    fn fetch_lines(&self, source: &str) -> DictResult<Vec<String>> {
        let url = self.url_for(source);
        let bytes = self.download_with_retry(&url)?;
        let text = String::from_utf8(bytes).map_err(|_| DictError::Decode {
            source_name: source.to_string(),
        })?;
        Ok(text.lines().map(str::to_string).collect())
    }
}

fn build_agent() -> ureq::Agent {
    let config = ureq::Agent::config_builder()
        .timeout_global(Some(Duration::from_secs(REQUEST_TIMEOUT_SECS)))
        .build();
    config.into()
}

fn is_retryable_error(e: &ureq::Error) -> bool {
    match e {
        ureq::Error::Timeout(_)
        | ureq::Error::Io(_)
        | ureq::Error::ConnectionFailed
        | ureq::Error::HostNotFound => true,
        ureq::Error::StatusCode(code) => matches!(code, 429 | 500 | 502 | 503 | 504),
        _ => false,
    }
}

fn sleep_backoff(attempt: usize) {
    let delay_ms = RETRY_BASE_DELAY_MS.saturating_mul(1u64 << attempt);
    std::thread::sleep(Duration::from_millis(delay_ms));
}

/// In-memory sources keyed by name.
#[derive(Clone, Debug, Default)]
pub struct StaticDictSource {
    files: HashMap<String, String>,
}

impl StaticDictSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `text` as the content of `source`.
    pub fn with(mut self, source: impl Into<String>, text: impl Into<String>) -> Self {
        self.files.insert(source.into(), text.into());
        self
    }
}

impl DictSource for StaticDictSource {
    fn fetch_lines(&self, source: &str) -> DictResult<Vec<String>> {
        let text = self
            .files
            .get(source)
            .ok_or_else(|| DictError::UnknownSource(source.to_string()))?;
        Ok(text.lines().map(str::to_string).collect())
    }
}
