use std::time::Duration;

use engine_logging::{engine_debug, engine_trace};
use futures_util::StreamExt;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::wire::{CandidateRecord, DetailParams, DetailResponse, ProfileRecord, SearchParams};
use crate::{FailureKind, FetchError};

const SEARCH_PATH: &str = "search-linkedin";
const DETAIL_PATH: &str = "profile-details";
const HEALTH_PATH: &str = "health";
const JSON: &str = "application/json";

#[derive(Debug, Clone)]
pub struct ServiceSettings {
    pub base_url: Url,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_response_bytes: u64,
}

impl ServiceSettings {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_response_bytes: 1024 * 1024,
        }
    }

    /// Parses `base_url` and applies default timeouts and limits.
    pub fn parse(base_url: &str) -> Result<Self, FetchError> {
        let base_url = Url::parse(base_url.trim())
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(FetchError::new(
                FailureKind::InvalidUrl,
                format!("unsupported scheme {}", base_url.scheme()),
            ));
        }
        Ok(Self::new(base_url))
    }

    /// Resolves an endpoint below the base url, keeping any path prefix.
    fn endpoint(&self, path: &str) -> Result<Url, FetchError> {
        let mut base = self.base_url.clone();
        if !base.path().ends_with('/') {
            let with_slash = format!("{}/", base.path());
            base.set_path(&with_slash);
        }
        base.join(path)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))
    }
}

/// The remote profile service. Implementations resolve to a payload or a
/// `FetchError`; they never retry.
#[async_trait::async_trait]
pub trait ProfileService: Send + Sync {
    async fn search(&self, params: &SearchParams) -> Result<Vec<CandidateRecord>, FetchError>;

    async fn profile_details(&self, linkedin_url: &str) -> Result<ProfileRecord, FetchError>;

    async fn health(&self) -> Result<(), FetchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestProfileService {
    settings: ServiceSettings,
    client: reqwest::Client,
}

impl ReqwestProfileService {
    pub fn new(settings: ServiceSettings) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    pub fn settings(&self) -> &ServiceSettings {
        &self.settings
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, FetchError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned + Send,
    {
        let url = self.settings.endpoint(path)?;
        let payload = serde_json::to_vec(body)
            .map_err(|err| FetchError::new(FailureKind::InvalidRequest, err.to_string()))?;
        engine_debug!("POST {} ({} bytes)", url, payload.len());

        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, JSON)
            .header(ACCEPT, JSON)
            .body(payload)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let bytes = self.read_body(response).await?;
        serde_json::from_slice(&bytes)
            .map_err(|err| FetchError::new(FailureKind::MalformedResponse, err.to_string()))
    }

    /// Checks the status and reads the body, enforcing the size limit.
    async fn read_body(&self, response: reqwest::Response) -> Result<Vec<u8>, FetchError> {
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let max_bytes = self.settings.max_response_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            bytes.extend_from_slice(&chunk);
        }
        engine_trace!("Read {} response bytes", bytes.len());
        Ok(bytes)
    }
}

#[async_trait::async_trait]
impl ProfileService for ReqwestProfileService {
    async fn search(&self, params: &SearchParams) -> Result<Vec<CandidateRecord>, FetchError> {
        self.post_json(SEARCH_PATH, params).await
    }

    async fn profile_details(&self, linkedin_url: &str) -> Result<ProfileRecord, FetchError> {
        let raw: DetailResponse = self
            .post_json(DETAIL_PATH, &DetailParams { linkedin_url })
            .await?;
        Ok(raw.into())
    }

    async fn health(&self) -> Result<(), FetchError> {
        let url = self.settings.endpoint(HEALTH_PATH)?;
        engine_debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .header(ACCEPT, JSON)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        self.read_body(response).await.map(|_| ())
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return FetchError::new(FailureKind::MalformedResponse, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::ServiceSettings;
    use crate::FailureKind;

    #[test]
    fn endpoint_keeps_base_path_prefix() {
        let settings = ServiceSettings::parse("http://localhost:8000/api").unwrap();
        let url = settings.endpoint("search-linkedin").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/search-linkedin");

        let settings = ServiceSettings::parse("http://localhost:8000").unwrap();
        let url = settings.endpoint("health").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/health");
    }

    #[test]
    fn rejects_non_http_base() {
        let err = ServiceSettings::parse("ftp://example.com").unwrap_err();
        assert_eq!(err.kind, FailureKind::InvalidUrl);
        let err = ServiceSettings::parse("not a url").unwrap_err();
        assert_eq!(err.kind, FailureKind::InvalidUrl);
    }
}
