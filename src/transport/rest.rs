use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderValue};
use reqwest::{Client, RequestBuilder, Response};
use serde_json::Value;
use std::time::Duration;
use url::Url;

use crate::error::{Error, Result};
use crate::protocol::models::{SessionCreateRequest, SessionUpdateRequest};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1/realtime";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(90);
const LOG_BODY_MAX_BYTES: usize = 1024;

/// The slice of the upstream session API the gateway depends on.
///
/// Responses are relayed as opaque JSON; nothing here interprets them.
#[async_trait]
pub trait SessionApi: Send + Sync {
    /// # Errors
    /// Returns an error if the request fails or the upstream answers with a non-success status.
    async fn create_session(&self, request: &SessionCreateRequest<'_>) -> Result<Value>;

    /// # Errors
    /// Returns an error if the request fails or the upstream answers with a non-success status.
    async fn update_session(&self, session_id: &str, request: &SessionUpdateRequest<'_>) -> Result<Value>;
}

/// An adapter for the `OpenAI` Realtime session REST API.
///
/// Every call is a single request bounded by the client timeout; nothing is retried.
#[derive(Clone, Debug)]
pub struct RealtimeRestAdapter {
    client: Client,
    auth_header: Option<HeaderValue>,
    base_url: Url,
}

impl RealtimeRestAdapter {
    /// Create a new adapter against the public API.
    ///
    /// A missing key is not an error here: the adapter refuses calls instead,
    /// so the process can still start and serve its static surface.
    ///
    /// # Errors
    /// Returns an error if the API key results in an invalid header or client build fails.
    pub fn new(api_key: Option<&str>) -> Result<Self> {
        Self::new_with_options(api_key, DEFAULT_BASE_URL, DEFAULT_TIMEOUT)
    }

    /// # Errors
    /// Returns an error if the base URL does not parse, the API key results in an
    /// invalid header, or the client build fails.
    pub fn new_with_options(api_key: Option<&str>, base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .pool_idle_timeout(DEFAULT_POOL_IDLE_TIMEOUT)
            .build()?;

        let auth_header = api_key
            .map(|key| HeaderValue::from_str(&format!("Bearer {key}")))
            .transpose()?;

        Ok(Self {
            client,
            auth_header,
            base_url: parse_base_url(base_url)?,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    fn authorize(&self, builder: RequestBuilder) -> Result<RequestBuilder> {
        let header = self.auth_header.as_ref().ok_or(Error::MissingApiKey)?;
        Ok(builder.header(AUTHORIZATION, header))
    }

    async fn relay(res: Response) -> Result<Value> {
        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            tracing::error!(%status, body = %truncate(&body, LOG_BODY_MAX_BYTES), "OpenAI API error");
            return Err(Error::Upstream { status, body });
        }
        Ok(res.json().await?)
    }
}

#[async_trait]
impl SessionApi for RealtimeRestAdapter {
    async fn create_session(&self, request: &SessionCreateRequest<'_>) -> Result<Value> {
        let url = self.endpoint("sessions")?;
        tracing::debug!(%url, model = %request.model, "creating realtime session");

        let res = self
            .authorize(self.client.post(url))?
            .json(request)
            .send()
            .await?;

        Self::relay(res).await
    }

    async fn update_session(&self, session_id: &str, request: &SessionUpdateRequest<'_>) -> Result<Value> {
        // `join` would let a crafted id escape the sessions collection.
        let mut url = self.endpoint("sessions/")?;
        url.path_segments_mut()
            .map_err(|()| Error::Config("base URL cannot be a base".to_string()))?
            .pop_if_empty()
            .push(session_id);
        tracing::debug!(%url, "updating realtime session");

        let res = self
            .authorize(self.client.patch(url))?
            .json(request)
            .send()
            .await?;

        Self::relay(res).await
    }
}

/// Parses the base URL so that relative joins append to it.
fn parse_base_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw)?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn truncate(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gets_trailing_slash() {
        let url = parse_base_url("https://api.openai.com/v1/realtime").unwrap();
        assert_eq!(
            url.join("sessions").unwrap().as_str(),
            "https://api.openai.com/v1/realtime/sessions"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        assert!(matches!(parse_base_url("not a url"), Err(Error::Url(_))));
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("héllo", 2), "h");
        assert_eq!(truncate("abc", 10), "abc");
    }
}
