use std::sync::Arc;

use reqwest::{RequestBuilder, Response, cookie::Jar};
use serde::{Serialize, de::DeserializeOwned};
use url::Url;

use crate::{
    api::error::{ApiError, ApiResult},
    config,
};

/// HTTP client for the exam-prep API.
///
/// Every request carries the session cookie (and any cookie the server sets
/// later). Non-2xx responses become [`ApiError::Http`].
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(config: &config::Api) -> ApiResult<Self> {
        let mut base_url = Url::parse(config.base_url())?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let jar = Jar::default();
        if let Some(cookie) = config.session_cookie() {
            for pair in cookie.split(';').map(str::trim).filter(|p| !p.is_empty()) {
                if !pair.contains('=') {
                    return Err(ApiError::InvalidCookie);
                }
                jar.add_cookie_str(pair, &base_url);
            }
        }

        let http = reqwest::Client::builder()
            .cookie_provider(Arc::new(jar))
            .timeout(config.timeout())
            .build()
            .map_err(ApiError::Client)?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, path: &str) -> ApiResult<Url> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    async fn send(&self, req: RequestBuilder) -> ApiResult<Response> {
        let resp = req.send().await.map_err(ApiError::Network)?;
        let status = resp.status();

        if !status.is_success() {
            let reason = || status.canonical_reason().unwrap_or_default().to_string();
            let body = match resp.text().await {
                Ok(body) if !body.is_empty() => body,
                Ok(_) => reason(),
                Err(e) => {
                    tracing::debug!(status = status.as_u16(), "unable to read error body: {e}");
                    reason()
                }
            };

            tracing::debug!(status = status.as_u16(), "api request failed");
            return Err(ApiError::Http {
                status: status.as_u16(),
                body,
            });
        }

        Ok(resp)
    }

    async fn decode<T: DeserializeOwned>(resp: Response) -> ApiResult<T> {
        let bytes = resp.bytes().await.map_err(ApiError::Network)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let req = self.http.get(self.url(path)?);
        let resp = self.send(req).await?;
        Self::decode(resp).await
    }

    #[tracing::instrument(skip(self, body))]
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let req = self.http.post(self.url(path)?).json(body);
        let resp = self.send(req).await?;
        Self::decode(resp).await
    }

    /// POST without a body; only the status matters.
    #[tracing::instrument(skip(self))]
    pub async fn post_empty(&self, path: &str) -> ApiResult<()> {
        let req = self.http.post(self.url(path)?);
        self.send(req).await?;
        Ok(())
    }

    /// POST without a body, decoding the response.
    #[tracing::instrument(skip(self))]
    pub async fn post_for<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let req = self.http.post(self.url(path)?);
        let resp = self.send(req).await?;
        Self::decode(resp).await
    }
}
