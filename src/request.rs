//! HTTP request construction against the upstream API.
//!
//! [`ApiClient`] owns the `reqwest` client and the fixed, browser-like header
//! set the upstream expects. It performs no retries and enforces no deadline
//! of its own; the timeout configured on [`ApiConfig`](crate::config::ApiConfig)
//! is applied by the underlying transport.

use reqwest::{
    Client, Response,
    header::{ACCEPT, ACCEPT_LANGUAGE, CACHE_CONTROL, COOKIE, HeaderMap, HeaderValue, ORIGIN,
        REFERER},
};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::{
    config::ApiConfig,
    error::{OpenwhydError, Result},
};

pub struct ApiClient {
    client: Client,
    config: ApiConfig,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Result<Self> {
        let mut builder = Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(default_headers(&config));
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            config,
        })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.api_url, path)
    }

    /// Issues a GET request. Query pairs are percent-encoded; an optional
    /// session cookie is attached as a `Cookie` header.
    pub async fn get(
        &self,
        path: &str,
        query: &[(&str, &str)],
        cookie: Option<&str>,
    ) -> Result<Response> {
        let url = self.url(path);
        debug!("GET {url}");

        let mut request = self.client.get(&url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(cookie) = cookie {
            request = request.header(COOKIE, cookie);
        }

        Ok(request.send().await?)
    }

    /// Issues a POST request with an `application/x-www-form-urlencoded`
    /// body; both keys and values are percent-encoded.
    pub async fn post_form(
        &self,
        path: &str,
        form: &[(&str, String)],
        cookie: Option<&str>,
    ) -> Result<Response> {
        let url = self.url(path);
        debug!("POST {url}");

        let mut request = self.client.post(&url).form(form);
        if let Some(cookie) = cookie {
            request = request.header(COOKIE, cookie);
        }

        Ok(request.send().await?)
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        cookie: Option<&str>,
    ) -> Result<T> {
        let response = self.get(path, query, cookie).await?;
        decode(response).await
    }

    pub async fn post_form_json<T: DeserializeOwned>(
        &self,
        path: &str,
        form: &[(&str, String)],
        cookie: Option<&str>,
    ) -> Result<T> {
        let response = self.post_form(path, form, cookie).await?;
        decode(response).await
    }
}

/// Reads a response body and decodes it, mapping HTTP error statuses to
/// [`OpenwhydError::Transport`] and undecodable bodies to
/// [`OpenwhydError::Parse`].
pub(crate) async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let response = response.error_for_status()?;
    let body = response.text().await?;

    serde_json::from_str(&body).map_err(|e| {
        warn!("failed to parse upstream response: {e}");
        OpenwhydError::Parse(e)
    })
}

fn default_headers(config: &ApiConfig) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,image/apng,*/*;q=0.8",
        ),
    );
    headers.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_static("en-US,en;q=0.8,fr;q=0.6"),
    );
    headers.insert("Upgrade-Insecure-Requests", HeaderValue::from_static("1"));
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("max-age=0"));
    if let Ok(origin) = HeaderValue::from_str(&config.api_url) {
        headers.insert(ORIGIN, origin);
    }
    if let Ok(referer) = HeaderValue::from_str(&format!("{}/login?action=logout", config.api_url)) {
        headers.insert(REFERER, referer);
    }
    headers
}
