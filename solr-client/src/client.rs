//! REST transport for the Solr API.
//!
//! Handles the GET, POST and DELETE exchanges with the Solr web service:
//! URL construction, header injection, status validation and retry of
//! transient failures.

use crate::config::SolrApiConfig;
use pride_common::{ApiError, ApiResult, RetryPolicy, build_http_client};
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method};
use secrecy::ExposeSecret;
use std::collections::HashMap;
use tracing::{debug, error};
use url::Url;

/// Status codes accepted for GET and POST exchanges.
const ACCEPTED_READ_WRITE: &[u16] = &[200, 201, 202];
/// Status codes accepted for DELETE exchanges.
const ACCEPTED_DELETE: &[u16] = &[204];

/// Name of the header carrying the calling application.
const APP_HEADER: &str = "app";

/// REST client for the Solr API.
///
/// One instance holds one [`reqwest::Client`]; its connection pool is
/// shared by all calls made through this transport. The instance is
/// immutable after construction and safe to share across tasks.
#[derive(Debug)]
pub struct SolrRestClient {
    base_url: String,
    headers: HeaderMap,
    http: Client,
    retry: RetryPolicy,
}

impl SolrRestClient {
    /// Create a new REST client from the given configuration.
    ///
    /// The base URL and header material are validated here, so every
    /// later request can assume a well-formed configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidConfig`] for an unparsable base URL or
    /// API key header, and [`ApiError::Http`] if the HTTP client cannot
    /// be built.
    pub fn new(config: SolrApiConfig) -> ApiResult<Self> {
        Url::parse(&config.base_url)
            .map_err(|e| ApiError::invalid_config(format!("invalid base URL: {e}")))?;
        let base_url = config.base_url.trim_end_matches('/').to_string();

        let headers = Self::prepare_headers(&config)?;
        let http = build_http_client(&config.http)?;

        Ok(Self {
            base_url,
            headers,
            http,
            retry: RetryPolicy::new(config.retry),
        })
    }

    fn prepare_headers(config: &SolrApiConfig) -> ApiResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("*/*"));

        let key_name = HeaderName::from_bytes(config.api_key_name.as_bytes())
            .map_err(|e| ApiError::invalid_config(format!("invalid API key header name: {e}")))?;
        let mut key_value = HeaderValue::from_str(config.api_key_value.expose_secret())
            .map_err(|e| ApiError::invalid_config(format!("invalid API key value: {e}")))?;
        key_value.set_sensitive(true);
        headers.insert(key_name, key_value);

        let app = HeaderValue::from_str(&config.app_name)
            .map_err(|e| ApiError::invalid_config(format!("invalid application name: {e}")))?;
        headers.insert(APP_HEADER, app);

        Ok(headers)
    }

    /// Perform a GET request and return the response body.
    ///
    /// `uri_params` are substituted into `{name}` placeholders in `path`;
    /// `query_params` are appended as repeated query-string entries.
    ///
    /// # Errors
    ///
    /// Fails with [`ApiError::UnexpectedStatus`] for statuses outside
    /// {200, 201, 202}, or with the last transient failure once retries
    /// are exhausted.
    pub async fn get(
        &self,
        path: &str,
        uri_params: Option<&HashMap<&str, &str>>,
        query_params: Option<&[(&str, &str)]>,
    ) -> ApiResult<String> {
        let url = self.build_url(path, uri_params, query_params)?;
        self.retry
            .execute(|| self.request(Method::GET, &url, None, None, ACCEPTED_READ_WRITE))
            .await
    }

    /// Perform a POST request with a JSON payload and return the response body.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`SolrRestClient::get`].
    pub async fn post(&self, path: &str, payload: &str) -> ApiResult<String> {
        self.post_with_token(path, payload, None).await
    }

    /// Perform a POST request carrying a bearer token.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`SolrRestClient::get`].
    pub async fn post_with_token(
        &self,
        path: &str,
        payload: &str,
        bearer_token: Option<&str>,
    ) -> ApiResult<String> {
        let url = self.build_url(path, None, None)?;
        self.retry
            .execute(|| {
                self.request(
                    Method::POST,
                    &url,
                    Some(payload),
                    bearer_token,
                    ACCEPTED_READ_WRITE,
                )
            })
            .await
    }

    /// Perform a DELETE request and return the response body.
    ///
    /// # Errors
    ///
    /// Fails with [`ApiError::UnexpectedStatus`] for any status other
    /// than 204, or with the last transient failure once retries are
    /// exhausted.
    pub async fn delete(
        &self,
        path: &str,
        query_params: Option<&[(&str, &str)]>,
    ) -> ApiResult<String> {
        let url = self.build_url(path, None, query_params)?;
        self.retry
            .execute(|| self.request(Method::DELETE, &url, None, None, ACCEPTED_DELETE))
            .await
    }

    fn build_url(
        &self,
        path: &str,
        uri_params: Option<&HashMap<&str, &str>>,
        query_params: Option<&[(&str, &str)]>,
    ) -> ApiResult<Url> {
        let mut rendered = path.to_string();
        if let Some(params) = uri_params {
            for (name, value) in params {
                rendered = rendered.replace(&format!("{{{name}}}"), value);
            }
        }

        let mut url = Url::parse(&format!("{}{rendered}", self.base_url))
            .map_err(|e| ApiError::invalid_config(format!("invalid request URL: {e}")))?;

        if let Some(pairs) = query_params {
            let mut query = url.query_pairs_mut();
            for (key, value) in pairs {
                query.append_pair(key, value);
            }
        }

        Ok(url)
    }

    /// One attempt of one exchange; the retry policy re-invokes this.
    async fn request(
        &self,
        method: Method,
        url: &Url,
        payload: Option<&str>,
        bearer_token: Option<&str>,
        accepted: &[u16],
    ) -> ApiResult<String> {
        let mut headers = self.headers.clone();
        if let Some(token) = bearer_token {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|e| ApiError::invalid_config(format!("invalid bearer token: {e}")))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        debug!(%method, %url, "Sending request");

        let mut builder = self.http.request(method.clone(), url.clone()).headers(headers);
        if let Some(body) = payload {
            builder = builder.body(body.to_string());
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();

        if !accepted.contains(&status) {
            let body = response.text().await.unwrap_or_default();
            error!(%method, %url, status, "Unexpected response status");
            return Err(ApiError::unexpected_status(
                method.as_str(),
                url.as_str(),
                status,
                body,
            ));
        }

        Ok(response.text().await?)
    }
}
