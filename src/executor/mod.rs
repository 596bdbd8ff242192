//! HTTP request executor.
//!
//! Thin helpers over `reqwest`: each call builds a client from the
//! [`ExecutionConfig`] and the request's own cookie jar and redirect flag,
//! performs exactly one round trip and decodes the body. There are no retries;
//! any failure comes back as a [`RequestError`].
//!
//! Status handling follows a simple rule: anything outside 2xx is a failure,
//! including a 3xx that was not followed.

pub mod config;
pub mod error;

pub use config::ExecutionConfig;
pub use error::RequestError;

use crate::cookies::CookieJar;
use crate::document::{Document, DocumentResponse};
use crate::models::{HttpMethod, RequestParams, ResponseBody};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT};
use reqwest::redirect::Policy;
use serde_json::Value;
use std::sync::Arc;
use url::Url;

/// How a successful body is decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyKind {
    Json,
    Text,
    Bytes,
}

impl BodyKind {
    fn for_params(params: &RequestParams) -> Self {
        if params.binary {
            BodyKind::Bytes
        } else if params.json {
            BodyKind::Json
        } else {
            BodyKind::Text
        }
    }
}

/// Executes requests with a fixed [`ExecutionConfig`].
///
/// `Executor::default()` snapshots the global configuration.
#[derive(Debug, Clone, Default)]
pub struct Executor {
    config: ExecutionConfig,
}

impl Executor {
    pub fn new(config: ExecutionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExecutionConfig {
        &self.config
    }

    /// Sends `params` as given and decodes the body according to its
    /// `json` and `binary` flags.
    pub async fn send(&self, params: &RequestParams) -> Result<ResponseBody, RequestError> {
        let kind = BodyKind::for_params(params);
        let (url, response) = self
            .execute(params, params.method, kind == BodyKind::Json)
            .await?;
        read_body(&url, response, kind).await
    }

    /// Requests `params` as JSON and returns the decoded body.
    ///
    /// JSON decoding is requested whatever `params.json` says. A successful
    /// response whose body is not JSON yields [`RequestError::Decode`].
    pub async fn get_json(&self, params: &RequestParams) -> Result<Value, RequestError> {
        let (url, response) = self.execute(params, params.method, true).await?;
        read_json(&url, response).await
    }

    /// Fetches `url` and parses the response as HTML.
    ///
    /// Cookies are read from and stored into `jar`, or into a fresh jar when
    /// none is given. The jar in the result is the one passed in.
    pub async fn get_document(
        &self,
        url: &str,
        jar: Option<CookieJar>,
    ) -> Result<DocumentResponse, RequestError> {
        let cookie_jar = jar.unwrap_or_default();
        let params = RequestParams::get(url).with_jar(cookie_jar.clone());

        let (url, response) = self.execute(&params, HttpMethod::GET, false).await?;
        let text = response
            .text()
            .await
            .map_err(|e| RequestError::transport(url.as_str(), e))?;

        Ok(DocumentResponse {
            document: Document::parse(&text),
            cookie_jar,
        })
    }

    /// POSTs `params.form` URL-encoded and returns the body.
    ///
    /// The method is always POST. Redirects are followed only when
    /// `params.follow_all_redirects` is set.
    pub async fn post_form(&self, params: &RequestParams) -> Result<ResponseBody, RequestError> {
        let kind = BodyKind::for_params(params);
        let (url, response) = self
            .execute(params, HttpMethod::POST, kind == BodyKind::Json)
            .await?;
        read_body(&url, response, kind).await
    }

    fn build_client(
        &self,
        method: HttpMethod,
        params: &RequestParams,
    ) -> Result<reqwest::Client, RequestError> {
        let follow = params.follow_all_redirects || method.follows_redirects_by_default();
        let policy = if follow && self.config.max_redirects > 0 {
            Policy::limited(self.config.max_redirects as usize)
        } else {
            Policy::none()
        };

        let mut builder = reqwest::Client::builder()
            .timeout(self.config.timeout)
            .user_agent(self.config.user_agent.as_str())
            .redirect(policy)
            .danger_accept_invalid_certs(!self.config.validate_ssl);

        if let Some(jar) = &params.jar {
            builder = builder.cookie_provider(Arc::new(jar.clone()));
        }

        builder
            .build()
            .map_err(|e| RequestError::Build(e.to_string()))
    }

    /// Merges the configured default headers, the JSON `Accept` and the
    /// request's own headers, later ones replacing earlier ones by name.
    fn request_headers(
        &self,
        params: &RequestParams,
        accept_json: bool,
    ) -> Result<HeaderMap, RequestError> {
        let mut headers = HeaderMap::new();
        for (name, value) in &self.config.default_headers {
            insert_header(&mut headers, name, value)?;
        }
        if accept_json {
            headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        }
        for (name, value) in &params.headers {
            insert_header(&mut headers, name, value)?;
        }
        Ok(headers)
    }

    /// Performs the round trip and returns the response if its status is 2xx.
    async fn execute(
        &self,
        params: &RequestParams,
        method: HttpMethod,
        accept_json: bool,
    ) -> Result<(Url, reqwest::Response), RequestError> {
        let url = request_url(params)?;
        let client = self.build_client(method, params)?;

        let headers = self.request_headers(params, accept_json)?;

        let mut request = client
            .request(reqwest::Method::from(method), url.clone())
            .headers(headers);
        if let Some(form) = &params.form {
            request = request.form(form);
        }

        log::debug!("{} {}", method, url);
        let response = request.send().await.map_err(|e| {
            let err = RequestError::transport(url.as_str(), e);
            log::warn!("{}", err);
            err
        })?;

        let status = response.status();
        log::debug!("{} {} -> {}", method, url, status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = RequestError::Status {
                url: url.to_string(),
                status: status.as_u16(),
                body,
            };
            log::warn!("{}", err);
            return Err(err);
        }

        Ok((url, response))
    }
}

fn insert_header(headers: &mut HeaderMap, name: &str, value: &str) -> Result<(), RequestError> {
    let header_name = HeaderName::from_bytes(name.as_bytes())
        .map_err(|e| RequestError::Build(format!("invalid header name {:?}: {}", name, e)))?;
    let header_value = HeaderValue::from_str(value)
        .map_err(|e| RequestError::Build(format!("invalid value for header {}: {}", name, e)))?;
    headers.insert(header_name, header_value);
    Ok(())
}

/// Parses `params.uri` and appends `params.qs`.
fn request_url(params: &RequestParams) -> Result<Url, RequestError> {
    let mut url = Url::parse(&params.uri).map_err(|source| RequestError::InvalidUrl {
        url: params.uri.clone(),
        source,
    })?;

    if !params.qs.is_empty() {
        url.query_pairs_mut().extend_pairs(params.qs.iter());
    }

    Ok(url)
}

async fn read_json(url: &Url, response: reqwest::Response) -> Result<Value, RequestError> {
    let bytes = response
        .bytes()
        .await
        .map_err(|e| RequestError::transport(url.as_str(), e))?;

    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }

    serde_json::from_slice(&bytes).map_err(|source| {
        log::warn!("response from {} is not JSON: {}", url, source);
        RequestError::Decode {
            url: url.to_string(),
            source,
        }
    })
}

async fn read_body(
    url: &Url,
    response: reqwest::Response,
    kind: BodyKind,
) -> Result<ResponseBody, RequestError> {
    match kind {
        BodyKind::Json => read_json(url, response).await.map(ResponseBody::Json),
        BodyKind::Text => response
            .text()
            .await
            .map(ResponseBody::Text)
            .map_err(|e| RequestError::transport(url.as_str(), e)),
        BodyKind::Bytes => response
            .bytes()
            .await
            .map(|bytes| ResponseBody::Bytes(bytes.to_vec()))
            .map_err(|e| RequestError::transport(url.as_str(), e)),
    }
}

/// Sends `params` with the global configuration. See [`Executor::send`].
pub async fn send_request(params: &RequestParams) -> Result<ResponseBody, RequestError> {
    Executor::default().send(params).await
}

/// Fetches JSON with the global configuration. See [`Executor::get_json`].
pub async fn get_json(params: &RequestParams) -> Result<Value, RequestError> {
    Executor::default().get_json(params).await
}

/// Fetches and parses an HTML page with the global configuration. See
/// [`Executor::get_document`].
pub async fn get_document(
    url: &str,
    jar: Option<CookieJar>,
) -> Result<DocumentResponse, RequestError> {
    Executor::default().get_document(url, jar).await
}

/// POSTs a form with the global configuration. See [`Executor::post_form`].
pub async fn post_form(params: &RequestParams) -> Result<ResponseBody, RequestError> {
    Executor::default().post_form(params).await
}
