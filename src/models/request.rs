//! HTTP request parameter models.
//!
//! [`RequestParams`] is the record the helpers hand to the transport: target
//! URI, query pairs, headers, form body, decoding flags, cookie jar and
//! redirect policy.

use crate::cookies::CookieJar;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// HTTP request method.
///
/// Represents all standard HTTP methods as defined in RFC 7231 and RFC 5789.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum HttpMethod {
    /// HTTP GET method - retrieve a resource
    #[default]
    GET,
    /// HTTP POST method - submit data to create a resource
    POST,
    /// HTTP PUT method - replace a resource
    PUT,
    /// HTTP DELETE method - remove a resource
    DELETE,
    /// HTTP PATCH method - partially modify a resource
    PATCH,
    /// HTTP OPTIONS method - describe communication options
    OPTIONS,
    /// HTTP HEAD method - retrieve headers only
    HEAD,
}

impl HttpMethod {
    /// Returns the string representation of the HTTP method.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::GET => "GET",
            HttpMethod::POST => "POST",
            HttpMethod::PUT => "PUT",
            HttpMethod::DELETE => "DELETE",
            HttpMethod::PATCH => "PATCH",
            HttpMethod::OPTIONS => "OPTIONS",
            HttpMethod::HEAD => "HEAD",
        }
    }

    /// Parses a string into an HttpMethod, ignoring case.
    ///
    /// Returns `None` if the string is not a supported method.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "GET" => Some(HttpMethod::GET),
            "POST" => Some(HttpMethod::POST),
            "PUT" => Some(HttpMethod::PUT),
            "DELETE" => Some(HttpMethod::DELETE),
            "PATCH" => Some(HttpMethod::PATCH),
            "OPTIONS" => Some(HttpMethod::OPTIONS),
            "HEAD" => Some(HttpMethod::HEAD),
            _ => None,
        }
    }

    /// Whether redirects are followed for this method without opting in.
    ///
    /// Only safe methods are redirected by default; everything else needs
    /// [`RequestParams::follow_all_redirects`].
    pub fn follows_redirects_by_default(&self) -> bool {
        matches!(self, HttpMethod::GET | HttpMethod::HEAD)
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::GET => reqwest::Method::GET,
            HttpMethod::POST => reqwest::Method::POST,
            HttpMethod::PUT => reqwest::Method::PUT,
            HttpMethod::DELETE => reqwest::Method::DELETE,
            HttpMethod::PATCH => reqwest::Method::PATCH,
            HttpMethod::OPTIONS => reqwest::Method::OPTIONS,
            HttpMethod::HEAD => reqwest::Method::HEAD,
        }
    }
}

/// Parameters for a single HTTP request.
///
/// Every field is passed to the transport as given; nothing is validated
/// before sending. The cookie jar is not serialized.
///
/// # Examples
///
/// ```
/// use fetch_utils::models::{HttpMethod, RequestParams};
///
/// let params = RequestParams::post("https://example.com/login")
///     .with_form_field("user", "ada")
///     .with_header("X-Trace", "1")
///     .follow_all_redirects(true);
///
/// assert_eq!(params.method, HttpMethod::POST);
/// assert_eq!(params.form.as_ref().map(Vec::len), Some(1));
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestParams {
    /// Target URI.
    pub uri: String,

    /// Query-string pairs appended to `uri`, in order.
    #[serde(default)]
    pub qs: Vec<(String, String)>,

    /// Request headers. Names are matched case-insensitively against the
    /// configured default headers.
    #[serde(default)]
    pub headers: HashMap<String, String>,

    /// Ask for JSON and decode the response body as JSON.
    #[serde(default)]
    pub json: bool,

    /// HTTP method. Defaults to GET.
    #[serde(default)]
    pub method: HttpMethod,

    /// URL-encoded form body, in order.
    #[serde(default)]
    pub form: Option<Vec<(String, String)>>,

    /// Cookie jar used for request cookies and updated from responses.
    #[serde(skip)]
    pub jar: Option<CookieJar>,

    /// Follow redirects for non-GET requests too.
    #[serde(default)]
    pub follow_all_redirects: bool,

    /// Keep the response body as raw bytes.
    #[serde(default)]
    pub binary: bool,
}

impl RequestParams {
    /// Creates GET parameters for `uri`.
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            ..Default::default()
        }
    }

    /// Creates GET parameters for `uri`.
    pub fn get(uri: impl Into<String>) -> Self {
        Self::new(uri)
    }

    /// Creates POST parameters for `uri`.
    pub fn post(uri: impl Into<String>) -> Self {
        Self::new(uri).with_method(HttpMethod::POST)
    }

    /// Sets the method.
    pub fn with_method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    /// Appends a query-string pair.
    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.qs.push((name.into(), value.into()));
        self
    }

    /// Adds a header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.add_header(name.into(), value.into());
        self
    }

    /// Sets whether the response is decoded as JSON.
    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    /// Appends a form field, creating the form body if needed.
    pub fn with_form_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.form
            .get_or_insert_with(Vec::new)
            .push((name.into(), value.into()));
        self
    }

    /// Attaches a cookie jar.
    pub fn with_jar(mut self, jar: CookieJar) -> Self {
        self.jar = Some(jar);
        self
    }

    /// Sets whether redirects are followed for non-GET methods.
    pub fn follow_all_redirects(mut self, follow: bool) -> Self {
        self.follow_all_redirects = follow;
        self
    }

    /// Sets whether the body is kept as raw bytes.
    pub fn with_binary(mut self, binary: bool) -> Self {
        self.binary = binary;
        self
    }

    /// Adds a header to the request.
    pub fn add_header(&mut self, name: String, value: String) {
        self.headers.insert(name, value);
    }

    /// Returns `true` if a header with this name is set, ignoring case.
    pub fn has_header(&self, name: &str) -> bool {
        self.headers.keys().any(|k| k.eq_ignore_ascii_case(name))
    }

    /// Whether redirects will be followed for this request.
    pub fn follows_redirects(&self) -> bool {
        self.follow_all_redirects || self.method.follows_redirects_by_default()
    }
}
