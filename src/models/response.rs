//! Decoded HTTP response bodies.

use serde_json::Value;

/// A successful response body, decoded according to the request's flags.
///
/// `json` requests decode to [`ResponseBody::Json`], `binary` requests keep
/// the raw bytes, and everything else is read as text using the charset the
/// server declared.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// Body parsed as JSON. An empty body decodes to `null`.
    Json(Value),
    /// Body decoded as text.
    Text(String),
    /// Raw body bytes.
    Bytes(Vec<u8>),
}

impl ResponseBody {
    /// Returns the JSON value, if this is a JSON body.
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ResponseBody::Json(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the text, if this is a text body.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ResponseBody::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the body as bytes regardless of how it was decoded.
    ///
    /// A JSON `null` gives no bytes, since that is what an empty JSON body
    /// decodes to.
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            ResponseBody::Json(Value::Null) => Vec::new(),
            ResponseBody::Json(value) => value.to_string().into_bytes(),
            ResponseBody::Text(text) => text.as_bytes().to_vec(),
            ResponseBody::Bytes(bytes) => bytes.clone(),
        }
    }

    /// Consumes the body, returning the JSON value if there is one.
    pub fn into_json(self) -> Option<Value> {
        match self {
            ResponseBody::Json(value) => Some(value),
            _ => None,
        }
    }

    /// Size of the body in bytes, as [`to_bytes`](Self::to_bytes) renders it.
    pub fn len(&self) -> usize {
        match self {
            ResponseBody::Json(Value::Null) => 0,
            ResponseBody::Json(value) => value.to_string().len(),
            ResponseBody::Text(text) => text.len(),
            ResponseBody::Bytes(bytes) => bytes.len(),
        }
    }

    /// Returns `true` if the body is empty. A JSON `null` counts as empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
