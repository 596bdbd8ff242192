//! Data models for the HTTP helpers.
//!
//! This module contains the request parameter record handed to the transport
//! and the decoded response body it hands back.

pub mod request;
pub mod response;

pub use request::{HttpMethod, RequestParams};
pub use response::ResponseBody;
