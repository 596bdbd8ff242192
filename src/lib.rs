//! Small stateless helpers.
//!
//! Every helper is an independent function; nothing here keeps state between
//! calls apart from a cookie jar the caller chooses to reuse.
//!
//! # Modules
//!
//! - **objects**: predicates over slices of JSON objects
//! - **dates**: calendar-day ranges and previous-month boundaries
//! - **random**: weighted coin flips with an injectable randomness source
//! - **config**: global settings for the HTTP helpers
//! - **models**: request parameters and decoded response bodies
//! - **cookies**: the cookie jar threaded through requests
//! - **document**: parsed HTML documents
//! - **executor**: JSON fetch, HTML fetch and form POST over `reqwest`
//!
//! The HTTP modules sit behind the `http` feature, which is on by default.
//!
//! # Usage
//!
//! ```no_run
//! use fetch_utils::{get_document, get_json, RequestParams};
//!
//! # async fn run() -> Result<(), fetch_utils::RequestError> {
//! let user = get_json(&RequestParams::new("https://api.example.com/users/1")).await?;
//! println!("{}", user["name"]);
//!
//! // Reuse the jar so the second page sees the session cookie from the first
//! let first = get_document("https://example.com/login", None).await?;
//! let second = get_document("https://example.com/account", Some(first.cookie_jar)).await?;
//! println!("{:?}", second.document.title());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod dates;
pub mod objects;
pub mod random;

#[cfg(feature = "http")]
pub mod cookies;
#[cfg(feature = "http")]
pub mod document;
#[cfg(feature = "http")]
pub mod executor;
#[cfg(feature = "http")]
pub mod models;

pub use dates::{
    all_dates_between_inclusive, first_of_month, first_of_previous_month, last_of_previous_month,
    DateRange,
};
pub use objects::{every_object_has_own_property, every_object_has_unique_property_value};
pub use random::{
    random_boolean_with_set_chance, random_boolean_with_set_chance_from, RandomSource, RngSource,
};

#[cfg(feature = "http")]
pub use cookies::{CookieError, CookieJar};
#[cfg(feature = "http")]
pub use document::{Document, DocumentResponse, SelectorError};
#[cfg(feature = "http")]
pub use executor::{
    get_document, get_json, post_form, send_request, ExecutionConfig, Executor, RequestError,
};
#[cfg(feature = "http")]
pub use models::{HttpMethod, RequestParams, ResponseBody};
