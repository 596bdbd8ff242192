//! Public suffix checks for cookie domains.
//!
//! A cookie scoped to a public suffix such as `com` or `co.uk` would be sent
//! to every site under it, so such `Domain` attributes are refused.

use psl::{List, Psl};

/// Returns `true` if `domain` is itself a public suffix, e.g. `co.uk`.
pub(crate) fn is_public_suffix(domain: &str) -> bool {
    let domain = domain.trim_start_matches('.').to_ascii_lowercase();
    List.suffix(domain.as_bytes())
        .is_some_and(|suffix| suffix.as_bytes() == domain.as_bytes())
}
