//! In-memory cookie jar shared between requests.
//!
//! [`CookieJar`] is a handle: clones point at the same store, so a jar passed
//! into one request and handed back to the caller carries every cookie the
//! server set. It plugs into `reqwest` as a [`CookieStore`], which is how
//! `Set-Cookie` headers land in it and `Cookie` headers come out of it.
//!
//! Domain and path matching follow RFC 6265: host-only cookies match their
//! exact host, domain cookies match the domain and its subdomains, and a
//! cookie path matches itself and anything below it. A `Domain` attribute
//! naming a public suffix is refused, and cookies set by an IP address only
//! ever go back to that exact address.

mod suffix;

use cookie::Cookie;
use dashmap::DashMap;
use reqwest::cookie::CookieStore;
use reqwest::header::HeaderValue;
use std::fmt;
use std::sync::Arc;
use time::OffsetDateTime;
use url::{Host, Url};

/// Errors raised when storing a cookie.
#[derive(Debug, thiserror::Error)]
pub enum CookieError {
    /// The cookie string could not be parsed.
    #[error("invalid cookie {input:?}: {source}")]
    Parse {
        input: String,
        #[source]
        source: cookie::ParseError,
    },

    /// The cookie's `Domain` attribute does not cover the URL's host.
    #[error("cookie domain {domain:?} does not match host {host:?}")]
    DomainMismatch { domain: String, host: String },

    /// The cookie's `Domain` attribute is a public suffix such as `co.uk`.
    #[error("cookie domain {domain:?} is a public suffix")]
    PublicSuffix { domain: String },

    /// The URL has no host to scope the cookie to.
    #[error("URL has no host: {0}")]
    NoHost(String),
}

#[derive(Debug, Clone)]
struct StoredCookie {
    cookie: Cookie<'static>,
    domain: String,
    path: String,
    host_only: bool,
    secure: bool,
    expires: Option<OffsetDateTime>,
    created: OffsetDateTime,
}

impl StoredCookie {
    fn is_expired(&self, now: OffsetDateTime) -> bool {
        self.expires.is_some_and(|expires| expires <= now)
    }

    /// The cookie with its resolved domain and path filled in.
    fn resolved(&self) -> Cookie<'static> {
        let mut cookie = self.cookie.clone();
        cookie.set_domain(self.domain.clone());
        cookie.set_path(self.path.clone());
        cookie
    }
}

/// A thread-safe cookie store keyed by domain.
///
/// Cloning is cheap and shares the underlying store; use [`CookieJar::ptr_eq`]
/// to check whether two handles are the same jar.
#[derive(Clone, Default)]
pub struct CookieJar {
    store: Arc<DashMap<String, Vec<StoredCookie>>>,
}

impl fmt::Debug for CookieJar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CookieJar")
            .field("cookies", &self.len())
            .finish()
    }
}

impl CookieJar {
    /// Creates an empty jar.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if both handles refer to the same jar.
    pub fn ptr_eq(&self, other: &CookieJar) -> bool {
        Arc::ptr_eq(&self.store, &other.store)
    }

    /// Stores a cookie as if `url` had answered with `Set-Cookie: cookie_line`.
    ///
    /// A cookie with the same name, domain and path is replaced. A cookie that
    /// is already expired (or has `Max-Age` of zero or less) removes any
    /// matching cookie instead of being stored.
    ///
    /// A `Domain` attribute must cover the URL's host and must not be a public
    /// suffix, unless it names the host itself, in which case the cookie is
    /// host-only. For an IP address host the attribute must be that address.
    pub fn set_cookie(&self, cookie_line: &str, url: &Url) -> Result<(), CookieError> {
        let host = url
            .host_str()
            .ok_or_else(|| CookieError::NoHost(url.to_string()))?
            .to_ascii_lowercase();

        let cookie = Cookie::parse(cookie_line.to_string()).map_err(|source| CookieError::Parse {
            input: cookie_line.to_string(),
            source,
        })?;

        let (domain, host_only) = match cookie.domain() {
            Some(d) => {
                let d = d.trim_start_matches('.').to_ascii_lowercase();
                if is_ip_host(url) {
                    if strip_brackets(&d) != strip_brackets(&host) {
                        return Err(CookieError::DomainMismatch { domain: d, host });
                    }
                    (host, true)
                } else if !domain_matches(&d, &host, false) {
                    return Err(CookieError::DomainMismatch { domain: d, host });
                } else if suffix::is_public_suffix(&d) {
                    if d != host {
                        return Err(CookieError::PublicSuffix { domain: d });
                    }
                    (host, true)
                } else {
                    (d, false)
                }
            }
            None => (host, true),
        };

        let path = match cookie.path() {
            Some(p) if p.starts_with('/') => p.to_string(),
            _ => default_path(url),
        };

        let now = OffsetDateTime::now_utc();
        // Max-Age wins over Expires; an overflowing Max-Age never expires
        let expires = match cookie.max_age() {
            Some(max_age) => now.checked_add(max_age),
            None => cookie.expires_datetime(),
        };

        let stored = StoredCookie {
            secure: cookie.secure().unwrap_or(false),
            cookie,
            domain: domain.clone(),
            path,
            host_only,
            expires,
            created: now,
        };

        let mut entry = self.store.entry(domain).or_default();
        entry.retain(|c| c.cookie.name() != stored.cookie.name() || c.path != stored.path);

        if stored.is_expired(now) {
            log::trace!("removed cookie {} for {}", stored.cookie.name(), stored.domain);
            return Ok(());
        }

        log::trace!("stored cookie {} for {}", stored.cookie.name(), stored.domain);
        entry.push(stored);
        Ok(())
    }

    /// Returns the cookies that would be sent to `url`.
    ///
    /// Longer paths come first, then older cookies, as RFC 6265 recommends.
    pub fn cookies_for_url(&self, url: &Url) -> Vec<Cookie<'static>> {
        let Some(host) = url.host_str().map(|h| h.to_ascii_lowercase()) else {
            return Vec::new();
        };
        let now = OffsetDateTime::now_utc();
        let is_secure = url.scheme() == "https";
        let ip_host = is_ip_host(url);
        let domains = if ip_host {
            vec![host.clone()]
        } else {
            candidate_domains(&host)
        };

        let mut matched: Vec<StoredCookie> = Vec::new();
        for domain in domains {
            if let Some(entry) = self.store.get(&domain) {
                matched.extend(
                    entry
                        .iter()
                        .filter(|c| domain_matches(&c.domain, &host, c.host_only || ip_host))
                        .filter(|c| path_matches(&c.path, url.path()))
                        .filter(|c| is_secure || !c.secure)
                        .filter(|c| !c.is_expired(now))
                        .cloned(),
                );
            }
        }

        matched.sort_by(|a, b| {
            b.path
                .len()
                .cmp(&a.path.len())
                .then_with(|| a.created.cmp(&b.created))
        });

        matched.iter().map(StoredCookie::resolved).collect()
    }

    /// Returns the `Cookie` header value for `url`, or `None` if no cookie applies.
    pub fn cookie_string(&self, url: &Url) -> Option<String> {
        let cookies = self.cookies_for_url(url);
        if cookies.is_empty() {
            return None;
        }

        Some(
            cookies
                .iter()
                .map(|c| format!("{}={}", c.name(), c.value()))
                .collect::<Vec<_>>()
                .join("; "),
        )
    }

    /// Lists every unexpired cookie in the jar, with domain and path filled in.
    pub fn all_cookies(&self) -> Vec<Cookie<'static>> {
        let now = OffsetDateTime::now_utc();
        self.store
            .iter()
            .flat_map(|entry| {
                entry
                    .value()
                    .iter()
                    .filter(|c| !c.is_expired(now))
                    .map(StoredCookie::resolved)
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    /// Looks up a cookie by name that would be sent to `url`.
    pub fn get(&self, name: &str, url: &Url) -> Option<Cookie<'static>> {
        self.cookies_for_url(url)
            .into_iter()
            .find(|c| c.name() == name)
    }

    /// Number of cookies stored, including any that have expired but were
    /// not yet evicted.
    pub fn len(&self) -> usize {
        self.store.iter().map(|e| e.value().len()).sum()
    }

    /// Returns `true` if the jar holds no cookies.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops expired cookies.
    pub fn evict_expired(&self) {
        let now = OffsetDateTime::now_utc();
        self.store.retain(|_, cookies| {
            cookies.retain(|c| !c.is_expired(now));
            !cookies.is_empty()
        });
    }

    /// Removes every cookie.
    pub fn clear(&self) {
        self.store.clear();
    }
}

impl CookieStore for CookieJar {
    fn set_cookies(&self, cookie_headers: &mut dyn Iterator<Item = &HeaderValue>, url: &Url) {
        for header in cookie_headers {
            let Ok(line) = header.to_str() else {
                log::debug!("skipping non-ASCII Set-Cookie header from {}", url);
                continue;
            };
            if let Err(e) = self.set_cookie(line, url) {
                log::debug!("rejected cookie from {}: {}", url, e);
            }
        }
    }

    fn cookies(&self, url: &Url) -> Option<HeaderValue> {
        self.cookie_string(url)
            .and_then(|value| HeaderValue::from_str(&value).ok())
    }
}

fn is_ip_host(url: &Url) -> bool {
    matches!(url.host(), Some(Host::Ipv4(_) | Host::Ipv6(_)))
}

fn strip_brackets(host: &str) -> &str {
    host.trim_start_matches('[').trim_end_matches(']')
}

/// RFC 6265 domain matching.
fn domain_matches(cookie_domain: &str, request_host: &str, host_only: bool) -> bool {
    if host_only || cookie_domain.eq_ignore_ascii_case(request_host) {
        return cookie_domain.eq_ignore_ascii_case(request_host);
    }

    request_host.len() > cookie_domain.len()
        && request_host
            .get(request_host.len() - cookie_domain.len()..)
            .is_some_and(|suffix| suffix.eq_ignore_ascii_case(cookie_domain))
        && request_host.as_bytes()[request_host.len() - cookie_domain.len() - 1] == b'.'
}

/// RFC 6265 path matching.
fn path_matches(cookie_path: &str, request_path: &str) -> bool {
    if request_path == cookie_path {
        return true;
    }

    request_path.starts_with(cookie_path)
        && (cookie_path.ends_with('/')
            || request_path.as_bytes().get(cookie_path.len()) == Some(&b'/'))
}

/// The default cookie path for a URL: its path up to, not including, the
/// last `/`.
fn default_path(url: &Url) -> String {
    let path = url.path();
    match path.rfind('/') {
        Some(0) | None => "/".to_string(),
        Some(idx) => path[..idx].to_string(),
    }
}

/// The host itself and each parent domain, e.g. `a.b.example.com`,
/// `b.example.com`, `example.com`.
fn candidate_domains(host: &str) -> Vec<String> {
    let mut domains = vec![host.to_string()];
    let parts: Vec<&str> = host.split('.').collect();
    for i in 1..parts.len().saturating_sub(1) {
        domains.push(parts[i..].join("."));
    }
    domains
}
