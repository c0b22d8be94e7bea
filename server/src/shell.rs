//! App shell caching policy
//!
//! Decides how each request to the app should be cached so the shell keeps
//! loading offline while categorization calls always go to the network.

use axum::extract::Request;
use axum::http::{header, HeaderValue, Method, Uri};
use axum::middleware::Next;
use axum::response::Response;

pub const STATIC_PREFIX: &str = "/static/";
pub const API_PREFIX: &str = "/api/";
pub const FONT_HOSTS: [&str; 2] = ["fonts.googleapis.com", "fonts.gstatic.com"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    /// Never touched by the cache
    Bypass,
    NetworkOnly,
    /// Hashed build assets
    CacheFirst,
    StaleWhileRevalidate,
    /// Pages: fresh when online, cached copy when not
    NetworkFirst,
}

impl CachePolicy {
    pub fn cache_control(&self) -> Option<&'static str> {
        match self {
            CachePolicy::NetworkOnly => Some("no-store"),
            CachePolicy::CacheFirst => Some("public, max-age=31536000, immutable"),
            CachePolicy::StaleWhileRevalidate => Some("public, max-age=86400, stale-while-revalidate=604800"),
            CachePolicy::NetworkFirst => Some("no-cache"),
            CachePolicy::Bypass => None,
        }
    }
}

/// Classify a request. Relative URIs count as same-origin.
pub fn cache_policy(method: &Method, uri: &Uri, app_host: Option<&str>) -> CachePolicy {
    if method != Method::GET {
        return CachePolicy::Bypass;
    }
    let path = uri.path();
    if path.starts_with(API_PREFIX) {
        return CachePolicy::NetworkOnly;
    }
    match uri.host() {
        Some(host) if FONT_HOSTS.contains(&host) => CachePolicy::StaleWhileRevalidate,
        Some(host) if Some(host) != app_host => CachePolicy::Bypass,
        _ if path.starts_with(STATIC_PREFIX) => CachePolicy::CacheFirst,
        _ => CachePolicy::NetworkFirst,
    }
}

/// Stamp `Cache-Control` on responses that do not set their own
pub async fn apply_cache_headers(req: Request, next: Next) -> Response {
    let policy = cache_policy(req.method(), req.uri(), None);
    let mut response = next.run(req).await;
    if let Some(value) = policy.cache_control() {
        response
            .headers_mut()
            .entry(header::CACHE_CONTROL)
            .or_insert(HeaderValue::from_static(value));
    }
    response
}
