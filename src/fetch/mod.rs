use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};

pub mod auth;
pub mod classify;
pub mod prices;

pub use auth::{spawn_login, validate_credentials, verify_customer, Credentials, LoginResult};
pub use classify::{classify_transport, FetchError};
pub use prices::{
    fetch_price_list, normalize_snapshot, spawn_price_fetch, FetchKind, FetchOutcome,
    PriceSnapshot,
};

/// Placeholder shown for any price field the endpoint omits.
pub const MISSING_PRICE: &str = "N/A";

/// Header set the legacy backend expects on every call.
pub(crate) fn json_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers
}
