use std::time::Duration;

use reqwest::Url;

use crate::{errors::Error, Result};

/// Build an HTTP client for one remote service.
///
/// Idle pooling is disabled: each exchange opens its own connection and
/// drops it when the response is consumed or the call fails.
pub(crate) fn build_client(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .pool_max_idle_per_host(0)
        .user_agent(concat!("dodo-core/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| Error::Config(format!("http client build failed: {e}")))
}

/// Append `path` to the base URL, keeping any path prefix the base carries.
pub(crate) fn endpoint_url(base: &Url, path: &str) -> Result<Url> {
    let joined = format!(
        "{}/{}",
        base.as_str().trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    Url::parse(&joined).map_err(|e| Error::Config(format!("invalid endpoint url {joined}: {e}")))
}
