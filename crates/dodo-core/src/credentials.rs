//! Credential resolver.
//!
//! Reads per-account access tokens and cookie sets from the auth service:
//! - `GET /auth/token/?account_name=` -> `{ "access_token": "..." }` or 404
//! - `GET /auth/cookies/?account_name=` -> `{ "<name>": "<value>", ... }` or 404
//!
//! 404 maps to the user-actionable `NoToken`/`NoCookies`; every other failure
//! is `AuthService`. One attempt per call, no retries.

use std::time::Duration;

use reqwest::{StatusCode, Url};
use serde::{de::DeserializeOwned, Deserialize};

use crate::{
    config::Config,
    domain::{AccessToken, CookieJar, CredentialKind, Credentials},
    errors::Error,
    http::{build_client, endpoint_url},
    Result,
};

const TOKEN_PATH: &str = "/auth/token/";
const COOKIES_PATH: &str = "/auth/cookies/";

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Clone, Debug)]
pub struct CredentialResolver {
    base_url: Url,
    http: reqwest::Client,
}

impl CredentialResolver {
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self> {
        Ok(Self {
            base_url,
            http: build_client(timeout)?,
        })
    }

    pub fn from_config(cfg: &Config) -> Result<Self> {
        Self::new(cfg.database_api_url.clone(), cfg.request_timeout)
    }

    pub async fn resolve_access_token(&self, account_name: &str) -> Result<AccessToken> {
        let resp: TokenResponse = self.fetch(TOKEN_PATH, account_name, || Error::NoToken).await?;
        Ok(AccessToken(resp.access_token))
    }

    pub async fn resolve_cookies(&self, account_name: &str) -> Result<CookieJar> {
        self.fetch(COOKIES_PATH, account_name, || Error::NoCookies)
            .await
    }

    /// Resolve whatever credential `kind` requires; `None` for public endpoints.
    pub async fn resolve(
        &self,
        kind: CredentialKind,
        account_name: &str,
    ) -> Result<Option<Credentials>> {
        match kind {
            CredentialKind::None => Ok(None),
            CredentialKind::AccessToken => Ok(Some(Credentials::AccessToken(
                self.resolve_access_token(account_name).await?,
            ))),
            CredentialKind::Cookies => Ok(Some(Credentials::Cookies(
                self.resolve_cookies(account_name).await?,
            ))),
        }
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        path: &str,
        account_name: &str,
        not_found: impl Fn() -> Error,
    ) -> Result<T> {
        // Nothing can be stored under an empty account name.
        if account_name.trim().is_empty() {
            return Err(not_found());
        }

        let url = endpoint_url(&self.base_url, path)?;
        tracing::debug!(path, account_name, "requesting credentials");

        let resp = self
            .http
            .get(url)
            .query(&[("account_name", account_name)])
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(path, account_name, error = %e, "auth service unreachable");
                Error::AuthService(format!("request to {path} failed: {e}"))
            })?;

        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            tracing::info!(path, account_name, "no credentials stored");
            return Err(not_found());
        }
        if !status.is_success() {
            tracing::warn!(path, account_name, %status, "auth service returned an error");
            return Err(Error::AuthService(format!("{path} returned {status}")));
        }

        resp.json::<T>()
            .await
            .map_err(|e| Error::AuthService(format!("malformed response from {path}: {e}")))
    }
}
