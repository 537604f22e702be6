/// Core error type for the statistics gateway.
///
/// The first four variants are the gateway taxonomy: missing credentials are
/// user-actionable (re-link the account), auth-service and remote-API failures
/// are infrastructure errors. The rest cover process wiring.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no access token stored for account")]
    NoToken,

    #[error("no cookies stored for account")]
    NoCookies,

    #[error("auth service error: {0}")]
    AuthService(String),

    #[error("remote api error: {0}")]
    RemoteApi(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("settings error: {0}")]
    Settings(String),
}

impl Error {
    /// True when the caller should ask the user to re-authenticate.
    pub fn is_credentials_missing(&self) -> bool {
        matches!(self, Error::NoToken | Error::NoCookies)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
