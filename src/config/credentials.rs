//! Credential resolution for the GitHub API
//!
//! Credentials come from the command line first and from the environment
//! when the command line gives none.

use crate::ConfigError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Environment variable for the login name of the GitHub account
pub const NAME_ENV: &str = "GISTWATCHER_NAME";

/// Environment variable for the login password of the GitHub account
pub const PASS_ENV: &str = "GISTWATCHER_PASS";

/// Environment variable for a GitHub access token
pub const TOKEN_ENV: &str = "GISTWATCHER_ACCESSTOKEN";

/// Exactly one form of GitHub credentials
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    Basic { name: String, password: String },
    Token(String),
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credentials::Basic { name, .. } => f
                .debug_struct("Basic")
                .field("name", name)
                .field("password", &"<redacted>")
                .finish(),
            Credentials::Token(_) => f.write_str("Token(<redacted>)"),
        }
    }
}

impl Credentials {
    /// Resolves credentials from flags, then from the process environment
    pub fn resolve(
        name: Option<String>,
        password: Option<String>,
        token: Option<String>,
    ) -> Result<Self, ConfigError> {
        Self::resolve_with(name, password, token, |key| std::env::var(key).ok())
    }

    /// Resolves credentials with an explicit environment lookup
    ///
    /// The environment is consulted only for whatever form the flags left
    /// entirely empty. Supplying both forms, or half a name/password pair,
    /// is an error.
    pub fn resolve_with<F>(
        name: Option<String>,
        password: Option<String>,
        token: Option<String>,
        env: F,
    ) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let clean = |s: Option<String>| s.map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let mut name = clean(name);
        let mut password = clean(password);
        let mut token = clean(token);

        if name.is_none() && password.is_none() && token.is_none() {
            token = clean(env(TOKEN_ENV));
            if token.is_none() {
                name = clean(env(NAME_ENV));
                password = clean(env(PASS_ENV));
            }
        }

        match (name, password, token) {
            (None, None, Some(token)) => Ok(Credentials::Token(token)),
            (Some(name), Some(password), None) => Ok(Credentials::Basic { name, password }),
            (None, None, None) => Err(ConfigError::MissingCredentials),
            (_, _, Some(_)) => Err(ConfigError::ConflictingCredentials),
            _ => Err(ConfigError::IncompleteCredentials),
        }
    }

    /// Value for the `Authorization` header
    pub fn authorization(&self) -> String {
        match self {
            Credentials::Basic { name, password } => {
                format!("Basic {}", STANDARD.encode(format!("{}:{}", name, password)))
            }
            Credentials::Token(token) => format!("token {}", token),
        }
    }
}
