//! Credentials handed to us by the external sign-in flow.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// A signed-in user's session, as issued by the authentication provider.
///
/// Only the provider-issued bearer token matters here. Other fields of the provider's session
/// object are ignored on deserialization. The session is read, never mutated or stored.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct Session {
    /// OAuth access token for the YouTube APIs, issued by the identity provider.
    #[serde(default)]
    pub provider_token: Option<String>,
}

impl Session {
    pub fn with_provider_token(token: impl Into<String>) -> Self {
        Self {
            provider_token: Some(token.into()),
        }
    }
}

// Keep bearer tokens out of logs and panic messages.
impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field(
                "provider_token",
                &self.provider_token.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

/// Extracts the bearer token from `session`.
///
/// Fails with [`Error::Authentication`] if there is no session, or if the session has no (or an
/// empty) provider token.
pub fn access_token(session: Option<&Session>) -> Result<&str> {
    match session.and_then(|s| s.provider_token.as_deref()) {
        Some(token) if !token.is_empty() => Ok(token),
        _ => Err(Error::Authentication),
    }
}
