//! Failure modes shared by every fetcher.

use http::StatusCode;

/// Errors returned by the dashboard fetchers.
///
/// Every fetcher fails on the first error it encounters. Nothing here is retried, and no variant
/// distinguishes transient from permanent failures.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The session is missing or carries no provider token.
    ///
    /// Raised before any request is sent.
    #[error("No access token available. Please sign in again.")]
    Authentication,

    /// An upstream call did not produce a usable response.
    ///
    /// This covers non-success status codes as well as transport and decoding failures of an
    /// upstream call. When the upstream error body is part of the report it is kept verbatim.
    #[error("{}", describe_remote(.reason, .body.as_deref()))]
    RemoteFetch {
        /// Human-readable description of the call that failed.
        reason: &'static str,
        /// Status code returned upstream, if a response was received at all.
        status: Option<StatusCode>,
        /// Upstream error body, for calls that surface it.
        body: Option<String>,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// The upstream call succeeded but the collection we needed was empty.
    #[error("{0}")]
    NotFound(&'static str),
}

impl Error {
    pub(crate) fn rejected(reason: &'static str, status: StatusCode, body: Option<String>) -> Self {
        Self::RemoteFetch {
            reason,
            status: Some(status),
            body,
            source: None,
        }
    }

    pub(crate) fn transport(reason: &'static str, source: reqwest::Error) -> Self {
        Self::RemoteFetch {
            reason,
            status: source.status(),
            body: None,
            source: Some(source),
        }
    }

    /// True for [`Error::Authentication`].
    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::Authentication)
    }

    /// True for [`Error::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// True for [`Error::RemoteFetch`].
    pub fn is_remote_fetch(&self) -> bool {
        matches!(self, Self::RemoteFetch { .. })
    }
}

fn describe_remote(reason: &str, body: Option<&str>) -> String {
    match body {
        Some(body) => format!("{reason}: {body}"),
        None => reason.to_string(),
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_fetch_message_includes_body_when_present() {
        let e = Error::rejected(
            "Failed to fetch current analytics",
            StatusCode::FORBIDDEN,
            Some(r#"{"error":"forbidden"}"#.to_string()),
        );
        assert_eq!(
            e.to_string(),
            r#"Failed to fetch current analytics: {"error":"forbidden"}"#
        );
        assert!(e.is_remote_fetch());
    }

    #[test]
    fn remote_fetch_message_is_reason_only_without_body() {
        let e = Error::rejected(
            "Failed to fetch channel statistics",
            StatusCode::INTERNAL_SERVER_ERROR,
            None,
        );
        assert_eq!(e.to_string(), "Failed to fetch channel statistics");
    }

    #[test]
    fn not_found_and_authentication_messages() {
        assert_eq!(
            Error::NotFound("No YouTube channel found for this account").to_string(),
            "No YouTube channel found for this account"
        );
        assert!(Error::Authentication.is_authentication());
        assert!(!Error::Authentication.is_not_found());
    }
}
