use std::num::ParseIntError;
use thiserror::Error;

use crate::error::Error;

#[derive(Error, Debug)]
pub enum Dynv6Error {
    #[error("Malformed URL {url}: {source}")]
    UrlParse {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Request cancelled")]
    Cancelled,

    #[error("Unexpected status code: {status} {reason}, response: {body}")]
    Status {
        status: u16,
        reason: String,
        body: String,
    },

    #[error("Unexpected status code: {status} {reason}, could not read response: {source}")]
    StatusUnreadable {
        status: u16,
        reason: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("Invalid record ID {id:?}: {source}")]
    InvalidId {
        id: String,
        #[source]
        source: ParseIntError,
    },

    #[error("Credential error: {0}")]
    Credential(String),
}

impl Dynv6Error {
    /// HTTP status of a rejected request, if the API answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Dynv6Error::Status { status, .. } | Dynv6Error::StatusUnreadable { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }
}

pub fn map_error(e: Dynv6Error) -> Error {
    use Dynv6Error::*;
    match e {
        Status {
            status,
            reason,
            body,
        } => Error::Status {
            status,
            reason,
            body,
        },
        Cancelled => Error::Cancelled,
        Credential(msg) => Error::CredentialError(msg),
        other @ InvalidId { .. } => Error::InvalidInput(other.to_string()),
        other => Error::ProviderError(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn decode_error() -> serde_json::Error {
        serde_json::from_str::<serde_json::Value>("not json").unwrap_err()
    }

    #[test]
    fn test_map_error_variants() {
        let err = map_error(Dynv6Error::Status {
            status: 404,
            reason: "Not Found".to_string(),
            body: "zone not found".to_string(),
        });
        assert_matches!(&err, Error::Status { status: 404, body, .. } if body == "zone not found");
        assert_eq!(err.status(), Some(404));

        let err = map_error(Dynv6Error::Cancelled);
        assert_matches!(err, Error::Cancelled);
        let err = map_error(Dynv6Error::Credential("missing".to_string()));
        assert_matches!(err, Error::CredentialError(_));
        let err = map_error(Dynv6Error::InvalidId {
            id: "abc".to_string(),
            source: "abc".parse::<i64>().unwrap_err(),
        });
        assert_matches!(err, Error::InvalidInput(msg) if msg.contains("abc"));
        let err = map_error(Dynv6Error::Decode(decode_error()));
        assert_matches!(err, Error::ProviderError(_));
    }

    #[test]
    fn test_status_error_message_carries_body() {
        let err = Dynv6Error::Status {
            status: 422,
            reason: "Unprocessable Entity".to_string(),
            body: r#"{"error":"invalid data"}"#.to_string(),
        };
        assert_eq!(err.status(), Some(422));
        assert_eq!(
            err.to_string(),
            r#"Unexpected status code: 422 Unprocessable Entity, response: {"error":"invalid data"}"#
        );
    }

    #[test]
    fn test_non_http_errors_have_no_status() {
        assert_eq!(Dynv6Error::Cancelled.status(), None);
        assert_eq!(Dynv6Error::Decode(decode_error()).status(), None);
    }
}
