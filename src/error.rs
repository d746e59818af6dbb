use std::fmt;

#[allow(clippy::enum_variant_names)]
#[derive(Debug)]
pub enum Error {
    ProviderError(String),
    CredentialError(String),
    InvalidInput(String),
    /// The provider answered with a status outside the 2xx range.
    Status {
        status: u16,
        reason: String,
        body: String,
    },
    Cancelled,
}

impl Error {
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl std::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ProviderError(msg) => write!(f, "Provider error: {msg}"),
            Error::CredentialError(msg) => write!(f, "Credential error: {msg}"),
            Error::InvalidInput(msg) => write!(f, "Invalid input: {msg}"),
            Error::Status {
                status,
                reason,
                body,
            } => write!(f, "Unexpected status code: {status} {reason}, response: {body}"),
            Error::Cancelled => write!(f, "Operation cancelled"),
        }
    }
}
