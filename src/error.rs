use std::io;

use thiserror::Error;

/// Failure talking to the remote product API.
///
/// `Http` carries the response status; `Network` means the request never got a
/// response (DNS, refused connection, closed socket), so there is no status.
#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("{message}")]
    Http { status: u16, message: String },

    #[error("network error: {message}")]
    Network { message: String },
}

impl RemoteError {
    pub fn status(&self) -> Option<u16> {
        match self {
            RemoteError::Http { status, .. } => Some(*status),
            RemoteError::Network { .. } => None,
        }
    }

    /// The remote reported the product as absent.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

impl From<reqwest::Error> for RemoteError {
    fn from(error: reqwest::Error) -> Self {
        match error.status() {
            Some(status) => RemoteError::Http {
                status: status.as_u16(),
                message: error.to_string(),
            },
            None => RemoteError::Network {
                message: error.to_string(),
            },
        }
    }
}

/// Storage failure. Recovered at the store boundary, logged, never surfaced:
/// read failures fall back to an empty set, write failures are dropped.
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("storage read failed")]
    Read(#[source] io::Error),

    #[error("storage write failed")]
    Write(#[source] io::Error),
}

/// Malformed consumer input, e.g. a non-numeric product id from a route.
/// Mapped to a user-visible invalid/not-found state, never a crash.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid product id: {0:?}")]
    InvalidProductId(String),
}
