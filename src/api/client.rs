use std::fmt;

use async_trait::async_trait;

use super::types::Restaurant;

/// Every way a directory search can fail.
///
/// The search session treats all variants the same way (results cleared,
/// session exhausted). The variants exist for logging.
#[derive(Debug, Clone, PartialEq)]
pub enum NetworkError {
    /// Connection, DNS, TLS or timeout failure from the transport.
    Transport(String),
    /// Server answered with a non-2xx status.
    Status { status: u16, body: String },
    /// Server answered 200 but put an error list in the envelope.
    Api { code: String, message: String },
    /// Body did not match the expected envelope.
    Decode(String),
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkError::Transport(msg) => write!(f, "transport error: {msg}"),
            NetworkError::Status { status, body } => {
                write!(f, "directory returned HTTP {status}: {body}")
            }
            NetworkError::Api { code, message } => {
                write!(f, "directory error {code}: {message}")
            }
            NetworkError::Decode(msg) => write!(f, "decode error: {msg}"),
        }
    }
}

impl std::error::Error for NetworkError {}

/// One page request against the directory. Offsets are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchQuery<'a> {
    pub keyword: &'a str,
    pub start: u32,
    pub count: u32,
}

#[async_trait]
pub trait RestaurantDirectory: Send + Sync {
    /// Returns the name of the directory backend.
    fn name(&self) -> &str;

    /// Fetches one page of restaurants matching the keyword.
    async fn search(&self, query: SearchQuery<'_>) -> Result<Vec<Restaurant>, NetworkError>;
}
