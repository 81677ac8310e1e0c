use thiserror::Error;

/// Error type for contract binding operations
#[derive(Debug, Error)]
pub enum Error {
    /// The embedded ABI could not be parsed, or names an unknown method or event
    #[error("ABI error: {0}")]
    Abi(String),

    /// Node unreachable or RPC failure, reported unchanged by the backend
    #[error("Transport error: {0}")]
    Transport(String),

    /// Return data or a log did not match the expected ABI shape
    #[error("Failed to decode: {0}")]
    Decode(String),

    /// Execution reverted on-chain
    #[error("Execution reverted: {0}")]
    Revert(String),

    /// Upstream log subscription failed
    #[error("Subscription error: {0}")]
    Subscription(String),

    /// Empty return data from an address without deployed code
    #[error("No contract code at given address")]
    NoCode,

    /// Invalid configuration or missing options
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error with a message
    #[error("{0}")]
    Generic(String),

    /// Any other error with its source
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// Create a new ABI error
    pub fn abi<S: Into<String>>(msg: S) -> Self {
        Error::Abi(msg.into())
    }

    /// Create a new transport error
    pub fn transport<S: Into<String>>(msg: S) -> Self {
        Error::Transport(msg.into())
    }

    /// Create a new decode error
    pub fn decode<S: Into<String>>(msg: S) -> Self {
        Error::Decode(msg.into())
    }

    /// Create a new revert error
    pub fn revert<S: Into<String>>(msg: S) -> Self {
        Error::Revert(msg.into())
    }

    /// Create a new subscription error
    pub fn subscription<S: Into<String>>(msg: S) -> Self {
        Error::Subscription(msg.into())
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }

    /// Create a new generic error
    pub fn generic<S: Into<String>>(msg: S) -> Self {
        Error::Generic(msg.into())
    }

    /// Classify a backend RPC failure message as a revert or a transport error
    pub fn from_rpc<S: Into<String>>(msg: S) -> Self {
        let msg = msg.into();
        if msg.to_lowercase().contains("revert") {
            Error::Revert(msg)
        } else {
            Error::Transport(msg)
        }
    }

    /// Whether this error came from decoding return data or a log
    pub fn is_decode(&self) -> bool {
        matches!(self, Error::Decode(_))
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Generic(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Generic(s.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Abi(format!("JSON parsing error: {}", err))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Config(format!("I/O error: {}", err))
    }
}

/// Result type for contract binding operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rpc_errors_are_classified() {
        let err = Error::from_rpc("execution reverted: Only callable by owner");
        assert!(matches!(err, Error::Revert(_)));

        let err = Error::from_rpc("connection refused");
        assert!(matches!(err, Error::Transport(_)));
    }

    #[test]
    fn test_json_errors_map_to_abi() {
        let err: Error = serde_json::from_str::<serde_json::Value>("[{").unwrap_err().into();
        assert!(matches!(err, Error::Abi(_)));
        assert!(err.to_string().starts_with("ABI error"));
    }
}
