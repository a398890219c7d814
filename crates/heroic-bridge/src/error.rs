//! Error types for the bridge binary.

/// Top-level error for the bridge binary.
///
/// Each variant wraps a specific failure, providing a single error type
/// that request handling can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: heroic_crafting::ConfigError,
    },

    /// An amount string in the request could not be read.
    #[error("invalid amount in '{field}': {source}")]
    Amount {
        /// Which request field held the amount.
        field: String,
        /// The underlying parse error.
        source: heroic_coins::CoinError,
    },

    /// The request or response was not valid JSON.
    #[error("JSON error: {source}")]
    Json {
        /// The underlying serde error.
        #[from]
        source: serde_json::Error,
    },

    /// Reading the request or writing the response failed.
    #[error("I/O error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },
}
