//! Error types for the market data crate.

use thiserror::Error;

/// Errors that can occur during market data operations.
///
/// The `Display` output of each variant is what end users see when a lookup
/// fails, so messages are kept short and free of internal detail.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The requested symbol was not found by the provider.
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// The provider answered but returned no price rows for the symbol.
    #[error("No data found for the given symbol.")]
    NoData,

    /// A provider-specific error occurred.
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },

    /// The provider returned data that could not be converted.
    #[error("Validation failed: {message}")]
    ValidationFailed {
        /// Description of the validation failure
        message: String,
    },

    /// The provider does not implement the requested operation.
    #[error("Operation '{operation}' is not supported by {provider}")]
    NotSupported {
        /// The operation that was attempted
        operation: String,
        /// The provider that does not support it
        provider: String,
    },

    /// A network error occurred while communicating with a provider.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl MarketDataError {
    /// Shorthand for a [`MarketDataError::ProviderError`].
    pub fn provider(provider: &str, message: impl Into<String>) -> Self {
        Self::ProviderError {
            provider: provider.to_string(),
            message: message.into(),
        }
    }

    /// Whether the error means the symbol itself is unknown or empty,
    /// as opposed to a transport or provider fault.
    pub fn is_unknown_symbol(&self) -> bool {
        matches!(self, Self::SymbolNotFound(_) | Self::NoData)
    }
}
