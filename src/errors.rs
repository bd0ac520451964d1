/*!
 * Error types for the slidelingo application.
 *
 * Errors are grouped by where they are recovered:
 * - `ProviderError`: a single provider try failed; retried, then the
 *   gateway falls back and finally degrades to the original text
 * - `DocumentError`: one shape, table or notes container could not be
 *   processed; recorded in the processing stats, traversal continues
 * - `AppError`: job-level failures, including the fatal load/save errors
 */

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when working with provider APIs
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error related to rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// The response was well-formed but carried no translated text
    #[error("Provider returned an empty translation")]
    EmptyResponse,
}

impl ProviderError {
    /// Map a non-success HTTP status to the matching error variant
    pub fn from_status(status_code: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status_code {
            401 | 403 => Self::AuthenticationError(message),
            429 => Self::RateLimitExceeded(message),
            _ => Self::ApiError { status_code, message },
        }
    }

    /// Whether another try against the same provider can succeed.
    ///
    /// Bad credentials and an exhausted quota (DeepL answers 456) fail
    /// the same way on every try.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::AuthenticationError(_) => false,
            Self::ApiError { status_code, .. } => *status_code != 456,
            _ => true,
        }
    }
}

/// Errors raised by the document tree while one node is being processed
#[derive(Error, Debug)]
pub enum DocumentError {
    /// Text contains characters the document cannot store
    #[error("Invalid run text: {reason}")]
    InvalidText {
        /// What made the text unacceptable
        reason: String,
    },

    /// A part referenced by the node is not available
    #[error("Missing document part: {0}")]
    MissingPart(String),

    /// Document content could not be interpreted
    #[error("Malformed document: {0}")]
    Malformed(String),

    /// Underlying file operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse error classification for callers that branch on failure type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A provider failed; retry or fall back
    Provider,
    /// One document node failed; the rest of the document is fine
    NodeLocal,
    /// The job cannot produce an output document
    Fatal,
    /// The job was configured incorrectly
    Configuration,
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// The input document could not be loaded
    #[error("Failed to load document {path:?}: {source}")]
    Load {
        /// Input path
        path: PathBuf,
        /// Underlying cause
        #[source]
        source: DocumentError,
    },

    /// The translated document could not be saved
    #[error("Failed to save document {path:?}: {source}")]
    Save {
        /// Output path
        path: PathBuf,
        /// Underlying cause
        #[source]
        source: DocumentError,
    },

    /// Invalid configuration or job parameters
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from the document tree
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl AppError {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Load { .. } | Self::Save { .. } | Self::File(_) | Self::Unknown(_) => ErrorKind::Fatal,
            Self::Config(_) => ErrorKind::Configuration,
            Self::Provider(_) => ErrorKind::Provider,
            Self::Document(_) => ErrorKind::NodeLocal,
        }
    }

    /// Whether the job as a whole must be treated as failed
    pub fn is_fatal(&self) -> bool {
        self.kind() == ErrorKind::Fatal
    }
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
