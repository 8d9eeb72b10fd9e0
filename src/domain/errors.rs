use std::fmt;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NoCredential,
    Timeout,
    Unauthorized,
    RateLimited,
    Network,
    MalformedResponse,
    UnknownProvider,
    Other,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NoCredential => "no_credential",
            Self::Timeout => "timeout",
            Self::Unauthorized => "unauthorized",
            Self::RateLimited => "rate_limited",
            Self::Network => "network",
            Self::MalformedResponse => "malformed_response",
            Self::UnknownProvider => "unknown_provider",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failure of one dispatch attempt, reduced to a stable kind and a
/// human-readable message.
///
/// The message is never empty: constructors substitute a fallback derived
/// from the kind when given blank text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct ClassifiedError {
    kind: ErrorKind,
    message: String,
}

impl ClassifiedError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            fallback_message(kind).to_string()
        } else {
            message
        };
        Self { kind, message }
    }

    pub fn no_credential(provider_id: &str) -> Self {
        Self::new(
            ErrorKind::NoCredential,
            format!("no API key configured for provider '{provider_id}'"),
        )
    }

    pub fn timeout() -> Self {
        Self::new(ErrorKind::Timeout, "Timeout")
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Network, message)
    }

    pub fn malformed_response(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MalformedResponse, message)
    }

    pub fn unknown_provider(provider_id: &str) -> Self {
        Self::new(
            ErrorKind::UnknownProvider,
            format!("unknown provider '{provider_id}'"),
        )
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Other, message)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Advisory only: dispatch itself never retries.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::Timeout | ErrorKind::RateLimited | ErrorKind::Network
        )
    }

    pub fn user_message(&self) -> String {
        match self.kind {
            ErrorKind::NoCredential => {
                "No API key is set for this provider. Add a key and try again.".to_string()
            }
            ErrorKind::Timeout => "The provider did not respond within 30 seconds.".to_string(),
            ErrorKind::Unauthorized => {
                format!("Invalid API key or access denied: {}", self.message)
            }
            ErrorKind::RateLimited => {
                format!("Request limit exceeded, retry in a moment: {}", self.message)
            }
            ErrorKind::Network => {
                format!("Could not reach the provider service: {}", self.message)
            }
            ErrorKind::MalformedResponse => {
                format!("The provider returned an unreadable response: {}", self.message)
            }
            ErrorKind::UnknownProvider => {
                format!("This provider is not supported: {}", self.message)
            }
            ErrorKind::Other => self.message.clone(),
        }
    }
}

/// Start-up failure while assembling the provider catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("provider id must not be empty")]
    EmptyId,
    #[error("provider id '{0}' must not have surrounding whitespace")]
    InvalidId(String),
    #[error("provider '{0}' is already registered")]
    DuplicateId(String),
    #[error("{name} is invalid: {reason}")]
    InvalidOverride { name: String, reason: String },
}

fn fallback_message(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::NoCredential => "no API key configured",
        ErrorKind::Timeout => "Timeout",
        ErrorKind::Unauthorized => "unauthorized",
        ErrorKind::RateLimited => "rate limited",
        ErrorKind::Network => "network error",
        ErrorKind::MalformedResponse => "malformed response",
        ErrorKind::UnknownProvider => "unknown provider",
        ErrorKind::Other => "unknown error",
    }
}
