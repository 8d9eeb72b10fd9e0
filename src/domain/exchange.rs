use std::collections::BTreeMap;

use super::ClassifiedError;

/// Header map with deterministic iteration order.
pub type Headers = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundRequest {
    pub url: String,
    pub method: String,
    pub headers: Headers,
    pub body: String,
}

/// What the transport hands back once a response has been fully read.
/// Header names are lower-cased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub headers: Headers,
    pub body: String,
}

pub fn header_value<'a>(headers: &'a Headers, name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}

/// Result of one dispatch attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Success { text: String },
    Failure(ClassifiedError),
}

impl DispatchOutcome {
    pub fn success(text: impl Into<String>) -> Self {
        Self::Success { text: text.into() }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Success { text } => Some(text),
            Self::Failure(_) => None,
        }
    }

    pub fn error(&self) -> Option<&ClassifiedError> {
        match self {
            Self::Success { .. } => None,
            Self::Failure(error) => Some(error),
        }
    }

    pub fn into_result(self) -> Result<String, ClassifiedError> {
        match self {
            Self::Success { text } => Ok(text),
            Self::Failure(error) => Err(error),
        }
    }
}

impl From<ClassifiedError> for DispatchOutcome {
    fn from(error: ClassifiedError) -> Self {
        Self::Failure(error)
    }
}

impl From<Result<String, ClassifiedError>> for DispatchOutcome {
    fn from(result: Result<String, ClassifiedError>) -> Self {
        match result {
            Ok(text) => Self::Success { text },
            Err(error) => Self::Failure(error),
        }
    }
}
