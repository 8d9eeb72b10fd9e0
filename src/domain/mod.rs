mod errors;
mod exchange;
mod prompt;
mod provider;

pub use errors::{ClassifiedError, ErrorKind, RegistryError};
pub use exchange::{DispatchOutcome, Headers, OutboundRequest, RawResponse, header_value};
pub use prompt::{MAX_PROMPT_CHARS, validate_prompt};
pub use provider::{ProviderDescriptor, RequestFormat};
