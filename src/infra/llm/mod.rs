pub(crate) mod env;
mod provider_registry;
mod request_formatter;
mod response_normalizer;
mod response_parsing;
mod transport;

pub use provider_registry::ProviderRegistry;
pub use request_formatter::{DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE, RequestFormatter};
pub use response_normalizer::ResponseNormalizer;
pub use transport::{HttpTransport, ReqwestTransport};
