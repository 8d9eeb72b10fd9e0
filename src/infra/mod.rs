mod credentials;
pub mod llm;

pub use credentials::{CredentialSource, EnvCredentials, SessionCredentials};
