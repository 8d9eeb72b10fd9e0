use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::infra::llm::env::{env_var_name, read_env_var};

/// Read-only access to provider API keys. Implementations decide where keys
/// live; dispatch only ever asks for one by provider id.
pub trait CredentialSource: Send + Sync {
    fn credential(&self, provider_id: &str) -> Option<String>;
}

impl<F> CredentialSource for F
where
    F: Fn(&str) -> Option<String> + Send + Sync,
{
    fn credential(&self, provider_id: &str) -> Option<String> {
        self(provider_id)
    }
}

/// Keys entered during the current session, held in memory only.
#[derive(Debug, Clone, Default)]
pub struct SessionCredentials {
    keys: Arc<RwLock<HashMap<String, String>>>,
}

impl SessionCredentials {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `api_key` for `provider_id`. Blank ids or keys are ignored.
    pub fn set(&self, provider_id: &str, api_key: &str) {
        let provider_id = provider_id.trim();
        let api_key = api_key.trim();
        if provider_id.is_empty() || api_key.is_empty() {
            return;
        }

        let mut keys = self
            .keys
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        keys.insert(provider_id.to_string(), api_key.to_string());
    }

    pub fn get(&self, provider_id: &str) -> Option<String> {
        let keys = self
            .keys
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        keys.get(provider_id).cloned()
    }

    pub fn has(&self, provider_id: &str) -> bool {
        self.get(provider_id).is_some()
    }

    pub fn remove(&self, provider_id: &str) {
        let mut keys = self
            .keys
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        keys.remove(provider_id);
    }

    pub fn clear(&self) {
        let mut keys = self
            .keys
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        keys.clear();
    }
}

impl CredentialSource for SessionCredentials {
    fn credential(&self, provider_id: &str) -> Option<String> {
        self.get(provider_id)
    }
}

type VarReader = fn(&str) -> Option<String>;

/// Keys from `QUIZ_ASSISTANT_API_KEY_<PROVIDER_ID>`.
#[derive(Debug, Clone, Copy)]
pub struct EnvCredentials {
    read: VarReader,
}

impl EnvCredentials {
    pub fn new() -> Self {
        Self::with_reader(|name| read_env_var(name).ok().flatten())
    }

    /// Resolves variables through `read` instead of the process environment.
    pub fn with_reader(read: VarReader) -> Self {
        Self { read }
    }

    pub fn variable_name(provider_id: &str) -> String {
        env_var_name(&["API_KEY", provider_id])
    }
}

impl Default for EnvCredentials {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialSource for EnvCredentials {
    fn credential(&self, provider_id: &str) -> Option<String> {
        (self.read)(&Self::variable_name(provider_id))
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::{CredentialSource, EnvCredentials, SessionCredentials};

    #[test]
    fn session_credentials_round_trip_keys() {
        let credentials = SessionCredentials::new();
        credentials.set("openai", " sk-1 ");

        assert!(credentials.has("openai"));
        assert_eq!(credentials.credential("openai").as_deref(), Some("sk-1"));
        assert_eq!(credentials.credential("cohere"), None);

        credentials.remove("openai");
        assert!(!credentials.has("openai"));
    }

    #[test]
    fn session_credentials_ignore_blank_input() {
        let credentials = SessionCredentials::new();
        credentials.set("", "sk-1");
        credentials.set("openai", "   ");

        assert!(!credentials.has(""));
        assert!(!credentials.has("openai"));
    }

    #[test]
    fn session_credentials_clear_removes_every_key() {
        let credentials = SessionCredentials::new();
        credentials.set("openai", "a");
        credentials.set("groq", "b");
        let shared = credentials.clone();

        shared.clear();

        assert!(!credentials.has("openai"));
        assert!(!credentials.has("groq"));
    }

    #[test]
    fn closures_act_as_credential_sources() {
        let lookup = |provider_id: &str| (provider_id == "groq").then(|| "gsk".to_string());

        assert_eq!(lookup.credential("groq").as_deref(), Some("gsk"));
        assert_eq!(lookup.credential("openai"), None);
    }

    #[test]
    fn env_credentials_read_provider_variable() {
        assert_eq!(
            EnvCredentials::variable_name("togetherai"),
            "QUIZ_ASSISTANT_API_KEY_TOGETHERAI"
        );

        let credentials = EnvCredentials::with_reader(|name| match name {
            "QUIZ_ASSISTANT_API_KEY_TOGETHERAI" => Some(" tg-key ".to_string()),
            "QUIZ_ASSISTANT_API_KEY_GROQ" => Some("   ".to_string()),
            _ => None,
        });

        assert_eq!(credentials.credential("togetherai").as_deref(), Some("tg-key"));
        assert_eq!(credentials.credential("groq"), None);
        assert_eq!(credentials.credential("openai"), None);
    }

    #[test]
    fn env_credentials_default_reads_process_environment() {
        let credentials = EnvCredentials::default();

        assert_eq!(
            credentials.credential("quiz-assistant-test-surely-unset-provider"),
            None
        );
    }
}
