use serde::{Deserialize, Serialize};

/// Body and response shape a provider speaks. Every formatting and
/// normalization decision is keyed on this tag alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RequestFormat {
    ChatCompletion,
    SingleModelInference,
    CompletionGenerate,
    Generic,
}

impl RequestFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ChatCompletion => "chat-completion",
            Self::SingleModelInference => "single-model-inference",
            Self::CompletionGenerate => "completion-generate",
            Self::Generic => "generic",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderDescriptor {
    pub id: String,
    pub display_name: String,
    pub endpoint_template: String,
    pub default_model: String,
    pub auth_header_name: String,
    pub auth_value_prefix: String,
    pub request_format: RequestFormat,
    #[serde(default)]
    pub key_instructions: String,
    #[serde(default)]
    pub is_free: bool,
}

impl ProviderDescriptor {
    /// Target URL for this provider. Single-model inference endpoints take
    /// the model name as the final path segment.
    pub fn endpoint_url(&self) -> String {
        match self.request_format {
            RequestFormat::SingleModelInference => {
                format!("{}{}", self.endpoint_template, self.default_model)
            }
            RequestFormat::ChatCompletion
            | RequestFormat::CompletionGenerate
            | RequestFormat::Generic => self.endpoint_template.clone(),
        }
    }

    pub fn auth_header_value(&self, credential: &str) -> String {
        format!("{}{}", self.auth_value_prefix, credential)
    }
}
