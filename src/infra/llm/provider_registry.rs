use std::sync::{Arc, LazyLock};

use crate::domain::{ProviderDescriptor, RegistryError, RequestFormat};

use super::env::{env_var_name, read_env_var, read_non_blank_with};

const BEARER_HEADER: &str = "Authorization";
const BEARER_PREFIX: &str = "Bearer ";

static BUILTIN: LazyLock<ProviderRegistry> = LazyLock::new(|| ProviderRegistry {
    providers: Arc::from(builtin_descriptors()),
});

/// Ordered, immutable provider catalog. Cloning shares the underlying
/// descriptors.
#[derive(Debug, Clone)]
pub struct ProviderRegistry {
    providers: Arc<[ProviderDescriptor]>,
}

impl ProviderRegistry {
    pub fn builtin() -> Self {
        BUILTIN.clone()
    }

    /// The built-in catalog with `QUIZ_ASSISTANT_<ID>_ENDPOINT` and
    /// `QUIZ_ASSISTANT_<ID>_MODEL` applied.
    pub fn builtin_from_env() -> Result<Self, RegistryError> {
        Self::builtin_with_overrides(read_env_var)
    }

    fn builtin_with_overrides<F>(read: F) -> Result<Self, RegistryError>
    where
        F: Fn(&str) -> Result<Option<String>, RegistryError>,
    {
        let mut descriptors = builtin_descriptors();
        for descriptor in &mut descriptors {
            let endpoint_var = env_var_name(&[descriptor.id.as_str(), "ENDPOINT"]);
            if let Some(endpoint) = read_non_blank_with(&endpoint_var, &read)? {
                descriptor.endpoint_template = endpoint;
            }
            let model_var = env_var_name(&[descriptor.id.as_str(), "MODEL"]);
            if let Some(model) = read_non_blank_with(&model_var, &read)? {
                descriptor.default_model = model;
            }
        }
        Self::from_descriptors(descriptors)
    }

    pub fn from_descriptors(descriptors: Vec<ProviderDescriptor>) -> Result<Self, RegistryError> {
        for (index, descriptor) in descriptors.iter().enumerate() {
            let id = descriptor.id.trim();
            if id.is_empty() {
                return Err(RegistryError::EmptyId);
            }
            if id != descriptor.id {
                return Err(RegistryError::InvalidId(descriptor.id.clone()));
            }
            if descriptors[..index].iter().any(|other| other.id == id) {
                return Err(RegistryError::DuplicateId(id.to_string()));
            }
        }

        Ok(Self {
            providers: Arc::from(descriptors),
        })
    }

    pub fn lookup(&self, provider_id: &str) -> Option<&ProviderDescriptor> {
        self.providers
            .iter()
            .find(|descriptor| descriptor.id == provider_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProviderDescriptor> {
        self.providers.iter()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.providers
            .iter()
            .map(|descriptor| descriptor.id.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

fn builtin_descriptors() -> Vec<ProviderDescriptor> {
    vec![
        bearer_descriptor(
            "openai",
            "OpenAI (gpt-3.5/gpt-4)",
            "https://api.openai.com/v1/chat/completions",
            "gpt-3.5-turbo",
            RequestFormat::ChatCompletion,
            "Get a key at https://platform.openai.com/account/api-keys",
        ),
        bearer_descriptor(
            "huggingface",
            "Hugging Face Inference",
            "https://api-inference.huggingface.co/models/",
            "gpt2",
            RequestFormat::SingleModelInference,
            "Get a key at https://huggingface.co/settings/tokens",
        ),
        bearer_descriptor(
            "cohere",
            "Cohere",
            "https://api.cohere.ai/generate",
            "command-xlarge-nightly",
            RequestFormat::CompletionGenerate,
            "Get a key at https://dashboard.cohere.ai/api-keys",
        ),
        bearer_descriptor(
            "togetherai",
            "TogetherAI",
            "https://api.together.ai/inference",
            "gpt-j",
            RequestFormat::Generic,
            "Get a key from the TogetherAI dashboard",
        ),
        bearer_descriptor(
            "groq",
            "Groq",
            "https://api.groq.ai/v1/models/",
            "groq-1",
            RequestFormat::Generic,
            "Get a key from the Groq console",
        ),
    ]
}

fn bearer_descriptor(
    id: &str,
    display_name: &str,
    endpoint_template: &str,
    default_model: &str,
    request_format: RequestFormat,
    key_instructions: &str,
) -> ProviderDescriptor {
    ProviderDescriptor {
        id: id.to_string(),
        display_name: display_name.to_string(),
        endpoint_template: endpoint_template.to_string(),
        default_model: default_model.to_string(),
        auth_header_name: BEARER_HEADER.to_string(),
        auth_value_prefix: BEARER_PREFIX.to_string(),
        request_format,
        key_instructions: key_instructions.to_string(),
        is_free: true,
    }
}

#[cfg(test)]
mod tests {
    use super::{ProviderRegistry, bearer_descriptor};
    use crate::domain::{ProviderDescriptor, RegistryError, RequestFormat};

    #[test]
    fn builtin_lists_providers_in_catalog_order() {
        let registry = ProviderRegistry::builtin();

        assert_eq!(
            registry.ids(),
            vec!["openai", "huggingface", "cohere", "togetherai", "groq"]
        );
        assert_eq!(registry.len(), 5);
    }

    #[test]
    fn builtin_assigns_one_format_per_provider() {
        let registry = ProviderRegistry::builtin();
        let format_of = |id: &str| {
            registry
                .lookup(id)
                .map(|descriptor| descriptor.request_format)
        };

        assert_eq!(format_of("openai"), Some(RequestFormat::ChatCompletion));
        assert_eq!(
            format_of("huggingface"),
            Some(RequestFormat::SingleModelInference)
        );
        assert_eq!(format_of("cohere"), Some(RequestFormat::CompletionGenerate));
        assert_eq!(format_of("togetherai"), Some(RequestFormat::Generic));
        assert_eq!(format_of("groq"), Some(RequestFormat::Generic));
    }

    #[test]
    fn lookup_returns_none_for_unknown_id() {
        let registry = ProviderRegistry::builtin();

        assert!(registry.lookup("anthropic").is_none());
        assert!(registry.lookup("OpenAI").is_none());
    }

    #[test]
    fn from_descriptors_rejects_duplicate_id() {
        let descriptor = bearer_descriptor(
            "openai",
            "OpenAI",
            "https://example.test",
            "gpt",
            RequestFormat::ChatCompletion,
            "",
        );

        let error = ProviderRegistry::from_descriptors(vec![descriptor.clone(), descriptor])
            .expect_err("duplicate ids should fail");

        assert_eq!(error, RegistryError::DuplicateId("openai".to_string()));
    }

    fn generic_descriptor(id: &str) -> ProviderDescriptor {
        bearer_descriptor(
            id,
            "Test",
            "https://example.test",
            "gpt",
            RequestFormat::Generic,
            "",
        )
    }

    #[test]
    fn from_descriptors_rejects_empty_id() {
        for id in ["", "  "] {
            let error = ProviderRegistry::from_descriptors(vec![generic_descriptor(id)])
                .expect_err("blank ids should fail");
            assert_eq!(error, RegistryError::EmptyId);
        }
    }

    #[test]
    fn from_descriptors_rejects_padded_id_by_name() {
        let error = ProviderRegistry::from_descriptors(vec![generic_descriptor(" openai")])
            .expect_err("padded ids should fail");

        assert_eq!(error, RegistryError::InvalidId(" openai".to_string()));
        assert!(error.to_string().contains("surrounding whitespace"));
    }

    #[test]
    fn builtin_with_overrides_applies_to_named_provider_only() {
        let registry = ProviderRegistry::builtin_with_overrides(|name| {
            Ok(match name {
                "QUIZ_ASSISTANT_COHERE_ENDPOINT" => {
                    Some("http://127.0.0.1:9/generate".to_string())
                }
                "QUIZ_ASSISTANT_COHERE_MODEL" => Some(" command-r ".to_string()),
                _ => None,
            })
        })
        .expect("overrides should apply");

        let cohere = registry.lookup("cohere").expect("cohere should exist");
        assert_eq!(cohere.endpoint_template, "http://127.0.0.1:9/generate");
        assert_eq!(cohere.default_model, "command-r");

        let openai = registry.lookup("openai").expect("openai should exist");
        assert_eq!(
            openai.endpoint_template,
            "https://api.openai.com/v1/chat/completions"
        );
        assert_eq!(openai.default_model, "gpt-3.5-turbo");
    }

    #[test]
    fn builtin_with_overrides_rejects_blank_override() {
        let error = ProviderRegistry::builtin_with_overrides(|name| {
            Ok((name == "QUIZ_ASSISTANT_GROQ_MODEL").then(|| "  ".to_string()))
        })
        .expect_err("blank override should fail");

        assert_eq!(
            error,
            RegistryError::InvalidOverride {
                name: "QUIZ_ASSISTANT_GROQ_MODEL".to_string(),
                reason: "must not be empty".to_string(),
            }
        );
    }

    #[test]
    fn builtin_with_overrides_without_variables_matches_builtin() {
        let registry =
            ProviderRegistry::builtin_with_overrides(|_| Ok(None)).expect("no overrides");

        assert_eq!(registry.ids(), ProviderRegistry::builtin().ids());
    }
}
