#![allow(dead_code)]

use quiz_assistant::domain::{ProviderDescriptor, RequestFormat};
use quiz_assistant::infra::SessionCredentials;
use quiz_assistant::infra::llm::ProviderRegistry;

pub(crate) const TEST_KEY: &str = "test-key";

/// Built-in catalog with every endpoint rebased onto `base_url`, keeping the
/// original path.
pub(crate) fn registry_for(base_url: &str) -> ProviderRegistry {
    let descriptors = ProviderRegistry::builtin()
        .iter()
        .map(|descriptor| rebase(descriptor, base_url))
        .collect();
    ProviderRegistry::from_descriptors(descriptors).expect("rebased catalog should be valid")
}

pub(crate) fn descriptor_for(request_format: RequestFormat) -> ProviderDescriptor {
    ProviderRegistry::builtin()
        .iter()
        .find(|descriptor| descriptor.request_format == request_format)
        .cloned()
        .expect("every format should have a builtin provider")
}

pub(crate) fn all_keys() -> SessionCredentials {
    let credentials = SessionCredentials::new();
    for descriptor in ProviderRegistry::builtin().iter() {
        credentials.set(&descriptor.id, TEST_KEY);
    }
    credentials
}

fn rebase(descriptor: &ProviderDescriptor, base_url: &str) -> ProviderDescriptor {
    let path = descriptor
        .endpoint_template
        .splitn(4, '/')
        .nth(3)
        .unwrap_or_default();
    ProviderDescriptor {
        endpoint_template: format!("{}/{path}", base_url.trim_end_matches('/')),
        ..descriptor.clone()
    }
}
