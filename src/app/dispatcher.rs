use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::domain::{ClassifiedError, DispatchOutcome, validate_prompt};
use crate::infra::CredentialSource;
use crate::infra::llm::{
    HttpTransport, ProviderRegistry, ReqwestTransport, RequestFormatter, ResponseNormalizer,
};

/// Upper bound for one provider round trip, identical for every provider.
pub const DISPATCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Sends a prompt to a registered provider and reduces whatever happens to a
/// [`DispatchOutcome`].
///
/// Each call is one attempt with no retained state, so a single dispatcher
/// can serve any number of concurrent calls.
#[derive(Clone)]
pub struct Dispatcher {
    registry: ProviderRegistry,
    transport: Arc<dyn HttpTransport>,
}

impl Dispatcher {
    pub fn new(registry: ProviderRegistry, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            registry,
            transport,
        }
    }

    pub fn with_reqwest(registry: ProviderRegistry) -> Result<Self, ClassifiedError> {
        Ok(Self::new(registry, Arc::new(ReqwestTransport::new()?)))
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    pub async fn dispatch<C>(
        &self,
        prompt: &str,
        provider_id: &str,
        credentials: &C,
    ) -> DispatchOutcome
    where
        C: CredentialSource + ?Sized,
    {
        let Some(descriptor) = self.registry.lookup(provider_id) else {
            debug!(provider = provider_id, "dispatch rejected: unknown provider");
            return ClassifiedError::unknown_provider(provider_id).into();
        };

        if let Err(error) = validate_prompt(prompt) {
            debug!(provider = provider_id, %error, "dispatch rejected: invalid prompt");
            return error.into();
        }

        let credential = credentials
            .credential(&descriptor.id)
            .filter(|credential| !credential.trim().is_empty());
        let Some(credential) = credential else {
            debug!(provider = provider_id, "dispatch rejected: no credential");
            return ClassifiedError::no_credential(&descriptor.id).into();
        };

        let request = match RequestFormatter::format(prompt, descriptor, Some(&credential)) {
            Ok(request) => request,
            Err(error) => return error.into(),
        };

        debug!(
            provider = provider_id,
            format = descriptor.request_format.as_str(),
            prompt_chars = prompt.chars().count(),
            "dispatching prompt"
        );

        // Dropping the send future on timeout aborts the underlying connection.
        let response =
            match tokio::time::timeout(DISPATCH_TIMEOUT, self.transport.send(request)).await {
                Ok(Ok(response)) => response,
                Ok(Err(error)) => {
                    warn!(
                        provider = provider_id,
                        kind = %error.kind(),
                        %error,
                        "provider unreachable"
                    );
                    return error.into();
                }
                Err(_) => {
                    warn!(
                        provider = provider_id,
                        timeout_secs = DISPATCH_TIMEOUT.as_secs(),
                        "provider call timed out"
                    );
                    return ClassifiedError::timeout().into();
                }
            };

        let outcome = ResponseNormalizer::normalize(
            response.status,
            &response.headers,
            &response.body,
            descriptor,
        );
        match outcome.error() {
            None => debug!(provider = provider_id, status = response.status, "dispatch succeeded"),
            Some(error) => debug!(
                provider = provider_id,
                status = response.status,
                kind = %error.kind(),
                "dispatch failed"
            ),
        }
        outcome
    }
}
