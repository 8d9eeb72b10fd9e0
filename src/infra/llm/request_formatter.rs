use serde::Serialize;

use crate::domain::{
    ClassifiedError, Headers, OutboundRequest, ProviderDescriptor, RequestFormat,
    validate_prompt,
};

pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 800;

const JSON_MEDIA_TYPE: &str = "application/json";

pub struct RequestFormatter;

impl RequestFormatter {
    /// Builds the wire request for `descriptor`. The body shape is chosen by
    /// the descriptor's format tag and nothing else.
    pub fn format(
        prompt: &str,
        descriptor: &ProviderDescriptor,
        credential: Option<&str>,
    ) -> Result<OutboundRequest, ClassifiedError> {
        let credential = credential
            .map(str::trim)
            .filter(|credential| !credential.is_empty())
            .ok_or_else(|| ClassifiedError::no_credential(&descriptor.id))?;
        validate_prompt(prompt)?;

        let body = match descriptor.request_format {
            RequestFormat::ChatCompletion => encode(&ChatCompletionRequest {
                model: &descriptor.default_model,
                messages: [ChatMessage {
                    role: "user",
                    content: prompt,
                }],
                temperature: DEFAULT_TEMPERATURE,
                max_tokens: DEFAULT_MAX_TOKENS,
            })?,
            RequestFormat::SingleModelInference => encode(&InferenceRequest { inputs: prompt })?,
            RequestFormat::CompletionGenerate => encode(&GenerateRequest {
                model: &descriptor.default_model,
                prompt,
                max_tokens: DEFAULT_MAX_TOKENS,
                temperature: DEFAULT_TEMPERATURE,
            })?,
            RequestFormat::Generic => encode(&GenericRequest { prompt })?,
        };

        let mut headers = Headers::new();
        headers.insert(
            descriptor.auth_header_name.clone(),
            descriptor.auth_header_value(credential),
        );
        headers.insert("Accept".to_string(), JSON_MEDIA_TYPE.to_string());
        headers.insert("Content-Type".to_string(), JSON_MEDIA_TYPE.to_string());

        Ok(OutboundRequest {
            url: descriptor.endpoint_url(),
            method: "POST".to_string(),
            headers,
            body,
        })
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct GenericRequest<'a> {
    prompt: &'a str,
}

fn encode<T: Serialize>(payload: &T) -> Result<String, ClassifiedError> {
    serde_json::to_string(payload)
        .map_err(|err| ClassifiedError::other(format!("request body encode failed: {err}")))
}
