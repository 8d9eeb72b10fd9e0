use serde_json::Value;

use crate::domain::{
    ClassifiedError, DispatchOutcome, ErrorKind, Headers, ProviderDescriptor, RequestFormat,
};

use super::response_parsing::{extract_error_message, is_json_content_type, non_empty_owned};

pub struct ResponseNormalizer;

impl ResponseNormalizer {
    /// Turns a received HTTP response into an outcome. Never panics and never
    /// yields a failure without a message.
    pub fn normalize(
        status: u16,
        headers: &Headers,
        raw_body: &str,
        descriptor: &ProviderDescriptor,
    ) -> DispatchOutcome {
        if !(200..300).contains(&status) {
            return DispatchOutcome::Failure(classify_http_error(status, raw_body));
        }

        if !is_json_content_type(headers) {
            return DispatchOutcome::success(raw_body);
        }

        let json = match serde_json::from_str::<Value>(raw_body) {
            Ok(json) => json,
            Err(err) => {
                return DispatchOutcome::Failure(ClassifiedError::malformed_response(
                    err.to_string(),
                ));
            }
        };

        let extracted = match descriptor.request_format {
            RequestFormat::ChatCompletion => extract_chat_completion(&json),
            RequestFormat::SingleModelInference => extract_inference(&json),
            RequestFormat::CompletionGenerate => extract_generation(&json),
            RequestFormat::Generic => None,
        };

        DispatchOutcome::success(extracted.unwrap_or_else(|| json.to_string()))
    }
}

fn classify_http_error(status: u16, raw_body: &str) -> ClassifiedError {
    let kind = match status {
        401 | 403 => ErrorKind::Unauthorized,
        429 => ErrorKind::RateLimited,
        _ => ErrorKind::Other,
    };
    let message = extract_error_message(raw_body).unwrap_or_else(|| format!("HTTP {status}"));

    ClassifiedError::new(kind, message)
}

// choices[0].message.content, then choices[0].text
fn extract_chat_completion(json: &Value) -> Option<String> {
    let choice = json.get("choices")?.get(0)?;

    choice
        .get("message")
        .and_then(|message| message.get("content"))
        .and_then(extract_message_content)
        .or_else(|| choice.get("text").and_then(non_empty_str))
}

fn extract_inference(json: &Value) -> Option<String> {
    let first = json.as_array().and_then(|items| items.first());

    first
        .and_then(|item| item.get("generated_text"))
        .and_then(non_empty_str)
        .or_else(|| {
            first
                .and_then(|item| item.get("summary_text"))
                .and_then(non_empty_str)
        })
        .or_else(|| json.get("generated_text").and_then(non_empty_str))
}

fn extract_generation(json: &Value) -> Option<String> {
    json.get("generations")?
        .get(0)?
        .get("text")
        .and_then(non_empty_str)
}

fn extract_message_content(content: &Value) -> Option<String> {
    match content {
        Value::String(text) => non_empty_text(text),
        Value::Array(parts) => {
            let joined = parts
                .iter()
                .filter_map(extract_content_part_text)
                .collect::<String>();
            non_empty_text(&joined)
        }
        _ => None,
    }
}

fn extract_content_part_text(part: &Value) -> Option<&str> {
    match part {
        Value::String(text) => Some(text),
        Value::Object(map) => map.get("text").and_then(Value::as_str),
        _ => None,
    }
}

// Answer text is returned as the provider sent it; only all-blank text
// counts as missing.
fn non_empty_str(value: &Value) -> Option<String> {
    value.as_str().and_then(non_empty_text)
}

fn non_empty_text(text: &str) -> Option<String> {
    non_empty_owned(text).map(|_| text.to_string())
}
