use serde_json::Value;

use crate::domain::{Headers, header_value};

/// `application/json` or any `+json` structured syntax suffix. Parameters
/// such as `charset` are ignored.
pub(crate) fn is_json_content_type(headers: &Headers) -> bool {
    let Some(content_type) = header_value(headers, "content-type") else {
        return false;
    };
    let media_type = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    media_type == "application/json" || media_type.ends_with("+json")
}

/// Best human-readable message in a provider error body.
pub(crate) fn extract_error_message(body: &str) -> Option<String> {
    let Ok(json) = serde_json::from_str::<Value>(body) else {
        return non_empty_owned(body);
    };

    let error = json.get("error");
    error
        .and_then(|error| error.get("message"))
        .and_then(Value::as_str)
        .and_then(non_empty_owned)
        .or_else(|| error.and_then(Value::as_str).and_then(non_empty_owned))
        .or_else(|| {
            json.get("message")
                .and_then(Value::as_str)
                .and_then(non_empty_owned)
        })
        .or_else(|| non_empty_owned(&json.to_string()))
}

pub(crate) fn non_empty_owned(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
