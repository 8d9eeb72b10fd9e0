use super::ClassifiedError;

pub const MAX_PROMPT_CHARS: usize = 4000;

/// Rejects prompts that are blank or longer than [`MAX_PROMPT_CHARS`]
/// Unicode scalar values. The bound is the same for every provider.
pub fn validate_prompt(prompt: &str) -> Result<(), ClassifiedError> {
    if prompt.trim().is_empty() {
        return Err(ClassifiedError::other("Prompt is empty"));
    }
    if prompt.chars().count() > MAX_PROMPT_CHARS {
        return Err(ClassifiedError::other(format!(
            "Prompt exceeds {MAX_PROMPT_CHARS} characters"
        )));
    }
    Ok(())
}
