use crate::domain::RegistryError;

pub(crate) const ENV_PREFIX: &str = "QUIZ_ASSISTANT";

pub(crate) fn read_env_var(name: &str) -> Result<Option<String>, RegistryError> {
    match std::env::var(name) {
        Ok(value) => Ok(Some(value)),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(error) => Err(RegistryError::InvalidOverride {
            name: name.to_string(),
            reason: format!("could not be read: {error}"),
        }),
    }
}

/// Reads an override through `read` that, when present, must not be blank.
pub(crate) fn read_non_blank_with<F>(name: &str, read: F) -> Result<Option<String>, RegistryError>
where
    F: FnOnce(&str) -> Result<Option<String>, RegistryError>,
{
    let Some(value) = read(name)? else {
        return Ok(None);
    };

    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(RegistryError::InvalidOverride {
            name: name.to_string(),
            reason: "must not be empty".to_string(),
        });
    }
    Ok(Some(trimmed.to_string()))
}

/// `QUIZ_ASSISTANT_<SEGMENT>_<PROVIDER>` style variable name. The provider id
/// is upper-cased and anything outside `[A-Z0-9]` becomes `_`.
pub(crate) fn env_var_name(parts: &[&str]) -> String {
    let mut name = String::from(ENV_PREFIX);
    for part in parts {
        name.push('_');
        name.extend(part.chars().map(|ch| {
            if ch.is_ascii_alphanumeric() {
                ch.to_ascii_uppercase()
            } else {
                '_'
            }
        }));
    }
    name
}
