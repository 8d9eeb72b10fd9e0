const SUBJECT_PLACEHOLDER: &str = "[object]";
const PROPERTIES_PLACEHOLDER: &str = "[properties]";

/// The three inputs of the assistant panel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptParams {
    pub subject: String,
    pub properties: Vec<String>,
    pub count: u32,
}

pub struct PromptBuilder;

impl PromptBuilder {
    /// Renders the assistant prompt, or `None` when every input is empty.
    pub fn build(params: &PromptParams) -> Option<String> {
        let subject = params.subject.trim();
        let properties = params
            .properties
            .iter()
            .map(|property| property.trim())
            .filter(|property| !property.is_empty())
            .collect::<Vec<_>>();

        if subject.is_empty() && properties.is_empty() && params.count == 0 {
            return None;
        }

        let subject = if subject.is_empty() {
            SUBJECT_PLACEHOLDER
        } else {
            subject
        };
        let properties = if properties.is_empty() {
            PROPERTIES_PLACEHOLDER.to_string()
        } else {
            properties.join(", ")
        };

        Some(format!(
            "Give generation parameters for {subject} which has the following properties \"{properties}\" and has {count} [unit of measure]",
            count = params.count,
        ))
    }
}
