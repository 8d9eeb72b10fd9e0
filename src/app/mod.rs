mod dispatcher;
mod prompt_builder;

pub use dispatcher::{DISPATCH_TIMEOUT, Dispatcher};
pub use prompt_builder::{PromptBuilder, PromptParams};
