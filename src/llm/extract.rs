//! Code extraction from chat completions.
//!
//! Models usually wrap generated code in a Markdown fence, sometimes with
//! prose around it. The first fenced block of the first choice wins; an
//! unfenced reply is taken as code verbatim.

use std::sync::LazyLock;

use regex::Regex;

use super::types::{Choice, LlmError};

/// Opening fence with optional language tag, body, closing fence.
static FENCED_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```[^\n`]*\n(.*?)```").expect("fenced block regex pattern is valid"));

/// Pull the generated source code out of the model's choices.
///
/// # Errors
///
/// Returns [`LlmError::EmptyCompletion`] when there is no choice or the
/// first choice carries no non-blank text.
pub fn extract_code(choices: &[Choice]) -> Result<String, LlmError> {
    let content = choices
        .first()
        .and_then(|choice| choice.message.content.as_deref())
        .filter(|text| !text.trim().is_empty())
        .ok_or(LlmError::EmptyCompletion)?;

    let code = FENCED_BLOCK
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map_or(content, |body| body.as_str());
    Ok(code.trim().to_string())
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
