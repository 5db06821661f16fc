//! Generation modes and their merge strategies.

use std::fmt;
use std::str::FromStr;

use super::prompts::{LIVE_COMPONENT_SYSTEM_PROMPT, PAGE_SCHEMA_SYSTEM_PROMPT};
use crate::schema::{PageSchema, SchemaError, SchemaNode, SchemaStore};

/// Bare script-setup opener models tend to emit for live components.
const BARE_SCRIPT_SETUP: &str = "<script setup>";
/// The opener the live renderer needs.
const TSX_SCRIPT_SETUP: &str = r#"<script setup lang="tsx">"#;

/// What the user asked for: a whole page or one component added to it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum GenerationMode {
    /// Replace the whole schema with the generated document.
    #[default]
    Page,
    /// Append one `Live` node holding the generated source.
    Component,
}

#[derive(Debug, thiserror::Error)]
#[error("unknown generation mode '{0}' (expected 'page' or 'component')")]
pub struct ParseModeError(String);

impl GenerationMode {
    pub const ALL: [Self; 2] = [Self::Page, Self::Component];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Page => "page",
            Self::Component => "component",
        }
    }

    #[must_use]
    pub fn system_prompt(self) -> &'static str {
        match self {
            Self::Page => PAGE_SCHEMA_SYSTEM_PROMPT,
            Self::Component => LIVE_COMPONENT_SYSTEM_PROMPT,
        }
    }

    /// Merge extracted `code` into the schema held by `store` and return
    /// the number of root children afterwards.
    ///
    /// Page mode parses `code` as a schema document and writes it as-is.
    /// Component mode reads the current document, appends a `Live` node and
    /// writes the whole document back; existing children are not touched.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Parse`] if page-mode `code` is not valid JSON,
    /// [`SchemaError::Shape`] if the component-mode document has no room
    /// for a root child, or any error of the store. The store is not
    /// written on a parse or shape error.
    pub async fn apply(self, code: &str, store: &dyn SchemaStore) -> Result<usize, SchemaError> {
        match self {
            Self::Page => {
                let schema = PageSchema::from_json(code)?;
                let children = schema.children().len();
                store.write(schema).await?;
                Ok(children)
            }
            Self::Component => {
                let mut schema = store.read().await?;
                let children = schema.push_child(SchemaNode::live(normalize_component_code(code)))?;
                store.write(schema).await?;
                Ok(children)
            }
        }
    }
}

/// Tag the first bare `<script setup>` opener with `lang="tsx"`.
#[must_use]
pub fn normalize_component_code(code: &str) -> String {
    code.replacen(BARE_SCRIPT_SETUP, TSX_SCRIPT_SETUP, 1)
}

impl fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GenerationMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "page" => Ok(Self::Page),
            "component" => Ok(Self::Component),
            other => Err(ParseModeError(other.to_string())),
        }
    }
}

#[cfg(test)]
#[path = "mode_test.rs"]
mod tests;
