//! Page creator — natural-language page and component generation for a
//! visual page builder.
//!
//! ARCHITECTURE
//! ============
//! The `creator` form collects a mode, a prompt and an optional image, sends
//! them to an OpenAI-compatible chat endpoint through [`llm::LlmChat`],
//! pulls a code block out of the reply, and merges it into the page schema
//! held by a [`schema::SchemaStore`]. Both collaborators are traits so hosts
//! and tests can swap them out.

pub mod creator;
pub mod error;
pub mod llm;
pub mod schema;

#[cfg(feature = "ui")]
pub mod ui;

#[cfg(test)]
pub(crate) mod test_helpers;
