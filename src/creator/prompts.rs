//! Static system prompts, one per generation mode.

/// Instructs the model to answer with a full page schema as JSON.
pub const PAGE_SCHEMA_SYSTEM_PROMPT: &str = include_str!("prompts/schema.system.md");

/// Instructs the model to answer with one live-rendered component.
pub const LIVE_COMPONENT_SYSTEM_PROMPT: &str = include_str!("prompts/live-component.system.md");
