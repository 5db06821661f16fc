//! Leptos components for hosting the page creator in the builder UI.
//!
//! SYSTEM CONTEXT
//! ==============
//! The host mounts [`PageCreatorDialog`] inside its own dialog chrome and
//! shows [`PageCreatorTrigger`] wherever the entry point belongs. Browser
//! file access is compiled in with the `hydrate` feature only.

pub mod page_creator;
pub mod trigger;

pub use page_creator::PageCreatorDialog;
pub use trigger::PageCreatorTrigger;
