//! Page schema document and the store that owns it.
//!
//! DESIGN
//! ======
//! The page builder renders a tree of node descriptors. The document is held
//! as opaque JSON: page mode stores whatever the model produced, and
//! component mode only ever appends to the root `children` array. Existing
//! nodes and every other key pass through a read → modify → write cycle
//! unchanged, key order included.
//!
//! The store is a trait so the document's owner (the host app, a file, a
//! test) decides where it lives. Writes are whole-document replacements
//! with no transaction boundary.

pub mod file;
pub mod memory;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub use file::FileSchemaStore;
pub use memory::MemorySchemaStore;

use crate::error::ErrorCode;

/// Component name of nodes that render model-generated source code.
pub const LIVE_COMPONENT: &str = "Live";

const CHILDREN: &str = "children";

// =============================================================================
// ERROR
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// Text that should hold a schema document is not valid JSON.
    #[error("schema parse failed: {0}")]
    Parse(String),

    /// The document cannot take a new root child.
    #[error("schema shape invalid: {0}")]
    Shape(String),

    #[error("schema I/O failed for {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The backing store refused the operation.
    #[error("schema store failed: {0}")]
    Store(String),
}

impl ErrorCode for SchemaError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Parse(_) => "E_SCHEMA_PARSE",
            Self::Shape(_) => "E_SCHEMA_SHAPE",
            Self::Io { .. } => "E_SCHEMA_IO",
            Self::Store(_) => "E_SCHEMA_STORE",
        }
    }
}

// =============================================================================
// DOCUMENT
// =============================================================================

/// Node descriptor appended by component mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaNode {
    pub component_name: String,
    pub props: Map<String, Value>,
}

impl SchemaNode {
    /// `{ componentName: "Live", props: { code } }`.
    #[must_use]
    pub fn live(code: impl Into<String>) -> Self {
        let mut props = Map::new();
        props.insert("code".into(), Value::String(code.into()));
        Self { component_name: LIVE_COMPONENT.into(), props }
    }
}

impl From<SchemaNode> for Value {
    fn from(node: SchemaNode) -> Self {
        let mut map = Map::new();
        map.insert("componentName".into(), Value::String(node.component_name));
        map.insert("props".into(), Value::Object(node.props));
        Value::Object(map)
    }
}

/// Root of the page tree, kept exactly as written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageSchema(Value);

impl Default for PageSchema {
    /// `{ "children": [] }`.
    fn default() -> Self {
        let mut root = Map::new();
        root.insert(CHILDREN.into(), Value::Array(Vec::new()));
        Self(Value::Object(root))
    }
}

impl PageSchema {
    /// Parse a serialized schema document. Any JSON value is accepted; no
    /// structure is checked.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Parse`] if `text` is not valid JSON.
    pub fn from_json(text: &str) -> Result<Self, SchemaError> {
        serde_json::from_str(text)
            .map(Self)
            .map_err(|e| SchemaError::Parse(e.to_string()))
    }

    #[must_use]
    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    #[must_use]
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    #[must_use]
    pub fn into_value(self) -> Value {
        self.0
    }

    /// Root children, or an empty slice when the root has none.
    #[must_use]
    pub fn children(&self) -> &[Value] {
        self.0
            .get(CHILDREN)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Append `node` to the root `children` array and return the new child
    /// count. An object root without `children` gets the array created;
    /// nothing else in the document changes.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Shape`] if the root is not an object or its
    /// `children` is not an array.
    pub fn push_child(&mut self, node: impl Into<Value>) -> Result<usize, SchemaError> {
        let Value::Object(root) = &mut self.0 else {
            return Err(SchemaError::Shape("root is not an object".into()));
        };
        let children = root
            .entry(CHILDREN)
            .or_insert_with(|| Value::Array(Vec::new()));
        let Value::Array(children) = children else {
            return Err(SchemaError::Shape("root children is not an array".into()));
        };
        children.push(node.into());
        Ok(children.len())
    }
}

// =============================================================================
// STORE
// =============================================================================

/// Owner of the current page schema.
#[async_trait::async_trait]
pub trait SchemaStore: Send + Sync {
    /// Return a copy of the current document.
    ///
    /// # Errors
    ///
    /// Returns a [`SchemaError`] if the document cannot be loaded.
    async fn read(&self) -> Result<PageSchema, SchemaError>;

    /// Replace the current document.
    ///
    /// # Errors
    ///
    /// Returns a [`SchemaError`] if the document cannot be stored.
    async fn write(&self, schema: PageSchema) -> Result<(), SchemaError>;
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
