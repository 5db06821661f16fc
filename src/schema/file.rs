//! Schema store backed by a JSON file.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{PageSchema, SchemaError, SchemaStore};

/// Reads and writes the whole document as pretty-printed JSON. A missing
/// file reads as an empty schema.
#[derive(Debug, Clone)]
pub struct FileSchemaStore {
    path: PathBuf,
}

impl FileSchemaStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> SchemaError {
        SchemaError::Io { path: self.path.display().to_string(), source }
    }
}

#[async_trait::async_trait]
impl SchemaStore for FileSchemaStore {
    async fn read(&self) -> Result<PageSchema, SchemaError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => PageSchema::from_json(&text),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "schema: file missing, starting empty");
                Ok(PageSchema::default())
            }
            Err(e) => Err(self.io_error(e)),
        }
    }

    async fn write(&self, schema: PageSchema) -> Result<(), SchemaError> {
        let text = serde_json::to_string_pretty(&schema).map_err(|e| SchemaError::Store(e.to_string()))?;
        tokio::fs::write(&self.path, text)
            .await
            .map_err(|e| self.io_error(e))?;
        debug!(path = %self.path.display(), children = schema.children().len(), "schema: written");
        Ok(())
    }
}
