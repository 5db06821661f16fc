//! In-process schema store.

use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::RwLock;

use super::{PageSchema, SchemaError, SchemaStore};

/// Schema held in memory behind an async `RwLock`. Never fails.
#[derive(Debug, Default)]
pub struct MemorySchemaStore {
    schema: RwLock<PageSchema>,
    /// Bumped on every write.
    revision: AtomicU64,
}

impl MemorySchemaStore {
    #[must_use]
    pub fn new(schema: PageSchema) -> Self {
        Self { schema: RwLock::new(schema), revision: AtomicU64::new(0) }
    }

    /// Number of writes since construction.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision.load(Ordering::Acquire)
    }
}

#[async_trait::async_trait]
impl SchemaStore for MemorySchemaStore {
    async fn read(&self) -> Result<PageSchema, SchemaError> {
        Ok(self.schema.read().await.clone())
    }

    async fn write(&self, schema: PageSchema) -> Result<(), SchemaError> {
        *self.schema.write().await = schema;
        self.revision.fetch_add(1, Ordering::AcqRel);
        Ok(())
    }
}
