//! Test doubles shared by unit tests across modules.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::llm::config::ApiConfig;
use crate::llm::types::{ChatRequest, Choice, LlmChat, LlmError};
use crate::schema::{PageSchema, SchemaError, SchemaStore};

// =========================================================================
// MockLlm
// =========================================================================

/// Scripted chat transport. Replays queued results in order and records
/// every request it receives. Once the queue is empty it answers with an
/// empty schema.
pub struct MockLlm {
    responses: Mutex<VecDeque<Result<Vec<Choice>, LlmError>>>,
    requests: Mutex<Vec<ChatRequest>>,
    yield_once: bool,
}

impl MockLlm {
    pub fn new(responses: Vec<Result<Vec<Choice>, LlmError>>) -> Self {
        Self { responses: Mutex::new(responses.into()), requests: Mutex::new(Vec::new()), yield_once: false }
    }

    /// Always answers with one assistant choice holding `text`.
    pub fn replying(text: &str) -> Self {
        Self::new(vec![Ok(vec![Choice::assistant(text)])])
    }

    pub fn failing(err: LlmError) -> Self {
        Self::new(vec![Err(err)])
    }

    /// Suspend once inside `chat` so other futures on the task can run
    /// while the request is in flight.
    pub fn yielding(mut self) -> Self {
        self.yield_once = true;
        self
    }

    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl LlmChat for MockLlm {
    async fn chat(&self, request: &ChatRequest, _config: &ApiConfig) -> Result<Vec<Choice>, LlmError> {
        self.requests.lock().unwrap().push(request.clone());
        let next = self.responses.lock().unwrap().pop_front();
        if self.yield_once {
            tokio::task::yield_now().await;
        }
        next.unwrap_or_else(|| Ok(vec![Choice::assistant("{\"children\":[]}")]))
    }
}

// =========================================================================
// Stores
// =========================================================================

/// Store whose reads succeed with a fixed document and whose writes fail.
pub struct FailingStore {
    schema: PageSchema,
    pub write_attempts: AtomicUsize,
}

impl FailingStore {
    pub fn new(schema: PageSchema) -> Self {
        Self { schema, write_attempts: AtomicUsize::new(0) }
    }
}

#[async_trait::async_trait]
impl SchemaStore for FailingStore {
    async fn read(&self) -> Result<PageSchema, SchemaError> {
        Ok(self.schema.clone())
    }

    async fn write(&self, _schema: PageSchema) -> Result<(), SchemaError> {
        self.write_attempts.fetch_add(1, Ordering::SeqCst);
        Err(SchemaError::Store("read-only".into()))
    }
}

// =========================================================================
// Fixtures
// =========================================================================

pub fn test_api_config() -> ApiConfig {
    ApiConfig::new("sk-test", "http://127.0.0.1:1/v1")
}

pub fn schema(json: &str) -> PageSchema {
    PageSchema::from_json(json).unwrap()
}
