//! Page creator — prompt form, chat round trip, schema merge.
//!
//! DESIGN
//! ======
//! [`Generator`] owns the collaborators (chat transport, schema store,
//! connection settings) and performs one generation: build the two-message
//! conversation, call the model, extract the code, merge it according to
//! the [`GenerationMode`].
//!
//! [`PageCreator`] is the form around it: mode, prompt, optional image and
//! the in-flight flag. A submission claims the flag atomically, so at most
//! one request is outstanding per form, and releases it on every exit path
//! (success, error, or the future being dropped).
//!
//! Errors are returned to the caller unchanged; the form never swallows a
//! failure and never clears the prompt or image on one.

pub mod image;
pub mod mode;
pub mod prompts;

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{info, warn};

pub use image::ImageAttachment;
pub use mode::GenerationMode;

use crate::error::ErrorCode;
use crate::llm::config::ApiConfig;
use crate::llm::extract::extract_code;
use crate::llm::types::{ChatRequest, ContentPart, LlmChat, LlmError, Message, ToolChoice};
use crate::schema::{SchemaError, SchemaStore};

/// Model every generation is sent to.
pub const GENERATION_MODEL: &str = "gpt-4-turbo";

pub const SUBMIT_LABEL: &str = "Generate";
pub const SUBMIT_LABEL_BUSY: &str = "Generating...";

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum CreatorError {
    #[error("a generation is already in flight")]
    Busy,
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),
    #[error("image read failed for {path}: {source}")]
    Image {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl ErrorCode for CreatorError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Busy => "E_BUSY",
            Self::Llm(_) => "E_LLM_ERROR",
            Self::Schema(_) => "E_SCHEMA_ERROR",
            Self::Image { .. } => "E_IMAGE_READ",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::Busy) || matches!(self, Self::Llm(e) if e.retryable())
    }
}

/// Summary of a successful generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationOutcome {
    pub mode: GenerationMode,
    /// Length in bytes of the extracted code.
    pub code_len: usize,
    /// Root children in the schema after the merge.
    pub children: usize,
}

// =============================================================================
// REQUEST CONSTRUCTION
// =============================================================================

/// System prompt for `mode`, then the user's text with the image (if any)
/// as a second part.
#[must_use]
pub fn build_messages(mode: GenerationMode, prompt: &str, image: Option<&ImageAttachment>) -> Vec<Message> {
    let mut parts = vec![ContentPart::text(prompt)];
    if let Some(image) = image {
        parts.push(ContentPart::image_url(image.data_url()));
    }
    vec![Message::system(mode.system_prompt()), Message::user_parts(parts)]
}

/// Full chat request: no tools, tool use disabled, fixed model.
#[must_use]
pub fn build_request(mode: GenerationMode, prompt: &str, image: Option<&ImageAttachment>) -> ChatRequest {
    ChatRequest {
        messages: build_messages(mode, prompt, image),
        tools: Vec::new(),
        model: GENERATION_MODEL.to_string(),
        tool_choice: ToolChoice::None,
    }
}

// =============================================================================
// GENERATOR
// =============================================================================

pub struct Generator {
    llm: Arc<dyn LlmChat>,
    store: Arc<dyn SchemaStore>,
    config: ApiConfig,
}

impl Generator {
    #[must_use]
    pub fn new(llm: Arc<dyn LlmChat>, store: Arc<dyn SchemaStore>, config: ApiConfig) -> Self {
        Self { llm, store, config }
    }

    /// Run one generation and merge the result into the schema store.
    ///
    /// # Errors
    ///
    /// Returns the first failure of the chat call, code extraction, schema
    /// parsing (page mode) or the store. Nothing is written unless every
    /// earlier step succeeded.
    pub async fn generate(
        &self,
        mode: GenerationMode,
        prompt: &str,
        image: Option<&ImageAttachment>,
    ) -> Result<GenerationOutcome, CreatorError> {
        let request = build_request(mode, prompt, image);
        let choices = self.llm.chat(&request, &self.config).await?;
        let code = extract_code(&choices)?;
        info!(%mode, code_len = code.len(), "creator: code extracted");

        let children = mode.apply(&code, self.store.as_ref()).await?;
        info!(%mode, children, "creator: schema saved");

        Ok(GenerationOutcome { mode, code_len: code.len(), children })
    }
}

// =============================================================================
// FORM
// =============================================================================

/// Holds the in-flight flag for the lifetime of one submission.
struct FetchGuard<'a>(&'a AtomicBool);

impl<'a> FetchGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for FetchGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// The prompt form: local state plus submission.
pub struct PageCreator {
    generator: Arc<Generator>,
    on_close: Box<dyn Fn() + Send + Sync>,
    mode: GenerationMode,
    prompt: String,
    image: Option<ImageAttachment>,
    fetching: AtomicBool,
}

impl PageCreator {
    /// `on_close` runs once after every successful generation.
    pub fn new(generator: Arc<Generator>, on_close: impl Fn() + Send + Sync + 'static) -> Self {
        Self {
            generator,
            on_close: Box::new(on_close),
            mode: GenerationMode::default(),
            prompt: String::new(),
            image: None,
            fetching: AtomicBool::new(false),
        }
    }

    #[must_use]
    pub fn mode(&self) -> GenerationMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: GenerationMode) {
        self.mode = mode;
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.prompt = prompt.into();
    }

    #[must_use]
    pub fn image(&self) -> Option<&ImageAttachment> {
        self.image.as_ref()
    }

    /// Attach `image`, replacing any previous attachment.
    pub fn attach_image(&mut self, image: ImageAttachment) {
        self.image = Some(image);
    }

    /// Read the first of `files` and attach it. Further files are ignored;
    /// an empty selection leaves the current attachment in place.
    ///
    /// # Errors
    ///
    /// Returns [`CreatorError::Image`] if the file cannot be read; the
    /// previous attachment is kept.
    pub async fn select_image_files<P: AsRef<Path>>(&mut self, files: &[P]) -> Result<(), CreatorError> {
        let Some(first) = files.first() else {
            return Ok(());
        };
        let image = ImageAttachment::from_path(first).await?;
        info!(mime = image.mime(), "creator: image attached");
        self.attach_image(image);
        Ok(())
    }

    #[must_use]
    pub fn is_fetching(&self) -> bool {
        self.fetching.load(Ordering::Acquire)
    }

    /// Prompt, image input and submit control are disabled exactly while a
    /// request is in flight.
    #[must_use]
    pub fn is_input_disabled(&self) -> bool {
        self.is_fetching()
    }

    #[must_use]
    pub fn submit_label(&self) -> &'static str {
        if self.is_fetching() { SUBMIT_LABEL_BUSY } else { SUBMIT_LABEL }
    }

    /// Generate from the current form state.
    ///
    /// On success the schema is updated and `on_close` has run once. On
    /// failure nothing is closed, the prompt and image stay as they were,
    /// and the error is returned for the host to surface.
    ///
    /// # Errors
    ///
    /// Returns [`CreatorError::Busy`] without sending anything if another
    /// submission of this form is in flight, otherwise any error of
    /// [`Generator::generate`].
    pub async fn submit(&self) -> Result<GenerationOutcome, CreatorError> {
        let Some(_fetching) = FetchGuard::acquire(&self.fetching) else {
            warn!(mode = %self.mode, "creator: submit ignored, request in flight");
            return Err(CreatorError::Busy);
        };
        info!(
            mode = %self.mode,
            prompt_len = self.prompt.len(),
            has_image = self.image.is_some(),
            "creator: submitting"
        );

        match self
            .generator
            .generate(self.mode, &self.prompt, self.image.as_ref())
            .await
        {
            Ok(outcome) => {
                (self.on_close)();
                Ok(outcome)
            }
            Err(e) => {
                warn!(error = %e, code = e.error_code(), "creator: generation failed");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
