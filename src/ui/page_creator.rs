//! Prompt form for generating a page or a live component.
//!
//! The form mirrors [`crate::creator::PageCreator`] with reactive state in
//! [`DialogState`]: the in-flight signal is checked and set synchronously
//! in the click handler, so a second click during a request never reaches
//! the model.

use std::sync::Arc;

use leptos::prelude::*;

use crate::creator::{CreatorError, GenerationMode, Generator, ImageAttachment, SUBMIT_LABEL, SUBMIT_LABEL_BUSY};
use crate::error::ErrorCode;

const PROMPT_PLACEHOLDER: &str = "Describe the page or component you need. Text, an image, or both.";

/// Radio label for each mode.
#[must_use]
pub fn mode_label(mode: GenerationMode) -> &'static str {
    match mode {
        GenerationMode::Page => "Page",
        GenerationMode::Component => "Live component",
    }
}

/// Reactive form state of the dialog.
#[derive(Clone, Copy)]
pub struct DialogState {
    pub mode: RwSignal<GenerationMode>,
    pub prompt: RwSignal<String>,
    pub image: RwSignal<Option<ImageAttachment>>,
    pub fetching: RwSignal<bool>,
}

impl Default for DialogState {
    fn default() -> Self {
        Self {
            mode: RwSignal::new(GenerationMode::default()),
            prompt: RwSignal::new(String::new()),
            image: RwSignal::new(None),
            fetching: RwSignal::new(false),
        }
    }
}

impl DialogState {
    pub fn submit_label(self) -> &'static str {
        if self.fetching.get() { SUBMIT_LABEL_BUSY } else { SUBMIT_LABEL }
    }

    /// Claim the in-flight flag and snapshot the form. Returns the
    /// submission to spawn, or `None` if one is already running.
    ///
    /// The returned future clears `fetching`, then runs `on_close` on
    /// success or hands the error to `on_error`. Prompt and image are left
    /// as they were either way.
    pub fn start_submit(
        self,
        generator: Arc<Generator>,
        on_close: Callback<()>,
        on_error: Option<Callback<CreatorError>>,
    ) -> Option<impl Future<Output = ()> + 'static> {
        if self.fetching.get_untracked() {
            tracing::debug!("ui: submit ignored, request in flight");
            return None;
        }
        self.fetching.set(true);

        let mode = self.mode.get_untracked();
        let text = self.prompt.get_untracked();
        let attached = self.image.get_untracked();
        let fetching = self.fetching;
        Some(async move {
            let result = generator.generate(mode, &text, attached.as_ref()).await;
            fetching.set(false);
            match result {
                Ok(outcome) => {
                    tracing::info!(mode = %outcome.mode, children = outcome.children, "ui: generation applied");
                    on_close.run(());
                }
                Err(e) => {
                    tracing::warn!(error = %e, code = e.error_code(), "ui: generation failed");
                    if let Some(on_error) = on_error {
                        on_error.run(e);
                    }
                }
            }
        })
    }
}

/// Body of the page creator dialog. The host supplies the surrounding
/// chrome and decides what closing means.
#[component]
pub fn PageCreatorDialog(
    generator: Arc<Generator>,
    on_close: Callback<()>,
    #[prop(optional)] on_error: Option<Callback<CreatorError>>,
) -> impl IntoView {
    let generator = StoredValue::new(generator);
    let state = DialogState::default();
    let DialogState { mode, prompt, image, fetching } = state;

    let on_submit = move |_| {
        if let Some(task) = state.start_submit(generator.get_value(), on_close, on_error) {
            leptos::task::spawn_local(task);
        }
    };

    let on_file_change = move |ev: leptos::ev::Event| {
        #[cfg(feature = "hydrate")]
        {
            use wasm_bindgen::JsCast;

            let Some(input) = ev
                .target()
                .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
            else {
                return;
            };
            let Some(file) = input.files().and_then(|files| files.get(0)) else {
                return;
            };
            leptos::task::spawn_local(async move {
                match read_image_file(&file).await {
                    Ok(attachment) => image.set(Some(attachment)),
                    Err(e) => tracing::warn!(error = %e, "ui: image read failed"),
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = (ev, image);
    };

    view! {
        <div class="page-creator">
            <h2 class="page-creator__title">"Describe the UI you need"</h2>
            <div class="page-creator__modes">
                {GenerationMode::ALL
                    .into_iter()
                    .map(|m| {
                        view! {
                            <label class="page-creator__mode">
                                <input
                                    type="radio"
                                    name="page-creator-mode"
                                    value=m.as_str()
                                    prop:checked=move || mode.get() == m
                                    on:change=move |_| mode.set(m)
                                />
                                {mode_label(m)}
                            </label>
                        }
                    })
                    .collect_view()}
            </div>
            <textarea
                class="dialog__textarea page-creator__prompt"
                placeholder=PROMPT_PLACEHOLDER
                prop:value=move || prompt.get()
                on:input=move |ev| prompt.set(event_target_value(&ev))
                disabled=move || fetching.get()
            ></textarea>
            <div class="page-creator__image">
                <input
                    type="file"
                    accept="image/*"
                    on:change=on_file_change
                    disabled=move || fetching.get()
                />
                {move || {
                    image
                        .get()
                        .map(|img| {
                            view! {
                                <img
                                    class="page-creator__preview"
                                    src=img.data_url().to_owned()
                                    alt="Attached image"
                                />
                            }
                        })
                }}
            </div>
            <div class="dialog__actions">
                <button class="btn btn--primary" on:click=on_submit disabled=move || fetching.get()>
                    {move || state.submit_label()}
                </button>
            </div>
        </div>
    }
}

#[cfg(feature = "hydrate")]
async fn read_image_file(file: &web_sys::File) -> Result<ImageAttachment, String> {
    let buffer = wasm_bindgen_futures::JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| format!("{e:?}"))?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    Ok(ImageAttachment::from_bytes(&file.type_(), &bytes))
}

#[cfg(test)]
#[path = "page_creator_test.rs"]
mod page_creator_test;
