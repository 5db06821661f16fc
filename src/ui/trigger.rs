//! Icon that opens the page creator.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use leptos::prelude::*;

const ICON_SVG: &str = include_str!("../../assets/page-creator.svg");

/// The bundled icon as a `data:` URL.
#[must_use]
pub fn icon_data_url() -> String {
    format!("data:image/svg+xml;base64,{}", STANDARD.encode(ICON_SVG))
}

/// Fixed 24×24 icon. `node_ref` lets the host anchor a popover on it.
#[component]
pub fn PageCreatorTrigger(
    #[prop(optional)] node_ref: NodeRef<leptos::html::Img>,
    #[prop(default = 24)] width: u32,
    #[prop(default = 24)] height: u32,
    #[prop(optional, into)] class: Option<String>,
) -> impl IntoView {
    view! {
        <img
            class=class
            src=icon_data_url()
            alt="Page creator"
            node_ref=node_ref
            width=width.to_string()
            height=height.to_string()
        />
    }
}

#[cfg(test)]
#[path = "trigger_test.rs"]
mod trigger_test;
