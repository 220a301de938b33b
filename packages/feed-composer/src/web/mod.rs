//! Browser binding
//!
//! `bind` looks up the composer's elements, builds a `FeedComposer` over them
//! and attaches the event listeners. Handler errors are logged and swallowed:
//! the page shows no feedback for failed submissions or previews.

mod dom;
mod services;

use std::rc::Rc;
use std::sync::Arc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, Event, EventTarget, HtmlFormElement, HtmlImageElement, HtmlInputElement};

pub use dom::{
    element_by_id, DomDropdown, DomFilePicker, DomForm, DomModal, DomPreview, DomTextField,
};
pub use services::{BrowserFileReader, BrowserNavigator, FetchPostApi};

use crate::composer::{ComposerElements, FeedComposer};
use crate::config::ComposerConfig;
use crate::error::ComposerError;
use crate::kernel::ComposerDeps;

/// Entry point run when the module is loaded into the page
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    bind(ComposerConfig::default())
        .map(|_| ())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

fn document() -> Result<Document, ComposerError> {
    web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| ComposerError::MissingElement("document".to_string()))
}

fn listen<F>(target: &EventTarget, event: &str, handler: F) -> Result<(), ComposerError>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .map_err(|e| ComposerError::MissingElement(format!("{} listener: {:?}", event, e)))?;
    // Listeners live as long as the page.
    closure.forget();
    Ok(())
}

/// Wire the composer to the current document
pub fn bind(config: ComposerConfig) -> Result<Rc<FeedComposer>, ComposerError> {
    let document = document()?;
    let ids = config.elements.clone();

    let add_post_button: Element = element_by_id(&document, &ids.add_post_button)?;
    let own_dropdown = add_post_button
        .closest("ul")
        .ok()
        .flatten()
        .ok_or_else(|| ComposerError::MissingElement(format!("ul around #{}", ids.add_post_button)))?;

    let file_input: HtmlInputElement = element_by_id(&document, &ids.file_input)?;
    let elements = ComposerElements {
        content: Box::new(DomTextField::from_element(element_by_id(&document, &ids.content)?)?),
        display: Box::new(DomDropdown::new(own_dropdown, &config)),
        preview: Box::new(DomPreview::new(
            element_by_id::<HtmlImageElement>(&document, &ids.preview)?,
            &config,
        )),
        file_picker: Box::new(DomFilePicker(file_input.clone())),
        modal: Box::new(DomModal(element_by_id(&document, &ids.modal)?)),
        form: Box::new(DomForm(element_by_id::<HtmlFormElement>(&document, &ids.form)?)),
    };
    let deps = ComposerDeps::new(
        Arc::new(FetchPostApi),
        Arc::new(BrowserNavigator),
        Arc::new(BrowserFileReader),
    );
    let composer = Rc::new(FeedComposer::new(elements, deps, config.clone()));

    let add_image_button: Element = element_by_id(&document, &ids.add_image_button)?;
    listen(&add_image_button, "click", {
        let composer = composer.clone();
        move |event: Event| {
            event.prevent_default();
            composer.open_file_picker();
        }
    })?;

    let submit_button: Element = element_by_id(&document, &ids.submit_button)?;
    listen(&submit_button, "click", {
        let composer = composer.clone();
        move |event: Event| {
            event.prevent_default();
            composer.submit_form();
        }
    })?;

    listen(&file_input, "change", {
        let composer = composer.clone();
        move |_| {
            let composer = composer.clone();
            spawn_local(async move {
                if let Err(e) = composer.preview_selected_image().await {
                    tracing::warn!(error = %e, "Image preview failed");
                }
            });
        }
    })?;

    let add_with_image_button: Element = element_by_id(&document, &ids.add_with_image_button)?;
    listen(&add_with_image_button, "click", {
        let composer = composer.clone();
        move |_| composer.open_modal()
    })?;

    listen(&add_post_button, "click", {
        let composer = composer.clone();
        move |_| {
            let composer = composer.clone();
            spawn_local(async move {
                if let Err(e) = composer.submit_post().await {
                    tracing::warn!(error = %e, "Post submission failed");
                }
            });
        }
    })?;

    let dropdowns = document.get_elements_by_class_name(&ids.dropdown_class);
    for index in 0..dropdowns.length() {
        let Some(list) = dropdowns.item(index) else {
            continue;
        };
        let dropdown = DomDropdown::new(list.clone(), &config);
        listen(&list, "click", {
            let composer = composer.clone();
            move |event: Event| {
                let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
                    return;
                };
                let Some(entry) = dropdown.entry_index_of(&target) else {
                    return;
                };
                if let Err(e) = composer.highlight_display_choice(&dropdown, entry) {
                    tracing::warn!(error = %e, "Display choice highlight failed");
                }
            }
        })?;
    }

    tracing::debug!(dropdowns = dropdowns.length(), "Feed composer bound");
    Ok(composer)
}
