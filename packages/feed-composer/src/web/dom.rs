//! web-sys implementations of the DOM handle traits

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, HtmlDialogElement, HtmlElement, HtmlFormElement, HtmlImageElement,
    HtmlInputElement, HtmlTextAreaElement,
};

use crate::config::ComposerConfig;
use crate::error::ComposerError;
use crate::kernel::{DisplayDropdown, FilePicker, FormHandle, ModalDialog, PreviewSurface, TextField};
use crate::types::{FileSource, SelectedFile};

pub(crate) fn log_js_failure(action: &str, result: Result<(), JsValue>) {
    if let Err(err) = result {
        tracing::warn!(action, error = ?err, "DOM call failed");
    }
}

/// Look up an element by id and cast it to the expected type
pub fn element_by_id<T: JsCast>(document: &Document, id: &str) -> Result<T, ComposerError> {
    document
        .get_element_by_id(id)
        .and_then(|element| element.dyn_into::<T>().ok())
        .ok_or_else(|| ComposerError::MissingElement(format!("#{}", id)))
}

// =============================================================================
// Text Field
// =============================================================================

pub enum DomTextField {
    Input(HtmlInputElement),
    TextArea(HtmlTextAreaElement),
}

impl DomTextField {
    pub fn from_element(element: Element) -> Result<Self, ComposerError> {
        let element = match element.dyn_into::<HtmlInputElement>() {
            Ok(input) => return Ok(DomTextField::Input(input)),
            Err(element) => element,
        };
        element
            .dyn_into::<HtmlTextAreaElement>()
            .map(DomTextField::TextArea)
            .map_err(|element| {
                ComposerError::MissingElement(format!("#{} is not a text field", element.id()))
            })
    }
}

impl TextField for DomTextField {
    fn value(&self) -> String {
        match self {
            DomTextField::Input(input) => input.value(),
            DomTextField::TextArea(area) => area.value(),
        }
    }
}

// =============================================================================
// Display Dropdown
// =============================================================================

/// A `ul` whose `li` entries hold a label `span` and a marker `span`
pub struct DomDropdown {
    list: Element,
    trigger: Option<Element>,
    marker_class: String,
}

impl DomDropdown {
    pub fn new(list: Element, config: &ComposerConfig) -> Self {
        let trigger = list
            .closest(&config.tools_container_selector)
            .ok()
            .flatten()
            .and_then(|tools| tools.query_selector(&config.trigger_text_selector).ok().flatten());

        Self {
            list,
            trigger,
            marker_class: config.selected_marker_class.clone(),
        }
    }

    fn entries(&self) -> Vec<Element> {
        let Ok(nodes) = self.list.query_selector_all("li") else {
            return Vec::new();
        };
        (0..nodes.length())
            .filter_map(|index| nodes.get(index))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn entry(&self, index: usize) -> Option<Element> {
        self.entries().into_iter().nth(index)
    }

    fn spans(entry: &Element) -> Vec<Element> {
        let Ok(nodes) = entry.query_selector_all("span") else {
            return Vec::new();
        };
        (0..nodes.length())
            .filter_map(|index| nodes.get(index))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    /// Index of the entry containing `target`, e.g. a click target
    pub fn entry_index_of(&self, target: &Element) -> Option<usize> {
        let item = target.closest("li").ok().flatten()?;
        self.entries()
            .iter()
            .position(|entry| entry.is_same_node(Some(&*item)))
    }
}

impl DisplayDropdown for DomDropdown {
    fn entry_count(&self) -> usize {
        self.entries().len()
    }

    fn entry_label(&self, index: usize) -> Option<String> {
        let entry = self.entry(index)?;
        Self::spans(&entry)
            .first()
            .and_then(|span| span.text_content())
            .map(|text| text.trim().to_string())
    }

    fn is_marked(&self, index: usize) -> bool {
        self.entry(index)
            .and_then(|entry| {
                entry
                    .query_selector(&format!(".{}", self.marker_class))
                    .ok()
                    .flatten()
            })
            .is_some()
    }

    fn set_marked(&self, index: usize, marked: bool) {
        let Some(entry) = self.entry(index) else {
            return;
        };
        let spans = Self::spans(&entry);
        if marked {
            match spans.get(1) {
                Some(marker) => {
                    log_js_failure("mark entry", marker.class_list().add_1(&self.marker_class))
                }
                None => tracing::warn!(index, spans = spans.len(), "Dropdown entry has no marker span"),
            }
        } else {
            for span in &spans {
                log_js_failure("unmark entry", span.class_list().remove_1(&self.marker_class));
            }
        }
    }

    fn set_trigger_text(&self, text: &str) {
        if let Some(trigger) = &self.trigger {
            trigger.set_text_content(Some(text));
        }
    }
}

// =============================================================================
// Preview, Picker, Modal, Form
// =============================================================================

pub struct DomPreview {
    image: HtmlImageElement,
    object_class: String,
}

impl DomPreview {
    pub fn new(image: HtmlImageElement, config: &ComposerConfig) -> Self {
        Self {
            image,
            object_class: config.object_marker_class.clone(),
        }
    }
}

impl PreviewSurface for DomPreview {
    fn set_visible(&self, visible: bool) {
        let value = if visible { "visible" } else { "hidden" };
        log_js_failure(
            "set preview visibility",
            self.image.style().set_property("visibility", value),
        );
    }

    fn mark_holds_object(&self) {
        log_js_failure(
            "mark preview",
            self.image.class_list().add_1(&self.object_class),
        );
    }

    fn set_source(&self, source: &str) {
        self.image.set_src(source);
    }
}

pub struct DomFilePicker(pub HtmlInputElement);

impl FilePicker for DomFilePicker {
    fn open(&self) {
        self.0.click();
    }

    fn first_file(&self) -> Option<SelectedFile> {
        let file = self.0.files()?.get(0)?;
        Some(SelectedFile {
            name: file.name(),
            media_type: file.type_(),
            size: file.size() as u64,
            source: FileSource::Browser(file),
        })
    }
}

/// `<dialog>` elements open natively; anything else is shown through classes
pub struct DomModal(pub Element);

impl ModalDialog for DomModal {
    fn open(&self) {
        if let Some(dialog) = self.0.dyn_ref::<HtmlDialogElement>() {
            log_js_failure("show modal", dialog.show_modal());
            return;
        }
        log_js_failure("show modal", self.0.class_list().add_1("show"));
        if let Some(element) = self.0.dyn_ref::<HtmlElement>() {
            log_js_failure(
                "show modal",
                element.style().set_property("display", "block"),
            );
        }
    }
}

pub struct DomForm(pub HtmlFormElement);

impl FormHandle for DomForm {
    fn submit(&self) {
        log_js_failure("submit form", self.0.submit());
    }
}
