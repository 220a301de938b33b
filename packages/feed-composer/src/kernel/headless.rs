//! In-memory DOM handles
//!
//! Used when the composer runs outside a browser (the CLI) and by tests.
//! Each handle is a cheap clone over shared state, so a caller can keep a copy
//! to inspect what the composer did after handing the original over.

use std::cell::RefCell;
use std::rc::Rc;

use crate::kernel::{DisplayDropdown, FilePicker, FormHandle, ModalDialog, PreviewSurface, TextField};
use crate::types::{DisplayStrategy, SelectedFile};

// =============================================================================
// Text Field
// =============================================================================

#[derive(Clone, Default)]
pub struct MemoryTextField {
    value: Rc<RefCell<String>>,
}

impl MemoryTextField {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: Rc::new(RefCell::new(value.into())),
        }
    }

    pub fn set_value(&self, value: impl Into<String>) {
        *self.value.borrow_mut() = value.into();
    }
}

impl TextField for MemoryTextField {
    fn value(&self) -> String {
        self.value.borrow().clone()
    }
}

// =============================================================================
// Display Dropdown
// =============================================================================

#[derive(Default)]
struct DropdownState {
    labels: Vec<String>,
    marked: Vec<bool>,
    trigger_text: String,
}

#[derive(Clone, Default)]
pub struct MemoryDropdown {
    state: Rc<RefCell<DropdownState>>,
}

impl MemoryDropdown {
    /// Dropdown with the given entry labels; the first entry starts marked
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        let mut marked = vec![false; labels.len()];
        if let Some(first) = marked.first_mut() {
            *first = true;
        }
        let trigger_text = labels.first().cloned().unwrap_or_default();

        Self {
            state: Rc::new(RefCell::new(DropdownState {
                labels,
                marked,
                trigger_text,
            })),
        }
    }

    /// The composer's standard dropdown: public, friends-only, private
    pub fn with_strategies() -> Self {
        Self::new(DisplayStrategy::variants().iter().map(|s| s.label()))
    }

    /// Dropdown showing `strategy` as the current choice
    pub fn preselected(strategy: DisplayStrategy) -> Self {
        let dropdown = Self::with_strategies();
        {
            let mut state = dropdown.state.borrow_mut();
            for (index, marked) in state.marked.iter_mut().enumerate() {
                *marked = DisplayStrategy::variants()[index] == strategy;
            }
            state.trigger_text = strategy.label().to_string();
        }
        dropdown
    }

    pub fn marked_entries(&self) -> Vec<usize> {
        self.state
            .borrow()
            .marked
            .iter()
            .enumerate()
            .filter_map(|(index, &marked)| marked.then_some(index))
            .collect()
    }

    pub fn trigger_text(&self) -> String {
        self.state.borrow().trigger_text.clone()
    }
}

impl DisplayDropdown for MemoryDropdown {
    fn entry_count(&self) -> usize {
        self.state.borrow().labels.len()
    }

    fn entry_label(&self, index: usize) -> Option<String> {
        self.state.borrow().labels.get(index).cloned()
    }

    fn is_marked(&self, index: usize) -> bool {
        self.state.borrow().marked.get(index).copied().unwrap_or(false)
    }

    fn set_marked(&self, index: usize, marked: bool) {
        if let Some(slot) = self.state.borrow_mut().marked.get_mut(index) {
            *slot = marked;
        }
    }

    fn set_trigger_text(&self, text: &str) {
        self.state.borrow_mut().trigger_text = text.to_string();
    }
}

// =============================================================================
// Preview Surface
// =============================================================================

#[derive(Default)]
struct PreviewState {
    visible: bool,
    holds_object: bool,
    source: Option<String>,
    source_writes: usize,
}

#[derive(Clone, Default)]
pub struct MemoryPreview {
    state: Rc<RefCell<PreviewState>>,
}

impl MemoryPreview {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        self.state.borrow().visible
    }

    pub fn holds_object(&self) -> bool {
        self.state.borrow().holds_object
    }

    pub fn source(&self) -> Option<String> {
        self.state.borrow().source.clone()
    }

    /// Number of times the image source was written
    pub fn source_writes(&self) -> usize {
        self.state.borrow().source_writes
    }
}

impl PreviewSurface for MemoryPreview {
    fn set_visible(&self, visible: bool) {
        self.state.borrow_mut().visible = visible;
    }

    fn mark_holds_object(&self) {
        self.state.borrow_mut().holds_object = true;
    }

    fn set_source(&self, source: &str) {
        let mut state = self.state.borrow_mut();
        state.source = Some(source.to_string());
        state.source_writes += 1;
    }
}

// =============================================================================
// File Picker
// =============================================================================

#[derive(Default)]
struct PickerState {
    selection: Option<SelectedFile>,
    opened: usize,
}

#[derive(Clone, Default)]
pub struct MemoryFilePicker {
    state: Rc<RefCell<PickerState>>,
}

impl MemoryFilePicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current selection, as a change event would
    pub fn select(&self, file: SelectedFile) {
        self.state.borrow_mut().selection = Some(file);
    }

    pub fn times_opened(&self) -> usize {
        self.state.borrow().opened
    }
}

impl FilePicker for MemoryFilePicker {
    fn open(&self) {
        self.state.borrow_mut().opened += 1;
    }

    fn first_file(&self) -> Option<SelectedFile> {
        self.state.borrow().selection.clone()
    }
}

// =============================================================================
// Modal and Form
// =============================================================================

#[derive(Clone, Default)]
pub struct MemoryModal {
    opened: Rc<RefCell<usize>>,
}

impl MemoryModal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn times_opened(&self) -> usize {
        *self.opened.borrow()
    }
}

impl ModalDialog for MemoryModal {
    fn open(&self) {
        *self.opened.borrow_mut() += 1;
    }
}

#[derive(Clone, Default)]
pub struct MemoryForm {
    submitted: Rc<RefCell<usize>>,
}

impl MemoryForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn times_submitted(&self) -> usize {
        *self.submitted.borrow()
    }
}

impl FormHandle for MemoryForm {
    fn submit(&self) {
        *self.submitted.borrow_mut() += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strategy_dropdown_starts_on_public() {
        let dropdown = MemoryDropdown::with_strategies();
        assert_eq!(dropdown.entry_count(), 3);
        assert_eq!(dropdown.marked_entries(), vec![0]);
        assert_eq!(dropdown.selected_label().as_deref(), Some("전체 공개"));
        assert_eq!(dropdown.trigger_text(), "전체 공개");
    }

    #[test]
    fn preselected_marks_only_that_strategy() {
        let dropdown = MemoryDropdown::preselected(DisplayStrategy::Private);
        assert_eq!(dropdown.marked_entries(), vec![2]);
        assert_eq!(dropdown.selected_label().as_deref(), Some("나만 보기"));
    }

    #[test]
    fn clones_share_state() {
        let preview = MemoryPreview::new();
        let observer = preview.clone();
        preview.set_visible(true);
        preview.set_source("data:image/png;base64,AA==");
        assert!(observer.is_visible());
        assert_eq!(observer.source_writes(), 1);
    }

    #[test]
    fn empty_dropdown_has_no_selection() {
        let dropdown = MemoryDropdown::new(Vec::<String>::new());
        assert_eq!(dropdown.selected_label(), None);
        assert_eq!(dropdown.trigger_text(), "");
    }

    #[test]
    fn marking_out_of_range_is_ignored() {
        let dropdown = MemoryDropdown::with_strategies();
        dropdown.set_marked(10, true);
        assert_eq!(dropdown.marked_entries(), vec![0]);
    }
}
