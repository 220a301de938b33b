// Trait definitions for dependency injection
//
// Two kinds of seams:
// - Base* services: async infrastructure (HTTP, navigation, file reads)
// - DOM handles: synchronous views over the elements the composer touches
//
// Browser handles are !Send, so async traits use `async_trait(?Send)` and none
// of these traits require Send + Sync.

use async_trait::async_trait;

use crate::error::ComposerError;
use crate::types::{ApiResponse, CreatePostRequest, SelectedFile};

// =============================================================================
// Services
// =============================================================================

#[async_trait(?Send)]
pub trait BasePostApi {
    /// POST the request as JSON and report status, redirect flag and final URL
    async fn post_json(
        &self,
        url: &str,
        request: &CreatePostRequest,
    ) -> Result<ApiResponse, ComposerError>;
}

pub trait BaseNavigator {
    /// URL of the document the composer lives in
    fn current_url(&self) -> String;

    /// Full-page navigation to `url`
    fn navigate(&self, url: &str);

    fn reload(&self);
}

#[async_trait(?Send)]
pub trait BaseFileReader {
    async fn read_bytes(&self, file: &SelectedFile) -> Result<Vec<u8>, ComposerError>;
}

// =============================================================================
// DOM Handles
// =============================================================================

pub trait TextField {
    fn value(&self) -> String;
}

/// A visibility dropdown list: entries with a label and a "selected" marker,
/// plus the trigger button showing the current choice
pub trait DisplayDropdown {
    fn entry_count(&self) -> usize;

    fn entry_label(&self, index: usize) -> Option<String>;

    fn is_marked(&self, index: usize) -> bool;

    fn set_marked(&self, index: usize, marked: bool);

    fn set_trigger_text(&self, text: &str);

    /// Label of the first marked entry
    fn selected_label(&self) -> Option<String> {
        (0..self.entry_count())
            .find(|&index| self.is_marked(index))
            .and_then(|index| self.entry_label(index))
    }
}

pub trait PreviewSurface {
    fn set_visible(&self, visible: bool);

    /// Flag the preview as holding a file
    fn mark_holds_object(&self);

    fn set_source(&self, source: &str);
}

pub trait FilePicker {
    /// Open the native file chooser
    fn open(&self);

    /// First file of the current selection
    fn first_file(&self) -> Option<SelectedFile>;
}

pub trait ModalDialog {
    fn open(&self);
}

pub trait FormHandle {
    fn submit(&self);
}
