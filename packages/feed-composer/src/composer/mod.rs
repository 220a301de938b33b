//! Feed composer controller
//!
//! Each operation is a stateless reaction to one UI event. The only state the
//! controller keeps is the preview generation: every file-picker change takes a
//! ticket, and a read only renders if no newer change happened meanwhile.

pub mod preview;

use tracing::{debug, info, warn};

use crate::config::ComposerConfig;
use crate::error::ComposerError;
use crate::kernel::{
    ComposerDeps, DisplayDropdown, FilePicker, FormHandle, ModalDialog, PreviewSurface, TextField,
};
use crate::types::{CreatePostRequest, DataUrl, DisplayStrategy, PreviewOutcome, SubmitOutcome};

pub use preview::{GenerationTicket, PreviewGeneration};

/// The elements the composer reads and mutates
pub struct ComposerElements {
    pub content: Box<dyn TextField>,
    /// Visibility dropdown belonging to the composer
    pub display: Box<dyn DisplayDropdown>,
    pub preview: Box<dyn PreviewSurface>,
    pub file_picker: Box<dyn FilePicker>,
    pub modal: Box<dyn ModalDialog>,
    pub form: Box<dyn FormHandle>,
}

pub struct FeedComposer {
    elements: ComposerElements,
    deps: ComposerDeps,
    config: ComposerConfig,
    preview_generation: PreviewGeneration,
}

impl FeedComposer {
    pub fn new(elements: ComposerElements, deps: ComposerDeps, config: ComposerConfig) -> Self {
        Self {
            elements,
            deps,
            config,
            preview_generation: PreviewGeneration::new(),
        }
    }

    /// Create a post from the content field and the highlighted visibility,
    /// then navigate according to the response.
    ///
    /// An unrecognized visibility label is an error and no request is sent.
    pub async fn submit_post(&self) -> Result<SubmitOutcome, ComposerError> {
        let contents = self.elements.content.value();
        let label = self
            .elements
            .display
            .selected_label()
            .ok_or(ComposerError::NoDisplayStrategySelected)?;
        let display_strategy = DisplayStrategy::from_label(&label)?;

        let url = self.config.posts_url(&self.deps.navigator.current_url());
        let request = CreatePostRequest {
            contents,
            display_strategy,
        };

        info!(
            url = %url,
            display_strategy = display_strategy.code(),
            "Submitting post"
        );
        let response = self.deps.api.post_json(&url, &request).await?;

        if response.redirected {
            info!(location = %response.url, "Post created, following redirect");
            self.deps.navigator.navigate(&response.url);
            Ok(SubmitOutcome::Redirected(response.url))
        } else if response.is_success() {
            info!(status = response.status, "Post created, reloading");
            self.deps.navigator.reload();
            Ok(SubmitOutcome::Reloaded)
        } else {
            warn!(status = response.status, "Post was not accepted");
            Ok(SubmitOutcome::Ignored {
                status: response.status,
            })
        }
    }

    /// Make `entry` the only highlighted entry of `dropdown` and show its label
    /// in the trigger button
    pub fn highlight_display_choice(
        &self,
        dropdown: &dyn DisplayDropdown,
        entry: usize,
    ) -> Result<(), ComposerError> {
        let len = dropdown.entry_count();
        let label = dropdown
            .entry_label(entry)
            .filter(|_| entry < len)
            .ok_or(ComposerError::EntryOutOfRange { index: entry, len })?;

        for index in (0..len).filter(|&index| dropdown.is_marked(index)) {
            dropdown.set_marked(index, false);
        }
        dropdown.set_marked(entry, true);
        if !dropdown.is_marked(entry) {
            warn!(entry, label = %label.trim(), "Display choice could not be marked");
            return Err(ComposerError::EntryNotMarkable { index: entry });
        }
        dropdown.set_trigger_text(label.trim());

        debug!(entry, label = %label.trim(), "Display choice highlighted");
        Ok(())
    }

    /// Highlight an entry of the composer's own dropdown
    pub fn highlight_own_display_choice(&self, entry: usize) -> Result<(), ComposerError> {
        self.highlight_display_choice(self.elements.display.as_ref(), entry)
    }

    /// Render the first selected file into the preview as a data URL
    pub async fn preview_selected_image(&self) -> Result<PreviewOutcome, ComposerError> {
        let preview = &self.elements.preview;
        preview.set_visible(true);
        let ticket = self.preview_generation.begin();

        let Some(file) = self.elements.file_picker.first_file() else {
            debug!("No file selected");
            return Ok(PreviewOutcome::NoFile);
        };

        if !file.media_type.starts_with(&self.config.image_media_prefix) {
            debug!(name = %file.name, media_type = %file.media_type, "Selected file is not an image");
            return Ok(PreviewOutcome::NotAnImage {
                media_type: file.media_type,
            });
        }

        preview.mark_holds_object();

        let bytes = self.deps.file_reader.read_bytes(&file).await?;

        if !self.preview_generation.is_current(ticket) {
            debug!(name = %file.name, "Discarding preview of superseded selection");
            return Ok(PreviewOutcome::Superseded);
        }

        let data_url = DataUrl::encode(&file.media_type, &bytes);
        preview.set_source(data_url.as_str());
        debug!(name = %file.name, bytes = bytes.len(), "Preview rendered");

        Ok(PreviewOutcome::Rendered(data_url))
    }

    pub fn open_file_picker(&self) {
        debug!("Opening file picker");
        self.elements.file_picker.open();
    }

    pub fn open_modal(&self) {
        debug!("Opening composer modal");
        self.elements.modal.open();
    }

    pub fn submit_form(&self) {
        debug!("Submitting composer form");
        self.elements.form.submit();
    }
}
