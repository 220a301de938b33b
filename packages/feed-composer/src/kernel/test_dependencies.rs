// Test dependencies - mock services for exercising the composer
//
// Provides mock services that can be injected through ComposerDeps in tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use futures::channel::oneshot;

use super::{BaseFileReader, BaseNavigator, BasePostApi, ComposerDeps};
use crate::error::ComposerError;
use crate::types::{ApiResponse, CreatePostRequest, FileSource, SelectedFile};

// =============================================================================
// Mock Post API
// =============================================================================

/// Arguments captured from a post call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostCall {
    pub url: String,
    pub request: CreatePostRequest,
    /// The body exactly as it would go over the wire
    pub body: serde_json::Value,
}

enum MockReply {
    Response(ApiResponse),
    NetworkError(String),
}

pub struct MockPostApi {
    replies: Arc<Mutex<Vec<MockReply>>>,
    calls: Arc<Mutex<Vec<PostCall>>>,
}

impl MockPostApi {
    pub fn new() -> Self {
        Self {
            replies: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_response(self, response: ApiResponse) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push(MockReply::Response(response));
        self
    }

    /// Queue a redirect to `location`
    pub fn with_redirect(self, location: &str) -> Self {
        self.with_response(ApiResponse {
            status: 200,
            redirected: true,
            url: location.to_string(),
        })
    }

    /// Queue a plain response with the given status
    pub fn with_status(self, status: u16) -> Self {
        self.with_response(ApiResponse {
            status,
            redirected: false,
            url: String::new(),
        })
    }

    pub fn with_network_error(self, message: &str) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push(MockReply::NetworkError(message.to_string()));
        self
    }

    /// All calls made so far
    pub fn calls(&self) -> Vec<PostCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last_call(&self) -> Option<PostCall> {
        self.calls.lock().unwrap().last().cloned()
    }
}

impl Default for MockPostApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl BasePostApi for MockPostApi {
    async fn post_json(
        &self,
        url: &str,
        request: &CreatePostRequest,
    ) -> Result<ApiResponse, ComposerError> {
        self.calls.lock().unwrap().push(PostCall {
            url: url.to_string(),
            request: request.clone(),
            body: serde_json::to_value(request)?,
        });

        let mut replies = self.replies.lock().unwrap();
        if replies.is_empty() {
            return Ok(ApiResponse {
                status: 200,
                redirected: false,
                url: url.to_string(),
            });
        }

        match replies.remove(0) {
            MockReply::Response(response) => Ok(response),
            MockReply::NetworkError(message) => Err(ComposerError::Network(message)),
        }
    }
}

// =============================================================================
// Recording Navigator
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Navigate(String),
    Reload,
}

pub struct RecordingNavigator {
    current_url: String,
    navigations: Arc<Mutex<Vec<Navigation>>>,
}

impl RecordingNavigator {
    pub fn new(current_url: &str) -> Self {
        Self {
            current_url: current_url.to_string(),
            navigations: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn navigations(&self) -> Vec<Navigation> {
        self.navigations.lock().unwrap().clone()
    }
}

impl BaseNavigator for RecordingNavigator {
    fn current_url(&self) -> String {
        self.current_url.clone()
    }

    fn navigate(&self, url: &str) {
        self.navigations
            .lock()
            .unwrap()
            .push(Navigation::Navigate(url.to_string()));
    }

    fn reload(&self) {
        self.navigations.lock().unwrap().push(Navigation::Reload);
    }
}

// =============================================================================
// Mock File Reader
// =============================================================================

/// Reads in-memory files. Reads of a gated file wait until the gate is released.
pub struct MockFileReader {
    gates: Arc<Mutex<HashMap<String, oneshot::Receiver<()>>>>,
    reads: Arc<Mutex<Vec<String>>>,
}

impl MockFileReader {
    pub fn new() -> Self {
        Self {
            gates: Arc::new(Mutex::new(HashMap::new())),
            reads: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Hold the next read of `file_name` until the returned sender fires
    pub fn gate(&self, file_name: &str) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gates
            .lock()
            .unwrap()
            .insert(file_name.to_string(), rx);
        tx
    }

    /// Names of files whose reads started
    pub fn reads(&self) -> Vec<String> {
        self.reads.lock().unwrap().clone()
    }
}

impl Default for MockFileReader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl BaseFileReader for MockFileReader {
    async fn read_bytes(&self, file: &SelectedFile) -> Result<Vec<u8>, ComposerError> {
        self.reads.lock().unwrap().push(file.name.clone());

        let gate = self.gates.lock().unwrap().remove(&file.name);
        if let Some(gate) = gate {
            gate.await
                .map_err(|_| ComposerError::FileRead(format!("{} read was cancelled", file.name)))?;
        }

        match &file.source {
            FileSource::Memory(bytes) => Ok(bytes.clone()),
            _ => Err(ComposerError::FileRead(format!(
                "{} is not an in-memory file",
                file.name
            ))),
        }
    }
}

// =============================================================================
// TestDependencies
// =============================================================================

/// Mock services plus the handles needed to inspect them
pub struct TestDependencies {
    pub api: Arc<MockPostApi>,
    pub navigator: Arc<RecordingNavigator>,
    pub file_reader: Arc<MockFileReader>,
}

impl TestDependencies {
    pub fn new(page_url: &str) -> Self {
        Self::with_api(page_url, MockPostApi::new())
    }

    pub fn with_api(page_url: &str, api: MockPostApi) -> Self {
        Self {
            api: Arc::new(api),
            navigator: Arc::new(RecordingNavigator::new(page_url)),
            file_reader: Arc::new(MockFileReader::new()),
        }
    }

    pub fn deps(&self) -> ComposerDeps {
        ComposerDeps::new(
            self.api.clone(),
            self.navigator.clone(),
            self.file_reader.clone(),
        )
    }
}
