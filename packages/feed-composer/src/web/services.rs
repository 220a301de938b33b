//! Browser implementations of the service seams

use async_trait::async_trait;
use gloo_net::http::Request;
use wasm_bindgen_futures::JsFuture;

use super::dom::log_js_failure;
use crate::error::ComposerError;
use crate::kernel::{BaseFileReader, BaseNavigator, BasePostApi};
use crate::types::{ApiResponse, CreatePostRequest, FileSource, SelectedFile};

/// fetch-based BasePostApi; the browser reports redirects directly
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchPostApi;

#[async_trait(?Send)]
impl BasePostApi for FetchPostApi {
    async fn post_json(
        &self,
        url: &str,
        request: &CreatePostRequest,
    ) -> Result<ApiResponse, ComposerError> {
        let response = Request::post(url).json(request)?.send().await?;

        Ok(ApiResponse {
            status: response.status(),
            redirected: response.redirected(),
            url: response.url(),
        })
    }
}

/// Navigates the window the composer runs in
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserNavigator;

impl BaseNavigator for BrowserNavigator {
    fn current_url(&self) -> String {
        web_sys::window()
            .and_then(|window| window.location().href().ok())
            .unwrap_or_default()
    }

    fn navigate(&self, url: &str) {
        if let Some(window) = web_sys::window() {
            log_js_failure("navigate", window.location().set_href(url));
        }
    }

    fn reload(&self) {
        if let Some(window) = web_sys::window() {
            log_js_failure("reload", window.location().reload());
        }
    }
}

/// Reads picked files through `Blob.arrayBuffer()`
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserFileReader;

#[async_trait(?Send)]
impl BaseFileReader for BrowserFileReader {
    async fn read_bytes(&self, file: &SelectedFile) -> Result<Vec<u8>, ComposerError> {
        match &file.source {
            FileSource::Browser(blob) => {
                let buffer = JsFuture::from(blob.array_buffer())
                    .await
                    .map_err(|e| ComposerError::FileRead(format!("{}: {:?}", file.name, e)))?;
                Ok(js_sys::Uint8Array::new(&buffer).to_vec())
            }
            FileSource::Memory(bytes) => Ok(bytes.clone()),
            FileSource::Path(path) => Err(ComposerError::FileRead(format!(
                "{} cannot be read in the browser",
                path.display()
            ))),
        }
    }
}
