use async_trait::async_trait;
use reqwest::header::LOCATION;
use reqwest::redirect::Policy;
use reqwest::{Client, Url};

use super::BasePostApi;
use crate::error::ComposerError;
use crate::types::{ApiResponse, CreatePostRequest};

/// reqwest implementation of BasePostApi
///
/// Redirects are not followed: a 3xx response with a `Location` header is
/// reported as redirected, with the location resolved against the request URL.
/// A redirect back to the requested URL still counts as a redirect.
#[derive(Clone)]
pub struct ReqwestPostApi {
    client: Client,
}

impl ReqwestPostApi {
    pub fn new() -> Result<Self, ComposerError> {
        let client = Client::builder().redirect(Policy::none()).build()?;
        Ok(Self { client })
    }

    /// Use a preconfigured client. It must be built with `redirect::Policy::none()`,
    /// otherwise redirects are followed and never reported.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait(?Send)]
impl BasePostApi for ReqwestPostApi {
    async fn post_json(
        &self,
        url: &str,
        request: &CreatePostRequest,
    ) -> Result<ApiResponse, ComposerError> {
        let requested =
            Url::parse(url).map_err(|e| ComposerError::Network(format!("{}: {}", url, e)))?;

        let response = self
            .client
            .post(requested.clone())
            .json(request)
            .send()
            .await?;
        let status = response.status();

        let location = if status.is_redirection() {
            response
                .headers()
                .get(LOCATION)
                .and_then(|value| value.to_str().ok())
                .map(|location| requested.join(location))
                .transpose()
                .map_err(|e| ComposerError::Network(format!("invalid redirect location: {}", e)))?
        } else {
            None
        };

        let redirected = location.is_some();
        let final_url = location.unwrap_or_else(|| response.url().clone());
        tracing::debug!(
            status = status.as_u16(),
            redirected,
            final_url = %final_url,
            "Posts endpoint responded"
        );

        Ok(ApiResponse {
            status: status.as_u16(),
            redirected,
            url: final_url.to_string(),
        })
    }
}
