//! HuggingFace Inference API image client.

use super::dto::TextToImageRequest;
use crate::retry::{RetrySettings, with_retry};
use crate::transport::{check_status, http_client, request_error, verify_image};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use storyloom_error::{ServiceError, StoryloomResult};
use storyloom_interface::Illustrator;
use tracing::{debug, instrument};

/// Inference router endpoint.
pub const DEFAULT_HUGGINGFACE_BASE_URL: &str = "https://router.huggingface.co/hf-inference/models";
/// Default text-to-image model.
pub const DEFAULT_HUGGINGFACE_MODEL: &str = "stabilityai/stable-diffusion-3.5-large";

/// HuggingFace text-to-image client.
#[derive(Debug, Clone)]
pub struct HuggingFaceImageClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    retry: RetrySettings,
}

impl HuggingFaceImageClient {
    /// Creates a client for `model`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    #[instrument(skip_all)]
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ServiceError> {
        Ok(Self {
            client: http_client(timeout)?,
            api_key: api_key.into(),
            base_url: DEFAULT_HUGGINGFACE_BASE_URL.to_string(),
            model: model.into(),
            retry: RetrySettings::default(),
        })
    }

    /// Overrides the endpoint.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Overrides retry behaviour.
    pub fn with_retry(mut self, retry: RetrySettings) -> Self {
        self.retry = retry;
        self
    }

    async fn send_once(
        &self,
        url: &str,
        body: &TextToImageRequest,
    ) -> Result<Vec<u8>, ServiceError> {
        let response = self
            .client
            .post(url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Accept", "image/png")
            .json(body)
            .send()
            .await
            .map_err(request_error)?;
        let response = check_status(response).await?;
        let bytes = response.bytes().await.map_err(request_error)?;
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl Illustrator for HuggingFaceImageClient {
    #[instrument(skip(self, prompt), fields(model = %self.model))]
    async fn illustrate(&self, prompt: &str) -> StoryloomResult<Vec<u8>> {
        let url = format!("{}/{}", self.base_url, self.model);
        let body = TextToImageRequest::new(prompt);
        debug!(url = %url, "Sending HuggingFace text-to-image request");

        let bytes = with_retry(&self.retry, "huggingface.textToImage", || {
            self.send_once(&url, &body)
        })
        .await?;
        let format = verify_image(&bytes)?;

        debug!(bytes = bytes.len(), format = %format, "Image received");
        Ok(bytes)
    }

    fn provider_name(&self) -> &'static str {
        "huggingface"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
