//! Gemini `generateContent` client for drafting and illustration.

use super::dto::{GenerateContentRequest, GenerateContentResponse, GenerationConfig};
use super::prompts::{scene_prompt, story_prompt};
use crate::retry::{RetrySettings, with_retry};
use crate::transport::{check_status, http_client, request_error, verify_image};
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::Client;
use std::time::Duration;
use storyloom_core::DraftRequest;
use storyloom_error::{ServiceError, ServiceErrorKind, StoryloomResult};
use storyloom_interface::{Illustrator, StoryDrafter};
use tracing::{debug, info, instrument};

/// Public Gemini REST endpoint.
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
/// Model used for stories and scene descriptions.
pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-pro";
/// Model used for images.
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.0-flash-preview-image-generation";

/// Gemini client implementing both [`StoryDrafter`] and [`Illustrator`].
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
    text_model: String,
    image_model: String,
    retry: RetrySettings,
}

impl GeminiClient {
    /// Creates a client with the default models and endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    #[instrument(skip_all)]
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> Result<Self, ServiceError> {
        debug!("Creating new Gemini client");
        Ok(Self {
            client: http_client(timeout)?,
            api_key: api_key.into(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            retry: RetrySettings::default(),
        })
    }

    /// Overrides the endpoint (useful for proxies and tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Overrides the drafting model.
    pub fn with_text_model(mut self, model: impl Into<String>) -> Self {
        self.text_model = model.into();
        self
    }

    /// Overrides the image model.
    pub fn with_image_model(mut self, model: impl Into<String>) -> Self {
        self.image_model = model.into();
        self
    }

    /// Overrides retry behaviour.
    pub fn with_retry(mut self, retry: RetrySettings) -> Self {
        self.retry = retry;
        self
    }

    /// Image model identifier.
    pub fn image_model(&self) -> &str {
        &self.image_model
    }

    fn endpoint(&self, model: &str) -> String {
        let model = model.strip_prefix("models/").unwrap_or(model);
        format!("{}/models/{}:generateContent", self.base_url, model)
    }

    async fn send_once(
        &self,
        url: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, ServiceError> {
        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await
            .map_err(request_error)?;
        let response = check_status(response).await?;
        let body = response.text().await.map_err(request_error)?;
        serde_json::from_str(&body)
            .map_err(|e| ServiceError::new(ServiceErrorKind::ResponseParse(e.to_string())))
    }

    /// Sends a `generateContent` request, retrying transient failures.
    #[instrument(skip(self, request))]
    pub async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, ServiceError> {
        let url = self.endpoint(model);
        debug!(url = %url, "Sending Gemini request");
        with_retry(&self.retry, "gemini.generateContent", || {
            self.send_once(&url, request)
        })
        .await
    }

    async fn generate_text(&self, prompt: String) -> Result<String, ServiceError> {
        let request = GenerateContentRequest::prompt(prompt);
        let response = self.generate_content(&self.text_model, &request).await?;
        let text = response.text().trim().to_string();
        if text.is_empty() {
            return Err(ServiceError::new(ServiceErrorKind::EmptyResponse));
        }
        Ok(text)
    }
}

#[async_trait]
impl StoryDrafter for GeminiClient {
    #[instrument(skip(self, request), fields(theme = %request.theme()))]
    async fn draft(&self, request: &DraftRequest) -> StoryloomResult<String> {
        let story = self.generate_text(story_prompt(request)).await?;
        info!(words = story.split_whitespace().count(), "Story drafted");
        Ok(story)
    }

    #[instrument(skip(self, excerpt))]
    async fn describe_scene(&self, excerpt: &str) -> StoryloomResult<String> {
        let request = GenerateContentRequest::prompt(scene_prompt(excerpt));
        let response = self.generate_content(&self.text_model, &request).await?;
        let description = response.first_text().unwrap_or_default().trim().to_string();
        if description.is_empty() {
            return Err(ServiceError::new(ServiceErrorKind::EmptyResponse).into());
        }
        Ok(description)
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }

    fn model_name(&self) -> &str {
        &self.text_model
    }
}

#[async_trait]
impl Illustrator for GeminiClient {
    #[instrument(skip(self, prompt), fields(model = %self.image_model))]
    async fn illustrate(&self, prompt: &str) -> StoryloomResult<Vec<u8>> {
        let config = GenerationConfig::builder()
            .response_modalities(vec!["TEXT".to_string(), "IMAGE".to_string()])
            .build()
            .map_err(|e| ServiceError::new(ServiceErrorKind::ClientCreation(e.to_string())))?;
        let request = GenerateContentRequest::prompt(prompt).with_config(config);

        let response = self.generate_content(&self.image_model, &request).await?;
        let image = response
            .first_image()
            .ok_or_else(|| ServiceError::new(ServiceErrorKind::NoImageData))?;
        let bytes = STANDARD
            .decode(image.data().as_bytes())
            .map_err(|e| ServiceError::new(ServiceErrorKind::Base64Decode(e.to_string())))?;
        let format = verify_image(&bytes)?;

        debug!(bytes = bytes.len(), format = %format, "Image received");
        Ok(bytes)
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }

    fn model_name(&self) -> &str {
        &self.image_model
    }
}
