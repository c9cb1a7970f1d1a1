//! HTTP plumbing shared by the service clients.

use reqwest::{Client, Response};
use std::time::Duration;
use storyloom_core::ImageFormat;
use storyloom_error::{ServiceError, ServiceErrorKind};
use tracing::error;

/// Builds a reqwest client with a per-request timeout.
pub(crate) fn http_client(timeout: Duration) -> Result<Client, ServiceError> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| ServiceError::new(ServiceErrorKind::ClientCreation(e.to_string())))
}

/// Maps a send failure (connect, timeout, reset) to a retryable error.
pub(crate) fn request_error(e: reqwest::Error) -> ServiceError {
    error!(error = ?e, "Failed to send request");
    ServiceError::new(ServiceErrorKind::ApiRequest(e.to_string()))
}

/// Passes successful responses through; turns error statuses into `HttpStatus`.
pub(crate) async fn check_status(response: Response) -> Result<Response, ServiceError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    error!(status = %status, body = %body, "Service returned error");
    Err(ServiceError::new(ServiceErrorKind::HttpStatus {
        status_code: status.as_u16(),
        message: body,
    }))
}

/// Accepts bytes only if they start with a known image signature.
///
/// # Examples
///
/// ```
/// use storyloom_models::verify_image;
///
/// assert!(verify_image(b"<html>quota exceeded</html>").is_err());
/// ```
pub fn verify_image(bytes: &[u8]) -> Result<ImageFormat, ServiceError> {
    if bytes.is_empty() {
        return Err(ServiceError::new(ServiceErrorKind::NoImageData));
    }
    ImageFormat::sniff(bytes).ok_or_else(|| {
        ServiceError::new(ServiceErrorKind::InvalidImage(format!(
            "{} bytes with unrecognised signature",
            bytes.len()
        )))
    })
}
