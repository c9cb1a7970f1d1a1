//! API credentials, resolved once at startup.

use crate::ImageProvider;
use storyloom_error::{ConfigError, StoryloomResult};
use tracing::debug;

/// Primary Gemini key variable.
pub const GEMINI_API_KEY_VAR: &str = "GEMINI_API_KEY";

/// Accepted alias for the Gemini key.
pub const GOOGLE_API_KEY_VAR: &str = "GOOGLE_API_KEY";

/// HuggingFace access token variable.
pub const HF_TOKEN_VAR: &str = "HF_TOKEN";

/// Keys for the remote services.
///
/// A Gemini key is always required because drafting and scene descriptions
/// use Gemini; a HuggingFace token only when it generates the images.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    gemini_api_key: String,
    huggingface_token: Option<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("gemini_api_key", &"<redacted>")
            .field(
                "huggingface_token",
                &self.huggingface_token.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

impl Credentials {
    /// Reads credentials from the process environment, after loading a `.env`
    /// file from the current directory if one exists.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the missing variable.
    pub fn from_env(provider: ImageProvider) -> StoryloomResult<Self> {
        match dotenvy::dotenv() {
            Ok(path) => debug!(path = %path.display(), "Loaded .env"),
            Err(e) => debug!(error = %e, "No .env loaded"),
        }
        Self::resolve(provider, |name| std::env::var(name).ok())
    }

    /// Resolves credentials through `lookup`; blank values count as missing.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the missing variable.
    pub fn resolve(
        provider: ImageProvider,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> StoryloomResult<Self> {
        let present = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let gemini_api_key = present(GEMINI_API_KEY_VAR)
            .or_else(|| present(GOOGLE_API_KEY_VAR))
            .ok_or_else(|| {
                ConfigError::new(format!(
                    "{} (or {}) environment variable is not set",
                    GEMINI_API_KEY_VAR, GOOGLE_API_KEY_VAR
                ))
            })?;

        let huggingface_token = match provider {
            ImageProvider::HuggingFace => Some(present(HF_TOKEN_VAR).ok_or_else(|| {
                ConfigError::new(format!(
                    "{} environment variable is not set",
                    HF_TOKEN_VAR
                ))
            })?),
            ImageProvider::Gemini => None,
        };

        Ok(Self {
            gemini_api_key,
            huggingface_token,
        })
    }

    /// Gemini API key.
    pub fn gemini_api_key(&self) -> &str {
        &self.gemini_api_key
    }

    /// HuggingFace token, present when that provider is selected.
    pub fn huggingface_token(&self) -> Option<&str> {
        self.huggingface_token.as_deref()
    }
}
