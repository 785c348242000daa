mod error;
mod gemini;

pub use error::{AdviceError, AdviceErrorKind};
pub use gemini::{GeminiClient, GeminiConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};

use async_trait::async_trait;
use sehatku_core::AdvicePrompt;

/// A generative-text backend that turns one prompt into one block of advice.
#[async_trait]
pub trait AdviceClient: Send + Sync {
    async fn generate(&self, prompt: &AdvicePrompt) -> Result<String, AdviceError>;
}
