//! AI service integration for story text and scene image generation
//!
//! Provides trait seams over the Gemini text API and the Monster image API,
//! plus mock implementations for tests.

pub mod gemini;
pub mod mock;
pub mod monster;

pub use gemini::GeminiTextClient;
pub use mock::{MockImageClient, MockTextClient};
pub use monster::MonsterImageClient;

use crate::models::ImageGenerationParams;
use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait TextGenerationService: Send + Sync {
    async fn generate_text(&self, prompt: &str, temperature: f32) -> Result<String>;
}

#[async_trait]
pub trait ImageGenerationService: Send + Sync {
    /// Returns the provider's ordered list of output URLs.
    async fn generate_image(&self, params: &ImageGenerationParams) -> Result<Vec<String>>;
}
