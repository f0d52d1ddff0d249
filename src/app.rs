//! Service orchestration: story generation with bounded retries, and scene
//! image generation.

use crate::ai::{
    GeminiTextClient, ImageGenerationService, MonsterImageClient, TextGenerationService,
};
use crate::models::{
    Config, GeneratedImage, GeneratedStory, HealthStatus, ImageGenerationParams, ImageRequest,
};
use crate::{prompts, story, Error, Result};
use tokio_retry::{strategy::FixedInterval, RetryIf};
use tracing::{debug, error, info, warn};

const MAX_STORY_ATTEMPTS: usize = 3;
const RETRY_DELAY_MS: u64 = 500;

const NEGATIVE_PROMPT: &str = "deformed, bad anatomy, disfigured, poorly drawn face";
const IMAGE_SAMPLES: u32 = 1;
const DIFFUSION_STEPS: u32 = 50;
const ASPECT_RATIO: &str = "square";
const GUIDANCE_SCALE: f32 = 7.5;
const IMAGE_SEED: u64 = 2414;

/// Coordinates text and image generation for one request at a time. Holds
/// only immutable configuration and the provider clients; nothing is shared
/// between requests.
pub struct App {
    text: Box<dyn TextGenerationService>,
    image: Box<dyn ImageGenerationService>,
    temperature: f32,
}

/// Injectable service bundle used to construct [`App`] in tests/harnesses.
pub struct AppServices {
    pub text: Box<dyn TextGenerationService>,
    pub image: Box<dyn ImageGenerationService>,
}

impl App {
    /// Build an app from concrete service dependencies.
    ///
    /// This is primarily useful for integration tests and local harnesses that
    /// need to inject mocks.
    pub fn with_services(services: AppServices, temperature: f32) -> Self {
        Self {
            text: services.text,
            image: services.image,
            temperature,
        }
    }

    /// Construct an app from environment configuration (`Config::from_env`).
    pub fn new() -> Result<Self> {
        let config = Config::from_env()?;
        Ok(Self::from_config(&config))
    }

    pub fn from_config(config: &Config) -> Self {
        // Reuse one HTTP connection pool across provider clients.
        let http_client = reqwest::Client::new();

        info!("Text provider: Gemini (model: {})", config.text_model);
        let text = Box::new(GeminiTextClient::new_with_client(
            config.gemini_api_key.clone(),
            config.text_model.clone(),
            http_client.clone(),
        ));

        info!("Image provider: Monster API (model: {})", config.image_model);
        let image = Box::new(MonsterImageClient::new_with_client(
            config.monster_api_key.clone(),
            config.image_model.clone(),
            http_client,
        ));

        Self::with_services(AppServices { text, image }, config.temperature)
    }

    /// Generate a validated story, retrying up to [`MAX_STORY_ATTEMPTS`]
    /// times. Attempts are strictly sequential and the first validated result
    /// wins. Retryable failures past the last attempt surface as
    /// [`Error::GenerationExhausted`]; anything else propagates unmodified.
    pub async fn generate_story(
        &self,
        moral_value: &str,
        character_names: &[String],
    ) -> Result<GeneratedStory> {
        let retry_strategy =
            FixedInterval::from_millis(RETRY_DELAY_MS).take(MAX_STORY_ATTEMPTS - 1);

        let mut attempt = 0;
        let result = RetryIf::spawn(
            retry_strategy,
            || {
                attempt += 1;
                let attempt: usize = attempt;
                async move {
                    debug!(
                        "Story generation attempt {}/{}",
                        attempt, MAX_STORY_ATTEMPTS
                    );
                    match self.try_generate_story(moral_value, character_names).await {
                        Ok(story) => Ok(story),
                        Err(e) => {
                            warn!("Story attempt {} failed: {}", attempt, e);
                            Err(e)
                        }
                    }
                }
            },
            Error::is_retryable,
        )
        .await;

        result.map_err(|e| {
            if e.is_retryable() {
                error!(
                    "All {} story generation attempts failed: {}",
                    MAX_STORY_ATTEMPTS, e
                );
                Error::GenerationExhausted {
                    attempts: MAX_STORY_ATTEMPTS,
                }
            } else {
                e
            }
        })
    }

    async fn try_generate_story(
        &self,
        moral_value: &str,
        character_names: &[String],
    ) -> Result<GeneratedStory> {
        let prompt = prompts::story_prompt(moral_value, character_names);
        let raw = self.text.generate_text(&prompt, self.temperature).await?;

        story::validate(&raw)?;

        let parsed = story::parse(&raw);
        info!(
            "Generated story \"{}\" with {} scene(s)",
            parsed.title,
            parsed.scenes.len()
        );
        Ok(parsed)
    }

    /// Generate an illustration for a single scene and return the first
    /// output URL. No retries on this path; the first failure is terminal.
    pub async fn generate_scene_image(&self, request: &ImageRequest) -> Result<GeneratedImage> {
        let prompt = Self::build_image_prompt(request)?;

        info!("Generating image for scene: {}", request.scene_name);
        let params = ImageGenerationParams {
            prompt,
            negative_prompt: NEGATIVE_PROMPT.to_string(),
            samples: IMAGE_SAMPLES,
            steps: DIFFUSION_STEPS,
            aspect_ratio: ASPECT_RATIO.to_string(),
            guidance_scale: GUIDANCE_SCALE,
            seed: IMAGE_SEED,
        };

        let output = self.image.generate_image(&params).await?;
        let url = output.first().cloned().ok_or(Error::EmptyGenerationResult)?;

        Ok(GeneratedImage { image_path: url })
    }

    /// Assemble the image prompt: one `name: description` line per involved
    /// character, in order, then the scene line.
    fn build_image_prompt(request: &ImageRequest) -> Result<String> {
        let mut prompt = String::new();
        for name in &request.characters_involved {
            let description = request
                .character_descriptions
                .get(name)
                .ok_or_else(|| Error::MissingCharacterDescription(name.clone()))?;
            prompt.push_str(&format!("{}: {}\n", name, description));
        }
        prompt.push_str(&format!("Scene: {}.", request.scene_description));
        Ok(prompt)
    }

    /// Fixed liveness payload for the serving layer's probe.
    pub fn health(&self) -> HealthStatus {
        HealthStatus {
            status: "API is running successfully!".to_string(),
        }
    }
}
