use super::client::MonsterHttpClient;
use crate::ai::ImageGenerationService;
use crate::models::ImageGenerationParams;
use crate::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Serialize)]
struct Txt2ImgRequest<'a> {
    prompt: &'a str,
    negprompt: &'a str,
    samples: u32,
    steps: u32,
    aspect_ratio: &'a str,
    guidance_scale: f32,
    seed: u64,
}

#[derive(Debug, Deserialize)]
struct Txt2ImgResponse {
    output: Vec<String>,
}

pub struct MonsterImageClient {
    http: MonsterHttpClient,
}

impl MonsterImageClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self::new_with_client(api_key, model, reqwest::Client::new())
    }

    pub fn new_with_client(api_key: String, model: String, client: reqwest::Client) -> Self {
        Self {
            // 120 second timeout; diffusion jobs are slow
            http: MonsterHttpClient::new_with_client(
                api_key,
                model,
                Duration::from_secs(120),
                client,
            ),
        }
    }

    #[cfg(test)]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.http = self.http.with_base_url(base_url);
        self
    }
}

#[async_trait]
impl ImageGenerationService for MonsterImageClient {
    async fn generate_image(&self, params: &ImageGenerationParams) -> Result<Vec<String>> {
        let request = Txt2ImgRequest {
            prompt: &params.prompt,
            negprompt: &params.negative_prompt,
            samples: params.samples,
            steps: params.steps,
            aspect_ratio: &params.aspect_ratio,
            guidance_scale: params.guidance_scale,
            seed: params.seed,
        };

        let response: Txt2ImgResponse = self.http.generate(&request).await?;

        tracing::debug!("Monster API returned {} output(s)", response.output.len());

        Ok(response.output)
    }
}
