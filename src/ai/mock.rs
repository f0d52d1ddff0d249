use super::{ImageGenerationService, TextGenerationService};
use crate::models::ImageGenerationParams;
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

const DEFAULT_STORY: &str = "Title: The Honest Little Fox\n\
[Scene 1]\n\
Finn the fox found a shiny red ball in the meadow.\n\
[Scene 2]\n\
\"Is this yours?\" Finn asked everyone he met.\n\
[Scene 3]\n\
Finn gave the ball back to Bella the bunny, and they played together all day.";

#[derive(Clone)]
pub struct MockTextClient {
    responses: Arc<Mutex<Vec<std::result::Result<String, String>>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockTextClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    pub fn with_text_response(self, response: String) -> Self {
        self.responses.lock().unwrap().push(Ok(response));
        self
    }

    pub fn with_error_response(self, message: String) -> Self {
        self.responses.lock().unwrap().push(Err(message));
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

impl Default for MockTextClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextGenerationService for MockTextClient {
    async fn generate_text(&self, _prompt: &str, _temperature: f32) -> Result<String> {
        let mut count = self.call_count.lock().unwrap();
        *count += 1;

        let responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            // Default mock response
            Ok(DEFAULT_STORY.to_string())
        } else {
            let index = (*count - 1) % responses.len();
            match &responses[index] {
                Ok(text) => Ok(text.clone()),
                Err(message) => Err(Error::AiProvider(message.clone())),
            }
        }
    }
}

#[derive(Clone)]
pub struct MockImageClient {
    responses: Arc<Mutex<Vec<std::result::Result<Vec<String>, String>>>>,
    calls: Arc<Mutex<Vec<ImageGenerationParams>>>,
}

impl MockImageClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_output_urls(self, urls: Vec<String>) -> Self {
        self.responses.lock().unwrap().push(Ok(urls));
        self
    }

    pub fn with_error_response(self, message: String) -> Self {
        self.responses.lock().unwrap().push(Err(message));
        self
    }

    pub fn get_call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Parameters of every dispatched call, in order.
    pub fn recorded_params(&self) -> Vec<ImageGenerationParams> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockImageClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageGenerationService for MockImageClient {
    async fn generate_image(&self, params: &ImageGenerationParams) -> Result<Vec<String>> {
        let mut calls = self.calls.lock().unwrap();
        calls.push(params.clone());
        let count = calls.len();

        let responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            // Default mock response
            Ok(vec![
                "https://mock-images.example.com/scene-0001.png".to_string()
            ])
        } else {
            let index = (count - 1) % responses.len();
            match &responses[index] {
                Ok(urls) => Ok(urls.clone()),
                Err(message) => Err(Error::AiProvider(message.clone())),
            }
        }
    }
}
