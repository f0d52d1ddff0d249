//! Data models and structures
//!
//! Defines the request/response types exchanged with the serving layer, the
//! structured input for image generation, and service configuration.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

const DEFAULT_TEXT_MODEL: &str = "gemini-pro";
const DEFAULT_IMAGE_MODEL: &str = "txt2img";
const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Input for story generation: the moral to teach and the cast, in order.
/// Duplicate names are permitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoryRequest {
    pub moral_value: String,
    pub character_names: Vec<String>,
}

/// A validated, parsed story. `scenes` maps each scene-marker line (trimmed,
/// brackets included) to its body text, in order of first appearance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedStory {
    pub title: String,
    pub scenes: IndexMap<String, String>,
    pub full_text: String,
}

/// Wire shape returned for a story request: the parsed story without the raw
/// text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoryResponse {
    pub title: String,
    pub scenes: IndexMap<String, String>,
}

impl From<GeneratedStory> for StoryResponse {
    fn from(story: GeneratedStory) -> Self {
        Self {
            title: story.title,
            scenes: story.scenes,
        }
    }
}

/// Input for illustrating a single scene. Every name in `characters_involved`
/// must have an entry in `character_descriptions`. `scene_name` only labels
/// the output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageRequest {
    pub scene_description: String,
    pub characters_involved: Vec<String>,
    pub character_descriptions: HashMap<String, String>,
    pub scene_name: String,
}

/// Reference to an externally hosted image. The field carries a URL; the name
/// matches the public API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedImage {
    pub image_path: String,
}

/// Fixed liveness payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

/// Provider-agnostic parameters for one image-generation call.
#[derive(Debug, Clone)]
pub struct ImageGenerationParams {
    pub prompt: String,
    pub negative_prompt: String,
    pub samples: u32,
    pub steps: u32,
    pub aspect_ratio: String,
    pub guidance_scale: f32,
    pub seed: u64,
}

// Configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub monster_api_key: String,
    pub text_model: String,
    pub image_model: String,
    pub temperature: f32,
}

impl Config {
    pub fn from_env() -> crate::Result<Self> {
        dotenvy::dotenv().ok();

        let temperature = match std::env::var("TEMPERATURE") {
            Ok(raw) => raw.parse::<f32>().map_err(|_| {
                crate::Error::Config(format!("Invalid TEMPERATURE '{}': expected a number", raw))
            })?,
            Err(_) => DEFAULT_TEMPERATURE,
        };

        Ok(Self {
            gemini_api_key: std::env::var("GEMINI_API_KEY")
                .map_err(|_| crate::Error::Config("GEMINI_API_KEY not set".to_string()))?,
            monster_api_key: std::env::var("MONSTER_API_KEY")
                .map_err(|_| crate::Error::Config("MONSTER_API_KEY not set".to_string()))?,
            text_model: std::env::var("TEXT_MODEL")
                .unwrap_or_else(|_| DEFAULT_TEXT_MODEL.to_string()),
            image_model: std::env::var("IMAGE_MODEL")
                .unwrap_or_else(|_| DEFAULT_IMAGE_MODEL.to_string()),
            temperature,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_story_request_deserialization() {
        let json = r#"{"moral_value": "honesty", "character_names": ["Maya", "Tom"]}"#;
        let request: StoryRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.moral_value, "honesty");
        assert_eq!(request.character_names, vec!["Maya", "Tom"]);
    }

    #[test]
    fn test_image_request_deserialization() {
        let json = r#"{
            "scene_description": "a sunny park",
            "characters_involved": ["Maya"],
            "character_descriptions": {"Maya": "a small girl in a red coat"},
            "scene_name": "scene_1"
        }"#;
        let request: ImageRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.scene_description, "a sunny park");
        assert_eq!(request.characters_involved, vec!["Maya"]);
        assert_eq!(
            request.character_descriptions.get("Maya").map(String::as_str),
            Some("a small girl in a red coat")
        );
        assert_eq!(request.scene_name, "scene_1");
    }

    #[test]
    fn test_story_response_preserves_scene_order() {
        let mut scenes = IndexMap::new();
        scenes.insert("[Scene 1]".to_string(), "First".to_string());
        scenes.insert("[Scene 2]".to_string(), "Second".to_string());
        scenes.insert("[Scene 3]".to_string(), "Third".to_string());

        let response = StoryResponse {
            title: "The Kind Bear".to_string(),
            scenes,
        };

        let json = serde_json::to_string(&response).unwrap();
        let scene_1 = json.find("[Scene 1]").unwrap();
        let scene_2 = json.find("[Scene 2]").unwrap();
        let scene_3 = json.find("[Scene 3]").unwrap();
        assert!(scene_1 < scene_2);
        assert!(scene_2 < scene_3);
    }

    #[test]
    fn test_story_response_from_generated_story_drops_full_text() {
        let story = GeneratedStory {
            title: "T".to_string(),
            scenes: IndexMap::new(),
            full_text: "Title: T".to_string(),
        };

        let response = StoryResponse::from(story);
        let json = serde_json::to_string(&response).unwrap();
        assert!(!json.contains("full_text"));
    }

    #[test]
    fn test_generated_image_serializes_image_path_field() {
        let image = GeneratedImage {
            image_path: "https://cdn.example.com/scene.png".to_string(),
        };

        let json = serde_json::to_string(&image).unwrap();
        assert_eq!(
            json,
            r#"{"image_path":"https://cdn.example.com/scene.png"}"#
        );
    }
}
