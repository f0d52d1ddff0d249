use std::collections::HashMap;
use storyweaver::{
    ai::{MockImageClient, MockTextClient, TextGenerationService},
    app::{App, AppServices},
    models::{GeneratedImage, ImageRequest, StoryRequest, StoryResponse},
    story, Error,
};

const STORY_TEXT: &str = "Title: The Sharing Squirrels\n\
\n\
[Scene 1]\n\
Pip and Nula the squirrels found a big pile of acorns under the old oak tree.\n\
\n\
[Scene 2]\n\
\"Mine!\" said Pip, holding the acorns tight.\n\
Nula looked sad and walked away.\n\
\n\
[Scene 3]\n\
Pip shared the acorns, one for you, one for me, one for you, one for me.\n\
\n\
[Scene 4]\n\
The two squirrels munched together, and sharing made the acorns taste sweeter.";

fn build_app(text: MockTextClient, image: MockImageClient) -> App {
    App::with_services(
        AppServices {
            text: Box::new(text),
            image: Box::new(image),
        },
        0.7,
    )
}

#[tokio::test]
async fn test_story_request_to_response_with_mocks() {
    let text = MockTextClient::new().with_text_response(STORY_TEXT.to_string());
    let app = build_app(text, MockImageClient::new());

    let request: StoryRequest = serde_json::from_str(
        r#"{"moral_value": "sharing", "character_names": ["Pip", "Nula"]}"#,
    )
    .unwrap();

    let generated = app
        .generate_story(&request.moral_value, &request.character_names)
        .await
        .unwrap();

    assert_eq!(generated.title, "The Sharing Squirrels");
    assert_eq!(generated.scenes.len(), 4);
    assert_eq!(generated.full_text, STORY_TEXT);

    let markers: Vec<&String> = generated.scenes.keys().collect();
    assert_eq!(markers, ["[Scene 1]", "[Scene 2]", "[Scene 3]", "[Scene 4]"]);
    assert_eq!(
        generated.scenes["[Scene 2]"],
        "\"Mine!\" said Pip, holding the acorns tight.\nNula looked sad and walked away."
    );

    let response = StoryResponse::from(generated);
    let json = serde_json::to_string(&response).unwrap();
    assert!(json.contains("The Sharing Squirrels"));
    assert!(!json.contains("full_text"));
}

#[tokio::test]
async fn test_story_generation_recovers_on_second_attempt() {
    let text = MockTextClient::new()
        .with_text_response("No markers in this one.".to_string())
        .with_text_response(STORY_TEXT.to_string());
    let probe = text.clone();
    let app = build_app(text, MockImageClient::new());

    let generated = app
        .generate_story("sharing", &["Pip".to_string(), "Nula".to_string()])
        .await
        .unwrap();

    assert_eq!(generated.title, "The Sharing Squirrels");
    assert_eq!(probe.get_call_count(), 2);
}

#[tokio::test]
async fn test_story_generation_exhausts_retries() {
    let text = MockTextClient::new()
        .with_error_response("status 503".to_string())
        .with_text_response("Still no markers.".to_string())
        .with_error_response("status 500".to_string());
    let probe = text.clone();
    let app = build_app(text, MockImageClient::new());

    let err = app
        .generate_story("sharing", &["Pip".to_string()])
        .await
        .unwrap_err();

    assert!(matches!(err, Error::GenerationExhausted { attempts: 3 }));
    assert_eq!(probe.get_call_count(), 3);
}

#[tokio::test]
async fn test_image_request_to_response_with_mocks() {
    let image = MockImageClient::new()
        .with_output_urls(vec!["https://images.example.com/oak-tree.png".to_string()]);
    let probe = image.clone();
    let app = build_app(MockTextClient::new(), image);

    let request = ImageRequest {
        scene_description: "two squirrels under an old oak tree".to_string(),
        characters_involved: vec!["Pip".to_string(), "Nula".to_string()],
        character_descriptions: HashMap::from([
            ("Pip".to_string(), "a small red squirrel".to_string()),
            ("Nula".to_string(), "a grey squirrel with a bushy tail".to_string()),
        ]),
        scene_name: "scene_1".to_string(),
    };

    let generated = app.generate_scene_image(&request).await.unwrap();
    assert_eq!(generated.image_path, "https://images.example.com/oak-tree.png");

    let recorded = probe.recorded_params();
    assert_eq!(recorded.len(), 1);
    assert_eq!(
        recorded[0].prompt,
        "Pip: a small red squirrel\nNula: a grey squirrel with a bushy tail\n\
         Scene: two squirrels under an old oak tree."
    );
    assert_eq!(recorded[0].seed, 2414);

    let json = serde_json::to_string(&generated).unwrap();
    let roundtrip: GeneratedImage = serde_json::from_str(&json).unwrap();
    assert_eq!(roundtrip.image_path, generated.image_path);
}

#[tokio::test]
async fn test_image_generation_fails_without_description() {
    let app = build_app(MockTextClient::new(), MockImageClient::new());

    let request = ImageRequest {
        scene_description: "a meadow".to_string(),
        characters_involved: vec!["Pip".to_string()],
        character_descriptions: HashMap::new(),
        scene_name: "scene_2".to_string(),
    };

    let err = app.generate_scene_image(&request).await.unwrap_err();
    assert!(matches!(err, Error::MissingCharacterDescription(name) if name == "Pip"));
}

#[tokio::test]
async fn test_default_mock_story_passes_validation_and_parses() {
    let text = MockTextClient::new();

    let raw = text.generate_text("any prompt", 0.7).await.unwrap();
    story::validate(&raw).unwrap();

    let parsed = story::parse(&raw);
    assert!(!parsed.title.is_empty());
    assert!(!parsed.scenes.is_empty());
}

#[tokio::test]
async fn test_health_payload() {
    let app = build_app(MockTextClient::new(), MockImageClient::new());

    let json = serde_json::to_string(&app.health()).unwrap();
    assert_eq!(json, r#"{"status":"API is running successfully!"}"#);
}
