use anyhow::Result;
use clap::{Parser, Subcommand};
use storyweaver::app::App;
use storyweaver::models::{ImageRequest, StoryResponse};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "storyweaver")]
#[command(about = "Generate children's stories and scene illustrations")]
struct CliArgs {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate a story teaching a moral value.
    Story {
        /// Moral value the story should teach, e.g. "honesty".
        #[arg(short, long)]
        moral_value: String,

        /// Character names to include, in order.
        #[arg(value_name = "NAME", required = true)]
        character_names: Vec<String>,
    },
    /// Generate an illustration for a single scene.
    Image {
        /// Scene description to illustrate.
        #[arg(short, long)]
        scene: String,

        /// Label used when reporting the generated image.
        #[arg(long, default_value = "scene")]
        scene_name: String,

        /// Character as NAME=DESCRIPTION; repeat per character, in order.
        #[arg(
            long = "character",
            value_name = "NAME=DESCRIPTION",
            value_parser = parse_character_arg,
            required = true
        )]
        characters: Vec<(String, String)>,
    },
}

fn parse_character_arg(input: &str) -> std::result::Result<(String, String), String> {
    input
        .split_once('=')
        .map(|(name, description)| (name.trim().to_string(), description.trim().to_string()))
        .filter(|(name, _)| !name.is_empty())
        .ok_or_else(|| {
            format!(
                "Invalid character '{}'. Expected format: NAME=DESCRIPTION",
                input
            )
        })
}

async fn run(app: &App, command: Command) -> storyweaver::Result<String> {
    match command {
        Command::Story {
            moral_value,
            character_names,
        } => {
            let story = app.generate_story(&moral_value, &character_names).await?;
            Ok(serde_json::to_string_pretty(&StoryResponse::from(story))?)
        }
        Command::Image {
            scene,
            scene_name,
            characters,
        } => {
            let request = ImageRequest {
                scene_description: scene,
                characters_involved: characters.iter().map(|(name, _)| name.clone()).collect(),
                character_descriptions: characters.into_iter().collect(),
                scene_name,
            };
            let image = app.generate_scene_image(&request).await?;
            Ok(serde_json::to_string_pretty(&image)?)
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "storyweaver=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting storyweaver");

    let args = CliArgs::parse();

    match App::new() {
        Ok(app) => match run(&app, args.command).await {
            Ok(output) => {
                println!("{}", output);
                Ok(())
            }
            Err(e) => {
                error!("Generation failed: {}", e);
                std::process::exit(1);
            }
        },
        Err(e) => {
            error!("Failed to initialize application: {}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::parse_character_arg;

    #[test]
    fn test_parse_character_arg_valid() {
        let (name, description) = parse_character_arg("Maya=a small girl in a red coat").unwrap();
        assert_eq!(name, "Maya");
        assert_eq!(description, "a small girl in a red coat");
    }

    #[test]
    fn test_parse_character_arg_trims_whitespace() {
        let (name, description) = parse_character_arg(" Tom = a tall boy ").unwrap();
        assert_eq!(name, "Tom");
        assert_eq!(description, "a tall boy");
    }

    #[test]
    fn test_parse_character_arg_rejects_missing_separator() {
        let err = parse_character_arg("Maya").unwrap_err();
        assert!(err.contains("NAME=DESCRIPTION"));
    }

    #[test]
    fn test_parse_character_arg_rejects_empty_name() {
        let err = parse_character_arg("=a dog").unwrap_err();
        assert!(err.contains("NAME=DESCRIPTION"));
    }
}
