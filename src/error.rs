//! Error handling and custom error types
//!
//! Provides unified error handling across the application using thiserror.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("AI provider error: {0}")]
    AiProvider(String),

    #[error("Story validation failed: {0}")]
    Validation(String),

    #[error("Failed to generate a valid story after {attempts} attempts")]
    GenerationExhausted { attempts: usize },

    #[error("No description provided for character: {0}")]
    MissingCharacterDescription(String),

    #[error("Image provider returned no outputs")]
    EmptyGenerationResult,

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Whether the story retry loop should attempt again after this error.
    ///
    /// Validation failures and provider faults are retryable; everything else
    /// ends the request.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Error::Validation(_) | Error::AiProvider(_) | Error::Http(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
