//! Children's story generation service backed by Gemini and the Monster API.
//!
//! Builds story prompts from a moral value and a cast of characters, validates
//! and parses the generated text into a title plus ordered scenes, and
//! assembles prompts for illustrating individual scenes with a text-to-image
//! model.

pub mod ai;
pub mod app;
pub mod error;
pub mod models;
pub mod prompts;
pub mod story;

pub use error::{Error, Result};
