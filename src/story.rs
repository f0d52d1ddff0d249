//! Story validation and scene parsing.
//!
//! Raw generated text is accepted in the form `Title: <title>` on the first
//! line followed by body lines, with `[Scene <label>]` marker lines
//! introducing each scene.

use crate::models::GeneratedStory;
use crate::{Error, Result};
use indexmap::IndexMap;

/// Loose acceptance ceiling, well above the 150-200 words the prompt asks for.
pub const MAX_STORY_WORDS: usize = 500;

/// Literal substring that introduces a scene line.
pub const SCENE_MARKER: &str = "[Scene";

const TITLE_PREFIX: &str = "Title:";

/// Check raw generated text against the two acceptance rules: the word count
/// must not exceed [`MAX_STORY_WORDS`], and at least one scene marker must be
/// present.
pub fn validate(raw: &str) -> Result<()> {
    let word_count = raw.split_whitespace().count();
    if word_count > MAX_STORY_WORDS {
        return Err(Error::Validation(format!(
            "story has {} words, exceeding the {} word limit",
            word_count, MAX_STORY_WORDS
        )));
    }

    if !raw.contains(SCENE_MARKER) {
        return Err(Error::Validation(format!(
            "story contains no {} markers",
            SCENE_MARKER
        )));
    }

    Ok(())
}

/// Split validated text into a title and an insertion-ordered scene mapping.
///
/// Lines before the first marker are dropped, blank lines are never
/// accumulated, and a scene body is the accumulated lines joined with `\n`
/// and trimmed. A marker line flushes the previously open scene even when its
/// body is empty, but a trailing marker with no body lines is not recorded.
pub fn parse(raw: &str) -> GeneratedStory {
    let mut lines = raw.split('\n');

    let title = lines
        .next()
        .map(|line| {
            let line = line.trim();
            line.strip_prefix(TITLE_PREFIX).unwrap_or(line).trim()
        })
        .unwrap_or("")
        .to_string();

    let mut scenes = IndexMap::new();
    let mut current_marker: Option<String> = None;
    let mut current_lines: Vec<&str> = Vec::new();

    for line in lines {
        let trimmed = line.trim();
        if trimmed.starts_with(SCENE_MARKER) {
            if let Some(marker) = current_marker.take() {
                scenes.insert(marker, current_lines.join("\n").trim().to_string());
            }
            current_marker = Some(trimmed.to_string());
            current_lines.clear();
        } else if !trimmed.is_empty() && current_marker.is_some() {
            current_lines.push(line);
        }
    }

    if let Some(marker) = current_marker {
        if !current_lines.is_empty() {
            scenes.insert(marker, current_lines.join("\n").trim().to_string());
        }
    }

    GeneratedStory {
        title,
        scenes,
        full_text: raw.to_string(),
    }
}
