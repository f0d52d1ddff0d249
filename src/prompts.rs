pub const STORY_USER: &str = include_str!("../data/prompts/story_user.txt");

/// Replace `{{key}}` placeholders in a template string.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = template.to_string();
    for (key, value) in vars {
        result = result.replace(&format!("{{{{{}}}}}", key), value);
    }
    result
}

/// Render the story prompt for a moral value and an ordered cast of
/// characters. Deterministic for fixed inputs.
pub fn story_prompt(moral_value: &str, character_names: &[String]) -> String {
    let names = character_names.join(", ");
    render(
        STORY_USER,
        &[("moral_value", moral_value), ("character_names", &names)],
    )
}
