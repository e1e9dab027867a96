/// Build the system instruction for a persona. Pure: the same name and
/// description always produce the same prompt.
///
/// The rules keep the model speaking as the character itself (never as a
/// narrator or as an assistant), cap reply length, and tell it to invent
/// persona-consistent details instead of admitting gaps.
pub fn persona_prompt(name: &str, description: Option<&str>) -> String {
    format!(
        "You are {name}. {description}\n\n\
         IMPORTANT RULES:\n\
         1. Stay completely in character as {name}\n\
         2. Respond as if you ARE {name}, not as a narrator\n\
         3. Keep responses concise (1-3 sentences max)\n\
         4. Be engaging and true to the character's personality\n\
         5. If you don't know something about the character, make it up based on the description\n\
         6. Never break character or explain that you're an AI",
        description = description.unwrap_or("")
    )
}
