use rand::Rng;
use shared::models::ChatReply;
use std::time::Duration;

/// Attached to every fallback reply so the client can surface that no
/// provider was involved.
pub const FALLBACK_NOTE: &str = "OpenRouter API not configured - using fallback responses";

/// Canned in-character reply for when no provider credential is
/// configured. Picks one of five templates uniformly at random and
/// sleeps 1-3 seconds first so the caller's loading UI is exercised the
/// same way as on the live path.
pub async fn fallback_reply(name: &str, description: Option<&str>) -> ChatReply {
    let delay_ms = rand::thread_rng().gen_range(1000..3000);
    tokio::time::sleep(Duration::from_millis(delay_ms)).await;

    let response = render_template(rand::thread_rng().gen_range(0..5), name, description);
    ChatReply {
        response,
        note: Some(FALLBACK_NOTE.to_string()),
    }
}

fn render_template(pick: usize, name: &str, description: Option<&str>) -> String {
    match pick {
        0 => format!(
            "*In {name}'s voice*: Hello there! I'm {name}. {}",
            description.unwrap_or("I'm excited to chat with you!")
        ),
        1 => format!("*As {name}*: Greetings! I'm {name}. What would you like to know about me?"),
        2 => format!(
            "*{name} speaking*: Hi! I'm {name}. I'd love to tell you more about myself and my world."
        ),
        3 => format!(
            "*{name} responds*: Well hello! I'm {name}. {}",
            description.unwrap_or("I'm quite the character, aren't I?")
        ),
        _ => format!(
            "*{name} says*: Greetings, friend! I'm {name}. What brings you to chat with me today?"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn delays_between_one_and_three_seconds() {
        let start = tokio::time::Instant::now();
        let reply = fallback_reply("Zara", None).await;
        let elapsed = start.elapsed();

        assert!(elapsed >= Duration::from_secs(1), "elapsed {elapsed:?}");
        assert!(elapsed < Duration::from_secs(3), "elapsed {elapsed:?}");
        assert!(!reply.response.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn always_carries_the_note_and_the_name() {
        for _ in 0..20 {
            let reply = fallback_reply("Zara", Some("a sky pirate")).await;
            assert_eq!(reply.note.as_deref(), Some(FALLBACK_NOTE));
            assert!(reply.response.contains("Zara"), "got {}", reply.response);
        }
    }

    #[test]
    fn missing_description_uses_filler() {
        let line = render_template(0, "Zara", None);
        assert!(line.contains("I'm excited to chat with you!"));

        let line = render_template(3, "Zara", None);
        assert!(line.contains("I'm quite the character, aren't I?"));
    }

    #[test]
    fn description_is_embedded_where_the_template_calls_for_it() {
        let line = render_template(0, "Zara", Some("a sky pirate"));
        assert!(line.contains("a sky pirate"));
    }

    #[test]
    fn every_template_names_the_character() {
        for pick in 0..5 {
            let line = render_template(pick, "Kato", None);
            assert!(line.contains("Kato"), "template {pick}: {line}");
        }
    }
}
