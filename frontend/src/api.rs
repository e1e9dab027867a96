use crate::session::TurnOutcome;
use gloo_net::http::Request;
use gloo_storage::{LocalStorage, Storage};
use shared::models::*;
use uuid::Uuid;

const API_BASE: &str = "/api";
const USER_KEY: &str = "fabula.user";

/// Subject forwarded as `x-user-id`. In a deployment the auth proxy
/// overwrites this; standalone, a stable local identity is minted once
/// and reused.
fn user_id() -> String {
    if let Ok(existing) = LocalStorage::get::<String>(USER_KEY) {
        return existing;
    }
    let minted = format!("local|{}", Uuid::new_v4());
    let _ = LocalStorage::set(USER_KEY, &minted);
    minted
}

pub async fn fetch_characters() -> Result<Vec<Character>, gloo_net::Error> {
    Request::get(&format!("{API_BASE}/characters"))
        .header("x-user-id", &user_id())
        .send()
        .await?
        .json()
        .await
}

pub async fn create_character(
    request: CreateCharacterRequest,
) -> Result<Character, gloo_net::Error> {
    Request::post(&format!("{API_BASE}/characters"))
        .header("x-user-id", &user_id())
        .json(&request)?
        .send()
        .await?
        .json()
        .await
}

pub async fn delete_character(id: Uuid) -> Result<(), gloo_net::Error> {
    let response = Request::delete(&format!("{API_BASE}/characters/{id}"))
        .header("x-user-id", &user_id())
        .send()
        .await?;
    if !response.ok() {
        return Err(gloo_net::Error::GlooError(format!(
            "Delete character failed with status {}",
            response.status()
        )));
    }
    Ok(())
}

pub async fn fetch_stories() -> Result<Vec<Story>, gloo_net::Error> {
    Request::get(&format!("{API_BASE}/stories"))
        .header("x-user-id", &user_id())
        .send()
        .await?
        .json()
        .await
}

pub async fn create_story(request: CreateStoryRequest) -> Result<Story, gloo_net::Error> {
    Request::post(&format!("{API_BASE}/stories"))
        .header("x-user-id", &user_id())
        .json(&request)?
        .send()
        .await?
        .json()
        .await
}

pub async fn add_character_to_story(
    story_id: Uuid,
    character_id: Uuid,
) -> Result<(), gloo_net::Error> {
    let response = Request::patch(&format!("{API_BASE}/stories/{story_id}"))
        .header("x-user-id", &user_id())
        .json(&AddCharacterToStoryRequest { character_id })?
        .send()
        .await?;
    if !response.ok() {
        return Err(gloo_net::Error::GlooError(format!(
            "Add character to story failed with status {}",
            response.status()
        )));
    }
    Ok(())
}

/// Run one chat turn against the response service. Every HTTP status
/// and transport failure maps onto a tagged `TurnOutcome`; callers never
/// probe response text.
pub async fn send_chat(message: String, character: &Character) -> TurnOutcome {
    let request = ChatRequest {
        message,
        character_name: character.name.clone(),
        character_description: (!character.description.is_empty())
            .then(|| character.description.clone()),
    };

    let request = match Request::post(&format!("{API_BASE}/chat"))
        .header("x-user-id", &user_id())
        .json(&request)
    {
        Ok(request) => request,
        Err(e) => {
            tracing::error!("Failed to encode chat request: {:?}", e);
            return TurnOutcome::NetworkError;
        }
    };

    let response = match request.send().await {
        Ok(response) => response,
        Err(e) => {
            tracing::error!("Chat request failed: {:?}", e);
            return TurnOutcome::NetworkError;
        }
    };

    if response.ok() {
        match response.json::<ChatReply>().await {
            Ok(reply) => TurnOutcome::Reply {
                content: reply.response,
                note: reply.note,
            },
            Err(e) => {
                tracing::error!("Malformed chat reply: {:?}", e);
                TurnOutcome::NetworkError
            }
        }
    } else {
        let failure = response.json::<ChatFailure>().await.unwrap_or(ChatFailure {
            message: "Sorry, I encountered an error. Please try again.".to_string(),
            error: None,
            suggestion: None,
        });
        TurnOutcome::Failed {
            message: failure.message,
            suggestion: failure.suggestion,
        }
    }
}
