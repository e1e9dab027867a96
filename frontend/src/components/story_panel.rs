use crate::api;
use crate::store::{Action, StoreContext};
use shared::models::CreateStoryRequest;
use yew::prelude::*;

/// Story list with inline creation and an "add active character" action
/// per story.
#[function_component(StoryPanel)]
pub fn story_panel() -> Html {
    let store = use_context::<StoreContext>().expect("Store context not found");
    let title = use_state(String::new);

    let on_title_input = {
        let title = title.clone();
        Callback::from(move |e: InputEvent| {
            let i: web_sys::HtmlInputElement = e.target_unchecked_into();
            title.set(i.value());
        })
    };

    let on_create = {
        let store = store.clone();
        let title = title.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if title.trim().is_empty() {
                return;
            }
            let request = CreateStoryRequest {
                title: (*title).clone(),
                description: String::new(),
            };
            title.set(String::new());

            let store = store.clone();
            yew::platform::spawn_local(async move {
                match api::create_story(request).await {
                    Ok(story) => store.dispatch(Action::AddStory(story)),
                    Err(e) => tracing::error!("Failed to create story: {:?}", e),
                }
            });
        })
    };

    let on_add_character = {
        let store = store.clone();
        Callback::from(move |story_id: uuid::Uuid| {
            let Some(character_id) = store.active_character_id else {
                return;
            };
            let store = store.clone();
            yew::platform::spawn_local(async move {
                if api::add_character_to_story(story_id, character_id)
                    .await
                    .is_ok()
                {
                    store.dispatch(Action::AttachCharacterToStory {
                        story_id,
                        character_id,
                    });
                }
            });
        })
    };

    html! {
        <div class="story-panel">
            <div class="section-label">{"Stories"}</div>

            <div class="story-list">
                { for store.stories.iter().map(|story| {
                    let id = story.id;
                    let on_add = on_add_character.clone();
                    html! {
                        <div class="story-item">
                            <div class="story-info">
                                <div class="story-title">{&story.title}</div>
                                <div class="story-cast">{format!("{} characters", story.character_ids.len())}</div>
                            </div>
                            if store.active_character_id.is_some() {
                                <button class="icon-btn" title="Add active character" onclick={move |_| on_add.emit(id)}>
                                    <svg viewBox="0 0 24 24"><path d="M19 13h-6v6h-2v-6H5v-2h6V5h2v6h6v2z"></path></svg>
                                </button>
                            }
                        </div>
                    }
                })}
            </div>

            <form class="story-create" onsubmit={on_create}>
                <input
                    class="form-input"
                    type="text"
                    placeholder="New story title..."
                    value={(*title).clone()}
                    oninput={on_title_input}
                />
            </form>
        </div>
    }
}
