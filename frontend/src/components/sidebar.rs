use crate::api;
use crate::components::story_panel::StoryPanel;
use crate::store::{Action, StoreContext};
use yew::prelude::*;

#[function_component(CharSidebar)]
pub fn char_sidebar() -> Html {
    let store = use_context::<StoreContext>().expect("Store context not found");

    // Load characters and stories on mount
    {
        let store = store.clone();
        use_effect_with((), move |_| {
            yew::platform::spawn_local(async move {
                if let Ok(characters) = api::fetch_characters().await {
                    store.dispatch(Action::SetCharacters(characters));
                }
                if let Ok(stories) = api::fetch_stories().await {
                    store.dispatch(Action::SetStories(stories));
                }
            });
            || {}
        });
    }

    let on_select = {
        let store = store.clone();
        Callback::from(move |id: uuid::Uuid| {
            store.dispatch(Action::SelectCharacter(id));
        })
    };

    let open_create = {
        let store = store.clone();
        Callback::from(move |_| store.dispatch(Action::OpenModal))
    };

    let on_delete = {
        let store = store.clone();
        Callback::from(move |id: uuid::Uuid| {
            let store = store.clone();
            yew::platform::spawn_local(async move {
                if web_sys::window()
                    .and_then(|w| {
                        w.confirm_with_message("Delete this character? Its chat history stays on this device until cleared.")
                            .ok()
                    })
                    == Some(true)
                    && api::delete_character(id).await.is_ok()
                {
                    store.dispatch(Action::RemoveCharacter(id));
                }
            });
        })
    };

    html! {
        <div class="sidebar">
            <header>
                <div class="sidebar-header-content">
                    <h1 class="app-title">{"Fabula"}</h1>
                </div>
                <div class="sidebar-toolbar">
                    <button class="icon-btn" onclick={open_create} title="Create Character">
                        <svg viewBox="0 0 24 24"><path d="M19 13h-6v6h-2v-6H5v-2h6V5h2v6h6v2z"></path></svg>
                    </button>
                </div>
            </header>

            <div class="section-label">
                {"Characters"}
            </div>

            <div class="char-list">
                if store.characters.is_empty() {
                    <div class="sidebar-empty-state">
                        {"No characters yet. Create one to start chatting."}
                    </div>
                }
                { for store.characters.iter().map(|character| {
                    let id = character.id;
                    let on_click = on_select.clone();
                    let on_delete_click = on_delete.clone();
                    let is_active = Some(id) == store.active_character_id;

                    html! {
                        <div class={classes!("char-item", if is_active { "active" } else { "" })} onclick={move |_| on_click.emit(id)}>
                            <div class="avatar bot">{character.name.chars().next().unwrap_or('?')}</div>
                            <div class="char-info">
                                <div class="char-name">{&character.name}</div>
                                <div class="char-desc">{&character.description}</div>
                            </div>
                            <button class="delete-btn" onclick={move |e: MouseEvent| { e.stop_propagation(); on_delete_click.emit(id); }} title="Delete character">
                                <svg viewBox="0 0 24 24"><path d="M6 19c0 1.1.9 2 2 2h8c1.1 0 2-.9 2-2V7H6v12zM19 4h-3.5l-1-1h-5l-1 1H5v2h14V4z"></path></svg>
                            </button>
                        </div>
                    }
                })}
            </div>

            <StoryPanel />

            <div class="sidebar-footer">
                {"Fabula v0.1.0"}
            </div>
        </div>
    }
}
