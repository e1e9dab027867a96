use crate::api;
use crate::store::{Action, StoreContext};
use shared::models::CreateCharacterRequest;
use yew::prelude::*;

#[function_component(CharModal)]
pub fn char_modal() -> Html {
    let store = use_context::<StoreContext>().expect("Store context not found");

    let name = use_state(String::new);
    let description = use_state(String::new);
    let image_url = use_state(String::new);

    let on_save = {
        let store = store.clone();
        let name = name.clone();
        let description = description.clone();
        let image_url = image_url.clone();

        Callback::from(move |_| {
            if name.trim().is_empty() {
                return;
            }
            let request = CreateCharacterRequest {
                name: (*name).clone(),
                description: (*description).clone(),
                image_url: (!image_url.is_empty()).then(|| (*image_url).clone()),
            };

            let store = store.clone();
            yew::platform::spawn_local(async move {
                match api::create_character(request).await {
                    Ok(character) => {
                        let id = character.id;
                        store.dispatch(Action::AddCharacter(character));
                        store.dispatch(Action::SelectCharacter(id));
                        store.dispatch(Action::CloseModal);
                    }
                    Err(e) => tracing::error!("Failed to create character: {:?}", e),
                }
            });
        })
    };

    let on_close = {
        let store = store.clone();
        Callback::from(move |_| store.dispatch(Action::CloseModal))
    };

    let on_cancel = {
        let store = store.clone();
        Callback::from(move |_| store.dispatch(Action::CloseModal))
    };

    html! {
        <div class="modal-overlay" onclick={on_close}>
            <div class="modal-content" onclick={|e: MouseEvent| e.stop_propagation()}>
                <div class="modal-header">
                    <h2 class="modal-title">{"Create New Character"}</h2>
                    <button class="close-btn" onclick={on_cancel.clone()}>{"×"}</button>
                </div>

                <div class="modal-body">
                    <div class="form-group">
                        <label class="form-label">{"Name"}</label>
                        <input class="form-input" type="text" placeholder="e.g. Zara" oninput={Callback::from(move |e: InputEvent| {
                            let i: web_sys::HtmlInputElement = e.target_unchecked_into();
                            name.set(i.value());
                        })} />
                    </div>

                    <div class="form-group">
                        <label class="form-label">{"Description"}</label>
                        <textarea class="form-textarea" rows="3" placeholder="Who they are, how they speak, what they want..." oninput={Callback::from(move |e: InputEvent| {
                            let i: web_sys::HtmlTextAreaElement = e.target_unchecked_into();
                            description.set(i.value());
                        })} />
                    </div>

                    <div class="form-group">
                        <label class="form-label">{"Image URL"}</label>
                        <input class="form-input" type="text" placeholder="https:// (optional)" oninput={Callback::from(move |e: InputEvent| {
                            let i: web_sys::HtmlInputElement = e.target_unchecked_into();
                            image_url.set(i.value());
                        })} />
                    </div>

                    <div class="form-actions">
                        <button class="btn btn-secondary" onclick={on_cancel}>{"Cancel"}</button>
                        <button class="btn btn-primary" onclick={on_save}>{"Create Character"}</button>
                    </div>
                </div>
            </div>
        </div>
    }
}
