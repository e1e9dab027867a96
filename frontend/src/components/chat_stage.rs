use crate::api;
use crate::store::{Action, StoreContext};
use shared::models::ChatMessage;
use web_sys::{Element, HtmlInputElement};
use yew::prelude::*;

const QUICK_STARTERS: [&str; 5] = [
    "Tell me about yourself",
    "What's your story?",
    "What do you like to do?",
    "What's your world like?",
    "What makes you unique?",
];

#[derive(Properties, PartialEq)]
pub struct MessageBubbleProps {
    pub message: ChatMessage,
    pub char_name: String,
}

#[function_component(MessageBubble)]
pub fn message_bubble(props: &MessageBubbleProps) -> Html {
    let message = &props.message;
    let (side, kind, name) = if message.is_user() {
        ("message-user", "bubble-user", "You".to_string())
    } else if message.is_character() {
        ("message-character", "bubble-character", props.char_name.clone())
    } else {
        ("message-system", "bubble-system", "System".to_string())
    };

    html! {
        <div class={classes!("message", side)}>
            if !message.is_user() {
                <div class="avatar bot" title={name.clone()}>
                    {name.chars().next().unwrap_or('?')}
                </div>
            }
            <div class={classes!("message-bubble", kind)}>
                <div class="message-role">{&name}</div>
                <div class="message-text">{&message.content}</div>
                <div class="message-time">{message.timestamp.format("%H:%M").to_string()}</div>
            </div>
        </div>
    }
}

#[function_component(ChatStage)]
pub fn chat_stage() -> Html {
    let store = use_context::<StoreContext>().expect("Store context not found");
    let input_ref = use_node_ref();
    let container_ref = use_node_ref();
    // Synchronous in-flight latch. The reducer snapshot behind `store`
    // only updates on the next render, so rapid double submits would
    // both pass a snapshot check; the latch flips immediately.
    let in_flight = use_mut_ref(|| false);

    let Some(character) = store.active_character().cloned() else {
        return html! {
            <div class="chat-stage empty">
                <div class="stage-empty-state">
                    <h2>{"Pick a character"}</h2>
                    <p>{"Select someone from the sidebar and start a conversation."}</p>
                </div>
            </div>
        };
    };

    let session = store.active_session();
    let transcript: Vec<ChatMessage> = session
        .map(|s| s.transcript.clone())
        .unwrap_or_default();
    let is_sending = session.is_some_and(|s| s.is_sending);

    // Auto-scroll on new messages
    {
        let container_ref = container_ref.clone();
        use_effect_with(transcript.len(), move |_| {
            if let Some(div) = container_ref.cast::<Element>() {
                div.set_scroll_top(div.scroll_height());
            }
            || {}
        });
    }

    let submit_text = {
        let store = store.clone();
        let character = character.clone();
        let in_flight = in_flight.clone();
        Callback::from(move |text: String| {
            let session = store.sessions.get(&character.id);
            if text.trim().is_empty()
                || session.is_none_or(|s| s.is_sending)
                || *in_flight.borrow()
            {
                return;
            }
            *in_flight.borrow_mut() = true;

            store.dispatch(Action::BeginTurn {
                character_id: character.id,
                text: text.clone(),
            });

            let store = store.clone();
            let character = character.clone();
            let in_flight = in_flight.clone();
            yew::platform::spawn_local(async move {
                let outcome = api::send_chat(text, &character).await;
                *in_flight.borrow_mut() = false;
                store.dispatch(Action::FinishTurn {
                    character_id: character.id,
                    outcome,
                });
            });
        })
    };

    let on_submit = {
        let input_ref = input_ref.clone();
        let submit_text = submit_text.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let Some(input) = input_ref.cast::<HtmlInputElement>() else {
                return;
            };
            let text = input.value();
            input.set_value("");
            submit_text.emit(text);
        })
    };

    let on_starter = {
        let submit_text = submit_text.clone();
        Callback::from(move |starter: &'static str| {
            submit_text.emit(starter.to_string());
        })
    };

    let on_clear = {
        let store = store.clone();
        let character_id = character.id;
        Callback::from(move |_: MouseEvent| {
            store.dispatch(Action::ClearTranscript(character_id));
        })
    };

    html! {
        <div class="chat-stage">
            <header class="stage-header">
                <div class="stage-title">
                    <h2>{format!("Chat with {}", character.name)}</h2>
                    if !character.description.is_empty() {
                        <p class="stage-subtitle">{&character.description}</p>
                    }
                </div>
                if !transcript.is_empty() {
                    <button class="btn btn-secondary btn-sm" onclick={on_clear} title="Clear chat history">
                        {"Clear"}
                    </button>
                }
            </header>

            <div class="message-list" ref={container_ref}>
                if transcript.is_empty() {
                    <div class="stage-empty-state">
                        <p>{format!("Start a conversation with {}...", character.name)}</p>
                        <div class="quick-starters">
                            { for QUICK_STARTERS.iter().copied().map(|starter| {
                                let on_starter = on_starter.clone();
                                html! {
                                    <button class="starter-chip" onclick={move |_| on_starter.emit(starter)}>
                                        {starter}
                                    </button>
                                }
                            })}
                        </div>
                    </div>
                }
                { for transcript.iter().map(|message| html! {
                    <MessageBubble
                        key={message.id.to_string()}
                        message={message.clone()}
                        char_name={character.name.clone()}
                    />
                })}
                if is_sending {
                    <div class="message message-character">
                        <div class="avatar bot">{character.name.chars().next().unwrap_or('?')}</div>
                        <div class="message-bubble bubble-character typing">
                            {format!("{} is typing...", character.name)}
                        </div>
                    </div>
                }
            </div>

            <form class="composer" onsubmit={on_submit}>
                <input
                    ref={input_ref}
                    class="composer-input"
                    type="text"
                    placeholder={format!("Type a message to {}...", character.name)}
                    disabled={is_sending}
                />
                <button class="btn btn-primary" type="submit" disabled={is_sending}>
                    if is_sending { {"Sending..."} } else { {"Send"} }
                </button>
            </form>
        </div>
    }
}
