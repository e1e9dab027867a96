use crate::session::{ChatSession, TurnOutcome};
use crate::storage::BrowserStore;
use shared::models::*;
use std::collections::HashMap;
use std::rc::Rc;
use uuid::Uuid;
use yew::prelude::*;

#[derive(Clone, PartialEq, Default)]
pub struct State {
    pub characters: Vec<Character>,
    pub stories: Vec<Story>,
    pub active_character_id: Option<Uuid>,
    /// One session per opened character view; created lazily on first
    /// visit, rehydrated from durable storage.
    pub sessions: HashMap<Uuid, ChatSession>,
    pub modal_open: bool,
}

impl State {
    pub fn active_character(&self) -> Option<&Character> {
        let id = self.active_character_id?;
        self.characters.iter().find(|c| c.id == id)
    }

    pub fn active_session(&self) -> Option<&ChatSession> {
        self.sessions.get(&self.active_character_id?)
    }
}

pub enum Action {
    SetCharacters(Vec<Character>),
    SetStories(Vec<Story>),
    AddCharacter(Character),
    RemoveCharacter(Uuid),
    AddStory(Story),
    AttachCharacterToStory { story_id: Uuid, character_id: Uuid },
    SelectCharacter(Uuid),
    BeginTurn { character_id: Uuid, text: String },
    FinishTurn { character_id: Uuid, outcome: TurnOutcome },
    ClearTranscript(Uuid),
    OpenModal,
    CloseModal,
}

impl Reducible for State {
    type Action = Action;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();

        match action {
            Action::SetCharacters(characters) => {
                next.characters = characters;
            }
            Action::SetStories(stories) => {
                next.stories = stories;
            }
            Action::AddCharacter(character) => {
                next.characters.insert(0, character);
            }
            Action::RemoveCharacter(id) => {
                next.characters.retain(|c| c.id != id);
                next.sessions.remove(&id);
                if next.active_character_id == Some(id) {
                    next.active_character_id = None;
                }
            }
            Action::AddStory(story) => {
                next.stories.insert(0, story);
            }
            Action::AttachCharacterToStory {
                story_id,
                character_id,
            } => {
                if let Some(story) = next.stories.iter_mut().find(|s| s.id == story_id) {
                    story.character_ids.push(character_id);
                }
            }
            Action::SelectCharacter(id) => {
                next.active_character_id = Some(id);
                next.sessions
                    .entry(id)
                    .or_insert_with(|| ChatSession::open(id, &BrowserStore));
            }
            Action::BeginTurn { character_id, text } => {
                if let Some(session) = next.sessions.get_mut(&character_id) {
                    session.begin_turn(&text, &BrowserStore);
                }
            }
            Action::FinishTurn {
                character_id,
                outcome,
            } => {
                if let Some(session) = next.sessions.get_mut(&character_id) {
                    session.finish_turn(outcome, &BrowserStore);
                }
            }
            Action::ClearTranscript(character_id) => {
                if let Some(session) = next.sessions.get_mut(&character_id) {
                    session.clear(&BrowserStore);
                }
            }
            Action::OpenModal => {
                next.modal_open = true;
            }
            Action::CloseModal => {
                next.modal_open = false;
            }
        }

        next.into()
    }
}

pub type StoreContext = UseReducerHandle<State>;
