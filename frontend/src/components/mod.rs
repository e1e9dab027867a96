pub mod char_modal;
pub mod chat_stage;
pub mod sidebar;
pub mod story_panel;
