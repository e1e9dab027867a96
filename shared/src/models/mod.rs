pub mod character;
pub mod chat;
pub mod message;
pub mod story;

pub use character::*;
pub use chat::*;
pub use message::*;
pub use story::*;
