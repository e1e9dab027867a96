pub mod characters;
pub mod chat;
pub mod stories;

pub use characters::*;
pub use chat::*;
pub use stories::*;
