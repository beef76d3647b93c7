// Re-export needed modules for testing
pub mod chat;
pub mod clock;
pub mod config;
pub mod contacts;
pub mod models;

// Re-export main types for convenience
pub use chat::{ChatSession, AUTO_REPLY_DELAY, AUTO_REPLY_TEXT};
pub use contacts::ContactList;
pub use models::*;
