mod chat_backend;
mod language_service;

pub use chat_backend::*;
pub use language_service::*;
