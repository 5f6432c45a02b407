pub mod chat_controller;
mod markdown;
pub mod serve_controller;

pub use chat_controller::ChatController;
pub use serve_controller::ServeController;
