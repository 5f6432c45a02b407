mod gemini_client;
mod http_gateway_client;
mod mock_language_service;

pub use gemini_client::*;
pub use http_gateway_client::*;
pub use mock_language_service::*;
