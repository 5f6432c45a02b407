mod chat_session_gateway;
mod converse;

pub use chat_session_gateway::*;
pub use converse::*;
