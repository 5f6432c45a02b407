//! # Connector Layer
//!
//! External integrations implementing application ports:
//! - Language services (Gemini REST, offline mock)
//! - The widget's HTTP client for a remote gateway
//! - HTTP API and terminal widget entry points

pub mod adapter;
pub mod api;

pub use adapter::*;
pub use api::*;
