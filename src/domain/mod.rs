//! # Domain Layer
//!
//! Conversation models and the pure rules that shape them: response
//! segmentation and history normalization.
//! This layer is independent of external frameworks and infrastructure.

mod error;
pub mod models;
pub mod services;

pub use error::*;
pub use models::*;
pub use services::*;
