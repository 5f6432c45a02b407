//! Pure conversation rules shared by the gateway and the chat widget.

pub mod history_normalizer;
pub mod response_segmenter;

pub use history_normalizer::normalize;
pub use response_segmenter::segment;
