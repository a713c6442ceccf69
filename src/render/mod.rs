//! Document Rendering

mod markdown;
pub mod mermaid;

pub use markdown::DocumentRenderer;
