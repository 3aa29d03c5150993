//! Lambda request handling: event parsing, response shaping, and the entry point

pub mod handler;
pub mod helpers;
pub mod parsing;

// Re-export the main handler for convenience
pub use handler::handler;
