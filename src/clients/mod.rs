//! Outbound HTTP clients

pub mod generate;

pub use generate::{GenerateClient, ReplyBackend};
