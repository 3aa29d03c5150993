//! Configuration and data model shared by the handler and the external API client

pub mod config;
pub mod models;
