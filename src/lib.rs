//! SoulGraph library crate
//!
//! Content ranking and relationship consistency for the community site,
//! plus a thin client for its HTTP API.

pub mod client;
pub mod config;
pub mod error;
pub mod social;

// Re-export commonly used types
pub use client::SocialClient;
pub use config::Config;
pub use error::{Error, Result};
pub use social::*;
