//! Configuration for the chat client.
//!
//! This module provides:
//!
//! - [`ClientConfig`] and [`ClientConfigBuilder`] for configuring the client
//! - The [`SessionId`] newtype for server-side conversation identifiers
//!
//! # Example
//!
//! ```ignore
//! use libchat::config::ClientConfig;
//!
//! let config = ClientConfig::builder()
//!     .base_url("https://chat.example.com")
//!     .auth_token("secret")
//!     .build()?;
//! ```

pub mod builder;
pub mod options;

// Re-export commonly used types
pub use builder::{ClientConfig, ClientConfigBuilder};
pub use options::{SessionId, DEFAULT_CHAT_PATH};
