//! User data use-case services.
//!
//! # Responsibility
//! - Load the user data document from disk.
//! - Flatten it and delegate persistence to a storage sink.

pub mod exporter;
pub mod loader;
