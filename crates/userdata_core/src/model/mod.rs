//! User data domain model.
//!
//! # Responsibility
//! - Define the document shape loaded from YAML.
//! - Define the date-only value and its textual codec.
//! - Define the flat record handed to storage.

pub mod date;
pub mod userdata;
