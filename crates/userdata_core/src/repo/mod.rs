//! Storage sink contract and persistence implementations.
//!
//! # Responsibility
//! - Define the write boundary the exporter delegates to.
//! - Isolate SQLite query details from loading and flattening.
//!
//! # Invariants
//! - Sink writes are whole-batch; no chunking or partial commits.

pub mod affiliation_repo;
