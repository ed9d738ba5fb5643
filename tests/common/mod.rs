//! Shared test infrastructure for integration tests.
//!
//! Provides:
//! - `TestServer`: runs the real router on an ephemeral local port
//! - `MemoryStore` / `FailingStore`: in-process `ChoreStore` implementations

#![allow(dead_code)]

pub mod server;
pub mod store;

pub use server::{TEST_KEY, TestServer};
pub use store::{FailingStore, MemoryStore, chore};
