//! Shared test fixtures for the linkboard workspace.
//!
//! - Item fixtures: [`sample_items`], [`default_seed`], [`raw_record`]
//! - Unique collection names so tests sharing a backend never collide
//! - [`ScriptedAdapter`]: an in-memory adapter whose calls can be scripted
//!   to fail or stall, and which records every call it receives

mod fixtures;
mod scripted;

pub use fixtures::*;
pub use scripted::{AdapterCall, ScriptedAdapter, Step};
