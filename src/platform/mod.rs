//! Platform layer
//!
//! Browser bindings live in `web` (wasm only). Native builds drive the
//! world straight from `main`. Both hand events to their host as JSON.

#[cfg(target_arch = "wasm32")]
pub mod web;

use crate::error::Result;
use crate::sim::GameEvent;

/// Serialize a batch of events as a JSON array
pub fn events_json(events: &[GameEvent]) -> Result<String> {
    Ok(serde_json::to_string(events)?)
}
