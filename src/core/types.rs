//! Core type definitions used throughout the codebase

use derive_more::{Display, From};
use serde::{Deserialize, Serialize};

pub use glam::Vec2;

/// Identifier of an object, unique within its owning scene
///
/// Ids are assigned from a per-scene counter starting at 1 and are never
/// reused, even after the object is destroyed.
#[derive(Debug, Display, From, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ObjectId(pub u64);

/// Which targets an event is dispatched against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventScope {
    /// Once per tick, no object.
    Global,
    /// Once per tick for the scene, no object.
    Scene,
    /// Once per live object per tick.
    Objects,
}

impl EventScope {
    pub fn is_per_object(&self) -> bool {
        matches!(self, EventScope::Objects)
    }
}

/// Truncate `name` to at most `max_len` bytes without splitting a UTF-8 character
pub fn truncate_name(name: &str, max_len: usize) -> String {
    if name.len() <= max_len {
        return name.to_string();
    }
    let mut end = max_len;
    while !name.is_char_boundary(end) {
        end -= 1;
    }
    name[..end].to_string()
}
