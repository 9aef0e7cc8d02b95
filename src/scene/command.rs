//! Spawn/destroy requests raised by actions during dispatch

use crate::core::types::{ObjectId, Vec2};

/// A deferred change to a scene's object store
#[derive(Debug, Clone, PartialEq)]
pub enum SceneCommand {
    Spawn {
        name: String,
        position: Vec2,
        velocity: Vec2,
    },
    Destroy(ObjectId),
}
