pub mod config;
pub mod error;
pub mod storage;
pub mod types;

pub use config::EngineConfig;
pub use error::{NutmegError, Result};
pub use types::{EventScope, ObjectId, Vec2};
