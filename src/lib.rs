//! Nutmeg - tick-driven event/condition/action runtime
//!
//! Scenes hold objects and events. Each tick, the active scene's events
//! check their conditions in order and, when all pass, run their actions.
//! See [`engine::Engine`] for the entry point.

pub mod core;
pub mod engine;
pub mod logic;
pub mod metrics;
pub mod scene;
