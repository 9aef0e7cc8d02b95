//! Engine-level requests raised by actions during dispatch

/// A deferred change to the engine, applied after the dispatch pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCommand {
    /// Activate the named scene, or clear the active scene with `None`
    SetActiveScene(Option<String>),
}
