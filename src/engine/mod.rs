//! Engine - scene registry and tick orchestration
//!
//! The [`Engine`] owns every [`Scene`], remembers which one is active,
//! accumulates simulation time and keeps the metrics snapshot current.
//!
//! ## Tick
//!
//! ```text
//! tick(delta)
//!   ├─ reject delta < 0 (or NaN)
//!   ├─ last_delta = delta, time += delta
//!   ├─ active scene? → one dispatch pass (timed)
//!   │                   └─ deferred spawn/destroy applied
//!   ├─ deferred engine requests applied (scene switches)
//!   └─ metrics.update(pass cost, delta, memory footprint)
//! ```
//!
//! The dispatch pass runs exactly once per tick, so timers advance by
//! `delta` once and actions run once per matching target.

pub mod command;

pub use command::EngineCommand;

use std::any::Any;
use std::time::Instant;

use crate::core::config::EngineConfig;
use crate::core::error::{NutmegError, Result};
use crate::core::storage::{allocated_bytes, reserve_one};
use crate::metrics::{MetricsEstimator, MetricsSnapshot};
use crate::scene::{DispatchStats, Scene};

pub struct Engine {
    config: EngineConfig,
    scenes: Vec<Scene>,
    /// Index into `scenes`; scenes are never removed so it stays valid
    active: Option<usize>,
    time: f64,
    last_delta: f64,
    userdata: Option<Box<dyn Any>>,
    /// Requests raised by actions during the current pass
    pending: Vec<EngineCommand>,
    metrics: MetricsEstimator,
    last_dispatch: DispatchStats,
}

impl Engine {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        let metrics = MetricsEstimator::new(&config);
        Self {
            config,
            scenes: Vec::new(),
            active: None,
            time: 0.0,
            last_delta: 0.0,
            userdata: None,
            pending: Vec::new(),
            metrics,
            last_dispatch: DispatchStats::default(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // ── Userdata ─────────────────────────────────────────────────────

    /// Attach caller context, replacing anything attached before
    pub fn set_userdata<T: Any>(&mut self, value: T) {
        self.userdata = Some(Box::new(value));
    }

    pub fn userdata<T: Any>(&self) -> Option<&T> {
        self.userdata.as_ref().and_then(|data| data.downcast_ref::<T>())
    }

    pub fn userdata_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.userdata.as_mut().and_then(|data| data.downcast_mut::<T>())
    }

    pub fn take_userdata(&mut self) -> Option<Box<dyn Any>> {
        self.userdata.take()
    }

    // ── Time ─────────────────────────────────────────────────────────

    /// Accumulated simulation time in seconds
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Delta of the most recent accepted tick
    pub fn last_delta(&self) -> f64 {
        self.last_delta
    }

    // ── Scenes ───────────────────────────────────────────────────────

    /// Create and register an empty scene
    ///
    /// The first scene added becomes active if none is.
    pub fn add_scene(&mut self, name: &str) -> &mut Scene {
        reserve_one(&mut self.scenes, self.config.min_capacity, "scene");
        let index = self.scenes.len();
        self.scenes.push(Scene::new(name, &self.config));

        if self.active.is_none() {
            self.active = Some(index);
        }
        tracing::debug!(
            "Added scene '{}' (active: {})",
            self.scenes[index].name(),
            self.active == Some(index)
        );

        &mut self.scenes[index]
    }

    fn scene_index(&self, name: &str) -> Option<usize> {
        self.scenes.iter().position(|scene| scene.name() == name)
    }

    /// Exact name match; the first registered scene wins on duplicates
    pub fn find_scene(&self, name: &str) -> Option<&Scene> {
        self.scene_index(name).map(|index| &self.scenes[index])
    }

    pub fn find_scene_mut(&mut self, name: &str) -> Option<&mut Scene> {
        let index = self.scene_index(name)?;
        self.scenes.get_mut(index)
    }

    /// Activate a scene by name, or clear the active scene with `None`
    ///
    /// An unknown name leaves the active scene unchanged.
    pub fn set_active_scene(&mut self, name: Option<&str>) -> Result<()> {
        let Some(name) = name else {
            self.active = None;
            tracing::debug!("Cleared active scene");
            return Ok(());
        };

        match self.scene_index(name) {
            Some(index) => {
                self.active = Some(index);
                tracing::debug!("Active scene is now '{}'", name);
                Ok(())
            }
            None => {
                tracing::warn!("Cannot activate unknown scene '{}'", name);
                Err(NutmegError::SceneNotFound(name.to_string()))
            }
        }
    }

    pub fn active_scene(&self) -> Option<&Scene> {
        self.active.and_then(|index| self.scenes.get(index))
    }

    pub fn active_scene_mut(&mut self) -> Option<&mut Scene> {
        self.active.and_then(|index| self.scenes.get_mut(index))
    }

    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    pub fn scene_count(&self) -> usize {
        self.scenes.len()
    }

    // ── Tick ─────────────────────────────────────────────────────────

    /// Advance the simulation by `delta_seconds`
    ///
    /// Negative and NaN deltas are ignored.
    pub fn tick(&mut self, delta_seconds: f64) {
        if !(delta_seconds >= 0.0) {
            return;
        }

        self.last_delta = delta_seconds;
        self.time += delta_seconds;

        let started = Instant::now();
        let stats = match self.active.and_then(|index| self.scenes.get_mut(index)) {
            Some(scene) => scene.dispatch(
                self.time,
                delta_seconds,
                &mut self.userdata,
                &mut self.pending,
            ),
            None => DispatchStats::default(),
        };
        let tick_cost = started.elapsed();

        self.apply_pending();

        let footprint = self.estimated_memory();
        let snapshot = self
            .metrics
            .update(tick_cost.as_secs_f64(), delta_seconds, footprint);
        self.last_dispatch = stats;

        tracing::trace!(
            events_fired = stats.events_fired,
            actions_run = stats.actions_run,
            cost_us = tick_cost.as_micros() as u64,
            cpu = snapshot.cpu,
            "tick {:.4}s",
            delta_seconds
        );
    }

    fn apply_pending(&mut self) {
        if self.pending.is_empty() {
            return;
        }

        let mut commands = std::mem::take(&mut self.pending);
        for command in commands.drain(..) {
            match command {
                EngineCommand::SetActiveScene(name) => {
                    // Unknown names are already logged
                    let _ = self.set_active_scene(name.as_deref());
                }
            }
        }
        self.pending = commands;
    }

    /// Counters from the most recent dispatch pass
    pub fn last_dispatch(&self) -> DispatchStats {
        self.last_dispatch
    }

    // ── Metrics ──────────────────────────────────────────────────────

    /// Snapshot refreshed once per accepted tick
    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Approximate bytes owned by the engine and all of its scenes
    pub fn estimated_memory(&self) -> usize {
        std::mem::size_of::<Engine>()
            + allocated_bytes(&self.scenes)
            + allocated_bytes(&self.pending)
            + self
                .scenes
                .iter()
                .map(Scene::estimated_memory)
                .sum::<usize>()
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("scenes", &self.scenes)
            .field("active", &self.active_scene().map(Scene::name))
            .field("time", &self.time)
            .field("last_delta", &self.last_delta)
            .field("metrics", &self.metrics.snapshot())
            .finish()
    }
}
