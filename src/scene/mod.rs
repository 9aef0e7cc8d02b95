//! Scenes - named containers of objects and events
//!
//! A scene exclusively owns its [`ObjectStore`] and its ordered list of
//! [`Event`]s. Events are moved in with [`Scene::add_event`] and dispatched
//! by the engine while the scene is active.

pub mod command;
pub mod event;
pub mod object;
pub mod pipeline;

pub use command::SceneCommand;
pub use event::Event;
pub use object::{Object, ObjectStore};
pub use pipeline::DispatchStats;

use std::any::Any;

use crate::core::config::EngineConfig;
use crate::core::storage::{allocated_bytes, reserve_one};
use crate::core::types::{truncate_name, ObjectId};
use crate::engine::command::EngineCommand;
use crate::logic::TickContext;

pub struct Scene {
    name: String,
    objects: ObjectStore,
    events: Vec<Event>,
    /// Spawn/destroy requests raised during the current dispatch pass
    pending: Vec<SceneCommand>,
    min_capacity: usize,
}

impl Scene {
    pub(crate) fn new(name: &str, config: &EngineConfig) -> Self {
        Self {
            name: truncate_name(name, config.max_name_len),
            objects: ObjectStore::new(config.min_capacity, config.max_name_len),
            events: Vec::new(),
            pending: Vec::new(),
            min_capacity: config.min_capacity,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    // ── Objects ──────────────────────────────────────────────────────

    /// Spawn an object; see [`ObjectStore::spawn`]
    pub fn spawn_object(&mut self, name: &str) -> &mut Object {
        self.objects.spawn(name)
    }

    /// Destroy an object; see [`ObjectStore::destroy`]
    ///
    /// Must not be called from inside a dispatch pass. Actions use
    /// [`TickContext::destroy`] instead.
    pub fn destroy_object(&mut self, id: ObjectId) -> Option<Object> {
        self.objects.destroy(id)
    }

    pub fn object(&self, id: ObjectId) -> Option<&Object> {
        self.objects.get(id)
    }

    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut Object> {
        self.objects.get_mut(id)
    }

    pub fn objects(&self) -> &ObjectStore {
        &self.objects
    }

    pub fn objects_mut(&mut self) -> &mut ObjectStore {
        &mut self.objects
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    // ── Events ───────────────────────────────────────────────────────

    /// Take ownership of a fully built event and append it to the pipeline
    ///
    /// Returns the event's index, which stays valid for the scene's lifetime.
    pub fn add_event(&mut self, event: Event) -> usize {
        reserve_one(&mut self.events, self.min_capacity, "event");
        tracing::debug!(
            "Scene '{}' added event {:?} ({:?}, {} conditions, {} actions)",
            self.name,
            event.name(),
            event.scope(),
            event.condition_count(),
            event.action_count()
        );
        self.events.push(event);
        self.events.len() - 1
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn event(&self, index: usize) -> Option<&Event> {
        self.events.get(index)
    }

    pub fn event_mut(&mut self, index: usize) -> Option<&mut Event> {
        self.events.get_mut(index)
    }

    /// First event with the given name
    pub fn find_event(&self, name: &str) -> Option<&Event> {
        self.events.iter().find(|event| event.name() == Some(name))
    }

    /// Reset the first event with the given name; returns false if none matched
    pub fn reset_event(&mut self, name: &str) -> bool {
        match self.events.iter_mut().find(|event| event.name() == Some(name)) {
            Some(event) => {
                event.reset();
                tracing::debug!("Scene '{}' reset event '{}'", self.name, name);
                true
            }
            None => false,
        }
    }

    pub fn reset_all_events(&mut self) {
        for event in &mut self.events {
            event.reset();
        }
    }

    // ── Dispatch ─────────────────────────────────────────────────────

    /// Run one dispatch pass, then apply any spawn/destroy requests it raised
    ///
    /// Engine-level requests are left in `requests` for the engine to apply.
    pub(crate) fn dispatch(
        &mut self,
        time: f64,
        delta: f64,
        userdata: &mut Option<Box<dyn Any>>,
        requests: &mut Vec<EngineCommand>,
    ) -> DispatchStats {
        let mut ctx = TickContext::new(
            time,
            delta,
            &self.name,
            self.objects.len(),
            userdata,
            &mut self.pending,
            requests,
        );
        let stats = pipeline::dispatch_events(&mut self.events, &mut self.objects, &mut ctx);

        self.apply_pending();
        stats
    }

    fn apply_pending(&mut self) {
        if self.pending.is_empty() {
            return;
        }

        let mut commands = std::mem::take(&mut self.pending);
        for command in commands.drain(..) {
            match command {
                SceneCommand::Spawn {
                    name,
                    position,
                    velocity,
                } => {
                    let object = self.objects.spawn(&name);
                    object.position = position;
                    object.velocity = velocity;
                }
                SceneCommand::Destroy(id) => {
                    self.objects.destroy(id);
                }
            }
        }
        // Keep the allocation for the next pass
        self.pending = commands;
    }

    /// Approximate heap bytes owned by this scene
    ///
    /// The `Scene` value itself is counted by whoever stores it.
    pub fn estimated_memory(&self) -> usize {
        self.objects.estimated_memory()
            + allocated_bytes(&self.events)
            + self
                .events
                .iter()
                .map(Event::estimated_memory)
                .sum::<usize>()
            + allocated_bytes(&self.pending)
    }
}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("name", &self.name)
            .field("objects", &self.objects.len())
            .field("events", &self.events.len())
            .finish()
    }
}
