//! Per-tick view of engine and scene state handed to conditions and actions

use std::any::Any;

use crate::core::types::{ObjectId, Vec2};
use crate::engine::command::EngineCommand;
use crate::scene::command::SceneCommand;
use crate::scene::object::ObjectStore;

/// State a condition or action can see while its scene is dispatched
///
/// Conditions receive a shared borrow and can only read. Actions receive a
/// mutable borrow and may change engine userdata, queue spawn/destroy
/// requests, or queue an active scene change. Queued work is applied once
/// the dispatch pass has finished.
///
/// Global and scene events also see the scene's [`ObjectStore`]. Object
/// events do not, since the object being visited is already borrowed.
pub struct TickContext<'a> {
    time: f64,
    delta: f64,
    scene_name: &'a str,
    object_count: usize,
    objects: Option<&'a mut ObjectStore>,
    userdata: &'a mut Option<Box<dyn Any>>,
    commands: &'a mut Vec<SceneCommand>,
    requests: &'a mut Vec<EngineCommand>,
}

impl<'a> TickContext<'a> {
    pub(crate) fn new(
        time: f64,
        delta: f64,
        scene_name: &'a str,
        object_count: usize,
        userdata: &'a mut Option<Box<dyn Any>>,
        commands: &'a mut Vec<SceneCommand>,
        requests: &'a mut Vec<EngineCommand>,
    ) -> Self {
        Self {
            time,
            delta,
            scene_name,
            object_count,
            objects: None,
            userdata,
            commands,
            requests,
        }
    }

    /// Reborrow this context with the scene's objects attached
    pub(crate) fn with_objects<'b>(
        &'b mut self,
        objects: &'b mut ObjectStore,
    ) -> TickContext<'b> {
        TickContext {
            time: self.time,
            delta: self.delta,
            scene_name: self.scene_name,
            object_count: self.object_count,
            objects: Some(objects),
            userdata: &mut *self.userdata,
            commands: &mut *self.commands,
            requests: &mut *self.requests,
        }
    }

    /// Accumulated simulation time including the current tick
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Duration of the tick being processed
    pub fn delta(&self) -> f64 {
        self.delta
    }

    pub fn scene_name(&self) -> &str {
        self.scene_name
    }

    /// Live object count when the store is attached, otherwise the count
    /// when the dispatch pass started
    pub fn object_count(&self) -> usize {
        self.objects
            .as_deref()
            .map_or(self.object_count, ObjectStore::len)
    }

    /// The dispatched scene's objects; `None` inside object events
    pub fn objects(&self) -> Option<&ObjectStore> {
        self.objects.as_deref()
    }

    pub fn objects_mut(&mut self) -> Option<&mut ObjectStore> {
        self.objects.as_deref_mut()
    }

    /// Engine-level userdata, if present and of type `T`
    pub fn userdata<T: Any>(&self) -> Option<&T> {
        self.userdata.as_ref().and_then(|data| data.downcast_ref::<T>())
    }

    pub fn userdata_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.userdata.as_mut().and_then(|data| data.downcast_mut::<T>())
    }

    /// Queue a new object; it appears after the current dispatch pass
    pub fn spawn(&mut self, name: impl Into<String>) {
        self.spawn_with(name, Vec2::ZERO, Vec2::ZERO);
    }

    pub fn spawn_with(&mut self, name: impl Into<String>, position: Vec2, velocity: Vec2) {
        self.commands.push(SceneCommand::Spawn {
            name: name.into(),
            position,
            velocity,
        });
    }

    /// Queue an object for removal after the current dispatch pass
    pub fn destroy(&mut self, id: ObjectId) {
        self.commands.push(SceneCommand::Destroy(id));
    }

    /// Number of spawn/destroy requests queued so far this pass
    pub fn pending_commands(&self) -> usize {
        self.commands.len()
    }

    /// Queue an active scene change for after the current dispatch pass
    ///
    /// `None` clears the active scene. Requests apply in order, so the last
    /// one wins; an unknown name is logged and leaves the scene unchanged.
    pub fn set_active_scene(&mut self, name: Option<&str>) {
        self.requests
            .push(EngineCommand::SetActiveScene(name.map(str::to_string)));
    }
}
