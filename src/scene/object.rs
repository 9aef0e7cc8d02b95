//! Object store - per-scene storage of simulated entities
//!
//! Objects live by value in a single `Vec`. Removal swaps the last object
//! into the freed slot, so storage order is only spawn order until the
//! first destroy. Stable identity is the [`ObjectId`], never the slot.

use std::any::Any;
use std::fmt;

use ahash::AHashMap;

use crate::core::storage::{allocated_bytes, reserve_one};
use crate::core::types::{truncate_name, ObjectId, Vec2};

/// A simulated entity
pub struct Object {
    id: ObjectId,
    alive: bool,
    name: String,
    pub position: Vec2,
    pub velocity: Vec2,
    userdata: Option<Box<dyn Any>>,
}

impl Object {
    fn new(id: ObjectId, name: String) -> Self {
        Self {
            id,
            alive: true,
            name,
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            userdata: None,
        }
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Dead objects stay in the store but are skipped by per-object events.
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn set_alive(&mut self, alive: bool) {
        self.alive = alive;
    }

    /// Attach caller data, replacing anything attached before
    pub fn set_userdata<T: Any>(&mut self, value: T) {
        self.userdata = Some(Box::new(value));
    }

    pub fn userdata<T: Any>(&self) -> Option<&T> {
        self.userdata.as_ref().and_then(|data| data.downcast_ref::<T>())
    }

    pub fn userdata_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.userdata.as_mut().and_then(|data| data.downcast_mut::<T>())
    }

    pub fn has_userdata(&self) -> bool {
        self.userdata.is_some()
    }

    /// Detach the caller data and hand it back
    pub fn take_userdata(&mut self) -> Option<Box<dyn Any>> {
        self.userdata.take()
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Object")
            .field("id", &self.id)
            .field("alive", &self.alive)
            .field("name", &self.name)
            .field("position", &self.position)
            .field("velocity", &self.velocity)
            .field("has_userdata", &self.userdata.is_some())
            .finish()
    }
}

/// Growable collection of objects for one scene
#[derive(Debug)]
pub struct ObjectStore {
    objects: Vec<Object>,
    /// Maps object id -> slot in `objects`
    slots: AHashMap<ObjectId, usize>,
    next_id: u64,
    min_capacity: usize,
    max_name_len: usize,
}

impl ObjectStore {
    pub fn new(min_capacity: usize, max_name_len: usize) -> Self {
        Self {
            objects: Vec::new(),
            slots: AHashMap::new(),
            next_id: 1,
            min_capacity,
            max_name_len,
        }
    }

    /// Create a new object at the origin with zero velocity
    pub fn spawn(&mut self, name: &str) -> &mut Object {
        let id = ObjectId(self.next_id);
        self.next_id += 1;

        reserve_one(&mut self.objects, self.min_capacity, "object");
        let index = self.objects.len();
        self.objects.push(Object::new(id, truncate_name(name, self.max_name_len)));
        self.slots.insert(id, index);

        &mut self.objects[index]
    }

    /// Remove an object, moving the last object into its slot
    ///
    /// Returns the removed object so the caller can reclaim its userdata.
    /// Destroying an id that is not present does nothing.
    pub fn destroy(&mut self, id: ObjectId) -> Option<Object> {
        let index = self.slots.remove(&id)?;
        let removed = self.objects.swap_remove(index);
        if let Some(moved) = self.objects.get(index) {
            self.slots.insert(moved.id, index);
        }
        Some(removed)
    }

    pub fn get(&self, id: ObjectId) -> Option<&Object> {
        self.slots.get(&id).map(|&index| &self.objects[index])
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut Object> {
        match self.slots.get(&id) {
            Some(&index) => Some(&mut self.objects[index]),
            None => None,
        }
    }

    /// First object with the given name, in storage order
    pub fn find_by_name(&self, name: &str) -> Option<&Object> {
        self.objects.iter().find(|object| object.name == name)
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.slots.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.objects.capacity()
    }

    /// Current objects in storage order
    ///
    /// The view is a borrow of the store, so it cannot outlive the next
    /// spawn or destroy.
    pub fn as_slice(&self) -> &[Object] {
        &self.objects
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Object> {
        self.objects.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Object> {
        self.objects.iter_mut()
    }

    /// Id the next spawned object will receive
    pub fn next_id(&self) -> ObjectId {
        ObjectId(self.next_id)
    }

    /// Bytes held by object storage and the id index
    pub fn estimated_memory(&self) -> usize {
        allocated_bytes(&self.objects)
            + self.slots.capacity() * std::mem::size_of::<(ObjectId, usize)>()
    }
}

impl<'a> IntoIterator for &'a ObjectStore {
    type Item = &'a Object;
    type IntoIter = std::slice::Iter<'a, Object>;

    fn into_iter(self) -> Self::IntoIter {
        self.objects.iter()
    }
}
