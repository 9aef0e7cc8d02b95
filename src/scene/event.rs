//! Events - ordered conditions bound to ordered actions

use std::fmt;

use crate::core::storage::{allocated_bytes, reserve_one, DEFAULT_MIN_CAPACITY};
use crate::core::types::EventScope;
use crate::logic::{Action, Condition};

/// A rule pairing conditions (all must pass) with actions (all run)
///
/// Built by the caller, then moved into a scene with
/// [`Scene::add_event`](crate::scene::Scene::add_event).
pub struct Event {
    name: Option<String>,
    scope: EventScope,
    once: bool,
    triggered: bool,
    conditions: Vec<Box<dyn Condition>>,
    actions: Vec<Box<dyn Action>>,
}

impl Event {
    pub fn new(name: Option<&str>, scope: EventScope, once: bool) -> Self {
        Self {
            name: name.map(str::to_string),
            scope,
            once,
            triggered: false,
            conditions: Vec::new(),
            actions: Vec::new(),
        }
    }

    pub fn named(name: &str, scope: EventScope) -> Self {
        Self::new(Some(name), scope, false)
    }

    /// Builder form of `once = true`
    pub fn once(mut self) -> Self {
        self.once = true;
        self
    }

    /// Append a condition; conditions are checked in the order added
    pub fn add_condition(&mut self, condition: impl Condition + 'static) {
        reserve_one(&mut self.conditions, DEFAULT_MIN_CAPACITY, "condition");
        self.conditions.push(Box::new(condition));
    }

    /// Append an action; actions run in the order added
    pub fn add_action(&mut self, action: impl Action + 'static) {
        reserve_one(&mut self.actions, DEFAULT_MIN_CAPACITY, "action");
        self.actions.push(Box::new(action));
    }

    pub fn with_condition(mut self, condition: impl Condition + 'static) -> Self {
        self.add_condition(condition);
        self
    }

    pub fn with_action(mut self, action: impl Action + 'static) -> Self {
        self.add_action(action);
        self
    }

    /// Allow a once-event to fire again and clear condition state
    pub fn reset(&mut self) {
        self.triggered = false;
        for condition in &mut self.conditions {
            condition.reset();
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn scope(&self) -> EventScope {
        self.scope
    }

    pub fn is_once(&self) -> bool {
        self.once
    }

    pub fn is_triggered(&self) -> bool {
        self.triggered
    }

    /// A once-event that already fired
    pub fn is_spent(&self) -> bool {
        self.once && self.triggered
    }

    pub fn condition_count(&self) -> usize {
        self.conditions.len()
    }

    pub fn action_count(&self) -> usize {
        self.actions.len()
    }

    pub(crate) fn mark_triggered(&mut self) {
        self.triggered = true;
    }

    pub(crate) fn parts_mut(
        &mut self,
    ) -> (&mut [Box<dyn Condition>], &mut [Box<dyn Action>]) {
        (self.conditions.as_mut_slice(), self.actions.as_mut_slice())
    }

    /// Bytes held by the condition and action lists
    pub fn estimated_memory(&self) -> usize {
        allocated_bytes(&self.conditions) + allocated_bytes(&self.actions)
    }
}

impl fmt::Debug for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("name", &self.name)
            .field("scope", &self.scope)
            .field("once", &self.once)
            .field("triggered", &self.triggered)
            .field("conditions", &self.conditions.len())
            .field("actions", &self.actions.len())
            .finish()
    }
}
