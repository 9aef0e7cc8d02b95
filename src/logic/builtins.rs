//! Built-in conditions and actions

use crate::core::types::Vec2;
use crate::logic::{Action, Condition, TickContext};
use crate::scene::object::Object;

/// Passes once every `interval` seconds of evaluated time
///
/// Time only accumulates while the timer is actually evaluated, so a timer
/// placed after a failing condition does not advance that round. An
/// interval of zero or less always passes.
#[derive(Debug, Clone, PartialEq)]
pub struct Timer {
    pub interval: f64,
    pub repeat: bool,
    accumulator: f64,
}

impl Timer {
    pub fn new(interval: f64, repeat: bool) -> Self {
        Self {
            interval,
            repeat,
            accumulator: 0.0,
        }
    }

    pub fn repeating(interval: f64) -> Self {
        Self::new(interval, true)
    }

    pub fn one_shot(interval: f64) -> Self {
        Self::new(interval, false)
    }

    pub fn accumulator(&self) -> f64 {
        self.accumulator
    }
}

impl Condition for Timer {
    fn check(&mut self, ctx: &TickContext<'_>, _object: Option<&Object>) -> bool {
        if self.interval <= 0.0 {
            return true;
        }

        self.accumulator += ctx.delta();
        if self.accumulator >= self.interval {
            if self.repeat {
                self.accumulator -= self.interval;
            } else {
                // Stays saturated so a one-shot keeps passing
                self.accumulator = self.interval;
            }
            return true;
        }

        false
    }

    fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

/// Passes for objects whose name matches exactly
#[derive(Debug, Clone, PartialEq)]
pub struct NameEquals {
    pub name: String,
}

impl NameEquals {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Condition for NameEquals {
    fn check(&mut self, _ctx: &TickContext<'_>, object: Option<&Object>) -> bool {
        object.is_some_and(|object| object.name() == self.name)
    }
}

/// Moves an object along its velocity for the tick's delta
#[derive(Debug, Clone, Copy, Default)]
pub struct Integrate;

impl Action for Integrate {
    fn run(&mut self, ctx: &mut TickContext<'_>, object: Option<&mut Object>) {
        let Some(object) = object else { return };
        let dt = ctx.delta() as f32;
        object.position += object.velocity * dt;
    }
}

/// Applies a constant acceleration to an object's velocity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Accelerate {
    pub acceleration: Vec2,
}

impl Accelerate {
    pub fn new(acceleration: Vec2) -> Self {
        Self { acceleration }
    }
}

impl Action for Accelerate {
    fn run(&mut self, ctx: &mut TickContext<'_>, object: Option<&mut Object>) {
        let Some(object) = object else { return };
        let dt = ctx.delta() as f32;
        object.velocity += self.acceleration * dt;
    }
}

/// Adds a fixed delta to an object's velocity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AddVelocity {
    pub delta: Vec2,
}

impl AddVelocity {
    pub fn new(delta: Vec2) -> Self {
        Self { delta }
    }
}

impl Action for AddVelocity {
    fn run(&mut self, _ctx: &mut TickContext<'_>, object: Option<&mut Object>) {
        if let Some(object) = object {
            object.velocity += self.delta;
        }
    }
}

/// Moves an object by a fixed delta, ignoring velocity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Translate {
    pub delta: Vec2,
}

impl Translate {
    pub fn new(delta: Vec2) -> Self {
        Self { delta }
    }
}

impl Action for Translate {
    fn run(&mut self, _ctx: &mut TickContext<'_>, object: Option<&mut Object>) {
        if let Some(object) = object {
            object.position += self.delta;
        }
    }
}

/// Logs a message, prefixed with the object's name when there is one
#[derive(Debug, Clone, PartialEq)]
pub struct DebugPrint {
    pub message: String,
}

impl DebugPrint {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The line that gets logged for `object`
    pub fn line(&self, object: Option<&Object>) -> String {
        match object {
            Some(object) => format!("[{}] {}", object.name(), self.message),
            None => self.message.clone(),
        }
    }
}

impl Action for DebugPrint {
    fn run(&mut self, ctx: &mut TickContext<'_>, object: Option<&mut Object>) {
        tracing::info!(
            target: "nutmeg::debug_print",
            scene = ctx.scene_name(),
            "{}",
            self.line(object.as_deref())
        );
    }
}
