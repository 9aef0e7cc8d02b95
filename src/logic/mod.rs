//! Condition/action contract
//!
//! Events hold boxed [`Condition`]s and [`Action`]s. The dispatcher only
//! calls through these traits; each implementation owns whatever state it
//! needs (a timer owns its accumulator, a velocity change owns its delta).
//!
//! - A condition reads the tick context and the current object (if any)
//!   and answers yes or no. It may only mutate its own fields.
//! - An action runs after all conditions passed and may mutate the object,
//!   engine userdata, or queue scene changes and scene switches through
//!   the context.
//!
//! Objects are `None` for global and scene scoped events; those reach the
//! scene's objects through [`TickContext::objects`] instead.

pub mod builtins;
pub mod context;

pub use context::TickContext;

use crate::scene::object::Object;

/// Predicate evaluated before an event's actions
pub trait Condition {
    fn check(&mut self, ctx: &TickContext<'_>, object: Option<&Object>) -> bool;

    /// Clear internal state; called when the owning event is reset.
    fn reset(&mut self) {}
}

/// Effect run when all of an event's conditions pass
pub trait Action {
    fn run(&mut self, ctx: &mut TickContext<'_>, object: Option<&mut Object>);
}

impl<C: Condition + ?Sized> Condition for Box<C> {
    fn check(&mut self, ctx: &TickContext<'_>, object: Option<&Object>) -> bool {
        (**self).check(ctx, object)
    }

    fn reset(&mut self) {
        (**self).reset()
    }
}

impl<A: Action + ?Sized> Action for Box<A> {
    fn run(&mut self, ctx: &mut TickContext<'_>, object: Option<&mut Object>) {
        (**self).run(ctx, object)
    }
}

/// Condition backed by a closure
pub struct FnCondition<F>(F);

impl<F> Condition for FnCondition<F>
where
    F: FnMut(&TickContext<'_>, Option<&Object>) -> bool,
{
    fn check(&mut self, ctx: &TickContext<'_>, object: Option<&Object>) -> bool {
        (self.0)(ctx, object)
    }
}

/// Action backed by a closure
pub struct FnAction<F>(F);

impl<F> Action for FnAction<F>
where
    F: FnMut(&mut TickContext<'_>, Option<&mut Object>),
{
    fn run(&mut self, ctx: &mut TickContext<'_>, object: Option<&mut Object>) {
        (self.0)(ctx, object)
    }
}

/// Wrap a closure as a [`Condition`]
pub fn condition_fn<F>(f: F) -> FnCondition<F>
where
    F: FnMut(&TickContext<'_>, Option<&Object>) -> bool,
{
    FnCondition(f)
}

/// Wrap a closure as an [`Action`]
pub fn action_fn<F>(f: F) -> FnAction<F>
where
    F: FnMut(&mut TickContext<'_>, Option<&mut Object>),
{
    FnAction(f)
}
