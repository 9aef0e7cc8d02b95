//! Event dispatch - runs a scene's events once per tick
//!
//! Per event, in registration order:
//!
//! 1. A once-event that already fired is skipped.
//! 2. Global and scene events check their conditions once with no object
//!    but with the whole store reachable through the context; object events
//!    check them once per live object, in storage order.
//! 3. Conditions are checked in order and stop at the first failure, so
//!    later conditions (and any state they keep) are not touched that round.
//! 4. When every condition passes, every action runs in order.
//! 5. A once-event that ran its actions at least once this tick is marked
//!    triggered. The flag belongs to the event, not to an object: an object
//!    event that fired for one object will not fire for any object again
//!    until it is reset. Other objects later in the same pass still fire.

use crate::core::types::EventScope;
use crate::logic::{Action, Condition, TickContext};
use crate::scene::event::Event;
use crate::scene::object::{Object, ObjectStore};

/// Counters from one dispatch pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchStats {
    /// Events that were not skipped as spent
    pub events_evaluated: usize,
    /// Events whose actions ran at least once
    pub events_fired: usize,
    /// Total action invocations
    pub actions_run: usize,
}

/// Run every event against the scene's objects
pub fn dispatch_events(
    events: &mut [Event],
    objects: &mut ObjectStore,
    ctx: &mut TickContext<'_>,
) -> DispatchStats {
    let mut stats = DispatchStats::default();

    for event in events.iter_mut() {
        if event.is_spent() {
            continue;
        }
        stats.events_evaluated += 1;

        let scope = event.scope();
        let (conditions, actions) = event.parts_mut();
        let mut fired = false;

        match scope {
            EventScope::Global | EventScope::Scene => {
                let mut scoped = ctx.with_objects(objects);
                if conditions_pass(conditions, &scoped, None) {
                    run_actions(actions, &mut scoped, None);
                    stats.actions_run += actions.len();
                    fired = true;
                }
            }
            EventScope::Objects => {
                for object in objects.iter_mut() {
                    if !object.is_alive() {
                        continue;
                    }
                    if conditions_pass(conditions, ctx, Some(&*object)) {
                        run_actions(actions, ctx, Some(object));
                        stats.actions_run += actions.len();
                        fired = true;
                    }
                }
            }
        }

        if fired {
            stats.events_fired += 1;
            if event.is_once() {
                event.mark_triggered();
            }
        }
    }

    stats
}

fn conditions_pass(
    conditions: &mut [Box<dyn Condition>],
    ctx: &TickContext<'_>,
    object: Option<&Object>,
) -> bool {
    conditions
        .iter_mut()
        .all(|condition| condition.check(ctx, object))
}

fn run_actions(
    actions: &mut [Box<dyn Action>],
    ctx: &mut TickContext<'_>,
    mut object: Option<&mut Object>,
) {
    for action in actions.iter_mut() {
        action.run(ctx, object.as_deref_mut());
    }
}
