//! Integration tests for event dispatch through the engine

use std::cell::Cell;
use std::rc::Rc;

use nutmeg::core::types::{EventScope, Vec2};
use nutmeg::engine::Engine;
use nutmeg::logic::builtins::{Integrate, NameEquals, Timer, Translate};
use nutmeg::logic::{action_fn, condition_fn};
use nutmeg::scene::Event;

fn counter() -> (Rc<Cell<u32>>, Rc<Cell<u32>>) {
    let count = Rc::new(Cell::new(0));
    (count.clone(), count)
}

#[test]
fn test_integration_moves_player_one_unit() {
    let mut engine = Engine::new();
    let scene = engine.add_scene("demo");
    let player = scene.spawn_object("Player").id();
    scene.object_mut(player).unwrap().velocity = Vec2::new(1.0, 0.0);
    scene.add_event(Event::named("Integrate", EventScope::Objects).with_action(Integrate));

    for _ in 0..100 {
        engine.tick(0.01);
    }

    let position = engine.find_scene("demo").unwrap().object(player).unwrap().position;
    assert!((position.x - 1.0).abs() < 1e-4, "x was {}", position.x);
    assert!(position.y.abs() < 1e-6);
}

#[test]
fn test_timer_fires_once_per_interval() {
    let (fired, seen) = counter();

    let mut engine = Engine::new();
    engine.add_scene("demo").add_event(
        Event::named("Tick", EventScope::Global)
            .with_condition(Timer::repeating(1.0))
            .with_action(action_fn(move |_, _| fired.set(fired.get() + 1))),
    );

    for _ in 0..60 {
        engine.tick(1.0 / 60.0);
    }

    assert_eq!(seen.get(), 1);
}

#[test]
fn test_single_dispatch_per_tick() {
    let (runs, seen) = counter();

    let mut engine = Engine::new();
    engine.add_scene("demo").add_event(
        Event::named("Count", EventScope::Scene)
            .with_action(action_fn(move |_, _| runs.set(runs.get() + 1))),
    );

    for _ in 0..10 {
        engine.tick(0.1);
    }

    assert_eq!(seen.get(), 10);
}

#[test]
fn test_failing_condition_short_circuits() {
    let (evaluated, seen) = counter();

    let mut engine = Engine::new();
    let scene = engine.add_scene("demo");
    scene.spawn_object("a");
    scene.spawn_object("b");
    scene.add_event(
        Event::named("Never", EventScope::Objects)
            .with_condition(condition_fn(|_, _| false))
            .with_condition(condition_fn(move |_, _| {
                evaluated.set(evaluated.get() + 1);
                true
            })),
    );

    for _ in 0..5 {
        engine.tick(0.1);
    }

    assert_eq!(seen.get(), 0);
}

#[test]
fn test_timer_behind_failing_condition_does_not_advance() {
    let mut engine = Engine::new();
    let scene = engine.add_scene("demo");
    let player = scene.spawn_object("Player").id();
    scene.spawn_object("Rock");
    scene.add_event(
        Event::named("Nudge", EventScope::Objects)
            .with_condition(NameEquals::new("Player"))
            .with_condition(Timer::repeating(1.0))
            .with_action(Translate::new(Vec2::new(1.0, 0.0))),
    );

    // Two objects but only the player reaches the timer, so 1s of ticks
    // fires exactly once rather than twice
    for _ in 0..10 {
        engine.tick(0.1001);
    }

    let scene = engine.active_scene().unwrap();
    assert_eq!(scene.object(player).unwrap().position.x, 1.0);
}

#[test]
fn test_object_once_event_is_shared_across_objects() {
    let (fired, seen) = counter();

    let mut engine = Engine::new();
    let scene = engine.add_scene("demo");
    let a = scene.spawn_object("A").id();
    let b = scene.spawn_object("B").id();
    scene.object_mut(a).unwrap().set_userdata(true);
    scene.object_mut(b).unwrap().set_userdata(false);

    scene.add_event(
        Event::named("FirstReady", EventScope::Objects)
            .once()
            .with_condition(condition_fn(|_, object| {
                object.and_then(|o| o.userdata::<bool>()).copied().unwrap_or(false)
            }))
            .with_action(action_fn(move |_, _| fired.set(fired.get() + 1))),
    );

    engine.tick(0.1);
    assert_eq!(seen.get(), 1);

    // B now satisfies the condition, but the event already fired
    let scene = engine.active_scene_mut().unwrap();
    *scene.object_mut(b).unwrap().userdata_mut::<bool>().unwrap() = true;
    engine.tick(0.1);
    engine.tick(0.1);

    assert_eq!(seen.get(), 1);
    assert!(engine.active_scene().unwrap().events()[0].is_triggered());
}

#[test]
fn test_reset_lets_once_event_fire_again() {
    let (fired, seen) = counter();

    let mut engine = Engine::new();
    let index = engine.add_scene("demo").add_event(
        Event::named("Intro", EventScope::Global)
            .once()
            .with_action(action_fn(move |_, _| fired.set(fired.get() + 1))),
    );

    engine.tick(0.1);
    engine.tick(0.1);
    assert_eq!(seen.get(), 1);

    engine
        .active_scene_mut()
        .unwrap()
        .event_mut(index)
        .unwrap()
        .reset();
    engine.tick(0.1);
    engine.tick(0.1);
    assert_eq!(seen.get(), 2);

    assert!(engine.active_scene_mut().unwrap().reset_event("Intro"));
    engine.tick(0.1);
    assert_eq!(seen.get(), 3);
}

#[test]
fn test_inactive_scene_not_dispatched() {
    let (fired, seen) = counter();

    let mut engine = Engine::new();
    engine.add_scene("menu");
    engine.add_scene("level").add_event(
        Event::named("Run", EventScope::Global)
            .with_action(action_fn(move |_, _| fired.set(fired.get() + 1))),
    );

    engine.tick(0.1);
    assert_eq!(seen.get(), 0);

    engine.set_active_scene(Some("level")).unwrap();
    engine.tick(0.1);
    assert_eq!(seen.get(), 1);

    engine.set_active_scene(None).unwrap();
    engine.tick(0.1);
    assert_eq!(seen.get(), 1);
}

#[test]
fn test_actions_see_engine_time_and_userdata() {
    let mut engine = Engine::new();
    engine.set_userdata(0.0f64);
    engine.add_scene("demo").add_event(
        Event::named("Clock", EventScope::Global).with_action(action_fn(|ctx, _| {
            let now = ctx.time();
            if let Some(last_seen) = ctx.userdata_mut::<f64>() {
                *last_seen = now;
            }
        })),
    );

    engine.tick(0.5);
    engine.tick(0.25);
    assert_eq!(engine.userdata::<f64>(), Some(&0.75));
}

#[test]
fn test_spawn_from_action_appears_next_tick() {
    let (visits, seen) = counter();

    let mut engine = Engine::new();
    let scene = engine.add_scene("demo");
    scene.spawn_object("Spawner");
    scene.add_event(
        Event::named("Split", EventScope::Objects)
            .with_condition(NameEquals::new("Spawner"))
            .with_action(action_fn(|ctx, _| ctx.spawn("Child"))),
    );
    scene.add_event(
        Event::named("Visit", EventScope::Objects)
            .with_action(action_fn(move |_, _| visits.set(visits.get() + 1))),
    );

    engine.tick(0.1);
    // Only the spawner was visited during the first pass
    assert_eq!(seen.get(), 1);
    assert_eq!(engine.active_scene().unwrap().object_count(), 2);

    engine.tick(0.1);
    assert_eq!(seen.get(), 3);
    assert_eq!(engine.active_scene().unwrap().object_count(), 3);
}

#[test]
fn test_destroy_from_action_removes_after_pass() {
    let mut engine = Engine::new();
    let scene = engine.add_scene("demo");
    let keep = scene.spawn_object("Keep").id();
    scene.spawn_object("Doomed");
    scene.add_event(
        Event::named("Cull", EventScope::Objects)
            .with_condition(NameEquals::new("Doomed"))
            .with_action(action_fn(|ctx, object| {
                if let Some(object) = object {
                    ctx.destroy(object.id());
                }
            })),
    );

    engine.tick(0.1);

    let scene = engine.active_scene().unwrap();
    assert_eq!(scene.object_count(), 1);
    assert!(scene.object(keep).is_some());
    assert!(scene.objects().find_by_name("Doomed").is_none());
}

#[test]
fn test_global_rule_switches_scene_when_player_passes_mark() {
    let (won, seen) = counter();

    let mut engine = Engine::new();
    let level = engine.add_scene("level");
    let player = level.spawn_object("Player").id();
    level.object_mut(player).unwrap().velocity = Vec2::new(100.0, 0.0);
    level.add_event(Event::named("Integrate", EventScope::Objects).with_action(Integrate));
    level.add_event(
        Event::named("ReachedGoal", EventScope::Global)
            .once()
            .with_condition(condition_fn(|ctx, _| {
                ctx.objects()
                    .and_then(|objects| objects.find_by_name("Player"))
                    .map_or(false, |player| player.position.x > 12.0)
            }))
            .with_action(action_fn(|ctx, _| ctx.set_active_scene(Some("win")))),
    );
    engine.add_scene("win").add_event(
        Event::named("Celebrate", EventScope::Global)
            .with_action(action_fn(move |_, _| won.set(won.get() + 1))),
    );

    engine.tick(0.05);
    engine.tick(0.05);
    assert_eq!(engine.active_scene().map(|s| s.name()), Some("level"));

    // Switch lands after the pass, so "win" is not dispatched this tick
    engine.tick(0.05);
    assert_eq!(engine.active_scene().map(|s| s.name()), Some("win"));
    assert_eq!(seen.get(), 0);

    engine.tick(0.05);
    assert_eq!(seen.get(), 1);
}

#[test]
fn test_scene_action_moves_other_objects() {
    let mut engine = Engine::new();
    let scene = engine.add_scene("demo");
    let a = scene.spawn_object("A").id();
    let b = scene.spawn_object("B").id();
    scene.object_mut(a).unwrap().velocity = Vec2::new(1.0, 0.0);
    scene.object_mut(b).unwrap().velocity = Vec2::new(0.0, 2.0);
    scene.add_event(
        Event::named("Freeze", EventScope::Scene)
            .once()
            .with_action(action_fn(|ctx, _| {
                if let Some(objects) = ctx.objects_mut() {
                    for object in objects.iter_mut() {
                        object.velocity = Vec2::ZERO;
                    }
                }
            })),
    );
    scene.add_event(Event::named("Integrate", EventScope::Objects).with_action(Integrate));

    engine.tick(0.5);

    let scene = engine.active_scene().unwrap();
    assert!(scene.objects().iter().all(|o| o.velocity == Vec2::ZERO));
    assert!(scene.objects().iter().all(|o| o.position == Vec2::ZERO));
}

#[test]
fn test_object_events_do_not_see_store() {
    let (missing, seen) = counter();

    let mut engine = Engine::new();
    let scene = engine.add_scene("demo");
    scene.spawn_object("a");
    scene.spawn_object("b");
    scene.add_event(
        Event::named("Each", EventScope::Objects).with_action(action_fn(move |ctx, _| {
            if ctx.objects().is_none() {
                missing.set(missing.get() + 1);
            }
        })),
    );

    engine.tick(0.1);
    assert_eq!(seen.get(), 2);
}

#[test]
fn test_queued_switch_to_unknown_scene_keeps_active() {
    let mut engine = Engine::new();
    engine.add_scene("level").add_event(
        Event::named("Bad", EventScope::Global)
            .with_action(action_fn(|ctx, _| ctx.set_active_scene(Some("nowhere")))),
    );

    engine.tick(0.1);
    assert_eq!(engine.active_scene().map(|s| s.name()), Some("level"));

    engine.active_scene_mut().unwrap().add_event(
        Event::named("Quit", EventScope::Global)
            .with_action(action_fn(|ctx, _| ctx.set_active_scene(None))),
    );
    engine.tick(0.1);
    assert!(engine.active_scene().is_none());
}
