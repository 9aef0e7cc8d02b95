//! Orbit Demo
//!
//! Spawns a player and a satellite, integrates their velocities every tick,
//! boosts the player once a second and logs the satellite twice a second.

use std::path::PathBuf;

use clap::Parser;
use nutmeg::core::config::EngineConfig;
use nutmeg::core::error::Result;
use nutmeg::core::types::{EventScope, Vec2};
use nutmeg::engine::Engine;
use nutmeg::logic::action_fn;
use nutmeg::logic::builtins::{AddVelocity, DebugPrint, Integrate, NameEquals, Timer};
use nutmeg::metrics::{MeterChannel, MeterHistory, MetricsSnapshot};
use nutmeg::scene::{Event, Object};
use serde::Serialize;

/// Orbit Demo - run the sample scene headless
#[derive(Parser, Debug)]
#[command(name = "orbit_demo")]
#[command(about = "Run the orbit sample scene and report final state")]
struct Args {
    /// Number of ticks to simulate
    #[arg(long, default_value_t = 600)]
    ticks: u32,

    /// Seconds per tick
    #[arg(long, default_value_t = 1.0 / 60.0)]
    delta: f64,

    /// Engine config (TOML); defaults are used when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct ObjectReport {
    id: u64,
    name: String,
    position: [f32; 2],
    velocity: [f32; 2],
}

#[derive(Serialize)]
struct DemoReport {
    ticks: u32,
    time: f64,
    objects: Vec<ObjectReport>,
    metrics: MetricsSnapshot,
    smoothed: MetricsSnapshot,
    peak_cpu: f32,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("nutmeg=info")),
        )
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    let mut history = MeterHistory::new(&config);
    let mut engine = Engine::with_config(config);

    build_scene(&mut engine);

    tracing::info!("Running orbit demo for {} ticks", args.ticks);
    for _ in 0..args.ticks {
        engine.tick(args.delta);
        history.record(engine.metrics());
    }

    let objects = engine
        .active_scene()
        .map(|scene| scene.objects().iter().map(report_object).collect())
        .unwrap_or_default();

    let report = DemoReport {
        ticks: args.ticks,
        time: engine.time(),
        objects,
        metrics: engine.metrics(),
        smoothed: history.smoothed(),
        peak_cpu: history.peak(MeterChannel::Cpu),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(())
}

fn build_scene(engine: &mut Engine) {
    let scene = engine.add_scene("demo");

    scene.spawn_object("Player").velocity = Vec2::new(1.0, 0.0);
    scene.spawn_object("Satellite").velocity = Vec2::new(0.0, 0.5);

    scene.add_event(Event::named("Integrate", EventScope::Objects).with_action(Integrate));

    scene.add_event(
        Event::named("Boost", EventScope::Objects)
            .with_condition(NameEquals::new("Player"))
            .with_condition(Timer::repeating(1.0))
            .with_action(AddVelocity::new(Vec2::new(0.25, 0.0)))
            .with_action(DebugPrint::new("Speed boost!")),
    );

    scene.add_event(
        Event::named("LogSatellite", EventScope::Objects)
            .with_condition(NameEquals::new("Satellite"))
            .with_condition(Timer::repeating(0.5))
            .with_action(action_fn(|_, object: Option<&mut Object>| {
                if let Some(object) = object {
                    tracing::info!(
                        "{} -> position: ({:.2}, {:.2})",
                        object.name(),
                        object.position.x,
                        object.position.y
                    );
                }
            })),
    );
}

fn report_object(object: &Object) -> ObjectReport {
    ObjectReport {
        id: object.id().0,
        name: object.name().to_string(),
        position: object.position.to_array(),
        velocity: object.velocity.to_array(),
    }
}

fn print_report(report: &DemoReport) {
    println!("Orbit Demo");
    println!("==========");
    println!("Ticks: {} ({:.2}s simulated)", report.ticks, report.time);
    for object in &report.objects {
        println!(
            "  #{} {:<10} position ({:.2}, {:.2})  velocity ({:.2}, {:.2})",
            object.id,
            object.name,
            object.position[0],
            object.position[1],
            object.velocity[0],
            object.velocity[1]
        );
    }
    println!();
    for channel in MeterChannel::ALL {
        println!(
            "  {}: {:>5.1}%  (smoothed {:>5.1}%)",
            channel.label(),
            report.metrics.get(channel),
            report.smoothed.get(channel)
        );
    }
    println!("  Peak CPU in history: {:.1}%", report.peak_cpu);
}
