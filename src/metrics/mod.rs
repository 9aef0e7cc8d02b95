//! Synthetic CPU/RAM/GPU utilization for the visualization layer
//!
//! None of these numbers have a ground truth. They are derived from the
//! cost of the dispatch pass, the engine's estimated memory footprint and
//! a slow oscillation, and are only guaranteed to be deterministic for a
//! fixed input sequence and to stay within `[0, 100]`.

pub mod history;

pub use history::{MeterChannel, MeterHistory};

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::core::config::EngineConfig;

/// Utilization percentages, each within `[0, 100]`
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub cpu: f32,
    pub ram: f32,
    pub gpu: f32,
}

impl MetricsSnapshot {
    pub fn get(&self, channel: MeterChannel) -> f32 {
        match channel {
            MeterChannel::Cpu => self.cpu,
            MeterChannel::Ram => self.ram,
            MeterChannel::Gpu => self.gpu,
        }
    }
}

/// Clamp to `[0, 100]`, mapping NaN to zero
pub fn clamp_percentage(value: f64) -> f32 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 100.0) as f32
}

/// Turns tick cost and memory footprint into a [`MetricsSnapshot`]
#[derive(Debug, Clone)]
pub struct MetricsEstimator {
    snapshot: MetricsSnapshot,
    /// Oscillation phase, kept within `[0, TAU)`
    phase: f64,
    ram_budget_bytes: f64,
    phase_rate: f64,
    cpu_weight: f64,
    amplitude: f64,
    smoothing: f64,
}

impl MetricsEstimator {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            snapshot: MetricsSnapshot::default(),
            phase: 0.0,
            ram_budget_bytes: config.ram_budget_bytes(),
            phase_rate: config.gpu_phase_rate as f64,
            cpu_weight: config.gpu_cpu_weight as f64,
            amplitude: config.gpu_oscillation_amplitude as f64,
            smoothing: config.gpu_smoothing as f64,
        }
    }

    /// Fold one tick into the snapshot
    ///
    /// `tick_cost` is the wall time of the dispatch pass in seconds,
    /// `delta` the simulated seconds it covered, `footprint_bytes` the
    /// engine's current estimated memory use.
    pub fn update(&mut self, tick_cost: f64, delta: f64, footprint_bytes: usize) -> MetricsSnapshot {
        let cpu = if delta > 0.0 && tick_cost >= 0.0 {
            tick_cost / delta * 100.0
        } else {
            0.0
        };

        let ram = footprint_bytes as f64 / self.ram_budget_bytes * 100.0;

        self.phase = (self.phase + delta * self.phase_rate) % TAU;
        let oscillation = (self.phase.sin() + 1.0) * self.amplitude;
        // Unclamped cpu feeds the gpu signal
        let gpu = clamp_percentage(self.cpu_weight * cpu + oscillation) as f64;
        let previous = self.snapshot.gpu as f64;

        self.snapshot = MetricsSnapshot {
            cpu: clamp_percentage(cpu),
            ram: clamp_percentage(ram),
            gpu: clamp_percentage(self.smoothing * previous + (1.0 - self.smoothing) * gpu),
        };
        self.snapshot
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        self.snapshot
    }

    pub fn phase(&self) -> f64 {
        self.phase
    }
}
