//! Smoothed meter values and sparkline history for metrics display

use crate::core::config::EngineConfig;
use crate::metrics::MetricsSnapshot;

/// One of the three utilization meters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeterChannel {
    Cpu,
    Ram,
    Gpu,
}

impl MeterChannel {
    pub const ALL: [MeterChannel; 3] = [MeterChannel::Cpu, MeterChannel::Ram, MeterChannel::Gpu];

    fn index(self) -> usize {
        match self {
            MeterChannel::Cpu => 0,
            MeterChannel::Ram => 1,
            MeterChannel::Gpu => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MeterChannel::Cpu => "CPU",
            MeterChannel::Ram => "RAM",
            MeterChannel::Gpu => "GPU",
        }
    }
}

/// Per-channel smoothed value plus a fixed-size ring of samples
///
/// Each [`record`](MeterHistory::record) blends the new value into the
/// slot under the cursor, then advances the cursor. Samples start at zero.
#[derive(Debug, Clone)]
pub struct MeterHistory {
    smoothed: [f32; 3],
    samples: [Vec<f32>; 3],
    cursor: usize,
    smoothing: f32,
    history_smoothing: f32,
}

impl MeterHistory {
    pub fn new(config: &EngineConfig) -> Self {
        Self::with_params(
            config.meter_history_len,
            config.meter_smoothing,
            config.meter_history_smoothing,
        )
    }

    pub fn with_params(len: usize, smoothing: f32, history_smoothing: f32) -> Self {
        let len = len.max(1);
        Self {
            smoothed: [0.0; 3],
            samples: [vec![0.0; len], vec![0.0; len], vec![0.0; len]],
            cursor: 0,
            smoothing,
            history_smoothing,
        }
    }

    pub fn record(&mut self, snapshot: MetricsSnapshot) {
        for channel in MeterChannel::ALL {
            let i = channel.index();
            let value = snapshot.get(channel);

            self.smoothed[i] = self.smoothed[i] * (1.0 - self.smoothing) + value * self.smoothing;

            let slot = &mut self.samples[i][self.cursor];
            *slot = *slot * (1.0 - self.history_smoothing) + value * self.history_smoothing;
        }
        self.cursor = (self.cursor + 1) % self.len();
    }

    pub fn smoothed(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            cpu: self.smoothed[0],
            ram: self.smoothed[1],
            gpu: self.smoothed[2],
        }
    }

    /// Most recently written sample
    pub fn latest(&self, channel: MeterChannel) -> f32 {
        let len = self.len();
        self.samples[channel.index()][(self.cursor + len - 1) % len]
    }

    /// Samples oldest first
    pub fn samples(&self, channel: MeterChannel) -> impl Iterator<Item = f32> + '_ {
        let ring = &self.samples[channel.index()];
        let len = ring.len();
        (0..len).map(move |offset| ring[(self.cursor + offset) % len])
    }

    pub fn peak(&self, channel: MeterChannel) -> f32 {
        self.samples(channel).fold(0.0, f32::max)
    }

    pub fn len(&self) -> usize {
        self.samples[0].len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }
}
