//! src/source/simulated.rs
//!
//! Synthetic pressure-like signal: a slow sine swell plus a bounded random
//! walk, noise, and occasional spikes. Deterministic for a given seed.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::SampleSource;
use crate::error::SourceError;

#[derive(Clone, Debug)]
struct Channel {
    baseline: f64,
    amplitude: f64,
    drift: f64,
}

#[derive(Debug)]
pub struct SimulatedSource {
    rng: StdRng,
    channels: Vec<Channel>,
    step: u64,
    spike_chance: f64,
}

impl SimulatedSource {
    /// `channels` independent signals seeded from `seed`.
    pub fn new(channels: usize, seed: u64) -> Self {
        let channels = (0..channels)
            .map(|i| Channel {
                baseline: 1_000.0 + 250.0 * i as f64,
                amplitude: 20.0 + 10.0 * i as f64,
                drift: 0.0,
            })
            .collect();
        Self {
            rng: StdRng::seed_from_u64(seed),
            channels,
            step: 0,
            spike_chance: 0.01,
        }
    }

    /// Probability per sample of a spike, clamped to `[0, 1]`.
    pub fn with_spike_chance(mut self, p: f64) -> Self {
        self.spike_chance = p.clamp(0.0, 1.0);
        self
    }

    pub fn channels(&self) -> usize {
        self.channels.len()
    }
}

impl SampleSource for SimulatedSource {
    fn next_frame(&mut self) -> Result<Vec<f64>, SourceError> {
        let t = self.step as f64 * 0.05;
        self.step += 1;
        let mut frame = Vec::with_capacity(self.channels.len());
        for (i, ch) in self.channels.iter_mut().enumerate() {
            // bounded walk: pull back toward zero as it wanders
            ch.drift = 0.98 * ch.drift + self.rng.random_range(-1.0_f64..1.0) * ch.amplitude * 0.1;
            let swell = ch.amplitude * (t + i as f64).sin();
            let noise = self.rng.random_range(-1.0_f64..1.0) * ch.amplitude * 0.05;
            let spike = if self.rng.random_bool(self.spike_chance) {
                ch.amplitude * 3.0 * if self.rng.random_bool(0.5) { 1.0 } else { -1.0 }
            } else {
                0.0
            };
            frame.push(ch.baseline + swell + ch.drift + noise + spike);
        }
        Ok(frame)
    }

    fn describe(&self) -> String {
        format!("simulated ({} channels)", self.channels.len())
    }
}
