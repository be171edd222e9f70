//! Hann analysis window with overlap gain compensation

use super::FrameEffect;
use crate::config::OlaConfig;
use std::f32::consts::PI;

/// Periodic Hann window scaled so overlapping frames sum to unity gain.
///
/// With a periodic Hann window and overlap >= 2, frames spaced one hop apart
/// sum to `frame_length / (2 * hop)`; the window is pre-scaled by the inverse.
/// A single frame (overlap 1) never overlaps, so no constant gain can flatten
/// it and the window keeps its natural peak of 1.
pub struct HannWindow {
    window: Vec<f32>,
}

impl HannWindow {
    pub fn new(config: &OlaConfig) -> Self {
        let size = config.frame_length();
        let mut window: Vec<f32> = (0..size)
            .map(|i| 0.5 * (1.0 - (2.0 * PI * i as f32 / size as f32).cos()))
            .collect();

        let sum: f32 = window.iter().sum();
        if config.overlap() >= 2 && sum > 0.0 {
            let gain = config.hop_length() as f32 / sum;
            for w in window.iter_mut() {
                *w *= gain;
            }
        }

        Self { window }
    }

    /// Window coefficients including the gain compensation
    pub fn coefficients(&self) -> &[f32] {
        &self.window
    }
}

impl FrameEffect for HannWindow {
    fn process(&mut self, frame: &mut [f32]) {
        debug_assert_eq!(frame.len(), self.window.len());
        for (sample, w) in frame.iter_mut().zip(&self.window) {
            *sample *= *w;
        }
    }

    fn reset(&mut self) {}

    fn name(&self) -> &'static str {
        "hann"
    }
}
