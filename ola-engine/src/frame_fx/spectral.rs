//! Spectral gate: removes low-level bins from each frame.
//!
//! Forward FFT of the frame, zero every bin whose magnitude is below a
//! threshold relative to the loudest bin, inverse FFT back into the frame.
//! The frame is resynthesized unwindowed, so the gate composes with the
//! plain additive overlap of the engine.

use super::FrameEffect;
use crate::config::OlaConfig;
use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::sync::Arc;

/// Default gate threshold relative to the peak bin (-40 dB)
const DEFAULT_THRESHOLD_DB: f32 = -40.0;

/// Relative-threshold spectral noise gate
pub struct SpectralGate {
    forward: Arc<dyn Fft<f32>>,
    inverse: Arc<dyn Fft<f32>>,
    /// Pre-allocated transform buffer
    bins: Vec<Complex<f32>>,
    scratch: Vec<Complex<f32>>,
    /// Linear magnitude ratio below the peak at which bins are dropped
    threshold: f32,
    norm: f32,
}

impl SpectralGate {
    pub fn new(config: &OlaConfig) -> Self {
        let size = config.frame_length();
        let mut planner = FftPlanner::new();
        let forward = planner.plan_fft_forward(size);
        let inverse = planner.plan_fft_inverse(size);
        let scratch_len = forward
            .get_inplace_scratch_len()
            .max(inverse.get_inplace_scratch_len());

        let mut gate = Self {
            forward,
            inverse,
            bins: vec![Complex::new(0.0, 0.0); size],
            scratch: vec![Complex::new(0.0, 0.0); scratch_len],
            threshold: 0.0,
            norm: 1.0 / size as f32,
        };
        gate.set_threshold_db(DEFAULT_THRESHOLD_DB);
        gate
    }

    /// Set threshold in dB relative to the loudest bin (-120 to 0)
    pub fn set_threshold_db(&mut self, db: f32) {
        let db = db.clamp(-120.0, 0.0);
        self.threshold = 10.0f32.powf(db / 20.0);
    }

    /// Threshold in dB relative to the loudest bin
    pub fn threshold_db(&self) -> f32 {
        20.0 * self.threshold.log10()
    }
}

impl FrameEffect for SpectralGate {
    fn process(&mut self, frame: &mut [f32]) {
        debug_assert_eq!(frame.len(), self.bins.len());

        for (bin, &sample) in self.bins.iter_mut().zip(frame.iter()) {
            *bin = Complex::new(sample, 0.0);
        }
        self.forward
            .process_with_scratch(&mut self.bins, &mut self.scratch);

        let peak_sq = self.bins.iter().map(|c| c.norm_sqr()).fold(0.0f32, f32::max);
        if peak_sq == 0.0 {
            return;
        }

        // Compare squared magnitudes, no sqrt per bin
        let floor_sq = peak_sq * self.threshold * self.threshold;
        for bin in self.bins.iter_mut() {
            if bin.norm_sqr() < floor_sq {
                *bin = Complex::new(0.0, 0.0);
            }
        }

        self.inverse
            .process_with_scratch(&mut self.bins, &mut self.scratch);

        for (sample, bin) in frame.iter_mut().zip(&self.bins) {
            *sample = bin.re * self.norm;
        }
    }

    // Frames are gated independently; only the working spectrum is cleared.
    fn reset(&mut self) {
        self.bins.fill(Complex::new(0.0, 0.0));
        self.scratch.fill(Complex::new(0.0, 0.0));
    }

    fn name(&self) -> &'static str {
        "gate"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    fn sine(len: usize, cycles: f32, amp: f32) -> Vec<f32> {
        (0..len)
            .map(|i| amp * (2.0 * PI * cycles * i as f32 / len as f32).sin())
            .collect()
    }

    #[test]
    fn test_threshold_db_roundtrip() {
        let config = OlaConfig::new(64, 4.0, 16).unwrap();
        let mut gate = SpectralGate::new(&config);
        assert!((gate.threshold_db() - DEFAULT_THRESHOLD_DB).abs() < 1e-3);

        gate.set_threshold_db(-200.0);
        assert!((gate.threshold_db() + 120.0).abs() < 1e-3);
    }

    #[test]
    fn test_strong_tone_passes_unchanged() {
        let config = OlaConfig::new(128, 4.0, 32).unwrap();
        let mut gate = SpectralGate::new(&config);
        let original = sine(128, 8.0, 0.8);
        let mut frame = original.clone();
        gate.process(&mut frame);

        for (a, b) in frame.iter().zip(&original) {
            assert!((a - b).abs() < 1e-4);
        }
    }

    #[test]
    fn test_quiet_tone_removed() {
        let config = OlaConfig::new(128, 4.0, 32).unwrap();
        let mut gate = SpectralGate::new(&config);
        let loud = sine(128, 8.0, 1.0);
        let quiet = sine(128, 21.0, 0.001);
        let mut frame: Vec<f32> = loud.iter().zip(&quiet).map(|(a, b)| a + b).collect();
        gate.process(&mut frame);

        for (a, b) in frame.iter().zip(&loud) {
            assert!((a - b).abs() < 1e-4);
        }
    }

    #[test]
    fn test_silence_stays_silent() {
        let config = OlaConfig::new(64, 2.0, 8).unwrap();
        let mut gate = SpectralGate::new(&config);
        let mut frame = vec![0.0; 64];
        gate.process(&mut frame);
        assert!(frame.iter().all(|&s| s == 0.0));
    }
}
