//! One channel of block-driven resynthesis:
//! stream -> sliding frame -> frame effect -> OLA.

use crate::config::OlaConfig;
use crate::frame_fx::{FrameEffect, FrameEffectKind};
use crate::framer::SlidingFrame;
use crate::ola::OlaBuffer;
use crate::phase::HopBoundary;

/// Sliding frame, frame effect and OLA engine driven together.
///
/// Input up to the engine's write position is pushed before the frame is
/// taken, so every frame ends exactly on its hop boundary and each input
/// sample comes out `latency()` samples later.
pub struct Resynthesizer {
    framer: SlidingFrame,
    effect: Box<dyn FrameEffect>,
    ola: OlaBuffer,
    /// Scratch analysis frame
    frame: Vec<f32>,
}

impl Resynthesizer {
    pub fn new(config: OlaConfig, effect: FrameEffectKind) -> Self {
        Self {
            framer: SlidingFrame::new(config.frame_length()),
            effect: effect.build(&config),
            ola: OlaBuffer::new(config),
            frame: vec![0.0; config.frame_length()],
        }
    }

    #[inline]
    pub fn config(&self) -> &OlaConfig {
        self.ola.config()
    }

    /// Samples between an input sample and its reconstruction
    #[inline]
    pub fn latency(&self) -> usize {
        self.ola.config().latency()
    }

    #[inline]
    pub fn ola(&self) -> &OlaBuffer {
        &self.ola
    }

    #[inline]
    pub fn effect_name(&self) -> &'static str {
        self.effect.name()
    }

    /// Consume one block of input and produce one block of output, both
    /// `block_size` samples.
    pub fn process(&mut self, input: &[f32], output: &mut [f32]) -> HopBoundary {
        debug_assert_eq!(input.len(), self.config().block_size());

        let split = self
            .ola
            .phase()
            .write_offset(self.ola.config())
            .unwrap_or(input.len());

        self.framer.push(&input[..split]);
        self.framer.frame(&mut self.frame);
        self.framer.push(&input[split..]);

        self.effect.process(&mut self.frame);
        self.ola.process(&self.frame, output)
    }

    /// Clear stream history, effect state and frame slots
    pub fn reset(&mut self) {
        self.framer.reset();
        self.effect.reset();
        self.ola.reset();
        self.frame.fill(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(resynth: &mut Resynthesizer, input: &[f32]) -> Vec<f32> {
        let block = resynth.config().block_size();
        let mut out = vec![0.0; block];
        let mut rendered = Vec::with_capacity(input.len());
        for chunk in input.chunks_exact(block) {
            resynth.process(chunk, &mut out);
            rendered.extend_from_slice(&out);
        }
        rendered
    }

    fn nonzero(samples: &[f32]) -> Vec<(usize, f32)> {
        samples
            .iter()
            .copied()
            .enumerate()
            .filter(|&(_, s)| s != 0.0)
            .collect()
    }

    #[test]
    fn test_impulse_comes_out_once_after_latency() {
        for block in 1..=4 {
            let config = OlaConfig::new(16, 4.0, block).unwrap();
            for t in 32..64 {
                let mut input = vec![0.0; 120];
                input[t] = 1.0;

                let mut resynth = Resynthesizer::new(config, FrameEffectKind::None);
                let output = run(&mut resynth, &input);
                assert_eq!(
                    nonzero(&output),
                    vec![(t + resynth.latency(), 4.0)],
                    "block {} impulse at {}",
                    block,
                    t
                );
            }
        }
    }

    #[test]
    fn test_impulse_with_block_not_dividing_hop() {
        let config = OlaConfig::new(60, 3.0, 7).unwrap();
        for t in [100, 101, 113, 139, 140] {
            let mut input = vec![0.0; 280];
            input[t] = 1.0;

            let mut resynth = Resynthesizer::new(config, FrameEffectKind::None);
            let output = run(&mut resynth, &input);
            assert_eq!(nonzero(&output), vec![(t + 60, 3.0)], "impulse at {}", t);
        }
    }

    #[test]
    fn test_hann_reconstructs_signal_after_latency() {
        let config = OlaConfig::new(64, 4.0, 12).unwrap();
        let input: Vec<f32> = (0..1200).map(|i| (i as f32 * 0.05).sin()).collect();
        let mut resynth = Resynthesizer::new(config, FrameEffectKind::Hann);
        let output = run(&mut resynth, &input);

        let latency = resynth.latency();
        for t in 128..(output.len() - latency) {
            assert!(
                (output[t + latency] - input[t]).abs() < 1e-4,
                "sample {}: {} vs {}",
                t,
                output[t + latency],
                input[t]
            );
        }
    }

    #[test]
    fn test_reset_matches_fresh_instance() {
        let config = OlaConfig::new(32, 4.0, 5).unwrap();
        let input: Vec<f32> = (0..300).map(|i| ((i * 7) % 13) as f32 - 6.0).collect();

        for effect in FrameEffectKind::ALL {
            let mut fresh = Resynthesizer::new(config, effect);
            let expected = run(&mut fresh, &input);

            let mut reused = Resynthesizer::new(config, effect);
            run(&mut reused, &vec![0.5; 150]);
            reused.reset();
            assert_eq!(reused.ola().frames_written(), 0);

            let actual = run(&mut reused, &input);
            for (a, b) in actual.iter().zip(&expected) {
                assert!((a - b).abs() < 1e-5, "effect {}", effect);
            }
        }
    }
}
