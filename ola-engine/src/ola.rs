//! Overlap-add circular framebuffer.
//!
//! Every cycle the engine receives the latest analysis frame and produces one
//! block of output. Once per hop the frame is stored in the next of N slots;
//! the output is the plain sum of all N slots read at a shared offset.
//!
//! Slot `i` is written rotated by `i * hop_length` samples, so the shared
//! read offset lines up with the start of every frame at the hop boundary
//! where it was written. No per-slot phase is needed.
//!
//! No window is applied here. Frames that were not windowed upstream come
//! out scaled by the number of overlapping frames at each position.

use crate::arena::{copy_into_ring, FrameArena};
use crate::config::OlaConfig;
use crate::phase::{HopBoundary, Phase};

/// Single-channel overlap-add engine.
///
/// Allocates at construction only. Stack one instance per channel.
pub struct OlaBuffer {
    config: OlaConfig,
    frames: FrameArena,
    phase: Phase,
    /// Frames written since construction or the last reset
    frames_written: u64,
}

impl OlaBuffer {
    /// Create a zeroed engine for a validated configuration
    pub fn new(config: OlaConfig) -> Self {
        tracing::debug!(
            frame_length = config.frame_length(),
            overlap = config.overlap(),
            hop_length = config.hop_length(),
            block_size = config.block_size(),
            "OLA buffer initialised"
        );

        Self {
            frames: FrameArena::new(config.overlap(), config.frame_length()),
            phase: Phase::start(&config),
            config,
            frames_written: 0,
        }
    }

    #[inline]
    pub fn config(&self) -> &OlaConfig {
        &self.config
    }

    /// Current counters
    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[inline]
    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    /// Read-only view of one frame slot as stored (rotated)
    #[inline]
    pub fn slot(&self, index: usize) -> &[f32] {
        self.frames.slot(index)
    }

    /// Store `input` (L samples) in `slot`, rotated so its first sample sits
    /// at `hop_length * slot`. The previous contents are replaced entirely.
    pub fn write_frame(&mut self, slot: usize, input: &[f32]) {
        debug_assert!(slot < self.config.overlap());
        debug_assert_eq!(input.len(), self.config.frame_length());

        let offset = self.config.hop_length() * slot;
        copy_into_ring(self.frames.slot_mut(slot), offset, input);
        self.frames_written += 1;

        tracing::trace!(slot, offset, "frame written");
    }

    /// Write `count` samples to `output[output_offset..]`, each the sum over
    /// all slots of `slot[(source_offset + j) % L]`.
    ///
    /// The first slot is assigned and the rest are added, so stale output
    /// contents never leak through. Reads that cross the end of the frame
    /// wrap to its start.
    pub fn read_and_accumulate(
        &self,
        output: &mut [f32],
        output_offset: usize,
        source_offset: usize,
        count: usize,
    ) {
        debug_assert!(output_offset + count <= output.len());
        debug_assert!(count <= self.config.frame_length());

        let len = self.config.frame_length();
        let source_offset = source_offset % len;
        let first = count.min(len - source_offset);

        let out = &mut output[output_offset..output_offset + count];
        let (head, tail) = out.split_at_mut(first);

        for slot in 0..self.frames.slots() {
            let frame = self.frames.slot(slot);
            let head_src = &frame[source_offset..source_offset + first];
            let tail_src = &frame[..tail.len()];

            if slot == 0 {
                head.copy_from_slice(head_src);
                tail.copy_from_slice(tail_src);
            } else {
                for (o, s) in head.iter_mut().zip(head_src) {
                    *o += *s;
                }
                for (o, s) in tail.iter_mut().zip(tail_src) {
                    *o += *s;
                }
            }
        }
    }

    /// Run one cycle: consume the current analysis frame (L samples) and
    /// fill `output` (K samples).
    ///
    /// The frame is only stored when a hop boundary falls in this cycle, and
    /// then exactly at the boundary sample: slots are read up to the
    /// boundary, the frame is written, and the rest of the block is read
    /// with the new frame in place. Returns which case applied.
    pub fn process(&mut self, input: &[f32], output: &mut [f32]) -> HopBoundary {
        debug_assert_eq!(input.len(), self.config.frame_length());
        debug_assert_eq!(output.len(), self.config.block_size());

        let block = self.config.block_size();
        let read_phase = self.phase.read_phase;
        let boundary = self.phase.boundary(&self.config);

        match self.phase.write_offset(&self.config) {
            Some(before) => {
                if before != 0 {
                    self.read_and_accumulate(output, 0, read_phase, before);
                }

                self.write_frame(self.phase.write_frame, input);

                let after = block - before;
                if after != 0 {
                    self.read_and_accumulate(output, before, read_phase + before, after);
                }
            }
            None => {
                self.read_and_accumulate(output, 0, read_phase, block);
            }
        }

        self.phase = self.phase.advance(&self.config, boundary.writes());
        boundary
    }

    /// Zero all slots and return to the initial phase
    pub fn reset(&mut self) {
        self.frames.clear();
        self.phase = Phase::start(&self.config);
        self.frames_written = 0;
    }
}
