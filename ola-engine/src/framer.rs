//! Sliding analysis frame fed block by block.
//!
//! Produces the input side of [`OlaBuffer::process`](crate::OlaBuffer::process):
//! after each pushed block, [`SlidingFrame::frame`] yields the most recent
//! `frame_length` samples of the stream, oldest first.

/// Circular history of the last `frame_length` input samples.
pub struct SlidingFrame {
    history: Vec<f32>,
    /// Next write position, also the position of the oldest sample
    write_pos: usize,
}

impl SlidingFrame {
    /// Create a zero-filled frame of `frame_length` samples
    pub fn new(frame_length: usize) -> Self {
        debug_assert!(frame_length > 0);
        Self {
            history: vec![0.0; frame_length],
            write_pos: 0,
        }
    }

    #[inline]
    pub fn frame_length(&self) -> usize {
        self.history.len()
    }

    /// Append samples of any length, including an empty slice or part of a
    /// block. Input longer than the frame keeps only its last `frame_length`
    /// samples.
    pub fn push(&mut self, samples: &[f32]) {
        let len = self.history.len();
        let samples = &samples[samples.len().saturating_sub(len)..];

        let head = samples.len().min(len - self.write_pos);
        self.history[self.write_pos..self.write_pos + head].copy_from_slice(&samples[..head]);
        let tail = samples.len() - head;
        self.history[..tail].copy_from_slice(&samples[head..]);

        self.write_pos = (self.write_pos + samples.len()) % len;
    }

    /// Copy the current frame into `out`, oldest sample first
    pub fn frame(&self, out: &mut [f32]) {
        debug_assert_eq!(out.len(), self.history.len());
        let older = &self.history[self.write_pos..];
        out[..older.len()].copy_from_slice(older);
        out[older.len()..].copy_from_slice(&self.history[..self.write_pos]);
    }

    /// Clear the history
    pub fn reset(&mut self) {
        self.history.fill(0.0);
        self.write_pos = 0;
    }
}
