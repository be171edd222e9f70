//! Contiguous storage for the overlapping frame slots.

/// N slots of L samples in a single allocation.
///
/// Allocated once, zero-filled, never resized.
pub struct FrameArena {
    samples: Vec<f32>,
    frame_length: usize,
    slots: usize,
}

impl FrameArena {
    pub fn new(slots: usize, frame_length: usize) -> Self {
        Self {
            samples: vec![0.0; slots * frame_length],
            frame_length,
            slots,
        }
    }

    #[inline]
    pub fn slots(&self) -> usize {
        self.slots
    }

    #[inline]
    pub fn frame_length(&self) -> usize {
        self.frame_length
    }

    #[inline]
    pub fn slot(&self, index: usize) -> &[f32] {
        let start = index * self.frame_length;
        &self.samples[start..start + self.frame_length]
    }

    #[inline]
    pub fn slot_mut(&mut self, index: usize) -> &mut [f32] {
        let start = index * self.frame_length;
        &mut self.samples[start..start + self.frame_length]
    }

    /// Zero every slot
    pub fn clear(&mut self) {
        self.samples.fill(0.0);
    }
}

/// Copy `src` into `ring` so that `src[0]` lands at `offset`, wrapping the
/// tail around to the start of `ring`.
///
/// `src` and `ring` must have the same length.
#[inline]
pub fn copy_into_ring(ring: &mut [f32], offset: usize, src: &[f32]) {
    debug_assert_eq!(ring.len(), src.len());
    let len = ring.len();
    if len == 0 {
        return;
    }

    let offset = offset % len;
    let head = len - offset;
    ring[offset..].copy_from_slice(&src[..head]);
    ring[..offset].copy_from_slice(&src[head..]);
}
