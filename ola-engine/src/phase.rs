//! Cycle counters and the per-cycle transition.
//!
//! The engine tracks three periodic counters that all move by one block per
//! cycle: the slot receiving the next frame write (period N), the position
//! inside the current hop (period H) and the shared read offset into every
//! frame slot (period L). They live in one `Copy` record that is only ever
//! replaced by [`Phase::advance`], so the modular arithmetic sits in one place.

use crate::config::OlaConfig;

/// Where the next hop boundary falls relative to the upcoming cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HopBoundary {
    /// The hop counter lands on zero once this block has elapsed. When the
    /// cycle also starts on a boundary (block equal to hop) the frame goes in
    /// before the block is read, otherwise right after it.
    AtBlockEnd,
    /// The boundary falls inside the block after `before` samples.
    /// `before` may be zero, in which case only the post-boundary read runs.
    Inside { before: usize },
    /// No boundary in this cycle; read only.
    None,
}

impl HopBoundary {
    /// Whether a frame write happens in this cycle
    #[inline]
    pub fn writes(self) -> bool {
        !matches!(self, HopBoundary::None)
    }
}

/// Snapshot of the three engine counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Phase {
    /// Slot that receives the next frame write, in `0..N`
    pub write_frame: usize,
    /// Position within the current hop. Starts at H so the first cycle
    /// writes; in `0..H` after the first advance.
    pub hop_phase: usize,
    /// Shared read offset into every slot, in `0..L`
    pub read_phase: usize,
}

impl Phase {
    /// Initial state: first slot, read offset zero, sitting on a hop boundary.
    pub fn start(config: &OlaConfig) -> Self {
        Self {
            write_frame: 0,
            hop_phase: config.hop_length(),
            read_phase: 0,
        }
    }

    /// Classify the upcoming cycle using the pre-advance counters.
    ///
    /// `block_size <= hop_length` guarantees the hop counter wraps at most
    /// once per cycle, so comparing the next hop phase with the current one
    /// separates "landed on zero", "wrapped" and "no wrap".
    pub fn boundary(&self, config: &OlaConfig) -> HopBoundary {
        let hop = config.hop_length();
        let next = (self.hop_phase + config.block_size()) % hop;

        if next == 0 {
            HopBoundary::AtBlockEnd
        } else if next < self.hop_phase {
            HopBoundary::Inside {
                before: hop - self.hop_phase,
            }
        } else {
            HopBoundary::None
        }
    }

    /// Offset inside the upcoming block at which the frame write lands, or
    /// `None` when this cycle does not write.
    ///
    /// This is the distance to the next hop boundary: `0` when the cycle
    /// starts on one, `block_size` when it ends on one.
    pub fn write_offset(&self, config: &OlaConfig) -> Option<usize> {
        match self.boundary(config) {
            HopBoundary::None => None,
            _ => {
                let hop = config.hop_length();
                Some((hop - self.hop_phase) % hop)
            }
        }
    }

    /// Advance by one block. `wrote` moves the write slot forward.
    #[must_use]
    pub fn advance(self, config: &OlaConfig, wrote: bool) -> Self {
        let write_frame = if wrote {
            (self.write_frame + 1) % config.overlap()
        } else {
            self.write_frame
        };

        Self {
            write_frame,
            hop_phase: (self.hop_phase + config.block_size()) % config.hop_length(),
            read_phase: (self.read_phase + config.block_size()) % config.frame_length(),
        }
    }
}
