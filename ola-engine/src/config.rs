//! Validated engine geometry

use crate::error::ConfigError;

/// Frame, hop and block geometry of one OLA engine.
///
/// Built through [`OlaConfig::new`] or [`OlaConfig::from_frame_shape`], which
/// enforce `hop_length * overlap == frame_length` and
/// `hop_length >= block_size`. Fields are read-only afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OlaConfig {
    frame_length: usize,
    overlap: usize,
    hop_length: usize,
    block_size: usize,
}

impl OlaConfig {
    /// Validate a one-dimensional frame of `frame_length` samples.
    ///
    /// `overlap` is taken as a float because hosts usually hand it over as a
    /// control value; it must still be a whole number.
    pub fn new(frame_length: usize, overlap: f64, block_size: usize) -> Result<Self, ConfigError> {
        Self::from_frame_shape(&[frame_length], overlap, block_size)
    }

    /// Validate a host-supplied frame shape, one entry per dimension.
    pub fn from_frame_shape(
        shape: &[usize],
        overlap: f64,
        block_size: usize,
    ) -> Result<Self, ConfigError> {
        if !overlap.is_finite() || overlap.floor() != overlap || overlap < 1.0 {
            return Err(ConfigError::InvalidOverlapFactor(overlap));
        }

        let frame_length = match shape {
            [len] => *len,
            _ => return Err(ConfigError::InvalidFrameShape(shape.len())),
        };

        // Whole and >= 1, so the cast only saturates for absurd values that
        // the length check below rejects anyway.
        let overlap = overlap as usize;

        if frame_length <= overlap {
            return Err(ConfigError::FrameTooShort {
                frame_length,
                overlap,
            });
        }

        if frame_length % overlap != 0 {
            return Err(ConfigError::NonIntegerHopLength {
                frame_length,
                overlap,
            });
        }

        if block_size == 0 {
            return Err(ConfigError::InvalidBlockSize);
        }

        let hop_length = frame_length / overlap;
        if hop_length < block_size {
            return Err(ConfigError::HopShorterThanBlock {
                hop_length,
                block_size,
            });
        }

        Ok(Self {
            frame_length,
            overlap,
            hop_length,
            block_size,
        })
    }

    /// Samples per analysis frame (L)
    #[inline]
    pub fn frame_length(&self) -> usize {
        self.frame_length
    }

    /// Number of simultaneously overlapping frames (N)
    #[inline]
    pub fn overlap(&self) -> usize {
        self.overlap
    }

    /// Samples between successive frame writes (H = L / N)
    #[inline]
    pub fn hop_length(&self) -> usize {
        self.hop_length
    }

    /// Samples consumed and produced per cycle (K)
    #[inline]
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Delay between an input sample and the output sample that carries it,
    /// when each frame is taken right at its hop boundary (see
    /// [`Resynthesizer`](crate::Resynthesizer)).
    #[inline]
    pub fn latency(&self) -> usize {
        self.frame_length
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_config() {
        let config = OlaConfig::new(8, 4.0, 2).unwrap();
        assert_eq!(config.frame_length(), 8);
        assert_eq!(config.overlap(), 4);
        assert_eq!(config.hop_length(), 2);
        assert_eq!(config.block_size(), 2);
    }

    #[test]
    fn test_hop_equal_to_block_is_allowed() {
        let config = OlaConfig::new(1024, 4.0, 256).unwrap();
        assert_eq!(config.hop_length(), 256);
    }

    #[test]
    fn test_non_integer_hop_length() {
        assert_eq!(
            OlaConfig::new(8, 3.0, 2),
            Err(ConfigError::NonIntegerHopLength {
                frame_length: 8,
                overlap: 3
            })
        );
    }

    #[test]
    fn test_fractional_overlap_rejected() {
        assert_eq!(
            OlaConfig::new(8, 2.5, 1),
            Err(ConfigError::InvalidOverlapFactor(2.5))
        );
        assert!(matches!(
            OlaConfig::new(8, f64::NAN, 1),
            Err(ConfigError::InvalidOverlapFactor(_))
        ));
        assert!(matches!(
            OlaConfig::new(8, f64::INFINITY, 1),
            Err(ConfigError::InvalidOverlapFactor(_))
        ));
        assert_eq!(
            OlaConfig::new(8, 0.0, 1),
            Err(ConfigError::InvalidOverlapFactor(0.0))
        );
    }

    #[test]
    fn test_multi_dimensional_shape_rejected() {
        assert_eq!(
            OlaConfig::from_frame_shape(&[8, 2], 4.0, 2),
            Err(ConfigError::InvalidFrameShape(2))
        );
        assert_eq!(
            OlaConfig::from_frame_shape(&[], 4.0, 2),
            Err(ConfigError::InvalidFrameShape(0))
        );
    }

    #[test]
    fn test_frame_too_short() {
        assert_eq!(
            OlaConfig::new(4, 4.0, 1),
            Err(ConfigError::FrameTooShort {
                frame_length: 4,
                overlap: 4
            })
        );
        assert!(matches!(
            OlaConfig::new(0, 1.0, 1),
            Err(ConfigError::FrameTooShort { .. })
        ));
    }

    #[test]
    fn test_hop_shorter_than_block() {
        assert_eq!(
            OlaConfig::new(8, 4.0, 3),
            Err(ConfigError::HopShorterThanBlock {
                hop_length: 2,
                block_size: 3
            })
        );
    }

    #[test]
    fn test_zero_block_size() {
        assert_eq!(OlaConfig::new(8, 4.0, 0), Err(ConfigError::InvalidBlockSize));
    }

    #[test]
    fn test_validation_is_repeatable() {
        let first = OlaConfig::new(16, 4.0, 3);
        let second = OlaConfig::new(16, 4.0, 3);
        assert_eq!(first, second);
        assert!(first.is_ok());
    }
}
