//! Configuration errors for the OLA engine

use thiserror::Error;

/// Reasons an [`OlaConfig`](crate::OlaConfig) can be rejected.
///
/// All validation happens once, when the configuration is built. A running
/// engine never reports errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("overlap factor must be a whole number >= 1, got {0}")]
    InvalidOverlapFactor(f64),
    #[error("input frame must be one dimensional, got {0} dimensions")]
    InvalidFrameShape(usize),
    #[error("frame length {frame_length} must be larger than overlap factor {overlap}")]
    FrameTooShort { frame_length: usize, overlap: usize },
    #[error("frame length {frame_length} must be an integer multiple of overlap factor {overlap}")]
    NonIntegerHopLength { frame_length: usize, overlap: usize },
    #[error("hop length {hop_length} (frame length / overlap) must be >= block size {block_size}")]
    HopShorterThanBlock { hop_length: usize, block_size: usize },
    #[error("block size must be at least one sample")]
    InvalidBlockSize,
}
