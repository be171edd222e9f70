//! Overlap-add framebuffer engine for OLA
//!
//! Turns a sequence of overlapping analysis frames back into a continuous
//! stream, one fixed-size block per processing cycle:
//! - Config: validated frame / hop / block geometry
//! - OlaBuffer: rotated frame storage, hop scheduling, additive read-out
//! - SlidingFrame: builds the analysis frame from the incoming stream
//! - Frame effects: optional per-frame processing between the two
//! - Resynthesizer: the three above driven together, one per channel
//!
//! ```rust,ignore
//! use ola_engine::{FrameEffectKind, OlaConfig, Resynthesizer};
//!
//! let config = OlaConfig::new(1024, 4.0, 64)?;
//! let mut resynth = Resynthesizer::new(config, FrameEffectKind::Hann);
//!
//! // Once per audio callback
//! resynth.process(&input_block, &mut output_block);
//! ```

mod arena;
mod config;
mod error;
mod framer;
mod ola;
mod phase;
mod resynth;
pub mod frame_fx;

pub use arena::{copy_into_ring, FrameArena};
pub use config::OlaConfig;
pub use error::ConfigError;
pub use frame_fx::{FrameEffect, FrameEffectKind, HannWindow, Passthrough, SpectralGate};
pub use framer::SlidingFrame;
pub use ola::OlaBuffer;
pub use phase::{HopBoundary, Phase};
pub use resynth::Resynthesizer;
