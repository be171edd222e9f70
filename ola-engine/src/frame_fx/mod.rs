//! Per-frame effects applied to an analysis frame before it reaches the
//! OLA engine.

mod spectral;
mod window;

pub use spectral::SpectralGate;
pub use window::HannWindow;

use crate::config::OlaConfig;
use std::fmt;
use std::str::FromStr;

/// Trait for frame effects
pub trait FrameEffect: Send {
    /// Transform one analysis frame in place
    fn process(&mut self, frame: &mut [f32]);

    /// Drop any state carried between frames. Called whenever the stream
    /// restarts, together with the framer and engine reset.
    fn reset(&mut self);

    /// Get effect name
    fn name(&self) -> &'static str;
}

/// Hands frames through untouched
#[derive(Debug, Default, Clone, Copy)]
pub struct Passthrough;

impl FrameEffect for Passthrough {
    fn process(&mut self, _frame: &mut [f32]) {}

    fn reset(&mut self) {}

    fn name(&self) -> &'static str {
        "none"
    }
}

/// Selectable frame effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum FrameEffectKind {
    /// Plain overlap-add, output scales with the overlap factor
    #[default]
    None,
    /// Hann window with overlap gain compensation (unit peak at overlap 1)
    Hann,
    /// Spectral noise gate
    Gate,
}

impl FrameEffectKind {
    pub const ALL: [FrameEffectKind; 3] =
        [FrameEffectKind::None, FrameEffectKind::Hann, FrameEffectKind::Gate];

    pub fn as_str(self) -> &'static str {
        match self {
            FrameEffectKind::None => "none",
            FrameEffectKind::Hann => "hann",
            FrameEffectKind::Gate => "gate",
        }
    }

    /// Build the effect for frames of the given geometry
    pub fn build(self, config: &OlaConfig) -> Box<dyn FrameEffect> {
        match self {
            FrameEffectKind::None => Box::new(Passthrough),
            FrameEffectKind::Hann => Box::new(HannWindow::new(config)),
            FrameEffectKind::Gate => Box::new(SpectralGate::new(config)),
        }
    }
}

impl fmt::Display for FrameEffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FrameEffectKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown frame effect '{}' (expected none, hann or gate)", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_effect_kind() {
        assert_eq!("hann".parse::<FrameEffectKind>(), Ok(FrameEffectKind::Hann));
        assert_eq!(" GATE ".parse::<FrameEffectKind>(), Ok(FrameEffectKind::Gate));
        assert_eq!("none".parse::<FrameEffectKind>(), Ok(FrameEffectKind::None));
        assert!("blackman".parse::<FrameEffectKind>().is_err());
    }

    #[test]
    fn test_display_roundtrip() {
        for kind in FrameEffectKind::ALL {
            assert_eq!(kind.to_string().parse::<FrameEffectKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_build_names() {
        let config = OlaConfig::new(64, 4.0, 16).unwrap();
        for kind in FrameEffectKind::ALL {
            assert_eq!(kind.build(&config).name(), kind.as_str());
        }
    }

    #[test]
    fn test_passthrough_leaves_frame() {
        let mut frame = [1.0, -2.0, 3.0];
        Passthrough.process(&mut frame);
        assert_eq!(frame, [1.0, -2.0, 3.0]);
    }
}
