//! Audio IO for OLA - decoding, WAV output, and settings

mod loader;
mod settings;
mod writer;

pub use loader::{AudioLoader, LoadError, LoadedAudio};
pub use settings::Settings;
pub use writer::{write_wav, WriteError};
