//! WAV output

use std::path::Path;
use thiserror::Error;

/// Errors that can occur while writing audio
#[derive(Error, Debug)]
pub enum WriteError {
    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),
    #[error("No channels to write")]
    NoChannels,
    #[error("Channel {channel} has {len} samples, expected {expected}")]
    LengthMismatch {
        channel: usize,
        len: usize,
        expected: usize,
    },
}

/// Interleave `channels` and write them as a 32-bit float WAV file.
///
/// All channels must have the same length.
pub fn write_wav(path: &Path, channels: &[Vec<f32>], sample_rate: u32) -> Result<(), WriteError> {
    let first = channels.first().ok_or(WriteError::NoChannels)?;
    let expected = first.len();

    if let Some((channel, ch)) = channels
        .iter()
        .enumerate()
        .find(|(_, ch)| ch.len() != expected)
    {
        return Err(WriteError::LengthMismatch {
            channel,
            len: ch.len(),
            expected,
        });
    }

    let spec = hound::WavSpec {
        channels: channels.len() as u16,
        sample_rate,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };

    let mut writer = hound::WavWriter::create(path, spec)?;
    for frame in 0..expected {
        for channel in channels {
            writer.write_sample(channel[frame])?;
        }
    }
    writer.finalize()?;

    tracing::info!(
        path = %path.display(),
        channels = channels.len(),
        frames = expected,
        "wrote WAV"
    );

    Ok(())
}
