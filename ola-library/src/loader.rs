//! Audio file loading and decoding

use std::path::Path;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use thiserror::Error;

/// Errors that can occur during audio loading
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("No audio track found in file")]
    NoAudioTrack,
    #[error("File contains no channels")]
    NoChannels,
    #[error("Decode error: {0}")]
    Decode(String),
}

/// A decoded audio file
#[derive(Debug, Clone)]
pub struct LoadedAudio {
    /// Interleaved samples (f32, normalized to -1.0 to 1.0)
    pub samples: Vec<f32>,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Number of interleaved channels
    pub channels: u16,
    /// Title from tags, or the file stem
    pub title: String,
}

impl LoadedAudio {
    /// Number of sample frames (samples per channel)
    pub fn frames(&self) -> usize {
        if self.channels == 0 {
            0
        } else {
            self.samples.len() / self.channels as usize
        }
    }

    /// Duration in seconds
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            0.0
        } else {
            self.frames() as f64 / self.sample_rate as f64
        }
    }

    /// Deinterleave one channel
    pub fn channel(&self, index: usize) -> Vec<f32> {
        let channels = self.channels as usize;
        if index >= channels {
            return Vec::new();
        }
        self.samples
            .iter()
            .skip(index)
            .step_by(channels)
            .copied()
            .collect()
    }
}

/// Audio file loader using Symphonia
#[derive(Debug, Default)]
pub struct AudioLoader;

impl AudioLoader {
    pub fn new() -> Self {
        Self
    }

    /// Load and decode an audio file
    pub fn load(&self, path: &Path) -> Result<LoadedAudio, LoadError> {
        let file = std::fs::File::open(path)?;
        let mss = MediaSourceStream::new(Box::new(file), Default::default());

        // Create hint from file extension
        let mut hint = Hint::new();
        if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
            hint.with_extension(ext);
        }

        let probed = symphonia::default::get_probe()
            .format(
                &hint,
                mss,
                &FormatOptions::default(),
                &MetadataOptions::default(),
            )
            .map_err(|e| LoadError::Decode(e.to_string()))?;

        let mut format = probed.format;

        // First decodable audio track
        let track = format
            .tracks()
            .iter()
            .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
            .ok_or(LoadError::NoAudioTrack)?;

        let track_id = track.id;
        let codec_params = track.codec_params.clone();

        let sample_rate = codec_params.sample_rate.unwrap_or(44100);
        let mut channels = codec_params
            .channels
            .map(|c| c.count() as u16)
            .unwrap_or(0);

        let mut decoder = symphonia::default::get_codecs()
            .make(&codec_params, &DecoderOptions::default())
            .map_err(|e| LoadError::Decode(e.to_string()))?;

        let title = Self::extract_title(&mut format, path);

        let mut samples: Vec<f32> = Vec::new();
        let mut skipped_packets = 0usize;

        loop {
            let packet = match format.next_packet() {
                Ok(p) => p,
                Err(SymphoniaError::IoError(ref e))
                    if e.kind() == std::io::ErrorKind::UnexpectedEof =>
                {
                    break;
                }
                Err(SymphoniaError::ResetRequired) => break,
                Err(e) => return Err(LoadError::Decode(e.to_string())),
            };

            if packet.track_id() != track_id {
                continue;
            }

            let decoded = match decoder.decode(&packet) {
                Ok(d) => d,
                Err(SymphoniaError::DecodeError(_)) => {
                    skipped_packets += 1;
                    continue;
                }
                Err(e) => return Err(LoadError::Decode(e.to_string())),
            };

            let spec = *decoded.spec();
            if channels == 0 {
                channels = spec.channels.count() as u16;
            }

            let mut sample_buf = SampleBuffer::<f32>::new(decoded.capacity() as u64, spec);
            sample_buf.copy_interleaved_ref(decoded);
            samples.extend_from_slice(sample_buf.samples());
        }

        if skipped_packets > 0 {
            tracing::warn!(skipped_packets, path = %path.display(), "skipped corrupt packets");
        }

        if channels == 0 {
            return Err(LoadError::NoChannels);
        }

        let audio = LoadedAudio {
            samples,
            sample_rate,
            channels,
            title,
        };

        tracing::info!(
            title = %audio.title,
            sample_rate,
            channels,
            duration_secs = audio.duration_secs(),
            "decoded audio"
        );

        Ok(audio)
    }

    /// Title tag, falling back to the file stem
    fn extract_title(
        format: &mut Box<dyn symphonia::core::formats::FormatReader>,
        path: &Path,
    ) -> String {
        let mut title = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("Unknown")
            .to_string();

        if let Some(meta) = format.metadata().current() {
            for tag in meta.tags() {
                if let Some(symphonia::core::meta::StandardTagKey::TrackTitle) = tag.std_key {
                    title = tag.value.to_string();
                }
            }
        }

        title
    }
}
