//! OLA - offline overlap-add resynthesis
//!
//! Decodes an audio file, runs every channel through its own sliding frame,
//! frame effect and OLA engine, and writes the result as a float WAV.

mod cli;
mod render;

use anyhow::Context;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

use cli::{Args, USAGE};
use ola_library::{write_wav, AudioLoader, Settings};
use render::render_channels;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let Some(args) = Args::parse(std::env::args().skip(1), Settings::load())? else {
        println!("{}", USAGE);
        return Ok(());
    };

    let config = args
        .settings
        .ola_config()
        .context("invalid frame / overlap / block combination")?;

    if args.save {
        args.settings
            .save()
            .with_context(|| format!("saving settings to {}", Settings::settings_path().display()))?;
        tracing::info!(path = %Settings::settings_path().display(), "settings saved");
    }

    let audio = AudioLoader::new()
        .load(&args.input)
        .with_context(|| format!("loading {}", args.input.display()))?;

    tracing::info!(
        frame_length = config.frame_length(),
        overlap = config.overlap(),
        hop_length = config.hop_length(),
        block_size = config.block_size(),
        effect = %args.settings.effect,
        "rendering"
    );

    let started = Instant::now();
    let channels = (0..audio.channels as usize)
        .map(|ch| audio.channel(ch))
        .collect();
    let rendered = render_channels(config, args.settings.effect, channels);
    tracing::info!(elapsed_ms = started.elapsed().as_millis() as u64, "render finished");

    write_wav(&args.output, &rendered, audio.sample_rate)
        .with_context(|| format!("writing {}", args.output.display()))?;

    Ok(())
}
