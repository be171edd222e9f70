//! Offline resynthesis: stream -> sliding frame -> frame effect -> OLA.

use crossbeam_channel::unbounded;
use ola_engine::{FrameEffectKind, OlaConfig, Resynthesizer};
use std::thread;

/// Render one channel block by block through its own resynthesizer.
///
/// Output sample `t + config.latency()` carries input sample `t`. The input
/// is padded with `config.latency()` zeros, rounded up to whole blocks, so
/// the last frames are fully flushed to the output.
pub fn render_channel(config: OlaConfig, effect: FrameEffectKind, input: &[f32]) -> Vec<f32> {
    let block = config.block_size();
    let padded_len = (input.len() + config.latency()).div_ceil(block) * block;

    let mut resynth = Resynthesizer::new(config, effect);

    let mut in_block = vec![0.0; block];
    let mut output = vec![0.0; padded_len];

    for (index, out_block) in output.chunks_exact_mut(block).enumerate() {
        let start = (index * block).min(input.len());
        let end = (start + block).min(input.len());
        let available = end - start;
        in_block[..available].copy_from_slice(&input[start..end]);
        in_block[available..].fill(0.0);

        resynth.process(&in_block, out_block);
    }

    tracing::debug!(
        samples = input.len(),
        frames_written = resynth.ola().frames_written(),
        effect = resynth.effect_name(),
        "channel rendered"
    );

    output
}

/// Render every channel on its own thread, each with an independent engine.
/// Results come back in channel order.
pub fn render_channels(
    config: OlaConfig,
    effect: FrameEffectKind,
    channels: Vec<Vec<f32>>,
) -> Vec<Vec<f32>> {
    let count = channels.len();
    let (tx, rx) = unbounded();

    thread::scope(|scope| {
        for (index, input) in channels.into_iter().enumerate() {
            let tx = tx.clone();
            scope.spawn(move || {
                let rendered = render_channel(config, effect, &input);
                // Receiver outlives the scope
                let _ = tx.send((index, rendered));
            });
        }
    });
    drop(tx);

    let mut rendered = vec![Vec::new(); count];
    for (index, samples) in rx.iter() {
        rendered[index] = samples;
    }
    rendered
}
