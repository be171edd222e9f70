//! Command line parsing

use anyhow::{anyhow, bail, Context};
use ola_engine::FrameEffectKind;
use ola_library::Settings;
use std::path::PathBuf;

pub const USAGE: &str = "\
usage: ola <input> <output.wav> [options]

options:
  --frame N       samples per analysis frame
  --overlap N     number of overlapping frames
  --block N       samples per processing block
  --effect NAME   frame effect: none, hann, gate
  --save          store the effective options as defaults
  -h, --help      show this message";

/// Parsed command line
#[derive(Debug, Clone, PartialEq)]
pub struct Args {
    pub input: PathBuf,
    pub output: PathBuf,
    pub settings: Settings,
    pub save: bool,
}

impl Args {
    /// Parse arguments (without the program name) on top of persisted
    /// defaults. Returns `Ok(None)` when help was requested.
    pub fn parse<I>(args: I, defaults: Settings) -> anyhow::Result<Option<Self>>
    where
        I: IntoIterator<Item = String>,
    {
        let mut settings = defaults;
        let mut save = false;
        let mut positional = Vec::new();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-h" | "--help" => return Ok(None),
                "--save" => save = true,
                "--frame" => settings.frame_length = parse_value(&arg, args.next())?,
                "--overlap" => settings.overlap = parse_value(&arg, args.next())?,
                "--block" => settings.block_size = parse_value(&arg, args.next())?,
                "--effect" => {
                    let value = args.next().ok_or_else(|| anyhow!("{} needs a value", arg))?;
                    settings.effect = value
                        .parse::<FrameEffectKind>()
                        .map_err(|e| anyhow!(e))?;
                }
                flag if flag.starts_with("--") => bail!("unknown option {}", flag),
                _ => positional.push(PathBuf::from(&arg)),
            }
        }

        let [input, output]: [PathBuf; 2] = positional
            .try_into()
            .map_err(|_| anyhow!("expected an input and an output path"))?;

        Ok(Some(Self {
            input,
            output,
            settings,
            save,
        }))
    }
}

fn parse_value<T>(flag: &str, value: Option<String>) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value = value.ok_or_else(|| anyhow!("{} needs a value", flag))?;
    value
        .parse()
        .with_context(|| format!("invalid value '{}' for {}", value, flag))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_positional_only_uses_defaults() {
        let parsed = Args::parse(args(&["in.flac", "out.wav"]), Settings::default())
            .unwrap()
            .unwrap();
        assert_eq!(parsed.input, PathBuf::from("in.flac"));
        assert_eq!(parsed.output, PathBuf::from("out.wav"));
        assert_eq!(parsed.settings, Settings::default());
        assert!(!parsed.save);
    }

    #[test]
    fn test_options_override_defaults() {
        let parsed = Args::parse(
            args(&[
                "--frame", "2048", "in.wav", "--overlap", "8", "--block", "128", "--effect",
                "hann", "out.wav", "--save",
            ]),
            Settings::default(),
        )
        .unwrap()
        .unwrap();

        assert_eq!(parsed.settings.frame_length, 2048);
        assert_eq!(parsed.settings.overlap, 8.0);
        assert_eq!(parsed.settings.block_size, 128);
        assert_eq!(parsed.settings.effect, FrameEffectKind::Hann);
        assert!(parsed.save);
    }

    #[test]
    fn test_help() {
        assert!(Args::parse(args(&["--help"]), Settings::default())
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_errors() {
        let defaults = Settings::default();
        assert!(Args::parse(args(&["in.wav"]), defaults).is_err());
        assert!(Args::parse(args(&["a", "b", "c"]), defaults).is_err());
        assert!(Args::parse(args(&["a", "b", "--frame"]), defaults).is_err());
        assert!(Args::parse(args(&["a", "b", "--frame", "big"]), defaults).is_err());
        assert!(Args::parse(args(&["a", "b", "--effect", "reverb"]), defaults).is_err());
        assert!(Args::parse(args(&["a", "b", "--fast"]), defaults).is_err());
    }
}
