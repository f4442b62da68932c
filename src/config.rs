// precedence: command line, then config file, then defaults

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use serde::Deserialize;

use crate::midi::DEFAULT_DEVICE_FILTER;

#[derive(Debug, Default, Parser)]
#[command(name = "padgrid", version, about = "8x8 sample pad grid for the terminal, with Launchpad MIDI support")]
pub struct Args {
    /// Directory listed when loading audio onto a pad
    #[arg(long)]
    pub samples_dir: Option<PathBuf>,

    /// Directory listed when loading pad images (defaults to the samples dir)
    #[arg(long)]
    pub images_dir: Option<PathBuf>,

    /// Connect to the first MIDI ports whose name contains this text
    #[arg(long)]
    pub midi_device: Option<String>,

    /// Don't touch MIDI at all
    #[arg(long)]
    pub no_midi: bool,

    /// Skip the start-up spiral
    #[arg(long)]
    pub no_animation: bool,

    /// Where log output goes (the terminal is busy drawing the grid)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// JSON file with any of the settings above
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub samples_dir: Option<PathBuf>,
    pub images_dir: Option<PathBuf>,
    pub midi_device: Option<String>,
    pub no_midi: Option<bool>,
    pub no_animation: Option<bool>,
    pub log_file: Option<PathBuf>,
    pub flash_ms: Option<u64>,
    pub spiral_step_ms: Option<u64>,
    pub spiral_hold_ms: Option<u64>,
}

impl FileConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&data).with_context(|| format!("parsing config {}", path.display()))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Timing {
    pub flash: Duration,
    pub spiral_step: Duration,
    pub spiral_hold: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            flash: Duration::from_millis(100),
            spiral_step: Duration::from_millis(100),
            spiral_hold: Duration::from_millis(200),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub samples_dir: PathBuf,
    pub images_dir: PathBuf,
    pub midi_device: Option<String>, // None = MIDI disabled
    pub animation: bool,
    pub log_file: PathBuf,
    pub timing: Timing,
}

impl Settings {
    pub fn from_args(args: Args) -> anyhow::Result<Self> {
        let file = match &args.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };
        let cwd = std::env::current_dir().unwrap_or_default();
        Ok(Self::merge(args, file, cwd))
    }

    pub fn merge(args: Args, file: FileConfig, cwd: PathBuf) -> Self {
        let samples_dir = args.samples_dir.or(file.samples_dir).unwrap_or(cwd);
        let images_dir = args
            .images_dir
            .or(file.images_dir)
            .unwrap_or_else(|| samples_dir.clone());

        let no_midi = args.no_midi || file.no_midi.unwrap_or(false);
        let midi_device = if no_midi {
            None
        } else {
            Some(
                args.midi_device
                    .or(file.midi_device)
                    .unwrap_or_else(|| DEFAULT_DEVICE_FILTER.to_string()),
            )
        };

        let defaults = Timing::default();
        let ms = |v: Option<u64>, d: Duration| v.map(Duration::from_millis).unwrap_or(d);
        let timing = Timing {
            flash: ms(file.flash_ms, defaults.flash),
            spiral_step: ms(file.spiral_step_ms, defaults.spiral_step),
            spiral_hold: ms(file.spiral_hold_ms, defaults.spiral_hold),
        };

        Self {
            samples_dir,
            images_dir,
            midi_device,
            animation: !(args.no_animation || file.no_animation.unwrap_or(false)),
            log_file: args
                .log_file
                .or(file.log_file)
                .unwrap_or_else(|| PathBuf::from("padgrid.log")),
            timing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_flags_or_file() {
        let s = Settings::merge(Args::default(), FileConfig::default(), PathBuf::from("/work"));
        assert_eq!(s.samples_dir, PathBuf::from("/work"));
        assert_eq!(s.images_dir, PathBuf::from("/work"));
        assert_eq!(s.midi_device.as_deref(), Some("Launchpad"));
        assert!(s.animation);
        assert_eq!(s.log_file, PathBuf::from("padgrid.log"));
        assert_eq!(s.timing, Timing::default());
    }

    #[test]
    fn flags_beat_the_file() {
        let args = Args::parse_from(["padgrid", "--samples-dir", "/cli", "--midi-device", "APC"]);
        let file: FileConfig = serde_json::from_str(
            r#"{ "samples_dir": "/file", "images_dir": "/pics", "midi_device": "Push", "flash_ms": 250 }"#,
        )
        .unwrap();
        let s = Settings::merge(args, file, PathBuf::from("/work"));
        assert_eq!(s.samples_dir, PathBuf::from("/cli"));
        assert_eq!(s.images_dir, PathBuf::from("/pics"));
        assert_eq!(s.midi_device.as_deref(), Some("APC"));
        assert_eq!(s.timing.flash, Duration::from_millis(250));
    }

    #[test]
    fn midi_can_be_disabled_from_either_side() {
        let args = Args::parse_from(["padgrid", "--no-midi"]);
        assert!(Settings::merge(args, FileConfig::default(), PathBuf::new()).midi_device.is_none());

        let file: FileConfig = serde_json::from_str(r#"{ "no_midi": true, "no_animation": true }"#).unwrap();
        let s = Settings::merge(Args::default(), file, PathBuf::new());
        assert!(s.midi_device.is_none());
        assert!(!s.animation);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(serde_json::from_str::<FileConfig>(r#"{ "bpm": 120 }"#).is_err());
    }

    #[test]
    fn config_file_is_read_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("padgrid.json");
        std::fs::write(&path, r#"{ "spiral_step_ms": 50 }"#).unwrap();
        assert_eq!(FileConfig::load(&path).unwrap().spiral_step_ms, Some(50));
        assert!(FileConfig::load(&dir.path().join("missing.json")).is_err());
    }
}
