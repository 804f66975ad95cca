//! Session settings merged from an optional TOML file and command-line flags.

use std::{
    fs,
    path::{Path, PathBuf},
};

use clap::ValueEnum;
use pacmaze_world::DEFAULT_ADVERSARY_COUNT;
use serde::Deserialize;
use thiserror::Error;

/// Fixed simulation rate used when neither the file nor the flags pick one.
pub(crate) const DEFAULT_TICK_RATE: f32 = 60.0;
const MAX_TICK_RATE: f32 = 1_000.0;

/// Adversary arrangement of the session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub(crate) enum Mode {
    /// Randomly wandering monsters chase the player.
    #[default]
    Wander,
    /// A second player steers the adversary with the arrow keys.
    Versus,
}

/// Settings as written in a configuration file. Every field is optional.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct FileConfig {
    pub(crate) mode: Option<Mode>,
    pub(crate) adversaries: Option<usize>,
    pub(crate) seed: Option<u64>,
    pub(crate) tick_rate: Option<f32>,
    pub(crate) vsync: Option<bool>,
    pub(crate) show_fps: Option<bool>,
}

impl FileConfig {
    /// Reads and parses the configuration file at `path`.
    pub(crate) fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents, path)
    }

    fn parse(contents: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source: Box::new(source),
        })
    }

    /// Layers `overrides` on top of `self`; values present in `overrides` win.
    #[must_use]
    pub(crate) fn overlay(self, overrides: Self) -> Self {
        Self {
            mode: overrides.mode.or(self.mode),
            adversaries: overrides.adversaries.or(self.adversaries),
            seed: overrides.seed.or(self.seed),
            tick_rate: overrides.tick_rate.or(self.tick_rate),
            vsync: overrides.vsync.or(self.vsync),
            show_fps: overrides.show_fps.or(self.show_fps),
        }
    }
}

/// Fully resolved settings of a session.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Settings {
    pub(crate) mode: Mode,
    pub(crate) adversaries: usize,
    pub(crate) seed: u64,
    pub(crate) tick_rate: f32,
    pub(crate) vsync: bool,
    pub(crate) show_fps: bool,
}

impl Settings {
    /// Validates the merged configuration, filling gaps with defaults.
    ///
    /// `fallback_seed` is used only when no seed was configured.
    pub(crate) fn resolve(config: FileConfig, fallback_seed: u64) -> Result<Self, ConfigError> {
        let adversaries = config.adversaries.unwrap_or(DEFAULT_ADVERSARY_COUNT);
        if !(1..=DEFAULT_ADVERSARY_COUNT).contains(&adversaries) {
            return Err(ConfigError::AdversaryCount {
                count: adversaries,
                max: DEFAULT_ADVERSARY_COUNT,
            });
        }

        let tick_rate = config.tick_rate.unwrap_or(DEFAULT_TICK_RATE);
        if !tick_rate.is_finite() || tick_rate <= 0.0 || tick_rate > MAX_TICK_RATE {
            return Err(ConfigError::TickRate { rate: tick_rate });
        }

        Ok(Self {
            mode: config.mode.unwrap_or_default(),
            adversaries,
            seed: config.seed.unwrap_or(fallback_seed),
            tick_rate,
            vsync: config.vsync.unwrap_or(true),
            show_fps: config.show_fps.unwrap_or(false),
        })
    }
}

/// Errors raised while loading or validating session settings.
#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration file {}", path.display())]
    Read {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The configuration file is not valid TOML for the expected schema.
    #[error("failed to parse configuration file {}", path.display())]
    Parse {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying parse failure.
        #[source]
        source: Box<toml::de::Error>,
    },
    /// The requested number of wandering adversaries is out of range.
    #[error("adversary count {count} must be between 1 and {max}")]
    AdversaryCount {
        /// Requested count.
        count: usize,
        /// Largest supported count.
        max: usize,
    },
    /// The requested tick rate is not a usable frequency.
    #[error("tick rate {rate} must be a positive number of ticks per second up to 1000")]
    TickRate {
        /// Requested rate.
        rate: f32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(contents: &str) -> Result<FileConfig, ConfigError> {
        FileConfig::parse(contents, Path::new("pacmaze.toml"))
    }

    #[test]
    fn parses_every_field() {
        let config = parse(
            r#"
                mode = "versus"
                adversaries = 2
                seed = 99
                tick_rate = 30.0
                vsync = false
                show_fps = true
            "#,
        )
        .expect("valid config");

        assert_eq!(
            config,
            FileConfig {
                mode: Some(Mode::Versus),
                adversaries: Some(2),
                seed: Some(99),
                tick_rate: Some(30.0),
                vsync: Some(false),
                show_fps: Some(true),
            }
        );
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let error = parse("ghosts = 3").expect_err("unknown key");
        assert!(matches!(error, ConfigError::Parse { .. }));
    }

    #[test]
    fn missing_file_reports_its_path() {
        let path = Path::new("/nonexistent/pacmaze.toml");
        let error = FileConfig::load(path).expect_err("missing file");
        assert!(error.to_string().contains("/nonexistent/pacmaze.toml"));
    }

    #[test]
    fn flags_override_file_values() {
        let file = FileConfig {
            mode: Some(Mode::Versus),
            seed: Some(1),
            tick_rate: Some(30.0),
            ..FileConfig::default()
        };
        let flags = FileConfig {
            seed: Some(7),
            ..FileConfig::default()
        };

        let merged = file.overlay(flags);
        assert_eq!(merged.mode, Some(Mode::Versus));
        assert_eq!(merged.seed, Some(7));
        assert_eq!(merged.tick_rate, Some(30.0));
    }

    #[test]
    fn defaults_fill_missing_settings() {
        let settings = Settings::resolve(FileConfig::default(), 5).expect("defaults are valid");
        assert_eq!(
            settings,
            Settings {
                mode: Mode::Wander,
                adversaries: DEFAULT_ADVERSARY_COUNT,
                seed: 5,
                tick_rate: DEFAULT_TICK_RATE,
                vsync: true,
                show_fps: false,
            }
        );
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        for adversaries in [0, DEFAULT_ADVERSARY_COUNT + 1] {
            let config = FileConfig {
                adversaries: Some(adversaries),
                ..FileConfig::default()
            };
            assert!(matches!(
                Settings::resolve(config, 0),
                Err(ConfigError::AdversaryCount { .. })
            ));
        }

        for tick_rate in [0.0, -1.0, f32::NAN, 5_000.0] {
            let config = FileConfig {
                tick_rate: Some(tick_rate),
                ..FileConfig::default()
            };
            assert!(matches!(
                Settings::resolve(config, 0),
                Err(ConfigError::TickRate { .. })
            ));
        }
    }
}
