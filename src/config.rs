//! Game configuration.
//!
//! Defaults come from the named constants in `tui_memory_types`. Environment
//! variables override the defaults and command-line flags override both:
//!
//! | Flag | Env | Meaning |
//! |------|-----|---------|
//! | `--size N` | | Board side (even, 2..=10) |
//! | `--seed N` | `MEMORY_SEED` | Deal seed (random when unset) |
//! | `--delay-ms N` | | Mismatch display delay |
//! | `--fps N` | | Target frame rate |
//! | `--assets DIR` | `MEMORY_ASSETS` | Load `image0.bmp..imageN.bmp` from DIR |
//! | `--timed` | | Count the mismatch delay down per frame instead of blocking |
//! | `--log FILE` | `MEMORY_LOG` | Write tracing output to FILE |

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, bail, Result};

use crate::controller::MismatchPause;
use crate::core::SessionConfig;
use crate::term::AssetSet;
use crate::types::{BOARD_SIZE, MAX_BOARD_SIZE, MIN_BOARD_SIZE, MISMATCH_DELAY_MS, TARGET_FPS};

pub const ENV_SEED: &str = "MEMORY_SEED";
pub const ENV_ASSETS: &str = "MEMORY_ASSETS";
pub const ENV_LOG: &str = "MEMORY_LOG";

pub const USAGE: &str = "\
usage: tui-memory [--size N] [--seed N] [--delay-ms N] [--fps N] [--assets DIR] [--timed] [--log FILE]

Click two tiles to flip them (or move with arrows/hjkl and press Enter/Space).
Find every pair; your score is the number of seconds it took. q / Esc quits.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub board_size: u8,
    pub seed: Option<u32>,
    pub mismatch_delay_ms: u32,
    pub fps: u32,
    pub pause: MismatchPause,
    pub assets_dir: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: BOARD_SIZE,
            seed: None,
            mismatch_delay_ms: MISMATCH_DELAY_MS,
            fps: TARGET_FPS,
            pause: MismatchPause::Blocking,
            assets_dir: None,
            log_file: None,
        }
    }
}

/// What the command line asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    Play(GameConfig),
    Help,
}

impl GameConfig {
    /// Defaults, then process environment, then `args` (without the program name).
    pub fn from_env_and_args(args: &[String]) -> Result<CliCommand> {
        let mut config = Self::default();
        config.apply_env(|key| std::env::var(key).ok())?;
        config.apply_args(args)
    }

    /// Apply environment overrides read through `get`.
    pub fn apply_env(&mut self, get: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(v) = get(ENV_SEED).filter(|v| !v.is_empty()) {
            self.seed = Some(parse_num(ENV_SEED, &v)?);
        }
        if let Some(v) = get(ENV_ASSETS).filter(|v| !v.is_empty()) {
            self.assets_dir = Some(PathBuf::from(v));
        }
        if let Some(v) = get(ENV_LOG).filter(|v| !v.is_empty()) {
            self.log_file = Some(PathBuf::from(v));
        }
        Ok(())
    }

    /// Apply command-line flags and validate the result.
    pub fn apply_args(mut self, args: &[String]) -> Result<CliCommand> {
        let mut i = 0usize;
        while i < args.len() {
            let flag = args[i].as_str();
            match flag {
                "-h" | "--help" => return Ok(CliCommand::Help),
                "--timed" => self.pause = MismatchPause::Timed,
                "--size" | "--seed" | "--delay-ms" | "--fps" | "--assets" | "--log" => {
                    i += 1;
                    let v = args
                        .get(i)
                        .ok_or_else(|| anyhow!("missing value for {}", flag))?;
                    match flag {
                        "--size" => self.board_size = parse_num(flag, v)?,
                        "--seed" => self.seed = Some(parse_num(flag, v)?),
                        "--delay-ms" => self.mismatch_delay_ms = parse_num(flag, v)?,
                        "--fps" => self.fps = parse_num(flag, v)?,
                        "--assets" => self.assets_dir = Some(PathBuf::from(v)),
                        _ => self.log_file = Some(PathBuf::from(v)),
                    }
                }
                other => bail!("unknown argument: {}", other),
            }
            i += 1;
        }

        self.validate()?;
        Ok(CliCommand::Play(self))
    }

    pub fn validate(&self) -> Result<()> {
        if self.board_size < MIN_BOARD_SIZE || self.board_size > MAX_BOARD_SIZE {
            bail!(
                "board size must be between {} and {}, got {}",
                MIN_BOARD_SIZE,
                MAX_BOARD_SIZE,
                self.board_size
            );
        }
        if self.board_size % 2 != 0 {
            bail!(
                "board size must be even so every tile has a partner, got {}",
                self.board_size
            );
        }
        if self.fps == 0 || self.fps > 240 {
            bail!("fps must be between 1 and 240, got {}", self.fps);
        }
        Ok(())
    }

    pub fn pair_count(&self) -> usize {
        (self.board_size as usize * self.board_size as usize) / 2
    }

    pub fn session(&self) -> SessionConfig {
        SessionConfig {
            board_size: self.board_size,
            mismatch_delay_ms: self.mismatch_delay_ms,
        }
    }

    /// The configured seed, or one derived from the current time.
    pub fn resolved_seed(&self) -> u32 {
        self.seed.unwrap_or_else(|| {
            let nanos = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.subsec_nanos() ^ (d.as_secs() as u32))
                .unwrap_or(1);
            nanos ^ std::process::id().rotate_left(16)
        })
    }

    /// Load the tile images this configuration asks for.
    pub fn load_assets(&self) -> Result<AssetSet> {
        let assets = match &self.assets_dir {
            Some(dir) => AssetSet::load_dir(dir, self.pair_count())?,
            None => AssetSet::builtin(self.pair_count())?,
        };
        Ok(assets)
    }
}

fn parse_num<T: std::str::FromStr>(name: &str, v: &str) -> Result<T> {
    v.parse::<T>()
        .map_err(|_| anyhow!("invalid value for {}: {}", name, v))
}
