use std::env;
use std::path::PathBuf;

pub const DEFAULT_OUTPUT_DIR: &str = "core";
pub const DEFAULT_FFMPEG_BIN: &str = "ffmpeg";
pub const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Debug, Clone)]
pub struct Config {
    pub output_dir: PathBuf,
    pub ffmpeg_bin: String,
    pub log_level: String,
}

impl Config {
    pub fn load() -> Result<Self, String> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup, so tests don't have to touch the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let output_dir = match lookup("CONVERT_OUTPUT_DIR") {
            Some(dir) if dir.is_empty() => {
                return Err("CONVERT_OUTPUT_DIR environment variable is empty".to_string())
            }
            Some(dir) => PathBuf::from(dir),
            None => PathBuf::from(DEFAULT_OUTPUT_DIR),
        };
        let ffmpeg_bin = match lookup("FFMPEG_BIN") {
            Some(bin) if bin.is_empty() => {
                return Err("FFMPEG_BIN environment variable is empty".to_string())
            }
            Some(bin) => bin,
            None => DEFAULT_FFMPEG_BIN.to_string(),
        };
        let log_level = lookup("LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

        Ok(Config {
            output_dir,
            ffmpeg_bin,
            log_level,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            ffmpeg_bin: DEFAULT_FFMPEG_BIN.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}
