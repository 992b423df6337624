use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Frame rate of the GIF preview.
pub const PREVIEW_FPS: u32 = 10;
/// Side of the square GIF preview, in pixels.
pub const PREVIEW_SIZE: u32 = 250;
/// Seconds of input sampled when building the palette.
pub const PALETTE_WINDOW_SECS: u32 = 10;
/// Seconds of input encoded into the GIF. Wider than the palette window.
pub const ENCODE_WINDOW_SECS: u32 = 30;

pub const AUDIO_CODEC: &str = "libmp3lame";
pub const AUDIO_QUALITY: u8 = 2;

pub const AUDIO_EXTENSION: &str = "mp3";
pub const IMAGE_EXTENSION: &str = "gif";
pub const PALETTE_SUFFIX: &str = "_palette.png";

/// Files produced (or transiently used) for one input video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub base_name: String,
    pub audio: PathBuf,
    pub image: PathBuf,
    pub palette: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioSettings {
    pub codec: String,
    pub quality: u8,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            codec: AUDIO_CODEC.to_string(),
            quality: AUDIO_QUALITY,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewSettings {
    pub fps: u32,
    pub size: u32,
    pub palette_window_secs: u32,
    pub encode_window_secs: u32,
}

impl Default for PreviewSettings {
    fn default() -> Self {
        Self {
            fps: PREVIEW_FPS,
            size: PREVIEW_SIZE,
            palette_window_secs: PALETTE_WINDOW_SECS,
            encode_window_secs: ENCODE_WINDOW_SECS,
        }
    }
}

impl PreviewSettings {
    /// Resample, scale to cover the square, then center-crop to it.
    pub fn scale_crop_chain(&self) -> String {
        format!(
            "fps={fps},scale={s}:{s}:force_original_aspect_ratio=increase,crop={s}:{s}",
            fps = self.fps,
            s = self.size
        )
    }

    pub fn palette_filter(&self) -> String {
        format!("{},palettegen", self.scale_crop_chain())
    }

    pub fn encode_filter(&self) -> String {
        format!("{}[x];[x][1:v]paletteuse", self.scale_crop_chain())
    }
}

/// The three external invocations, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    AudioExtraction,
    PaletteGeneration,
    ImageEncoding,
}

impl Step {
    pub fn failure_message(&self) -> &'static str {
        match self {
            Step::AudioExtraction => "audio conversion failed",
            Step::PaletteGeneration => "palette creation failed",
            Step::ImageEncoding => "GIF creation failed",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Step::AudioExtraction => "audio extraction",
            Step::PaletteGeneration => "palette generation",
            Step::ImageEncoding => "GIF encoding",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ConversionReport {
    pub input: PathBuf,
    pub audio: PathBuf,
    pub image: PathBuf,
    #[serde(rename = "paletteRemoved")]
    pub palette_removed: bool,
    #[serde(rename = "dryRun")]
    pub dry_run: bool,
    /// Rendered command lines, in execution order.
    pub commands: Vec<String>,
}
