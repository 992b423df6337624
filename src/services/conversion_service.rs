use crate::config::Config;
use crate::error::Result;
use crate::models::{AudioSettings, ConversionReport, OutputPaths, PreviewSettings};
use crate::services::ffmpeg::FfmpegCommand;
use crate::services::runner::{DryRunRunner, FfmpegRunner, ToolRunner};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tracing::{debug, info};

pub type ProgressCallback = Arc<dyn Fn(String, i32) + Send + Sync>;

/// Everything needed to convert one input, built before anything runs.
#[derive(Debug, Clone)]
pub struct ConversionPlan {
    pub input: PathBuf,
    pub paths: OutputPaths,
    pub audio: FfmpegCommand,
    pub palette: FfmpegCommand,
    pub image: FfmpegCommand,
}

impl ConversionPlan {
    /// The invocations in execution order.
    pub fn commands(&self) -> [&FfmpegCommand; 3] {
        [&self.audio, &self.palette, &self.image]
    }
}

#[derive(Clone)]
pub struct ConversionService {
    config: Arc<Config>,
    runner: Arc<dyn ToolRunner>,
    audio: AudioSettings,
    preview: PreviewSettings,
    dry_run: bool,
}

impl ConversionService {
    pub fn new(config: Arc<Config>) -> Self {
        Self::with_runner(config, Arc::new(FfmpegRunner))
    }

    /// Runs nothing and leaves the filesystem alone. `echo` prints each command line.
    pub fn dry_run(config: Arc<Config>, echo: bool) -> Self {
        Self {
            dry_run: true,
            ..Self::with_runner(config, Arc::new(DryRunRunner { echo }))
        }
    }

    pub fn with_runner(config: Arc<Config>, runner: Arc<dyn ToolRunner>) -> Self {
        Self {
            config,
            runner,
            audio: AudioSettings::default(),
            preview: PreviewSettings::default(),
            dry_run: false,
        }
    }

    pub fn plan(&self, input: &Path) -> Result<ConversionPlan> {
        let paths = OutputPaths::derive(&self.config.output_dir, input)?;
        debug!("Base name for {:?} is {:?}", input, paths.base_name);
        let program = self.config.ffmpeg_bin.as_str();

        Ok(ConversionPlan {
            input: input.to_path_buf(),
            audio: FfmpegCommand::audio_extraction(program, input, &paths.audio, &self.audio),
            palette: FfmpegCommand::palette_generation(
                program,
                input,
                &paths.palette,
                &self.preview,
            ),
            image: FfmpegCommand::image_encoding(
                program,
                input,
                &paths.palette,
                &paths.image,
                &self.preview,
            ),
            paths,
        })
    }

    pub async fn convert(&self, input: &Path) -> Result<ConversionReport> {
        let plan = self.plan(input)?;
        self.execute(&plan, None).await
    }

    /// Runs the three invocations in order, stopping at the first failure.
    ///
    /// On failure, outputs already written and the palette are left in place.
    pub async fn execute(
        &self,
        plan: &ConversionPlan,
        progress_cb: Option<ProgressCallback>,
    ) -> Result<ConversionReport> {
        let send_progress = |step: String, progress: i32| {
            if let Some(cb) = &progress_cb {
                cb(step, progress);
            }
        };

        send_progress("Checking FFmpeg".to_string(), 5);
        self.runner.check_available(&self.config.ffmpeg_bin).await?;

        if !self.dry_run {
            fs::create_dir_all(&self.config.output_dir).await?;
        }

        send_progress("Extracting audio to MP3".to_string(), 10);
        self.runner.run(&plan.audio).await?;
        send_progress("MP3 created".to_string(), 40);

        send_progress(
            format!(
                "Generating palette from the first {} seconds",
                self.preview.palette_window_secs
            ),
            45,
        );
        self.runner.run(&plan.palette).await?;

        send_progress(
            format!(
                "Encoding {}x{} GIF",
                self.preview.size, self.preview.size
            ),
            70,
        );
        self.runner.run(&plan.image).await?;

        let palette_removed = if self.dry_run {
            false
        } else {
            remove_palette(&plan.paths.palette).await
        };
        send_progress("GIF created".to_string(), 95);

        send_progress("Complete".to_string(), 100);
        info!("Successfully converted {:?}", plan.input);

        Ok(ConversionReport {
            input: plan.input.clone(),
            audio: plan.paths.audio.clone(),
            image: plan.paths.image.clone(),
            palette_removed,
            dry_run: self.dry_run,
            commands: plan
                .commands()
                .iter()
                .map(|command| command.command_line())
                .collect(),
        })
    }
}

// Best effort; a palette that can't be removed is not an error.
async fn remove_palette(path: &Path) -> bool {
    match fs::remove_file(path).await {
        Ok(()) => {
            debug!("Removed palette {:?}", path);
            true
        }
        Err(e) => {
            debug!("Could not remove palette {:?}: {}", path, e);
            false
        }
    }
}
