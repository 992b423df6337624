use crate::error::{ConvertError, Result};
use crate::services::ffmpeg::FfmpegCommand;
use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, error, info};

/// Executes media tool invocations on behalf of the pipeline.
#[async_trait]
pub trait ToolRunner: Send + Sync {
    /// Fails with [`ConvertError::ToolUnavailable`] if `program` can't be started.
    async fn check_available(&self, program: &str) -> Result<()>;

    /// Runs one invocation to completion; any nonzero exit is an error.
    async fn run(&self, command: &FfmpegCommand) -> Result<()>;
}

/// Spawns the real FFmpeg binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct FfmpegRunner;

#[async_trait]
impl ToolRunner for FfmpegRunner {
    async fn check_available(&self, program: &str) -> Result<()> {
        Command::new(program)
            .arg("-version")
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|source| ConvertError::ToolUnavailable {
                program: program.to_string(),
                source,
            })?;
        Ok(())
    }

    async fn run(&self, command: &FfmpegCommand) -> Result<()> {
        let step = command.step();
        info!(%step, "Running: {}", command.command_line());

        let output = command
            .to_command()
            .output()
            .await
            .map_err(|source| ConvertError::Spawn { step, source })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            error!(%step, program = command.program(), "FFmpeg error: {}", stderr);
            return Err(ConvertError::ToolFailed {
                step,
                code: output.status.code(),
                stderr,
            });
        }

        debug!(%step, "Created {:?}", command.output());
        Ok(())
    }
}

/// Runs nothing. With `echo` set, prints each command line to stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct DryRunRunner {
    pub echo: bool,
}

#[async_trait]
impl ToolRunner for DryRunRunner {
    async fn check_available(&self, _program: &str) -> Result<()> {
        Ok(())
    }

    async fn run(&self, command: &FfmpegCommand) -> Result<()> {
        if self.echo {
            println!("{}", command.command_line());
        } else {
            debug!(step = %command.step(), "Skipping: {}", command.command_line());
        }
        Ok(())
    }
}
