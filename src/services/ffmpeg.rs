use crate::models::{AudioSettings, PreviewSettings, Step};
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

/// One fully-specified FFmpeg invocation.
///
/// Arguments are kept as a vector and handed to the child process directly,
/// so nothing here ever goes through a shell. [`FfmpegCommand::command_line`]
/// renders a shell-quoted form for logs and dry runs only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FfmpegCommand {
    step: Step,
    program: String,
    args: Vec<OsString>,
    output: PathBuf,
}

impl FfmpegCommand {
    fn new(step: Step, program: &str, output: &Path) -> Self {
        Self {
            step,
            program: program.to_string(),
            args: Vec::new(),
            output: output.to_path_buf(),
        }
    }

    fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    /// `ffmpeg -i <input> -vn -acodec <codec> -q:a <quality> <output> -y`
    pub fn audio_extraction(
        program: &str,
        input: &Path,
        output: &Path,
        audio: &AudioSettings,
    ) -> Self {
        Self::new(Step::AudioExtraction, program, output)
            .arg("-i")
            .arg(input)
            .arg("-vn")
            .arg("-acodec")
            .arg(&audio.codec)
            .arg("-q:a")
            .arg(audio.quality.to_string())
            .arg(output)
            .arg("-y")
    }

    /// `ffmpeg -i <input> -t <palette window> -vf "<scale/crop>,palettegen" <palette> -y`
    pub fn palette_generation(
        program: &str,
        input: &Path,
        palette: &Path,
        preview: &PreviewSettings,
    ) -> Self {
        Self::new(Step::PaletteGeneration, program, palette)
            .arg("-i")
            .arg(input)
            .arg("-t")
            .arg(preview.palette_window_secs.to_string())
            .arg("-vf")
            .arg(preview.palette_filter())
            .arg(palette)
            .arg("-y")
    }

    /// `ffmpeg -i <input> -i <palette> -t <encode window> -lavfi "<scale/crop>[x];[x][1:v]paletteuse" <output> -y`
    pub fn image_encoding(
        program: &str,
        input: &Path,
        palette: &Path,
        output: &Path,
        preview: &PreviewSettings,
    ) -> Self {
        Self::new(Step::ImageEncoding, program, output)
            .arg("-i")
            .arg(input)
            .arg("-i")
            .arg(palette)
            .arg("-t")
            .arg(preview.encode_window_secs.to_string())
            .arg("-lavfi")
            .arg(preview.encode_filter())
            .arg(output)
            .arg("-y")
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    /// The file this invocation writes.
    pub fn output(&self) -> &Path {
        &self.output
    }

    pub fn command_line(&self) -> String {
        std::iter::once(shell_quote(OsStr::new(&self.program)))
            .chain(self.args.iter().map(|arg| shell_quote(arg)))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn to_command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        command
    }
}

fn is_shell_safe(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '/' | ':' | '=' | ',' | '+' | '@' | '%')
}

/// POSIX single-quote rendering; arguments made only of safe characters stay bare.
pub fn shell_quote(arg: &OsStr) -> String {
    let arg = arg.to_string_lossy();
    if !arg.is_empty() && arg.chars().all(is_shell_safe) {
        return arg.into_owned();
    }
    format!("'{}'", arg.replace('\'', r"'\''"))
}
