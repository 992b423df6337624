use anyhow::{anyhow, Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use video_convert::models::ConversionReport;
use video_convert::services::ProgressCallback;
use video_convert::{Config, ConversionService, ConvertError};

#[derive(Parser)]
#[command(name = "convert")]
#[command(about = "Extract MP3 audio and a 250x250 GIF preview from a video")]
#[command(version)]
struct Cli {
    /// Video file to convert
    #[arg(allow_hyphen_values = true)]
    input: PathBuf,

    /// Directory that receives the outputs [env: CONVERT_OUTPUT_DIR, default: core]
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// FFmpeg executable to run [env: FFMPEG_BIN, default: ffmpeg]
    #[arg(long, value_name = "BIN")]
    ffmpeg: Option<String>,

    /// Print the FFmpeg command lines without running them
    #[arg(long)]
    dry_run: bool,

    /// Print the final report as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Usage errors exit 1, help and version exit 0.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            return ExitCode::from(code);
        }
    };

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let convert_error = e.downcast_ref::<ConvertError>();
            match convert_error.and_then(ConvertError::step) {
                Some(step) => eprintln!("Error during {}: {:#}", step, e),
                None => eprintln!("Error: {:#}", e),
            }
            let code = convert_error.map(ConvertError::exit_code).unwrap_or(1);
            ExitCode::from(code)
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load()
        .map_err(|e| anyhow!(e))
        .context("Failed to load config")?;
    let config = Config {
        output_dir: cli.output_dir.unwrap_or(config.output_dir),
        ffmpeg_bin: cli.ffmpeg.unwrap_or(config.ffmpeg_bin),
        ..config
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Arc::new(config);
    let service = if cli.dry_run {
        // Keep stdout pure JSON when a report is requested.
        ConversionService::dry_run(config, !cli.json)
    } else {
        ConversionService::new(config)
    };

    let plan = service.plan(&cli.input)?;

    let progress_cb: Option<ProgressCallback> = if cli.json {
        None
    } else {
        println!("Input: {}", plan.input.display());
        println!("MP3 output: {}", plan.paths.audio.display());
        println!("GIF output: {}", plan.paths.image.display());
        let print_step: ProgressCallback = Arc::new(|step: String, progress: i32| {
            println!("[{:>3}%] {}", progress, step);
        });
        Some(print_step)
    };

    let report = service.execute(&plan, progress_cb).await?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&report);
    }

    Ok(())
}

fn print_summary(report: &ConversionReport) {
    println!();
    println!("Conversion complete!");
    println!("   MP3: {}", report.audio.display());
    println!("   GIF: {}", report.image.display());
}
