pub mod conversion_service;
pub mod ffmpeg;
pub mod runner;

pub use conversion_service::{ConversionPlan, ConversionService, ProgressCallback};
pub use ffmpeg::FfmpegCommand;
pub use runner::{DryRunRunner, FfmpegRunner, ToolRunner};
