pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

pub use config::Config;
pub use error::{ConvertError, PathError};
pub use services::{ConversionService, ToolRunner};
