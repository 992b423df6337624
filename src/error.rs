use crate::models::Step;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PathError {
    #[error("input path {0:?} has no file name")]
    NoFileName(PathBuf),
    #[error("input path {0:?} is not valid UTF-8")]
    NotUtf8(PathBuf),
    #[error("derived file name {name:?} is longer than {max} bytes")]
    NameTooLong { name: String, max: usize },
}

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] PathError),

    #[error("{program} is required but could not be started")]
    ToolUnavailable {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: could not start the media tool", .step.failure_message())]
    Spawn {
        step: Step,
        #[source]
        source: std::io::Error,
    },

    #[error("{}{}", .step.failure_message(), exit_suffix(.code))]
    ToolFailed {
        step: Step,
        code: Option<i32>,
        stderr: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConvertError {
    /// Every failure maps to the same status; the message carries the detail.
    pub fn exit_code(&self) -> u8 {
        1
    }

    /// The step that failed, if the failure came from an external invocation.
    pub fn step(&self) -> Option<Step> {
        match self {
            ConvertError::Spawn { step, .. } | ConvertError::ToolFailed { step, .. } => Some(*step),
            _ => None,
        }
    }
}

fn exit_suffix(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!(" (exit status {})", code),
        None => " (terminated by signal)".to_string(),
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;
