use crate::error::PathError;
use crate::models::{OutputPaths, AUDIO_EXTENSION, IMAGE_EXTENSION, PALETTE_SUFFIX};
use std::path::Path;

/// Longest file name most filesystems accept, in bytes.
pub const MAX_FILE_NAME_LEN: usize = 255;

/// Returns the last component of the path, with any directory prefix removed.
pub fn file_name(input: &Path) -> Result<&str, PathError> {
    let name = input
        .file_name()
        .ok_or_else(|| PathError::NoFileName(input.to_path_buf()))?;
    name.to_str()
        .ok_or_else(|| PathError::NotUtf8(input.to_path_buf()))
}

/// Strips the last `.`-delimited extension from a file name.
///
/// A leading dot is part of the name, not a separator, so `.mp4` stays `.mp4`.
pub fn base_name(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(0) | None => file_name,
        Some(dot) => &file_name[..dot],
    }
}

impl OutputPaths {
    /// Derives the sibling output paths for `input` under `output_dir`.
    pub fn derive(output_dir: &Path, input: &Path) -> Result<Self, PathError> {
        let base = base_name(file_name(input)?);

        // The palette name is the longest one we derive.
        let palette_name = format!("{}{}", base, PALETTE_SUFFIX);
        if palette_name.len() > MAX_FILE_NAME_LEN {
            return Err(PathError::NameTooLong {
                name: palette_name,
                max: MAX_FILE_NAME_LEN,
            });
        }

        Ok(OutputPaths {
            base_name: base.to_string(),
            audio: output_dir.join(format!("{}.{}", base, AUDIO_EXTENSION)),
            image: output_dir.join(format!("{}.{}", base, IMAGE_EXTENSION)),
            palette: output_dir.join(palette_name),
        })
    }
}
