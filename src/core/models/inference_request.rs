use std::fmt;
use std::path::{Path, PathBuf};

use clap::ValueEnum;

use super::AdapterError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OcrMode {
    Tiny,
    #[default]
    Small,
    Base,
    Large,
    Gundam,
}

impl fmt::Display for OcrMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OcrMode::Tiny => write!(f, "tiny"),
            OcrMode::Small => write!(f, "small"),
            OcrMode::Base => write!(f, "base"),
            OcrMode::Large => write!(f, "large"),
            OcrMode::Gundam => write!(f, "gundam"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferenceRequest {
    image_path: PathBuf,
    mode: OcrMode,
    explicit_size: Option<u32>,
    max_chars: usize,
}

impl InferenceRequest {
    pub fn build(
        image_path: &Path,
        mode: OcrMode,
        requested_size: Option<i64>,
        max_chars: usize,
    ) -> Result<Self, AdapterError> {
        let absolute_image_path =
            std::path::absolute(image_path).map_err(|source| AdapterError::InvalidImagePath {
                path: image_path.to_path_buf(),
                source,
            })?;

        Ok(Self {
            image_path: absolute_image_path,
            mode,
            explicit_size: Self::positive_size(requested_size),
            max_chars,
        })
    }

    fn positive_size(requested_size: Option<i64>) -> Option<u32> {
        requested_size
            .filter(|size| *size > 0)
            .and_then(|size| u32::try_from(size).ok())
    }

    pub fn image_path(&self) -> &Path {
        &self.image_path
    }

    pub fn mode(&self) -> OcrMode {
        self.mode
    }

    pub fn explicit_size(&self) -> Option<u32> {
        self.explicit_size
    }

    pub fn max_chars(&self) -> usize {
        self.max_chars
    }
}
