use std::path::{Path, PathBuf};

use crate::core::models::{Device, Precision, RawResult, SizingProfile, Tokenizer};

/// The image argument under one of the parameter names a model may expect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageArgument {
    Images(Vec<PathBuf>),
    Image(PathBuf),
    ImageFile(PathBuf),
}

impl ImageArgument {
    pub fn parameter_name(&self) -> &'static str {
        match self {
            ImageArgument::Images(_) => "images",
            ImageArgument::Image(_) => "image",
            ImageArgument::ImageFile(_) => "image_file",
        }
    }
}

#[derive(Debug, Clone)]
pub struct InferCall<'a> {
    pub tokenizer: &'a Tokenizer,
    pub prompt: &'a str,
    pub image: ImageArgument,
    pub output_path: &'a Path,
    pub sizing: SizingProfile,
    pub save_results: bool,
    pub test_compress: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum InvokeError {
    #[error("infer() got an unexpected keyword argument '{parameter}'")]
    SignatureMismatch { parameter: &'static str },
    #[error(transparent)]
    Runtime(#[from] anyhow::Error),
}

pub trait InferenceCapability {
    fn infer(&self, call: &InferCall<'_>) -> Result<RawResult, InvokeError>;
}

/// A loaded model that can run inference and be placed on a device.
pub trait ModelHandle: InferenceCapability {
    fn supports_device(&self, device: Device) -> bool;

    fn place(&mut self, device: Device, precision: Precision) -> anyhow::Result<()>;

    fn as_inference(&self) -> &dyn InferenceCapability;
}
