use std::path::PathBuf;

use clap::Parser;

use crate::core::models::{AdapterError, InferenceRequest, OcrMode};
use crate::global_constants::DEFAULT_MAX_CHARS;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Image to recognize
    #[arg(long)]
    image: PathBuf,

    #[arg(long, value_enum, default_value_t = OcrMode::Small)]
    mode: OcrMode,

    /// Overrides both base and image size of the selected mode
    #[arg(long, allow_negative_numbers = true)]
    size: Option<i64>,

    #[arg(long = "max-chars", default_value_t = DEFAULT_MAX_CHARS)]
    max_chars: usize,
}

impl CliArgs {
    pub fn into_request(self) -> Result<InferenceRequest, AdapterError> {
        InferenceRequest::build(&self.image, self.mode, self.size, self.max_chars)
    }
}
