use std::path::Path;
use std::time::Instant;

use crate::core::interfaces::adapters::{ImageArgument, InferCall, InferenceCapability, InvokeError};
use crate::core::models::{OcrMode, RawResult, SizingProfile, Tokenizer};
use crate::global_constants::{LOG_TAG_INVOKE, OCR_PROMPT};

pub struct CallingConvention {
    pub parameter_name: &'static str,
    bind_image: fn(&Path) -> ImageArgument,
}

impl CallingConvention {
    pub fn bind(&self, image_path: &Path) -> ImageArgument {
        (self.bind_image)(image_path)
    }
}

fn bind_as_image_list(path: &Path) -> ImageArgument {
    ImageArgument::Images(vec![path.to_path_buf()])
}

fn bind_as_single_image(path: &Path) -> ImageArgument {
    ImageArgument::Image(path.to_path_buf())
}

fn bind_as_image_file(path: &Path) -> ImageArgument {
    ImageArgument::ImageFile(path.to_path_buf())
}

pub const CALLING_CONVENTIONS: [CallingConvention; 3] = [
    CallingConvention {
        parameter_name: "images",
        bind_image: bind_as_image_list,
    },
    CallingConvention {
        parameter_name: "image",
        bind_image: bind_as_single_image,
    },
    CallingConvention {
        parameter_name: "image_file",
        bind_image: bind_as_image_file,
    },
];

pub struct InvocationContext<'a> {
    pub tokenizer: &'a Tokenizer,
    pub image_path: &'a Path,
    pub mode: OcrMode,
    pub sizing: SizingProfile,
    pub scratch_dir: &'a Path,
}

impl InvocationContext<'_> {
    fn call_for(&self, image: ImageArgument) -> InferCall<'_> {
        InferCall {
            tokenizer: self.tokenizer,
            prompt: OCR_PROMPT,
            image,
            output_path: self.scratch_dir,
            sizing: self.sizing,
            save_results: true,
            test_compress: false,
        }
    }
}

/// Tries each calling convention until one is not a signature mismatch.
/// Runtime failures and exhausted conventions both come back as `RawResult::Absent`.
pub fn invoke_with_probing(
    model: &dyn InferenceCapability,
    context: &InvocationContext<'_>,
) -> RawResult {
    for convention in CALLING_CONVENTIONS.iter() {
        let call = context.call_for(convention.bind(context.image_path));
        let started_at = Instant::now();

        match model.infer(&call) {
            Ok(raw) => {
                log::info!(
                    "[time] infer={}ms mode={} image='{}'",
                    started_at.elapsed().as_millis(),
                    context.mode,
                    context.image_path.display()
                );
                return raw;
            }
            Err(InvokeError::SignatureMismatch { parameter }) => {
                log::debug!(
                    "[infer-arg-mismatch] tried {}: parameter '{}' not accepted",
                    convention.parameter_name,
                    parameter
                );
                continue;
            }
            Err(InvokeError::Runtime(error)) => {
                log::debug!("[infer-exception] {:#}", error);
                return RawResult::Absent;
            }
        }
    }

    log::debug!(
        "{} no calling convention was accepted by the model",
        LOG_TAG_INVOKE
    );
    RawResult::Absent
}
