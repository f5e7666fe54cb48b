use std::path::{Path, PathBuf};

use super::fallback_recovery::recover_text_from_artifacts;
use super::invocation_protocol::{invoke_with_probing, InvocationContext};
use super::resource_acquisition::ResourceAcquisition;
use super::result_normalization::normalize_raw_result;
use crate::core::models::{AdapterError, InferenceRequest, SizingProfile};
use crate::global_constants::{LOG_TAG_PIPELINE, SCRATCH_DIRECTORY_PREFIX};

pub struct OcrPipeline<'a> {
    resource_acquisition: ResourceAcquisition<'a>,
    model_identifier: &'a str,
}

impl<'a> OcrPipeline<'a> {
    pub fn new(resource_acquisition: ResourceAcquisition<'a>, model_identifier: &'a str) -> Self {
        Self {
            resource_acquisition,
            model_identifier,
        }
    }

    /// Runs all four stages for one request. An empty string is a valid outcome;
    /// `Err` is reserved for failures that leave nothing to recover from.
    pub fn run(&self, request: &InferenceRequest) -> Result<String, AdapterError> {
        verify_image_readable(request.image_path())?;

        let resources = self.resource_acquisition.acquire(self.model_identifier)?;
        log::debug!("{} acquired {:?}", LOG_TAG_PIPELINE, resources);

        let sizing = SizingProfile::resolve(request.mode(), request.explicit_size());
        log::debug!("{} resolved sizing {:?}", LOG_TAG_PIPELINE, sizing);

        let scratch_dir = create_scratch_directory()?;

        let context = InvocationContext {
            tokenizer: &resources.tokenizer,
            image_path: request.image_path(),
            mode: request.mode(),
            sizing,
            scratch_dir: &scratch_dir,
        };
        let raw = invoke_with_probing(resources.model.as_inference(), &context);

        let mut text = normalize_raw_result(&raw);
        if text.is_empty() {
            text = recover_text_from_artifacts(&scratch_dir);
        }

        if text.is_empty() {
            log::debug!("[res-type] {}", raw.variant_name());
            log::debug!("[tmp-dir] {}", scratch_dir.display());
        }

        Ok(text)
    }
}

fn verify_image_readable(image_path: &Path) -> Result<(), AdapterError> {
    image::open(image_path)
        .map(|image| {
            log::debug!(
                "{} image {:?} decoded at {}x{}",
                LOG_TAG_PIPELINE,
                image_path,
                image.width(),
                image.height()
            );
        })
        .map_err(|source| AdapterError::ImageUnreadable {
            path: image_path.to_path_buf(),
            source,
        })
}

/// Never removed by this process.
fn create_scratch_directory() -> Result<PathBuf, AdapterError> {
    tempfile::Builder::new()
        .prefix(SCRATCH_DIRECTORY_PREFIX)
        .tempdir()
        .map(|dir| dir.keep())
        .map_err(AdapterError::ScratchDirectory)
}
