use std::path::PathBuf;

/// Failures that end the request. The caller only ever sees an empty line for these.
#[derive(Debug, thiserror::Error)]
pub enum AdapterError {
    #[error("invalid command line: {0}")]
    InvalidArguments(String),
    #[error("image path {path:?} cannot be resolved: {source}")]
    InvalidImagePath {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("image {path:?} could not be decoded: {source}")]
    ImageUnreadable {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("model load failed: {0:#}")]
    ModelLoad(anyhow::Error),
    #[error("model {identifier} exposes no inference capability after trying {attempts} loaders")]
    MissingInferenceCapability { identifier: String, attempts: usize },
    #[error("model placement on {device} failed: {cause:#}")]
    Placement {
        device: super::Device,
        cause: anyhow::Error,
    },
    #[error("scratch directory could not be created: {0}")]
    ScratchDirectory(std::io::Error),
    #[error("pipeline panicked: {0}")]
    Panicked(String),
}
