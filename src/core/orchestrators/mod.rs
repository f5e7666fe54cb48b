mod fallback_recovery;
mod invocation_protocol;
mod ocr_pipeline;
mod resource_acquisition;
mod result_normalization;


pub use ocr_pipeline::OcrPipeline;
pub use resource_acquisition::ResourceAcquisition;
