mod adapter_error;
mod adapter_settings;
mod inference_request;
mod raw_result;
mod runtime_placement;
mod sizing_profile;
mod tokenizer;

pub use adapter_error::AdapterError;
pub use adapter_settings::AdapterSettings;
pub use inference_request::{InferenceRequest, OcrMode};
pub use raw_result::RawResult;
pub use runtime_placement::{AttentionBackend, Device, Precision};
pub use sizing_profile::SizingProfile;
pub use tokenizer::Tokenizer;
