mod inference_capability;
mod model_loader;

pub use inference_capability::{
    ImageArgument, InferCall, InferenceCapability, InvokeError, ModelHandle,
};
pub use model_loader::{LoadOptions, LoadedModel, ModelLoader};
