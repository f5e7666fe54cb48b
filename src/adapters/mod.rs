pub(crate) mod ocrs_inference_model;
mod ocrs_model_loader;
mod system_accelerator_probe;

pub use ocrs_inference_model::OcrsInferenceModel;
pub use ocrs_model_loader::{HubOcrsModelLoader, LocalOcrsModelLoader};
pub use system_accelerator_probe::SystemAcceleratorProbe;
