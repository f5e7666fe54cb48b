use crate::core::models::Device;

/// Probes must answer without failing; "not available" is a normal answer.
pub trait AcceleratorProbe {
    fn accelerated_device(&self) -> Option<Device>;

    fn flash_attention_available(&self) -> bool;
}
