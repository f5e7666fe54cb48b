use std::path::Path;

use crate::core::interfaces::ports::AcceleratorProbe;
use crate::core::models::Device;

const NVIDIA_DRIVER_VERSION_PATH: &str = "/proc/driver/nvidia/version";
const CUDA_VISIBLE_DEVICES: &str = "CUDA_VISIBLE_DEVICES";

pub struct SystemAcceleratorProbe;

impl SystemAcceleratorProbe {
    fn cuda_device_from(visible_devices: Option<&str>, driver_present: bool) -> Option<Device> {
        if !driver_present {
            return None;
        }

        match visible_devices.map(|value| value.split(',').next().unwrap_or("").trim()) {
            None => Some(Device::Cuda(0)),
            Some(first) if first.is_empty() || first.starts_with('-') => None,
            Some(first) if first.eq_ignore_ascii_case("NoDevFiles") => None,
            Some(_) => Some(Device::Cuda(0)),
        }
    }
}

impl AcceleratorProbe for SystemAcceleratorProbe {
    fn accelerated_device(&self) -> Option<Device> {
        let driver_present =
            cfg!(target_os = "linux") && Path::new(NVIDIA_DRIVER_VERSION_PATH).exists();
        let visible_devices = std::env::var(CUDA_VISIBLE_DEVICES).ok();

        let device = Self::cuda_device_from(visible_devices.as_deref(), driver_present);
        log::debug!(
            "[ACCELERATOR] driver_present={} visible={:?} -> {:?}",
            driver_present,
            visible_devices,
            device
        );
        device
    }

    fn flash_attention_available(&self) -> bool {
        cfg!(feature = "flash-attn")
    }
}
