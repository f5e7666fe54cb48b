mod accelerator_probe;

pub use accelerator_probe::AcceleratorProbe;
