use std::time::{Duration, Instant};

use crate::core::interfaces::adapters::{LoadOptions, LoadedModel, ModelHandle, ModelLoader};
use crate::core::interfaces::ports::AcceleratorProbe;
use crate::core::models::{AdapterError, AttentionBackend, Device, Precision, Tokenizer};
use crate::global_constants::LOG_TAG_RESOURCES;

pub struct AcquiredResources {
    pub model: Box<dyn ModelHandle>,
    pub tokenizer: Tokenizer,
    pub device: Device,
    pub precision: Precision,
    pub attention: AttentionBackend,
    pub load_elapsed: Duration,
}

impl std::fmt::Debug for AcquiredResources {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AcquiredResources")
            .field("tokenizer", &self.tokenizer)
            .field("device", &self.device)
            .field("precision", &self.precision)
            .field("attention", &self.attention)
            .field("load_elapsed", &self.load_elapsed)
            .finish()
    }
}

pub struct ResourceAcquisition<'a> {
    primary_loader: &'a dyn ModelLoader,
    alternate_loader: &'a dyn ModelLoader,
    accelerator_probe: &'a dyn AcceleratorProbe,
}

impl<'a> ResourceAcquisition<'a> {
    pub fn new(
        primary_loader: &'a dyn ModelLoader,
        alternate_loader: &'a dyn ModelLoader,
        accelerator_probe: &'a dyn AcceleratorProbe,
    ) -> Self {
        Self {
            primary_loader,
            alternate_loader,
            accelerator_probe,
        }
    }

    pub fn acquire(&self, model_identifier: &str) -> Result<AcquiredResources, AdapterError> {
        let attention = self.select_attention_backend();
        let started_at = Instant::now();

        let tokenizer = self
            .primary_loader
            .load_tokenizer(model_identifier)
            .map_err(AdapterError::ModelLoad)?;

        let options = LoadOptions {
            model_identifier,
            attention,
            tokenizer: &tokenizer,
        };
        let mut model = self.load_inferable_model(&options)?;

        let (device, precision) = self.select_device(model.as_ref());
        model
            .place(device, precision)
            .map_err(|cause| AdapterError::Placement { device, cause })?;

        let load_elapsed = started_at.elapsed();
        log::info!(
            "[time] load={}ms device={} attn={}",
            load_elapsed.as_millis(),
            device,
            attention
        );

        Ok(AcquiredResources {
            model,
            tokenizer,
            device,
            precision,
            attention,
            load_elapsed,
        })
    }

    fn select_attention_backend(&self) -> AttentionBackend {
        if self.accelerator_probe.flash_attention_available() {
            AttentionBackend::FlashAttention2
        } else {
            AttentionBackend::Eager
        }
    }

    fn load_inferable_model(
        &self,
        options: &LoadOptions<'_>,
    ) -> Result<Box<dyn ModelHandle>, AdapterError> {
        let primary = self
            .primary_loader
            .load_model(options)
            .map_err(AdapterError::ModelLoad)?;

        let reason = match primary {
            LoadedModel::Inferable(model) => return Ok(model),
            LoadedModel::WithoutInference { reason } => reason,
        };

        log::debug!(
            "{} {} loader produced no inference capability ({}), retrying with {}",
            LOG_TAG_RESOURCES,
            self.primary_loader.variant_name(),
            reason,
            self.alternate_loader.variant_name()
        );

        match self
            .alternate_loader
            .load_model(options)
            .map_err(AdapterError::ModelLoad)?
        {
            LoadedModel::Inferable(model) => Ok(model),
            LoadedModel::WithoutInference { reason } => {
                log::debug!(
                    "{} {} loader produced no inference capability ({})",
                    LOG_TAG_RESOURCES,
                    self.alternate_loader.variant_name(),
                    reason
                );
                Err(AdapterError::MissingInferenceCapability {
                    identifier: options.model_identifier.to_string(),
                    attempts: 2,
                })
            }
        }
    }

    fn select_device(&self, model: &dyn ModelHandle) -> (Device, Precision) {
        let device = self
            .accelerator_probe
            .accelerated_device()
            .filter(|device| model.supports_device(*device))
            .unwrap_or(Device::Cpu);

        (device, device.preferred_precision())
    }
}
