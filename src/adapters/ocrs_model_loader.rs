use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ocrs::{OcrEngine, OcrEngineParams};
use rten::Model;

use super::OcrsInferenceModel;
use crate::core::interfaces::adapters::{LoadOptions, LoadedModel, ModelLoader};
use crate::core::models::Tokenizer;
use crate::global_constants::{
    ALPHABET_FILE_NAME, DETECTION_MODEL_FILE_NAME, DETECTION_MODEL_URL,
    RECOGNITION_MODEL_FILE_NAME, RECOGNITION_MODEL_URL,
};

/// Loads whatever weights are already cached in the model directory.
pub struct LocalOcrsModelLoader {
    model_dir: PathBuf,
}

impl LocalOcrsModelLoader {
    pub fn new(model_dir: &Path) -> Self {
        Self {
            model_dir: model_dir.to_path_buf(),
        }
    }

    fn missing_weights(&self) -> Vec<&'static str> {
        [DETECTION_MODEL_FILE_NAME, RECOGNITION_MODEL_FILE_NAME]
            .into_iter()
            .filter(|file_name| !self.model_dir.join(file_name).is_file())
            .collect()
    }
}

impl ModelLoader for LocalOcrsModelLoader {
    fn variant_name(&self) -> &'static str {
        "local-ocrs"
    }

    fn load_tokenizer(&self, model_identifier: &str) -> Result<Tokenizer> {
        load_tokenizer_from(&self.model_dir, model_identifier)
    }

    fn load_model(&self, options: &LoadOptions<'_>) -> Result<LoadedModel> {
        log::debug!("[OCRS] Looking for cached weights in {:?}", self.model_dir);

        let missing = self.missing_weights();
        if !missing.is_empty() {
            return Ok(LoadedModel::WithoutInference {
                reason: format!("{} not cached in {:?}", missing.join(", "), self.model_dir),
            });
        }

        build_ocrs_model(&self.model_dir, options)
    }
}

/// Fetches missing weights from the model hub before building the engine.
pub struct HubOcrsModelLoader {
    model_dir: PathBuf,
}

impl HubOcrsModelLoader {
    pub fn new(model_dir: &Path) -> Self {
        Self {
            model_dir: model_dir.to_path_buf(),
        }
    }

    fn ensure_model_exists(path: &Path, url: &str) -> Result<()> {
        if path.is_file() {
            return Ok(());
        }

        log::info!("[OCRS] Downloading model from {} to {:?}", url, path);
        let response = reqwest::blocking::get(url)
            .and_then(|response| response.error_for_status())
            .context("Failed to download model")?;
        let bytes = response.bytes().context("Failed to get model bytes")?;

        let partial_path = path.with_extension("partial");
        fs::write(&partial_path, &bytes).context("Failed to write model file")?;
        fs::rename(&partial_path, path).context("Failed to move model file into place")?;

        log::info!("[OCRS] Model downloaded successfully ({} bytes)", bytes.len());
        Ok(())
    }
}

impl ModelLoader for HubOcrsModelLoader {
    fn variant_name(&self) -> &'static str {
        "hub-ocrs"
    }

    fn load_tokenizer(&self, model_identifier: &str) -> Result<Tokenizer> {
        load_tokenizer_from(&self.model_dir, model_identifier)
    }

    fn load_model(&self, options: &LoadOptions<'_>) -> Result<LoadedModel> {
        fs::create_dir_all(&self.model_dir).context("Failed to create models directory")?;

        Self::ensure_model_exists(
            &self.model_dir.join(DETECTION_MODEL_FILE_NAME),
            DETECTION_MODEL_URL,
        )?;
        Self::ensure_model_exists(
            &self.model_dir.join(RECOGNITION_MODEL_FILE_NAME),
            RECOGNITION_MODEL_URL,
        )?;

        build_ocrs_model(&self.model_dir, options)
    }
}

fn load_tokenizer_from(model_dir: &Path, model_identifier: &str) -> Result<Tokenizer> {
    let alphabet_path = model_dir.join(ALPHABET_FILE_NAME);
    if !alphabet_path.is_file() {
        return Ok(Tokenizer::new(model_identifier, None));
    }

    let alphabet = fs::read_to_string(&alphabet_path)
        .with_context(|| format!("Failed to read alphabet {:?}", alphabet_path))?;
    let alphabet: String = alphabet.lines().collect();
    log::debug!(
        "[OCRS] Using custom alphabet with {} characters",
        alphabet.chars().count()
    );

    Ok(Tokenizer::new(model_identifier, Some(alphabet)))
}

fn build_ocrs_model(model_dir: &Path, options: &LoadOptions<'_>) -> Result<LoadedModel> {
    log::debug!(
        "[OCRS] Loading {} models from {:?} (attn={})",
        options.model_identifier,
        model_dir,
        options.attention
    );

    let detection_model = Model::load_file(model_dir.join(DETECTION_MODEL_FILE_NAME))
        .context("Failed to load text detection model")?;
    let recognition_model = Model::load_file(model_dir.join(RECOGNITION_MODEL_FILE_NAME))
        .context("Failed to load text recognition model")?;

    let engine = OcrEngine::new(OcrEngineParams {
        detection_model: Some(detection_model),
        recognition_model: Some(recognition_model),
        alphabet: options.tokenizer.alphabet().map(str::to_string),
        ..Default::default()
    })
    .context("Failed to create OCR engine")?;

    Ok(LoadedModel::Inferable(Box::new(OcrsInferenceModel::new(
        engine,
        options.tokenizer.clone(),
        options.attention,
    ))))
}
