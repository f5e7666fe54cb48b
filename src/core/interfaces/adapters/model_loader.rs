use anyhow::Result;

use super::ModelHandle;
use crate::core::models::{AttentionBackend, Tokenizer};

#[derive(Debug, Clone, Copy)]
pub struct LoadOptions<'a> {
    pub model_identifier: &'a str,
    pub attention: AttentionBackend,
    pub tokenizer: &'a Tokenizer,
}

pub enum LoadedModel {
    Inferable(Box<dyn ModelHandle>),
    WithoutInference { reason: String },
}

impl std::fmt::Debug for LoadedModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadedModel::Inferable(_) => write!(f, "Inferable"),
            LoadedModel::WithoutInference { reason } => {
                write!(f, "WithoutInference({})", reason)
            }
        }
    }
}

pub trait ModelLoader {
    fn variant_name(&self) -> &'static str;

    fn load_tokenizer(&self, model_identifier: &str) -> Result<Tokenizer>;

    fn load_model(&self, options: &LoadOptions<'_>) -> Result<LoadedModel>;
}
