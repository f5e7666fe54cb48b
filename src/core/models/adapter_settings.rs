use std::path::PathBuf;

use crate::global_constants;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterSettings {
    pub debug: bool,
    pub model_identifier: String,
    pub model_dir: PathBuf,
}

impl AdapterSettings {
    pub fn from_env() -> Self {
        let debug = Self::is_debug_flag_enabled(
            std::env::var(global_constants::ENV_DEBUG_FLAG).ok().as_deref(),
        );
        let model_identifier = global_constants::DEFAULT_MODEL_IDENTIFIER.to_string();
        let model_dir = Self::resolve_model_dir(
            std::env::var_os(global_constants::ENV_MODEL_DIR).map(PathBuf::from),
            &model_identifier,
        );

        Self {
            debug,
            model_identifier,
            model_dir,
        }
    }

    pub fn is_debug_flag_enabled(value: Option<&str>) -> bool {
        match value.map(str::trim) {
            None | Some("") | Some("0") => false,
            Some(other) => !other.eq_ignore_ascii_case("false"),
        }
    }

    fn resolve_model_dir(explicit_dir: Option<PathBuf>, model_identifier: &str) -> PathBuf {
        if let Some(dir) = explicit_dir.filter(|dir| !dir.as_os_str().is_empty()) {
            return dir;
        }

        dirs::cache_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join(global_constants::APPLICATION_NAME)
            .join(model_identifier)
    }
}
