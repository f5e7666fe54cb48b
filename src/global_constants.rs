pub const APPLICATION_NAME: &str = "ocr-infer-adapter";

pub const LOG_TAG_MAIN: &str = "[MAIN]";
pub const LOG_TAG_PIPELINE: &str = "[PIPELINE]";
pub const LOG_TAG_RESOURCES: &str = "[RESOURCES]";
pub const LOG_TAG_INVOKE: &str = "[INVOKE]";
pub const LOG_TAG_FALLBACK: &str = "[FALLBACK]";
pub const LOG_TAG_EMIT: &str = "[EMIT]";

pub const ENV_DEBUG_FLAG: &str = "OCR_INFER_DEBUG";
pub const ENV_MODEL_DIR: &str = "OCR_INFER_MODEL_DIR";

pub const DEFAULT_MODEL_IDENTIFIER: &str = "robertknight/ocrs";
pub const DETECTION_MODEL_URL: &str =
    "https://huggingface.co/robertknight/ocrs/resolve/main/text-detection-ssfbcj81.rten";
pub const RECOGNITION_MODEL_URL: &str =
    "https://huggingface.co/robertknight/ocrs/resolve/main/text-rec-checkpoint-s52qdbqt.rten";
pub const DETECTION_MODEL_FILE_NAME: &str = "text-detection.rten";
pub const RECOGNITION_MODEL_FILE_NAME: &str = "text-recognition.rten";
pub const ALPHABET_FILE_NAME: &str = "alphabet.txt";

pub const OCR_PROMPT: &str = "<image>\nFree OCR.";
pub const IMAGE_PLACEHOLDER: &str = "<image>";

pub const SCRATCH_DIRECTORY_PREFIX: &str = "ocr_infer_";

pub const DEFAULT_MAX_CHARS: usize = 4000;

pub const RESULT_KEY_PRIORITY: [&str; 7] = [
    "output_text",
    "text",
    "output",
    "result",
    "prediction",
    "pred",
    "data",
];

pub const PREFERRED_ARTIFACT_FILE_NAMES: [&str; 6] = [
    "infer_output.txt",
    "result.txt",
    "output.txt",
    "infer_output.json",
    "result.json",
    "output.json",
];

pub const TEXT_ARTIFACT_EXTENSION: &str = "txt";
pub const JSON_ARTIFACT_EXTENSION: &str = "json";

pub const OCRS_TEXT_ARTIFACT_FILE_NAME: &str = "infer_output.txt";
pub const OCRS_JSON_ARTIFACT_FILE_NAME: &str = "result.json";
