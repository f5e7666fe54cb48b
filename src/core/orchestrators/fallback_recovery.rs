use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::result_normalization::normalize_raw_result;
use crate::core::models::RawResult;
use crate::global_constants::{
    JSON_ARTIFACT_EXTENSION, LOG_TAG_FALLBACK, PREFERRED_ARTIFACT_FILE_NAMES,
    TEXT_ARTIFACT_EXTENSION,
};

pub fn recover_text_from_artifacts(scratch_dir: &Path) -> String {
    let candidates = collect_artifact_candidates(scratch_dir);
    log::debug!(
        "{} scanning {} candidate artifacts in {:?}",
        LOG_TAG_FALLBACK,
        candidates.len(),
        scratch_dir
    );

    for candidate in candidates.iter().filter(|path| path.is_file()) {
        match read_artifact(candidate) {
            Ok(text) if !text.is_empty() => {
                log::debug!("{} recovered text from {:?}", LOG_TAG_FALLBACK, candidate);
                return text;
            }
            Ok(_) => continue,
            Err(error) => {
                log::debug!("[file-read-exception] {:?}: {:#}", candidate, error);
                continue;
            }
        }
    }

    String::new()
}

fn collect_artifact_candidates(scratch_dir: &Path) -> Vec<PathBuf> {
    let mut candidates: Vec<PathBuf> = PREFERRED_ARTIFACT_FILE_NAMES
        .iter()
        .map(|name| scratch_dir.join(name))
        .collect();

    for extension in [TEXT_ARTIFACT_EXTENSION, JSON_ARTIFACT_EXTENSION] {
        for path in list_files_with_extension(scratch_dir, extension) {
            if !candidates.contains(&path) {
                candidates.push(path);
            }
        }
    }

    candidates
}

fn list_files_with_extension(dir: &Path, extension: &str) -> Vec<PathBuf> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(error) => {
            log::debug!("{} cannot list {:?}: {}", LOG_TAG_FALLBACK, dir, error);
            return Vec::new();
        }
    };

    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|entry| entry.path()))
        .filter(|path| has_extension(path, extension))
        .collect();
    paths.sort();
    paths
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext == extension)
}

fn read_artifact(path: &Path) -> Result<String> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;

    if has_extension(path, TEXT_ARTIFACT_EXTENSION) {
        return Ok(contents.trim().to_string());
    }

    let value: serde_json::Value = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse JSON artifact {:?}", path))?;
    Ok(normalize_raw_result(&RawResult::from(value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir() -> tempfile::TempDir {
        tempfile::Builder::new()
            .prefix("fallback_test_")
            .tempdir()
            .unwrap()
    }

    #[test]
    fn test_empty_directory_recovers_nothing() {
        let dir = scratch_dir();

        assert_eq!(recover_text_from_artifacts(dir.path()), "");
    }

    #[test]
    fn test_missing_directory_recovers_nothing() {
        let dir = scratch_dir();
        let missing = dir.path().join("gone");

        assert_eq!(recover_text_from_artifacts(&missing), "");
    }

    #[test]
    fn test_preferred_text_file_wins_over_other_json() {
        let dir = scratch_dir();
        fs::write(dir.path().join("result.txt"), "Hello").unwrap();
        fs::write(dir.path().join("aaa.json"), r#"{"text": "World"}"#).unwrap();

        assert_eq!(recover_text_from_artifacts(dir.path()), "Hello");
    }

    #[test]
    fn test_preferred_names_are_tried_in_priority_order() {
        let dir = scratch_dir();
        fs::write(dir.path().join("output.txt"), "third").unwrap();
        fs::write(dir.path().join("infer_output.txt"), "first").unwrap();
        fs::write(dir.path().join("result.json"), r#"{"text": "json"}"#).unwrap();

        assert_eq!(recover_text_from_artifacts(dir.path()), "first");
    }

    #[test]
    fn test_text_artifacts_are_trimmed_and_blank_ones_skipped() {
        let dir = scratch_dir();
        fs::write(dir.path().join("infer_output.txt"), "   \n\t").unwrap();
        fs::write(dir.path().join("result.txt"), "\n  recovered text \n").unwrap();

        assert_eq!(recover_text_from_artifacts(dir.path()), "recovered text");
    }

    #[test]
    fn test_json_artifacts_are_normalized() {
        let dir = scratch_dir();
        fs::write(
            dir.path().join("result.json"),
            r#"{"pred": "low", "output_text": ["", "high"]}"#,
        )
        .unwrap();

        assert_eq!(recover_text_from_artifacts(dir.path()), "high");
    }

    #[test]
    fn test_unparsable_candidate_does_not_stop_the_scan() {
        let dir = scratch_dir();
        fs::write(dir.path().join("infer_output.json"), "{ not json").unwrap();
        fs::write(dir.path().join("zzz_page.txt"), "from glob").unwrap();

        assert_eq!(recover_text_from_artifacts(dir.path()), "from glob");
    }

    #[test]
    fn test_unrelated_extensions_are_ignored() {
        let dir = scratch_dir();
        fs::write(dir.path().join("page.md"), "markdown").unwrap();

        assert_eq!(recover_text_from_artifacts(dir.path()), "");
    }

    #[test]
    fn test_directories_named_like_artifacts_are_skipped() {
        let dir = scratch_dir();
        fs::create_dir(dir.path().join("result.txt")).unwrap();
        fs::write(dir.path().join("output.txt"), "real file").unwrap();

        assert_eq!(recover_text_from_artifacts(dir.path()), "real file");
    }
}
