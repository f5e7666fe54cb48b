use std::path::Path;

use anyhow::{anyhow, Context, Result};
use image::imageops::FilterType;
use image::RgbImage;
use ocrs::{ImageSource, OcrEngine};
use rten_imageproc::BoundingRect;
use serde::Serialize;

use crate::core::interfaces::adapters::{
    ImageArgument, InferCall, InferenceCapability, InvokeError, ModelHandle,
};
use crate::core::models::{AttentionBackend, Device, Precision, RawResult, SizingProfile, Tokenizer};
use crate::global_constants::{
    IMAGE_PLACEHOLDER, OCRS_JSON_ARTIFACT_FILE_NAME, OCRS_TEXT_ARTIFACT_FILE_NAME,
};

pub struct OcrsInferenceModel {
    engine: OcrEngine,
    tokenizer: Tokenizer,
    attention: AttentionBackend,
    placement: Option<(Device, Precision)>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct RecognizedLine {
    text: String,
    left: f32,
    top: f32,
    width: f32,
    height: f32,
}

#[derive(Serialize)]
struct OcrsArtifact<'a> {
    text: &'a str,
    lines: &'a [RecognizedLine],
    base_size: u32,
    image_size: u32,
    crop_mode: bool,
}

struct ImageView {
    top: u32,
    image: RgbImage,
}

impl OcrsInferenceModel {
    pub fn new(engine: OcrEngine, tokenizer: Tokenizer, attention: AttentionBackend) -> Self {
        Self {
            engine,
            tokenizer,
            attention,
            placement: None,
        }
    }

    fn recognize_lines(&self, view: &ImageView) -> Result<Vec<RecognizedLine>> {
        let source = ImageSource::from_bytes(view.image.as_raw(), view.image.dimensions())
            .context("Failed to wrap image for recognition")?;
        let ocr_input = self
            .engine
            .prepare_input(source)
            .context("Failed to prepare OCR input")?;

        let word_rects = self
            .engine
            .detect_words(&ocr_input)
            .context("Failed to detect words")?;
        let line_rects = self.engine.find_text_lines(&ocr_input, &word_rects);
        let line_texts = self
            .engine
            .recognize_text(&ocr_input, &line_rects)
            .context("Failed to recognize text lines")?;

        log::debug!(
            "[OCRS] view at y={} ({}x{}): {} words in {} lines",
            view.top,
            view.image.width(),
            view.image.height(),
            word_rects.len(),
            line_rects.len()
        );

        let mut recognized = Vec::new();
        for (line, words_in_line) in line_texts.iter().zip(line_rects.iter()) {
            let Some(line) = line else {
                continue;
            };
            let text = line.to_string();
            if text.trim().is_empty() {
                continue;
            }
            let Some(first_word) = words_in_line.first() else {
                continue;
            };

            let bbox = words_in_line
                .iter()
                .skip(1)
                .fold(first_word.bounding_rect(), |bbox, word| {
                    bbox.union(word.bounding_rect())
                });

            recognized.push(RecognizedLine {
                text,
                left: bbox.left() as f32,
                top: bbox.top() as f32 + view.top as f32,
                width: bbox.width() as f32,
                height: bbox.height() as f32,
            });
        }

        Ok(recognized)
    }
}

impl InferenceCapability for OcrsInferenceModel {
    fn infer(&self, call: &InferCall<'_>) -> Result<RawResult, InvokeError> {
        let image_path = single_image_path(&call.image)?;

        if !call.prompt.contains(IMAGE_PLACEHOLDER) {
            return Err(anyhow!("prompt has no {} placeholder", IMAGE_PLACEHOLDER).into());
        }
        if call.tokenizer != &self.tokenizer {
            return Err(anyhow!(
                "tokenizer for {} does not match the loaded recognition model",
                call.tokenizer.model_identifier()
            )
            .into());
        }
        if call.test_compress {
            log::debug!("[OCRS] compression test requested but not supported, ignoring");
        }

        log::debug!(
            "[OCRS] running on {:?} with attn={}",
            self.placement,
            self.attention
        );

        let image = image::open(image_path)
            .with_context(|| format!("Failed to open image {:?}", image_path))?
            .into_rgb8();

        let mut lines = Vec::new();
        for view in prepare_views(image, call.sizing) {
            lines.extend(self.recognize_lines(&view)?);
        }
        let text = lines
            .iter()
            .map(|line| line.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        log::debug!(
            "[OCRS] extraction complete, {} lines, {} characters",
            lines.len(),
            text.chars().count()
        );

        if call.save_results && !text.is_empty() {
            if let Err(error) = write_artifacts(call.output_path, &text, &lines, call.sizing) {
                log::debug!("[OCRS] failed to save results: {:#}", error);
            }
        }

        Ok(recognition_result(text, lines))
    }
}

/// A page with no recognized text yields `Absent`.
pub(crate) fn recognition_result(text: String, lines: Vec<RecognizedLine>) -> RawResult {
    if text.is_empty() {
        return RawResult::Absent;
    }

    RawResult::Mapping(vec![
        ("text".to_string(), RawResult::Text(text)),
        (
            "lines".to_string(),
            RawResult::Sequence(
                lines
                    .into_iter()
                    .map(|line| RawResult::Text(line.text))
                    .collect(),
            ),
        ),
    ])
}

impl ModelHandle for OcrsInferenceModel {
    fn supports_device(&self, device: Device) -> bool {
        !device.is_accelerated()
    }

    fn place(&mut self, device: Device, precision: Precision) -> Result<()> {
        if !self.supports_device(device) {
            anyhow::bail!("rten runs on the CPU only, cannot place on {}", device);
        }
        if precision != Precision::F32 {
            anyhow::bail!("rten models run in f32, {} requested", precision);
        }

        self.placement = Some((device, precision));
        Ok(())
    }

    fn as_inference(&self) -> &dyn InferenceCapability {
        self
    }
}

fn single_image_path(image: &ImageArgument) -> Result<&Path, InvokeError> {
    match image {
        ImageArgument::Image(path) | ImageArgument::ImageFile(path) => Ok(path.as_path()),
        ImageArgument::Images(_) => Err(InvokeError::SignatureMismatch {
            parameter: image.parameter_name(),
        }),
    }
}

fn prepare_views(image: RgbImage, sizing: SizingProfile) -> Vec<ImageView> {
    let scaled = scale_to_longest_side(image, sizing.base_size);
    if !sizing.crop_mode {
        return vec![ImageView {
            top: 0,
            image: scaled,
        }];
    }

    let (width, height) = scaled.dimensions();
    let band_height = sizing.image_size.max(1);

    (0..height)
        .step_by(band_height as usize)
        .map(|top| {
            let rows = band_height.min(height - top);
            ImageView {
                top,
                image: image::imageops::crop_imm(&scaled, 0, top, width, rows).to_image(),
            }
        })
        .collect()
}

fn scale_to_longest_side(image: RgbImage, limit: u32) -> RgbImage {
    let (width, height) = image.dimensions();
    let longest_side = width.max(height);
    if limit == 0 || longest_side <= limit {
        return image;
    }

    let scale = f64::from(limit) / f64::from(longest_side);
    let scaled_width = ((f64::from(width) * scale).round() as u32).max(1);
    let scaled_height = ((f64::from(height) * scale).round() as u32).max(1);

    image::imageops::resize(&image, scaled_width, scaled_height, FilterType::Triangle)
}

fn write_artifacts(
    output_path: &Path,
    text: &str,
    lines: &[RecognizedLine],
    sizing: SizingProfile,
) -> Result<()> {
    std::fs::write(output_path.join(OCRS_TEXT_ARTIFACT_FILE_NAME), text)
        .context("Failed to write text artifact")?;

    let artifact = OcrsArtifact {
        text,
        lines,
        base_size: sizing.base_size,
        image_size: sizing.image_size,
        crop_mode: sizing.crop_mode,
    };
    let contents = serde_json::to_string_pretty(&artifact)?;
    std::fs::write(output_path.join(OCRS_JSON_ARTIFACT_FILE_NAME), contents)
        .context("Failed to write JSON artifact")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::OcrMode;
    use std::path::PathBuf;

    fn blank_image(width: u32, height: u32) -> RgbImage {
        RgbImage::from_pixel(width, height, image::Rgb([255, 255, 255]))
    }

    #[test]
    fn test_single_image_path_rejects_image_list_as_signature_mismatch() {
        let images = ImageArgument::Images(vec![PathBuf::from("/tmp/a.png")]);

        assert!(matches!(
            single_image_path(&images),
            Err(InvokeError::SignatureMismatch {
                parameter: "images"
            })
        ));
    }

    #[test]
    fn test_single_image_path_accepts_image_and_image_file() {
        let path = PathBuf::from("/tmp/a.png");

        assert_eq!(
            single_image_path(&ImageArgument::Image(path.clone())).unwrap(),
            path.as_path()
        );
        assert_eq!(
            single_image_path(&ImageArgument::ImageFile(path.clone())).unwrap(),
            path.as_path()
        );
    }

    #[test]
    fn test_small_images_are_not_upscaled() {
        let views = prepare_views(blank_image(300, 200), SizingProfile::for_mode(OcrMode::Small));

        assert_eq!(views.len(), 1);
        assert_eq!(views[0].image.dimensions(), (300, 200));
    }

    #[test]
    fn test_large_images_are_scaled_to_base_size() {
        let views = prepare_views(blank_image(2048, 1024), SizingProfile::for_mode(OcrMode::Tiny));

        assert_eq!(views.len(), 1);
        assert_eq!(views[0].image.dimensions(), (512, 256));
    }

    #[test]
    fn test_crop_mode_splits_into_image_size_bands() {
        let views = prepare_views(
            blank_image(1000, 1500),
            SizingProfile::for_mode(OcrMode::Gundam),
        );

        let bands: Vec<(u32, u32)> = views
            .iter()
            .map(|view| (view.top, view.image.height()))
            .collect();
        assert_eq!(bands, vec![(0, 640), (640, 384)]);
        assert!(views.iter().all(|view| view.image.width() == 683));
    }

    #[test]
    fn test_blank_page_recognition_is_absent() {
        assert_eq!(recognition_result(String::new(), Vec::new()), RawResult::Absent);
    }

    #[test]
    fn test_recognized_page_keeps_text_and_lines() {
        let line = RecognizedLine {
            text: "hello".to_string(),
            left: 0.0,
            top: 0.0,
            width: 10.0,
            height: 4.0,
        };

        let raw = recognition_result("hello".to_string(), vec![line]);

        assert_eq!(raw.get("text"), Some(&RawResult::from("hello")));
        assert_eq!(
            raw.get("lines"),
            Some(&RawResult::Sequence(vec![RawResult::from("hello")]))
        );
    }

    #[test]
    fn test_write_artifacts_produces_text_and_json() {
        let dir = tempfile::tempdir().unwrap();
        let lines: Vec<RecognizedLine> = ["first", "second"]
            .iter()
            .enumerate()
            .map(|(index, text)| RecognizedLine {
                text: text.to_string(),
                left: 4.0,
                top: 20.0 * index as f32,
                width: 80.0,
                height: 16.0,
            })
            .collect();

        write_artifacts(
            dir.path(),
            "first\nsecond",
            &lines,
            SizingProfile::for_mode(OcrMode::Base),
        )
        .unwrap();

        let text = std::fs::read_to_string(dir.path().join("infer_output.txt")).unwrap();
        let json: serde_json::Value = serde_json::from_str(
            &std::fs::read_to_string(dir.path().join("result.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(text, "first\nsecond");
        assert_eq!(json["lines"][1]["text"], "second");
        assert_eq!(json["lines"][1]["top"], 20.0);
        assert_eq!(json["base_size"], 1024);
    }
}
