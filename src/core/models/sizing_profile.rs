use super::OcrMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizingProfile {
    pub base_size: u32,
    pub image_size: u32,
    pub crop_mode: bool,
}

impl SizingProfile {
    pub fn for_mode(mode: OcrMode) -> Self {
        let (base_size, image_size, crop_mode) = match mode {
            OcrMode::Tiny => (512, 512, false),
            OcrMode::Small => (640, 640, false),
            OcrMode::Base => (1024, 1024, false),
            OcrMode::Large => (1280, 1280, false),
            OcrMode::Gundam => (1024, 640, true),
        };

        Self {
            base_size,
            image_size,
            crop_mode,
        }
    }

    pub fn resolve(mode: OcrMode, explicit_size: Option<u32>) -> Self {
        let profile = Self::for_mode(mode);

        match explicit_size.filter(|size| *size > 0) {
            Some(size) => Self {
                base_size: size,
                image_size: size,
                ..profile
            },
            None => profile,
        }
    }
}
