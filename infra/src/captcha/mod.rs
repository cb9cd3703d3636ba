//! Image challenge rendering
//!
//! Challenges are rasterized to PNG by the `captcha` crate with wave
//! distortion and pixel noise, so the answer only exists in the pixels.

use ::captcha::filters::{Dots, Noise, Wave};
use ::captcha::Captcha;

use mall_core::domain::entities::verification_code::IMAGE_CODE_LENGTH;
use mall_core::services::verification::{CaptchaImage, CaptchaRendererTrait, GeneratedCaptcha};

pub const PNG_CONTENT_TYPE: &str = "image/png";

#[derive(Debug, Clone)]
pub struct PngCaptchaRenderer {
    pub length: u32,
    pub width: u32,
    pub height: u32,
    /// Probability that a pixel is flipped to noise
    pub noise: f32,
    pub dots: u32,
}

impl Default for PngCaptchaRenderer {
    fn default() -> Self {
        Self {
            length: IMAGE_CODE_LENGTH as u32,
            width: 160,
            height: 60,
            noise: 0.2,
            dots: 8,
        }
    }
}

impl PngCaptchaRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    fn draw(&self) -> Captcha {
        let mut captcha = Captcha::new();
        captcha
            .add_chars(self.length)
            .apply_filter(Noise::new(self.noise))
            .apply_filter(Wave::new(2.0, 8.0).horizontal())
            .apply_filter(Wave::new(2.0, 4.0).vertical())
            .view(self.width, self.height)
            .apply_filter(Dots::new(self.dots));
        captcha
    }
}

impl CaptchaRendererTrait for PngCaptchaRenderer {
    fn generate(&self) -> Result<GeneratedCaptcha, String> {
        if self.length == 0 || self.width == 0 || self.height == 0 {
            return Err("Captcha dimensions must be non-zero".to_string());
        }

        let captcha = self.draw();
        let bytes = captcha
            .as_png()
            .ok_or_else(|| "Failed to encode captcha as PNG".to_string())?;

        Ok(GeneratedCaptcha {
            answer: captcha.chars_as_string(),
            image: CaptchaImage {
                content_type: PNG_CONTENT_TYPE.to_string(),
                bytes,
            },
        })
    }
}

#[cfg(test)]
mod tests;
