//! Reference image pixel buffer as handed over by the host graph.
//!
//! Layout is frame-major `[frames, height, width, channels]` with float samples
//! in `0.0..=1.0`. Only the first frame is ever sent to the model.

use std::io::Cursor;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use image::{DynamicImage, GrayImage, ImageFormat, RgbImage, RgbaImage};

use crate::errors::PrompterError;

#[derive(Debug, Clone, PartialEq)]
pub struct ImageBatch {
    frames: usize,
    height: u32,
    width: u32,
    channels: u8,
    pixels: Vec<f32>,
}

impl ImageBatch {
    pub fn new(
        frames: usize,
        height: u32,
        width: u32,
        channels: u8,
        pixels: Vec<f32>,
    ) -> Result<Self, PrompterError> {
        if !matches!(channels, 1 | 3 | 4) {
            return Err(PrompterError::Image(format!(
                "unsupported channel count {channels} (expected 1, 3 or 4)"
            )));
        }
        if frames == 0 || height == 0 || width == 0 {
            return Err(PrompterError::Image("image batch is empty".to_string()));
        }
        let expected = [height as usize, width as usize, channels as usize]
            .into_iter()
            .try_fold(frames, usize::checked_mul)
            .ok_or_else(|| {
                PrompterError::Image(format!(
                    "image dimensions {frames}x{height}x{width}x{channels} overflow the sample count"
                ))
            })?;
        if pixels.len() != expected {
            return Err(PrompterError::Image(format!(
                "pixel buffer has {} samples, expected {expected}",
                pixels.len()
            )));
        }
        Ok(Self {
            frames,
            height,
            width,
            channels,
            pixels,
        })
    }

    pub fn frames(&self) -> usize {
        self.frames
    }

    fn frame_len(&self) -> usize {
        self.height as usize * self.width as usize * self.channels as usize
    }

    /// Encodes the first frame as PNG bytes. Remaining frames are ignored.
    pub fn first_frame_png(&self) -> Result<Vec<u8>, PrompterError> {
        let samples: Vec<u8> = self.pixels[..self.frame_len()]
            .iter()
            .map(|v| (v.clamp(0.0, 1.0) * 255.0).round() as u8)
            .collect();

        let too_small = || PrompterError::Image("frame buffer does not match dimensions".to_string());
        let image = match self.channels {
            1 => DynamicImage::ImageLuma8(
                GrayImage::from_raw(self.width, self.height, samples).ok_or_else(too_small)?,
            ),
            3 => DynamicImage::ImageRgb8(
                RgbImage::from_raw(self.width, self.height, samples).ok_or_else(too_small)?,
            ),
            _ => DynamicImage::ImageRgba8(
                RgbaImage::from_raw(self.width, self.height, samples).ok_or_else(too_small)?,
            ),
        };

        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .map_err(|e| PrompterError::Image(format!("PNG encode failed: {e}")))?;
        Ok(bytes)
    }

    /// First frame as base64-encoded PNG, ready for an inline-data part.
    pub fn first_frame_base64_png(&self) -> Result<String, PrompterError> {
        Ok(BASE64.encode(self.first_frame_png()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    fn solid_batch(frames: usize, value: f32) -> ImageBatch {
        ImageBatch::new(frames, 2, 2, 3, vec![value; frames * 2 * 2 * 3]).unwrap()
    }

    #[test]
    fn test_rejects_mismatched_buffer_length() {
        let result = ImageBatch::new(1, 2, 2, 3, vec![0.0; 11]);
        assert!(matches!(result, Err(PrompterError::Image(_))));
    }

    #[test]
    fn test_rejects_unsupported_channels() {
        let result = ImageBatch::new(1, 1, 1, 2, vec![0.0; 2]);
        assert!(matches!(result, Err(PrompterError::Image(_))));
    }

    #[test]
    fn test_rejects_dimensions_whose_sample_count_overflows() {
        let result = ImageBatch::new(usize::MAX, u32::MAX, u32::MAX, 4, vec![0.0; 4]);
        match result {
            Err(PrompterError::Image(msg)) => assert!(msg.contains("overflow")),
            other => panic!("expected overflow error, got {other:?}"),
        }
    }

    #[test]
    fn test_frame_count_is_kept() {
        assert_eq!(solid_batch(3, 0.2).frames(), 3);
    }

    #[test]
    fn test_first_frame_encodes_as_png() {
        let png = solid_batch(1, 0.5).first_frame_png().unwrap();
        assert_eq!(&png[..8], &PNG_MAGIC);
    }

    #[test]
    fn test_only_first_frame_is_encoded() {
        let mut pixels = vec![0.0; 12];
        pixels.extend(vec![1.0; 12]);
        let two_frames = ImageBatch::new(2, 2, 2, 3, pixels).unwrap();
        let black = solid_batch(1, 0.0);
        assert_eq!(
            two_frames.first_frame_base64_png().unwrap(),
            black.first_frame_base64_png().unwrap()
        );
    }

    #[test]
    fn test_out_of_range_samples_are_clamped() {
        let hot = solid_batch(1, 7.5).first_frame_png().unwrap();
        let white = solid_batch(1, 1.0).first_frame_png().unwrap();
        assert_eq!(hot, white);
    }
}
