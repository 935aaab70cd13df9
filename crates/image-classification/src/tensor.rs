//! Image to tensor encoding
//!
//! Produces the flat NHWC buffer (batch of one, row-major pixels, R/G/B channels)
//! that TFLite-style classifiers consume. The numeric domain follows the model's
//! [`ScoringMode`]:
//! - Quantized: one raw byte per channel
//! - Floating: one `f32` per channel, normalized as `(v - 128) / 120`

use crate::config::{ClassifierConfig, ScoringMode, TensorByteOrder};
use crate::error::{ClassifyError, Result};
use image::RgbImage;

/// Mean subtracted from every channel for float models
pub const IMAGE_MEAN: f32 = 128.0;
/// Scale applied after mean subtraction for float models
pub const IMAGE_STD: f32 = 120.0;

/// Color channels per pixel
pub const PIXEL_SIZE: usize = 3;

/// Normalize one 8-bit channel value for float models
#[inline]
#[must_use]
pub fn normalize_channel(value: u8) -> f32 {
    (f32::from(value) - IMAGE_MEAN) / IMAGE_STD
}

/// Per-mode channel writer. The encoder loop is shared; only this differs.
trait ChannelCodec {
    const MODE: ScoringMode;

    fn write(channel: u8, order: TensorByteOrder, out: &mut Vec<u8>);
}

struct QuantizedCodec;

impl ChannelCodec for QuantizedCodec {
    const MODE: ScoringMode = ScoringMode::Quantized;

    #[inline]
    fn write(channel: u8, _order: TensorByteOrder, out: &mut Vec<u8>) {
        out.push(channel);
    }
}

struct FloatingCodec;

impl ChannelCodec for FloatingCodec {
    const MODE: ScoringMode = ScoringMode::Floating;

    #[inline]
    fn write(channel: u8, order: TensorByteOrder, out: &mut Vec<u8>) {
        out.extend_from_slice(&order.f32_bytes(normalize_channel(channel)));
    }
}

/// Encoded model input
#[derive(Debug, Clone, PartialEq)]
pub struct TensorBuffer {
    data: Vec<u8>,
    mode: ScoringMode,
    input_size: u32,
    byte_order: TensorByteOrder,
}

impl TensorBuffer {
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[must_use]
    pub fn mode(&self) -> ScoringMode {
        self.mode
    }

    #[must_use]
    pub fn input_size(&self) -> u32 {
        self.input_size
    }

    /// NHWC shape of the tensor: `[1, size, size, 3]`
    #[must_use]
    pub fn shape(&self) -> [usize; 4] {
        let side = self.input_size as usize;
        [1, side, side, PIXEL_SIZE]
    }

    /// Float view of a floating-mode buffer, decoded with its byte order.
    /// Returns `None` for quantized buffers.
    #[must_use]
    pub fn to_f32_vec(&self) -> Option<Vec<f32>> {
        if self.mode != ScoringMode::Floating {
            return None;
        }
        Some(
            self.data
                .chunks_exact(4)
                .map(|c| self.byte_order.read_f32([c[0], c[1], c[2], c[3]]))
                .collect(),
        )
    }
}

/// Converts square RGB images into model input tensors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TensorEncoder {
    input_size: u32,
    mode: ScoringMode,
    byte_order: TensorByteOrder,
}

impl TensorEncoder {
    #[must_use]
    pub fn new(input_size: u32, mode: ScoringMode, byte_order: TensorByteOrder) -> Self {
        Self {
            input_size,
            mode,
            byte_order,
        }
    }

    #[must_use]
    pub fn from_config(config: &ClassifierConfig) -> Self {
        Self::new(config.input_size, config.scoring_mode, config.byte_order)
    }

    /// Exact byte length of every buffer this encoder produces
    #[must_use]
    pub fn tensor_len(&self) -> usize {
        let side = self.input_size as usize;
        side * side * PIXEL_SIZE * self.mode.bytes_per_channel()
    }

    /// Encode an image. The image must already be `input_size x input_size`;
    /// no resizing happens here.
    pub fn encode(&self, image: &RgbImage) -> Result<TensorBuffer> {
        let (width, height) = image.dimensions();
        if width != self.input_size || height != self.input_size {
            return Err(ClassifyError::InvalidInput {
                expected: self.input_size,
                width,
                height,
            });
        }

        let buffer = match self.mode {
            ScoringMode::Quantized => self.encode_with::<QuantizedCodec>(image),
            ScoringMode::Floating => self.encode_with::<FloatingCodec>(image),
        };
        debug_assert_eq!(buffer.len(), self.tensor_len());
        Ok(buffer)
    }

    fn encode_with<C: ChannelCodec>(&self, image: &RgbImage) -> TensorBuffer {
        let mut data = Vec::with_capacity(self.tensor_len());
        // pixels() walks rows top to bottom, left to right
        for pixel in image.pixels() {
            for &channel in &pixel.0 {
                C::write(channel, self.byte_order, &mut data);
            }
        }

        TensorBuffer {
            data,
            mode: C::MODE,
            input_size: self.input_size,
            byte_order: self.byte_order,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn gradient_image(size: u32) -> RgbImage {
        RgbImage::from_fn(size, size, |x, y| {
            Rgb([
                ((x + y) % 256) as u8,
                ((x * 2) % 256) as u8,
                ((y * 2) % 256) as u8,
            ])
        })
    }

    #[test]
    fn test_output_size_224() {
        let image = gradient_image(224);
        let quantized = TensorEncoder::new(224, ScoringMode::Quantized, TensorByteOrder::Native);
        let floating = TensorEncoder::new(224, ScoringMode::Floating, TensorByteOrder::Native);

        assert_eq!(quantized.tensor_len(), 150_528);
        assert_eq!(floating.tensor_len(), 602_112);
        assert_eq!(quantized.encode(&image).unwrap().len(), quantized.tensor_len());
        assert_eq!(floating.encode(&image).unwrap().len(), floating.tensor_len());
    }

    #[test]
    fn test_quantized_writes_raw_rgb_row_major() {
        let mut image = RgbImage::new(2, 2);
        image.put_pixel(0, 0, Rgb([1, 2, 3]));
        image.put_pixel(1, 0, Rgb([4, 5, 6]));
        image.put_pixel(0, 1, Rgb([7, 8, 9]));
        image.put_pixel(1, 1, Rgb([10, 11, 255]));

        let encoder = TensorEncoder::new(2, ScoringMode::Quantized, TensorByteOrder::Native);
        let buffer = encoder.encode(&image).unwrap();

        assert_eq!(
            buffer.as_bytes(),
            &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 255]
        );
        assert_eq!(buffer.mode(), ScoringMode::Quantized);
        assert_eq!(buffer.shape(), [1, 2, 2, 3]);
        assert!(buffer.to_f32_vec().is_none());
    }

    #[test]
    fn test_floating_normalization() {
        let image = RgbImage::from_pixel(1, 1, Rgb([0, 128, 255]));
        let encoder = TensorEncoder::new(1, ScoringMode::Floating, TensorByteOrder::Native);
        let buffer = encoder.encode(&image).unwrap();

        let values = buffer.to_f32_vec().unwrap();
        assert_eq!(values.len(), 3);
        assert!((values[0] - (-128.0 / 120.0)).abs() < 1e-6);
        assert_eq!(values[1], 0.0);
        assert!((values[2] - (127.0 / 120.0)).abs() < 1e-6);

        // Native order means the raw bytes are exactly to_ne_bytes
        assert_eq!(&buffer.as_bytes()[4..8], &0.0f32.to_ne_bytes());
        assert_eq!(&buffer.as_bytes()[8..12], &normalize_channel(255).to_ne_bytes());
    }

    #[test]
    fn test_floating_explicit_byte_order() {
        let image = RgbImage::from_pixel(1, 1, Rgb([248, 248, 248]));
        let big = TensorEncoder::new(1, ScoringMode::Floating, TensorByteOrder::Big)
            .encode(&image)
            .unwrap();
        let little = TensorEncoder::new(1, ScoringMode::Floating, TensorByteOrder::Little)
            .encode(&image)
            .unwrap();

        // (248 - 128) / 120 == 1.0
        assert_eq!(&big.as_bytes()[..4], &[0x3f, 0x80, 0x00, 0x00]);
        assert_eq!(&little.as_bytes()[..4], &[0x00, 0x00, 0x80, 0x3f]);
        assert_eq!(big.to_f32_vec(), little.to_f32_vec());
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let image = gradient_image(32);
        for mode in [ScoringMode::Quantized, ScoringMode::Floating] {
            let encoder = TensorEncoder::new(32, mode, TensorByteOrder::Native);
            let first = encoder.encode(&image).unwrap();
            let second = encoder.encode(&image).unwrap();
            assert_eq!(first.as_bytes(), second.as_bytes());
        }
    }

    #[test]
    fn test_wrong_dimensions_rejected() {
        let encoder = TensorEncoder::new(224, ScoringMode::Quantized, TensorByteOrder::Native);
        let err = encoder.encode(&RgbImage::new(224, 223)).unwrap_err();
        assert!(matches!(
            err,
            ClassifyError::InvalidInput {
                expected: 224,
                width: 224,
                height: 223
            }
        ));
    }
}
