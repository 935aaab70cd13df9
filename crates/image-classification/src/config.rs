//! Classifier configuration
//!
//! Everything here is fixed when a [`ClassificationService`](crate::ClassificationService)
//! is constructed and never changes afterwards.

use crate::error::{ClassifyError, Result};
use serde::{Deserialize, Serialize};

/// Default square input side expected by MobileNet-style models
pub const DEFAULT_INPUT_SIZE: u32 = 224;
/// Default number of results kept after ranking
pub const MAX_RESULTS: usize = 3;
/// Default confidence a class must strictly exceed to be reported
pub const THRESHOLD: f32 = 0.1;

/// Numeric domain of a loaded model, shared by input encoding and score decoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoringMode {
    /// 8-bit integer input and output
    #[default]
    Quantized,
    /// 32-bit float input (mean/std normalized) and probability output
    Floating,
}

impl ScoringMode {
    /// Bytes written per color channel in the encoded tensor
    #[must_use]
    pub fn bytes_per_channel(self) -> usize {
        match self {
            ScoringMode::Quantized => 1,
            ScoringMode::Floating => std::mem::size_of::<f32>(),
        }
    }
}

impl std::fmt::Display for ScoringMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScoringMode::Quantized => write!(f, "quantized"),
            ScoringMode::Floating => write!(f, "floating"),
        }
    }
}

/// Byte order of float values in the encoded tensor.
///
/// This is part of the contract with the inference engine. On-device engines read
/// the buffer in the platform's native order, which is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TensorByteOrder {
    #[default]
    Native,
    Little,
    Big,
}

impl TensorByteOrder {
    pub(crate) fn f32_bytes(self, value: f32) -> [u8; 4] {
        match self {
            TensorByteOrder::Native => value.to_ne_bytes(),
            TensorByteOrder::Little => value.to_le_bytes(),
            TensorByteOrder::Big => value.to_be_bytes(),
        }
    }

    pub(crate) fn read_f32(self, bytes: [u8; 4]) -> f32 {
        match self {
            TensorByteOrder::Native => f32::from_ne_bytes(bytes),
            TensorByteOrder::Little => f32::from_le_bytes(bytes),
            TensorByteOrder::Big => f32::from_be_bytes(bytes),
        }
    }
}

/// Configuration for image classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Square input side length in pixels (images must already be this size)
    pub input_size: u32,
    /// Numeric domain of the model
    pub scoring_mode: ScoringMode,
    /// Maximum number of results returned per image
    pub max_results: usize,
    /// Confidence threshold (0.0-1.0); results must be strictly above it
    pub threshold: f32,
    /// Byte order of floats in the encoded tensor
    pub byte_order: TensorByteOrder,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            input_size: DEFAULT_INPUT_SIZE,
            scoring_mode: ScoringMode::Quantized,
            max_results: MAX_RESULTS,
            threshold: THRESHOLD,
            byte_order: TensorByteOrder::Native,
        }
    }
}

impl ClassifierConfig {
    /// Quantized (uint8) model with the given input size
    #[must_use]
    pub fn quantized(input_size: u32) -> Self {
        Self {
            input_size,
            scoring_mode: ScoringMode::Quantized,
            ..Default::default()
        }
    }

    /// Float model with the given input size
    #[must_use]
    pub fn floating(input_size: u32) -> Self {
        Self {
            input_size,
            scoring_mode: ScoringMode::Floating,
            ..Default::default()
        }
    }

    /// Parse a configuration from YAML. Missing fields take their defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: ClassifierConfig = serde_yaml::from_str(yaml)
            .map_err(|e| ClassifyError::InvalidConfig(format!("failed to parse YAML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every value is usable
    pub fn validate(&self) -> Result<()> {
        if self.input_size == 0 {
            return Err(ClassifyError::InvalidConfig(
                "input_size must be positive".to_string(),
            ));
        }
        if self.max_results == 0 {
            return Err(ClassifyError::InvalidConfig(
                "max_results must be positive".to_string(),
            ));
        }
        if !(0.0..1.0).contains(&self.threshold) {
            return Err(ClassifyError::InvalidConfig(format!(
                "threshold must be in [0.0, 1.0), got {}",
                self.threshold
            )));
        }
        Ok(())
    }
}
