//! Image classification pre/post-processing
//!
//! This crate turns a camera frame into ranked, labelled predictions from a
//! pretrained image classifier (MobileNet-style, ImageNet labels). The network itself
//! is an external [`InferenceEngine`]; this crate owns everything around it:
//!
//! - [`TensorEncoder`]: RGB image to the exact input tensor layout (uint8 or
//!   mean/std-normalized float32, NHWC)
//! - [`ResultRanker`]: raw scores to the top results above a confidence threshold
//! - [`ClassificationService`]: encode, infer and rank one image, with shutdown
//!
//! # Features
//! - `onnx`: ONNX Runtime engine ([`onnx::OrtEngine`])
//!
//! # Example
//! ```no_run
//! use image::RgbImage;
//! use visionize_image_classification::{
//!     ClassificationService, ClassifierConfig, InferenceEngine, LabelTable, RawScores,
//!     TensorBuffer,
//! };
//!
//! struct MyEngine;
//!
//! impl InferenceEngine for MyEngine {
//!     fn run(&mut self, _input: &TensorBuffer) -> anyhow::Result<RawScores> {
//!         Ok(RawScores::Quantized(vec![0, 240, 30]))
//!     }
//! }
//!
//! # fn main() -> anyhow::Result<()> {
//! let labels = LabelTable::from_text("background\ntabby\ntiger cat\n");
//! let mut classifier =
//!     ClassificationService::new(ClassifierConfig::quantized(224), labels, MyEngine)?;
//!
//! let frame = RgbImage::new(224, 224);
//! let results = classifier.classify(&frame)?;
//! println!("{results}");
//!
//! classifier.shutdown();
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod labels;
#[cfg(feature = "onnx")]
pub mod onnx;
pub mod ranking;
pub mod result;
pub mod service;
pub mod tensor;

pub use config::{
    ClassifierConfig, ScoringMode, TensorByteOrder, DEFAULT_INPUT_SIZE, MAX_RESULTS, THRESHOLD,
};
pub use engine::{InferenceEngine, RawScores};
pub use error::{ClassifyError, Result};
pub use labels::{LabelTable, UNKNOWN_LABEL};
pub use ranking::ResultRanker;
pub use result::{ClassificationResult, RankedResults};
pub use service::ClassificationService;
pub use tensor::{TensorBuffer, TensorEncoder};
