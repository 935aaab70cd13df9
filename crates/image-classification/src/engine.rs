//! Inference engine seam
//!
//! The network itself lives outside this crate. A [`ClassificationService`](crate::ClassificationService)
//! only needs something that turns an encoded [`TensorBuffer`] into one score per class.
//! Tests plug in deterministic stubs; the `onnx` feature provides an ONNX Runtime backend.

use crate::config::ScoringMode;
use crate::tensor::TensorBuffer;

/// Raw per-class scores returned by an engine, in the model's numeric domain
#[derive(Debug, Clone, PartialEq)]
pub enum RawScores {
    /// uint8 scores, 0..=255 mapping to 0.0..=1.0
    Quantized(Vec<u8>),
    /// Probabilities already in [0, 1]
    Floating(Vec<f32>),
}

impl RawScores {
    #[must_use]
    pub fn mode(&self) -> ScoringMode {
        match self {
            RawScores::Quantized(_) => ScoringMode::Quantized,
            RawScores::Floating(_) => ScoringMode::Floating,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            RawScores::Quantized(scores) => scores.len(),
            RawScores::Floating(scores) => scores.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Confidence values in [0, 1], one per class index
    pub fn confidences(&self) -> Box<dyn Iterator<Item = f32> + '_> {
        match self {
            RawScores::Quantized(scores) => {
                Box::new(scores.iter().map(|&s| f32::from(s) / 255.0))
            }
            RawScores::Floating(scores) => Box::new(scores.iter().copied()),
        }
    }
}

/// A loaded model that can score one encoded image at a time.
///
/// `run` takes `&mut self`: engines are not assumed to support concurrent
/// invocation, so a service holding one allows a single call in flight.
pub trait InferenceEngine: Send {
    /// Run the model on one encoded image. Errors are opaque to the caller.
    fn run(&mut self, input: &TensorBuffer) -> anyhow::Result<RawScores>;

    /// Engine name used in log output
    fn name(&self) -> &str {
        "inference-engine"
    }
}

impl<E: InferenceEngine + ?Sized> InferenceEngine for Box<E> {
    fn run(&mut self, input: &TensorBuffer) -> anyhow::Result<RawScores> {
        (**self).run(input)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
