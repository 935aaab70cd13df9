//! ONNX Runtime inference engine
//!
//! Runs image classifiers exported with an NHWC `[1, size, size, 3]` input and a
//! single `[1, num_classes]` output, uint8 for quantized models and float32 otherwise.

use crate::config::ScoringMode;
use crate::engine::{InferenceEngine, RawScores};
use crate::error::{ClassifyError, Result};
use crate::tensor::{TensorBuffer, PIXEL_SIZE};
use anyhow::{bail, Context};
use ndarray::Array4;
use ort::{
    session::{builder::GraphOptimizationLevel, Session},
    value::TensorRef,
};
use tracing::{debug, info};

/// ONNX Runtime backed engine
pub struct OrtEngine {
    session: Session,
    mode: ScoringMode,
}

impl OrtEngine {
    /// Build a session from in-memory model bytes.
    ///
    /// # Errors
    /// Returns `ModelLoadFailure` if ONNX Runtime rejects the model
    pub fn from_memory(model: &[u8], mode: ScoringMode) -> Result<Self> {
        info!(
            "Loading {} classification model ({} bytes)",
            mode,
            model.len()
        );

        let session = Session::builder()
            .map_err(|e| ClassifyError::ModelLoadFailure(e.to_string()))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| ClassifyError::ModelLoadFailure(e.to_string()))?
            .commit_from_memory(model)
            .map_err(|e| ClassifyError::ModelLoadFailure(e.to_string()))?;

        debug!("{} model session created", mode);

        Ok(Self { session, mode })
    }
}

impl InferenceEngine for OrtEngine {
    fn run(&mut self, input: &TensorBuffer) -> anyhow::Result<RawScores> {
        if input.mode() != self.mode {
            bail!(
                "{} tensor passed to a {} model",
                input.mode(),
                self.mode
            );
        }

        let side = input.input_size() as usize;
        let shape = (1, side, side, PIXEL_SIZE);

        match self.mode {
            ScoringMode::Quantized => {
                let array = Array4::from_shape_vec(shape, input.as_bytes().to_vec())
                    .context("input buffer does not match NHWC shape")?;
                let tensor = TensorRef::from_array_view(array.view())?;
                let outputs = self.session.run(ort::inputs![tensor])?;
                let (shape, scores) = outputs[0]
                    .try_extract_tensor::<u8>()
                    .context("model output is not a uint8 tensor")?;
                debug!("Model output shape: {:?}", shape.to_vec());
                Ok(RawScores::Quantized(scores.to_vec()))
            }
            ScoringMode::Floating => {
                let values = input
                    .to_f32_vec()
                    .context("floating tensor could not be decoded")?;
                let array = Array4::from_shape_vec(shape, values)
                    .context("input buffer does not match NHWC shape")?;
                let tensor = TensorRef::from_array_view(array.view())?;
                let outputs = self.session.run(ort::inputs![tensor])?;
                let (shape, scores) = outputs[0]
                    .try_extract_tensor::<f32>()
                    .context("model output is not a float32 tensor")?;
                debug!("Model output shape: {:?}", shape.to_vec());
                Ok(RawScores::Floating(scores.to_vec()))
            }
        }
    }

    fn name(&self) -> &str {
        "onnxruntime"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_garbage_model_fails_to_load() {
        let result = OrtEngine::from_memory(b"not an onnx model", ScoringMode::Quantized);
        assert!(matches!(result, Err(ClassifyError::ModelLoadFailure(_))));
    }
}
