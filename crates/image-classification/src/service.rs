//! End-to-end classification: encode, infer, rank

use crate::config::{ClassifierConfig, ScoringMode};
use crate::engine::{InferenceEngine, RawScores};
use crate::error::{ClassifyError, Result};
use crate::labels::LabelTable;
use crate::ranking::ResultRanker;
use crate::result::RankedResults;
use crate::tensor::TensorEncoder;
use image::RgbImage;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Owns a loaded model and its label table and classifies one image at a time.
///
/// `classify` borrows the service mutably, so a single instance never has more
/// than one inference in flight. Wrap it in a `Mutex` to share it between threads.
pub struct ClassificationService<E: InferenceEngine> {
    config: ClassifierConfig,
    labels: LabelTable,
    encoder: TensorEncoder,
    ranker: ResultRanker,
    engine: Option<E>,
}

impl<E: InferenceEngine> ClassificationService<E> {
    /// Create a service from an already loaded engine and label table.
    ///
    /// # Errors
    /// - `InvalidConfig` if the configuration does not validate
    /// - `ModelLoadFailure` if the label table is empty
    pub fn new(config: ClassifierConfig, labels: LabelTable, engine: E) -> Result<Self> {
        config.validate()?;
        if labels.is_empty() {
            return Err(ClassifyError::ModelLoadFailure(
                "label table is empty".to_string(),
            ));
        }

        info!(
            "Classifier ready: engine={}, mode={}, input={}x{}, classes={}, max_results={}, threshold={}",
            engine.name(),
            config.scoring_mode,
            config.input_size,
            config.input_size,
            labels.len(),
            config.max_results,
            config.threshold
        );

        Ok(Self {
            encoder: TensorEncoder::from_config(&config),
            ranker: ResultRanker::from_config(&config),
            config,
            labels,
            engine: Some(engine),
        })
    }

    /// Build a service by running a fallible loader for the engine and labels.
    /// Any loader error becomes `ModelLoadFailure`; nothing is kept on failure.
    pub fn load<F>(config: ClassifierConfig, loader: F) -> Result<Self>
    where
        F: FnOnce(&ClassifierConfig) -> anyhow::Result<(E, LabelTable)>,
    {
        config.validate()?;
        let (engine, labels) =
            loader(&config).map_err(|e| ClassifyError::ModelLoadFailure(format!("{e:#}")))?;
        Self::new(config, labels, engine)
    }

    /// Classify one `input_size x input_size` RGB image.
    ///
    /// # Errors
    /// - `ServiceClosed` after [`shutdown`](Self::shutdown)
    /// - `InvalidInput` on a dimension mismatch
    /// - `InferenceFailure` if the engine fails or returns unusable scores
    pub fn classify(&mut self, image: &RgbImage) -> Result<RankedResults> {
        let engine = self.engine.as_mut().ok_or(ClassifyError::ServiceClosed)?;
        let start = Instant::now();

        let input = self.encoder.encode(image)?;

        let scores = engine.run(&input).map_err(|e| {
            warn!("Inference failed on {}: {e:#}", engine.name());
            ClassifyError::engine(e)
        })?;

        if scores.mode() != self.config.scoring_mode {
            warn!(
                "Engine returned {} scores for a {} model",
                scores.mode(),
                self.config.scoring_mode
            );
            return Err(ClassifyError::contract(format!(
                "expected {} scores, engine returned {}",
                self.config.scoring_mode,
                scores.mode()
            )));
        }
        if scores.len() < self.labels.len() {
            warn!(
                "Engine returned {} scores for {} labels",
                scores.len(),
                self.labels.len()
            );
            return Err(ClassifyError::contract(format!(
                "score buffer has {} entries, label table has {}",
                scores.len(),
                self.labels.len()
            )));
        }

        if let RawScores::Floating(values) = &scores {
            // NaN is left to the ranker, which never keeps it
            if let Some((index, value)) = values
                .iter()
                .enumerate()
                .find(|(_, v)| !v.is_nan() && !(0.0..=1.0).contains(*v))
            {
                warn!("Engine returned score {value} at index {index}, outside [0, 1]");
                return Err(ClassifyError::contract(format!(
                    "score {value} at index {index} is outside [0, 1]"
                )));
            }
        }

        let ranked = self.ranker.rank(&scores, &self.labels);

        debug!(
            "Classified in {:.2}ms: {} result(s), top={}",
            start.elapsed().as_secs_f64() * 1000.0,
            ranked.len(),
            ranked
                .top()
                .map_or_else(|| "none".to_string(), ToString::to_string)
        );

        Ok(ranked)
    }

    /// Release the engine. Later `classify` calls fail with `ServiceClosed`;
    /// calling this again does nothing.
    pub fn shutdown(&mut self) {
        match self.engine.take() {
            Some(engine) => {
                info!("Shutting down classifier ({})", engine.name());
                drop(engine);
            }
            None => debug!("Classifier already shut down"),
        }
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.engine.is_none()
    }

    #[must_use]
    pub fn labels(&self) -> &LabelTable {
        &self.labels
    }

    #[must_use]
    pub fn scoring_mode(&self) -> ScoringMode {
        self.config.scoring_mode
    }

    #[must_use]
    pub fn input_size(&self) -> u32 {
        self.config.input_size
    }
}

impl<E: InferenceEngine> std::fmt::Debug for ClassificationService<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassificationService")
            .field("config", &self.config)
            .field("labels", &self.labels.len())
            .field("closed", &self.is_closed())
            .finish()
    }
}
