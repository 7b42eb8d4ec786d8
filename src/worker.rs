/*!
 * The translation request pipeline.
 *
 * `TranslationWorker::process_request` runs one request through
 * validate -> segment -> length check -> factor resolution -> translation ->
 * reassembly -> optional quality estimation, strictly in that order. The
 * worker holds only immutable state and can serve concurrent requests.
 */

use anyhow::Result;
use log::{debug, info, warn};
use serde_json::Value;
use std::sync::Arc;
use uuid::Uuid;

use crate::app_config::{Config, FactorsConfig};
use crate::engines::{QualityEstimator, TranslationEngine};
use crate::errors::{EngineError, RequestError, WorkerError};
use crate::factors::{self, ResolvedFactors};
use crate::length_guard::{self, LengthCheck};
use crate::reassembly;
use crate::request::RequestSchema;
use crate::response::{Response, TranslationPayload};
use crate::segmenter::{self, RuleBasedDetector, SegmentedText, SentenceDetector};

/// Request pipeline bound to loaded engine handles
#[derive(Debug, Clone)]
pub struct TranslationWorker {
    engine: Arc<dyn TranslationEngine>,
    qe_model: Option<Arc<dyn QualityEstimator>>,
    detector: Arc<dyn SentenceDetector>,
    schema: RequestSchema,
    factors: FactorsConfig,
    char_limit: usize,
}

impl TranslationWorker {
    /// Create a worker without quality estimation
    pub fn new(engine: Arc<dyn TranslationEngine>, factors: FactorsConfig, char_limit: usize) -> Result<Self> {
        let schema = RequestSchema::from_factors(&factors)?;

        Ok(Self {
            engine,
            qe_model: None,
            detector: Arc::new(RuleBasedDetector::new()),
            schema,
            factors,
            char_limit,
        })
    }

    /// Create a worker from the application configuration
    pub fn from_config(
        config: &Config,
        engine: Arc<dyn TranslationEngine>,
        qe_model: Option<Arc<dyn QualityEstimator>>,
    ) -> Result<Self> {
        let mut worker = Self::new(engine, config.factors.clone(), config.char_limit)?;
        worker.qe_model = qe_model;
        Ok(worker)
    }

    /// Enable quality estimation
    pub fn with_quality_estimator(mut self, qe_model: Arc<dyn QualityEstimator>) -> Self {
        self.qe_model = Some(qe_model);
        self
    }

    /// Replace the sentence detector
    pub fn with_detector(mut self, detector: Arc<dyn SentenceDetector>) -> Self {
        self.detector = detector;
        self
    }

    /// Maximum number of source characters per request
    pub fn char_limit(&self) -> usize {
        self.char_limit
    }

    /// Whether responses carry a `qeScore`
    pub fn has_quality_estimator(&self) -> bool {
        self.qe_model.is_some()
    }

    /// Process one parsed request body.
    ///
    /// Validation and size errors become error responses. Engine failures are
    /// returned as `Err` for the transport layer to handle.
    pub async fn process_request(&self, body: &Value, routing_key: Option<&str>) -> Result<Response, WorkerError> {
        let correlation_id = match routing_key {
            Some(key) => key.to_string(),
            None => Uuid::new_v4().to_string(),
        };

        let request = match self.schema.validate(body) {
            Ok(request) => request,
            Err(error) => {
                warn!("[{}] Rejected invalid request: {}", correlation_id, error);
                return Ok(Response::error(&RequestError::from(error)));
            }
        };
        info!(
            "[{}] Request source: {}",
            correlation_id,
            request.application.as_deref().unwrap_or("None")
        );

        let segmented = segmenter::segment(&request.text, &*self.detector);
        debug!("[{}] Segmented into {} sentences", correlation_id, segmented.sentences.len());

        match length_guard::check_length(&segmented, self.char_limit) {
            Ok(LengthCheck::Empty) => return Ok(Response::empty(request.text.is_plain())),
            Ok(LengthCheck::Proceed(_)) => {}
            Err(error) => {
                warn!("[{}] {}", correlation_id, error);
                return Ok(Response::error(&error));
            }
        }

        let sent_factors = factors::resolve(&self.factors, &request)?;
        let translations = self.dispatch_translation(&segmented, &sent_factors).await?;
        let result = reassembly::reassemble(segmented.delimiters.as_deref(), &translations);

        let qe_score = match &self.qe_model {
            Some(qe_model) => {
                let scores = Self::dispatch_scoring(&**qe_model, &segmented, &translations).await?;
                Some(reassembly::aggregate_scores(request.text.is_plain(), scores))
            }
            None => None,
        };

        debug!("[{}] Translated {} sentences", correlation_id, translations.len());
        Ok(Response::success(&TranslationPayload { result, qe_score }))
    }

    async fn dispatch_translation(
        &self,
        segmented: &SegmentedText,
        factors: &ResolvedFactors,
    ) -> Result<Vec<String>, EngineError> {
        let translations = self.engine.translate(&segmented.sentences, factors).await?;
        ensure_aligned(segmented.sentences.len(), translations.len())?;
        Ok(translations)
    }

    async fn dispatch_scoring(
        qe_model: &dyn QualityEstimator,
        segmented: &SegmentedText,
        translations: &[String],
    ) -> Result<Vec<f64>, EngineError> {
        let pairs: Vec<(String, String)> = segmented.sentences.iter()
            .cloned()
            .zip(translations.iter().cloned())
            .collect();

        let scores = qe_model.score(&pairs).await?;
        ensure_aligned(pairs.len(), scores.len())?;
        Ok(scores)
    }
}

fn ensure_aligned(expected: usize, actual: usize) -> Result<(), EngineError> {
    if expected == actual {
        Ok(())
    } else {
        Err(EngineError::MisalignedOutput { expected, actual })
    }
}
