/*!
 * Mock engine implementations for testing.
 *
 * This module provides mock collaborators that simulate different behaviors:
 * - `MockEngine::identity()` - Returns every sentence unchanged
 * - `MockEngine::fixed(..)` - Returns predetermined translations
 * - `MockEngine::failing()` - Always fails with an error
 *
 * Clones share their call counters, so a test can hand a clone to the worker
 * and assert on the original.
 */

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::engines::{QualityEstimator, TranslationEngine};
use crate::errors::EngineError;
use crate::factors::ResolvedFactors;

/// Behavior mode for the mock engine
#[derive(Debug, Clone, PartialEq)]
pub enum MockBehavior {
    /// Returns the input sentences unchanged
    Identity,
    /// Prefixes every sentence with the target language factor
    TaggedTarget,
    /// Returns these translations regardless of input
    Fixed(Vec<String>),
    /// Returns one item fewer than it was given
    Misaligned,
    /// Always fails with an error
    Failing,
}

/// Mock translation engine
#[derive(Debug, Clone)]
pub struct MockEngine {
    behavior: MockBehavior,
    call_count: Arc<AtomicUsize>,
    last_call: Arc<Mutex<Option<(Vec<String>, ResolvedFactors)>>>,
}

impl MockEngine {
    /// Create a new mock engine with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            call_count: Arc::new(AtomicUsize::new(0)),
            last_call: Arc::new(Mutex::new(None)),
        }
    }

    /// Create an engine that returns its input
    pub fn identity() -> Self {
        Self::new(MockBehavior::Identity)
    }

    /// Create an engine that tags translations with the target factor
    pub fn tagged_target() -> Self {
        Self::new(MockBehavior::TaggedTarget)
    }

    /// Create an engine with predetermined output
    pub fn fixed<I, S>(translations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(MockBehavior::Fixed(translations.into_iter().map(Into::into).collect()))
    }

    /// Create an engine that drops the first translation
    pub fn misaligned() -> Self {
        Self::new(MockBehavior::Misaligned)
    }

    /// Create a failing engine that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Number of `translate` calls so far
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Sentences and factors of the most recent call
    pub fn last_call(&self) -> Option<(Vec<String>, ResolvedFactors)> {
        self.last_call.lock().ok().and_then(|call| call.clone())
    }
}

#[async_trait]
impl TranslationEngine for MockEngine {
    async fn translate(&self, sentences: &[String], factors: &ResolvedFactors) -> Result<Vec<String>, EngineError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last_call) = self.last_call.lock() {
            *last_call = Some((sentences.to_vec(), factors.clone()));
        }

        match &self.behavior {
            MockBehavior::Identity => Ok(sentences.to_vec()),
            MockBehavior::TaggedTarget => Ok(sentences.iter()
                .map(|s| format!("{} {}", factors.tgt_lang, s))
                .collect()),
            MockBehavior::Fixed(translations) => Ok(translations.clone()),
            MockBehavior::Misaligned => Ok(sentences.iter()
                .skip(1)
                .cloned()
                .collect()),
            MockBehavior::Failing => Err(EngineError::ApiError {
                status_code: 500,
                message: "Simulated engine failure".to_string(),
            }),
        }
    }
}

/// Behavior mode for the mock QE model
#[derive(Debug, Clone, PartialEq)]
pub enum MockQeBehavior {
    /// Returns these scores regardless of input
    Fixed(Vec<f64>),
    /// Scores each pair by translation / source length ratio, capped at 1.0
    LengthRatio,
    /// Always fails with an error
    Failing,
}

/// Mock quality estimation model
#[derive(Debug, Clone)]
pub struct MockQualityEstimator {
    behavior: MockQeBehavior,
    call_count: Arc<AtomicUsize>,
    last_pairs: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockQualityEstimator {
    /// Create a new mock QE model with the specified behavior
    pub fn new(behavior: MockQeBehavior) -> Self {
        Self {
            behavior,
            call_count: Arc::new(AtomicUsize::new(0)),
            last_pairs: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a QE model with predetermined scores
    pub fn fixed(scores: Vec<f64>) -> Self {
        Self::new(MockQeBehavior::Fixed(scores))
    }

    /// Create a QE model scoring by length ratio
    pub fn length_ratio() -> Self {
        Self::new(MockQeBehavior::LengthRatio)
    }

    /// Create a failing QE model
    pub fn failing() -> Self {
        Self::new(MockQeBehavior::Failing)
    }

    /// Number of `score` calls so far
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Pairs of the most recent call
    pub fn last_pairs(&self) -> Vec<(String, String)> {
        self.last_pairs.lock().map(|pairs| pairs.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl QualityEstimator for MockQualityEstimator {
    async fn score(&self, pairs: &[(String, String)]) -> Result<Vec<f64>, EngineError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last_pairs) = self.last_pairs.lock() {
            *last_pairs = pairs.to_vec();
        }

        match &self.behavior {
            MockQeBehavior::Fixed(scores) => Ok(scores.clone()),
            MockQeBehavior::LengthRatio => Ok(pairs.iter()
                .map(|(source, translation)| {
                    let source_len = source.chars().count().max(1) as f64;
                    (translation.chars().count() as f64 / source_len).min(1.0)
                })
                .collect()),
            MockQeBehavior::Failing => Err(EngineError::RequestFailed(
                "Simulated QE failure".to_string(),
            )),
        }
    }
}
