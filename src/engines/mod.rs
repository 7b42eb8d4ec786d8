/*!
 * Model collaborators of the pipeline.
 *
 * The translation engine and the quality estimation model are loaded once at
 * startup and shared read-only by all requests. This module contains:
 * - `http`: Clients for a remote model server
 * - `mock`: In-process engines with call counters for testing
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::EngineError;
use crate::factors::ResolvedFactors;

/// Common trait for translation engines
///
/// Implementations must be safe to call from concurrent requests.
#[async_trait]
pub trait TranslationEngine: Send + Sync + Debug {
    /// Translate sentences conditioned on the given factors
    ///
    /// # Arguments
    /// * `sentences` - Sentences to translate, in order
    /// * `factors` - Resolved language and domain factors
    ///
    /// # Returns
    /// * `Result<Vec<String>, EngineError>` - One translation per sentence, positionally aligned
    async fn translate(&self, sentences: &[String], factors: &ResolvedFactors) -> Result<Vec<String>, EngineError>;
}

/// Common trait for quality estimation models
#[async_trait]
pub trait QualityEstimator: Send + Sync + Debug {
    /// Score `(source, translation)` pairs
    ///
    /// # Returns
    /// * `Result<Vec<f64>, EngineError>` - One score per pair
    async fn score(&self, pairs: &[(String, String)]) -> Result<Vec<f64>, EngineError>;
}

pub mod http;
pub mod mock;
