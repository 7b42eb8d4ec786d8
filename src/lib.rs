/*!
 * # nmt-worker - request pipeline for a neural machine translation service
 *
 * A Rust library that turns raw translation requests into engine calls and
 * engine output back into responses shaped like the request.
 *
 * ## Features
 *
 * - Accepts either one free-form text or a pre-segmented list of sentences
 * - Sentence segmentation that keeps the exact whitespace and punctuation
 *   between sentences, so the translated text keeps the original layout
 * - Language and domain factor resolution from a JSON configuration
 * - Optional quality estimation of every translated sentence
 * - Request size limits with declarative-style validation messages
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `request`: Request validation and defaults
 * - `segmenter`: Sentence segmentation and delimiter recovery
 * - `length_guard`: Request size checks and the empty-input shortcut
 * - `factors`: Mapping of symbolic languages and domains to engine factors
 * - `engines`: Translation engine and quality estimation clients:
 *   - `engines::http`: Remote model server client
 *   - `engines::mock`: In-process engines for testing
 * - `reassembly`: Rebuilding the translated text and aggregating QE scores
 * - `response`: Success and error payloads
 * - `worker`: The request pipeline entry point
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod engines;
pub mod errors;
pub mod factors;
pub mod length_guard;
pub mod reassembly;
pub mod request;
pub mod response;
pub mod segmenter;
pub mod worker;

// Re-export main types for easier usage
pub use app_config::{Config, FactorAxis, FactorsConfig};
pub use engines::{QualityEstimator, TranslationEngine};
pub use errors::{AppError, EngineError, RequestError, ValidationError, WorkerError};
pub use request::{RequestSchema, TextInput, TranslationRequest};
pub use response::Response;
pub use segmenter::{RuleBasedDetector, SegmentedText, SentenceDetector};
pub use worker::TranslationWorker;
