/*!
 * Common test utilities for the nmt-worker test suite
 */

use std::sync::Arc;

use nmt_worker::app_config::{FactorAxis, FactorsConfig};
use nmt_worker::engines::mock::{MockEngine, MockQualityEstimator};
use nmt_worker::TranslationWorker;

/// Character limit used by test workers
pub const TEST_CHAR_LIMIT: usize = 100;

/// Factor configuration with English, Estonian and German plus a domain axis
pub fn test_factors() -> FactorsConfig {
    FactorsConfig {
        lang: FactorAxis::from_pairs(
            &["et", "en", "de"],
            &[("et", "<2et>"), ("en", "<2en>"), ("de", "<2de>")],
        ),
        domain: Some(FactorAxis::from_pairs(
            &["<gen>", "<legal>"],
            &[("general", "<gen>"), ("legal", "<legal>")],
        )),
    }
}

/// Route `log` output through the test harness; safe to call from every test
pub fn init_test_logging() {
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::Debug)
        .try_init();
}

/// Worker around a mock engine, without QE
pub fn worker_with(engine: &MockEngine) -> TranslationWorker {
    init_test_logging();
    TranslationWorker::new(Arc::new(engine.clone()), test_factors(), TEST_CHAR_LIMIT)
        .expect("test factors are valid")
}

/// Worker around a mock engine and a mock QE model
pub fn worker_with_qe(engine: &MockEngine, qe: &MockQualityEstimator) -> TranslationWorker {
    worker_with(engine).with_quality_estimator(Arc::new(qe.clone()))
}

/// Owned strings from string slices
pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
