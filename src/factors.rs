/*!
 * Factor resolution.
 *
 * Maps the symbolic languages and domain of a request to the internal codes
 * the translation engine is conditioned on.
 */

use log::debug;
use serde::{Deserialize, Serialize};

use crate::app_config::FactorsConfig;
use crate::errors::WorkerError;
use crate::request::TranslationRequest;

/// Engine factors for one request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedFactors {
    /// Internal source language code
    pub src_lang: String,
    /// Internal target language code
    pub tgt_lang: String,
    /// Internal domain code, only when the engine has a domain axis
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
}

/// Resolve request factors against the engine configuration.
///
/// Languages are always mapping keys after validation. An empty or unknown
/// domain falls back to the first default domain factor.
pub fn resolve(factors: &FactorsConfig, request: &TranslationRequest) -> Result<ResolvedFactors, WorkerError> {
    let src_lang = lookup_language(factors, &request.src)?;
    let tgt_lang = lookup_language(factors, &request.tgt)?;

    let domain = match &factors.domain {
        None => None,
        Some(axis) => {
            let mapped = if request.domain.is_empty() { None } else { axis.lookup(&request.domain) };
            let resolved = match mapped {
                Some(code) => code,
                None => axis.default_factor()
                    .ok_or_else(|| WorkerError::Factors("domain factor list is empty".to_string()))?,
            };
            Some(resolved.to_string())
        }
    };

    let resolved = ResolvedFactors { src_lang, tgt_lang, domain };
    debug!("Resolved factors: {:?}", resolved);
    Ok(resolved)
}

fn lookup_language(factors: &FactorsConfig, code: &str) -> Result<String, WorkerError> {
    factors.lang.lookup(code)
        .map(str::to_string)
        .ok_or_else(|| WorkerError::Factors(format!("no language factor for '{}'", code)))
}
