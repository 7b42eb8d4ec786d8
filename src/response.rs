/*!
 * Response payloads.
 *
 * Every request produces exactly one `Response`: either a translation payload
 * shaped like the request, or an error payload with its status code.
 */

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::RequestError;

/// Mimetype of JSON payloads
pub const MIMETYPE_JSON: &str = "application/json";

/// Mimetype of plain message payloads
pub const MIMETYPE_TEXT: &str = "text/plain";

/// Translation result in the shape of the request text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TranslationOutput {
    /// Reassembled text for plain input
    Plain(String),
    /// One translation per input sentence
    Segmented(Vec<String>),
}

/// Quality estimation score in the shape of the request text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QeScore {
    /// Mean score for plain input
    Mean(f64),
    /// One score per sentence for pre-segmented input
    PerSentence(Vec<f64>),
}

impl From<&TranslationOutput> for Value {
    fn from(output: &TranslationOutput) -> Self {
        match output {
            TranslationOutput::Plain(text) => Value::from(text.as_str()),
            TranslationOutput::Segmented(items) => Value::from(items.clone()),
        }
    }
}

impl From<&QeScore> for Value {
    fn from(score: &QeScore) -> Self {
        match score {
            QeScore::Mean(mean) => Value::from(*mean),
            QeScore::PerSentence(scores) => Value::from(scores.clone()),
        }
    }
}

/// Success payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationPayload {
    /// Translated text
    pub result: TranslationOutput,
    /// Quality score, only when a QE model is configured
    #[serde(rename = "qeScore", default, skip_serializing_if = "Option::is_none")]
    pub qe_score: Option<QeScore>,
}

/// Response handed back to the transport layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// Response body
    pub content: Value,
    /// Mimetype of the body
    pub mimetype: String,
    /// HTTP status code
    pub http_status_code: u16,
}

impl Response {
    /// 200 response carrying a translation payload
    pub fn success(payload: &TranslationPayload) -> Self {
        let mut content = Map::new();
        content.insert("result".to_string(), Value::from(&payload.result));
        if let Some(score) = &payload.qe_score {
            content.insert("qeScore".to_string(), Value::from(score));
        }

        Self {
            content: Value::Object(content),
            mimetype: MIMETYPE_JSON.to_string(),
            http_status_code: 200,
        }
    }

    /// Shape-matching empty result: `""` for plain input, `[]` otherwise
    pub fn empty(plain: bool) -> Self {
        let result = if plain {
            TranslationOutput::Plain(String::new())
        } else {
            TranslationOutput::Segmented(Vec::new())
        };
        Self::success(&TranslationPayload { result, qe_score: None })
    }

    /// Error response with the status of the request error
    pub fn error(error: &RequestError) -> Self {
        let content = error.content();
        let mimetype = if content.is_string() { MIMETYPE_TEXT } else { MIMETYPE_JSON };

        Self {
            content,
            mimetype: mimetype.to_string(),
            http_status_code: error.http_status_code(),
        }
    }

    /// Whether this is a success response
    pub fn is_success(&self) -> bool {
        self.http_status_code == 200
    }
}
