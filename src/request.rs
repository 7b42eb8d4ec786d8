/*!
 * Request validation.
 *
 * Raw request bodies are checked against a small field table built from the
 * language configuration. The result is a typed `TranslationRequest` whose
 * `text` is decided once as either plain text or pre-segmented sentences.
 */

use anyhow::{anyhow, Result};
use serde_json::{Map, Value};

use crate::app_config::FactorsConfig;
use crate::errors::ValidationError;

const MSG_REQUIRED: &str = "Missing data for required field.";
const MSG_INVALID: &str = "Invalid value.";
const MSG_NOT_STRING: &str = "Not a valid string.";
const MSG_NULL: &str = "Field may not be null.";
const MSG_UNKNOWN: &str = "Unknown field.";
const MSG_INPUT_TYPE: &str = "Invalid input type.";

/// Field that collects body-level errors
pub const SCHEMA_FIELD: &str = "_schema";

const KNOWN_FIELDS: [&str; 5] = ["text", "src", "tgt", "domain", "application"];

/// Text to translate, in the shape the client sent it
#[derive(Debug, Clone, PartialEq)]
pub enum TextInput {
    /// One free-form string, segmented by the worker
    Plain(String),
    /// Sentences already segmented by the client
    Segmented(Vec<String>),
}

impl TextInput {
    /// Whether the client sent a single string
    pub fn is_plain(&self) -> bool {
        matches!(self, Self::Plain(_))
    }
}

/// A validated translation request with defaults applied
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationRequest {
    /// Text to translate
    pub text: TextInput,
    /// Symbolic source language
    pub src: String,
    /// Symbolic target language
    pub tgt: String,
    /// Symbolic domain, empty when not given
    pub domain: String,
    /// Calling application, for attribution only
    pub application: Option<String>,
}

/// Field defaults and allowed values for incoming requests
#[derive(Debug, Clone)]
pub struct RequestSchema {
    languages: Vec<String>,
    default_language: String,
}

impl RequestSchema {
    /// Build the schema from the engine's factor configuration
    pub fn from_factors(factors: &FactorsConfig) -> Result<Self> {
        let default_language = factors.lang.default_factor()
            .ok_or_else(|| anyhow!("Language factor list must not be empty"))?
            .to_string();

        // Configured order first, then any remaining mapping keys
        let mut languages: Vec<String> = factors.lang.factors.iter()
            .filter(|code| factors.lang.mapping.contains_key(*code))
            .cloned()
            .collect();
        for code in factors.lang.mapping.keys() {
            if !languages.contains(code) {
                languages.push(code.clone());
            }
        }

        Ok(Self { languages, default_language })
    }

    /// Allowed symbolic language codes, in configured order
    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    /// Language used when `src` or `tgt` is missing
    pub fn default_language(&self) -> &str {
        &self.default_language
    }

    /// Validate a raw request body, collecting every field error
    pub fn validate(&self, body: &Value) -> Result<TranslationRequest, ValidationError> {
        let Some(fields) = body.as_object() else {
            return Err(ValidationError::single(SCHEMA_FIELD, MSG_INPUT_TYPE));
        };

        let mut errors = ValidationError::new();

        for key in fields.keys() {
            if !KNOWN_FIELDS.contains(&key.as_str()) {
                errors.add(key.clone(), MSG_UNKNOWN);
            }
        }

        let text = match fields.get("text") {
            None => {
                errors.add("text", MSG_REQUIRED);
                None
            }
            Some(value) => match parse_text(value) {
                Ok(text) => Some(text),
                Err(message) => {
                    errors.add("text", message);
                    None
                }
            },
        };

        let src = self.language_field(fields, "src", &mut errors);
        let tgt = self.language_field(fields, "tgt", &mut errors);

        let domain = match fields.get("domain") {
            None => Some(String::new()),
            Some(Value::Null) => {
                errors.add("domain", MSG_NULL);
                None
            }
            Some(Value::String(domain)) => Some(domain.clone()),
            Some(_) => {
                errors.add("domain", MSG_NOT_STRING);
                None
            }
        };

        let application = match fields.get("application") {
            None | Some(Value::Null) => Some(None),
            Some(Value::String(application)) => Some(Some(application.clone())),
            Some(_) => {
                errors.add("application", MSG_NOT_STRING);
                None
            }
        };

        match (text, src, tgt, domain, application) {
            (Some(text), Some(src), Some(tgt), Some(domain), Some(application)) if errors.is_empty() => {
                Ok(TranslationRequest { text, src, tgt, domain, application })
            }
            _ => Err(errors),
        }
    }

    fn language_field(
        &self,
        fields: &Map<String, Value>,
        name: &str,
        errors: &mut ValidationError,
    ) -> Option<String> {
        match fields.get(name) {
            None => Some(self.default_language.clone()),
            Some(Value::Null) => {
                errors.add(name, MSG_NULL);
                None
            }
            Some(Value::String(code)) if self.languages.contains(code) => Some(code.clone()),
            Some(Value::String(_)) => {
                errors.add(name, format!("Must be one of: {}.", self.languages.join(", ")));
                None
            }
            Some(_) => {
                errors.add(name, MSG_NOT_STRING);
                None
            }
        }
    }
}

fn parse_text(value: &Value) -> Result<TextInput, &'static str> {
    match value {
        Value::Null => Err(MSG_NULL),
        Value::String(text) => Ok(TextInput::Plain(text.clone())),
        Value::Array(items) => items.iter()
            .map(|item| item.as_str().map(str::to_string).ok_or(MSG_INVALID))
            .collect::<Result<Vec<_>, _>>()
            .map(TextInput::Segmented),
        _ => Err(MSG_INVALID),
    }
}
