/*!
 * Sentence segmentation with delimiter recovery.
 *
 * Plain text is split into sentences by a `SentenceDetector`. The text between
 * sentences (whitespace, line breaks, stray punctuation) is recovered as
 * delimiters so the translated sentences can be put back into the original
 * layout. Pre-segmented input is only stripped.
 */

use std::collections::HashSet;
use std::fmt::Debug;

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::request::TextInput;

/// Terminal punctuation runs, with trailing quotes and brackets, or blank lines
static BOUNDARY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?P<term>[.!?…]+["'”’»)\]]*)|(?P<para>\n[ \t\r]*\n)"#)
        .expect("Invalid boundary regex")
});

const DEFAULT_ABBREVIATIONS: [&str; 20] = [
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "vs", "etc",
    "e.g", "i.e", "no", "nr", "jne", "nt", "vt", "lk", "hr", "pr",
];

// Single-letter words that are not initials
const NON_INITIALS: [&str; 2] = ["I", "A"];

/// Sentence boundary detection
pub trait SentenceDetector: Send + Sync + Debug {
    /// Split text into sentences, in order, without surrounding whitespace
    fn detect_sentences(&self, text: &str) -> Vec<String>;
}

/// Punctuation based sentence splitter
#[derive(Debug, Clone)]
pub struct RuleBasedDetector {
    abbreviations: HashSet<String>,
}

impl Default for RuleBasedDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleBasedDetector {
    /// Create a detector with the built-in abbreviation list
    pub fn new() -> Self {
        Self {
            abbreviations: DEFAULT_ABBREVIATIONS.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// Add abbreviations that never end a sentence (case-insensitive, without the final dot)
    pub fn with_abbreviations<I, S>(mut self, abbreviations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.abbreviations.extend(
            abbreviations.into_iter().map(|a| a.as_ref().trim_end_matches('.').to_lowercase()),
        );
        self
    }

    /// Whether the dot ending `before` belongs to an abbreviation or an initial
    fn is_abbreviation(&self, before: &str) -> bool {
        let word = before
            .rsplit(char::is_whitespace)
            .next()
            .unwrap_or("")
            .trim_start_matches(|c: char| !c.is_alphanumeric());

        let mut chars = word.chars();
        if let (Some(first), None) = (chars.next(), chars.next()) {
            if first.is_uppercase() && !NON_INITIALS.contains(&word) {
                return true;
            }
        }

        self.abbreviations.contains(&word.to_lowercase())
    }
}

impl SentenceDetector for RuleBasedDetector {
    fn detect_sentences(&self, text: &str) -> Vec<String> {
        let mut sentences = Vec::new();
        let mut start = 0;

        for captures in BOUNDARY_PATTERN.captures_iter(text) {
            let (end, next_start) = if let Some(term) = captures.name("term") {
                let followed_by_space = text[term.end()..]
                    .chars()
                    .next()
                    .is_none_or(char::is_whitespace);
                if !followed_by_space {
                    continue;
                }
                if term.as_str() == "." && self.is_abbreviation(&text[start..term.start()]) {
                    continue;
                }
                (term.end(), term.end())
            } else if let Some(para) = captures.name("para") {
                (para.start(), para.end())
            } else {
                continue;
            };

            let sentence = text[start..end].trim();
            if !sentence.is_empty() {
                sentences.push(sentence.to_string());
            }
            start = next_start;
        }

        let rest = text[start..].trim();
        if !rest.is_empty() {
            sentences.push(rest.to_string());
        }

        sentences
    }
}

/// Sentences of a request, with the text around them when it could be recovered
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentedText {
    /// Stripped sentences, in order
    pub sentences: Vec<String>,
    /// `sentences.len() + 1` delimiters for plain input, `None` for pre-segmented input
    pub delimiters: Option<Vec<String>>,
}

impl SegmentedText {
    /// Total number of characters over all sentences
    pub fn char_count(&self) -> usize {
        self.sentences.iter().map(|s| s.chars().count()).sum()
    }

    /// Interleave delimiters and sentences back into one string
    pub fn reconstruct(&self) -> Option<String> {
        self.delimiters.as_ref()
            .map(|delimiters| crate::reassembly::interleave(delimiters, &self.sentences))
    }
}

/// Split request text into sentences and delimiters
pub fn segment<D: SentenceDetector + ?Sized>(text: &TextInput, detector: &D) -> SegmentedText {
    match text {
        TextInput::Plain(text) => {
            let sentences: Vec<String> = detector.detect_sentences(text)
                .iter()
                .map(|s| s.trim().to_string())
                .collect();

            let delimiters = match locate_delimiters(text, &sentences) {
                Some(delimiters) => delimiters,
                None => {
                    debug!("Could not locate all {} sentences in the source text, using single-space delimiters", sentences.len());
                    fallback_delimiters(sentences.len())
                }
            };

            SegmentedText { sentences, delimiters: Some(delimiters) }
        }
        TextInput::Segmented(items) => SegmentedText {
            sentences: items.iter().map(|s| s.trim().to_string()).collect(),
            delimiters: None,
        },
    }
}

/// Recover the text before each sentence and the trailing remainder.
///
/// Each sentence is searched left to right in the unconsumed tail of `text`;
/// the first occurrence is consumed together with everything before it.
/// Returns `None` as soon as one sentence cannot be found.
pub fn locate_delimiters(text: &str, sentences: &[String]) -> Option<Vec<String>> {
    let mut delimiters = Vec::with_capacity(sentences.len() + 1);
    let mut tail = text;

    for sentence in sentences {
        let idx = tail.find(sentence.as_str())?;
        delimiters.push(tail[..idx].to_string());
        tail = &tail[idx + sentence.len()..];
    }
    delimiters.push(tail.to_string());

    Some(delimiters)
}

/// Delimiters used when recovery fails: `""`, a single space between sentences, `""`
pub fn fallback_delimiters(count: usize) -> Vec<String> {
    let mut delimiters = vec![String::new()];
    if count > 0 {
        delimiters.extend(std::iter::repeat_n(" ".to_string(), count - 1));
        delimiters.push(String::new());
    }
    delimiters
}
