/*!
 * Tests for segmentation and delimiter recovery
 */

use nmt_worker::reassembly::reassemble;
use nmt_worker::request::TextInput;
use nmt_worker::response::TranslationOutput;
use nmt_worker::segmenter::{fallback_delimiters, segment, RuleBasedDetector, SentenceDetector};

use crate::common::strings;

/// Detector that normalizes inner whitespace, so sentences are not found verbatim
#[derive(Debug)]
struct CollapsingDetector;

impl SentenceDetector for CollapsingDetector {
    fn detect_sentences(&self, text: &str) -> Vec<String> {
        RuleBasedDetector::new()
            .detect_sentences(text)
            .iter()
            .map(|s| s.split_whitespace().collect::<Vec<_>>().join(" "))
            .collect()
    }
}

/// Identity translation reproduces every layout the detector handles verbatim
#[test]
fn test_segment_withIdentityTranslation_shouldRoundTrip() {
    let samples = [
        "Hello world. Bye!",
        "  Leading and trailing space.  ",
        "First paragraph.\n\nSecond paragraph! Third?\n",
        "Tab\tseparated. Sentences…  With ellipsis.",
        "\"Quoted!\" she said. (Bracketed.) End",
        "Dr. Who arrived. Mr. J. Smith left.",
        "No terminal punctuation at all",
        "Ääkkösiä on. Ja ümlaute ka!",
    ];
    let detector = RuleBasedDetector::new();

    for sample in samples {
        let segmented = segment(&TextInput::Plain(sample.to_string()), &detector);
        let result = reassemble(segmented.delimiters.as_deref(), &segmented.sentences);
        assert_eq!(result, TranslationOutput::Plain(sample.to_string()), "sample: {:?}", sample);
    }
}

#[test]
fn test_segment_withDelimiters_shouldHaveOneMoreThanSentences() {
    let segmented = segment(
        &TextInput::Plain("One. Two. Three.".to_string()),
        &RuleBasedDetector::new(),
    );
    assert_eq!(segmented.sentences, strings(&["One.", "Two.", "Three."]));
    assert_eq!(segmented.delimiters.map(|d| d.len()), Some(4));
}

#[test]
fn test_segment_withNormalizedSentences_shouldUseSingleSpaceFallback() {
    let text = "First   sentence here. Second\n\tone.";
    let segmented = segment(&TextInput::Plain(text.to_string()), &CollapsingDetector);

    assert_eq!(segmented.sentences, strings(&["First sentence here.", "Second one."]));
    assert_eq!(segmented.delimiters, Some(strings(&["", " ", ""])));
    assert_eq!(segmented.reconstruct().as_deref(), Some("First sentence here. Second one."));
}

#[test]
fn test_segment_withOneSentenceNormalized_shouldFallBackForAll() {
    let text = "Fine one. Broken   one. Fine again.";
    let segmented = segment(&TextInput::Plain(text.to_string()), &CollapsingDetector);
    assert_eq!(segmented.delimiters, Some(fallback_delimiters(3)));
}

#[test]
fn test_fallbackDelimiters_shouldBeDeterministic() {
    for n in 1..6 {
        let delimiters = fallback_delimiters(n);
        assert_eq!(delimiters.len(), n + 1);
        assert_eq!(delimiters.first().map(String::as_str), Some(""));
        assert_eq!(delimiters.last().map(String::as_str), Some(""));
        assert!(delimiters[1..n].iter().all(|d| d == " "));
    }
}

#[test]
fn test_segment_withWhitespaceOnlyText_shouldHaveNoSentences() {
    let segmented = segment(&TextInput::Plain(" \n ".to_string()), &RuleBasedDetector::new());
    assert!(segmented.sentences.is_empty());
    assert_eq!(segmented.char_count(), 0);
}
