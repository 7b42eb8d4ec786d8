/*!
 * Reassembly of translated sentences and aggregation of QE scores.
 */

use crate::response::{QeScore, TranslationOutput};

/// Join `delimiters[0], items[0], delimiters[1], ..., delimiters[last]`
pub fn interleave(delimiters: &[String], items: &[String]) -> String {
    let capacity = delimiters.iter().chain(items).map(String::len).sum();
    let mut text = String::with_capacity(capacity);

    for (delimiter, item) in delimiters.iter().zip(items) {
        text.push_str(delimiter);
        text.push_str(item);
    }
    if let Some(last) = delimiters.last() {
        text.push_str(last);
    }

    text
}

/// Build the result: one string when delimiters exist, the list otherwise
pub fn reassemble(delimiters: Option<&[String]>, translations: &[String]) -> TranslationOutput {
    match delimiters {
        Some(delimiters) => TranslationOutput::Plain(interleave(delimiters, translations)),
        None => TranslationOutput::Segmented(translations.to_vec()),
    }
}

/// Mean score for plain input, the per-sentence list otherwise
pub fn aggregate_scores(plain: bool, scores: Vec<f64>) -> QeScore {
    if plain {
        QeScore::Mean(mean(&scores))
    } else {
        QeScore::PerSentence(scores)
    }
}

fn mean(scores: &[f64]) -> f64 {
    if scores.is_empty() {
        return f64::NAN;
    }
    scores.iter().sum::<f64>() / scores.len() as f64
}
