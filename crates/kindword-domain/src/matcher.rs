use std::ops::Range;

use kindword_types::{Sentence, Span, TokenizedText};

use crate::rules::{CompiledPhrase, CompiledRule};

/// A lexical occurrence of one of a rule's phrases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    pub rule_id: String,
    /// Index into [`CompiledRule::phrases`].
    pub phrase_index: usize,
    /// The configured phrase form (not the surface text).
    pub phrase: String,
    pub sentence_index: usize,
    pub sentence_text: String,
    /// Token indices within the sentence.
    pub tokens: Range<usize>,
    /// Byte span of the matched text within the sentence.
    pub span: Span,
    pub context_accepted: bool,
}

impl Match {
    /// The matched surface text.
    pub fn matched_text(&self) -> &str {
        self.sentence_text
            .get(self.span.start..self.span.end)
            .unwrap_or("")
    }
}

/// Find every whole-word occurrence of the rule's phrases.
///
/// Results are ordered by sentence, then phrase definition order, then
/// position. Occurrences of a single phrase never overlap. Context is not
/// checked here; every candidate has `context_accepted == false`.
pub fn find_candidates(rule: &CompiledRule, text: &TokenizedText) -> Vec<Match> {
    let mut out = Vec::new();

    for (sentence_index, sentence) in text.sentences.iter().enumerate() {
        for (phrase_index, phrase) in rule.phrases.iter().enumerate() {
            let mut i = 0;
            while i < sentence.tokens.len() {
                let Some(len) = match_at(phrase, sentence, i) else {
                    i += 1;
                    continue;
                };

                let tokens = i..i + len;
                let span = Span::new(
                    sentence.tokens[tokens.start].span.start,
                    sentence.tokens[tokens.end - 1].span.end,
                );
                out.push(Match {
                    rule_id: rule.id.clone(),
                    phrase_index,
                    phrase: phrase.display.clone(),
                    sentence_index,
                    sentence_text: sentence.text.clone(),
                    tokens,
                    span,
                    context_accepted: false,
                });
                i += len;
            }
        }
    }

    out
}

/// Length in tokens of the longest form of `phrase` that matches at `start`.
fn match_at(phrase: &CompiledPhrase, sentence: &Sentence, start: usize) -> Option<usize> {
    phrase
        .forms
        .iter()
        .filter(|form| {
            let Some(window) = sentence.tokens.get(start..start + form.len()) else {
                return false;
            };
            window.iter().zip(form.iter()).all(|(token, segment)| {
                if phrase.case_sensitive {
                    token.text == *segment
                } else {
                    token.normalized_form() == segment.as_str()
                }
            })
        })
        .map(Vec::len)
        .max()
}
