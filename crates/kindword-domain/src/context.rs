//! Contextual disambiguation of candidate matches.
//!
//! A phrase with a context condition only counts when the token right after
//! it satisfies at least one configured [`ContextClass`]. Missing tags are
//! treated as "class not satisfied"; they never raise.

use kindword_types::{ContextClass, Sentence, Token, TokenTag, TokenizedText};

use crate::matcher::Match;
use crate::rules::{CompiledPhrase, CompiledRule, ContextCondition};

/// Sentence-ending and clause punctuation accepted by [`ContextClass::Punctuation`].
pub const CLAUSE_PUNCTUATION: [char; 6] = ['.', ',', '!', '?', ';', ':'];

/// Decide whether a candidate is a true positive for its phrase.
pub fn accept(candidate: &Match, rule: &CompiledRule, text: &TokenizedText) -> bool {
    let (Some(phrase), Some(sentence)) = (
        rule.phrases.get(candidate.phrase_index),
        text.sentences.get(candidate.sentence_index),
    ) else {
        return false;
    };

    let next = sentence.tokens.get(candidate.tokens.end);
    let prev = candidate
        .tokens
        .start
        .checked_sub(1)
        .and_then(|i| sentence.tokens.get(i));

    if is_vetoed(phrase, prev, next) {
        return false;
    }

    match &phrase.condition {
        ContextCondition::Always => true,
        ContextCondition::FollowedBy(classes) => classes
            .iter()
            .any(|&class| class_holds(class, next, sentence, candidate)),
    }
}

fn is_vetoed(phrase: &CompiledPhrase, prev: Option<&Token>, next: Option<&Token>) -> bool {
    let listed = |token: Option<&Token>, words: &std::collections::BTreeSet<String>| {
        !words.is_empty()
            && token.is_some_and(|t| words.contains(&*t.normalized_form()))
    };

    listed(next, &phrase.not_followed_by) || listed(prev, &phrase.not_preceded_by)
}

fn class_holds(
    class: ContextClass,
    next: Option<&Token>,
    sentence: &Sentence,
    candidate: &Match,
) -> bool {
    match class {
        ContextClass::PastTenseVerb => next.is_some_and(|t| {
            t.has_tag(TokenTag::PastParticiple) || t.has_tag(TokenTag::SimplePast)
        }),
        ContextClass::FunctionWord => next.is_some_and(|t| t.has_tag(TokenTag::FunctionWord)),
        ContextClass::Punctuation => match next {
            Some(t) => t.has_tag(TokenTag::Punctuation) || is_clause_punctuation(t),
            None => ends_with_retained_punctuation(&sentence.text, candidate.span.end),
        },
    }
}

/// Untagged followers fall back to their surface text.
fn is_clause_punctuation(token: &Token) -> bool {
    !token.text.is_empty() && token.text.chars().all(|c| CLAUSE_PUNCTUATION.contains(&c))
}

/// The match is the last token; accept only when the sentence text itself
/// still carries punctuation after the match.
fn ends_with_retained_punctuation(sentence_text: &str, match_end: usize) -> bool {
    sentence_text
        .get(match_end..)
        .and_then(|rest| rest.trim_start().chars().next())
        .is_some_and(|c| CLAUSE_PUNCTUATION.contains(&c))
}
