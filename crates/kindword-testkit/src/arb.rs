//! Proptest strategies for generating valid test inputs.
//!
//! This module provides constructive strategies that generate valid inputs
//! without relying on filtering. Generated rules always compile.
//!
//! # Bounds
//!
//! To keep tests fast, the following bounds are enforced:
//! - Max phrases per rule: 3
//! - Max words per phrase: 3
//! - Max alternatives per phrase: 4
//! - Max filler words per sentence: 8

use kindword_types::{
    Category, ContextClass, FeedbackConfig, PhraseConfig, RuleConfig, FEEDBACK_DEROGATORY,
    FEEDBACK_EXCLUSIONARY, SCORE_NON_INCLUSIVE, SCORE_POTENTIALLY_NON_INCLUSIVE,
};
use proptest::prelude::*;

// =============================================================================
// Constants for bounding generated data
// =============================================================================

/// Maximum number of phrases per generated rule
pub const MAX_PHRASES_PER_RULE: usize = 3;

/// Maximum number of words in a generated phrase
pub const MAX_WORDS_PER_PHRASE: usize = 3;

/// Maximum number of alternatives per generated phrase
pub const MAX_ALTERNATIVES: usize = 4;

/// Maximum number of filler words in a generated sentence
pub const MAX_FILLER_WORDS: usize = 8;

/// Filler vocabulary: untagged content words that never collide with
/// generated phrase words.
pub const FILLER_WORDS: &[&str] = &[
    "garden", "purple", "engine", "river", "window", "quickly", "table", "mountain", "yellow",
    "music", "paper", "walks", "person", "street", "zoo", "happy",
];

/// Phrase vocabulary, disjoint from [`FILLER_WORDS`].
pub const PHRASE_WORDS: &[&str] = &[
    "zorblat", "quintar", "flimbo", "gravix", "mendol", "trosk", "plenth", "vardin",
];

// =============================================================================
// Enum Strategies
// =============================================================================

/// Strategy for generating ContextClass values.
pub fn arb_context_class() -> impl Strategy<Value = ContextClass> {
    prop_oneof![
        Just(ContextClass::PastTenseVerb),
        Just(ContextClass::FunctionWord),
        Just(ContextClass::Punctuation),
    ]
}

/// Strategy for generating Category values.
pub fn arb_category() -> impl Strategy<Value = Category> {
    prop_oneof![
        Just(Category::Age),
        Just(Category::Culture),
        Just(Category::Disability),
        Just(Category::Gender),
        Just(Category::SexualOrientation),
        Just(Category::SocioeconomicStatus),
        Just(Category::Other),
    ]
}

// =============================================================================
// Text Strategies
// =============================================================================

/// A word from the phrase vocabulary.
pub fn arb_word() -> impl Strategy<Value = &'static str> {
    prop::sample::select(PHRASE_WORDS)
}

/// A filler word that is never tagged by the reference tokenizer.
pub fn arb_filler_word() -> impl Strategy<Value = &'static str> {
    prop::sample::select(FILLER_WORDS)
}

/// Up to [`MAX_FILLER_WORDS`] space-separated filler words.
pub fn arb_filler() -> impl Strategy<Value = String> {
    prop::collection::vec(arb_filler_word(), 0..=MAX_FILLER_WORDS).prop_map(|w| w.join(" "))
}

/// A phrase of 1..=[`MAX_WORDS_PER_PHRASE`] phrase-vocabulary words.
pub fn arb_phrase_text() -> impl Strategy<Value = String> {
    prop::collection::vec(arb_word(), 1..=MAX_WORDS_PER_PHRASE).prop_map(|w| w.join(" "))
}

// =============================================================================
// Config Strategies
// =============================================================================

/// Strategy for generating a valid PhraseConfig.
pub fn arb_phrase_config() -> impl Strategy<Value = PhraseConfig> {
    (
        arb_phrase_text(),
        prop::collection::vec(arb_context_class(), 0..=3),
        prop::collection::vec("[a-z]{3,10}( [a-z]{3,10})?", 0..=MAX_ALTERNATIVES),
    )
        .prop_map(|(text, mut followed_by, alternatives)| {
            followed_by.sort();
            followed_by.dedup();
            PhraseConfig {
                text,
                followed_by,
                alternatives,
                ..PhraseConfig::default()
            }
        })
}

/// Strategy for generating a valid, compilable RuleConfig.
///
/// Both feedback templates are always present so any mix of phrases with and
/// without alternatives compiles.
pub fn arb_rule_config() -> impl Strategy<Value = RuleConfig> {
    (
        "[a-z][a-zA-Z0-9]{0,15}",
        arb_category(),
        prop_oneof![
            Just(SCORE_NON_INCLUSIVE),
            Just(SCORE_POTENTIALLY_NON_INCLUSIVE)
        ],
        prop::collection::vec(arb_phrase_config(), 1..=MAX_PHRASES_PER_RULE),
    )
        .prop_map(|(id, category, score, phrase)| RuleConfig {
            id,
            category,
            score: Some(score),
            feedback: FeedbackConfig {
                with_alternative: Some(FEEDBACK_EXCLUSIONARY.to_string()),
                without_alternative: Some(FEEDBACK_DEROGATORY.to_string()),
            },
            learn_more_url: None,
            phrase,
            tags: vec![],
            test_cases: vec![],
        })
}
