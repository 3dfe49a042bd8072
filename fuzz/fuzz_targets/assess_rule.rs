//! Fuzz target for single-rule assessment.
//!
//! Builds a rule from arbitrary phrases and context classes and checks the
//! applicability invariants against arbitrary text.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use kindword_domain::{compile_rule, Assessor, BasicTokenizer, Tokenizer};
use kindword_types::{
    Category, ContextClass, FeedbackConfig, PhraseConfig, RuleConfig, FEEDBACK_DEROGATORY,
    FEEDBACK_EXCLUSIONARY, MARK_CLOSE, MARK_OPEN,
};

#[derive(Arbitrary, Debug)]
struct FuzzInput {
    text: String,
    phrases: Vec<FuzzPhrase>,
    score: u8,
}

#[derive(Arbitrary, Debug)]
struct FuzzPhrase {
    text: String,
    variants: Vec<String>,
    case_sensitive: bool,
    context: u8,
    not_followed_by: Vec<String>,
    alternatives: Vec<String>,
}

impl FuzzPhrase {
    fn to_phrase_config(&self) -> PhraseConfig {
        let mut followed_by = Vec::new();
        if self.context & 1 != 0 {
            followed_by.push(ContextClass::PastTenseVerb);
        }
        if self.context & 2 != 0 {
            followed_by.push(ContextClass::FunctionWord);
        }
        if self.context & 4 != 0 {
            followed_by.push(ContextClass::Punctuation);
        }

        PhraseConfig {
            text: self.text.clone(),
            variants: self.variants.iter().take(4).cloned().collect(),
            case_sensitive: self.case_sensitive,
            followed_by,
            not_followed_by: self.not_followed_by.iter().take(4).cloned().collect(),
            not_preceded_by: vec![],
            alternatives: self.alternatives.iter().take(4).cloned().collect(),
        }
    }
}

fuzz_target!(|input: FuzzInput| {
    if input.phrases.is_empty() || input.phrases.len() > 8 || input.text.len() > 4096 {
        return;
    }

    let cfg = RuleConfig {
        id: "fuzz".to_string(),
        category: Category::Other,
        score: Some(input.score),
        feedback: FeedbackConfig {
            with_alternative: Some(FEEDBACK_EXCLUSIONARY.to_string()),
            without_alternative: Some(FEEDBACK_DEROGATORY.to_string()),
        },
        learn_more_url: None,
        phrase: input.phrases.iter().map(FuzzPhrase::to_phrase_config).collect(),
        tags: vec![],
        test_cases: vec![],
    };

    // Empty surface forms are configuration errors.
    let Ok(rule) = compile_rule(&cfg) else {
        return;
    };
    let assessor = Assessor::from(rule);
    let text = BasicTokenizer::new().tokenize(&input.text);

    let first = assessor.assess(&text);
    let second = assessor.assess(&text);
    assert_eq!(first, second);

    match first.result() {
        Some(result) => {
            assert_eq!(result.score, input.score);
            assert!(result.text.ends_with("Learn more.</a>"));
            assert!(!first.marks().is_empty());
        }
        None => assert!(first.marks().is_empty()),
    }

    for mark in first.marks() {
        assert!(mark.marked.starts_with(MARK_OPEN));
        assert!(mark.marked.ends_with(MARK_CLOSE));
        assert!(text.sentences.iter().any(|s| s.text == mark.original));
    }
});
