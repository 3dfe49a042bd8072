//! End-to-end scenarios against the built-in gender catalog.

use kindword_domain::{Assessor, BasicTokenizer, RuleCatalog, Tokenizer};
use kindword_testkit::sample_texts::*;
use kindword_testkit::TextBuilder;
use kindword_types::{CatalogFile, Mark, TokenTag};

fn assessor(rule_id: &str) -> Assessor {
    let catalog = RuleCatalog::compile(&CatalogFile::built_in().rule).expect("built-in compiles");
    Assessor::from_catalog(&catalog, rule_id).expect("rule exists")
}

fn mark(sentence: &str) -> Mark {
    Mark {
        original: sentence.to_string(),
        marked: format!("<yoastmark class='yoast-text-mark'>{sentence}</yoastmark>"),
    }
}

#[test]
fn targets_non_inclusive_phrases() {
    let text = BasicTokenizer::new().tokenize(MANKIND);
    let assessment = assessor("mankind").assess(&text);

    assert!(assessment.is_applicable());
    let result = assessment.result().expect("applicable");
    assert_eq!(result.score, 3);
    assert_eq!(result.text, MANKIND_FEEDBACK);
    assert!(assessment.has_marks());
    assert_eq!(assessment.marks(), &[mark("Mankind is so great!")]);
}

#[test]
fn targets_potentially_non_inclusive_phrases() {
    let text = BasicTokenizer::new().tokenize(FIREMEN);
    let assessment = assessor("firemen").assess(&text);

    assert!(assessment.is_applicable());
    let result = assessment.result().expect("applicable");
    assert_eq!(result.score, 6);
    assert_eq!(result.text, FIREMEN_FEEDBACK);
    assert_eq!(assessment.marks(), &[mark("Look at those firemen!")]);
}

#[test]
fn does_not_target_other_phrases() {
    let text = BasicTokenizer::new().tokenize(FIREFIGHTERS);
    let assessment = assessor("firemen").assess(&text);

    assert!(!assessment.is_applicable());
    assert!(assessment.result().is_none());
    assert_eq!(assessment.marks(), &[] as &[Mark]);
}

#[test]
fn feedback_without_an_alternative() {
    let text = BasicTokenizer::new().tokenize(SHEMALE);
    let assessment = assessor("shemale").assess(&text);

    assert!(assessment.is_applicable());
    let result = assessment.result().expect("applicable");
    assert_eq!(result.score, 3);
    assert_eq!(result.text, SHEMALE_FEEDBACK);
    assert_eq!(assessment.marks(), &[mark("She's acting like a shemale.")]);
}

#[test]
fn the_transgender_followed_by_past_tense() {
    let text = BasicTokenizer::new().tokenize(TRANSGENDER_PAST_TENSE);
    let assessment = assessor("aTransgender").assess(&text);

    assert!(assessment.is_applicable());
    let result = assessment.result().expect("applicable");
    assert_eq!(result.score, 3);
    assert_eq!(result.text, TRANSGENDER_FEEDBACK);
    assert_eq!(assessment.marks(), &[mark(TRANSGENDER_PAST_TENSE)]);
}

#[test]
fn the_transgender_followed_by_function_word() {
    let text = BasicTokenizer::new().tokenize(TRANSGENDER_FUNCTION_WORD);
    let assessment = assessor("aTransgender").assess(&text);

    assert!(assessment.is_applicable());
    assert_eq!(
        assessment.result().map(|r| r.text.as_str()),
        Some(TRANSGENDER_FEEDBACK)
    );
    assert_eq!(assessment.marks(), &[mark(TRANSGENDER_FUNCTION_WORD)]);
}

#[test]
fn the_transgender_followed_by_punctuation() {
    let text = BasicTokenizer::new().tokenize(TRANSGENDER_PUNCTUATION);
    let assessment = assessor("aTransgender").assess(&text);

    assert!(assessment.is_applicable());
    assert_eq!(
        assessment.result().map(|r| r.text.as_str()),
        Some(TRANSGENDER_FEEDBACK)
    );
    assert_eq!(assessment.marks(), &[mark(TRANSGENDER_PUNCTUATION)]);
}

#[test]
fn the_transgender_followed_by_neither() {
    let text = BasicTokenizer::new().tokenize(TRANSGENDER_NEITHER);
    let assessment = assessor("aTransgender").assess(&text);

    assert!(!assessment.is_applicable());
    assert!(assessment.marks().is_empty());
}

#[test]
fn externally_tagged_text_is_supported() {
    // A tagger that emits punctuation as separate tokens and tags participles.
    let text = TextBuilder::new()
        .sentence("The transgender arrived.")
        .function_word("The")
        .word("transgender")
        .tagged("arrived", &[TokenTag::SimplePast, TokenTag::PastParticiple])
        .punct(".")
        .done()
        .build();

    let assessment = assessor("aTransgender").assess(&text);
    assert!(assessment.is_applicable());
    assert_eq!(assessment.marks(), &[mark("The transgender arrived.")]);
}

#[test]
fn one_mark_per_occurrence_with_shared_result() {
    let text = BasicTokenizer::new()
        .tokenize("Firemen are brave. I met firemen today. Firemen and firemen!");
    let assessment = assessor("firemen").assess(&text);

    assert_eq!(
        assessment.marks(),
        &[
            mark("Firemen are brave."),
            mark("I met firemen today."),
            mark("Firemen and firemen!"),
            mark("Firemen and firemen!"),
        ]
    );
    assert_eq!(
        assessment.result().map(|r| r.text.as_str()),
        Some(FIREMEN_FEEDBACK)
    );
}

#[test]
fn built_in_rule_test_cases_hold() {
    let cfg = CatalogFile::built_in();
    let catalog = RuleCatalog::compile(&cfg.rule).expect("built-in compiles");
    let tokenizer = BasicTokenizer::new();

    for rule in &cfg.rule {
        let assessor = Assessor::from_catalog(&catalog, &rule.id).expect("rule exists");
        for case in &rule.test_cases {
            let applicable = assessor.assess(&tokenizer.tokenize(&case.input)).is_applicable();
            assert_eq!(
                applicable, case.should_match,
                "rule '{}' on input {:?}",
                rule.id, case.input
            );
        }
    }
}
