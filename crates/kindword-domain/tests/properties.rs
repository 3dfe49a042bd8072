//! Property-based tests for kindword-domain.

use proptest::prelude::*;

use kindword_domain::{assess_rule, compile_rule, BasicTokenizer, Tokenizer};
use kindword_testkit::arb::{arb_context_class, arb_filler, arb_phrase_text, arb_rule_config};
use kindword_testkit::sample_catalogs::simple_rule;
use kindword_types::ContextClass;

/// What directly follows the phrase in a generated sentence.
#[derive(Debug, Clone, Copy)]
enum Follower {
    PastTense,
    FunctionWord,
    Punctuation,
    Neutral,
}

impl Follower {
    fn text(self) -> &'static str {
        match self {
            Follower::PastTense => "worked",
            Follower::FunctionWord => "however",
            Follower::Punctuation => ",",
            Follower::Neutral => "person",
        }
    }

    fn class(self) -> Option<ContextClass> {
        match self {
            Follower::PastTense => Some(ContextClass::PastTenseVerb),
            Follower::FunctionWord => Some(ContextClass::FunctionWord),
            Follower::Punctuation => Some(ContextClass::Punctuation),
            Follower::Neutral => None,
        }
    }
}

fn arb_follower() -> impl Strategy<Value = Follower> {
    prop_oneof![
        Just(Follower::PastTense),
        Just(Follower::FunctionWord),
        Just(Follower::Punctuation),
        Just(Follower::Neutral),
    ]
}

fn join_words(parts: &[&str]) -> String {
    parts
        .iter()
        .filter(|p| !p.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}

proptest! {
    /// A context-free phrase present verbatim always applies, with one mark per
    /// occurrence.
    #[test]
    fn verbatim_phrase_gives_one_mark_per_occurrence(
        phrase in arb_phrase_text(),
        sentences in prop::collection::vec((arb_filler(), any::<bool>(), arb_filler()), 1..6),
    ) {
        let rule = compile_rule(&simple_rule("p", &phrase, &["alt"])).unwrap();

        let mut expected = 0;
        let text: Vec<String> = sentences
            .iter()
            .map(|(before, include, after)| {
                let words = if *include {
                    expected += 1;
                    join_words(&[before, &phrase, after])
                } else {
                    join_words(&[before, "placeholder", after])
                };
                format!("{words}.")
            })
            .collect();
        let tokenized = BasicTokenizer::new().tokenize(&text.join(" "));

        let assessment = assess_rule(&rule, &tokenized);
        prop_assert_eq!(assessment.is_applicable(), expected > 0);
        prop_assert_eq!(assessment.marks().len(), expected);
    }

    /// A candidate is accepted iff the follower satisfies a configured class.
    #[test]
    fn context_acceptance_is_logical_or(
        phrase in arb_phrase_text(),
        classes in prop::collection::btree_set(arb_context_class(), 1..=3),
        follower in arb_follower(),
        before in arb_filler(),
        after in arb_filler(),
    ) {
        let mut cfg = simple_rule("c", &phrase, &["alt"]);
        cfg.phrase[0].followed_by = classes.iter().copied().collect();
        let rule = compile_rule(&cfg).unwrap();

        let sentence = format!("{}.", join_words(&[&before, &phrase, follower.text(), &after]));
        let tokenized = BasicTokenizer::new().tokenize(&sentence);

        let expected = follower.class().is_some_and(|c| classes.contains(&c));
        prop_assert_eq!(assess_rule(&rule, &tokenized).is_applicable(), expected);
    }

    /// Re-assessing identical input yields deep-equal outcomes.
    #[test]
    fn assessment_is_idempotent(
        cfg in arb_rule_config(),
        before in arb_filler(),
        after in arb_filler(),
    ) {
        let rule = compile_rule(&cfg).unwrap();
        let phrase = cfg.phrase[0].text.clone();
        let sentence = format!("{}!", join_words(&[&before, &phrase, &after]));
        let tokenized = BasicTokenizer::new().tokenize(&sentence);

        let first = assess_rule(&rule, &tokenized);
        let second = assess_rule(&rule, &tokenized);
        prop_assert_eq!(first.marks(), second.marks());
        prop_assert_eq!(first, second);
    }

    /// Score and text are a single value shared by every mark of a rule.
    #[test]
    fn result_is_constant_across_matches(
        cfg in arb_rule_config(),
        repeats in 1usize..5,
    ) {
        let rule = compile_rule(&cfg).unwrap();
        let phrase = cfg.phrase[0].text.clone();
        let text = vec![format!("garden {phrase}."); repeats].join(" ");
        let tokenized = BasicTokenizer::new().tokenize(&text);

        let assessment = assess_rule(&rule, &tokenized);
        if let Some(result) = assessment.result() {
            prop_assert_eq!(result.score, cfg.score.unwrap());
            prop_assert!(result.text.ends_with("Learn more.</a>"));
            prop_assert!(!assessment.marks().is_empty());
        } else {
            prop_assert!(assessment.marks().is_empty());
        }
    }

    /// Text without any phrase word never applies.
    #[test]
    fn absence_of_match_means_not_applicable(
        cfg in arb_rule_config(),
        filler in arb_filler(),
    ) {
        let rule = compile_rule(&cfg).unwrap();
        let tokenized = BasicTokenizer::new().tokenize(&format!("{filler}."));

        let assessment = assess_rule(&rule, &tokenized);
        prop_assert!(!assessment.is_applicable());
        prop_assert!(assessment.marks().is_empty());
        prop_assert!(assessment.result().is_none());
    }
}
