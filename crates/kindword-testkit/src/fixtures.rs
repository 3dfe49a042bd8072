//! Common test fixtures for kindword.
//!
//! This module provides sample catalogs, texts, and expected feedback strings
//! for use in tests across the workspace.

use kindword_types::{
    CatalogFile, Category, ContextClass, Defaults, FeedbackConfig, PhraseConfig, RuleConfig,
    FEEDBACK_DEROGATORY, FEEDBACK_EXCLUSIONARY, SCORE_NON_INCLUSIVE,
};

// =============================================================================
// Sample Catalogs
// =============================================================================

/// Collection of sample catalogs for testing.
pub mod sample_catalogs {
    use super::*;

    /// An empty catalog with default values.
    pub fn empty() -> CatalogFile {
        CatalogFile {
            includes: vec![],
            defaults: Defaults::default(),
            rule: vec![],
        }
    }

    /// The built-in catalog from kindword-types.
    pub fn built_in() -> CatalogFile {
        CatalogFile::built_in()
    }

    /// A single context-free rule.
    pub fn minimal() -> CatalogFile {
        CatalogFile {
            includes: vec![],
            defaults: Defaults::default(),
            rule: vec![simple_rule("test.rule", "testword", &["alternative"])],
        }
    }

    /// A rule whose phrase only counts as a noun.
    pub fn contextual() -> CatalogFile {
        let mut rule = simple_rule("test.noun", "the thing", &["the item"]);
        rule.phrase[0].followed_by = vec![
            ContextClass::PastTenseVerb,
            ContextClass::FunctionWord,
            ContextClass::Punctuation,
        ];
        CatalogFile {
            includes: vec![],
            defaults: Defaults::default(),
            rule: vec![rule],
        }
    }

    /// Build a gender rule with one phrase. Empty `alternatives` selects the
    /// derogatory template.
    pub fn simple_rule(id: &str, phrase: &str, alternatives: &[&str]) -> RuleConfig {
        let feedback = if alternatives.is_empty() {
            FeedbackConfig {
                with_alternative: None,
                without_alternative: Some(FEEDBACK_DEROGATORY.to_string()),
            }
        } else {
            FeedbackConfig {
                with_alternative: Some(FEEDBACK_EXCLUSIONARY.to_string()),
                without_alternative: None,
            }
        };

        RuleConfig {
            id: id.to_string(),
            category: Category::Gender,
            score: Some(SCORE_NON_INCLUSIVE),
            feedback,
            learn_more_url: None,
            phrase: vec![PhraseConfig {
                text: phrase.to_string(),
                alternatives: alternatives.iter().map(|s| s.to_string()).collect(),
                ..PhraseConfig::default()
            }],
            tags: vec![],
            test_cases: vec![],
        }
    }
}

// =============================================================================
// Sample Texts
// =============================================================================

/// Collection of sample texts and expected feedback.
pub mod sample_texts {
    pub const MANKIND: &str = "Mankind is so great! I could talk for hours about it.";
    pub const FIREMEN: &str = "Look at those firemen! They're putting out the fire.";
    pub const FIREFIGHTERS: &str = "Look at those firefighters! They're putting out the fire.";
    pub const SHEMALE: &str = "She's acting like a shemale.";
    pub const TRANSGENDER_PAST_TENSE: &str = "The transgender worked, the better they are.";
    pub const TRANSGENDER_FUNCTION_WORD: &str = "The transgender however, did not go to the zoo.";
    pub const TRANSGENDER_PUNCTUATION: &str = "I have always loved the transgender!";
    pub const TRANSGENDER_NEITHER: &str = "The transgender person walks on the street.";

    pub const LEARN_MORE_GENDER: &str =
        "<a href='https://yoa.st/inclusive-language-gender' target='_blank'>Learn more.</a>";

    pub const MANKIND_FEEDBACK: &str = "Avoid using <i>mankind</i> as it is exclusionary. \
Consider using an alternative, such as <i>individuals, people, persons, human beings, humanity</i>. \
<a href='https://yoa.st/inclusive-language-gender' target='_blank'>Learn more.</a>";

    pub const FIREMEN_FEEDBACK: &str = "Be careful when using <i>firemen</i> as it can be \
exclusionary. Unless you are sure that the group you refer to only consists of men, use an \
alternative, such as <i>firefighters</i>. \
<a href='https://yoa.st/inclusive-language-gender' target='_blank'>Learn more.</a>";

    pub const SHEMALE_FEEDBACK: &str = "Avoid using <i>shemale</i> as it is derogatory. \
<a href='https://yoa.st/inclusive-language-gender' target='_blank'>Learn more.</a>";

    pub const TRANSGENDER_FEEDBACK: &str = "Avoid using <i>the transgender</i> as it is \
potentially harmful. Consider using an alternative, such as <i>transgender person</i>. \
<a href='https://yoa.st/inclusive-language-gender' target='_blank'>Learn more.</a>";
}
