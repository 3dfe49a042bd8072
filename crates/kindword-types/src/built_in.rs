use crate::{
    CatalogFile, Category, ContextClass, Defaults, FeedbackConfig, PhraseConfig, RuleConfig,
    RuleTestCase, FEEDBACK_DEROGATORY, FEEDBACK_EXCLUSIONARY, FEEDBACK_POTENTIALLY_EXCLUSIONARY,
    FEEDBACK_POTENTIALLY_EXCLUSIONARY_MEN, FEEDBACK_POTENTIALLY_HARMFUL, SCORE_NON_INCLUSIVE,
    SCORE_POTENTIALLY_NON_INCLUSIVE,
};

const NOUN_CONTEXT: [ContextClass; 3] = [
    ContextClass::PastTenseVerb,
    ContextClass::FunctionWord,
    ContextClass::Punctuation,
];

impl CatalogFile {
    /// The built-in English gender catalog.
    pub fn built_in() -> Self {
        Self {
            includes: vec![],
            defaults: Defaults::default(),
            rule: vec![
                gender_rule(
                    "mankind",
                    SCORE_NON_INCLUSIVE,
                    FEEDBACK_EXCLUSIONARY,
                    vec![phrase(
                        "mankind",
                        &["individuals", "people", "persons", "human beings", "humanity"],
                    )],
                    vec![
                        case("Mankind is so great!", true),
                        case("Humanity is so great!", false),
                    ],
                ),
                gender_rule(
                    "firemen",
                    SCORE_POTENTIALLY_NON_INCLUSIVE,
                    FEEDBACK_POTENTIALLY_EXCLUSIONARY_MEN,
                    vec![phrase("firemen", &["firefighters"])],
                    vec![
                        case("Look at those firemen!", true),
                        case("Look at those firefighters!", false),
                    ],
                ),
                gender_rule(
                    "policemen",
                    SCORE_POTENTIALLY_NON_INCLUSIVE,
                    FEEDBACK_POTENTIALLY_EXCLUSIONARY_MEN,
                    vec![phrase("policemen", &["police officers"])],
                    vec![case("The policemen arrived late.", true)],
                ),
                gender_rule(
                    "mailmen",
                    SCORE_POTENTIALLY_NON_INCLUSIVE,
                    FEEDBACK_POTENTIALLY_EXCLUSIONARY_MEN,
                    vec![phrase("mailmen", &["mail carriers", "postal workers"])],
                    vec![case("The mailmen were on strike.", true)],
                ),
                gender_rule(
                    "manpower",
                    SCORE_POTENTIALLY_NON_INCLUSIVE,
                    FEEDBACK_POTENTIALLY_EXCLUSIONARY,
                    vec![phrase("manpower", &["workforce", "staff", "personnel"])],
                    vec![
                        case("We lack the manpower for this.", true),
                        case("The man powered through.", false),
                    ],
                ),
                gender_rule(
                    "bothGenders",
                    SCORE_POTENTIALLY_NON_INCLUSIVE,
                    FEEDBACK_POTENTIALLY_EXCLUSIONARY,
                    vec![phrase("both genders", &["all genders"])],
                    vec![case("This is open to both genders.", true)],
                ),
                gender_rule(
                    "oppositeGender",
                    SCORE_POTENTIALLY_NON_INCLUSIVE,
                    FEEDBACK_POTENTIALLY_EXCLUSIONARY,
                    vec![
                        phrase("opposite gender", &["another gender", "a different gender"]),
                        phrase("opposite sex", &["another sex", "a different sex"]),
                    ],
                    vec![case("He was attracted to the opposite sex.", true)],
                ),
                gender_rule(
                    "shemale",
                    SCORE_NON_INCLUSIVE,
                    FEEDBACK_DEROGATORY,
                    vec![PhraseConfig {
                        variants: vec!["she-male".to_string()],
                        ..phrase("shemale", &[])
                    }],
                    vec![case("She's acting like a shemale.", true)],
                ),
                gender_rule(
                    "heShe",
                    SCORE_NON_INCLUSIVE,
                    FEEDBACK_DEROGATORY,
                    vec![PhraseConfig {
                        variants: vec!["he-she".to_string()],
                        ..phrase("heshe", &[])
                    }],
                    vec![case("They called him a he-she.", true)],
                ),
                gender_rule(
                    "aTransgender",
                    SCORE_NON_INCLUSIVE,
                    FEEDBACK_POTENTIALLY_HARMFUL,
                    vec![
                        noun_phrase("the transgender", &["transgender person"]),
                        noun_phrase("a transgender", &["transgender person"]),
                    ],
                    vec![
                        case("The transgender worked, the better they are.", true),
                        case("The transgender however, did not go to the zoo.", true),
                        case("I have always loved the transgender!", true),
                        case("The transgender person walks on the street.", false),
                    ],
                ),
                gender_rule(
                    "transgenders",
                    SCORE_NON_INCLUSIVE,
                    FEEDBACK_POTENTIALLY_HARMFUL,
                    vec![phrase(
                        "transgenders",
                        &["trans people", "transgender people"],
                    )],
                    vec![case("Transgenders deserve respect.", true)],
                ),
                gender_rule(
                    "transgendered",
                    SCORE_NON_INCLUSIVE,
                    FEEDBACK_POTENTIALLY_HARMFUL,
                    vec![phrase("transgendered", &["transgender", "trans"])],
                    vec![case("She is transgendered.", true)],
                ),
                gender_rule(
                    "sexChange",
                    SCORE_NON_INCLUSIVE,
                    FEEDBACK_POTENTIALLY_HARMFUL,
                    vec![
                        phrase("sex change", &["transition", "gender affirming surgery"]),
                        phrase("sex-change", &["transition", "gender affirming surgery"]),
                    ],
                    vec![case("She had a sex change last year.", true)],
                ),
            ],
        }
    }
}

fn gender_rule(
    id: &str,
    score: u8,
    template: &str,
    phrases: Vec<PhraseConfig>,
    test_cases: Vec<RuleTestCase>,
) -> RuleConfig {
    let has_alternatives = phrases.iter().any(|p| !p.alternatives.is_empty());
    let feedback = if has_alternatives {
        FeedbackConfig {
            with_alternative: Some(template.to_string()),
            without_alternative: None,
        }
    } else {
        FeedbackConfig {
            with_alternative: None,
            without_alternative: Some(template.to_string()),
        }
    };

    RuleConfig {
        id: id.to_string(),
        category: Category::Gender,
        score: Some(score),
        feedback,
        learn_more_url: None,
        phrase: phrases,
        tags: vec!["gender".to_string()],
        test_cases,
    }
}

fn phrase(text: &str, alternatives: &[&str]) -> PhraseConfig {
    PhraseConfig {
        text: text.to_string(),
        alternatives: alternatives.iter().map(|s| s.to_string()).collect(),
        ..PhraseConfig::default()
    }
}

/// A phrase that only counts when used as a noun, i.e. when it is followed
/// by a verb in the past tense, a function word, or punctuation.
fn noun_phrase(text: &str, alternatives: &[&str]) -> PhraseConfig {
    PhraseConfig {
        followed_by: NOUN_CONTEXT.to_vec(),
        ..phrase(text, alternatives)
    }
}

fn case(input: &str, should_match: bool) -> RuleTestCase {
    RuleTestCase {
        input: input.to_string(),
        should_match,
        description: None,
    }
}
