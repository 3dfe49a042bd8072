//! Property-based tests for kindword-types.
//!
//! Serialized catalogs and receipts must validate against the JSON schemas
//! derived from the same types.

use jsonschema::JSONSchema;
use kindword_types::{
    AssessmentResult, CatalogFile, Category, ContextClass, Defaults, FailOn, FeedbackConfig, Mark,
    PhraseConfig, ReportReceipt, ReportSummary, RuleAssessment, RuleConfig, RuleTestCase, TextMeta,
    ToolMeta, REPORT_SCHEMA_V1,
};
use proptest::prelude::*;

fn compile_schema(schema: schemars::schema::RootSchema) -> JSONSchema {
    let value = serde_json::to_value(schema).expect("schema serializes");
    JSONSchema::compile(&value).expect("valid JSON schema")
}

fn catalog_schema() -> JSONSchema {
    compile_schema(schemars::schema_for!(CatalogFile))
}

fn report_schema() -> JSONSchema {
    compile_schema(schemars::schema_for!(ReportReceipt))
}

// ============================================================================
// Strategies
// ============================================================================

fn arb_category() -> impl Strategy<Value = Category> {
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

fn arb_context_class() -> impl Strategy<Value = ContextClass> {
    prop_oneof![
        Just(ContextClass::PastTenseVerb),
        Just(ContextClass::FunctionWord),
        Just(ContextClass::Punctuation),
    ]
}

fn arb_fail_on() -> impl Strategy<Value = FailOn> {
    prop_oneof![
        Just(FailOn::NonInclusive),
        Just(FailOn::Any),
        Just(FailOn::Never),
    ]
}

fn arb_words() -> impl Strategy<Value = String> {
    "[a-z]{1,10}( [a-z]{1,10}){0,2}"
}

fn arb_phrase_config() -> impl Strategy<Value = PhraseConfig> {
    (
        arb_words(),
        prop::collection::vec(arb_words(), 0..3),
        any::<bool>(),
        prop::collection::vec(arb_context_class(), 0..3),
        prop::collection::vec("[a-z]{1,8}", 0..3),
        prop::collection::vec(arb_words(), 0..4),
    )
        .prop_map(
            |(text, variants, case_sensitive, followed_by, not_followed_by, alternatives)| {
                PhraseConfig {
                    text,
                    variants,
                    case_sensitive,
                    followed_by,
                    not_followed_by,
                    not_preceded_by: vec![],
                    alternatives,
                }
            },
        )
}

fn arb_rule_config() -> impl Strategy<Value = RuleConfig> {
    (
        "[a-z][a-zA-Z0-9]{0,15}",
        arb_category(),
        prop::option::of(prop_oneof![Just(3u8), Just(6u8)]),
        prop::option::of("[A-Za-z {}<>/]{1,40}"),
        prop::option::of("https://[a-z]{3,10}\\.test/[a-z]{1,8}"),
        prop::collection::vec(arb_phrase_config(), 1..4),
        prop::collection::vec("[a-z]{1,8}", 0..3),
        prop::collection::vec((arb_words(), any::<bool>()), 0..3),
    )
        .prop_map(
            |(id, category, score, template, learn_more_url, phrase, tags, cases)| RuleConfig {
                id,
                category,
                score,
                feedback: FeedbackConfig {
                    with_alternative: template.clone(),
                    without_alternative: template,
                },
                learn_more_url,
                phrase,
                tags,
                test_cases: cases
                    .into_iter()
                    .map(|(input, should_match)| RuleTestCase {
                        input,
                        should_match,
                        description: None,
                    })
                    .collect(),
            },
        )
}

fn arb_catalog_file() -> impl Strategy<Value = CatalogFile> {
    (
        prop::collection::vec("[a-z]{1,8}\\.toml", 0..3),
        prop::option::of(arb_fail_on()),
        prop::collection::vec(arb_rule_config(), 0..5),
    )
        .prop_map(|(includes, fail_on, rule)| CatalogFile {
            includes,
            defaults: Defaults { fail_on },
            rule,
        })
}

fn arb_mark() -> impl Strategy<Value = Mark> {
    "[A-Za-z ,]{1,40}[.!?]".prop_map(|original| Mark {
        marked: format!("<yoastmark class='yoast-text-mark'>{original}</yoastmark>"),
        original,
    })
}

fn arb_rule_assessment() -> impl Strategy<Value = RuleAssessment> {
    (
        "[a-z][a-zA-Z]{0,12}",
        prop_oneof![Just(3u8), Just(6u8)],
        "[A-Za-z <>/.]{1,80}",
        arb_category(),
        prop::collection::vec(arb_mark(), 1..4),
    )
        .prop_map(|(identifier, score, text, category, marks)| RuleAssessment {
            result: AssessmentResult {
                identifier,
                score,
                text,
            },
            category,
            marks,
        })
}

fn arb_report_receipt() -> impl Strategy<Value = ReportReceipt> {
    (
        0u32..100,
        0u32..2000,
        prop::collection::vec(arb_rule_assessment(), 0..5),
        0u32..50,
    )
        .prop_map(|(sentences, tokens, assessments, rules_evaluated)| {
            let summary = ReportSummary {
                rules_evaluated,
                rules_applicable: assessments.len() as u32,
                marks: assessments.iter().map(|a| a.marks.len() as u32).sum(),
                non_inclusive: assessments.iter().filter(|a| a.result.score <= 3).count() as u32,
                potentially_non_inclusive: assessments
                    .iter()
                    .filter(|a| a.result.score > 3)
                    .count() as u32,
            };
            ReportReceipt {
                schema: REPORT_SCHEMA_V1.to_string(),
                tool: ToolMeta {
                    name: "kindword".to_string(),
                    version: "0.1.0".to_string(),
                },
                text: TextMeta { sentences, tokens },
                assessments,
                summary,
            }
        })
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn catalog_file_validates_against_schema(catalog in arb_catalog_file()) {
        let schema = catalog_schema();
        let json = serde_json::to_value(&catalog).expect("catalog serializes");

        let result = schema.validate(&json);
        prop_assert!(
            result.is_ok(),
            "catalog should validate. Errors: {:?}",
            result.err().map(|e| e.map(|err| err.to_string()).collect::<Vec<_>>())
        );
    }

    #[test]
    fn report_receipt_validates_against_schema(receipt in arb_report_receipt()) {
        let schema = report_schema();
        let json = serde_json::to_value(&receipt).expect("receipt serializes");

        let result = schema.validate(&json);
        prop_assert!(
            result.is_ok(),
            "receipt should validate. Errors: {:?}",
            result.err().map(|e| e.map(|err| err.to_string()).collect::<Vec<_>>())
        );
    }

    /// Catalogs written as TOML read back unchanged.
    #[test]
    fn catalog_file_survives_toml(catalog in arb_catalog_file()) {
        let text = toml::to_string(&catalog).expect("catalog serializes to TOML");
        let parsed: CatalogFile = toml::from_str(&text).expect("catalog parses from TOML");
        prop_assert_eq!(parsed, catalog);
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn built_in_catalog_validates_against_schema() {
        let json = serde_json::to_value(CatalogFile::built_in()).expect("catalog serializes");
        assert!(catalog_schema().is_valid(&json));
    }

    #[test]
    fn schema_rejects_unknown_context_class() {
        let json = serde_json::json!({
            "rule": [{
                "id": "x",
                "score": 3,
                "phrase": [{ "text": "x", "followed_by": ["adjective"] }]
            }]
        });
        assert!(!catalog_schema().is_valid(&json));
    }

    #[test]
    fn hand_written_catalog_parses() {
        let text = r#"
includes = ["team.toml"]

[defaults]
fail_on = "any"

[[rule]]
id = "chairman"
category = "gender"
score = 6
tags = ["workplace"]

[rule.feedback]
with_alternative = "Be careful when using <i>{phrase}</i>. Consider <i>{alternative}</i>."

[[rule.phrase]]
text = "chairman"
variants = ["chairmen"]
alternatives = ["chair", "chairperson"]

[[rule.test_cases]]
input = "The chairman spoke."
should_match = true
"#;
        let catalog: CatalogFile = toml::from_str(text).expect("parses");
        assert_eq!(catalog.includes, vec!["team.toml"]);
        assert_eq!(catalog.defaults.fail_on, Some(FailOn::Any));

        let rule = &catalog.rule[0];
        assert_eq!(rule.category, Category::Gender);
        assert_eq!(rule.score, Some(6));
        assert_eq!(rule.phrase[0].forms().collect::<Vec<_>>(), ["chairman", "chairmen"]);
        assert!(rule.feedback.without_alternative.is_none());
        assert!(rule.test_cases[0].should_match);
    }
}
