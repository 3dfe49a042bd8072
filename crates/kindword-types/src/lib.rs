//! Data types (catalog + tokenized text + receipts) for kindword.
//!
//! This crate is intentionally "dumb": pure DTOs with serde + schemars.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

mod built_in;

// ── Schema Identifiers ─────────────────────────────────────────
pub const REPORT_SCHEMA_V1: &str = "kindword.report.v1";

// ── Score Tiers ────────────────────────────────────────────────
pub const SCORE_NON_INCLUSIVE: u8 = 3;
pub const SCORE_POTENTIALLY_NON_INCLUSIVE: u8 = 6;
pub const SCORE_GOOD: u8 = 9;

// ── Highlight Decoration ───────────────────────────────────────
// The highlighting UI keys on this exact wrapper. Do not vary it per rule.
pub const MARK_OPEN: &str = "<yoastmark class='yoast-text-mark'>";
pub const MARK_CLOSE: &str = "</yoastmark>";

// ── Feedback Placeholders ──────────────────────────────────────
pub const PLACEHOLDER_PHRASE: &str = "{phrase}";
pub const PLACEHOLDER_ALTERNATIVE: &str = "{alternative}";

// ── Shared Feedback Templates ──────────────────────────────────
pub const FEEDBACK_EXCLUSIONARY: &str = "Avoid using <i>{phrase}</i> as it is exclusionary. \
Consider using an alternative, such as {alternative}.";
pub const FEEDBACK_POTENTIALLY_EXCLUSIONARY: &str = "Be careful when using <i>{phrase}</i> as it \
can be exclusionary. Consider using an alternative, such as {alternative}.";
pub const FEEDBACK_POTENTIALLY_EXCLUSIONARY_MEN: &str = "Be careful when using <i>{phrase}</i> as \
it can be exclusionary. Unless you are sure that the group you refer to only consists of men, \
use an alternative, such as {alternative}.";
pub const FEEDBACK_POTENTIALLY_HARMFUL: &str = "Avoid using <i>{phrase}</i> as it is potentially \
harmful. Consider using an alternative, such as {alternative}.";
pub const FEEDBACK_DEROGATORY: &str = "Avoid using <i>{phrase}</i> as it is derogatory.";

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Age,
    Culture,
    Disability,
    Gender,
    SexualOrientation,
    SocioeconomicStatus,
    #[default]
    Other,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Age => "age",
            Category::Culture => "culture",
            Category::Disability => "disability",
            Category::Gender => "gender",
            Category::SexualOrientation => "sexual_orientation",
            Category::SocioeconomicStatus => "socioeconomic_status",
            Category::Other => "other",
        }
    }

    /// Default "Learn more" target for rules in this category.
    pub fn learn_more_url(self) -> &'static str {
        match self {
            Category::Age => "https://yoa.st/inclusive-language-age",
            Category::Culture => "https://yoa.st/inclusive-language-culture",
            Category::Disability => "https://yoa.st/inclusive-language-disability",
            Category::Gender => "https://yoa.st/inclusive-language-gender",
            Category::SexualOrientation => "https://yoa.st/inclusive-language-sex-orientation",
            Category::SocioeconomicStatus => "https://yoa.st/inclusive-language-ses",
            Category::Other => "https://yoa.st/inclusive-language-other",
        }
    }
}

/// A grammatical or punctuation condition on the token following a match.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ContextClass {
    /// Followed by a past participle or simple past verb.
    PastTenseVerb,
    /// Followed by a closed-class function word.
    FunctionWord,
    /// Followed by sentence-ending or clause punctuation.
    Punctuation,
}

impl ContextClass {
    pub fn as_str(self) -> &'static str {
        match self {
            ContextClass::PastTenseVerb => "past_tense_verb",
            ContextClass::FunctionWord => "function_word",
            ContextClass::Punctuation => "punctuation",
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum FailOn {
    /// Fail only when a rule scored as non-inclusive applies.
    NonInclusive,
    /// Fail whenever any rule applies.
    Any,
    Never,
}

impl FailOn {
    pub fn as_str(self) -> &'static str {
        match self {
            FailOn::NonInclusive => "non_inclusive",
            FailOn::Any => "any",
            FailOn::Never => "never",
        }
    }
}

// ============================================================================
// Tokenized text (supplied by the linguistic tokenizer)
// ============================================================================

/// Tag assigned to a token by the linguistic tokenizer.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum TokenTag {
    PastParticiple,
    SimplePast,
    FunctionWord,
    Punctuation,
}

/// Byte offsets into the owning sentence's text.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
    JsonSchema,
)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Token {
    /// Surface text exactly as it appears in the sentence.
    pub text: String,

    /// Normalized (lowercased) form. Empty means "derive from `text`".
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub normalized: String,

    pub span: Span,

    /// Tags may be missing entirely when the tokenizer could not classify the token.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<TokenTag>,
}

impl Token {
    pub fn has_tag(&self, tag: TokenTag) -> bool {
        self.tags.contains(&tag)
    }

    /// The normalized form, falling back to the lowercased surface text.
    pub fn normalized_form(&self) -> std::borrow::Cow<'_, str> {
        if self.normalized.is_empty() {
            std::borrow::Cow::Owned(self.text.to_lowercase().replace('’', "'"))
        } else {
            std::borrow::Cow::Borrowed(self.normalized.as_str())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct Sentence {
    /// Verbatim sentence text, including any terminal punctuation the tokenizer kept.
    pub text: String,
    #[serde(default)]
    pub tokens: Vec<Token>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct TokenizedText {
    pub sentences: Vec<Sentence>,
}

impl TokenizedText {
    pub fn token_count(&self) -> usize {
        self.sentences.iter().map(|s| s.tokens.len()).sum()
    }
}

// ============================================================================
// Rule catalog
// ============================================================================

/// The on-disk catalog file.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct CatalogFile {
    /// Include other catalog files. Paths are relative to this file's directory.
    /// Rules are merged: later definitions override earlier ones by rule ID.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub includes: Vec<String>,

    #[serde(default)]
    pub defaults: Defaults,

    #[serde(default)]
    pub rule: Vec<RuleConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Defaults {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fail_on: Option<FailOn>,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            fail_on: Some(FailOn::NonInclusive),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RuleConfig {
    /// Stable identifier, unique within a catalog (e.g. "mankind").
    pub id: String,

    #[serde(default)]
    pub category: Category,

    /// Score reported when the rule applies. Required; absence is a configuration error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<u8>,

    #[serde(default)]
    pub feedback: FeedbackConfig,

    /// Overrides the category's default "Learn more" target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub learn_more_url: Option<String>,

    /// One or more phrases; each is matched independently.
    #[serde(default)]
    pub phrase: Vec<PhraseConfig>,

    /// Tags for grouping/filtering rules.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// Test cases for validating this rule.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub test_cases: Vec<RuleTestCase>,
}

impl RuleConfig {
    /// The learn-more URL in effect for this rule.
    pub fn effective_learn_more_url(&self) -> &str {
        self.learn_more_url
            .as_deref()
            .unwrap_or_else(|| self.category.learn_more_url())
    }
}

/// Feedback format strings. `{phrase}` and `{alternative}` are substituted.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct FeedbackConfig {
    /// Used when the matched phrase has at least one alternative.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub with_alternative: Option<String>,

    /// Used when the matched phrase has no alternative (derogatory terms).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub without_alternative: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct PhraseConfig {
    /// Primary surface form. Also the form quoted in feedback.
    pub text: String,

    /// Additional surface forms matched as the same phrase.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variants: Vec<String>,

    #[serde(default)]
    pub case_sensitive: bool,

    /// Context classes; the phrase only counts when at least one holds.
    /// Empty means no context condition.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub followed_by: Vec<ContextClass>,

    /// Words that veto a match when they directly follow the phrase.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub not_followed_by: Vec<String>,

    /// Words that veto a match when they directly precede the phrase.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub not_preceded_by: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternatives: Vec<String>,
}

impl PhraseConfig {
    /// Primary form followed by variants.
    pub fn forms(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.text.as_str()).chain(self.variants.iter().map(String::as_str))
    }
}

/// A test case for validating a rule's behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RuleTestCase {
    /// Input text, tokenized with the reference tokenizer.
    pub input: String,

    /// Whether the rule should apply to this input.
    pub should_match: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

// ============================================================================
// Assessment output
// ============================================================================

/// A highlightable pair of original and decorated text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct Mark {
    pub original: String,
    pub marked: String,
}

/// Score and feedback for one applicable rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AssessmentResult {
    pub identifier: String,
    pub score: u8,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct TextMeta {
    pub sentences: u32,
    pub tokens: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RuleAssessment {
    pub result: AssessmentResult,
    pub category: Category,
    pub marks: Vec<Mark>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct ReportSummary {
    pub rules_evaluated: u32,
    pub rules_applicable: u32,
    pub marks: u32,
    /// Applicable rules at or below [`SCORE_NON_INCLUSIVE`].
    pub non_inclusive: u32,
    pub potentially_non_inclusive: u32,
}

/// JSON receipt written by `kindword check`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ReportReceipt {
    pub schema: String,
    pub tool: ToolMeta,
    pub text: TextMeta,
    pub assessments: Vec<RuleAssessment>,
    pub summary: ReportSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enums_as_str() {
        assert_eq!(Category::Gender.as_str(), "gender");
        assert_eq!(
            Category::SocioeconomicStatus.as_str(),
            "socioeconomic_status"
        );
        assert_eq!(ContextClass::PastTenseVerb.as_str(), "past_tense_verb");
        assert_eq!(ContextClass::Punctuation.as_str(), "punctuation");
        assert_eq!(FailOn::NonInclusive.as_str(), "non_inclusive");
        assert_eq!(FailOn::Never.as_str(), "never");
    }

    #[test]
    fn serde_names_match_as_str() {
        for class in [
            ContextClass::PastTenseVerb,
            ContextClass::FunctionWord,
            ContextClass::Punctuation,
        ] {
            let v = serde_json::to_value(class).expect("serialize class");
            assert_eq!(v.as_str(), Some(class.as_str()));
        }
        let v = serde_json::to_value(Category::SexualOrientation).expect("serialize category");
        assert_eq!(v.as_str(), Some("sexual_orientation"));
    }

    #[test]
    fn learn_more_url_defaults_to_category() {
        let mut rule = RuleConfig {
            id: "x".to_string(),
            category: Category::Gender,
            score: Some(SCORE_NON_INCLUSIVE),
            feedback: FeedbackConfig::default(),
            learn_more_url: None,
            phrase: vec![],
            tags: vec![],
            test_cases: vec![],
        };
        assert_eq!(
            rule.effective_learn_more_url(),
            "https://yoa.st/inclusive-language-gender"
        );

        rule.learn_more_url = Some("https://example.com/x".to_string());
        assert_eq!(rule.effective_learn_more_url(), "https://example.com/x");
    }

    #[test]
    fn token_normalized_form_falls_back_to_lowercase() {
        let token = Token {
            text: "Mankind".to_string(),
            normalized: String::new(),
            span: Span::new(0, 7),
            tags: vec![],
        };
        assert_eq!(token.normalized_form(), "mankind");

        let token = Token {
            normalized: "humankind".to_string(),
            ..token
        };
        assert_eq!(token.normalized_form(), "humankind");
    }

    #[test]
    fn phrase_forms_lists_primary_first() {
        let phrase = PhraseConfig {
            text: "shemale".to_string(),
            variants: vec!["she-male".to_string()],
            ..PhraseConfig::default()
        };
        let forms: Vec<&str> = phrase.forms().collect();
        assert_eq!(forms, vec!["shemale", "she-male"]);
    }

    #[test]
    fn optional_fields_are_omitted_when_empty() {
        let phrase = PhraseConfig {
            text: "mankind".to_string(),
            ..PhraseConfig::default()
        };
        let value = serde_json::to_value(&phrase).expect("serialize phrase");
        let obj = value.as_object().expect("phrase should be object");
        assert!(obj.contains_key("text"));
        assert!(!obj.contains_key("variants"));
        assert!(!obj.contains_key("followed_by"));
        assert!(!obj.contains_key("alternatives"));
    }

    #[test]
    fn built_in_catalog_has_unique_ids_and_required_fields() {
        let cfg = CatalogFile::built_in();
        assert!(cfg.rule.len() >= 10, "built-in catalog should be non-trivial");

        let ids: std::collections::HashSet<&str> = cfg.rule.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids.len(), cfg.rule.len(), "built-in rule IDs should be unique");

        for expected in ["mankind", "firemen", "shemale", "aTransgender"] {
            assert!(ids.contains(expected), "expected built-in rule '{expected}'");
        }

        for rule in &cfg.rule {
            assert!(rule.score.is_some(), "rule '{}' has no score", rule.id);
            assert!(!rule.phrase.is_empty(), "rule '{}' has no phrases", rule.id);
            assert_eq!(rule.category, Category::Gender);
        }

        assert_eq!(cfg.defaults, Defaults::default());
    }
}
