use std::collections::{BTreeSet, HashMap};
use std::sync::OnceLock;

use regex::Regex;

use kindword_types::{
    Category, ContextClass, RuleConfig, PLACEHOLDER_ALTERNATIVE, PLACEHOLDER_PHRASE,
};

use crate::tokenize::{normalize, segment};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleCompileError {
    #[error("rule '{rule_id}' not found in catalog")]
    UnknownRule { rule_id: String },

    #[error("rule '{rule_id}' is defined more than once")]
    DuplicateRule { rule_id: String },

    #[error("rule '{rule_id}' has no phrases")]
    MissingPhrases { rule_id: String },

    #[error("rule '{rule_id}' has an empty surface form in phrase #{index}")]
    EmptyPhrase { rule_id: String, index: usize },

    #[error("rule '{rule_id}' has no score")]
    MissingScore { rule_id: String },

    #[error("rule '{rule_id}' has no feedback template")]
    MissingFeedback { rule_id: String },

    #[error("rule '{rule_id}' phrase '{phrase}' requires a '{template}' feedback template")]
    MissingTemplate {
        rule_id: String,
        phrase: String,
        template: &'static str,
    },

    #[error("rule '{rule_id}' {template} template has unknown placeholder '{placeholder}'")]
    UnknownPlaceholder {
        rule_id: String,
        template: &'static str,
        placeholder: String,
    },
}

/// Contextual predicate on the token following a match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextCondition {
    /// Every lexical match counts.
    Always,
    /// At least one of the classes must hold for the following token.
    FollowedBy(BTreeSet<ContextClass>),
}

impl ContextCondition {
    pub fn from_classes(classes: &[ContextClass]) -> Self {
        if classes.is_empty() {
            ContextCondition::Always
        } else {
            ContextCondition::FollowedBy(classes.iter().copied().collect())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledPhrase {
    /// The configured primary form, quoted in feedback.
    pub display: String,
    /// Each surface form pre-split into token segments.
    /// Lowercased unless `case_sensitive`.
    pub forms: Vec<Vec<String>>,
    pub case_sensitive: bool,
    pub condition: ContextCondition,
    pub not_followed_by: BTreeSet<String>,
    pub not_preceded_by: BTreeSet<String>,
    pub alternatives: Vec<String>,
    /// Feedback template resolved for this phrase (with or without alternative).
    pub template: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledRule {
    pub id: String,
    pub category: Category,
    pub score: u8,
    pub learn_more_url: String,
    pub phrases: Vec<CompiledPhrase>,
    pub tags: BTreeSet<String>,
}

impl CompiledRule {
    pub fn has_any_tag(&self, tags: &[String]) -> bool {
        tags.iter().any(|t| self.tags.contains(t))
    }
}

/// Read-only, compiled rule catalog addressed by rule identifier.
#[derive(Debug, Clone, Default)]
pub struct RuleCatalog {
    rules: Vec<CompiledRule>,
    index: HashMap<String, usize>,
}

impl RuleCatalog {
    pub fn compile(configs: &[RuleConfig]) -> Result<Self, RuleCompileError> {
        let rules = compile_rules(configs)?;
        let index = rules
            .iter()
            .enumerate()
            .map(|(i, r)| (r.id.clone(), i))
            .collect();
        Ok(Self { rules, index })
    }

    pub fn get(&self, rule_id: &str) -> Result<&CompiledRule, RuleCompileError> {
        self.index
            .get(rule_id)
            .map(|&i| &self.rules[i])
            .ok_or_else(|| RuleCompileError::UnknownRule {
                rule_id: rule_id.to_string(),
            })
    }

    pub fn rules(&self) -> &[CompiledRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

pub fn compile_rules(configs: &[RuleConfig]) -> Result<Vec<CompiledRule>, RuleCompileError> {
    let mut seen = BTreeSet::new();
    let mut out = Vec::with_capacity(configs.len());

    for cfg in configs {
        if !seen.insert(cfg.id.as_str()) {
            return Err(RuleCompileError::DuplicateRule {
                rule_id: cfg.id.clone(),
            });
        }
        out.push(compile_rule(cfg)?);
    }

    Ok(out)
}

pub fn compile_rule(cfg: &RuleConfig) -> Result<CompiledRule, RuleCompileError> {
    let rule_id = || cfg.id.clone();

    let score = cfg
        .score
        .ok_or_else(|| RuleCompileError::MissingScore { rule_id: rule_id() })?;

    if cfg.phrase.is_empty() {
        return Err(RuleCompileError::MissingPhrases { rule_id: rule_id() });
    }

    let with_alternative = cfg.feedback.with_alternative.as_deref();
    let without_alternative = cfg.feedback.without_alternative.as_deref();
    if with_alternative.is_none() && without_alternative.is_none() {
        return Err(RuleCompileError::MissingFeedback { rule_id: rule_id() });
    }
    if let Some(t) = with_alternative {
        check_placeholders(&cfg.id, "with_alternative", t)?;
    }
    if let Some(t) = without_alternative {
        check_placeholders(&cfg.id, "without_alternative", t)?;
    }

    let mut phrases = Vec::with_capacity(cfg.phrase.len());
    for (index, p) in cfg.phrase.iter().enumerate() {
        let mut forms = Vec::new();
        for form in p.forms() {
            let segments: Vec<String> = segment(form)
                .map(|(_, s)| {
                    if p.case_sensitive {
                        s.to_string()
                    } else {
                        normalize(s)
                    }
                })
                .collect();
            if segments.is_empty() {
                return Err(RuleCompileError::EmptyPhrase {
                    rule_id: rule_id(),
                    index,
                });
            }
            forms.push(segments);
        }

        let (template, template_name) = if p.alternatives.is_empty() {
            (without_alternative, "without_alternative")
        } else {
            (with_alternative, "with_alternative")
        };
        let Some(template) = template else {
            return Err(RuleCompileError::MissingTemplate {
                rule_id: rule_id(),
                phrase: p.text.clone(),
                template: template_name,
            });
        };

        phrases.push(CompiledPhrase {
            display: p.text.trim().to_string(),
            forms,
            case_sensitive: p.case_sensitive,
            condition: ContextCondition::from_classes(&p.followed_by),
            not_followed_by: lowercase_set(&p.not_followed_by),
            not_preceded_by: lowercase_set(&p.not_preceded_by),
            alternatives: p.alternatives.clone(),
            template: template.to_string(),
        });
    }

    Ok(CompiledRule {
        id: cfg.id.clone(),
        category: cfg.category,
        score,
        learn_more_url: cfg.effective_learn_more_url().to_string(),
        phrases,
        tags: cfg.tags.iter().cloned().collect(),
    })
}

fn lowercase_set(words: &[String]) -> BTreeSet<String> {
    words.iter().map(|w| normalize(w.trim())).collect()
}

fn placeholder_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{[A-Za-z_]+\}").expect("placeholder regex should compile"))
}

fn check_placeholders(
    rule_id: &str,
    template: &'static str,
    text: &str,
) -> Result<(), RuleCompileError> {
    for m in placeholder_re().find_iter(text) {
        let p = m.as_str();
        if p != PLACEHOLDER_PHRASE && p != PLACEHOLDER_ALTERNATIVE {
            return Err(RuleCompileError::UnknownPlaceholder {
                rule_id: rule_id.to_string(),
                template,
                placeholder: p.to_string(),
            });
        }
    }
    Ok(())
}
