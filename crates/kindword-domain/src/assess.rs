use tracing::{debug, trace};

use kindword_types::{
    AssessmentResult, Mark, ReportSummary, RuleAssessment, RuleConfig, TokenizedText,
    SCORE_NON_INCLUSIVE,
};

use crate::compose::compose;
use crate::context::accept;
use crate::marks::build_marks;
use crate::matcher::{find_candidates, Match};
use crate::rules::{compile_rule, CompiledRule, RuleCatalog, RuleCompileError};

/// Outcome of evaluating one rule against one text.
///
/// Either the rule applies (a result plus one mark per accepted match) or it
/// does not (no result, no marks).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assessment {
    identifier: String,
    matches: Vec<Match>,
    result: Option<AssessmentResult>,
    marks: Vec<Mark>,
}

impl Assessment {
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn is_applicable(&self) -> bool {
        self.result.is_some()
    }

    /// Score and feedback, present only when the rule applies.
    pub fn result(&self) -> Option<&AssessmentResult> {
        self.result.as_ref()
    }

    pub fn has_marks(&self) -> bool {
        !self.marks.is_empty()
    }

    /// Marks in discovery order; empty when not applicable.
    pub fn marks(&self) -> &[Mark] {
        &self.marks
    }

    /// The accepted matches behind the marks.
    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    pub fn into_parts(self) -> (Option<AssessmentResult>, Vec<Mark>) {
        (self.result, self.marks)
    }
}

/// Evaluates a single rule. Holds no state between evaluations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assessor {
    rule: CompiledRule,
}

impl Assessor {
    pub fn new(config: &RuleConfig) -> Result<Self, RuleCompileError> {
        Ok(Self {
            rule: compile_rule(config)?,
        })
    }

    pub fn from_catalog(catalog: &RuleCatalog, rule_id: &str) -> Result<Self, RuleCompileError> {
        Ok(Self {
            rule: catalog.get(rule_id)?.clone(),
        })
    }

    pub fn rule(&self) -> &CompiledRule {
        &self.rule
    }

    pub fn assess(&self, text: &TokenizedText) -> Assessment {
        assess_rule(&self.rule, text)
    }
}

impl From<CompiledRule> for Assessor {
    fn from(rule: CompiledRule) -> Self {
        Self { rule }
    }
}

pub fn assess_rule(rule: &CompiledRule, text: &TokenizedText) -> Assessment {
    let candidates = find_candidates(rule, text);
    let total = candidates.len();

    let accepted: Vec<Match> = candidates
        .into_iter()
        .filter_map(|mut c| {
            if accept(&c, rule, text) {
                c.context_accepted = true;
                Some(c)
            } else {
                trace!(
                    rule = %rule.id,
                    sentence = c.sentence_index,
                    phrase = %c.phrase,
                    "candidate rejected by context"
                );
                None
            }
        })
        .collect();

    let result = compose(rule, &accepted);
    let marks = if result.is_some() {
        build_marks(&accepted)
    } else {
        Vec::new()
    };

    if total > 0 {
        debug!(
            rule = %rule.id,
            candidates = total,
            accepted = accepted.len(),
            "rule evaluated"
        );
    }

    Assessment {
        identifier: rule.id.clone(),
        matches: accepted,
        result,
        marks,
    }
}

/// Applicable outcomes of a whole catalog over one text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CatalogEvaluation {
    pub assessments: Vec<RuleAssessment>,
    pub summary: ReportSummary,
}

/// Clamp a collection length into a `u32` counter.
pub fn saturating_count(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

/// Run every rule over `text`. Rules that do not apply contribute nothing.
pub fn evaluate_catalog(rules: &[CompiledRule], text: &TokenizedText) -> CatalogEvaluation {
    let mut out = CatalogEvaluation::default();

    for rule in rules {
        out.summary.rules_evaluated = out.summary.rules_evaluated.saturating_add(1);

        let (Some(result), marks) = assess_rule(rule, text).into_parts() else {
            continue;
        };

        out.summary.rules_applicable = out.summary.rules_applicable.saturating_add(1);
        out.summary.marks = out.summary.marks.saturating_add(saturating_count(marks.len()));
        if result.score <= SCORE_NON_INCLUSIVE {
            out.summary.non_inclusive = out.summary.non_inclusive.saturating_add(1);
        } else {
            out.summary.potentially_non_inclusive =
                out.summary.potentially_non_inclusive.saturating_add(1);
        }

        out.assessments.push(RuleAssessment {
            result,
            category: rule.category,
            marks,
        });
    }

    out
}
