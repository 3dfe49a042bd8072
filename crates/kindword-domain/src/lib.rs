//! Domain logic: phrase matching, contextual filtering, scoring and marks.
//!
//! This crate is designed to be I/O-free and highly testable.

pub mod assess;
pub mod compose;
pub mod context;
pub mod marks;
pub mod matcher;
pub mod rules;
pub mod tokenize;

pub use assess::{
    assess_rule, evaluate_catalog, saturating_count, Assessment, Assessor, CatalogEvaluation,
};
pub use compose::{compose, format_alternatives, learn_more_link, render_template};
pub use context::{accept, CLAUSE_PUNCTUATION};
pub use marks::{build_marks, decorate};
pub use matcher::{find_candidates, Match};
pub use rules::{
    compile_rule, compile_rules, CompiledPhrase, CompiledRule, ContextCondition, RuleCatalog,
    RuleCompileError,
};
pub use tokenize::{normalize, segment, split_sentences, BasicTokenizer, Tokenizer};
