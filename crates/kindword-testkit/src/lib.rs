//! Shared test utilities for the kindword workspace.
//!
//! This crate provides:
//! - **arb**: Proptest strategies for generating valid rule configs and texts
//! - **text_builder**: Hand-tagged tokenized text builders
//! - **fixtures**: Common test fixtures (sample catalogs, texts, expected feedback)
//!
//! # Example
//!
//! ```rust,ignore
//! use kindword_testkit::arb;
//! use proptest::prelude::*;
//!
//! proptest! {
//!     fn test_rule_config(rule in arb::arb_rule_config()) {
//!         assert!(!rule.id.is_empty());
//!     }
//! }
//! ```

pub mod arb;
pub mod fixtures;
pub mod text_builder;

// Re-export commonly used items
pub use arb::{arb_category, arb_context_class, arb_phrase_config, arb_rule_config, arb_word};
pub use fixtures::{sample_catalogs, sample_texts};
pub use text_builder::{SentenceBuilderInProgress, TextBuilder};
