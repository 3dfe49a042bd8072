//! Report receipt assembly, exit codes and text rendering for `check`.

use kindword_domain::{saturating_count, CatalogEvaluation};
use kindword_types::{
    FailOn, ReportReceipt, ReportSummary, TextMeta, TokenizedText, ToolMeta, REPORT_SCHEMA_V1,
};

pub fn build_receipt(text: &TokenizedText, evaluation: CatalogEvaluation) -> ReportReceipt {
    ReportReceipt {
        schema: REPORT_SCHEMA_V1.to_string(),
        tool: ToolMeta {
            name: "kindword".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        text: TextMeta {
            sentences: saturating_count(text.sentences.len()),
            tokens: saturating_count(text.token_count()),
        },
        assessments: evaluation.assessments,
        summary: evaluation.summary,
    }
}

/// 2 when a non-inclusive rule applies, 3 when only potentially
/// non-inclusive rules apply under [`FailOn::Any`], otherwise 0.
pub fn compute_exit_code(fail_on: FailOn, summary: &ReportSummary) -> i32 {
    if matches!(fail_on, FailOn::Never) {
        return 0;
    }

    if summary.non_inclusive > 0 {
        return 2;
    }

    if matches!(fail_on, FailOn::Any) && summary.potentially_non_inclusive > 0 {
        return 3;
    }

    0
}

/// Human-readable listing of applicable rules and their marked sentences.
pub fn render_text(receipt: &ReportReceipt) -> String {
    let mut out = String::new();

    for assessment in &receipt.assessments {
        let result = &assessment.result;
        out.push_str(&format!(
            "{} [{}] score {}\n",
            result.identifier,
            assessment.category.as_str(),
            result.score
        ));
        out.push_str(&format!("  {}\n", strip_tags(&result.text)));
        for mark in &assessment.marks {
            out.push_str(&format!("  > {}\n", mark.original));
        }
        out.push('\n');
    }

    let s = &receipt.summary;
    out.push_str(&format!(
        "{} of {} rule(s) applied: {} non-inclusive, {} potentially non-inclusive, {} mark(s)\n",
        s.rules_applicable, s.rules_evaluated, s.non_inclusive, s.potentially_non_inclusive, s.marks
    ));
    out
}

/// Drop HTML tags from feedback for terminal output.
fn strip_tags(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use kindword_domain::{evaluate_catalog, BasicTokenizer, RuleCatalog, Tokenizer};
    use kindword_types::CatalogFile;

    fn receipt_for(input: &str) -> ReportReceipt {
        let catalog = RuleCatalog::compile(&CatalogFile::built_in().rule).unwrap();
        let text = BasicTokenizer::new().tokenize(input);
        let evaluation = evaluate_catalog(catalog.rules(), &text);
        build_receipt(&text, evaluation)
    }

    fn summary(non_inclusive: u32, potentially: u32) -> ReportSummary {
        ReportSummary {
            rules_applicable: non_inclusive + potentially,
            non_inclusive,
            potentially_non_inclusive: potentially,
            ..ReportSummary::default()
        }
    }

    #[test]
    fn exit_code_semantics() {
        let clean = summary(0, 0);
        assert_eq!(compute_exit_code(FailOn::NonInclusive, &clean), 0);
        assert_eq!(compute_exit_code(FailOn::Any, &clean), 0);

        let potential = summary(0, 1);
        assert_eq!(compute_exit_code(FailOn::NonInclusive, &potential), 0);
        assert_eq!(compute_exit_code(FailOn::Any, &potential), 3);

        let harmful = summary(1, 1);
        assert_eq!(compute_exit_code(FailOn::NonInclusive, &harmful), 2);
        assert_eq!(compute_exit_code(FailOn::Any, &harmful), 2);
        assert_eq!(compute_exit_code(FailOn::Never, &harmful), 0);
    }

    #[test]
    fn receipt_counts_text_and_rules() {
        let receipt = receipt_for("Mankind is so great! Look at those firemen.");
        assert_eq!(receipt.schema, REPORT_SCHEMA_V1);
        assert_eq!(receipt.text.sentences, 2);
        assert_eq!(receipt.summary.rules_applicable, 2);
        assert_eq!(receipt.summary.non_inclusive, 1);
        assert_eq!(receipt.summary.potentially_non_inclusive, 1);
        assert_eq!(receipt.summary.marks, 2);
    }

    #[test]
    fn text_rendering_strips_markup() {
        let rendered = render_text(&receipt_for("Mankind is so great!"));
        assert!(rendered.starts_with("mankind [gender] score 3\n"));
        assert!(rendered.contains("  Avoid using mankind as it is exclusionary."));
        assert!(rendered.contains("Learn more."));
        assert!(rendered.contains("  > Mankind is so great!\n"));
        assert!(!rendered.contains("<i>"));
        assert!(rendered.ends_with("1 non-inclusive, 0 potentially non-inclusive, 1 mark(s)\n"));
    }

    #[test]
    fn strip_tags_keeps_text() {
        assert_eq!(
            strip_tags("Use <i>a, b</i>. <a href='x' target='_blank'>Learn more.</a>"),
            "Use a, b. Learn more."
        );
    }
}
