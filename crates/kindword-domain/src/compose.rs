use kindword_types::{AssessmentResult, PLACEHOLDER_ALTERNATIVE, PLACEHOLDER_PHRASE};

use crate::matcher::Match;
use crate::rules::CompiledRule;

/// Produce the rule's single score and feedback text, or `None` when nothing
/// was accepted.
///
/// The phrase of the first accepted match picks the template and is the
/// phrase quoted in the feedback. Every later match shares the same result.
pub fn compose(rule: &CompiledRule, accepted: &[Match]) -> Option<AssessmentResult> {
    let first = accepted.first()?;
    let phrase = rule.phrases.get(first.phrase_index)?;

    let body = render_template(&phrase.template, &phrase.display, &phrase.alternatives);
    let text = format!("{body} {}", learn_more_link(&rule.learn_more_url));

    Some(AssessmentResult {
        identifier: rule.id.clone(),
        score: rule.score,
        text,
    })
}

/// Substitute `{phrase}` and `{alternative}` in a feedback template.
pub fn render_template(template: &str, phrase: &str, alternatives: &[String]) -> String {
    template
        .replace(PLACEHOLDER_PHRASE, phrase)
        .replace(PLACEHOLDER_ALTERNATIVE, &format_alternatives(alternatives))
}

/// `<i>a, b, c</i>`, or an empty string when there are no alternatives.
pub fn format_alternatives(alternatives: &[String]) -> String {
    if alternatives.is_empty() {
        return String::new();
    }
    format!("<i>{}</i>", alternatives.join(", "))
}

pub fn learn_more_link(url: &str) -> String {
    format!("<a href='{url}' target='_blank'>Learn more.</a>")
}
