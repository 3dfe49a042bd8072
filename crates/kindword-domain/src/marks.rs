use kindword_types::{Mark, MARK_CLOSE, MARK_OPEN};

use crate::matcher::Match;

/// One mark per accepted match, in discovery order. Identical sentences are
/// kept as separate marks.
pub fn build_marks(accepted: &[Match]) -> Vec<Mark> {
    accepted
        .iter()
        .map(|m| Mark {
            original: m.sentence_text.clone(),
            marked: decorate(&m.sentence_text),
        })
        .collect()
}

/// Wrap `text` in the highlight decoration.
pub fn decorate(text: &str) -> String {
    format!("{MARK_OPEN}{text}{MARK_CLOSE}")
}
