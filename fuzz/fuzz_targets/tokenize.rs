//! Fuzz target for the reference tokenizer.
//!
//! Every token span must lie on char boundaries inside its sentence and
//! reproduce the token text.

#![no_main]

use libfuzzer_sys::fuzz_target;

use kindword_domain::{BasicTokenizer, Tokenizer};

fuzz_target!(|input: &str| {
    let text = BasicTokenizer::new().tokenize(input);

    for sentence in &text.sentences {
        let mut last_end = 0;
        for token in &sentence.tokens {
            assert!(token.span.start >= last_end, "tokens out of order");
            assert!(token.span.end <= sentence.text.len());
            assert_eq!(
                sentence.text.get(token.span.start..token.span.end),
                Some(token.text.as_str())
            );
            assert!(!token.text.is_empty());
            last_end = token.span.end;
        }
    }
});
