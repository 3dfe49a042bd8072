//! Builders for hand-tagged [`TokenizedText`].
//!
//! Use these when a test needs exact control over token tags, e.g. to model a
//! tokenizer that omitted a tag class or dropped terminal punctuation.
//!
//! # Example
//!
//! ```rust
//! use kindword_testkit::text_builder::TextBuilder;
//! use kindword_types::TokenTag;
//!
//! let text = TextBuilder::new()
//!     .sentence("The transgender worked.")
//!         .function_word("The")
//!         .word("transgender")
//!         .tagged("worked", &[TokenTag::SimplePast])
//!         .punct(".")
//!         .done()
//!     .build();
//!
//! assert_eq!(text.sentences[0].tokens.len(), 4);
//! assert_eq!(text.sentences[0].tokens[3].span.start, 22);
//! ```

use kindword_types::{Sentence, Span, Token, TokenTag, TokenizedText};

/// A builder for constructing tokenized texts.
#[derive(Debug, Clone, Default)]
pub struct TextBuilder {
    sentences: Vec<Sentence>,
}

impl TextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a sentence with the given verbatim text. Tokens are added in order
    /// and located in the text left to right.
    pub fn sentence(self, text: &str) -> SentenceBuilderInProgress {
        SentenceBuilderInProgress {
            text_builder: self,
            sentence: Sentence {
                text: text.to_string(),
                tokens: Vec::new(),
            },
            cursor: 0,
        }
    }

    pub fn build(self) -> TokenizedText {
        TokenizedText {
            sentences: self.sentences,
        }
    }
}

/// Helper struct for building a sentence within a text.
#[derive(Debug)]
pub struct SentenceBuilderInProgress {
    text_builder: TextBuilder,
    sentence: Sentence,
    cursor: usize,
}

impl SentenceBuilderInProgress {
    /// Add an untagged token.
    pub fn word(self, text: &str) -> Self {
        self.tagged(text, &[])
    }

    pub fn function_word(self, text: &str) -> Self {
        self.tagged(text, &[TokenTag::FunctionWord])
    }

    pub fn punct(self, text: &str) -> Self {
        self.tagged(text, &[TokenTag::Punctuation])
    }

    /// Add a token with explicit tags.
    ///
    /// # Panics
    ///
    /// Panics if `text` does not occur in the sentence after the previous token.
    pub fn tagged(mut self, text: &str, tags: &[TokenTag]) -> Self {
        let offset = self.sentence.text[self.cursor..]
            .find(text)
            .unwrap_or_else(|| {
                panic!(
                    "token '{}' not found in '{}' after byte {}",
                    text, self.sentence.text, self.cursor
                )
            });
        let start = self.cursor + offset;
        let end = start + text.len();
        self.cursor = end;

        self.sentence.tokens.push(Token {
            text: text.to_string(),
            normalized: text.to_lowercase(),
            span: Span::new(start, end),
            tags: tags.to_vec(),
        });
        self
    }

    /// Finish the sentence and return to the text builder.
    pub fn done(mut self) -> TextBuilder {
        self.text_builder.sentences.push(self.sentence);
        self.text_builder
    }
}
