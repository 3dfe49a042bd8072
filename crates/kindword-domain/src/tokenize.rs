//! Reference English tokenizer.
//!
//! Splits prose into sentences and tokens and assigns the tag classes the
//! context filter relies on. Tagging is lexicon/heuristic based: a small
//! closed function-word list, an irregular past-tense list, and the regular
//! `-ed` suffix. Callers with a real tagger can build [`TokenizedText`]
//! themselves and skip this module.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

use kindword_types::{Sentence, Span, Token, TokenTag, TokenizedText};

/// Turns raw text into tagged sentences.
pub trait Tokenizer {
    fn tokenize(&self, text: &str) -> TokenizedText;
}

fn segment_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"[\p{L}\p{N}]+(?:['’\-][\p{L}\p{N}]+)*|[^\s\p{L}\p{N}]")
            .expect("segment regex should compile")
    })
}

fn sentence_end_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"[.!?]+["'’”)\]]*(?:\s+|$)|\n\s*\n"#)
            .expect("sentence regex should compile")
    })
}

/// Split `text` into word and punctuation segments with their byte spans.
///
/// Words keep inner apostrophes and hyphens ("she's", "she-male"); every
/// other non-space, non-alphanumeric character is its own segment.
pub fn segment(text: &str) -> impl Iterator<Item = (Span, &str)> {
    segment_re()
        .find_iter(text)
        .map(|m| (Span::new(m.start(), m.end()), m.as_str()))
}

/// Split `text` into sentences. Terminal punctuation stays with its sentence.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;

    for m in sentence_end_re().find_iter(text) {
        let end = m.start() + m.as_str().trim_end().len();
        let sentence = text[start..end].trim();
        if !sentence.is_empty() {
            out.push(sentence);
        }
        start = m.end();
    }

    let rest = text[start..].trim();
    if !rest.is_empty() {
        out.push(rest);
    }

    out
}

pub fn is_punctuation_char(c: char) -> bool {
    !c.is_alphanumeric() && !c.is_whitespace()
}

#[derive(Debug, Clone)]
pub struct BasicTokenizer {
    function_words: HashSet<&'static str>,
    simple_past: HashSet<&'static str>,
    past_participles: HashSet<&'static str>,
    not_past: HashSet<&'static str>,
}

impl Default for BasicTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl BasicTokenizer {
    pub fn new() -> Self {
        Self {
            function_words: FUNCTION_WORDS.iter().copied().collect(),
            simple_past: IRREGULAR_SIMPLE_PAST.iter().copied().collect(),
            past_participles: IRREGULAR_PAST_PARTICIPLES.iter().copied().collect(),
            not_past: ED_NON_VERBS.iter().copied().collect(),
        }
    }

    pub fn tag(&self, segment: &str) -> Vec<TokenTag> {
        let mut tags = Vec::new();

        if segment.chars().all(is_punctuation_char) {
            tags.push(TokenTag::Punctuation);
            return tags;
        }

        let lower = normalize(segment);
        if self.function_words.contains(lower.as_str()) {
            tags.push(TokenTag::FunctionWord);
        }

        let regular_past = lower.len() > 3
            && lower.ends_with("ed")
            && lower.chars().all(char::is_alphabetic)
            && !self.not_past.contains(lower.as_str());
        if regular_past || self.simple_past.contains(lower.as_str()) {
            tags.push(TokenTag::SimplePast);
        }
        if regular_past || self.past_participles.contains(lower.as_str()) {
            tags.push(TokenTag::PastParticiple);
        }

        tags
    }

    fn tokenize_sentence(&self, sentence: &str) -> Sentence {
        let tokens = segment(sentence)
            .map(|(span, s)| Token {
                text: s.to_string(),
                normalized: normalize(s),
                span,
                tags: self.tag(s),
            })
            .collect();

        Sentence {
            text: sentence.to_string(),
            tokens,
        }
    }
}

impl Tokenizer for BasicTokenizer {
    fn tokenize(&self, text: &str) -> TokenizedText {
        TokenizedText {
            sentences: split_sentences(text)
                .into_iter()
                .map(|s| self.tokenize_sentence(s))
                .collect(),
        }
    }
}

/// Lowercase and fold typographic apostrophes.
pub fn normalize(s: &str) -> String {
    s.to_lowercase().replace('’', "'")
}

const FUNCTION_WORDS: &[&str] = &[
    // articles and determiners
    "a", "an", "the", "this", "that", "these", "those", "my", "your", "his", "her", "its", "our",
    "their", "some", "any", "each", "every", "no", "all", "both", "either", "neither", "another",
    "such", "much", "many", "few", "several",
    // prepositions
    "about", "above", "across", "after", "against", "along", "among", "around", "at", "before",
    "behind", "below", "beneath", "beside", "between", "beyond", "by", "despite", "down",
    "during", "except", "for", "from", "in", "inside", "into", "near", "of", "off", "on", "onto",
    "out", "outside", "over", "since", "through", "throughout", "to", "toward", "towards",
    "under", "until", "up", "upon", "with", "within", "without",
    // conjunctions
    "and", "but", "or", "nor", "so", "yet", "because", "although", "though", "while", "whereas",
    "if", "unless", "whether", "than", "as",
    // connectives
    "however", "therefore", "moreover", "furthermore", "nevertheless", "nonetheless", "also",
    "then", "thus", "hence", "still", "instead", "meanwhile", "otherwise",
    // pronouns
    "i", "you", "he", "she", "it", "we", "they", "me", "him", "us", "them", "who", "whom",
    "whose", "which", "what", "myself", "yourself", "himself", "herself", "itself",
    "ourselves", "themselves",
    // auxiliaries and modals
    "is", "are", "was", "were", "be", "been", "being", "am", "has", "have", "had", "do", "does",
    "did", "will", "would", "shall", "should", "can", "could", "may", "might", "must",
    // particles and intensifiers
    "not", "very", "too", "just", "only", "even", "really", "always", "never", "often",
];

const IRREGULAR_SIMPLE_PAST: &[&str] = &[
    "was", "were", "had", "did", "went", "came", "made", "said", "saw", "took", "gave", "got",
    "knew", "thought", "told", "became", "left", "felt", "brought", "began", "kept", "held",
    "wrote", "stood", "heard", "meant", "met", "ran", "paid", "sat", "spoke", "led", "grew",
    "lost", "fell", "sent", "built", "understood", "drew", "broke", "spent", "rose", "drove",
    "bought", "wore", "chose", "sought", "threw", "caught", "ate", "fought", "taught", "sold",
    "won", "slept", "swam", "sang", "flew", "forgot", "hid", "rode", "shook", "stole",
];

const IRREGULAR_PAST_PARTICIPLES: &[&str] = &[
    "been", "had", "done", "gone", "come", "made", "said", "seen", "taken", "given", "got",
    "gotten", "known", "thought", "told", "become", "left", "felt", "brought", "begun", "kept",
    "held", "written", "stood", "heard", "meant", "met", "run", "paid", "sat", "spoken", "led",
    "grown", "lost", "fallen", "sent", "built", "understood", "drawn", "broken", "spent",
    "risen", "driven", "bought", "worn", "chosen", "sought", "thrown", "caught", "eaten",
    "fought", "taught", "sold", "won", "slept", "swum", "sung", "flown", "forgotten", "hidden",
    "ridden", "shaken", "stolen",
];

// Common words ending in "-ed" that are not verb forms.
const ED_NON_VERBS: &[&str] = &[
    "bed", "bred", "breed", "creed", "deed", "feed", "fled", "freed", "greed", "heed", "hundred",
    "naked", "need", "ragged", "red", "reed", "sacred", "seed", "shed", "shred",
    "sled", "sped", "speed", "steed", "tweed", "weed", "wicked", "wretched",
];
