//! Dependency-parsed sentences as handed over by the parser collaborator.
//!
//! A [`ParsedSentence`] is an ordered, indexable token sequence. Every token
//! points at its syntactic head by index; the root is the token whose head is
//! itself. Root uniqueness is not enforced at construction: callers ask
//! [`ParsedSentence::root`] and match on the [`RootLookup`] outcome.

pub mod conllu;
pub mod udpipe;

use std::collections::HashMap;
use std::fmt;

/// Coarse part-of-speech tag. Only nouns and verbs drive transformation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PartOfSpeech {
    Noun,
    ProperNoun,
    Verb,
    Auxiliary,
    Adjective,
    Adposition,
    Determiner,
    Punctuation,
    Other(String),
}

impl PartOfSpeech {
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_uppercase().as_str() {
            "NOUN" => Self::Noun,
            "PROPN" => Self::ProperNoun,
            "VERB" => Self::Verb,
            "AUX" => Self::Auxiliary,
            "ADJ" => Self::Adjective,
            "ADP" => Self::Adposition,
            "DET" => Self::Determiner,
            "PUNCT" => Self::Punctuation,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_tag(&self) -> &str {
        match self {
            Self::Noun => "NOUN",
            Self::ProperNoun => "PROPN",
            Self::Verb => "VERB",
            Self::Auxiliary => "AUX",
            Self::Adjective => "ADJ",
            Self::Adposition => "ADP",
            Self::Determiner => "DET",
            Self::Punctuation => "PUNCT",
            Self::Other(tag) => tag.as_str(),
        }
    }
}

impl fmt::Display for PartOfSpeech {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

/// Dependency relation between a token and its head.
///
/// Accepts both Universal Dependencies names (`obj`, `root`) and the older
/// spaCy/Stanford names (`dobj`, `ROOT`). Subtypes such as `nsubj:pass`
/// collapse onto their base relation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DependencyLabel {
    Root,
    DirectObject,
    Determiner,
    Subject,
    Other(String),
}

impl DependencyLabel {
    pub fn from_label(label: &str) -> Self {
        let lowered = label.trim().to_ascii_lowercase();
        let base = lowered.split(':').next().unwrap_or_default();
        match base {
            "root" => Self::Root,
            "obj" | "dobj" => Self::DirectObject,
            "det" => Self::Determiner,
            "nsubj" | "nsubjpass" => Self::Subject,
            _ => Self::Other(lowered),
        }
    }

    pub fn as_label(&self) -> &str {
        match self {
            Self::Root => "root",
            Self::DirectObject => "obj",
            Self::Determiner => "det",
            Self::Subject => "nsubj",
            Self::Other(label) => label.as_str(),
        }
    }
}

impl fmt::Display for DependencyLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub lemma: Option<String>,
    pub pos: PartOfSpeech,
    pub dep: DependencyLabel,
    /// Index of the head token within the same sentence.
    pub head: usize,
    /// Whether a single space follows this token in the source text.
    pub space_after: bool,
}

impl Token {
    pub fn new(
        text: impl Into<String>,
        pos: PartOfSpeech,
        dep: DependencyLabel,
        head: usize,
    ) -> Self {
        Self {
            text: text.into(),
            lemma: None,
            pos,
            dep,
            head,
            space_after: true,
        }
    }

    pub fn with_lemma(mut self, lemma: impl Into<String>) -> Self {
        self.lemma = Some(lemma.into());
        self
    }

    pub fn without_space_after(mut self) -> Self {
        self.space_after = false;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SentenceError {
    #[error("sentence has no tokens")]
    Empty,
    #[error("token {index} points at head {head}, but the sentence has {len} tokens")]
    HeadOutOfRange { index: usize, head: usize, len: usize },
}

/// Outcome of looking for the self-headed token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootLookup {
    Unique(usize),
    Missing,
    Ambiguous(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSentence {
    tokens: Vec<Token>,
}

impl ParsedSentence {
    pub fn new(tokens: Vec<Token>) -> Result<Self, SentenceError> {
        if tokens.is_empty() {
            return Err(SentenceError::Empty);
        }

        let len = tokens.len();
        if let Some((index, token)) = tokens.iter().enumerate().find(|(_, t)| t.head >= len) {
            return Err(SentenceError::HeadOutOfRange {
                index,
                head: token.head,
                len,
            });
        }

        Ok(Self { tokens })
    }

    /// Joins several parses of one input into a single token sequence,
    /// shifting head indices by each part's offset.
    pub fn concat(parts: Vec<ParsedSentence>) -> Result<Self, SentenceError> {
        let mut tokens = Vec::new();
        for part in parts {
            let offset = tokens.len();
            tokens.extend(part.tokens.into_iter().map(|mut token| {
                token.head += offset;
                token
            }));
        }
        Self::new(tokens)
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn token(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    pub fn root(&self) -> RootLookup {
        let mut roots = self
            .tokens
            .iter()
            .enumerate()
            .filter(|(index, token)| token.head == *index)
            .map(|(index, _)| index);

        let Some(first) = roots.next() else {
            return RootLookup::Missing;
        };
        match roots.count() {
            0 => RootLookup::Unique(first),
            rest => RootLookup::Ambiguous(rest + 1),
        }
    }

    /// First token, in sentence order, carrying the given relation.
    pub fn first_with_dep(&self, dep: &DependencyLabel) -> Option<usize> {
        self.tokens.iter().position(|token| &token.dep == dep)
    }

    /// Renders `tokens[start..]` back to text, honoring the recorded spacing.
    pub fn text_from(&self, start: usize) -> String {
        render(self.tokens.get(start..).unwrap_or_default())
    }

    pub fn text(&self) -> String {
        render(&self.tokens)
    }
}

fn render(tokens: &[Token]) -> String {
    let mut out = String::new();
    for (i, token) in tokens.iter().enumerate() {
        out.push_str(&token.text);
        if token.space_after && i + 1 < tokens.len() {
            out.push(' ');
        }
    }
    out
}

/// Parses keyed by the exact sentence text that was submitted to the parser.
#[derive(Debug, Clone, Default)]
pub struct ParsedCorpus {
    sentences: HashMap<String, ParsedSentence>,
    order: Vec<String>,
}

impl ParsedCorpus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, text: impl Into<String>, sentence: ParsedSentence) {
        let text = text.into();
        if self.sentences.insert(text.clone(), sentence).is_none() {
            self.order.push(text);
        }
    }

    pub fn get(&self, text: &str) -> Option<&ParsedSentence> {
        self.sentences.get(text)
    }

    pub fn contains(&self, text: &str) -> bool {
        self.sentences.contains_key(text)
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParsedSentence)> {
        self.order
            .iter()
            .filter_map(|text| self.sentences.get(text).map(|s| (text.as_str(), s)))
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// Builds a sentence from `(text, pos, dep, head)` rows.
    pub(crate) fn sentence(rows: &[(&str, &str, &str, usize)]) -> ParsedSentence {
        let tokens = rows
            .iter()
            .map(|(text, pos, dep, head)| {
                Token::new(
                    *text,
                    PartOfSpeech::from_tag(pos),
                    DependencyLabel::from_label(dep),
                    *head,
                )
            })
            .collect();
        ParsedSentence::new(tokens).expect("valid fixture sentence")
    }
}
