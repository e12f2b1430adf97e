use std::fmt;

use crate::sentence::{ParsedSentence, PartOfSpeech, RootLookup};

/// Which transformation path a sentence takes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SentenceShape {
    NounHeaded { root: usize },
    VerbHeaded { root: usize },
    Unsupported(UnsupportedReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnsupportedReason {
    MissingRoot,
    AmbiguousRoot { roots: usize },
    RootPartOfSpeech(PartOfSpeech),
}

impl fmt::Display for UnsupportedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnsupportedReason::MissingRoot => write!(f, "sentence has no root token"),
            UnsupportedReason::AmbiguousRoot { roots } => {
                write!(f, "sentence has {roots} root tokens")
            }
            UnsupportedReason::RootPartOfSpeech(pos) => {
                write!(f, "root part of speech {pos} is neither NOUN nor VERB")
            }
        }
    }
}

pub fn classify(sentence: &ParsedSentence) -> SentenceShape {
    let root = match sentence.root() {
        RootLookup::Unique(index) => index,
        RootLookup::Missing => return SentenceShape::Unsupported(UnsupportedReason::MissingRoot),
        RootLookup::Ambiguous(roots) => {
            return SentenceShape::Unsupported(UnsupportedReason::AmbiguousRoot { roots })
        }
    };

    match sentence.token(root).map(|token| &token.pos) {
        Some(PartOfSpeech::Noun) => SentenceShape::NounHeaded { root },
        Some(PartOfSpeech::Verb) => SentenceShape::VerbHeaded { root },
        Some(other) => {
            SentenceShape::Unsupported(UnsupportedReason::RootPartOfSpeech(other.clone()))
        }
        None => SentenceShape::Unsupported(UnsupportedReason::MissingRoot),
    }
}
