use crate::sentence::{DependencyLabel, ParsedSentence};

/// Legal boilerplate closing most bill titles.
pub const BOILERPLATE_CLAUSE: &str = ", and for other purposes";

/// Index where the operative phrase of a verb-headed sentence starts.
///
/// That is the first direct object, pulled back to the nearest determiner
/// found by walking towards the sentence start. `None` when the sentence has
/// no direct object.
pub fn object_phrase_start(sentence: &ParsedSentence) -> Option<usize> {
    let object = sentence.first_with_dep(&DependencyLabel::DirectObject)?;

    let determiner = (0..object).rev().find(|&index| {
        sentence
            .token(index)
            .is_some_and(|token| token.dep == DependencyLabel::Determiner)
    });

    Some(determiner.unwrap_or(object))
}

#[derive(Debug, Clone)]
pub struct PhraseExtractor {
    boilerplate: String,
}

impl Default for PhraseExtractor {
    fn default() -> Self {
        Self::new(BOILERPLATE_CLAUSE)
    }
}

impl PhraseExtractor {
    pub fn new(boilerplate: impl Into<String>) -> Self {
        Self {
            boilerplate: boilerplate.into(),
        }
    }

    /// Everything from the root noun to the end of the sentence.
    pub fn noun_phrase(&self, sentence: &ParsedSentence, root: usize) -> String {
        self.clean(&sentence.text_from(root))
    }

    /// The direct object phrase of a verb-headed sentence.
    pub fn object_phrase(&self, sentence: &ParsedSentence) -> Option<String> {
        object_phrase_start(sentence).map(|start| self.clean(&sentence.text_from(start)))
    }

    fn clean(&self, text: &str) -> String {
        let stripped = if self.boilerplate.is_empty() {
            text.to_string()
        } else {
            text.replace(&self.boilerplate, "")
        };
        let trimmed = stripped.trim();
        trimmed.strip_suffix('.').unwrap_or(trimmed).trim_end().to_string()
    }
}
