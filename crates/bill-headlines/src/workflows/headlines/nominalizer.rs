use std::collections::HashMap;

use crate::sentence::Token;

const STANDARD_ENTRIES: &[(&str, &str)] = &[
    ("authorize", "authorization of"),
    ("designate", "designation of"),
    ("clarify", "clarification of"),
    ("use", "use of"),
    ("provide", "provision to"),
    ("carry", "carrying of"),
    ("improve", "improvement of"),
    ("intensify", "intensification of"),
    ("negotiating", "negotiation of"),
    ("demonstrate", "demonstration of"),
    ("amend", "amendment to"),
    ("regulate", "regulation of"),
    ("eliminate", "elimination of"),
    ("exclude", "exclusion of"),
    ("include", "inclusion of"),
    ("determine", "determination of"),
    ("providing", "provision for"),
    ("enter", "entry into"),
    ("made", "making of"),
    ("honor", "honoring of"),
];

/// Closed verb-to-noun-phrase vocabulary.
#[derive(Debug, Clone)]
pub struct VerbNominalizer {
    table: HashMap<&'static str, &'static str>,
}

impl VerbNominalizer {
    pub fn standard() -> Self {
        Self {
            table: STANDARD_ENTRIES.iter().copied().collect(),
        }
    }

    pub fn lookup(&self, verb: &str) -> Option<&'static str> {
        self.table.get(verb.trim().to_lowercase().as_str()).copied()
    }

    /// Tries the surface form first, so inflected entries such as
    /// "providing" win over their lemma, then falls back to the lemma.
    pub fn nominalize(&self, token: &Token) -> Option<&'static str> {
        self.lookup(&token.text)
            .or_else(|| token.lemma.as_deref().and_then(|lemma| self.lookup(lemma)))
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}
