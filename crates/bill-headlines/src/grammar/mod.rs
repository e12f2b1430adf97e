//! Procedural phrase grammar.
//!
//! A [`Grammar`] maps symbol names to one or more [`Template`] alternatives.
//! Expanding a symbol picks one alternative through a [`Chooser`], then
//! recursively expands every reference inside it and applies the reference's
//! modifiers to the result. Rule sets are validated once at load time, so a
//! loaded grammar never meets an undefined symbol or a cycle while expanding.

mod rules;
pub mod template;

use std::collections::{BTreeMap, HashMap};
use std::io::Read;
use std::path::Path;

use rand::Rng;
use serde::Deserialize;
use thiserror::Error;

pub use rules::START_SYMBOL;
pub use template::{Modifier, Segment, Template, TemplateError};

/// Source of alternative selections during expansion.
pub trait Chooser {
    /// Returns an index in `0..len`. `len` is never zero.
    fn pick(&mut self, len: usize) -> usize;
}

impl<R: Rng> Chooser for R {
    fn pick(&mut self, len: usize) -> usize {
        self.gen_range(0..len)
    }
}

#[derive(Debug, Error)]
pub enum GrammarError {
    #[error("rule '{symbol}' has an invalid template: {source}")]
    Template {
        symbol: String,
        #[source]
        source: TemplateError,
    },
    #[error("symbol '{symbol}' is never defined (referenced from {referenced_from:?})")]
    UndefinedSymbol {
        symbol: String,
        referenced_from: Option<String>,
    },
    #[error("rule '{symbol}' has no alternatives")]
    EmptyRule { symbol: String },
    #[error("rule '{symbol}' expands into itself")]
    Cycle { symbol: String },
    #[error("failed to read grammar file: {0}")]
    Io(#[from] std::io::Error),
    #[error("grammar file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// A Tracery-style rule value: a single template or a list of alternatives.
#[derive(Deserialize)]
#[serde(untagged)]
enum RuleSource {
    One(String),
    Many(Vec<String>),
}

#[derive(Debug, Clone)]
pub struct Grammar {
    rules: HashMap<String, Vec<Template>>,
}

impl Grammar {
    pub fn new<I, K, V>(rules: I) -> Result<Self, GrammarError>
    where
        I: IntoIterator<Item = (K, Vec<V>)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        let mut parsed = HashMap::new();
        for (symbol, alternatives) in rules {
            let symbol = symbol.into();
            let templates = alternatives
                .iter()
                .map(|source| Template::parse(source.as_ref()))
                .collect::<Result<Vec<_>, _>>()
                .map_err(|source| GrammarError::Template {
                    symbol: symbol.clone(),
                    source,
                })?;
            parsed.insert(symbol, templates);
        }

        let grammar = Self { rules: parsed };
        grammar.validate()?;
        Ok(grammar)
    }

    /// The superlative phrase grammar ("World's most amazing", "Our greatest").
    pub fn superlatives() -> Result<Self, GrammarError> {
        Self::new(rules::superlative_rules())
    }

    /// Loads a Tracery-style JSON object of `symbol -> template | [templates]`.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, GrammarError> {
        let raw: BTreeMap<String, RuleSource> = serde_json::from_reader(reader)?;
        Self::new(raw.into_iter().map(|(symbol, source)| {
            let alternatives = match source {
                RuleSource::One(template) => vec![template],
                RuleSource::Many(templates) => templates,
            };
            (symbol, alternatives)
        }))
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, GrammarError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.rules.contains_key(symbol)
    }

    /// Expands `symbol` into text. Every call draws fresh choices.
    pub fn expand<C: Chooser + ?Sized>(
        &self,
        symbol: &str,
        chooser: &mut C,
    ) -> Result<String, GrammarError> {
        let mut out = String::new();
        self.expand_into(symbol, None, chooser, &mut out)?;
        Ok(out)
    }

    /// Expands an ad-hoc template such as `"#origin#"` against this grammar.
    pub fn flatten<C: Chooser + ?Sized>(
        &self,
        source: &str,
        chooser: &mut C,
    ) -> Result<String, GrammarError> {
        let template = Template::parse(source).map_err(|source| GrammarError::Template {
            symbol: String::new(),
            source,
        })?;
        let mut out = String::new();
        self.render(&template, None, chooser, &mut out)?;
        Ok(out)
    }

    fn expand_into<C: Chooser + ?Sized>(
        &self,
        symbol: &str,
        referenced_from: Option<&str>,
        chooser: &mut C,
        out: &mut String,
    ) -> Result<(), GrammarError> {
        let alternatives = self
            .rules
            .get(symbol)
            .ok_or_else(|| GrammarError::UndefinedSymbol {
                symbol: symbol.to_string(),
                referenced_from: referenced_from.map(str::to_string),
            })?;
        if alternatives.is_empty() {
            return Err(GrammarError::EmptyRule {
                symbol: symbol.to_string(),
            });
        }

        let choice = chooser.pick(alternatives.len()).min(alternatives.len() - 1);
        self.render(&alternatives[choice], Some(symbol), chooser, out)
    }

    fn render<C: Chooser + ?Sized>(
        &self,
        template: &Template,
        symbol: Option<&str>,
        chooser: &mut C,
        out: &mut String,
    ) -> Result<(), GrammarError> {
        for segment in template.segments() {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Reference {
                    symbol: reference,
                    modifiers,
                } => {
                    let mut expanded = String::new();
                    self.expand_into(reference, symbol, chooser, &mut expanded)?;
                    for modifier in modifiers {
                        expanded = modifier.apply(&expanded);
                    }
                    out.push_str(&expanded);
                }
            }
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), GrammarError> {
        let mut symbols: Vec<&String> = self.rules.keys().collect();
        symbols.sort();

        for symbol in &symbols {
            let alternatives = &self.rules[*symbol];
            if alternatives.is_empty() {
                return Err(GrammarError::EmptyRule {
                    symbol: symbol.to_string(),
                });
            }
            for reference in alternatives.iter().flat_map(|template| template.references()) {
                if !self.rules.contains_key(reference) {
                    return Err(GrammarError::UndefinedSymbol {
                        symbol: reference.to_string(),
                        referenced_from: Some(symbol.to_string()),
                    });
                }
            }
        }

        let mut state: HashMap<&str, Visit> = HashMap::new();
        for symbol in symbols {
            self.check_acyclic(symbol, &mut state)?;
        }
        Ok(())
    }

    fn check_acyclic<'a>(
        &'a self,
        symbol: &'a str,
        state: &mut HashMap<&'a str, Visit>,
    ) -> Result<(), GrammarError> {
        match state.get(symbol) {
            Some(Visit::Done) => return Ok(()),
            Some(Visit::Active) => {
                return Err(GrammarError::Cycle {
                    symbol: symbol.to_string(),
                })
            }
            None => {}
        }

        state.insert(symbol, Visit::Active);
        if let Some(alternatives) = self.rules.get(symbol) {
            for reference in alternatives.iter().flat_map(|template| template.references()) {
                self.check_acyclic(reference, state)?;
            }
        }
        state.insert(symbol, Visit::Done);
        Ok(())
    }
}

#[derive(Clone, Copy)]
enum Visit {
    Active,
    Done,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn builtin_grammar_yields_capitalized_superlatives() {
        let grammar = Grammar::superlatives().expect("built-in grammar is valid");
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let phrase = grammar.expand(START_SYMBOL, &mut rng).expect("expands");
            let first = phrase.chars().next().expect("non-empty phrase");
            assert!(first.is_uppercase(), "{phrase} should start capitalized");
            assert!(!phrase.contains('#'));
            assert!(!phrase.contains("'S"), "{phrase} must keep possessives lower-case");
        }
    }

    #[test]
    fn capitalize_modifier_leaves_possessive_alone() {
        let grammar = Grammar::new([
            ("origin", vec!["#places.capitalize# #adjective#"]),
            ("places", vec!["world's"]),
            ("adjective", vec!["greatest"]),
        ])
        .expect("valid");
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(grammar.expand("origin", &mut rng).expect("expands"), "World's greatest");
    }

    #[test]
    fn same_seed_same_phrase() {
        let grammar = Grammar::superlatives().expect("valid");
        let first = grammar
            .expand(START_SYMBOL, &mut StdRng::seed_from_u64(42))
            .expect("expands");
        let second = grammar
            .expand(START_SYMBOL, &mut StdRng::seed_from_u64(42))
            .expect("expands");
        assert_eq!(first, second);
    }

    #[test]
    fn flatten_expands_inline_templates() {
        let grammar = Grammar::new([("name", vec!["senate"])]).expect("valid");
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(
            grammar.flatten("The #name.capitalize#!", &mut rng).expect("flattens"),
            "The Senate!"
        );
    }

    #[test]
    fn undefined_reference_is_fatal() {
        let err = Grammar::new([("origin", vec!["#missing#"])]).expect_err("undefined");
        match err {
            GrammarError::UndefinedSymbol {
                symbol,
                referenced_from,
            } => {
                assert_eq!(symbol, "missing");
                assert_eq!(referenced_from.as_deref(), Some("origin"));
            }
            other => panic!("expected undefined symbol, got {other:?}"),
        }
    }

    #[test]
    fn unknown_start_symbol_is_reported() {
        let grammar = Grammar::superlatives().expect("valid");
        let err = grammar
            .expand("headline", &mut StdRng::seed_from_u64(0))
            .expect_err("unknown start");
        assert!(matches!(err, GrammarError::UndefinedSymbol { referenced_from: None, .. }));
    }

    #[test]
    fn empty_and_cyclic_rules_are_rejected() {
        let empty: Vec<&str> = Vec::new();
        let err = Grammar::new([("origin", empty)]).expect_err("empty");
        assert!(matches!(err, GrammarError::EmptyRule { .. }));

        let err = Grammar::new([("a", vec!["#b#"]), ("b", vec!["x", "#a#"])]).expect_err("cycle");
        assert!(matches!(err, GrammarError::Cycle { .. }));
    }

    #[test]
    fn loads_tracery_json() {
        let json = r##"{
            "origin": "#places.capitalize# #superlatives#",
            "places": ["history's", "our"],
            "superlatives": ["finest"]
        }"##;
        let grammar = Grammar::from_reader(json.as_bytes()).expect("loads");
        let phrase = grammar
            .expand("origin", &mut StdRng::seed_from_u64(5))
            .expect("expands");
        assert!(phrase == "History's finest" || phrase == "Our finest");
    }
}
