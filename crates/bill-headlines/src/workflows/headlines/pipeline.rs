use thiserror::Error;
use tracing::{debug, info, warn};

use super::assembler::{Headline, HeadlineAssembler, HeadlineParts};
use super::classifier::{classify, SentenceShape, UnsupportedReason};
use super::extractor::PhraseExtractor;
use super::nominalizer::VerbNominalizer;
use crate::config::HeadlineConfig;
use crate::grammar::{Chooser, Grammar, GrammarError, START_SYMBOL};
use crate::sentence::{ParsedCorpus, ParsedSentence};
use crate::workflows::congress::{BillId, BillRecord};

/// Why a record produced no headline. Never fatal to a batch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    #[error("no parse available for the title")]
    MissingParse,
    #[error("unsupported sentence: {0}")]
    Unsupported(UnsupportedReason),
    #[error("verb-headed title has no direct object")]
    MissingDirectObject,
    #[error("verb '{0}' has no nominal form")]
    UnknownVerb(String),
}

#[derive(Debug, Error)]
pub enum TransformError {
    #[error("record skipped: {0}")]
    Skipped(#[from] SkipReason),
    #[error(transparent)]
    Grammar(#[from] GrammarError),
}

/// Per-category drop counts for one batch.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SkipCounts {
    pub missing_parse: usize,
    pub unsupported: usize,
    pub missing_direct_object: usize,
    pub unknown_verb: usize,
}

impl SkipCounts {
    fn record(&mut self, reason: &SkipReason) {
        match reason {
            SkipReason::MissingParse => self.missing_parse += 1,
            SkipReason::Unsupported(_) => self.unsupported += 1,
            SkipReason::MissingDirectObject => self.missing_direct_object += 1,
            SkipReason::UnknownVerb(_) => self.unknown_verb += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.missing_parse + self.unsupported + self.missing_direct_object + self.unknown_verb
    }
}

#[derive(Debug, Default, Clone)]
pub struct BatchOutcome {
    pub headlines: Vec<Headline>,
    pub skipped: Vec<(BillId, SkipReason)>,
    pub counts: SkipCounts,
}

/// Turns one parsed bill title into a headline.
#[derive(Debug, Clone)]
pub struct HeadlinePipeline {
    grammar: Grammar,
    start_symbol: String,
    extractor: PhraseExtractor,
    nominalizer: VerbNominalizer,
    assembler: HeadlineAssembler,
}

impl HeadlinePipeline {
    pub fn new(
        grammar: Grammar,
        start_symbol: impl Into<String>,
        extractor: PhraseExtractor,
        nominalizer: VerbNominalizer,
        assembler: HeadlineAssembler,
    ) -> Result<Self, GrammarError> {
        let start_symbol = start_symbol.into();
        if !grammar.contains(&start_symbol) {
            return Err(GrammarError::UndefinedSymbol {
                symbol: start_symbol,
                referenced_from: None,
            });
        }

        Ok(Self {
            grammar,
            start_symbol,
            extractor,
            nominalizer,
            assembler,
        })
    }

    /// Standard pipeline for the configured length budget, using the grammar
    /// file when one is configured and the built-in superlatives otherwise.
    pub fn from_config(config: &HeadlineConfig) -> Result<Self, GrammarError> {
        let grammar = match &config.grammar_path {
            Some(path) => Grammar::from_path(path)?,
            None => Grammar::superlatives()?,
        };
        Self::new(
            grammar,
            START_SYMBOL,
            PhraseExtractor::default(),
            VerbNominalizer::standard(),
            HeadlineAssembler::new(config.max_length),
        )
    }

    pub fn transform<C: Chooser + ?Sized>(
        &self,
        record: &BillRecord,
        sentence: &ParsedSentence,
        chooser: &mut C,
    ) -> Result<Headline, TransformError> {
        let (nominal, remainder) = match classify(sentence) {
            SentenceShape::Unsupported(reason) => {
                return Err(SkipReason::Unsupported(reason).into());
            }
            SentenceShape::NounHeaded { root } => {
                (None, self.extractor.noun_phrase(sentence, root))
            }
            SentenceShape::VerbHeaded { root } => {
                let remainder = self
                    .extractor
                    .object_phrase(sentence)
                    .ok_or(SkipReason::MissingDirectObject)?;
                let verb = sentence
                    .token(root)
                    .ok_or(SkipReason::Unsupported(UnsupportedReason::MissingRoot))?;
                let nominal = self
                    .nominalizer
                    .nominalize(verb)
                    .ok_or_else(|| SkipReason::UnknownVerb(verb.text.to_lowercase()))?;
                (Some(nominal), remainder)
            }
        };

        let phrase = self.grammar.expand(&self.start_symbol, chooser)?;
        let bill_id = record.id();

        Ok(self.assembler.assemble(HeadlineParts {
            bill_id: &bill_id,
            phrase: &phrase,
            nominal,
            remainder: &remainder,
            link: record.source_url(),
        }))
    }

    /// Transforms every record in order. Dropped records are logged and
    /// counted; only grammar failures abort the batch.
    pub fn run_batch<C: Chooser + ?Sized>(
        &self,
        records: &[BillRecord],
        corpus: &ParsedCorpus,
        chooser: &mut C,
    ) -> Result<BatchOutcome, GrammarError> {
        let mut outcome = BatchOutcome::default();

        for record in records {
            let bill = record.id();
            let result = match corpus.get(&record.sentence_text()) {
                Some(sentence) => self.transform(record, sentence, chooser),
                None => Err(SkipReason::MissingParse.into()),
            };

            match result {
                Ok(headline) => {
                    debug!(%bill, headline = %headline.text, "headline generated");
                    outcome.headlines.push(headline);
                }
                Err(TransformError::Skipped(reason)) => {
                    warn!(%bill, reason = %reason, "skipping bill");
                    outcome.counts.record(&reason);
                    outcome.skipped.push((bill, reason));
                }
                Err(TransformError::Grammar(err)) => return Err(err),
            }
        }

        info!(
            generated = outcome.headlines.len(),
            skipped = outcome.counts.total(),
            "headline batch finished"
        );
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentence::fixtures::sentence;
    use crate::workflows::congress::BillUrls;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn pipeline() -> HeadlinePipeline {
        let grammar = Grammar::new([
            ("origin", vec!["#places.capitalize# greatest"]),
            ("places", vec!["our"]),
        ])
        .expect("valid grammar");
        HeadlinePipeline::new(
            grammar,
            "origin",
            PhraseExtractor::default(),
            VerbNominalizer::standard(),
            HeadlineAssembler::new(115),
        )
        .expect("pipeline")
    }

    fn record(number: u32, title: &str) -> BillRecord {
        BillRecord {
            bill_type: "hr".into(),
            number,
            official_title: title.into(),
            urls: BillUrls {
                congress: format!("https://example.gov/hr{number}"),
            },
        }
    }

    #[test]
    fn from_config_falls_back_to_built_in_grammar() {
        let config = HeadlineConfig {
            max_length: 115,
            grammar_path: None,
            rng_seed: None,
        };
        let parsed = sentence(&[("Water", "NOUN", "compound", 1), ("Act", "NOUN", "root", 1)]);
        let headline = HeadlinePipeline::from_config(&config)
            .expect("pipeline")
            .transform(&record(9, "Water Act."), &parsed, &mut StdRng::seed_from_u64(3))
            .expect("headline");
        assert!(headline.text.starts_with("HR.9 "));
        assert!(headline.text.ends_with(" Act https://example.gov/hr9"));
    }

    #[test]
    fn rejects_unknown_start_symbol() {
        let grammar = Grammar::new([("origin", vec!["x"])]).expect("valid");
        let err = HeadlinePipeline::new(
            grammar,
            "headline",
            PhraseExtractor::default(),
            VerbNominalizer::standard(),
            HeadlineAssembler::new(115),
        )
        .expect_err("start symbol missing");
        assert!(matches!(err, GrammarError::UndefinedSymbol { .. }));
    }

    #[test]
    fn noun_headed_title_keeps_root_onwards() {
        let parsed = sentence(&[
            ("A", "DET", "det", 1),
            ("bill", "NOUN", "root", 1),
            ("honoring", "VERB", "acl", 1),
            ("nurses", "NOUN", "obj", 2),
        ]);
        let mut rng = StdRng::seed_from_u64(0);
        let headline = pipeline()
            .transform(&record(5, "A bill honoring nurses."), &parsed, &mut rng)
            .expect("headline");
        assert_eq!(
            headline.text,
            "HR.5 Our greatest bill honoring nurses https://example.gov/hr5"
        );
    }

    #[test]
    fn verb_headed_title_is_nominalized() {
        let parsed = sentence(&[
            ("Honor", "VERB", "root", 0),
            ("the", "DET", "det", 2),
            ("nurses", "NOUN", "obj", 0),
        ]);
        let mut rng = StdRng::seed_from_u64(0);
        let headline = pipeline()
            .transform(&record(6, "Honor the nurses."), &parsed, &mut rng)
            .expect("headline");
        assert_eq!(
            headline.text,
            "HR.6 Our greatest honoring of the nurses https://example.gov/hr6"
        );
    }

    #[test]
    fn drops_are_reported_as_skip_reasons() {
        let pipeline = pipeline();
        let mut rng = StdRng::seed_from_u64(0);

        let no_object = sentence(&[("Adjourn", "VERB", "root", 0)]);
        let err = pipeline
            .transform(&record(1, "Adjourn."), &no_object, &mut rng)
            .expect_err("dropped");
        assert!(matches!(err, TransformError::Skipped(SkipReason::MissingDirectObject)));

        let unknown = sentence(&[
            ("Recognize", "VERB", "root", 0),
            ("firefighters", "NOUN", "obj", 0),
        ]);
        let err = pipeline
            .transform(&record(2, "Recognize firefighters."), &unknown, &mut rng)
            .expect_err("dropped");
        assert!(matches!(
            err,
            TransformError::Skipped(SkipReason::UnknownVerb(ref verb)) if verb == "recognize"
        ));
    }

    #[test]
    fn batch_counts_every_drop() {
        let mut corpus = ParsedCorpus::new();
        corpus.insert(
            "Water Act",
            sentence(&[("Water", "NOUN", "compound", 1), ("Act", "NOUN", "root", 1)]),
        );
        corpus.insert("America", sentence(&[("America", "PROPN", "root", 0)]));

        let records = vec![
            record(1, "Water Act."),
            record(2, "America"),
            record(3, "Unparsed title"),
        ];
        let outcome = pipeline()
            .run_batch(&records, &corpus, &mut StdRng::seed_from_u64(9))
            .expect("batch");

        assert_eq!(outcome.headlines.len(), 1);
        assert_eq!(outcome.headlines[0].bill_id.as_str(), "HR.1");
        assert_eq!(outcome.counts.unsupported, 1);
        assert_eq!(outcome.counts.missing_parse, 1);
        assert_eq!(outcome.counts.total(), 2);
        assert_eq!(outcome.skipped[1].0.as_str(), "HR.3");
    }
}
