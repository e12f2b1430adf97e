//! CoNLL-U reader and writer.
//!
//! Each sentence is a block of tab-separated token lines terminated by a blank
//! line. IDs are 1-based and `HEAD = 0` marks the root, which maps onto a
//! self-referencing head in [`ParsedSentence`]. Multiword ranges (`1-2`) and
//! empty nodes (`1.1`) carry no syntactic head and are skipped.

use std::fmt::Write as _;
use std::io::Read;

use super::{DependencyLabel, ParsedCorpus, ParsedSentence, PartOfSpeech, SentenceError, Token};

const COLUMNS: usize = 10;
const EMPTY: &str = "_";

#[derive(Debug, thiserror::Error)]
pub enum ConlluError {
    #[error("failed to read CoNLL-U input: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line}: expected 10 tab-separated columns, found {found}")]
    Columns { line: usize, found: usize },
    #[error("line {line}: invalid token id '{value}'")]
    InvalidId { line: usize, value: String },
    #[error("line {line}: token id {found} out of sequence, expected {expected}")]
    OutOfSequence {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("line {line}: invalid head '{value}'")]
    InvalidHead { line: usize, value: String },
    #[error("sentence ending at line {line} is malformed: {source}")]
    Sentence {
        line: usize,
        #[source]
        source: SentenceError,
    },
}

#[derive(Debug, Clone)]
pub struct ConlluSentence {
    pub sent_id: Option<String>,
    pub text: Option<String>,
    pub sentence: ParsedSentence,
}

impl ConlluSentence {
    /// The `# text` comment when present, otherwise the re-rendered tokens.
    pub fn key(&self) -> String {
        self.text
            .clone()
            .unwrap_or_else(|| self.sentence.text())
    }
}

#[derive(Default)]
struct Block {
    sent_id: Option<String>,
    text: Option<String>,
    tokens: Vec<Token>,
}

impl Block {
    fn is_empty(&self) -> bool {
        self.tokens.is_empty() && self.sent_id.is_none() && self.text.is_none()
    }

    fn finish(self, line: usize) -> Result<Option<ConlluSentence>, ConlluError> {
        if self.tokens.is_empty() {
            return Ok(None);
        }
        let sentence = ParsedSentence::new(self.tokens)
            .map_err(|source| ConlluError::Sentence { line, source })?;
        Ok(Some(ConlluSentence {
            sent_id: self.sent_id,
            text: self.text,
            sentence,
        }))
    }
}

pub fn parse_document(input: &str) -> Result<Vec<ConlluSentence>, ConlluError> {
    let mut sentences = Vec::new();
    let mut block = Block::default();
    let mut last_line = 0;

    for (index, raw) in input.lines().enumerate() {
        let line = index + 1;
        last_line = line;
        let trimmed = raw.trim_end_matches('\r');

        if trimmed.trim().is_empty() {
            if !block.is_empty() {
                sentences.extend(std::mem::take(&mut block).finish(line)?);
            }
            continue;
        }

        if let Some(comment) = trimmed.strip_prefix('#') {
            if let Some((key, value)) = comment.split_once('=') {
                match key.trim() {
                    "text" => block.text = Some(value.trim().to_string()),
                    "sent_id" => block.sent_id = Some(value.trim().to_string()),
                    _ => {}
                }
            }
            continue;
        }

        if let Some(token) = parse_token_line(trimmed, line, block.tokens.len())? {
            block.tokens.push(token);
        }
    }

    if !block.is_empty() {
        sentences.extend(block.finish(last_line)?);
    }

    Ok(sentences)
}

fn parse_token_line(
    line_text: &str,
    line: usize,
    seen: usize,
) -> Result<Option<Token>, ConlluError> {
    let columns: Vec<&str> = line_text.split('\t').collect();
    if columns.len() != COLUMNS {
        return Err(ConlluError::Columns {
            line,
            found: columns.len(),
        });
    }

    let id = columns[0];
    if id.contains('-') || id.contains('.') {
        return Ok(None);
    }
    let id: usize = id.parse().map_err(|_| ConlluError::InvalidId {
        line,
        value: id.to_string(),
    })?;
    if id != seen + 1 {
        return Err(ConlluError::OutOfSequence {
            line,
            expected: seen + 1,
            found: id,
        });
    }

    let head: usize = columns[6].parse().map_err(|_| ConlluError::InvalidHead {
        line,
        value: columns[6].to_string(),
    })?;
    let index = id - 1;
    let head = if head == 0 { index } else { head - 1 };

    let lemma = match columns[2] {
        EMPTY => None,
        lemma => Some(lemma.to_string()),
    };
    let space_after = !columns[9].split('|').any(|item| item == "SpaceAfter=No");

    Ok(Some(Token {
        text: columns[1].to_string(),
        lemma,
        pos: PartOfSpeech::from_tag(columns[3]),
        dep: DependencyLabel::from_label(columns[7]),
        head,
        space_after,
    }))
}

/// Reads a whole CoNLL-U document into a corpus keyed by sentence text.
pub fn read_corpus<R: Read>(mut reader: R) -> Result<ParsedCorpus, ConlluError> {
    let mut input = String::new();
    reader.read_to_string(&mut input)?;

    let mut corpus = ParsedCorpus::new();
    for parsed in parse_document(&input)? {
        let key = parsed.key();
        corpus.insert(key, parsed.sentence);
    }
    Ok(corpus)
}

pub fn write_sentence(out: &mut String, text: &str, sentence: &ParsedSentence) {
    // The comment is a single line; a break inside it would end the comment early.
    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
    // Writing into a String cannot fail.
    let _ = writeln!(out, "# text = {text}");
    for (index, token) in sentence.tokens().iter().enumerate() {
        let head = if token.head == index { 0 } else { token.head + 1 };
        let misc = if token.space_after { EMPTY } else { "SpaceAfter=No" };
        let _ = writeln!(
            out,
            "{}\t{}\t{}\t{}\t_\t_\t{}\t{}\t_\t{}",
            index + 1,
            token.text,
            token.lemma.as_deref().unwrap_or(EMPTY),
            token.pos,
            head,
            token.dep,
            misc
        );
    }
    out.push('\n');
}

pub fn write_corpus(corpus: &ParsedCorpus) -> String {
    let mut out = String::new();
    for (text, sentence) in corpus.iter() {
        write_sentence(&mut out, text, sentence);
    }
    out
}
