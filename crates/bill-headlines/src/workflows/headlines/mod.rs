//! Bill title to headline transformation.

mod assembler;
mod classifier;
mod extractor;
mod nominalizer;
mod pipeline;

pub use assembler::{truncate_on_word, Headline, HeadlineAssembler, HeadlineParts, ELLIPSIS};
pub use classifier::{classify, SentenceShape, UnsupportedReason};
pub use extractor::{object_phrase_start, PhraseExtractor, BOILERPLATE_CLAUSE};
pub use nominalizer::VerbNominalizer;
pub use pipeline::{BatchOutcome, HeadlinePipeline, SkipCounts, SkipReason, TransformError};
