use bill_headlines::grammar::Grammar;
use bill_headlines::sentence::conllu::{read_corpus, write_corpus};
use bill_headlines::sentence::{
    DependencyLabel, ParsedCorpus, ParsedSentence, PartOfSpeech, Token,
};
use bill_headlines::workflows::congress::{BillRecord, BillUrls};
use bill_headlines::workflows::headlines::{
    HeadlineAssembler, HeadlinePipeline, PhraseExtractor, SkipReason, VerbNominalizer, ELLIPSIS,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn conllu_row(columns: [&str; 10]) -> String {
    columns.join("\t")
}

fn grid_and_firefighters() -> String {
    let mut doc = String::new();
    doc.push_str("# sent_id = 1\n");
    doc.push_str(
        "# text = Authorize the modernization of the power grid, and for other purposes\n",
    );
    for row in [
        ["1", "Authorize", "authorize", "VERB", "VB", "_", "0", "root", "_", "_"],
        ["2", "the", "the", "DET", "DT", "_", "3", "det", "_", "_"],
        ["3", "modernization", "modernization", "NOUN", "NN", "_", "1", "obj", "_", "_"],
        ["4", "of", "of", "ADP", "IN", "_", "7", "case", "_", "_"],
        ["5", "the", "the", "DET", "DT", "_", "7", "det", "_", "_"],
        ["6", "power", "power", "NOUN", "NN", "_", "7", "compound", "_", "_"],
        ["7", "grid", "grid", "NOUN", "NN", "_", "3", "nmod", "_", "SpaceAfter=No"],
        ["8", ",", ",", "PUNCT", ",", "_", "12", "punct", "_", "_"],
        ["9", "and", "and", "CCONJ", "CC", "_", "12", "cc", "_", "_"],
        ["10", "for", "for", "ADP", "IN", "_", "12", "case", "_", "_"],
        ["11", "other", "other", "ADJ", "JJ", "_", "12", "amod", "_", "_"],
        ["12", "purposes", "purpose", "NOUN", "NNS", "_", "1", "obl", "_", "_"],
    ] {
        doc.push_str(&conllu_row(row));
        doc.push('\n');
    }
    doc.push('\n');

    doc.push_str("# sent_id = 2\n");
    doc.push_str("# text = Recognize the bravest firefighters\n");
    for row in [
        ["1", "Recognize", "recognize", "VERB", "VB", "_", "0", "root", "_", "_"],
        ["2", "the", "the", "DET", "DT", "_", "4", "det", "_", "_"],
        ["3", "bravest", "brave", "ADJ", "JJS", "_", "4", "amod", "_", "_"],
        ["4", "firefighters", "firefighter", "NOUN", "NNS", "_", "1", "obj", "_", "_"],
    ] {
        doc.push_str(&conllu_row(row));
        doc.push('\n');
    }
    doc.push('\n');
    doc
}

fn bill(bill_type: &str, number: u32, title: &str) -> BillRecord {
    BillRecord {
        bill_type: bill_type.into(),
        number,
        official_title: title.into(),
        urls: BillUrls {
            congress: format!("https://www.congress.gov/bill/115th-congress/{bill_type}/{number}"),
        },
    }
}

fn pipeline(max_len: usize) -> HeadlinePipeline {
    let grammar = Grammar::new([
        ("origin", vec!["#places.capitalize# #adjective#"]),
        ("places", vec!["our"]),
        ("adjective", vec!["greatest"]),
    ])
    .expect("grammar is well formed");
    HeadlinePipeline::new(
        grammar,
        "origin",
        PhraseExtractor::default(),
        VerbNominalizer::standard(),
        HeadlineAssembler::new(max_len),
    )
    .expect("start symbol defined")
}

#[test]
fn verb_headed_title_becomes_nominalized_headline() {
    let corpus = read_corpus(grid_and_firefighters().as_bytes()).expect("corpus parses");
    let records = vec![
        bill(
            "hr",
            7,
            "Authorize the modernization of the power grid, and for other purposes.",
        ),
        bill("hr", 42, "Recognize the bravest firefighters."),
    ];

    let outcome = pipeline(115)
        .run_batch(&records, &corpus, &mut StdRng::seed_from_u64(42))
        .expect("batch runs");

    assert_eq!(outcome.headlines.len(), 1);
    let headline = &outcome.headlines[0];
    assert_eq!(headline.bill_id.as_str(), "HR.7");
    assert_eq!(
        headline.text,
        "HR.7 Our greatest authorization of the modernization of the power grid \
         https://www.congress.gov/bill/115th-congress/hr/7"
    );
    assert!(!headline.text.contains("other purposes"));

    assert_eq!(outcome.skipped.len(), 1);
    assert_eq!(outcome.skipped[0].0.as_str(), "HR.42");
    assert_eq!(
        outcome.skipped[0].1,
        SkipReason::UnknownVerb("recognize".into())
    );
    assert_eq!(outcome.counts.unknown_verb, 1);
}

#[test]
fn corpus_survives_a_write_read_cycle() {
    let corpus = read_corpus(grid_and_firefighters().as_bytes()).expect("corpus parses");
    let reread = read_corpus(write_corpus(&corpus).as_bytes()).expect("written corpus parses");

    assert_eq!(reread.len(), 2);
    let grid = reread
        .get("Authorize the modernization of the power grid, and for other purposes")
        .expect("grid sentence present");
    assert_eq!(
        grid.text(),
        "Authorize the modernization of the power grid, and for other purposes"
    );
    assert_eq!(grid.first_with_dep(&DependencyLabel::DirectObject), Some(2));
}

#[test]
fn long_noun_headed_title_is_truncated_before_the_link() {
    let words = [
        "Act", "to", "designate", "the", "facility", "of", "the", "United", "States",
        "Postal", "Service", "located", "at", "Main", "Street",
    ];
    let tokens = words
        .iter()
        .enumerate()
        .map(|(index, word)| {
            if index == 0 {
                Token::new(*word, PartOfSpeech::Noun, DependencyLabel::Root, 0)
            } else {
                Token::new(
                    *word,
                    PartOfSpeech::Other("X".into()),
                    DependencyLabel::Other("dep".into()),
                    0,
                )
            }
        })
        .collect();
    let sentence = ParsedSentence::new(tokens).expect("valid sentence");
    let title = sentence.text();
    let mut corpus = ParsedCorpus::new();
    corpus.insert(title.clone(), sentence);

    let record = bill("s", 3, &title);
    let outcome = pipeline(40)
        .run_batch(&[record], &corpus, &mut StdRng::seed_from_u64(1))
        .expect("batch runs");

    let text = &outcome.headlines[0].text;
    let (prose, link) = text
        .rsplit_once(' ')
        .expect("link is separated by a space");
    assert_eq!(link, "https://www.congress.gov/bill/115th-congress/s/3");
    assert!(prose.ends_with(ELLIPSIS));
    assert!(prose.chars().count() <= 40);
    assert!(prose.starts_with("S.3 Our greatest Act to designate"));
}

#[test]
fn unparsed_titles_are_counted_not_fatal() {
    let outcome = pipeline(115)
        .run_batch(
            &[bill("hr", 1, "A title the parser never saw.")],
            &ParsedCorpus::new(),
            &mut StdRng::seed_from_u64(0),
        )
        .expect("batch runs");
    assert!(outcome.headlines.is_empty());
    assert_eq!(outcome.counts.missing_parse, 1);
}
