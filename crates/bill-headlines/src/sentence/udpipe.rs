//! Client for a UDPipe-compatible dependency parsing service.

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::conllu::{self, ConlluError};
use super::{ParsedCorpus, ParsedSentence, SentenceError};

#[derive(Error, Debug)]
pub enum ParseServiceError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("parser returned {status}: {body}")]
    Server { status: u16, body: String },
    #[error("parser returned unreadable CoNLL-U: {0}")]
    Conllu(#[from] ConlluError),
    #[error("parser returned no sentences")]
    Empty,
    #[error("parser output could not be merged: {0}")]
    Sentence(#[from] SentenceError),
}

#[derive(Deserialize)]
struct ProcessResponse {
    result: String,
}

/// Outcome of [`UdpipeClient::fill_corpus`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ParseSummary {
    pub parsed: usize,
    pub cached: usize,
    pub failed: usize,
}

#[derive(Debug, Clone)]
pub struct ParseSettings {
    /// Full `process` URL of the service.
    pub endpoint: String,
    pub model: String,
    /// Fixed pause between consecutive requests.
    pub delay: Duration,
    /// Extra attempts per title after the first failure.
    pub retries: u32,
}

pub struct UdpipeClient {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    delay: Duration,
    retries: u32,
}

impl UdpipeClient {
    pub fn new(settings: ParseSettings) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: settings.endpoint.trim_end_matches('/').to_string(),
            model: settings.model,
            delay: settings.delay,
            retries: settings.retries,
        }
    }

    fn form<'a>(&'a self, text: &'a str) -> [(&'static str, &'a str); 5] {
        [
            ("tokenizer", ""),
            ("tagger", ""),
            ("parser", ""),
            ("model", self.model.as_str()),
            ("data", text),
        ]
    }

    /// Parse one title. Multiple sentences in the reply are merged into one
    /// token sequence so the caller sees every root.
    pub async fn parse(&self, text: &str) -> Result<ParsedSentence, ParseServiceError> {
        debug!(endpoint = %self.endpoint, "parsing title");
        let resp = self
            .client
            .post(&self.endpoint)
            .form(&self.form(text))
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ParseServiceError::Server {
                status: status.as_u16(),
                body,
            });
        }

        let reply: ProcessResponse = resp.json().await?;
        decode_reply(&reply.result)
    }

    async fn parse_with_retries(
        &self,
        title: &str,
        first_request: &mut bool,
    ) -> Result<ParsedSentence, ParseServiceError> {
        let attempts = self.retries + 1;
        let mut attempt = 0;

        loop {
            if !*first_request {
                tokio::time::sleep(self.delay).await;
            }
            *first_request = false;
            attempt += 1;

            match self.parse(title).await {
                Ok(sentence) => return Ok(sentence),
                Err(err) if attempt < attempts => {
                    warn!(title, attempt, error = %err, "parse request failed, retrying");
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Parse every title missing from `corpus`, pausing between requests and
    /// retrying failed ones. Titles that still fail are logged and counted; the
    /// affected records later drop out as unparsed.
    pub async fn fill_corpus<'a, I>(&self, titles: I, corpus: &mut ParsedCorpus) -> ParseSummary
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut summary = ParseSummary::default();
        let mut first_request = true;
        for title in titles {
            if corpus.contains(title) {
                summary.cached += 1;
                continue;
            }
            match self.parse_with_retries(title, &mut first_request).await {
                Ok(sentence) => {
                    corpus.insert(title, sentence);
                    summary.parsed += 1;
                }
                Err(err) => {
                    warn!(title, error = %err, "failed to parse title");
                    summary.failed += 1;
                }
            }
        }
        info!(
            parsed = summary.parsed,
            cached = summary.cached,
            failed = summary.failed,
            "title parsing finished"
        );
        summary
    }
}

fn decode_reply(conllu_text: &str) -> Result<ParsedSentence, ParseServiceError> {
    let sentences: Vec<ParsedSentence> = conllu::parse_document(conllu_text)?
        .into_iter()
        .map(|parsed| parsed.sentence)
        .collect();
    if sentences.is_empty() {
        return Err(ParseServiceError::Empty);
    }
    Ok(ParsedSentence::concat(sentences)?)
}
