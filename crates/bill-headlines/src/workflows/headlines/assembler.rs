use crate::workflows::congress::BillId;

pub const ELLIPSIS: char = '…';

/// A finished, publishable headline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Headline {
    pub bill_id: BillId,
    pub text: String,
}

#[derive(Debug, Clone, Copy)]
pub struct HeadlineParts<'a> {
    pub bill_id: &'a BillId,
    pub phrase: &'a str,
    pub nominal: Option<&'a str>,
    pub remainder: &'a str,
    pub link: &'a str,
}

#[derive(Debug, Clone, Copy)]
pub struct HeadlineAssembler {
    max_len: usize,
}

impl HeadlineAssembler {
    pub fn new(max_len: usize) -> Self {
        Self { max_len }
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// `{BILL_ID} {phrase} [{nominal}] {remainder}` cut to the length budget,
    /// followed by the untruncated link.
    pub fn assemble(&self, parts: HeadlineParts<'_>) -> Headline {
        let bill_id = parts.bill_id.as_str();
        let prose = [Some(bill_id), Some(parts.phrase), parts.nominal, Some(parts.remainder)]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|piece| !piece.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        let mut text = truncate_on_word(&prose, self.max_len);
        let link = parts.link.trim();
        if !link.is_empty() {
            text.push(' ');
            text.push_str(link);
        }

        Headline {
            bill_id: parts.bill_id.clone(),
            text,
        }
    }
}

/// Shortens `content` to at most `max_len` characters, ellipsis included,
/// cutting after the last whole word. Content within budget is returned
/// unchanged, so truncating twice gives the same result as truncating once.
pub fn truncate_on_word(content: &str, max_len: usize) -> String {
    if content.chars().count() <= max_len {
        return content.to_string();
    }
    if max_len == 0 {
        return String::new();
    }

    // One character of the budget goes to the ellipsis. One extra character
    // in the window tells whether the text budget ends exactly on a word.
    let budget = max_len - 1;
    let window: String = content.chars().take(budget + 1).collect();
    let kept = match window.rfind(' ') {
        Some(boundary) => window[..boundary].trim_end(),
        None => "",
    };

    let mut truncated = kept.to_string();
    truncated.push(ELLIPSIS);
    truncated
}
