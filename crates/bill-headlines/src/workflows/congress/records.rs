use serde::{Deserialize, Serialize};
use std::fmt;

/// One bill as returned by the listing endpoint. Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillRecord {
    pub bill_type: String,
    pub number: u32,
    pub official_title: String,
    pub urls: BillUrls,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillUrls {
    pub congress: String,
}

/// Display identifier such as `HR.42`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct BillId(String);

impl BillId {
    pub fn new(bill_type: &str, number: u32) -> Self {
        Self(format!("{}.{}", bill_type.trim().to_uppercase(), number))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BillId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl BillRecord {
    pub fn id(&self) -> BillId {
        BillId::new(&self.bill_type, self.number)
    }

    pub fn source_url(&self) -> &str {
        &self.urls.congress
    }

    /// The title as submitted to the parser: whitespace runs collapsed to single
    /// spaces, one trailing period dropped. Doubles as the corpus key, so it never
    /// contains a line break.
    pub fn sentence_text(&self) -> String {
        let joined = self.official_title.split_whitespace().collect::<Vec<_>>().join(" ");
        match joined.strip_suffix('.') {
            Some(stripped) => stripped.trim_end().to_string(),
            None => joined,
        }
    }
}
