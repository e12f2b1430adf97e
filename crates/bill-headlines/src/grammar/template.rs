use std::fmt;

/// Post-processing applied to the text a reference expands to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    /// Upper-cases the first character only.
    Capitalize,
    /// Upper-cases the first character of every space-separated word.
    CapitalizeAll,
    /// Prefixes the indefinite article.
    Article,
}

impl Modifier {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "capitalize" => Some(Self::Capitalize),
            "capitalizeAll" => Some(Self::CapitalizeAll),
            "a" => Some(Self::Article),
            _ => None,
        }
    }

    pub fn apply(self, text: &str) -> String {
        match self {
            Self::Capitalize => capitalize(text),
            Self::CapitalizeAll => text.split(' ').map(capitalize).collect::<Vec<_>>().join(" "),
            Self::Article => {
                let starts_with_vowel = text
                    .chars()
                    .next()
                    .map(|c| matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u'))
                    .unwrap_or(false);
                if starts_with_vowel {
                    format!("an {text}")
                } else {
                    format!("a {text}")
                }
            }
        }
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Reference {
        symbol: String,
        modifiers: Vec<Modifier>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    Unterminated,
    EmptyReference,
    UnknownModifier(String),
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateError::Unterminated => write!(f, "reference is missing its closing '#'"),
            TemplateError::EmptyReference => write!(f, "reference names no symbol"),
            TemplateError::UnknownModifier(name) => write!(f, "unknown modifier '{name}'"),
        }
    }
}

impl std::error::Error for TemplateError {}

/// Literal text interleaved with `#symbol.modifier#` references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = source.chars();

        while let Some(c) = chars.next() {
            match c {
                '\\' => match chars.next() {
                    Some(escaped) => literal.push(escaped),
                    // A lone trailing backslash is kept as written.
                    None => literal.push('\\'),
                },
                '#' => {
                    let mut reference = String::new();
                    let mut closed = false;
                    for inner in chars.by_ref() {
                        if inner == '#' {
                            closed = true;
                            break;
                        }
                        reference.push(inner);
                    }
                    if !closed {
                        return Err(TemplateError::Unterminated);
                    }
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(parse_reference(&reference)?);
                }
                other => literal.push(other),
            }
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn references(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Reference { symbol, .. } => Some(symbol.as_str()),
            Segment::Literal(_) => None,
        })
    }
}

fn parse_reference(body: &str) -> Result<Segment, TemplateError> {
    let mut parts = body.split('.');
    let symbol = parts.next().unwrap_or_default().trim();
    if symbol.is_empty() {
        return Err(TemplateError::EmptyReference);
    }

    let modifiers = parts
        .map(|name| {
            Modifier::from_name(name)
                .ok_or_else(|| TemplateError::UnknownModifier(name.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Segment::Reference {
        symbol: symbol.to_string(),
        modifiers,
    })
}
