use itertools::Itertools;
use std::fmt;
use std::sync::Arc;

/// Marker used when a pattern is rendered without an explicit wildcard.
pub const DEFAULT_WILDCARD: &str = "<*>";

/// A single token of a log line. Cloning is cheap; the text is shared.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Token(Arc<str>);

impl Token {
    pub fn new(text: impl Into<Arc<str>>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Token {
    fn from(s: &str) -> Self {
        Self(Arc::from(s))
    }
}

impl From<String> for Token {
    fn from(s: String) -> Self {
        Self(Arc::from(s))
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Tokens of one log line, in order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TokenSequence {
    tokens: Vec<Token>,
}

impl TokenSequence {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter()
    }

    pub fn as_slice(&self) -> &[Token] {
        &self.tokens
    }

    /// Tokens re-joined by single spaces.
    pub fn to_line(&self) -> String {
        self.tokens.iter().map(Token::as_str).join(" ")
    }
}

impl FromIterator<Token> for TokenSequence {
    fn from_iter<I: IntoIterator<Item = Token>>(iter: I) -> Self {
        Self { tokens: iter.into_iter().collect() }
    }
}

impl<'a> FromIterator<&'a str> for TokenSequence {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self { tokens: iter.into_iter().map(Token::from).collect() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Slot {
    Fixed(Token),
    Wildcard,
}

impl Slot {
    pub fn is_wildcard(&self) -> bool {
        matches!(self, Slot::Wildcard)
    }

    /// Whether `token` is compatible with this slot. Wildcards accept anything.
    pub fn accepts(&self, token: &Token) -> bool {
        match self {
            Slot::Fixed(t) => t == token,
            Slot::Wildcard => true,
        }
    }
}

/// Representative template of a cluster.
///
/// The length is fixed at creation. Merging only ever turns fixed slots into
/// wildcards, never the other way around.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Pattern {
    slots: Vec<Slot>,
}

impl Pattern {
    pub fn new(slots: Vec<Slot>) -> Self {
        Self { slots }
    }

    /// All-fixed pattern matching exactly `seq`.
    pub fn from_sequence(seq: &TokenSequence) -> Self {
        Self {
            slots: seq.iter().cloned().map(Slot::Fixed).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn iter(&self) -> impl Iterator<Item = &Slot> {
        self.slots.iter()
    }

    pub fn wildcard_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_wildcard()).count()
    }

    /// In-place form of [`merge`].
    ///
    /// # Panics
    ///
    /// Panics if `seq` and the pattern differ in length.
    pub fn absorb(&mut self, seq: &TokenSequence) {
        assert_eq!(
            self.slots.len(),
            seq.len(),
            "cannot merge a sequence into a pattern of a different length"
        );
        for (slot, token) in self.slots.iter_mut().zip(seq.iter()) {
            if !slot.accepts(token) {
                *slot = Slot::Wildcard;
            }
        }
    }

    /// Slotwise merge of two patterns: a slot stays fixed only when both
    /// sides hold the same fixed token.
    ///
    /// # Panics
    ///
    /// Panics if the patterns differ in length.
    pub fn merge_pattern(&self, other: &Pattern) -> Pattern {
        assert_eq!(
            self.slots.len(),
            other.slots.len(),
            "cannot merge patterns of different lengths"
        );
        let slots = self
            .slots
            .iter()
            .zip(other.slots.iter())
            .map(|(a, b)| match (a, b) {
                (Slot::Fixed(x), Slot::Fixed(y)) if x == y => Slot::Fixed(x.clone()),
                _ => Slot::Wildcard,
            })
            .collect();
        Pattern { slots }
    }

    /// Space separated template with `wildcard` standing in for wildcard slots.
    pub fn render(&self, wildcard: &str) -> String {
        self.slots
            .iter()
            .map(|slot| match slot {
                Slot::Fixed(t) => t.as_str(),
                Slot::Wildcard => wildcard,
            })
            .join(" ")
    }
}

impl From<TokenSequence> for Pattern {
    fn from(seq: TokenSequence) -> Self {
        Self {
            slots: seq.tokens.into_iter().map(Slot::Fixed).collect(),
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(DEFAULT_WILDCARD))
    }
}

/// Merge `seq` into `pattern`: positions that disagree become wildcards.
///
/// # Panics
///
/// Panics if `seq` and `pattern` differ in length. The cluster index buckets
/// by length, so the engine never does this.
pub fn merge(pattern: &Pattern, seq: &TokenSequence) -> Pattern {
    let mut merged = pattern.clone();
    merged.absorb(seq);
    merged
}
