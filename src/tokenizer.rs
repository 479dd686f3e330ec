use crate::masking;
use crate::pattern::{Token, TokenSequence};

pub const DEFAULT_DELIMITERS: &str = " \t";

/// Splits raw lines into tokens on any character of a delimiter set.
///
/// Runs of delimiters never produce empty tokens, and a trailing line
/// terminator is ignored. With masking enabled, tokens that look like
/// variables are replaced by typed placeholders (see [`masking::mask_token`]).
#[derive(Debug, Clone)]
pub struct Tokenizer {
    delimiters: Vec<char>,
    mask_variables: bool,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(DEFAULT_DELIMITERS)
    }
}

impl Tokenizer {
    pub fn new(delimiters: &str) -> Self {
        Self {
            delimiters: delimiters.chars().collect(),
            mask_variables: false,
        }
    }

    pub fn with_masking(mut self, mask_variables: bool) -> Self {
        self.mask_variables = mask_variables;
        self
    }

    pub fn delimiters(&self) -> &[char] {
        &self.delimiters
    }

    pub fn tokenize(&self, line: &str) -> TokenSequence {
        line.trim_end_matches(['\n', '\r'])
            .split(|c: char| self.delimiters.contains(&c))
            .filter(|t| !t.is_empty())
            .map(|t| {
                if self.mask_variables {
                    Token::from(masking::mask_token(t).as_ref())
                } else {
                    Token::from(t)
                }
            })
            .collect()
    }
}
