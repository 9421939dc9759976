//! Character cursor over markup source
//!
//! Holds the source as a sequence of Unicode characters and a forward-only
//! position, so every offset reported by the parser is a character index
//! rather than a byte offset.

use crate::parse_error::{ParseError, ParseResult};
use std::fmt;

/// The single character the grammar treats as whitespace.
pub const SPACE: char = ' ';

/// Forward-only cursor over the characters of one document
pub struct InputStream {
    chars: Vec<char>,
    position: usize,
}

impl InputStream {
    /// Create a new input stream positioned at the first character
    pub fn new(input: &str) -> Self {
        InputStream {
            chars: input.chars().collect(),
            position: 0,
        }
    }

    /// Get the current character without advancing
    pub fn peek_char(&self) -> ParseResult<char> {
        self.chars
            .get(self.position)
            .copied()
            .ok_or(ParseError::UnexpectedEof {
                position: self.position,
            })
    }

    /// Get the current character and advance past it
    pub fn consume_char(&mut self) -> ParseResult<char> {
        let ch = self.peek_char()?;
        self.position += 1;
        Ok(ch)
    }

    /// Consume characters while `predicate` holds, returning them.
    ///
    /// Stops at the first rejected character or at end of input; the result
    /// may be empty.
    pub fn consume_while<F>(&mut self, predicate: F) -> String
    where
        F: Fn(char) -> bool,
    {
        let mut result = String::new();
        while let Some(&ch) = self.chars.get(self.position) {
            if !predicate(ch) {
                break;
            }
            result.push(ch);
            self.position += 1;
        }
        result
    }

    /// Skip a run of spaces. Tabs and newlines are not whitespace here.
    pub fn consume_whitespace(&mut self) {
        self.consume_while(|ch| ch == SPACE);
    }

    /// Consume one character and fail unless it is `expected`
    pub fn expect_char(&mut self, expected: char) -> ParseResult<()> {
        let position = self.position;
        let actual = self.consume_char()?;
        if actual != expected {
            return Err(ParseError::UnexpectedChar {
                expected: format!("'{}'", expected),
                actual,
                position,
            });
        }
        Ok(())
    }

    /// Check whether the unconsumed input begins with `prefix`
    pub fn starts_with(&self, prefix: &str) -> bool {
        let mut rest = self.chars[self.position..].iter();
        prefix.chars().all(|expected| rest.next() == Some(&expected))
    }

    /// Check if at end of input
    pub fn is_eof(&self) -> bool {
        self.position >= self.chars.len()
    }

    /// Current position (character index, not byte offset)
    pub fn position(&self) -> usize {
        self.position
    }

    /// Unconsumed input as a string (for debugging)
    pub fn remaining(&self) -> String {
        self.chars[self.position..].iter().collect()
    }

    /// Total length in characters
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Characters between two positions, clamped to the input
    pub fn substring(&self, start: usize, end: usize) -> String {
        let end = end.min(self.chars.len());
        let start = start.min(end);
        self.chars[start..end].iter().collect()
    }

    /// 1-based line and column for a position (for error messages)
    pub fn line_col(&self, pos: usize) -> (usize, usize) {
        let mut line = 1;
        let mut col = 1;

        for ch in self.chars.iter().take(pos) {
            if *ch == '\n' {
                line += 1;
                col = 1;
            } else {
                col += 1;
            }
        }

        (line, col)
    }
}

impl fmt::Debug for InputStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "InputStream(pos={}, remaining={:?})",
            self.position,
            self.remaining().chars().take(20).collect::<String>()
        )
    }
}
