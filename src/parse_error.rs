//! Parse failures
//!
//! Every failure aborts the whole parse; there is no partial tree and no
//! recovery path. Positions are character offsets into the source.

use crate::input_stream::InputStream;
use thiserror::Error;

/// Result alias used by the cursor and every grammar rule
pub type ParseResult<T> = Result<T, ParseError>;

/// Error type for parsing failures.
///
/// `Display` gives the bare message; [`ParseError::position`] and
/// [`ParseError::format_with_context`] locate it in the source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A character was required but the input was exhausted
    #[error("unexpected end of input")]
    UnexpectedEof { position: usize },

    /// The next character did not match the grammar
    #[error("expected {expected} but found {actual:?}")]
    UnexpectedChar {
        expected: String,
        actual: char,
        position: usize,
    },

    /// A closing tag named a different element than the one it closes
    #[error("closing tag </{found}> does not match <{expected}>")]
    MismatchedClosingTag {
        expected: String,
        found: String,
        position: usize,
    },
}

impl ParseError {
    /// Get the position where the error occurred
    pub fn position(&self) -> usize {
        match self {
            ParseError::UnexpectedEof { position } => *position,
            ParseError::UnexpectedChar { position, .. } => *position,
            ParseError::MismatchedClosingTag { position, .. } => *position,
        }
    }

    /// Format error with line, column and surrounding input
    pub fn format_with_context(&self, input: &str) -> String {
        let stream = InputStream::new(input);
        let position = self.position();
        let (line, col) = stream.line_col(position);
        let context = stream.substring(position.saturating_sub(20), position + 20);

        format!(
            "Parse error at line {}, column {}: {}\nContext: ...{}...",
            line, col, self, context
        )
    }
}
