use thiserror::Error;

/// Failure while parsing an arithmetic expression. Positions are byte offsets.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unexpected end of expression")]
    UnexpectedEnd,
    #[error("unexpected '{ch}' at position {pos}")]
    UnexpectedChar { ch: char, pos: usize },
    #[error("parenthesis opened at position {open_pos} is never closed")]
    UnclosedParen { open_pos: usize },
    #[error("malformed number at position {pos}")]
    MalformedNumber { pos: usize },
    #[error("parentheses nested too deeply at position {pos}")]
    TooDeep { pos: usize },
    #[error("unexpected trailing '{ch}' at position {pos}")]
    TrailingInput { ch: char, pos: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown difficulty: {0:?}")]
pub struct UnknownDifficulty(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error(transparent)]
    UnknownDifficulty(#[from] UnknownDifficulty),
    #[error("invalid answer format: {input:?}")]
    InvalidAnswerFormat { input: String },
    #[error("no question is waiting for an answer")]
    NoActiveQuestion,
}
