/// Failure to turn rule text into a bound AST.
///
/// Offsets are 0-based character positions into the rule text, suitable for
/// placing an editor cursor at the fault.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleError {
    #[error("syntax error at {offset}: {message}")]
    Syntax { offset: usize, message: String },
    #[error("unknown column `{name}` at {offset}")]
    UnknownColumn { offset: usize, name: String },
    #[error("ambiguous column `{name}` at {offset}: it names column {named} and is also position {position}")]
    AmbiguousColumn {
        offset: usize,
        name: String,
        named: usize,
        position: usize,
    },
    #[error("type mismatch at {offset}: {message}")]
    TypeMismatch { offset: usize, message: String },
    #[error("no columns to bind against")]
    SchemaUnavailable,
}

impl RuleError {
    pub fn offset(&self) -> Option<usize> {
        match self {
            RuleError::Syntax { offset, .. }
            | RuleError::UnknownColumn { offset, .. }
            | RuleError::AmbiguousColumn { offset, .. }
            | RuleError::TypeMismatch { offset, .. } => Some(*offset),
            RuleError::SchemaUnavailable => None,
        }
    }
}

/// Convert a byte offset into `text` to a character offset.
pub(crate) fn char_offset(text: &str, byte_offset: usize) -> usize {
    let mut end = byte_offset.min(text.len());
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    text[..end].chars().count()
}
