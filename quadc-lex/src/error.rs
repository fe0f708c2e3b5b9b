use quadc_util::Span;
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum LexError {
    #[error("did not expect '{ch}'")]
    UnexpectedChar { span: Span, ch: char },
    #[error("expected comment to end before end of file")]
    UnterminatedComment { span: Span },
}

impl LexError {
    pub fn span(&self) -> Span {
        match self {
            LexError::UnexpectedChar { span, .. } => *span,
            LexError::UnterminatedComment { span } => *span,
        }
    }
}
