use quadc_util::Span;
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum SemanticError {
    #[error("undeclared identifier '{name}'")]
    UndeclaredIdentifier { span: Span, name: String },
    #[error("'break' outside a while or switch")]
    BreakOutsideScope { span: Span },
    #[error("switch case label is not a constant expression")]
    NonConstantSwitchLabel { span: Span },
    #[error("cannot assign 'float' to 'int' (narrowing)")]
    NarrowingAssignment { span: Span },
}

impl SemanticError {
    pub fn span(&self) -> Span {
        match self {
            SemanticError::UndeclaredIdentifier { span, .. } => *span,
            SemanticError::BreakOutsideScope { span } => *span,
            SemanticError::NonConstantSwitchLabel { span } => *span,
            SemanticError::NarrowingAssignment { span } => *span,
        }
    }
}
