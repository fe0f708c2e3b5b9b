use quadc_util::Span;
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum SyntaxError {
    #[error("expected {expected}")]
    Expected { span: Span, expected: String },
    #[error("expected an expression")]
    ExpectedExpr { span: Span },
    #[error("'{name}' is already declared")]
    DuplicateDeclaration { span: Span, name: String },
    #[error("only one 'default' case is permitted")]
    DuplicateDefault { span: Span },
}

impl SyntaxError {
    pub fn span(&self) -> Span {
        match self {
            SyntaxError::Expected { span, .. } => *span,
            SyntaxError::ExpectedExpr { span } => *span,
            SyntaxError::DuplicateDeclaration { span, .. } => *span,
            SyntaxError::DuplicateDefault { span } => *span,
        }
    }
}

/// The parser's unified error type: a lex failure surfacing mid-stream,
/// a grammar violation, or a semantic check failing inline (spec.md
/// §4.2's checks are performed *during* parsing, not as a later pass).
#[derive(Error, Debug, Clone)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] quadc_lex::LexError),
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error(transparent)]
    Semantic(#[from] quadc_sem::SemanticError),
}

impl ParseError {
    pub fn span(&self) -> Span {
        match self {
            ParseError::Lex(e) => e.span(),
            ParseError::Syntax(e) => e.span(),
            ParseError::Semantic(e) => e.span(),
        }
    }
}
