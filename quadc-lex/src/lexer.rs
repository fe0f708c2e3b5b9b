//! Converts source text into a stream of tokens.
//!
//! Whitespace is skipped; `/* ... */` block comments are scanned to a
//! literal `*/` and returned as a `Comment` token (the parser discards
//! it on `advance()`). Symbols are matched longest-first over the fixed
//! two-character set (`==`, `!=`, `<=`, `>=`, `||`, `&&`, `/*`) before
//! falling back to single characters, mirroring the source lexer's
//! incremental-prefix walk without reconstructing its prefix-list
//! machinery at runtime.

use quadc_util::{FileId, Span, Symbol};

use crate::cursor::Cursor;
use crate::error::LexError;
use crate::token::{NumberLiteral, Token, TokenKind};

pub struct Lexer<'a> {
    cursor: Cursor<'a>,
    file_id: FileId,
}

impl<'a> Lexer<'a> {
    pub fn new(file_id: FileId, source: &'a str) -> Self {
        Lexer { cursor: Cursor::new(source), file_id }
    }

    fn make_span(&self, start_pos: usize, start_line: u32, start_col: u32) -> Span {
        Span::new(
            self.file_id,
            start_pos as u32,
            self.cursor.position() as u32,
            start_line,
            start_col,
        )
    }

    /// Returns the next token, or `None` at end of input. A malformed
    /// character or an unterminated comment is reported as a
    /// `LexError` and ends the stream.
    pub fn next_token(&mut self) -> Option<Result<Token, LexError>> {
        self.skip_whitespace();
        if self.cursor.is_at_end() {
            return None;
        }

        let start_pos = self.cursor.position();
        let start_line = self.cursor.line();
        let start_col = self.cursor.column();
        let c = self.cursor.current_char();

        let result = if c == '_' || c.is_alphabetic() {
            Ok(self.lex_identifier_or_keyword(start_pos))
        } else if c.is_ascii_digit() {
            Ok(self.lex_number(start_pos))
        } else {
            self.lex_symbol_or_comment(c, start_pos, start_line, start_col)
        };

        let span = self.make_span(start_pos, start_line, start_col);
        Some(result.map(|kind| Token::new(kind, span)))
    }

    pub fn tokens(mut self) -> Result<Vec<Token>, LexError> {
        let mut out = Vec::new();
        while let Some(tok) = self.next_token() {
            out.push(tok?);
        }
        Ok(out)
    }

    fn skip_whitespace(&mut self) {
        while !self.cursor.is_at_end() && self.cursor.current_char().is_whitespace() {
            self.cursor.advance();
        }
    }

    fn lex_identifier_or_keyword(&mut self, start_pos: usize) -> TokenKind {
        while !self.cursor.is_at_end()
            && (self.cursor.current_char() == '_' || self.cursor.current_char().is_alphanumeric())
        {
            self.cursor.advance();
        }
        let text = self.cursor.slice_from(start_pos);
        TokenKind::keyword(text).unwrap_or_else(|| TokenKind::Identifier(Symbol::intern(text)))
    }

    fn lex_number(&mut self, start_pos: usize) -> TokenKind {
        while !self.cursor.is_at_end() && self.cursor.current_char().is_ascii_digit() {
            self.cursor.advance();
        }
        let mut is_float = false;
        if self.cursor.current_char() == '.' {
            is_float = true;
            self.cursor.advance();
            while !self.cursor.is_at_end() && self.cursor.current_char().is_ascii_digit() {
                self.cursor.advance();
            }
        }
        let text = self.cursor.slice_from(start_pos);
        let literal = if is_float {
            NumberLiteral::Float(text.parse().expect("digits and at most one '.'"))
        } else {
            NumberLiteral::Int(text.parse().expect("ascii digits"))
        };
        TokenKind::Number(literal)
    }

    fn lex_symbol_or_comment(
        &mut self,
        c: char,
        start_pos: usize,
        start_line: u32,
        start_col: u32,
    ) -> Result<TokenKind, LexError> {
        let next = self.cursor.peek_char(1);
        if let Some(kind) = two_char_symbol(c, next) {
            self.cursor.advance();
            self.cursor.advance();
            if matches!(kind, TokenKind::Comment(_)) {
                return self.lex_block_comment(start_pos, start_line, start_col);
            }
            return Ok(kind);
        }
        if let Some(kind) = one_char_symbol(c) {
            self.cursor.advance();
            return Ok(kind);
        }
        let span = self.make_span(start_pos, start_line, start_col);
        self.cursor.advance();
        Err(LexError::UnexpectedChar { span, ch: c })
    }

    /// Cursor is positioned just past the opening `/*`. Scans to the
    /// first `*/`, returning the interior text as the comment payload.
    fn lex_block_comment(
        &mut self,
        start_pos: usize,
        start_line: u32,
        start_col: u32,
    ) -> Result<TokenKind, LexError> {
        let text_start = self.cursor.position();
        loop {
            if self.cursor.is_at_end() {
                let span = self.make_span(start_pos, start_line, start_col);
                return Err(LexError::UnterminatedComment { span });
            }
            if self.cursor.current_char() == '*' && self.cursor.peek_char(1) == '/' {
                let text = self.cursor.slice_from(text_start).to_string();
                self.cursor.advance();
                self.cursor.advance();
                return Ok(TokenKind::Comment(Symbol::intern(&text)));
            }
            self.cursor.advance();
        }
    }
}

fn two_char_symbol(a: char, b: char) -> Option<TokenKind> {
    use TokenKind::*;
    Some(match (a, b) {
        ('=', '=') => Equal,
        ('!', '=') => NotEqual,
        ('<', '=') => LessOrEqual,
        ('>', '=') => GreaterOrEqual,
        ('|', '|') => Or,
        ('&', '&') => And,
        ('/', '*') => Comment(Symbol::intern("")),
        _ => return None,
    })
}

fn one_char_symbol(c: char) -> Option<TokenKind> {
    use TokenKind::*;
    Some(match c {
        '(' => LParen,
        ')' => RParen,
        '{' => LBrace,
        '}' => RBrace,
        ',' => Comma,
        ';' => Semicolon,
        ':' => Colon,
        '=' => Assign,
        '<' => Less,
        '>' => Greater,
        '+' => Plus,
        '-' => Minus,
        '*' => Star,
        '/' => Slash,
        '!' => Not,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(src: &str) -> Vec<TokenKind> {
        let lexer = Lexer::new(FileId::synthetic(), src);
        lexer.tokens().unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn lexes_keywords_and_identifiers() {
        assert_eq!(
            lex("int x"),
            vec![TokenKind::Int, TokenKind::Identifier(Symbol::intern("x"))]
        );
    }

    #[test]
    fn lexes_int_and_float_numbers() {
        assert_eq!(
            lex("3 2.5"),
            vec![
                TokenKind::Number(NumberLiteral::Int(3)),
                TokenKind::Number(NumberLiteral::Float(2.5)),
            ]
        );
    }

    #[test]
    fn longest_match_prefers_two_char_operators() {
        assert_eq!(lex("<= < =="), vec![TokenKind::LessOrEqual, TokenKind::Less, TokenKind::Equal]);
    }

    #[test]
    fn block_comment_is_skippable_by_the_parser() {
        let tokens = lex("/* hi */ int");
        assert!(matches!(tokens[0], TokenKind::Comment(_)));
        assert_eq!(tokens[1], TokenKind::Int);
    }

    #[test]
    fn unterminated_comment_is_an_error() {
        let lexer = Lexer::new(FileId::synthetic(), "/* never closes");
        assert!(matches!(lexer.tokens(), Err(LexError::UnterminatedComment { .. })));
    }

    #[test]
    fn lone_pipe_is_unexpected_char() {
        let lexer = Lexer::new(FileId::synthetic(), "|");
        assert!(matches!(lexer.tokens(), Err(LexError::UnexpectedChar { ch: '|', .. })));
    }
}
