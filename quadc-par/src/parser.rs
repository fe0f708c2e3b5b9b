//! Recursive-descent parser: single-token lookahead, grammar and
//! expression precedence of spec.md §4.2. Declaration-table lookups,
//! implicit-cast insertion, and the switch-label constant evaluator are
//! all invoked inline while the statement tree is built, so the result
//! is fully-typed IR the moment `parse` returns.

use std::mem::discriminant;

use quadc_lex::{Lexer, NumberLiteral as LexNumber, Token, TokenKind};
use quadc_sem::{plan_cast, CastPlan, DeclTable, SemanticError, Type};
use quadc_util::{FileId, Span, Symbol};

use crate::ast::{BinaryOp, Case, Literal, Program, Stmt, UnaryOp, Value};
use crate::consteval::eval_const;
use crate::error::{ParseError, SyntaxError};

/// One precedence level's binary operators, used by `parse_binary_level`.
struct BinaryLevel {
    ops: &'static [(TokenKind, BinaryOp)],
    right_assoc: bool,
}

/// Mirrors spec.md §4.2's precedence table: level 0 is `=`, level 6 is
/// `*`/`/`; unary prefix operators and the factor grammar live outside
/// this table (levels 7 and 8 respectively) since they aren't plain
/// left/right-associative binary levels.
const LEVELS: &[BinaryLevel] = &[
    BinaryLevel { ops: &[(TokenKind::Assign, BinaryOp::Assign)], right_assoc: true },
    BinaryLevel { ops: &[(TokenKind::Or, BinaryOp::Or)], right_assoc: false },
    BinaryLevel { ops: &[(TokenKind::And, BinaryOp::And)], right_assoc: false },
    BinaryLevel {
        ops: &[(TokenKind::Equal, BinaryOp::Equal), (TokenKind::NotEqual, BinaryOp::NotEqual)],
        right_assoc: false,
    },
    BinaryLevel {
        ops: &[
            (TokenKind::Less, BinaryOp::Less),
            (TokenKind::Greater, BinaryOp::Greater),
            (TokenKind::LessOrEqual, BinaryOp::LessOrEqual),
            (TokenKind::GreaterOrEqual, BinaryOp::GreaterOrEqual),
        ],
        right_assoc: false,
    },
    BinaryLevel { ops: &[(TokenKind::Plus, BinaryOp::Add), (TokenKind::Minus, BinaryOp::Sub)], right_assoc: false },
    BinaryLevel { ops: &[(TokenKind::Star, BinaryOp::Mul), (TokenKind::Slash, BinaryOp::Div)], right_assoc: false },
];

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    decls: DeclTable,
    break_depth: u32,
}

impl Parser {
    /// Lexes `source` in full (a lex error aborts immediately, matching
    /// the "first error in a file aborts processing" policy of spec.md
    /// §7) and discards `Comment` tokens before any grammar rule sees
    /// the stream.
    pub fn new(file_id: FileId, source: &str) -> Result<Self, ParseError> {
        let tokens = Lexer::new(file_id, source).tokens()?;
        let tokens = tokens.into_iter().filter(|t| !matches!(t.kind, TokenKind::Comment(_))).collect();
        Ok(Parser { tokens, pos: 0, decls: DeclTable::new(), break_depth: 0 })
    }

    pub fn parse(mut self) -> Result<Program, ParseError> {
        self.parse_declarations()?;
        let body = self.parse_stmt_list()?;
        self.expect_end()?;
        Ok(Program { decls: self.decls, body })
    }

    // --- token stream helpers -------------------------------------------------

    fn current(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn current_span(&self) -> Span {
        self.tokens.get(self.pos).or_else(|| self.tokens.last()).map(|t| t.span).unwrap_or_else(Span::dummy)
    }

    /// Span of the token most recently consumed by `accept`/`expect`.
    fn previous_span(&self) -> Span {
        self.pos.checked_sub(1).and_then(|i| self.tokens.get(i)).map(|t| t.span).unwrap_or_else(Span::dummy)
    }

    fn accept(&mut self, kind: &TokenKind) -> bool {
        if self.current().map(|t| discriminant(&t.kind) == discriminant(kind)).unwrap_or(false) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind, what: &str) -> Result<(), ParseError> {
        if self.accept(&kind) {
            Ok(())
        } else {
            Err(SyntaxError::Expected { span: self.current_span(), expected: what.to_string() }.into())
        }
    }

    fn accept_identifier(&mut self) -> Option<(Symbol, Span)> {
        match self.current().map(|t| t.kind.clone()) {
            Some(TokenKind::Identifier(sym)) => {
                let span = self.tokens[self.pos].span;
                self.pos += 1;
                Some((sym, span))
            }
            _ => None,
        }
    }

    fn expect_identifier(&mut self) -> Result<(Symbol, Span), ParseError> {
        self.accept_identifier()
            .ok_or_else(|| SyntaxError::Expected { span: self.current_span(), expected: "an identifier".to_string() }.into())
    }

    fn expect_end(&self) -> Result<(), ParseError> {
        if self.pos == self.tokens.len() {
            Ok(())
        } else {
            Err(SyntaxError::Expected { span: self.current_span(), expected: "end of input".to_string() }.into())
        }
    }

    // --- declarations ----------------------------------------------------------

    fn parse_declarations(&mut self) -> Result<(), ParseError> {
        loop {
            let idents = self.parse_id_list()?;
            if idents.is_empty() {
                return Ok(());
            }
            self.expect(TokenKind::Colon, "':'")?;
            let ty = self.parse_type()?;
            self.expect(TokenKind::Semicolon, "';'")?;
            for (name, span) in idents {
                if self.decls.declare(name, ty).is_none() {
                    return Err(SyntaxError::DuplicateDeclaration { span, name: name.as_str() }.into());
                }
            }
        }
    }

    fn parse_id_list(&mut self) -> Result<Vec<(Symbol, Span)>, ParseError> {
        let mut idents = Vec::new();
        let Some(first) = self.accept_identifier() else {
            return Ok(idents);
        };
        idents.push(first);
        while self.accept(&TokenKind::Comma) {
            idents.push(self.expect_identifier()?);
        }
        Ok(idents)
    }

    fn parse_type(&mut self) -> Result<Type, ParseError> {
        if self.accept(&TokenKind::Int) {
            Ok(Type::Int)
        } else if self.accept(&TokenKind::Float) {
            Ok(Type::Float)
        } else {
            Err(SyntaxError::Expected { span: self.current_span(), expected: "a type".to_string() }.into())
        }
    }

    // --- statements --------------------------------------------------------------

    fn parse_stmt_block(&mut self) -> Result<Vec<Stmt>, ParseError> {
        self.expect(TokenKind::LBrace, "'{'")?;
        let stmts = self.parse_stmt_list()?;
        self.expect(TokenKind::RBrace, "'}'")?;
        Ok(stmts)
    }

    fn parse_stmt_list(&mut self) -> Result<Vec<Stmt>, ParseError> {
        let mut stmts = Vec::new();
        while let Some(stmt) = self.parse_stmt()? {
            stmts.push(stmt);
        }
        Ok(stmts)
    }

    fn parse_stmt(&mut self) -> Result<Option<Stmt>, ParseError> {
        if self.accept(&TokenKind::If) {
            self.expect(TokenKind::LParen, "'('")?;
            let cond = self.parse_expr(0)?;
            self.expect(TokenKind::RParen, "')'")?;
            let then_branch = self.require_stmt()?;
            let else_branch = if self.accept(&TokenKind::Else) { Some(Box::new(self.require_stmt()?)) } else { None };
            return Ok(Some(Stmt::If(cond, Box::new(then_branch), else_branch)));
        }

        if self.accept(&TokenKind::Input) {
            self.expect(TokenKind::LParen, "'('")?;
            let (name, span) = self.expect_identifier()?;
            let var = self.lookup(name, span)?;
            self.expect(TokenKind::RParen, "')'")?;
            self.expect(TokenKind::Semicolon, "';'")?;
            return Ok(Some(Stmt::Input(var)));
        }

        if self.accept(&TokenKind::Output) {
            self.expect(TokenKind::LParen, "'('")?;
            let expr = self.parse_expr(0)?;
            self.expect(TokenKind::RParen, "')'")?;
            self.expect(TokenKind::Semicolon, "';'")?;
            return Ok(Some(Stmt::Output(expr)));
        }

        if self.accept(&TokenKind::While) {
            self.expect(TokenKind::LParen, "'('")?;
            let cond = self.parse_expr(0)?;
            self.expect(TokenKind::RParen, "')'")?;
            self.break_depth += 1;
            let body = self.require_stmt();
            self.break_depth -= 1;
            return Ok(Some(Stmt::While(cond, Box::new(body?))));
        }

        if self.accept(&TokenKind::Switch) {
            return self.parse_switch().map(Some);
        }

        if self.accept(&TokenKind::Break) {
            let span = self.previous_span();
            if self.break_depth == 0 {
                return Err(SemanticError::BreakOutsideScope { span }.into());
            }
            self.expect(TokenKind::Semicolon, "';'")?;
            return Ok(Some(Stmt::Break));
        }

        if self.current().map(|t| t.kind == TokenKind::LBrace).unwrap_or(false) {
            return Ok(Some(Stmt::Block(self.parse_stmt_block()?)));
        }

        match self.try_parse_expr(0)? {
            Some(expr) => {
                self.expect(TokenKind::Semicolon, "';'")?;
                Ok(Some(Stmt::Expr(expr)))
            }
            None => Ok(None),
        }
    }

    fn require_stmt(&mut self) -> Result<Stmt, ParseError> {
        self.parse_stmt()?.ok_or_else(|| SyntaxError::Expected { span: self.current_span(), expected: "a statement".to_string() }.into())
    }

    fn parse_switch(&mut self) -> Result<Stmt, ParseError> {
        self.expect(TokenKind::LParen, "'('")?;
        let value = self.parse_expr(0)?;
        self.expect(TokenKind::RParen, "')'")?;
        self.expect(TokenKind::LBrace, "'{'")?;

        let mut cases = Vec::new();
        let mut has_default = false;
        loop {
            if self.accept(&TokenKind::Case) {
                let case_expr = self.parse_expr(0)?;
                let span = case_expr.span();
                let label = eval_const(&case_expr).ok_or(SemanticError::NonConstantSwitchLabel { span })?;
                self.expect(TokenKind::Colon, "':'")?;
                self.break_depth += 1;
                let stmts = self.parse_stmt_list();
                self.break_depth -= 1;
                cases.push(Case { label: Some(label), stmts: stmts? });
            } else if self.accept(&TokenKind::Default) {
                let span = self.previous_span();
                if has_default {
                    return Err(SyntaxError::DuplicateDefault { span }.into());
                }
                has_default = true;
                self.expect(TokenKind::Colon, "':'")?;
                self.break_depth += 1;
                let stmts = self.parse_stmt_list();
                self.break_depth -= 1;
                cases.push(Case { label: None, stmts: stmts? });
            } else {
                break;
            }
        }

        self.expect(TokenKind::RBrace, "'}'")?;
        Ok(Stmt::Switch(value, cases))
    }

    fn lookup(&self, name: Symbol, span: Span) -> Result<quadc_sem::VarId, ParseError> {
        self.decls.lookup(name).ok_or_else(|| SemanticError::UndeclaredIdentifier { span, name: name.as_str() }.into())
    }

    // --- expressions -------------------------------------------------------------

    fn parse_expr(&mut self, level: usize) -> Result<Value, ParseError> {
        let span = self.current_span();
        self.try_parse_expr(level)?.ok_or_else(|| SyntaxError::ExpectedExpr { span }.into())
    }

    fn try_parse_expr(&mut self, level: usize) -> Result<Option<Value>, ParseError> {
        if level == LEVELS.len() {
            return self.try_parse_unary();
        }

        let Some(mut term) = self.try_parse_expr(level + 1)? else {
            return Ok(None);
        };

        let info = &LEVELS[level];
        loop {
            let Some((_, op)) = info.ops.iter().find(|(kind, _)| self.accept(kind)) else {
                break;
            };
            let op = *op;
            let next_level = if info.right_assoc { level } else { level + 1 };
            let rhs = self.parse_expr(next_level)?;
            term = self.make_binary(op, term, rhs)?;
            if info.right_assoc {
                break;
            }
        }

        Ok(Some(term))
    }

    fn make_binary(&self, op: BinaryOp, lhs: Value, rhs: Value) -> Result<Value, ParseError> {
        let span = lhs.span().to(rhs.span());
        let is_assign = op == BinaryOp::Assign;
        let (cast_ty, plan) = plan_cast(lhs.ty(), rhs.ty(), is_assign)
            .map_err(|_| SemanticError::NarrowingAssignment { span })?;
        // Logical and comparison results are always `int`, independent
        // of the operand type the cast plan widens operands to.
        let result_ty = match op {
            BinaryOp::Or
            | BinaryOp::And
            | BinaryOp::Equal
            | BinaryOp::NotEqual
            | BinaryOp::Less
            | BinaryOp::Greater
            | BinaryOp::LessOrEqual
            | BinaryOp::GreaterOrEqual => Type::Int,
            _ => cast_ty,
        };
        let (lhs, rhs) = match plan {
            CastPlan::NoCast => (lhs, rhs),
            CastPlan::CastLhs => {
                let lhs_span = lhs.span();
                (Value::StaticCast(Box::new(lhs), Type::Float, lhs_span), rhs)
            }
            CastPlan::CastRhs => {
                let rhs_span = rhs.span();
                (lhs, Value::StaticCast(Box::new(rhs), Type::Float, rhs_span))
            }
        };
        Ok(Value::Binary(op, Box::new(lhs), Box::new(rhs), result_ty, span))
    }

    fn try_parse_unary(&mut self) -> Result<Option<Value>, ParseError> {
        let span = self.current_span();
        let op = if self.accept(&TokenKind::Plus) {
            Some(UnaryOp::UnaryAdd)
        } else if self.accept(&TokenKind::Minus) {
            Some(UnaryOp::Negate)
        } else if self.accept(&TokenKind::Not) {
            Some(UnaryOp::Not)
        } else {
            None
        };

        if let Some(op) = op {
            let operand = self.parse_expr(LEVELS.len())?;
            let ty = match op {
                UnaryOp::Not => Type::Int,
                UnaryOp::UnaryAdd | UnaryOp::Negate => operand.ty(),
            };
            let full_span = span.to(operand.span());
            return Ok(Some(Value::Unary(op, Box::new(operand), ty, full_span)));
        }

        self.try_parse_factor()
    }

    fn try_parse_factor(&mut self) -> Result<Option<Value>, ParseError> {
        let span = self.current_span();

        if self.accept(&TokenKind::LParen) {
            let expr = self.parse_expr(0)?;
            self.expect(TokenKind::RParen, "')'")?;
            return Ok(Some(expr));
        }

        if self.accept(&TokenKind::StaticCast) {
            self.expect(TokenKind::Less, "'<'")?;
            let dest_ty = self.parse_type()?;
            self.expect(TokenKind::Greater, "'>'")?;
            self.expect(TokenKind::LParen, "'('")?;
            let inner = self.parse_expr(0)?;
            self.expect(TokenKind::RParen, "')'")?;
            return Ok(Some(Value::StaticCast(Box::new(inner), dest_ty, span)));
        }

        if let Some((name, ident_span)) = self.accept_identifier() {
            let var = self.lookup(name, ident_span)?;
            let ty = self.decls.get(var).ty;
            return Ok(Some(Value::Use(var, ty, ident_span)));
        }

        if let Some(token) = self.current() {
            if let TokenKind::Number(n) = &token.kind {
                let n = *n;
                let number_span = token.span;
                self.pos += 1;
                let (lit, ty) = match n {
                    LexNumber::Int(i) => (Literal::Int(i), Type::Int),
                    LexNumber::Float(f) => (Literal::Float(f), Type::Float),
                };
                return Ok(Some(Value::Immediate(lit, ty, number_span)));
            }
        }

        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use quadc_sem::Type;
    use quadc_util::FileId;

    use crate::ast::{Stmt, Value};

    fn output_expr(src: &str) -> Value {
        let program = crate::parse(FileId::synthetic(), src).expect("valid program");
        match program.body.into_iter().next() {
            Some(Stmt::Output(value)) => value,
            other => panic!("expected a single output statement, got {other:?}"),
        }
    }

    #[test]
    fn or_over_float_operands_reports_int_as_its_result_type() {
        let value = output_expr("a,b:float; { output(a || b); }");
        assert_eq!(value.ty(), Type::Int);
    }

    #[test]
    fn and_over_float_operands_reports_int_as_its_result_type() {
        let value = output_expr("a,b:float; { output(a && b); }");
        assert_eq!(value.ty(), Type::Int);
    }

    #[test]
    fn every_comparison_reports_int_regardless_of_operand_type() {
        for op in ["==", "!=", "<", ">", "<=", ">="] {
            let src = format!("a,b:float; {{ output(a {op} b); }}");
            assert_eq!(output_expr(&src).ty(), Type::Int, "operator {op}");
        }
    }

    #[test]
    fn a_comparison_used_as_an_operand_is_assignable_to_an_int_variable() {
        let program = crate::parse(FileId::synthetic(), "x,y:float; z:int; { z = (x<y) + 1; }");
        assert!(program.is_ok(), "expected no narrowing-assignment error, got {:?}", program.err());
    }
}
