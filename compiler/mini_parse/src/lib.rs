//! Mini Parse - recursive descent parser producing a `Program`.
//!
//! A program is a sequence of top-level assignments and function
//! definitions; the last item must be `func main`. Binary operators use
//! precedence climbing over the levels defined by `BinaryOp::precedence`.

mod error;

use mini_ir::{
    BinaryOp, Call, Expr, ExprKind, FunctionDef, Identifier, Name, NumberLit, Program, Span, Stmt,
    StmtKind, StringInterner, UnaryOp,
};
use mini_lexer::{Token, TokenKind};
use mini_stack::ensure_sufficient_stack;
use std::rc::Rc;

pub use error::ParseError;

/// Lex and parse `source`.
pub fn parse_source(source: &str, interner: &StringInterner) -> Result<Program, ParseError> {
    let tokens = mini_lexer::lex(source, interner)?;
    parse(&tokens, interner)
}

/// Parse a token stream terminated by `Eof`.
pub fn parse(tokens: &[Token], interner: &StringInterner) -> Result<Program, ParseError> {
    Parser::new(tokens, interner).parse_program()
}

type ParseResult<T> = Result<T, ParseError>;

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    interner: &'a StringInterner,
    eof: Token,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token], interner: &'a StringInterner) -> Self {
        let eof = tokens
            .last()
            .copied()
            .unwrap_or(Token::new(TokenKind::Eof, Span::DUMMY, 1));
        Parser {
            tokens,
            pos: 0,
            interner,
            eof,
        }
    }

    // Cursor

    fn current(&self) -> Token {
        self.tokens.get(self.pos).copied().unwrap_or(self.eof)
    }

    fn peek_kind(&self, offset: usize) -> TokenKind {
        self.tokens
            .get(self.pos + offset)
            .map_or(TokenKind::Eof, |t| t.kind)
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.current().kind == kind
    }

    fn advance(&mut self) -> Token {
        let token = self.current();
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        token
    }

    fn prev_span(&self) -> Span {
        self.pos
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map_or(Span::DUMMY, |t| t.span)
    }

    fn expect(&mut self, kind: TokenKind, expected: &'static str) -> ParseResult<Token> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(expected))
        }
    }

    fn expect_ident(&mut self) -> ParseResult<(Name, Span)> {
        let token = self.current();
        if let TokenKind::Ident(name) = token.kind {
            self.advance();
            Ok((name, token.span))
        } else {
            Err(self.unexpected("identifier"))
        }
    }

    fn unexpected(&self, expected: &'static str) -> ParseError {
        let token = self.current();
        let found = match token.kind {
            TokenKind::Ident(name) => format!("identifier `{}`", self.interner.lookup(name)),
            other => other.describe(),
        };
        ParseError::Unexpected {
            expected,
            found,
            line: token.line,
            span: token.span,
        }
    }

    // Items

    fn parse_program(&mut self) -> ParseResult<Program> {
        let mut items = Vec::new();
        while !self.check(TokenKind::Eof) {
            let item = match self.current().kind {
                TokenKind::Func => self.parse_function()?,
                TokenKind::Ident(_) => self.parse_assignment()?,
                _ => return Err(self.unexpected("`func` or an assignment")),
            };
            items.push(item);
        }

        let Some(last) = items.pop() else {
            return Err(ParseError::MissingMain);
        };
        let StmtKind::FunctionDef(entry) = last.kind else {
            return Err(ParseError::MissingMain);
        };
        if self.interner.lookup(entry.name) != "main" {
            return Err(ParseError::EntryNotMain {
                found: self.interner.lookup(entry.name).to_owned(),
                span: entry.span,
            });
        }
        Ok(Program {
            preamble: items,
            entry,
        })
    }

    fn parse_function(&mut self) -> ParseResult<Stmt> {
        let start = self.expect(TokenKind::Func, "`func`")?.span;
        let (name, _) = self.expect_ident()?;
        self.expect(TokenKind::LParen, "`(`")?;
        let mut params = Vec::new();
        if !self.check(TokenKind::RParen) {
            loop {
                params.push(self.expect_ident()?.0);
                if self.check(TokenKind::Comma) {
                    self.advance();
                } else {
                    break;
                }
            }
        }
        self.expect(TokenKind::RParen, "`)`")?;
        let body = self.parse_braced_block()?;
        let span = start.merge(self.prev_span());
        let def = FunctionDef {
            name,
            params,
            body,
            span,
        };
        Ok(Stmt::new(StmtKind::FunctionDef(Rc::new(def)), span))
    }

    // Statements

    fn parse_braced_block(&mut self) -> ParseResult<Vec<Stmt>> {
        self.expect(TokenKind::LBrace, "`{`")?;
        let mut stmts = Vec::new();
        while !self.check(TokenKind::RBrace) {
            if self.check(TokenKind::Eof) {
                return Err(self.unexpected("`}`"));
            }
            stmts.push(self.parse_stmt()?);
        }
        self.advance();
        Ok(stmts)
    }

    /// Nested blocks recurse through here; the stack grows as needed.
    fn parse_stmt(&mut self) -> ParseResult<Stmt> {
        ensure_sufficient_stack(|| self.parse_stmt_inner())
    }

    fn parse_stmt_inner(&mut self) -> ParseResult<Stmt> {
        let start = self.current().span;
        match self.current().kind {
            TokenKind::Return => {
                self.advance();
                let value = self.parse_expr()?;
                self.expect(TokenKind::Semicolon, "`;`")?;
                Ok(Stmt::new(StmtKind::Return(value), start.merge(self.prev_span())))
            }
            TokenKind::If => {
                self.advance();
                let cond = self.parse_condition()?;
                let then_body = self.parse_braced_block()?;
                let else_body = if self.check(TokenKind::Else) {
                    self.advance();
                    self.parse_braced_block()?
                } else {
                    Vec::new()
                };
                let kind = StmtKind::If {
                    cond,
                    then_body,
                    else_body,
                };
                Ok(Stmt::new(kind, start.merge(self.prev_span())))
            }
            TokenKind::While => {
                self.advance();
                let cond = self.parse_condition()?;
                let body = self.parse_braced_block()?;
                Ok(Stmt::new(
                    StmtKind::While { cond, body },
                    start.merge(self.prev_span()),
                ))
            }
            TokenKind::LBrace => {
                let body = self.parse_braced_block()?;
                Ok(Stmt::new(StmtKind::Block(body), start.merge(self.prev_span())))
            }
            TokenKind::Ident(_) if self.peek_kind(1) == TokenKind::LParen => {
                let call = self.parse_call()?;
                self.expect(TokenKind::Semicolon, "`;`")?;
                Ok(Stmt::new(StmtKind::Call(call), start.merge(self.prev_span())))
            }
            TokenKind::Ident(_) => self.parse_assignment(),
            _ => Err(self.unexpected("a statement")),
        }
    }

    fn parse_condition(&mut self) -> ParseResult<Expr> {
        self.expect(TokenKind::LParen, "`(`")?;
        let cond = self.parse_expr()?;
        self.expect(TokenKind::RParen, "`)`")?;
        Ok(cond)
    }

    fn parse_assignment(&mut self) -> ParseResult<Stmt> {
        let target = self.parse_ident()?;
        self.expect(TokenKind::Assign, "`=`")?;
        let value = self.parse_expr()?;
        self.expect(TokenKind::Semicolon, "`;`")?;
        let span = target.span.merge(self.prev_span());
        Ok(Stmt::new(StmtKind::Assign { target, value }, span))
    }

    // Expressions

    /// Every nested expression (parentheses, operands, list items,
    /// subscripts, arguments) recurses through here or `parse_unary`.
    fn parse_expr(&mut self) -> ParseResult<Expr> {
        ensure_sufficient_stack(|| self.parse_binary(1))
    }

    fn parse_binary(&mut self, min_prec: u8) -> ParseResult<Expr> {
        let mut left = self.parse_unary()?;
        while let Some(op) = binary_op(self.current().kind) {
            let prec = op.precedence();
            if prec < min_prec {
                break;
            }
            self.advance();
            let right = self.parse_binary(prec + 1)?;
            let span = left.span.merge(right.span);
            left = Expr::new(
                ExprKind::Binary {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                },
                span,
            );
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> ParseResult<Expr> {
        let op = match self.current().kind {
            TokenKind::Plus => UnaryOp::Plus,
            TokenKind::Minus => UnaryOp::Neg,
            _ => return self.parse_primary(),
        };
        let start = self.advance().span;
        let operand = ensure_sufficient_stack(|| self.parse_unary())?;
        let span = start.merge(operand.span);
        Ok(Expr::new(
            ExprKind::Unary {
                op,
                operand: Box::new(operand),
            },
            span,
        ))
    }

    fn parse_primary(&mut self) -> ParseResult<Expr> {
        let token = self.current();
        match token.kind {
            TokenKind::Int(n) => {
                self.advance();
                Ok(Expr::new(ExprKind::Number(NumberLit::Int(n)), token.span))
            }
            TokenKind::Real(r) => {
                self.advance();
                Ok(Expr::new(ExprKind::Number(NumberLit::Real(r)), token.span))
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_expr()?;
                self.expect(TokenKind::RParen, "`)`")?;
                Ok(inner)
            }
            TokenKind::LBracket => {
                self.advance();
                let items = self.parse_expr_list(TokenKind::RBracket)?;
                self.expect(TokenKind::RBracket, "`]`")?;
                Ok(Expr::new(
                    ExprKind::List(items),
                    token.span.merge(self.prev_span()),
                ))
            }
            TokenKind::Ident(_) if self.peek_kind(1) == TokenKind::LParen => {
                let call = self.parse_call()?;
                let span = call.span;
                Ok(Expr::new(ExprKind::Call(call), span))
            }
            TokenKind::Ident(_) => {
                let ident = self.parse_ident()?;
                let span = ident.span;
                Ok(Expr::new(ExprKind::Ident(ident), span))
            }
            _ => Err(self.unexpected("an expression")),
        }
    }

    fn parse_ident(&mut self) -> ParseResult<Identifier> {
        let (name, start) = self.expect_ident()?;
        let mut subscripts = Vec::new();
        while self.check(TokenKind::LBracket) {
            self.advance();
            subscripts.push(self.parse_expr()?);
            self.expect(TokenKind::RBracket, "`]`")?;
        }
        Ok(Identifier {
            name,
            subscripts,
            span: start.merge(self.prev_span()),
        })
    }

    fn parse_call(&mut self) -> ParseResult<Call> {
        let (callee, start) = self.expect_ident()?;
        self.expect(TokenKind::LParen, "`(`")?;
        let args = self.parse_expr_list(TokenKind::RParen)?;
        self.expect(TokenKind::RParen, "`)`")?;
        Ok(Call {
            callee,
            args,
            span: start.merge(self.prev_span()),
        })
    }

    /// Comma-separated expressions up to (not including) `close`.
    fn parse_expr_list(&mut self, close: TokenKind) -> ParseResult<Vec<Expr>> {
        let mut items = Vec::new();
        if self.check(close) {
            return Ok(items);
        }
        loop {
            items.push(self.parse_expr()?);
            if self.check(TokenKind::Comma) {
                self.advance();
            } else {
                return Ok(items);
            }
        }
    }
}

fn binary_op(kind: TokenKind) -> Option<BinaryOp> {
    Some(match kind {
        TokenKind::Plus => BinaryOp::Add,
        TokenKind::Minus => BinaryOp::Sub,
        TokenKind::Star => BinaryOp::Mul,
        TokenKind::Slash => BinaryOp::Div,
        TokenKind::Lt => BinaryOp::Lt,
        TokenKind::LtEq => BinaryOp::LtEq,
        TokenKind::Gt => BinaryOp::Gt,
        TokenKind::GtEq => BinaryOp::GtEq,
        TokenKind::EqEq => BinaryOp::Eq,
        TokenKind::Or => BinaryOp::Or,
        TokenKind::And => BinaryOp::And,
        _ => return None,
    })
}

#[cfg(test)]
mod tests;
