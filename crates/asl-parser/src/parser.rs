//! Recursive-descent parser for ASL.
//!
//! The parser is never fatal: syntax problems become diagnostics and the
//! parser re-synchronizes (to the next `;` inside a body, to the next
//! `func` at top level). The driver refuses to run the semantic passes when
//! any front-end diagnostic was emitted, so recovered holes in the tree are
//! only ever used to keep reporting further syntax errors.

use asl_common::diagnostics::{Diagnostic, diagnostic_codes};
use asl_common::Span;
use asl_scanner::{Token, TokenKind, tokenize};
use tracing::debug;

use crate::ast::{
    ArithOp, BasicType, BasicTypeNode, Call, Expr, ExprKind, Function, Ident, LeftExpr, LogicOp,
    NodeIndex, Param, Program, RelOp, Statements, Stmt, StmtKind, TypeNode, TypeNodeKind, UnaryOp,
    Value, VarDecl,
};

/// Result of parsing one source file.
#[derive(Debug)]
pub struct ParseOutput {
    /// The parsed tree. When `diagnostics` is non-empty the tree has
    /// recovered holes and must not reach the semantic passes.
    pub program: Program,
    pub diagnostics: Vec<Diagnostic>,
}

/// Scan and parse `source`.
#[must_use]
pub fn parse(source: &str, file: &str) -> ParseOutput {
    let (tokens, scan_diagnostics) = tokenize(source, file);
    let mut parser = Parser {
        source,
        file,
        tokens,
        pos: 0,
        next_node: 0,
        diagnostics: scan_diagnostics,
    };
    let program = parser.parse_program();
    debug!(
        functions = program.functions.len(),
        diagnostics = parser.diagnostics.len(),
        "parsed program"
    );
    ParseOutput {
        program,
        diagnostics: parser.diagnostics,
    }
}

struct Parser<'a> {
    source: &'a str,
    file: &'a str,
    tokens: Vec<Token>,
    pos: usize,
    next_node: u32,
    diagnostics: Vec<Diagnostic>,
}

impl Parser<'_> {
    fn node(&mut self) -> NodeIndex {
        let id = NodeIndex(self.next_node);
        self.next_node += 1;
        id
    }

    fn peek(&self) -> Token {
        self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn peek_kind(&self) -> TokenKind {
        self.peek().kind
    }

    fn peek_ahead(&self, n: usize) -> TokenKind {
        self.tokens[(self.pos + n).min(self.tokens.len() - 1)].kind
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.peek_kind() == kind
    }

    fn advance(&mut self) -> Token {
        let tok = self.peek();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        tok
    }

    fn prev_end(&self) -> u32 {
        if self.pos == 0 {
            0
        } else {
            self.tokens[self.pos - 1].span.end
        }
    }

    fn error(&mut self, span: Span, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::error(
            self.file,
            span,
            message,
            diagnostic_codes::SYNTAX_ERROR,
        ));
    }

    fn expect(&mut self, kind: TokenKind, what: &str) -> Option<Token> {
        if self.at(kind) {
            Some(self.advance())
        } else {
            let tok = self.peek();
            self.error(tok.span, format!("expected {what}"));
            None
        }
    }

    // ---- top level ----

    fn parse_program(&mut self) -> Program {
        let node = self.node();
        let mut functions = Vec::new();
        while !self.at(TokenKind::Eof) {
            if self.at(TokenKind::Func) {
                if let Some(function) = self.parse_function() {
                    functions.push(function);
                } else {
                    self.sync_to_function();
                }
            } else {
                let tok = self.peek();
                self.error(tok.span, "expected 'func'");
                self.sync_to_function();
            }
        }
        let end = self.prev_end();
        Program {
            node,
            functions,
            span: Span::new(0, end),
        }
    }

    /// Skip forward to the next top-level `func` (or end of input).
    fn sync_to_function(&mut self) {
        while !self.at(TokenKind::Eof) && !self.at(TokenKind::Func) {
            self.advance();
        }
    }

    fn parse_function(&mut self) -> Option<Function> {
        let start = self.advance().span; // `func`
        let node = self.node();
        let name = self.parse_ident()?;
        debug!(name = %name.name, "parsing function");
        self.expect(TokenKind::LeftParen, "'('")?;
        let mut params = Vec::new();
        if !self.at(TokenKind::RightParen) {
            loop {
                let pname = self.parse_ident()?;
                self.expect(TokenKind::Colon, "':'")?;
                let ty = self.parse_type()?;
                params.push(Param { name: pname, ty });
                if self.at(TokenKind::Comma) {
                    self.advance();
                } else {
                    break;
                }
            }
        }
        self.expect(TokenKind::RightParen, "')'")?;
        let ret = if self.at(TokenKind::Colon) {
            self.advance();
            Some(self.parse_basic_type_node()?)
        } else {
            None
        };
        let mut decls = Vec::new();
        while self.at(TokenKind::Var) {
            if let Some(decl) = self.parse_var_decl() {
                decls.push(decl);
            } else {
                self.sync_statement();
            }
        }
        let body = self.parse_statements(&[TokenKind::EndFunc]);
        self.expect(TokenKind::EndFunc, "'endfunc'")?;
        Some(Function {
            node,
            name,
            params,
            ret,
            decls,
            body,
            span: Span::new(start.start, self.prev_end()),
        })
    }

    fn parse_var_decl(&mut self) -> Option<VarDecl> {
        let start = self.advance().span; // `var`
        let node = self.node();
        let mut names = vec![self.parse_ident()?];
        while self.at(TokenKind::Comma) {
            self.advance();
            names.push(self.parse_ident()?);
        }
        self.expect(TokenKind::Colon, "':'")?;
        let ty = self.parse_type()?;
        self.expect(TokenKind::Semicolon, "';'")?;
        Some(VarDecl {
            node,
            names,
            ty,
            span: Span::new(start.start, self.prev_end()),
        })
    }

    // ---- types ----

    fn parse_type(&mut self) -> Option<TypeNode> {
        if self.at(TokenKind::Array) {
            let start = self.advance().span;
            let node = self.node();
            self.expect(TokenKind::LeftBracket, "'['")?;
            let size_tok = self.expect(TokenKind::IntLiteral, "array size")?;
            let size = match size_tok.text(self.source).parse::<u32>() {
                Ok(size) => size,
                Err(_) => {
                    self.error(size_tok.span, "array size out of range");
                    0
                }
            };
            self.expect(TokenKind::RightBracket, "']'")?;
            self.expect(TokenKind::Of, "'of'")?;
            let elem = self.parse_basic_type()?;
            Some(TypeNode {
                node,
                kind: TypeNodeKind::Array { size, elem },
                span: Span::new(start.start, self.prev_end()),
            })
        } else {
            let node = self.node();
            let start = self.peek().span;
            let kind = self.parse_basic_type()?;
            Some(TypeNode {
                node,
                kind: TypeNodeKind::Basic(kind),
                span: start,
            })
        }
    }

    fn parse_basic_type(&mut self) -> Option<BasicType> {
        let kind = match self.peek_kind() {
            TokenKind::Int => BasicType::Int,
            TokenKind::Float => BasicType::Float,
            TokenKind::Bool => BasicType::Bool,
            TokenKind::Char => BasicType::Char,
            _ => {
                let tok = self.peek();
                self.error(tok.span, "expected a basic type");
                return None;
            }
        };
        self.advance();
        Some(kind)
    }

    fn parse_basic_type_node(&mut self) -> Option<BasicTypeNode> {
        let node = self.node();
        let span = self.peek().span;
        let kind = self.parse_basic_type()?;
        Some(BasicTypeNode { node, kind, span })
    }

    // ---- statements ----

    fn parse_statements(&mut self, terminators: &[TokenKind]) -> Statements {
        let mut stmts = Vec::new();
        while !self.at(TokenKind::Eof)
            && !self.at(TokenKind::Func)
            && !terminators.contains(&self.peek_kind())
        {
            let before = self.pos;
            if let Some(stmt) = self.parse_statement() {
                stmts.push(stmt);
            } else {
                self.sync_statement();
                // The statement consumed nothing and the cursor sits on a
                // token the synchronizer refuses to skip; step over it.
                if self.pos == before {
                    self.advance();
                }
            }
        }
        Statements { stmts }
    }

    /// Skip forward past the next `;`, stopping early at any block keyword.
    fn sync_statement(&mut self) {
        while !self.at(TokenKind::Eof) {
            match self.peek_kind() {
                TokenKind::Semicolon => {
                    self.advance();
                    return;
                }
                TokenKind::EndFunc
                | TokenKind::EndIf
                | TokenKind::EndWhile
                | TokenKind::Else
                | TokenKind::Func => return,
                _ => {
                    self.advance();
                }
            }
        }
    }

    fn parse_statement(&mut self) -> Option<Stmt> {
        match self.peek_kind() {
            TokenKind::If => self.parse_if(),
            TokenKind::While => self.parse_while(),
            TokenKind::Return => self.parse_return(),
            TokenKind::Read => self.parse_read(),
            TokenKind::Write => self.parse_write(),
            TokenKind::Identifier => {
                if self.peek_ahead(1) == TokenKind::LeftParen {
                    self.parse_proc_call()
                } else {
                    self.parse_assign()
                }
            }
            _ => {
                let tok = self.peek();
                self.error(tok.span, "expected statement");
                None
            }
        }
    }

    fn parse_if(&mut self) -> Option<Stmt> {
        let start = self.advance().span;
        let node = self.node();
        let cond = self.parse_expr()?;
        self.expect(TokenKind::Then, "'then'")?;
        let then_branch =
            self.parse_statements(&[TokenKind::Else, TokenKind::EndIf, TokenKind::EndFunc]);
        let else_branch = if self.at(TokenKind::Else) {
            self.advance();
            Some(self.parse_statements(&[TokenKind::EndIf, TokenKind::EndFunc]))
        } else {
            None
        };
        self.expect(TokenKind::EndIf, "'endif'")?;
        Some(Stmt {
            node,
            kind: StmtKind::If {
                cond,
                then_branch,
                else_branch,
            },
            span: Span::new(start.start, self.prev_end()),
        })
    }

    fn parse_while(&mut self) -> Option<Stmt> {
        let start = self.advance().span;
        let node = self.node();
        let cond = self.parse_expr()?;
        self.expect(TokenKind::Do, "'do'")?;
        let body = self.parse_statements(&[TokenKind::EndWhile, TokenKind::EndFunc]);
        self.expect(TokenKind::EndWhile, "'endwhile'")?;
        Some(Stmt {
            node,
            kind: StmtKind::While { cond, body },
            span: Span::new(start.start, self.prev_end()),
        })
    }

    fn parse_return(&mut self) -> Option<Stmt> {
        let start = self.advance().span;
        let node = self.node();
        let value = if self.at(TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        self.expect(TokenKind::Semicolon, "';'")?;
        Some(Stmt {
            node,
            kind: StmtKind::Return { value },
            span: Span::new(start.start, self.prev_end()),
        })
    }

    fn parse_read(&mut self) -> Option<Stmt> {
        let start = self.advance().span;
        let node = self.node();
        let target = self.parse_left_expr()?;
        self.expect(TokenKind::Semicolon, "';'")?;
        Some(Stmt {
            node,
            kind: StmtKind::Read { target },
            span: Span::new(start.start, self.prev_end()),
        })
    }

    fn parse_write(&mut self) -> Option<Stmt> {
        let start = self.advance().span;
        let node = self.node();
        let kind = if self.at(TokenKind::StringLiteral) {
            let tok = self.advance();
            let text = tok.text(self.source);
            // Drop the enclosing quotes; escapes stay verbatim.
            let value = text[1..text.len() - 1].to_string();
            StmtKind::WriteString { value }
        } else {
            StmtKind::WriteExpr {
                value: self.parse_expr()?,
            }
        };
        self.expect(TokenKind::Semicolon, "';'")?;
        Some(Stmt {
            node,
            kind,
            span: Span::new(start.start, self.prev_end()),
        })
    }

    fn parse_proc_call(&mut self) -> Option<Stmt> {
        let node = self.node();
        let call = self.parse_call()?;
        self.expect(TokenKind::Semicolon, "';'")?;
        let span = Span::new(call.span.start, self.prev_end());
        Some(Stmt {
            node,
            kind: StmtKind::ProcCall(call),
            span,
        })
    }

    fn parse_assign(&mut self) -> Option<Stmt> {
        let node = self.node();
        let target = self.parse_left_expr()?;
        let assign_tok = self.expect(TokenKind::Assign, "'='")?;
        let value = self.parse_expr()?;
        self.expect(TokenKind::Semicolon, "';'")?;
        let span = Span::new(target.span.start, self.prev_end());
        Some(Stmt {
            node,
            kind: StmtKind::Assign {
                target,
                assign_span: assign_tok.span,
                value,
            },
            span,
        })
    }

    fn parse_left_expr(&mut self) -> Option<LeftExpr> {
        let node = self.node();
        let ident = self.parse_ident()?;
        let index = if self.at(TokenKind::LeftBracket) {
            self.advance();
            let index = self.parse_expr()?;
            self.expect(TokenKind::RightBracket, "']'")?;
            Some(Box::new(index))
        } else {
            None
        };
        let span = Span::new(ident.span.start, self.prev_end());
        Some(LeftExpr {
            node,
            ident,
            index,
            span,
        })
    }

    fn parse_call(&mut self) -> Option<Call> {
        let node = self.node();
        let callee = self.parse_ident()?;
        self.expect(TokenKind::LeftParen, "'('")?;
        let mut args = Vec::new();
        if !self.at(TokenKind::RightParen) {
            loop {
                args.push(self.parse_expr()?);
                if self.at(TokenKind::Comma) {
                    self.advance();
                } else {
                    break;
                }
            }
        }
        self.expect(TokenKind::RightParen, "')'")?;
        let span = Span::new(callee.span.start, self.prev_end());
        Some(Call {
            node,
            callee,
            args,
            span,
        })
    }

    fn parse_ident(&mut self) -> Option<Ident> {
        let tok = self.expect(TokenKind::Identifier, "identifier")?;
        Some(Ident {
            node: self.node(),
            name: tok.text(self.source).to_string(),
            span: tok.span,
        })
    }

    // ---- expressions ----

    fn parse_expr(&mut self) -> Option<Expr> {
        self.parse_or()
    }

    fn parse_or(&mut self) -> Option<Expr> {
        let mut lhs = self.parse_and()?;
        while self.at(TokenKind::Or) {
            let op_span = self.advance().span;
            let rhs = self.parse_and()?;
            lhs = self.logical(LogicOp::Or, op_span, lhs, rhs);
        }
        Some(lhs)
    }

    fn parse_and(&mut self) -> Option<Expr> {
        let mut lhs = self.parse_relational()?;
        while self.at(TokenKind::And) {
            let op_span = self.advance().span;
            let rhs = self.parse_relational()?;
            lhs = self.logical(LogicOp::And, op_span, lhs, rhs);
        }
        Some(lhs)
    }

    fn parse_relational(&mut self) -> Option<Expr> {
        let mut lhs = self.parse_additive()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::EqualEqual => RelOp::Eq,
                TokenKind::NotEqual => RelOp::Ne,
                TokenKind::Less => RelOp::Lt,
                TokenKind::LessEqual => RelOp::Le,
                TokenKind::Greater => RelOp::Gt,
                TokenKind::GreaterEqual => RelOp::Ge,
                _ => break,
            };
            let op_span = self.advance().span;
            let rhs = self.parse_additive()?;
            let span = lhs.span.merge(rhs.span);
            lhs = Expr {
                node: self.node(),
                kind: ExprKind::Relational {
                    op,
                    op_span,
                    lhs: Box::new(lhs),
                    rhs: Box::new(rhs),
                },
                span,
            };
        }
        Some(lhs)
    }

    fn parse_additive(&mut self) -> Option<Expr> {
        let mut lhs = self.parse_multiplicative()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Plus => ArithOp::Add,
                TokenKind::Minus => ArithOp::Sub,
                _ => break,
            };
            let op_span = self.advance().span;
            let rhs = self.parse_multiplicative()?;
            lhs = self.arithmetic(op, op_span, lhs, rhs);
        }
        Some(lhs)
    }

    fn parse_multiplicative(&mut self) -> Option<Expr> {
        let mut lhs = self.parse_unary()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Star => ArithOp::Mul,
                TokenKind::Slash => ArithOp::Div,
                TokenKind::Percent => ArithOp::Mod,
                _ => break,
            };
            let op_span = self.advance().span;
            let rhs = self.parse_unary()?;
            lhs = self.arithmetic(op, op_span, lhs, rhs);
        }
        Some(lhs)
    }

    fn parse_unary(&mut self) -> Option<Expr> {
        let op = match self.peek_kind() {
            TokenKind::Not => UnaryOp::Not,
            TokenKind::Minus => UnaryOp::Neg,
            _ => return self.parse_primary(),
        };
        let op_span = self.advance().span;
        let operand = self.parse_unary()?;
        let span = op_span.merge(operand.span);
        Some(Expr {
            node: self.node(),
            kind: ExprKind::Unary {
                op,
                op_span,
                operand: Box::new(operand),
            },
            span,
        })
    }

    fn parse_primary(&mut self) -> Option<Expr> {
        match self.peek_kind() {
            TokenKind::IntLiteral => {
                let tok = self.advance();
                Some(self.value(Value::Int(tok.text(self.source).to_string()), tok.span))
            }
            TokenKind::FloatLiteral => {
                let tok = self.advance();
                Some(self.value(Value::Float(tok.text(self.source).to_string()), tok.span))
            }
            TokenKind::BoolLiteral => {
                let tok = self.advance();
                let value = tok.text(self.source) == "true";
                Some(self.value(Value::Bool(value), tok.span))
            }
            TokenKind::CharLiteral => {
                let tok = self.advance();
                let text = tok.text(self.source);
                // Drop the enclosing quotes; the escape stays verbatim.
                let inner = text[1..text.len() - 1].to_string();
                Some(self.value(Value::Char(inner), tok.span))
            }
            TokenKind::LeftParen => {
                let start = self.advance().span;
                let node = self.node();
                let inner = self.parse_expr()?;
                self.expect(TokenKind::RightParen, "')'")?;
                let span = Span::new(start.start, self.prev_end());
                Some(Expr {
                    node,
                    kind: ExprKind::Paren(Box::new(inner)),
                    span,
                })
            }
            TokenKind::Identifier => match self.peek_ahead(1) {
                TokenKind::LeftParen => {
                    let node = self.node();
                    let call = self.parse_call()?;
                    let span = call.span;
                    Some(Expr {
                        node,
                        kind: ExprKind::Call(call),
                        span,
                    })
                }
                TokenKind::LeftBracket => {
                    let node = self.node();
                    let ident = self.parse_ident()?;
                    self.advance(); // `[`
                    let index = self.parse_expr()?;
                    self.expect(TokenKind::RightBracket, "']'")?;
                    let span = Span::new(ident.span.start, self.prev_end());
                    Some(Expr {
                        node,
                        kind: ExprKind::ArrayIndex {
                            ident,
                            index: Box::new(index),
                        },
                        span,
                    })
                }
                _ => {
                    let node = self.node();
                    let ident = self.parse_ident()?;
                    let span = ident.span;
                    Some(Expr {
                        node,
                        kind: ExprKind::Ident(ident),
                        span,
                    })
                }
            },
            _ => {
                let tok = self.peek();
                self.error(tok.span, "expected expression");
                None
            }
        }
    }

    fn value(&mut self, value: Value, span: Span) -> Expr {
        Expr {
            node: self.node(),
            kind: ExprKind::Value(value),
            span,
        }
    }

    fn logical(&mut self, op: LogicOp, op_span: Span, lhs: Expr, rhs: Expr) -> Expr {
        let span = lhs.span.merge(rhs.span);
        Expr {
            node: self.node(),
            kind: ExprKind::Logical {
                op,
                op_span,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            },
            span,
        }
    }

    fn arithmetic(&mut self, op: ArithOp, op_span: Span, lhs: Expr, rhs: Expr) -> Expr {
        let span = lhs.span.merge(rhs.span);
        Expr {
            node: self.node(),
            kind: ExprKind::Arithmetic {
                op,
                op_span,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            },
            span,
        }
    }
}
