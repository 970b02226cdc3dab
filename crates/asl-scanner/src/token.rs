//! Token vocabulary of the ASL language.

use asl_common::Span;

/// Kind of a lexed token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    // Keywords
    Func,
    EndFunc,
    Var,
    Array,
    Of,
    Int,
    Float,
    Bool,
    Char,
    If,
    Then,
    Else,
    EndIf,
    While,
    Do,
    EndWhile,
    Return,
    Read,
    Write,
    And,
    Or,
    Not,

    // Punctuation
    LeftParen,
    RightParen,
    LeftBracket,
    RightBracket,
    Comma,
    Semicolon,
    Colon,

    // Operators
    Assign,
    EqualEqual,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,

    // Literals and identifiers
    IntLiteral,
    FloatLiteral,
    BoolLiteral,
    CharLiteral,
    StringLiteral,
    Identifier,

    Eof,
}

impl TokenKind {
    /// Keyword lookup for a scanned identifier.
    #[must_use]
    pub fn from_keyword(text: &str) -> Option<TokenKind> {
        Some(match text {
            "func" => TokenKind::Func,
            "endfunc" => TokenKind::EndFunc,
            "var" => TokenKind::Var,
            "array" => TokenKind::Array,
            "of" => TokenKind::Of,
            "int" => TokenKind::Int,
            "float" => TokenKind::Float,
            "bool" => TokenKind::Bool,
            "char" => TokenKind::Char,
            "if" => TokenKind::If,
            "then" => TokenKind::Then,
            "else" => TokenKind::Else,
            "endif" => TokenKind::EndIf,
            "while" => TokenKind::While,
            "do" => TokenKind::Do,
            "endwhile" => TokenKind::EndWhile,
            "return" => TokenKind::Return,
            "read" => TokenKind::Read,
            "write" => TokenKind::Write,
            "and" => TokenKind::And,
            "or" => TokenKind::Or,
            "not" => TokenKind::Not,
            "true" | "false" => TokenKind::BoolLiteral,
            _ => return None,
        })
    }
}

/// A lexed token. The text is recovered by slicing the source with `span`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    #[must_use]
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Slice the token's text out of the source it was scanned from.
    #[must_use]
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        source
            .get(self.span.start as usize..self.span.end as usize)
            .unwrap_or("")
    }
}
