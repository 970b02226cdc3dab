//! Hand-written scanner for ASL source text.
//!
//! The scanner is a single forward pass over the bytes of the source. It
//! never fails: unknown characters and unterminated literals become
//! diagnostics, and scanning continues at the next character.

use asl_common::diagnostics::{Diagnostic, diagnostic_codes};
use asl_common::Span;

use crate::token::{Token, TokenKind};

/// Scan `source` into a token stream. The returned list always ends with an
/// `Eof` token whose span is empty and points one past the last byte.
#[must_use]
pub fn tokenize(source: &str, file: &str) -> (Vec<Token>, Vec<Diagnostic>) {
    let mut scanner = Scanner {
        source,
        file,
        bytes: source.as_bytes(),
        pos: 0,
        tokens: Vec::new(),
        diagnostics: Vec::new(),
    };
    scanner.run();
    (scanner.tokens, scanner.diagnostics)
}

struct Scanner<'a> {
    source: &'a str,
    file: &'a str,
    bytes: &'a [u8],
    pos: usize,
    tokens: Vec<Token>,
    diagnostics: Vec<Diagnostic>,
}

impl Scanner<'_> {
    fn run(&mut self) {
        while self.pos < self.bytes.len() {
            let start = self.pos;
            let b = self.bytes[self.pos];
            match b {
                b' ' | b'\t' | b'\r' | b'\n' => {
                    self.pos += 1;
                }
                b'/' if self.peek(1) == Some(b'/') => self.skip_line_comment(),
                b'(' => self.punct(TokenKind::LeftParen),
                b')' => self.punct(TokenKind::RightParen),
                b'[' => self.punct(TokenKind::LeftBracket),
                b']' => self.punct(TokenKind::RightBracket),
                b',' => self.punct(TokenKind::Comma),
                b';' => self.punct(TokenKind::Semicolon),
                b':' => self.punct(TokenKind::Colon),
                b'+' => self.punct(TokenKind::Plus),
                b'-' => self.punct(TokenKind::Minus),
                b'*' => self.punct(TokenKind::Star),
                b'/' => self.punct(TokenKind::Slash),
                b'%' => self.punct(TokenKind::Percent),
                b'=' => {
                    if self.peek(1) == Some(b'=') {
                        self.pos += 2;
                        self.push(TokenKind::EqualEqual, start);
                    } else {
                        self.punct(TokenKind::Assign);
                    }
                }
                b'!' => {
                    if self.peek(1) == Some(b'=') {
                        self.pos += 2;
                        self.push(TokenKind::NotEqual, start);
                    } else {
                        // `!` is an alias of `not`
                        self.punct(TokenKind::Not);
                    }
                }
                b'<' => {
                    if self.peek(1) == Some(b'=') {
                        self.pos += 2;
                        self.push(TokenKind::LessEqual, start);
                    } else {
                        self.punct(TokenKind::Less);
                    }
                }
                b'>' => {
                    if self.peek(1) == Some(b'=') {
                        self.pos += 2;
                        self.push(TokenKind::GreaterEqual, start);
                    } else {
                        self.punct(TokenKind::Greater);
                    }
                }
                b'0'..=b'9' => self.scan_number(),
                b'\'' => self.scan_char(),
                b'"' => self.scan_string(),
                b'a'..=b'z' | b'A'..=b'Z' | b'_' => self.scan_identifier(),
                _ => {
                    self.pos += self.char_len();
                    self.error(start, "unexpected character");
                }
            }
        }
        let end = u32::try_from(self.bytes.len()).unwrap_or(u32::MAX);
        self.tokens.push(Token::new(TokenKind::Eof, Span::at(end)));
    }

    fn peek(&self, ahead: usize) -> Option<u8> {
        self.bytes.get(self.pos + ahead).copied()
    }

    /// Byte length of the character at the cursor; 1 when the cursor is not
    /// on a character boundary, so scanning always makes progress.
    fn char_len(&self) -> usize {
        self.source
            .get(self.pos..)
            .and_then(|rest| rest.chars().next())
            .map_or(1, char::len_utf8)
    }

    fn punct(&mut self, kind: TokenKind) {
        let start = self.pos;
        self.pos += 1;
        self.push(kind, start);
    }

    fn push(&mut self, kind: TokenKind, start: usize) {
        let span = Span::new(
            u32::try_from(start).unwrap_or(u32::MAX),
            u32::try_from(self.pos).unwrap_or(u32::MAX),
        );
        self.tokens.push(Token::new(kind, span));
    }

    fn error(&mut self, start: usize, message: &str) {
        let span = Span::new(
            u32::try_from(start).unwrap_or(u32::MAX),
            u32::try_from(self.pos).unwrap_or(u32::MAX),
        );
        self.diagnostics.push(Diagnostic::error(
            self.file,
            span,
            message,
            diagnostic_codes::SYNTAX_ERROR,
        ));
    }

    fn skip_line_comment(&mut self) {
        while self.pos < self.bytes.len() && self.bytes[self.pos] != b'\n' {
            self.pos += 1;
        }
    }

    fn scan_number(&mut self) {
        let start = self.pos;
        while matches!(self.peek(0), Some(b'0'..=b'9')) {
            self.pos += 1;
        }
        // A float needs a digit on both sides of the dot.
        if self.peek(0) == Some(b'.') && matches!(self.peek(1), Some(b'0'..=b'9')) {
            self.pos += 1;
            while matches!(self.peek(0), Some(b'0'..=b'9')) {
                self.pos += 1;
            }
            self.push(TokenKind::FloatLiteral, start);
        } else {
            self.push(TokenKind::IntLiteral, start);
        }
    }

    fn scan_identifier(&mut self) {
        let start = self.pos;
        while matches!(
            self.peek(0),
            Some(b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'_')
        ) {
            self.pos += 1;
        }
        let text = &self.source[start..self.pos];
        let kind = TokenKind::from_keyword(text).unwrap_or(TokenKind::Identifier);
        self.push(kind, start);
    }

    /// Character literal: `'x'` or a two-character escape such as `'\n'`.
    /// The token span includes the quotes; escapes are kept verbatim.
    fn scan_char(&mut self) {
        let start = self.pos;
        self.pos += 1; // opening quote
        match self.peek(0) {
            Some(b'\\') => {
                self.pos += 1;
                if self.pos < self.bytes.len() {
                    self.pos += self.char_len();
                }
            }
            Some(b'\'') | Some(b'\n') | None => {}
            _ => self.pos += self.char_len(),
        }
        if self.peek(0) == Some(b'\'') {
            self.pos += 1;
            self.push(TokenKind::CharLiteral, start);
        } else {
            self.error(start, "unterminated character literal");
        }
    }

    /// String literal: double quotes, escapes kept verbatim.
    fn scan_string(&mut self) {
        let start = self.pos;
        self.pos += 1; // opening quote
        while let Some(b) = self.peek(0) {
            match b {
                b'"' => {
                    self.pos += 1;
                    self.push(TokenKind::StringLiteral, start);
                    return;
                }
                b'\n' => break,
                b'\\' => {
                    self.pos += 1;
                    if self.pos < self.bytes.len() {
                        self.pos += self.char_len();
                    }
                }
                _ => self.pos += self.char_len(),
            }
        }
        self.error(start, "unterminated string literal");
    }
}
