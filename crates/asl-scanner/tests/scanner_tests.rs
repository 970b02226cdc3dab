use asl_scanner::{TokenKind, tokenize};

fn kinds(source: &str) -> Vec<TokenKind> {
    let (tokens, diagnostics) = tokenize(source, "test.asl");
    assert!(diagnostics.is_empty(), "unexpected diagnostics: {diagnostics:?}");
    tokens.iter().map(|t| t.kind).collect()
}

#[test]
fn keywords_and_identifiers() {
    assert_eq!(
        kinds("func main endfunc"),
        [
            TokenKind::Func,
            TokenKind::Identifier,
            TokenKind::EndFunc,
            TokenKind::Eof
        ]
    );
}

#[test]
fn operators() {
    assert_eq!(
        kinds("= == != < <= > >= + - * / %"),
        [
            TokenKind::Assign,
            TokenKind::EqualEqual,
            TokenKind::NotEqual,
            TokenKind::Less,
            TokenKind::LessEqual,
            TokenKind::Greater,
            TokenKind::GreaterEqual,
            TokenKind::Plus,
            TokenKind::Minus,
            TokenKind::Star,
            TokenKind::Slash,
            TokenKind::Percent,
            TokenKind::Eof
        ]
    );
}

#[test]
fn bang_is_not() {
    assert_eq!(kinds("!x"), [TokenKind::Not, TokenKind::Identifier, TokenKind::Eof]);
}

#[test]
fn numeric_literals() {
    assert_eq!(
        kinds("42 3.14"),
        [TokenKind::IntLiteral, TokenKind::FloatLiteral, TokenKind::Eof]
    );
}

#[test]
fn integer_followed_by_identifier_is_two_tokens() {
    assert_eq!(
        kinds("12x"),
        [TokenKind::IntLiteral, TokenKind::Identifier, TokenKind::Eof]
    );
}

#[test]
fn bool_literals_are_keywords() {
    assert_eq!(
        kinds("true false"),
        [TokenKind::BoolLiteral, TokenKind::BoolLiteral, TokenKind::Eof]
    );
}

#[test]
fn char_literal_with_escape() {
    let (tokens, diagnostics) = tokenize(r"'\n'", "test.asl");
    assert!(diagnostics.is_empty());
    assert_eq!(tokens[0].kind, TokenKind::CharLiteral);
    assert_eq!(tokens[0].text(r"'\n'"), r"'\n'");
}

#[test]
fn string_literal_keeps_escapes_verbatim() {
    let source = r#""a\tb""#;
    let (tokens, diagnostics) = tokenize(source, "test.asl");
    assert!(diagnostics.is_empty());
    assert_eq!(tokens[0].kind, TokenKind::StringLiteral);
    assert_eq!(tokens[0].text(source), source);
}

#[test]
fn line_comments_are_skipped() {
    assert_eq!(
        kinds("a // comment until eol\nb"),
        [TokenKind::Identifier, TokenKind::Identifier, TokenKind::Eof]
    );
}

#[test]
fn unterminated_string_is_a_diagnostic() {
    let (_, diagnostics) = tokenize("\"abc", "test.asl");
    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0].message.contains("unterminated string"));
}

#[test]
fn unterminated_char_is_a_diagnostic() {
    let (_, diagnostics) = tokenize("'a", "test.asl");
    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0].message.contains("unterminated character"));
}

#[test]
fn unknown_character_is_a_diagnostic() {
    let (tokens, diagnostics) = tokenize("a @ b", "test.asl");
    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0].message.contains("unexpected character"));
    // Scanning continues past the offending character.
    assert_eq!(
        tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
        [TokenKind::Identifier, TokenKind::Identifier, TokenKind::Eof]
    );
}

#[test]
fn token_spans_slice_the_source() {
    let source = "func add(x : int)";
    let (tokens, _) = tokenize(source, "test.asl");
    assert_eq!(tokens[0].text(source), "func");
    assert_eq!(tokens[1].text(source), "add");
    assert_eq!(tokens[3].text(source), "x");
}
