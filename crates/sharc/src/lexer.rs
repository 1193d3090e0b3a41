//! Tokenizer for Shard source text
//!
//! The lexer never aborts: every problem becomes a report in the sink and
//! lexing continues at the next reasonable position, so one bad literal
//! does not hide the rest of the file. Tokens carry byte spans into the
//! source file they were produced from.

use std::fmt;

use sharc_report::{FileId, ReportKind, ReportSink, Span};

/// The kind of a lexed token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// Identifier: `[A-Za-z_][A-Za-z0-9_]*`. Keywords are resolved later.
    Ident(String),

    /// Integer literal, decimal or `0x`/`0o`/`0b`, with `_` separators.
    Int(u64),

    /// String literal with escapes resolved.
    Str(String),

    /// Character literal with escapes resolved.
    Char(char),

    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `,`
    Comma,
    /// `;`
    Semicolon,
    /// `:`
    Colon,
    /// `.`
    Dot,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `%`
    Percent,
    /// `=`
    Eq,
    /// `==`
    EqEq,
    /// `!=`
    NotEq,
    /// `<`
    Lt,
    /// `>`
    Gt,
    /// `<=`
    LtEq,
    /// `>=`
    GtEq,
    /// `!`
    Not,
    /// `&&`
    AndAnd,
    /// `||`
    OrOr,
    /// `&`
    And,
    /// `|`
    Or,
    /// `^`
    Caret,
    /// `~`
    Tilde,
    /// `->`
    Arrow,
    /// `=>`
    FatArrow,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Ident(name) => write!(f, "ident({name})"),
            TokenKind::Int(value) => write!(f, "int({value})"),
            TokenKind::Str(value) => write!(f, "str({value:?})"),
            TokenKind::Char(value) => write!(f, "char({value:?})"),
            punct => write!(f, "punct({})", punct.symbol()),
        }
    }
}

impl TokenKind {
    fn symbol(&self) -> &'static str {
        match self {
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::Comma => ",",
            TokenKind::Semicolon => ";",
            TokenKind::Colon => ":",
            TokenKind::Dot => ".",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Percent => "%",
            TokenKind::Eq => "=",
            TokenKind::EqEq => "==",
            TokenKind::NotEq => "!=",
            TokenKind::Lt => "<",
            TokenKind::Gt => ">",
            TokenKind::LtEq => "<=",
            TokenKind::GtEq => ">=",
            TokenKind::Not => "!",
            TokenKind::AndAnd => "&&",
            TokenKind::OrOr => "||",
            TokenKind::And => "&",
            TokenKind::Or => "|",
            TokenKind::Caret => "^",
            TokenKind::Tilde => "~",
            TokenKind::Arrow => "->",
            TokenKind::FatArrow => "=>",
            _ => "",
        }
    }
}

/// One lexed token with its source range.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// What was lexed
    pub kind: TokenKind,

    /// Where it came from
    pub span: Span,
}

/// Streaming tokenizer over one source file.
pub struct Lexer<'a> {
    file: FileId,
    text: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    /// Create a lexer over `text`, which must be the text registered for
    /// `file` in the driver's source map.
    pub fn new(file: FileId, text: &'a str) -> Self {
        Self { file, text, pos: 0 }
    }

    /// Consume the whole input, emitting reports for anything malformed.
    pub fn tokenize(mut self, sink: &mut ReportSink) -> Vec<Token> {
        let mut tokens = Vec::new();
        while let Some(c) = self.peek() {
            let start = self.pos;
            match c {
                c if c.is_whitespace() => {
                    self.bump();
                }
                '/' if self.peek_at(1) == Some('/') => self.skip_line_comment(),
                '/' if self.peek_at(1) == Some('*') => self.skip_block_comment(sink),
                '_' => tokens.push(self.lex_ident(start)),
                c if c.is_ascii_alphabetic() => tokens.push(self.lex_ident(start)),
                c if c.is_ascii_digit() => tokens.push(self.lex_number(start, sink)),
                '"' => tokens.push(self.lex_string(start, sink)),
                '\'' => {
                    if let Some(token) = self.lex_char(start, sink) {
                        tokens.push(token);
                    }
                }
                _ => match self.lex_punct(start) {
                    Some(token) => tokens.push(token),
                    None => {
                        self.bump();
                        sink.emit(
                            ReportKind::UnexpectedCharacter
                                .title(format!("unexpected character `{c}`"))
                                .with_span(self.span_from(start)),
                        );
                    }
                },
            }
        }
        tokens
    }

    // ═══════════════════════════════════════════════════════════════════
    // Token Classes
    // ═══════════════════════════════════════════════════════════════════

    fn lex_ident(&mut self, start: usize) -> Token {
        while matches!(self.peek(), Some(c) if c == '_' || c.is_ascii_alphanumeric()) {
            self.bump();
        }
        Token {
            kind: TokenKind::Ident(self.text[start..self.pos].to_string()),
            span: self.span_from(start),
        }
    }

    fn lex_number(&mut self, start: usize, sink: &mut ReportSink) -> Token {
        let first = self.bump().unwrap_or('0');
        let radix = if first == '0' {
            match self.peek() {
                Some('x') => {
                    self.bump();
                    16
                }
                Some('o') => {
                    self.bump();
                    8
                }
                Some('b') => {
                    self.bump();
                    2
                }
                _ => 10,
            }
        } else {
            10
        };

        let mut value: u64 = if radix == 10 {
            u64::from(first.to_digit(10).unwrap_or(0))
        } else {
            0
        };
        let mut digits = if radix == 10 { 1 } else { 0 };
        let mut overflowed = false;

        while let Some(c) = self.peek() {
            if c == '_' {
                self.bump();
                continue;
            }
            let Some(digit) = c.to_digit(radix) else { break };
            self.bump();
            digits += 1;
            match value
                .checked_mul(u64::from(radix))
                .and_then(|v| v.checked_add(u64::from(digit)))
            {
                Some(v) => value = v,
                None => overflowed = true,
            }
        }

        if digits == 0 {
            let prefix = match radix {
                16 => "0x",
                8 => "0o",
                _ => "0b",
            };
            sink.emit(
                ReportKind::UnexpectedCharacter
                    .title(format!("missing digits after base prefix `{prefix}`"))
                    .with_span(self.span_from(start)),
            );
        }
        if overflowed {
            sink.emit(
                ReportKind::IntegerLiteralOverflow
                    .title("integer literal does not fit in 64 bits")
                    .with_span(self.span_from(start)),
            );
            value = u64::MAX;
        }

        Token {
            kind: TokenKind::Int(value),
            span: self.span_from(start),
        }
    }

    fn lex_string(&mut self, start: usize, sink: &mut ReportSink) -> Token {
        self.bump(); // opening quote
        let mut value = String::new();
        loop {
            match self.peek() {
                None => {
                    sink.emit(
                        ReportKind::UnterminatedStringLiteral
                            .title("string literal is missing a closing quote")
                            .with_span(self.span_from(start))
                            .with_label("started here"),
                    );
                    break;
                }
                Some('"') => {
                    self.bump();
                    break;
                }
                Some('\\') => {
                    let escape_start = self.pos;
                    self.bump();
                    if let Some(c) = self.bump() {
                        match unescape(c) {
                            Some(escaped) => value.push(escaped),
                            None => {
                                sink.emit(
                                    ReportKind::InvalidEscapeSequence
                                        .title(format!("invalid escape sequence `\\{c}`"))
                                        .with_span(Span::new(self.file, escape_start, self.pos)),
                                );
                                value.push(c);
                            }
                        }
                    }
                }
                Some(c) => {
                    self.bump();
                    value.push(c);
                }
            }
        }
        Token {
            kind: TokenKind::Str(value),
            span: self.span_from(start),
        }
    }

    fn lex_char(&mut self, start: usize, sink: &mut ReportSink) -> Option<Token> {
        self.bump(); // opening quote
        match self.peek() {
            Some('\'') => {
                self.bump();
                sink.emit(
                    ReportKind::EmptyCharLiteral
                        .title("empty character literal")
                        .with_span(self.span_from(start))
                        .with_help("did you mean an empty string `\"\"`?"),
                );
                return None;
            }
            None => {
                sink.emit(
                    ReportKind::UnterminatedCharLiteral
                        .title("character literal is missing a closing quote")
                        .with_span(self.span_from(start)),
                );
                return None;
            }
            _ => {}
        }

        let value = if self.peek() == Some('\\') {
            let escape_start = self.pos;
            self.bump();
            match self.bump() {
                Some(c) => match unescape(c) {
                    Some(escaped) => escaped,
                    None => {
                        sink.emit(
                            ReportKind::InvalidEscapeSequence
                                .title(format!("invalid escape sequence `\\{c}`"))
                                .with_span(Span::new(self.file, escape_start, self.pos)),
                        );
                        c
                    }
                },
                None => {
                    sink.emit(
                        ReportKind::UnterminatedCharLiteral
                            .title("character literal is missing a closing quote")
                            .with_span(self.span_from(start)),
                    );
                    return None;
                }
            }
        } else {
            self.bump()?
        };

        if !self.eat('\'') {
            sink.emit(
                ReportKind::UnterminatedCharLiteral
                    .title("character literal is missing a closing quote")
                    .with_span(self.span_from(start)),
            );
        }
        Some(Token {
            kind: TokenKind::Char(value),
            span: self.span_from(start),
        })
    }

    fn lex_punct(&mut self, start: usize) -> Option<Token> {
        let c = self.peek()?;
        if !"(){}[],;:.+-*/%=!<>&|^~".contains(c) {
            return None;
        }
        self.bump();
        let kind = match c {
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            ',' => TokenKind::Comma,
            ';' => TokenKind::Semicolon,
            ':' => TokenKind::Colon,
            '.' => TokenKind::Dot,
            '+' => TokenKind::Plus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '%' => TokenKind::Percent,
            '^' => TokenKind::Caret,
            '~' => TokenKind::Tilde,
            '-' => {
                if self.eat('>') {
                    TokenKind::Arrow
                } else {
                    TokenKind::Minus
                }
            }
            '=' => {
                if self.eat('=') {
                    TokenKind::EqEq
                } else if self.eat('>') {
                    TokenKind::FatArrow
                } else {
                    TokenKind::Eq
                }
            }
            '!' => {
                if self.eat('=') {
                    TokenKind::NotEq
                } else {
                    TokenKind::Not
                }
            }
            '<' => {
                if self.eat('=') {
                    TokenKind::LtEq
                } else {
                    TokenKind::Lt
                }
            }
            '>' => {
                if self.eat('=') {
                    TokenKind::GtEq
                } else {
                    TokenKind::Gt
                }
            }
            '&' => {
                if self.eat('&') {
                    TokenKind::AndAnd
                } else {
                    TokenKind::And
                }
            }
            '|' => {
                if self.eat('|') {
                    TokenKind::OrOr
                } else {
                    TokenKind::Or
                }
            }
            _ => unreachable!("punct set and match arms diverged"),
        };
        Some(Token {
            kind,
            span: self.span_from(start),
        })
    }

    // ═══════════════════════════════════════════════════════════════════
    // Comments and Cursor
    // ═══════════════════════════════════════════════════════════════════

    fn skip_line_comment(&mut self) {
        while !matches!(self.peek(), None | Some('\n')) {
            self.bump();
        }
    }

    /// Block comments nest.
    fn skip_block_comment(&mut self, sink: &mut ReportSink) {
        let start = self.pos;
        self.bump();
        self.bump();
        let mut depth = 1usize;
        while depth > 0 {
            match self.bump() {
                None => {
                    sink.emit(
                        ReportKind::UnterminatedBlockComment
                            .title("block comment never closed")
                            .with_span(Span::new(self.file, start, start + 2)),
                    );
                    return;
                }
                Some('*') if self.peek() == Some('/') => {
                    self.bump();
                    depth -= 1;
                }
                Some('/') if self.peek() == Some('*') => {
                    self.bump();
                    depth += 1;
                }
                Some(_) => {}
            }
        }
    }

    fn peek(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    fn peek_at(&self, n: usize) -> Option<char> {
        self.text[self.pos..].chars().nth(n)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn span_from(&self, start: usize) -> Span {
        Span::new(self.file, start, self.pos)
    }
}

fn unescape(c: char) -> Option<char> {
    match c {
        'n' => Some('\n'),
        't' => Some('\t'),
        'r' => Some('\r'),
        '\\' => Some('\\'),
        '\'' => Some('\''),
        '"' => Some('"'),
        '0' => Some('\0'),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sharc_report::{Level, SourceMap};

    // Helper to lex a string against a fresh source map
    fn lex(src: &str) -> (Vec<Token>, ReportSink) {
        let mut sources = SourceMap::new();
        let file = sources.add("test.shd", src);
        let mut sink = ReportSink::new();
        let tokens = Lexer::new(file, src).tokenize(&mut sink);
        (tokens, sink)
    }

    fn kinds(src: &str) -> Vec<TokenKind> {
        let (tokens, sink) = lex(src);
        assert!(sink.ok(), "unexpected reports for `{src}`");
        tokens.into_iter().map(|t| t.kind).collect()
    }

    fn ident(name: &str) -> TokenKind {
        TokenKind::Ident(name.to_string())
    }

    // ═══════════════════════════════════════════════════════════════════
    // Happy Paths
    // ═══════════════════════════════════════════════════════════════════

    #[test]
    fn test_idents_and_punct() {
        assert_eq!(
            kinds("let x = y;"),
            vec![
                ident("let"),
                ident("x"),
                TokenKind::Eq,
                ident("y"),
                TokenKind::Semicolon,
            ]
        );
    }

    #[test]
    fn test_underscore_starts_ident() {
        assert_eq!(kinds("_tmp _1"), vec![ident("_tmp"), ident("_1")]);
    }

    #[test]
    fn test_integers_in_all_bases() {
        assert_eq!(
            kinds("42 0xff 0o17 0b1010 1_000_000"),
            vec![
                TokenKind::Int(42),
                TokenKind::Int(255),
                TokenKind::Int(15),
                TokenKind::Int(10),
                TokenKind::Int(1_000_000),
            ]
        );
    }

    #[test]
    fn test_string_with_escapes() {
        assert_eq!(
            kinds(r#""a\nb\t\"c\"""#),
            vec![TokenKind::Str("a\nb\t\"c\"".to_string())]
        );
    }

    #[test]
    fn test_char_literals() {
        assert_eq!(
            kinds(r"'a' '\n' '\''"),
            vec![
                TokenKind::Char('a'),
                TokenKind::Char('\n'),
                TokenKind::Char('\''),
            ]
        );
    }

    #[test]
    fn test_multi_char_punct() {
        assert_eq!(
            kinds("-> => == != <= >= && || < > ! - ="),
            vec![
                TokenKind::Arrow,
                TokenKind::FatArrow,
                TokenKind::EqEq,
                TokenKind::NotEq,
                TokenKind::LtEq,
                TokenKind::GtEq,
                TokenKind::AndAnd,
                TokenKind::OrOr,
                TokenKind::Lt,
                TokenKind::Gt,
                TokenKind::Not,
                TokenKind::Minus,
                TokenKind::Eq,
            ]
        );
    }

    #[test]
    fn test_comments_are_skipped() {
        assert_eq!(
            kinds("a // rest of line\nb /* inline */ c"),
            vec![ident("a"), ident("b"), ident("c")]
        );
    }

    #[test]
    fn test_block_comments_nest() {
        assert_eq!(kinds("a /* x /* y */ z */ b"), vec![ident("a"), ident("b")]);
    }

    #[test]
    fn test_token_spans() {
        let (tokens, _) = lex("ab  0xff");
        assert_eq!(tokens[0].span.start, 0);
        assert_eq!(tokens[0].span.end, 2);
        assert_eq!(tokens[1].span.start, 4);
        assert_eq!(tokens[1].span.end, 8);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(kinds(""), vec![]);
        assert_eq!(kinds("   \n\t  "), vec![]);
    }

    // ═══════════════════════════════════════════════════════════════════
    // Reports and Recovery
    // ═══════════════════════════════════════════════════════════════════

    #[test]
    fn test_unexpected_character_keeps_lexing() {
        let (tokens, sink) = lex("a $ b");
        assert_eq!(
            tokens.iter().map(|t| t.kind.clone()).collect::<Vec<_>>(),
            vec![ident("a"), ident("b")]
        );
        assert_eq!(sink.count(Level::Error), 1);
        assert_eq!(sink.reports()[0].kind, ReportKind::UnexpectedCharacter);
    }

    #[test]
    fn test_unterminated_string() {
        let (tokens, sink) = lex("\"abc");
        assert_eq!(tokens[0].kind, TokenKind::Str("abc".to_string()));
        assert_eq!(sink.reports()[0].kind, ReportKind::UnterminatedStringLiteral);
    }

    #[test]
    fn test_invalid_escape_recovers() {
        let (tokens, sink) = lex(r#""a\qb""#);
        // the raw character is kept and lexing continues to the close quote
        assert_eq!(tokens[0].kind, TokenKind::Str("aqb".to_string()));
        assert_eq!(sink.reports()[0].kind, ReportKind::InvalidEscapeSequence);
        assert_eq!(sink.count(Level::Error), 1);
    }

    #[test]
    fn test_empty_char_literal() {
        let (tokens, sink) = lex("''");
        assert!(tokens.is_empty());
        assert_eq!(sink.reports()[0].kind, ReportKind::EmptyCharLiteral);
    }

    #[test]
    fn test_unterminated_char_literal() {
        let (tokens, sink) = lex("'ab");
        assert_eq!(tokens[0].kind, TokenKind::Char('a'));
        assert_eq!(sink.reports()[0].kind, ReportKind::UnterminatedCharLiteral);
    }

    #[test]
    fn test_unterminated_block_comment() {
        let (tokens, sink) = lex("a /* never closed");
        assert_eq!(tokens, {
            let (expected, _) = lex("a");
            expected
        });
        assert_eq!(sink.reports()[0].kind, ReportKind::UnterminatedBlockComment);
    }

    #[test]
    fn test_integer_overflow() {
        // one past u64::MAX
        let (tokens, sink) = lex("18446744073709551616");
        assert_eq!(tokens[0].kind, TokenKind::Int(u64::MAX));
        assert_eq!(sink.reports()[0].kind, ReportKind::IntegerLiteralOverflow);
    }

    #[test]
    fn test_missing_digits_after_prefix() {
        let (tokens, sink) = lex("0x");
        assert_eq!(tokens[0].kind, TokenKind::Int(0));
        assert_eq!(sink.reports()[0].kind, ReportKind::UnexpectedCharacter);
        assert!(sink.reports()[0].title.contains("0x"));
    }

    #[test]
    fn test_multiple_reports_accumulate() {
        let (_, sink) = lex("$ § \"open");
        assert_eq!(sink.count(Level::Error), 3);
        assert!(!sink.ok());
    }
}
