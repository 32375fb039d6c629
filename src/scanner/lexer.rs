use tracing::{debug, trace};
use winnow::error::ContextError;
use winnow::prelude::*;
use winnow::stream::{LocatingSlice, Location};
use winnow::token::{any, literal, take_till, take_while};

use crate::error::{ErrorSink, ScanError, ScanErrorKind};
use crate::scanner::options::ScanOptions;
use crate::scanner::token::{Literal, Span, Token, TokenKind, keyword_kind};

type Input<'a> = LocatingSlice<&'a str>;

/// Single-pass scanner over one source string.
///
/// The cursor is the input's location (next unconsumed byte), `start` marks
/// where the current lexeme began and `line` counts every `\n` consumed so
/// far, including those inside strings and block comments. A lexer is built
/// for one source, run once with [`Lexer::scan_tokens`], and dropped.
pub struct Lexer<'src, 'sink> {
    source: &'src str,
    input: Input<'src>,
    options: ScanOptions,
    start: usize,
    line: usize,
    tokens: Vec<Token>,
    sink: &'sink mut dyn ErrorSink,
}

impl<'src, 'sink> Lexer<'src, 'sink> {
    pub fn new(source: &'src str, sink: &'sink mut dyn ErrorSink) -> Self {
        Self::with_options(source, ScanOptions::default(), sink)
    }

    pub fn with_options(
        source: &'src str,
        options: ScanOptions,
        sink: &'sink mut dyn ErrorSink,
    ) -> Self {
        Self {
            source,
            input: LocatingSlice::new(source),
            options,
            start: 0,
            line: 1,
            tokens: Vec::new(),
            sink,
        }
    }

    /// Scan the whole source. Always returns a token list ending in `EOF`;
    /// malformed input goes to the error sink and contributes no token.
    pub fn scan_tokens(mut self) -> Vec<Token> {
        if self.options.skip_shebang {
            self.shebang();
        }

        while !self.is_at_end() {
            self.start = self.current();
            self.scan_token();
        }

        let eof = Token::new(
            TokenKind::Eof,
            "",
            Span::new(self.source.len(), 0),
            self.line,
        );
        self.tokens.push(eof);
        trace!(tokens = self.tokens.len(), lines = self.line, "scan complete");
        self.tokens
    }

    fn scan_token(&mut self) {
        let Some(c) = self.advance() else {
            return;
        };
        match c {
            '(' => self.add_token(TokenKind::LeftParen),
            ')' => self.add_token(TokenKind::RightParen),
            '{' => self.add_token(TokenKind::LeftBrace),
            '}' => self.add_token(TokenKind::RightBrace),
            ',' => self.add_token(TokenKind::Comma),
            '.' => self.add_token(TokenKind::Dot),
            '-' => self.add_token(TokenKind::Minus),
            '+' => self.add_token(TokenKind::Plus),
            ';' => self.add_token(TokenKind::Semicolon),
            '*' => self.add_token(TokenKind::Star),
            '!' => self.one_or_two(TokenKind::Bang, TokenKind::BangEqual),
            '=' => self.one_or_two(TokenKind::Equal, TokenKind::EqualEqual),
            '<' => self.one_or_two(TokenKind::Less, TokenKind::LessEqual),
            '>' => self.one_or_two(TokenKind::Greater, TokenKind::GreaterEqual),
            '/' => {
                if self.match_char('/') {
                    self.line_comment();
                } else if self.match_char('*') {
                    self.block_comment();
                } else {
                    self.add_token(TokenKind::Slash);
                }
            }
            ' ' | '\t' | '\r' => {}
            '\n' => self.line += 1,
            '"' => self.string(),
            c if c.is_ascii_digit() => self.number(),
            c if is_identifier_start(c) => self.identifier(),
            c => self.error(ScanErrorKind::UnexpectedCharacter(c)),
        }
    }

    fn one_or_two(&mut self, single: TokenKind, with_equal: TokenKind) {
        let kind = if self.match_char('=') {
            with_equal
        } else {
            single
        };
        self.add_token(kind);
    }

    fn shebang(&mut self) {
        let skipped: Result<(), ContextError> = ("#!", take_till(0.., '\n'))
            .void()
            .parse_next(&mut self.input);
        if skipped.is_ok() {
            trace!("skipped shebang line");
        }
    }

    // Stops before the newline so the main loop counts it.
    fn line_comment(&mut self) {
        self.eat_while(|c| c != '\n');
    }

    fn block_comment(&mut self) {
        let mut depth = 1usize;
        loop {
            let skipped = self.eat_while(|c| c != '*' && c != '/');
            self.line += count_newlines(skipped);

            // `*/` must be tested as a pair: in `**/` the first `*` is
            // consumed alone and the closer starts one position later.
            if self.match_pair("*/") {
                depth -= 1;
                if depth == 0 {
                    return;
                }
            } else if self.options.nested_comments && self.match_pair("/*") {
                depth += 1;
            } else if self.advance().is_none() {
                self.error(ScanErrorKind::UnterminatedComment);
                return;
            }
        }
    }

    fn string(&mut self) {
        let body = self.eat_while(|c| c != '"');
        self.line += count_newlines(body);

        if !self.match_char('"') {
            self.error(ScanErrorKind::UnterminatedString);
            return;
        }
        self.add_literal_token(TokenKind::String, Literal::String(body.to_string()));
    }

    fn number(&mut self) {
        self.eat_while(|c| c.is_ascii_digit());

        // A `.` only belongs to the number when a digit follows it.
        if self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
            self.eat_while(|c| c.is_ascii_digit());
        }

        let value: f64 = self
            .lexeme()
            .parse()
            .expect("digits with an optional fraction always parse as f64");
        self.add_literal_token(TokenKind::Number, Literal::Number(value));
    }

    fn identifier(&mut self) {
        self.eat_while(is_identifier_continue);
        let kind = keyword_kind(self.lexeme()).unwrap_or(TokenKind::Identifier);
        self.add_token(kind);
    }

    fn error(&mut self, kind: ScanErrorKind) {
        debug!(line = self.line, offset = self.start, error = %kind, "scan error");
        self.sink.report(ScanError::new(kind, self.line, self.span()));
    }

    fn add_token(&mut self, kind: TokenKind) {
        let token = Token::new(kind, self.lexeme(), self.span(), self.line);
        self.tokens.push(token);
    }

    fn add_literal_token(&mut self, kind: TokenKind, literal: Literal) {
        let token = Token::new(kind, self.lexeme(), self.span(), self.line).with_literal(literal);
        self.tokens.push(token);
    }

    fn lexeme(&self) -> &'src str {
        &self.source[self.start..self.current()]
    }

    fn span(&self) -> Span {
        Span::new(self.start, self.current() - self.start)
    }

    fn current(&self) -> usize {
        self.input.current_token_start()
    }

    fn is_at_end(&self) -> bool {
        self.input.is_empty()
    }

    fn advance(&mut self) -> Option<char> {
        any::<_, ContextError>.parse_next(&mut self.input).ok()
    }

    fn peek(&self) -> Option<char> {
        self.input.chars().next()
    }

    fn peek_next(&self) -> Option<char> {
        self.input.chars().nth(1)
    }

    fn match_char(&mut self, expected: char) -> bool {
        literal::<_, _, ContextError>(expected)
            .parse_next(&mut self.input)
            .is_ok()
    }

    // Consumes both characters or neither.
    fn match_pair(&mut self, pair: &'static str) -> bool {
        literal::<_, _, ContextError>(pair)
            .parse_next(&mut self.input)
            .is_ok()
    }

    fn eat_while(&mut self, predicate: impl Fn(char) -> bool) -> &'src str {
        take_while::<_, _, ContextError>(0.., predicate)
            .parse_next(&mut self.input)
            .unwrap_or_default()
    }
}

fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_identifier_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn count_newlines(text: &str) -> usize {
    text.bytes().filter(|&b| b == b'\n').count()
}
