use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, strum::IntoStaticStr, strum::EnumIter)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenKind {
    // Single-character tokens
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    Comma,
    Dot,
    Minus,
    Plus,
    Semicolon,
    Slash,
    Star,

    // One or two character tokens
    Bang,
    BangEqual,
    Equal,
    EqualEqual,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,

    // Literals
    Identifier,
    String,
    Number,

    // Keywords
    And,
    Class,
    Else,
    False,
    Fun,
    For,
    If,
    Nil,
    Or,
    Print,
    Return,
    Super,
    This,
    True,
    Var,
    While,

    Eof,
}

impl TokenKind {
    /// Upper-case name of the kind, e.g. `LEFT_PAREN` or `EOF`.
    pub fn name(self) -> &'static str {
        self.into()
    }

    pub fn is_keyword(self) -> bool {
        KEYWORDS.values().any(|&kind| kind == self)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LeftParen => write!(f, "("),
            Self::RightParen => write!(f, ")"),
            Self::LeftBrace => write!(f, "{{"),
            Self::RightBrace => write!(f, "}}"),
            Self::Comma => write!(f, ","),
            Self::Dot => write!(f, "."),
            Self::Minus => write!(f, "-"),
            Self::Plus => write!(f, "+"),
            Self::Semicolon => write!(f, ";"),
            Self::Slash => write!(f, "/"),
            Self::Star => write!(f, "*"),
            Self::Bang => write!(f, "!"),
            Self::BangEqual => write!(f, "!="),
            Self::Equal => write!(f, "="),
            Self::EqualEqual => write!(f, "=="),
            Self::Greater => write!(f, ">"),
            Self::GreaterEqual => write!(f, ">="),
            Self::Less => write!(f, "<"),
            Self::LessEqual => write!(f, "<="),
            Self::Identifier => write!(f, "IDENTIFIER"),
            Self::String => write!(f, "STRING"),
            Self::Number => write!(f, "NUMBER"),
            Self::And => write!(f, "and"),
            Self::Class => write!(f, "class"),
            Self::Else => write!(f, "else"),
            Self::False => write!(f, "false"),
            Self::Fun => write!(f, "fun"),
            Self::For => write!(f, "for"),
            Self::If => write!(f, "if"),
            Self::Nil => write!(f, "nil"),
            Self::Or => write!(f, "or"),
            Self::Print => write!(f, "print"),
            Self::Return => write!(f, "return"),
            Self::Super => write!(f, "super"),
            Self::This => write!(f, "this"),
            Self::True => write!(f, "true"),
            Self::Var => write!(f, "var"),
            Self::While => write!(f, "while"),
            Self::Eof => write!(f, "EOF"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    pub offset: usize,
    pub len: usize,
}

impl Span {
    pub fn new(offset: usize, len: usize) -> Self {
        Self { offset, len }
    }

    pub fn end(&self) -> usize {
        self.offset + self.len
    }
}

impl From<Span> for miette::SourceSpan {
    fn from(span: Span) -> Self {
        miette::SourceSpan::new(span.offset.into(), span.len)
    }
}

/// Decoded value carried by `STRING` and `NUMBER` tokens.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Literal {
    String(String),
    Number(f64),
}

impl Literal {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            Self::Number(_) => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::String(_) => None,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write!(f, "{s}"),
            // `{:?}` keeps the fractional part, so 123 prints as 123.0
            Self::Number(n) => write!(f, "{n:?}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub literal: Option<Literal>,
    pub line: usize,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, span: Span, line: usize) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            literal: None,
            line,
            span,
        }
    }

    pub fn with_literal(mut self, literal: Literal) -> Self {
        self.literal = Some(literal);
        self
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.literal {
            Some(literal) => write!(f, "{} {} {}", self.kind.name(), self.lexeme, literal),
            None => write!(f, "{} {} null", self.kind.name(), self.lexeme),
        }
    }
}

static KEYWORDS: LazyLock<HashMap<&'static str, TokenKind>> = LazyLock::new(|| {
    HashMap::from([
        ("and", TokenKind::And),
        ("class", TokenKind::Class),
        ("else", TokenKind::Else),
        ("false", TokenKind::False),
        ("fun", TokenKind::Fun),
        ("for", TokenKind::For),
        ("if", TokenKind::If),
        ("nil", TokenKind::Nil),
        ("or", TokenKind::Or),
        ("print", TokenKind::Print),
        ("return", TokenKind::Return),
        ("super", TokenKind::Super),
        ("this", TokenKind::This),
        ("true", TokenKind::True),
        ("var", TokenKind::Var),
        ("while", TokenKind::While),
    ])
});

/// Reserved-word kind for an identifier lexeme. Matching is exact and
/// case-sensitive.
pub fn keyword_kind(ident: &str) -> Option<TokenKind> {
    KEYWORDS.get(ident).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn kind_names_are_screaming_snake_case() {
        assert_eq!(TokenKind::LeftParen.name(), "LEFT_PAREN");
        assert_eq!(TokenKind::BangEqual.name(), "BANG_EQUAL");
        assert_eq!(TokenKind::GreaterEqual.name(), "GREATER_EQUAL");
        assert_eq!(TokenKind::Identifier.name(), "IDENTIFIER");
        assert_eq!(TokenKind::Eof.name(), "EOF");
    }

    #[test]
    fn keyword_table_has_sixteen_entries() {
        let keywords: Vec<TokenKind> = TokenKind::iter().filter(|k| k.is_keyword()).collect();
        assert_eq!(keywords.len(), 16);
        for kind in keywords {
            assert_eq!(keyword_kind(&kind.to_string()), Some(kind));
        }
    }

    #[test]
    fn keyword_lookup_is_case_sensitive() {
        assert_eq!(keyword_kind("while"), Some(TokenKind::While));
        assert_eq!(keyword_kind("While"), None);
        assert_eq!(keyword_kind("WHILE"), None);
        assert_eq!(keyword_kind("whilst"), None);
    }

    #[test]
    fn token_display_matches_dump_format() {
        let number = Token::new(TokenKind::Number, "12", Span::new(0, 2), 1)
            .with_literal(Literal::Number(12.0));
        assert_eq!(number.to_string(), "NUMBER 12 12.0");

        let string = Token::new(TokenKind::String, "\"hi\"", Span::new(0, 4), 1)
            .with_literal(Literal::String("hi".to_string()));
        assert_eq!(string.to_string(), "STRING \"hi\" hi");

        let eof = Token::new(TokenKind::Eof, "", Span::new(4, 0), 1);
        assert_eq!(eof.to_string(), "EOF  null");
    }

    #[test]
    fn token_serializes_kind_by_name() {
        let token = Token::new(TokenKind::LeftParen, "(", Span::new(0, 1), 3);
        let json = serde_json::to_value(&token).expect("token should serialize");
        assert_eq!(json["kind"], "LEFT_PAREN");
        assert_eq!(json["line"], 3);
        assert!(json["literal"].is_null());
    }

    #[test]
    fn span_converts_to_source_span() {
        let span = Span::new(4, 3);
        let source_span: miette::SourceSpan = span.into();
        assert_eq!(source_span.offset(), 4);
        assert_eq!(source_span.len(), 3);
        assert_eq!(span.end(), 7);
    }
}
