//! Lexer for the declaration language.
//!
//! `RawToken` is the logos-derived tokenizer output. Trivia (whitespace,
//! comments, preprocessor lines) is dropped; the parser only sees
//! significant tokens. Contextual keywords (`record`, `partial`, `where`,
//! `global`, ...) are lexed as identifiers.

use logos::{Lexer, Logos};
use tsg_ir::Span;

/// Raw token from logos.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f]+")]
enum RawToken {
    #[regex(r"//[^\n]*")]
    LineComment,
    #[token("/*", block_comment)]
    BlockComment,
    #[regex(r"#[^\n]*")]
    Directive,

    #[token("namespace")]
    Namespace,
    #[token("using")]
    Using,
    #[token("static")]
    Static,
    #[token("class")]
    Class,
    #[token("struct")]
    Struct,
    #[token("interface")]
    Interface,
    #[token("enum")]
    Enum,
    #[token("delegate")]
    Delegate,
    #[token("in")]
    In,
    #[token("out")]
    Out,
    #[token("new")]
    New,

    #[token("public")]
    #[token("private")]
    #[token("protected")]
    #[token("internal")]
    #[token("abstract")]
    #[token("sealed")]
    #[token("readonly")]
    #[token("unsafe")]
    #[token("virtual")]
    #[token("override")]
    #[token("extern")]
    #[token("volatile")]
    #[token("const")]
    #[token("ref")]
    Modifier,

    #[token("bool")]
    #[token("byte")]
    #[token("sbyte")]
    #[token("char")]
    #[token("decimal")]
    #[token("double")]
    #[token("float")]
    #[token("int")]
    #[token("uint")]
    #[token("long")]
    #[token("ulong")]
    #[token("short")]
    #[token("ushort")]
    #[token("object")]
    #[token("string")]
    #[token("void")]
    Predefined,

    #[regex(r"@?[\p{L}\p{Nl}_][\p{L}\p{Nl}\p{Nd}\p{Mn}\p{Mc}\p{Pc}\p{Cf}]*")]
    Ident,

    #[regex(r#"\$*""""*"#, raw_string)]
    #[regex(r#""([^"\\\n]|\\.)*""#)]
    #[regex(r#"@"([^"]|"")*""#)]
    #[regex(r#"\$@?"([^"\\\n]|\\.)*""#)]
    Str,
    #[regex(r"'([^'\\\n]|\\.)+'")]
    Char,
    #[regex(r"[0-9][0-9a-zA-Z_]*(\.[0-9][0-9a-zA-Z_]*)?")]
    Number,

    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token(";")]
    Semi,
    #[token("::")]
    ColonColon,
    #[token(":")]
    Colon,
    #[token("?")]
    Question,
    #[token("=>")]
    Arrow,
    #[token("=")]
    Eq,
    #[regex(r"[+\-*/%&|\^!~$@]")]
    Op,
}

/// Skip to the first `*/`. C# block comments do not nest.
fn block_comment(lex: &mut Lexer<RawToken>) -> bool {
    match lex.remainder().find("*/") {
        Some(end) => {
            lex.bump(end + 2);
            true
        }
        None => false,
    }
}

/// Raw string literal: closed by as many quotes as opened it.
fn raw_string(lex: &mut Lexer<RawToken>) -> bool {
    let quotes = lex.slice().bytes().filter(|&b| b == b'"').count();
    let closing = "\"".repeat(quotes);
    match lex.remainder().find(&closing) {
        Some(end) => {
            lex.bump(end + quotes);
            true
        }
        None => false,
    }
}

/// Token kinds seen by the parser.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Ident,
    Namespace,
    Using,
    Static,
    Class,
    Struct,
    Interface,
    Enum,
    Delegate,
    In,
    Out,
    New,
    Modifier,
    Predefined,
    Str,
    Char,
    Number,
    LBrace,
    RBrace,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Lt,
    Gt,
    Comma,
    Dot,
    Semi,
    ColonColon,
    Colon,
    Question,
    Arrow,
    Eq,
    Op,
    /// A character the lexer does not recognize.
    Error,
    Eof,
}

impl TokenKind {
    /// Whether the token is a reserved word.
    pub fn is_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::Namespace
                | TokenKind::Using
                | TokenKind::Static
                | TokenKind::Class
                | TokenKind::Struct
                | TokenKind::Interface
                | TokenKind::Enum
                | TokenKind::Delegate
                | TokenKind::In
                | TokenKind::Out
                | TokenKind::New
                | TokenKind::Modifier
                | TokenKind::Predefined
        )
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

/// Reserved words that cannot be used as plain identifiers.
pub const RESERVED_KEYWORDS: &[&str] = &[
    "abstract", "as", "base", "bool", "break", "byte", "case", "catch", "char", "checked",
    "class", "const", "continue", "decimal", "default", "delegate", "do", "double", "else",
    "enum", "event", "explicit", "extern", "false", "finally", "fixed", "float", "for",
    "foreach", "goto", "if", "implicit", "in", "int", "interface", "internal", "is", "lock",
    "long", "namespace", "new", "null", "object", "operator", "out", "override", "params",
    "private", "protected", "public", "readonly", "ref", "return", "sbyte", "sealed", "short",
    "sizeof", "stackalloc", "static", "string", "struct", "switch", "this", "throw", "true",
    "try", "typeof", "uint", "ulong", "unchecked", "unsafe", "ushort", "using", "virtual",
    "void", "volatile", "while",
];

/// Whether `name` is usable as an identifier (without an `@` escape).
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_alphabetic() || first == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_')
        && !RESERVED_KEYWORDS.contains(&name)
}

/// Identifier name without a verbatim `@` prefix.
pub fn ident_name(text: &str) -> &str {
    text.strip_prefix('@').unwrap_or(text)
}

/// Lex `source` into significant tokens, always ending with `Eof`.
///
/// Returns `None` only if the source does not fit in `u32` offsets.
pub fn lex(source: &str) -> Option<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut lexer = RawToken::lexer(source);

    while let Some(result) = lexer.next() {
        let span = Span::try_from_range(lexer.span()).ok()?;
        let kind = match result {
            Ok(
                RawToken::LineComment | RawToken::BlockComment | RawToken::Directive,
            ) => continue,
            Ok(raw) => convert(raw),
            // Byte order mark
            Err(()) if lexer.slice() == "\u{feff}" => continue,
            Err(()) => TokenKind::Error,
        };
        tokens.push(Token { kind, span });
    }

    let eof = u32::try_from(source.len()).ok()?;
    tokens.push(Token {
        kind: TokenKind::Eof,
        span: Span::point(eof),
    });
    Some(tokens)
}

fn convert(raw: RawToken) -> TokenKind {
    match raw {
        RawToken::Namespace => TokenKind::Namespace,
        RawToken::Using => TokenKind::Using,
        RawToken::Static => TokenKind::Static,
        RawToken::Class => TokenKind::Class,
        RawToken::Struct => TokenKind::Struct,
        RawToken::Interface => TokenKind::Interface,
        RawToken::Enum => TokenKind::Enum,
        RawToken::Delegate => TokenKind::Delegate,
        RawToken::In => TokenKind::In,
        RawToken::Out => TokenKind::Out,
        RawToken::New => TokenKind::New,
        RawToken::Modifier => TokenKind::Modifier,
        RawToken::Predefined => TokenKind::Predefined,
        RawToken::Ident => TokenKind::Ident,
        RawToken::Str => TokenKind::Str,
        RawToken::Char => TokenKind::Char,
        RawToken::Number => TokenKind::Number,
        RawToken::LBrace => TokenKind::LBrace,
        RawToken::RBrace => TokenKind::RBrace,
        RawToken::LParen => TokenKind::LParen,
        RawToken::RParen => TokenKind::RParen,
        RawToken::LBracket => TokenKind::LBracket,
        RawToken::RBracket => TokenKind::RBracket,
        RawToken::Lt => TokenKind::Lt,
        RawToken::Gt => TokenKind::Gt,
        RawToken::Comma => TokenKind::Comma,
        RawToken::Dot => TokenKind::Dot,
        RawToken::Semi => TokenKind::Semi,
        RawToken::ColonColon => TokenKind::ColonColon,
        RawToken::Colon => TokenKind::Colon,
        RawToken::Question => TokenKind::Question,
        RawToken::Arrow => TokenKind::Arrow,
        RawToken::Eq => TokenKind::Eq,
        RawToken::Op => TokenKind::Op,
        RawToken::LineComment | RawToken::BlockComment | RawToken::Directive => {
            TokenKind::Error
        }
    }
}
