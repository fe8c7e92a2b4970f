//! Recursive descent parser for type declarations.
//!
//! Produces a [`SyntaxTree`] covering namespaces, using directives and type
//! declarations. Member bodies are skipped token by token; identifiers met
//! on the way are attached to the innermost type declaration so rename can
//! find references.
//!
//! # Error Recovery
//!
//! A malformed member is reported and skipped up to the next `;` or closing
//! `}` of a block. Declarations parsed before and after it are kept.

mod error;
mod items;
mod types;

pub use error::ParseError;

use tsg_ir::ast::{CompilationUnit, Ident, SyntaxTree};
use tsg_ir::{FileId, Span};

use crate::lexer::{self, Token, TokenKind};

/// Result of parsing one document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseOutput {
    pub tree: SyntaxTree,
    pub errors: Vec<ParseError>,
}

/// Parse a document.
#[tracing::instrument(level = "debug", skip(source), fields(len = source.len()))]
pub fn parse(file: FileId, source: &str) -> ParseOutput {
    let Some(tokens) = lexer::lex(source) else {
        return ParseOutput {
            tree: SyntaxTree {
                file,
                root: CompilationUnit::default(),
            },
            errors: vec![ParseError::TooLarge { len: source.len() }],
        };
    };

    let mut parser = Parser::new(source, tokens);
    let root = parser.parse_compilation_unit();
    if !parser.errors.is_empty() {
        tracing::debug!(errors = parser.errors.len(), "parsed with errors");
    }
    ParseOutput {
        tree: SyntaxTree { file, root },
        errors: parser.errors,
    }
}

struct Parser<'src> {
    source: &'src str,
    /// Always ends with `Eof`.
    tokens: Vec<Token>,
    pos: usize,
    errors: Vec<ParseError>,
    /// Identifier collectors of the type declarations being parsed,
    /// innermost last.
    ident_sinks: Vec<Vec<Ident>>,
}

impl<'src> Parser<'src> {
    fn new(source: &'src str, tokens: Vec<Token>) -> Self {
        let mut parser = Parser {
            source,
            tokens,
            pos: 0,
            errors: Vec::new(),
            ident_sinks: Vec::new(),
        };
        parser.report_invalid_tokens();
        parser
    }

    fn report_invalid_tokens(&mut self) {
        let invalid: Vec<ParseError> = self
            .tokens
            .iter()
            .filter(|token| token.kind == TokenKind::Error)
            .map(|token| ParseError::InvalidToken {
                text: self.text(*token).to_string(),
                span: token.span,
            })
            .collect();
        self.errors.extend(invalid);
    }

    #[inline]
    fn current(&self) -> Token {
        debug_assert!(self.pos < self.tokens.len(), "cursor position out of bounds");
        self.tokens[self.pos]
    }

    #[inline]
    fn kind(&self) -> TokenKind {
        self.current().kind
    }

    /// Kind of the token `n` positions ahead.
    fn peek_kind(&self, n: usize) -> TokenKind {
        self.tokens
            .get(self.pos + n)
            .map_or(TokenKind::Eof, |token| token.kind)
    }

    fn text(&self, token: Token) -> &'src str {
        token.span.text(self.source)
    }

    fn current_text(&self) -> &'src str {
        self.text(self.current())
    }

    #[inline]
    fn at(&self, kind: TokenKind) -> bool {
        self.kind() == kind
    }

    /// At the contextual keyword `word`.
    fn at_word(&self, word: &str) -> bool {
        self.at(TokenKind::Ident) && self.current_text() == word
    }

    /// Consume the current token. `Eof` is never consumed.
    fn bump(&mut self) -> Token {
        let token = self.current();
        if token.kind == TokenKind::Eof {
            return token;
        }
        self.pos += 1;
        if token.kind == TokenKind::Ident {
            let name = lexer::ident_name(self.text(token)).to_string();
            if let Some(sink) = self.ident_sinks.last_mut() {
                sink.push(Ident {
                    name,
                    span: token.span,
                });
            }
        }
        token
    }

    fn eat(&mut self, kind: TokenKind) -> Option<Token> {
        if self.at(kind) {
            Some(self.bump())
        } else {
            None
        }
    }

    fn expect(&mut self, kind: TokenKind, expected: &'static str) -> Result<Token, ParseError> {
        self.eat(kind).ok_or_else(|| self.error_here(expected))
    }

    fn error_here(&self, expected: &'static str) -> ParseError {
        let token = self.current();
        let found = if token.kind == TokenKind::Eof {
            "end of file".to_string()
        } else {
            format!("`{}`", self.text(token))
        };
        ParseError::Expected {
            expected,
            found,
            span: token.span,
        }
    }

    /// End offset of the last consumed token.
    fn prev_end(&self) -> u32 {
        self.pos
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map_or(0, |token| token.span.end)
    }

    /// Consume a bracketed group starting at the current opening delimiter,
    /// through its matching close.
    fn skip_balanced(&mut self) -> Result<(), ParseError> {
        let open = self.bump();
        let mut stack = vec![closer_of(open.kind)];
        while let Some(&expected) = stack.last() {
            let token = self.current();
            match token.kind {
                TokenKind::Eof => {
                    return Err(ParseError::Unclosed {
                        delimiter: delimiter_char(open.kind),
                        span: open.span,
                    });
                }
                TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace => {
                    stack.push(closer_of(token.kind));
                }
                TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace => {
                    if token.kind == expected {
                        stack.pop();
                    }
                }
                _ => {}
            }
            self.bump();
        }
        Ok(())
    }

    fn span_from(&self, start: u32) -> Span {
        Span::new(start, self.prev_end().max(start))
    }
}

fn closer_of(open: TokenKind) -> TokenKind {
    match open {
        TokenKind::LParen => TokenKind::RParen,
        TokenKind::LBracket => TokenKind::RBracket,
        _ => TokenKind::RBrace,
    }
}

fn delimiter_char(open: TokenKind) -> char {
    match open {
        TokenKind::LParen => '(',
        TokenKind::LBracket => '[',
        _ => '{',
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
