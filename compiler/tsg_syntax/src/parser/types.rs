//! Type expressions and attribute lists.

use smallvec::SmallVec;
use tsg_ir::ast::{Attribute, AttributeList, NameSegment, TypeExpr, TypeExprKind};
use tsg_ir::Span;

use crate::lexer::{self, TokenKind};

use super::{ParseError, Parser};

impl Parser<'_> {
    /// Zero or more `[...]` attribute lists.
    pub(super) fn parse_attribute_lists(&mut self) -> Result<Vec<AttributeList>, ParseError> {
        let mut lists = Vec::new();
        while self.at(TokenKind::LBracket) {
            let open = self.bump();
            let target = if self.at(TokenKind::Ident) && self.peek_kind(1) == TokenKind::Colon {
                let target = self.current_text().to_string();
                self.bump();
                self.bump();
                Some(target)
            } else {
                None
            };

            let mut attributes = SmallVec::new();
            while !self.at(TokenKind::RBracket) {
                let name = self.parse_type_expr()?;
                let start = name.span.start;
                if self.at(TokenKind::LParen) {
                    self.skip_balanced()?;
                }
                attributes.push(Attribute {
                    name,
                    span: self.span_from(start),
                });
                if self.eat(TokenKind::Comma).is_none() {
                    break;
                }
            }
            let close = self.expect(TokenKind::RBracket, "`]`")?;
            lists.push(AttributeList {
                target,
                attributes,
                span: open.span.merge(close.span),
            });
        }
        Ok(lists)
    }

    /// A type: name, generic name, qualified name, keyword type, tuple,
    /// with optional `?`, `[]` and `*` suffixes.
    pub(super) fn parse_type_expr(&mut self) -> Result<TypeExpr, ParseError> {
        let start = self.current().span.start;
        let mut expr = match self.kind() {
            TokenKind::Predefined => {
                let token = self.bump();
                TypeExpr {
                    kind: TypeExprKind::Predefined(self.text(token).to_string()),
                    span: token.span,
                }
            }
            TokenKind::LParen => self.parse_tuple_type()?,
            TokenKind::Ident => self.parse_path()?,
            _ => return Err(self.error_here("a type")),
        };

        loop {
            match self.kind() {
                TokenKind::Question => {
                    self.bump();
                    expr = TypeExpr {
                        kind: TypeExprKind::Nullable(Box::new(expr)),
                        span: self.span_from(start),
                    };
                }
                TokenKind::LBracket
                    if matches!(self.peek_kind(1), TokenKind::RBracket | TokenKind::Comma) =>
                {
                    self.bump();
                    while self.eat(TokenKind::Comma).is_some() {}
                    self.expect(TokenKind::RBracket, "`]`")?;
                    expr = TypeExpr {
                        kind: TypeExprKind::Array(Box::new(expr)),
                        span: self.span_from(start),
                    };
                }
                // Pointer types are opaque to the rule.
                TokenKind::Op if self.current_text() == "*" => {
                    self.bump();
                }
                _ => return Ok(expr),
            }
        }
    }

    fn parse_tuple_type(&mut self) -> Result<TypeExpr, ParseError> {
        let open = self.bump();
        let mut elements = Vec::new();
        loop {
            elements.push(self.parse_type_expr()?);
            // Element name
            if self.at(TokenKind::Ident) {
                self.bump();
            }
            if self.eat(TokenKind::Comma).is_none() {
                break;
            }
        }
        self.expect(TokenKind::RParen, "`)`")?;
        Ok(TypeExpr {
            kind: TypeExprKind::Tuple(elements),
            span: self.span_from(open.span.start),
        })
    }

    /// `A.B<C>.D`, optionally prefixed by `global::` or `alias::`.
    fn parse_path(&mut self) -> Result<TypeExpr, ParseError> {
        let start = self.current().span.start;
        let mut global = false;
        let mut segments = Vec::new();

        if self.peek_kind(1) == TokenKind::ColonColon {
            let qualifier = self.bump();
            self.bump();
            let name = lexer::ident_name(self.text(qualifier));
            if name == "global" {
                global = true;
            } else {
                segments.push(NameSegment {
                    name: name.to_string(),
                    span: qualifier.span,
                    args: Vec::new(),
                    arg_list_span: None,
                });
            }
        }

        loop {
            let token = self.expect(TokenKind::Ident, "a type name")?;
            let mut segment = NameSegment {
                name: lexer::ident_name(self.text(token)).to_string(),
                span: token.span,
                args: Vec::new(),
                arg_list_span: None,
            };
            if self.at(TokenKind::Lt) {
                let open = self.bump();
                // Unbound generic names such as `Dictionary<,>` carry no arguments.
                if !matches!(self.kind(), TokenKind::Gt | TokenKind::Comma) {
                    loop {
                        segment.args.push(self.parse_type_expr()?);
                        if self.eat(TokenKind::Comma).is_none() {
                            break;
                        }
                    }
                }
                while self.eat(TokenKind::Comma).is_some() {}
                let close = self.expect(TokenKind::Gt, "`,` or `>`")?;
                segment.arg_list_span = Some(open.span.merge(close.span));
            }
            segments.push(segment);

            if self.at(TokenKind::Dot) && self.peek_kind(1) == TokenKind::Ident {
                self.bump();
            } else {
                break;
            }
        }

        Ok(TypeExpr {
            kind: TypeExprKind::Path { global, segments },
            span: Span::new(start, self.prev_end()),
        })
    }
}
