//! Namespaces, using directives, type declarations and member skipping.

use tsg_ir::ast::{
    AttributeList, CompilationUnit, Member, NamespaceDecl, TypeDecl, TypeKind, TypeParam,
    UsingDirective, UsingKind, Variance,
};
use tsg_ir::Span;

use crate::lexer::{self, TokenKind};

use super::{ParseError, Parser};

/// Contextual keywords accepted as modifiers when another word follows.
const CONTEXTUAL_MODIFIERS: &[&str] = &["partial", "file", "required", "async"];

impl Parser<'_> {
    pub(super) fn parse_compilation_unit(&mut self) -> CompilationUnit {
        let mut unit = CompilationUnit::default();
        loop {
            self.parse_members(&mut unit.usings, &mut unit.members);
            if self.at(TokenKind::RBrace) {
                let stray = self.error_here("a namespace or type declaration");
                self.errors.push(stray);
                self.bump();
            } else {
                break;
            }
        }
        unit
    }

    /// Parse namespace-level members up to a closing `}` or end of file.
    fn parse_members(&mut self, usings: &mut Vec<UsingDirective>, members: &mut Vec<Member>) {
        loop {
            let before = self.pos;
            match self.kind() {
                TokenKind::Eof | TokenKind::RBrace => break,
                TokenKind::Semi => {
                    self.bump();
                }
                TokenKind::Using => self.push_using(usings),
                TokenKind::Ident
                    if self.at_word("global") && self.peek_kind(1) == TokenKind::Using =>
                {
                    self.push_using(usings);
                }
                TokenKind::Modifier
                    if self.current_text() == "extern" && self.peek_kind(1) == TokenKind::Ident =>
                {
                    // extern alias
                    self.skip_to_semi();
                }
                _ => match self.parse_member() {
                    Ok(Some(member)) => members.push(member),
                    Ok(None) => {}
                    Err(err) => {
                        self.errors.push(err);
                        self.skip_member();
                    }
                },
            }
            if self.pos == before && !matches!(self.kind(), TokenKind::Eof | TokenKind::RBrace) {
                self.bump();
            }
        }
    }

    fn push_using(&mut self, usings: &mut Vec<UsingDirective>) {
        match self.parse_using() {
            Ok(using) => usings.push(using),
            Err(err) => {
                self.errors.push(err);
                self.skip_to_semi();
            }
        }
    }

    fn parse_using(&mut self) -> Result<UsingDirective, ParseError> {
        let start = self.current().span.start;
        let is_global = if self.at_word("global") {
            self.bump();
            true
        } else {
            false
        };
        self.expect(TokenKind::Using, "`using`")?;

        let mut alias = None;
        let kind = if self.eat(TokenKind::Static).is_some() {
            UsingKind::Static
        } else if self.at(TokenKind::Ident) && self.peek_kind(1) == TokenKind::Eq {
            let name = self.bump();
            alias = Some(lexer::ident_name(self.text(name)).to_string());
            self.bump();
            UsingKind::Alias
        } else {
            UsingKind::Namespace
        };

        let target = self.parse_type_expr()?;
        let target_text = target
            .dotted_name()
            .unwrap_or_else(|| target.span.text(self.source).to_string());
        self.expect(TokenKind::Semi, "`;`")?;

        Ok(UsingDirective {
            kind,
            is_global,
            alias,
            target: target_text,
            target_span: target.span,
            span: self.span_from(start),
        })
    }

    /// A namespace-level member. `Ok(None)` for members the tree does not
    /// model (enums, delegates, assembly attributes).
    fn parse_member(&mut self) -> Result<Option<Member>, ParseError> {
        let start = self.current().span.start;
        let attributes = self.parse_attribute_lists()?;
        let modifiers = self.parse_modifiers();

        match self.kind() {
            TokenKind::Namespace => Ok(Some(Member::Namespace(self.parse_namespace(start)?))),
            TokenKind::Class | TokenKind::Struct | TokenKind::Interface => Ok(Some(Member::Type(
                self.parse_type_decl(start, attributes, modifiers)?,
            ))),
            TokenKind::Ident if self.at_record() => Ok(Some(Member::Type(
                self.parse_type_decl(start, attributes, modifiers)?,
            ))),
            TokenKind::Enum => {
                self.skip_enum()?;
                Ok(None)
            }
            TokenKind::Delegate => {
                self.skip_delegate();
                Ok(None)
            }
            _ if !attributes.is_empty()
                && modifiers.is_empty()
                && attributes.iter().all(|list| list.target.is_some()) =>
            {
                Ok(None)
            }
            _ => Err(self.error_here("a namespace or type declaration")),
        }
    }

    fn parse_namespace(&mut self, start: u32) -> Result<NamespaceDecl, ParseError> {
        self.expect(TokenKind::Namespace, "`namespace`")?;
        let first = self.expect(TokenKind::Ident, "a namespace name")?;
        let mut name_span = first.span;
        let mut name = lexer::ident_name(self.text(first)).to_string();
        while self.at(TokenKind::Dot) && self.peek_kind(1) == TokenKind::Ident {
            self.bump();
            let part = self.bump();
            name.push('.');
            name.push_str(lexer::ident_name(self.text(part)));
            name_span = name_span.merge(part.span);
        }

        let mut usings = Vec::new();
        let mut members = Vec::new();
        let file_scoped = self.eat(TokenKind::Semi).is_some();
        if !file_scoped {
            self.expect(TokenKind::LBrace, "`{`")?;
        }
        let body_start = self.prev_end();
        self.parse_members(&mut usings, &mut members);
        if !file_scoped {
            if self.at(TokenKind::RBrace) {
                self.bump();
                self.eat(TokenKind::Semi);
            } else {
                let err = self.error_here("`}`");
                self.errors.push(err);
            }
        }

        Ok(NamespaceDecl {
            name,
            name_span,
            file_scoped,
            usings,
            members,
            span: self.span_from(start),
            body_start,
        })
    }

    fn parse_modifiers(&mut self) -> Vec<String> {
        let mut modifiers = Vec::new();
        loop {
            let is_modifier = match self.kind() {
                TokenKind::Modifier | TokenKind::Static | TokenKind::New => true,
                TokenKind::Ident => {
                    CONTEXTUAL_MODIFIERS.contains(&self.current_text())
                        && (self.peek_kind(1) == TokenKind::Ident || self.peek_kind(1).is_keyword())
                }
                _ => false,
            };
            if !is_modifier {
                return modifiers;
            }
            modifiers.push(self.current_text().to_string());
            self.bump();
        }
    }

    /// At `record`, `record class` or `record struct` introducing a declaration.
    fn at_record(&self) -> bool {
        self.at_word("record")
            && matches!(
                self.peek_kind(1),
                TokenKind::Ident | TokenKind::Class | TokenKind::Struct
            )
    }

    fn at_type_decl(&self) -> bool {
        matches!(
            self.kind(),
            TokenKind::Class | TokenKind::Struct | TokenKind::Interface
        ) || self.at_record()
    }

    fn parse_type_decl(
        &mut self,
        start: u32,
        attributes: Vec<AttributeList>,
        modifiers: Vec<String>,
    ) -> Result<TypeDecl, ParseError> {
        self.ident_sinks.push(Vec::new());
        let result = self.parse_type_decl_inner(start, attributes, modifiers);
        let idents = self.ident_sinks.pop().unwrap_or_default();
        result.map(|decl| TypeDecl { idents, ..decl })
    }

    fn parse_type_decl_inner(
        &mut self,
        start: u32,
        attributes: Vec<AttributeList>,
        modifiers: Vec<String>,
    ) -> Result<TypeDecl, ParseError> {
        let kind = match self.kind() {
            TokenKind::Class => TypeKind::Class,
            TokenKind::Struct => TypeKind::Struct,
            TokenKind::Interface => TypeKind::Interface,
            // `record`, `record class` or `record struct`
            _ => {
                self.bump();
                if self.at(TokenKind::Struct) {
                    TypeKind::RecordStruct
                } else if self.at(TokenKind::Class) {
                    TypeKind::Record
                } else {
                    return self.finish_type_decl(start, TypeKind::Record, attributes, modifiers);
                }
            }
        };
        self.bump();
        self.finish_type_decl(start, kind, attributes, modifiers)
    }

    /// Everything after the kind keyword(s).
    fn finish_type_decl(
        &mut self,
        start: u32,
        kind: TypeKind,
        attributes: Vec<AttributeList>,
        modifiers: Vec<String>,
    ) -> Result<TypeDecl, ParseError> {
        let name_token = self.expect(TokenKind::Ident, "a type name")?;
        let name = lexer::ident_name(self.text(name_token)).to_string();

        let (type_params, type_param_list_span) = if self.at(TokenKind::Lt) {
            self.parse_type_params()?
        } else {
            (Vec::new(), None)
        };

        // Primary constructor parameters
        if self.at(TokenKind::LParen) {
            self.skip_balanced()?;
        }

        let mut base_list = Vec::new();
        if self.eat(TokenKind::Colon).is_some() {
            loop {
                base_list.push(self.parse_type_expr()?);
                // Record base constructor arguments
                if self.at(TokenKind::LParen) {
                    self.skip_balanced()?;
                }
                if self.eat(TokenKind::Comma).is_none() {
                    break;
                }
            }
        }

        while self.at_word("where") {
            self.skip_constraint_clause()?;
        }

        let mut nested = Vec::new();
        match self.kind() {
            TokenKind::LBrace => {
                self.bump();
                self.parse_type_body(&mut nested);
                if self.at(TokenKind::RBrace) {
                    self.bump();
                    self.eat(TokenKind::Semi);
                } else {
                    let err = self.error_here("`}`");
                    self.errors.push(err);
                }
            }
            TokenKind::Semi => {
                self.bump();
            }
            _ => return Err(self.error_here("`{` or `;`")),
        }

        Ok(TypeDecl {
            kind,
            attributes,
            modifiers,
            name,
            name_span: name_token.span,
            type_params,
            type_param_list_span,
            base_list,
            nested,
            idents: Vec::new(),
            span: self.span_from(start),
        })
    }

    fn parse_type_params(&mut self) -> Result<(Vec<TypeParam>, Option<Span>), ParseError> {
        let open = self.bump();
        let mut params = Vec::new();
        loop {
            let attributes = self.parse_attribute_lists()?;
            let start = attributes
                .first()
                .map_or(self.current().span.start, |list| list.span.start);
            let variance = match self.kind() {
                TokenKind::In => Some((Variance::In, self.bump().span)),
                TokenKind::Out => Some((Variance::Out, self.bump().span)),
                _ => None,
            };
            let name_token = self.expect(TokenKind::Ident, "a type parameter name")?;
            params.push(TypeParam {
                attributes,
                variance,
                name: lexer::ident_name(self.text(name_token)).to_string(),
                name_span: name_token.span,
                span: Span::new(start, name_token.span.end),
            });
            if self.eat(TokenKind::Comma).is_none() {
                break;
            }
        }
        let close = self.expect(TokenKind::Gt, "`,` or `>`")?;
        Ok((params, Some(open.span.merge(close.span))))
    }

    /// `where T : class, IFoo<T>, new()`, up to the body or the next clause.
    fn skip_constraint_clause(&mut self) -> Result<(), ParseError> {
        self.bump();
        loop {
            match self.kind() {
                TokenKind::LBrace | TokenKind::Semi | TokenKind::Eof | TokenKind::Arrow => {
                    return Ok(());
                }
                TokenKind::Ident if self.at_word("where") => return Ok(()),
                TokenKind::LParen => self.skip_balanced()?,
                _ => {
                    self.bump();
                }
            }
        }
    }

    fn parse_type_body(&mut self, nested: &mut Vec<TypeDecl>) {
        loop {
            let before = self.pos;
            match self.kind() {
                TokenKind::RBrace | TokenKind::Eof => return,
                TokenKind::Semi => {
                    self.bump();
                }
                _ => match self.parse_body_member() {
                    Ok(Some(decl)) => nested.push(decl),
                    Ok(None) => {}
                    Err(err) => {
                        self.errors.push(err);
                        self.skip_member();
                    }
                },
            }
            if self.pos == before && !matches!(self.kind(), TokenKind::RBrace | TokenKind::Eof) {
                self.bump();
            }
        }
    }

    /// A member of a type body. Only nested type declarations are kept.
    fn parse_body_member(&mut self) -> Result<Option<TypeDecl>, ParseError> {
        let start = self.current().span.start;
        let attributes = self.parse_attribute_lists()?;
        let modifiers = self.parse_modifiers();

        if self.at_type_decl() {
            return self
                .parse_type_decl(start, attributes, modifiers)
                .map(Some);
        }
        match self.kind() {
            TokenKind::Enum => self.skip_enum()?,
            TokenKind::Delegate => self.skip_delegate(),
            _ => self.skip_member(),
        }
        Ok(None)
    }

    fn skip_enum(&mut self) -> Result<(), ParseError> {
        self.bump();
        while !matches!(
            self.kind(),
            TokenKind::LBrace | TokenKind::Semi | TokenKind::Eof
        ) {
            self.bump();
        }
        if self.at(TokenKind::LBrace) {
            self.skip_balanced()?;
        }
        self.eat(TokenKind::Semi);
        Ok(())
    }

    /// Delegates declare their own type parameters, so their identifiers do
    /// not belong to the enclosing declaration.
    fn skip_delegate(&mut self) {
        self.ident_sinks.push(Vec::new());
        self.skip_to_semi();
        self.ident_sinks.pop();
    }

    /// Skip through the next `;` outside of brackets.
    fn skip_to_semi(&mut self) {
        let mut depth = 0usize;
        loop {
            match self.kind() {
                TokenKind::Eof => return,
                TokenKind::RBrace if depth == 0 => return,
                TokenKind::Semi if depth == 0 => {
                    self.bump();
                    return;
                }
                TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace => depth += 1,
                TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace => {
                    depth = depth.saturating_sub(1);
                }
                _ => {}
            }
            self.bump();
        }
    }

    /// Skip one member: through a `;` at depth zero, or through a closing
    /// `}` that brings the depth back to zero (unless an initializer
    /// follows, as in `{ get; } = value;`). Stops before the `}` closing the
    /// enclosing body.
    fn skip_member(&mut self) {
        let mut depth = 0usize;
        loop {
            match self.kind() {
                TokenKind::Eof => return,
                TokenKind::RBrace if depth == 0 => return,
                TokenKind::Semi if depth == 0 => {
                    self.bump();
                    return;
                }
                TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace => {
                    depth += 1;
                    self.bump();
                }
                TokenKind::RBrace => {
                    depth -= 1;
                    self.bump();
                    if depth == 0 && self.kind() != TokenKind::Eq {
                        return;
                    }
                }
                TokenKind::RParen | TokenKind::RBracket => {
                    depth = depth.saturating_sub(1);
                    self.bump();
                }
                _ => {
                    self.bump();
                }
            }
        }
    }
}
