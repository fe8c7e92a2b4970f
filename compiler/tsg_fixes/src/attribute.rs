//! `TSG2` fix: tag the offending parameter with the marker attribute.
//!
//! The attribute is written with its short name (`[TSelf]` for
//! `TSelfAttribute`). When the attribute's namespace is not visible from the
//! declaration, a `using` directive is added. The edit touches one file;
//! missing project references are not repaired.

use tsg_diagnostic::RuleCode;
use tsg_ir::ast::{SyntaxTree, TypeDecl, UsingDirective, UsingKind};
use tsg_ir::host::Host;
use tsg_ir::{TextEdit, WorkspaceEdit};

use crate::{CodeAction, CodeFix, FixContext, FixError};

pub const ATTRIBUTE_FIX_KEY: &str = "TSelfNestedFixProviderAttribute";

#[derive(Copy, Clone, Debug, Default)]
pub struct AttributeFix;

impl CodeFix for AttributeFix {
    fn equivalence_key(&self) -> &'static str {
        ATTRIBUTE_FIX_KEY
    }

    fn fixable_codes(&self) -> &'static [RuleCode] {
        &[RuleCode::TSG2]
    }

    fn register_fixes(&self, ctx: &FixContext<'_>) -> Vec<CodeAction> {
        if !ctx.config.attribute_enable {
            return Vec::new();
        }
        let Some(symbol) = ctx
            .config
            .attribute_symbol
            .and_then(|id| ctx.host.type_symbol(id))
        else {
            return Vec::new();
        };
        vec![CodeAction::new(
            format!("Add [{}] attribute", short_attribute_name(&symbol.name)),
            ATTRIBUTE_FIX_KEY,
            ctx.diagnostic,
        )]
    }

    #[tracing::instrument(level = "debug", skip_all, fields(attribute = %ctx.config.attribute_name))]
    fn compute(&self, ctx: &FixContext<'_>, _action: &CodeAction) -> Result<WorkspaceEdit, FixError> {
        let unresolved = || FixError::AttributeNotResolved(ctx.config.attribute_name.clone());
        let symbol = ctx
            .config
            .attribute_symbol
            .and_then(|id| ctx.host.type_symbol(id))
            .ok_or_else(unresolved)?;

        let tree = ctx.tree()?;
        let source = ctx.source()?;
        let (decl, param) = tree
            .find_type_param(ctx.span())
            .ok_or(FixError::SymbolNotFound)?;

        let mut edits = Vec::with_capacity(2);
        let namespace = attribute_namespace(ctx.host, symbol.id);
        if !is_namespace_visible(ctx.host, tree, decl, &namespace) {
            edits.push(using_insertion(tree, decl, source, &namespace));
        }
        edits.push(TextEdit::insert(
            param.attribute_insert_offset(),
            format!("[{}] ", short_attribute_name(&symbol.name)),
        ));
        Ok(WorkspaceEdit::single(ctx.file(), edits))
    }
}

/// `TSelfAttribute` becomes `TSelf`; a bare `Attribute` is kept.
pub fn short_attribute_name(name: &str) -> &str {
    match name.strip_suffix("Attribute") {
        Some(short) if !short.is_empty() => short,
        _ => name,
    }
}

/// Namespace of the attribute type, or of its outermost containing type.
fn attribute_namespace(host: &dyn Host, mut id: tsg_ir::TypeId) -> String {
    while let Some(outer) = host.type_symbol(id).and_then(|symbol| symbol.containing_type) {
        id = outer;
    }
    host.type_symbol(id)
        .map(|symbol| symbol.namespace.clone())
        .unwrap_or_default()
}

/// Whether types of `namespace` can be named unqualified inside `decl`.
fn is_namespace_visible(host: &dyn Host, tree: &SyntaxTree, decl: &TypeDecl, namespace: &str) -> bool {
    if namespace.is_empty() {
        return true;
    }
    let enclosing = tree.enclosing_namespaces(decl.span);

    // The containing namespace and its ancestors.
    let mut current = String::new();
    for ns in &enclosing {
        for part in ns.name.split('.') {
            if !current.is_empty() {
                current.push('.');
            }
            current.push_str(part);
            if current == namespace {
                return true;
            }
        }
    }

    let imports = |using: &UsingDirective| using.kind == UsingKind::Namespace && using.target == namespace;
    if tree.root.usings.iter().any(imports) || enclosing.iter().any(|ns| ns.usings.iter().any(imports)) {
        return true;
    }
    host.document_ids()
        .into_iter()
        .filter(|&file| file != tree.file)
        .filter_map(|file| host.syntax_tree(file))
        .any(|other| {
            other
                .root
                .usings
                .iter()
                .any(|using| using.is_global && imports(using))
        })
}

/// `using <namespace>;` after the last directive of the innermost group
/// that has one, or before the first token of the file so a header comment
/// stays on top.
fn using_insertion(tree: &SyntaxTree, decl: &TypeDecl, source: &str, namespace: &str) -> TextEdit {
    let enclosing = tree.enclosing_namespaces(decl.span);
    let last = enclosing
        .iter()
        .rev()
        .find_map(|ns| ns.usings.last())
        .or_else(|| tree.root.usings.last());
    match last {
        Some(using) => {
            let indent = line_indent(source, using.span.start);
            TextEdit::insert(using.span.end, format!("\n{indent}using {namespace};"))
        }
        None => TextEdit::insert(leading_comments_end(source), format!("using {namespace};\n")),
    }
}

/// Offset just past the whitespace and comments that open the file.
fn leading_comments_end(source: &str) -> u32 {
    let bytes = source.as_bytes();
    let mut i = if source.starts_with('\u{feff}') { 3 } else { 0 };
    loop {
        while bytes.get(i).is_some_and(u8::is_ascii_whitespace) {
            i += 1;
        }
        let rest = &source[i..];
        if rest.starts_with("//") {
            i += rest.find('\n').map_or(rest.len(), |end| end + 1);
        } else if let Some(body) = rest.strip_prefix("/*") {
            match body.find("*/") {
                Some(end) => i += end + 4,
                // Unterminated; the whole file is a comment.
                None => return 0,
            }
        } else {
            break;
        }
    }
    u32::try_from(i).unwrap_or(0)
}

/// Leading whitespace of the line containing `offset`.
fn line_indent(source: &str, offset: u32) -> &str {
    let offset = (offset as usize).min(source.len());
    let line_start = source[..offset].rfind('\n').map_or(0, |i| i + 1);
    let line = &source[line_start..offset];
    let width = line.len() - line.trim_start().len();
    &line[..width]
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_short_attribute_name() {
        assert_eq!(short_attribute_name("TSelfAttribute"), "TSelf");
        assert_eq!(short_attribute_name("Marker"), "Marker");
        assert_eq!(short_attribute_name("Attribute"), "Attribute");
    }

    #[test]
    fn test_leading_comments_end() {
        assert_eq!(leading_comments_end("namespace A { }"), 0);
        assert_eq!(leading_comments_end("// header\nnamespace A { }"), 10);
        assert_eq!(leading_comments_end("/* a\n b */\n\n// c\nclass A { }"), 17);
        assert_eq!(leading_comments_end("\u{feff}// h\nclass A { }"), 8);
        assert_eq!(leading_comments_end("#nullable enable\nclass A { }"), 0);
        assert_eq!(leading_comments_end("/* open"), 0);
    }

    #[test]
    fn test_line_indent() {
        let source = "namespace A\n{\n    using B;\n}";
        let offset = u32::try_from(source.find("using").unwrap_or(0)).unwrap_or(0);
        assert_eq!(line_indent(source, offset), "    ");
        assert_eq!(line_indent(source, 0), "");
    }
}

