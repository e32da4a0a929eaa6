//! The code-value interpreter.

use tracing::trace;

use super::{CONTINUATION_INDENT, CodeWriter};
use crate::{
    code::{CodePart, CodeValue, LiteralValue, PLACEHOLDER},
    error::{Error, Result},
    naming::{ClassName, TypeName, TypeRefStatus, is_identifier_part, is_identifier_start},
};

impl CodeWriter<'_> {
    /// Emit the parts of `code` in order.
    pub fn emit_code(&mut self, code: &CodeValue) -> Result<()> {
        self.emit_parts(code, false)
    }

    /// Emit `code`, then a line break unless it already ended with one.
    pub fn emit_code_with_newline(&mut self, code: &CodeValue) -> Result<()> {
        self.emit_parts(code, true)
    }

    pub fn emit_format(
        &mut self,
        format: &str,
        arguments: impl IntoIterator<Item = CodePart>,
    ) -> Result<()> {
        self.emit_code(&CodeValue::of(format, arguments)?)
    }

    fn emit_parts(&mut self, code: &CodeValue, ensure_trailing_newline: bool) -> Result<()> {
        let parts = code.parts();
        let mut opened_statement = false;
        // A type held back in case the next text is a statically imported member.
        let mut deferred: Option<(&ClassName, &CodePart)> = None;

        for (i, part) in parts.iter().enumerate() {
            match part {
                CodePart::Simple(text) => {
                    if let Some((class, type_part)) = deferred.take() {
                        if text.starts_with('.') && self.emit_static_import_member(class, text)? {
                            continue;
                        }
                        self.emit_type_part(type_part)?;
                    }
                    self.emit(text)?;
                }
                CodePart::Skip => self.emit(PLACEHOLDER)?,
                CodePart::Literal(value) => self.emit_literal(value)?,
                CodePart::Name(name) => self.emit(name)?,
                CodePart::Str(Some(value)) => {
                    let literal = self.strategy.string_literal(value, &self.indent);
                    self.emit(&literal)?;
                }
                CodePart::Str(None) => self.emit("null")?,
                CodePart::Type(_) | CodePart::TypeRef(_) => {
                    if let Some(class) = self.static_import_candidate(part, parts.get(i + 1)) {
                        deferred = Some((class, part));
                        continue;
                    }
                    self.emit_type_part(part)?;
                }
                CodePart::Indent(levels) => self.indent_by(*levels),
                CodePart::Unindent(levels) => self.unindent_by(*levels)?,
                CodePart::StatementBegin => {
                    if self.statement_line.is_some() {
                        return Err(Box::new(Error::NestedStatement));
                    }
                    self.statement_line = Some(0);
                    opened_statement = true;
                }
                CodePart::StatementEnd => match self.statement_line.take() {
                    None => return Err(Box::new(Error::UnmatchedStatementEnd)),
                    Some(line) => {
                        if line > 0 {
                            self.unindent_by(CONTINUATION_INDENT)?;
                        }
                    }
                },
                CodePart::WrappingSpace => self.wrapping_space()?,
                CodePart::ZeroWidthSpace => self.zero_width_space()?,
                CodePart::OtherCodeValue(value) => self.emit_code(value)?,
            }
        }

        if let Some((_, type_part)) = deferred {
            self.emit_type_part(type_part)?;
        }

        if opened_statement && self.statement_line.is_some() {
            return Err(Box::new(Error::UnclosedStatement));
        }

        if ensure_trailing_newline && self.last_char() != Some('\n') {
            self.emit("\n")?;
        }
        Ok(())
    }

    fn emit_type_part(&mut self, part: &CodePart) -> Result<()> {
        match part {
            CodePart::Type(type_name) => self.emit_type_name(type_name),
            CodePart::TypeRef(type_ref) => self.emit_type_ref(type_ref),
            _ => Ok(()),
        }
    }

    fn emit_literal(&mut self, value: &LiteralValue) -> Result<()> {
        match value {
            LiteralValue::Text(text) => self.emit(text),
            LiteralValue::Code(code) => self.emit_code(code),
            LiteralValue::Type(type_ref) => self.emit_type_ref(type_ref),
            LiteralValue::Annotation(annotation) => self.emit_annotation(annotation),
            LiteralValue::Dialect(literal) => {
                let strategy = self.strategy;
                strategy.emit_dialect_literal(self, literal.as_ref())
            }
        }
    }

    /// The class of a plain type part directly followed by text, when that
    /// class owns a static import.
    fn static_import_candidate<'p>(
        &self,
        part: &'p CodePart,
        next: Option<&CodePart>,
    ) -> Option<&'p ClassName> {
        if !matches!(next, Some(CodePart::Simple(_))) {
            return None;
        }
        let class = match part {
            CodePart::Type(TypeName::Class(class)) => class,
            CodePart::TypeRef(type_ref) => match (type_ref.type_name(), type_ref.status()) {
                (TypeName::Class(class), TypeRefStatus::Neutral) => class,
                (TypeName::Class(class), TypeRefStatus::Java { annotations })
                | (
                    TypeName::Class(class),
                    TypeRefStatus::Kotlin {
                        nullable: false,
                        annotations,
                    },
                ) if annotations.is_empty() => class,
                _ => return None,
            },
            _ => return None,
        };
        self.names
            .is_static_import_owner(&class.canonical_name())
            .then_some(class)
    }

    /// Emit `.member...` text without its class when the member is
    /// statically imported. Returns whether it was.
    fn emit_static_import_member(&mut self, class: &ClassName, text: &str) -> Result<bool> {
        let member_text = &text[1..];
        match member_text.chars().next() {
            Some(first) if is_identifier_start(first) => {}
            _ => return Ok(false),
        }

        let canonical = class.canonical_name();
        let explicit = format!("{canonical}.{}", extract_member_name(member_text)?);
        let wildcard = format!("{canonical}.*");
        let imports = self.names.static_imports();
        if imports.contains(&explicit) || imports.contains(&wildcard) {
            trace!(member = %explicit, "static import");
            self.emit(member_text)?;
            return Ok(true);
        }
        Ok(false)
    }
}

/// The leading identifier of a member access such as `max(a, b)`.
pub fn extract_member_name(text: &str) -> Result<&str> {
    let mut chars = text.char_indices();
    match chars.next() {
        Some((_, first)) if is_identifier_start(first) => {}
        _ => {
            return Err(Box::new(Error::InvalidStaticMember {
                member: text.to_string(),
            }));
        }
    }
    let end = chars
        .find(|(_, c)| !is_identifier_part(*c))
        .map_or(text.len(), |(i, _)| i);
    Ok(&text[..end])
}

#[cfg(test)]
mod tests {
    use std::{any::Any, sync::Arc};

    use super::*;
    use crate::{
        code::DialectLiteral,
        config::EmitConfig,
        naming::{Dialect, TypeRef},
        writer::tests::render,
    };

    fn emit(config: &EmitConfig, code: CodeValue) -> Result<String> {
        render(config, |w| w.emit_code(&code))
    }

    #[test]
    fn test_statement_continuation_indent() {
        let code = CodeValue::from_parts([
            CodePart::StatementBegin,
            CodePart::simple("result = alpha +"),
            CodePart::WrappingSpace,
            CodePart::simple("beta;\n"),
            CodePart::StatementEnd,
            CodePart::simple("next;\n"),
        ]);
        let out = emit(&EmitConfig::default().with_column_limit(20), code).unwrap();
        assert_eq!(out, "result = alpha +\n        beta;\nnext;\n");
    }

    #[test]
    fn test_statement_explicit_lines_are_continued() {
        let code = CodeValue::builder()
            .add_statement("call(\na,\nb)", [])
            .unwrap()
            .add_statement("done()", [])
            .unwrap()
            .build();
        let out = emit(&EmitConfig::default(), code).unwrap();
        assert_eq!(out, "call(\n        a,\n        b);\ndone();\n");
    }

    #[test]
    fn test_nested_statement_fails() {
        let code = CodeValue::from_parts([CodePart::StatementBegin, CodePart::StatementBegin]);
        let err = emit(&EmitConfig::default(), code).unwrap_err();
        assert!(matches!(*err, Error::NestedStatement));
    }

    #[test]
    fn test_unmatched_statement_end_fails() {
        let code = CodeValue::from_parts([CodePart::simple("x"), CodePart::StatementEnd]);
        let err = emit(&EmitConfig::default(), code).unwrap_err();
        assert!(matches!(*err, Error::UnmatchedStatementEnd));
    }

    #[test]
    fn test_unclosed_statement_fails() {
        let code = CodeValue::from_parts([CodePart::StatementBegin, CodePart::simple("x;\n")]);
        let err = emit(&EmitConfig::default(), code).unwrap_err();
        assert!(matches!(*err, Error::UnclosedStatement));
    }

    #[test]
    fn test_string_escaping() {
        let code = CodeValue::of("%V + %V", [CodePart::string("6\" sandwich"), CodePart::null_string()])
            .unwrap();
        let out = emit(&EmitConfig::default(), code).unwrap();
        assert_eq!(out, "\"6\\\" sandwich\" + null");
    }

    #[test]
    fn test_multiline_string_in_statement() {
        let code = CodeValue::builder()
            .add_statement("String s = %V", [CodePart::string("a\nb")])
            .unwrap()
            .build();
        let out = emit(&EmitConfig::default(), code).unwrap();
        assert_eq!(out, "String s = \"a\\n\"\n            + \"b\";\n");
    }

    #[test]
    fn test_skip_emits_placeholder() {
        let code = CodeValue::of("%V %V", [CodePart::Skip, CodePart::literal(1)]).unwrap();
        assert_eq!(emit(&EmitConfig::default(), code).unwrap(), "%V 1");
    }

    #[test]
    fn test_nested_code_values() {
        let inner = CodeValue::of("b(%V)", [CodePart::literal("c")]).unwrap();
        let code = CodeValue::of(
            "a(%V, %V)",
            [CodePart::code(inner.clone()), CodePart::literal(inner)],
        )
        .unwrap();
        assert_eq!(emit(&EmitConfig::default(), code).unwrap(), "a(b(c), b(c))");
    }

    #[test]
    fn test_indent_parts() {
        let code = CodeValue::builder()
            .begin_control_flow("if (ready)", [])
            .unwrap()
            .add_statement("go()", [])
            .unwrap()
            .end_control_flow()
            .build();
        assert_eq!(
            emit(&EmitConfig::default(), code).unwrap(),
            "if (ready) {\n    go();\n}\n"
        );
    }

    #[test]
    fn test_ensure_trailing_newline() {
        let out = render(&EmitConfig::default(), |w| {
            w.emit_code_with_newline(&CodeValue::simple("a"))?;
            w.emit_code_with_newline(&CodeValue::simple("b\n"))
        })
        .unwrap();
        assert_eq!(out, "a\nb\n");
    }

    #[test]
    fn test_static_import_wildcard() {
        let config = EmitConfig::default().with_static_import("java.util.Collections.*");
        let collections = ClassName::new("java.util", "Collections");
        let code = CodeValue::from_parts([
            CodePart::type_name(collections.clone()),
            CodePart::simple(".emptyList()"),
        ]);
        assert_eq!(emit(&config, code).unwrap(), "emptyList()");
    }

    #[test]
    fn test_static_import_explicit_member_only() {
        let config = EmitConfig::default().with_static_import("java.lang.Math.max");
        let math = ClassName::new("java.lang", "Math");
        let code = CodeValue::from_parts([
            CodePart::type_ref(TypeRef::new(math.clone())),
            CodePart::simple(".max(a, b) + "),
            CodePart::type_name(math),
            CodePart::simple(".min(a, b)"),
        ]);
        assert_eq!(emit(&config, code).unwrap(), "max(a, b) + Math.min(a, b)");
    }

    #[test]
    fn test_static_import_generic_call_keeps_class() {
        let config = EmitConfig::default().with_static_import("java.util.Collections.*");
        let code = CodeValue::from_parts([
            CodePart::type_name(ClassName::new("java.util", "Collections")),
            CodePart::simple(".<T>emptyList()"),
        ]);
        assert_eq!(
            emit(&config, code).unwrap(),
            "java.util.Collections.<T>emptyList()"
        );
    }

    #[test]
    fn test_extract_member_name() {
        assert_eq!(extract_member_name("max(a, b)").unwrap(), "max");
        assert_eq!(extract_member_name("EMPTY_LIST").unwrap(), "EMPTY_LIST");
        let err = extract_member_name("1max").unwrap_err();
        assert!(matches!(*err, Error::InvalidStaticMember { .. }));
    }

    #[derive(Debug)]
    struct ForeignConstruct;

    impl DialectLiteral for ForeignConstruct {
        fn dialect(&self) -> Dialect {
            Dialect::Kotlin
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    #[test]
    fn test_foreign_dialect_literal_fails() {
        let code = CodeValue::from_parts([CodePart::Literal(LiteralValue::Dialect(Arc::new(
            ForeignConstruct,
        )))]);
        let err = emit(&EmitConfig::default(), code).unwrap_err();
        assert!(matches!(
            *err,
            Error::DialectMismatch {
                dialect: Dialect::Java,
                ..
            }
        ));
    }

    #[test]
    fn test_emit_format_argument_count() {
        let err = render(&EmitConfig::default(), |w| {
            w.emit_format("%V(%V)", [CodePart::literal("f")])
        })
        .unwrap_err();
        assert!(matches!(*err, Error::ArgumentCount { .. }));
    }
}
