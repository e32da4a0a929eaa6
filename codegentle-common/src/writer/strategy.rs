//! Dialect hooks of the code writer.

use super::CodeWriter;
use crate::{
    code::DialectLiteral,
    error::{Error, Result},
    naming::{ClassName, Dialect, TypeRef},
};

/// The parts of emission that differ between dialects.
///
/// A [`CodeWriter`] is dialect-agnostic; everything it cannot decide on its
/// own is delegated here.
pub trait WriteStrategy: Sync {
    fn dialect(&self) -> Dialect;

    /// Emit a type reference, including its use-site decoration.
    fn emit_type_ref(&self, writer: &mut CodeWriter<'_>, type_ref: &TypeRef) -> Result<()>;

    /// Quote and escape `value` as a string literal.
    fn string_literal(&self, value: &str, indent: &str) -> String;

    /// Opening and closing delimiters of an annotation array value.
    fn annotation_array_delimiters(&self) -> (&'static str, &'static str);

    /// Whether `class` is visible without an import (`java.lang`, `kotlin`).
    fn is_implicitly_visible(&self, _class: &ClassName) -> bool {
        false
    }

    /// Emit a construct owned by a dialect crate, such as an anonymous class.
    fn emit_dialect_literal(
        &self,
        _writer: &mut CodeWriter<'_>,
        literal: &dyn DialectLiteral,
    ) -> Result<()> {
        Err(Error::dialect_mismatch(
            self.dialect(),
            format!("{} construct", literal.dialect()),
        ))
    }
}

/// Quote `value`, escaping quotes, backslashes and control characters.
///
/// A line feed that is not the last character splits the literal into
/// concatenated pieces, one per line. `extra` adds dialect escapes.
pub fn escape_string(value: &str, indent: &str, extra: &[(char, &str)]) -> String {
    let mut result = String::with_capacity(value.len() + 2);
    result.push('"');
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        if let Some((_, escaped)) = extra.iter().find(|(special, _)| *special == c) {
            result.push_str(escaped);
            continue;
        }
        match c {
            '"' => result.push_str("\\\""),
            '\\' => result.push_str("\\\\"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push_str("\\t"),
            '\n' => {
                result.push_str("\\n");
                if chars.peek().is_some() {
                    result.push_str("\"\n");
                    result.push_str(indent);
                    result.push_str("+ \"");
                }
            }
            c => result.push(c),
        }
    }
    result.push('"');
    result
}
