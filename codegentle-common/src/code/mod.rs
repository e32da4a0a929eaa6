//! Code values: immutable templates of text and typed substitution parts.
//!
//! A [`CodeValue`] is built from a format string whose `%V` placeholders are
//! replaced, in order, by argument [`CodePart`]s:
//!
//! ```
//! use codegentle_common::code::{CodePart, CodeValue};
//!
//! let code = CodeValue::builder()
//!     .add_statement("int total = %V + %V", [CodePart::literal(1), CodePart::literal(2)])
//!     .unwrap()
//!     .build();
//! assert_eq!(code.parts().len(), 7);
//! ```

mod part;

pub use part::{CodePart, DialectLiteral, LiteralValue, Named, PLACEHOLDER};

use crate::error::{Error, Result};

/// An immutable sequence of [`CodePart`]s.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CodeValue {
    parts: Vec<CodePart>,
}

impl CodeValue {
    /// The empty code value.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `format`, substituting `arguments` for its `%V` placeholders.
    ///
    /// Without arguments the whole format is kept as a single text part,
    /// placeholders included.
    pub fn of(format: &str, arguments: impl IntoIterator<Item = CodePart>) -> Result<Self> {
        Ok(Self {
            parts: parse_format(format, arguments.into_iter().collect())?,
        })
    }

    /// A code value of plain text.
    pub fn simple(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.is_empty() {
            return Self::new();
        }
        Self {
            parts: vec![CodePart::Simple(text)],
        }
    }

    pub fn from_parts(parts: impl IntoIterator<Item = CodePart>) -> Self {
        Self {
            parts: parts.into_iter().collect(),
        }
    }

    pub fn builder() -> CodeValueBuilder {
        CodeValueBuilder::default()
    }

    pub fn to_builder(&self) -> CodeValueBuilder {
        CodeValueBuilder {
            parts: self.parts.clone(),
        }
    }

    pub fn parts(&self) -> &[CodePart] {
        &self.parts
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Concatenate `values`, inserting `separator` text between them.
    pub fn join(values: impl IntoIterator<Item = CodeValue>, separator: &str) -> Self {
        let mut parts = Vec::new();
        for (i, value) in values.into_iter().enumerate() {
            if i > 0 && !separator.is_empty() {
                parts.push(CodePart::simple(separator));
            }
            parts.extend(value.parts);
        }
        Self { parts }
    }

    /// This value followed by `other`.
    pub fn concat(mut self, other: CodeValue) -> Self {
        self.parts.extend(other.parts);
        self
    }
}

impl From<&str> for CodeValue {
    fn from(text: &str) -> Self {
        Self::simple(text)
    }
}

impl From<String> for CodeValue {
    fn from(text: String) -> Self {
        Self::simple(text)
    }
}

/// Split `format` on `%V`, filling each gap with the next argument. A literal
/// `%V` is written with a [`CodePart::Skip`] argument.
fn parse_format(format: &str, arguments: Vec<CodePart>) -> Result<Vec<CodePart>> {
    let expected = format.matches(PLACEHOLDER).count();
    if expected != arguments.len() {
        return Err(Box::new(Error::ArgumentCount {
            format: format.to_string(),
            expected,
            actual: arguments.len(),
        }));
    }

    let mut parts = Vec::with_capacity(expected * 2 + 1);
    let mut arguments = arguments.into_iter();
    for (i, text) in format.split(PLACEHOLDER).enumerate() {
        if i > 0 {
            // Counts already match, so every gap has an argument.
            parts.extend(arguments.next());
        }
        if !text.is_empty() {
            parts.push(CodePart::simple(text));
        }
    }
    Ok(parts)
}

/// Builder for multi-part [`CodeValue`]s.
#[derive(Debug, Clone, Default)]
pub struct CodeValueBuilder {
    parts: Vec<CodePart>,
}

impl CodeValueBuilder {
    /// Append a format with its arguments.
    pub fn add(mut self, format: &str, arguments: impl IntoIterator<Item = CodePart>) -> Result<Self> {
        self.parts
            .extend(parse_format(format, arguments.into_iter().collect())?);
        Ok(self)
    }

    /// Append plain text.
    pub fn add_text(mut self, text: impl Into<String>) -> Self {
        self.parts.extend(CodeValue::simple(text).parts);
        self
    }

    /// Append the parts of another code value.
    pub fn add_code(mut self, code: &CodeValue) -> Self {
        self.parts.extend(code.parts.iter().cloned());
        self
    }

    pub fn add_part(mut self, part: CodePart) -> Self {
        self.parts.push(part);
        self
    }

    /// Append `format;\n` as one statement.
    pub fn add_statement(
        self,
        format: &str,
        arguments: impl IntoIterator<Item = CodePart>,
    ) -> Result<Self> {
        let statement = CodeValue::of(format, arguments)?;
        Ok(self.add_statement_code(&statement))
    }

    pub fn add_statement_code(mut self, code: &CodeValue) -> Self {
        self.parts.push(CodePart::StatementBegin);
        self.parts.extend(code.parts.iter().cloned());
        self.parts.push(CodePart::simple(";\n"));
        self.parts.push(CodePart::StatementEnd);
        self
    }

    /// Append `control_flow {` and indent, e.g. `if (x)` or `for (T t : ts)`.
    pub fn begin_control_flow(
        self,
        control_flow: &str,
        arguments: impl IntoIterator<Item = CodePart>,
    ) -> Result<Self> {
        Ok(self
            .add(&format!("{control_flow} {{\n"), arguments)?
            .indent())
    }

    /// Close the current block and open the next, e.g. `else if (y)`.
    pub fn next_control_flow(
        self,
        control_flow: &str,
        arguments: impl IntoIterator<Item = CodePart>,
    ) -> Result<Self> {
        Ok(self
            .unindent()
            .add(&format!("}} {control_flow} {{\n"), arguments)?
            .indent())
    }

    /// Close the current block.
    pub fn end_control_flow(self) -> Self {
        self.unindent().add_text("}\n")
    }

    /// Close the current block with a trailing clause, e.g. `while (x)`.
    pub fn end_control_flow_with(
        self,
        control_flow: &str,
        arguments: impl IntoIterator<Item = CodePart>,
    ) -> Result<Self> {
        self.unindent()
            .add(&format!("}} {control_flow};\n"), arguments)
    }

    pub fn indent(mut self) -> Self {
        self.parts.push(CodePart::indent());
        self
    }

    pub fn unindent(mut self) -> Self {
        self.parts.push(CodePart::unindent());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn build(self) -> CodeValue {
        CodeValue { parts: self.parts }
    }
}
