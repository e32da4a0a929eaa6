//! The parts a [`CodeValue`] is made of.

use std::{any::Any, fmt, sync::Arc};

use super::CodeValue;
use crate::{
    annotation::AnnotationRef,
    error::{Error, Result},
    naming::{Dialect, TypeName, TypeRef, is_valid_identifier},
};

/// Placeholder token consumed by format strings.
pub const PLACEHOLDER: &str = "%V";

/// One element of a [`CodeValue`].
#[derive(Debug, Clone, PartialEq)]
pub enum CodePart {
    /// Literal text, emitted line by line with indentation.
    Simple(String),
    /// Emits the placeholder token itself.
    Skip,
    /// Emits a value verbatim, or delegates to the value's own emission.
    Literal(LiteralValue),
    /// Emits an identifier.
    Name(String),
    /// Emits a double-quoted, escaped string literal; `None` emits `null`.
    Str(Option<String>),
    /// Emits a type through the name resolver.
    Type(TypeName),
    /// Emits a type reference (type plus dialect status) through the name resolver.
    TypeRef(TypeRef),
    Indent(usize),
    Unindent(usize),
    /// Opens a statement; wrapped lines until the matching end get a continuation indent.
    StatementBegin,
    StatementEnd,
    /// A space, or a newline plus continuation indent if the line is full.
    WrappingSpace,
    /// Nothing, or a newline plus continuation indent if the line is full.
    ZeroWidthSpace,
    /// Splices another code value in place.
    OtherCodeValue(CodeValue),
}

impl CodePart {
    pub fn simple(text: impl Into<String>) -> Self {
        Self::Simple(text.into())
    }

    pub fn skip() -> Self {
        Self::Skip
    }

    pub fn literal(value: impl Into<LiteralValue>) -> Self {
        Self::Literal(value.into())
    }

    /// Name part from a raw identifier, validated.
    pub fn name(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if !is_valid_identifier(&name) {
            return Err(Box::new(Error::InvalidName { name }));
        }
        Ok(Self::Name(name))
    }

    /// Name part taken from a named declaration.
    pub fn named(named: &impl Named) -> Self {
        Self::Name(named.name().to_string())
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::Str(Some(value.into()))
    }

    pub fn null_string() -> Self {
        Self::Str(None)
    }

    pub fn type_name(type_name: impl Into<TypeName>) -> Self {
        Self::Type(type_name.into())
    }

    pub fn type_ref(type_ref: impl Into<TypeRef>) -> Self {
        Self::TypeRef(type_ref.into())
    }

    pub fn indent() -> Self {
        Self::Indent(1)
    }

    pub fn unindent() -> Self {
        Self::Unindent(1)
    }

    pub fn statement_begin() -> Self {
        Self::StatementBegin
    }

    pub fn statement_end() -> Self {
        Self::StatementEnd
    }

    pub fn wrapping_space() -> Self {
        Self::WrappingSpace
    }

    pub fn zero_width_space() -> Self {
        Self::ZeroWidthSpace
    }

    pub fn code(value: CodeValue) -> Self {
        Self::OtherCodeValue(value)
    }

    /// Whether this part stands in for a placeholder (anything but plain text).
    pub fn is_argument(&self) -> bool {
        !matches!(self, Self::Simple(_))
    }
}

/// A declaration that can be referenced by name.
pub trait Named {
    fn name(&self) -> &str;
}

/// A dialect-owned construct carried inside a literal part.
///
/// The writer of the owning dialect downcasts it back to the concrete
/// declaration type; any other writer rejects it.
pub trait DialectLiteral: fmt::Debug + Send + Sync {
    fn dialect(&self) -> Dialect;

    fn as_any(&self) -> &dyn Any;
}

/// Payload of a [`CodePart::Literal`].
#[derive(Debug, Clone)]
pub enum LiteralValue {
    Text(String),
    Code(CodeValue),
    Type(TypeRef),
    Annotation(AnnotationRef),
    Dialect(Arc<dyn DialectLiteral>),
}

impl LiteralValue {
    pub fn dialect(value: impl DialectLiteral + 'static) -> Self {
        Self::Dialect(Arc::new(value))
    }
}

impl PartialEq for LiteralValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Code(a), Self::Code(b)) => a == b,
            (Self::Type(a), Self::Type(b)) => a == b,
            (Self::Annotation(a), Self::Annotation(b)) => a == b,
            (Self::Dialect(a), Self::Dialect(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<&str> for LiteralValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for LiteralValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<CodeValue> for LiteralValue {
    fn from(value: CodeValue) -> Self {
        Self::Code(value)
    }
}

impl From<TypeRef> for LiteralValue {
    fn from(value: TypeRef) -> Self {
        Self::Type(value)
    }
}

impl From<AnnotationRef> for LiteralValue {
    fn from(value: AnnotationRef) -> Self {
        Self::Annotation(value)
    }
}

macro_rules! literal_from_display {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for LiteralValue {
                fn from(value: $ty) -> Self {
                    Self::Text(value.to_string())
                }
            }
        )*
    };
}

literal_from_display!(i8, i16, i32, i64, u8, u16, u32, u64, usize, isize, f32, f64, bool, char);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_validation() {
        assert_eq!(CodePart::name("value").unwrap(), CodePart::Name("value".into()));
        assert_eq!(CodePart::name("_x1").unwrap(), CodePart::Name("_x1".into()));

        let err = CodePart::name("1abc").unwrap_err();
        assert!(matches!(*err, Error::InvalidName { .. }));
        assert!(CodePart::name("").is_err());
        assert!(CodePart::name("a b").is_err());
    }

    #[test]
    fn test_literal_conversions() {
        assert_eq!(
            CodePart::literal(42),
            CodePart::Literal(LiteralValue::Text("42".into()))
        );
        assert_eq!(
            CodePart::literal(true),
            CodePart::Literal(LiteralValue::Text("true".into()))
        );
        assert_eq!(
            CodePart::literal("x"),
            CodePart::Literal(LiteralValue::Text("x".into()))
        );
    }

    #[test]
    fn test_is_argument() {
        assert!(!CodePart::simple("x").is_argument());
        assert!(CodePart::Skip.is_argument());
        assert!(CodePart::wrapping_space().is_argument());
    }
}
