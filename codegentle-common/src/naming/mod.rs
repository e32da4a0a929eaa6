//! Names: packages, classes, type references and identifier rules.

mod class_name;
mod package;
mod type_name;

use std::fmt;

pub use class_name::ClassName;
pub use package::PackageName;
pub use type_name::{TypeName, TypeRef, TypeRefStatus, TypeVariableName, WildcardBounds};

/// A source dialect a writer renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    Java,
    Kotlin,
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Java => f.write_str("Java"),
            Self::Kotlin => f.write_str("Kotlin"),
        }
    }
}

/// A keyword that can be written as-is, such as a modifier.
pub trait Keyword {
    fn keyword(&self) -> &'static str;
}

pub fn is_identifier_start(c: char) -> bool {
    c == '_' || c == '$' || c.is_alphabetic()
}

pub fn is_identifier_part(c: char) -> bool {
    is_identifier_start(c) || c.is_numeric()
}

/// Whether `name` is a single identifier (no dots, non-empty).
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if is_identifier_start(first) => chars.all(is_identifier_part),
        _ => false,
    }
}

/// Turn an arbitrary suggestion into an identifier.
///
/// Invalid characters become `_`, and a leading character that may only
/// appear inside an identifier (a digit) gets a `_` prefix.
pub fn to_identifier(suggestion: &str) -> String {
    let mut result = String::with_capacity(suggestion.len() + 1);
    for (i, c) in suggestion.chars().enumerate() {
        if i == 0 && !is_identifier_start(c) && is_identifier_part(c) {
            result.push('_');
        }
        result.push(if is_identifier_part(c) { c } else { '_' });
    }
    result
}

/// Reserved words of a dialect and how to escape them.
#[derive(Debug, Clone, Copy)]
pub struct NamingConvention {
    pub dialect: Dialect,
    /// Words that cannot be used as plain identifiers.
    pub reserved_words: &'static [&'static str],
    /// Escape a reserved word (e.g., "class" -> "class_" in Java)
    pub escape_reserved: fn(&str) -> String,
}

impl NamingConvention {
    /// Check if a name is a reserved word.
    pub fn is_reserved(&self, name: &str) -> bool {
        self.reserved_words.contains(&name)
    }

    /// Get a safe name, escaping if necessary.
    pub fn safe_name(&self, name: &str) -> String {
        if self.is_reserved(name) {
            (self.escape_reserved)(name)
        } else {
            name.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_identifier() {
        assert!(is_valid_identifier("foo"));
        assert!(is_valid_identifier("_foo1"));
        assert!(is_valid_identifier("$proxy"));
        assert!(is_valid_identifier("größe"));
        assert!(!is_valid_identifier(""));
        assert!(!is_valid_identifier("1foo"));
        assert!(!is_valid_identifier("foo.bar"));
        assert!(!is_valid_identifier("foo-bar"));
    }

    #[test]
    fn test_to_identifier() {
        assert_eq!(to_identifier("foo"), "foo");
        assert_eq!(to_identifier("1st"), "_1st");
        assert_eq!(to_identifier("a-b c"), "a_b_c");
        assert_eq!(to_identifier("-x"), "_x");
        assert_eq!(to_identifier(""), "");
    }

    #[test]
    fn test_safe_name() {
        let convention = NamingConvention {
            dialect: Dialect::Java,
            reserved_words: &["class", "int"],
            escape_reserved: |name| format!("{name}_"),
        };
        assert!(convention.is_reserved("class"));
        assert_eq!(convention.safe_name("class"), "class_");
        assert_eq!(convention.safe_name("klass"), "klass");
    }

    #[test]
    fn test_dialect_display() {
        assert_eq!(Dialect::Java.to_string(), "Java");
        assert_eq!(Dialect::Kotlin.to_string(), "Kotlin");
    }
}
