//! Java primitives, well-known classes and keywords.

use codegentle_common::naming::{ClassName, Dialect, NamingConvention, PackageName, TypeName};

pub const VOID: TypeName = TypeName::Primitive("void");
pub const BOOLEAN: TypeName = TypeName::Primitive("boolean");
pub const BYTE: TypeName = TypeName::Primitive("byte");
pub const SHORT: TypeName = TypeName::Primitive("short");
pub const INT: TypeName = TypeName::Primitive("int");
pub const LONG: TypeName = TypeName::Primitive("long");
pub const CHAR: TypeName = TypeName::Primitive("char");
pub const FLOAT: TypeName = TypeName::Primitive("float");
pub const DOUBLE: TypeName = TypeName::Primitive("double");

/// The package whose classes are visible without imports.
pub const LANG_PACKAGE: &str = "java.lang";

/// A class from `java.lang`.
pub fn lang_class(simple_name: &str) -> ClassName {
    ClassName::new(LANG_PACKAGE, simple_name)
}

pub fn object() -> ClassName {
    lang_class("Object")
}

pub fn string() -> ClassName {
    lang_class("String")
}

pub(crate) fn is_lang_package(package: &PackageName) -> bool {
    package == &PackageName::new(LANG_PACKAGE)
}

/// Java keywords and literals that cannot be identifiers.
pub const KEYWORDS: &[&str] = &[
    "_", "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class",
    "const", "continue", "default", "do", "double", "else", "enum", "extends", "false", "final",
    "finally", "float", "for", "goto", "if", "implements", "import", "instanceof", "int",
    "interface", "long", "native", "new", "null", "package", "private", "protected", "public",
    "return", "short", "static", "strictfp", "super", "switch", "synchronized", "this", "throw",
    "throws", "transient", "true", "try", "void", "volatile", "while",
];

fn escape_keyword(name: &str) -> String {
    format!("{name}_")
}

/// Java naming: keywords get a trailing underscore.
pub const NAMING: NamingConvention = NamingConvention {
    dialect: Dialect::Java,
    reserved_words: KEYWORDS,
    escape_reserved: escape_keyword,
};
