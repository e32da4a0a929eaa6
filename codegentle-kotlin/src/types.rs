//! Kotlin standard classes, keywords and default imports.

use codegentle_common::naming::{ClassName, Dialect, NamingConvention, PackageName};

pub const STD_PACKAGE: &str = "kotlin";

/// Packages every Kotlin file imports implicitly.
pub const DEFAULT_IMPORTS: &[&str] = &[
    "kotlin",
    "kotlin.annotation",
    "kotlin.collections",
    "kotlin.comparisons",
    "kotlin.io",
    "kotlin.jvm",
    "kotlin.ranges",
    "kotlin.sequences",
    "kotlin.text",
];

pub(crate) fn is_default_import(package: &PackageName) -> bool {
    DEFAULT_IMPORTS
        .iter()
        .any(|default| package == &PackageName::new(default))
}

/// A class from the `kotlin` package.
pub fn kotlin_class(simple_name: &str) -> ClassName {
    ClassName::new(STD_PACKAGE, simple_name)
}

/// A class from `kotlin.collections`.
pub fn collections_class(simple_name: &str) -> ClassName {
    ClassName::new("kotlin.collections", simple_name)
}

pub fn any() -> ClassName {
    kotlin_class("Any")
}

pub fn unit() -> ClassName {
    kotlin_class("Unit")
}

pub fn nothing() -> ClassName {
    kotlin_class("Nothing")
}

pub fn string() -> ClassName {
    kotlin_class("String")
}

pub fn boolean() -> ClassName {
    kotlin_class("Boolean")
}

pub fn int() -> ClassName {
    kotlin_class("Int")
}

pub fn long() -> ClassName {
    kotlin_class("Long")
}

pub fn double() -> ClassName {
    kotlin_class("Double")
}

pub fn array() -> ClassName {
    kotlin_class("Array")
}

pub fn list() -> ClassName {
    collections_class("List")
}

pub fn map() -> ClassName {
    collections_class("Map")
}

/// Kotlin hard keywords.
pub const KEYWORDS: &[&str] = &[
    "as", "break", "class", "continue", "do", "else", "false", "for", "fun", "if", "in",
    "interface", "is", "null", "object", "package", "return", "super", "this", "throw", "true",
    "try", "typealias", "typeof", "val", "var", "when", "while",
];

fn quote_keyword(name: &str) -> String {
    format!("`{name}`")
}

/// Kotlin naming: keywords are quoted with backticks.
pub const NAMING: NamingConvention = NamingConvention {
    dialect: Dialect::Kotlin,
    reserved_words: KEYWORDS,
    escape_reserved: quote_keyword,
};
