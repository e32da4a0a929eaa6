//! Dialect-independent core of the codegentle source generators.
//!
//! This crate provides the emission engine shared by the Java and Kotlin
//! generators: code values, type names, the line-wrapping code writer with
//! its name resolver, and file output.
//!
//! # Module Organization
//!
//! - [`code`] - Code values and their parts (CodeValue, CodePart, etc.)
//! - [`naming`] - Package, class and type names, identifier rules
//! - [`annotation`] - Annotation references
//! - [`writer`] - CodeWriter, name resolution and two-pass rendering
//! - [`line_wrapper`] - Column-aware output buffering
//! - [`name_allocator`] - Collision-free identifiers
//! - [`config`] - Per-file rendering configuration
//! - [`file`] - Writing rendered files to disk
//! - [`testing`] - Test utilities (feature-gated)

pub mod annotation;
pub mod code;
pub mod config;
mod error;
pub mod file;
pub mod indent;
pub mod line_wrapper;
pub mod name_allocator;
pub mod naming;
pub mod writer;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use annotation::AnnotationRef;
pub use code::{CodePart, CodeValue, CodeValueBuilder};
pub use config::EmitConfig;
pub use error::{Error, Result};
pub use file::{FileRules, GeneratedFile, Overwrite, WriteResult};
pub use indent::Indent;
pub use naming::{ClassName, Dialect, PackageName, TypeName, TypeRef};
pub use writer::{CodeWriter, TypeScope, WriteStrategy};
