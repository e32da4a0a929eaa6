//! Kotlin source generation on top of `codegentle-common`.
//!
//! Builders assemble declarations; [`KotlinFile`] renders them with
//! imports resolved in two passes. Classes of Kotlin's default-imported
//! packages are referenced by simple name.
//!
//! ```
//! use codegentle_kotlin::{KotlinFile, KotlinFunctionSpec, types};
//!
//! let answer = KotlinFunctionSpec::builder("answer")
//!     .returns(types::int())
//!     .expression_body("42")
//!     .build()
//!     .unwrap();
//! let file = KotlinFile::builder("com.example", "Answers")
//!     .add_function(answer)
//!     .build()
//!     .unwrap();
//! assert_eq!(file.to_string(), "package com.example\n\nfun answer(): Int = 42\n");
//! ```

mod function;
mod kotlin_file;
mod modifier;
mod parameter;
mod property;
mod strategy;
mod type_spec;

pub mod types;

pub use function::{CONSTRUCTOR, ConstructorDelegation, KotlinFunctionSpec, KotlinFunctionSpecBuilder};
pub use kotlin_file::{KotlinFile, KotlinFileBuilder};
pub use modifier::KotlinModifier;
pub use parameter::{KotlinParameterSpec, KotlinParameterSpecBuilder, Mutability};
pub use property::{KotlinPropertySpec, KotlinPropertySpecBuilder};
pub use strategy::{KOTLIN, KotlinStrategy, annotation_to_string, code_to_string, type_to_string};
pub use type_spec::{DEFAULT_COMPANION_NAME, KotlinTypeKind, KotlinTypeSpec, KotlinTypeSpecBuilder};
