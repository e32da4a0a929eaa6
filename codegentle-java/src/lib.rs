//! Java source generation on top of `codegentle-common`.
//!
//! Declarations are assembled with builders and rendered through
//! [`JavaFile`], which resolves imports in two passes:
//!
//! ```
//! use codegentle_java::{JavaFile, JavaModifier, MethodSpec, TypeSpec, types};
//!
//! let method = MethodSpec::builder("answer")
//!     .add_modifiers([JavaModifier::Public, JavaModifier::Static])
//!     .returns(types::INT)
//!     .add_statement("return 42", [])
//!     .unwrap()
//!     .build()
//!     .unwrap();
//! let class = TypeSpec::class_builder("Answers").add_method(method).build().unwrap();
//! let file = JavaFile::builder("com.example", class).build().unwrap();
//! assert!(file.to_string().contains("public static int answer() {"));
//! ```

mod field;
mod java_file;
mod method;
mod modifier;
mod parameter;
mod strategy;
mod type_spec;

pub mod types;

pub use field::{FieldSpec, FieldSpecBuilder};
pub use java_file::{JavaFile, JavaFileBuilder};
pub use method::{CONSTRUCTOR, MethodSpec, MethodSpecBuilder};
pub use modifier::JavaModifier;
pub use parameter::{ParameterSpec, ParameterSpecBuilder};
pub use strategy::{JAVA, JavaStrategy, annotation_to_string, code_to_string, type_to_string};
pub use type_spec::{TypeKind, TypeSpec, TypeSpecBuilder};
