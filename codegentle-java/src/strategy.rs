//! The Java dialect of the code writer.

use std::{collections::BTreeSet, fmt};

use codegentle_common::{
    CodeWriter, Error, Result, WriteStrategy,
    annotation::AnnotationRef,
    code::{CodeValue, DialectLiteral},
    naming::{ClassName, Dialect, TypeName, TypeRef, TypeRefStatus, TypeVariableName, WildcardBounds},
    writer::{escape_string, render_standalone},
};

use crate::{TypeSpec, types};

/// Java syntax for types, strings and annotation arrays.
#[derive(Debug, Default, Clone, Copy)]
pub struct JavaStrategy;

/// The shared Java strategy.
pub static JAVA: JavaStrategy = JavaStrategy;

impl WriteStrategy for JavaStrategy {
    fn dialect(&self) -> Dialect {
        Dialect::Java
    }

    fn emit_type_ref(&self, writer: &mut CodeWriter<'_>, type_ref: &TypeRef) -> Result<()> {
        let annotations = java_annotations(type_ref)?;
        match type_ref.type_name() {
            TypeName::Array(component) => {
                writer.emit_type_ref(component)?;
                if !annotations.is_empty() {
                    writer.emit(" ")?;
                    writer.emit_annotations(annotations, true)?;
                }
                writer.emit("[]")
            }
            type_name => {
                writer.emit_annotations(annotations, true)?;
                emit_type_name(writer, type_name)
            }
        }
    }

    fn string_literal(&self, value: &str, indent: &str) -> String {
        escape_string(value, indent, &[])
    }

    fn annotation_array_delimiters(&self) -> (&'static str, &'static str) {
        ("{", "}")
    }

    fn is_implicitly_visible(&self, class: &ClassName) -> bool {
        types::is_lang_package(class.package())
    }

    fn emit_dialect_literal(
        &self,
        writer: &mut CodeWriter<'_>,
        literal: &dyn DialectLiteral,
    ) -> Result<()> {
        match literal.as_any().downcast_ref::<TypeSpec>() {
            Some(type_spec) if literal.dialect() == Dialect::Java => {
                type_spec.emit(writer, None, &BTreeSet::new())
            }
            _ => Err(Error::dialect_mismatch(
                Dialect::Java,
                format!("{} construct", literal.dialect()),
            )),
        }
    }
}

fn java_annotations(type_ref: &TypeRef) -> Result<&[AnnotationRef]> {
    match type_ref.status() {
        TypeRefStatus::Neutral => Ok(&[]),
        TypeRefStatus::Java { annotations } => Ok(annotations),
        TypeRefStatus::Kotlin { .. } => Err(Error::dialect_mismatch(
            Dialect::Java,
            format!("Kotlin reference to {}", type_ref.type_name().describe()),
        )),
    }
}

fn emit_type_name(writer: &mut CodeWriter<'_>, type_name: &TypeName) -> Result<()> {
    match type_name {
        TypeName::Class(class) => writer.emit_class_name(class),
        TypeName::Parameterized { raw, arguments } => {
            writer.emit_class_name(raw)?;
            writer.emit("<")?;
            for (i, argument) in arguments.iter().enumerate() {
                if i > 0 {
                    writer.emit(", ")?;
                }
                writer.emit_type_ref(argument)?;
            }
            writer.emit(">")
        }
        TypeName::TypeVariable(variable) => writer.emit(variable.name()),
        TypeName::Wildcard(WildcardBounds::Unbounded) => writer.emit("?"),
        TypeName::Wildcard(WildcardBounds::Upper(upper)) => {
            if upper.type_name() == &TypeName::Class(types::object()) {
                return writer.emit("?");
            }
            writer.emit("? extends ")?;
            writer.emit_type_ref(upper)
        }
        TypeName::Wildcard(WildcardBounds::Lower(lower)) => {
            writer.emit("? super ")?;
            writer.emit_type_ref(lower)
        }
        TypeName::Primitive(keyword) => writer.emit(keyword),
        TypeName::Array(_) => writer.emit_type_ref(&TypeRef::new(type_name.clone())),
    }
}

/// Emit `<T extends A & B, U>` and bring the variables into scope.
///
/// The caller pops them with [`CodeWriter::pop_type_variables`] once the
/// declaration is complete.
pub(crate) fn emit_type_variables(
    writer: &mut CodeWriter<'_>,
    type_variables: &[TypeVariableName],
) -> Result<()> {
    if type_variables.is_empty() {
        return Ok(());
    }
    writer.push_type_variables(type_variables.iter().map(TypeVariableName::name));

    writer.emit("<")?;
    for (i, variable) in type_variables.iter().enumerate() {
        if i > 0 {
            writer.emit(", ")?;
        }
        writer.emit(variable.name())?;
        for (j, bound) in variable.bounds().iter().enumerate() {
            writer.emit(if j == 0 { " extends " } else { " & " })?;
            writer.emit_type_ref(bound)?;
        }
    }
    writer.emit(">")
}

pub(crate) fn pop_type_variables(writer: &mut CodeWriter<'_>, type_variables: &[TypeVariableName]) {
    writer.pop_type_variables(type_variables.iter().map(TypeVariableName::name));
}

/// Write a standalone render into a formatter, for `Display` impls.
pub(crate) fn write_rendered(f: &mut fmt::Formatter<'_>, rendered: Result<String>) -> fmt::Result {
    f.write_str(&rendered.map_err(|_| fmt::Error)?)
}

/// Render a code value as Java, fully qualified.
pub fn code_to_string(code: &CodeValue) -> Result<String> {
    render_standalone(&JAVA, |writer| writer.emit_code(code))
}

/// Render a type reference as Java, fully qualified.
pub fn type_to_string(type_ref: &TypeRef) -> Result<String> {
    render_standalone(&JAVA, |writer| writer.emit_type_ref(type_ref))
}

/// Render an annotation as Java, fully qualified.
pub fn annotation_to_string(annotation: &AnnotationRef) -> Result<String> {
    render_standalone(&JAVA, |writer| writer.emit_annotation(annotation))
}
