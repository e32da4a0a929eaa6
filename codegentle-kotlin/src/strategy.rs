//! The Kotlin dialect of the code writer.

use std::fmt;

use codegentle_common::{
    CodeWriter, Error, Result, WriteStrategy,
    annotation::AnnotationRef,
    code::{CodeValue, DialectLiteral},
    naming::{ClassName, Dialect, TypeName, TypeRef, TypeRefStatus, TypeVariableName, WildcardBounds},
    writer::{escape_string, render_standalone},
};

use crate::{KotlinTypeSpec, types};

/// Kotlin syntax for types, strings and annotation arrays.
#[derive(Debug, Default, Clone, Copy)]
pub struct KotlinStrategy;

/// The shared Kotlin strategy.
pub static KOTLIN: KotlinStrategy = KotlinStrategy;

impl WriteStrategy for KotlinStrategy {
    fn dialect(&self) -> Dialect {
        Dialect::Kotlin
    }

    fn emit_type_ref(&self, writer: &mut CodeWriter<'_>, type_ref: &TypeRef) -> Result<()> {
        let (nullable, annotations): (bool, &[AnnotationRef]) = match type_ref.status() {
            TypeRefStatus::Neutral => (false, &[]),
            TypeRefStatus::Kotlin {
                nullable,
                annotations,
            } => (*nullable, annotations),
            TypeRefStatus::Java { .. } => {
                return Err(Error::dialect_mismatch(
                    Dialect::Kotlin,
                    format!("Java reference to {}", type_ref.type_name().describe()),
                ));
            }
        };

        writer.emit_annotations(annotations, true)?;
        emit_type_name(writer, type_ref.type_name())?;
        if nullable {
            writer.emit("?")?;
        }
        Ok(())
    }

    fn string_literal(&self, value: &str, indent: &str) -> String {
        // A line may not start with `+` in Kotlin, so line feeds stay escaped
        // inside one literal.
        escape_string(value, indent, &[('$', "\\$"), ('\n', "\\n")])
    }

    fn annotation_array_delimiters(&self) -> (&'static str, &'static str) {
        ("[", "]")
    }

    fn is_implicitly_visible(&self, class: &ClassName) -> bool {
        types::is_default_import(class.package())
    }

    fn emit_dialect_literal(
        &self,
        writer: &mut CodeWriter<'_>,
        literal: &dyn DialectLiteral,
    ) -> Result<()> {
        match literal.as_any().downcast_ref::<KotlinTypeSpec>() {
            Some(type_spec) if literal.dialect() == Dialect::Kotlin => type_spec.emit_literal(writer),
            _ => Err(Error::dialect_mismatch(
                Dialect::Kotlin,
                format!("{} construct", literal.dialect()),
            )),
        }
    }
}

fn emit_type_name(writer: &mut CodeWriter<'_>, type_name: &TypeName) -> Result<()> {
    match type_name {
        TypeName::Class(class) => writer.emit_class_name(class),
        TypeName::Parameterized { raw, arguments } => {
            writer.emit_class_name(raw)?;
            emit_type_arguments(writer, arguments)
        }
        TypeName::Array(component) => {
            writer.emit_class_name(&types::array())?;
            emit_type_arguments(writer, std::slice::from_ref(component.as_ref()))
        }
        TypeName::TypeVariable(variable) => writer.emit(variable.name()),
        TypeName::Wildcard(WildcardBounds::Unbounded) => writer.emit("*"),
        TypeName::Wildcard(WildcardBounds::Upper(upper)) => {
            writer.emit("out ")?;
            writer.emit_type_ref(upper)
        }
        TypeName::Wildcard(WildcardBounds::Lower(lower)) => {
            writer.emit("in ")?;
            writer.emit_type_ref(lower)
        }
        TypeName::Primitive(_) => Err(Error::dialect_mismatch(
            Dialect::Kotlin,
            type_name.describe(),
        )),
    }
}

fn emit_type_arguments(writer: &mut CodeWriter<'_>, arguments: &[TypeRef]) -> Result<()> {
    writer.emit("<")?;
    for (i, argument) in arguments.iter().enumerate() {
        if i > 0 {
            writer.emit(", ")?;
        }
        writer.emit_type_ref(argument)?;
    }
    writer.emit(">")
}

/// Emit `<T : A, U>` and bring the variables into scope.
///
/// Variables with several bounds are written bare here; their bounds go to
/// the `where` clause emitted by [`emit_where_clause`].
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
        if let [bound] = variable.bounds() {
            writer.emit(" : ")?;
            writer.emit_type_ref(bound)?;
        }
    }
    writer.emit(">")
}

/// Emit ` where T : A, T : B` for variables with more than one bound.
pub(crate) fn emit_where_clause(
    writer: &mut CodeWriter<'_>,
    type_variables: &[TypeVariableName],
) -> Result<()> {
    let mut first = true;
    for variable in type_variables.iter().filter(|v| v.bounds().len() > 1) {
        for bound in variable.bounds() {
            writer.emit(if first { " where " } else { ", " })?;
            first = false;
            writer.emit(variable.name())?;
            writer.emit(" : ")?;
            writer.emit_type_ref(bound)?;
        }
    }
    Ok(())
}

pub(crate) fn pop_type_variables(writer: &mut CodeWriter<'_>, type_variables: &[TypeVariableName]) {
    writer.pop_type_variables(type_variables.iter().map(TypeVariableName::name));
}

/// Emit a declared name, quoting keywords with backticks.
pub(crate) fn emit_name(writer: &mut CodeWriter<'_>, name: &str) -> Result<()> {
    writer.emit(&types::NAMING.safe_name(name))
}

/// Write a standalone render into a formatter, for `Display` impls.
pub(crate) fn write_rendered(f: &mut fmt::Formatter<'_>, rendered: Result<String>) -> fmt::Result {
    f.write_str(&rendered.map_err(|_| fmt::Error)?)
}

/// Render a code value as Kotlin, fully qualified.
pub fn code_to_string(code: &CodeValue) -> Result<String> {
    render_standalone(&KOTLIN, |writer| writer.emit_code(code))
}

/// Render a type reference as Kotlin, fully qualified.
pub fn type_to_string(type_ref: &TypeRef) -> Result<String> {
    render_standalone(&KOTLIN, |writer| writer.emit_type_ref(type_ref))
}

/// Render an annotation as Kotlin, fully qualified.
pub fn annotation_to_string(annotation: &AnnotationRef) -> Result<String> {
    render_standalone(&KOTLIN, |writer| writer.emit_annotation(annotation))
}
