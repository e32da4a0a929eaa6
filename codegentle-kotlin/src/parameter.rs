use std::{collections::BTreeSet, fmt};

use codegentle_common::{
    CodeWriter, Error, Result,
    annotation::AnnotationRef,
    code::{CodeValue, Named},
    naming::{Keyword, TypeRef, is_valid_identifier},
    writer::render_standalone,
};

use crate::{
    KotlinModifier,
    modifier::implicit,
    strategy::{KOTLIN, emit_name, write_rendered},
};

/// Whether a declaration introduces a read-only or a mutable binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mutability {
    Val,
    Var,
}

impl Mutability {
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Val => "val",
            Self::Var => "var",
        }
    }
}

/// A function or constructor parameter.
///
/// Primary constructor parameters may also declare a property with
/// [`KotlinParameterSpecBuilder::property`].
#[derive(Debug, Clone, PartialEq)]
pub struct KotlinParameterSpec {
    name: String,
    type_ref: TypeRef,
    kdoc: CodeValue,
    annotations: Vec<AnnotationRef>,
    modifiers: BTreeSet<KotlinModifier>,
    default_value: CodeValue,
    property: Option<Mutability>,
}

impl KotlinParameterSpec {
    pub fn builder(name: impl Into<String>, type_ref: impl Into<TypeRef>) -> KotlinParameterSpecBuilder {
        KotlinParameterSpecBuilder {
            spec: KotlinParameterSpec {
                name: name.into(),
                type_ref: type_ref.into(),
                kdoc: CodeValue::new(),
                annotations: Vec::new(),
                modifiers: BTreeSet::new(),
                default_value: CodeValue::new(),
                property: None,
            },
        }
    }

    /// A plain `name: Type` parameter.
    pub fn of(name: impl Into<String>, type_ref: impl Into<TypeRef>) -> Result<Self> {
        Self::builder(name, type_ref).build()
    }

    pub fn type_ref(&self) -> &TypeRef {
        &self.type_ref
    }

    pub fn kdoc(&self) -> &CodeValue {
        &self.kdoc
    }

    pub fn property(&self) -> Option<Mutability> {
        self.property
    }

    pub fn has_modifier(&self, modifier: KotlinModifier) -> bool {
        self.modifiers.contains(&modifier)
    }

    pub(crate) fn emit(&self, writer: &mut CodeWriter<'_>) -> Result<()> {
        writer.emit_annotations(&self.annotations, true)?;
        writer.emit_modifiers(&self.modifiers, &implicit([]))?;
        if let Some(mutability) = self.property {
            writer.emit(mutability.keyword())?;
            writer.emit(" ")?;
        }
        emit_name(writer, &self.name)?;
        writer.emit(": ")?;
        writer.emit_type_ref(&self.type_ref)?;
        if !self.default_value.is_empty() {
            writer.emit(" = ")?;
            writer.emit_code(&self.default_value)?;
        }
        Ok(())
    }
}

/// Emit `(a: A, b: B)`, breaking after `(` or a comma when the line is full.
pub(crate) fn emit_parameters(
    writer: &mut CodeWriter<'_>,
    parameters: &[KotlinParameterSpec],
) -> Result<()> {
    writer.emit("(")?;
    writer.zero_width_space()?;
    for (i, parameter) in parameters.iter().enumerate() {
        if i > 0 {
            writer.emit(",")?;
            writer.wrapping_space()?;
        }
        parameter.emit(writer)?;
    }
    writer.emit(")")
}

impl Named for KotlinParameterSpec {
    fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for KotlinParameterSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_rendered(f, render_standalone(&KOTLIN, |writer| self.emit(writer)))
    }
}

#[derive(Debug, Clone)]
pub struct KotlinParameterSpecBuilder {
    spec: KotlinParameterSpec,
}

impl KotlinParameterSpecBuilder {
    pub fn add_kdoc(mut self, doc: impl Into<CodeValue>) -> Self {
        self.spec.kdoc = std::mem::take(&mut self.spec.kdoc).concat(doc.into());
        self
    }

    pub fn add_annotation(mut self, annotation: impl Into<AnnotationRef>) -> Self {
        self.spec.annotations.push(annotation.into());
        self
    }

    pub fn add_modifiers(mut self, modifiers: impl IntoIterator<Item = KotlinModifier>) -> Self {
        self.spec.modifiers.extend(modifiers);
        self
    }

    pub fn default_value(mut self, value: impl Into<CodeValue>) -> Self {
        self.spec.default_value = value.into();
        self
    }

    /// Declare a property of the same name, for primary constructors.
    pub fn property(mut self, mutability: Mutability) -> Self {
        self.spec.property = Some(mutability);
        self
    }

    pub fn build(self) -> Result<KotlinParameterSpec> {
        if !is_valid_identifier(&self.spec.name) {
            return Err(Box::new(Error::InvalidName {
                name: self.spec.name,
            }));
        }
        // Without a property only the parameter modifiers apply.
        if self.spec.property.is_none() {
            let misplaced = self.spec.modifiers.iter().find(|modifier| {
                !matches!(
                    modifier,
                    KotlinModifier::Vararg | KotlinModifier::Noinline | KotlinModifier::Crossinline
                )
            });
            if let Some(modifier) = misplaced {
                return Err(Error::invalid_declaration(format!(
                    "parameter {} cannot be {}",
                    self.spec.name,
                    modifier.keyword()
                )));
            }
        }
        Ok(self.spec)
    }
}
