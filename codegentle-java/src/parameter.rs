use std::{collections::BTreeSet, fmt};

use codegentle_common::{
    CodeWriter, Error, Result,
    annotation::AnnotationRef,
    code::{CodeValue, Named},
    naming::{TypeRef, is_valid_identifier},
    writer::render_standalone,
};

use crate::{
    JavaModifier,
    strategy::{JAVA, write_rendered},
};

/// A method, constructor or record-component parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSpec {
    name: String,
    type_ref: TypeRef,
    annotations: Vec<AnnotationRef>,
    modifiers: BTreeSet<JavaModifier>,
    javadoc: CodeValue,
}

impl ParameterSpec {
    pub fn builder(type_ref: impl Into<TypeRef>, name: impl Into<String>) -> ParameterSpecBuilder {
        ParameterSpecBuilder {
            spec: ParameterSpec {
                name: name.into(),
                type_ref: type_ref.into(),
                annotations: Vec::new(),
                modifiers: BTreeSet::new(),
                javadoc: CodeValue::new(),
            },
        }
    }

    /// A plain parameter without annotations or modifiers.
    pub fn of(type_ref: impl Into<TypeRef>, name: impl Into<String>) -> Result<Self> {
        Self::builder(type_ref, name).build()
    }

    pub fn type_ref(&self) -> &TypeRef {
        &self.type_ref
    }

    pub fn javadoc(&self) -> &CodeValue {
        &self.javadoc
    }

    pub(crate) fn emit(&self, writer: &mut CodeWriter<'_>, varargs: bool) -> Result<()> {
        writer.emit_annotations(&self.annotations, true)?;
        writer.emit_modifiers(&self.modifiers, &BTreeSet::new())?;
        match self.type_ref.type_name().array_component() {
            Some(component) if varargs => {
                writer.emit_type_ref(component)?;
                writer.emit("...")?;
            }
            _ => writer.emit_type_ref(&self.type_ref)?,
        }
        writer.emit(" ")?;
        writer.emit(&self.name)
    }
}

impl Named for ParameterSpec {
    fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for ParameterSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_rendered(f, render_standalone(&JAVA, |writer| self.emit(writer, false)))
    }
}

#[derive(Debug, Clone)]
pub struct ParameterSpecBuilder {
    spec: ParameterSpec,
}

impl ParameterSpecBuilder {
    pub fn add_annotation(mut self, annotation: impl Into<AnnotationRef>) -> Self {
        self.spec.annotations.push(annotation.into());
        self
    }

    pub fn add_modifier(mut self, modifier: JavaModifier) -> Self {
        self.spec.modifiers.insert(modifier);
        self
    }

    pub fn add_javadoc(mut self, doc: impl Into<CodeValue>) -> Self {
        self.spec.javadoc = std::mem::take(&mut self.spec.javadoc).concat(doc.into());
        self
    }

    pub fn build(self) -> Result<ParameterSpec> {
        if !is_valid_identifier(&self.spec.name) {
            return Err(Box::new(Error::InvalidName {
                name: self.spec.name,
            }));
        }
        if self
            .spec
            .modifiers
            .iter()
            .any(|modifier| *modifier != JavaModifier::Final)
        {
            return Err(Error::invalid_declaration(format!(
                "parameter {} may only be final",
                self.spec.name
            )));
        }
        Ok(self.spec)
    }
}
