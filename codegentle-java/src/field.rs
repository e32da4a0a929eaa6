use std::{collections::BTreeSet, fmt};

use codegentle_common::{
    CodeWriter, Error, Result,
    annotation::AnnotationRef,
    code::{CodePart, CodeValue, Named},
    naming::{TypeRef, is_valid_identifier},
    writer::render_standalone,
};

use crate::{
    JavaModifier,
    strategy::{JAVA, write_rendered},
};

/// A field declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    name: String,
    type_ref: TypeRef,
    javadoc: CodeValue,
    annotations: Vec<AnnotationRef>,
    modifiers: BTreeSet<JavaModifier>,
    initializer: CodeValue,
}

impl FieldSpec {
    pub fn builder(type_ref: impl Into<TypeRef>, name: impl Into<String>) -> FieldSpecBuilder {
        FieldSpecBuilder {
            spec: FieldSpec {
                name: name.into(),
                type_ref: type_ref.into(),
                javadoc: CodeValue::new(),
                annotations: Vec::new(),
                modifiers: BTreeSet::new(),
                initializer: CodeValue::new(),
            },
        }
    }

    pub fn type_ref(&self) -> &TypeRef {
        &self.type_ref
    }

    pub fn modifiers(&self) -> &BTreeSet<JavaModifier> {
        &self.modifiers
    }

    pub fn has_modifier(&self, modifier: JavaModifier) -> bool {
        self.modifiers.contains(&modifier)
    }

    pub(crate) fn modifiers_mut(&mut self) -> &mut BTreeSet<JavaModifier> {
        &mut self.modifiers
    }

    pub(crate) fn emit(
        &self,
        writer: &mut CodeWriter<'_>,
        implicit_modifiers: &BTreeSet<JavaModifier>,
    ) -> Result<()> {
        writer.emit_doc(&self.javadoc)?;
        writer.emit_annotations(&self.annotations, false)?;
        writer.emit_modifiers(&self.modifiers, implicit_modifiers)?;

        let mut declaration = CodeValue::builder()
            .add_part(CodePart::StatementBegin)
            .add_part(CodePart::type_ref(self.type_ref.clone()))
            .add_text(" ")
            .add_part(CodePart::named(self));
        if !self.initializer.is_empty() {
            declaration = declaration.add_text(" = ").add_code(&self.initializer);
        }
        let declaration = declaration
            .add_text(";\n")
            .add_part(CodePart::StatementEnd)
            .build();
        writer.emit_code(&declaration)
    }
}

impl Named for FieldSpec {
    fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_rendered(
            f,
            render_standalone(&JAVA, |writer| self.emit(writer, &BTreeSet::new())),
        )
    }
}

#[derive(Debug, Clone)]
pub struct FieldSpecBuilder {
    spec: FieldSpec,
}

impl FieldSpecBuilder {
    pub fn add_javadoc(mut self, doc: impl Into<CodeValue>) -> Self {
        self.spec.javadoc = std::mem::take(&mut self.spec.javadoc).concat(doc.into());
        self
    }

    pub fn add_annotation(mut self, annotation: impl Into<AnnotationRef>) -> Self {
        self.spec.annotations.push(annotation.into());
        self
    }

    pub fn add_modifiers(mut self, modifiers: impl IntoIterator<Item = JavaModifier>) -> Self {
        self.spec.modifiers.extend(modifiers);
        self
    }

    pub fn initializer(mut self, initializer: impl Into<CodeValue>) -> Self {
        self.spec.initializer = initializer.into();
        self
    }

    /// Set the initializer from a format and its arguments.
    pub fn initializer_format(
        self,
        format: &str,
        arguments: impl IntoIterator<Item = CodePart>,
    ) -> Result<Self> {
        let initializer = CodeValue::of(format, arguments)?;
        Ok(self.initializer(initializer))
    }

    pub fn build(self) -> Result<FieldSpec> {
        if !is_valid_identifier(&self.spec.name) {
            return Err(Box::new(Error::InvalidName {
                name: self.spec.name,
            }));
        }
        Ok(self.spec)
    }
}
