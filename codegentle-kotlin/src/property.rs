use std::{collections::BTreeSet, fmt};

use codegentle_common::{
    CodeWriter, Error, Result,
    annotation::AnnotationRef,
    code::{CodePart, CodeValue, Named},
    naming::{TypeRef, is_valid_identifier},
    writer::render_standalone,
};

use crate::{
    KotlinModifier, Mutability,
    modifier::implicit,
    strategy::{KOTLIN, write_rendered},
    types,
};

/// A property declaration, top level or in a type body.
#[derive(Debug, Clone, PartialEq)]
pub struct KotlinPropertySpec {
    name: String,
    type_ref: TypeRef,
    mutability: Mutability,
    kdoc: CodeValue,
    annotations: Vec<AnnotationRef>,
    modifiers: BTreeSet<KotlinModifier>,
    initializer: CodeValue,
    delegate: CodeValue,
    getter: CodeValue,
}

impl KotlinPropertySpec {
    pub fn builder(name: impl Into<String>, type_ref: impl Into<TypeRef>) -> KotlinPropertySpecBuilder {
        KotlinPropertySpecBuilder {
            spec: KotlinPropertySpec {
                name: name.into(),
                type_ref: type_ref.into(),
                mutability: Mutability::Val,
                kdoc: CodeValue::new(),
                annotations: Vec::new(),
                modifiers: BTreeSet::new(),
                initializer: CodeValue::new(),
                delegate: CodeValue::new(),
                getter: CodeValue::new(),
            },
        }
    }

    pub fn type_ref(&self) -> &TypeRef {
        &self.type_ref
    }

    pub fn mutability(&self) -> Mutability {
        self.mutability
    }

    pub fn modifiers(&self) -> &BTreeSet<KotlinModifier> {
        &self.modifiers
    }

    pub fn has_modifier(&self, modifier: KotlinModifier) -> bool {
        self.modifiers.contains(&modifier)
    }

    /// Whether the property is assigned, delegated or computed here.
    pub fn has_body(&self) -> bool {
        !(self.initializer.is_empty() && self.delegate.is_empty() && self.getter.is_empty())
    }

    /// Whether the property stores a value: an initializer or a delegate.
    pub fn has_initializer(&self) -> bool {
        !(self.initializer.is_empty() && self.delegate.is_empty())
    }

    pub(crate) fn modifiers_mut(&mut self) -> &mut BTreeSet<KotlinModifier> {
        &mut self.modifiers
    }

    pub(crate) fn emit(
        &self,
        writer: &mut CodeWriter<'_>,
        implicit_modifiers: &BTreeSet<KotlinModifier>,
    ) -> Result<()> {
        writer.emit_doc(&self.kdoc)?;
        writer.emit_annotations(&self.annotations, false)?;
        writer.emit_modifiers(&self.modifiers, implicit_modifiers)?;

        let mut declaration = CodeValue::builder()
            .add_part(CodePart::StatementBegin)
            .add_text(format!(
                "{} {}: ",
                self.mutability.keyword(),
                types::NAMING.safe_name(&self.name)
            ))
            .add_part(CodePart::type_ref(self.type_ref.clone()));
        if !self.initializer.is_empty() {
            declaration = declaration.add_text(" = ").add_code(&self.initializer);
        } else if !self.delegate.is_empty() {
            declaration = declaration.add_text(" by ").add_code(&self.delegate);
        }
        let declaration = declaration
            .add_text("\n")
            .add_part(CodePart::StatementEnd)
            .build();
        writer.emit_code(&declaration)?;

        if !self.getter.is_empty() {
            let getter = CodeValue::builder()
                .indent()
                .add_part(CodePart::StatementBegin)
                .add_text("get() = ")
                .add_code(&self.getter)
                .add_text("\n")
                .add_part(CodePart::StatementEnd)
                .unindent()
                .build();
            writer.emit_code(&getter)?;
        }
        Ok(())
    }
}

impl Named for KotlinPropertySpec {
    fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for KotlinPropertySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_rendered(
            f,
            render_standalone(&KOTLIN, |writer| self.emit(writer, &implicit([]))),
        )
    }
}

#[derive(Debug, Clone)]
pub struct KotlinPropertySpecBuilder {
    spec: KotlinPropertySpec,
}

impl KotlinPropertySpecBuilder {
    /// `var` instead of `val`.
    pub fn mutable(mut self, mutable: bool) -> Self {
        self.spec.mutability = if mutable {
            Mutability::Var
        } else {
            Mutability::Val
        };
        self
    }

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

    pub fn initializer(mut self, initializer: impl Into<CodeValue>) -> Self {
        self.spec.initializer = initializer.into();
        self
    }

    pub fn initializer_format(
        self,
        format: &str,
        arguments: impl IntoIterator<Item = CodePart>,
    ) -> Result<Self> {
        let initializer = CodeValue::of(format, arguments)?;
        Ok(self.initializer(initializer))
    }

    /// `by delegate`, e.g. `lazy { ... }`.
    pub fn delegate(mut self, delegate: impl Into<CodeValue>) -> Self {
        self.spec.delegate = delegate.into();
        self
    }

    /// A computed getter, rendered as `get() = expression`.
    pub fn getter(mut self, expression: impl Into<CodeValue>) -> Self {
        self.spec.getter = expression.into();
        self
    }

    pub fn build(self) -> Result<KotlinPropertySpec> {
        let spec = self.spec;
        if !is_valid_identifier(&spec.name) {
            return Err(Box::new(Error::InvalidName { name: spec.name }));
        }

        let assignments = [&spec.initializer, &spec.delegate, &spec.getter]
            .iter()
            .filter(|code| !code.is_empty())
            .count();
        if assignments > 1 {
            return Err(Error::invalid_declaration(format!(
                "property {} takes only one of initializer, delegate and getter",
                spec.name
            )));
        }

        if spec.has_modifier(KotlinModifier::Const)
            && (spec.mutability != Mutability::Val || spec.initializer.is_empty())
        {
            return Err(Error::invalid_declaration(format!(
                "const property {} must be a val with an initializer",
                spec.name
            )));
        }

        if spec.has_modifier(KotlinModifier::Lateinit)
            && (spec.mutability != Mutability::Var
                || spec.has_body()
                || spec.type_ref.is_nullable())
        {
            return Err(Error::invalid_declaration(format!(
                "lateinit property {} must be a non-null var without initializer",
                spec.name
            )));
        }

        Ok(spec)
    }
}
