use std::{collections::BTreeSet, fmt};

use codegentle_common::{
    CodeValueBuilder, CodeWriter, Error, Result,
    annotation::AnnotationRef,
    code::{CodePart, CodeValue, Named},
    naming::{TypeName, TypeRef, TypeVariableName, is_valid_identifier},
    writer::render_standalone,
};

use crate::{
    KotlinModifier, KotlinParameterSpec,
    modifier::implicit,
    parameter::emit_parameters,
    strategy::{
        KOTLIN, emit_name, emit_type_variables, emit_where_clause, pop_type_variables,
        write_rendered,
    },
    types,
};

/// The name secondary constructors are stored under.
pub const CONSTRUCTOR: &str = "constructor";

/// The constructor a secondary constructor delegates to.
#[derive(Debug, Clone, PartialEq)]
pub enum ConstructorDelegation {
    This(CodeValue),
    Super(CodeValue),
}

impl ConstructorDelegation {
    fn keyword(&self) -> &'static str {
        match self {
            Self::This(_) => "this",
            Self::Super(_) => "super",
        }
    }

    fn arguments(&self) -> &CodeValue {
        match self {
            Self::This(arguments) | Self::Super(arguments) => arguments,
        }
    }
}

/// A function or secondary constructor.
#[derive(Debug, Clone, PartialEq)]
pub struct KotlinFunctionSpec {
    name: String,
    kdoc: CodeValue,
    annotations: Vec<AnnotationRef>,
    modifiers: BTreeSet<KotlinModifier>,
    type_variables: Vec<TypeVariableName>,
    receiver: Option<TypeRef>,
    parameters: Vec<KotlinParameterSpec>,
    return_type: Option<TypeRef>,
    body: CodeValue,
    expression_body: bool,
    delegation: Option<ConstructorDelegation>,
}

impl KotlinFunctionSpec {
    pub fn builder(name: impl Into<String>) -> KotlinFunctionSpecBuilder {
        KotlinFunctionSpecBuilder::new(name.into())
    }

    pub fn constructor_builder() -> KotlinFunctionSpecBuilder {
        KotlinFunctionSpecBuilder::new(CONSTRUCTOR.to_string())
    }

    pub fn is_constructor(&self) -> bool {
        self.name == CONSTRUCTOR
    }

    pub fn modifiers(&self) -> &BTreeSet<KotlinModifier> {
        &self.modifiers
    }

    pub fn has_modifier(&self, modifier: KotlinModifier) -> bool {
        self.modifiers.contains(&modifier)
    }

    pub fn parameters(&self) -> &[KotlinParameterSpec] {
        &self.parameters
    }

    pub fn return_type(&self) -> Option<&TypeRef> {
        self.return_type.as_ref()
    }

    pub fn body(&self) -> &CodeValue {
        &self.body
    }

    pub(crate) fn modifiers_mut(&mut self) -> &mut BTreeSet<KotlinModifier> {
        &mut self.modifiers
    }

    /// The declared return type, unless it is `Unit`.
    fn written_return_type(&self) -> Option<&TypeRef> {
        self.return_type.as_ref().filter(|return_type| {
            return_type.is_nullable() || return_type.type_name() != &TypeName::Class(types::unit())
        })
    }

    fn kdoc_with_parameters(&self) -> CodeValue {
        let mut doc = self.kdoc.to_builder();
        let mut first_tag = true;
        for parameter in &self.parameters {
            if parameter.kdoc().is_empty() {
                continue;
            }
            if first_tag && !self.kdoc.is_empty() {
                doc = doc.add_text("\n");
            }
            first_tag = false;
            doc = doc
                .add_text(format!("@param {} ", parameter.name()))
                .add_code(parameter.kdoc());
        }
        doc.build()
    }

    pub(crate) fn emit(
        &self,
        writer: &mut CodeWriter<'_>,
        implicit_modifiers: &BTreeSet<KotlinModifier>,
    ) -> Result<()> {
        writer.emit_doc(&self.kdoc_with_parameters())?;
        writer.emit_annotations(&self.annotations, false)?;
        writer.emit_modifiers(&self.modifiers, implicit_modifiers)?;

        if self.is_constructor() {
            writer.emit(CONSTRUCTOR)?;
        } else {
            writer.emit("fun ")?;
            if !self.type_variables.is_empty() {
                emit_type_variables(writer, &self.type_variables)?;
                writer.emit(" ")?;
            }
            if let Some(receiver) = &self.receiver {
                writer.emit_type_ref(receiver)?;
                writer.emit(".")?;
            }
            emit_name(writer, &self.name)?;
        }
        emit_parameters(writer, &self.parameters)?;

        if let Some(delegation) = &self.delegation {
            writer.emit(" : ")?;
            writer.emit(delegation.keyword())?;
            writer.emit("(")?;
            writer.emit_code(delegation.arguments())?;
            writer.emit(")")?;
        }

        if let Some(return_type) = self.written_return_type() {
            writer.emit(": ")?;
            writer.emit_type_ref(return_type)?;
        }
        emit_where_clause(writer, &self.type_variables)?;

        if self.has_modifier(KotlinModifier::Abstract)
            || self.has_modifier(KotlinModifier::External)
            || (self.is_constructor() && self.body.is_empty())
        {
            writer.emit("\n")?;
        } else if self.expression_body {
            writer.emit(" = ")?;
            writer.emit_code(&CodeValue::from_parts([
                CodePart::StatementBegin,
                CodePart::code(self.body.clone()),
                CodePart::simple("\n"),
                CodePart::StatementEnd,
            ]))?;
        } else {
            writer.emit(" {\n")?;
            writer.indent();
            writer.emit_code_with_newline(&self.body)?;
            writer.unindent()?;
            writer.emit("}\n")?;
        }

        pop_type_variables(writer, &self.type_variables);
        Ok(())
    }
}

impl Named for KotlinFunctionSpec {
    fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for KotlinFunctionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_rendered(
            f,
            render_standalone(&KOTLIN, |writer| self.emit(writer, &implicit([]))),
        )
    }
}

#[derive(Debug, Clone)]
pub struct KotlinFunctionSpecBuilder {
    spec: KotlinFunctionSpec,
    code: CodeValueBuilder,
}

impl KotlinFunctionSpecBuilder {
    fn new(name: String) -> Self {
        Self {
            spec: KotlinFunctionSpec {
                name,
                kdoc: CodeValue::new(),
                annotations: Vec::new(),
                modifiers: BTreeSet::new(),
                type_variables: Vec::new(),
                receiver: None,
                parameters: Vec::new(),
                return_type: None,
                body: CodeValue::new(),
                expression_body: false,
                delegation: None,
            },
            code: CodeValueBuilder::default(),
        }
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

    pub fn add_type_variable(mut self, type_variable: TypeVariableName) -> Self {
        self.spec.type_variables.push(type_variable);
        self
    }

    /// Make this an extension function on `receiver`.
    pub fn receiver(mut self, receiver: impl Into<TypeRef>) -> Self {
        self.spec.receiver = Some(receiver.into());
        self
    }

    pub fn returns(mut self, return_type: impl Into<TypeRef>) -> Self {
        self.spec.return_type = Some(return_type.into());
        self
    }

    pub fn add_parameter(mut self, parameter: KotlinParameterSpec) -> Self {
        self.spec.parameters.push(parameter);
        self
    }

    pub fn add_parameter_of(
        self,
        name: impl Into<String>,
        type_ref: impl Into<TypeRef>,
    ) -> Result<Self> {
        let parameter = KotlinParameterSpec::of(name, type_ref)?;
        Ok(self.add_parameter(parameter))
    }

    pub fn add_code(mut self, code: &CodeValue) -> Self {
        self.code = self.code.add_code(code);
        self
    }

    /// Append one statement line. Kotlin statements take no semicolon.
    pub fn add_statement(
        mut self,
        format: &str,
        arguments: impl IntoIterator<Item = CodePart>,
    ) -> Result<Self> {
        self.code = self
            .code
            .add_part(CodePart::StatementBegin)
            .add(format, arguments)?
            .add_text("\n")
            .add_part(CodePart::StatementEnd);
        Ok(self)
    }

    pub fn begin_control_flow(
        mut self,
        control_flow: &str,
        arguments: impl IntoIterator<Item = CodePart>,
    ) -> Result<Self> {
        self.code = self.code.begin_control_flow(control_flow, arguments)?;
        Ok(self)
    }

    pub fn next_control_flow(
        mut self,
        control_flow: &str,
        arguments: impl IntoIterator<Item = CodePart>,
    ) -> Result<Self> {
        self.code = self.code.next_control_flow(control_flow, arguments)?;
        Ok(self)
    }

    pub fn end_control_flow(mut self) -> Self {
        self.code = self.code.end_control_flow();
        self
    }

    /// Use `= expression` instead of a block body.
    pub fn expression_body(mut self, expression: impl Into<CodeValue>) -> Self {
        self.spec.body = expression.into();
        self.spec.expression_body = true;
        self
    }

    /// Secondary constructors: delegate to `this(arguments)`.
    pub fn call_this_constructor(mut self, arguments: impl Into<CodeValue>) -> Self {
        self.spec.delegation = Some(ConstructorDelegation::This(arguments.into()));
        self
    }

    /// Secondary constructors: delegate to `super(arguments)`.
    pub fn call_super_constructor(mut self, arguments: impl Into<CodeValue>) -> Self {
        self.spec.delegation = Some(ConstructorDelegation::Super(arguments.into()));
        self
    }

    pub fn build(self) -> Result<KotlinFunctionSpec> {
        let mut spec = self.spec;
        if spec.expression_body {
            if !self.code.is_empty() {
                return Err(Error::invalid_declaration(format!(
                    "function {} has both an expression body and statements",
                    spec.name
                )));
            }
            if spec.body.is_empty() {
                return Err(Error::invalid_declaration(format!(
                    "expression body of function {} is empty",
                    spec.name
                )));
            }
        } else {
            spec.body = self.code.build();
        }

        if spec.is_constructor() {
            if spec.return_type.is_some() || spec.receiver.is_some() {
                return Err(Error::invalid_declaration(
                    "constructors have no return type or receiver",
                ));
            }
            if !spec.type_variables.is_empty() || spec.expression_body {
                return Err(Error::invalid_declaration(
                    "constructors have no type variables or expression body",
                ));
            }
        } else {
            if !is_valid_identifier(&spec.name) {
                return Err(Box::new(Error::InvalidName { name: spec.name }));
            }
            if spec.delegation.is_some() {
                return Err(Error::invalid_declaration(format!(
                    "only constructors delegate, not function {}",
                    spec.name
                )));
            }
        }

        let bodiless =
            spec.has_modifier(KotlinModifier::Abstract) || spec.has_modifier(KotlinModifier::External);
        if bodiless && !spec.body.is_empty() {
            return Err(Error::invalid_declaration(format!(
                "abstract or external function {} cannot have a body",
                spec.name
            )));
        }

        let varargs = spec
            .parameters
            .iter()
            .filter(|parameter| parameter.has_modifier(KotlinModifier::Vararg))
            .count();
        if varargs > 1 {
            return Err(Error::invalid_declaration(format!(
                "function {} has more than one vararg parameter",
                spec.name
            )));
        }

        Ok(spec)
    }
}
