use std::{collections::BTreeSet, fmt};

use codegentle_common::{
    CodeValueBuilder, CodeWriter, Error, Result,
    annotation::AnnotationRef,
    code::{CodePart, CodeValue, Named},
    naming::{TypeRef, TypeVariableName, is_valid_identifier},
    writer::render_standalone,
};

use crate::{
    JavaModifier, ParameterSpec,
    strategy::{JAVA, emit_type_variables, pop_type_variables, write_rendered},
    types,
};

/// The name constructors are stored under.
pub const CONSTRUCTOR: &str = "<init>";

/// A method or constructor declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodSpec {
    name: String,
    javadoc: CodeValue,
    annotations: Vec<AnnotationRef>,
    modifiers: BTreeSet<JavaModifier>,
    type_variables: Vec<TypeVariableName>,
    return_type: Option<TypeRef>,
    parameters: Vec<ParameterSpec>,
    varargs: bool,
    exceptions: Vec<TypeRef>,
    code: CodeValue,
    default_value: CodeValue,
}

impl MethodSpec {
    pub fn builder(name: impl Into<String>) -> MethodSpecBuilder {
        MethodSpecBuilder::new(name.into())
    }

    pub fn constructor_builder() -> MethodSpecBuilder {
        MethodSpecBuilder::new(CONSTRUCTOR.to_string())
    }

    pub fn is_constructor(&self) -> bool {
        self.name == CONSTRUCTOR
    }

    pub fn modifiers(&self) -> &BTreeSet<JavaModifier> {
        &self.modifiers
    }

    pub fn has_modifier(&self, modifier: JavaModifier) -> bool {
        self.modifiers.contains(&modifier)
    }

    pub fn parameters(&self) -> &[ParameterSpec] {
        &self.parameters
    }

    pub fn return_type(&self) -> Option<&TypeRef> {
        self.return_type.as_ref()
    }

    pub fn code(&self) -> &CodeValue {
        &self.code
    }

    pub(crate) fn modifiers_mut(&mut self) -> &mut BTreeSet<JavaModifier> {
        &mut self.modifiers
    }

    /// The method doc followed by one `@param` line per documented parameter.
    fn javadoc_with_parameters(&self) -> CodeValue {
        let mut doc = self.javadoc.to_builder();
        let mut first_tag = true;
        for parameter in &self.parameters {
            if parameter.javadoc().is_empty() {
                continue;
            }
            if first_tag && !self.javadoc.is_empty() {
                doc = doc.add_text("\n");
            }
            first_tag = false;
            doc = doc
                .add_text(format!("@param {} ", parameter.name()))
                .add_code(parameter.javadoc());
        }
        doc.build()
    }

    /// Emit the declaration. `enclosing_name` names constructors.
    pub(crate) fn emit(
        &self,
        writer: &mut CodeWriter<'_>,
        enclosing_name: Option<&str>,
        implicit_modifiers: &BTreeSet<JavaModifier>,
    ) -> Result<()> {
        writer.emit_doc(&self.javadoc_with_parameters())?;
        writer.emit_annotations(&self.annotations, false)?;
        writer.emit_modifiers(&self.modifiers, implicit_modifiers)?;

        if !self.type_variables.is_empty() {
            emit_type_variables(writer, &self.type_variables)?;
            writer.emit(" ")?;
        }

        if self.is_constructor() {
            let name = enclosing_name.ok_or_else(|| {
                Error::invalid_declaration("constructor emitted outside of a type")
            })?;
            writer.emit(name)?;
        } else {
            match &self.return_type {
                Some(return_type) => writer.emit_type_ref(return_type)?,
                None => writer.emit_type_name(&types::VOID)?,
            }
            writer.emit(" ")?;
            writer.emit(&self.name)?;
        }
        writer.emit("(")?;
        writer.zero_width_space()?;

        let last = self.parameters.len().saturating_sub(1);
        for (i, parameter) in self.parameters.iter().enumerate() {
            if i > 0 {
                writer.emit(",")?;
                writer.wrapping_space()?;
            }
            parameter.emit(writer, self.varargs && i == last)?;
        }
        writer.emit(")")?;

        if !self.default_value.is_empty() {
            writer.emit(" default ")?;
            writer.emit_code(&self.default_value)?;
        }

        if !self.exceptions.is_empty() {
            writer.wrapping_space()?;
            writer.emit("throws")?;
            for (i, exception) in self.exceptions.iter().enumerate() {
                if i > 0 {
                    writer.emit(",")?;
                }
                writer.wrapping_space()?;
                writer.emit_type_ref(exception)?;
            }
        }

        if self.has_modifier(JavaModifier::Abstract) {
            writer.emit(";\n")?;
        } else if self.has_modifier(JavaModifier::Native) {
            writer.emit_code(&self.code)?;
            writer.emit(";\n")?;
        } else {
            writer.emit(" {\n")?;
            writer.indent();
            writer.emit_code_with_newline(&self.code)?;
            writer.unindent()?;
            writer.emit("}\n")?;
        }

        pop_type_variables(writer, &self.type_variables);
        Ok(())
    }
}

impl Named for MethodSpec {
    fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for MethodSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_rendered(
            f,
            render_standalone(&JAVA, |writer| {
                self.emit(writer, Some("Constructor"), &BTreeSet::new())
            }),
        )
    }
}

#[derive(Debug, Clone)]
pub struct MethodSpecBuilder {
    spec: MethodSpec,
    code: CodeValueBuilder,
}

impl MethodSpecBuilder {
    fn new(name: String) -> Self {
        Self {
            spec: MethodSpec {
                name,
                javadoc: CodeValue::new(),
                annotations: Vec::new(),
                modifiers: BTreeSet::new(),
                type_variables: Vec::new(),
                return_type: None,
                parameters: Vec::new(),
                varargs: false,
                exceptions: Vec::new(),
                code: CodeValue::new(),
                default_value: CodeValue::new(),
            },
            code: CodeValueBuilder::default(),
        }
    }

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

    pub fn add_type_variable(mut self, type_variable: TypeVariableName) -> Self {
        self.spec.type_variables.push(type_variable);
        self
    }

    pub fn returns(mut self, return_type: impl Into<TypeRef>) -> Self {
        self.spec.return_type = Some(return_type.into());
        self
    }

    pub fn add_parameter(mut self, parameter: ParameterSpec) -> Self {
        self.spec.parameters.push(parameter);
        self
    }

    /// Add a plain parameter.
    pub fn add_parameter_of(
        self,
        type_ref: impl Into<TypeRef>,
        name: impl Into<String>,
    ) -> Result<Self> {
        let parameter = ParameterSpec::of(type_ref, name)?;
        Ok(self.add_parameter(parameter))
    }

    pub fn varargs(mut self, varargs: bool) -> Self {
        self.spec.varargs = varargs;
        self
    }

    pub fn add_exception(mut self, exception: impl Into<TypeRef>) -> Self {
        self.spec.exceptions.push(exception.into());
        self
    }

    pub fn add_code(mut self, code: &CodeValue) -> Self {
        self.code = self.code.add_code(code);
        self
    }

    pub fn add_statement(
        mut self,
        format: &str,
        arguments: impl IntoIterator<Item = CodePart>,
    ) -> Result<Self> {
        self.code = self.code.add_statement(format, arguments)?;
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

    /// Annotation members only: `default value`.
    pub fn default_value(mut self, value: impl Into<CodeValue>) -> Self {
        self.spec.default_value = value.into();
        self
    }

    pub fn build(self) -> Result<MethodSpec> {
        let mut spec = self.spec;
        spec.code = self.code.build();

        if spec.is_constructor() {
            if spec.return_type.is_some() {
                return Err(Error::invalid_declaration(
                    "constructors have no return type",
                ));
            }
        } else if !is_valid_identifier(&spec.name) {
            return Err(Box::new(Error::InvalidName { name: spec.name }));
        }

        if spec.has_modifier(JavaModifier::Abstract) && !spec.code.is_empty() {
            return Err(Error::invalid_declaration(format!(
                "abstract method {} cannot have code",
                spec.name
            )));
        }

        if spec.varargs {
            let last_is_array = spec
                .parameters
                .last()
                .is_some_and(|parameter| parameter.type_ref().type_name().is_array());
            if !last_is_array {
                return Err(Error::invalid_declaration(format!(
                    "last parameter of varargs method {} must be an array",
                    spec.name
                )));
            }
        }

        Ok(spec)
    }
}
