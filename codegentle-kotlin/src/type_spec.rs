//! Classes, interfaces, objects, enums, annotation and value classes, and
//! anonymous `object :` expressions.

use std::{any::Any, collections::BTreeSet, fmt};

use codegentle_common::{
    CodeWriter, Error, Result, TypeScope,
    annotation::AnnotationRef,
    code::{CodeValue, DialectLiteral, LiteralValue, Named},
    naming::{Dialect, TypeRef, TypeVariableName, is_valid_identifier},
    writer::render_standalone,
};
use indexmap::IndexMap;

use crate::{
    KotlinFunctionSpec, KotlinModifier, KotlinParameterSpec, KotlinPropertySpec, Mutability,
    modifier::implicit,
    parameter::emit_parameters,
    strategy::{
        KOTLIN, emit_name, emit_type_variables, emit_where_clause, pop_type_variables,
        write_rendered,
    },
};

/// Name of a companion object declared without one.
pub const DEFAULT_COMPANION_NAME: &str = "Companion";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KotlinTypeKind {
    Class,
    Interface,
    Object,
    CompanionObject,
    Enum,
    Annotation,
    Value,
}

impl KotlinTypeKind {
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Interface => "interface",
            Self::Object => "object",
            Self::CompanionObject => "companion object",
            Self::Enum => "enum class",
            Self::Annotation => "annotation class",
            Self::Value => "value class",
        }
    }

    fn is_object(self) -> bool {
        matches!(self, Self::Object | Self::CompanionObject)
    }

    fn takes_primary_constructor(self) -> bool {
        matches!(self, Self::Class | Self::Enum | Self::Annotation | Self::Value)
    }

    fn takes_superclass(self) -> bool {
        matches!(self, Self::Class | Self::Object | Self::CompanionObject)
    }

    /// Modifiers already spelled out by the keyword.
    fn keyword_modifiers(self) -> BTreeSet<KotlinModifier> {
        match self {
            Self::Enum => implicit([KotlinModifier::Enum]),
            Self::Annotation => implicit([KotlinModifier::Annotation]),
            Self::Value => implicit([KotlinModifier::Value]),
            Self::CompanionObject => implicit([KotlinModifier::Companion]),
            _ => implicit([]),
        }
    }

    /// Modifiers every member of this kind has without writing them.
    fn implicit_member_modifiers(self) -> BTreeSet<KotlinModifier> {
        match self {
            Self::Interface => implicit([KotlinModifier::Abstract]),
            _ => implicit([]),
        }
    }
}

/// A Kotlin type declaration.
///
/// Anonymous objects and enum constant bodies are type specs without a name;
/// their superclass constructor arguments become the constant's arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct KotlinTypeSpec {
    kind: KotlinTypeKind,
    name: String,
    anonymous: bool,
    kdoc: CodeValue,
    annotations: Vec<AnnotationRef>,
    modifiers: BTreeSet<KotlinModifier>,
    type_variables: Vec<TypeVariableName>,
    primary_constructor: Vec<KotlinParameterSpec>,
    superclass: Option<TypeRef>,
    superclass_arguments: CodeValue,
    superinterfaces: Vec<TypeRef>,
    enum_constants: IndexMap<String, KotlinTypeSpec>,
    properties: Vec<KotlinPropertySpec>,
    init_block: CodeValue,
    functions: Vec<KotlinFunctionSpec>,
    types: Vec<KotlinTypeSpec>,
}

/// What was emitted last in a body, for blank-line separation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Member {
    Property,
    Other,
}

impl KotlinTypeSpec {
    pub fn class_builder(name: impl Into<String>) -> KotlinTypeSpecBuilder {
        KotlinTypeSpecBuilder::new(KotlinTypeKind::Class, name.into(), false)
    }

    pub fn interface_builder(name: impl Into<String>) -> KotlinTypeSpecBuilder {
        KotlinTypeSpecBuilder::new(KotlinTypeKind::Interface, name.into(), false)
    }

    pub fn object_builder(name: impl Into<String>) -> KotlinTypeSpecBuilder {
        KotlinTypeSpecBuilder::new(KotlinTypeKind::Object, name.into(), false)
    }

    /// A companion object, named `Companion` unless `name` is given.
    pub fn companion_object_builder(name: Option<&str>) -> KotlinTypeSpecBuilder {
        KotlinTypeSpecBuilder::new(
            KotlinTypeKind::CompanionObject,
            name.unwrap_or(DEFAULT_COMPANION_NAME).to_string(),
            false,
        )
    }

    pub fn enum_builder(name: impl Into<String>) -> KotlinTypeSpecBuilder {
        KotlinTypeSpecBuilder::new(KotlinTypeKind::Enum, name.into(), false)
    }

    pub fn annotation_builder(name: impl Into<String>) -> KotlinTypeSpecBuilder {
        KotlinTypeSpecBuilder::new(KotlinTypeKind::Annotation, name.into(), false)
    }

    pub fn value_class_builder(name: impl Into<String>) -> KotlinTypeSpecBuilder {
        KotlinTypeSpecBuilder::new(KotlinTypeKind::Value, name.into(), false)
    }

    /// An `object : Supertype { ... }` expression, or the body and
    /// arguments of an enum constant.
    pub fn anonymous_object_builder() -> KotlinTypeSpecBuilder {
        KotlinTypeSpecBuilder::new(KotlinTypeKind::Object, String::new(), true)
    }

    pub fn kind(&self) -> KotlinTypeKind {
        self.kind
    }

    pub fn is_anonymous(&self) -> bool {
        self.anonymous
    }

    pub fn modifiers(&self) -> &BTreeSet<KotlinModifier> {
        &self.modifiers
    }

    pub fn properties(&self) -> &[KotlinPropertySpec] {
        &self.properties
    }

    pub fn functions(&self) -> &[KotlinFunctionSpec] {
        &self.functions
    }

    pub fn types(&self) -> &[KotlinTypeSpec] {
        &self.types
    }

    fn has_members(&self) -> bool {
        !self.enum_constants.is_empty()
            || !self.properties.is_empty()
            || !self.init_block.is_empty()
            || !self.functions.is_empty()
            || !self.types.is_empty()
    }

    fn has_secondary_constructors(&self) -> bool {
        self.functions.iter().any(KotlinFunctionSpec::is_constructor)
    }

    fn scope(&self) -> TypeScope {
        TypeScope::new(self.name.clone(), self.types.iter().map(|nested| nested.name.clone()))
    }

    /// Emit as the value of a code part, e.g. an `object :` initializer.
    pub(crate) fn emit_literal(&self, writer: &mut CodeWriter<'_>) -> Result<()> {
        self.emit(writer, None, &implicit([]))
    }

    /// Emit the declaration. `enum_name` is set for enum constant bodies.
    pub(crate) fn emit(
        &self,
        writer: &mut CodeWriter<'_>,
        enum_name: Option<&str>,
        implicit_modifiers: &BTreeSet<KotlinModifier>,
    ) -> Result<()> {
        writer.detached_statement(|writer| self.emit_detached(writer, enum_name, implicit_modifiers))
    }

    fn emit_detached(
        &self,
        writer: &mut CodeWriter<'_>,
        enum_name: Option<&str>,
        implicit_modifiers: &BTreeSet<KotlinModifier>,
    ) -> Result<()> {
        if let Some(enum_name) = enum_name {
            writer.emit_doc(&self.kdoc)?;
            writer.emit_annotations(&self.annotations, false)?;
            emit_name(writer, enum_name)?;
            if !self.superclass_arguments.is_empty() {
                writer.emit("(")?;
                writer.emit_code(&self.superclass_arguments)?;
                writer.emit(")")?;
            }
            if !self.has_members() {
                return Ok(());
            }
            writer.emit(" {\n")?;
        } else if self.anonymous {
            writer.emit("object")?;
            self.emit_supertypes(writer)?;
            writer.emit(" {\n")?;
        } else {
            self.emit_header(writer, implicit_modifiers)?;
            if !self.has_members() {
                pop_type_variables(writer, &self.type_variables);
                return writer.emit("\n");
            }
            writer.emit(" {\n")?;
        }

        writer.push_type(self.scope());
        writer.indent();
        self.emit_members(writer)?;
        writer.unindent()?;
        writer.pop_type();
        pop_type_variables(writer, &self.type_variables);

        writer.emit("}")?;
        if enum_name.is_none() && !self.anonymous {
            writer.emit("\n")?;
        }
        Ok(())
    }

    fn emit_header(
        &self,
        writer: &mut CodeWriter<'_>,
        implicit_modifiers: &BTreeSet<KotlinModifier>,
    ) -> Result<()> {
        writer.push_type(TypeScope::named(self.name.clone()));

        writer.emit_doc(&self.kdoc)?;
        writer.emit_annotations(&self.annotations, false)?;
        let mut implicit = implicit_modifiers.clone();
        implicit.extend(self.kind.keyword_modifiers());
        writer.emit_modifiers(&self.modifiers, &implicit)?;
        writer.emit(self.kind.keyword())?;
        if !(self.kind == KotlinTypeKind::CompanionObject && self.name == DEFAULT_COMPANION_NAME) {
            writer.emit(" ")?;
            emit_name(writer, &self.name)?;
        }
        emit_type_variables(writer, &self.type_variables)?;

        if !self.primary_constructor.is_empty() {
            emit_parameters(writer, &self.primary_constructor)?;
        }
        self.emit_supertypes(writer)?;
        emit_where_clause(writer, &self.type_variables)?;

        writer.pop_type();
        Ok(())
    }

    /// Emit ` : Superclass(args), Interface`.
    fn emit_supertypes(&self, writer: &mut CodeWriter<'_>) -> Result<()> {
        if self.superclass.is_none() && self.superinterfaces.is_empty() {
            return Ok(());
        }
        writer.emit(" : ")?;
        if let Some(superclass) = &self.superclass {
            writer.emit_type_ref(superclass)?;
            // Secondary constructors call the superclass themselves.
            if !(self.primary_constructor.is_empty() && self.has_secondary_constructors()) {
                writer.emit("(")?;
                writer.emit_code(&self.superclass_arguments)?;
                writer.emit(")")?;
            }
        }
        for (i, superinterface) in self.superinterfaces.iter().enumerate() {
            if i > 0 || self.superclass.is_some() {
                writer.emit(", ")?;
            }
            writer.emit_type_ref(superinterface)?;
        }
        Ok(())
    }

    fn emit_members(&self, writer: &mut CodeWriter<'_>) -> Result<()> {
        let mut previous: Option<Member> = None;
        let mut separate = |writer: &mut CodeWriter<'_>, member: Member| -> Result<()> {
            match previous.replace(member) {
                Some(Member::Property) if member == Member::Property => Ok(()),
                Some(_) => writer.emit("\n"),
                None => Ok(()),
            }
        };

        if !self.enum_constants.is_empty() {
            separate(writer, Member::Other)?;
            let last = self.enum_constants.len() - 1;
            let more_members = !self.properties.is_empty()
                || !self.init_block.is_empty()
                || !self.functions.is_empty()
                || !self.types.is_empty();
            for (i, (name, constant)) in self.enum_constants.iter().enumerate() {
                constant.emit(writer, Some(name), &implicit([]))?;
                if i < last {
                    writer.emit(",\n")?;
                } else if more_members {
                    writer.emit(";\n")?;
                } else {
                    writer.emit("\n")?;
                }
            }
        }

        let member_modifiers = self.kind.implicit_member_modifiers();
        for property in &self.properties {
            separate(writer, Member::Property)?;
            property.emit(writer, &member_modifiers)?;
        }

        if !self.init_block.is_empty() {
            separate(writer, Member::Other)?;
            writer.emit("init {\n")?;
            writer.indent();
            writer.emit_code_with_newline(&self.init_block)?;
            writer.unindent()?;
            writer.emit("}\n")?;
        }

        let (constructors, functions): (Vec<_>, Vec<_>) =
            self.functions.iter().partition(|function| function.is_constructor());
        for function in constructors.into_iter().chain(functions) {
            separate(writer, Member::Other)?;
            function.emit(writer, &member_modifiers)?;
        }

        for nested in &self.types {
            separate(writer, Member::Other)?;
            nested.emit(writer, None, &implicit([]))?;
        }
        Ok(())
    }
}

impl Named for KotlinTypeSpec {
    fn name(&self) -> &str {
        &self.name
    }
}

impl DialectLiteral for KotlinTypeSpec {
    fn dialect(&self) -> Dialect {
        Dialect::Kotlin
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl From<KotlinTypeSpec> for LiteralValue {
    fn from(type_spec: KotlinTypeSpec) -> Self {
        LiteralValue::dialect(type_spec)
    }
}

impl fmt::Display for KotlinTypeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_rendered(f, render_standalone(&KOTLIN, |writer| self.emit_literal(writer)))
    }
}

#[derive(Debug, Clone)]
pub struct KotlinTypeSpecBuilder {
    spec: KotlinTypeSpec,
}

impl KotlinTypeSpecBuilder {
    fn new(kind: KotlinTypeKind, name: String, anonymous: bool) -> Self {
        Self {
            spec: KotlinTypeSpec {
                kind,
                name,
                anonymous,
                kdoc: CodeValue::new(),
                annotations: Vec::new(),
                modifiers: BTreeSet::new(),
                type_variables: Vec::new(),
                primary_constructor: Vec::new(),
                superclass: None,
                superclass_arguments: CodeValue::new(),
                superinterfaces: Vec::new(),
                enum_constants: IndexMap::new(),
                properties: Vec::new(),
                init_block: CodeValue::new(),
                functions: Vec::new(),
                types: Vec::new(),
            },
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

    /// Append a primary constructor parameter.
    pub fn add_constructor_parameter(mut self, parameter: KotlinParameterSpec) -> Self {
        self.spec.primary_constructor.push(parameter);
        self
    }

    pub fn superclass(mut self, superclass: impl Into<TypeRef>) -> Self {
        self.spec.superclass = Some(superclass.into());
        self
    }

    /// Arguments of the superclass constructor call, or of an enum constant.
    pub fn superclass_arguments(mut self, arguments: impl Into<CodeValue>) -> Self {
        self.spec.superclass_arguments = arguments.into();
        self
    }

    pub fn add_superinterface(mut self, superinterface: impl Into<TypeRef>) -> Self {
        self.spec.superinterfaces.push(superinterface.into());
        self
    }

    /// Add a constant without arguments or body.
    pub fn add_enum_constant(self, name: impl Into<String>) -> Self {
        let body = KotlinTypeSpecBuilder::new(KotlinTypeKind::Object, String::new(), true).spec;
        self.add_enum_constant_with(name, body)
    }

    /// Add a constant whose arguments and body come from an anonymous object.
    pub fn add_enum_constant_with(mut self, name: impl Into<String>, body: KotlinTypeSpec) -> Self {
        self.spec.enum_constants.insert(name.into(), body);
        self
    }

    pub fn add_property(mut self, property: KotlinPropertySpec) -> Self {
        self.spec.properties.push(property);
        self
    }

    pub fn add_init_block(mut self, code: impl Into<CodeValue>) -> Self {
        self.spec.init_block = std::mem::take(&mut self.spec.init_block).concat(code.into());
        self
    }

    pub fn add_function(mut self, function: KotlinFunctionSpec) -> Self {
        self.spec.functions.push(function);
        self
    }

    pub fn add_type(mut self, nested: KotlinTypeSpec) -> Self {
        self.spec.types.push(nested);
        self
    }

    pub fn build(self) -> Result<KotlinTypeSpec> {
        let mut spec = self.spec;
        let kind = spec.kind;
        let describe = |spec: &KotlinTypeSpec| format!("{} {}", spec.kind.keyword(), spec.name);

        if !spec.anonymous && !is_valid_identifier(&spec.name) {
            return Err(Box::new(Error::InvalidName { name: spec.name }));
        }
        for name in spec.enum_constants.keys() {
            if !is_valid_identifier(name) {
                return Err(Box::new(Error::InvalidName { name: name.clone() }));
            }
        }

        if kind != KotlinTypeKind::Enum && !spec.enum_constants.is_empty() {
            return Err(Error::invalid_declaration(format!(
                "{} is not an enum and cannot have constants",
                describe(&spec)
            )));
        }
        if spec.superclass.is_some() && !kind.takes_superclass() {
            return Err(Error::invalid_declaration(format!(
                "{} cannot have a superclass",
                describe(&spec)
            )));
        }
        if !spec.primary_constructor.is_empty() && !kind.takes_primary_constructor() {
            return Err(Error::invalid_declaration(format!(
                "{} cannot have a primary constructor",
                describe(&spec)
            )));
        }
        if kind.is_object() && (!spec.type_variables.is_empty() || spec.has_secondary_constructors())
        {
            return Err(Error::invalid_declaration(format!(
                "{} cannot have type variables or constructors",
                describe(&spec)
            )));
        }

        if kind == KotlinTypeKind::Value {
            let single_val = matches!(
                spec.primary_constructor.as_slice(),
                [parameter] if parameter.property() == Some(Mutability::Val)
            );
            if !single_val {
                return Err(Error::invalid_declaration(format!(
                    "{} needs exactly one val constructor parameter",
                    describe(&spec)
                )));
            }
        }

        if spec.modifiers.contains(&KotlinModifier::Data) {
            let all_properties = spec
                .primary_constructor
                .iter()
                .all(|parameter| parameter.property().is_some());
            if spec.primary_constructor.is_empty() || !all_properties {
                return Err(Error::invalid_declaration(format!(
                    "data class {} needs constructor parameters that are all properties",
                    spec.name
                )));
            }
        }

        let companions = spec
            .types
            .iter()
            .filter(|nested| nested.kind == KotlinTypeKind::CompanionObject)
            .count();
        if companions > 1 {
            return Err(Error::invalid_declaration(format!(
                "{} has more than one companion object",
                describe(&spec)
            )));
        }

        if kind == KotlinTypeKind::Interface {
            normalize_interface_members(&mut spec)?;
        }
        Ok(spec)
    }
}

/// Make body-less interface members abstract.
fn normalize_interface_members(spec: &mut KotlinTypeSpec) -> Result<()> {
    if !spec.init_block.is_empty() || spec.has_secondary_constructors() {
        return Err(Error::invalid_declaration(format!(
            "interface {} cannot have an init block or constructors",
            spec.name
        )));
    }

    for property in &mut spec.properties {
        // Interfaces hold no state, only computed getters.
        if property.has_initializer() {
            return Err(Error::invalid_declaration(format!(
                "interface property {} cannot be initialized",
                property.name()
            )));
        }
        if !property.has_body() {
            property.modifiers_mut().insert(KotlinModifier::Abstract);
        }
    }

    for function in &mut spec.functions {
        if function.body().is_empty() {
            function.modifiers_mut().insert(KotlinModifier::Abstract);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use codegentle_common::{
        code::CodePart,
        naming::{ClassName, TypeName},
    };

    use super::*;
    use crate::types;

    fn val(name: &str, type_ref: impl Into<TypeRef>) -> KotlinParameterSpec {
        KotlinParameterSpec::builder(name, type_ref)
            .property(Mutability::Val)
            .build()
            .unwrap()
    }

    #[test]
    fn test_data_class_without_body() {
        let point = KotlinTypeSpec::class_builder("Point")
            .add_modifiers([KotlinModifier::Data])
            .add_constructor_parameter(val("x", types::int()))
            .add_constructor_parameter(val("y", types::int()))
            .build()
            .unwrap();
        assert_eq!(point.to_string(), "data class Point(val x: Int, val y: Int)\n");
    }

    #[test]
    fn test_interface_members_become_abstract() {
        let shape = KotlinTypeSpec::interface_builder("Shape")
            .add_property(KotlinPropertySpec::builder("name", types::string()).build().unwrap())
            .add_property(
                KotlinPropertySpec::builder("sides", types::int())
                    .getter("0")
                    .build()
                    .unwrap(),
            )
            .add_function(
                KotlinFunctionSpec::builder("area")
                    .returns(types::double())
                    .build()
                    .unwrap(),
            )
            .add_function(
                KotlinFunctionSpec::builder("describe")
                    .returns(types::string())
                    .expression_body(CodeValue::of("%V", [CodePart::string("shape")]).unwrap())
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap();
        assert!(shape.properties()[0].has_modifier(KotlinModifier::Abstract));
        assert!(!shape.properties()[1].has_modifier(KotlinModifier::Abstract));
        assert!(shape.functions()[0].has_modifier(KotlinModifier::Abstract));
        assert!(!shape.functions()[1].has_modifier(KotlinModifier::Abstract));
        assert_eq!(
            shape.to_string(),
            "interface Shape {\n    val name: String\n    val sides: Int\n        get() = 0\n\n    fun area(): Double\n\n    fun describe(): String = \"shape\"\n}\n"
        );
    }

    #[test]
    fn test_interface_property_initializer_is_rejected() {
        let err = KotlinTypeSpec::interface_builder("Config")
            .add_property(
                KotlinPropertySpec::builder("port", types::int())
                    .initializer("8080")
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap_err();
        assert!(matches!(*err, Error::InvalidDeclaration { .. }));
    }

    #[test]
    fn test_enum_with_constructor_and_function() {
        let planet = ClassName::new("", "Planet");
        let spec = KotlinTypeSpec::enum_builder("Planet")
            .add_constructor_parameter(val("mass", types::double()))
            .add_enum_constant_with(
                "MERCURY",
                KotlinTypeSpec::anonymous_object_builder()
                    .superclass_arguments("3.303e+23")
                    .build()
                    .unwrap(),
            )
            .add_enum_constant_with(
                "VENUS",
                KotlinTypeSpec::anonymous_object_builder()
                    .superclass_arguments("4.869e+24")
                    .build()
                    .unwrap(),
            )
            .add_function(
                KotlinFunctionSpec::builder("heavierThan")
                    .add_parameter_of("other", planet)
                    .unwrap()
                    .returns(types::boolean())
                    .expression_body("mass > other.mass")
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap();
        assert_eq!(
            spec.to_string(),
            "enum class Planet(val mass: Double) {\n    MERCURY(3.303e+23),\n    VENUS(4.869e+24);\n\n    fun heavierThan(other: Planet): Boolean = mass > other.mass\n}\n"
        );
    }

    #[test]
    fn test_plain_enum() {
        let spec = KotlinTypeSpec::enum_builder("Direction")
            .add_enum_constant("NORTH")
            .add_enum_constant("SOUTH")
            .build()
            .unwrap();
        assert_eq!(spec.to_string(), "enum class Direction {\n    NORTH,\n    SOUTH\n}\n");
    }

    #[test]
    fn test_sealed_class_with_nested_subtypes() {
        let outcome = ClassName::new("", "Outcome");
        let success = KotlinTypeSpec::class_builder("Success")
            .add_modifiers([KotlinModifier::Data])
            .add_constructor_parameter(val("value", types::string()))
            .superclass(outcome.clone())
            .build()
            .unwrap();
        let failure = KotlinTypeSpec::object_builder("Failure")
            .superclass(outcome)
            .build()
            .unwrap();
        let spec = KotlinTypeSpec::class_builder("Outcome")
            .add_modifiers([KotlinModifier::Sealed])
            .add_type(success)
            .add_type(failure)
            .build()
            .unwrap();
        assert_eq!(
            spec.to_string(),
            "sealed class Outcome {\n    data class Success(val value: String) : Outcome()\n\n    object Failure : Outcome()\n}\n"
        );
    }

    #[test]
    fn test_companion_object() {
        let companion = KotlinTypeSpec::companion_object_builder(None)
            .add_property(
                KotlinPropertySpec::builder("VERSION", types::int())
                    .add_modifiers([KotlinModifier::Const])
                    .initializer("1")
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap();
        let spec = KotlinTypeSpec::class_builder("Registry")
            .add_type(companion)
            .build()
            .unwrap();
        assert_eq!(
            spec.to_string(),
            "class Registry {\n    companion object {\n        const val VERSION: Int = 1\n    }\n}\n"
        );
    }

    #[test]
    fn test_two_companions_are_rejected() {
        let companion = || KotlinTypeSpec::companion_object_builder(None).build().unwrap();
        let err = KotlinTypeSpec::class_builder("Registry")
            .add_type(companion())
            .add_type(companion())
            .build()
            .unwrap_err();
        assert!(matches!(*err, Error::InvalidDeclaration { .. }));
    }

    #[test]
    fn test_init_block_and_secondary_constructor() {
        let spec = KotlinTypeSpec::class_builder("Greeter")
            .add_constructor_parameter(val("name", types::string()))
            .add_init_block(
                CodeValue::of("println(%V)\n", [CodePart::string("created")]).unwrap(),
            )
            .add_function(
                KotlinFunctionSpec::builder("greet")
                    .add_statement("println(name)", [])
                    .unwrap()
                    .build()
                    .unwrap(),
            )
            .add_function(
                KotlinFunctionSpec::constructor_builder()
                    .call_this_constructor(CodeValue::of("%V", [CodePart::string("world")]).unwrap())
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap();
        assert_eq!(
            spec.to_string(),
            "class Greeter(val name: String) {\n    init {\n        println(\"created\")\n    }\n\n    constructor() : this(\"world\")\n\n    fun greet() {\n        println(name)\n    }\n}\n"
        );
    }

    #[test]
    fn test_anonymous_object_in_initializer() {
        let task = ClassName::new("org.example", "Task");
        let run = KotlinFunctionSpec::builder("run")
            .add_modifiers([KotlinModifier::Override])
            .add_statement("println(%V)", [CodePart::string("run")])
            .unwrap()
            .build()
            .unwrap();
        let anonymous = KotlinTypeSpec::anonymous_object_builder()
            .add_superinterface(task.clone())
            .add_function(run)
            .build()
            .unwrap();
        let property = KotlinPropertySpec::builder("task", task)
            .initializer(CodeValue::from_parts([CodePart::literal(anonymous)]))
            .build()
            .unwrap();
        assert_eq!(
            property.to_string(),
            "val task: org.example.Task = object : org.example.Task {\n    override fun run() {\n        println(\"run\")\n    }\n}\n"
        );
    }

    #[test]
    fn test_java_type_spec_is_rejected_in_kotlin() {
        #[derive(Debug)]
        struct Foreign;
        impl DialectLiteral for Foreign {
            fn dialect(&self) -> Dialect {
                Dialect::Java
            }
            fn as_any(&self) -> &dyn Any {
                self
            }
        }
        let code = CodeValue::from_parts([CodePart::literal(LiteralValue::dialect(Foreign))]);
        let err = crate::code_to_string(&code).unwrap_err();
        assert!(matches!(*err, Error::DialectMismatch { .. }));
    }

    #[test]
    fn test_value_class_needs_single_val() {
        let meters = KotlinTypeSpec::value_class_builder("Meters")
            .add_annotation(ClassName::new("kotlin.jvm", "JvmInline"))
            .add_constructor_parameter(val("value", types::double()))
            .build()
            .unwrap();
        assert_eq!(
            meters.to_string(),
            "@JvmInline\nvalue class Meters(val value: Double)\n"
        );

        let err = KotlinTypeSpec::value_class_builder("Pair")
            .add_constructor_parameter(val("a", types::int()))
            .add_constructor_parameter(val("b", types::int()))
            .build()
            .unwrap_err();
        assert!(matches!(*err, Error::InvalidDeclaration { .. }));
    }

    #[test]
    fn test_generic_class_with_where_clause() {
        let t = TypeVariableName::new("T")
            .with_bound(types::kotlin_class("CharSequence"))
            .with_bound(TypeName::parameterized(
                types::kotlin_class("Comparable"),
                [TypeName::type_variable("T").into()],
            ));
        let spec = KotlinTypeSpec::class_builder("Box")
            .add_type_variable(t)
            .add_constructor_parameter(val("item", TypeName::type_variable("T")))
            .build()
            .unwrap();
        assert_eq!(
            spec.to_string(),
            "class Box<T>(val item: T) where T : CharSequence, T : Comparable<T>\n"
        );
    }

    #[test]
    fn test_object_cannot_have_constructor_parameters() {
        let err = KotlinTypeSpec::object_builder("Singleton")
            .add_constructor_parameter(val("x", types::int()))
            .build()
            .unwrap_err();
        assert!(matches!(*err, Error::InvalidDeclaration { .. }));
    }

    #[test]
    fn test_constants_on_class_are_rejected() {
        let err = KotlinTypeSpec::class_builder("Color")
            .add_enum_constant("RED")
            .build()
            .unwrap_err();
        assert!(matches!(*err, Error::InvalidDeclaration { .. }));
    }
}
