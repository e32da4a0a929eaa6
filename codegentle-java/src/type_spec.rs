//! Type declarations: classes, interfaces, enums, annotation types, records
//! and anonymous classes.

use std::{any::Any, collections::BTreeSet, fmt};

use codegentle_common::{
    CodeWriter, Error, Result, TypeScope,
    annotation::AnnotationRef,
    code::{CodeValue, DialectLiteral, LiteralValue, Named},
    naming::{Dialect, TypeName, TypeRef, TypeVariableName, is_valid_identifier},
    writer::render_standalone,
};
use indexmap::IndexMap;

use crate::{
    FieldSpec, JavaModifier, MethodSpec, ParameterSpec,
    modifier::modifier_set,
    strategy::{JAVA, emit_type_variables, pop_type_variables, write_rendered},
    types,
};

/// The kind of a type declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Class,
    Interface,
    Enum,
    Annotation,
    Record,
}

impl TypeKind {
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Interface => "interface",
            Self::Enum => "enum",
            Self::Annotation => "@interface",
            Self::Record => "record",
        }
    }

    fn is_interface_like(self) -> bool {
        matches!(self, Self::Interface | Self::Annotation)
    }

    /// Modifiers every field of this kind has without writing them.
    pub fn implicit_field_modifiers(self) -> BTreeSet<JavaModifier> {
        if self.is_interface_like() {
            modifier_set([JavaModifier::Public, JavaModifier::Static, JavaModifier::Final])
        } else {
            BTreeSet::new()
        }
    }

    pub fn implicit_method_modifiers(self) -> BTreeSet<JavaModifier> {
        if self.is_interface_like() {
            modifier_set([JavaModifier::Public, JavaModifier::Abstract])
        } else {
            BTreeSet::new()
        }
    }

    pub fn implicit_type_modifiers(self) -> BTreeSet<JavaModifier> {
        if self.is_interface_like() {
            modifier_set([JavaModifier::Public, JavaModifier::Static])
        } else {
            BTreeSet::new()
        }
    }

    /// Modifiers a nested declaration of this kind has implicitly.
    pub fn as_member_modifiers(self) -> BTreeSet<JavaModifier> {
        match self {
            Self::Class => BTreeSet::new(),
            _ => modifier_set([JavaModifier::Static]),
        }
    }
}

/// A type declaration.
///
/// Anonymous classes are type specs too: they have no name and carry the
/// constructor arguments of their `new` expression. Enum constants with a
/// body are anonymous classes keyed by the constant name.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeSpec {
    kind: TypeKind,
    name: String,
    anonymous_arguments: Option<CodeValue>,
    javadoc: CodeValue,
    annotations: Vec<AnnotationRef>,
    modifiers: BTreeSet<JavaModifier>,
    type_variables: Vec<TypeVariableName>,
    superclass: Option<TypeRef>,
    superinterfaces: Vec<TypeRef>,
    permitted_subclasses: Vec<TypeRef>,
    record_components: Vec<ParameterSpec>,
    enum_constants: IndexMap<String, TypeSpec>,
    fields: Vec<FieldSpec>,
    static_block: CodeValue,
    initializer_block: CodeValue,
    methods: Vec<MethodSpec>,
    types: Vec<TypeSpec>,
}

impl TypeSpec {
    pub fn class_builder(name: impl Into<String>) -> TypeSpecBuilder {
        TypeSpecBuilder::new(TypeKind::Class, name.into(), None)
    }

    pub fn interface_builder(name: impl Into<String>) -> TypeSpecBuilder {
        TypeSpecBuilder::new(TypeKind::Interface, name.into(), None)
    }

    pub fn enum_builder(name: impl Into<String>) -> TypeSpecBuilder {
        TypeSpecBuilder::new(TypeKind::Enum, name.into(), None)
    }

    pub fn annotation_builder(name: impl Into<String>) -> TypeSpecBuilder {
        TypeSpecBuilder::new(TypeKind::Annotation, name.into(), None)
    }

    pub fn record_builder(name: impl Into<String>) -> TypeSpecBuilder {
        TypeSpecBuilder::new(TypeKind::Record, name.into(), None)
    }

    /// An anonymous class created with `arguments`, e.g. `new Runnable() { ... }`.
    pub fn anonymous_class_builder(arguments: impl Into<CodeValue>) -> TypeSpecBuilder {
        TypeSpecBuilder::new(TypeKind::Class, String::new(), Some(arguments.into()))
    }

    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    pub fn is_anonymous(&self) -> bool {
        self.anonymous_arguments.is_some()
    }

    pub fn modifiers(&self) -> &BTreeSet<JavaModifier> {
        &self.modifiers
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn methods(&self) -> &[MethodSpec] {
        &self.methods
    }

    pub fn types(&self) -> &[TypeSpec] {
        &self.types
    }

    fn has_members(&self) -> bool {
        !self.fields.is_empty()
            || !self.methods.is_empty()
            || !self.types.is_empty()
            || !self.static_block.is_empty()
            || !self.initializer_block.is_empty()
    }

    fn scope(&self) -> TypeScope {
        TypeScope::new(self.name.clone(), self.types.iter().map(|nested| nested.name.clone()))
    }

    /// Emit the declaration.
    ///
    /// `enum_name` is set when this spec is the body of an enum constant.
    /// `implicit_modifiers` are the modifiers the enclosing declaration
    /// implies for its nested types.
    pub(crate) fn emit(
        &self,
        writer: &mut CodeWriter<'_>,
        enum_name: Option<&str>,
        implicit_modifiers: &BTreeSet<JavaModifier>,
    ) -> Result<()> {
        writer.detached_statement(|writer| self.emit_detached(writer, enum_name, implicit_modifiers))
    }

    fn emit_detached(
        &self,
        writer: &mut CodeWriter<'_>,
        enum_name: Option<&str>,
        implicit_modifiers: &BTreeSet<JavaModifier>,
    ) -> Result<()> {
        if let Some(enum_name) = enum_name {
            writer.emit_doc(&self.javadoc)?;
            writer.emit_annotations(&self.annotations, false)?;
            writer.emit(enum_name)?;
            if let Some(arguments) = self.anonymous_arguments.as_ref().filter(|a| !a.is_empty()) {
                writer.emit("(")?;
                writer.emit_code(arguments)?;
                writer.emit(")")?;
            }
            if !self.has_members() {
                return Ok(());
            }
            writer.emit(" {\n")?;
        } else if let Some(arguments) = &self.anonymous_arguments {
            let supertype = match (self.superinterfaces.first(), &self.superclass) {
                (Some(interface), _) => interface.clone(),
                (None, Some(superclass)) => superclass.clone(),
                (None, None) => TypeRef::new(types::object()),
            };
            writer.emit("new ")?;
            writer.emit_type_ref(&supertype)?;
            writer.emit("(")?;
            writer.emit_code(arguments)?;
            writer.emit(") {\n")?;
        } else {
            self.emit_header(writer, implicit_modifiers)?;
        }

        writer.push_type(self.scope());
        writer.indent();
        self.emit_members(writer)?;
        writer.unindent()?;
        writer.pop_type();
        pop_type_variables(writer, &self.type_variables);

        writer.emit("}")?;
        if enum_name.is_none() && self.anonymous_arguments.is_none() {
            writer.emit("\n")?;
        }
        Ok(())
    }

    fn emit_header(
        &self,
        writer: &mut CodeWriter<'_>,
        implicit_modifiers: &BTreeSet<JavaModifier>,
    ) -> Result<()> {
        // Only the declared name is visible while the header is written.
        writer.push_type(TypeScope::named(self.name.clone()));

        writer.emit_doc(&self.javadoc)?;
        writer.emit_annotations(&self.annotations, false)?;
        let mut implicit = implicit_modifiers.clone();
        implicit.extend(self.kind.as_member_modifiers());
        writer.emit_modifiers(&self.modifiers, &implicit)?;
        writer.emit(self.kind.keyword())?;
        writer.emit(" ")?;
        writer.emit(&self.name)?;
        emit_type_variables(writer, &self.type_variables)?;

        if self.kind == TypeKind::Record {
            writer.emit("(")?;
            for (i, component) in self.record_components.iter().enumerate() {
                if i > 0 {
                    writer.emit(",")?;
                    writer.wrapping_space()?;
                }
                component.emit(writer, false)?;
            }
            writer.emit(")")?;
        }

        let (extends, implements): (Vec<&TypeRef>, Vec<&TypeRef>) = if self.kind == TypeKind::Interface {
            (self.superinterfaces.iter().collect(), Vec::new())
        } else {
            let superclass = self
                .superclass
                .iter()
                .filter(|superclass| superclass.type_name() != &TypeName::Class(types::object()))
                .collect();
            (superclass, self.superinterfaces.iter().collect())
        };
        emit_type_list(writer, "extends", &extends)?;
        emit_type_list(writer, "implements", &implements)?;
        emit_type_list(writer, "permits", &self.permitted_subclasses.iter().collect::<Vec<_>>())?;

        writer.pop_type();
        writer.emit(" {\n")
    }

    fn emit_members(&self, writer: &mut CodeWriter<'_>) -> Result<()> {
        let mut first_member = true;
        let mut separate = |writer: &mut CodeWriter<'_>| -> Result<()> {
            if !std::mem::replace(&mut first_member, false) {
                writer.emit("\n")?;
            }
            Ok(())
        };

        let constant_count = self.enum_constants.len();
        for (i, (name, constant)) in self.enum_constants.iter().enumerate() {
            separate(writer)?;
            constant.emit(writer, Some(name), &BTreeSet::new())?;
            if i + 1 < constant_count {
                writer.emit(",\n")?;
            } else if self.has_members() {
                writer.emit(";\n")?;
            } else {
                writer.emit("\n")?;
            }
        }

        let field_modifiers = self.kind.implicit_field_modifiers();
        for field in self.fields.iter().filter(|f| f.has_modifier(JavaModifier::Static)) {
            separate(writer)?;
            field.emit(writer, &field_modifiers)?;
        }

        if !self.static_block.is_empty() {
            separate(writer)?;
            writer.emit("static {\n")?;
            emit_block_body(writer, &self.static_block)?;
        }

        for field in self.fields.iter().filter(|f| !f.has_modifier(JavaModifier::Static)) {
            separate(writer)?;
            field.emit(writer, &field_modifiers)?;
        }

        if !self.initializer_block.is_empty() {
            separate(writer)?;
            writer.emit("{\n")?;
            emit_block_body(writer, &self.initializer_block)?;
        }

        let method_modifiers = self.kind.implicit_method_modifiers();
        let (constructors, methods): (Vec<_>, Vec<_>) =
            self.methods.iter().partition(|method| method.is_constructor());
        for method in constructors.into_iter().chain(methods) {
            separate(writer)?;
            method.emit(writer, Some(&self.name), &method_modifiers)?;
        }

        let type_modifiers = self.kind.implicit_type_modifiers();
        for nested in &self.types {
            separate(writer)?;
            nested.emit(writer, None, &type_modifiers)?;
        }
        Ok(())
    }
}

fn emit_type_list(writer: &mut CodeWriter<'_>, keyword: &str, types: &[&TypeRef]) -> Result<()> {
    if types.is_empty() {
        return Ok(());
    }
    writer.emit(" ")?;
    writer.emit(keyword)?;
    for (i, type_ref) in types.iter().enumerate() {
        if i > 0 {
            writer.emit(",")?;
        }
        writer.emit(" ")?;
        writer.emit_type_ref(type_ref)?;
    }
    Ok(())
}

fn emit_block_body(writer: &mut CodeWriter<'_>, code: &CodeValue) -> Result<()> {
    writer.indent();
    writer.emit_code_with_newline(code)?;
    writer.unindent()?;
    writer.emit("}\n")
}

impl Named for TypeSpec {
    fn name(&self) -> &str {
        &self.name
    }
}

impl DialectLiteral for TypeSpec {
    fn dialect(&self) -> Dialect {
        Dialect::Java
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl From<TypeSpec> for LiteralValue {
    fn from(type_spec: TypeSpec) -> Self {
        LiteralValue::dialect(type_spec)
    }
}

impl fmt::Display for TypeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_rendered(
            f,
            render_standalone(&JAVA, |writer| self.emit(writer, None, &BTreeSet::new())),
        )
    }
}

#[derive(Debug, Clone)]
pub struct TypeSpecBuilder {
    spec: TypeSpec,
}

impl TypeSpecBuilder {
    fn new(kind: TypeKind, name: String, anonymous_arguments: Option<CodeValue>) -> Self {
        Self {
            spec: TypeSpec {
                kind,
                name,
                anonymous_arguments,
                javadoc: CodeValue::new(),
                annotations: Vec::new(),
                modifiers: BTreeSet::new(),
                type_variables: Vec::new(),
                superclass: None,
                superinterfaces: Vec::new(),
                permitted_subclasses: Vec::new(),
                record_components: Vec::new(),
                enum_constants: IndexMap::new(),
                fields: Vec::new(),
                static_block: CodeValue::new(),
                initializer_block: CodeValue::new(),
                methods: Vec::new(),
                types: Vec::new(),
            },
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

    pub fn superclass(mut self, superclass: impl Into<TypeRef>) -> Self {
        self.spec.superclass = Some(superclass.into());
        self
    }

    pub fn add_superinterface(mut self, superinterface: impl Into<TypeRef>) -> Self {
        self.spec.superinterfaces.push(superinterface.into());
        self
    }

    /// Name a permitted subclass of a sealed type.
    pub fn add_permitted_subclass(mut self, subclass: impl Into<TypeRef>) -> Self {
        self.spec.permitted_subclasses.push(subclass.into());
        self
    }

    pub fn add_record_component(mut self, component: ParameterSpec) -> Self {
        self.spec.record_components.push(component);
        self
    }

    /// Add a plain enum constant.
    pub fn add_enum_constant(self, name: impl Into<String>) -> Self {
        let body = TypeSpecBuilder::new(TypeKind::Class, String::new(), Some(CodeValue::new())).spec;
        self.add_enum_constant_with(name, body)
    }

    /// Add an enum constant with arguments or a body, built with
    /// [`TypeSpec::anonymous_class_builder`].
    pub fn add_enum_constant_with(mut self, name: impl Into<String>, body: TypeSpec) -> Self {
        self.spec.enum_constants.insert(name.into(), body);
        self
    }

    pub fn add_field(mut self, field: FieldSpec) -> Self {
        self.spec.fields.push(field);
        self
    }

    pub fn add_static_block(mut self, code: impl Into<CodeValue>) -> Self {
        self.spec.static_block = std::mem::take(&mut self.spec.static_block).concat(code.into());
        self
    }

    pub fn add_initializer_block(mut self, code: impl Into<CodeValue>) -> Self {
        self.spec.initializer_block =
            std::mem::take(&mut self.spec.initializer_block).concat(code.into());
        self
    }

    pub fn add_method(mut self, method: MethodSpec) -> Self {
        self.spec.methods.push(method);
        self
    }

    pub fn add_type(mut self, nested: TypeSpec) -> Self {
        self.spec.types.push(nested);
        self
    }

    pub fn build(self) -> Result<TypeSpec> {
        let mut spec = self.spec;
        let kind = spec.kind;

        if !spec.is_anonymous() && !is_valid_identifier(&spec.name) {
            return Err(Box::new(Error::InvalidName { name: spec.name }));
        }
        for name in spec.enum_constants.keys() {
            if !is_valid_identifier(name) {
                return Err(Box::new(Error::InvalidName { name: name.clone() }));
            }
        }

        match kind {
            TypeKind::Enum if spec.enum_constants.is_empty() => {
                return Err(Error::invalid_declaration(format!(
                    "at least one enum constant is required for {}",
                    spec.name
                )));
            }
            TypeKind::Class => {}
            _ if spec.superclass.is_some() => {
                return Err(Error::invalid_declaration(format!(
                    "{} {} cannot have a superclass",
                    kind.keyword(),
                    spec.name
                )));
            }
            _ => {}
        }
        if kind != TypeKind::Enum && !spec.enum_constants.is_empty() {
            return Err(Error::invalid_declaration(format!(
                "{} is not an enum and cannot have constants",
                spec.name
            )));
        }
        if kind != TypeKind::Record && !spec.record_components.is_empty() {
            return Err(Error::invalid_declaration(format!(
                "{} is not a record and cannot have components",
                spec.name
            )));
        }

        if spec.modifiers.contains(&JavaModifier::Sealed)
            && (spec.modifiers.contains(&JavaModifier::NonSealed)
                || spec.modifiers.contains(&JavaModifier::Final))
        {
            return Err(Error::invalid_declaration(format!(
                "sealed type {} cannot also be non-sealed or final",
                spec.name
            )));
        }
        if !spec.permitted_subclasses.is_empty() && !spec.modifiers.contains(&JavaModifier::Sealed) {
            return Err(Error::invalid_declaration(format!(
                "only sealed types permit subclasses, {} is not sealed",
                spec.name
            )));
        }

        if kind == TypeKind::Record {
            if spec.fields.iter().any(|f| !f.has_modifier(JavaModifier::Static)) {
                return Err(Error::invalid_declaration(format!(
                    "record {} can only declare static fields",
                    spec.name
                )));
            }
            if !spec.initializer_block.is_empty() {
                return Err(Error::invalid_declaration(format!(
                    "record {} cannot have an instance initializer",
                    spec.name
                )));
            }
        }

        if kind.is_interface_like() {
            normalize_interface_members(&mut spec)?;
        }
        Ok(spec)
    }
}

/// Give interface members their implicit modifiers.
fn normalize_interface_members(spec: &mut TypeSpec) -> Result<()> {
    if !spec.initializer_block.is_empty() {
        return Err(Error::invalid_declaration(format!(
            "{} {} cannot have an initializer block",
            spec.kind.keyword(),
            spec.name
        )));
    }

    for field in &mut spec.fields {
        if field.has_modifier(JavaModifier::Private) || field.has_modifier(JavaModifier::Protected) {
            return Err(Error::invalid_declaration(format!(
                "interface field {} must be public",
                field.name()
            )));
        }
        field
            .modifiers_mut()
            .extend([JavaModifier::Public, JavaModifier::Static, JavaModifier::Final]);
    }

    for method in &mut spec.methods {
        if method.is_constructor() {
            return Err(Error::invalid_declaration(format!(
                "{} {} cannot have a constructor",
                spec.kind.keyword(),
                spec.name
            )));
        }
        let private = method.has_modifier(JavaModifier::Private);
        let concrete = private
            || method.has_modifier(JavaModifier::Static)
            || method.has_modifier(JavaModifier::Default);
        if !private {
            method.modifiers_mut().insert(JavaModifier::Public);
        }
        if !concrete {
            method.modifiers_mut().insert(JavaModifier::Abstract);
            if !method.code().is_empty() {
                return Err(Error::invalid_declaration(format!(
                    "abstract interface method {} cannot have code, make it default or static",
                    method.name()
                )));
            }
        }
    }
    Ok(())
}
