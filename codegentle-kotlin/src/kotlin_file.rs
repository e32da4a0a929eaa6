use std::{
    collections::BTreeSet,
    fmt,
    path::{Path, PathBuf},
};

use codegentle_common::{
    ClassName, CodeWriter, EmitConfig, Error, GeneratedFile, Indent, PackageName, Result,
    code::CodeValue,
    naming::is_valid_identifier,
    writer::render_file,
};

use crate::{
    KotlinFunctionSpec, KotlinPropertySpec, KotlinTypeKind, KotlinTypeSpec, modifier::implicit,
    strategy::KOTLIN,
};

/// A Kotlin source file: top-level properties, functions and types.
#[derive(Debug, Clone)]
pub struct KotlinFile {
    package: PackageName,
    file_name: String,
    file_comment: CodeValue,
    config: EmitConfig,
    properties: Vec<KotlinPropertySpec>,
    functions: Vec<KotlinFunctionSpec>,
    types: Vec<KotlinTypeSpec>,
}

impl KotlinFile {
    /// A file named `file_name.kt` in `package`.
    pub fn builder(package: impl Into<PackageName>, file_name: impl Into<String>) -> KotlinFileBuilder {
        KotlinFileBuilder {
            file: KotlinFile {
                package: package.into(),
                file_name: file_name.into(),
                file_comment: CodeValue::new(),
                config: EmitConfig::default(),
                properties: Vec::new(),
                functions: Vec::new(),
                types: Vec::new(),
            },
        }
    }

    pub fn package(&self) -> &PackageName {
        &self.package
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn types(&self) -> &[KotlinTypeSpec] {
        &self.types
    }

    /// Render the file into `out`.
    pub fn write_to(&self, out: &mut dyn fmt::Write) -> Result<()> {
        render_file(&KOTLIN, &self.config, &self.package, out, |writer| {
            self.emit(writer)
        })?;
        Ok(())
    }

    fn emit(&self, writer: &mut CodeWriter<'_>) -> Result<()> {
        if !self.file_comment.is_empty() {
            writer.emit_comment(&self.file_comment)?;
        }

        if !self.package.is_empty() {
            writer.emit("package ")?;
            writer.emit(&self.package.to_string())?;
            writer.emit("\n\n")?;
        }

        // Member imports and type imports share one sorted block.
        let imports: BTreeSet<String> = writer
            .explicit_imports()
            .map(ClassName::canonical_name)
            .chain(writer.static_imports().iter().cloned())
            .collect();
        for import in &imports {
            writer.emit(&format!("import {import}\n"))?;
        }
        if !imports.is_empty() {
            writer.emit("\n")?;
        }

        let top_level = implicit([]);
        let mut first = true;
        let mut separate = |writer: &mut CodeWriter<'_>| -> Result<()> {
            if !std::mem::replace(&mut first, false) {
                writer.emit("\n")?;
            }
            Ok(())
        };
        for property in &self.properties {
            separate(writer)?;
            property.emit(writer, &top_level)?;
        }
        for function in &self.functions {
            separate(writer)?;
            function.emit(writer, &top_level)?;
        }
        for type_spec in &self.types {
            separate(writer)?;
            type_spec.emit(writer, None, &top_level)?;
        }
        Ok(())
    }
}

impl fmt::Display for KotlinFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        self.write_to(&mut out).map_err(|_| fmt::Error)?;
        f.write_str(&out)
    }
}

impl GeneratedFile for KotlinFile {
    fn path(&self, base: &Path) -> PathBuf {
        base.join(self.package.to_path())
            .join(format!("{}.kt", self.file_name))
    }

    fn render(&self) -> Result<String> {
        let mut out = String::new();
        self.write_to(&mut out)?;
        Ok(out)
    }
}

#[derive(Debug, Clone)]
pub struct KotlinFileBuilder {
    file: KotlinFile,
}

impl KotlinFileBuilder {
    pub fn config(mut self, config: EmitConfig) -> Self {
        self.file.config = config;
        self
    }

    pub fn indent(mut self, indent: Indent) -> Self {
        self.file.config = self.file.config.with_indent(indent);
        self
    }

    pub fn column_limit(mut self, column_limit: usize) -> Self {
        self.file.config = self.file.config.with_column_limit(column_limit);
        self
    }

    /// Import `member` of `class`, e.g. a top-level function or a constant.
    pub fn add_static_import(mut self, class: &ClassName, member: &str) -> Self {
        self.file.config = self
            .file
            .config
            .with_static_import(format!("{}.{member}", class.canonical_name()));
        self
    }

    pub fn always_qualify(mut self, simple_name: impl Into<String>) -> Self {
        self.file.config = self.file.config.with_always_qualify(simple_name);
        self
    }

    /// Whether classes of the default-imported packages are written without import.
    pub fn skip_kotlin_imports(mut self, skip: bool) -> Self {
        self.file.config.skip_lang_imports = skip;
        self
    }

    pub fn add_file_comment(mut self, comment: impl Into<CodeValue>) -> Self {
        self.file.file_comment = std::mem::take(&mut self.file.file_comment).concat(comment.into());
        self
    }

    pub fn add_property(mut self, property: KotlinPropertySpec) -> Self {
        self.file.properties.push(property);
        self
    }

    pub fn add_function(mut self, function: KotlinFunctionSpec) -> Self {
        self.file.functions.push(function);
        self
    }

    pub fn add_type(mut self, type_spec: KotlinTypeSpec) -> Self {
        self.file.types.push(type_spec);
        self
    }

    pub fn build(self) -> Result<KotlinFile> {
        let file = self.file;
        if !is_valid_identifier(&file.file_name) {
            return Err(Box::new(Error::InvalidName {
                name: file.file_name,
            }));
        }
        if let Some(type_spec) = file
            .types
            .iter()
            .find(|t| t.is_anonymous() || t.kind() == KotlinTypeKind::CompanionObject)
        {
            return Err(Error::invalid_declaration(format!(
                "{} cannot be a top-level declaration",
                if type_spec.is_anonymous() {
                    "an anonymous object"
                } else {
                    "a companion object"
                }
            )));
        }
        if file.functions.iter().any(KotlinFunctionSpec::is_constructor) {
            return Err(Error::invalid_declaration(
                "a constructor cannot be a top-level declaration",
            ));
        }
        Ok(file)
    }
}

#[cfg(test)]
mod tests {
    use codegentle_common::{
        code::CodePart,
        naming::{TypeName, TypeRef},
    };
    use tempfile::TempDir;

    use super::*;
    use crate::{KotlinModifier, KotlinParameterSpec, Mutability, types};

    fn greeting() -> KotlinFunctionSpec {
        KotlinFunctionSpec::builder("main")
            .add_statement("println(%V)", [CodePart::string("Hello, Kotlin!")])
            .unwrap()
            .build()
            .unwrap()
    }

    #[test]
    fn test_hello_world() {
        let file = KotlinFile::builder("com.example.hello", "Hello")
            .add_function(greeting())
            .build()
            .unwrap();
        assert_eq!(
            file.to_string(),
            "package com.example.hello\n\nfun main() {\n    println(\"Hello, Kotlin!\")\n}\n"
        );
    }

    #[test]
    fn test_imports_are_sorted_and_default_packages_skipped() {
        let instant = ClassName::new("java.time", "Instant");
        let atomic = ClassName::new("java.util.concurrent.atomic", "AtomicInteger");
        let event = KotlinTypeSpec::class_builder("Event")
            .add_constructor_parameter(
                KotlinParameterSpec::builder("at", instant)
                    .property(Mutability::Val)
                    .build()
                    .unwrap(),
            )
            .add_constructor_parameter(
                KotlinParameterSpec::builder(
                    "tags",
                    TypeName::parameterized(types::list(), [types::string().into()]),
                )
                .property(Mutability::Val)
                .build()
                .unwrap(),
            )
            .add_property(
                KotlinPropertySpec::builder("counter", atomic.clone())
                    .initializer(CodeValue::from_parts([
                        CodePart::type_name(atomic),
                        CodePart::simple("()"),
                    ]))
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap();
        let file = KotlinFile::builder("com.example", "Event")
            .add_type(event)
            .build()
            .unwrap();
        assert_eq!(
            file.to_string(),
            "package com.example\n\nimport java.time.Instant\nimport java.util.concurrent.atomic.AtomicInteger\n\nclass Event(val at: Instant, val tags: List<String>) {\n    val counter: AtomicInteger = AtomicInteger()\n}\n"
        );
    }

    #[test]
    fn test_conflicting_simple_names_stay_qualified() {
        let mine = ClassName::new("com.example.model", "Pair");
        let property = KotlinPropertySpec::builder(
            "both",
            TypeName::parameterized(
                types::kotlin_class("Pair"),
                [TypeRef::from(mine.clone()), TypeRef::from(mine)],
            ),
        )
        .add_modifiers([KotlinModifier::Lateinit])
        .mutable(true)
        .build()
        .unwrap();
        let file = KotlinFile::builder("com.example", "Pairs")
            .add_property(property)
            .build()
            .unwrap();
        assert_eq!(
            file.to_string(),
            "package com.example\n\nlateinit var both: Pair<com.example.model.Pair, com.example.model.Pair>\n"
        );
    }

    #[test]
    fn test_same_package_class_shadows_default_import() {
        let lateinit = |name: &str, class: ClassName| {
            KotlinPropertySpec::builder(name, class)
                .add_modifiers([KotlinModifier::Lateinit])
                .mutable(true)
                .build()
                .unwrap()
        };
        let file = KotlinFile::builder("com.example", "Strings")
            .add_property(lateinit("a", ClassName::new("com.example", "String")))
            .add_property(lateinit("b", types::string()))
            .build()
            .unwrap();
        assert_eq!(
            file.to_string(),
            "package com.example\n\nlateinit var a: String\n\nlateinit var b: kotlin.String\n"
        );
    }

    #[test]
    fn test_member_import() {
        let limits = ClassName::new("org.example", "Limits");
        let function = KotlinFunctionSpec::builder("doubled")
            .returns(types::int())
            .expression_body(CodeValue::from_parts([
                CodePart::type_name(limits.clone()),
                CodePart::simple(".MAX * 2"),
            ]))
            .build()
            .unwrap();
        let file = KotlinFile::builder("com.example", "Limits")
            .add_static_import(&limits, "MAX")
            .add_function(function)
            .build()
            .unwrap();
        assert_eq!(
            file.to_string(),
            "package com.example\n\nimport org.example.Limits.MAX\n\nfun doubled(): Int = MAX * 2\n"
        );
    }

    #[test]
    fn test_top_level_elements_separated_by_blank_line() {
        let version = KotlinPropertySpec::builder("VERSION", types::string())
            .add_modifiers([KotlinModifier::Const])
            .initializer(CodeValue::of("%V", [CodePart::string("1.0")]).unwrap())
            .build()
            .unwrap();
        let marker = KotlinTypeSpec::object_builder("Marker").build().unwrap();
        let file = KotlinFile::builder("", "Misc")
            .add_file_comment("Generated code. Do not edit.")
            .add_property(version)
            .add_function(greeting())
            .add_type(marker)
            .build()
            .unwrap();
        assert_eq!(
            file.to_string(),
            "// Generated code. Do not edit.\nconst val VERSION: String = \"1.0\"\n\nfun main() {\n    println(\"Hello, Kotlin!\")\n}\n\nobject Marker\n"
        );
    }

    #[test]
    fn test_write_places_file_under_package_dirs() {
        let temp = TempDir::new().unwrap();
        let file = KotlinFile::builder("com.example", "Hello")
            .add_function(greeting())
            .build()
            .unwrap();
        file.write(temp.path()).unwrap();
        let path = temp.path().join("com/example/Hello.kt");
        assert_eq!(std::fs::read_to_string(path).unwrap(), file.to_string());
    }

    #[test]
    fn test_render_is_idempotent() {
        let file = KotlinFile::builder("com.example", "Hello")
            .add_function(greeting())
            .indent(Indent::Spaces(2))
            .build()
            .unwrap();
        assert_eq!(file.to_string(), file.to_string());
        assert!(file.to_string().contains("\n  println"));
    }

    #[test]
    fn test_anonymous_top_level_is_rejected() {
        let anonymous = KotlinTypeSpec::anonymous_object_builder().build().unwrap();
        let err = KotlinFile::builder("com.example", "Bad")
            .add_type(anonymous)
            .build()
            .unwrap_err();
        assert!(matches!(*err, Error::InvalidDeclaration { .. }));
    }
}
