use std::{
    collections::BTreeSet,
    fmt,
    path::{Path, PathBuf},
};

use codegentle_common::{
    ClassName, CodeWriter, EmitConfig, Error, GeneratedFile, Indent, PackageName, Result,
    code::{CodeValue, Named},
    writer::render_file,
};

use crate::{TypeSpec, strategy::JAVA};

/// A Java compilation unit holding a single top-level type.
#[derive(Debug, Clone)]
pub struct JavaFile {
    package: PackageName,
    type_spec: TypeSpec,
    file_comment: CodeValue,
    config: EmitConfig,
}

impl JavaFile {
    pub fn builder(package: impl Into<PackageName>, type_spec: TypeSpec) -> JavaFileBuilder {
        JavaFileBuilder {
            file: JavaFile {
                package: package.into(),
                type_spec,
                file_comment: CodeValue::new(),
                config: EmitConfig::default(),
            },
        }
    }

    pub fn package(&self) -> &PackageName {
        &self.package
    }

    pub fn type_spec(&self) -> &TypeSpec {
        &self.type_spec
    }

    /// Render the file into `out`.
    pub fn write_to(&self, out: &mut dyn fmt::Write) -> Result<()> {
        render_file(&JAVA, &self.config, &self.package, out, |writer| {
            self.emit(writer)
        })?;
        Ok(())
    }

    fn emit(&self, writer: &mut CodeWriter<'_>) -> Result<()> {
        if !self.file_comment.is_empty() {
            writer.emit_comment(&self.file_comment)?;
        }

        if !self.package.is_empty() {
            writer.emit(&format!("package {};\n\n", self.package))?;
        }

        let static_imports: Vec<String> = writer.static_imports().iter().cloned().collect();
        for import in &static_imports {
            writer.emit(&format!("import static {import};\n"))?;
        }
        if !static_imports.is_empty() {
            writer.emit("\n")?;
        }

        let mut imports: Vec<String> = writer
            .explicit_imports()
            .map(|class| class.canonical_name())
            .collect();
        imports.sort();
        for import in &imports {
            writer.emit(&format!("import {import};\n"))?;
        }
        if !imports.is_empty() {
            writer.emit("\n")?;
        }

        self.type_spec.emit(writer, None, &BTreeSet::new())
    }
}

impl fmt::Display for JavaFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        self.write_to(&mut out).map_err(|_| fmt::Error)?;
        f.write_str(&out)
    }
}

impl GeneratedFile for JavaFile {
    fn path(&self, base: &Path) -> PathBuf {
        base.join(self.package.to_path())
            .join(format!("{}.java", self.type_spec.name()))
    }

    fn render(&self) -> Result<String> {
        let mut out = String::new();
        self.write_to(&mut out)?;
        Ok(out)
    }
}

#[derive(Debug, Clone)]
pub struct JavaFileBuilder {
    file: JavaFile,
}

impl JavaFileBuilder {
    /// Replace the whole emit configuration, e.g. one loaded from TOML.
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

    /// Statically import `member` of `class`, or every member with `*`.
    pub fn add_static_import(mut self, class: &ClassName, member: &str) -> Self {
        self.file.config = self
            .file
            .config
            .with_static_import(format!("{}.{member}", class.canonical_name()));
        self
    }

    /// Never import classes with this simple name.
    pub fn always_qualify(mut self, simple_name: impl Into<String>) -> Self {
        self.file.config = self.file.config.with_always_qualify(simple_name);
        self
    }

    /// Whether `java.lang` classes are referenced without import.
    pub fn skip_java_lang_imports(mut self, skip: bool) -> Self {
        self.file.config.skip_lang_imports = skip;
        self
    }

    pub fn add_file_comment(mut self, comment: impl Into<CodeValue>) -> Self {
        self.file.file_comment = std::mem::take(&mut self.file.file_comment).concat(comment.into());
        self
    }

    pub fn build(self) -> Result<JavaFile> {
        if self.file.type_spec.is_anonymous() {
            return Err(Error::invalid_declaration(
                "an anonymous class cannot be a top-level type",
            ));
        }
        Ok(self.file)
    }
}
