//! The code writer: indentation, comments, names and the code-value
//! interpreter, over a [`LineWrapper`].
//!
//! # Module Organization
//!
//! - [`names`] - Shortest-name resolution and import bookkeeping
//! - [`strategy`] - Dialect hooks ([`WriteStrategy`])
//! - [`render`] - Two-pass file rendering and standalone rendering
//!
//! The code-value interpreter lives in `interpret`, as further methods on
//! [`CodeWriter`].

mod interpret;
mod names;
mod render;
mod strategy;

use std::{collections::BTreeSet, fmt};

use indexmap::IndexMap;

pub use interpret::extract_member_name;
pub use names::TypeScope;
use names::NameResolver;
pub use render::{render_file, render_standalone, render_standalone_with};
pub use strategy::{WriteStrategy, escape_string};

use crate::{
    annotation::AnnotationRef,
    code::CodeValue,
    config::EmitConfig,
    error::{Error, Result},
    line_wrapper::LineWrapper,
    naming::{ClassName, Dialect, Keyword, PackageName, TypeName, TypeRef},
};

/// Extra indent levels for wrapped statement lines.
const CONTINUATION_INDENT: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CommentKind {
    Doc,
    Line,
}

/// Stateful emitter shared by every declaration of one render pass.
pub struct CodeWriter<'a> {
    strategy: &'a dyn WriteStrategy,
    out: LineWrapper<'a>,
    indent: String,
    indent_level: usize,
    /// Line offset inside the open statement, `None` outside statements.
    statement_line: Option<usize>,
    comment: Option<CommentKind>,
    trailing_newline: bool,
    skip_lang_imports: bool,
    names: NameResolver,
}

impl<'a> CodeWriter<'a> {
    pub fn new(
        strategy: &'a dyn WriteStrategy,
        out: &'a mut dyn fmt::Write,
        config: &EmitConfig,
    ) -> Self {
        let indent = config.indent.unit();
        Self {
            strategy,
            out: LineWrapper::new(out, indent.clone(), config.column_limit),
            indent,
            indent_level: 0,
            statement_line: None,
            comment: None,
            trailing_newline: false,
            skip_lang_imports: config.skip_lang_imports,
            names: NameResolver::new(config.static_imports.clone(), config.always_qualify.clone()),
        }
    }

    /// Seed the import table with the result of a previous pass.
    pub fn with_imported_types(mut self, imported: IndexMap<String, ClassName>) -> Self {
        self.names.set_imported(imported);
        self
    }

    pub fn dialect(&self) -> Dialect {
        self.strategy.dialect()
    }

    pub fn indent_unit(&self) -> &str {
        &self.indent
    }

    pub fn set_package(&mut self, package: PackageName) {
        self.names.set_package(package);
    }

    pub fn package(&self) -> &PackageName {
        self.names.package()
    }

    pub fn imported_types(&self) -> &IndexMap<String, ClassName> {
        self.names.imported()
    }

    /// Imported classes that need an `import` line; implicitly visible ones
    /// resolve through the table without one.
    pub fn explicit_imports(&self) -> impl Iterator<Item = &ClassName> + '_ {
        self.names
            .imported()
            .values()
            .filter(|class| !self.is_implicitly_visible(class))
    }

    pub fn static_imports(&self) -> &BTreeSet<String> {
        self.names.static_imports()
    }

    /// Imports to seed the next pass with.
    pub fn suggested_imports(&self) -> IndexMap<String, ClassName> {
        self.names.suggested_imports()
    }

    /// The implicitly visible part of [`Self::suggested_imports`].
    pub(crate) fn implicit_suggested_imports(&self) -> IndexMap<String, ClassName> {
        self.names
            .suggested_imports()
            .into_iter()
            .filter(|(_, class)| self.is_implicitly_visible(class))
            .collect()
    }

    fn is_implicitly_visible(&self, class: &ClassName) -> bool {
        self.skip_lang_imports && self.strategy.is_implicitly_visible(class)
    }

    pub fn last_char(&self) -> Option<char> {
        self.out.last_char()
    }

    pub fn indent(&mut self) {
        self.indent_by(1);
    }

    pub fn indent_by(&mut self, levels: usize) {
        self.indent_level += levels;
    }

    pub fn unindent(&mut self) -> Result<()> {
        self.unindent_by(1)
    }

    pub fn unindent_by(&mut self, levels: usize) -> Result<()> {
        if levels > self.indent_level {
            return Err(Box::new(Error::NegativeIndent {
                levels,
                current: self.indent_level,
            }));
        }
        self.indent_level -= levels;
        Ok(())
    }

    pub fn push_type(&mut self, scope: TypeScope) {
        self.names.push_type(scope);
    }

    pub fn pop_type(&mut self) {
        self.names.pop_type();
    }

    pub fn push_type_variables<'n>(&mut self, names: impl IntoIterator<Item = &'n str>) {
        for name in names {
            self.names.push_type_variable(name);
        }
    }

    pub fn pop_type_variables<'n>(&mut self, names: impl IntoIterator<Item = &'n str>) {
        for name in names {
            self.names.pop_type_variable(name);
        }
    }

    /// Run `f` outside of any open statement, restoring the statement after.
    ///
    /// Declarations nested in an expression (anonymous classes) have their
    /// own statements.
    pub fn detached_statement<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        let saved = self.statement_line.take();
        let result = f(self);
        self.statement_line = saved;
        result
    }

    /// Emit text, indenting each new line and continuing comments.
    pub fn emit(&mut self, text: &str) -> Result<()> {
        for (i, line) in text.split('\n').enumerate() {
            if i > 0 {
                if self.trailing_newline {
                    if let Some(kind) = self.comment {
                        self.emit_indentation()?;
                        self.out.append(match kind {
                            CommentKind::Doc => " *",
                            CommentKind::Line => "//",
                        })?;
                    }
                }
                self.out.append("\n")?;
                self.trailing_newline = true;
                if let Some(line_number) = self.statement_line {
                    if line_number == 0 {
                        self.indent_by(CONTINUATION_INDENT);
                    }
                    self.statement_line = Some(line_number + 1);
                }
            }

            // Blank lines carry no indentation.
            if line.is_empty() {
                continue;
            }

            if self.trailing_newline {
                self.emit_indentation()?;
                match self.comment {
                    Some(CommentKind::Doc) => self.out.append(" * ")?,
                    Some(CommentKind::Line) => self.out.append("// ")?,
                    None => {}
                }
            }
            self.out.append(line)?;
            self.trailing_newline = false;
        }
        Ok(())
    }

    fn emit_indentation(&mut self) -> Result<()> {
        for _ in 0..self.indent_level {
            self.out.append(&self.indent)?;
        }
        Ok(())
    }

    /// A space, or a line break if the line is full.
    pub fn wrapping_space(&mut self) -> Result<()> {
        self.out
            .wrapping_space(self.indent_level + CONTINUATION_INDENT)
    }

    /// Nothing, or a line break if the line is full.
    pub fn zero_width_space(&mut self) -> Result<()> {
        self.out
            .zero_width_space(self.indent_level + CONTINUATION_INDENT)
    }

    /// Emit `code` as a `//` comment.
    pub fn emit_comment(&mut self, code: &CodeValue) -> Result<()> {
        self.trailing_newline = true;
        self.comment = Some(CommentKind::Line);
        let result = self.emit_code(code).and_then(|()| self.emit("\n"));
        self.comment = None;
        result
    }

    /// Emit `code` as a `/** ... */` doc comment. Empty docs emit nothing.
    pub fn emit_doc(&mut self, code: &CodeValue) -> Result<()> {
        if code.is_empty() {
            return Ok(());
        }
        self.emit("/**\n")?;
        self.comment = Some(CommentKind::Doc);
        let result = self.emit_code_with_newline(code);
        self.comment = None;
        result?;
        self.emit(" */\n")
    }

    pub(crate) fn in_doc(&self) -> bool {
        self.comment == Some(CommentKind::Doc)
    }

    /// Emit the shortest valid reference to `class`.
    pub fn emit_class_name(&mut self, class: &ClassName) -> Result<()> {
        let implicit = self.is_implicitly_visible(class);
        let in_doc = self.in_doc();
        let name = self.names.lookup_name(class, in_doc, implicit);
        self.emit(&name)
    }

    pub fn emit_type_name(&mut self, type_name: &TypeName) -> Result<()> {
        self.emit_type_ref(&TypeRef::new(type_name.clone()))
    }

    pub fn emit_type_ref(&mut self, type_ref: &TypeRef) -> Result<()> {
        let strategy = self.strategy;
        strategy.emit_type_ref(self, type_ref)
    }

    /// Emit one annotation without trailing separator.
    ///
    /// A lone `value` member is written positionally; members with several
    /// values are written as arrays.
    pub fn emit_annotation(&mut self, annotation: &AnnotationRef) -> Result<()> {
        self.emit("@")?;
        self.emit_class_name(annotation.type_name())?;

        let members = annotation.members();
        if members.is_empty() {
            return Ok(());
        }

        self.emit("(")?;
        if members.len() == 1 && members.contains_key("value") {
            self.emit_annotation_value(&members["value"])?;
        } else {
            for (i, (name, values)) in members.iter().enumerate() {
                if i > 0 {
                    self.emit(", ")?;
                }
                self.emit(name)?;
                self.emit(" = ")?;
                self.emit_annotation_value(values)?;
            }
        }
        self.emit(")")
    }

    fn emit_annotation_value(&mut self, values: &[CodeValue]) -> Result<()> {
        if let [single] = values {
            return self.emit_code(single);
        }
        let (open, close) = self.strategy.annotation_array_delimiters();
        self.emit(open)?;
        for (i, value) in values.iter().enumerate() {
            if i > 0 {
                self.emit(", ")?;
            }
            self.emit_code(value)?;
        }
        self.emit(close)
    }

    /// Emit each annotation followed by a space (`inline`) or a line break.
    pub fn emit_annotations(&mut self, annotations: &[AnnotationRef], inline: bool) -> Result<()> {
        for annotation in annotations {
            self.emit_annotation(annotation)?;
            self.emit(if inline { " " } else { "\n" })?;
        }
        Ok(())
    }

    /// Emit `modifiers` that are not `implicit`, each followed by a space.
    pub fn emit_modifiers<M: Keyword + Ord>(
        &mut self,
        modifiers: &BTreeSet<M>,
        implicit: &BTreeSet<M>,
    ) -> Result<()> {
        for modifier in modifiers.difference(implicit) {
            self.emit(modifier.keyword())?;
            self.emit(" ")?;
        }
        Ok(())
    }

    /// Resolve pending whitespace and refuse further output.
    pub fn close(&mut self) -> Result<()> {
        self.out.close()
    }
}
