//! Shortest-name resolution and import bookkeeping.

use std::collections::{BTreeSet, HashMap};

use indexmap::{IndexMap, IndexSet};
use tracing::trace;

use crate::naming::{ClassName, PackageName};

/// A type declaration currently being emitted, as seen by name resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeScope {
    name: String,
    nested_type_names: Vec<String>,
}

impl TypeScope {
    pub fn new<S: Into<String>>(
        name: impl Into<String>,
        nested_type_names: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            name: name.into(),
            nested_type_names: nested_type_names.into_iter().map(Into::into).collect(),
        }
    }

    /// A scope that only makes its own name visible, used while emitting a
    /// declaration header.
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(name, Vec::<String>::new())
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Resolves class references against the current package, the stack of
/// enclosing declarations, in-scope type variables and the import table.
#[derive(Debug, Default)]
pub(crate) struct NameResolver {
    package: PackageName,
    type_stack: Vec<TypeScope>,
    type_variables: HashMap<String, usize>,
    /// Candidates for import, keyed by top-level simple name. First wins.
    importable: IndexMap<String, ClassName>,
    /// Simple names already usable without an import.
    referenced: IndexSet<String>,
    /// Imports decided by a previous pass.
    imported: IndexMap<String, ClassName>,
    static_imports: BTreeSet<String>,
    /// Canonical names of classes that own a static import.
    static_import_owners: BTreeSet<String>,
    always_qualify: BTreeSet<String>,
}

impl NameResolver {
    pub(crate) fn new(static_imports: BTreeSet<String>, always_qualify: BTreeSet<String>) -> Self {
        let static_import_owners = static_imports
            .iter()
            .filter_map(|import| import.rsplit_once('.').map(|(owner, _)| owner.to_string()))
            .collect();
        Self {
            static_imports,
            static_import_owners,
            always_qualify,
            ..Self::default()
        }
    }

    pub(crate) fn set_package(&mut self, package: PackageName) {
        self.package = package;
    }

    pub(crate) fn package(&self) -> &PackageName {
        &self.package
    }

    pub(crate) fn set_imported(&mut self, imported: IndexMap<String, ClassName>) {
        self.imported = imported;
    }

    pub(crate) fn imported(&self) -> &IndexMap<String, ClassName> {
        &self.imported
    }

    pub(crate) fn static_imports(&self) -> &BTreeSet<String> {
        &self.static_imports
    }

    pub(crate) fn push_type(&mut self, scope: TypeScope) {
        self.type_stack.push(scope);
    }

    pub(crate) fn pop_type(&mut self) -> Option<TypeScope> {
        self.type_stack.pop()
    }

    pub(crate) fn push_type_variable(&mut self, name: &str) {
        *self.type_variables.entry(name.to_string()).or_default() += 1;
    }

    pub(crate) fn pop_type_variable(&mut self, name: &str) {
        if let Some(count) = self.type_variables.get_mut(name) {
            *count -= 1;
            if *count == 0 {
                self.type_variables.remove(name);
            }
        }
    }

    /// Whether some static import is a member of `canonical_name`.
    pub(crate) fn is_static_import_owner(&self, canonical_name: &str) -> bool {
        self.static_import_owners.contains(canonical_name)
    }

    /// The shortest string that names `class` at the current position.
    ///
    /// Classes outside the current package are recorded as importable
    /// (unless `in_doc`) and returned fully qualified; the next pass finds
    /// them in the import table. `implicitly_visible` classes go through the
    /// same table, even from docs, so a same-package class of that simple
    /// name still wins.
    pub(crate) fn lookup_name(
        &mut self,
        class: &ClassName,
        in_doc: bool,
        implicitly_visible: bool,
    ) -> String {
        let top_level = class.top_level_class_name();
        if self.type_variables.contains_key(top_level.simple_name()) {
            return class.canonical_name();
        }

        let mut name_resolved = false;
        let mut candidate = Some(class.clone());
        while let Some(current) = candidate {
            let resolved = self.resolve(current.simple_name());
            name_resolved = resolved.is_some();
            if resolved.as_ref() == Some(&current) {
                let suffix_offset = current.simple_names().len() - 1;
                return class.simple_names()[suffix_offset..].join(".");
            }
            candidate = current.enclosing_class_name();
        }

        if name_resolved {
            trace!(class = %class, "name collision, qualifying");
            return class.canonical_name();
        }

        if class.package() == &self.package {
            self.referenced.insert(top_level.simple_name().to_string());
            return class.simple_names().join(".");
        }

        if !in_doc || implicitly_visible {
            self.importable_type(top_level);
        }
        class.canonical_name()
    }

    fn importable_type(&mut self, top_level: ClassName) {
        if top_level.package().is_empty() {
            return;
        }
        let simple_name = top_level.simple_name().to_string();
        if self.always_qualify.contains(&simple_name) || self.importable.contains_key(&simple_name)
        {
            return;
        }
        trace!(class = %top_level, "importable");
        self.importable.insert(simple_name, top_level);
    }

    /// The class `simple_name` refers to in the current scope, if any.
    fn resolve(&self, simple_name: &str) -> Option<ClassName> {
        for i in (0..self.type_stack.len()).rev() {
            if self.type_stack[i]
                .nested_type_names
                .iter()
                .any(|nested| nested == simple_name)
            {
                return Some(self.stack_class_name(i, simple_name));
            }
        }

        if let Some(outermost) = self.type_stack.first() {
            if outermost.name == simple_name {
                return Some(ClassName::new(self.package.clone(), simple_name));
            }
        }

        self.imported.get(simple_name).cloned()
    }

    fn stack_class_name(&self, depth: usize, simple_name: &str) -> ClassName {
        let mut class = ClassName::new(self.package.clone(), self.type_stack[0].name.clone());
        for scope in &self.type_stack[1..=depth] {
            class = class.nested_class(scope.name.clone());
        }
        class.nested_class(simple_name)
    }

    /// Importable classes not shadowed by a referenced simple name.
    pub(crate) fn suggested_imports(&self) -> IndexMap<String, ClassName> {
        self.importable
            .iter()
            .filter(|(simple_name, _)| !self.referenced.contains(*simple_name))
            .map(|(simple_name, class)| (simple_name.clone(), class.clone()))
            .collect()
    }
}
