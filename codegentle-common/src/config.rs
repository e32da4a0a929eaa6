//! Per-file rendering configuration.

use std::{collections::BTreeSet, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    indent::Indent,
    line_wrapper::DEFAULT_COLUMN_LIMIT,
};

/// Options shared by every file render.
///
/// Can be loaded from TOML:
///
/// ```toml
/// indent = 4
/// column_limit = 100
/// skip_lang_imports = true
/// static_imports = ["java.util.Collections.*"]
/// always_qualify = ["Override"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EmitConfig {
    pub indent: Indent,
    pub column_limit: usize,
    /// Leave out imports of the language's implicit package.
    pub skip_lang_imports: bool,
    /// Static imports, `a.b.C.member` or `a.b.C.*`.
    pub static_imports: BTreeSet<String>,
    /// Simple names that are never imported.
    pub always_qualify: BTreeSet<String>,
}

impl Default for EmitConfig {
    fn default() -> Self {
        Self {
            indent: Indent::default(),
            column_limit: DEFAULT_COLUMN_LIMIT,
            skip_lang_imports: true,
            static_imports: BTreeSet::new(),
            always_qualify: BTreeSet::new(),
        }
    }
}

impl EmitConfig {
    /// Parse a configuration from TOML source.
    pub fn from_toml_str(src: &str, filename: &str) -> Result<Self> {
        toml::from_str(src).map_err(|e| Error::config(e, src, filename))
    }

    /// Load a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let src = std::fs::read_to_string(path).map_err(|source| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source,
            })
        })?;
        Self::from_toml_str(&src, &path.display().to_string())
    }

    pub fn with_indent(mut self, indent: Indent) -> Self {
        self.indent = indent;
        self
    }

    pub fn with_column_limit(mut self, column_limit: usize) -> Self {
        self.column_limit = column_limit;
        self
    }

    pub fn with_static_import(mut self, import: impl Into<String>) -> Self {
        self.static_imports.insert(import.into());
        self
    }

    pub fn with_always_qualify(mut self, simple_name: impl Into<String>) -> Self {
        self.always_qualify.insert(simple_name.into());
        self
    }
}
