use std::fmt;

use super::{PackageName, is_valid_identifier};
use crate::error::{Error, Result};

/// A fully-qualified class name: a package plus a top-level name and the
/// chain of nested names below it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassName {
    package: PackageName,
    simple_names: Vec<String>,
}

impl ClassName {
    /// A top-level class.
    pub fn new(package: impl Into<PackageName>, simple_name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            simple_names: vec![simple_name.into()],
        }
    }

    /// A class nested in a chain of enclosing classes, outermost first.
    pub fn nested_in<S: Into<String>>(
        package: impl Into<PackageName>,
        simple_names: impl IntoIterator<Item = S>,
    ) -> Result<Self> {
        let simple_names: Vec<String> = simple_names.into_iter().map(Into::into).collect();
        if simple_names.is_empty() {
            return Err(Box::new(Error::InvalidName {
                name: String::new(),
            }));
        }
        Ok(Self {
            package: package.into(),
            simple_names,
        })
    }

    /// Parse `java.util.Map.Entry` style names.
    ///
    /// The first segment starting with an upper-case letter begins the class
    /// chain; without one, the last segment is the class.
    pub fn parse(qualified: &str) -> Result<Self> {
        let segments: Vec<&str> = qualified.split('.').collect();
        if let Some(invalid) = segments.iter().find(|s| !is_valid_identifier(s)) {
            return Err(Box::new(Error::InvalidName {
                name: if invalid.is_empty() {
                    qualified.to_string()
                } else {
                    invalid.to_string()
                },
            }));
        }

        let class_start = segments
            .iter()
            .position(|s| s.starts_with(|c: char| c.is_uppercase()))
            .unwrap_or(segments.len() - 1);
        let (package, names) = segments.split_at(class_start);
        Self::nested_in(PackageName::from_segments(package.iter().copied()), names.iter().copied())
    }

    /// A class nested directly inside this one.
    pub fn nested_class(&self, name: impl Into<String>) -> Self {
        let mut simple_names = self.simple_names.clone();
        simple_names.push(name.into());
        Self {
            package: self.package.clone(),
            simple_names,
        }
    }

    pub fn package(&self) -> &PackageName {
        &self.package
    }

    pub fn simple_name(&self) -> &str {
        self.simple_names.last().map_or("", String::as_str)
    }

    /// Names from the top-level class down to this one.
    pub fn simple_names(&self) -> &[String] {
        &self.simple_names
    }

    pub fn enclosing_class_name(&self) -> Option<ClassName> {
        if self.simple_names.len() < 2 {
            return None;
        }
        Some(Self {
            package: self.package.clone(),
            simple_names: self.simple_names[..self.simple_names.len() - 1].to_vec(),
        })
    }

    pub fn top_level_class_name(&self) -> ClassName {
        Self {
            package: self.package.clone(),
            simple_names: self.simple_names.iter().take(1).cloned().collect(),
        }
    }

    pub fn is_top_level(&self) -> bool {
        self.simple_names.len() == 1
    }

    /// `java.util.Map.Entry`, or just the names for the empty package.
    pub fn canonical_name(&self) -> String {
        let names = self.simple_names.join(".");
        if self.package.is_empty() {
            names
        } else {
            format!("{}.{}", self.package, names)
        }
    }
}

impl fmt::Display for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical_name())
    }
}
