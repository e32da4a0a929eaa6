//! Annotation references.

use indexmap::IndexMap;

use crate::{
    code::{CodePart, CodeValue},
    error::Result,
    naming::ClassName,
};

/// A use of an annotation, such as `@SuppressWarnings("unchecked")`.
///
/// Members keep insertion order. A member with more than one value renders
/// as an array.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationRef {
    type_name: ClassName,
    members: IndexMap<String, Vec<CodeValue>>,
}

impl AnnotationRef {
    pub fn new(type_name: ClassName) -> Self {
        Self {
            type_name,
            members: IndexMap::new(),
        }
    }

    /// Add a value to member `name`, appending if the member already has values.
    pub fn add_member(mut self, name: impl Into<String>, value: impl Into<CodeValue>) -> Self {
        self.members
            .entry(name.into())
            .or_default()
            .push(value.into());
        self
    }

    /// Add a formatted value to member `name`.
    pub fn add_member_format(
        self,
        name: impl Into<String>,
        format: &str,
        arguments: impl IntoIterator<Item = CodePart>,
    ) -> Result<Self> {
        let value = CodeValue::of(format, arguments)?;
        Ok(self.add_member(name, value))
    }

    pub fn type_name(&self) -> &ClassName {
        &self.type_name
    }

    pub fn members(&self) -> &IndexMap<String, Vec<CodeValue>> {
        &self.members
    }
}

impl From<ClassName> for AnnotationRef {
    fn from(type_name: ClassName) -> Self {
        Self::new(type_name)
    }
}
