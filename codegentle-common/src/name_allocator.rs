//! Collision-free identifier allocation.

use std::{
    collections::{HashMap, HashSet},
    fmt::Debug,
    hash::Hash,
};

use crate::{
    error::{Error, Result},
    naming::{NamingConvention, to_identifier},
};

/// Hands out identifiers that are valid, not reserved, and distinct from
/// every name handed out before.
///
/// Names can be tagged so that later code can look them up by the object
/// they were allocated for:
///
/// ```
/// use codegentle_common::{name_allocator::NameAllocator, naming::{Dialect, NamingConvention}};
///
/// let convention = NamingConvention {
///     dialect: Dialect::Java,
///     reserved_words: &["class"],
///     escape_reserved: |name| format!("{name}_"),
/// };
/// let mut names = NameAllocator::new(&convention);
/// assert_eq!(names.new_name_tagged("class", 1).unwrap(), "class_");
/// assert_eq!(names.new_name("class"), "class__");
/// assert_eq!(names.get(&1).unwrap(), "class_");
/// ```
#[derive(Debug, Clone)]
pub struct NameAllocator<T> {
    reserved_words: &'static [&'static str],
    allocated: HashSet<String>,
    tags: HashMap<T, String>,
}

impl<T: Eq + Hash + Debug> NameAllocator<T> {
    pub fn new(convention: &NamingConvention) -> Self {
        Self {
            reserved_words: convention.reserved_words,
            allocated: HashSet::new(),
            tags: HashMap::new(),
        }
    }

    /// Allocate a name derived from `suggestion`.
    pub fn new_name(&mut self, suggestion: &str) -> String {
        let mut name = to_identifier(suggestion);
        while self.reserved_words.contains(&name.as_str()) || self.allocated.contains(&name) {
            name.push('_');
        }
        self.allocated.insert(name.clone());
        name
    }

    /// Allocate a name and remember it under `tag`.
    pub fn new_name_tagged(&mut self, suggestion: &str, tag: T) -> Result<String> {
        if let Some(existing) = self.tags.get(&tag) {
            return Err(Box::new(Error::DuplicateTag {
                tag: format!("{tag:?}"),
                existing: existing.clone(),
                suggestion: suggestion.to_string(),
            }));
        }
        let name = self.new_name(suggestion);
        self.tags.insert(tag, name.clone());
        Ok(name)
    }

    /// The name allocated for `tag`.
    pub fn get(&self, tag: &T) -> Result<&str> {
        self.tags.get(tag).map(String::as_str).ok_or_else(|| {
            Box::new(Error::UnknownTag {
                tag: format!("{tag:?}"),
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::Dialect;

    const CONVENTION: NamingConvention = NamingConvention {
        dialect: Dialect::Java,
        reserved_words: &["int", "class"],
        escape_reserved: escape,
    };

    fn escape(name: &str) -> String {
        format!("{name}_")
    }

    #[test]
    fn test_usage() {
        let mut names = NameAllocator::new(&CONVENTION);
        assert_eq!(names.new_name_tagged("foo", 1).unwrap(), "foo");
        assert_eq!(names.new_name_tagged("bar", 2).unwrap(), "bar");
        assert_eq!(names.get(&1).unwrap(), "foo");
        assert_eq!(names.get(&2).unwrap(), "bar");
    }

    #[test]
    fn test_name_collision() {
        let mut names: NameAllocator<u8> = NameAllocator::new(&CONVENTION);
        assert_eq!(names.new_name("foo"), "foo");
        assert_eq!(names.new_name("foo"), "foo_");
        assert_eq!(names.new_name("foo"), "foo__");
    }

    #[test]
    fn test_character_mapping() {
        let mut names: NameAllocator<u8> = NameAllocator::new(&CONVENTION);
        assert_eq!(names.new_name("a-b"), "a_b");
        assert_eq!(names.new_name("a-b"), "a_b_");
        assert_eq!(names.new_name("1ab"), "_1ab");
        assert_eq!(names.new_name("a\u{1F600}b"), "a_b__");
    }

    #[test]
    fn test_reserved_words() {
        let mut names: NameAllocator<u8> = NameAllocator::new(&CONVENTION);
        assert_eq!(names.new_name("int"), "int_");
        assert_eq!(names.new_name("class"), "class_");
    }

    #[test]
    fn test_tag_reuse_forbidden() {
        let mut names = NameAllocator::new(&CONVENTION);
        names.new_name_tagged("foo", 1).unwrap();
        let err = names.new_name_tagged("bar", 1).unwrap_err();
        match *err {
            Error::DuplicateTag {
                existing,
                suggestion,
                ..
            } => {
                assert_eq!(existing, "foo");
                assert_eq!(suggestion, "bar");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_tag() {
        let names: NameAllocator<u8> = NameAllocator::new(&CONVENTION);
        let err = names.get(&1).unwrap_err();
        assert!(matches!(*err, Error::UnknownTag { .. }));
    }
}
