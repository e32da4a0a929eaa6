use std::{fmt, path::PathBuf};

/// A dot-separated package name. The empty package is allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PackageName {
    segments: Vec<String>,
}

impl PackageName {
    /// Parse a dotted package name such as `java.util`.
    pub fn new(dotted: &str) -> Self {
        Self::from_segments(dotted.split('.').filter(|s| !s.is_empty()))
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_segments<S: Into<String>>(segments: impl IntoIterator<Item = S>) -> Self {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// A sub-package of this package.
    pub fn nested(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        Self { segments }
    }

    /// Whether this package is `other` or one of its sub-packages.
    pub fn is_within(&self, other: &PackageName) -> bool {
        self.segments.starts_with(&other.segments)
    }

    /// Relative directory path for this package (`java/util`).
    pub fn to_path(&self) -> PathBuf {
        self.segments.iter().collect()
    }
}

impl fmt::Display for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

impl From<&str> for PackageName {
    fn from(dotted: &str) -> Self {
        Self::new(dotted)
    }
}

impl From<String> for PackageName {
    fn from(dotted: String) -> Self {
        Self::new(&dotted)
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    #[test]
    fn test_parse_and_display() {
        let package = PackageName::new("com.example.helloworld");
        assert_eq!(package.segments().len(), 3);
        assert_eq!(package.to_string(), "com.example.helloworld");
    }

    #[test]
    fn test_empty() {
        assert!(PackageName::new("").is_empty());
        assert!(PackageName::empty().is_empty());
        assert_eq!(PackageName::empty().to_string(), "");
    }

    #[test]
    fn test_is_within() {
        let kotlin = PackageName::new("kotlin");
        assert!(PackageName::new("kotlin.collections").is_within(&kotlin));
        assert!(kotlin.is_within(&kotlin));
        assert!(!PackageName::new("kotlinx.coroutines").is_within(&kotlin));
    }

    #[test]
    fn test_to_path() {
        assert_eq!(
            PackageName::new("java.util").to_path(),
            Path::new("java").join("util")
        );
    }
}
