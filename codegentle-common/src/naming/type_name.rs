use super::ClassName;
use crate::annotation::AnnotationRef;

/// Any type that can appear in source code.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeName {
    Class(ClassName),
    /// A generic class applied to type arguments, e.g. `List<String>`.
    Parameterized {
        raw: ClassName,
        arguments: Vec<TypeRef>,
    },
    Array(Box<TypeRef>),
    TypeVariable(TypeVariableName),
    Wildcard(WildcardBounds),
    /// A Java primitive keyword such as `int` or `void`.
    Primitive(&'static str),
}

impl TypeName {
    pub fn parameterized(raw: ClassName, arguments: impl IntoIterator<Item = TypeRef>) -> Self {
        Self::Parameterized {
            raw,
            arguments: arguments.into_iter().collect(),
        }
    }

    pub fn array_of(component: impl Into<TypeRef>) -> Self {
        Self::Array(Box::new(component.into()))
    }

    pub fn type_variable(name: impl Into<String>) -> Self {
        Self::TypeVariable(TypeVariableName::new(name))
    }

    pub fn wildcard() -> Self {
        Self::Wildcard(WildcardBounds::Unbounded)
    }

    /// `? extends T` / `out T`.
    pub fn subtype_of(upper: impl Into<TypeRef>) -> Self {
        Self::Wildcard(WildcardBounds::Upper(Box::new(upper.into())))
    }

    /// `? super T` / `in T`.
    pub fn supertype_of(lower: impl Into<TypeRef>) -> Self {
        Self::Wildcard(WildcardBounds::Lower(Box::new(lower.into())))
    }

    /// The class behind a plain or parameterized class type.
    pub fn raw_class(&self) -> Option<&ClassName> {
        match self {
            Self::Class(class) | Self::Parameterized { raw: class, .. } => Some(class),
            _ => None,
        }
    }

    pub fn array_component(&self) -> Option<&TypeRef> {
        match self {
            Self::Array(component) => Some(component),
            _ => None,
        }
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, Self::Primitive(_))
    }

    /// Short human-readable description used in error messages.
    pub fn describe(&self) -> String {
        match self {
            Self::Class(class) | Self::Parameterized { raw: class, .. } => {
                format!("class {}", class.canonical_name())
            }
            Self::Array(_) => "array type".to_string(),
            Self::TypeVariable(variable) => format!("type variable {}", variable.name()),
            Self::Wildcard(_) => "wildcard type".to_string(),
            Self::Primitive(keyword) => format!("primitive type {keyword}"),
        }
    }
}

impl From<ClassName> for TypeName {
    fn from(class: ClassName) -> Self {
        Self::Class(class)
    }
}

impl From<TypeVariableName> for TypeName {
    fn from(variable: TypeVariableName) -> Self {
        Self::TypeVariable(variable)
    }
}

/// A named type variable with its bounds, e.g. `T extends Comparable<T>`.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeVariableName {
    name: String,
    bounds: Vec<TypeRef>,
}

impl TypeVariableName {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bounds: Vec::new(),
        }
    }

    pub fn with_bound(mut self, bound: impl Into<TypeRef>) -> Self {
        self.bounds.push(bound.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bounds(&self) -> &[TypeRef] {
        &self.bounds
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum WildcardBounds {
    Unbounded,
    Upper(Box<TypeRef>),
    Lower(Box<TypeRef>),
}

/// Dialect-specific decoration of a [`TypeRef`].
#[derive(Debug, Clone, PartialEq, Default)]
pub enum TypeRefStatus {
    /// Renders in either dialect.
    #[default]
    Neutral,
    Java {
        annotations: Vec<AnnotationRef>,
    },
    Kotlin {
        nullable: bool,
        annotations: Vec<AnnotationRef>,
    },
}

/// A type name together with its use-site status.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeRef {
    type_name: TypeName,
    status: TypeRefStatus,
}

impl TypeRef {
    pub fn new(type_name: impl Into<TypeName>) -> Self {
        Self {
            type_name: type_name.into(),
            status: TypeRefStatus::Neutral,
        }
    }

    /// A Java type use carrying type annotations.
    pub fn java(type_name: impl Into<TypeName>, annotations: Vec<AnnotationRef>) -> Self {
        Self {
            type_name: type_name.into(),
            status: TypeRefStatus::Java { annotations },
        }
    }

    /// A Kotlin type use, nullable or not.
    pub fn kotlin(type_name: impl Into<TypeName>, nullable: bool) -> Self {
        Self {
            type_name: type_name.into(),
            status: TypeRefStatus::Kotlin {
                nullable,
                annotations: Vec::new(),
            },
        }
    }

    /// The same type marked nullable, switching to Kotlin status.
    pub fn nullable(self) -> Self {
        let annotations = match self.status {
            TypeRefStatus::Kotlin { annotations, .. } | TypeRefStatus::Java { annotations } => {
                annotations
            }
            TypeRefStatus::Neutral => Vec::new(),
        };
        Self {
            type_name: self.type_name,
            status: TypeRefStatus::Kotlin {
                nullable: true,
                annotations,
            },
        }
    }

    /// Add a type-use annotation. A neutral reference becomes a Java one.
    pub fn annotated(mut self, annotation: AnnotationRef) -> Self {
        match &mut self.status {
            TypeRefStatus::Neutral => {
                self.status = TypeRefStatus::Java {
                    annotations: vec![annotation],
                };
            }
            TypeRefStatus::Java { annotations } | TypeRefStatus::Kotlin { annotations, .. } => {
                annotations.push(annotation);
            }
        }
        self
    }

    pub fn type_name(&self) -> &TypeName {
        &self.type_name
    }

    pub fn status(&self) -> &TypeRefStatus {
        &self.status
    }

    pub fn annotations(&self) -> &[AnnotationRef] {
        match &self.status {
            TypeRefStatus::Neutral => &[],
            TypeRefStatus::Java { annotations } | TypeRefStatus::Kotlin { annotations, .. } => {
                annotations
            }
        }
    }

    pub fn is_nullable(&self) -> bool {
        matches!(self.status, TypeRefStatus::Kotlin { nullable: true, .. })
    }
}

impl From<TypeName> for TypeRef {
    fn from(type_name: TypeName) -> Self {
        Self::new(type_name)
    }
}

impl From<ClassName> for TypeRef {
    fn from(class: ClassName) -> Self {
        Self::new(class)
    }
}

impl From<TypeVariableName> for TypeRef {
    fn from(variable: TypeVariableName) -> Self {
        Self::new(variable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_class() {
        let list = ClassName::new("java.util", "List");
        let string = ClassName::new("java.lang", "String");
        let parameterized = TypeName::parameterized(list.clone(), [TypeRef::from(string)]);
        assert_eq!(parameterized.raw_class(), Some(&list));
        assert_eq!(TypeName::type_variable("T").raw_class(), None);
    }

    #[test]
    fn test_nullable_keeps_annotations() {
        let annotation = AnnotationRef::new(ClassName::new("a", "Marker"));
        let type_ref = TypeRef::new(ClassName::new("a", "B"))
            .annotated(annotation.clone())
            .nullable();
        assert!(type_ref.is_nullable());
        assert_eq!(type_ref.annotations(), &[annotation]);
    }

    #[test]
    fn test_annotated_neutral_becomes_java() {
        let annotation = AnnotationRef::new(ClassName::new("a", "NonNull"));
        let type_ref = TypeRef::new(ClassName::new("a", "B")).annotated(annotation);
        assert!(matches!(type_ref.status(), TypeRefStatus::Java { .. }));
        assert!(!type_ref.is_nullable());
    }

    #[test]
    fn test_describe() {
        assert_eq!(TypeName::Primitive("int").describe(), "primitive type int");
        assert_eq!(
            TypeName::from(ClassName::new("java.util", "Map")).describe(),
            "class java.util.Map"
        );
    }
}
