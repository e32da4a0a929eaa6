use std::collections::BTreeSet;

use codegentle_common::naming::Keyword;

/// Kotlin modifiers in the order the coding conventions write them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum KotlinModifier {
    Public,
    Protected,
    Private,
    Internal,
    Expect,
    Actual,
    Final,
    Open,
    Abstract,
    Sealed,
    Const,
    External,
    Override,
    Lateinit,
    Tailrec,
    Vararg,
    Suspend,
    Inner,
    Enum,
    Annotation,
    Value,
    Fun,
    Companion,
    Inline,
    Noinline,
    Crossinline,
    Reified,
    Infix,
    Operator,
    Data,
    In,
    Out,
}

impl KotlinModifier {
    pub fn is_visibility(self) -> bool {
        matches!(
            self,
            Self::Public | Self::Protected | Self::Private | Self::Internal
        )
    }
}

impl Keyword for KotlinModifier {
    fn keyword(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Protected => "protected",
            Self::Private => "private",
            Self::Internal => "internal",
            Self::Expect => "expect",
            Self::Actual => "actual",
            Self::Final => "final",
            Self::Open => "open",
            Self::Abstract => "abstract",
            Self::Sealed => "sealed",
            Self::Const => "const",
            Self::External => "external",
            Self::Override => "override",
            Self::Lateinit => "lateinit",
            Self::Tailrec => "tailrec",
            Self::Vararg => "vararg",
            Self::Suspend => "suspend",
            Self::Inner => "inner",
            Self::Enum => "enum",
            Self::Annotation => "annotation",
            Self::Value => "value",
            Self::Fun => "fun",
            Self::Companion => "companion",
            Self::Inline => "inline",
            Self::Noinline => "noinline",
            Self::Crossinline => "crossinline",
            Self::Reified => "reified",
            Self::Infix => "infix",
            Self::Operator => "operator",
            Self::Data => "data",
            Self::In => "in",
            Self::Out => "out",
        }
    }
}

/// `public` is the default visibility and never written.
pub(crate) fn implicit(extra: impl IntoIterator<Item = KotlinModifier>) -> BTreeSet<KotlinModifier> {
    let mut modifiers = BTreeSet::from([KotlinModifier::Public]);
    modifiers.extend(extra);
    modifiers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conventional_order() {
        let set = BTreeSet::from([
            KotlinModifier::Suspend,
            KotlinModifier::Override,
            KotlinModifier::Private,
            KotlinModifier::Inline,
        ]);
        let keywords: Vec<_> = set.iter().map(Keyword::keyword).collect();
        assert_eq!(keywords, ["private", "override", "suspend", "inline"]);
    }

    #[test]
    fn test_public_is_always_implicit() {
        assert!(implicit([]).contains(&KotlinModifier::Public));
        assert!(implicit([KotlinModifier::Abstract]).contains(&KotlinModifier::Abstract));
    }
}
