use std::collections::BTreeSet;

use codegentle_common::naming::Keyword;

/// Java declaration modifiers, ordered as they are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum JavaModifier {
    Public,
    Protected,
    Private,
    Abstract,
    Default,
    Static,
    Final,
    Sealed,
    NonSealed,
    Transient,
    Volatile,
    Synchronized,
    Native,
    Strictfp,
}

impl Keyword for JavaModifier {
    fn keyword(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Protected => "protected",
            Self::Private => "private",
            Self::Abstract => "abstract",
            Self::Default => "default",
            Self::Static => "static",
            Self::Final => "final",
            Self::Sealed => "sealed",
            Self::NonSealed => "non-sealed",
            Self::Transient => "transient",
            Self::Volatile => "volatile",
            Self::Synchronized => "synchronized",
            Self::Native => "native",
            Self::Strictfp => "strictfp",
        }
    }
}

pub(crate) fn modifier_set<const N: usize>(modifiers: [JavaModifier; N]) -> BTreeSet<JavaModifier> {
    BTreeSet::from(modifiers)
}
