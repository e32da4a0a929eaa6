//! Indentation configuration for code generation.

use serde::{Deserialize, Serialize};

/// Indentation style for generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawIndent", into = "RawIndent")]
pub enum Indent {
    /// Spaces with the specified width (e.g., 2 or 4).
    Spaces(u8),
    /// Tab character.
    Tab,
}

impl Indent {
    /// 4-space indentation (Java).
    pub const JAVA: Self = Self::Spaces(4);

    /// 4-space indentation (Kotlin).
    pub const KOTLIN: Self = Self::Spaces(4);

    /// The string written for one indent level.
    pub fn unit(&self) -> String {
        match self {
            Self::Spaces(width) => " ".repeat(usize::from(*width)),
            Self::Tab => "\t".to_string(),
        }
    }

    /// Column width of one indent level, counting a tab as one column.
    pub fn width(&self) -> usize {
        match self {
            Self::Spaces(width) => usize::from(*width),
            Self::Tab => 1,
        }
    }
}

impl Default for Indent {
    fn default() -> Self {
        Self::JAVA
    }
}

/// On-disk form: a width (`indent = 2`) or a name (`indent = "tab"`).
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawIndent {
    Width(u8),
    Named(String),
}

impl TryFrom<RawIndent> for Indent {
    type Error = String;

    fn try_from(raw: RawIndent) -> Result<Self, Self::Error> {
        match raw {
            RawIndent::Width(width) => Ok(Self::Spaces(width)),
            RawIndent::Named(name) if name == "tab" || name == "\t" => Ok(Self::Tab),
            RawIndent::Named(name) if !name.is_empty() && name.chars().all(|c| c == ' ') => {
                u8::try_from(name.len())
                    .map(Self::Spaces)
                    .map_err(|_| format!("indent of {} spaces is too wide", name.len()))
            }
            RawIndent::Named(name) => Err(format!(
                "unknown indent '{name}', expected a width or \"tab\""
            )),
        }
    }
}

impl From<Indent> for RawIndent {
    fn from(indent: Indent) -> Self {
        match indent {
            Indent::Spaces(width) => Self::Width(width),
            Indent::Tab => Self::Named("tab".to_string()),
        }
    }
}
