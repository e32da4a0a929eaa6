use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::naming::Dialect;

/// Result type for emission operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Errors raised while building or rendering code.
///
/// Apart from [`Error::Io`] and [`Error::Config`], every variant reports a
/// defect in the calling code: the render is abandoned at the point of
/// detection and nothing is recovered.
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("statement enter followed by statement enter")]
    #[diagnostic(
        code(codegentle::nested_statement),
        help("close the open statement with a statement end before beginning another")
    )]
    NestedStatement,

    #[error("statement exit has no matching statement enter")]
    #[diagnostic(code(codegentle::unmatched_statement_end))]
    UnmatchedStatementEnd,

    #[error("statement enter has no matching statement exit")]
    #[diagnostic(
        code(codegentle::unclosed_statement),
        help("every statement begin must be closed within the same code value")
    )]
    UnclosedStatement,

    #[error("cannot unindent {levels} from {current}")]
    #[diagnostic(code(codegentle::negative_indent))]
    NegativeIndent { levels: usize, current: usize },

    #[error("format '{format}' expects {expected} argument(s) but {actual} were given")]
    #[diagnostic(
        code(codegentle::argument_count),
        help("each %V placeholder consumes exactly one argument part")
    )]
    ArgumentCount {
        format: String,
        expected: usize,
        actual: usize,
    },

    #[error("'{name}' is not a valid identifier")]
    #[diagnostic(code(codegentle::invalid_name))]
    InvalidName { name: String },

    #[error("not an identifier: {member}")]
    #[diagnostic(
        code(codegentle::invalid_static_member),
        help("static member access must start with an identifier character")
    )]
    InvalidStaticMember { member: String },

    #[error("{found} cannot be emitted by the {dialect} writer")]
    #[diagnostic(code(codegentle::dialect_mismatch))]
    DialectMismatch { dialect: Dialect, found: String },

    #[error("{message}")]
    #[diagnostic(code(codegentle::invalid_declaration))]
    InvalidDeclaration { message: String },

    #[error("tag {tag} cannot be used for both '{existing}' and '{suggestion}'")]
    #[diagnostic(code(codegentle::duplicate_tag))]
    DuplicateTag {
        tag: String,
        existing: String,
        suggestion: String,
    },

    #[error("unknown tag: {tag}")]
    #[diagnostic(code(codegentle::unknown_tag))]
    UnknownTag { tag: String },

    #[error("writer is closed")]
    #[diagnostic(code(codegentle::writer_closed))]
    WriterClosed,

    #[error("failed to write rendered output")]
    #[diagnostic(code(codegentle::format))]
    Format(#[source] std::fmt::Error),

    #[error("failed to read '{path}'")]
    #[diagnostic(code(codegentle::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse emit configuration")]
    #[diagnostic(
        code(codegentle::config),
        help("valid keys are: indent, column_limit, skip_lang_imports, static_imports, always_qualify")
    )]
    Config {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },
}

impl Error {
    /// Create a config error from a toml error with source context
    pub fn config(source: toml::de::Error, src: &str, filename: &str) -> Box<Self> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Config {
            src: NamedSource::new(filename, src.to_string()),
            span,
            source,
        })
    }

    pub fn invalid_declaration(message: impl Into<String>) -> Box<Self> {
        Box::new(Error::InvalidDeclaration {
            message: message.into(),
        })
    }

    pub fn dialect_mismatch(dialect: Dialect, found: impl Into<String>) -> Box<Self> {
        Box::new(Error::DialectMismatch {
            dialect,
            found: found.into(),
        })
    }
}

impl From<std::fmt::Error> for Box<Error> {
    fn from(source: std::fmt::Error) -> Self {
        Box::new(Error::Format(source))
    }
}
