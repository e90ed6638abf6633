use thiserror::Error;

/// A single version token could not be interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Invalid version: '{0}'")]
    InvalidVersion(String),
}

/// An npm specifier could not be converted into a Maven range.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    #[error("Too many boundaries in '{expression}': expected 2 (lower and upper), found {found}")]
    TooManyBoundaries { expression: String, found: usize },

    #[error("Unknown operator in '{0}'")]
    UnknownOperator(String),

    #[error("Unsupported expression: '{0}'")]
    UnsupportedExpression(String),

    #[error("Invalid boundary in '{expression}': {source}")]
    InvalidBoundary {
        expression: String,
        #[source]
        source: ParseError,
    },
}

/// A Maven range expression handed to the matcher is malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    #[error("Empty range expression")]
    Empty,

    #[error("Unbalanced brackets in range '{0}'")]
    Unbalanced(String),

    #[error("Range '{0}' must contain one or two boundaries")]
    BoundaryCount(String),

    #[error("Lower boundary exceeds upper boundary in '{0}'")]
    Inverted(String),

    #[error("Invalid version in range '{expression}': {source}")]
    Version {
        expression: String,
        #[source]
        source: ParseError,
    },
}

/// Failure reported by a [`VersionSource`](crate::version::resolver::VersionSource).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    #[error("Package not found: {0}")]
    NotFound(String),

    #[error("Version source unavailable: {0}")]
    Unavailable(String),
}

/// A single dependency resolution request failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error(transparent)]
    Conversion(#[from] ConversionError),

    #[error(transparent)]
    Range(#[from] RangeError),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("Unparsable version published for {package}: {source}")]
    InvalidListing {
        package: String,
        #[source]
        source: ParseError,
    },
}
