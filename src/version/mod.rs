//! Version translation layer between npm specifiers and Maven ranges
//!
//! This module converts npm-style version specifiers into Maven-style range
//! expressions and selects the latest concrete version satisfying such a range.
//! Everything here is pure: no I/O, no caching, no shared state.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Converter  │────▶│  RangeSet   │◀────│   Matcher   │
//! │ (npm → mvn) │     │  (maven)    │     │  (select)   │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!        │                   │                   │
//!        ▼                   ▼                   ▼
//! ┌───────────────────────────────────────────────────┐
//! │                 Version (semver)                  │
//! └───────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`semver`]: `Version` value type, parser, ordering and successors
//! - [`converter`]: npm specifier to Maven range conversion
//! - [`range`]: Maven range grammar (`Bound`, `Range`, `RangeSet`)
//! - [`matcher`]: Latest matching version selection
//! - [`resolver`]: Resolution against a source of published versions
//! - [`error`]: Error types for parsing, conversion, matching and resolution

pub mod converter;
pub mod error;
pub mod matcher;
pub mod range;
pub mod resolver;
pub mod semver;

pub use converter::{convert, convert_range};
pub use error::{ConversionError, ParseError, RangeError, ResolveError, SourceError};
pub use matcher::{VersionMatcher, select_latest};
pub use range::{Bound, Range, RangeSet};
pub use resolver::{DependencyResolver, VersionSource};
pub use semver::Version;
