//! npm specifier to Maven range conversion
//!
//! Supported npm range forms:
//! - `1.2.3` - exact version, kept as a bare Maven version (floor), or `[1.2.3]` inside a union
//! - `^1.2.3` - compatible with version (`[1.2.3,2.0.0)`, narrower for 0.x)
//! - `~1.2.3` - approximately equivalent (`[1.2.3,1.3.0)`)
//! - `>=1.2.3`, `>1.2.3`, `<=1.2.3`, `<1.2.3` - comparison operators, alone or paired
//! - `1.2.x`, `1.x`, `*`, `1.2`, `1` - wildcards and partial versions
//! - `1.2.3 - 2.3.4` - hyphen ranges (inclusive)
//! - `^1.0.0 || ^2.0.0` - alternatives, joined with `,`

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

use crate::version::error::{ConversionError, ParseError};
use crate::version::range::{Bound, Range, RangeSet};
use crate::version::semver::{Version, is_wildcard, strip_version_prefix};

const ALTERNATIVE_SEPARATOR: &str = "||";
const HYPHEN_SEPARATOR: &str = " - ";

/// Whitespace between an operator or prefix and its version: `>= 1.2.3`, `~ 1.2.3`
static OPERATOR_WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(^|\s)(<=|>=|<|>|~|\^|=|v)\s+").unwrap());

/// Specifiers pointing at a source location rather than a published version
const UNVERSIONED_PREFIXES: [&str; 5] = ["git:/", "git+http", "git+ssh", "github:", "file:"];

/// Classification of one `||` alternative, in matching priority order
#[derive(Debug, PartialEq, Eq)]
enum Specifier<'a> {
    /// Empty alternative, matches anything
    Unconstrained,
    /// `1.2.3 - 2.3.4`
    HyphenRange(Vec<&'a str>),
    /// `~1.2.3`
    TildeRange(&'a str),
    /// `^1.2.3`
    CaretRange(&'a str),
    /// `1.2.x`, `*`, `1.2`
    XRange(&'a str),
    /// `>=1.2.3`, `>=1.2.3 <2.0.0`
    OperatorRange(&'a str),
    /// `1.2.3`, `=1.2`
    ExactVersion(&'a str),
}

impl<'a> Specifier<'a> {
    fn classify(part: &'a str) -> Self {
        if part.is_empty() {
            return Specifier::Unconstrained;
        }
        if part.contains(HYPHEN_SEPARATOR) {
            return Specifier::HyphenRange(part.split(HYPHEN_SEPARATOR).map(str::trim).collect());
        }
        if let Some(rest) = part.strip_prefix('~') {
            return Specifier::TildeRange(rest);
        }
        if let Some(rest) = part.strip_prefix('^') {
            return Specifier::CaretRange(rest);
        }
        if is_x_range(part) {
            return Specifier::XRange(part);
        }
        if part.starts_with(['<', '>']) {
            return Specifier::OperatorRange(part);
        }
        Specifier::ExactVersion(part)
    }

    fn convert(&self, part: &str) -> Result<Range, ConversionError> {
        match self {
            Specifier::Unconstrained => Ok(Range::unbounded()),
            Specifier::HyphenRange(boundaries) => convert_hyphen(part, boundaries),
            Specifier::TildeRange(version) => convert_tilde(part, version),
            Specifier::CaretRange(version) => convert_caret(part, version),
            Specifier::XRange(version) => convert_x(part, version),
            Specifier::OperatorRange(comparators) => convert_operator(part, comparators),
            Specifier::ExactVersion(version) => convert_exact(part, version),
        }
    }
}

/// Convert an npm version specifier into a Maven range expression.
///
/// Examples:
/// - "^1.2.3" -> "[1.2.3,2.0.0)"
/// - "~1.2.3" -> "[1.2.3,1.3.0)"
/// - ">=1.2.7 <1.3.0" -> "[1.2.7,1.3.0)"
/// - "1.2.7 || >=1.2.9 <2.0.0" -> "[1.2.7],[1.2.9,2.0.0)"
pub fn convert_range(spec: &str) -> Result<String, ConversionError> {
    convert(spec).map(|ranges| ranges.to_string())
}

/// Convert an npm version specifier into its structured Maven form.
pub fn convert(spec: &str) -> Result<RangeSet, ConversionError> {
    let spec = spec.trim();
    let result = if UNVERSIONED_PREFIXES
        .iter()
        .any(|prefix| spec.starts_with(prefix))
    {
        Ok(RangeSet::new(vec![Range::unbounded()]))
    } else {
        spec.split(ALTERNATIVE_SEPARATOR)
            .map(convert_part)
            .collect::<Result<Vec<_>, _>>()
            .map(pin_exact_alternatives)
            .map(RangeSet::new)
    };

    match &result {
        Ok(ranges) => debug!("Converted specifier '{}' to '{}'", spec, ranges),
        Err(e) => warn!("Failed to convert specifier '{}': {}", spec, e),
    }
    result
}

/// A bare version inside a union means exactly that version
fn pin_exact_alternatives(ranges: Vec<Range>) -> Vec<Range> {
    if ranges.len() < 2 {
        return ranges;
    }
    ranges
        .into_iter()
        .map(|range| match range {
            Range::Floor(version) => Range::exact(version),
            interval => interval,
        })
        .collect()
}

fn convert_part(part: &str) -> Result<Range, ConversionError> {
    let normalized = OPERATOR_WHITESPACE.replace_all(part.trim(), "$1$2");
    let specifier = Specifier::classify(&normalized);
    debug!("Classified '{}' as {:?}", normalized, specifier);
    specifier.convert(&normalized)
}

/// X-ranges carry a wildcard in their numeric part, or are partial
/// versions (`1`, `1.2`) without an explicit `=`.
fn is_x_range(part: &str) -> bool {
    if part.contains(char::is_whitespace) || part.starts_with(['<', '>']) {
        return false;
    }
    let version = strip_version_prefix(part);
    let numbers = version.split('-').next().unwrap_or_default();
    if numbers.split('.').any(is_wildcard) {
        return true;
    }
    !part.starts_with('=')
        && numbers.starts_with(|c: char| c.is_ascii_digit())
        && numbers.matches('.').count() < 2
}

fn boundary(expression: &str, token: &str) -> Result<Option<Version>, ConversionError> {
    Version::parse_boundary(token).map_err(|source| invalid_boundary(expression, source))
}

fn invalid_boundary(expression: &str, source: ParseError) -> ConversionError {
    ConversionError::InvalidBoundary {
        expression: expression.to_string(),
        source,
    }
}

/// Hyphen range: `1.2.3 - 2.3.4` -> `[1.2.3,2.3.4]`
fn convert_hyphen(part: &str, boundaries: &[&str]) -> Result<Range, ConversionError> {
    let [lower, upper] = boundaries else {
        return Err(ConversionError::TooManyBoundaries {
            expression: part.to_string(),
            found: boundaries.len(),
        });
    };

    let lower = boundary(part, lower)?.map_or(Bound::Unbounded, Bound::Inclusive);
    let upper = boundary(part, upper)?.map_or(Bound::Unbounded, Bound::Inclusive);
    Ok(Range::Interval { lower, upper })
}

/// Tilde range: `~1.2.3` -> `[1.2.3,1.3.0)`, `~1` -> `[1,2.0.0)`
fn convert_tilde(part: &str, version: &str) -> Result<Range, ConversionError> {
    let Some(lower) = boundary(part, version)? else {
        return Ok(Range::unbounded());
    };

    let upper = if lower.minor.is_some() {
        lower.next_minor()
    } else {
        lower.next_major()
    };
    Ok(Range::half_open(lower, upper))
}

/// Caret range: allows changes that do not modify the left-most non-zero component
///
/// - `^1.2.3` -> `[1.2.3,2.0.0)`
/// - `^0.2.3` -> `[0.2.3,0.3.0)`
/// - `^0.0.3` -> `[0.0.3,0.0.4)`
/// - `^0.0` -> `[0.0,0.1.0)`
/// - `^0.x` -> `[0,1.0.0)`
fn convert_caret(part: &str, version: &str) -> Result<Range, ConversionError> {
    let Some(lower) = boundary(part, version)? else {
        return Ok(Range::unbounded());
    };

    let upper = match (lower.major, lower.minor, lower.patch) {
        (0, None, _) => lower.next_major(),
        (0, Some(minor), _) if minor > 0 => lower.next_minor(),
        (0, Some(0), None | Some(0)) => lower.next_minor(),
        (0, Some(0), Some(_)) => lower.next_patch(),
        _ => lower.next_major(),
    };
    Ok(Range::half_open(lower, upper))
}

/// X-range: `*` -> `(,)`, `1.x` -> `[1,2.0.0)`, `1.2.x` -> `[1.2,1.3.0)`
fn convert_x(part: &str, version: &str) -> Result<Range, ConversionError> {
    let Some(lower) = boundary(part, version)? else {
        return Ok(Range::unbounded());
    };

    match (lower.minor, lower.patch) {
        (None, _) => {
            let upper = lower.next_major();
            Ok(Range::half_open(lower, upper))
        }
        (Some(_), None) => {
            let upper = lower.next_minor();
            Ok(Range::half_open(lower, upper))
        }
        (Some(_), Some(_)) => Ok(Range::Interval {
            lower: Bound::Inclusive(lower),
            upper: Bound::Unbounded,
        }),
    }
}

/// Operator range, one open-ended comparator or a lower/upper pair
///
/// - `>=1.2.3` -> `[1.2.3,)`
/// - `<1.2.3` -> `(,1.2.3)`
/// - `<=3.2.1 >1.2.3` -> `(1.2.3,3.2.1]`
fn convert_operator(part: &str, comparators: &str) -> Result<Range, ConversionError> {
    let tokens: Vec<&str> = comparators.split_whitespace().collect();
    match tokens.as_slice() {
        [single] => match Comparator::parse(part, single)? {
            Comparator::Lower(lower) => Ok(Range::Interval {
                lower,
                upper: Bound::Unbounded,
            }),
            Comparator::Upper(upper) => Ok(Range::Interval {
                lower: Bound::Unbounded,
                upper,
            }),
        },
        [first, second] => {
            match (Comparator::parse(part, first)?, Comparator::parse(part, second)?) {
                (Comparator::Lower(lower), Comparator::Upper(upper))
                | (Comparator::Upper(upper), Comparator::Lower(lower)) => {
                    Ok(Range::Interval { lower, upper })
                }
                _ => Err(ConversionError::UnsupportedExpression(part.to_string())),
            }
        }
        _ => Err(ConversionError::TooManyBoundaries {
            expression: part.to_string(),
            found: tokens.len(),
        }),
    }
}

/// Exact version: `=1.2.3` -> `1.2.3`
fn convert_exact(part: &str, version: &str) -> Result<Range, ConversionError> {
    Version::parse(strip_version_prefix(version))
        .map(Range::Floor)
        .map_err(|_| ConversionError::UnsupportedExpression(part.to_string()))
}

/// Single side of an operator range
enum Comparator {
    Lower(Bound),
    Upper(Bound),
}

impl Comparator {
    fn parse(part: &str, token: &str) -> Result<Self, ConversionError> {
        let bound = |version: &str, inclusive: bool| -> Result<Bound, ConversionError> {
            Ok(match boundary(part, version)? {
                None => Bound::Unbounded,
                Some(v) if inclusive => Bound::Inclusive(v),
                Some(v) => Bound::Exclusive(v),
            })
        };

        if let Some(rest) = token.strip_prefix(">=") {
            bound(rest, true).map(Comparator::Lower)
        } else if let Some(rest) = token.strip_prefix('>') {
            bound(rest, false).map(Comparator::Lower)
        } else if let Some(rest) = token.strip_prefix("<=") {
            bound(rest, true).map(Comparator::Upper)
        } else if let Some(rest) = token.strip_prefix('<') {
            bound(rest, false).map(Comparator::Upper)
        } else {
            Err(ConversionError::UnknownOperator(token.to_string()))
        }
    }
}
