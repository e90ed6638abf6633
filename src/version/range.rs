//! Maven version range grammar
//!
//! - `[1.0,2.0)` - interval, `[`/`]` inclusive, `(`/`)` exclusive
//! - `(,1.0]`, `[1.0,)`, `(,)` - one or both sides unbounded
//! - `[1.0]` - exactly 1.0
//! - `1.0` - bare version, a recommended floor
//! - `[1.0,2.0),[3.0,)` - comma-joined union, satisfied if any member matches
//!
//! The converter only emits a bare version for a single-member set; inside a
//! union an exact alternative is written as `[1.0]`.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::version::error::RangeError;
use crate::version::semver::Version;

/// One endpoint of an interval
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Bound {
    Unbounded,
    Inclusive(Version),
    Exclusive(Version),
}

impl Bound {
    fn version(&self) -> Option<&Version> {
        match self {
            Bound::Unbounded => None,
            Bound::Inclusive(v) | Bound::Exclusive(v) => Some(v),
        }
    }

    fn admits_above(&self, version: &Version) -> bool {
        match self {
            Bound::Unbounded => true,
            Bound::Inclusive(lower) => version.cmp_numeric(lower) != Ordering::Less,
            Bound::Exclusive(lower) => version.cmp_numeric(lower) == Ordering::Greater,
        }
    }

    fn admits_below(&self, version: &Version) -> bool {
        match self {
            Bound::Unbounded => true,
            Bound::Inclusive(upper) => version.cmp_numeric(upper) != Ordering::Greater,
            Bound::Exclusive(upper) => version.cmp_numeric(upper) == Ordering::Less,
        }
    }
}

/// A single member of a [`RangeSet`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Range {
    /// Bracketed interval
    Interval { lower: Bound, upper: Bound },
    /// Bare version, satisfied by anything at or above it
    Floor(Version),
}

impl Range {
    /// `(,)`
    pub fn unbounded() -> Self {
        Range::Interval {
            lower: Bound::Unbounded,
            upper: Bound::Unbounded,
        }
    }

    /// `[lower,upper)`
    pub fn half_open(lower: Version, upper: Version) -> Self {
        Range::Interval {
            lower: Bound::Inclusive(lower),
            upper: Bound::Exclusive(upper),
        }
    }

    /// `[v]`
    pub fn exact(version: Version) -> Self {
        Range::Interval {
            lower: Bound::Inclusive(version.clone()),
            upper: Bound::Inclusive(version),
        }
    }

    pub fn contains(&self, version: &Version) -> bool {
        match self {
            Range::Interval { lower, upper } => {
                lower.admits_above(version) && upper.admits_below(version)
            }
            Range::Floor(floor) => version.cmp_numeric(floor) != Ordering::Less,
        }
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Range::Floor(version) => write!(f, "{version}"),
            Range::Interval {
                lower: Bound::Inclusive(lower),
                upper: Bound::Inclusive(upper),
            } if lower == upper => write!(f, "[{lower}]"),
            Range::Interval { lower, upper } => {
                match lower {
                    Bound::Unbounded => write!(f, "(")?,
                    Bound::Inclusive(v) => write!(f, "[{v}")?,
                    Bound::Exclusive(v) => write!(f, "({v}")?,
                }
                write!(f, ",")?;
                match upper {
                    Bound::Unbounded => write!(f, ")"),
                    Bound::Inclusive(v) => write!(f, "{v}]"),
                    Bound::Exclusive(v) => write!(f, "{v})"),
                }
            }
        }
    }
}

/// Union of ranges
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeSet(pub Vec<Range>);

impl RangeSet {
    pub fn new(ranges: Vec<Range>) -> Self {
        Self(ranges)
    }

    pub fn ranges(&self) -> &[Range] {
        &self.0
    }

    pub fn contains(&self, version: &Version) -> bool {
        self.0.iter().any(|range| range.contains(version))
    }

    /// Parse a Maven range expression
    pub fn parse(expression: &str) -> Result<Self, RangeError> {
        let expression = expression.trim();
        if expression.is_empty() {
            return Err(RangeError::Empty);
        }

        let mut ranges = Vec::new();
        let mut rest = expression;
        loop {
            rest = rest.trim_start();
            let (range, remainder) = if rest.starts_with(['[', '(']) {
                let close = rest
                    .find([']', ')'])
                    .ok_or_else(|| RangeError::Unbalanced(expression.to_string()))?;
                let (member, remainder) = rest.split_at(close + 1);
                (parse_interval(member)?, remainder)
            } else {
                let end = rest.find(',').unwrap_or(rest.len());
                let (member, remainder) = rest.split_at(end);
                (parse_floor(member.trim())?, remainder)
            };
            ranges.push(range);

            let remainder = remainder.trim_start();
            if remainder.is_empty() {
                break;
            }
            rest = remainder
                .strip_prefix(',')
                .ok_or_else(|| RangeError::Unbalanced(expression.to_string()))?;
        }

        Ok(Self(ranges))
    }
}

impl FromStr for RangeSet {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for RangeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, range) in self.0.iter().enumerate() {
            if index > 0 {
                write!(f, ",")?;
            }
            write!(f, "{range}")?;
        }
        Ok(())
    }
}

fn parse_version(expression: &str, token: &str) -> Result<Version, RangeError> {
    Version::parse(token).map_err(|source| RangeError::Version {
        expression: expression.to_string(),
        source,
    })
}

fn parse_floor(member: &str) -> Result<Range, RangeError> {
    if member.contains([']', ')']) {
        return Err(RangeError::Unbalanced(member.to_string()));
    }
    parse_version(member, member).map(Range::Floor)
}

/// Parse one bracketed member such as `[1.0,2.0)`
fn parse_interval(member: &str) -> Result<Range, RangeError> {
    let inclusive_lower = member.starts_with('[');
    let inclusive_upper = member.ends_with(']');
    let body = &member[1..member.len() - 1];

    if body.contains(['[', '(']) {
        return Err(RangeError::Unbalanced(member.to_string()));
    }

    let bounds: Vec<&str> = body.split(',').map(str::trim).collect();
    match bounds.as_slice() {
        // [1.0] - exact version
        [single] if inclusive_lower && inclusive_upper && !single.is_empty() => {
            parse_version(member, single).map(Range::exact)
        }
        [lower, upper] => {
            let lower = match *lower {
                "" => Bound::Unbounded,
                token if inclusive_lower => Bound::Inclusive(parse_version(member, token)?),
                token => Bound::Exclusive(parse_version(member, token)?),
            };
            let upper = match *upper {
                "" => Bound::Unbounded,
                token if inclusive_upper => Bound::Inclusive(parse_version(member, token)?),
                token => Bound::Exclusive(parse_version(member, token)?),
            };

            if let (Some(low), Some(high)) = (lower.version(), upper.version()) {
                let inverted = match low.cmp_numeric(high) {
                    Ordering::Greater => true,
                    Ordering::Equal => !(inclusive_lower && inclusive_upper),
                    Ordering::Less => false,
                };
                if inverted {
                    return Err(RangeError::Inverted(member.to_string()));
                }
            }

            Ok(Range::Interval { lower, upper })
        }
        _ => Err(RangeError::BoundaryCount(member.to_string())),
    }
}
