//! Version value type and parser shared by the converter and the matcher
//!
//! A [`Version`] always carries a major component. Minor and patch are optional:
//! registry versions are fully concrete, while range boundaries produced from
//! x-ranges or partial specifiers (`1.x`, `1.2`) leave the trailing components unset.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::version::error::ParseError;

/// Parsed version: `major[.minor[.patch]][-qualifier]`
///
/// `patch` is only ever set when `minor` is. Deserialization rejects values
/// that break this; callers building the struct by hand must keep it too.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "VersionFields")]
pub struct Version {
    pub major: u64,
    pub minor: Option<u64>,
    pub patch: Option<u64>,
    pub qualifier: Option<String>,
}

#[derive(Deserialize)]
struct VersionFields {
    major: u64,
    minor: Option<u64>,
    patch: Option<u64>,
    qualifier: Option<String>,
}

impl TryFrom<VersionFields> for Version {
    type Error = ParseError;

    fn try_from(fields: VersionFields) -> Result<Self, Self::Error> {
        if fields.minor.is_none() && fields.patch.is_some() {
            return Err(ParseError::InvalidVersion(format!(
                "{}.?.{}",
                fields.major,
                fields.patch.unwrap_or_default()
            )));
        }
        Ok(Self {
            major: fields.major,
            minor: fields.minor,
            patch: fields.patch,
            qualifier: fields.qualifier,
        })
    }
}

impl Version {
    /// Create a concrete version with all three numeric components.
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor: Some(minor),
            patch: Some(patch),
            qualifier: None,
        }
    }

    pub fn with_qualifier(mut self, qualifier: impl Into<String>) -> Self {
        self.qualifier = Some(qualifier.into());
        self
    }

    /// Parse a version token, rejecting a wildcard major.
    ///
    /// Examples:
    /// - "1.2.3" -> 1.2.3
    /// - "v1.2" -> 1.2 (patch unset)
    /// - "=1.x" -> 1 (minor and patch unset)
    /// - "1.2.3-beta.1" -> 1.2.3 with qualifier "beta.1"
    pub fn parse(token: &str) -> Result<Self, ParseError> {
        Self::parse_boundary(token)?
            .ok_or_else(|| ParseError::InvalidVersion(token.to_string()))
    }

    /// Parse a version token that may be a wildcard.
    ///
    /// Returns `Ok(None)` when the major component is a wildcard (`x`, `X`, `*`,
    /// `latest`), meaning the boundary matches anything. Components following
    /// a wildcard are left unset.
    pub fn parse_boundary(token: &str) -> Result<Option<Self>, ParseError> {
        let invalid = || ParseError::InvalidVersion(token.to_string());

        let stripped = strip_version_prefix(token.trim());
        // Build metadata never takes part in precedence
        let stripped = stripped.split_once('+').map_or(stripped, |(v, _)| v);

        let (numbers, mut qualifier) = match stripped.split_once('-') {
            Some((_, "")) => return Err(invalid()),
            Some((numbers, qualifier)) => (numbers, Some(qualifier.to_string())),
            None => (stripped, None),
        };

        let segments: Vec<&str> = numbers.split('.').collect();
        if segments.len() > 3 {
            return Err(invalid());
        }

        let mut components: [Option<u64>; 3] = [None; 3];
        for (index, segment) in segments.iter().enumerate() {
            if is_wildcard(segment) {
                break;
            }
            if !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit()) {
                components[index] = Some(segment.parse().map_err(|_| invalid())?);
                continue;
            }
            // Patch with an attached tag, e.g. "3beta"
            let digits = segment
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(segment.len());
            if index != 2 || digits == 0 || qualifier.is_some() {
                return Err(invalid());
            }
            components[2] = Some(segment[..digits].parse().map_err(|_| invalid())?);
            qualifier = Some(segment[digits..].to_string());
        }

        let [major, minor, patch] = components;
        let Some(major) = major else {
            return Ok(None);
        };

        Ok(Some(Self {
            major,
            minor,
            patch: minor.and(patch),
            qualifier,
        }))
    }

    /// A qualifier marks the version as a pre-release.
    pub fn is_prerelease(&self) -> bool {
        self.qualifier
            .as_deref()
            .is_some_and(|qualifier| !qualifier.trim().is_empty())
    }

    /// First version of the next major line: `1.2.3` -> `2.0.0`
    pub fn next_major(&self) -> Self {
        Self::new(self.major.saturating_add(1), 0, 0)
    }

    /// First version of the next minor line: `1.2.3` -> `1.3.0`
    pub fn next_minor(&self) -> Self {
        Self::new(self.major, self.minor.unwrap_or(0).saturating_add(1), 0)
    }

    /// Next patch: `0.0.3` -> `0.0.4`
    pub fn next_patch(&self) -> Self {
        Self::new(
            self.major,
            self.minor.unwrap_or(0),
            self.patch.unwrap_or(0).saturating_add(1),
        )
    }

    /// Compare by value, treating unset minor/patch as zero.
    ///
    /// `1.3` and `1.3.0` compare equal here, which is what range boundaries need.
    /// A version without qualifier ranks above the same triple with one.
    pub fn cmp_numeric(&self, other: &Self) -> Ordering {
        self.major
            .cmp(&other.major)
            .then_with(|| self.minor.unwrap_or(0).cmp(&other.minor.unwrap_or(0)))
            .then_with(|| self.patch.unwrap_or(0).cmp(&other.patch.unwrap_or(0)))
            .then_with(|| cmp_qualifier(self.qualifier.as_deref(), other.qualifier.as_deref()))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        // Presence tie-break keeps the order consistent with structural equality
        self.cmp_numeric(other)
            .then_with(|| self.minor.is_some().cmp(&other.minor.is_some()))
            .then_with(|| self.patch.is_some().cmp(&other.patch.is_some()))
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.major)?;
        if let Some(minor) = self.minor {
            write!(f, ".{minor}")?;
            if let Some(patch) = self.patch {
                write!(f, ".{patch}")?;
            }
        }
        if let Some(qualifier) = &self.qualifier {
            write!(f, "-{qualifier}")?;
        }
        Ok(())
    }
}

impl FromStr for Version {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Strip an optional leading `=` and/or `v`.
pub(crate) fn strip_version_prefix(token: &str) -> &str {
    let token = token.strip_prefix('=').unwrap_or(token);
    token.strip_prefix('v').unwrap_or(token)
}

pub(crate) fn is_wildcard(segment: &str) -> bool {
    segment == "*" || segment.eq_ignore_ascii_case("x") || segment.eq_ignore_ascii_case("latest")
}

/// Valid semver pre-release identifiers follow semver precedence and rank
/// below any invalid qualifier; invalid qualifiers compare byte-wise.
fn cmp_qualifier(left: Option<&str>, right: Option<&str>) -> Ordering {
    match (left, right) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(left), Some(right)) => {
            match (::semver::Prerelease::new(left), ::semver::Prerelease::new(right)) {
                (Ok(left), Ok(right)) => left.cmp(&right),
                (Ok(_), Err(_)) => Ordering::Less,
                (Err(_), Ok(_)) => Ordering::Greater,
                (Err(_), Err(_)) => left.cmp(right),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn partial(major: u64, minor: Option<u64>, patch: Option<u64>) -> Version {
        Version {
            major,
            minor,
            patch,
            qualifier: None,
        }
    }

    #[rstest]
    #[case("1.2.3", Version::new(1, 2, 3))]
    #[case("v1.2.3", Version::new(1, 2, 3))]
    #[case("=1.2.3", Version::new(1, 2, 3))]
    #[case(" 0.2.3 ", Version::new(0, 2, 3))]
    #[case("1.2", partial(1, Some(2), None))]
    #[case("1", partial(1, None, None))]
    #[case("1.x", partial(1, None, None))]
    #[case("1.2.X", partial(1, Some(2), None))]
    #[case("1.*.3", partial(1, None, None))]
    #[case("1.2.3-beta.1", Version::new(1, 2, 3).with_qualifier("beta.1"))]
    #[case("4.0.0-alpha.20", Version::new(4, 0, 0).with_qualifier("alpha.20"))]
    #[case("1.2.3beta", Version::new(1, 2, 3).with_qualifier("beta"))]
    #[case("1.2.3+build.5", Version::new(1, 2, 3))]
    fn parse_returns_expected(#[case] input: &str, #[case] expected: Version) {
        assert_eq!(Version::parse(input), Ok(expected));
    }

    #[rstest]
    #[case("")]
    #[case("v")]
    #[case("abc")]
    #[case("insiders")]
    #[case("1..2")]
    #[case("1.2.")]
    #[case("1.2.3.4")]
    #[case("1.beta")]
    #[case("1.2.3-")]
    #[case("1.2.beta")]
    #[case("x")]
    #[case("1.+2.3")]
    #[case("+1.2.3")]
    #[case("1.2.+3")]
    #[case("99999999999999999999.0.0")]
    fn parse_rejects_malformed(#[case] input: &str) {
        assert_eq!(
            Version::parse(input),
            Err(ParseError::InvalidVersion(input.to_string()))
        );
    }

    #[rstest]
    #[case("x")]
    #[case("X")]
    #[case("*")]
    #[case("vx")]
    #[case("=*")]
    #[case("latest")]
    #[case("x.2.3")]
    fn parse_boundary_treats_wildcard_major_as_match_all(#[case] input: &str) {
        assert_eq!(Version::parse_boundary(input), Ok(None));
    }

    #[rstest]
    #[case("1.2.3", "1.2.3")]
    #[case("v1.2", "1.2")]
    #[case("1.x", "1")]
    #[case("3.0.0-pre.26", "3.0.0-pre.26")]
    fn display_renders_present_components(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(Version::parse(input).unwrap().to_string(), expected);
    }

    #[rstest]
    #[case("1.2.3", "2.0.0", "1.3.0", "1.2.4")]
    #[case("0.2.3", "1.0.0", "0.3.0", "0.2.4")]
    #[case("1", "2.0.0", "1.1.0", "1.0.1")]
    #[case("1.2", "2.0.0", "1.3.0", "1.2.1")]
    fn successors_return_expected(
        #[case] input: &str,
        #[case] major: &str,
        #[case] minor: &str,
        #[case] patch: &str,
    ) {
        let version = Version::parse(input).unwrap();
        assert_eq!(version.next_major().to_string(), major);
        assert_eq!(version.next_minor().to_string(), minor);
        assert_eq!(version.next_patch().to_string(), patch);
    }

    #[test]
    fn successors_are_strictly_greater() {
        for input in ["0.0.0", "0.0.1", "1.2.3", "9.9.9", "1.2.3-rc.1", "10.0.0"] {
            let version = Version::parse(input).unwrap();
            let major = version.next_major();
            let minor = version.next_minor();

            assert!(major > version, "next_major of {input}");
            assert_eq!(major.minor, Some(0));
            assert_eq!(major.patch, Some(0));
            assert!(minor > version, "next_minor of {input}");
            assert_eq!(minor.major, version.major);
            assert!(version.next_patch() > version, "next_patch of {input}");
        }
    }

    #[rstest]
    #[case("1.0.0", "2.0.0", Ordering::Less)]
    #[case("1.10.0", "1.9.0", Ordering::Greater)]
    #[case("1.2.3", "1.2.3", Ordering::Equal)]
    #[case("1.0.0-beta", "1.0.0", Ordering::Less)]
    #[case("1.0.0-alpha", "1.0.0-beta", Ordering::Less)]
    #[case("1.0.0-alpha.2", "1.0.0-alpha.10", Ordering::Less)]
    #[case("1.0.0-rc.1", "0.9.9", Ordering::Greater)]
    fn ordering_returns_expected(#[case] left: &str, #[case] right: &str, #[case] expected: Ordering) {
        let left = Version::parse(left).unwrap();
        let right = Version::parse(right).unwrap();
        assert_eq!(left.cmp(&right), expected);
        assert_eq!(right.cmp(&left), expected.reverse());
    }

    #[test]
    fn ordering_is_total_over_concrete_versions() {
        let versions: Vec<Version> = ["0.0.1", "0.1.0", "1.0.0", "1.0.1", "1.1.0", "2.0.0"]
            .iter()
            .map(|v| Version::parse(v).unwrap())
            .collect();

        for v in &versions {
            for w in &versions {
                let outcomes = [v < w, v == w, v > w];
                assert_eq!(outcomes.iter().filter(|held| **held).count(), 1, "{v} vs {w}");
            }
        }
    }

    #[test]
    fn qualifier_ordering_is_transitive_across_invalid_identifiers() {
        let mut versions: Vec<Version> = ["alpha.10", "alpha.1_", "alpha.2"]
            .iter()
            .map(|q| Version::new(1, 0, 0).with_qualifier(*q))
            .collect();

        for v in &versions {
            for w in &versions {
                for u in &versions {
                    if v < w && w < u {
                        assert!(v < u, "{v} < {w} < {u}");
                    }
                }
            }
        }

        versions.sort();
        let sorted: Vec<String> = versions.iter().map(ToString::to_string).collect();
        assert_eq!(sorted, ["1.0.0-alpha.2", "1.0.0-alpha.10", "1.0.0-alpha.1_"]);
    }

    #[test]
    fn max_under_invalid_qualifiers_is_order_independent() {
        let forward: Vec<Version> = ["alpha.2", "alpha.1_", "alpha.10"]
            .iter()
            .map(|q| Version::new(1, 0, 0).with_qualifier(*q))
            .collect();
        let backward: Vec<Version> = forward.iter().rev().cloned().collect();

        assert_eq!(forward.iter().max(), backward.iter().max());
    }

    #[test]
    fn deserialize_accepts_parsed_shape() {
        let version: Version =
            serde_json::from_str(r#"{"major":1,"minor":2,"patch":null,"qualifier":null}"#).unwrap();
        assert_eq!(version, Version::parse("1.2").unwrap());
    }

    #[test]
    fn deserialize_rejects_patch_without_minor() {
        let result: Result<Version, _> =
            serde_json::from_str(r#"{"major":1,"minor":null,"patch":3,"qualifier":null}"#);
        assert!(result.is_err());
    }

    #[test]
    fn cmp_numeric_pads_unset_components() {
        let short = Version::parse("1.3").unwrap();
        let full = Version::parse("1.3.0").unwrap();

        assert_eq!(short.cmp_numeric(&full), Ordering::Equal);
        assert_ne!(short, full);
        assert_ne!(short.cmp(&full), Ordering::Equal);
    }

    #[test]
    fn is_prerelease_requires_non_blank_qualifier() {
        assert!(Version::parse("1.0.0-beta").unwrap().is_prerelease());
        assert!(!Version::parse("1.0.0").unwrap().is_prerelease());
        assert!(!Version::new(1, 0, 0).with_qualifier(" ").is_prerelease());
    }
}
