use std::collections::HashSet;

use rstest::rstest;
use version_bridge::version::{
    ConversionError, RangeSet, Version, convert, convert_range, select_latest,
};

fn candidates(values: &[&str]) -> HashSet<Version> {
    values.iter().map(|v| Version::parse(v).unwrap()).collect()
}

#[test]
fn parse_concrete_version() {
    assert_eq!(
        Version::parse("1.2.3").unwrap(),
        Version {
            major: 1,
            minor: Some(2),
            patch: Some(3),
            qualifier: None,
        }
    );
}

#[rstest]
#[case("^1.2.3", "[1.2.3,2.0.0)")]
#[case("~1.2.3", "[1.2.3,1.3.0)")]
#[case("1.2.3 - 2.3.4", "[1.2.3,2.3.4]")]
#[case(">=1.2.7 <1.3.0", "[1.2.7,1.3.0)")]
#[case("^0.2.3", "[0.2.3,0.3.0)")]
#[case("1.2.7 || >=1.2.9 <2.0.0", "[1.2.7],[1.2.9,2.0.0)")]
#[case(">= 16.8 || 18.0.0", "[16.8,),[18.0.0]")]
fn convert_range_returns_expected(#[case] spec: &str, #[case] expected: &str) {
    assert_eq!(convert_range(spec).unwrap(), expected);
}

#[test]
fn select_latest_within_half_open_interval() {
    let versions = candidates(&["1.0.0", "1.2.0", "2.0.0"]);
    assert_eq!(
        select_latest(&versions, "[1.0.0,2.0.0)").unwrap(),
        Some(Version::new(1, 2, 0))
    );
}

#[test]
fn select_latest_excludes_prereleases() {
    let versions = candidates(&["1.0.0-beta"]);
    assert_eq!(select_latest(&versions, "[1.0.0,2.0.0)").unwrap(), None);
}

#[test]
fn select_latest_from_empty_set_is_none() {
    let versions = candidates(&[]);
    assert_eq!(select_latest(&versions, "[1.0.0,2.0.0)").unwrap(), None);
}

#[rstest]
#[case("^1.2.3")]
#[case("~0.2")]
#[case("1.2.7 || >=1.2.9 <2.0.0")]
#[case(">=1.0.0")]
#[case("<=3.2.1 >1.2.3")]
#[case("*")]
#[case("1.x || 3.1.4")]
fn converted_ranges_reparse_to_the_same_interval(#[case] spec: &str) {
    let converted = convert(spec).unwrap();
    let reparsed = RangeSet::parse(&converted.to_string()).unwrap();
    assert_eq!(reparsed, converted);
}

#[rstest]
#[case("^1.2.3", &["1.2.3", "1.9.9", "2.0.0", "1.2.2"], Some("1.9.9"))]
#[case("~1.2.3", &["1.2.3", "1.2.9", "1.3.0"], Some("1.2.9"))]
#[case("^0.0.3", &["0.0.3", "0.0.4", "0.1.0"], Some("0.0.3"))]
#[case("1.x", &["0.9.0", "1.0.0", "1.8.2", "2.0.0"], Some("1.8.2"))]
#[case("1.2.7 || >=1.2.9 <2.0.0", &["1.2.8", "1.9.0", "2.0.0"], Some("1.9.0"))]
#[case("1.2.7 || >=1.2.9 <2.0.0", &["1.2.7", "1.5.0", "5.0.0"], Some("1.2.7"))]
#[case(">= 16.8 || 18.0.0", &["16.7.0", "16.9.0", "17.0.0"], Some("17.0.0"))]
#[case("<1.0.0", &["1.0.0", "2.0.0"], None)]
fn convert_then_select(
    #[case] spec: &str,
    #[case] versions: &[&str],
    #[case] expected: Option<&str>,
) {
    let range = convert_range(spec).unwrap();
    let versions = candidates(versions);
    assert_eq!(
        select_latest(&versions, &range).unwrap(),
        expected.map(|v| Version::parse(v).unwrap())
    );
}

#[test]
fn conversion_errors_are_typed() {
    assert!(matches!(
        convert_range("1 - 2 - 3"),
        Err(ConversionError::TooManyBoundaries { found: 3, .. })
    ));
    assert!(matches!(
        convert_range("~nope"),
        Err(ConversionError::InvalidBoundary { .. })
    ));
}
