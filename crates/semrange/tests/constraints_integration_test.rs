/// Integration tests for constraint parsing and satisfaction
///
/// These exercise the public API end to end: NPM ranges checked against
/// node-semver style include/exclude tables, Maven and minimal-grammar
/// constraints, semantic equality and the string facade.

use std::collections::HashSet;

use semrange::{Constraint, ConstraintFormat, NpmOptions, Semver, Version, VersionRange};

fn constraint(source: &str) -> Constraint {
    Constraint::parse(source).unwrap_or_else(|e| panic!("{:?} should parse: {}", source, e))
}

fn version(source: &str) -> Version {
    Version::parse(source).unwrap_or_else(|e| panic!("{:?} should parse: {}", source, e))
}

#[test]
fn test_npm_ranges_include() {
    let cases = [
        ("1.0.0 - 2.0.0", "1.2.3"),
        ("^1.2.3+build", "1.2.3"),
        ("^1.2.3+build", "1.3.0"),
        ("1.2.3-pre+asdf - 2.4.3-pre+asdf", "1.2.3"),
        ("1.2.3-pre+asdf - 2.4.3-pre+asdf", "1.2.3-pre.2"),
        ("1.2.3-pre+asdf - 2.4.3-pre+asdf", "2.4.3-alpha"),
        ("1.2.3+asdf - 2.4.3+asdf", "1.2.3"),
        ("*", "1.2.3"),
        (">=1.0.0", "1.0.0"),
        (">1.0.0", "1.0.1"),
        ("<=2.0.0", "2.0.0"),
        ("<=2.0.0", "1.9999.9999"),
        ("<2.0.0", "0.2.9"),
        (">= 1.0.0", "1.0.0"),
        ("0.1.20 || 1.2.4", "1.2.4"),
        (">=0.2.3 || <0.0.1", "0.0.0"),
        ("2.x.x", "2.1.3"),
        ("1.2.x", "1.2.3"),
        ("1.2.x || 2.x", "2.1.3"),
        ("x", "1.2.3"),
        ("2.*.*", "2.1.3"),
        ("2", "2.1.2"),
        ("2.3", "2.3.1"),
        ("~0.0.1", "0.0.1"),
        ("~0.0.1", "0.0.2"),
        ("~x", "0.0.9"),
        ("~2", "2.0.9"),
        ("~2.4", "2.4.0"),
        ("~>3.2.1", "3.2.2"),
        ("~1", "1.2.3"),
        ("~ 1.0", "1.0.2"),
        (">= 1", "1.0.0"),
        ("<1.2", "1.1.1"),
        ("~v0.5.4-pre", "0.5.5"),
        ("~v0.5.4-pre", "0.5.4"),
        ("=0.7.x", "0.7.2"),
        ("<=0.7.x", "0.7.2"),
        (">=0.7.x", "0.7.2"),
        ("<=0.7.x", "0.6.2"),
        ("~1.2.1 >=1.2.3", "1.2.3"),
        ("~1.2.1 =1.2.3", "1.2.3"),
        ("~1.2.1 1.2.3", "1.2.3"),
        (">=1.2.1 1.2.3", "1.2.3"),
        (">=1.2.3 >=1.2.1", "1.2.3"),
        ("^1.2.3", "1.8.1"),
        ("^0.1.2", "0.1.2"),
        ("^0.1", "0.1.2"),
        ("^0.0.1", "0.0.1"),
        ("^1.2", "1.4.2"),
        ("^1.2 ^1", "1.4.2"),
        ("^1.2.3-alpha", "1.2.3-pre"),
        ("^1.2.0-alpha", "1.2.0-pre"),
        ("^0.0.1-alpha", "0.0.1-beta"),
        ("^0.0.1-alpha", "0.0.1"),
        ("^0.1.1-alpha", "0.1.1-beta"),
        ("^x", "1.2.3"),
        ("x - 1.0.0", "0.9.7"),
        ("x - 1.x", "0.9.7"),
        ("1.0.0 - x", "1.9.7"),
        ("1.x - x", "1.9.7"),
        ("<=7.x", "7.9.9"),
    ];

    for (range, candidate) in cases {
        assert!(
            constraint(range).is_satisfied_by(&version(candidate)),
            "{} should satisfy {}",
            candidate,
            range
        );
    }
}

#[test]
fn test_npm_ranges_exclude() {
    let cases = [
        ("1.0.0 - 2.0.0", "2.2.3"),
        ("1.2.3+asdf - 2.4.3+asdf", "1.2.3-pre.2"),
        ("1.2.3+asdf - 2.4.3+asdf", "2.4.3-alpha"),
        ("^1.2.3+build", "2.0.0"),
        ("^1.2.3+build", "1.2.0"),
        ("^1.2.3", "1.2.3-pre"),
        ("^1.2", "1.2.0-pre"),
        ("<=1.2.3", "1.2.3-beta"),
        ("^1.2.3", "2.0.0-alpha"),
        (">=1.0.0", "0.0.0"),
        (">=1.0.0", "0.1.0"),
        (">1.0.0", "0.0.1"),
        (">1.0.0", "1.0.0"),
        ("<=2.0.0", "3.0.0"),
        ("<=2.0.0", "2.9999.9999"),
        ("<2.0.0", "2.0.0"),
        ("0.1.20 || 1.2.4", "1.2.3"),
        (">=0.2.3 || <0.0.1", "0.0.3"),
        (">=0.2.3 || <0.0.1", "0.2.2"),
        ("2.x.x", "1.1.3"),
        ("2.x.x", "3.1.3"),
        ("1.2.x", "1.3.3"),
        ("1.2.x || 2.x", "3.1.3"),
        ("1.2.x || 2.x", "1.1.3"),
        ("2", "1.1.2"),
        ("2.3", "2.4.1"),
        ("~0.0.1", "0.1.0-alpha"),
        ("~0.0.1", "0.1.0"),
        ("~2.4", "2.5.0"),
        ("~2.4", "2.3.9"),
        ("~>3.2.1", "3.3.2"),
        ("~>3.2.1", "3.2.0"),
        ("~1", "0.2.3"),
        ("~>1", "2.2.3"),
        ("~1.0", "1.1.0"),
        ("<1", "1.0.0"),
        (">=1.2", "1.1.1"),
        ("~v0.5.4-beta", "0.5.4-alpha"),
        ("=0.7.x", "0.8.2"),
        (">=0.7.x", "0.6.2"),
        ("<0.7.x", "0.7.2"),
        ("<1.2.3", "1.2.3-beta"),
        ("=1.2.3", "1.2.3-beta"),
        ("^0.0.1", "0.0.2"),
        ("^1.2.3", "2.0.0"),
        ("^1.2.3", "1.2.2"),
        ("^1.2", "1.1.9"),
        ("*", "1.2.3-foo"),
        ("^1.0.0", "2.0.0-rc1"),
        ("1 - 2", "2.0.0-pre"),
        ("1 - 2", "1.0.0-pre"),
        ("1.1.x", "1.0.0-a"),
        ("1.1.x", "1.1.0-a"),
        ("1.1.x", "1.2.0-a"),
        ("1.x", "1.0.0-alpha"),
        ("=0.1.0", "1.0.0"),
    ];

    for (range, candidate) in cases {
        assert!(
            !constraint(range).is_satisfied_by(&version(candidate)),
            "{} should not satisfy {}",
            candidate,
            range
        );
    }
}

#[test]
fn test_npm_include_pre_release() {
    let format = ConstraintFormat::Npm(NpmOptions::include_pre_release());
    let parse = |source: &str| Constraint::parse_with(source, format).unwrap();

    for (range, candidate) in [
        ("1.x", "1.1.0-beta"),
        ("^1.2.3", "1.9.0-rc.1"),
        ("*", "1.0.0-rc1"),
        ("1.0 - 2.0", "2.0.5-pre"),
        (">=1.2", "1.2.0-pre"),
    ] {
        assert!(parse(range).is_satisfied_by_with(&version(candidate), true), "{} in {}", candidate, range);
    }

    for (range, candidate) in [("^1.2.3", "2.0.0-rc.1"), ("1.x", "2.0.0-beta")] {
        assert!(!parse(range).is_satisfied_by_with(&version(candidate), true), "{} in {}", candidate, range);
    }
}

#[test]
fn test_not_equal_splits_range() {
    let c = constraint(">=1.0.0 <2.0.0 !=1.5.0");

    assert_eq!(c.ranges().len(), 2);
    assert!(c.is_satisfied_by(&version("1.4.9")));
    assert!(!c.is_satisfied_by(&version("1.5.0")));
    assert!(c.is_satisfied_by(&version("1.5.1")));
}

#[test]
fn test_semantic_equality() {
    assert_eq!(constraint("1.x"), constraint(">=1.0.0 <2.0.0-0"));
    assert_eq!(constraint("^1.2 || ^1.5"), constraint("^1.2"));
    assert_eq!(constraint(">1.0.0"), constraint(">=1.0.1-0"));
    assert_eq!(
        constraint(">=1.0.0 <1.5.0 || >=1.5.0 <2.0.0"),
        constraint(">=1.0.0 <2.0.0")
    );
    assert_ne!(constraint("1.x"), constraint("2.x"));

    let set: HashSet<Constraint> = ["~1.2", ">=1.2.0 <1.3.0-0", "1.2.x", "1.2"]
        .into_iter()
        .map(constraint)
        .collect();
    assert_eq!(set.len(), 1);

    // Display keeps the written form
    assert_eq!(constraint(">1.0.0").to_string(), ">1.0.0");
}

#[test]
fn test_normalized_ranges() {
    let c = constraint("1.2.7 || >=1.2.9 <2.0.0");
    let rendered: Vec<String> = c.ranges().iter().map(ToString::to_string).collect();
    assert_eq!(rendered, vec![">=1.2.7 <1.2.8-0", ">=1.2.9 <2.0.0"]);

    let contradiction = constraint("<1.0.0 >2.0.0");
    assert_eq!(contradiction.ranges(), &[VersionRange::empty()]);
    assert!(!contradiction.is_satisfied_by(&version("0.0.0-0")));
    assert!(!contradiction.is_satisfied_by(&version("1.5.0")));
}

#[test]
fn test_maven_constraints() {
    let maven = |source: &str| Constraint::parse_with(source, ConstraintFormat::Maven).unwrap();

    let interval = maven("[1.0,2.0)");
    assert!(interval.is_satisfied_by(&version("1.0.0")));
    assert!(interval.is_satisfied_by(&version("1.5.3")));
    assert!(!interval.is_satisfied_by(&version("2.0.0")));
    assert!(!interval.is_satisfied_by(&version("0.9.9")));

    let union = maven("(,1.0],[1.2,)");
    assert!(union.is_satisfied_by(&version("1.0.0")));
    assert!(!union.is_satisfied_by(&version("1.1.0")));
    assert!(union.is_satisfied_by(&version("1.2.0")));
    assert!(union.is_satisfied_by(&version("5.0.0")));

    let excluding = maven("(,1.1),(1.1,)");
    assert!(excluding.is_satisfied_by(&version("1.0.0")));
    assert!(!excluding.is_satisfied_by(&version("1.1.0")));
    assert!(excluding.is_satisfied_by(&version("1.1.1")));

    for source in ["[1.0,2.0)", "(,1.0],[1.2,)", "1.0", "[1.5]"] {
        assert_eq!(maven(source).to_string(), source);
    }

    // Equality does not depend on the syntax a constraint was written in
    assert_eq!(interval, constraint(">=1.0.0 <2.0.0"));
}

#[test]
fn test_maven_preferred_version() {
    let candidates: Vec<Version> = ["0.9.0", "1.0.0", "1.5.0", "2.0.0"].into_iter().map(version).collect();

    let soft = Constraint::parse_with("1.0", ConstraintFormat::Maven).unwrap();
    assert_eq!(soft.preferred_version(), Some(&version("1.0.0")));
    assert_eq!(soft.select(&candidates), Some(&version("1.0.0")));

    let hard = Constraint::parse_with("[1.0,2.0)", ConstraintFormat::Maven).unwrap();
    assert_eq!(hard.select(&candidates), Some(&version("1.5.0")));
}

#[test]
fn test_simple_constraints() {
    let simple = |source: &str| Constraint::parse_with(source, ConstraintFormat::Simple).unwrap();

    let c = simple(">=1.0.0 <2.0.0 || =3.1.4");
    assert!(c.is_satisfied_by(&version("1.5.0")));
    assert!(c.is_satisfied_by(&version("3.1.4")));
    assert!(!c.is_satisfied_by(&version("2.0.0")));

    let gt = simple(">1.0.0");
    assert!(gt.is_satisfied_by(&version("1.0.1")));
    assert!(!gt.is_satisfied_by(&version("1.0.0")));

    assert!(simple("*").is_satisfied_by(&version("42.0.0")));
    assert!(Constraint::parse_with("^1.0.0", ConstraintFormat::Simple).is_err());
}

#[test]
fn test_errors() {
    assert!(Constraint::parse("blerg").is_err());
    assert!(Version::parse("1.2").is_err());
    assert_eq!(
        Constraint::parse_with("[1.0", ConstraintFormat::Maven).unwrap_err().to_string(),
        "Could not parse version constraint [1.0: unmatched opening character '[' at index 0"
    );
}

#[test]
fn test_versions_at_component_limit() {
    let limit = version("1.0.18446744073709551615");
    assert_eq!(limit.patch(), u64::MAX);

    assert!(Constraint::parse("<=1.0.18446744073709551615").is_err());
    assert!(Constraint::parse("1.0.18446744073709551615").is_err());
    assert!(Constraint::parse("^18446744073709551615").is_err());
    assert!(Constraint::parse_with("[1.0.18446744073709551615]", ConstraintFormat::Maven).is_err());
    assert!(Constraint::parse_with("=1.0.18446744073709551615", ConstraintFormat::Simple).is_err());
    assert!(Version::new(u64::MAX, 0, 0).to_next_major(None).is_err());

    let below = constraint(">=1.0.0 <1.0.18446744073709551615");
    assert!(below.is_satisfied_by(&version("1.0.18446744073709551614")));
    assert!(!below.is_satisfied_by(&limit));
    assert!(constraint(">=1.0.18446744073709551615").is_satisfied_by(&limit));
    assert!(!Semver::satisfies("1.0.18446744073709551615", "<=1.0.18446744073709551615"));
}

#[test]
fn test_version_precedence() {
    let ordered = [
        "1.0.0-alpha",
        "1.0.0-alpha.1",
        "1.0.0-alpha.beta",
        "1.0.0-beta",
        "1.0.0-beta.2",
        "1.0.0-beta.11",
        "1.0.0-rc.1",
        "1.0.0",
    ];
    let mut versions: Vec<Version> = ordered.iter().rev().map(|v| version(v)).collect();
    versions.sort();

    let sorted: Vec<String> = versions.iter().map(ToString::to_string).collect();
    assert_eq!(sorted, ordered);

    assert!(version("1.8.1").satisfies(&constraint("^1.2.3")));
}

#[test]
fn test_semver_facade() {
    assert_eq!(
        Semver::max_satisfying(&["1.2.3", "1.2.4", "1.3.0", "2.0.0"], "~1.2"),
        Some("1.2.4".to_string())
    );
    assert_eq!(Semver::rsort(&["1.0.0", "2.0.0", "1.5.0"]), vec!["2.0.0", "1.5.0", "1.0.0"]);
    assert!(Semver::satisfies("v1.2.3", "1.x"));
}
