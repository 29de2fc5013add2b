//! Ordering of Go module versions.
//!
//! Go versions are semantic versions with a mandatory `v` prefix. `v1` and
//! `v1.2` are shorthands for `v1.0.0` and `v1.2.0`, build metadata does not
//! take part in comparisons, and strings that are not valid versions sort
//! before all valid ones.

use semver::{BuildMetadata, Version};
use std::cmp::Ordering;

/// Parse a Go version string, ignoring build metadata
pub fn parse(version: &str) -> Option<Version> {
    let rest = version.strip_prefix('v')?;

    let core_end = rest.find(['-', '+']).unwrap_or(rest.len());
    let dots = rest[..core_end].matches('.').count();
    let full = match dots {
        2 => rest.to_string(),
        // Shorthands carry neither pre-release nor build metadata
        0 | 1 if core_end == rest.len() => {
            if dots == 0 {
                format!("{rest}.0.0")
            } else {
                format!("{rest}.0")
            }
        }
        _ => return None,
    };

    let mut parsed = Version::parse(&full).ok()?;
    parsed.build = BuildMetadata::EMPTY;
    Some(parsed)
}

/// Whether `version` is a valid Go semantic version
pub fn is_valid(version: &str) -> bool {
    parse(version).is_some()
}

/// Compare two versions by Go module precedence; invalid versions are equal to each other
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    match (parse(a), parse(b)) {
        (Some(a), Some(b)) => a.cmp(&b),
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
    }
}

/// Sort versions in ascending order, breaking precedence ties by string order
pub fn sort_versions(versions: &mut [String]) {
    versions.sort_by(|a, b| compare_versions(a, b).then_with(|| a.cmp(b)));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(input: &[&str]) -> Vec<String> {
        let mut versions: Vec<String> = input.iter().map(|s| s.to_string()).collect();
        sort_versions(&mut versions);
        versions
    }

    #[test]
    fn test_sorts_unordered_listing() {
        assert_eq!(
            sorted(&["v1.2.0", "v1.0.0", "v1.1.0"]),
            vec!["v1.0.0", "v1.1.0", "v1.2.0"]
        );
    }

    #[test]
    fn test_numeric_not_lexical_order() {
        assert_eq!(
            sorted(&["v1.10.0", "v1.9.0", "v1.2.0"]),
            vec!["v1.2.0", "v1.9.0", "v1.10.0"]
        );
    }

    #[test]
    fn test_prerelease_before_release() {
        assert_eq!(
            sorted(&["v1.0.0", "v1.0.0-rc.1", "v1.0.0-beta", "v0.9.0"]),
            vec!["v0.9.0", "v1.0.0-beta", "v1.0.0-rc.1", "v1.0.0"]
        );
    }

    #[test]
    fn test_invalid_versions_sort_first() {
        assert_eq!(
            sorted(&["v1.0.0", "master", "1.0.0", "v0.1.0"]),
            vec!["1.0.0", "master", "v0.1.0", "v1.0.0"]
        );
    }

    #[test]
    fn test_shorthand_and_build_metadata() {
        assert_eq!(compare_versions("v1", "v1.0.0"), Ordering::Equal);
        assert_eq!(compare_versions("v1.2", "v1.2.0"), Ordering::Equal);
        assert_eq!(
            compare_versions("v2.0.0+incompatible", "v2.0.0"),
            Ordering::Equal
        );
        // Equal precedence falls back to string order
        assert_eq!(
            sorted(&["v2.0.0+incompatible", "v2.0.0"]),
            vec!["v2.0.0", "v2.0.0+incompatible"]
        );
    }

    #[test]
    fn test_validity() {
        assert!(is_valid("v0.0.0-20240101000000-abcdefabcdef"));
        assert!(is_valid("v1"));
        assert!(!is_valid("v1.2-pre"));
        assert!(!is_valid("1.2.3"));
        assert!(!is_valid("v01.0.0"));
        assert!(!is_valid("v1.2.3.4"));
    }
}
