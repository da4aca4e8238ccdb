//! Release tag comparison

use std::cmp::Ordering;

/// Compare two dotted release tags such as `v3.1.0` and `3.0`
///
/// An optional leading `v` is ignored, missing trailing components count as 0
/// and each component is read as its leading run of digits (`1rc2` is 1,
/// `beta` is 0).
///
/// This is not semver precedence: pre-release and build metadata are not
/// understood, so `v1.0.0-rc1` compares equal to `v1.0.0`.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let a = a.strip_prefix('v').unwrap_or(a);
    let b = b.strip_prefix('v').unwrap_or(b);

    let mut left = a.split('.');
    let mut right = b.split('.');

    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (l, r) => {
                let l = l.map(leading_number).unwrap_or(0);
                let r = r.map(leading_number).unwrap_or(0);
                match l.cmp(&r) {
                    Ordering::Equal => continue,
                    decided => return decided,
                }
            }
        }
    }
}

/// True when `version` is strictly newer than `threshold`
pub fn is_newer_than(version: &str, threshold: &str) -> bool {
    compare_versions(version, threshold) == Ordering::Greater
}

/// Pick the newest tag from a list, by [`compare_versions`]
pub fn newest<'a, I>(versions: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a String>,
{
    versions
        .into_iter()
        .map(String::as_str)
        .max_by(|a, b| compare_versions(a, b))
}

fn leading_number(component: &str) -> u64 {
    component
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0u64, |n, digit| {
            n.saturating_mul(10).saturating_add(u64::from(digit - b'0'))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_versions() {
        for v in ["v3.1.0", "3.1.0", "0", "v10.20.30", ""] {
            assert_eq!(compare_versions(v, v), Ordering::Equal, "{}", v);
        }
    }

    #[test]
    fn test_major_decides() {
        assert_eq!(compare_versions("v2.0", "v1.9"), Ordering::Greater);
        assert_eq!(compare_versions("v1.9", "v2.0"), Ordering::Less);
    }

    #[test]
    fn test_missing_components_are_zero() {
        assert_eq!(compare_versions("1.2", "1.2.0"), Ordering::Equal);
        assert_eq!(compare_versions("3.0.1", "3.0"), Ordering::Greater);
        assert_eq!(compare_versions("3.0", "3.0.1"), Ordering::Less);
    }

    #[test]
    fn test_prefix_is_optional() {
        assert_eq!(compare_versions("v3.0.0", "3.0.0"), Ordering::Equal);
    }

    #[test]
    fn test_numeric_not_lexical() {
        assert_eq!(compare_versions("v3.10.0", "v3.9.0"), Ordering::Greater);
    }

    #[test]
    fn test_non_numeric_components() {
        assert_eq!(compare_versions("1.0.0-rc1", "1.0.0"), Ordering::Equal);
        assert_eq!(compare_versions("1.2rc", "1.1"), Ordering::Greater);
        assert_eq!(compare_versions("1.beta", "1.0"), Ordering::Equal);
    }

    #[test]
    fn test_is_newer_than_is_strict() {
        assert!(is_newer_than("v3.0.1", "v3.0.0"));
        assert!(!is_newer_than("v3.0.0", "v3.0.0"));
        assert!(!is_newer_than("v2.9.9", "v3.0.0"));
    }

    #[test]
    fn test_newest_ignores_input_order() {
        let tags = vec![
            "v1.0.1".to_string(),
            "v1.1.0".to_string(),
            "v1.0.0".to_string(),
        ];
        assert_eq!(newest(&tags), Some("v1.1.0"));
        assert_eq!(newest(&Vec::new()), None);
    }
}
