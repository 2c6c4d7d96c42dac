//! Version parsing shared by the host and plugin descriptors.
//!
//! Plugin authors write compatibility bounds the way release notes spell
//! them (`3.5`, `v4.0`, `4.1-beta1`), so bounds are normalized to full
//! `major.minor.patch` semver before comparison.

use semver::Version;

/// Current interface crate version.
pub const INTERFACE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Parse a loosely written version string into a comparable [`Version`].
///
/// # Normalization
///
/// - Surrounding whitespace and a leading `v`/`V` are ignored
/// - Missing minor/patch components are filled with `0` (`3.5` -> `3.5.0`)
/// - Pre-release and build suffixes are kept (`4.1-beta1` -> `4.1.0-beta1`)
///
/// # Example
///
/// ```
/// use netbox_plugin_interface::parse_version;
///
/// assert_eq!(parse_version("3.5").unwrap(), parse_version("3.5.0").unwrap());
/// assert!(parse_version("4.0-beta1").unwrap() < parse_version("4.0").unwrap());
/// assert!(parse_version("not-a-version").is_err());
/// ```
pub fn parse_version(value: &str) -> Result<Version, semver::Error> {
    let trimmed = value.trim();
    let trimmed = trimmed
        .strip_prefix('v')
        .or_else(|| trimmed.strip_prefix('V'))
        .unwrap_or(trimmed);

    let split_at = trimmed.find(['-', '+']).unwrap_or(trimmed.len());
    let (core, suffix) = trimmed.split_at(split_at);

    let components = core.split('.').count();
    let padding = match components {
        1 => ".0.0",
        2 => ".0",
        _ => "",
    };

    Version::parse(&format!("{core}{padding}{suffix}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_version_parses_unchanged() {
        assert_eq!(parse_version("3.7.1").unwrap(), Version::new(3, 7, 1));
    }

    #[test]
    fn test_short_versions_are_padded() {
        assert_eq!(parse_version("3.5").unwrap(), Version::new(3, 5, 0));
        assert_eq!(parse_version("4").unwrap(), Version::new(4, 0, 0));
    }

    #[test]
    fn test_leading_v_and_whitespace_ignored() {
        assert_eq!(parse_version(" v4.0 ").unwrap(), Version::new(4, 0, 0));
        assert_eq!(parse_version("V3.6.2").unwrap(), Version::new(3, 6, 2));
    }

    #[test]
    fn test_prerelease_suffix_kept() {
        let beta = parse_version("4.1-beta1").unwrap();
        assert_eq!(beta.major, 4);
        assert_eq!(beta.minor, 1);
        assert!(!beta.pre.is_empty());
        assert!(beta < parse_version("4.1").unwrap());
    }

    #[test]
    fn test_invalid_version_string() {
        assert!(parse_version("").is_err());
        assert!(parse_version("invalid").is_err());
        assert!(parse_version("3.x").is_err());
    }

    #[test]
    fn test_interface_version_constant() {
        parse_version(INTERFACE_VERSION).expect("INTERFACE_VERSION should be valid semver");
    }
}
