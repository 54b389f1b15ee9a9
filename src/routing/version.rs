//! Version tag derivation for mount paths.
//!
//! Mount paths carry only the major component of the configured API version,
//! prefixed with `v`. The tag is computed once per mount pass, before any
//! filesystem access.

use semver::Version;

/// Derive the mount-path version tag from a full semantic version.
///
/// `"2.3.1"` becomes `"v2"`. Pre-release and build metadata are ignored, so
/// `"1.2.3-beta"` still yields `"v1"`. A string that is not valid semver is
/// an error; the caller treats it as fatal before touching the filesystem.
pub fn version_tag(full_version: &str) -> Result<String, semver::Error> {
    let version = Version::parse(full_version)?;
    Ok(format!("v{}", version.major))
}
