#![forbid(unsafe_code)]
#![deny(unused_must_use)]

pub mod report;

use anyhow::{bail, Context, Result};
use spvreq_core::{EnvironmentProfile, EnvironmentResolver};
use tracing::debug;

/// Maximum source file size in bytes (1MB)
pub const MAX_SOURCE_SIZE: usize = 1_000_000;

/// Read a listing, refusing anything over [`MAX_SOURCE_SIZE`].
pub fn load_source(path: &str) -> Result<String> {
    let src = std::fs::read_to_string(path).with_context(|| format!("failed to read '{}'", path))?;
    if src.len() > MAX_SOURCE_SIZE {
        bail!(
            "source file exceeds {}MB limit ({} bytes)",
            MAX_SOURCE_SIZE / 1_000_000,
            src.len()
        );
    }
    Ok(src)
}

/// Build the resolver for `triple` (the default profile when absent) with
/// the `+Name,-Name` toggles in `features` applied.
pub fn build_environment(triple: Option<&str>, features: Option<&str>) -> Result<EnvironmentResolver> {
    let mut profile = match triple {
        Some(triple) => EnvironmentProfile::from_triple(triple)
            .with_context(|| format!("invalid target triple '{}'", triple))?,
        None => EnvironmentProfile::default(),
    };
    if let Some(features) = features {
        profile = profile
            .with_features(features)
            .with_context(|| format!("invalid feature string '{}'", features))?;
    }
    debug!(triple = profile.triple(), "target profile");
    Ok(EnvironmentResolver::new(profile)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use spvreq_core::Capability;

    #[test]
    fn default_environment_is_opencl_like() {
        let env = build_environment(None, None).unwrap();
        assert!(env.is_kernel());
        assert!(env.can_use(Capability::Kernel));
    }

    #[test]
    fn features_are_applied() {
        let env = build_environment(Some("spirv-unknown-vulkan"), Some("+Int64")).unwrap();
        assert!(env.can_use(Capability::Int64));
    }

    #[test]
    fn bad_configuration_is_reported_with_context() {
        let err = build_environment(Some("x86_64-unknown-linux"), None).unwrap_err();
        assert!(format!("{err:#}").contains("unknown architecture 'x86_64'"));
        let err = build_environment(None, Some("+NotACapability")).unwrap_err();
        assert!(format!("{err:#}").contains("NotACapability"));
    }

    #[test]
    fn oversized_sources_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.spvasm");
        std::fs::write(&path, "OpNop\n".repeat(MAX_SOURCE_SIZE / 6 + 1)).unwrap();
        let err = load_source(path.to_str().unwrap()).unwrap_err();
        assert!(err.to_string().contains("1MB limit"));
    }
}
