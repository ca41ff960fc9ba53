//! Target environment configuration.
//!
//! A profile is built once from a target triple and an optional feature
//! string, then handed to the resolver. It is never mutated afterwards.

use crate::capability::{Capability, Extension};
use crate::version::{ParseVersionError, Version};
use std::fmt;
use std::str::FromStr;

/// Which default capability set the target starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EnvironmentKind {
    Vulkan,
    OpenCl,
    /// No environment named in the triple; seeded like OpenCL.
    Unspecified,
}

impl fmt::Display for EnvironmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EnvironmentKind::Vulkan => "vulkan",
            EnvironmentKind::OpenCl => "opencl",
            EnvironmentKind::Unspecified => "unspecified",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Addressing {
    /// `spirv`: no pointer arithmetic, pointers are abstract.
    Logical,
    Physical32,
    Physical64,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileError {
    #[error("malformed target triple '{0}' (expected arch-vendor-os[-env])")]
    MalformedTriple(String),
    #[error("unknown architecture '{0}' (expected spirv, spirv32 or spirv64)")]
    UnknownArch(String),
    #[error("triple '{0}' names both a Vulkan and an OpenCL environment")]
    ConflictingEnvironment(String),
    #[error("bad version in '{component}'")]
    BadVersion {
        component: String,
        #[source]
        source: ParseVersionError,
    },
    #[error("feature toggle '{0}' must start with '+' or '-'")]
    MalformedToggle(String),
    #[error("unknown feature '{0}' (expected a capability or SPV_* extension name)")]
    UnknownFeature(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnvironmentProfile {
    triple: String,
    addressing: Addressing,
    kind: EnvironmentKind,
    spirv_version: Version,
    opencl_version: Version,
    vulkan_version: Version,
    full_profile: bool,
    image_support: bool,
    capability_toggles: Vec<(Capability, bool)>,
    extension_toggles: Vec<(Extension, bool)>,
}

const DEFAULT_SPIRV: Version = Version::new(1, 4);
const DEFAULT_OPENCL: Version = Version::new(2, 2);
const DEFAULT_VULKAN: Version = Version::new(1, 1);

fn version_suffix(component: &str, suffix: &str) -> Result<Option<Version>, ProfileError> {
    if suffix.is_empty() {
        return Ok(None);
    }
    suffix
        .parse()
        .map(Some)
        .map_err(|source| ProfileError::BadVersion {
            component: component.to_string(),
            source,
        })
}

impl EnvironmentProfile {
    /// Parse `arch-vendor-os[-env]`.
    pub fn from_triple(triple: &str) -> Result<Self, ProfileError> {
        let parts: Vec<&str> = triple.split('-').collect();
        if !(3..=4).contains(&parts.len()) || parts.iter().any(|p| p.is_empty()) {
            return Err(ProfileError::MalformedTriple(triple.to_string()));
        }

        let arch = parts[0];
        let (addressing, rest) = if let Some(rest) = arch.strip_prefix("spirv64") {
            (Addressing::Physical64, rest)
        } else if let Some(rest) = arch.strip_prefix("spirv32") {
            (Addressing::Physical32, rest)
        } else if let Some(rest) = arch.strip_prefix("spirv") {
            (Addressing::Logical, rest)
        } else {
            return Err(ProfileError::UnknownArch(arch.to_string()));
        };
        let spirv_version = match rest {
            "" => None,
            _ => match rest.strip_prefix('v') {
                Some(v) => version_suffix(arch, v)?,
                None => return Err(ProfileError::UnknownArch(arch.to_string())),
            },
        };

        let mut kind = EnvironmentKind::Unspecified;
        let mut env_version = None;
        for component in &parts[1..] {
            let (found, suffix) = if let Some(v) = component.strip_prefix("vulkan") {
                (EnvironmentKind::Vulkan, v)
            } else if let Some(v) = component.strip_prefix("opencl") {
                (EnvironmentKind::OpenCl, v)
            } else {
                continue;
            };
            if kind != EnvironmentKind::Unspecified && kind != found {
                return Err(ProfileError::ConflictingEnvironment(triple.to_string()));
            }
            kind = found;
            env_version = version_suffix(component, suffix)?.or(env_version);
        }

        let vulkan = kind == EnvironmentKind::Vulkan;
        Ok(Self {
            triple: triple.to_string(),
            addressing,
            kind,
            spirv_version: spirv_version.unwrap_or(DEFAULT_SPIRV),
            opencl_version: match (vulkan, env_version) {
                (true, _) => Version::UNSPECIFIED,
                (false, v) => v.unwrap_or(DEFAULT_OPENCL),
            },
            vulkan_version: match (vulkan, env_version) {
                (true, v) => v.unwrap_or(DEFAULT_VULKAN),
                (false, _) => Version::UNSPECIFIED,
            },
            full_profile: true,
            image_support: true,
            capability_toggles: Vec::new(),
            extension_toggles: Vec::new(),
        })
    }

    /// Apply a comma-separated `+Name,-Name` toggle string. Names are
    /// capabilities or `SPV_*` extensions; later toggles win.
    pub fn with_features(mut self, features: &str) -> Result<Self, ProfileError> {
        for raw in features.split(',') {
            let toggle = raw.trim();
            if toggle.is_empty() {
                continue;
            }
            let (on, name) = if let Some(name) = toggle.strip_prefix('+') {
                (true, name)
            } else if let Some(name) = toggle.strip_prefix('-') {
                (false, name)
            } else {
                return Err(ProfileError::MalformedToggle(toggle.to_string()));
            };
            if let Some(cap) = Capability::from_name(name) {
                self.capability_toggles.push((cap, on));
            } else if let Some(ext) = Extension::from_name(name) {
                self.extension_toggles.push((ext, on));
            } else {
                return Err(ProfileError::UnknownFeature(name.to_string()));
            }
        }
        Ok(self)
    }

    pub fn with_capability(mut self, cap: Capability, on: bool) -> Self {
        self.capability_toggles.push((cap, on));
        self
    }

    pub fn with_extension(mut self, ext: Extension, on: bool) -> Self {
        self.extension_toggles.push((ext, on));
        self
    }

    pub fn with_spirv_version(mut self, version: Version) -> Self {
        self.spirv_version = version;
        self
    }

    pub fn with_opencl_version(mut self, version: Version) -> Self {
        self.opencl_version = version;
        self
    }

    pub fn with_vulkan_version(mut self, version: Version) -> Self {
        self.vulkan_version = version;
        self
    }

    pub fn with_full_profile(mut self, on: bool) -> Self {
        self.full_profile = on;
        self
    }

    pub fn with_image_support(mut self, on: bool) -> Self {
        self.image_support = on;
        self
    }

    pub fn triple(&self) -> &str {
        &self.triple
    }

    pub fn kind(&self) -> EnvironmentKind {
        self.kind
    }

    pub fn addressing(&self) -> Addressing {
        self.addressing
    }

    pub fn spirv_version(&self) -> Version {
        self.spirv_version
    }

    pub fn opencl_version(&self) -> Version {
        self.opencl_version
    }

    pub fn vulkan_version(&self) -> Version {
        self.vulkan_version
    }

    pub fn full_profile(&self) -> bool {
        self.full_profile
    }

    pub fn image_support(&self) -> bool {
        self.image_support
    }

    pub fn capability_toggles(&self) -> &[(Capability, bool)] {
        &self.capability_toggles
    }

    pub fn extension_toggles(&self) -> &[(Extension, bool)] {
        &self.extension_toggles
    }

    pub fn is_vulkan(&self) -> bool {
        self.kind == EnvironmentKind::Vulkan
    }

    pub fn is_opencl(&self) -> bool {
        self.kind == EnvironmentKind::OpenCl
    }

    pub fn is_logical_addressing(&self) -> bool {
        self.addressing == Addressing::Logical
    }

    pub fn is_kernel(&self) -> bool {
        self.is_opencl() || !self.is_logical_addressing()
    }

    pub fn is_shader(&self) -> bool {
        self.is_vulkan() || self.is_logical_addressing()
    }

    /// Pointer width in bits; logical addressing has none.
    pub fn pointer_size(&self) -> Option<u32> {
        match self.addressing {
            Addressing::Logical => None,
            Addressing::Physical32 => Some(32),
            Addressing::Physical64 => Some(64),
        }
    }

    pub fn can_directly_compare_pointers(&self) -> bool {
        self.spirv_version.at_least(Version::new(1, 4))
    }
}

impl FromStr for EnvironmentProfile {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_triple(s)
    }
}

impl Default for EnvironmentProfile {
    fn default() -> Self {
        Self {
            triple: "spirv64-unknown-unknown".to_string(),
            addressing: Addressing::Physical64,
            kind: EnvironmentKind::Unspecified,
            spirv_version: DEFAULT_SPIRV,
            opencl_version: DEFAULT_OPENCL,
            vulkan_version: Version::UNSPECIFIED,
            full_profile: true,
            image_support: true,
            capability_toggles: Vec::new(),
            extension_toggles: Vec::new(),
        }
    }
}
