//! What a target build can use, and what it has by default.

use crate::capability::{Capability, ExtInstSet, Extension};
use crate::error::{GraphError, RequirementError};
use crate::graph::CapabilityGraph;
use crate::profile::EnvironmentProfile;
use crate::table::Enumerant;
use crate::version::Version;
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

/// Condition under which a default capability is seeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Seed {
    Vulkan,
    NotVulkan,
    FullProfile,
    ImageSupport,
    /// Image support with OpenCL 2.0 or later.
    ReadWriteImages,
    /// SPIR-V 1.1 or later with OpenCL 2.2 or later.
    PipeStorage,
}

impl Seed {
    fn holds(self, p: &EnvironmentProfile) -> bool {
        let cl = !p.is_vulkan();
        match self {
            Seed::Vulkan => p.is_vulkan(),
            Seed::NotVulkan => cl,
            Seed::FullProfile => cl && p.full_profile(),
            Seed::ImageSupport => cl && p.image_support(),
            Seed::ReadWriteImages => {
                cl && p.image_support() && p.opencl_version().at_least(Version::new(2, 0))
            }
            Seed::PipeStorage => {
                cl && p.spirv_version().at_least(Version::new(1, 1))
                    && p.opencl_version().at_least(Version::new(2, 2))
            }
        }
    }
}

const SEEDS: &[(Seed, Capability)] = &[
    // Vulkan minimum requirements.
    (Seed::Vulkan, Capability::Matrix),
    (Seed::Vulkan, Capability::Shader),
    (Seed::Vulkan, Capability::InputAttachment),
    (Seed::Vulkan, Capability::Sampled1D),
    (Seed::Vulkan, Capability::Image1D),
    (Seed::Vulkan, Capability::SampledBuffer),
    (Seed::Vulkan, Capability::ImageBuffer),
    (Seed::Vulkan, Capability::ImageQuery),
    (Seed::Vulkan, Capability::DerivativeControl),
    // OpenCL minimum requirements.
    (Seed::NotVulkan, Capability::Addresses),
    (Seed::NotVulkan, Capability::Float16Buffer),
    (Seed::NotVulkan, Capability::Int16),
    (Seed::NotVulkan, Capability::Int8),
    (Seed::NotVulkan, Capability::Kernel),
    (Seed::NotVulkan, Capability::Linkage),
    (Seed::NotVulkan, Capability::Vector16),
    (Seed::NotVulkan, Capability::Float16),
    (Seed::FullProfile, Capability::Int64),
    (Seed::FullProfile, Capability::Float64),
    (Seed::ImageSupport, Capability::ImageBasic),
    (Seed::ImageSupport, Capability::LiteralSampler),
    (Seed::ImageSupport, Capability::Image1D),
    (Seed::ImageSupport, Capability::SampledBuffer),
    (Seed::ImageSupport, Capability::ImageBuffer),
    (Seed::ReadWriteImages, Capability::ImageReadWrite),
    (Seed::PipeStorage, Capability::PipeStorage),
];

/// Answers "can this target use X" for capabilities, extensions and
/// extended instruction sets.
///
/// Mutation takes `&mut self`; once the resolver is shared by reference
/// with the resolution pass it is frozen.
#[derive(Debug, Clone)]
pub struct EnvironmentResolver {
    profile: EnvironmentProfile,
    graph: CapabilityGraph,
    flags: HashMap<Capability, bool>,
    available: BTreeSet<Capability>,
    extensions: BTreeSet<Extension>,
    ext_inst_sets: BTreeSet<ExtInstSet>,
}

impl EnvironmentResolver {
    pub fn new(profile: EnvironmentProfile) -> Result<Self, GraphError> {
        let graph = CapabilityGraph::new()?;
        Ok(Self::with_graph(profile, graph))
    }

    pub fn with_graph(profile: EnvironmentProfile, graph: CapabilityGraph) -> Self {
        debug!(
            triple = profile.triple(),
            kind = %profile.kind(),
            spirv = %profile.spirv_version(),
            "seeding environment"
        );

        let mut flags = HashMap::new();
        for &(seed, cap) in SEEDS {
            if seed.holds(&profile) {
                flags.insert(cap, true);
            }
        }
        for &(cap, on) in profile.capability_toggles() {
            flags.insert(cap, on);
        }

        let mut extensions = BTreeSet::new();
        if !profile.is_vulkan() {
            extensions.insert(Extension::KhrNoIntegerWrapDecoration);
        }
        for &(ext, on) in profile.extension_toggles() {
            if on {
                extensions.insert(ext);
            } else {
                extensions.remove(&ext);
            }
        }

        let mut ext_inst_sets = BTreeSet::new();
        ext_inst_sets.insert(if profile.is_vulkan() {
            ExtInstSet::GlslStd450
        } else {
            ExtInstSet::OpenClStd
        });
        if extensions.contains(&Extension::AmdShaderTrinaryMinmax) {
            ext_inst_sets.insert(ExtInstSet::AmdShaderTrinaryMinmax);
        }

        let mut resolver = Self {
            profile,
            graph,
            flags,
            available: BTreeSet::new(),
            extensions,
            ext_inst_sets,
        };
        resolver.recompute_from_flags();
        resolver
    }

    pub fn profile(&self) -> &EnvironmentProfile {
        &self.profile
    }

    pub fn graph(&self) -> &CapabilityGraph {
        &self.graph
    }

    /// Enable `cap` and, transitively, its prerequisites. Already available
    /// capabilities are left alone, which also stops the walk at shared
    /// prerequisites.
    pub fn enable_capability(&mut self, cap: Capability) {
        let mut work = vec![cap];
        while let Some(cap) = work.pop() {
            self.flags.insert(cap, true);
            if !self.available.insert(cap) {
                continue;
            }
            debug!(capability = %cap, "enabled capability");
            work.extend(self.graph.prerequisites_of(cap).iter().rev());
        }
    }

    /// Set a raw feature flag. Takes effect at the next
    /// [`recompute_from_flags`](Self::recompute_from_flags).
    pub fn set_flag(&mut self, cap: Capability, on: bool) {
        self.flags.insert(cap, on);
    }

    pub fn flag(&self, cap: Capability) -> bool {
        self.flags.get(&cap).copied().unwrap_or(false)
    }

    /// Re-synchronize the available set with the raw flags. Flagged
    /// capabilities are added with their closure; unflagged ones are removed
    /// without touching their dependents.
    pub fn recompute_from_flags(&mut self) {
        let caps: Vec<Capability> = self.graph.capabilities().collect();
        for cap in caps {
            if self.flag(cap) {
                if !self.available.contains(&cap) {
                    self.enable_capability(cap);
                }
            } else if self.available.remove(&cap) {
                debug!(capability = %cap, "disabled capability");
            }
        }
    }

    pub fn can_use(&self, cap: Capability) -> bool {
        self.available.contains(&cap)
    }

    pub fn can_use_extension(&self, ext: Extension) -> bool {
        self.extensions.contains(&ext)
    }

    pub fn can_use_ext_inst_set(&self, set: ExtInstSet) -> bool {
        self.ext_inst_sets.contains(&set)
    }

    pub fn available(&self) -> impl Iterator<Item = Capability> + '_ {
        self.available.iter().copied()
    }

    pub fn extensions(&self) -> impl Iterator<Item = Extension> + '_ {
        self.extensions.iter().copied()
    }

    pub fn ext_inst_sets(&self) -> impl Iterator<Item = ExtInstSet> + '_ {
        self.ext_inst_sets.iter().copied()
    }

    pub fn spirv_version(&self) -> Version {
        self.profile.spirv_version()
    }

    pub fn is_kernel(&self) -> bool {
        self.profile.is_kernel()
    }

    pub fn is_shader(&self) -> bool {
        self.profile.is_shader()
    }

    pub fn is_logical_addressing(&self) -> bool {
        self.profile.is_logical_addressing()
    }

    pub fn can_directly_compare_pointers(&self) -> bool {
        self.profile.can_directly_compare_pointers()
    }

    /// Check a table row against the target SPIR-V version. Inside the
    /// row's window nothing extra is needed; below its minimum the first
    /// usable gating extension is returned.
    pub fn version_gate<V: Copy>(
        &self,
        row: &Enumerant<V>,
    ) -> Result<Option<Extension>, RequirementError> {
        let target = self.spirv_version();
        if !target.at_least(row.min_version) {
            return row
                .extensions
                .iter()
                .copied()
                .find(|ext| self.can_use_extension(*ext))
                .map(Some)
                .ok_or_else(|| RequirementError::VersionTooLow {
                    subject: row.name.to_string(),
                    required: row.min_version,
                    target,
                });
        }
        if !row.max_version.is_unspecified() && !target.is_unspecified() && target > row.max_version
        {
            return Err(RequirementError::VersionTooHigh {
                subject: row.name.to_string(),
                max: row.max_version,
                target,
            });
        }
        Ok(None)
    }

    /// `cap` is available and legal at this target's version, possibly
    /// through an extension. Returns that extension, if any.
    pub fn usable(&self, cap: Capability) -> Option<Option<Extension>> {
        if !self.can_use(cap) {
            return None;
        }
        self.version_gate(cap.row()).ok()
    }
}
