//! Folding requirements into declaration sets.

use crate::capability::{Capability, Extension};
use crate::error::RequirementError;
use crate::requirement::Requirement;
use crate::resolver::EnvironmentResolver;
use indexmap::IndexSet;
use tracing::{debug, trace};

/// The capabilities and extensions one unit must declare, in declaration
/// order, without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Declarations {
    capabilities: Vec<Capability>,
    extensions: Vec<Extension>,
}

impl Declarations {
    pub fn capabilities(&self) -> &[Capability] {
        &self.capabilities
    }

    pub fn extensions(&self) -> &[Extension] {
        &self.extensions
    }

    pub fn is_empty(&self) -> bool {
        self.capabilities.is_empty() && self.extensions.is_empty()
    }

    /// Hoist `other` into `self`: entries not yet present are appended in
    /// their order in `other`.
    pub fn merge(&mut self, other: &Declarations) {
        for cap in &other.capabilities {
            if !self.capabilities.contains(cap) {
                self.capabilities.push(*cap);
            }
        }
        for ext in &other.extensions {
            if !self.extensions.contains(ext) {
                self.extensions.push(*ext);
            }
        }
    }
}

/// An alternative whose choice waits for the end of the pass.
#[derive(Debug, Clone)]
struct PendingChoice {
    candidates: Vec<Capability>,
    /// Candidates the environment allows, with the extension each needs.
    usable: Vec<(Capability, Option<Extension>)>,
}

/// Accumulates one unit's requirements.
///
/// Capabilities are recorded exactly as folded: prerequisites are expected
/// to arrive as their own requirements. The candidate chosen for an
/// alternative is recorded alone, never with its prerequisites, so every
/// declared capability traces back to a folded requirement.
///
/// Alternatives are validated when folded but chosen in
/// [`finish`](Self::finish), so the result does not depend on fold order.
/// `finish` consumes the accumulator; a finished pass cannot be extended.
#[derive(Debug)]
pub struct RequirementAccumulator<'env> {
    env: &'env EnvironmentResolver,
    capabilities: IndexSet<Capability>,
    extensions: IndexSet<Extension>,
    pending: Vec<PendingChoice>,
}

impl<'env> RequirementAccumulator<'env> {
    pub fn new(env: &'env EnvironmentResolver) -> Self {
        Self {
            env,
            capabilities: IndexSet::new(),
            extensions: IndexSet::new(),
            pending: Vec::new(),
        }
    }

    pub fn is_required(&self, cap: Capability) -> bool {
        self.capabilities.contains(&cap)
    }

    /// Require `cap`. Below its minimum version the gating extension is
    /// required as well; if there is none, nothing is recorded.
    pub fn add_capability(&mut self, cap: Capability) -> Result<(), RequirementError> {
        if self.capabilities.contains(&cap) {
            return Ok(());
        }
        let ext = self.env.version_gate(cap.row())?;
        trace!(capability = %cap, "required capability");
        self.capabilities.insert(cap);
        if let Some(ext) = ext {
            self.add_extension(ext);
        }
        Ok(())
    }

    pub fn add_extension(&mut self, ext: Extension) {
        if self.extensions.insert(ext) {
            trace!(extension = %ext, "required extension");
        }
    }

    /// Require any one of `candidates`. Nothing happens if one is already
    /// required. Otherwise at least one must be usable on this target, or
    /// the call fails without recording anything.
    pub fn add_alternatives(&mut self, candidates: &[Capability]) -> Result<(), RequirementError> {
        if candidates.iter().any(|c| self.capabilities.contains(c)) {
            return Ok(());
        }
        let usable: Vec<_> = candidates
            .iter()
            .filter_map(|&cap| self.env.usable(cap).map(|ext| (cap, ext)))
            .collect();
        if usable.is_empty() {
            return Err(RequirementError::Unsatisfiable {
                candidates: candidates.to_vec(),
            });
        }
        self.pending.push(PendingChoice {
            candidates: candidates.to_vec(),
            usable,
        });
        Ok(())
    }

    pub fn add_requirement(&mut self, req: &Requirement) -> Result<(), RequirementError> {
        match req {
            Requirement::Capability(cap) => self.add_capability(*cap),
            Requirement::AlternativeCapabilities(caps) => self.add_alternatives(caps),
            Requirement::Extension(ext) => {
                self.add_extension(*ext);
                Ok(())
            }
            Requirement::Empty => Ok(()),
        }
    }

    /// Resolve deferred alternatives and return the declarations.
    ///
    /// Alternatives are visited sorted by candidate list. Each one already
    /// satisfied is dropped; otherwise its first usable candidate is taken,
    /// without its prerequisite chain.
    pub fn finish(self) -> Declarations {
        let Self {
            mut capabilities,
            mut extensions,
            mut pending,
            ..
        } = self;

        pending.sort_by(|a, b| a.candidates.cmp(&b.candidates));
        pending.dedup_by(|a, b| a.candidates == b.candidates);
        for choice in pending {
            if choice.candidates.iter().any(|c| capabilities.contains(c)) {
                continue;
            }
            if let Some(&(cap, ext)) = choice.usable.first() {
                debug!(chosen = %cap, candidates = ?choice.candidates, "resolved alternative");
                capabilities.insert(cap);
                if let Some(ext) = ext {
                    extensions.insert(ext);
                }
            }
        }

        Declarations {
            capabilities: capabilities.into_iter().collect(),
            extensions: extensions.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::EnvironmentProfile;
    use crate::version::Version;
    use Capability as C;

    fn env(triple: &str) -> EnvironmentResolver {
        EnvironmentResolver::new(EnvironmentProfile::from_triple(triple).unwrap()).unwrap()
    }

    #[test]
    fn duplicate_capabilities_are_dropped() {
        let env = env("spirv64-unknown-opencl");
        let mut acc = RequirementAccumulator::new(&env);
        acc.add_capability(C::Int64).unwrap();
        acc.add_capability(C::Kernel).unwrap();
        acc.add_capability(C::Int64).unwrap();
        let decls = acc.finish();
        assert_eq!(decls.capabilities(), &[C::Int64, C::Kernel]);
        assert!(decls.extensions().is_empty());
    }

    #[test]
    fn plain_capabilities_ignore_availability() {
        let env = env("spirv64-unknown-opencl");
        let mut acc = RequirementAccumulator::new(&env);
        acc.add_capability(C::Geometry).unwrap();
        assert_eq!(acc.finish().capabilities(), &[C::Geometry]);
    }

    #[test]
    fn gated_capability_brings_its_extension() {
        let env = EnvironmentResolver::new(
            EnvironmentProfile::from_triple("spirv64v1.2-unknown-opencl")
                .unwrap()
                .with_extension(Extension::KhrFloatControls, true),
        )
        .unwrap();
        let mut acc = RequirementAccumulator::new(&env);
        acc.add_capability(C::DenormPreserve).unwrap();
        acc.add_capability(C::RoundingModeRTE).unwrap();
        let decls = acc.finish();
        assert_eq!(decls.capabilities(), &[C::DenormPreserve, C::RoundingModeRTE]);
        assert_eq!(decls.extensions(), &[Extension::KhrFloatControls]);
    }

    #[test]
    fn version_failure_records_nothing() {
        let env = env("spirv64v1.2-unknown-opencl");
        let mut acc = RequirementAccumulator::new(&env);
        let err = acc.add_capability(C::GroupNonUniform).unwrap_err();
        assert_eq!(
            err,
            RequirementError::VersionTooLow {
                subject: "GroupNonUniform".to_string(),
                required: Version::new(1, 3),
                target: Version::new(1, 2),
            }
        );
        assert!(!acc.is_required(C::GroupNonUniform));
        assert!(acc.finish().is_empty());
    }

    #[test]
    fn alternative_already_satisfied_adds_nothing() {
        let env = env("spirv-unknown-vulkan");
        let mut acc = RequirementAccumulator::new(&env);
        acc.add_capability(C::Geometry).unwrap();
        acc.add_alternatives(&[C::Geometry, C::Tessellation]).unwrap();
        assert_eq!(acc.finish().capabilities(), &[C::Geometry]);
    }

    #[test]
    fn alternative_satisfied_later_is_dropped() {
        let env = env("spirv-unknown-vulkan");
        let mut acc = RequirementAccumulator::new(&env);
        acc.add_alternatives(&[C::Sampled1D, C::Image1D]).unwrap();
        acc.add_capability(C::Image1D).unwrap();
        assert_eq!(acc.finish().capabilities(), &[C::Image1D]);
    }

    #[test]
    fn first_usable_candidate_wins() {
        let env = env("spirv-unknown-vulkan");
        let mut acc = RequirementAccumulator::new(&env);
        acc.add_alternatives(&[C::Kernel, C::Shader]).unwrap();
        assert_eq!(acc.finish().capabilities(), &[C::Shader]);
    }

    #[test]
    fn unsatisfiable_alternative_leaves_state_untouched() {
        let env = env("spirv-unknown-vulkan");
        let mut acc = RequirementAccumulator::new(&env);
        acc.add_capability(C::Shader).unwrap();
        let err = acc.add_alternatives(&[C::Kernel, C::Addresses]).unwrap_err();
        assert_eq!(
            err,
            RequirementError::Unsatisfiable {
                candidates: vec![C::Kernel, C::Addresses]
            }
        );
        assert_eq!(acc.finish().capabilities(), &[C::Shader]);
    }

    #[test]
    fn empty_requirement_is_a_no_op() {
        let env = env("spirv-unknown-vulkan");
        let mut acc = RequirementAccumulator::new(&env);
        acc.add_requirement(&Requirement::Empty).unwrap();
        acc.add_requirement(&Requirement::Extension(Extension::KhrMultiview)).unwrap();
        acc.add_requirement(&Requirement::Extension(Extension::KhrMultiview)).unwrap();
        let decls = acc.finish();
        assert!(decls.capabilities().is_empty());
        assert_eq!(decls.extensions(), &[Extension::KhrMultiview]);
    }

    #[test]
    fn merge_appends_unseen_entries() {
        let env = env("spirv-unknown-vulkan");
        let mut a = RequirementAccumulator::new(&env);
        a.add_capability(C::Shader).unwrap();
        a.add_capability(C::Int64).unwrap();
        let mut b = RequirementAccumulator::new(&env);
        b.add_capability(C::Int64).unwrap();
        b.add_capability(C::Geometry).unwrap();
        b.add_extension(Extension::KhrMultiview);

        let mut merged = a.finish();
        merged.merge(&b.finish());
        assert_eq!(merged.capabilities(), &[C::Shader, C::Int64, C::Geometry]);
        assert_eq!(merged.extensions(), &[Extension::KhrMultiview]);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn declarations_serialize_by_variant_name() {
        let env = env("spirv-unknown-vulkan");
        let mut acc = RequirementAccumulator::new(&env);
        acc.add_capability(C::Shader).unwrap();
        acc.add_extension(Extension::KhrMultiview);
        let json = serde_json::to_value(acc.finish()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "capabilities": ["Shader"], "extensions": ["KhrMultiview"] })
        );
    }
}
