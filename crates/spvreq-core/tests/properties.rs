//! Property-based tests for folding and closure.
//!
//! Streams are drawn from a pool of requirements that a default Vulkan
//! target can always satisfy, so every fold succeeds and the properties
//! compare declarations only.

use proptest::prelude::*;
use proptest::sample::select;
use spvreq_core::{
    Capability as C, CapabilityGraph, Declarations, EnvironmentProfile, EnvironmentResolver,
    Requirement, RequirementAccumulator,
};
use std::collections::BTreeSet;

fn vulkan() -> EnvironmentResolver {
    let profile = EnvironmentProfile::from_triple("spirv-unknown-vulkan").expect("triple");
    EnvironmentResolver::new(profile).expect("capability table")
}

fn pool() -> Vec<Requirement> {
    vec![
        Requirement::Capability(C::Matrix),
        Requirement::Capability(C::Shader),
        Requirement::Capability(C::Geometry),
        Requirement::Capability(C::Int64),
        Requirement::Capability(C::Image1D),
        Requirement::any_of(&[C::Sampled1D, C::Image1D]),
        Requirement::any_of(&[C::Image1D, C::Sampled1D]),
        Requirement::any_of(&[C::Kernel, C::Shader]),
        Requirement::any_of(&[C::SampledBuffer, C::ImageBuffer]),
        Requirement::Empty,
    ]
}

fn stream() -> impl Strategy<Value = Vec<Requirement>> {
    prop::collection::vec(select(pool()), 0..24)
}

fn fold(env: &EnvironmentResolver, reqs: &[Requirement]) -> Declarations {
    let mut acc = RequirementAccumulator::new(env);
    for req in reqs {
        acc.add_requirement(req).expect("pool requirements are satisfiable");
    }
    acc.finish()
}

fn sorted<T: Ord + Clone>(caps: &[T]) -> Vec<T> {
    let mut caps = caps.to_vec();
    caps.sort();
    caps
}

fn all_capabilities() -> Vec<C> {
    C::all().collect()
}

// =============================================================================
// Folding
// =============================================================================

proptest! {
    /// Folding the same stream twice declares nothing new.
    #[test]
    fn prop_fold_is_idempotent(reqs in stream()) {
        let env = vulkan();
        let once = fold(&env, &reqs);
        let twice: Vec<_> = reqs.iter().chain(reqs.iter()).cloned().collect();
        prop_assert_eq!(fold(&env, &twice), once);
    }

    /// The declared set does not depend on fold order.
    #[test]
    fn prop_fold_is_order_independent(
        (reqs, shuffled) in stream().prop_flat_map(|v| (Just(v.clone()), Just(v).prop_shuffle()))
    ) {
        let env = vulkan();
        let a = fold(&env, &reqs);
        let b = fold(&env, &shuffled);
        prop_assert_eq!(sorted(a.capabilities()), sorted(b.capabilities()));
        prop_assert_eq!(sorted(a.extensions()), sorted(b.extensions()));
    }

    /// Every plain requirement is declared, every alternative is satisfied,
    /// and nothing else is added.
    #[test]
    fn prop_declarations_are_minimal(reqs in stream()) {
        let env = vulkan();
        let decls = fold(&env, &reqs);
        let caps = decls.capabilities();

        let distinct: BTreeSet<_> = caps.iter().collect();
        prop_assert_eq!(distinct.len(), caps.len(), "duplicate declaration");

        for req in &reqs {
            match req {
                Requirement::Capability(cap) => prop_assert!(caps.contains(cap)),
                Requirement::AlternativeCapabilities(alts) => {
                    prop_assert!(alts.iter().any(|c| caps.contains(c)));
                }
                _ => {}
            }
        }
        for cap in caps {
            let asked = reqs.iter().any(|req| match req {
                Requirement::Capability(c) => c == cap,
                Requirement::AlternativeCapabilities(alts) => alts.contains(cap),
                _ => false,
            });
            prop_assert!(asked, "{} was never requested", cap);
        }
        prop_assert!(decls.extensions().is_empty());
    }
}

// =============================================================================
// Closure
// =============================================================================

proptest! {
    /// A chain ends with its capability and lists each prerequisite before
    /// the capabilities that need it.
    #[test]
    fn prop_chain_is_topologically_ordered(cap in select(all_capabilities())) {
        let graph = CapabilityGraph::new().expect("acyclic");
        let chain = graph.chain(cap).expect("acyclic");
        prop_assert_eq!(chain.last().copied(), Some(cap));
        for (i, c) in chain.iter().enumerate() {
            for pre in graph.prerequisites_of(*c) {
                let at = chain.iter().position(|x| x == pre);
                prop_assert!(matches!(at, Some(j) if j < i), "{} before {}", pre, c);
            }
        }
    }

    /// Enabling capabilities leaves the available set closed under
    /// prerequisites, and recomputing from flags changes nothing.
    #[test]
    fn prop_enabled_set_is_closed(caps in prop::collection::vec(select(all_capabilities()), 0..8)) {
        let mut env = vulkan();
        for cap in &caps {
            env.enable_capability(*cap);
        }
        for cap in env.available() {
            for pre in env.graph().prerequisites_of(cap) {
                prop_assert!(env.can_use(*pre), "{} available without {}", cap, pre);
            }
        }
        for cap in &caps {
            prop_assert!(env.can_use(*cap));
        }

        let before: Vec<_> = env.available().collect();
        env.recompute_from_flags();
        let after: Vec<_> = env.available().collect();
        prop_assert_eq!(before, after);
    }
}
