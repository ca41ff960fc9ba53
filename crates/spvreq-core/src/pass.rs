//! The requirement pass over units and modules.

use crate::accumulator::{Declarations, RequirementAccumulator};
use crate::error::{GraphError, RequirementError, ResolveError};
use crate::graph::CapabilityGraph;
use crate::requirement::Requirement;
use crate::resolver::EnvironmentResolver;
use crate::rules::requirements_for;
use rayon::prelude::*;
use spvreq_ir::inst::{DefLookup, Module, Unit};
use tracing::{info, instrument, trace};

/// Replace every `Capability` requirement by its prerequisite chain,
/// prerequisites first. Other requirements pass through unchanged.
pub fn with_prerequisites(
    graph: &CapabilityGraph,
    reqs: Vec<Requirement>,
) -> Result<Vec<Requirement>, GraphError> {
    let mut out = Vec::with_capacity(reqs.len());
    for req in reqs {
        match req {
            Requirement::Capability(cap) => {
                out.extend(graph.chain(cap)?.into_iter().map(Requirement::Capability))
            }
            other => out.push(other),
        }
    }
    Ok(out)
}

/// Derive, expand and fold the requirements of one unit, in stream order.
#[instrument(skip_all, fields(unit = %unit.name))]
pub fn resolve_unit<D>(
    env: &EnvironmentResolver,
    unit: &Unit,
    defs: &D,
) -> Result<Declarations, ResolveError>
where
    D: DefLookup + ?Sized,
{
    let mut acc = RequirementAccumulator::new(env);
    for (index, inst) in unit.insts.iter().enumerate() {
        let wrap = |source: RequirementError| ResolveError {
            unit: unit.name.clone(),
            index,
            opcode: inst.opcode,
            source,
        };
        let direct = requirements_for(inst, env, defs).map_err(wrap)?;
        trace!(index, opcode = %inst.opcode, count = direct.len(), "derived requirements");
        let expanded = with_prerequisites(env.graph(), direct)
            .map_err(RequirementError::from)
            .map_err(wrap)?;
        for req in &expanded {
            acc.add_requirement(req).map_err(wrap)?;
        }
    }
    let decls = acc.finish();
    info!(
        capabilities = decls.capabilities().len(),
        extensions = decls.extensions().len(),
        "resolved unit"
    );
    Ok(decls)
}

/// Resolve every unit of `module` with its own accumulator. Units run on
/// the rayon pool sharing `env`; results come back in unit order and the
/// first failing unit's error wins.
#[instrument(skip_all, fields(units = module.units.len()))]
pub fn resolve_units(
    env: &EnvironmentResolver,
    module: &Module,
) -> Result<Vec<Declarations>, ResolveError> {
    let results: Vec<Result<Declarations, ResolveError>> = module
        .units
        .par_iter()
        .map(|unit| resolve_unit(env, unit, module))
        .collect();
    results.into_iter().collect()
}

/// Resolve a module and hoist the per-unit declarations into one set.
pub fn resolve_module(
    env: &EnvironmentResolver,
    module: &Module,
) -> Result<Declarations, ResolveError> {
    let mut all = Declarations::default();
    for decls in resolve_units(env, module)? {
        all.merge(&decls);
    }
    Ok(all)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::Capability as C;
    use crate::profile::EnvironmentProfile;
    use spvreq_ir::inst::{Inst, Operand, ValueId};
    use spvreq_ir::Opcode;

    fn vulkan() -> EnvironmentResolver {
        EnvironmentResolver::new(EnvironmentProfile::from_triple("spirv-unknown-vulkan").unwrap())
            .unwrap()
    }

    #[test]
    fn chains_are_expanded_before_folding() {
        let g = CapabilityGraph::new().unwrap();
        let out = with_prerequisites(
            &g,
            vec![
                Requirement::Capability(C::Geometry),
                Requirement::AlternativeCapabilities(vec![C::Sampled1D, C::Image1D]),
            ],
        )
        .unwrap();
        assert_eq!(
            out,
            vec![
                Requirement::Capability(C::Matrix),
                Requirement::Capability(C::Shader),
                Requirement::Capability(C::Geometry),
                Requirement::AlternativeCapabilities(vec![C::Sampled1D, C::Image1D]),
            ]
        );
    }

    #[test]
    fn failing_instruction_is_named() {
        let env = vulkan();
        let unit = Unit::new(
            "f",
            vec![
                Inst::with_result(Opcode::TypeInt, ValueId(0), vec![Operand::Imm(64), Operand::Imm(0)]),
                Inst::with_result(Opcode::TypeImage, ValueId(1), vec![Operand::Id(ValueId(0))]),
            ],
        );
        let err = resolve_unit(&env, &unit, unit.insts.as_slice()).unwrap_err();
        assert_eq!(err.unit, "f");
        assert_eq!(err.index, 1);
        assert_eq!(err.opcode, Opcode::TypeImage);
        assert!(matches!(err.source, RequirementError::MissingOperand { .. }));
    }

    #[test]
    fn empty_module_resolves_to_nothing() {
        let env = vulkan();
        let module = Module::new(Vec::new(), Vec::new());
        assert!(resolve_units(&env, &module).unwrap().is_empty());
        assert!(resolve_module(&env, &module).unwrap().is_empty());
    }

    fn int_unit(name: String, width: u32) -> Unit {
        Unit::new(
            name,
            vec![Inst::with_result(
                Opcode::TypeInt,
                ValueId(0),
                vec![Operand::Imm(width), Operand::Imm(0)],
            )],
        )
    }

    fn broken_unit(name: String) -> Unit {
        Unit::new(name, vec![Inst::with_result(Opcode::TypeImage, ValueId(1), Vec::new())])
    }

    #[test]
    fn units_come_back_in_order() {
        let env = vulkan();
        let units = (0..200)
            .map(|i| int_unit(format!("u{i}"), if i % 2 == 0 { 64 } else { 32 }))
            .collect();
        let module = Module::new(units, Vec::new());

        let out = resolve_units(&env, &module).unwrap();
        assert_eq!(out.len(), 200);
        for (i, decls) in out.iter().enumerate() {
            let expected: &[C] = if i % 2 == 0 { &[C::Int64] } else { &[] };
            assert_eq!(decls.capabilities(), expected, "unit {i}");
        }
    }

    #[test]
    fn earliest_failing_unit_is_reported() {
        let env = vulkan();
        let units = (0..200)
            .map(|i| {
                if i == 37 || i == 150 {
                    broken_unit(format!("u{i}"))
                } else {
                    int_unit(format!("u{i}"), 32)
                }
            })
            .collect();
        let module = Module::new(units, Vec::new());

        for _ in 0..8 {
            let err = resolve_units(&env, &module).unwrap_err();
            assert_eq!(err.unit, "u37");
            assert_eq!(err.opcode, Opcode::TypeImage);
        }
    }
}
