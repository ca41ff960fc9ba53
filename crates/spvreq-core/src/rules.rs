//! Per-opcode requirement rules.
//!
//! [`rule_for`] maps an opcode to a [`Rule`] value; [`requirements_for`]
//! evaluates it against one instruction. Evaluation is a pure function of
//! the instruction, the environment and the definitions it looks up.
//!
//! Operand indices follow the instruction record layout: the result id is
//! operand 0 and the result type operand 1 when the instruction has them.

use crate::capability::{Capability, ExtInstSet};
use crate::error::RequirementError;
use crate::operands::{
    Family, ACCESS_READ_WRITE, DECORATION_BUILT_IN, DIM_1D, DIM_2D, DIM_BUFFER, DIM_CUBE,
    DIM_RECT, DIM_SUBPASS_DATA, SAMPLED_NO_SAMPLER,
};
use crate::requirement::Requirement;
use crate::resolver::EnvironmentResolver;
use spvreq_ir::inst::{DefLookup, Inst};
use spvreq_ir::Opcode;

/// How the requirements of one opcode are derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Nothing,
    Always(Capability),
    /// Each immediate operand is looked up in its family table.
    Operands(&'static [(usize, Family)]),
    /// An immediate operand (a bit width or component count) selects a
    /// capability; other values need nothing.
    Keyed {
        operand: usize,
        cases: &'static [(u32, Capability)],
    },
    /// A decoration at `operand`, followed by a built-in when it is `BuiltIn`.
    Decoration { operand: usize },
    Image,
    Sampler,
    ForwardPointer,
    /// Needs `VariablePointers` when addressing is logical and the result
    /// type is a pointer.
    VariablePointer,
    PointerComparison,
    ExtInstImport,
}

pub fn rule_for(opcode: Opcode) -> Rule {
    use crate::capability::Capability as C;
    use Opcode::*;

    match opcode {
        MemoryModel => Rule::Operands(&[(0, Family::AddressingModel), (1, Family::MemoryModel)]),
        EntryPoint => Rule::Operands(&[(0, Family::ExecutionModel)]),
        ExecutionMode | ExecutionModeId => Rule::Operands(&[(1, Family::ExecutionMode)]),
        TypeMatrix => Rule::Always(C::Matrix),
        TypeInt => Rule::Keyed {
            operand: 1,
            cases: &[(64, C::Int64), (16, C::Int16), (8, C::Int8)],
        },
        TypeFloat => Rule::Keyed {
            operand: 1,
            cases: &[(64, C::Float64), (16, C::Float16)],
        },
        TypeVector => Rule::Keyed {
            operand: 2,
            cases: &[(8, C::Vector16), (16, C::Vector16)],
        },
        TypePointer => Rule::Operands(&[(1, Family::StorageClass)]),
        TypeRuntimeArray => Rule::Always(C::Shader),
        TypeOpaque | TypeEvent => Rule::Always(C::Kernel),
        TypePipe | TypeReserveId => Rule::Always(C::Pipes),
        TypeDeviceEvent | TypeQueue => Rule::Always(C::DeviceEnqueue),
        Decorate | DecorateId | DecorateString => Rule::Decoration { operand: 1 },
        MemberDecorate | MemberDecorateString => Rule::Decoration { operand: 2 },
        InBoundsPtrAccessChain => Rule::Always(C::Addresses),
        ConstantSampler => Rule::Always(C::LiteralSampler),
        TypeImage => Rule::Image,
        TypeSampler => Rule::Sampler,
        TypeForwardPointer => Rule::ForwardPointer,
        Select | Phi | FunctionCall | PtrAccessChain | Load | ConstantNull => {
            Rule::VariablePointer
        }
        PtrEqual | PtrNotEqual => Rule::PointerComparison,
        ExtInstImport => Rule::ExtInstImport,
        _ => Rule::Nothing,
    }
}

fn imm(inst: &Inst, index: usize) -> Result<u32, RequirementError> {
    inst.imm(index).ok_or(RequirementError::MissingOperand {
        opcode: inst.opcode,
        index,
    })
}

/// Requirements attached to `value` in `family`: its capabilities (one, or
/// a choice) and the extension its version gate asks for. Values outside the
/// table need nothing.
pub fn enumerant_requirements(
    family: Family,
    value: u32,
    env: &EnvironmentResolver,
) -> Result<Vec<Requirement>, RequirementError> {
    let Some(row) = family.table().get(value) else {
        return Ok(Vec::new());
    };
    let mut out = Vec::new();
    let caps = Requirement::any_of(row.capabilities);
    if !caps.is_empty() {
        out.push(caps);
    }
    if let Some(ext) = env.version_gate(row)? {
        out.push(Requirement::Extension(ext));
    }
    Ok(out)
}

/// The direct requirements of one instruction. Prerequisite chains are not
/// expanded here.
pub fn requirements_for<D>(
    inst: &Inst,
    env: &EnvironmentResolver,
    defs: &D,
) -> Result<Vec<Requirement>, RequirementError>
where
    D: DefLookup + ?Sized,
{
    match rule_for(inst.opcode) {
        Rule::Nothing => Ok(Vec::new()),
        Rule::Always(cap) => Ok(vec![Requirement::Capability(cap)]),
        Rule::Operands(operands) => {
            let mut out = Vec::new();
            for &(index, family) in operands {
                out.extend(enumerant_requirements(family, imm(inst, index)?, env)?);
            }
            Ok(out)
        }
        Rule::Keyed { operand, cases } => {
            let value = imm(inst, operand)?;
            Ok(cases
                .iter()
                .filter(|(key, _)| *key == value)
                .map(|(_, cap)| Requirement::Capability(*cap))
                .take(1)
                .collect())
        }
        Rule::Decoration { operand } => {
            let decoration = imm(inst, operand)?;
            let mut out = enumerant_requirements(Family::Decoration, decoration, env)?;
            if decoration == DECORATION_BUILT_IN {
                let built_in = imm(inst, operand + 1)?;
                out.extend(enumerant_requirements(Family::BuiltIn, built_in, env)?);
            }
            Ok(out)
        }
        Rule::Image => image_requirements(inst, env),
        Rule::Sampler => Ok(if env.is_kernel() {
            vec![Requirement::Capability(Capability::ImageBasic)]
        } else {
            Vec::new()
        }),
        Rule::ForwardPointer => Ok(vec![Requirement::Capability(if env.is_kernel() {
            Capability::Addresses
        } else {
            Capability::PhysicalStorageBufferAddresses
        })]),
        Rule::VariablePointer => variable_pointer_requirements(inst, env, defs),
        Rule::PointerComparison => {
            if env.can_directly_compare_pointers() {
                Ok(Vec::new())
            } else {
                Err(RequirementError::UnsupportedInstruction {
                    opcode: inst.opcode,
                    reason: "pointer comparison needs SPIR-V 1.4",
                })
            }
        }
        Rule::ExtInstImport => ext_inst_import_requirements(inst, env),
    }
}

/// `%r = OpTypeImage %sampled_type dim depth arrayed ms sampled format [access]`
fn image_requirements(
    inst: &Inst,
    env: &EnvironmentResolver,
) -> Result<Vec<Requirement>, RequirementError> {
    if inst.num_operands() < 8 {
        return Err(RequirementError::MissingOperand {
            opcode: inst.opcode,
            index: inst.num_operands(),
        });
    }
    let mut out = enumerant_requirements(Family::ImageFormat, imm(inst, 7)?, env)?;

    let arrayed = imm(inst, 4)? == 1;
    let multisampled = imm(inst, 5)? == 1;
    let no_sampler = imm(inst, 6)? == SAMPLED_NO_SAMPLER;
    let pick = |image: Capability, sampled: Capability| {
        Requirement::Capability(if no_sampler { image } else { sampled })
    };

    match imm(inst, 2)? {
        DIM_1D => out.push(pick(Capability::Image1D, Capability::Sampled1D)),
        DIM_2D => {
            if multisampled && no_sampler {
                out.push(Requirement::Capability(Capability::ImageMSArray));
            }
        }
        DIM_CUBE => {
            out.push(Requirement::Capability(Capability::Shader));
            if arrayed {
                out.push(pick(Capability::ImageCubeArray, Capability::SampledCubeArray));
            }
        }
        DIM_RECT => out.push(pick(Capability::ImageRect, Capability::SampledRect)),
        DIM_BUFFER => out.push(pick(Capability::ImageBuffer, Capability::SampledBuffer)),
        DIM_SUBPASS_DATA => out.push(Requirement::Capability(Capability::InputAttachment)),
        // 3D and unknown dimensions.
        _ => {}
    }

    if env.is_kernel() {
        // Without an access qualifier the image is treated as read-only.
        let cap = if inst.imm(8) == Some(ACCESS_READ_WRITE) {
            Capability::ImageReadWrite
        } else {
            Capability::ImageBasic
        };
        out.push(Requirement::Capability(cap));
    }
    Ok(out)
}

fn variable_pointer_requirements<D>(
    inst: &Inst,
    env: &EnvironmentResolver,
    defs: &D,
) -> Result<Vec<Requirement>, RequirementError>
where
    D: DefLookup + ?Sized,
{
    if !env.is_logical_addressing() {
        return Ok(Vec::new());
    }
    let ty = inst.id(1).ok_or(RequirementError::MissingOperand {
        opcode: inst.opcode,
        index: 1,
    })?;
    let def = defs
        .def_of(ty)
        .ok_or(RequirementError::UndefinedValue { id: ty })?;
    if def.opcode == Opcode::TypePointer {
        Ok(vec![Requirement::Capability(Capability::VariablePointers)])
    } else {
        Ok(Vec::new())
    }
}

fn ext_inst_import_requirements(
    inst: &Inst,
    env: &EnvironmentResolver,
) -> Result<Vec<Requirement>, RequirementError> {
    let name = inst.string(1).ok_or(RequirementError::MissingOperand {
        opcode: inst.opcode,
        index: 1,
    })?;
    let unavailable = || RequirementError::ExtInstSetUnavailable {
        name: name.to_string(),
    };
    let set = ExtInstSet::from_name(name).ok_or_else(unavailable)?;
    if !env.can_use_ext_inst_set(set) {
        return Err(unavailable());
    }
    Ok(set
        .required_extension()
        .map(Requirement::Extension)
        .into_iter()
        .collect())
}
