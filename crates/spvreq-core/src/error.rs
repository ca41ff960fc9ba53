use crate::capability::Capability;
use crate::version::Version;
use spvreq_ir::inst::ValueId;
use spvreq_ir::Opcode;

/// The capability table violates a structural invariant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("capability {capability} requires itself through its prerequisites")]
    Cycle { capability: Capability },
    #[error("{family} table is not sorted by value")]
    Unsorted { family: &'static str },
}

/// Why an instruction cannot be legalized on the configured target.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequirementError {
    #[error("none of the capabilities {candidates:?} is available on this target")]
    Unsatisfiable { candidates: Vec<Capability> },
    /// Below the minimum version with no usable enabling extension.
    #[error("{subject} requires SPIR-V {required} but the target is SPIR-V {target}, and no enabling extension is available")]
    VersionTooLow {
        subject: String,
        required: Version,
        target: Version,
    },
    #[error("{subject} is not allowed after SPIR-V {max}, the target is SPIR-V {target}")]
    VersionTooHigh {
        subject: String,
        max: Version,
        target: Version,
    },
    #[error("{opcode} is missing operand {index}")]
    MissingOperand { opcode: Opcode, index: usize },
    #[error("value {id} has no defining instruction")]
    UndefinedValue { id: ValueId },
    #[error("{opcode} is not supported on this target: {reason}")]
    UnsupportedInstruction { opcode: Opcode, reason: &'static str },
    #[error("extended instruction set '{name}' is not available on this target")]
    ExtInstSetUnavailable { name: String },
    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// A requirement failure tied to the instruction that caused it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{unit}: instruction {index} ({opcode}) cannot be legalized")]
pub struct ResolveError {
    pub unit: String,
    pub index: usize,
    pub opcode: Opcode,
    #[source]
    pub source: RequirementError,
}
