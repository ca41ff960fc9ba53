//! Opcodes understood by the listing reader and the requirement rules.

use serde::Serialize;
use std::fmt;

macro_rules! opcodes {
    ($($name:ident = $code:literal,)*) => {
        /// A SPIR-V opcode. Variant names drop the `Op` prefix.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        #[repr(u16)]
        pub enum Opcode {
            $($name = $code,)*
        }

        impl Opcode {
            /// Every opcode, in numeric order.
            pub const ALL: &'static [Opcode] = &[$(Opcode::$name,)*];

            /// Assembly name, e.g. `OpTypeInt`.
            pub fn name(self) -> &'static str {
                match self {
                    $(Opcode::$name => concat!("Op", stringify!($name)),)*
                }
            }
        }
    };
}

opcodes! {
    Nop = 0,
    Undef = 1,
    SourceContinued = 2,
    Source = 3,
    SourceExtension = 4,
    Name = 5,
    MemberName = 6,
    String = 7,
    Line = 8,
    Extension = 10,
    ExtInstImport = 11,
    ExtInst = 12,
    MemoryModel = 14,
    EntryPoint = 15,
    ExecutionMode = 16,
    Capability = 17,
    TypeVoid = 19,
    TypeBool = 20,
    TypeInt = 21,
    TypeFloat = 22,
    TypeVector = 23,
    TypeMatrix = 24,
    TypeImage = 25,
    TypeSampler = 26,
    TypeSampledImage = 27,
    TypeArray = 28,
    TypeRuntimeArray = 29,
    TypeStruct = 30,
    TypeOpaque = 31,
    TypePointer = 32,
    TypeFunction = 33,
    TypeEvent = 34,
    TypeDeviceEvent = 35,
    TypeReserveId = 36,
    TypeQueue = 37,
    TypePipe = 38,
    TypeForwardPointer = 39,
    ConstantTrue = 41,
    ConstantFalse = 42,
    Constant = 43,
    ConstantComposite = 44,
    ConstantSampler = 45,
    ConstantNull = 46,
    Function = 54,
    FunctionParameter = 55,
    FunctionEnd = 56,
    FunctionCall = 57,
    Variable = 59,
    Load = 61,
    Store = 62,
    AccessChain = 65,
    InBoundsAccessChain = 66,
    PtrAccessChain = 67,
    InBoundsPtrAccessChain = 70,
    Decorate = 71,
    MemberDecorate = 72,
    IAdd = 128,
    FAdd = 129,
    ISub = 130,
    IMul = 132,
    Select = 169,
    IEqual = 170,
    Phi = 245,
    LoopMerge = 246,
    SelectionMerge = 247,
    Label = 248,
    Branch = 249,
    BranchConditional = 250,
    Return = 253,
    ReturnValue = 254,
    Unreachable = 255,
    ExecutionModeId = 331,
    DecorateId = 332,
    PtrEqual = 401,
    PtrNotEqual = 402,
    DecorateString = 5632,
    MemberDecorateString = 5633,
}

impl Opcode {
    pub fn code(self) -> u16 {
        self as u16
    }

    pub fn from_code(code: u16) -> Option<Opcode> {
        Self::ALL.iter().copied().find(|op| op.code() == code)
    }

    /// Accepts the assembly name with or without the `Op` prefix.
    pub fn from_name(name: &str) -> Option<Opcode> {
        let bare = name.strip_prefix("Op").unwrap_or(name);
        Self::ALL.iter().copied().find(|op| &op.name()[2..] == bare)
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_lookup() {
        for op in Opcode::ALL {
            assert_eq!(Opcode::from_name(op.name()), Some(*op));
            assert_eq!(Opcode::from_code(op.code()), Some(*op));
        }
    }

    #[test]
    fn codes_are_sorted_and_unique() {
        assert!(Opcode::ALL.windows(2).all(|w| w[0].code() < w[1].code()));
    }

    #[test]
    fn prefix_is_optional() {
        assert_eq!(Opcode::from_name("TypeImage"), Some(Opcode::TypeImage));
        assert_eq!(Opcode::from_name("OpTypeImage"), Some(Opcode::TypeImage));
        assert_eq!(Opcode::from_name("OpBogus"), None);
    }
}
