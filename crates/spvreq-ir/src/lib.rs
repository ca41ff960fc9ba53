#![forbid(unsafe_code)]
#![deny(unused_must_use)]

mod opcode;

pub use opcode::Opcode;

pub mod span {
    use serde::Serialize;

    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
    pub struct Span {
        pub start: u32,
        pub end: u32,
    }
}

pub mod inst {
    use super::span::Span;
    use super::Opcode;
    use serde::Serialize;
    use std::collections::HashMap;
    use std::fmt;

    /// A virtual value: the result id of some instruction.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
    pub struct ValueId(pub u32);

    impl fmt::Display for ValueId {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "%{}", self.0)
        }
    }

    #[derive(Debug, Clone, PartialEq, Eq, Serialize)]
    pub enum Operand {
        Id(ValueId),
        Imm(u32),
        Str(String),
    }

    /// One instruction record.
    ///
    /// Operands follow the machine-instruction layout: the result id (when the
    /// instruction defines one) is operand 0, the result type (when present)
    /// is operand 1, and the instruction's own operands follow.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize)]
    pub struct Inst {
        pub opcode: Opcode,
        pub result: Option<ValueId>,
        pub operands: Vec<Operand>,
        pub span: Span,
    }

    impl Inst {
        /// An instruction that defines no value.
        pub fn new(opcode: Opcode, operands: Vec<Operand>) -> Self {
            Self {
                opcode,
                result: None,
                operands,
                span: Span::default(),
            }
        }

        /// An instruction defining `result`; `operands` excludes the result.
        pub fn with_result(opcode: Opcode, result: ValueId, operands: Vec<Operand>) -> Self {
            let mut all = Vec::with_capacity(operands.len() + 1);
            all.push(Operand::Id(result));
            all.extend(operands);
            Self {
                opcode,
                result: Some(result),
                operands: all,
                span: Span::default(),
            }
        }

        pub fn at(mut self, span: Span) -> Self {
            self.span = span;
            self
        }

        pub fn num_operands(&self) -> usize {
            self.operands.len()
        }

        pub fn operand(&self, idx: usize) -> Option<&Operand> {
            self.operands.get(idx)
        }

        pub fn imm(&self, idx: usize) -> Option<u32> {
            match self.operands.get(idx) {
                Some(Operand::Imm(v)) => Some(*v),
                _ => None,
            }
        }

        pub fn id(&self, idx: usize) -> Option<ValueId> {
            match self.operands.get(idx) {
                Some(Operand::Id(v)) => Some(*v),
                _ => None,
            }
        }

        pub fn string(&self, idx: usize) -> Option<&str> {
            match self.operands.get(idx) {
                Some(Operand::Str(s)) => Some(s),
                _ => None,
            }
        }
    }

    /// Resolves a virtual value to the instruction that defines it.
    pub trait DefLookup {
        fn def_of(&self, id: ValueId) -> Option<&Inst>;
    }

    impl DefLookup for [Inst] {
        fn def_of(&self, id: ValueId) -> Option<&Inst> {
            self.iter().find(|inst| inst.result == Some(id))
        }
    }

    impl DefLookup for Vec<Inst> {
        fn def_of(&self, id: ValueId) -> Option<&Inst> {
            self.as_slice().def_of(id)
        }
    }

    /// A unit of resolution: one function, or the module-level preamble.
    #[derive(Debug, Clone, Serialize)]
    pub struct Unit {
        pub name: String,
        pub insts: Vec<Inst>,
    }

    impl Unit {
        pub fn new(name: impl Into<String>, insts: Vec<Inst>) -> Self {
            Self {
                name: name.into(),
                insts,
            }
        }
    }

    /// A whole listing. Definitions are visible across units.
    #[derive(Debug, Clone, Serialize)]
    pub struct Module {
        pub units: Vec<Unit>,
        /// Source names of ids, indexed by `ValueId.0`.
        pub id_names: Vec<String>,
        #[serde(skip)]
        defs: HashMap<ValueId, (usize, usize)>,
    }

    impl Module {
        pub fn new(units: Vec<Unit>, id_names: Vec<String>) -> Self {
            let mut defs = HashMap::new();
            for (u, unit) in units.iter().enumerate() {
                for (i, inst) in unit.insts.iter().enumerate() {
                    if let Some(id) = inst.result {
                        defs.entry(id).or_insert((u, i));
                    }
                }
            }
            Self {
                units,
                id_names,
                defs,
            }
        }

        pub fn insts(&self) -> impl Iterator<Item = &Inst> {
            self.units.iter().flat_map(|u| u.insts.iter())
        }

        pub fn name_of(&self, id: ValueId) -> Option<&str> {
            self.id_names.get(id.0 as usize).map(String::as_str)
        }
    }

    impl DefLookup for Module {
        fn def_of(&self, id: ValueId) -> Option<&Inst> {
            let (u, i) = self.defs.get(&id)?;
            self.units.get(*u)?.insts.get(*i)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn result_is_operand_zero() {
            let inst = Inst::with_result(Opcode::TypeInt, ValueId(3), vec![
                Operand::Imm(64),
                Operand::Imm(0),
            ]);
            assert_eq!(inst.id(0), Some(ValueId(3)));
            assert_eq!(inst.imm(1), Some(64));
            assert_eq!(inst.num_operands(), 3);
            assert_eq!(inst.imm(0), None);
        }

        #[test]
        fn module_def_lookup_spans_units() {
            let ty = Inst::with_result(Opcode::TypePointer, ValueId(0), vec![
                Operand::Imm(7),
                Operand::Id(ValueId(1)),
            ]);
            let load = Inst::with_result(Opcode::Load, ValueId(2), vec![
                Operand::Id(ValueId(0)),
                Operand::Id(ValueId(5)),
            ]);
            let module = Module::new(
                vec![Unit::new("<module>", vec![ty]), Unit::new("f", vec![load])],
                Vec::new(),
            );
            assert_eq!(
                module.def_of(ValueId(0)).map(|i| i.opcode),
                Some(Opcode::TypePointer)
            );
            assert_eq!(module.def_of(ValueId(2)).map(|i| i.opcode), Some(Opcode::Load));
            assert!(module.def_of(ValueId(9)).is_none());
        }

        #[test]
        fn value_id_display() {
            assert_eq!(ValueId(12).to_string(), "%12");
        }
    }
}
