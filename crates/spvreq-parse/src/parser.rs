use crate::lexer::Lexer;
use crate::token::{Tok, TokKind};
use anyhow::{bail, Result};
use spvreq_ir::inst::{Inst, Module, Operand, Unit, ValueId};
use spvreq_ir::span::Span;
use spvreq_ir::Opcode;
use std::collections::{HashMap, HashSet};

/// Name of the unit holding everything outside `OpFunction` ... `OpFunctionEnd`.
pub const MODULE_UNIT: &str = "<module>";

/// Parse a listing into a module: one module-level unit followed by one unit
/// per function, in source order.
pub fn parse_str(_file: &str, src: &str) -> Result<Module> {
    let mut p = Parser::new(src);
    p.parse_module()
}

struct Parser<'a> {
    lex: Lexer<'a>,
    cur: Tok,
    ids: HashMap<String, ValueId>,
    names: Vec<String>,
    defined: HashSet<ValueId>,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Self {
        let mut lex = Lexer::new(src);
        let cur = lex.next_tok();
        Self {
            lex,
            cur,
            ids: HashMap::new(),
            names: Vec::new(),
            defined: HashSet::new(),
        }
    }

    fn bump(&mut self) {
        self.cur = self.lex.next_tok();
    }

    fn intern(&mut self, name: &str) -> ValueId {
        if let Some(id) = self.ids.get(name) {
            return *id;
        }
        let id = ValueId(self.names.len() as u32);
        self.names.push(name.to_string());
        self.ids.insert(name.to_string(), id);
        id
    }

    fn at_line_end(&self) -> bool {
        matches!(self.cur.kind, TokKind::Newline | TokKind::Eof)
    }

    // ======= module / units =======

    fn parse_module(&mut self) -> Result<Module> {
        let mut module_insts = Vec::new();
        let mut functions: Vec<Unit> = Vec::new();
        let mut open: Option<(Unit, usize)> = None;

        loop {
            while matches!(self.cur.kind, TokKind::Newline) {
                self.bump();
            }
            if matches!(self.cur.kind, TokKind::Eof) {
                break;
            }
            let line = self.cur.line;
            let inst = self.parse_inst()?;

            match inst.opcode {
                Opcode::Function => {
                    if let Some((unit, start)) = &open {
                        bail!(
                            "line {}: OpFunction inside function '{}' opened at line {}",
                            line,
                            unit.name,
                            start
                        );
                    }
                    let name = inst
                        .result
                        .and_then(|id| self.names.get(id.0 as usize).cloned())
                        .unwrap_or_else(|| format!("function{}", functions.len()));
                    open = Some((Unit::new(name, vec![inst]), line));
                }
                Opcode::FunctionEnd => match open.take() {
                    Some((mut unit, _)) => {
                        unit.insts.push(inst);
                        functions.push(unit);
                    }
                    None => bail!("line {}: OpFunctionEnd without OpFunction", line),
                },
                _ => match &mut open {
                    Some((unit, _)) => unit.insts.push(inst),
                    None => module_insts.push(inst),
                },
            }
        }

        if let Some((unit, start)) = open {
            bail!(
                "function '{}' opened at line {} is missing OpFunctionEnd",
                unit.name,
                start
            );
        }

        let mut units = Vec::with_capacity(functions.len() + 1);
        units.push(Unit::new(MODULE_UNIT, module_insts));
        units.extend(functions);
        Ok(Module::new(units, std::mem::take(&mut self.names)))
    }

    // ======= instructions =======

    fn parse_inst(&mut self) -> Result<Inst> {
        let start = self.cur.span.start;
        let line = self.cur.line;

        let result = if let TokKind::IdRef(name) = &self.cur.kind {
            let name = name.clone();
            self.bump();
            if !matches!(self.cur.kind, TokKind::Eq) {
                bail!("line {}: expected '=' after %{}, found {:?}", line, name, self.cur.kind);
            }
            self.bump();
            let id = self.intern(&name);
            if !self.defined.insert(id) {
                bail!("line {}: %{} is defined more than once", line, name);
            }
            Some(id)
        } else {
            None
        };

        let opcode = match &self.cur.kind {
            TokKind::Ident(word) => match Opcode::from_name(word) {
                Some(op) => op,
                None => bail!("line {}: unknown opcode '{}'", line, word),
            },
            other => bail!("line {}: expected opcode, found {:?}", line, other),
        };
        self.bump();

        let mut operands = Vec::new();
        while !self.at_line_end() {
            let operand = match &self.cur.kind {
                TokKind::IdRef(name) => {
                    let name = name.clone();
                    Operand::Id(self.intern(&name))
                }
                TokKind::Int(v) => Operand::Imm(*v),
                TokKind::Str(s) => Operand::Str(s.clone()),
                TokKind::Error(msg) => bail!("line {}: {}", line, msg),
                other => bail!("line {}: unexpected operand {:?}", line, other),
            };
            operands.push(operand);
            self.bump();
        }

        let span = Span {
            start,
            end: self.cur.span.start,
        };
        let inst = match result {
            Some(id) => Inst::with_result(opcode, id, operands),
            None => Inst::new(opcode, operands),
        };
        Ok(inst.at(span))
    }
}
