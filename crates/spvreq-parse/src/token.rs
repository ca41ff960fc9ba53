use spvreq_ir::span::Span;

#[derive(Debug, Clone, PartialEq)]
pub enum TokKind {
    Eof,
    /// Malformed input (bad number, stray character).
    Error(String),
    Newline,
    Eq,
    /// `%name`
    IdRef(String),
    /// Opcode names and any other bare word.
    Ident(String),
    Int(u32),
    Str(String),
}

#[derive(Debug, Clone)]
pub struct Tok {
    pub kind: TokKind,
    pub span: Span,
    /// 1-based source line the token starts on.
    pub line: usize,
}
