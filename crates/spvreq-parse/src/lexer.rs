use crate::token::{Tok, TokKind};
use spvreq_ir::span::Span;

pub struct Lexer<'a> {
    src: &'a [u8],
    pos: usize,
    line: usize,
    tok_line: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            src: src.as_bytes(),
            pos: 0,
            line: 1,
            tok_line: 1,
        }
    }

    fn bump(&mut self) -> Option<u8> {
        let b = self.src.get(self.pos).copied()?;
        self.pos += 1;
        if b == b'\n' {
            self.line += 1;
        }
        Some(b)
    }

    fn peek(&self) -> Option<u8> {
        self.src.get(self.pos).copied()
    }
    fn peek2(&self) -> Option<u8> {
        self.src.get(self.pos + 1).copied()
    }

    fn span(&self, start: usize) -> Span {
        Span {
            start: start as u32,
            end: self.pos as u32,
        }
    }

    fn tok(&self, kind: TokKind, start: usize) -> Tok {
        Tok {
            kind,
            span: self.span(start),
            line: self.tok_line,
        }
    }

    fn skip_to_eol(&mut self) {
        while let Some(b) = self.peek() {
            if b == b'\n' {
                break;
            }
            self.bump();
        }
    }

    // Newlines are significant, so only horizontal whitespace is trivia.
    fn skip_ws_and_comments(&mut self) {
        loop {
            while matches!(self.peek(), Some(b' ' | b'\t' | b'\r')) {
                self.bump();
            }
            if self.peek() == Some(b';') {
                self.skip_to_eol();
                continue;
            }
            if self.peek() == Some(b'/') && self.peek2() == Some(b'/') {
                self.skip_to_eol();
                continue;
            }
            break;
        }
    }

    fn word(&mut self) -> String {
        let mut s = String::new();
        while let Some(p) = self.peek() {
            let ch = p as char;
            if ch.is_ascii_alphanumeric() || ch == '_' || ch == '.' {
                s.push(ch);
                self.bump();
            } else {
                break;
            }
        }
        s
    }

    pub fn next_tok(&mut self) -> Tok {
        self.skip_ws_and_comments();
        let start = self.pos;
        self.tok_line = self.line;
        let Some(b) = self.bump() else {
            return self.tok(TokKind::Eof, start);
        };
        let c = b as char;

        match c {
            '\n' => return self.tok(TokKind::Newline, start),
            '=' => return self.tok(TokKind::Eq, start),
            _ => {}
        }

        if c == '%' {
            let name = self.word();
            if name.is_empty() {
                return self.tok(TokKind::Error("empty id after '%'".into()), start);
            }
            return self.tok(TokKind::IdRef(name), start);
        }

        if c == '"' {
            let mut bytes = Vec::new();
            let mut closed = false;
            while let Some(b) = self.peek() {
                if b == b'\n' {
                    break;
                }
                self.bump();
                match b {
                    b'"' => {
                        closed = true;
                        break;
                    }
                    b'\\' => match self.peek() {
                        Some(b'\n') | None => break,
                        Some(esc) => {
                            self.bump();
                            bytes.push(esc);
                        }
                    },
                    _ => bytes.push(b),
                }
            }
            if !closed {
                return self.tok(TokKind::Error("unterminated string".into()), start);
            }
            return match String::from_utf8(bytes) {
                Ok(s) => self.tok(TokKind::Str(s), start),
                Err(_) => self.tok(TokKind::Error("string is not valid UTF-8".into()), start),
            };
        }

        if c.is_ascii_digit() {
            let (digits, radix) = if c == '0' && matches!(self.peek(), Some(b'x' | b'X')) {
                self.bump();
                (self.word(), 16)
            } else {
                (format!("{}{}", c, self.word()), 10)
            };
            return match u32::from_str_radix(&digits, radix) {
                Ok(v) => self.tok(TokKind::Int(v), start),
                Err(_) => self.tok(
                    TokKind::Error(format!("invalid integer literal '{}'", digits)),
                    start,
                ),
            };
        }

        if c.is_ascii_alphabetic() || c == '_' {
            let word = format!("{}{}", c, self.word());
            return self.tok(TokKind::Ident(word), start);
        }

        let shown = std::str::from_utf8(&self.src[start..])
            .ok()
            .and_then(|rest| rest.chars().next())
            .unwrap_or(c);
        self.tok(TokKind::Error(format!("unexpected character '{}'", shown)), start)
    }
}
