//! S-expression tree used to write KiCad library files.
//!
//! [`SExp::Atom`] is emitted verbatim (keywords, numbers, `yes`/`no`) and
//! [`SExp::Str`] is always quoted. The test-only parser reads written files
//! back for inspection.

use std::fmt;

#[cfg(test)]
#[derive(Debug, thiserror::Error)]
pub(crate) enum ParseError {
    #[error("Unexpected end of input")]
    UnexpectedEof,
    #[error("Unexpected token: {0}")]
    UnexpectedToken(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SExp {
    Atom(String),
    Str(String),
    List(Vec<SExp>),
}

impl SExp {
    pub fn atom(s: impl Into<String>) -> Self {
        SExp::Atom(s.into())
    }

    pub fn str(s: impl Into<String>) -> Self {
        SExp::Str(s.into())
    }

    pub fn num(v: f64) -> Self {
        // -0 prints as "-0"
        SExp::Atom(format!("{}", if v == 0.0 { 0.0 } else { v }))
    }

    /// `(key items...)`
    pub fn node(key: &str, items: impl IntoIterator<Item = SExp>) -> Self {
        let mut list = vec![SExp::atom(key)];
        list.extend(items);
        SExp::List(list)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            SExp::Atom(s) | SExp::Str(s) => Some(s),
            SExp::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[SExp]> {
        match self {
            SExp::List(items) => Some(items),
            _ => None,
        }
    }

    /// Leading keyword of a list
    pub fn key(&self) -> Option<&str> {
        self.as_list()?.first()?.as_text()
    }

    /// Every child list whose first element is `key`.
    pub fn get_all(&self, key: &str) -> Vec<&SExp> {
        match self {
            SExp::List(items) => items.iter().filter(|item| item.key() == Some(key)).collect(),
            _ => Vec::new(),
        }
    }

    /// First child list whose first element is `key`.
    pub fn get(&self, key: &str) -> Option<&SExp> {
        self.get_all(key).into_iter().next()
    }

    /// Multi-line rendering with tab indentation. Lists holding only atoms
    /// or atom-only lists stay on one line.
    pub fn to_pretty(&self) -> String {
        let mut out = String::new();
        self.write_pretty(&mut out, 0);
        out.push('\n');
        out
    }

    fn is_flat(&self) -> bool {
        match self {
            SExp::List(items) => items.iter().all(|item| match item {
                SExp::List(inner) => inner.iter().all(|i| !matches!(i, SExp::List(_))),
                _ => true,
            }),
            _ => true,
        }
    }

    fn write_pretty(&self, out: &mut String, depth: usize) {
        match self {
            SExp::List(items) if !self.is_flat() => {
                out.push('(');
                let mut rest = items.iter().peekable();
                // keep the keyword and leading scalars on the opening line
                while let Some(item) = rest.next_if(|i| !matches!(i, SExp::List(_))) {
                    if !out.ends_with('(') {
                        out.push(' ');
                    }
                    out.push_str(&item.to_string());
                }
                for item in rest {
                    out.push('\n');
                    out.push_str(&"\t".repeat(depth + 1));
                    item.write_pretty(out, depth + 1);
                }
                out.push('\n');
                out.push_str(&"\t".repeat(depth));
                out.push(')');
            }
            other => out.push_str(&other.to_string()),
        }
    }
}

impl fmt::Display for SExp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SExp::Atom(s) => write!(f, "{}", s),
            SExp::Str(s) => {
                write!(f, "\"")?;
                for ch in s.chars() {
                    match ch {
                        '"' => write!(f, "\\\"")?,
                        '\\' => write!(f, "\\\\")?,
                        '\n' => write!(f, "\\n")?,
                        _ => write!(f, "{}", ch)?,
                    }
                }
                write!(f, "\"")
            }
            SExp::List(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, ")")
            }
        }
    }
}

#[cfg(test)]
pub(crate) struct SExpParser {
    input: Vec<char>,
    pos: usize,
}

#[cfg(test)]
impl SExpParser {
    pub(crate) fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            pos: 0,
        }
    }

    pub(crate) fn parse(&mut self) -> Result<SExp, ParseError> {
        self.skip_whitespace();
        if self.is_eof() {
            return Err(ParseError::UnexpectedEof);
        }
        self.parse_sexp()
    }

    fn parse_sexp(&mut self) -> Result<SExp, ParseError> {
        self.skip_whitespace();
        match self.peek() {
            None => Err(ParseError::UnexpectedEof),
            Some('(') => self.parse_list(),
            Some('"') => self.parse_string(),
            Some(_) => self.parse_symbol(),
        }
    }

    fn parse_list(&mut self) -> Result<SExp, ParseError> {
        self.advance();
        let mut items = Vec::new();
        loop {
            self.skip_whitespace();
            match self.peek() {
                None => return Err(ParseError::UnexpectedEof),
                Some(')') => {
                    self.advance();
                    return Ok(SExp::List(items));
                }
                Some(_) => items.push(self.parse_sexp()?),
            }
        }
    }

    fn parse_string(&mut self) -> Result<SExp, ParseError> {
        self.advance();
        let mut s = String::new();
        while let Some(ch) = self.peek() {
            self.advance();
            match ch {
                '\\' => {
                    let escaped = self.peek().ok_or(ParseError::UnexpectedEof)?;
                    self.advance();
                    s.push(if escaped == 'n' { '\n' } else { escaped });
                }
                '"' => return Ok(SExp::Str(s)),
                _ => s.push(ch),
            }
        }
        Err(ParseError::UnexpectedEof)
    }

    fn parse_symbol(&mut self) -> Result<SExp, ParseError> {
        let mut s = String::new();
        while let Some(ch) = self.peek() {
            if ch.is_whitespace() || ch == '(' || ch == ')' {
                break;
            }
            s.push(ch);
            self.advance();
        }
        if s.is_empty() {
            Err(ParseError::UnexpectedToken(format!("'{}'", self.peek().unwrap_or(')'))))
        } else {
            Ok(SExp::Atom(s))
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.pos).copied()
    }

    fn advance(&mut self) {
        if self.pos < self.input.len() {
            self.pos += 1;
        }
    }

    fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }
}
