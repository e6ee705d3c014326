//! Restricted reader for the structured fields of a spec row.
//!
//! Spec fields such as `(0.5, 0.25, 0, 12, "top center")` are literal
//! tuples. Only numbers, quoted strings and (possibly nested) tuples are
//! accepted; identifiers, operators and calls are rejected outright.

use std::fmt;
use std::str::FromStr;

use crate::error::LiteralError;

/// A parsed structured literal.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int(i64),
    Float(f64),
    Str(String),
    Tuple(Vec<Literal>),
}

impl Literal {
    /// Parse a complete literal, rejecting trailing input.
    pub fn parse(input: &str) -> Result<Self, LiteralError> {
        let mut reader = Reader {
            src: input,
            pos: 0,
        };
        reader.skip_ws();
        let value = reader.value(0)?;
        reader.skip_ws();
        if reader.pos != input.len() {
            return Err(LiteralError::new(reader.pos, "unexpected trailing input"));
        }
        Ok(value)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Literal::Int(v) => Some(*v as f64),
            Literal::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Integers only; floats with no fractional part are accepted as well.
    pub fn as_usize(&self) -> Option<usize> {
        match self {
            Literal::Int(v) if *v >= 0 => usize::try_from(*v).ok(),
            Literal::Float(v) if *v >= 0.0 && v.fract() == 0.0 && *v <= u32::MAX as f64 => {
                Some(*v as usize)
            }
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Literal::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_tuple(&self) -> Option<&[Literal]> {
        match self {
            Literal::Tuple(items) => Some(items),
            _ => None,
        }
    }

    /// Read a tuple of exactly `N` numbers.
    pub fn as_numbers<const N: usize>(&self) -> Option<[f64; N]> {
        let items = self.as_tuple()?;
        if items.len() != N {
            return None;
        }
        let mut out = [0.0; N];
        for (slot, item) in out.iter_mut().zip(items) {
            *slot = item.as_f64()?;
        }
        Some(out)
    }
}

impl FromStr for Literal {
    type Err = LiteralError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Literal::parse(s)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Int(v) => write!(f, "{v}"),
            Literal::Float(v) => write!(f, "{v:?}"),
            Literal::Str(s) => write!(f, "{s:?}"),
            Literal::Tuple(items) => {
                write!(f, "(")?;
                for (idx, item) in items.iter().enumerate() {
                    if idx > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                if items.len() == 1 {
                    write!(f, ",")?;
                }
                write!(f, ")")
            }
        }
    }
}

const MAX_DEPTH: usize = 16;

struct Reader<'a> {
    src: &'a str,
    pos: usize,
}

impl Reader<'_> {
    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn skip_ws(&mut self) {
        while let Some(ch) = self.peek() {
            if !ch.is_whitespace() {
                break;
            }
            self.pos += ch.len_utf8();
        }
    }

    fn value(&mut self, depth: usize) -> Result<Literal, LiteralError> {
        match self.peek() {
            Some('(') | Some('[') => self.tuple(depth),
            Some('"') | Some('\'') => self.string(),
            Some(ch) if ch.is_ascii_digit() || matches!(ch, '+' | '-' | '.') => self.number(),
            Some(ch) => Err(LiteralError::new(
                self.pos,
                format!("unexpected character '{ch}'"),
            )),
            None => Err(LiteralError::new(self.pos, "expected a value")),
        }
    }

    fn tuple(&mut self, depth: usize) -> Result<Literal, LiteralError> {
        if depth >= MAX_DEPTH {
            return Err(LiteralError::new(self.pos, "tuples nested too deeply"));
        }
        let open = self.bump();
        let close = if open == Some('[') { ']' } else { ')' };
        let mut items = Vec::new();
        loop {
            self.skip_ws();
            if self.peek() == Some(close) {
                self.bump();
                return Ok(Literal::Tuple(items));
            }
            items.push(self.value(depth + 1)?);
            self.skip_ws();
            match self.bump() {
                Some(',') => continue,
                Some(ch) if ch == close => return Ok(Literal::Tuple(items)),
                Some(ch) => {
                    return Err(LiteralError::new(
                        self.pos - ch.len_utf8(),
                        format!("expected ',' or '{close}', found '{ch}'"),
                    ));
                }
                None => {
                    return Err(LiteralError::new(self.pos, format!("missing '{close}'")));
                }
            }
        }
    }

    fn string(&mut self) -> Result<Literal, LiteralError> {
        let start = self.pos;
        let quote = self.bump();
        let mut out = String::new();
        loop {
            match self.bump() {
                None => return Err(LiteralError::new(start, "unterminated string")),
                Some('\\') => match self.bump() {
                    Some('n') => out.push('\n'),
                    Some('t') => out.push('\t'),
                    Some(ch @ ('\\' | '\'' | '"')) => out.push(ch),
                    Some(ch) => {
                        return Err(LiteralError::new(
                            self.pos - ch.len_utf8(),
                            format!("unsupported escape '\\{ch}'"),
                        ));
                    }
                    None => return Err(LiteralError::new(start, "unterminated string")),
                },
                Some(ch) if Some(ch) == quote => return Ok(Literal::Str(out)),
                Some(ch) => out.push(ch),
            }
        }
    }

    fn number(&mut self) -> Result<Literal, LiteralError> {
        let start = self.pos;
        if matches!(self.peek(), Some('+' | '-')) {
            self.bump();
        }
        let mut is_float = false;
        let mut digits = 0usize;
        while let Some(ch) = self.peek() {
            match ch {
                '0'..='9' => digits += 1,
                '.' if !is_float => is_float = true,
                _ => break,
            }
            self.bump();
        }
        if digits == 0 {
            return Err(LiteralError::new(start, "expected digits"));
        }
        if matches!(self.peek(), Some('e' | 'E')) {
            is_float = true;
            self.bump();
            if matches!(self.peek(), Some('+' | '-')) {
                self.bump();
            }
            let exp_start = self.pos;
            while matches!(self.peek(), Some('0'..='9')) {
                self.bump();
            }
            if self.pos == exp_start {
                return Err(LiteralError::new(exp_start, "expected exponent digits"));
            }
        }
        let text = &self.src[start..self.pos];
        if is_float {
            let value = text
                .parse::<f64>()
                .map_err(|_| LiteralError::new(start, format!("invalid number '{text}'")))?;
            // Output backends write coordinates as f32.
            if !value.is_finite() || value.abs() > f32::MAX as f64 {
                return Err(LiteralError::new(start, format!("number '{text}' out of range")));
            }
            Ok(Literal::Float(value))
        } else {
            text.parse::<i64>()
                .map(Literal::Int)
                .map_err(|_| LiteralError::new(start, format!("integer '{text}' out of range")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_nested_tuples() {
        let lit = Literal::parse(" ((0.5, .25), -90, 12, 'top center') ").unwrap();
        assert_eq!(
            lit,
            Literal::Tuple(vec![
                Literal::Tuple(vec![Literal::Float(0.5), Literal::Float(0.25)]),
                Literal::Int(-90),
                Literal::Int(12),
                Literal::Str("top center".into()),
            ])
        );
    }

    #[test]
    fn accepts_brackets_and_trailing_comma() {
        let lit = Literal::parse("[1, 2e1, 3.,]").unwrap();
        assert_eq!(lit.as_numbers::<3>(), Some([1.0, 20.0, 3.0]));
    }

    #[test]
    fn string_escapes() {
        let lit = Literal::parse(r#""a\"b\nc""#).unwrap();
        assert_eq!(lit.as_str(), Some("a\"b\nc"));
    }

    #[test]
    fn rejects_expressions() {
        assert!(Literal::parse("__import__('os')").is_err());
        assert!(Literal::parse("1 + 2").is_err());
        assert!(Literal::parse("(1, 2").is_err());
        assert!(Literal::parse("(1 2)").is_err());
        assert!(Literal::parse("-").is_err());
        assert!(Literal::parse("'open").is_err());
    }

    #[test]
    fn rejects_unrepresentable_floats() {
        let err = Literal::parse("(1e999, 0.5)").unwrap_err();
        assert_eq!(err.offset, 1);
        assert!(err.message.contains("out of range"));
        assert!(Literal::parse("-1e39").is_err());
        assert_eq!(Literal::parse("1e3").unwrap(), Literal::Float(1000.0));
    }

    #[test]
    fn rejects_runaway_nesting() {
        let deep = format!("{}1{}", "(".repeat(64), ")".repeat(64));
        let err = Literal::parse(&deep).unwrap_err();
        assert!(err.message.contains("nested"));
    }

    #[test]
    fn usize_accessor() {
        assert_eq!(Literal::Int(7).as_usize(), Some(7));
        assert_eq!(Literal::Float(7.0).as_usize(), Some(7));
        assert_eq!(Literal::Float(7.5).as_usize(), None);
        assert_eq!(Literal::Int(-1).as_usize(), None);
    }

    #[test]
    fn display_matches_input_shape() {
        let lit = Literal::parse("(1, 'x', (2.5,))").unwrap();
        assert_eq!(lit.to_string(), "(1, \"x\", (2.5,))");
    }
}
