//! Decoder for stringified list literals.
//!
//! The curated graph stores many list-valued properties as the text of a
//! Python-style literal, e.g. `"['H001', 'H002']"` or `"[1.0, 2.0]"`. This
//! module decodes that text into JSON values without evaluating anything.
//!
//! Accepted forms: lists, tuples (decoded as lists), dicts with scalar keys,
//! single- or double-quoted strings, integers, floats, `True`, `False`, `None`.

use serde_json::{Map, Number, Value};
use thiserror::Error;

/// Deepest container nesting accepted before decoding gives up.
pub const MAX_DEPTH: usize = 64;

/// Why a literal could not be decoded.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LiteralError {
    #[error("unexpected end of input")]
    UnexpectedEnd,

    #[error("unexpected character '{ch}' at offset {pos}")]
    UnexpectedChar { ch: char, pos: usize },

    #[error("trailing input at offset {0}")]
    TrailingInput(usize),

    #[error("invalid number '{0}'")]
    InvalidNumber(String),

    #[error("containers nested deeper than {0} levels")]
    TooDeep(usize),
}

/// Parse a complete literal.
pub fn parse(input: &str) -> Result<Value, LiteralError> {
    let mut parser = Parser::new(input);
    parser.skip_ws();
    let value = parser.value()?;
    parser.skip_ws();
    if parser.pos < parser.chars.len() {
        return Err(LiteralError::TrailingInput(parser.pos));
    }
    Ok(value)
}

/// Parse a literal that must be a list.
pub fn parse_list(input: &str) -> Result<Vec<Value>, LiteralError> {
    match parse(input)? {
        Value::Array(items) => Ok(items),
        _ => Err(LiteralError::UnexpectedChar {
            ch: input.trim().chars().next().unwrap_or(' '),
            pos: 0,
        }),
    }
}

/// Expand a string property that holds a stringified list or dict.
///
/// Returns `None` when the value is not a string, does not look like a
/// container literal, or fails to decode; the caller keeps the original.
pub fn decode_stringified(value: &Value) -> Option<Value> {
    let text = value.as_str()?.trim();
    let looks_like_container = (text.starts_with('[') && text.ends_with(']'))
        || (text.starts_with('{') && text.ends_with('}'));
    if !looks_like_container {
        return None;
    }
    match parse(text) {
        Ok(decoded @ (Value::Array(_) | Value::Object(_))) => Some(decoded),
        _ => None,
    }
}

/// Render a scalar as plain text (strings unquoted).
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            pos: 0,
            depth: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    fn skip_ws(&mut self) {
        while self.peek().map_or(false, char::is_whitespace) {
            self.pos += 1;
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), LiteralError> {
        match self.bump() {
            Some(c) if c == expected => Ok(()),
            Some(c) => Err(LiteralError::UnexpectedChar { ch: c, pos: self.pos - 1 }),
            None => Err(LiteralError::UnexpectedEnd),
        }
    }

    fn value(&mut self) -> Result<Value, LiteralError> {
        match self.peek() {
            None => Err(LiteralError::UnexpectedEnd),
            Some('[') => self.nested(|p| p.sequence('[', ']')),
            Some('(') => self.nested(|p| p.sequence('(', ')')),
            Some('{') => self.nested(Self::dict),
            Some(q @ ('\'' | '"')) => self.string(q).map(Value::String),
            Some(c) if c == '-' || c == '+' || c == '.' || c.is_ascii_digit() => self.number(),
            Some(c) if c.is_ascii_alphabetic() => self.keyword(),
            Some(c) => Err(LiteralError::UnexpectedChar { ch: c, pos: self.pos }),
        }
    }

    fn nested<F>(&mut self, parse: F) -> Result<Value, LiteralError>
    where
        F: FnOnce(&mut Self) -> Result<Value, LiteralError>,
    {
        if self.depth >= MAX_DEPTH {
            return Err(LiteralError::TooDeep(MAX_DEPTH));
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    fn sequence(&mut self, open: char, close: char) -> Result<Value, LiteralError> {
        self.expect(open)?;
        let mut items = Vec::new();
        loop {
            self.skip_ws();
            if self.peek() == Some(close) {
                self.pos += 1;
                return Ok(Value::Array(items));
            }
            items.push(self.value()?);
            self.skip_ws();
            match self.bump() {
                Some(',') => continue,
                Some(c) if c == close => return Ok(Value::Array(items)),
                Some(c) => return Err(LiteralError::UnexpectedChar { ch: c, pos: self.pos - 1 }),
                None => return Err(LiteralError::UnexpectedEnd),
            }
        }
    }

    fn dict(&mut self) -> Result<Value, LiteralError> {
        self.expect('{')?;
        let mut map = Map::new();
        loop {
            self.skip_ws();
            if self.peek() == Some('}') {
                self.pos += 1;
                return Ok(Value::Object(map));
            }
            let key_pos = self.pos;
            let key = self.value()?;
            let key = scalar_text(&key).ok_or(LiteralError::UnexpectedChar {
                ch: self.chars.get(key_pos).copied().unwrap_or(' '),
                pos: key_pos,
            })?;
            self.skip_ws();
            self.expect(':')?;
            self.skip_ws();
            let value = self.value()?;
            map.insert(key, value);
            self.skip_ws();
            match self.bump() {
                Some(',') => continue,
                Some('}') => return Ok(Value::Object(map)),
                Some(c) => return Err(LiteralError::UnexpectedChar { ch: c, pos: self.pos - 1 }),
                None => return Err(LiteralError::UnexpectedEnd),
            }
        }
    }

    fn string(&mut self, quote: char) -> Result<String, LiteralError> {
        self.expect(quote)?;
        let mut out = String::new();
        loop {
            match self.bump() {
                None => return Err(LiteralError::UnexpectedEnd),
                Some(c) if c == quote => return Ok(out),
                Some('\\') => match self.bump() {
                    None => return Err(LiteralError::UnexpectedEnd),
                    Some('n') => out.push('\n'),
                    Some('t') => out.push('\t'),
                    Some('r') => out.push('\r'),
                    Some(other) => out.push(other),
                },
                Some(c) => out.push(c),
            }
        }
    }

    fn number(&mut self) -> Result<Value, LiteralError> {
        let start = self.pos;
        while self
            .peek()
            .map_or(false, |c| c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E' | '_'))
        {
            self.pos += 1;
        }
        let text: String = self.chars[start..self.pos].iter().filter(|c| **c != '_').collect();

        if let Ok(i) = text.parse::<i64>() {
            return Ok(Value::Number(i.into()));
        }
        text.parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .ok_or(LiteralError::InvalidNumber(text))
    }

    fn keyword(&mut self) -> Result<Value, LiteralError> {
        let start = self.pos;
        while self.peek().map_or(false, |c| c.is_ascii_alphanumeric() || c == '_') {
            self.pos += 1;
        }
        let word: String = self.chars[start..self.pos].iter().collect();
        match word.as_str() {
            "True" => Ok(Value::Bool(true)),
            "False" => Ok(Value::Bool(false)),
            "None" => Ok(Value::Null),
            _ => Err(LiteralError::UnexpectedChar {
                ch: self.chars[start],
                pos: start,
            }),
        }
    }
}
