//! Literal-only parser for JavaScript-style object and array literals.
//!
//! Documents may declare metadata as `export const metadata = { ... }` and embed
//! payloads such as `data={[{ name: 'Q1', value: 10 }]}`. Those snippets are
//! parsed here into [`serde_json::Value`] without ever evaluating code.
//!
//! Accepted syntax is a JSON superset:
//!
//! - unquoted identifier keys, single- or double-quoted keys, numeric keys
//! - single-quoted, double-quoted and backtick strings (no `${}` interpolation)
//! - finite numbers with optional sign, fraction, exponent, or `0x` hex prefix
//! - `true`, `false`, `null`
//! - trailing commas, `//` line comments and `/* */` block comments
//!
//! Anything else (identifiers, calls, `NaN`, `Infinity`, spread, computed keys)
//! is rejected with a [`LiteralError`] pointing at the offending byte.

use serde_json::{Map, Number, Value};
use thiserror::Error;

/// Nesting limit for arrays and objects.
const MAX_DEPTH: usize = 128;

/// Literal parsing failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} at offset {offset}")]
pub struct LiteralError {
    /// Byte offset into the parsed input.
    pub offset: usize,
    /// What went wrong.
    pub message: String,
}

/// Parse `src` as exactly one literal, allowing surrounding whitespace and comments.
pub fn parse_literal(src: &str) -> Result<Value, LiteralError> {
    let mut parser = Parser::new(src);
    let value = parser.parse_value(0)?;
    parser.skip_trivia()?;
    if parser.pos < src.len() {
        return Err(parser.error("unexpected trailing input"));
    }
    Ok(value)
}

/// Parse one literal at the start of `src` and return it with the number of bytes consumed.
///
/// Text after the literal is left untouched, which lets callers parse a literal that
/// is embedded in a larger document.
pub fn parse_literal_prefix(src: &str) -> Result<(Value, usize), LiteralError> {
    let mut parser = Parser::new(src);
    let value = parser.parse_value(0)?;
    Ok((value, parser.pos))
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn error(&self, message: impl Into<String>) -> LiteralError {
        LiteralError {
            offset: self.pos,
            message: message.into(),
        }
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        let mut chars = self.src[self.pos..].chars();
        chars.next();
        chars.next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn skip_trivia(&mut self) -> Result<(), LiteralError> {
        loop {
            match (self.peek(), self.peek_second()) {
                (Some(c), _) if c.is_whitespace() => {
                    self.bump();
                }
                (Some('/'), Some('/')) => {
                    while let Some(c) = self.bump() {
                        if c == '\n' {
                            break;
                        }
                    }
                }
                (Some('/'), Some('*')) => {
                    let start = self.pos;
                    self.pos += 2;
                    match self.src[self.pos..].find("*/") {
                        Some(end) => self.pos += end + 2,
                        None => {
                            self.pos = start;
                            return Err(self.error("unterminated block comment"));
                        }
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    fn parse_value(&mut self, depth: usize) -> Result<Value, LiteralError> {
        if depth > MAX_DEPTH {
            return Err(self.error("literal nested too deeply"));
        }
        self.skip_trivia()?;
        match self.peek() {
            Some('{') => self.parse_object(depth),
            Some('[') => self.parse_array(depth),
            Some(quote @ ('"' | '\'' | '`')) => self.parse_string(quote).map(Value::String),
            Some(c) if c == '-' || c == '+' || c == '.' || c.is_ascii_digit() => {
                self.parse_number()
            }
            Some(c) if is_ident_start(c) => {
                let start = self.pos;
                let word = self.parse_identifier();
                match word {
                    "true" => Ok(Value::Bool(true)),
                    "false" => Ok(Value::Bool(false)),
                    "null" => Ok(Value::Null),
                    other => {
                        let message = format!("unsupported expression `{other}`");
                        self.pos = start;
                        Err(self.error(message))
                    }
                }
            }
            Some(c) => Err(self.error(format!("unexpected character '{c}'"))),
            None => Err(self.error("unexpected end of input")),
        }
    }

    fn parse_object(&mut self, depth: usize) -> Result<Value, LiteralError> {
        self.bump();
        let mut map = Map::new();
        loop {
            self.skip_trivia()?;
            if self.eat('}') {
                return Ok(Value::Object(map));
            }

            let key = self.parse_key()?;
            self.skip_trivia()?;
            if !self.eat(':') {
                return Err(self.error(format!("expected ':' after key '{key}'")));
            }
            let value = self.parse_value(depth + 1)?;
            map.insert(key, value);

            self.skip_trivia()?;
            if self.eat(',') {
                continue;
            }
            if self.eat('}') {
                return Ok(Value::Object(map));
            }
            return Err(self.error("expected ',' or '}' in object literal"));
        }
    }

    fn parse_key(&mut self) -> Result<String, LiteralError> {
        match self.peek() {
            Some(quote @ ('"' | '\'')) => self.parse_string(quote),
            Some(c) if c.is_ascii_digit() => match self.parse_number()? {
                Value::Number(n) => Ok(n.to_string()),
                _ => Err(self.error("invalid numeric key")),
            },
            Some(c) if is_ident_start(c) => Ok(self.parse_identifier().to_string()),
            Some(c) => Err(self.error(format!("unexpected character '{c}' in object key"))),
            None => Err(self.error("unexpected end of input in object literal")),
        }
    }

    fn parse_array(&mut self, depth: usize) -> Result<Value, LiteralError> {
        self.bump();
        let mut items = Vec::new();
        loop {
            self.skip_trivia()?;
            if self.eat(']') {
                return Ok(Value::Array(items));
            }

            items.push(self.parse_value(depth + 1)?);

            self.skip_trivia()?;
            if self.eat(',') {
                continue;
            }
            if self.eat(']') {
                return Ok(Value::Array(items));
            }
            return Err(self.error("expected ',' or ']' in array literal"));
        }
    }

    fn parse_identifier(&mut self) -> &'a str {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if is_ident_continue(c) {
                self.bump();
            } else {
                break;
            }
        }
        &self.src[start..self.pos]
    }

    fn parse_string(&mut self, quote: char) -> Result<String, LiteralError> {
        let start = self.pos;
        self.bump();
        let mut out = String::new();
        loop {
            let Some(c) = self.bump() else {
                self.pos = start;
                return Err(self.error("unterminated string"));
            };
            match c {
                c if c == quote => return Ok(out),
                '\\' => self.parse_escape(&mut out)?,
                '$' if quote == '`' && self.peek() == Some('{') => {
                    self.pos -= 1;
                    return Err(self.error("template interpolation is not a literal"));
                }
                '\n' if quote != '`' => {
                    self.pos -= 1;
                    return Err(self.error("unescaped newline in string"));
                }
                c => out.push(c),
            }
        }
    }

    fn parse_escape(&mut self, out: &mut String) -> Result<(), LiteralError> {
        let Some(c) = self.bump() else {
            return Err(self.error("unterminated escape sequence"));
        };
        match c {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            'v' => out.push('\u{b}'),
            '0' => out.push('\0'),
            // line continuation
            '\n' => {}
            '\r' => {
                self.eat('\n');
            }
            'x' => {
                let code = self.parse_hex_digits(2)?;
                out.push(self.char_from(code)?);
            }
            'u' => {
                let code = if self.eat('{') {
                    let start = self.pos;
                    while self.peek().is_some_and(|c| c.is_ascii_hexdigit()) {
                        self.bump();
                    }
                    let digits = &self.src[start..self.pos];
                    if !self.eat('}') || digits.is_empty() {
                        return Err(self.error("invalid unicode escape"));
                    }
                    u32::from_str_radix(digits, 16)
                        .map_err(|_| self.error("invalid unicode escape"))?
                } else {
                    let high = self.parse_hex_digits(4)?;
                    if (0xD800..0xDC00).contains(&high) && self.src[self.pos..].starts_with("\\u")
                    {
                        self.pos += 2;
                        let low = self.parse_hex_digits(4)?;
                        if !(0xDC00..0xE000).contains(&low) {
                            return Err(self.error("invalid surrogate pair"));
                        }
                        0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00)
                    } else {
                        high
                    }
                };
                out.push(self.char_from(code)?);
            }
            other => out.push(other),
        }
        Ok(())
    }

    fn parse_hex_digits(&mut self, count: usize) -> Result<u32, LiteralError> {
        let digits = self
            .src
            .get(self.pos..self.pos + count)
            .filter(|d| d.chars().all(|c| c.is_ascii_hexdigit()))
            .ok_or_else(|| self.error("invalid hex escape"))?;
        self.pos += count;
        u32::from_str_radix(digits, 16).map_err(|_| self.error("invalid hex escape"))
    }

    fn char_from(&self, code: u32) -> Result<char, LiteralError> {
        char::from_u32(code).ok_or_else(|| self.error("escape is not a valid character"))
    }

    fn parse_number(&mut self) -> Result<Value, LiteralError> {
        let start = self.pos;
        let negative = match self.peek() {
            Some('-') => {
                self.bump();
                true
            }
            Some('+') => {
                self.bump();
                false
            }
            _ => false,
        };

        if self.peek() == Some('0') && matches!(self.peek_second(), Some('x' | 'X')) {
            self.pos += 2;
            let digits_start = self.pos;
            while self.peek().is_some_and(|c| c.is_ascii_hexdigit()) {
                self.bump();
            }
            let magnitude = i64::from_str_radix(&self.src[digits_start..self.pos], 16)
                .map_err(|_| self.error_at(start, "invalid hex number"))?;
            return Ok(Value::from(if negative { -magnitude } else { magnitude }));
        }

        let digits_start = self.pos;
        let mut is_float = false;
        while let Some(c) = self.peek() {
            match c {
                '0'..='9' => {}
                '.' if !is_float => is_float = true,
                'e' | 'E' => {
                    is_float = true;
                    self.bump();
                    if matches!(self.peek(), Some('+' | '-')) {
                        self.bump();
                    }
                    continue;
                }
                _ => break,
            }
            self.bump();
        }

        let text = &self.src[digits_start..self.pos];
        if !text.chars().any(|c| c.is_ascii_digit()) {
            let message = if text.is_empty() {
                "expected a number"
            } else {
                "malformed number"
            };
            return Err(self.error_at(start, message));
        }
        if self.peek().is_some_and(is_ident_start) {
            return Err(self.error_at(start, "malformed number"));
        }

        if !is_float
            && let Ok(magnitude) = text.parse::<i64>()
        {
            return Ok(Value::from(if negative { -magnitude } else { magnitude }));
        }

        let magnitude: f64 = text
            .parse()
            .map_err(|_| self.error_at(start, "malformed number"))?;
        let value = if negative { -magnitude } else { magnitude };
        Number::from_f64(value)
            .map(Value::Number)
            .ok_or_else(|| self.error_at(start, "number is not finite"))
    }

    fn error_at(&self, offset: usize, message: &str) -> LiteralError {
        LiteralError {
            offset,
            message: message.to_string(),
        }
    }
}

fn is_ident_start(c: char) -> bool {
    c == '_' || c == '$' || c.is_alphabetic()
}

fn is_ident_continue(c: char) -> bool {
    is_ident_start(c) || c.is_alphanumeric()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_parse_js_object_literal() {
        let src = r#"{
            title: 'Q4 Review',
            "date": "2024-01-01",
            type: `report`, // trailing comment
            /* block */ draft: false,
            weight: -3,
            ratio: 2.5e1,
            tags: ['a', "b",],
        }"#;

        let value = parse_literal(src).expect("parse");
        assert_eq!(
            value,
            json!({
                "title": "Q4 Review",
                "date": "2024-01-01",
                "type": "report",
                "draft": false,
                "weight": -3,
                "ratio": 25.0,
                "tags": ["a", "b"],
            })
        );
    }

    #[test]
    fn test_parse_array_of_records() {
        let value = parse_literal("[{name: 'Q1', value: 10}, {name: 'Q2', value: .5}]")
            .expect("parse");
        assert_eq!(
            value,
            json!([{"name": "Q1", "value": 10}, {"name": "Q2", "value": 0.5}])
        );
    }

    #[test]
    fn test_string_escapes() {
        let value = parse_literal(r#"'it\'s A\x42 \u{1F600} 😀'"#).expect("parse");
        assert_eq!(value, json!("it's AB 😀 😀"));
    }

    #[test]
    fn test_hex_and_signed_numbers() {
        assert_eq!(parse_literal("0xff").expect("parse"), json!(255));
        assert_eq!(parse_literal("+7").expect("parse"), json!(7));
        assert_eq!(parse_literal("-0.25").expect("parse"), json!(-0.25));
    }

    #[test]
    fn test_rejects_code() {
        for src in [
            "{ title: process.exit(1) }",
            "{ date: new Date() }",
            "{ value: NaN }",
            "{ value: Infinity }",
            "{ ...other }",
            "{ [key]: 1 }",
            "{ title }",
            "`${danger}`",
            "require('fs')",
        ] {
            assert!(parse_literal(src).is_err(), "accepted {src}");
        }
    }

    #[test]
    fn test_error_offset_points_at_expression() {
        let err = parse_literal("{ title: foo }").unwrap_err();
        assert_eq!(err.offset, 9);
        assert!(err.to_string().contains("unsupported expression `foo`"));
    }

    #[test]
    fn test_unterminated_inputs() {
        assert!(parse_literal("{ title: 'open").is_err());
        assert!(parse_literal("[1, 2").is_err());
        assert!(parse_literal("/* never closed").is_err());
        assert!(parse_literal("").is_err());
    }

    #[test]
    fn test_trailing_input_rejected() {
        assert!(parse_literal("{} extra").is_err());
        assert!(parse_literal("{} // fine").is_ok());
    }

    #[test]
    fn test_prefix_reports_consumed_length() {
        let src = "{a: {b: 1}} rest";
        let (value, used) = parse_literal_prefix(src).expect("parse");
        assert_eq!(value, json!({"a": {"b": 1}}));
        assert_eq!(&src[used..], " rest");
    }

    #[test]
    fn test_depth_limit() {
        let src = "[".repeat(MAX_DEPTH + 2) + &"]".repeat(MAX_DEPTH + 2);
        let err = parse_literal(&src).unwrap_err();
        assert!(err.message.contains("nested too deeply"));
    }
}
