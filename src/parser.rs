//! Recursive-descent JSON parser.
//!
//! Works directly on a `&[u8]` rather than delegating to a general-purpose
//! tokenizer: several of the lenient quirks below (an `e`/`E` with no
//! exponent digits still being consumed, a lone UTF-16 surrogate being
//! silently dropped) are load-bearing compatibility behavior that a strict
//! JSON tokenizer would reject.

use std::cell::Cell;

use crate::array::Array;
use crate::error::{Error, Result};
use crate::lex::{self, UnicodeEscape};
use crate::object::Object;
use crate::value::Value;

thread_local! {
    static LAST_ERROR_POSITION: Cell<Option<usize>> = Cell::new(None);
}

/// Byte offset of the most recent parse failure on this thread, if any.
pub fn last_error_position() -> Option<usize> {
    LAST_ERROR_POSITION.with(|cell| cell.get())
}

fn fail(msg: &str, pos: usize) -> Error {
    LAST_ERROR_POSITION.with(|cell| cell.set(Some(pos)));
    Error::syntax(msg, pos)
}

/// Parses `bytes` as a single JSON value. Trailing bytes after the value
/// (other than whitespace) are ignored.
pub fn parse(bytes: &[u8]) -> Result<Value> {
    Ok(parse_with_options(bytes, false)?.0)
}

/// Parses `bytes` as a single JSON value, returning the position parsing
/// stopped at. If `require_fully_consumed` is set, anything other than
/// trailing whitespace after the value is an error.
pub fn parse_with_options(bytes: &[u8], require_fully_consumed: bool) -> Result<(Value, usize)> {
    if let Err(pos) = validate_utf8(bytes) {
        return Err(fail("invalid utf-8", pos));
    }

    let pos = lex::skip_whitespace(bytes, 0);
    let (value, pos) = parse_value(bytes, pos)?;
    let pos = lex::skip_whitespace(bytes, pos);

    if require_fully_consumed && pos != bytes.len() {
        return Err(fail("unexpected trailing data", pos));
    }

    Ok((value, pos))
}

fn validate_utf8(bytes: &[u8]) -> std::result::Result<(), usize> {
    if faster_utf8_validator::validate(bytes) {
        Ok(())
    } else {
        // The validator only says yes/no; std's own incremental check
        // agrees on what counts as valid and also hands back an offset.
        match std::str::from_utf8(bytes) {
            Err(e) => Err(e.valid_up_to()),
            Ok(_) => Err(0),
        }
    }
}

fn parse_value(bytes: &[u8], pos: usize) -> Result<(Value, usize)> {
    match bytes.get(pos) {
        Some(b'n') => parse_literal(bytes, pos, b"null", Value::Null),
        Some(b't') => parse_literal(bytes, pos, b"true", Value::Bool(true)),
        Some(b'f') => parse_literal(bytes, pos, b"false", Value::Bool(false)),
        Some(b'"') => {
            let (s, pos) = parse_string(bytes, pos)?;
            Ok((Value::String(s), pos))
        }
        Some(b'-') | Some(b'0'..=b'9') => {
            let (n, pos) = parse_number(bytes, pos)?;
            Ok((Value::number(n), pos))
        }
        Some(b'[') => parse_array(bytes, pos),
        Some(b'{') => parse_object(bytes, pos),
        _ => Err(fail("unexpected character", pos)),
    }
}

fn parse_literal(bytes: &[u8], pos: usize, literal: &[u8], value: Value) -> Result<(Value, usize)> {
    let end = pos + literal.len();
    if bytes.get(pos..end) == Some(literal) {
        Ok((value, end))
    } else {
        Err(fail("invalid literal", pos))
    }
}

fn parse_number(bytes: &[u8], start: usize) -> Result<(f64, usize)> {
    let mut pos = start;
    let mut sign = 1.0f64;

    if bytes.get(pos) == Some(&b'-') {
        sign = -1.0;
        pos += 1;
    }

    let mantissa_start = pos;
    match bytes.get(pos) {
        Some(b'0') => pos += 1,
        Some(b'1'..=b'9') => {
            while matches!(bytes.get(pos), Some(b'0'..=b'9')) {
                pos += 1;
            }
        }
        _ => return Err(fail("invalid number", start)),
    }

    let mut mantissa = 0.0f64;
    for &b in &bytes[mantissa_start..pos] {
        mantissa = mantissa * 10.0 + (b - b'0') as f64;
    }

    let mut frac_scale = 0i32;
    if bytes.get(pos) == Some(&b'.') && matches!(bytes.get(pos + 1), Some(b'0'..=b'9')) {
        pos += 1;
        let frac_start = pos;
        while matches!(bytes.get(pos), Some(b'0'..=b'9')) {
            pos += 1;
        }
        for &b in &bytes[frac_start..pos] {
            mantissa = mantissa * 10.0 + (b - b'0') as f64;
        }
        frac_scale = -((pos - frac_start) as i32);
    }

    let mut exp_sign = 1i32;
    let mut exponent = 0i32;
    if matches!(bytes.get(pos), Some(b'e') | Some(b'E')) {
        pos += 1;
        match bytes.get(pos) {
            Some(b'+') => pos += 1,
            Some(b'-') => {
                exp_sign = -1;
                pos += 1;
            }
            _ => {}
        }
        // No digits after `e`/`E` is accepted; exponent stays 0.
        while matches!(bytes.get(pos), Some(b'0'..=b'9')) {
            exponent = exponent * 10 + (bytes[pos] - b'0') as i32;
            pos += 1;
        }
    }

    let value = sign * mantissa * 10f64.powi(frac_scale + exp_sign * exponent);
    Ok((value, pos))
}

fn parse_string(bytes: &[u8], start: usize) -> Result<(String, usize)> {
    debug_assert_eq!(bytes.get(start), Some(&b'"'));
    let mut pos = start + 1;
    let mut out = String::new();

    loop {
        match bytes.get(pos) {
            None => return Err(fail("unterminated string", start)),
            Some(b'"') => {
                pos += 1;
                break;
            }
            Some(b'\\') => {
                pos += 1;
                match bytes.get(pos) {
                    Some(b'"') => {
                        out.push('"');
                        pos += 1;
                    }
                    Some(b'\\') => {
                        out.push('\\');
                        pos += 1;
                    }
                    Some(b'/') => {
                        out.push('/');
                        pos += 1;
                    }
                    Some(b'b') => {
                        out.push('\u{0008}');
                        pos += 1;
                    }
                    Some(b'f') => {
                        out.push('\u{000C}');
                        pos += 1;
                    }
                    Some(b'n') => {
                        out.push('\n');
                        pos += 1;
                    }
                    Some(b'r') => {
                        out.push('\r');
                        pos += 1;
                    }
                    Some(b't') => {
                        out.push('\t');
                        pos += 1;
                    }
                    Some(b'u') => {
                        pos += 1;
                        match lex::decode_unicode_escape(bytes, pos) {
                            Some(UnicodeEscape::Scalar(c, extra)) => {
                                out.push(c);
                                pos += 4 + extra;
                            }
                            Some(UnicodeEscape::Dropped) => {
                                pos += 4;
                            }
                            None => return Err(fail("truncated unicode escape", pos)),
                        }
                    }
                    // Unknown escape: the escaped byte is taken literally,
                    // matching the permissive original.
                    Some(&other) => {
                        out.push(other as char);
                        pos += 1;
                    }
                    None => return Err(fail("unterminated string", start)),
                }
            }
            Some(_) => {
                // Find the run of plain bytes up to the next quote or
                // backslash and copy it in one shot.
                let run_start = pos;
                while !matches!(bytes.get(pos), None | Some(b'"') | Some(b'\\')) {
                    pos += 1;
                }
                // Safety: input was validated as UTF-8 up front, and this
                // run contains no string-delimiting byte, so it is itself
                // valid UTF-8.
                out.push_str(unsafe { std::str::from_utf8_unchecked(&bytes[run_start..pos]) });
            }
        }
    }

    Ok((out, pos))
}

fn parse_array(bytes: &[u8], start: usize) -> Result<(Value, usize)> {
    debug_assert_eq!(bytes.get(start), Some(&b'['));
    let mut pos = lex::skip_whitespace(bytes, start + 1);
    let mut array = Array::new();

    if bytes.get(pos) == Some(&b']') {
        return Ok((Value::Array(array), pos + 1));
    }

    loop {
        let (value, next) = parse_value(bytes, pos)?;
        array.push(value);
        pos = lex::skip_whitespace(bytes, next);

        match bytes.get(pos) {
            Some(b',') => {
                pos = lex::skip_whitespace(bytes, pos + 1);
            }
            Some(b']') => {
                pos += 1;
                break;
            }
            _ => return Err(fail("expected ',' or ']'", pos)),
        }
    }

    Ok((Value::Array(array), pos))
}

fn parse_object(bytes: &[u8], start: usize) -> Result<(Value, usize)> {
    debug_assert_eq!(bytes.get(start), Some(&b'{'));
    let mut pos = lex::skip_whitespace(bytes, start + 1);
    let mut object = Object::new();

    if bytes.get(pos) == Some(&b'}') {
        return Ok((Value::Object(object), pos + 1));
    }

    loop {
        if bytes.get(pos) != Some(&b'"') {
            return Err(fail("expected string key", pos));
        }
        let (key, next) = parse_string(bytes, pos)?;
        pos = lex::skip_whitespace(bytes, next);

        if bytes.get(pos) != Some(&b':') {
            return Err(fail("expected ':'", pos));
        }
        pos = lex::skip_whitespace(bytes, pos + 1);

        let (value, next) = parse_value(bytes, pos)?;
        object.add(key, value);
        pos = lex::skip_whitespace(bytes, next);

        match bytes.get(pos) {
            Some(b',') => {
                pos = lex::skip_whitespace(bytes, pos + 1);
            }
            Some(b'}') => {
                pos += 1;
                break;
            }
            _ => return Err(fail("expected ',' or '}'", pos)),
        }
    }

    Ok((Value::Object(object), pos))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_literals() {
        assert_eq!(parse(b"null").unwrap(), Value::Null);
        assert_eq!(parse(b"true").unwrap(), Value::Bool(true));
        assert_eq!(parse(b"false").unwrap(), Value::Bool(false));
    }

    #[test]
    fn parses_integers_and_floats() {
        assert_eq!(parse(b"42").unwrap().as_f64(), Some(42.0));
        assert_eq!(parse(b"-1.5").unwrap().as_f64(), Some(-1.5));
        assert_eq!(parse(b"1e3").unwrap().as_f64(), Some(1000.0));
        assert_eq!(parse(b"1e").unwrap().as_f64(), Some(1.0));
        assert_eq!(parse(b"1E+2").unwrap().as_f64(), Some(100.0));
    }

    #[test]
    fn parses_strings_with_escapes() {
        let v = parse(br#""a\nb\tc""#).unwrap();
        assert_eq!(v.as_str(), Some("a\nb\tc"));
    }

    #[test]
    fn parses_surrogate_pair() {
        let v = parse(br#""𝄞""#).unwrap();
        assert_eq!(v.as_str(), Some("\u{1D11E}"));
    }

    #[test]
    fn drops_lone_surrogate() {
        let v = parse(br#""a\uDC00b""#).unwrap();
        assert_eq!(v.as_str(), Some("ab"));
    }

    #[test]
    fn parses_nested_array_and_object() {
        let v = parse(br#"{"a":[1,2,{"b":true}]}"#).unwrap();
        let obj = v.as_object().unwrap();
        let arr = obj.get("a").unwrap().as_array().unwrap();
        assert_eq!(arr.len(), 3);
        assert_eq!(arr.at(2).unwrap().as_object().unwrap().get("b").unwrap(), &Value::Bool(true));
    }

    #[test]
    fn rejects_trailing_comma() {
        assert!(parse(b"[1,]").is_err());
        assert!(parse(b"{\"a\":1,}").is_err());
    }

    #[test]
    fn trailing_data_error_position() {
        let err = parse_with_options(b"  {\"a\":1} x", true).unwrap_err();
        assert_eq!(err.position(), Some(10));
        assert_eq!(last_error_position(), Some(10));
    }

    #[test]
    fn reports_position_of_bad_token() {
        let err = parse(b"[1, @]").unwrap_err();
        assert_eq!(err.position(), Some(4));
    }
}
