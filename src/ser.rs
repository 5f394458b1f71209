//! Recursive renderer: walks a [`Value`] and writes JSON bytes into a
//! [`Buffer`], either compact or pretty. There is exactly one rendering
//! code path — the original design's separate "buffered" and "per-node"
//! string-concatenation algorithms collapse into one here, since `Buffer`'s
//! amortized-growth append already makes repeated child writes cheap
//! whether or not the caller keeps the buffer around afterward.

use crate::buffer::Buffer;
use crate::error::Result;
use crate::number::Number;
use crate::value::Value;

/// Renders `value` to a freshly allocated `String`.
pub fn to_string(value: &Value, pretty: bool) -> String {
    let mut buffer = Buffer::new();
    // A `Buffer` only fails to grow under `try_reserve` allocation failure;
    // writing to process memory we already hold never does.
    write(value, &mut buffer, pretty, 0).expect("in-memory serialization cannot fail");
    unsafe { buffer.into_string_unchecked() }
}

/// Renders `value` into the caller's `buffer`, appending at its current
/// length. Returns `Err` only on allocation failure, leaving the buffer's
/// prior contents intact but its new (partial) tail in an unspecified state.
pub fn to_string_buffered(value: &Value, buffer: &mut Buffer, pretty: bool) -> Result<()> {
    write(value, buffer, pretty, 0)
}

fn write(value: &Value, out: &mut Buffer, pretty: bool, depth: usize) -> Result<()> {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(true) => out.push_str("true"),
        Value::Bool(false) => out.push_str("false"),
        Value::Number(n) => write_number(n, out),
        Value::String(s) => write_escaped_string(s, out),
        Value::Array(a) => {
            out.push(b'[')?;
            for child in a.iter() {
                write(child, out, pretty, depth)?;
                out.push_str(if pretty { ", " } else { "," })?;
            }
            if !a.is_empty() {
                // Matches this codebase's `Buffer::undo_comma`: write the
                // separator after every element, then strip the trailing
                // one instead of tracking "is this the last element".
                unsafe {
                    if pretty {
                        out.undo_byte(b' ');
                    }
                    out.undo_comma();
                }
            }
            out.push(b']')
        }
        Value::Object(o) => {
            out.push(b'{')?;
            let len = o.len();
            for (i, (key, child)) in o.iter().enumerate() {
                if pretty {
                    out.extend_repeating(b'\t', depth + 1)?;
                }
                write_escaped_string(key, out)?;
                out.push(b':')?;
                if pretty {
                    out.push(b'\t')?;
                }
                write(child, out, pretty, depth + 1)?;
                if i + 1 < len {
                    out.push(b',')?;
                }
                if pretty {
                    out.push(b'\n')?;
                }
            }
            if pretty {
                // A non-empty object closes at `depth` tabs (one less than
                // its entries' `depth + 1`); an empty one never incremented
                // past `depth` in the first place, so it closes one tab
                // shallower still — see the "empty object" design note.
                let closing_depth = if len == 0 { depth.saturating_sub(1) } else { depth };
                out.extend_repeating(b'\t', closing_depth)?;
            }
            out.push(b'}')
        }
    }
}

fn write_escaped_string(s: &str, out: &mut Buffer) -> Result<()> {
    out.push(b'"')?;

    let bytes = s.as_bytes();
    let mut start = 0;
    for (i, &byte) in bytes.iter().enumerate() {
        let escape = match byte {
            b'"' => Some("\\\""),
            b'\\' => Some("\\\\"),
            0x08 => Some("\\b"),
            0x0C => Some("\\f"),
            b'\n' => Some("\\n"),
            b'\r' => Some("\\r"),
            b'\t' => Some("\\t"),
            0x00..=0x1F => None, // handled below, needs \u00XX
            _ => continue,
        };

        if start < i {
            out.push_str(&s[start..i])?;
        }
        match escape {
            Some(seq) => out.push_str(seq)?,
            None => write_control_escape(byte, out)?,
        }
        start = i + 1;
    }
    if start < bytes.len() {
        out.push_str(&s[start..])?;
    }

    out.push(b'"')
}

fn write_control_escape(byte: u8, out: &mut Buffer) -> Result<()> {
    const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";
    out.push_str("\\u00")?;
    out.push(HEX_DIGITS[(byte >> 4) as usize])?;
    out.push(HEX_DIGITS[(byte & 0xF) as usize])
}

fn write_number(n: &Number, out: &mut Buffer) -> Result<()> {
    let d = n.as_f64();

    if !d.is_finite() {
        return out.push_str("null");
    }
    if d == 0.0 {
        return out.push_str("0");
    }

    if d.fract() == 0.0 && d >= i32::MIN as f64 && d <= i32::MAX as f64 {
        return out.push_str(itoa::Buffer::new().format(d as i32));
    }

    if d.fract() == 0.0 && d.abs() < 1e60 {
        out.push_str(&format!("{:.0}", d))
    } else if d.abs() < 1e-6 || d.abs() > 1e9 {
        out.push_str(&format_scientific(d))
    } else {
        out.push_str(&format!("{}", d))
    }
}

/// Formats `d` the way C's `%e` would: one leading digit, a decimal point,
/// six fraction digits, and a signed two-or-more-digit exponent.
fn format_scientific(d: f64) -> String {
    let s = format!("{:e}", d);
    // Rust's `{:e}` yields e.g. "1.5e-7" or "1e9"; normalize to printf's
    // "%e" shape: exactly six fraction digits and a signed exponent with
    // at least two digits.
    let (mantissa, exponent) = s.split_once('e').expect("exponential format has an 'e'");
    let exponent: i32 = exponent.parse().expect("exponent is a valid integer");

    let (int_part, frac_part) = match mantissa.split_once('.') {
        Some((i, f)) => (i, f),
        None => (mantissa, ""),
    };
    let mut frac = frac_part.to_string();
    frac.truncate(6);
    while frac.len() < 6 {
        frac.push('0');
    }

    format!(
        "{}.{}e{}{:02}",
        int_part,
        frac,
        if exponent < 0 { "-" } else { "+" },
        exponent.abs()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::array::Array;
    use crate::object::Object;

    #[test]
    fn renders_scalars() {
        assert_eq!(to_string(&Value::null(), false), "null");
        assert_eq!(to_string(&Value::bool(true), false), "true");
        assert_eq!(to_string(&Value::bool(false), false), "false");
        assert_eq!(to_string(&Value::number(0.0), false), "0");
        assert_eq!(to_string(&Value::number(42.0), false), "42");
        assert_eq!(to_string(&Value::number(1.5), false), "1.5");
    }

    #[test]
    fn integer_valued_double_has_no_decimal_point() {
        assert_eq!(to_string(&Value::number(1920.0), false), "1920");
        assert_eq!(to_string(&Value::number(-1.0), false), "-1");
    }

    #[test]
    fn tiny_and_huge_magnitudes_use_scientific_form() {
        let s = to_string(&Value::number(1e-7), false);
        assert!(s.contains('e'), "{s}");
        // Not integral, so this stays in the `%e` branch instead of the
        // `%.0f` one that integral magnitudes above 1e9 take.
        let s = to_string(&Value::number(1234567890.5), false);
        assert!(s.contains('e'), "{s}");
    }

    #[test]
    fn non_finite_serializes_as_null() {
        assert_eq!(to_string(&Value::number(f64::NAN), false), "null");
        assert_eq!(to_string(&Value::number(f64::INFINITY), false), "null");
    }

    #[test]
    fn escapes_control_bytes_and_quote_and_backslash() {
        let s = to_string(&Value::string("a\"b\\c\nd\u{01}e"), false);
        assert_eq!(s, "\"a\\\"b\\\\c\\nd\\u0001e\"");
    }

    #[test]
    fn compact_array_has_no_spaces() {
        let mut a = Array::new();
        a.push(Value::number(1.0));
        a.push(Value::number(2.0));
        assert_eq!(to_string(&Value::Array(a), false), "[1,2]");
    }

    #[test]
    fn pretty_array_separates_with_comma_space() {
        let mut a = Array::new();
        a.push(Value::number(1.0));
        a.push(Value::number(2.0));
        assert_eq!(to_string(&Value::Array(a), true), "[1, 2]");
    }

    #[test]
    fn empty_array_and_object() {
        assert_eq!(to_string(&Value::array(), false), "[]");
        assert_eq!(to_string(&Value::object(), false), "{}");
        assert_eq!(to_string(&Value::object(), true), "{}");
    }

    #[test]
    fn pretty_object_uses_tab_indentation() {
        let mut o = Object::new();
        o.add_number("a", 1.0);
        let mut inner = Object::new();
        inner.add_bool("b", true);
        o.add("nested", Value::Object(inner));
        let s = to_string(&Value::Object(o), true);
        assert_eq!(
            s,
            "{\t\"a\":\t1,\n\t\"nested\":\t{\t\t\"b\":\ttrue\n\t}\n}"
        );
    }

    #[test]
    fn pretty_empty_nested_object_closes_one_tab_shallower() {
        let mut outer = Object::new();
        outer.add("empty", Value::object());
        let s = to_string(&Value::Object(outer), true);
        // "empty" is written at depth 1; an empty object at that depth
        // closes at depth.saturating_sub(1) == 0 tabs.
        assert_eq!(s, "{\t\"empty\":\t{}\n}");
    }

    #[test]
    fn scenario_image_document_round_trips_compact() {
        let input = r#"{"Image":{"Width":800,"Height":600,"Title":"View from 15th Floor","Thumbnail":{"Url":"http://www.example.com/image/481989943","Height":125,"Width":"100"},"IDs":[116,943,234,38793]}}"#;
        let value = crate::parser::parse(input.as_bytes()).unwrap();
        assert_eq!(to_string(&value, false), input);
    }
}
