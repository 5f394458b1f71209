//! Strips insignificant whitespace and `//` / `/* */` comments from a
//! JSON-with-comments byte buffer, in place. This is the only place in the
//! crate that tolerates comments — [`crate::parser`] rejects them.

/// Compacts `bytes` in place: a single left-to-right pass with a read and a
/// write cursor into the same allocation, followed by a `truncate` to the
/// final length, rather than building a second buffer.
pub fn minify_in_place(bytes: &mut Vec<u8>) {
    let mut write = 0;
    let mut read = 0;
    let len = bytes.len();

    while read < len {
        match bytes[read] {
            b' ' | b'\t' | b'\r' | b'\n' => {
                read += 1;
            }
            b'/' if bytes.get(read + 1) == Some(&b'/') => {
                read += 2;
                while read < len && bytes[read] != b'\n' {
                    read += 1;
                }
            }
            b'/' if bytes.get(read + 1) == Some(&b'*') => {
                read += 2;
                while read < len && !(bytes[read] == b'*' && bytes.get(read + 1) == Some(&b'/')) {
                    read += 1;
                }
                read = (read + 2).min(len);
            }
            b'"' => {
                let start = read;
                read += 1;
                while read < len {
                    match bytes[read] {
                        b'\\' if read + 1 < len => read += 2,
                        b'"' => {
                            read += 1;
                            break;
                        }
                        _ => read += 1,
                    }
                }
                bytes.copy_within(start..read, write);
                write += read - start;
            }
            byte => {
                bytes[write] = byte;
                write += 1;
                read += 1;
            }
        }
    }

    bytes.truncate(write);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minify(s: &str) -> String {
        let mut bytes = s.as_bytes().to_vec();
        minify_in_place(&mut bytes);
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn strips_whitespace_outside_strings() {
        assert_eq!(minify("{ \"a\" : 1 }"), "{\"a\":1}");
    }

    #[test]
    fn strips_line_comments() {
        assert_eq!(minify("{\"a\":1} // trailing\n"), "{\"a\":1}");
    }

    #[test]
    fn strips_block_comments() {
        assert_eq!(minify("{/* c */\"a\":1}"), "{\"a\":1}");
    }

    #[test]
    fn preserves_whitespace_and_escapes_inside_strings() {
        assert_eq!(minify(r#"{"a": "x \" y  z"}"#), r#"{"a":"x \" y  z"}"#);
    }

    #[test]
    fn is_a_fixpoint_on_already_minified_input() {
        let once = minify(r#"{"a":[1,2,"//not a comment"]}"#);
        let twice = minify(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn slash_inside_string_is_not_treated_as_comment() {
        assert_eq!(minify(r#"{"url":"http://example.com"}"#), r#"{"url":"http://example.com"}"#);
    }
}
