//! # Go String Literals
//!
//! Quoting and unquoting rules for Go string literals, used both for the
//! struct tag literal itself and for the quoted values inside a tag.

/// Unquotes a Go string literal, raw (`` `...` ``) or interpreted (`"..."`).
pub fn unquote(literal: &str) -> Result<String, String> {
    if literal.len() < 2 {
        return Err(format!("invalid string literal `{}`", literal));
    }

    let body = &literal[1..literal.len() - 1];
    match (literal.chars().next(), literal.chars().last()) {
        (Some('`'), Some('`')) => {
            if body.contains('`') {
                return Err("unexpected backquote in raw string".into());
            }
            // Carriage returns are discarded from raw strings.
            Ok(body.replace('\r', ""))
        }
        (Some('"'), Some('"')) => unescape(body),
        _ => Err(format!("invalid string literal `{}`", literal)),
    }
}

/// Quotes a string the way Go's `%q` verb does.
pub fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\x07' => out.push_str("\\a"),
            '\x08' => out.push_str("\\b"),
            '\x0c' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\x0b' => out.push_str("\\v"),
            c if (c as u32) < 0x20 || c == '\x7f' => {
                out.push_str(&format!("\\x{:02x}", c as u32));
            }
            c if c.is_control() => {
                if (c as u32) <= 0xffff {
                    out.push_str(&format!("\\u{:04x}", c as u32));
                } else {
                    out.push_str(&format!("\\U{:08x}", c as u32));
                }
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Wraps rendered tag text in the literal form used for struct tags.
///
/// Raw backquoted literals are preferred; text that cannot be expressed as a
/// raw literal falls back to an interpreted one.
pub fn wrap_tag_literal(text: &str) -> String {
    if text.contains('`') || text.contains('\r') {
        quote(text)
    } else {
        format!("`{}`", text)
    }
}

fn unescape(body: &str) -> Result<String, String> {
    let mut out: Vec<u8> = Vec::with_capacity(body.len());
    let mut chars = body.chars();

    while let Some(c) = chars.next() {
        match c {
            '"' => return Err("unescaped quote in string".into()),
            '\n' => return Err("newline in string".into()),
            '\\' => {}
            c => {
                push_char(&mut out, c);
                continue;
            }
        }

        let escape = chars.next().ok_or("trailing backslash")?;
        match escape {
            'a' => out.push(0x07),
            'b' => out.push(0x08),
            'f' => out.push(0x0c),
            'n' => out.push(b'\n'),
            'r' => out.push(b'\r'),
            't' => out.push(b'\t'),
            'v' => out.push(0x0b),
            '\\' => out.push(b'\\'),
            '"' => out.push(b'"'),
            'x' => {
                let value = read_digits(&mut chars, 2, 16)?;
                out.push(value as u8);
            }
            '0'..='7' => {
                let first = escape.to_digit(8).unwrap_or(0);
                let rest = read_digits(&mut chars, 2, 8)?;
                let value = first * 64 + rest;
                if value > 0xff {
                    return Err("octal escape value > 255".into());
                }
                out.push(value as u8);
            }
            'u' | 'U' => {
                let width = if escape == 'u' { 4 } else { 8 };
                let value = read_digits(&mut chars, width, 16)?;
                let c = char::from_u32(value).ok_or("escape sequence is invalid Unicode code point")?;
                push_char(&mut out, c);
            }
            other => return Err(format!("unknown escape sequence `\\{}`", other)),
        }
    }

    String::from_utf8(out).map_err(|_| "string is not valid UTF-8".into())
}

fn read_digits(chars: &mut std::str::Chars<'_>, count: usize, radix: u32) -> Result<u32, String> {
    let mut value = 0u32;
    for _ in 0..count {
        let digit = chars
            .next()
            .and_then(|c| c.to_digit(radix))
            .ok_or("invalid character in escape sequence")?;
        value = value * radix + digit;
    }
    Ok(value)
}

fn push_char(out: &mut Vec<u8>, c: char) {
    let mut buf = [0u8; 4];
    out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unquote_raw() {
        assert_eq!(unquote("`json:\"id\"`").unwrap(), "json:\"id\"");
        assert_eq!(unquote("``").unwrap(), "");
        assert_eq!(unquote("`a\r\nb`").unwrap(), "a\nb");
    }

    #[test]
    fn test_unquote_interpreted() {
        assert_eq!(unquote(r#""json:\"id\"""#).unwrap(), "json:\"id\"");
        assert_eq!(unquote(r#""\x41\101é\t""#).unwrap(), "AAé\t");
        assert_eq!(unquote(r#""""#).unwrap(), "");
    }

    #[test]
    fn test_unquote_rejects_bad_literals() {
        assert!(unquote("\"").is_err());
        assert!(unquote("'a'").is_err());
        assert!(unquote(r#""a"b""#).is_err());
        assert!(unquote(r#""\q""#).is_err());
        assert!(unquote(r#""\x4""#).is_err());
        assert!(unquote(r#""\400""#).is_err());
        assert!(unquote(r#""\xff""#).is_err());
        assert!(unquote("`a`b`").is_err());
    }

    #[test]
    fn test_quote() {
        assert_eq!(quote("fieldName,omitempty"), r#""fieldName,omitempty""#);
        assert_eq!(quote(r#"a"b\c"#), r#""a\"b\\c""#);
        assert_eq!(quote("tab\there\n"), r#""tab\there\n""#);
        assert_eq!(quote("\x01"), r#""\x01""#);
        assert_eq!(quote("größe"), "\"größe\"");
    }

    #[test]
    fn test_wrap_tag_literal() {
        assert_eq!(wrap_tag_literal("yaml:\"-\""), "`yaml:\"-\"`");
        assert_eq!(
            wrap_tag_literal("doc:\"`x`\""),
            r#""doc:\"`x`\"""#
        );
    }
}
