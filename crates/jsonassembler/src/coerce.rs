//! Escape normalization and primitive coercion.
//!
//! Both are lenient by construction: unknown escapes are kept verbatim and a
//! bare token that is neither a number nor a known literal becomes a string.

use crate::value::Value;

/// Whitespace that separates JSON tokens.
pub(crate) const JSON_WHITESPACE: &[char] = &[' ', '\n', '\t', '\r'];

/// Expand the backslash escapes of a raw string body.
///
/// `\n`, `\b`, `\r`, `\t`, `\f`, `\"`, `\\` and `\/` map to their single
/// characters and `\uXXXX` (including surrogate pairs) to the code point.
/// Anything else, including a trailing lone backslash or an unpaired
/// surrogate, is copied unchanged.
pub(crate) fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(pos) = rest.find('\\') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];
        let simple = match after.as_bytes().first() {
            Some(b'n') => Some('\n'),
            Some(b'b') => Some('\u{8}'),
            Some(b'r') => Some('\r'),
            Some(b't') => Some('\t'),
            Some(b'f') => Some('\u{c}'),
            Some(b'"') => Some('"'),
            Some(b'\\') => Some('\\'),
            Some(b'/') => Some('/'),
            _ => None,
        };
        if let Some(ch) = simple {
            out.push(ch);
            rest = &after[1..];
            continue;
        }
        if let Some((ch, used)) = after.strip_prefix('u').and_then(decode_unicode) {
            out.push(ch);
            rest = &after[1 + used..];
            continue;
        }
        out.push('\\');
        rest = after;
    }
    out.push_str(rest);
    out
}

fn hex4(s: &str) -> Option<u32> {
    let digits = s.get(..4)?;
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(digits, 16).ok()
}

/// Decode the hex digits following `\u`, returning the character and the
/// number of bytes consumed after the `u`.
fn decode_unicode(s: &str) -> Option<(char, usize)> {
    let hi = hex4(s)?;
    if (0xD800..0xDC00).contains(&hi) {
        let lo = s[4..].strip_prefix("\\u").and_then(hex4)?;
        if !(0xDC00..0xE000).contains(&lo) {
            return None;
        }
        let code = 0x10000 + ((hi - 0xD800) << 10) + (lo - 0xDC00);
        return char::from_u32(code).map(|ch| (ch, 10));
    }
    char::from_u32(hi).map(|ch| (ch, 4))
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Parse the longest numeric prefix of `text`, the way JavaScript's
/// `parseFloat` does.
///
/// Leading whitespace is ignored and trailing garbage is dropped, so `"12px"`
/// reads as `12`. `Infinity` with an optional sign is accepted. Returns
/// `None` when no digits start the text.
pub(crate) fn parse_float_prefix(text: &str) -> Option<f64> {
    let s = text.trim_start_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
    let bytes = s.as_bytes();
    let signed = matches!(bytes.first(), Some(b'+' | b'-'));
    let mut end = usize::from(signed);

    if s[end..].starts_with("Infinity") {
        return Some(if bytes[0] == b'-' {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;
    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits + frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits + frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    s[..end].parse().ok()
}

/// Turn the raw text of a bare token into a value.
///
/// Precedence: number (numeric prefix), `true`/`false`, `null`, `undefined`,
/// and finally the text itself as a string.
pub(crate) fn coerce_primitive(raw: &str) -> Value {
    let cleaned = raw.replace("\\n", "");
    let token = cleaned.trim_matches(JSON_WHITESPACE);

    if let Some(n) = parse_float_prefix(token) {
        return Value::Number(n);
    }
    match token {
        "true" => Value::Boolean(true),
        "false" => Value::Boolean(false),
        "null" => Value::Null,
        "undefined" => Value::Undefined,
        // Unquoted text is kept rather than rejected.
        other => Value::String(other.to_string()),
    }
}
